//! Entity kinds of the analyzed program.

use serde::{Deserialize, Serialize};

/// The kind of entity a query synonym ranges over.
///
/// `Stmt` and `ProgLine` are *aggregate* statement types: every concrete
/// statement subtype (`Assign`, `If`, `While`, `Call`, `Print`, `Read`) is
/// also a member of both. `Var`, `Const` and `Proc` are non-statement
/// entity kinds with their own value spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Stmt,
    Assign,
    If,
    While,
    ProgLine,
    Call,
    Print,
    Read,
    Var,
    Const,
    Proc,
}

impl EntityType {
    /// The concrete statement subtypes, i.e. the legal arguments to
    /// statement typing.
    pub const STATEMENT_SUBTYPES: [EntityType; 6] = [
        EntityType::Assign,
        EntityType::If,
        EntityType::While,
        EntityType::Call,
        EntityType::Print,
        EntityType::Read,
    ];

    /// True for the concrete statement subtypes. A statement index has at
    /// most one of these, assigned write-once.
    pub fn is_statement_subtype(self) -> bool {
        matches!(
            self,
            EntityType::Assign
                | EntityType::If
                | EntityType::While
                | EntityType::Call
                | EntityType::Print
                | EntityType::Read
        )
    }

    /// True for the aggregate statement types every statement belongs to.
    pub fn is_aggregate_statement(self) -> bool {
        matches!(self, EntityType::Stmt | EntityType::ProgLine)
    }

    /// True when values of this type are statement indices (as opposed to
    /// variable/procedure names or constant values).
    pub fn is_statement_kind(self) -> bool {
        !matches!(self, EntityType::Var | EntityType::Const | EntityType::Proc)
    }
}
