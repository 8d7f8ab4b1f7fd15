//! Query operand model.
//!
//! A clause argument is one of four things: a typed synonym, a literal name,
//! a literal statement number, or unconstrained. The query parser builds
//! these from validated query text; retrieval dispatch in the evaluator
//! branches on the operand shapes.

use serde::{Deserialize, Serialize};

use crate::entity::EntityType;

/// A declared query synonym: a name bound to an [`EntityType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Declaration {
    pub synonym: String,
    pub entity_type: EntityType,
}

impl Declaration {
    pub fn new(synonym: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            synonym: synonym.into(),
            entity_type,
        }
    }
}

/// One argument of a clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operand {
    /// A typed synonym.
    Declaration(Declaration),
    /// A literal variable or procedure name.
    Ident(String),
    /// A literal statement number.
    StmtNum(u32),
    /// Unconstrained (`_`).
    Wildcard,
}

impl Operand {
    pub fn declaration(synonym: impl Into<String>, entity_type: EntityType) -> Self {
        Operand::Declaration(Declaration::new(synonym, entity_type))
    }

    pub fn as_declaration(&self) -> Option<&Declaration> {
        match self {
            Operand::Declaration(decl) => Some(decl),
            _ => None,
        }
    }

    /// The synonym name, if this operand is a declaration.
    pub fn synonym(&self) -> Option<&str> {
        self.as_declaration().map(|d| d.synonym.as_str())
    }

    pub fn is_synonym(&self) -> bool {
        matches!(self, Operand::Declaration(_))
    }

    /// Literal name or statement number (anything that pins one value).
    pub fn is_literal(&self) -> bool {
        matches!(self, Operand::Ident(_) | Operand::StmtNum(_))
    }
}
