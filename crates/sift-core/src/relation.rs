//! Relationship kinds and their immutable metadata.
//!
//! Each relation declares the legal left/right [`EntityType`]s of its
//! operands. Semantic validation of queries happens upstream; the fact store
//! consumes this metadata only to pick value spaces and filter results.

use serde::{Deserialize, Serialize};

use crate::entity::EntityType;

/// The 16 directed binary relation kinds over the analyzed program.
///
/// Every base relation has a transitive-closure ("starred") variant; the
/// `Bip` variants follow inter-procedural (branch-into-procedure) control
/// flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Follows,
    FollowsStar,
    Parent,
    ParentStar,
    Uses,
    Modifies,
    Calls,
    CallsStar,
    Next,
    NextStar,
    Affects,
    AffectsStar,
    NextBip,
    NextBipStar,
    AffectsBip,
    AffectsBipStar,
}

const ANY_STATEMENT: &[EntityType] = &[
    EntityType::Stmt,
    EntityType::ProgLine,
    EntityType::Assign,
    EntityType::If,
    EntityType::While,
    EntityType::Call,
    EntityType::Print,
    EntityType::Read,
];

// Uses has no Read on the left (a read statement uses nothing); Modifies has
// no Print (a print statement modifies nothing). Both admit procedures.
const USES_LEFT: &[EntityType] = &[
    EntityType::Stmt,
    EntityType::ProgLine,
    EntityType::Assign,
    EntityType::If,
    EntityType::While,
    EntityType::Call,
    EntityType::Print,
    EntityType::Proc,
];

const MODIFIES_LEFT: &[EntityType] = &[
    EntityType::Stmt,
    EntityType::ProgLine,
    EntityType::Assign,
    EntityType::If,
    EntityType::While,
    EntityType::Call,
    EntityType::Read,
    EntityType::Proc,
];

const VAR_ONLY: &[EntityType] = &[EntityType::Var];
const PROC_ONLY: &[EntityType] = &[EntityType::Proc];

const ASSIGN_STATEMENT: &[EntityType] =
    &[EntityType::Assign, EntityType::Stmt, EntityType::ProgLine];

impl RelationshipType {
    pub const ALL: [RelationshipType; 16] = [
        RelationshipType::Follows,
        RelationshipType::FollowsStar,
        RelationshipType::Parent,
        RelationshipType::ParentStar,
        RelationshipType::Uses,
        RelationshipType::Modifies,
        RelationshipType::Calls,
        RelationshipType::CallsStar,
        RelationshipType::Next,
        RelationshipType::NextStar,
        RelationshipType::Affects,
        RelationshipType::AffectsStar,
        RelationshipType::NextBip,
        RelationshipType::NextBipStar,
        RelationshipType::AffectsBip,
        RelationshipType::AffectsBipStar,
    ];

    /// Legal entity types of the left operand.
    pub fn left_domain(self) -> &'static [EntityType] {
        match self {
            RelationshipType::Uses => USES_LEFT,
            RelationshipType::Modifies => MODIFIES_LEFT,
            RelationshipType::Calls | RelationshipType::CallsStar => PROC_ONLY,
            RelationshipType::Affects
            | RelationshipType::AffectsStar
            | RelationshipType::AffectsBip
            | RelationshipType::AffectsBipStar => ASSIGN_STATEMENT,
            _ => ANY_STATEMENT,
        }
    }

    /// Legal entity types of the right operand.
    pub fn right_domain(self) -> &'static [EntityType] {
        match self {
            RelationshipType::Uses | RelationshipType::Modifies => VAR_ONLY,
            RelationshipType::Calls | RelationshipType::CallsStar => PROC_ONLY,
            RelationshipType::Affects
            | RelationshipType::AffectsStar
            | RelationshipType::AffectsBip
            | RelationshipType::AffectsBipStar => ASSIGN_STATEMENT,
            _ => ANY_STATEMENT,
        }
    }

    /// True for the transitive-closure variants.
    pub fn is_starred(self) -> bool {
        matches!(
            self,
            RelationshipType::FollowsStar
                | RelationshipType::ParentStar
                | RelationshipType::CallsStar
                | RelationshipType::NextStar
                | RelationshipType::AffectsStar
                | RelationshipType::NextBipStar
                | RelationshipType::AffectsBipStar
        )
    }

    /// True for the four Affects variants. These are exempt from the
    /// map-retrieval subtype filter.
    pub fn is_affects_family(self) -> bool {
        matches!(
            self,
            RelationshipType::Affects
                | RelationshipType::AffectsStar
                | RelationshipType::AffectsBip
                | RelationshipType::AffectsBipStar
        )
    }

    /// True when both columns hold procedure names rather than statement
    /// indices.
    pub fn is_name_keyed(self) -> bool {
        matches!(self, RelationshipType::Calls | RelationshipType::CallsStar)
    }
}
