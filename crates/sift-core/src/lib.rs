//! Sift shared data model
//!
//! This crate defines the vocabulary shared by the fact store (`sift-pkb`)
//! and the query planner (`sift-query`):
//!
//! - [`EntityType`]: the closed set of entity kinds a query synonym can be
//!   declared as (statement subtypes, aggregate statement types, and the
//!   non-statement kinds `Var`/`Const`/`Proc`)
//! - [`RelationshipType`]: the 16 directed binary relation kinds over the
//!   analyzed program, with immutable per-relation metadata
//! - [`Operand`]/[`Declaration`]: the query operand model classifying what a
//!   clause argument *is* (typed synonym, literal name, literal statement
//!   number, or unconstrained)
//! - [`PatternExpr`]: exact/partial/any matching over canonicalized
//!   right-hand-side expression text
//!
//! No parsing happens here; the query parser hands this crate pre-validated
//! values.

pub mod entity;
pub mod operand;
pub mod pattern;
pub mod relation;

pub use entity::EntityType;
pub use operand::{Declaration, Operand};
pub use pattern::PatternExpr;
pub use relation::RelationshipType;
