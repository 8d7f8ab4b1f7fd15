//! Sift query planning
//!
//! Given the list of predicates of one query, this crate:
//!
//! 1. models each predicate as a [`Clause`]: two operands, a kind, and a
//!    write-once evaluated result with a cardinality used for cost
//!    estimation;
//! 2. partitions the clause list into independent synonym-connected
//!    components with a union-find forest ([`cluster::SynonymComponents`]),
//!    so the join engine never crosses unrelated components;
//! 3. orders clauses within a component, and materialized tables across
//!    components, by ascending result size ([`planner`]), a greedy
//!    cheapest-first join heuristic.
//!
//! Clauses are shared as `Rc<Clause>` between the original query list and
//! the per-component lists: one evaluation is visible through every list
//! referencing the clause. Everything here is query-scoped and discarded
//! after grouping; evaluation itself and the table-join engine live
//! elsewhere.

pub mod clause;
pub mod cluster;
pub mod planner;
pub mod table;

pub use clause::{Clause, ClauseKind, ClauseResult};
pub use cluster::{ClauseGroups, SynonymComponents};
pub use planner::{sort_clauses_by_result_size, sort_clauses_into_groups, sort_tables_by_size};
pub use table::ResultTable;
