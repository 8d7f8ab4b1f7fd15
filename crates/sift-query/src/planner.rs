//! Join-order planning: greedy cheapest-first ordering.
//!
//! No statistics beyond current cardinality are kept; evaluating the
//! smallest results first keeps intermediate row counts down, and stable
//! sorting preserves the query's original order among ties.

use std::rc::Rc;

use crate::clause::Clause;
use crate::cluster::{ClauseGroups, SynonymComponents};
use crate::table::ResultTable;

/// Stable ascending sort of clauses by evaluated result size. Boolean
/// clauses (size 0) come first.
pub fn sort_clauses_by_result_size(clauses: &mut [Rc<Clause>]) {
    clauses.sort_by_key(|clause| clause.result_size());
}

/// Stable ascending sort of materialized join tables by row count, applied
/// before combining tables across components.
pub fn sort_tables_by_size(tables: &mut [ResultTable]) {
    tables.sort_by_key(ResultTable::size);
}

/// Partition a query's clauses into synonym-connected groups plus the
/// synonym-free standalone filters.
pub fn sort_clauses_into_groups(clauses: &[Rc<Clause>]) -> ClauseGroups {
    let groups = SynonymComponents::build(clauses).into_groups();
    tracing::debug!(
        groups = groups.groups.len(),
        free = groups.free.len(),
        total = clauses.len(),
        "clustered query clauses"
    );
    groups
}
