//! Materialized join table, as handed to the planner for ordering.
//!
//! The join engine that fills and combines these lives outside this crate;
//! the planner only needs a row count.

/// One materialized intermediate result: a header of synonym names and rows
/// of values (statement indices or interned name ids, per column).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<u32>>,
}

impl ResultTable {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<u32>) {
        self.rows.push(row);
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
