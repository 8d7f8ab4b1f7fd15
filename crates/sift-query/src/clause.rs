//! Clause model: one query predicate plus its evaluated result.

use std::cell::OnceCell;

use ahash::AHashMap;
use roaring::RoaringBitmap;

use sift_core::{Operand, PatternExpr, RelationshipType};

/// What kind of predicate a clause is. The set is closed; the evaluator
/// matches exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseKind {
    /// A relationship predicate such as `Follows(s1, s2)`.
    Relationship(RelationshipType),
    /// A pattern predicate. `expr` is present for assignment patterns; a
    /// missing expression means a container pattern keyed by the pattern
    /// synonym's own entity type (If/While).
    Pattern { expr: Option<PatternExpr> },
    /// An attribute-equality (`with`) predicate.
    With,
}

/// The one result shape a clause carries after evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum ClauseResult {
    Boolean(bool),
    Set(RoaringBitmap),
    /// Grouped by first-column value.
    Map(AHashMap<u32, RoaringBitmap>),
}

impl ClauseResult {
    /// Cardinality for cost estimation: set length, summed map sizes, or 0
    /// for booleans (boolean clauses always sort cheapest).
    pub fn size(&self) -> u64 {
        match self {
            ClauseResult::Boolean(_) => 0,
            ClauseResult::Set(set) => set.len(),
            ClauseResult::Map(map) => map.values().map(RoaringBitmap::len).sum(),
        }
    }
}

/// One predicate of a query: kind, two operands, and a write-once result.
///
/// For a `Pattern` clause the left operand is the pattern synonym itself
/// and the right operand is the variable argument. Clauses are immutable
/// once evaluated.
#[derive(Debug)]
pub struct Clause {
    kind: ClauseKind,
    left: Operand,
    right: Operand,
    result: OnceCell<ClauseResult>,
}

impl Clause {
    pub fn new(kind: ClauseKind, left: Operand, right: Operand) -> Self {
        Self {
            kind,
            left,
            right,
            result: OnceCell::new(),
        }
    }

    pub fn relationship(rel: RelationshipType, left: Operand, right: Operand) -> Self {
        Self::new(ClauseKind::Relationship(rel), left, right)
    }

    pub fn pattern(expr: Option<PatternExpr>, synonym: Operand, arg: Operand) -> Self {
        Self::new(ClauseKind::Pattern { expr }, synonym, arg)
    }

    pub fn with(left: Operand, right: Operand) -> Self {
        Self::new(ClauseKind::With, left, right)
    }

    pub fn kind(&self) -> &ClauseKind {
        &self.kind
    }

    pub fn left(&self) -> &Operand {
        &self.left
    }

    pub fn right(&self) -> &Operand {
        &self.right
    }

    /// Store the evaluated result. Write-once: returns `false` (and keeps
    /// the first result) if the clause was already evaluated.
    pub fn record_result(&self, result: ClauseResult) -> bool {
        self.result.set(result).is_ok()
    }

    pub fn result(&self) -> Option<&ClauseResult> {
        self.result.get()
    }

    pub fn is_evaluated(&self) -> bool {
        self.result.get().is_some()
    }

    /// Cardinality for join ordering. Defined only post-evaluation; an
    /// unevaluated clause reports 0, same as a boolean result.
    pub fn result_size(&self) -> u64 {
        self.result.get().map_or(0, ClauseResult::size)
    }

    /// Synonym names among the two operands, left first.
    pub fn synonyms(&self) -> impl Iterator<Item = &str> {
        [&self.left, &self.right]
            .into_iter()
            .filter_map(Operand::synonym)
    }

    /// Does either operand bind this synonym?
    pub fn mentions(&self, synonym: &str) -> bool {
        self.synonyms().any(|s| s == synonym)
    }
}
