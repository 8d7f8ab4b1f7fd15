//! Expression patterns for assignment matching.

use serde::{Deserialize, Serialize};

/// How a pattern clause constrains an assignment's right-hand side.
///
/// Both the stored and the queried expression are canonicalized by the
/// upstream parser (single text form per expression tree), so `Exact` is
/// plain equality and `Partial` is containment of a canonical fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternExpr {
    /// Any right-hand side (`_`).
    Any,
    /// The whole right-hand side equals the canonical text.
    Exact(String),
    /// The canonical text occurs somewhere in the right-hand side (`_"e"_`).
    Partial(String),
}

impl PatternExpr {
    pub fn matches(&self, canonical_rhs: &str) -> bool {
        match self {
            PatternExpr::Any => true,
            PatternExpr::Exact(expr) => canonical_rhs == expr,
            PatternExpr::Partial(fragment) => canonical_rhs.contains(fragment.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_semantics() {
        let rhs = "(x + (y * z))";
        assert!(PatternExpr::Any.matches(rhs));
        assert!(PatternExpr::Exact("(x + (y * z))".into()).matches(rhs));
        assert!(!PatternExpr::Exact("(y * z)".into()).matches(rhs));
        assert!(PatternExpr::Partial("(y * z)".into()).matches(rhs));
        assert!(!PatternExpr::Partial("(x + y)".into()).matches(rhs));
    }
}
