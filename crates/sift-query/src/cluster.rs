//! Clause clustering: union-find over synonym names.
//!
//! A query's clauses are partitioned into independent synonym-connected
//! components so the join engine evaluates each component separately and
//! never forms a cross product over unrelated synonyms. Clauses binding no
//! synonym (literal comparisons) are kept aside as standalone filters.
//!
//! The forest is transient and query-scoped. Component counts are bounded
//! by the query's synonym count, so root resolution recurses through parent
//! pointers without path compression.

use std::rc::Rc;

use ahash::AHashMap;

use crate::clause::Clause;

/// The emitted partition of one query's clauses.
#[derive(Debug, Default)]
pub struct ClauseGroups {
    /// One list per synonym-connected component.
    pub groups: Vec<Vec<Rc<Clause>>>,
    /// Clauses binding no synonym, evaluated once as standalone filters.
    pub free: Vec<Rc<Clause>>,
}

/// Union-find forest keyed by synonym name, with per-root clause lists.
#[derive(Debug, Default)]
pub struct SynonymComponents {
    /// Parent pointers; a root is self-parented.
    parents: AHashMap<String, String>,
    /// Clauses currently assigned to each root. Folded-away components
    /// have empty lists.
    members: AHashMap<String, Vec<Rc<Clause>>>,
    /// Synonyms in first-seen order, for deterministic emission.
    order: Vec<String>,
    free: Vec<Rc<Clause>>,
}

impl SynonymComponents {
    /// Partition `clauses` by synonym connectivity.
    pub fn build(clauses: &[Rc<Clause>]) -> Self {
        let mut this = Self::default();

        for clause in clauses {
            for synonym in clause.synonyms() {
                if !this.parents.contains_key(synonym) {
                    this.parents.insert(synonym.to_string(), synonym.to_string());
                    this.members.insert(synonym.to_string(), Vec::new());
                    this.order.push(synonym.to_string());
                }
            }
        }

        for clause in clauses {
            let synonyms: Vec<String> =
                clause.synonyms().map(str::to_string).collect();
            match synonyms.as_slice() {
                [] => this.free.push(clause.clone()),
                [only] => {
                    let root = this.root(only);
                    this.members
                        .get_mut(&root)
                        .expect("every synonym has a member list")
                        .push(clause.clone());
                }
                [left, right, ..] => this.link(clause, left, right),
            }
        }

        this
    }

    /// Resolve a synonym's current root by parent-following. Terminates
    /// because parents are only ever repointed from one root to another
    /// distinct root, so chains stay acyclic.
    fn root(&self, synonym: &str) -> String {
        let parent = &self.parents[synonym];
        if parent == synonym {
            synonym.to_string()
        } else {
            self.root(parent)
        }
    }

    /// Handle a clause binding two synonyms: append it to the left root's
    /// component, then decide whether to fold the right component in.
    ///
    /// The fold decision inspects only the right component's *first* stored
    /// clause: fold when the roots already coincide, when the right list is
    /// still empty, or when that first clause mentions neither of the
    /// current clause's synonyms. This first-clause check approximates
    /// "already connected to this edge" without a component scan and is
    /// kept for behavioral compatibility with the original planner.
    fn link(&mut self, clause: &Rc<Clause>, left: &str, right: &str) {
        let left_root = self.root(left);
        let right_root = self.root(right);

        self.members
            .get_mut(&left_root)
            .expect("every synonym has a member list")
            .push(clause.clone());

        if left_root == right_root {
            return;
        }

        let fold = match self.members[&right_root].first() {
            None => true,
            Some(first) => !first.mentions(left) && !first.mentions(right),
        };
        if fold {
            self.parents.insert(right_root.clone(), left_root.clone());
            let moved = std::mem::take(
                self.members
                    .get_mut(&right_root)
                    .expect("every synonym has a member list"),
            );
            self.members
                .get_mut(&left_root)
                .expect("every synonym has a member list")
                .extend(moved);
        }
    }

    /// Emit every non-empty component whose synonym is still its own root,
    /// in first-seen synonym order.
    pub fn into_groups(mut self) -> ClauseGroups {
        let mut groups = Vec::new();
        for synonym in &self.order {
            if self.parents[synonym] != *synonym {
                continue;
            }
            if let Some(list) = self.members.remove(synonym) {
                if !list.is_empty() {
                    groups.push(list);
                }
            }
        }
        ClauseGroups {
            groups,
            free: self.free,
        }
    }
}
