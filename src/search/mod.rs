//! Search for structurally different expressions of the same areas
//!
//! # Example
//!
//! ```rust
//! use layout_algebra::parser::parse_fragment;
//! use layout_algebra::search::{AlternativeSearch, Rewrite};
//!
//! let root = parse_fragment("A | B | (C / D)").unwrap();
//! let search = AlternativeSearch::new().with_rule(Rewrite::Swap);
//! assert_eq!(search.alternatives(&root).len(), 3);
//! ```

pub mod patterns;
pub mod rules;
pub mod symmetry;

pub use patterns::{detect_across_child, detect_groups, merge_across_children};
pub use rules::Rewrite;
pub use symmetry::{
    level_symmetry, number_of_elements_in_levels, rank_by_symmetry,
    total_symmetry_count_same_children_size, SymmetryScore,
};

use crate::parser::Fragment;

/// Applies an ordered list of rewrite rules to every fragment of a tree
#[derive(Debug, Clone, Default)]
pub struct AlternativeSearch {
    rules: Vec<Rewrite>,
}

impl AlternativeSearch {
    /// A search with no rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule
    pub fn with_rule(mut self, rule: Rewrite) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn add_rule(&mut self, rule: Rewrite) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rewrite] {
        &self.rules
    }

    /// One whole tree per (rule, sub-fragment, alternative), each differing
    /// from `root` only in the rewritten sub-fragment
    ///
    /// Rules are applied in registration order; within a rule, sub-fragments
    /// are visited in pre-order starting at the root. Duplicates are kept.
    pub fn alternatives(&self, root: &Fragment) -> Vec<Fragment> {
        let paths = root.fragment_paths();
        let mut out = Vec::new();
        for &rule in &self.rules {
            for path in &paths {
                let Some(sub) = root.at(path) else {
                    continue;
                };
                for alternative in rule.apply(sub) {
                    out.extend(root.replaced_at(path, alternative));
                }
            }
        }
        tracing::debug!(rules = self.rules.len(), found = out.len(), "alternative search");
        out
    }
}
