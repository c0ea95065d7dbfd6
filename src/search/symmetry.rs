//! Symmetry scores used to rank candidate layouts

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::parser::{Fragment, Node};

/// Sum of the child counts of `fragment`'s children when there are at least
/// two and they are all fragments of one direction and one length; else 0
pub fn total_symmetry_count_same_children_size(fragment: &Fragment) -> usize {
    if fragment.len() < 2 {
        return 0;
    }
    let mut inner = fragment.children.iter().map(|c| c.node.as_fragment());
    let Some(Some(first)) = inner.next() else {
        return 0;
    };
    let uniform = inner.all(|f| {
        f.is_some_and(|f| f.direction == first.direction && f.len() == first.len())
    });
    if uniform {
        fragment.len() * first.len()
    } else {
        0
    }
}

/// Breadth-first sum of [`total_symmetry_count_same_children_size`] over
/// every fragment of the tree
pub fn level_symmetry(root: &Fragment) -> usize {
    let mut total = 0;
    let mut queue = VecDeque::from([root]);
    while let Some(fragment) = queue.pop_front() {
        total += total_symmetry_count_same_children_size(fragment);
        queue.extend(fragment.children.iter().filter_map(|c| c.node.as_fragment()));
    }
    total
}

/// Number of nodes below the root, leaves and fragments alike
pub fn number_of_elements_in_levels(root: &Fragment) -> usize {
    let mut count = 0;
    let mut queue = VecDeque::from([root]);
    while let Some(fragment) = queue.pop_front() {
        for child in &fragment.children {
            count += 1;
            if let Node::Fragment(inner) = &child.node {
                queue.push_back(inner);
            }
        }
    }
    count
}

/// Ranking key: more symmetric is better, fewer elements breaks ties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymmetryScore {
    pub symmetry: usize,
    pub elements: usize,
}

impl SymmetryScore {
    pub fn of(fragment: &Fragment) -> Self {
        Self {
            symmetry: level_symmetry(fragment),
            elements: number_of_elements_in_levels(fragment),
        }
    }
}

impl Ord for SymmetryScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.symmetry
            .cmp(&other.symmetry)
            .then_with(|| other.elements.cmp(&self.elements))
    }
}

impl PartialOrd for SymmetryScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Candidates with their scores, best first; equal scores keep input order
pub fn rank_by_symmetry(candidates: Vec<Fragment>) -> Vec<(Fragment, SymmetryScore)> {
    let mut ranked: Vec<_> = candidates
        .into_iter()
        .map(|f| {
            let score = SymmetryScore::of(&f);
            (f, score)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_fragment;

    fn symmetry(expr: &str) -> usize {
        level_symmetry(&parse_fragment(expr).unwrap())
    }

    #[test]
    fn test_level_symmetry_reference_values() {
        assert_eq!(symmetry("(A|B)/(C|D)"), 4);
        assert_eq!(symmetry("(A|B)/(C|D)/(E|F)"), 6);
        assert_eq!(symmetry("(A|B)/(C/D)/(E|F)"), 0);
        assert_eq!(symmetry("((A/B)|(A/B))/((A/B)|(A/B))"), 12);
    }

    #[test]
    fn test_single_child_and_leaves() {
        assert_eq!(symmetry("A"), 0);
        assert_eq!(symmetry("A | B | C"), 0);
        assert_eq!(symmetry("(A|B) / C"), 0);
    }

    #[test]
    fn test_element_count() {
        let root = parse_fragment("(A|B)/(C|D)").unwrap();
        assert_eq!(number_of_elements_in_levels(&root), 6);
        let flat = parse_fragment("A / B / C / D").unwrap();
        assert_eq!(number_of_elements_in_levels(&flat), 4);
    }

    #[test]
    fn test_rank_prefers_symmetric_then_smaller() {
        let candidates = ["A / B / C / D", "(A|B)/(C|D)", "((A|B))/((C|D))/E"]
            .iter()
            .map(|s| parse_fragment(s).unwrap())
            .collect();
        let ranked = rank_by_symmetry(candidates);
        let order: Vec<_> = ranked.iter().map(|(f, _)| f.to_string()).collect();
        assert_eq!(order, vec!["(A | B) / (C | D)", "A / B / C / D", "(A | B) / (C | D) / E"]);
    }
}
