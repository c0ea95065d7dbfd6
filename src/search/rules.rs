//! Rewrite rules producing structural alternatives of one fragment

use std::fmt;
use std::str::FromStr;

use crate::parser::{Child, Fragment, Node};

use super::patterns;

/// A single-fragment rewrite; `apply` never descends into children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rewrite {
    /// Exchange two adjacent children of different shape
    Swap,
    /// Inline opposite-direction child fragments of equal length
    Flatten,
    /// Break an even run of leaves into two parallel halves
    Split,
    /// Wrap repeated blocks of children
    GroupRepeats,
    /// Wrap adjacent child fragments of identical shape
    MergeAcross,
}

impl Rewrite {
    pub const ALL: [Rewrite; 5] = [
        Rewrite::Swap,
        Rewrite::Flatten,
        Rewrite::Split,
        Rewrite::GroupRepeats,
        Rewrite::MergeAcross,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Rewrite::Swap => "swap",
            Rewrite::Flatten => "flatten",
            Rewrite::Split => "split",
            Rewrite::GroupRepeats => "group",
            Rewrite::MergeAcross => "merge",
        }
    }

    pub fn apply(self, fragment: &Fragment) -> Vec<Fragment> {
        match self {
            Rewrite::Swap => swap(fragment),
            Rewrite::Flatten => flatten(fragment).into_iter().collect(),
            Rewrite::Split => split(fragment).into_iter().collect(),
            Rewrite::GroupRepeats => patterns::detect_groups(fragment, Node::shape_eq),
            Rewrite::MergeAcross => patterns::merge_across_children(fragment).into_iter().collect(),
        }
    }
}

impl fmt::Display for Rewrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rewrite {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rewrite::ALL
            .into_iter()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| format!("unknown rewrite rule '{}'", s))
    }
}

fn swap(fragment: &Fragment) -> Vec<Fragment> {
    let children = &fragment.children;
    (1..children.len())
        .filter(|&i| !children[i - 1].node.shape_eq(&children[i].node))
        .map(|i| {
            let mut alt = fragment.clone();
            alt.children.swap(i - 1, i);
            alt
        })
        .collect()
}

fn flatten(fragment: &Fragment) -> Option<Fragment> {
    let across = fragment.direction.opposite();
    let mut lengths = fragment
        .children
        .iter()
        .filter_map(|c| c.node.as_fragment())
        .filter(|f| f.direction == across)
        .map(Fragment::len);

    let first = lengths.next()?;
    if !lengths.all(|len| len == first) {
        return None;
    }

    let mut children = Vec::new();
    for child in &fragment.children {
        match &child.node {
            Node::Fragment(inner) if inner.direction == across => {
                children.extend(inner.children.iter().cloned())
            }
            _ => children.push(child.clone()),
        }
    }
    Some(Fragment::new(fragment.direction, children))
}

fn split(fragment: &Fragment) -> Option<Fragment> {
    let n = fragment.len();
    if n < 4 || n % 2 != 0 || !fragment.children.iter().all(|c| c.node.is_leaf()) {
        return None;
    }
    let (head, tail) = fragment.children.split_at(n / 2);
    let half = |children: &[Child]| {
        Child::new(Node::Fragment(Fragment::new(fragment.direction, children.to_vec())))
    };
    Some(Fragment::new(
        fragment.direction.opposite(),
        vec![half(head), half(tail)],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_fragment;

    fn apply(rule: Rewrite, expr: &str) -> Vec<String> {
        let fragment = parse_fragment(expr).unwrap();
        rule.apply(&fragment).iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_swap() {
        assert_eq!(apply(Rewrite::Swap, "A | B"), vec!["B | A"]);
        assert_eq!(
            apply(Rewrite::Swap, "A | B | (C / D)"),
            vec!["B | A | (C / D)", "A | (C / D) | B"]
        );
    }

    #[test]
    fn test_swap_skips_equal_neighbours() {
        assert_eq!(apply(Rewrite::Swap, "(A|B) / (A|B) / C"), vec!["(A | B) / C / (A | B)"]);
    }

    #[test]
    fn test_swap_keeps_weights_with_children() {
        assert_eq!(apply(Rewrite::Swap, "A{2} | B"), vec!["B | A{2}"]);
    }

    #[test]
    fn test_flatten() {
        assert_eq!(
            apply(Rewrite::Flatten, "A / B / C / D / (E | F)"),
            vec!["A / B / C / D / E / F"]
        );
        assert_eq!(apply(Rewrite::Flatten, "(A | B) / (C | D)"), vec!["A / B / C / D"]);
        assert!(apply(Rewrite::Flatten, "A / B / C").is_empty());
        assert!(apply(Rewrite::Flatten, "(A | B) / (C | D | E)").is_empty());
    }

    #[test]
    fn test_split() {
        assert_eq!(apply(Rewrite::Split, "A | B | C | D"), vec!["(A | B) / (C | D)"]);
        assert!(apply(Rewrite::Split, "A | B").is_empty());
        assert!(apply(Rewrite::Split, "A | B | C").is_empty());
        assert!(apply(Rewrite::Split, "A | B | C | (D / E)").is_empty());
    }

    #[test]
    fn test_rule_names_round_trip() {
        for rule in Rewrite::ALL {
            assert_eq!(rule.name().parse::<Rewrite>(), Ok(rule));
        }
        assert!("rotate".parse::<Rewrite>().is_err());
    }
}
