//! Compression of a rectangle arrangement into row/column expressions
//!
//! Items start as the placed areas. Runs of items that share both cross tabs
//! and chain along the other axis collapse into fragments until nothing
//! changes. What remains of a non-guillotine arrangement is joined pairwise
//! along a shared junction tab where only one cross tab matches; the side
//! that does not match becomes ragged (`None`) and cannot take part in a
//! later join.

use crate::parser::{AlgebraSpec, Child, Direction, Fragment, Node};

use super::data::AlgebraData;
use super::tabs::TabId;

#[derive(Debug, Clone)]
struct Item {
    node: Node,
    left: Option<TabId>,
    top: Option<TabId>,
    right: Option<TabId>,
    bottom: Option<TabId>,
}

impl Item {
    /// (lead, trail) along `direction`
    fn along(&self, direction: Direction) -> (Option<TabId>, Option<TabId>) {
        match direction {
            Direction::Row => (self.left, self.right),
            Direction::Column => (self.top, self.bottom),
        }
    }

    /// The two tabs perpendicular to `direction`
    fn across(&self, direction: Direction) -> (Option<TabId>, Option<TabId>) {
        match direction {
            Direction::Row => (self.top, self.bottom),
            Direction::Column => (self.left, self.right),
        }
    }

    fn from_parts(
        node: Node,
        direction: Direction,
        (lead, trail): (Option<TabId>, Option<TabId>),
        (start, end): (Option<TabId>, Option<TabId>),
    ) -> Self {
        match direction {
            Direction::Row => Item {
                node,
                left: lead,
                right: trail,
                top: start,
                bottom: end,
            },
            Direction::Column => Item {
                node,
                top: lead,
                bottom: trail,
                left: start,
                right: end,
            },
        }
    }
}

fn both(pair: (Option<TabId>, Option<TabId>)) -> bool {
    pair.0.is_some() && pair.1.is_some()
}

fn same(a: Option<TabId>, b: Option<TabId>) -> bool {
    a.is_some() && a == b
}

/// Combine nodes into one fragment, inlining same-direction fragments
fn join(direction: Direction, nodes: impl IntoIterator<Item = Node>) -> Node {
    let mut children = Vec::new();
    for node in nodes {
        match node {
            Node::Fragment(f) if f.direction == direction => children.extend(f.children),
            other => children.push(Child::new(other)),
        }
    }
    Node::Fragment(Fragment::new(direction, children))
}

/// Collapse every maximal strict run along `direction`
fn collapse_runs(items: Vec<Item>, direction: Direction) -> (Vec<Item>, bool) {
    let n = items.len();
    let mut next: Vec<Option<usize>> = vec![None; n];
    let mut has_prev = vec![false; n];

    for i in 0..n {
        let across = items[i].across(direction);
        let trail = items[i].along(direction).1;
        if !both(across) || trail.is_none() {
            continue;
        }
        for j in 0..n {
            if j == i || has_prev[j] {
                continue;
            }
            if items[j].across(direction) == across && items[j].along(direction).0 == trail {
                next[i] = Some(j);
                has_prev[j] = true;
                break;
            }
        }
    }

    // chain id per item, by the chain's first member
    let mut chain_of: Vec<Option<usize>> = vec![None; n];
    let mut chains: Vec<Vec<usize>> = Vec::new();
    for start in (0..n).filter(|&i| !has_prev[i]) {
        let mut chain = vec![start];
        let mut current = start;
        while let Some(j) = next[current] {
            if chain.contains(&j) {
                break;
            }
            chain.push(j);
            current = j;
        }
        if chain.len() >= 2 {
            for &member in &chain {
                chain_of[member] = Some(chains.len());
            }
            chains.push(chain);
        }
    }

    if chains.is_empty() {
        return (items, false);
    }

    let mut slots: Vec<Option<Item>> = items.into_iter().map(Some).collect();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        match chain_of[i] {
            None => {
                if let Some(item) = slots[i].take() {
                    out.push(item);
                }
            }
            Some(c) if chains[c].iter().min() == Some(&i) => {
                let members: Vec<Item> = chains[c].iter().filter_map(|&m| slots[m].take()).collect();
                let (Some(first), Some(last)) = (members.first(), members.last()) else {
                    continue;
                };
                let along = (first.along(direction).0, last.along(direction).1);
                let across = first.across(direction);
                let node = join(direction, members.into_iter().map(|m| m.node));
                out.push(Item::from_parts(node, direction, along, across));
            }
            Some(_) => {}
        }
    }
    (out, true)
}

fn collapse_strict(mut items: Vec<Item>) -> Vec<Item> {
    loop {
        let (rows, by_row) = collapse_runs(items, Direction::Row);
        let (columns, by_column) = collapse_runs(rows, Direction::Column);
        items = columns;
        if !by_row && !by_column {
            return items;
        }
    }
}

/// A possible relaxed join of `first` followed by `second`
#[derive(Debug, Clone, Copy)]
struct Candidate {
    direction: Direction,
    first: usize,
    second: usize,
}

fn relaxed_candidates(items: &[Item]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for direction in [Direction::Row, Direction::Column] {
        for (i, a) in items.iter().enumerate() {
            for (j, b) in items.iter().enumerate() {
                if i == j || !same(a.along(direction).1, b.along(direction).0) {
                    continue;
                }
                let (a_start, a_end) = a.across(direction);
                let (b_start, b_end) = b.across(direction);
                if same(a_start, b_start) || same(a_end, b_end) {
                    candidates.push(Candidate {
                        direction,
                        first: i,
                        second: j,
                    });
                }
            }
        }
    }
    candidates
}

/// Pick the candidate whose items have the most joining options
fn best_candidate(items: &[Item], candidates: &[Candidate]) -> Option<Candidate> {
    let mut degree = vec![0usize; items.len()];
    for c in candidates {
        degree[c.first] += 1;
        degree[c.second] += 1;
    }

    let mut best: Option<(usize, Candidate)> = None;
    for &c in candidates {
        let score = degree[c.first] + degree[c.second];
        if best.map_or(true, |(s, _)| score > s) {
            best = Some((score, c));
        }
    }
    best.map(|(_, c)| c)
}

fn join_relaxed(items: Vec<Item>, candidate: Candidate) -> Vec<Item> {
    let Candidate {
        direction,
        first,
        second,
    } = candidate;
    let position = first.min(second);

    let mut slots: Vec<Option<Item>> = items.into_iter().map(Some).collect();
    let (Some(a), Some(b)) = (slots[first].take(), slots[second].take()) else {
        return slots.into_iter().flatten().collect();
    };

    let (a_start, a_end) = a.across(direction);
    let (b_start, b_end) = b.across(direction);
    let across = (
        if a_start == b_start { a_start } else { None },
        if a_end == b_end { a_end } else { None },
    );
    let along = (a.along(direction).0, b.along(direction).1);
    let mut merged = Some(Item::from_parts(
        join(direction, [a.node, b.node]),
        direction,
        along,
        across,
    ));

    let mut out = Vec::with_capacity(slots.len() - 1);
    for (i, slot) in slots.into_iter().enumerate() {
        if i == position {
            out.extend(merged.take());
        }
        if let Some(item) = slot {
            out.push(item);
        }
    }
    out
}

/// Compress a layout into the fewest row/column fragments this procedure finds
///
/// A guillotine arrangement yields one fragment; arrangements such as a
/// pinwheel yield several independent fragments.
pub fn compress(data: &AlgebraData) -> AlgebraSpec {
    let mut items: Vec<Item> = data
        .areas()
        .iter()
        .map(|area| Item {
            node: Node::Area(area.id.clone()),
            left: Some(area.left),
            top: Some(area.top),
            right: Some(area.right),
            bottom: Some(area.bottom),
        })
        .collect();

    items = collapse_strict(items);
    while items.len() > 1 {
        let candidates = relaxed_candidates(&items);
        let Some(candidate) = best_candidate(&items, &candidates) else {
            break;
        };
        tracing::trace!(?candidate, "relaxed join");
        items = collapse_strict(join_relaxed(items, candidate));
    }

    AlgebraSpec::new(
        items
            .into_iter()
            .map(|item| match item.node {
                Node::Fragment(f) => f,
                leaf => Fragment::row([leaf]),
            })
            .collect(),
    )
}
