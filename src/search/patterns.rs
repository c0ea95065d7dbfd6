//! Detection of repeated structure among a fragment's children

use crate::parser::{Child, Fragment, Node};

/// Alternatives that wrap runs of repeated blocks of children
///
/// For every block size `s` with `2s <= n` and every position where a
/// maximal run of at least two equal consecutive blocks starts, one
/// alternative is produced. A run of single children is wrapped as one nested
/// fragment, unless it already spans every child. Longer blocks are wrapped
/// one by one. Wrappers take the fragment's own direction, so the geometry is
/// unchanged.
pub fn detect_groups<F>(fragment: &Fragment, eq: F) -> Vec<Fragment>
where
    F: Fn(&Node, &Node) -> bool,
{
    let children = &fragment.children;
    let n = children.len();
    let blocks_equal =
        |a: usize, b: usize, size: usize| (0..size).all(|k| eq(&children[a + k].node, &children[b + k].node));
    let wrap = |range: std::ops::Range<usize>| {
        Child::new(Node::Fragment(Fragment::new(
            fragment.direction,
            children[range].to_vec(),
        )))
    };

    let mut alternatives = Vec::new();
    for size in 1..=n / 2 {
        for start in 0..=n - 2 * size {
            if start >= size && blocks_equal(start - size, start, size) {
                continue;
            }
            let mut count = 1;
            while start + (count + 1) * size <= n && blocks_equal(start, start + count * size, size) {
                count += 1;
            }
            if count < 2 {
                continue;
            }

            let end = start + count * size;
            let mut grouped: Vec<Child> = children[..start].to_vec();
            if size == 1 {
                if count == n {
                    continue;
                }
                grouped.push(wrap(start..end));
            } else {
                grouped.extend((0..count).map(|k| wrap(start + k * size..start + (k + 1) * size)));
            }
            grouped.extend(children[end..].iter().cloned());
            alternatives.push(Fragment::new(fragment.direction, grouped));
        }
    }
    alternatives
}

/// Wrap the first run of adjacent, identically shaped child fragments into
/// one nested fragment; `None` when there is no such run or it already spans
/// every child
pub fn merge_across_children(fragment: &Fragment) -> Option<Fragment> {
    let children = &fragment.children;
    let n = children.len();
    let mut start = 0;
    while start < n {
        let Some(first) = children[start].node.as_fragment() else {
            start += 1;
            continue;
        };
        let mut end = start + 1;
        while end < n
            && children[end]
                .node
                .as_fragment()
                .is_some_and(|f| f.shape_eq(first))
        {
            end += 1;
        }
        if end - start >= 2 && end - start < n {
            let mut merged: Vec<Child> = children[..start].to_vec();
            merged.push(Child::new(Node::Fragment(Fragment::new(
                fragment.direction,
                children[start..end].to_vec(),
            ))));
            merged.extend(children[end..].iter().cloned());
            return Some(Fragment::new(fragment.direction, merged));
        }
        start = end;
    }
    None
}

/// The tree with the first mergeable run (pre-order) wrapped, if any
pub fn detect_across_child(root: &Fragment) -> Option<Fragment> {
    let mut stack: Vec<(Vec<usize>, &Fragment)> = vec![(Vec::new(), root)];
    while let Some((path, fragment)) = stack.pop() {
        if let Some(merged) = merge_across_children(fragment) {
            return root.replaced_at(&path, merged);
        }
        for (i, child) in fragment.children.iter().enumerate().rev() {
            if let Node::Fragment(inner) = &child.node {
                let mut child_path = path.clone();
                child_path.push(i);
                stack.push((child_path, inner));
            }
        }
    }
    None
}
