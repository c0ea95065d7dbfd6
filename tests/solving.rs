//! Integration tests for the constraint model, soft resolver and layout sessions

use std::path::Path;

use layout_algebra::layout::{LayoutSession, Priorities};
use layout_algebra::solver::{KasuariSolver, LinearSpec, Operator, ResultType, SoftStrategy};
use layout_algebra::{parse_fragment, DocumentError, LayoutConfig, LayoutDocument};
use pretty_assertions::assert_eq;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn test_constraint_counts_follow_add_and_remove() {
    let mut spec = LinearSpec::default();
    let x = spec.new_variable();
    let y = spec.new_variable();

    let c = spec.add_constraint([(1.0, x), (2.0, y)], Operator::Le, 10.0);
    assert_eq!(spec.variables().len(), 2);
    assert_eq!(spec.constraints().len(), 1);

    spec.remove_constraint(c);
    assert_eq!(spec.variables().len(), 0);
    assert_eq!(spec.constraints().len(), 0);
}

#[test]
fn test_kasuari_solves_a_row() {
    let mut spec = LinearSpec::new(KasuariSolver::new());
    let tabs: Vec<_> = (0..4).map(|_| spec.new_variable()).collect();
    spec.add_constraint([(1.0, tabs[0])], Operator::Eq, 0.0);
    spec.add_constraint([(1.0, tabs[3])], Operator::Eq, 300.0);
    for pair in tabs.windows(2) {
        spec.add_constraint([(1.0, pair[1]), (-1.0, pair[0])], Operator::Eq, 100.0);
    }

    assert_eq!(spec.solve(), ResultType::Optimal);
    assert!(close(spec.value(tabs[1]), 100.0));
    assert!(close(spec.value(tabs[2]), 200.0));
}

/// 16 pins on distinct variables, except the one at `conflict` which fights
/// the pin at index 3
fn pinned_spec(conflict: usize) -> (LinearSpec, Vec<layout_algebra::solver::ConstraintId>) {
    let mut spec = LinearSpec::default();
    let vars: Vec<_> = (0..16).map(|_| spec.new_variable()).collect();
    let ids = (0..16)
        .map(|i| {
            if i == conflict {
                spec.add_constraint([(1.0, vars[3])], Operator::Eq, 100.0)
            } else {
                spec.add_constraint([(1.0, vars[i])], Operator::Eq, i as f64)
            }
        })
        .collect();
    (spec, ids)
}

#[test]
fn test_grouping_uses_fewer_solves_for_sparse_conflict() {
    let (mut spec, ids) = pinned_spec(12);
    let grouping = SoftStrategy::Grouping.resolve(&mut spec);

    let (mut other, _) = pinned_spec(12);
    let adding = SoftStrategy::Adding.resolve(&mut other);

    assert_eq!(grouping.disabled, vec![ids[12]]);
    assert_eq!(adding.disabled, grouping.disabled);
    assert_eq!(adding.solves, 16);
    assert!(grouping.solves < adding.solves, "{} solves", grouping.solves);
    assert_eq!(grouping.result, ResultType::Optimal);
}

#[test]
fn test_resolved_constraints_hold() {
    let (mut spec, _) = pinned_spec(12);
    SoftStrategy::Grouping.resolve(&mut spec);
    assert!(spec
        .constraints()
        .iter()
        .filter(|c| c.is_enabled())
        .all(|c| c.is_satisfied(spec.variables(), 1e-6)));
}

#[test]
fn test_session_gives_up_preferred_sizes_first() {
    let mut data = parse_fragment("A | B | C").unwrap().to_algebra_data().unwrap();
    for id in ["A", "B", "C"] {
        let area = data.area_mut(id).unwrap();
        area.set_min_size(50.0, 0.0);
        area.set_preferred_size(200.0, 100.0);
    }

    let config = LayoutConfig::new().with_size(300.0, 100.0);
    let result = LayoutSession::new(&data, config).solve();

    assert_eq!(result.result, ResultType::Optimal);
    assert!(!result.disabled.is_empty());
    for id in ["A", "B", "C"] {
        let b = result.bounds(id).unwrap();
        assert!(b.width >= 50.0 - 1e-6, "{} is {:?}", id, b);
        assert!(close(b.height, 100.0));
    }
    let c = result.bounds("C").unwrap();
    assert!(close(c.right(), 300.0));
}

#[test]
fn test_priorities_decide_which_bound_wins() {
    let mut data = parse_fragment("A").unwrap().to_algebra_data().unwrap();
    data.area_mut("A").unwrap().set_max_size(100.0, 100.0);

    let result = LayoutSession::new(&data, LayoutConfig::new().with_size(200.0, 100.0)).solve();
    assert!(close(result.bounds("A").unwrap().width, 200.0));

    let max_first = Priorities {
        max_size: 200,
        ..Priorities::default()
    };
    let config = LayoutConfig::new()
        .with_size(200.0, 100.0)
        .with_priorities(max_first);
    let result = LayoutSession::new(&data, config).solve();
    assert_eq!(result.disabled.len(), 1);
    assert!(result.bounds("A").unwrap().width <= 100.0 + 1e-6);
}

const DOCUMENT: &str = r#"
[container]
width = 300
height = 200

[[areas]]
id = "nav"
left = { tab = "left" }
top = { tab = "top" }
right = { tab = "x1" }
bottom = { tab = "bottom" }
min = [60, 0]
preferred = [80, 200]

[[areas]]
id = "main"
left = { area = "nav" }
top = { tab = "top" }
right = { tab = "right" }
bottom = { tab = "y1" }
preferred = [220, 150]
max = [200, 150]
halign = "center"

[[areas]]
id = "footer"
left = { tab = "x1" }
top = { area = "main" }
right = { tab = "right" }
bottom = { tab = "bottom" }
"#;

#[test]
fn test_document_solves() {
    let doc = LayoutDocument::from_str(DOCUMENT).unwrap();
    let data = doc.to_algebra_data().unwrap();
    assert_eq!(data.compress().to_string(), "nav | (main / footer)");

    // preferred sizes outrank the maximum, so main's content is centred in a wider cell
    let priorities = Priorities {
        max_size: 5,
        ..Priorities::default()
    };
    let config = doc.layout_config(
        LayoutConfig::new()
            .with_strategy(SoftStrategy::Adding)
            .with_priorities(priorities),
    );
    let result = LayoutSession::new(&data, config).solve();
    assert_eq!(result.result, ResultType::Optimal);
    assert_eq!(result.disabled.len(), 1);

    let nav = result.bounds("nav").unwrap();
    let main = result.get("main").unwrap();
    let footer = result.bounds("footer").unwrap();
    assert!(close(nav.width, 80.0), "{:?}", nav);
    assert!(close(main.cell.x, 80.0) && close(main.cell.width, 220.0));
    assert!(close(main.content.width, 200.0));
    assert!(close(main.content.x, 90.0));
    assert!(close(footer.y, 150.0) && close(footer.bottom(), 200.0));
}

#[test]
fn test_missing_document_is_io_error() {
    let err = LayoutDocument::from_file(Path::new("does/not/exist.toml")).unwrap_err();
    assert!(matches!(err, DocumentError::IoError(_)));
}
