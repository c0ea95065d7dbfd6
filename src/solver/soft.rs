//! Soft-constraint resolution: find a feasible, priority-ordered subset of the
//! constraints when the full set cannot be satisfied
//!
//! Both strategies sort the constraints by descending priority first and only
//! ever give up a constraint after a failed trial that included it.

use std::str::FromStr;

use super::linear::{ConstraintId, LinearSpec};
use super::observer::{NoopObserver, SolveObserver};
use super::ResultType;

/// Values of every variable in a spec, taken before a trial solve
#[derive(Debug, Clone)]
pub struct Snapshot {
    values: Vec<f64>,
}

impl Snapshot {
    pub fn remember(spec: &LinearSpec) -> Self {
        Self {
            values: spec.variables().all_values(),
        }
    }

    pub fn restore(&self, spec: &mut LinearSpec) {
        spec.variables_mut().restore_values(&self.values);
    }
}

/// Result of a soft resolve
#[derive(Debug, Clone, PartialEq)]
pub struct SoftOutcome {
    /// Result of the terminal solve
    pub result: ResultType,
    /// Number of solver invocations
    pub solves: usize,
    /// Constraints given up, in the order they were found
    pub disabled: Vec<ConstraintId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SoftStrategy {
    /// Enable constraints one at a time; n solves for n constraints
    Adding,
    /// Enable growing windows of constraints and bisect a failing window
    #[default]
    Grouping,
}

impl FromStr for SoftStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "adding" => Ok(SoftStrategy::Adding),
            "grouping" => Ok(SoftStrategy::Grouping),
            other => Err(format!("unknown strategy '{}' (expected adding or grouping)", other)),
        }
    }
}

impl SoftStrategy {
    pub fn resolve(self, spec: &mut LinearSpec) -> SoftOutcome {
        self.resolve_with(spec, &mut NoopObserver)
    }

    pub fn resolve_with(self, spec: &mut LinearSpec, observer: &mut dyn SolveObserver) -> SoftOutcome {
        let outcome = match self {
            SoftStrategy::Adding => resolve_adding(spec, observer),
            SoftStrategy::Grouping => resolve_grouping(spec, observer),
        };
        observer.finished(&outcome);
        outcome
    }
}

fn give_up(
    spec: &mut LinearSpec,
    index: usize,
    disabled: &mut Vec<ConstraintId>,
    observer: &mut dyn SolveObserver,
) {
    spec.set_enabled(index, false);
    let id = spec.constraints()[index].id();
    disabled.push(id);
    observer.constraint_disabled(id);
}

fn resolve_adding(spec: &mut LinearSpec, observer: &mut dyn SolveObserver) -> SoftOutcome {
    let n = spec.constraints().len();
    spec.disable_range(0..n);
    spec.sort_constraints();

    let mut result = ResultType::Optimal;
    let mut disabled = Vec::new();
    for i in 0..n {
        let snapshot = Snapshot::remember(spec);
        spec.set_enabled(i, true);
        result = spec.solve();
        observer.trial_solved(i..i + 1, result);

        if !result.is_optimal() {
            snapshot.restore(spec);
            give_up(spec, i, &mut disabled, observer);
        }
    }

    SoftOutcome {
        result,
        solves: n,
        disabled,
    }
}

fn resolve_grouping(spec: &mut LinearSpec, observer: &mut dyn SolveObserver) -> SoftOutcome {
    let n = spec.constraints().len();
    spec.sort_constraints();
    if n == 0 {
        return SoftOutcome {
            result: ResultType::Optimal,
            solves: 0,
            disabled: Vec::new(),
        };
    }

    // [0, beginning) committed, [beginning, end) on trial, [end, n) disabled
    let mut beginning = 0;
    let mut end = n;
    let mut delta = 1;
    let mut disabled = Vec::new();

    let mut snapshot = Snapshot::remember(spec);
    spec.enable_range(beginning..end);
    let mut result = spec.solve();
    let mut solves = 1;
    observer.trial_solved(beginning..end, result);

    while beginning < n {
        if result.is_optimal() {
            beginning = end;
            end = (beginning + delta).min(n);
            delta *= 2;
            snapshot = Snapshot::remember(spec);
        } else {
            snapshot.restore(spec);
            if end - beginning == 1 {
                give_up(spec, beginning, &mut disabled, observer);
                beginning = end;
                delta = 1;
                end = (beginning + 1).min(n);
            } else {
                end = beginning + (end - beginning) / 2;
                delta = 1;
            }
        }

        if beginning >= n {
            break;
        }

        spec.enable_range(beginning..end);
        spec.disable_range(end..n);
        result = spec.solve();
        solves += 1;
        observer.trial_solved(beginning..end, result);
    }

    result = spec.solve();
    solves += 1;

    SoftOutcome {
        result,
        solves,
        disabled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{Constraint, LinearSolver, Operator, VariableSet};

    /// Infeasible whenever one of the listed constraints is enabled
    struct ScriptedSolver {
        bad: Vec<f64>,
    }

    impl LinearSolver for ScriptedSolver {
        fn solve(&mut self, constraints: &[Constraint], _: &mut VariableSet) -> ResultType {
            let conflict = constraints
                .iter()
                .any(|c| c.is_enabled() && self.bad.contains(&c.constant()));
            if conflict {
                ResultType::Infeasible
            } else {
                ResultType::Optimal
            }
        }
    }

    /// n constraints `x >= i`; those with constant in `bad` conflict
    fn scripted_spec(n: usize, bad: &[f64]) -> (LinearSpec, Vec<ConstraintId>) {
        let mut spec = LinearSpec::new(ScriptedSolver { bad: bad.to_vec() });
        let x = spec.new_variable();
        let ids = (0..n)
            .map(|i| spec.add_constraint([(1.0, x)], Operator::Ge, i as f64))
            .collect();
        (spec, ids)
    }

    #[derive(Default)]
    struct Recorder {
        trials: Vec<(std::ops::Range<usize>, ResultType)>,
        disabled: Vec<ConstraintId>,
        finished: usize,
    }

    impl SolveObserver for Recorder {
        fn trial_solved(&mut self, window: std::ops::Range<usize>, result: ResultType) {
            self.trials.push((window, result));
        }

        fn constraint_disabled(&mut self, id: ConstraintId) {
            self.disabled.push(id);
        }

        fn finished(&mut self, _outcome: &SoftOutcome) {
            self.finished += 1;
        }
    }

    #[test]
    fn test_adding_solves_once_per_constraint() {
        let (mut spec, ids) = scripted_spec(5, &[3.0]);
        let outcome = SoftStrategy::Adding.resolve(&mut spec);

        assert_eq!(outcome.solves, 5);
        assert_eq!(outcome.disabled, vec![ids[3]]);
        assert_eq!(outcome.result, ResultType::Optimal);
        let enabled: Vec<_> = spec.constraints().iter().map(|c| c.is_enabled()).collect();
        assert_eq!(enabled, vec![true, true, true, false, true]);
    }

    #[test]
    fn test_adding_reports_last_result() {
        let (mut spec, ids) = scripted_spec(3, &[2.0]);
        let outcome = SoftStrategy::Adding.resolve(&mut spec);
        assert_eq!(outcome.result, ResultType::Infeasible);
        assert_eq!(outcome.disabled, vec![ids[2]]);
    }

    #[test]
    fn test_empty_spec() {
        let (mut spec, _) = scripted_spec(0, &[]);
        for strategy in [SoftStrategy::Adding, SoftStrategy::Grouping] {
            let outcome = strategy.resolve(&mut spec);
            assert_eq!(outcome.result, ResultType::Optimal);
            assert_eq!(outcome.solves, 0);
        }
    }

    #[test]
    fn test_grouping_all_feasible() {
        let (mut spec, _) = scripted_spec(6, &[]);
        let outcome = SoftStrategy::Grouping.resolve(&mut spec);
        assert_eq!(outcome.solves, 2);
        assert!(outcome.disabled.is_empty());
        assert!(spec.constraints().iter().all(|c| c.is_enabled()));
    }

    #[test]
    fn test_grouping_isolates_sparse_conflict() {
        let (mut spec, ids) = scripted_spec(16, &[12.0]);
        let mut recorder = Recorder::default();
        let grouping = SoftStrategy::Grouping.resolve_with(&mut spec, &mut recorder);

        assert_eq!(grouping.disabled, vec![ids[12]]);
        assert_eq!(grouping.result, ResultType::Optimal);
        assert_eq!(grouping.solves, 12);
        assert_eq!(recorder.disabled, vec![ids[12]]);
        assert_eq!(recorder.trials.len(), 11);
        assert_eq!(recorder.trials[0], (0..16, ResultType::Infeasible));
        assert_eq!(recorder.trials[1], (0..8, ResultType::Optimal));
        assert_eq!(recorder.finished, 1);

        let (mut spec, _) = scripted_spec(16, &[12.0]);
        let adding = SoftStrategy::Adding.resolve(&mut spec);
        assert!(grouping.solves < adding.solves);
    }

    #[test]
    fn test_grouping_matches_adding_subset() {
        let (mut spec, _) = scripted_spec(10, &[1.0, 7.0]);
        let grouping = SoftStrategy::Grouping.resolve(&mut spec);
        let (mut spec, _) = scripted_spec(10, &[1.0, 7.0]);
        let adding = SoftStrategy::Adding.resolve(&mut spec);
        assert_eq!(grouping.disabled, adding.disabled);
    }

    #[test]
    fn test_resolve_respects_priority() {
        let mut spec = LinearSpec::default();
        let x = spec.new_variable();
        let low = spec.add_constraint_with_priority([(1.0, x)], Operator::Eq, 20.0, 1);
        spec.add_constraint_with_priority([(1.0, x)], Operator::Eq, 10.0, 2);
        spec.add_constraint([(1.0, x)], Operator::Ge, 0.0);

        let outcome = SoftStrategy::Adding.resolve(&mut spec);
        assert_eq!(outcome.disabled, vec![low]);
        assert_eq!(outcome.result, ResultType::Optimal);
        assert!((spec.value(x) - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_grouping_recovers_from_conflicting_pair() {
        let mut spec = LinearSpec::default();
        let x = spec.new_variable();
        let y = spec.new_variable();
        spec.add_constraint_with_priority([(1.0, x)], Operator::Eq, 10.0, 3);
        let loser = spec.add_constraint_with_priority([(1.0, x)], Operator::Eq, 30.0, 2);
        spec.add_constraint_with_priority([(1.0, y), (-1.0, x)], Operator::Eq, 5.0, 1);

        let outcome = SoftStrategy::Grouping.resolve(&mut spec);
        assert_eq!(outcome.disabled, vec![loser]);
        assert_eq!(outcome.result, ResultType::Optimal);
        assert!((spec.value(x) - 10.0).abs() < 1e-6);
        assert!((spec.value(y) - 15.0).abs() < 1e-6);
    }

    #[test]
    fn test_snapshot_restore() {
        let (mut spec, _) = scripted_spec(1, &[]);
        let x = spec.variables().iter().next().unwrap();
        spec.set_value(x, 4.0);
        let snapshot = Snapshot::remember(&spec);
        spec.set_value(x, 9.0);
        snapshot.restore(&mut spec);
        assert_eq!(spec.value(x), 4.0);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("adding".parse(), Ok(SoftStrategy::Adding));
        assert_eq!("grouping".parse(), Ok(SoftStrategy::Grouping));
        assert!("greedy".parse::<SoftStrategy>().is_err());
    }
}
