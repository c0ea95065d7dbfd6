//! Hooks for watching the soft resolver work

use std::ops::Range;

use super::linear::ConstraintId;
use super::soft::SoftOutcome;
use super::ResultType;

/// Receives soft resolver progress; every method defaults to doing nothing
pub trait SolveObserver {
    /// A trial solve finished with the constraints in `window` newly enabled
    fn trial_solved(&mut self, _window: Range<usize>, _result: ResultType) {}

    /// A constraint was found to conflict and is now permanently disabled
    fn constraint_disabled(&mut self, _id: ConstraintId) {}

    fn finished(&mut self, _outcome: &SoftOutcome) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SolveObserver for NoopObserver {}

/// Forwards resolver events to `tracing` at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SolveObserver for TracingObserver {
    fn trial_solved(&mut self, window: Range<usize>, result: ResultType) {
        tracing::debug!(start = window.start, end = window.end, %result, "trial solve");
    }

    fn constraint_disabled(&mut self, id: ConstraintId) {
        tracing::debug!(constraint = %id, "constraint disabled");
    }

    fn finished(&mut self, outcome: &SoftOutcome) {
        tracing::debug!(
            result = %outcome.result,
            solves = outcome.solves,
            disabled = outcome.disabled.len(),
            "soft resolve finished"
        );
    }
}
