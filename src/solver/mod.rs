//! Linear constraint model and the soft-constraint resolver
//!
//! A [`LinearSpec`] owns variables and an ordered list of linear constraints.
//! The numeric work is delegated to a [`LinearSolver`]; [`soft`] decides which
//! constraints stay enabled when the full set is infeasible.

pub mod kasuari;
pub mod linear;
pub mod observer;
pub mod soft;

pub use self::kasuari::KasuariSolver;
pub use linear::{
    Constraint, ConstraintId, LinearSpec, Operator, Term, VariableId, VariableSet,
};
pub use observer::{NoopObserver, SolveObserver, TracingObserver};
pub use soft::{Snapshot, SoftOutcome, SoftStrategy};

/// Outcome of one solve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultType {
    Optimal,
    Suboptimal,
    Infeasible,
}

impl ResultType {
    pub fn is_optimal(self) -> bool {
        self == ResultType::Optimal
    }
}

impl std::fmt::Display for ResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResultType::Optimal => "optimal",
            ResultType::Suboptimal => "suboptimal",
            ResultType::Infeasible => "infeasible",
        };
        f.write_str(s)
    }
}

/// Computes variable values from the enabled constraints
///
/// Implementations must ignore disabled constraints and write the solution
/// into `variables`. Values of variables not mentioned by any enabled
/// constraint are left untouched.
pub trait LinearSolver {
    fn solve(&mut self, constraints: &[Constraint], variables: &mut VariableSet) -> ResultType;
}
