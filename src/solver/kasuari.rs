//! [`LinearSolver`] backed by the kasuari Cassowary solver
//!
//! Every solve builds a fresh kasuari solver from the enabled constraints, all
//! at required strength. Referenced variables are added as weak edit
//! variables suggested at their current value so a new solution stays close to
//! the previous one.

use ::kasuari::{
    AddConstraintError, Expression, Solver, Strength, Variable, WeightedRelation::*,
};
use indexmap::IndexMap;

use super::linear::{Constraint, Operator, VariableId, VariableSet};
use super::{LinearSolver, ResultType};

#[derive(Debug, Clone, Default)]
pub struct KasuariSolver {
    _private: (),
}

impl KasuariSolver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LinearSolver for KasuariSolver {
    fn solve(&mut self, constraints: &[Constraint], variables: &mut VariableSet) -> ResultType {
        let mut solver = Solver::new();
        let mut mapped: IndexMap<VariableId, Variable> = IndexMap::new();
        let mut reverse: IndexMap<Variable, VariableId> = IndexMap::new();

        for constraint in constraints.iter().filter(|c| c.is_enabled()) {
            let mut expr = Expression::from_constant(0.0);
            for term in constraint.terms() {
                let var = *mapped.entry(term.variable).or_insert_with(|| {
                    let var = Variable::new();
                    reverse.insert(var, term.variable);
                    var
                });
                expr = expr + var * term.coefficient;
            }

            let rhs = constraint.constant();
            let kconstraint = match constraint.operator() {
                Operator::Le => expr | LE(Strength::REQUIRED) | rhs,
                Operator::Eq => expr | EQ(Strength::REQUIRED) | rhs,
                Operator::Ge => expr | GE(Strength::REQUIRED) | rhs,
            };

            match solver.add_constraint(kconstraint) {
                Ok(()) => {}
                Err(AddConstraintError::UnsatisfiableConstraint) => return ResultType::Infeasible,
                Err(AddConstraintError::DuplicateConstraint) => {}
                Err(AddConstraintError::InternalSolverError(msg)) => {
                    tracing::warn!(constraint = %constraint.id(), "internal solver error: {}", msg);
                    return ResultType::Infeasible;
                }
            }
        }

        for (&id, &var) in &mapped {
            let current = variables.value(id);
            if let Err(e) = solver.add_edit_variable(var, Strength::WEAK) {
                tracing::warn!("failed to add edit variable: {:?}", e);
                continue;
            }
            if let Err(e) = solver.suggest_value(var, current) {
                tracing::warn!("failed to suggest value: {:?}", e);
            }
        }

        // kasuari only reports variables whose value moved away from zero
        for &id in mapped.keys() {
            variables.set_value(id, 0.0);
        }
        for (var, value) in solver.fetch_changes() {
            if let Some(&id) = reverse.get(var) {
                variables.set_value(id, *value);
            }
        }

        ResultType::Optimal
    }
}
