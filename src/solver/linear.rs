//! Variables, linear constraints and the ordered constraint registry

use std::cmp::Reverse;
use std::fmt;
use std::ops::Range;

use indexmap::IndexMap;

use super::{KasuariSolver, LinearSolver, ResultType};

/// Handle to a variable owned by a [`LinearSpec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(usize);

impl VariableId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Stable handle to a constraint, unaffected by sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(usize);

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    name: Option<String>,
    value: f64,
}

/// Variable storage plus the set of variables referenced by constraints
///
/// Slots are never reused, so a `VariableId` stays valid after its variable
/// drops out of the registered set.
#[derive(Debug, Clone, Default)]
pub struct VariableSet {
    slots: Vec<Slot>,
    /// Registered variables in insertion order, with reference counts
    registered: IndexMap<VariableId, usize>,
}

impl VariableSet {
    fn create(&mut self, name: Option<String>) -> VariableId {
        self.slots.push(Slot { name, value: 0.0 });
        VariableId(self.slots.len() - 1)
    }

    pub fn value(&self, id: VariableId) -> f64 {
        self.slots[id.0].value
    }

    pub fn set_value(&mut self, id: VariableId, value: f64) {
        self.slots[id.0].value = value;
    }

    pub fn name(&self, id: VariableId) -> Option<&str> {
        self.slots[id.0].name.as_deref()
    }

    /// Number of registered variables
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    pub fn contains(&self, id: VariableId) -> bool {
        self.registered.contains_key(&id)
    }

    /// Registered variables in insertion order
    pub fn iter(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.registered.keys().copied()
    }

    pub(crate) fn all_values(&self) -> Vec<f64> {
        self.slots.iter().map(|s| s.value).collect()
    }

    pub(crate) fn restore_values(&mut self, values: &[f64]) {
        for (slot, &value) in self.slots.iter_mut().zip(values) {
            slot.value = value;
        }
    }

    fn retain(&mut self, id: VariableId) {
        *self.registered.entry(id).or_insert(0) += 1;
    }

    fn release(&mut self, id: VariableId) {
        if let Some(count) = self.registered.get_mut(&id) {
            *count -= 1;
            if *count == 0 {
                self.registered.shift_remove(&id);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Le,
    Eq,
    Ge,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operator::Le => "<=",
            Operator::Eq => "=",
            Operator::Ge => ">=",
        })
    }
}

/// `coefficient * variable`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub coefficient: f64,
    pub variable: VariableId,
}

impl From<(f64, VariableId)> for Term {
    fn from((coefficient, variable): (f64, VariableId)) -> Self {
        Self {
            coefficient,
            variable,
        }
    }
}

/// `sum(terms) <op> constant`
#[derive(Debug, Clone)]
pub struct Constraint {
    id: ConstraintId,
    terms: Vec<Term>,
    operator: Operator,
    constant: f64,
    enabled: bool,
    priority: i32,
}

impl Constraint {
    pub fn id(&self) -> ConstraintId {
        self.id
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Higher priorities are tried first by the soft resolver
    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }

    /// Left-hand side evaluated at the current variable values
    pub fn lhs(&self, variables: &VariableSet) -> f64 {
        self.terms
            .iter()
            .map(|t| t.coefficient * variables.value(t.variable))
            .sum()
    }

    /// How far the current values are from satisfying this constraint
    pub fn violation(&self, variables: &VariableSet) -> f64 {
        let lhs = self.lhs(variables);
        match self.operator {
            Operator::Le => (lhs - self.constant).max(0.0),
            Operator::Ge => (self.constant - lhs).max(0.0),
            Operator::Eq => (lhs - self.constant).abs(),
        }
    }

    pub fn is_satisfied(&self, variables: &VariableSet, tolerance: f64) -> bool {
        self.violation(variables) <= tolerance
    }
}

/// Ordered registry of variables and constraints plus the solver that
/// computes their values
pub struct LinearSpec {
    variables: VariableSet,
    constraints: Vec<Constraint>,
    next_constraint: usize,
    solver: Box<dyn LinearSolver>,
}

impl fmt::Debug for LinearSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearSpec")
            .field("variables", &self.variables)
            .field("constraints", &self.constraints)
            .finish_non_exhaustive()
    }
}

impl Default for LinearSpec {
    fn default() -> Self {
        Self::new(KasuariSolver::new())
    }
}

impl LinearSpec {
    pub fn new(solver: impl LinearSolver + 'static) -> Self {
        Self {
            variables: VariableSet::default(),
            constraints: Vec::new(),
            next_constraint: 0,
            solver: Box::new(solver),
        }
    }

    /// Create a variable; it is registered once a constraint references it
    pub fn new_variable(&mut self) -> VariableId {
        self.variables.create(None)
    }

    pub fn new_named_variable(&mut self, name: impl Into<String>) -> VariableId {
        self.variables.create(Some(name.into()))
    }

    pub fn value(&self, id: VariableId) -> f64 {
        self.variables.value(id)
    }

    pub fn set_value(&mut self, id: VariableId, value: f64) {
        self.variables.set_value(id, value);
    }

    pub fn variables(&self) -> &VariableSet {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut VariableSet {
        &mut self.variables
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.id == id)
    }

    pub fn constraint_mut(&mut self, id: ConstraintId) -> Option<&mut Constraint> {
        self.constraints.iter_mut().find(|c| c.id == id)
    }

    pub fn add_constraint<T>(
        &mut self,
        terms: impl IntoIterator<Item = T>,
        operator: Operator,
        constant: f64,
    ) -> ConstraintId
    where
        T: Into<Term>,
    {
        self.add_constraint_with_priority(terms, operator, constant, 0)
    }

    pub fn add_constraint_with_priority<T>(
        &mut self,
        terms: impl IntoIterator<Item = T>,
        operator: Operator,
        constant: f64,
        priority: i32,
    ) -> ConstraintId
    where
        T: Into<Term>,
    {
        let terms: Vec<Term> = terms.into_iter().map(Into::into).collect();
        for term in &terms {
            self.variables.retain(term.variable);
        }

        let id = ConstraintId(self.next_constraint);
        self.next_constraint += 1;
        self.constraints.push(Constraint {
            id,
            terms,
            operator,
            constant,
            enabled: true,
            priority,
        });
        id
    }

    /// Remove a constraint, dropping variables no other constraint uses
    pub fn remove_constraint(&mut self, id: ConstraintId) -> bool {
        let Some(index) = self.constraints.iter().position(|c| c.id == id) else {
            return false;
        };
        let removed = self.constraints.remove(index);
        for term in &removed.terms {
            self.variables.release(term.variable);
        }
        true
    }

    /// Stable sort by descending priority
    pub fn sort_constraints(&mut self) {
        self.constraints.sort_by_key(|c| Reverse(c.priority));
    }

    /// Enable or disable the constraint at `index` in the current order
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set_enabled(&mut self, index: usize, enabled: bool) {
        let len = self.constraints.len();
        assert!(index < len, "constraint index {} out of range 0..{}", index, len);
        self.constraints[index].enabled = enabled;
    }

    /// # Panics
    ///
    /// Panics if `range` extends past the constraint count.
    pub fn enable_range(&mut self, range: Range<usize>) {
        self.set_range(range, true);
    }

    /// # Panics
    ///
    /// Panics if `range` extends past the constraint count.
    pub fn disable_range(&mut self, range: Range<usize>) {
        self.set_range(range, false);
    }

    fn set_range(&mut self, range: Range<usize>, enabled: bool) {
        let len = self.constraints.len();
        assert!(
            range.start <= range.end && range.end <= len,
            "constraint range {:?} out of range 0..{}",
            range,
            len
        );
        for constraint in &mut self.constraints[range] {
            constraint.enabled = enabled;
        }
    }

    pub fn solve(&mut self) -> ResultType {
        self.solver.solve(&self.constraints, &mut self.variables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullSolver;

    impl LinearSolver for NullSolver {
        fn solve(&mut self, _: &[Constraint], _: &mut VariableSet) -> ResultType {
            ResultType::Optimal
        }
    }

    #[test]
    fn test_add_and_remove_updates_counts() {
        let mut spec = LinearSpec::new(NullSolver);
        let x = spec.new_variable();
        let y = spec.new_variable();
        assert_eq!(spec.variables().len(), 0);

        let c = spec.add_constraint([(1.0, x), (-1.0, y)], Operator::Eq, 0.0);
        assert_eq!(spec.variables().len(), 2);
        assert_eq!(spec.constraints().len(), 1);

        assert!(spec.remove_constraint(c));
        assert_eq!(spec.variables().len(), 0);
        assert_eq!(spec.constraints().len(), 0);
        assert!(!spec.remove_constraint(c));
    }

    #[test]
    fn test_shared_variable_survives_partial_removal() {
        let mut spec = LinearSpec::new(NullSolver);
        let x = spec.new_named_variable("x");
        let y = spec.new_variable();
        let first = spec.add_constraint([(1.0, x)], Operator::Ge, 0.0);
        spec.add_constraint([(1.0, x), (1.0, y)], Operator::Le, 10.0);

        spec.remove_constraint(first);
        assert!(spec.variables().contains(x));
        assert_eq!(spec.variables().iter().collect::<Vec<_>>(), vec![x, y]);
        assert_eq!(spec.variables().name(x), Some("x"));
    }

    #[test]
    fn test_sort_is_stable_descending() {
        let mut spec = LinearSpec::new(NullSolver);
        let x = spec.new_variable();
        let a = spec.add_constraint_with_priority([(1.0, x)], Operator::Ge, 0.0, 1);
        let b = spec.add_constraint_with_priority([(1.0, x)], Operator::Ge, 1.0, 5);
        let c = spec.add_constraint_with_priority([(1.0, x)], Operator::Ge, 2.0, 1);
        let d = spec.add_constraint_with_priority([(1.0, x)], Operator::Ge, 3.0, 5);

        spec.sort_constraints();
        let order: Vec<_> = spec.constraints().iter().map(|c| c.id()).collect();
        assert_eq!(order, vec![b, d, a, c]);
        assert_eq!(spec.constraint(a).map(|c| c.constant()), Some(0.0));
    }

    #[test]
    fn test_enable_ranges() {
        let mut spec = LinearSpec::new(NullSolver);
        let x = spec.new_variable();
        for i in 0..4 {
            spec.add_constraint([(1.0, x)], Operator::Ge, i as f64);
        }
        spec.disable_range(0..4);
        spec.enable_range(1..3);
        let flags: Vec<_> = spec.constraints().iter().map(|c| c.is_enabled()).collect();
        assert_eq!(flags, vec![false, true, true, false]);
        spec.enable_range(4..4);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_range_past_end_panics() {
        let mut spec = LinearSpec::new(NullSolver);
        let x = spec.new_variable();
        spec.add_constraint([(1.0, x)], Operator::Ge, 0.0);
        spec.enable_range(0..2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_past_end_panics() {
        let mut spec = LinearSpec::new(NullSolver);
        spec.set_enabled(0, true);
    }

    #[test]
    fn test_violation() {
        let mut spec = LinearSpec::new(NullSolver);
        let x = spec.new_variable();
        let y = spec.new_variable();
        let c = spec.add_constraint([(1.0, x), (2.0, y)], Operator::Le, 10.0);
        spec.set_value(x, 4.0);
        spec.set_value(y, 4.0);

        let constraint = spec.constraint(c).unwrap();
        assert_eq!(constraint.lhs(spec.variables()), 12.0);
        assert_eq!(constraint.violation(spec.variables()), 2.0);
        assert!(!constraint.is_satisfied(spec.variables(), 1e-6));

        spec.set_value(y, 3.0);
        let constraint = spec.constraint(c).unwrap();
        assert!(constraint.is_satisfied(spec.variables(), 1e-6));
    }
}
