//! One layout computation: tabs become variables, areas become constraints

use indexmap::IndexMap;

use crate::geometry::{AlgebraData, Area, TabId};
use crate::solver::{
    LinearSolver, LinearSpec, Operator, SoftOutcome, TracingObserver, VariableId,
};

use super::config::LayoutConfig;
use super::types::{AreaLayout, BoundingBox, LayoutResult};

/// Owns the constraint system built for one [`AlgebraData`]
#[derive(Debug)]
pub struct LayoutSession<'a> {
    data: &'a AlgebraData,
    config: LayoutConfig,
    spec: LinearSpec,
    tabs: IndexMap<TabId, VariableId>,
}

impl<'a> LayoutSession<'a> {
    /// Session solved with the kasuari backend
    pub fn new(data: &'a AlgebraData, config: LayoutConfig) -> Self {
        Self::build(data, config, LinearSpec::default())
    }

    pub fn with_solver(
        data: &'a AlgebraData,
        config: LayoutConfig,
        solver: impl LinearSolver + 'static,
    ) -> Self {
        Self::build(data, config, LinearSpec::new(solver))
    }

    fn build(data: &'a AlgebraData, config: LayoutConfig, mut spec: LinearSpec) -> Self {
        let tabs: IndexMap<TabId, VariableId> = data
            .used_tabs()
            .into_iter()
            .map(|tab| (tab, spec.new_named_variable(data.tabs().label(tab))))
            .collect();

        let mut session = Self {
            data,
            config,
            spec,
            tabs,
        };
        session.add_boundary_constraints();
        for area in data.areas() {
            session.add_area_constraints(area);
        }
        session
    }

    fn var(&self, tab: TabId) -> VariableId {
        self.tabs[&tab]
    }

    fn add_boundary_constraints(&mut self) {
        let p = self.config.priorities.boundary;
        let pins = [
            (self.data.left(), 0.0),
            (self.data.top(), 0.0),
            (self.data.right(), self.config.width),
            (self.data.bottom(), self.config.height),
        ];
        for (tab, value) in pins {
            let v = self.var(tab);
            self.spec
                .add_constraint_with_priority([(1.0, v)], Operator::Eq, value, p);
        }
    }

    /// `far - near <op> value` for both axes of `area`
    fn add_extent(&mut self, area: &Area, operator: Operator, (w, h): (f64, f64), priority: i32) {
        let extents = [(area.left, area.right, w), (area.top, area.bottom, h)];
        for (near, far, value) in extents {
            let (near, far) = (self.var(near), self.var(far));
            self.spec.add_constraint_with_priority(
                [(1.0, far), (-1.0, near)],
                operator,
                value,
                priority,
            );
        }
    }

    fn add_area_constraints(&mut self, area: &Area) {
        let p = self.config.priorities;
        self.add_extent(area, Operator::Ge, (0.0, 0.0), p.non_negative);
        if let Some(min) = area.size.min {
            self.add_extent(area, Operator::Ge, min, p.min_size);
        }
        if let Some(max) = area.size.max {
            self.add_extent(area, Operator::Le, max, p.max_size);
        }
        // empty space only fills what is left over
        if let (Some(preferred), false) = (area.size.preferred, area.is_empty_space()) {
            self.add_extent(area, Operator::Eq, preferred, p.preferred_size);
        }
    }

    pub fn spec(&self) -> &LinearSpec {
        &self.spec
    }

    pub fn spec_mut(&mut self) -> &mut LinearSpec {
        &mut self.spec
    }

    /// Current value of a tab, if the session tracks it
    pub fn tab_value(&self, tab: TabId) -> Option<f64> {
        self.tabs.get(&tab).map(|&v| self.spec.value(v))
    }

    /// Run the configured soft strategy and read back area bounds
    pub fn solve(&mut self) -> LayoutResult {
        let SoftOutcome {
            result,
            solves,
            disabled,
        } = self
            .config
            .strategy
            .resolve_with(&mut self.spec, &mut TracingObserver);

        let violated = self
            .spec
            .constraints()
            .iter()
            .filter(|c| c.is_enabled() && !c.is_satisfied(self.spec.variables(), self.config.tolerance))
            .count();
        if violated > 0 {
            tracing::warn!(violated, "enabled constraints not satisfied after solve");
        }

        let areas = self
            .data
            .areas()
            .iter()
            .map(|area| {
                let value = |tab| self.spec.value(self.var(tab));
                let cell = BoundingBox::from_edges(
                    value(area.left),
                    value(area.top),
                    value(area.right),
                    value(area.bottom),
                );
                let content = cell.aligned(area.size.max, area.alignment);
                (area.id.clone(), AreaLayout { cell, content })
            })
            .collect();

        LayoutResult {
            areas,
            result,
            disabled,
            solves,
        }
    }
}
