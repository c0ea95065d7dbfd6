//! Binding area edge references to concrete tabs

use std::collections::HashMap;

use super::area::{Alignment, AreaKind, Side, SizeBounds};
use super::data::AlgebraData;
use super::error::GeometryError;
use super::tabs::{Axis, TabId};

/// Where one edge of an area lies
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EdgeRef {
    /// A fresh tab is created
    #[default]
    Unset,
    /// An existing tab of the resolver's layout
    Tab(TabId),
    /// A tab shared by name; `left`, `top`, `right` and `bottom` are the
    /// outer boundary
    Named(String),
    /// The opposite edge of another area
    Area(String),
}

/// An area before its edges are bound to tabs
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AreaSpec {
    pub id: String,
    pub kind: AreaKind,
    pub left: EdgeRef,
    pub top: EdgeRef,
    pub right: EdgeRef,
    pub bottom: EdgeRef,
    pub size: SizeBounds,
    pub alignment: Alignment,
}

impl AreaSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn empty_space(id: impl Into<String>) -> Self {
        Self {
            kind: AreaKind::EmptySpace,
            ..Self::new(id)
        }
    }

    pub fn edge(&self, side: Side) -> &EdgeRef {
        match side {
            Side::Left => &self.left,
            Side::Top => &self.top,
            Side::Right => &self.right,
            Side::Bottom => &self.bottom,
        }
    }

    pub fn with_edge(mut self, side: Side, edge: EdgeRef) -> Self {
        match side {
            Side::Left => self.left = edge,
            Side::Top => self.top = edge,
            Side::Right => self.right = edge,
            Side::Bottom => self.bottom = edge,
        }
        self
    }

    pub fn with_size(mut self, size: SizeBounds) -> Self {
        self.size = size;
        self
    }
}

/// Builds an [`AlgebraData`] from area specs whose edges refer to tabs,
/// names or other areas
#[derive(Debug, Clone)]
pub struct TabResolver {
    data: AlgebraData,
    named: HashMap<String, TabId>,
}

impl Default for TabResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TabResolver {
    pub fn new() -> Self {
        let data = AlgebraData::new();
        let named = Side::ALL
            .into_iter()
            .map(|side| (side.name().to_string(), data.boundary(side)))
            .collect();
        Self { data, named }
    }

    /// Create a tab that specs can refer to with [`EdgeRef::Tab`]
    pub fn new_tab(&mut self, axis: Axis) -> TabId {
        match axis {
            Axis::X => self.data.add_x_tab(),
            Axis::Y => self.data.add_y_tab(),
        }
    }

    fn named_tab(&mut self, name: &str, axis: Axis) -> Result<TabId, GeometryError> {
        if let Some(&tab) = self.named.get(name) {
            let found = self.data.tabs().axis(tab);
            if found != axis {
                return Err(GeometryError::AxisMismatch {
                    name: name.to_string(),
                    expected: axis,
                    found,
                });
            }
            return Ok(tab);
        }
        let tab = self.data.add_named_tab(axis, name);
        self.named.insert(name.to_string(), tab);
        Ok(tab)
    }

    /// Resolve every edge, then place the areas in the given order
    pub fn resolve(mut self, specs: &[AreaSpec]) -> Result<AlgebraData, GeometryError> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        for (i, spec) in specs.iter().enumerate() {
            if index.insert(spec.id.as_str(), i).is_some() {
                return Err(GeometryError::DuplicateArea(spec.id.clone()));
            }
        }

        let mut bound: HashMap<(usize, Side), TabId> = HashMap::new();
        for i in 0..specs.len() {
            for side in Side::ALL {
                self.bind_edge(specs, &index, &mut bound, (i, side))?;
            }
        }

        for (i, spec) in specs.iter().enumerate() {
            let tab = |side: Side| bound[&(i, side)];
            let (l, t, r, b) = (tab(Side::Left), tab(Side::Top), tab(Side::Right), tab(Side::Bottom));
            let area = match spec.kind {
                AreaKind::Content => self.data.add_area(spec.id.as_str(), l, t, r, b)?,
                AreaKind::EmptySpace => self.data.add_empty_space(spec.id.as_str(), l, t, r, b)?,
            };
            area.size = spec.size;
            area.alignment = spec.alignment;
        }

        Ok(self.data)
    }

    /// Follow area references from `start` until a concrete tab, binding every
    /// edge on the way
    fn bind_edge(
        &mut self,
        specs: &[AreaSpec],
        index: &HashMap<&str, usize>,
        bound: &mut HashMap<(usize, Side), TabId>,
        start: (usize, Side),
    ) -> Result<TabId, GeometryError> {
        let mut path = vec![start];
        let mut current = start;

        let tab = loop {
            if let Some(&tab) = bound.get(&current) {
                break tab;
            }
            let (i, side) = current;
            match specs[i].edge(side) {
                EdgeRef::Unset => break self.new_tab(side.axis()),
                EdgeRef::Tab(tab) => {
                    let found = self.data.tabs().axis(*tab);
                    if found != side.axis() {
                        return Err(GeometryError::AxisMismatch {
                            name: self.data.tabs().label(*tab),
                            expected: side.axis(),
                            found,
                        });
                    }
                    break *tab;
                }
                EdgeRef::Named(name) => break self.named_tab(name, side.axis())?,
                EdgeRef::Area(other) => {
                    let Some(&j) = index.get(other.as_str()) else {
                        return Err(GeometryError::unknown_area(other.clone(), specs[i].id.clone()));
                    };
                    let next = (j, side.opposite());
                    if path.contains(&next) {
                        let mut cycle: Vec<String> = path
                            .iter()
                            .map(|&(k, s)| format!("{}.{}", specs[k].id, s.name()))
                            .collect();
                        cycle.push(format!("{}.{}", specs[j].id, next.1.name()));
                        return Err(GeometryError::cycle(cycle));
                    }
                    path.push(next);
                    current = next;
                }
            }
        };

        for edge in path {
            bound.insert(edge, tab);
        }
        Ok(tab)
    }
}
