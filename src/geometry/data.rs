//! Tabs and areas of one geometric layout

use std::collections::HashMap;

use crate::parser::{AlgebraSpec, AreaId};

use super::area::{Area, AreaKind, Side, SizeBounds};
use super::error::GeometryError;
use super::tabs::{Axis, TabArena, TabId};

/// A rectangle arrangement: a tab arena, its four outer boundary tabs and the
/// areas placed between tabs
#[derive(Debug, Clone)]
pub struct AlgebraData {
    tabs: TabArena,
    left: TabId,
    top: TabId,
    right: TabId,
    bottom: TabId,
    areas: Vec<Area>,
}

impl Default for AlgebraData {
    fn default() -> Self {
        Self::new()
    }
}

impl AlgebraData {
    pub fn new() -> Self {
        let mut tabs = TabArena::new();
        let left = tabs.add(Axis::X, Some("left".to_string()));
        let top = tabs.add(Axis::Y, Some("top".to_string()));
        let right = tabs.add(Axis::X, Some("right".to_string()));
        let bottom = tabs.add(Axis::Y, Some("bottom".to_string()));
        Self {
            tabs,
            left,
            top,
            right,
            bottom,
            areas: Vec::new(),
        }
    }

    pub fn tabs(&self) -> &TabArena {
        &self.tabs
    }

    pub fn left(&self) -> TabId {
        self.left
    }

    pub fn top(&self) -> TabId {
        self.top
    }

    pub fn right(&self) -> TabId {
        self.right
    }

    pub fn bottom(&self) -> TabId {
        self.bottom
    }

    /// Outer boundary tab on `side`
    pub fn boundary(&self, side: Side) -> TabId {
        match side {
            Side::Left => self.left,
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
        }
    }

    /// Which side of the frame `tab` is, if it is a boundary tab
    pub fn boundary_side(&self, tab: TabId) -> Option<Side> {
        Side::ALL.into_iter().find(|&side| self.boundary(side) == tab)
    }

    pub fn add_x_tab(&mut self) -> TabId {
        self.tabs.add(Axis::X, None)
    }

    pub fn add_y_tab(&mut self) -> TabId {
        self.tabs.add(Axis::Y, None)
    }

    pub fn add_named_tab(&mut self, axis: Axis, name: impl Into<String>) -> TabId {
        self.tabs.add(axis, Some(name.into()))
    }

    pub fn add_area(
        &mut self,
        id: impl Into<AreaId>,
        left: TabId,
        top: TabId,
        right: TabId,
        bottom: TabId,
    ) -> Result<&mut Area, GeometryError> {
        self.insert(id.into(), [left, top, right, bottom], AreaKind::Content)
    }

    pub fn add_empty_space(
        &mut self,
        id: impl Into<AreaId>,
        left: TabId,
        top: TabId,
        right: TabId,
        bottom: TabId,
    ) -> Result<&mut Area, GeometryError> {
        self.insert(id.into(), [left, top, right, bottom], AreaKind::EmptySpace)
    }

    fn insert(
        &mut self,
        id: AreaId,
        [left, top, right, bottom]: [TabId; 4],
        kind: AreaKind,
    ) -> Result<&mut Area, GeometryError> {
        if self.area(id.as_str()).is_some() {
            return Err(GeometryError::DuplicateArea(id.0));
        }
        for (side, tab) in [
            (Side::Left, left),
            (Side::Top, top),
            (Side::Right, right),
            (Side::Bottom, bottom),
        ] {
            let found = self.tabs.axis(tab);
            if found != side.axis() {
                return Err(GeometryError::AxisMismatch {
                    name: self.tabs.label(tab),
                    expected: side.axis(),
                    found,
                });
            }
        }
        if left == right {
            return Err(GeometryError::degenerate(id.0, "left and right share one tab"));
        }
        if top == bottom {
            return Err(GeometryError::degenerate(id.0, "top and bottom share one tab"));
        }

        self.areas.push(Area {
            id,
            left,
            top,
            right,
            bottom,
            kind,
            size: SizeBounds::default(),
            alignment: Default::default(),
        });
        let last = self.areas.len() - 1;
        Ok(&mut self.areas[last])
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn area(&self, id: &str) -> Option<&Area> {
        self.areas.iter().find(|a| a.id.as_str() == id)
    }

    pub fn area_mut(&mut self, id: &str) -> Option<&mut Area> {
        self.areas.iter_mut().find(|a| a.id.as_str() == id)
    }

    /// Boundary tabs followed by every tab an area touches, without repeats
    pub fn used_tabs(&self) -> Vec<TabId> {
        let mut used = vec![self.left, self.top, self.right, self.bottom];
        for area in &self.areas {
            for side in Side::ALL {
                let tab = area.tab(side);
                if !used.contains(&tab) {
                    used.push(tab);
                }
            }
        }
        used
    }

    /// Row/column expressions describing this arrangement
    pub fn compress(&self) -> AlgebraSpec {
        super::compress::compress(self)
    }

    /// Same area ids and a consistent one-to-one tab mapping between the two
    /// layouts, boundary tabs mapping to the same boundary
    pub fn is_equivalent(&self, other: &AlgebraData) -> bool {
        if self.areas.len() != other.areas.len() {
            return false;
        }

        let mut forward: HashMap<TabId, TabId> = HashMap::new();
        let mut backward: HashMap<TabId, TabId> = HashMap::new();

        for area in &self.areas {
            let Some(theirs) = other.area(area.id.as_str()) else {
                return false;
            };
            if area.kind != theirs.kind {
                return false;
            }
            for side in Side::ALL {
                let (a, b) = (area.tab(side), theirs.tab(side));
                if self.boundary_side(a) != other.boundary_side(b) {
                    return false;
                }
                if *forward.entry(a).or_insert(b) != b || *backward.entry(b).or_insert(a) != a {
                    return false;
                }
            }
        }
        true
    }
}
