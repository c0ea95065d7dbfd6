//! Leaf rectangles bounded by four tabs

use serde::Deserialize;

use crate::parser::AreaId;

use super::tabs::{Axis, TabId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Top,
    Right,
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Top, Side::Right, Side::Bottom];

    pub fn axis(self) -> Axis {
        match self {
            Side::Left | Side::Right => Axis::X,
            Side::Top | Side::Bottom => Axis::Y,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AreaKind {
    #[default]
    Content,
    /// Filler that takes up leftover room
    EmptySpace,
}

/// Size hints from the host, each a `(width, height)` pair
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeBounds {
    pub min: Option<(f64, f64)>,
    pub preferred: Option<(f64, f64)>,
    pub max: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
    #[default]
    Fill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
    #[default]
    Fill,
}

/// Placement of content inside its cell when the cell is larger than `max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Alignment {
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    pub id: AreaId,
    pub left: TabId,
    pub top: TabId,
    pub right: TabId,
    pub bottom: TabId,
    pub kind: AreaKind,
    pub size: SizeBounds,
    pub alignment: Alignment,
}

impl Area {
    pub fn tab(&self, side: Side) -> TabId {
        match side {
            Side::Left => self.left,
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
        }
    }

    pub fn is_empty_space(&self) -> bool {
        self.kind == AreaKind::EmptySpace
    }

    pub fn set_min_size(&mut self, width: f64, height: f64) {
        self.size.min = Some((width, height));
    }

    pub fn set_preferred_size(&mut self, width: f64, height: f64) {
        self.size.preferred = Some((width, height));
    }

    pub fn set_max_size(&mut self, width: f64, height: f64) {
        self.size.max = Some((width, height));
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}
