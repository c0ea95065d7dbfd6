//! Result types of a layout session

use indexmap::IndexMap;

use crate::geometry::{Alignment, HorizontalAlignment, VerticalAlignment};
use crate::parser::AreaId;
use crate::solver::{ConstraintId, ResultType};

/// A bounding box representing the spatial extent of an area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if this bounding box intersects another
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Box of at most `max` placed inside this one according to `alignment`;
    /// `Fill` keeps the full extent on that axis
    pub fn aligned(&self, max: Option<(f64, f64)>, alignment: Alignment) -> BoundingBox {
        let Some((max_w, max_h)) = max else {
            return *self;
        };

        let (x, width) = match alignment.horizontal {
            HorizontalAlignment::Fill => (self.x, self.width),
            h => {
                let width = self.width.min(max_w);
                let slack = self.width - width;
                let offset = match h {
                    HorizontalAlignment::Left => 0.0,
                    HorizontalAlignment::Center => slack / 2.0,
                    _ => slack,
                };
                (self.x + offset, width)
            }
        };
        let (y, height) = match alignment.vertical {
            VerticalAlignment::Fill => (self.y, self.height),
            v => {
                let height = self.height.min(max_h);
                let slack = self.height - height;
                let offset = match v {
                    VerticalAlignment::Top => 0.0,
                    VerticalAlignment::Center => slack / 2.0,
                    _ => slack,
                };
                (self.y + offset, height)
            }
        };
        BoundingBox::new(x, y, width, height)
    }
}

/// Where one area ended up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaLayout {
    /// Rectangle between the area's four tabs
    pub cell: BoundingBox,
    /// Content rectangle inside the cell after max size and alignment
    pub content: BoundingBox,
}

/// Result of solving a layout
#[derive(Debug, Clone)]
pub struct LayoutResult {
    /// Areas in placement order
    pub areas: IndexMap<AreaId, AreaLayout>,
    /// Terminal solver result
    pub result: ResultType,
    /// Constraints the soft resolver gave up
    pub disabled: Vec<ConstraintId>,
    /// Solver invocations used
    pub solves: usize,
}

impl LayoutResult {
    pub fn get(&self, id: &str) -> Option<&AreaLayout> {
        self.areas.get(&AreaId::new(id))
    }

    /// Cell bounds of an area
    pub fn bounds(&self, id: &str) -> Option<BoundingBox> {
        self.get(id).map(|a| a.cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let b = BoundingBox::from_edges(10.0, 20.0, 110.0, 70.0);
        assert_eq!(b, BoundingBox::new(10.0, 20.0, 100.0, 50.0));
        assert_eq!(b.right(), 110.0);
        assert_eq!(b.bottom(), 70.0);
    }

    #[test]
    fn test_intersects() {
        let a = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let b = BoundingBox::new(100.0, 0.0, 100.0, 100.0);
        let c = BoundingBox::new(50.0, 50.0, 100.0, 100.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_aligned() {
        let cell = BoundingBox::new(0.0, 0.0, 100.0, 40.0);
        let centered = Alignment {
            horizontal: HorizontalAlignment::Center,
            vertical: VerticalAlignment::Bottom,
        };
        assert_eq!(
            cell.aligned(Some((60.0, 10.0)), centered),
            BoundingBox::new(20.0, 30.0, 60.0, 10.0)
        );
        assert_eq!(cell.aligned(Some((60.0, 10.0)), Alignment::default()), cell);
        assert_eq!(cell.aligned(None, centered), cell);
    }
}
