//! Geometric layouts: tabs, areas and their translation to and from the
//! algebra
//!
//! Areas never own their edges. Every edge is a [`TabId`] into the layout's
//! [`TabArena`], so two areas touching the same position hold equal handles.

mod area;
mod compress;
mod data;
mod error;
mod expand;
mod resolve;
mod tabs;

pub use area::{
    Alignment, Area, AreaKind, HorizontalAlignment, Side, SizeBounds, VerticalAlignment,
};
pub use compress::compress;
pub use data::AlgebraData;
pub use error::GeometryError;
pub use resolve::{AreaSpec, EdgeRef, TabResolver};
pub use tabs::{Axis, TabArena, TabId};
