//! Error types for building geometric layouts

use thiserror::Error;

use super::tabs::Axis;

/// Fatal configuration errors while building or resolving a layout
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// An edge refers to an area that does not exist
    #[error("unknown area '{name}' referenced by area '{by}'")]
    UnknownArea { name: String, by: String },

    /// Edge references that never reach a concrete tab
    #[error("circular edge reference: {}", cycle.join(" -> "))]
    ReferenceCycle { cycle: Vec<String> },

    /// A named tab is used on both axes
    #[error("tab '{name}' used as {expected:?} tab but already bound on the {found:?} axis")]
    AxisMismatch {
        name: String,
        expected: Axis,
        found: Axis,
    },

    /// Two areas share one id
    #[error("duplicate area '{0}'")]
    DuplicateArea(String),

    /// An area whose opposite edges coincide
    #[error("area '{area}' is degenerate: {reason}")]
    DegenerateArea { area: String, reason: String },
}

impl GeometryError {
    pub fn unknown_area(name: impl Into<String>, by: impl Into<String>) -> Self {
        Self::UnknownArea {
            name: name.into(),
            by: by.into(),
        }
    }

    pub fn cycle(cycle: Vec<String>) -> Self {
        Self::ReferenceCycle { cycle }
    }

    pub fn degenerate(area: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DegenerateArea {
            area: area.into(),
            reason: reason.into(),
        }
    }
}
