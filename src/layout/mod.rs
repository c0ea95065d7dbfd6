//! Layout sessions: solving a geometric layout inside a container
//!
//! Each tab becomes a solver variable. Areas contribute non-negative extent,
//! minimum, maximum and preferred size constraints, each class with its own
//! priority, and the soft resolver gives up the lowest-priority conflicts.

pub mod config;
pub mod session;
pub mod types;

pub use config::{LayoutConfig, Priorities};
pub use session::LayoutSession;
pub use types::*;

use crate::geometry::AlgebraData;

/// Solve `data` with a kasuari-backed session
pub fn solve(data: &AlgebraData, config: LayoutConfig) -> LayoutResult {
    LayoutSession::new(data, config).solve()
}
