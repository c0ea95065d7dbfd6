//! Configuration for layout sessions

use crate::solver::SoftStrategy;

/// Soft resolver priority of each constraint class; higher is kept first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Priorities {
    /// Outer tabs pinned to the container edges
    pub boundary: i32,
    /// Areas never have negative width or height
    pub non_negative: i32,
    pub min_size: i32,
    pub max_size: i32,
    pub preferred_size: i32,
}

impl Default for Priorities {
    fn default() -> Self {
        Self {
            boundary: 100,
            non_negative: 90,
            min_size: 80,
            max_size: 70,
            preferred_size: 10,
        }
    }
}

/// Configuration options for layout computation
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Container width
    pub width: f64,

    /// Container height
    pub height: f64,

    /// How conflicting constraints are given up
    pub strategy: SoftStrategy,

    pub priorities: Priorities,

    /// Slack allowed when checking a solved constraint
    pub tolerance: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            strategy: SoftStrategy::Grouping,
            priorities: Priorities::default(),
            tolerance: 1e-6,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the container size
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_strategy(mut self, strategy: SoftStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_priorities(mut self, priorities: Priorities) -> Self {
        self.priorities = priorities;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}
