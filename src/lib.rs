//! Layout Algebra - tab-based GUI layouts as algebraic expressions
//!
//! This library provides a parser for the layout algebra, translation between
//! area geometry and algebra expressions, a search for alternative
//! expressions, and a soft-constraint layout solver.
//!
//! # Example
//!
//! ```rust
//! use layout_algebra::{solve_expression, LayoutConfig};
//!
//! let result = solve_expression("A | B", LayoutConfig::new().with_size(200.0, 100.0)).unwrap();
//! assert!((result.bounds("B").unwrap().right() - 200.0).abs() < 1e-6);
//! ```

pub mod document;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod parser;
pub mod search;
pub mod solver;

pub use document::{DocumentError, LayoutDocument};
pub use error::ParseError;
pub use geometry::{AlgebraData, GeometryError};
pub use layout::{LayoutConfig, LayoutResult, LayoutSession};
pub use parser::{parse, parse_fragment, AlgebraSpec, Fragment};
pub use solver::{LinearSpec, ResultType, SoftStrategy};

use thiserror::Error;

/// Errors from any stage between algebra text and a solved layout
#[derive(Debug, Error)]
pub enum Error {
    /// Error during parsing
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Areas could not be placed
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Layout document could not be loaded
    #[error("document error: {0}")]
    Document(#[from] DocumentError),
}

impl From<Vec<ParseError>> for Error {
    fn from(errors: Vec<ParseError>) -> Self {
        Error::Parse(errors)
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse one fragment, expand it into areas and solve it
///
/// Areas carry no size hints, so the solver is free to distribute the
/// container among them.
pub fn solve_expression(source: &str, config: LayoutConfig) -> Result<LayoutResult, Error> {
    let fragment = parse_fragment(source)?;
    let data = fragment.to_algebra_data()?;
    Ok(layout::solve(&data, config))
}
