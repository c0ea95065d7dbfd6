//! Layout documents: areas and their edge references in TOML
//!
//! ```toml
//! [container]
//! width = 400
//! height = 300
//!
//! [[areas]]
//! id = "A"
//! left = { tab = "left" }
//! right = { tab = "x1" }
//! preferred = [100, 300]
//!
//! [[areas]]
//! id = "B"
//! left = { area = "A" }
//! right = { tab = "right" }
//! halign = "center"
//! ```
//!
//! Unset edges get fresh tabs. Tab names `left`, `top`, `right` and `bottom`
//! are the container edges.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::{
    AlgebraData, AreaSpec, EdgeRef, GeometryError, HorizontalAlignment, Side, SizeBounds,
    TabResolver, VerticalAlignment,
};
use crate::layout::LayoutConfig;

/// Errors that can occur when loading layout documents
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read layout document: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse layout document TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid layout document: {0}")]
    Geometry(#[from] GeometryError),
}

/// A parsed layout document
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDocument {
    /// Container (width, height), if given
    pub container: Option<(f64, f64)>,
    pub areas: Vec<AreaSpec>,
}

/// TOML structure for deserializing documents
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlDocument {
    container: Option<TomlContainer>,
    #[serde(default)]
    areas: Vec<TomlArea>,
}

#[derive(Deserialize)]
struct TomlContainer {
    width: f64,
    height: f64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlArea {
    id: String,
    #[serde(default)]
    empty: bool,
    left: Option<TomlEdge>,
    top: Option<TomlEdge>,
    right: Option<TomlEdge>,
    bottom: Option<TomlEdge>,
    min: Option<[f64; 2]>,
    preferred: Option<[f64; 2]>,
    max: Option<[f64; 2]>,
    #[serde(default)]
    halign: HorizontalAlignment,
    #[serde(default)]
    valign: VerticalAlignment,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum TomlEdge {
    Tab(String),
    Area(String),
}

impl From<Option<TomlEdge>> for EdgeRef {
    fn from(edge: Option<TomlEdge>) -> Self {
        match edge {
            None => EdgeRef::Unset,
            Some(TomlEdge::Tab(name)) => EdgeRef::Named(name),
            Some(TomlEdge::Area(id)) => EdgeRef::Area(id),
        }
    }
}

impl From<TomlArea> for AreaSpec {
    fn from(area: TomlArea) -> Self {
        let pair = |p: Option<[f64; 2]>| p.map(|[w, h]| (w, h));
        let mut spec = if area.empty {
            AreaSpec::empty_space(area.id)
        } else {
            AreaSpec::new(area.id)
        }
        .with_edge(Side::Left, area.left.into())
        .with_edge(Side::Top, area.top.into())
        .with_edge(Side::Right, area.right.into())
        .with_edge(Side::Bottom, area.bottom.into())
        .with_size(SizeBounds {
            min: pair(area.min),
            preferred: pair(area.preferred),
            max: pair(area.max),
        });
        spec.alignment.horizontal = area.halign;
        spec.alignment.vertical = area.valign;
        spec
    }
}

impl LayoutDocument {
    /// Load a document from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a document from a TOML string
    pub fn from_str(content: &str) -> Result<Self, DocumentError> {
        let parsed: TomlDocument = toml::from_str(content)?;

        Ok(LayoutDocument {
            container: parsed.container.map(|c| (c.width, c.height)),
            areas: parsed.areas.into_iter().map(AreaSpec::from).collect(),
        })
    }

    /// Bind every edge to a tab
    pub fn to_algebra_data(&self) -> Result<AlgebraData, DocumentError> {
        Ok(TabResolver::new().resolve(&self.areas)?)
    }

    /// `base` with the container size applied, if the document has one
    pub fn layout_config(&self, base: LayoutConfig) -> LayoutConfig {
        match self.container {
            Some((width, height)) => base.with_size(width, height),
            None => base,
        }
    }
}
