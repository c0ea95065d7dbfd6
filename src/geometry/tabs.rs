//! Tabs: shared axis positions addressed by arena handles

use std::fmt;

/// Axis a tab lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Vertical line at some x (left and right edges)
    X,
    /// Horizontal line at some y (top and bottom edges)
    Y,
}

/// Handle into a [`TabArena`]; equal handles are the same tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(usize);

impl TabId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Tab {
    axis: Axis,
    name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TabArena {
    tabs: Vec<Tab>,
}

impl TabArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, axis: Axis, name: Option<String>) -> TabId {
        self.tabs.push(Tab { axis, name });
        TabId(self.tabs.len() - 1)
    }

    pub fn axis(&self, id: TabId) -> Axis {
        self.tabs[id.0].axis
    }

    pub fn name(&self, id: TabId) -> Option<&str> {
        self.tabs[id.0].name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TabId> {
        (0..self.tabs.len()).map(TabId)
    }

    /// Label for messages: the name if present, else the handle
    pub fn label(&self, id: TabId) -> String {
        match self.name(id) {
            Some(name) => name.to_string(),
            None => id.to_string(),
        }
    }
}
