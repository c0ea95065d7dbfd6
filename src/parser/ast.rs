//! Algebra tree types: fragments of rows and columns over area ids

use std::fmt;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Identifier of a leaf area (letter followed by letters, digits or `_`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AreaId(pub String);

impl AreaId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AreaId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AreaId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// How the children of a fragment are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left to right, written `|`
    Row,
    /// Top to bottom, written `/`
    Column,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Row => Direction::Column,
            Direction::Column => Direction::Row,
        }
    }

    /// Operator symbol used in the text grammar
    pub fn symbol(self) -> char {
        match self {
            Direction::Row => '|',
            Direction::Column => '/',
        }
    }
}

/// A fragment child: either a leaf area or a nested fragment
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Area(AreaId),
    Fragment(Fragment),
}

impl Node {
    pub fn area(id: impl Into<String>) -> Self {
        Node::Area(AreaId::new(id))
    }

    pub fn as_fragment(&self) -> Option<&Fragment> {
        match self {
            Node::Fragment(f) => Some(f),
            Node::Area(_) => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Area(_))
    }

    /// Structural equality: same area ids in the same nesting, weights ignored
    pub fn shape_eq(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Area(a), Node::Area(b)) => a == b,
            (Node::Fragment(a), Node::Fragment(b)) => a.shape_eq(b),
            _ => false,
        }
    }
}

/// A child slot with its optional relative weight
#[derive(Debug, Clone, PartialEq)]
pub struct Child {
    pub node: Node,
    pub weight: Option<f64>,
}

impl Child {
    pub fn new(node: Node) -> Self {
        Self { node, weight: None }
    }

    pub fn weighted(node: Node, weight: f64) -> Self {
        Self {
            node,
            weight: Some(weight),
        }
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::new(node)
    }
}

/// A row or column of children
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub direction: Direction,
    pub children: Vec<Child>,
}

impl Fragment {
    pub fn new(direction: Direction, children: Vec<Child>) -> Self {
        Self {
            direction,
            children,
        }
    }

    /// Unweighted row of the given nodes
    pub fn row(nodes: impl IntoIterator<Item = Node>) -> Self {
        Self::new(Direction::Row, nodes.into_iter().map(Child::new).collect())
    }

    /// Unweighted column of the given nodes
    pub fn column(nodes: impl IntoIterator<Item = Node>) -> Self {
        Self::new(Direction::Column, nodes.into_iter().map(Child::new).collect())
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Structural equality ignoring weights
    pub fn shape_eq(&self, other: &Fragment) -> bool {
        self.direction == other.direction
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.node.shape_eq(&b.node))
    }

    /// Leaf area ids in reading order
    pub fn area_ids(&self) -> Vec<&AreaId> {
        let mut ids = Vec::new();
        let mut stack: Vec<&Node> = self.children.iter().rev().map(|c| &c.node).collect();
        while let Some(node) = stack.pop() {
            match node {
                Node::Area(id) => ids.push(id),
                Node::Fragment(f) => stack.extend(f.children.iter().rev().map(|c| &c.node)),
            }
        }
        ids
    }

    /// Paths (child indices from this fragment) of every fragment in the tree,
    /// this one first, in pre-order
    pub fn fragment_paths(&self) -> Vec<Vec<usize>> {
        let mut paths = Vec::new();
        let mut stack: Vec<(Vec<usize>, &Fragment)> = vec![(Vec::new(), self)];
        while let Some((path, fragment)) = stack.pop() {
            for (i, child) in fragment.children.iter().enumerate().rev() {
                if let Node::Fragment(f) = &child.node {
                    let mut child_path = path.clone();
                    child_path.push(i);
                    stack.push((child_path, f));
                }
            }
            paths.push(path);
        }
        paths
    }

    /// The fragment reached by following `path`
    pub fn at(&self, path: &[usize]) -> Option<&Fragment> {
        let mut current = self;
        for &i in path {
            current = current.children.get(i)?.node.as_fragment()?;
        }
        Some(current)
    }

    /// A copy of this tree with the fragment at `path` replaced
    pub fn replaced_at(&self, path: &[usize], replacement: Fragment) -> Option<Fragment> {
        let mut root = self.clone();
        let mut current = &mut root;
        for &i in path {
            current = match &mut current.children.get_mut(i)?.node {
                Node::Fragment(f) => f,
                Node::Area(_) => return None,
            };
        }
        *current = replacement;
        Some(root)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", self.direction.symbol())?;
            }
            match &child.node {
                Node::Area(id) => write!(f, "{}", id)?,
                Node::Fragment(inner) => write!(f, "({})", inner)?,
            }
            if let Some(weight) = child.weight {
                write!(f, "{{{}}}", weight)?;
            }
        }
        Ok(())
    }
}

/// One or more independent top-level fragments
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlgebraSpec {
    pub fragments: Vec<Fragment>,
}

impl AlgebraSpec {
    pub fn new(fragments: Vec<Fragment>) -> Self {
        Self { fragments }
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Structural equality of every fragment, weights ignored
    pub fn shape_eq(&self, other: &AlgebraSpec) -> bool {
        self.fragments.len() == other.fragments.len()
            && self
                .fragments
                .iter()
                .zip(&other.fragments)
                .all(|(a, b)| a.shape_eq(b))
    }
}

impl fmt::Display for AlgebraSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fragment) in self.fragments.iter().enumerate() {
            if i > 0 {
                write!(f, " * ")?;
            }
            write!(f, "{}", fragment)?;
        }
        Ok(())
    }
}
