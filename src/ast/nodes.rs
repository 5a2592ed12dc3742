use rust_decimal::Decimal;

/// Handle to a node stored in a [`Document`](super::Document) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// AST node.
///
/// Children are referenced through [`NodeId`] handles into the owning
/// document, so the tree is acyclic by construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// String value with its delimiting quotes removed
    ///
    /// # Example
    /// ```text
    /// name = "gtoml"
    /// ```
    String(String),

    /// Signed integer
    Integer(i64),

    /// Decimal number, keeps the scale it was written with
    ///
    /// # Example
    /// ```text
    /// ratio = 0.50    // stored as 0.50, rendered "0.50"
    /// ```
    Float(Decimal),

    /// Boolean
    Bool(bool),

    /// Ordered list of values, element kinds may be mixed
    ///
    /// Top-level assignments and table entries carry the key as `name`;
    /// nested arrays are unnamed.
    ///
    /// # Example
    /// ```text
    /// ignore = ["target", "*.bak"]
    /// ```
    Array {
        name: Option<String>,
        elements: Vec<NodeId>,
    },

    /// Named group of entries introduced by a `[name]` header
    ///
    /// # Example
    /// ```text
    /// [package]
    /// name = "gtoml"
    /// ```
    Table { name: String, entries: Vec<NodeId> },

    /// Key bound to a value
    KeyValue { key: String, value: NodeId },
}

impl Node {
    /// Human-readable kind name used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::String(_) => "string",
            Node::Integer(_) => "integer",
            Node::Float(_) => "float",
            Node::Bool(_) => "bool",
            Node::Array { .. } => "array",
            Node::Table { .. } => "table",
            Node::KeyValue { .. } => "key-value",
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Node::String(_) | Node::Integer(_) | Node::Float(_) | Node::Bool(_)
        )
    }

    /// Stringified form of a scalar, `None` for arrays, tables and key-values.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Node::String(s) => Some(s.clone()),
            Node::Integer(n) => Some(n.to_string()),
            Node::Float(d) => Some(d.to_string()),
            Node::Bool(b) => Some(b.to_string()),
            Node::Array { .. } | Node::Table { .. } | Node::KeyValue { .. } => None,
        }
    }

    /// Name a top-level node answers to, if any
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Array { name, .. } => name.as_deref(),
            Node::Table { name, .. } => Some(name),
            Node::KeyValue { key, .. } => Some(key),
            _ => None,
        }
    }
}
