use rust_decimal::Decimal;

use crate::ast::{Document, Node, NodeId};

/// An owned, fully resolved copy of a node and everything below it.
///
/// Unlike the stringifying queries, nothing is lost in the conversion: the
/// integer/decimal distinction is kept, nested arrays and tables survive and
/// table entries keep their document order.
///
/// # Examples
///
/// ```
/// use gtoml::{parse, Value};
///
/// let doc = parse("ports = [80, 443]", "inline").unwrap();
/// let ports = doc.node_by_key("ports").map(|node| doc.resolve(node));
///
/// assert_eq!(
///     ports,
///     Some(Value::Array(vec![Value::Integer(80), Value::Integer(443)]))
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),

    Integer(i64),

    /// Decimal number with the scale it was written with
    Float(Decimal),

    String(String),

    /// Array of values (homogeneous or heterogeneous)
    Array(Vec<Value>),

    /// Table entries in document order
    Table(Vec<(String, Value)>),
}

impl Value {
    /// Get as integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as decimal, integers are widened
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Integer(n) => Some(Decimal::from(*n)),
            Value::Float(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a key in a table value
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Table(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl Document {
    /// Resolve a node into an owned [`Value`].
    ///
    /// A key-value resolves to its value.
    pub fn resolve(&self, node: &Node) -> Value {
        match node {
            Node::String(s) => Value::String(s.clone()),
            Node::Integer(n) => Value::Integer(*n),
            Node::Float(d) => Value::Float(*d),
            Node::Bool(b) => Value::Boolean(*b),
            Node::Array { elements, .. } => {
                Value::Array(elements.iter().map(|id| self.value(*id)).collect())
            }
            Node::Table { entries, .. } => Value::Table(
                entries
                    .iter()
                    .filter_map(|id| self.entry(*id))
                    .collect(),
            ),
            Node::KeyValue { value, .. } => self.value(*value),
        }
    }

    /// Resolve a handle into an owned [`Value`]
    pub fn value(&self, id: NodeId) -> Value {
        self.resolve(self.node(id))
    }

    /// The whole document as one table, top-level items in order
    pub fn to_value(&self) -> Value {
        Value::Table(
            self.top_level()
                .iter()
                .filter_map(|id| self.entry(*id))
                .collect(),
        )
    }

    /// A named node as a `(name, value)` pair
    fn entry(&self, id: NodeId) -> Option<(String, Value)> {
        let node = self.node(id);
        let name = node.name()?.to_string();
        Some((name, self.resolve(node)))
    }
}
