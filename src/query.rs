//! Read-only lookups over a parsed [`Document`].
//!
//! Every query is a fresh linear scan of the top level; no index is built.
//! Failures are reported through [`LookupError`], whose text matches the
//! classic `ERROR: Could not find ...` lines so it can be printed as-is.

use thiserror::Error;

use crate::ast::{Document, Node, NodeId};

/// A requested key, table or array does not exist.
///
/// An expected outcome of normal operation, never fatal for the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("ERROR: Could not find \"{key}\" in file {source_name}")]
    MissingKey { key: String, source_name: String },

    #[error(
        "ERROR: Could not find value for key \"{key}\" in table \"{table}\" in file {source_name}"
    )]
    MissingTableKey {
        table: String,
        key: String,
        source_name: String,
    },

    /// Dotted query without a `.`
    #[error("ERROR: Invalid table.key format")]
    InvalidPath(String),

    /// The path resolved to something that is not an array
    #[error("ERROR: \"{path}\" in file {source_name} is a {kind}, not an array")]
    NotAnArray {
        path: String,
        kind: &'static str,
        source_name: String,
    },
}

/// Split `table.key` on the first dot
fn split_path(path: &str) -> Result<(&str, &str), LookupError> {
    path.split_once('.')
        .ok_or_else(|| LookupError::InvalidPath(path.to_string()))
}

impl Document {
    fn missing_key(&self, key: &str) -> LookupError {
        LookupError::MissingKey {
            key: key.to_string(),
            source_name: self.source().to_string(),
        }
    }

    /// Stringified value of a top-level key.
    ///
    /// A top-level array renders as `[a,b,c]`; scalars render as text.
    /// Tables and arrays of tables have no single-line form and are
    /// reported as missing.
    pub fn value_by_key(&self, key: &str) -> Result<String, LookupError> {
        for node in self.top_level_nodes() {
            match node {
                Node::Array {
                    name: Some(name),
                    elements,
                } if name == key && !self.is_array_of_tables(elements) => {
                    return Ok(format!("[{}]", self.to_vector(node).join(",")));
                }
                Node::KeyValue { key: k, value } if k == key => {
                    if let Some(text) = self.node(*value).scalar_text() {
                        return Ok(text);
                    }
                }
                _ => {}
            }
        }
        Err(self.missing_key(key))
    }

    /// Stringified value of `table.key`.
    ///
    /// Looks in top-level tables named `table`, then in the tables of a
    /// top-level array of tables with that name. When the entry holds an
    /// array only its first element is returned.
    pub fn table_value(&self, path: &str) -> Result<String, LookupError> {
        let (table, key) = split_path(path)?;

        for id in self.tables_named(table) {
            let Some(value) = self.table_entry(id, key) else {
                continue;
            };
            let text = match self.node(value) {
                Node::Array { elements, .. } => elements
                    .first()
                    .and_then(|first| self.node(*first).scalar_text()),
                other => other.scalar_text(),
            };
            if let Some(text) = text {
                return Ok(text);
            }
        }

        Err(LookupError::MissingTableKey {
            table: table.to_string(),
            key: key.to_string(),
            source_name: self.source().to_string(),
        })
    }

    /// Flattened, stringified elements of the array at `path`.
    ///
    /// `path` is either a top-level key or a `table.key` path.
    pub fn array_value(&self, path: &str) -> Result<Vec<String>, LookupError> {
        let node = if path.contains('.') {
            self.node_by_path(path)
        } else {
            self.node_by_key(path)
        };

        match node {
            Some(array @ Node::Array { .. }) => Ok(self.to_vector(array)),
            Some(other) => Err(LookupError::NotAnArray {
                path: path.to_string(),
                kind: other.kind_name(),
                source_name: self.source().to_string(),
            }),
            None => Err(self.missing_key(path)),
        }
    }

    /// Stringified scalar elements of an array node, in order.
    ///
    /// Elements that are not scalars (nested arrays, tables) are skipped.
    /// Anything other than an array yields an empty vector.
    pub fn to_vector(&self, node: &Node) -> Vec<String> {
        match node {
            Node::Array { elements, .. } => elements
                .iter()
                .filter_map(|id| self.node(*id).scalar_text())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Raw node bound to a top-level key.
    ///
    /// For key-values this is the value node; named arrays and tables are
    /// returned themselves.
    pub fn node_by_key(&self, key: &str) -> Option<&Node> {
        self.top_level_nodes().find_map(|node| match node {
            Node::KeyValue { key: k, value } if k == key => Some(self.node(*value)),
            Node::Array {
                name: Some(name), ..
            } if name == key => Some(node),
            Node::Table { name, .. } if name == key => Some(node),
            _ => None,
        })
    }

    /// Raw value node at `table.key`, arrays are returned whole
    pub fn node_by_path(&self, path: &str) -> Option<&Node> {
        let (table, key) = split_path(path).ok()?;
        self.tables_named(table)
            .find_map(|id| self.table_entry(id, key))
            .map(|id| self.node(id))
    }

    /// Top-level tables with this name, including those collected in an
    /// array of tables, in document order
    fn tables_named<'a>(&'a self, table: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.top_level().iter().flat_map(move |id| {
            let found: Vec<NodeId> = match self.node(*id) {
                Node::Table { name, .. } if name == table => vec![*id],
                Node::Array {
                    name: Some(name),
                    elements,
                } if name == table => elements
                    .iter()
                    .copied()
                    .filter(|e| matches!(self.node(*e), Node::Table { .. }))
                    .collect(),
                _ => Vec::new(),
            };
            found
        })
    }

    /// Value handle of `key` inside the table `id`
    fn table_entry(&self, id: NodeId, key: &str) -> Option<NodeId> {
        let Node::Table { entries, .. } = self.node(id) else {
            return None;
        };
        entries.iter().find_map(|entry| match self.node(*entry) {
            Node::KeyValue { key: k, value } if k == key => Some(*value),
            _ => None,
        })
    }
}
