//! Human-readable dump of a parsed document.
//!
//! A debugging aid only: it walks the AST read-only and is not part of the
//! query contract. Each level is indented by two spaces.
//!
//! # Examples
//!
//! ```
//! use gtoml::{output::dump, parse};
//!
//! let doc = parse("[package]\nname = \"gtoml\"\n", "Cargo.toml").unwrap();
//!
//! assert_eq!(dump(&doc), "Table: package\n  Key: name, Value: String: gtoml\n");
//! ```

use crate::ast::{Document, Node, NodeId};

pub struct TreePrinter<'a> {
    document: &'a Document,
}

impl<'a> TreePrinter<'a> {
    pub fn new(document: &'a Document) -> Self {
        TreePrinter { document }
    }

    pub fn print(&self) -> String {
        let mut out = String::new();
        for id in self.document.top_level() {
            self.print_node(*id, 0, &mut out);
        }
        out
    }

    fn print_node(&self, id: NodeId, indent: usize, out: &mut String) {
        match self.document.node(id) {
            Node::Table { name, entries } => {
                out.push_str(&format!("{}Table: {}\n", self.indent(indent), name));
                for entry in entries {
                    self.print_node(*entry, indent + 1, out);
                }
            }
            Node::KeyValue { key, value } => {
                out.push_str(&format!("{}Key: {}, Value: ", self.indent(indent), key));
                self.print_value(*value, indent, out);
            }
            _ => {
                out.push_str(&self.indent(indent));
                self.print_value(id, indent, out);
            }
        }
    }

    /// Print a value starting mid-line; children go on following lines
    fn print_value(&self, id: NodeId, indent: usize, out: &mut String) {
        match self.document.node(id) {
            Node::String(s) => out.push_str(&format!("String: {}\n", s)),
            Node::Integer(n) => out.push_str(&format!("Integer: {}\n", n)),
            Node::Float(d) => out.push_str(&format!("Float: {}\n", d)),
            Node::Bool(b) => out.push_str(&format!("Bool: {}\n", b)),
            Node::Array { name, elements } => {
                out.push_str(&format!("Array: {}\n", name.as_deref().unwrap_or("")));
                for element in elements {
                    self.print_node(*element, indent + 1, out);
                }
            }
            Node::Table { .. } | Node::KeyValue { .. } => {
                out.push('\n');
                self.print_node(id, indent + 1, out);
            }
        }
    }

    fn indent(&self, level: usize) -> String {
        "  ".repeat(level)
    }
}

/// Render the whole document as an indented tree
pub fn dump(document: &Document) -> String {
    TreePrinter::new(document).print()
}
