use crate::ast::{Node, NodeId};

/// A parsed configuration file.
///
/// Owns every node in a single arena. The top level is an ordered list of
/// handles into that arena; insertion order is the only iteration order.
/// A document is only built by the parser and never changes afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    nodes: Vec<Node>,
    top_level: Vec<NodeId>,
    source: String,
}

impl Document {
    pub(crate) fn new(source: impl Into<String>) -> Self {
        Document {
            nodes: Vec::new(),
            top_level: Vec::new(),
            source: source.into(),
        }
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub(crate) fn push_top_level(&mut self, id: NodeId) {
        self.top_level.push(id);
    }

    /// Replace the last top-level handle, returning the old one
    pub(crate) fn replace_last_top_level(&mut self, id: NodeId) -> Option<NodeId> {
        let slot = self.top_level.last_mut()?;
        Some(std::mem::replace(slot, id))
    }

    /// `true` for a non-empty element list made only of tables
    pub(crate) fn is_array_of_tables(&self, elements: &[NodeId]) -> bool {
        !elements.is_empty()
            && elements
                .iter()
                .all(|id| matches!(self.node(*id), Node::Table { .. }))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Label of the input this document came from (usually a file path)
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Resolve a handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not obtained from this document and lies outside
    /// its arena. Use [`Document::get`] for handles of unknown origin.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Resolve a handle, `None` when it lies outside this document's arena
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn top_level(&self) -> &[NodeId] {
        &self.top_level
    }

    pub fn top_level_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.top_level.iter().map(|id| self.node(*id))
    }

    pub fn is_empty(&self) -> bool {
        self.top_level.is_empty()
    }

    /// Number of nodes in the arena, children included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
