use crate::edge::{Edge, EdgeKey};
use crate::error::TreeError;
use crate::node::{Node, NodeId, NodeKind};
use slotmap::SlotMap;
use std::hash::Hash;
use tracing::debug;

/// A suffix tree over an arbitrary hashable symbol type.
///
/// Holds the input sequence (set exactly once by [`SuffixTree::build`]),
/// the node arena, and the edge arena. Edge labels are (length,
/// end-offset) references into the sequence, never copies.
///
/// Nodes are identified by dense [`NodeId`]s assigned in creation
/// order; the root is always [`NodeId::ROOT`]. After construction the
/// structure is read-only and all query methods take `&self`, so it may
/// be shared freely between readers.
pub struct SuffixTree<T> {
    /// The sequence store; set exactly once, never mutated afterward.
    pub(crate) seq: Option<Vec<T>>,
    /// Node arena; a node's id is its index.
    pub(crate) nodes: Vec<Node<T>>,
    /// Edge arena; the removal half of a split is the only deletion.
    pub(crate) edges: SlotMap<EdgeKey, Edge<T>>,
}

impl<T: Hash + Eq + Clone> SuffixTree<T> {
    /// Creates an empty tree containing only the root.
    pub fn new() -> Self {
        Self {
            seq: None,
            nodes: vec![Node::new(NodeKind::Internal)],
            edges: SlotMap::new(),
        }
    }

    /// Builds the tree for `sequence` in one call.
    pub fn from_sequence<I: IntoIterator<Item = T>>(sequence: I) -> Self {
        let mut tree = Self::new();
        tree.build(sequence)
            .expect("a fresh tree cannot be already built");
        tree
    }

    /// Sets the sequence store once and inserts every suffix.
    ///
    /// Suffixes are processed in order of increasing
    /// starting-offset-from-the-end: the shortest sequence-final suffix
    /// first, each step's suffix one symbol longer and starting one
    /// position earlier than the last. Suffix links established by
    /// earlier insertions let later ones skip re-scanning from the
    /// root.
    ///
    /// Callers that want every suffix to end in a distinct leaf should
    /// terminate the sequence with a symbol occurring nowhere else in
    /// it; without one, suffixes that end inside an existing path
    /// collapse onto it.
    pub fn build<I: IntoIterator<Item = T>>(&mut self, sequence: I) -> Result<(), TreeError> {
        if self.seq.is_some() {
            return Err(TreeError::AlreadyBuilt);
        }
        let seq: Vec<T> = sequence.into_iter().collect();
        let n = seq.len();
        self.seq = Some(seq);
        for i in 1..=n {
            self.extend_suffix(n - i);
        }
        debug!(
            length = n,
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "suffix tree built"
        );
        Ok(())
    }

    /// Read access to the sequence store.
    pub fn sequence(&self) -> Result<&[T], TreeError> {
        self.seq.as_deref().ok_or(TreeError::Uninitialized)
    }

    /// Whether a sequence has been set.
    pub fn is_built(&self) -> bool {
        self.seq.is_some()
    }

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of suffix-terminal nodes.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.start().is_some()).count()
    }

    /// Number of outgoing edges of `node`.
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.node(node).out.len()
    }

    /// Parent lookup; `None` only for the root.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).in_edge.map(|key| self.edges[key].parent)
    }

    /// Child lookup by the first symbol of the connecting edge label.
    ///
    /// Linear scan over the parent's outgoing edges; fan-out is small
    /// in practice.
    pub fn child_by_first(&self, parent: NodeId, symbol: &T) -> Option<NodeId> {
        self.child_edge(parent, symbol)
            .map(|key| self.edges[key].child)
    }

    /// Suffix-link lookup.
    ///
    /// Absence is the common case during tree walking, not an error.
    pub fn link(&self, node: NodeId, symbol: &T) -> Option<NodeId> {
        self.node(node).links.get(symbol).copied()
    }

    /// Structural counts for the tree.
    pub fn stats(&self) -> TreeStats {
        let leaves = self.leaf_count();
        TreeStats {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
            leaves,
            internal: self.nodes.len() - leaves,
            sequence_length: self.seq.as_ref().map_or(0, Vec::len),
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.index()]
    }

    /// Allocates the next sequential node id.
    pub(crate) fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(kind));
        id
    }

    /// The most recently created node; the root on a fresh tree.
    pub(crate) fn last_node(&self) -> NodeId {
        NodeId((self.nodes.len() - 1) as u32)
    }

    /// Records or overwrites a suffix link.
    pub(crate) fn set_link(&mut self, node: NodeId, symbol: T, target: NodeId) {
        self.node_mut(node).links.insert(symbol, target);
    }

    pub(crate) fn symbol_at(&self, offset: usize) -> &T {
        &self
            .seq
            .as_ref()
            .expect("sequence is set during construction")[offset]
    }

    pub(crate) fn child_edge(&self, parent: NodeId, symbol: &T) -> Option<EdgeKey> {
        self.node(parent)
            .out
            .iter()
            .copied()
            .find(|&key| self.edges[key].first == *symbol)
    }

    /// Creates a new directed edge `parent -> child`.
    ///
    /// `length` symbols ending at sequence offset `end`, starting with
    /// `first`.
    pub(crate) fn attach(
        &mut self,
        parent: NodeId,
        child: NodeId,
        first: T,
        length: usize,
        end: usize,
    ) {
        assert!(
            self.child_edge(parent, &first).is_none(),
            "parent already has an outgoing edge with this first symbol"
        );
        assert!(
            self.node(child).in_edge.is_none(),
            "child already has an incoming edge"
        );
        let key = self.edges.insert(Edge {
            parent,
            child,
            first,
            length,
            end,
        });
        self.node_mut(parent).out.push(key);
        self.node_mut(child).in_edge = Some(key);
    }

    fn detach(&mut self, key: EdgeKey) {
        let edge = self
            .edges
            .remove(key)
            .expect("detached edge exists in the arena");
        self.node_mut(edge.parent).out.retain(|&k| k != key);
        self.node_mut(edge.child).in_edge = None;
    }

    /// Splits an edge `cut` symbols into its label, inserting a new
    /// internal node.
    ///
    /// The original edge is replaced by two whose labels concatenate to
    /// exactly the original label: the upper one keeps the original
    /// first symbol and carries the first `cut` symbols, the lower one
    /// carries the rest and keeps the original end offset.
    pub(crate) fn split_edge(&mut self, key: EdgeKey, cut: usize) -> NodeId {
        let edge = self.edges[key].clone();
        assert!(
            cut > 0 && cut < edge.length,
            "split offset must fall inside the edge label"
        );
        let cut_offset = edge.label_start() + cut;
        let lower_first = self.symbol_at(cut_offset).clone();
        let mid = self.create_node(NodeKind::Internal);
        self.detach(key);
        self.attach(edge.parent, mid, edge.first, cut, cut_offset);
        self.attach(mid, edge.child, lower_first, edge.length - cut, edge.end);
        mid
    }
}

impl<T: Hash + Eq + Clone> Default for SuffixTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural counts for a tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeStats {
    /// Total nodes, including the root.
    pub nodes: usize,
    /// Total edges.
    pub edges: usize,
    /// Suffix-terminal nodes.
    pub leaves: usize,
    /// Non-terminal nodes, including the root.
    pub internal: usize,
    /// Symbols in the sequence store; 0 before build.
    pub sequence_length: usize,
}
