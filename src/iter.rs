use crate::edge::{Edge, EdgeKey};
use crate::node::NodeId;
use crate::tree::SuffixTree;
use std::hash::Hash;

/// A materialized view of one edge, with its derived label.
#[derive(Debug, Clone, Copy)]
pub struct EdgeRef<'a, T> {
    pub parent: NodeId,
    pub child: NodeId,
    /// First symbol of the label.
    pub first: &'a T,
    /// Label length in symbols.
    pub length: usize,
    /// Offset in the sequence immediately after the label.
    pub end: usize,
    /// The derived label, `sequence[end - length .. end]`.
    pub label: &'a [T],
}

/// A view of one node for export.
///
/// Leaf vs internal is distinguished by out-degree or by `start`,
/// whichever the consumer prefers; leaves carry the starting offset of
/// the suffix they terminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRef {
    pub id: NodeId,
    pub out_degree: usize,
    pub start: Option<usize>,
}

/// Iterator over every edge of the tree, in unspecified order.
pub struct Edges<'a, T> {
    tree: &'a SuffixTree<T>,
    inner: slotmap::basic::Iter<'a, EdgeKey, Edge<T>>,
}

impl<'a, T: Hash + Eq + Clone> Iterator for Edges<'a, T> {
    type Item = EdgeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let (key, edge) = self.inner.next()?;
        Some(EdgeRef {
            parent: edge.parent,
            child: edge.child,
            first: &edge.first,
            length: edge.length,
            end: edge.end,
            label: self.tree.label_of(key),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Iterator over every node of the tree, in creation (id) order.
pub struct Nodes<'a, T> {
    tree: &'a SuffixTree<T>,
    next: usize,
}

impl<'a, T: Hash + Eq + Clone> Iterator for Nodes<'a, T> {
    type Item = NodeRef;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.tree.node_count() {
            return None;
        }
        let id = NodeId(self.next as u32);
        self.next += 1;
        let node = self.tree.node(id);
        Some(NodeRef {
            id,
            out_degree: node.out.len(),
            start: node.start(),
        })
    }
}

/// Iterator over suffix-terminal nodes, in creation order.
pub struct Leaves<'a, T> {
    inner: Nodes<'a, T>,
}

impl<'a, T: Hash + Eq + Clone> Iterator for Leaves<'a, T> {
    type Item = NodeRef;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find(|node| node.start.is_some())
    }
}

impl<T: Hash + Eq + Clone> SuffixTree<T> {
    /// Enumerates all edges with their derived labels.
    pub fn edges(&self) -> Edges<'_, T> {
        Edges {
            tree: self,
            inner: self.edges.iter(),
        }
    }

    /// Enumerates all nodes in id order.
    pub fn nodes(&self) -> Nodes<'_, T> {
        Nodes {
            tree: self,
            next: 0,
        }
    }

    /// Enumerates suffix-terminal nodes with their starting offsets.
    pub fn leaves(&self) -> Leaves<'_, T> {
        Leaves {
            inner: self.nodes(),
        }
    }

    /// The edge view between `parent` and `child`, if connected.
    pub fn edge(&self, parent: NodeId, child: NodeId) -> Option<EdgeRef<'_, T>> {
        let key = self.node(child).in_edge?;
        let edge = &self.edges[key];
        if edge.parent != parent {
            return None;
        }
        Some(EdgeRef {
            parent: edge.parent,
            child: edge.child,
            first: &edge.first,
            length: edge.length,
            end: edge.end,
            label: self.label_of(key),
        })
    }
}
