use crate::edge::EdgeKey;
use crate::error::TreeError;
use crate::node::NodeId;
use crate::tree::SuffixTree;
use std::hash::Hash;

impl<T: Hash + Eq + Clone> SuffixTree<T> {
    /// Derived label of the edge `parent -> child`, if such an edge
    /// exists.
    ///
    /// The label is the sub-sequence `sequence[end - length .. end]`;
    /// it is recovered from the store, never copied into the edge.
    pub fn label(&self, parent: NodeId, child: NodeId) -> Result<Option<&[T]>, TreeError> {
        let seq = self.sequence()?;
        let Some(key) = self.node(child).in_edge else {
            return Ok(None);
        };
        let edge = &self.edges[key];
        if edge.parent != parent {
            return Ok(None);
        }
        Ok(Some(&seq[edge.label_start()..edge.end]))
    }

    /// Length of the root-to-node path; 0 for the root.
    pub fn length(&self, node: NodeId) -> Result<usize, TreeError> {
        self.sequence()?;
        Ok(self.path_len(node))
    }

    /// The symbols spelled by the root-to-node path, in order.
    pub fn path(&self, node: NodeId) -> Result<Vec<T>, TreeError> {
        let seq = self.sequence()?;
        let mut slices: Vec<&[T]> = Vec::new();
        let mut id = node;
        while let Some(key) = self.node(id).in_edge {
            let edge = &self.edges[key];
            slices.push(&seq[edge.label_start()..edge.end]);
            id = edge.parent;
        }
        slices.reverse();
        Ok(slices.into_iter().flatten().cloned().collect())
    }

    /// Whether `pattern` occurs anywhere in the sequence.
    ///
    /// Walks the pattern down from the root; every substring of the
    /// sequence is a prefix of some root-to-leaf path. Runs in time
    /// proportional to the pattern length.
    pub fn contains(&self, pattern: &[T]) -> Result<bool, TreeError> {
        let seq = self.sequence()?;
        let mut node = NodeId::ROOT;
        let mut consumed = 0;
        while consumed < pattern.len() {
            let Some(key) = self.child_edge(node, &pattern[consumed]) else {
                return Ok(false);
            };
            let edge = &self.edges[key];
            let label = &seq[edge.label_start()..edge.end];
            let take = label.len().min(pattern.len() - consumed);
            if label[..take] != pattern[consumed..consumed + take] {
                return Ok(false);
            }
            consumed += take;
            node = edge.child;
        }
        Ok(true)
    }

    /// The longest substring occurring more than once: the deepest path
    /// ending at a node with two or more children.
    ///
    /// Meaningful when the sequence ends in a unique terminator; empty
    /// when nothing repeats.
    pub fn longest_repeated(&self) -> Result<Vec<T>, TreeError> {
        self.sequence()?;
        let mut best = NodeId::ROOT;
        let mut best_len = 0;
        for index in 0..self.nodes.len() {
            let id = NodeId(index as u32);
            if self.node(id).out.len() >= 2 {
                let len = self.path_len(id);
                if len > best_len {
                    best = id;
                    best_len = len;
                }
            }
        }
        self.path(best)
    }

    /// Sum of edge lengths from the root, without the store check.
    pub(crate) fn path_len(&self, node: NodeId) -> usize {
        let mut len = 0;
        let mut id = node;
        while let Some(key) = self.node(id).in_edge {
            len += self.edges[key].length;
            id = self.edges[key].parent;
        }
        len
    }

    /// Label slice of an edge that is known to exist.
    pub(crate) fn label_of(&self, key: EdgeKey) -> &[T] {
        let seq = self
            .seq
            .as_deref()
            .expect("edges exist only after the sequence is set");
        let edge = &self.edges[key];
        &seq[edge.label_start()..edge.end]
    }
}
