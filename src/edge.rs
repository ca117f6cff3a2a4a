use crate::node::NodeId;
use slotmap::DefaultKey;

/// Key of an edge record in the tree's edge arena.
///
/// Splits remove an edge and insert two replacements, so edges live in
/// a slotmap rather than a plain vector.
pub(crate) type EdgeKey = DefaultKey;

/// A directed, labeled edge.
///
/// The label itself is derived, never stored:
/// `sequence[end - length .. end]`.
#[derive(Debug, Clone)]
pub(crate) struct Edge<T> {
    pub parent: NodeId,
    pub child: NodeId,
    /// First symbol of the label, used for child lookup.
    pub first: T,
    /// Label length in symbols.
    pub length: usize,
    /// Offset in the sequence immediately after the label.
    pub end: usize,
}

impl<T> Edge<T> {
    /// Offset in the sequence where the label begins.
    pub(crate) fn label_start(&self) -> usize {
        self.end - self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_start() {
        let edge = Edge {
            parent: NodeId::ROOT,
            child: NodeId(1),
            first: 'a',
            length: 3,
            end: 5,
        };
        assert_eq!(edge.label_start(), 2);
    }
}
