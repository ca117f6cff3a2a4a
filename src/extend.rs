use crate::node::{NodeId, NodeKind};
use crate::tree::SuffixTree;
use std::hash::Hash;
use tracing::trace;

/// An edge recorded on the upward walk.
///
/// The mismatch scan replays the walked path after a split may have
/// removed the underlying edge, so the fields it needs are copied out
/// rather than kept as arena keys.
struct PassedEdge<T> {
    parent: NodeId,
    first: T,
    length: usize,
}

impl<T: Hash + Eq + Clone> SuffixTree<T> {
    /// Inserts the suffix `sequence[start..]` into the tree.
    ///
    /// One construction step: locate the insertion point via the
    /// suffix-link table, perform at most one edge split, attach one
    /// new leaf, and record the links that let the next (one symbol
    /// longer) suffix skip re-scanning from the root.
    pub(crate) fn extend_suffix(&mut self, start: usize) {
        let n = self
            .seq
            .as_ref()
            .expect("extension runs only after the sequence is set")
            .len();
        let suffix_len = n - start;
        let first = self.symbol_at(start).clone();

        // Walk upward from the previously created node, deducting each
        // passed edge from the unconsumed length, until the root or a
        // node carrying a suffix link for the suffix's first symbol.
        let previous = self.last_node();
        let mut stack: Vec<PassedEdge<T>> = Vec::new();
        let mut v = previous;
        let mut vlen = suffix_len;
        let mut w = loop {
            let Some(key) = self.node(v).in_edge else {
                // Reached the root; the whole suffix is unconsumed.
                vlen = 0;
                break NodeId::ROOT;
            };
            let edge = &self.edges[key];
            vlen -= edge.length;
            stack.push(PassedEdge {
                parent: edge.parent,
                first: edge.first.clone(),
                length: edge.length,
            });
            v = edge.parent;
            if let Some(target) = self.link(v, &first) {
                break target;
            }
        };

        // Child lookup at the walk target by the next unconsumed
        // symbol. A hit means the suffix overlaps an existing edge: the
        // recorded walk decides where the labels diverge. A scan that
        // exhausts the label without diverging descends and looks
        // again; otherwise the edge is split at the mismatch and the
        // new leaf hangs off the split node.
        while vlen < suffix_len {
            let Some(key) = self.child_edge(w, self.symbol_at(start + vlen)) else {
                break;
            };
            let (child, length, label_start) = {
                let edge = &self.edges[key];
                (edge.child, edge.length, edge.label_start())
            };

            // The scan starts at 1 when departing from the root: the
            // link definition excludes the leading symbol only there.
            let mut j = if w == NodeId::ROOT { 1 } else { 0 };
            while j < length {
                let Some(top) = stack.last() else { break };
                if top.first != *self.symbol_at(label_start + j) {
                    break;
                }
                j += top.length;
                stack.pop();
            }

            if j < length {
                let mid = self.split_edge(key, j);
                vlen += j;
                // The node just below the walk target on the recorded
                // path now reaches the split node by prepending the
                // suffix's first symbol.
                if let Some(top) = stack.last() {
                    self.set_link(top.parent, first.clone(), mid);
                }
                trace!(start, offset = j, "split edge while inserting suffix");
                w = mid;
                break;
            }

            w = child;
            vlen += length;
        }

        // Attach the unconsumed remainder as a new leaf tagged with the
        // suffix's starting offset, and link the step's origin to it.
        // A sequence without a unique terminator can consume the whole
        // suffix inside an existing path; such suffixes collapse onto
        // the node already there.
        let remainder = suffix_len.saturating_sub(vlen);
        if remainder == 0 {
            self.set_link(previous, first, w);
            return;
        }
        let leaf_first = self.symbol_at(n - remainder).clone();
        let leaf = self.create_node(NodeKind::Leaf { start });
        self.attach(w, leaf, leaf_first, remainder, n);
        self.set_link(previous, first, leaf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::SuffixTree;

    fn prepared(text: &str) -> SuffixTree<char> {
        let mut tree = SuffixTree::new();
        tree.seq = Some(text.chars().collect());
        tree
    }

    #[test]
    fn test_first_extension_attaches_under_root() {
        let mut tree = prepared("abab$");
        tree.extend_suffix(4);
        assert_eq!(tree.node_count(), 2);
        let leaf = tree.child_by_first(NodeId::ROOT, &'$').unwrap();
        assert_eq!(tree.parent(leaf), Some(NodeId::ROOT));
        assert_eq!(tree.path(leaf).unwrap(), vec!['$']);
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn test_first_extension_records_root_link() {
        let mut tree = prepared("abab$");
        tree.extend_suffix(4);
        let leaf = tree.child_by_first(NodeId::ROOT, &'$').unwrap();
        assert_eq!(tree.link(NodeId::ROOT, &'$'), Some(leaf));
    }

    #[test]
    fn test_inserting_overlapping_suffix_splits_edge() {
        // After "$", "b$", "ab$" the root's 'b' child carries the whole
        // "b$" label; inserting "bab$" must cut it one symbol in.
        let mut tree = prepared("abab$");
        for start in [4, 3, 2] {
            tree.extend_suffix(start);
        }
        let old_child = tree.child_by_first(NodeId::ROOT, &'b').unwrap();
        assert_eq!(
            tree.label(NodeId::ROOT, old_child).unwrap().unwrap().to_vec(),
            vec!['b', '$']
        );

        let before = tree.node_count();
        tree.extend_suffix(1);
        // One split node and one leaf.
        assert_eq!(tree.node_count(), before + 2);

        let mid = tree.child_by_first(NodeId::ROOT, &'b').unwrap();
        assert_ne!(mid, old_child);
        assert_eq!(tree.out_degree(mid), 2);
        assert_eq!(tree.parent(old_child), Some(mid));
        // The replacement labels concatenate to the original label.
        let upper = tree.label(NodeId::ROOT, mid).unwrap().unwrap().to_vec();
        let lower = tree.label(mid, old_child).unwrap().unwrap().to_vec();
        assert_eq!(upper, vec!['b']);
        assert_eq!(lower, vec!['$']);
    }

    #[test]
    fn test_split_away_from_root_uses_full_scan_offset() {
        // The final "abab$" suffix splits the root's "ab$" edge two
        // symbols in, away from offset 1: the non-root and root scan
        // branches must both hold.
        let mut tree = prepared("abab$");
        for start in [4, 3, 2, 1] {
            tree.extend_suffix(start);
        }
        let a_child = tree.child_by_first(NodeId::ROOT, &'a').unwrap();
        assert_eq!(
            tree.label(NodeId::ROOT, a_child).unwrap().unwrap().to_vec(),
            vec!['a', 'b', '$']
        );

        tree.extend_suffix(0);
        let mid = tree.child_by_first(NodeId::ROOT, &'a').unwrap();
        assert_eq!(
            tree.label(NodeId::ROOT, mid).unwrap().unwrap().to_vec(),
            vec!['a', 'b']
        );
        assert_eq!(tree.out_degree(mid), 2);
    }

    #[test]
    fn test_full_label_match_descends_without_split() {
        // Inserting "bcabc" into the tree for "abcabc" walks clean
        // through the existing "bc" edge: the recorded path matches the
        // whole label, so nothing splits and the leaf hangs off the
        // edge's child.
        let mut tree = prepared("abcabc");
        for start in [5, 4, 3, 2] {
            tree.extend_suffix(start);
        }
        let bc_leaf = tree.child_by_first(NodeId::ROOT, &'b').unwrap();
        let before = tree.node_count();

        tree.extend_suffix(1);
        // Only the new leaf was created.
        assert_eq!(tree.node_count(), before + 1);
        let leaf = tree.child_by_first(bc_leaf, &'a').unwrap();
        assert_eq!(
            tree.path(leaf).unwrap(),
            "bcabc".chars().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_each_step_grows_by_one_or_two_nodes() {
        let mut tree = prepared("mississippi$");
        let n = 12;
        let mut previous = tree.node_count();
        for i in 1..=n {
            tree.extend_suffix(n - i);
            let now = tree.node_count();
            assert!(
                now == previous + 1 || now == previous + 2,
                "step {} grew from {} to {} nodes",
                i,
                previous,
                now
            );
            previous = now;
        }
        assert_eq!(tree.leaf_count(), n);
    }

    #[test]
    fn test_new_leaf_becomes_next_walk_origin() {
        let mut tree = prepared("aab$");
        tree.extend_suffix(2);
        let first_leaf = tree.last_node();
        tree.extend_suffix(1);
        let second_leaf = tree.last_node();
        assert_ne!(first_leaf, second_leaf);
        // The older leaf now links to the newer one under the inserted
        // suffix's first symbol.
        assert_eq!(tree.link(first_leaf, &'a'), Some(second_leaf));
    }

    #[test]
    fn test_unterminated_repeat_chains_leaves() {
        // "aa" without a terminator: the second suffix extends the
        // first leaf's path instead of branching.
        let mut tree = prepared("aa");
        tree.extend_suffix(1);
        tree.extend_suffix(0);
        let first_leaf = tree.child_by_first(NodeId::ROOT, &'a').unwrap();
        let second_leaf = tree.child_by_first(first_leaf, &'a').unwrap();
        assert_eq!(tree.path(second_leaf).unwrap(), vec!['a', 'a']);
        assert_eq!(tree.out_degree(second_leaf), 0);
        assert_eq!(tree.leaf_count(), 2);
    }
}
