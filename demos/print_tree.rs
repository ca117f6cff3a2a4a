use std::env;
use suffixtree_rs::{NodeId, SuffixTree};

/// Builds a suffix tree for the argument (default "mississippi$") and
/// prints one indented line per edge.
///
/// Usage: cargo run --example print_tree [text]
fn main() {
    let text = env::args().nth(1).unwrap_or_else(|| "mississippi$".to_string());
    let tree = SuffixTree::from_sequence(text.chars());

    let stats = tree.stats();
    println!(
        "{} symbols, {} nodes, {} edges, {} leaves",
        stats.sequence_length, stats.nodes, stats.edges, stats.leaves
    );

    print_below(&tree, NodeId::ROOT, 0);

    let repeated: String = tree
        .longest_repeated()
        .expect("tree is built")
        .into_iter()
        .collect();
    println!("longest repeated substring: {repeated:?}");
}

fn print_below(tree: &SuffixTree<char>, node: NodeId, depth: usize) {
    let mut outgoing: Vec<_> = tree.edges().filter(|e| e.parent == node).collect();
    outgoing.sort_by_key(|e| e.end - e.length);

    for edge in outgoing {
        let label: String = edge.label.iter().collect();
        let suffix = tree
            .leaves()
            .find(|leaf| leaf.id == edge.child)
            .and_then(|leaf| leaf.start)
            .map(|start| format!(" [suffix {start}]"))
            .unwrap_or_default();
        println!("{:indent$}{label}{suffix}", "", indent = depth * 2);
        print_below(tree, edge.child, depth + 1);
    }
}
