//! Whole-tree measurements used to size the drawing.

use crate::tree::{Tree, TreeNode};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeMetrics {
    /// Largest summed branch length on any root-to-node path.
    pub max_cumulative_length: f64,
    /// Largest label, in characters.
    pub max_label_length: usize,
    pub leaf_count: usize,
    /// Largest depth in edges; a lone root has height 0.
    pub height: usize,
}

/// Single pre-order pass. The running path length and depth travel with
/// each stack frame, so nothing is stored on the nodes.
pub fn compute_metrics(tree: &Tree) -> TreeMetrics {
    let mut metrics = TreeMetrics {
        max_cumulative_length: 0.0,
        max_label_length: 0,
        leaf_count: 0,
        height: 0,
    };

    let mut stack: Vec<(&TreeNode, f64, usize)> = vec![(tree.root(), 0.0, 0)];
    while let Some((node, path_length, depth)) = stack.pop() {
        metrics.max_cumulative_length = metrics.max_cumulative_length.max(path_length);
        metrics.height = metrics.height.max(depth);

        if let Some(label) = node.label() {
            metrics.max_label_length = metrics.max_label_length.max(label.chars().count());
        }

        if node.is_leaf() {
            metrics.leaf_count += 1;
        }

        for child in node.children.iter().rev() {
            stack.push((child, path_length + child.length_or_zero(), depth + 1));
        }
    }

    metrics
}
