//! Per-axis coordinate rules.
//!
//! Every function takes the nodes in document order (pre-order) and returns
//! one value per node, indexed by id. Walking that order backwards visits
//! children before their parent, which gives the bottom-up passes without
//! recursion.

use crate::tree::TreeNode;

/// Leaves get `origin`, `origin + step`, ... left to right; every internal
/// node sits at the midpoint of its children's span.
pub fn primary_positions(order: &[&TreeNode], node_count: usize, origin: f64, step: f64) -> Vec<f64> {
    let mut positions = vec![0.0; node_count];

    let mut next = origin;
    for node in order.iter().filter(|n| n.is_leaf()) {
        positions[node.id] = next;
        next += step;
    }

    for node in order.iter().rev() {
        if let Some((lo, hi)) = span(node.children.iter().map(|c| positions[c.id])) {
            positions[node.id] = (lo + hi) / 2.0;
        }
    }

    positions
}

/// Root at `origin`; each child offset from its parent by `length * scale`.
pub fn length_scaled(order: &[&TreeNode], node_count: usize, origin: f64, scale: f64) -> Vec<f64> {
    let mut positions = vec![0.0; node_count];

    if let Some(root) = order.first() {
        positions[root.id] = origin;
    }

    for node in order {
        let base = positions[node.id];
        for child in &node.children {
            positions[child.id] = child.length.map_or(base, |length| base + length * scale);
        }
    }

    positions
}

/// Leaves on `baseline`; each internal node one `step` short of its
/// nearest child.
pub fn uniform_step(order: &[&TreeNode], node_count: usize, baseline: f64, step: f64) -> Vec<f64> {
    let mut positions = vec![0.0; node_count];

    for node in order.iter().rev() {
        let position = match span(node.children.iter().map(|c| positions[c.id])) {
            Some((nearest, _)) => nearest - step,
            None => baseline,
        };
        positions[node.id] = position;
    }

    positions
}

fn span(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
