//! Coordinate assignment entry point.

use crate::log::{debug, warn};
use crate::metrics::compute_metrics;
use crate::tree::Tree;

use super::axes::{length_scaled, primary_positions, uniform_step};
use super::types::{AxisParams, Layout, LayoutMode, LayoutNode, Scaling};

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum DegenerateReason {
    #[error("a length-scaled layout needs at least 2 leaves, found {leaf_count}")]
    TooFewLeaves { leaf_count: usize },
    #[error("a length-scaled layout needs a non-zero branch length somewhere in the tree")]
    ZeroTreeLength,
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("Degenerate layout: {0}")]
    DegenerateLayout(#[from] DegenerateReason),
    #[error("Layout parameter `{name}` is not finite")]
    NonFiniteParameter { name: &'static str },
}

/// Assign primary and secondary coordinates to every node of `tree`.
///
/// The result depends only on the tree, the mode and `axis`; calling this
/// again with the same inputs yields identical coordinates.
pub fn assign_coordinates(
    tree: &Tree,
    mode: LayoutMode,
    axis: &AxisParams,
) -> Result<Layout, LayoutError> {
    if mode.scaling == Scaling::LengthScaled {
        check_length_scaled(tree)?;
    }
    check_finite(axis, mode.scaling)?;

    debug!(?mode, nodes = tree.node_count(), "assigning coordinates");

    let order = tree.preorder();
    let count = tree.node_count();

    let primary = primary_positions(&order, count, axis.primary_origin, axis.primary_step);
    let secondary = match mode.scaling {
        Scaling::LengthScaled => length_scaled(&order, count, axis.secondary_origin, axis.secondary_scale),
        Scaling::UniformStep => uniform_step(&order, count, axis.secondary_baseline, axis.secondary_step),
    };

    let nodes = primary
        .into_iter()
        .zip(secondary)
        .enumerate()
        .map(|(id, (primary, secondary))| LayoutNode {
            id,
            primary,
            secondary,
        })
        .collect();

    Ok(Layout { mode, nodes })
}

fn check_length_scaled(tree: &Tree) -> Result<(), LayoutError> {
    let metrics = compute_metrics(tree);
    if metrics.leaf_count < 2 {
        warn!(leaf_count = metrics.leaf_count, "too few leaves for a length-scaled layout");
        return Err(DegenerateReason::TooFewLeaves {
            leaf_count: metrics.leaf_count,
        }
        .into());
    }
    if metrics.max_cumulative_length <= 0.0 {
        warn!("tree has no branch lengths, length-scaled layout is undefined");
        return Err(DegenerateReason::ZeroTreeLength.into());
    }
    Ok(())
}

fn check_finite(axis: &AxisParams, scaling: Scaling) -> Result<(), LayoutError> {
    let secondary = match scaling {
        Scaling::LengthScaled => [
            ("secondary_origin", axis.secondary_origin),
            ("secondary_scale", axis.secondary_scale),
        ],
        Scaling::UniformStep => [
            ("secondary_baseline", axis.secondary_baseline),
            ("secondary_step", axis.secondary_step),
        ],
    };

    [
        ("primary_origin", axis.primary_origin),
        ("primary_step", axis.primary_step),
    ]
    .into_iter()
    .chain(secondary)
    .find(|(_, value)| !value.is_finite())
    .map_or(Ok(()), |(name, _)| Err(LayoutError::NonFiniteParameter { name }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Projection;
    use crate::parser::parse;

    const MODES: [LayoutMode; 4] = [
        LayoutMode {
            projection: Projection::Rectangular,
            scaling: Scaling::LengthScaled,
        },
        LayoutMode {
            projection: Projection::Rectangular,
            scaling: Scaling::UniformStep,
        },
        LayoutMode {
            projection: Projection::Radial,
            scaling: Scaling::LengthScaled,
        },
        LayoutMode {
            projection: Projection::Radial,
            scaling: Scaling::UniformStep,
        },
    ];

    fn axis() -> AxisParams {
        AxisParams {
            primary_origin: 20.0,
            primary_step: 15.0,
            secondary_origin: 30.0,
            secondary_scale: 12.5,
            secondary_baseline: 400.0,
            secondary_step: 40.0,
            outer_alignment_radius: 400.0,
        }
    }

    #[test]
    fn test_internal_nodes_at_child_midpoint_in_all_modes() {
        let tree = parse("((A:1,B:2):1,(C:1,(D:3,E:1,F:2):2):0.5,G:4);").unwrap();
        for mode in MODES {
            let layout = assign_coordinates(&tree, mode, &axis()).unwrap();
            for node in tree.preorder().into_iter().filter(|n| !n.is_leaf()) {
                let values: Vec<f64> = node
                    .children
                    .iter()
                    .map(|c| layout.node(c.id).unwrap().primary)
                    .collect();
                let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
                let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                assert_eq!(layout.node(node.id).unwrap().primary, (lo + hi) / 2.0, "{mode:?}");
            }
        }
    }

    #[test]
    fn test_leaves_evenly_spaced() {
        let tree = parse("((A:1,B:2):1,C:3,(D:1,E:1):1);").unwrap();
        let layout = assign_coordinates(&tree, MODES[0], &axis()).unwrap();
        let leaf_positions: Vec<f64> = tree
            .leaves()
            .iter()
            .map(|l| layout.node(l.id).unwrap().primary)
            .collect();
        assert_eq!(leaf_positions, vec![20.0, 35.0, 50.0, 65.0, 80.0]);
    }

    #[test]
    fn test_length_scaled_secondary_follows_parent() {
        let tree = parse("((A:1,B):2,(C:0.5,D:4)X,E:3);").unwrap();
        let params = axis();
        let layout = assign_coordinates(&tree, MODES[0], &params).unwrap();
        let parents = tree.parents();

        assert_eq!(layout.node(0).unwrap().secondary, params.secondary_origin);
        for node in tree.preorder().into_iter().skip(1) {
            let parent = parents[node.id].unwrap();
            let parent_secondary = layout.node(parent).unwrap().secondary;
            let expected = match node.length {
                Some(length) => parent_secondary + length * params.secondary_scale,
                None => parent_secondary,
            };
            assert_eq!(layout.node(node.id).unwrap().secondary, expected);
        }
    }

    #[test]
    fn test_uniform_step_leaves_on_baseline() {
        let tree = parse("((A:1,B:2):1,(C:1,(D:3,E:1):2):0.5);").unwrap();
        let layout = assign_coordinates(&tree, MODES[1], &axis()).unwrap();

        for leaf in tree.leaves() {
            assert_eq!(layout.node(leaf.id).unwrap().secondary, 400.0);
        }
        // root is three generations above the deepest leaves
        assert_eq!(layout.node(0).unwrap().secondary, 400.0 - 3.0 * 40.0);
    }

    #[test]
    fn test_radial_uses_same_rules() {
        let tree = parse("((A:1,B:2):1,C:3);").unwrap();
        let rect = assign_coordinates(&tree, MODES[0], &axis()).unwrap();
        let radial = assign_coordinates(&tree, MODES[2], &axis()).unwrap();
        for (r, p) in rect.nodes().iter().zip(radial.nodes()) {
            assert_eq!(r.primary, p.primary);
            assert_eq!(r.secondary, p.secondary);
        }
        assert_eq!(radial.mode().projection, Projection::Radial);
    }

    #[test]
    fn test_idempotent() {
        let tree = parse("((A:0.1,B:0.27):0.33,(C:0.7,(D:0.13,E:1.9):0.2):0.05);").unwrap();
        for mode in MODES {
            let first = assign_coordinates(&tree, mode, &axis()).unwrap();
            let second = assign_coordinates(&tree, mode, &axis()).unwrap();
            for (a, b) in first.nodes().iter().zip(second.nodes()) {
                assert_eq!(a.primary.to_bits(), b.primary.to_bits());
                assert_eq!(a.secondary.to_bits(), b.secondary.to_bits());
            }
        }
    }

    #[test]
    fn test_too_few_leaves() {
        let tree = parse("((A:1):2);").unwrap();
        assert_eq!(
            assign_coordinates(&tree, MODES[0], &axis()),
            Err(LayoutError::DegenerateLayout(DegenerateReason::TooFewLeaves {
                leaf_count: 1
            }))
        );
        assert!(matches!(
            assign_coordinates(&tree, MODES[2], &axis()),
            Err(LayoutError::DegenerateLayout(DegenerateReason::TooFewLeaves { .. }))
        ));
        // a cladogram of a single lineage is still drawable
        assert!(assign_coordinates(&tree, MODES[1], &axis()).is_ok());
    }

    #[test]
    fn test_zero_tree_length() {
        let tree = parse("((A,B),C);").unwrap();
        for mode in [MODES[0], MODES[2]] {
            assert_eq!(
                assign_coordinates(&tree, mode, &axis()),
                Err(LayoutError::DegenerateLayout(DegenerateReason::ZeroTreeLength))
            );
        }
        assert!(assign_coordinates(&tree, MODES[3], &axis()).is_ok());
    }

    #[test]
    fn test_non_finite_parameter() {
        let tree = parse("(A:1,B:2);").unwrap();
        let params = AxisParams {
            secondary_scale: f64::INFINITY,
            ..axis()
        };
        assert_eq!(
            assign_coordinates(&tree, MODES[0], &params),
            Err(LayoutError::NonFiniteParameter {
                name: "secondary_scale"
            })
        );
        // the uniform-step rules never read the scale
        assert!(assign_coordinates(&tree, MODES[1], &params).is_ok());
    }

    #[test]
    fn test_single_node_cladogram() {
        let tree = parse("A;").unwrap();
        let layout = assign_coordinates(&tree, MODES[3], &axis()).unwrap();
        assert_eq!(layout.nodes().len(), 1);
        assert_eq!(layout.node(0).unwrap().primary, 20.0);
        assert_eq!(layout.node(0).unwrap().secondary, 400.0);
    }
}
