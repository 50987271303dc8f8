//! Connector paths between laid-out nodes.
//!
//! Radial angles are in degrees with 0° at the top, increasing clockwise.

use std::fmt;

use crate::layout::{Layout, Projection};
use crate::tree::{NodeId, Tree};

/// A node position in layout space: (y, x) in rectangular projection,
/// (angle, radius) in radial projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePoint {
    pub primary: f64,
    pub secondary: f64,
}

impl NodePoint {
    pub fn new(primary: f64, secondary: f64) -> Self {
        Self { primary, secondary }
    }
}

/// Convert a clock-style angle (degrees) and radius to x/y around the origin.
pub fn polar_to_cartesian(angle_deg: f64, radius: f64) -> (f64, f64) {
    let theta = (angle_deg - 90.0).to_radians();
    (radius * theta.cos(), radius * theta.sin())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    /// Circular arc around the origin, never the large-arc variant.
    Arc { radius: f64, sweep: bool, x: f64, y: f64 },
    VerticalTo { y: f64 },
    HorizontalTo { x: f64 },
}

/// An ordered list of path commands. `Display` renders SVG path data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathDescription {
    commands: Vec<PathCommand>,
}

impl PathDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: PathCommand) -> &mut Self {
        self.commands.push(command);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn has_arc(&self) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, PathCommand::Arc { .. }))
    }
}

impl fmt::Display for PathDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo { x, y } => write!(f, "M{},{}", Num(x), Num(y))?,
                PathCommand::LineTo { x, y } => write!(f, "L{},{}", Num(x), Num(y))?,
                PathCommand::Arc { radius, sweep, x, y } => write!(
                    f,
                    "A{},{} 0 0 {} {},{}",
                    Num(radius),
                    Num(radius),
                    u8::from(sweep),
                    Num(x),
                    Num(y)
                )?,
                PathCommand::VerticalTo { y } => write!(f, "V{}", Num(y))?,
                PathCommand::HorizontalTo { x } => write!(f, "H{}", Num(x))?,
            }
        }
        Ok(())
    }
}

/// Number formatting for SVG output: three decimals, no `-0`.
pub(crate) struct Num(pub f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.0 * 1000.0).round() / 1000.0;
        if rounded == 0.0 {
            write!(f, "0")
        } else {
            write!(f, "{}", rounded)
        }
    }
}

/// Elbow connector from a parent point to a child point.
///
/// Rectangular: move to the parent, run along the primary axis to the
/// child's row, then along the secondary axis to the child.
///
/// Radial: move to the parent, follow the parent's circle to the child's
/// angle (skipped when the angles match), then go straight out to the child.
pub fn build_connector_path(
    source: NodePoint,
    target: NodePoint,
    projection: Projection,
) -> PathDescription {
    let mut path = PathDescription::new();

    match projection {
        Projection::Rectangular => {
            path.push(PathCommand::MoveTo {
                x: source.secondary,
                y: source.primary,
            })
            .push(PathCommand::VerticalTo { y: target.primary })
            .push(PathCommand::HorizontalTo {
                x: target.secondary,
            });
        }
        Projection::Radial => {
            let (a0, r0) = (source.primary, source.secondary);
            let (a1, r1) = (target.primary, target.secondary);

            let (x, y) = polar_to_cartesian(a0, r0);
            path.push(PathCommand::MoveTo { x, y });

            if a0 != a1 {
                let (x, y) = polar_to_cartesian(a1, r0);
                path.push(PathCommand::Arc {
                    radius: r0,
                    sweep: a1 > a0,
                    x,
                    y,
                });
            }

            let (x, y) = polar_to_cartesian(a1, r1);
            path.push(PathCommand::LineTo { x, y });
        }
    }

    path
}

/// Radial guide from a leaf out to the shared label circle.
pub fn label_guide_path(leaf: NodePoint, outer_alignment_radius: f64) -> PathDescription {
    build_connector_path(
        leaf,
        NodePoint::new(leaf.primary, outer_alignment_radius),
        Projection::Radial,
    )
}

/// A connector together with the nodes it joins.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePath {
    pub parent: NodeId,
    pub child: NodeId,
    pub path: PathDescription,
}

/// Connectors for every parent-child edge, in document order.
pub fn edge_paths(tree: &Tree, layout: &Layout) -> Vec<EdgePath> {
    let projection = layout.mode().projection;
    let mut paths = Vec::with_capacity(tree.node_count().saturating_sub(1));

    for node in tree.preorder() {
        let Some(source) = layout.position(node.id) else {
            continue;
        };
        for child in &node.children {
            if let Some(target) = layout.position(child.id) {
                paths.push(EdgePath {
                    parent: node.id,
                    child: child.id,
                    path: build_connector_path(source, target, projection),
                });
            }
        }
    }

    paths
}

/// Label guides for every leaf, keyed by the leaf itself.
pub fn label_guides(tree: &Tree, layout: &Layout, outer_alignment_radius: f64) -> Vec<EdgePath> {
    tree.leaves()
        .into_iter()
        .filter_map(|leaf| {
            layout.position(leaf.id).map(|point| EdgePath {
                parent: leaf.id,
                child: leaf.id,
                path: label_guide_path(point, outer_alignment_radius),
            })
        })
        .collect()
}
