//! Data structures for coordinate assignment.

use crate::geometry::{NodePoint, polar_to_cartesian};
use crate::tree::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Leaves stacked top to bottom, distance from the root grows to the right.
    Rectangular,
    /// Leaves spread over an arc, distance from the root is the radius.
    Radial,
}

impl Projection {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "rect" | "rectangular" => Some(Self::Rectangular),
            "radial" | "circular" => Some(Self::Radial),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scaling {
    /// Phylogram: distance from the root proportional to branch length.
    LengthScaled,
    /// Cladogram: leaves on one baseline, one step per generation.
    UniformStep,
}

impl Scaling {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "length" | "scaled" | "phylogram" => Some(Self::LengthScaled),
            "uniform" | "cladogram" => Some(Self::UniformStep),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutMode {
    pub projection: Projection,
    pub scaling: Scaling,
}

impl LayoutMode {
    pub fn new(projection: Projection, scaling: Scaling) -> Self {
        Self {
            projection,
            scaling,
        }
    }
}

impl Default for LayoutMode {
    fn default() -> Self {
        Self::new(Projection::Rectangular, Scaling::LengthScaled)
    }
}

/// Parameters for one projection. The primary axis orders siblings (y in
/// rectangular, angle in degrees in radial); the secondary axis measures
/// distance from the root (x in rectangular, radius in radial).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisParams {
    /// Primary position of the first leaf.
    pub primary_origin: f64,
    /// Primary distance between consecutive leaves.
    pub primary_step: f64,
    /// Secondary position of the root (length-scaled).
    pub secondary_origin: f64,
    /// Secondary distance per unit of branch length (length-scaled).
    pub secondary_scale: f64,
    /// Secondary position shared by all leaves (uniform-step).
    pub secondary_baseline: f64,
    /// Secondary distance per generation (uniform-step).
    pub secondary_step: f64,
    /// Where leaf labels line up: the label circle radius in radial
    /// projection, the label column x in rectangular projection.
    pub outer_alignment_radius: f64,
}

/// Computed coordinates for one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutNode {
    pub id: NodeId,
    pub primary: f64,
    pub secondary: f64,
}

impl LayoutNode {
    pub fn point(&self) -> NodePoint {
        NodePoint {
            primary: self.primary,
            secondary: self.secondary,
        }
    }
}

/// Result of one layout pass, indexed by node id.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub(crate) mode: LayoutMode,
    pub(crate) nodes: Vec<LayoutNode>,
}

impl Layout {
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&LayoutNode> {
        self.nodes.get(id)
    }

    pub fn position(&self, id: NodeId) -> Option<NodePoint> {
        self.node(id).map(LayoutNode::point)
    }

    /// Drawing coordinates. Radial layouts are centred on the origin.
    pub fn cartesian(&self, id: NodeId) -> Option<(f64, f64)> {
        let node = self.node(id)?;
        Some(match self.mode.projection {
            Projection::Rectangular => (node.secondary, node.primary),
            Projection::Radial => polar_to_cartesian(node.primary, node.secondary),
        })
    }
}
