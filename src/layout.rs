//! Coordinate assignment for the four layout variants:
//! {rectangular, radial} × {length-scaled, uniform-step}.
//!
//! All variants share the primary-axis rule (leaf order, parents centred
//! over their children) and differ only in how the secondary axis is
//! derived. Results are returned as a [`Layout`] overlay keyed by node id;
//! the tree itself is never modified.

mod axes;
mod engine;
mod types;

pub use engine::{DegenerateReason, LayoutError, assign_coordinates};
pub use types::{AxisParams, Layout, LayoutMode, LayoutNode, Projection, Scaling};
