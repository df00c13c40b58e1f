//! CPU-side geometry for the point cloud.

mod plane;

pub use plane::{GridVertex, PlaneGeometry};
