//! Perspective camera and orbit controls.

mod orbit;
mod perspective;

pub use orbit::{OrbitConfig, OrbitControls};
pub use perspective::PerspectiveCamera;
