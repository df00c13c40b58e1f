//! Pointwave engine crate.
//!
//! Platform runtime, GPU device layer and the pieces of the point-wave
//! showcase: the color-shift effect, the point grid, orbit camera and the
//! scene that ties them together.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod camera;
pub mod coords;
pub mod effect;
pub mod geometry;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
