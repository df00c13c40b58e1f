//! Color model shared by the material, the scene and the renderer.

pub mod color;

pub use color::Rgb;
