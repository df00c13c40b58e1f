//! The color-shift point effect.
//!
//! `stages` holds the per-vertex and per-fragment math as pure functions;
//! `material` owns the uniform set and the per-frame time update. The WGSL
//! program the renderer compiles implements the same formulas.

mod material;
pub mod stages;

pub use material::{ColorShiftMaterial, ColorShiftUniforms, ShadedVertex};
pub use stages::StageToggles;
