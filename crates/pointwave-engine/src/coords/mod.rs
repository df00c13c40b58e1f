//! Coordinate types shared between the runtime and renderers.
//!
//! World space is right-handed, +Y up, camera looking down -Z, matching the
//! conventions of `glam`'s `*_rh` constructors.

mod viewport;

pub use viewport::Viewport;
