//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipelines, buffers, depth target)
//! and creates them lazily from the `RenderCtx` it is handed every frame.
//!
//! Convention:
//! - CPU geometry is in node-local world units.
//! - Sizes that reach the rasterizer are in physical framebuffer pixels.

mod common;
mod ctx;
mod points;

pub use ctx::{RenderCtx, RenderTarget};
pub use points::{PointCloudDraw, PointCloudRenderer};
