//! Time subsystem.
//!
//! Frame timing without coupling to the runtime:
//! - one `FrameClock` per render loop
//! - call `tick()` once per presented frame; `FrameTime::dt` drives the
//!   shader time uniform

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
