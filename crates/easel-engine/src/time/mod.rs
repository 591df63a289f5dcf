//! Time subsystem.
//!
//! Frame pacing and the monotonic clock behind `millis()`. Kept free of
//! window/GPU types so it can be unit-tested directly.

mod pacer;

pub use pacer::FramePacer;
