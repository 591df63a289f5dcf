//! GPU device and surface management.
//!
//! [`Gpu`] owns the wgpu device, queue and the window surface. A frame is
//! acquired with [`Gpu::begin_frame`], recorded into, then handed back to
//! [`Gpu::submit`] which presents it.

mod frame;
mod gpu;
mod init;

pub use frame::{GpuFrame, SurfaceErrorAction};
pub use gpu::Gpu;
pub use init::GpuInit;
