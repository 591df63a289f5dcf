//! GPU rendering.
//!
//! Sketch primitives are tessellated on the CPU into a per-frame [`Batch`]
//! and drawn by a single textured-triangle pipeline ([`BatchRenderer`]).
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - The vertex shader converts to NDC using a viewport uniform.
//! - Vertex colors are linear premultiplied RGBA.

mod batch;
mod ctx;
mod renderer;

pub use batch::{Batch, BatchVertex, DrawSpan, ELLIPSE_SEGMENTS};
pub use ctx::{RenderCtx, RenderTarget};
pub use renderer::BatchRenderer;
