//! GPU surface ownership for renderers.
//!
//! Renderers registered on a scheduler own their GPU state. This module gives
//! them a window-bound surface that can be resized and cleared; anything beyond
//! that (pipelines, buffers) is the renderer's business.

mod error;
mod gpu;
mod init;

pub use error::SurfaceErrorAction;
pub use gpu::Gpu;
pub use init::GpuInit;
