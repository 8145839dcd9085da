//! GPU plumbing for the viewer.
//!
//! - `context` owns wgpu instance/device/surface wiring and knows how to
//!   rebuild swapchain state when the window resizes.
//! - `pipeline` builds the single fullscreen pipeline from the built-in
//!   WGSL scene shader.
//! - `uniforms` mirrors the two-vector uniform block written through the
//!   queue each frame.
//! - `state` glues everything together and exposes the `GpuState` API used
//!   by `window`.

mod context;
mod pipeline;
mod state;
mod uniforms;

pub(crate) use state::GpuState;
