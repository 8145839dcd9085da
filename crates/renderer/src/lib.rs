//! Renderer crate for mandelview, an interactive Mandelbrot set viewer.
//!
//! The crate glues a winit window, a wgpu fullscreen pipeline, and a small
//! viewport/interaction core together. The overall flow is:
//!
//! ```text
//!   CLI / mandelview
//!          │ ViewerConfig
//!          ▼
//!   run ──▶ WindowState ──▶ winit event loop ──▶ render_frame() ─▶ GPU UBO
//!                │                   │
//!           PointerState ──────▶ Viewport (zoom / pan / commit selection)
//! ```
//!
//! `geometry` holds the viewport model and the pixel/NDC/fractal transforms,
//! `input` turns pointer events into viewport mutations and selection
//! previews, and `gpu` owns the wgpu resources. The fractal itself is
//! evaluated per-pixel by the fragment shader; the CPU side only ships two
//! 4-component uniform vectors per frame.

pub mod geometry;
pub mod input;

mod gpu;
mod types;
mod window;

pub use types::ViewerConfig;
pub use window::run;
