use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::geometry::Viewport;
use crate::gpu::GpuState;
use crate::input::PointerState;
use crate::types::ViewerConfig;

/// Everything the event loop mutates: the window handle, GPU resources, the
/// viewport model, and the pointer state machine. Owned by the loop and
/// passed around by reference; there is no global state.
struct WindowState {
    window: Arc<Window>,
    gpu: GpuState,
    viewport: Viewport,
    pointer: PointerState,
}

impl WindowState {
    fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();
        let gpu = GpuState::new(window.as_ref(), size)?;

        Ok(Self {
            window,
            gpu,
            viewport: Viewport::initial(),
            pointer: PointerState::default(),
        })
    }

    fn window(&self) -> &Window {
        self.window.as_ref()
    }

    /// Cached physical size of the swapchain surface.
    fn size(&self) -> PhysicalSize<u32> {
        self.gpu.size()
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.gpu.resize(new_size);
    }

    /// Derives the frame's transform and selection vectors and submits one
    /// draw. Both are recomputed from the viewport here, never cached across
    /// frames.
    fn render_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let extent = self.size();
        let transform = self.viewport.fit_transform(extent);
        let selection = self.pointer.selection_rect(&self.viewport, extent);
        self.gpu.render(&transform, selection.as_ref())
    }
}

/// Opens the viewer window and drives the winit event loop until the user
/// closes it.
///
/// Rendering is demand-driven: handlers mutate the viewport or pointer state
/// and request a redraw when the picture changed, and the loop blocks
/// between events. There is no frame timer and no continuous animation.
pub fn run(config: &ViewerConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to initialize event loop")?;
    let window_size = PhysicalSize::new(config.surface_size.0, config.surface_size.1);
    let window = WindowBuilder::new()
        .with_title(config.title.as_str())
        .with_inner_size(window_size)
        .build(&event_loop)
        .context("failed to create viewer window")?;
    let window = Arc::new(window);

    let mut state = WindowState::new(window.clone())?;
    state.window().request_redraw();

    // Fatal in-loop failures are carried out of the closure so the process
    // exits non-zero through the single error path in main.
    let fatal: Rc<RefCell<Option<anyhow::Error>>> = Rc::new(RefCell::new(None));
    let loop_fatal = Rc::clone(&fatal);

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Wait);

            let Event::WindowEvent { window_id, event } = event else {
                return;
            };
            if window_id != state.window().id() {
                return;
            }

            match event {
                WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                    elwt.exit();
                }
                WindowEvent::Resized(new_size) => {
                    state.resize(new_size);
                    state.window().request_redraw();
                }
                WindowEvent::ScaleFactorChanged {
                    mut inner_size_writer,
                    ..
                } => {
                    // Keep the current physical size when the scale factor changes.
                    let _ = inner_size_writer.request_inner_size(state.size());
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let extent = state.size();
                    if state
                        .pointer
                        .handle_cursor_moved(position, &mut state.viewport, extent)
                    {
                        state.window().request_redraw();
                    }
                }
                WindowEvent::MouseInput {
                    state: button_state,
                    button,
                    ..
                } => {
                    let extent = state.size();
                    if state
                        .pointer
                        .handle_button(button, button_state, &mut state.viewport, extent)
                    {
                        state.window().request_redraw();
                    }
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    let extent = state.size();
                    if state
                        .pointer
                        .handle_scroll(delta, &mut state.viewport, extent)
                    {
                        state.window().request_redraw();
                    }
                }
                WindowEvent::RedrawRequested => match state.render_frame() {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        state.resize(state.size());
                        state.window().request_redraw();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        *loop_fatal.borrow_mut() = Some(anyhow!("rendering surface out of memory"));
                        elwt.exit();
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "surface error; retrying on next redraw");
                    }
                },
                _ => {}
            }
        })
        .map_err(|err| anyhow!("event loop error: {err}"))?;

    if let Some(err) = fatal.borrow_mut().take() {
        return Err(err);
    }
    Ok(())
}
