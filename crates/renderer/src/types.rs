/// Immutable configuration passed to the viewer at start-up.
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    /// Initial window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Title of the viewer window.
    pub title: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            surface_size: (1280, 800),
            title: "Mandelbrot Set Visualizer".to_string(),
        }
    }
}
