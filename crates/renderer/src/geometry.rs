//! Viewport model and the coordinate transforms between window pixels,
//! normalized device coordinates, and fractal space.
//!
//! Everything here is plain data and pure math; the GPU boundary packs these
//! types into uniform vectors in `gpu::uniforms`.

use winit::dpi::{PhysicalPosition, PhysicalSize};

/// Rectangular region of the complex plane currently displayed, independent
/// of window shape. Both half-extents stay strictly positive: zoom multiplies
/// them by a positive factor and [`Viewport::focus_on`] rejects degenerate
/// selections.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Center of the focus region in fractal-space units.
    pub center: [f32; 2],
    /// Half the focus region's width and height.
    pub half_extent: [f32; 2],
}

/// Affine NDC-to-fractal mapping derived from a viewport and a window size:
/// `fractal = scale * ndc + center`. Recomputed from the viewport wherever it
/// is needed, never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitTransform {
    pub center: [f32; 2],
    pub scale: [f32; 2],
}

/// Axis-aligned selection rectangle in fractal-space coordinates with
/// `min <= max` on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionRect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

/// Maps a window-pixel position (origin top-left, y down) to normalized
/// device coordinates (origin center, y up).
pub fn pixel_to_ndc(position: PhysicalPosition<f64>, extent: PhysicalSize<u32>) -> [f32; 2] {
    let width = extent.width.max(1) as f64;
    let height = extent.height.max(1) as f64;
    [
        (2.0 * position.x / width - 1.0) as f32,
        (2.0 * (height - position.y) / height - 1.0) as f32,
    ]
}

impl Viewport {
    /// The startup focus region, roughly [-1, 1] on both axes before aspect
    /// correction.
    pub fn initial() -> Self {
        Self {
            center: [0.0, 0.0],
            half_extent: [1.0, 1.0],
        }
    }

    /// Derives the NDC-to-fractal transform for the given window size.
    ///
    /// Fit-inside policy: the limiting window dimension shows exactly the
    /// viewport's half-extent and the other axis grows to match the window
    /// aspect ratio, so the focus region is always fully visible and never
    /// cropped or distorted.
    pub fn fit_transform(&self, extent: PhysicalSize<u32>) -> FitTransform {
        let window_aspect = extent.width.max(1) as f32 / extent.height.max(1) as f32;
        let focus_aspect = self.half_extent[0] / self.half_extent[1];

        let scale = if window_aspect >= focus_aspect {
            [self.half_extent[1] * window_aspect, self.half_extent[1]]
        } else {
            [self.half_extent[0], self.half_extent[0] / window_aspect]
        };

        FitTransform {
            center: self.center,
            scale,
        }
    }

    /// Zooms by `factor` (> 0; < 1 zooms in) keeping the fractal point under
    /// `cursor` fixed on screen.
    ///
    /// The cursor offset is read through the fitted transform, but the factor
    /// scales the raw viewport half-extent. That asymmetry keeps the aspect
    /// ratio of the user-chosen region stable across repeated zooms no matter
    /// the window shape.
    pub fn zoom_about(
        &mut self,
        cursor: PhysicalPosition<f64>,
        extent: PhysicalSize<u32>,
        factor: f32,
    ) {
        let transform = self.fit_transform(extent);
        let ndc = pixel_to_ndc(cursor, extent);

        self.center[0] += ndc[0] * transform.scale[0] * (1.0 - factor);
        self.center[1] += ndc[1] * transform.scale[1] * (1.0 - factor);
        self.half_extent[0] *= factor;
        self.half_extent[1] *= factor;
    }

    /// Shifts the center by a pixel-space motion delta so the content follows
    /// the pointer (y negated for the pixel/NDC axis flip).
    pub fn pan_by(&mut self, delta: (f64, f64), extent: PhysicalSize<u32>) {
        let transform = self.fit_transform(extent);
        let width = extent.width.max(1) as f32;
        let height = extent.height.max(1) as f32;

        self.center[0] -= 2.0 * transform.scale[0] * delta.0 as f32 / width;
        self.center[1] -= 2.0 * transform.scale[1] * -(delta.1 as f32) / height;
    }

    /// Replaces the focus region with the given selection. A selection that
    /// is empty on either axis would break the positive-extent invariant and
    /// is ignored.
    pub fn focus_on(&mut self, selection: &SelectionRect) {
        if selection.min[0] == selection.max[0] || selection.min[1] == selection.max[1] {
            return;
        }

        self.center = [
            (selection.min[0] + selection.max[0]) * 0.5,
            (selection.min[1] + selection.max[1]) * 0.5,
        ];
        self.half_extent = [
            (selection.max[0] - selection.min[0]) * 0.5,
            (selection.max[1] - selection.min[1]) * 0.5,
        ];
    }
}

impl FitTransform {
    /// Applies the transform to an NDC point.
    pub fn apply(&self, ndc: [f32; 2]) -> [f32; 2] {
        [
            self.scale[0] * ndc[0] + self.center[0],
            self.scale[1] * ndc[1] + self.center[1],
        ]
    }
}

impl SelectionRect {
    /// Builds the fractal-space rectangle spanned by two pixel corners,
    /// sorted per axis so the result is well-formed whichever way the drag
    /// went.
    pub fn from_corners(
        a: PhysicalPosition<f64>,
        b: PhysicalPosition<f64>,
        extent: PhysicalSize<u32>,
        transform: &FitTransform,
    ) -> Self {
        let p = transform.apply(pixel_to_ndc(a, extent));
        let q = transform.apply(pixel_to_ndc(b, extent));

        Self {
            min: [p[0].min(q[0]), p[1].min(q[1])],
            max: [p[0].max(q[0]), p[1].max(q[1])],
        }
    }
}
