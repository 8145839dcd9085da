use bytemuck::{Pod, Zeroable};

use crate::geometry::{FitTransform, SelectionRect};

/// CPU-side mirror of the shader's scene uniform block.
///
/// `transformation` packs the fit transform as (center_x, center_y, scale_x,
/// scale_y); `selection` packs the active selection rectangle as (min_x,
/// min_y, max_x, max_y), or all zeros while no drag is in progress (a zero
/// rectangle inverts nothing the eye can see).
#[repr(C, align(16))]
#[derive(Clone, Copy)]
pub(crate) struct SceneUniforms {
    transformation: [f32; 4],
    selection: [f32; 4],
}

unsafe impl Zeroable for SceneUniforms {}
unsafe impl Pod for SceneUniforms {}

impl SceneUniforms {
    pub fn new() -> Self {
        Self {
            transformation: [0.0, 0.0, 1.0, 1.0],
            selection: [0.0; 4],
        }
    }

    /// Writes this frame's transform and selection into the block.
    pub fn set_scene(&mut self, transform: &FitTransform, selection: Option<&SelectionRect>) {
        self.transformation = [
            transform.center[0],
            transform.center[1],
            transform.scale[0],
            transform.scale[1],
        ];
        self.selection = match selection {
            Some(rect) => [rect.min[0], rect.min[1], rect.max[0], rect.max[1]],
            None => [0.0; 4],
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_is_two_packed_vec4s() {
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 32);
        assert_eq!(std::mem::align_of::<SceneUniforms>(), 16);
    }

    #[test]
    fn scene_packs_center_scale_then_min_max() {
        let mut uniforms = SceneUniforms::new();
        uniforms.set_scene(
            &FitTransform {
                center: [0.1, 0.2],
                scale: [1.6, 1.0],
            },
            Some(&SelectionRect {
                min: [-0.5, -0.25],
                max: [0.5, 0.25],
            }),
        );
        assert_eq!(uniforms.transformation, [0.1, 0.2, 1.6, 1.0]);
        assert_eq!(uniforms.selection, [-0.5, -0.25, 0.5, 0.25]);
    }

    #[test]
    fn selection_is_zero_when_no_drag_is_active() {
        let mut uniforms = SceneUniforms::new();
        uniforms.set_scene(
            &FitTransform {
                center: [0.0, 0.0],
                scale: [1.0, 1.0],
            },
            None,
        );
        assert_eq!(uniforms.selection, [0.0; 4]);
    }
}
