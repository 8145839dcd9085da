//! Pointer tracking and the mouse gesture state machine.
//!
//! Raw winit events come in, viewport mutations and selection previews come
//! out. At most one gesture is active at a time; the wheel zooms in every
//! state because zooming is not a modal gesture.

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

use crate::geometry::{SelectionRect, Viewport};

/// One wheel notch scales the viewport by this base (wheel-up zooms in, so
/// the applied factor is `1.5^-notches`).
const ZOOM_STEP_BASE: f32 = 1.5;

/// Pixel-granularity wheels (touchpads) report roughly this many pixels per
/// notch.
const PIXELS_PER_WHEEL_STEP: f64 = 120.0;

/// Active mouse gesture. Each variant carries only the data its state needs,
/// so stale anchor coordinates cannot leak between modes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    Idle,
    Selecting {
        anchor: PhysicalPosition<f64>,
        current: PhysicalPosition<f64>,
    },
    Panning,
}

/// Tracks the cursor and the gesture state machine.
///
/// The last cursor position is kept even while idle: winit button and wheel
/// events carry no position, so selection anchors and zoom targets are read
/// from the most recent motion event.
pub struct PointerState {
    cursor: PhysicalPosition<f64>,
    gesture: Gesture,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            cursor: PhysicalPosition::new(0.0, 0.0),
            gesture: Gesture::Idle,
        }
    }
}

impl PointerState {
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Feeds a cursor motion event. Returns true when the visible output
    /// changed (the selection overlay moved, or a pan shifted the viewport).
    pub fn handle_cursor_moved(
        &mut self,
        position: PhysicalPosition<f64>,
        viewport: &mut Viewport,
        extent: PhysicalSize<u32>,
    ) -> bool {
        let previous = self.cursor;
        self.cursor = position;

        match &mut self.gesture {
            Gesture::Idle => false,
            Gesture::Selecting { current, .. } => {
                *current = position;
                true
            }
            Gesture::Panning => {
                viewport.pan_by((position.x - previous.x, position.y - previous.y), extent);
                true
            }
        }
    }

    /// Feeds a button press/release. Returns true when the visible output
    /// changed.
    ///
    /// Presses while a gesture is active are ignored; any release ends the
    /// active gesture, committing the selection if one was in progress.
    pub fn handle_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
        viewport: &mut Viewport,
        extent: PhysicalSize<u32>,
    ) -> bool {
        match state {
            ElementState::Pressed => {
                if self.gesture != Gesture::Idle {
                    return false;
                }
                match button {
                    MouseButton::Left => {
                        self.gesture = Gesture::Selecting {
                            anchor: self.cursor,
                            current: self.cursor,
                        };
                        true
                    }
                    MouseButton::Middle | MouseButton::Right => {
                        self.gesture = Gesture::Panning;
                        false
                    }
                    _ => false,
                }
            }
            ElementState::Released => match self.gesture {
                Gesture::Selecting { .. } => {
                    if let Some(selection) = self.selection_rect(viewport, extent) {
                        viewport.focus_on(&selection);
                    }
                    self.gesture = Gesture::Idle;
                    true
                }
                Gesture::Panning => {
                    self.gesture = Gesture::Idle;
                    false
                }
                Gesture::Idle => false,
            },
        }
    }

    /// Feeds a wheel event: zooms about the tracked cursor position
    /// regardless of the active gesture. Returns true when the viewport
    /// changed.
    pub fn handle_scroll(
        &mut self,
        delta: MouseScrollDelta,
        viewport: &mut Viewport,
        extent: PhysicalSize<u32>,
    ) -> bool {
        let steps = match delta {
            MouseScrollDelta::LineDelta(_, y) => y as f64,
            MouseScrollDelta::PixelDelta(position) => position.y / PIXELS_PER_WHEEL_STEP,
        };
        if steps == 0.0 {
            return false;
        }

        let factor = ZOOM_STEP_BASE.powf(-(steps as f32));
        viewport.zoom_about(self.cursor, extent, factor);
        true
    }

    /// The in-progress selection in fractal space, or None outside a
    /// selection drag. Both the render overlay and the commit on release go
    /// through here, so the committed region always equals the one shown.
    pub fn selection_rect(
        &self,
        viewport: &Viewport,
        extent: PhysicalSize<u32>,
    ) -> Option<SelectionRect> {
        match self.gesture {
            Gesture::Selecting { anchor, current } => {
                let transform = viewport.fit_transform(extent);
                Some(SelectionRect::from_corners(
                    anchor, current, extent, &transform,
                ))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::pixel_to_ndc;

    const TOLERANCE: f32 = 1e-4;

    fn extent() -> PhysicalSize<u32> {
        PhysicalSize::new(1280, 800)
    }

    fn pixel(x: f64, y: f64) -> PhysicalPosition<f64> {
        PhysicalPosition::new(x, y)
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < TOLERANCE,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn left_drag_commits_the_selected_region() {
        let mut pointer = PointerState::default();
        let mut viewport = Viewport::initial();
        let size = extent();

        // Project the drag corners before the viewport changes.
        let transform = viewport.fit_transform(size);
        let a = transform.apply(pixel_to_ndc(pixel(100.0, 100.0), size));
        let b = transform.apply(pixel_to_ndc(pixel(200.0, 50.0), size));

        pointer.handle_cursor_moved(pixel(100.0, 100.0), &mut viewport, size);
        pointer.handle_button(MouseButton::Left, ElementState::Pressed, &mut viewport, size);
        assert!(matches!(pointer.gesture(), Gesture::Selecting { .. }));

        pointer.handle_cursor_moved(pixel(200.0, 50.0), &mut viewport, size);
        pointer.handle_button(
            MouseButton::Left,
            ElementState::Released,
            &mut viewport,
            size,
        );

        assert_eq!(pointer.gesture(), Gesture::Idle);
        assert_close(viewport.center[0], (a[0] + b[0]) * 0.5);
        assert_close(viewport.center[1], (a[1] + b[1]) * 0.5);
        assert_close(viewport.half_extent[0], (b[0] - a[0]).abs() * 0.5);
        assert_close(viewport.half_extent[1], (b[1] - a[1]).abs() * 0.5);
    }

    #[test]
    fn release_without_motion_leaves_the_viewport_unchanged() {
        let mut pointer = PointerState::default();
        let mut viewport = Viewport::initial();
        let size = extent();

        pointer.handle_cursor_moved(pixel(400.0, 300.0), &mut viewport, size);
        pointer.handle_button(MouseButton::Left, ElementState::Pressed, &mut viewport, size);
        pointer.handle_button(
            MouseButton::Left,
            ElementState::Released,
            &mut viewport,
            size,
        );

        assert_eq!(pointer.gesture(), Gesture::Idle);
        assert_eq!(viewport, Viewport::initial());
    }

    #[test]
    fn button_presses_during_a_gesture_are_ignored() {
        let mut pointer = PointerState::default();
        let mut viewport = Viewport::initial();
        let size = extent();

        pointer.handle_cursor_moved(pixel(100.0, 100.0), &mut viewport, size);
        pointer.handle_button(MouseButton::Left, ElementState::Pressed, &mut viewport, size);
        let selecting = pointer.gesture();

        pointer.handle_button(
            MouseButton::Right,
            ElementState::Pressed,
            &mut viewport,
            size,
        );
        assert_eq!(pointer.gesture(), selecting);
    }

    #[test]
    fn middle_drag_pans_the_viewport() {
        let mut pointer = PointerState::default();
        let mut viewport = Viewport::initial();
        let size = extent();

        pointer.handle_cursor_moved(pixel(600.0, 400.0), &mut viewport, size);
        pointer.handle_button(
            MouseButton::Middle,
            ElementState::Pressed,
            &mut viewport,
            size,
        );
        assert_eq!(pointer.gesture(), Gesture::Panning);

        let moved = pointer.handle_cursor_moved(pixel(700.0, 400.0), &mut viewport, size);
        assert!(moved);
        assert!(viewport.center[0] < 0.0);

        pointer.handle_button(
            MouseButton::Middle,
            ElementState::Released,
            &mut viewport,
            size,
        );
        assert_eq!(pointer.gesture(), Gesture::Idle);
    }

    #[test]
    fn right_button_also_pans() {
        let mut pointer = PointerState::default();
        let mut viewport = Viewport::initial();
        let size = extent();

        pointer.handle_button(
            MouseButton::Right,
            ElementState::Pressed,
            &mut viewport,
            size,
        );
        assert_eq!(pointer.gesture(), Gesture::Panning);
    }

    #[test]
    fn wheel_up_zooms_in() {
        let mut pointer = PointerState::default();
        let mut viewport = Viewport::initial();
        let size = extent();

        pointer.handle_cursor_moved(pixel(640.0, 400.0), &mut viewport, size);
        pointer.handle_scroll(MouseScrollDelta::LineDelta(0.0, 1.0), &mut viewport, size);

        assert_close(viewport.half_extent[0], 1.0 / 1.5);
        assert_close(viewport.half_extent[1], 1.0 / 1.5);
    }

    #[test]
    fn wheel_zooms_even_during_a_selection() {
        let mut pointer = PointerState::default();
        let mut viewport = Viewport::initial();
        let size = extent();

        pointer.handle_cursor_moved(pixel(100.0, 100.0), &mut viewport, size);
        pointer.handle_button(MouseButton::Left, ElementState::Pressed, &mut viewport, size);

        let changed =
            pointer.handle_scroll(MouseScrollDelta::LineDelta(0.0, -2.0), &mut viewport, size);
        assert!(changed);
        assert_close(viewport.half_extent[0], 1.5 * 1.5);
        assert!(matches!(pointer.gesture(), Gesture::Selecting { .. }));
    }

    #[test]
    fn idle_motion_only_tracks_the_cursor() {
        let mut pointer = PointerState::default();
        let mut viewport = Viewport::initial();
        let size = extent();

        let changed = pointer.handle_cursor_moved(pixel(123.0, 456.0), &mut viewport, size);
        assert!(!changed);
        assert_eq!(viewport, Viewport::initial());
        assert!(pointer.selection_rect(&viewport, size).is_none());
    }

    #[test]
    fn selection_preview_matches_the_drag_corners() {
        let mut pointer = PointerState::default();
        let mut viewport = Viewport::initial();
        let size = extent();

        pointer.handle_cursor_moved(pixel(200.0, 50.0), &mut viewport, size);
        pointer.handle_button(MouseButton::Left, ElementState::Pressed, &mut viewport, size);
        pointer.handle_cursor_moved(pixel(100.0, 100.0), &mut viewport, size);

        let rect = pointer
            .selection_rect(&viewport, size)
            .expect("selection in progress");
        assert!(rect.min[0] < rect.max[0]);
        assert!(rect.min[1] < rect.max[1]);
    }
}
