// orientation.rs — drag and discrete yaw applied to the sphere

use glam::Vec2;

use crate::input::{Control, InputState};

/// Sphere orientation in radians. The camera never yaws; rotating the
/// enclosing sphere is equivalent for a viewer at its center, and it keeps
/// the forward-movement math a fixed-axis affair (see `Camera::direction`).
/// Angles are unbounded — they only ever feed rotation matrices, which wrap
/// them implicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

/// Converts the per-frame drag delta and the discrete left/right controls
/// into sphere yaw/pitch increments.
#[derive(Debug, Clone, Copy)]
pub struct OrientationController {
    /// Radians of sphere rotation per pixel of drag.
    pub rotation_speed: f32,
    /// Radians per frame while a left/right control is held.
    pub key_yaw_step: f32,
}

impl Default for OrientationController {
    fn default() -> Self {
        Self {
            rotation_speed: 0.005,
            key_yaw_step: 0.005,
        }
    }
}

impl OrientationController {
    /// One frame of orientation updates. Drag and held-key yaw are additive
    /// within the frame; neither has precedence.
    pub fn update(&self, input: &InputState, drag: Vec2, orientation: &mut Orientation) {
        orientation.yaw += drag.x * self.rotation_speed;
        orientation.pitch += drag.y * self.rotation_speed;

        if input.is_active(Control::Left) {
            orientation.yaw += self.key_yaw_step;
        }
        if input.is_active(Control::Right) {
            orientation.yaw -= self.key_yaw_step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_scales_by_rotation_speed() {
        let ctl = OrientationController::default();
        let input = InputState::new();
        let mut o = Orientation::default();

        ctl.update(&input, Vec2::new(40.0, -10.0), &mut o);
        assert!((o.yaw - 40.0 * 0.005).abs() < 1e-6);
        assert!((o.pitch + 10.0 * 0.005).abs() < 1e-6);
    }

    #[test]
    fn held_left_right_step_yaw_each_frame() {
        let ctl = OrientationController::default();
        let mut input = InputState::new();
        let mut o = Orientation::default();

        input.set_active(Control::Left, true);
        for _ in 0..10 {
            ctl.update(&input, Vec2::ZERO, &mut o);
        }
        assert!((o.yaw - 10.0 * ctl.key_yaw_step).abs() < 1e-6);

        input.set_active(Control::Left, false);
        input.set_active(Control::Right, true);
        for _ in 0..10 {
            ctl.update(&input, Vec2::ZERO, &mut o);
        }
        assert!(o.yaw.abs() < 1e-6);
        assert_eq!(o.pitch, 0.0);
    }

    #[test]
    fn drag_and_key_yaw_are_additive_in_one_frame() {
        let ctl = OrientationController::default();
        let mut input = InputState::new();
        let mut o = Orientation::default();

        input.set_active(Control::Left, true);
        ctl.update(&input, Vec2::new(100.0, 0.0), &mut o);
        assert!((o.yaw - (100.0 * ctl.rotation_speed + ctl.key_yaw_step)).abs() < 1e-6);
    }

    #[test]
    fn angles_are_unbounded() {
        let ctl = OrientationController::default();
        let input = InputState::new();
        let mut o = Orientation::default();

        for _ in 0..10_000 {
            ctl.update(&input, Vec2::new(500.0, 500.0), &mut o);
        }
        // way past 2π, intentionally left unnormalized
        assert!(o.yaw > 100.0);
        assert!(o.pitch > 100.0);
    }
}
