// camera.rs — perspective camera + held-key movement and zoom

use glam::{Mat4, Vec3};

use crate::input::{Control, InputState};

pub const FOV_MIN_DEG: f32 = 30.0;
pub const FOV_MAX_DEG: f32 = 100.0;

const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;

/// Perspective camera at the center of the panorama sphere.
///
/// The camera translates and zooms but never rotates; looking around is
/// expressed by rotating the sphere instead. Its forward direction is
/// therefore the fixed −Z axis, which is also the direction forward/back
/// movement follows.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    fov_deg: f32,
    pub aspect: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            fov_deg: 75.0,
            aspect,
        }
    }

    /// Unit view direction. Derived, not stored; stays −Z because yaw lives
    /// on the sphere.
    pub fn direction(&self) -> Vec3 {
        Vec3::NEG_Z
    }

    pub fn fov_deg(&self) -> f32 {
        self.fov_deg
    }

    /// Out-of-range values are clamped, never rejected. A fov outside
    /// [30, 100] produces a degenerate or inverted frustum.
    pub fn set_fov_deg(&mut self, fov_deg: f32) {
        self.fov_deg = fov_deg.clamp(FOV_MIN_DEG, FOV_MAX_DEG);
    }

    /// Projection from the *current* fov/aspect, so a draw can never see a
    /// stale matrix after a zoom or resize.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_deg.to_radians(), self.aspect, NEAR, FAR)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y)
    }
}

/// Per-frame translation and zoom from the held controls.
#[derive(Debug, Clone, Copy)]
pub struct CameraController {
    /// Units per frame along the view direction.
    pub move_speed: f32,
    /// Units per frame along world Y.
    pub vertical_speed: f32,
    /// Degrees of fov per frame.
    pub zoom_speed: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            move_speed: 0.5,
            vertical_speed: 0.5,
            zoom_speed: 1.0,
        }
    }
}

impl CameraController {
    pub fn update(&self, input: &InputState, camera: &mut Camera) {
        let direction = camera.direction();

        if input.is_active(Control::Forward) {
            camera.position += direction * self.move_speed;
        }
        if input.is_active(Control::Back) {
            camera.position -= direction * self.move_speed;
        }

        if input.is_active(Control::Up) {
            camera.position.y += self.vertical_speed;
        }
        if input.is_active(Control::Down) {
            camera.position.y -= self.vertical_speed;
        }

        if input.is_active(Control::ZoomIn) {
            camera.set_fov_deg(camera.fov_deg() - self.zoom_speed);
        }
        if input.is_active(Control::ZoomOut) {
            camera.set_fov_deg(camera.fov_deg() + self.zoom_speed);
        }
    }
}
