// session.rs — per-view navigation state and the frame step

use crate::camera::{Camera, CameraController};
use crate::input::{Command, InputState};
use crate::orientation::{Orientation, OrientationController};
use crate::viewport::Viewport;

/// Lifecycle of a session. `Loading` until the panorama texture decodes;
/// `Running` drives frames; `Failed` keeps the decode error for display
/// instead of hanging in `Loading` forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Running,
    Failed(String),
}

/// Everything one active view owns: input, camera, viewport and sphere
/// orientation, plus the controllers that advance them. One session per view;
/// no globals, so sessions can coexist (and be driven headless in tests).
#[derive(Debug)]
pub struct NavigationSession {
    pub input: InputState,
    pub camera: Camera,
    pub viewport: Viewport,
    pub orientation: Orientation,
    orientation_ctl: OrientationController,
    camera_ctl: CameraController,
    state: SessionState,
}

impl NavigationSession {
    pub fn new(width: u32, height: u32) -> Self {
        let viewport = Viewport::new(width, height);
        Self {
            input: InputState::new(),
            camera: Camera::new(viewport.aspect()),
            viewport,
            orientation: Orientation::default(),
            orientation_ctl: OrientationController::default(),
            camera_ctl: CameraController::default(),
            state: SessionState::Loading,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Single entry point for all input sources. Resize also refreshes the
    /// camera aspect so the next projection can never be computed against the
    /// old surface size.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SetControlActive(control, active) => {
                self.input.set_active(control, active);
            }
            Command::RecordDrag(dx, dy) => {
                self.input.record_drag(dx, dy);
            }
            Command::Resize(width, height) => {
                if self.viewport.resize(width, height) {
                    self.camera.aspect = self.viewport.aspect();
                }
            }
        }
    }

    /// A new panorama load has started. A failed session gets another chance;
    /// a running session keeps showing the current panorama until the
    /// replacement decodes.
    pub fn begin_loading(&mut self) {
        if matches!(self.state, SessionState::Failed(_)) {
            self.state = SessionState::Loading;
        }
    }

    /// Texture decode finished: enter `Running`. Drag buffered while loading
    /// is discarded so it is not jump-applied on the first frame. Only the
    /// first call transitions; a replacement texture keeps the session live.
    pub fn texture_ready(&mut self) {
        if self.state != SessionState::Running {
            self.input.clear_drag();
            self.state = SessionState::Running;
        }
    }

    /// Texture decode failed. A session already running keeps its current
    /// panorama; only a loading session moves to `Failed`.
    pub fn texture_failed(&mut self, error: impl Into<String>) {
        if self.state == SessionState::Loading {
            self.state = SessionState::Failed(error.into());
        }
    }

    /// One frame of navigation: consume the drag delta, run the orientation
    /// and camera controllers in that order, then the caller draws. Returns
    /// false (and does nothing) unless the session is running, so a frame
    /// never renders half-updated state.
    pub fn advance_frame(&mut self) -> bool {
        if self.state != SessionState::Running {
            return false;
        }

        let drag = self.input.consume_drag_delta();
        self.orientation_ctl
            .update(&self.input, drag, &mut self.orientation);
        self.camera_ctl.update(&self.input, &mut self.camera);
        true
    }
}
