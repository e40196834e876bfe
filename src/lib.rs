//! panowalk — walk around inside an equirectangular panorama.
//!
//! The navigation engine is plain state + per-frame arithmetic with no GPU
//! dependency: input events become [`Command`]s, a [`NavigationSession`]
//! applies them, and `advance_frame` runs the orientation and camera
//! controllers once per display refresh. The wgpu/winit/egui front end in the
//! `panowalk` binary and the axum upload service in `upload-server` both sit
//! on top of this crate.

pub mod camera;
pub mod input;
pub mod orientation;
pub mod renderer;
pub mod session;
pub mod sphere;
pub mod store;
pub mod viewport;

pub use camera::{Camera, CameraController, FOV_MAX_DEG, FOV_MIN_DEG};
pub use input::{Command, Control, InputState};
pub use orientation::{Orientation, OrientationController};
pub use session::{NavigationSession, SessionState};
pub use sphere::{build_sphere, SphereMesh, SPHERE_RADIUS};
pub use store::{allowed_file, StoreError, StoredImage, UploadStore};
pub use viewport::Viewport;
