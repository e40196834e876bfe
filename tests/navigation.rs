// Frame-loop behavior of a headless NavigationSession, driven the way the
// viewer binary drives it: commands in, advance_frame once per display
// refresh, state sampled at frame boundaries.

use glam::Vec3;
use panowalk::{Command, Control, NavigationSession, SessionState};

fn running_session() -> NavigationSession {
    let mut session = NavigationSession::new(800, 600);
    session.texture_ready();
    session
}

#[test]
fn fov_stays_in_bounds_under_arbitrary_zoom_sequences() {
    let mut session = running_session();

    // a jittery user: alternating holds of widely varying length
    let mut frames = 0u32;
    for (control, hold) in [
        (Control::ZoomIn, 7),
        (Control::ZoomOut, 93),
        (Control::ZoomIn, 200),
        (Control::ZoomOut, 3),
        (Control::ZoomIn, 1),
        (Control::ZoomOut, 400),
    ] {
        session.apply(Command::SetControlActive(control, true));
        for _ in 0..hold {
            session.advance_frame();
            frames += 1;
            let fov = session.camera.fov_deg();
            assert!(
                (30.0..=100.0).contains(&fov),
                "fov {fov} out of bounds at frame {frames}"
            );
        }
        session.apply(Command::SetControlActive(control, false));
    }
    assert_eq!(session.camera.fov_deg(), 100.0);
}

#[test]
fn zoom_out_held_200_frames_drives_fov_from_75_to_exactly_100() {
    let mut session = running_session();
    assert_eq!(session.camera.fov_deg(), 75.0);

    session.apply(Command::SetControlActive(Control::ZoomOut, true));
    for _ in 0..200 {
        session.advance_frame();
    }
    assert_eq!(session.camera.fov_deg(), 100.0);
}

#[test]
fn drag_delta_is_applied_once_and_only_once() {
    let mut session = running_session();
    let k = 0.005;

    session.apply(Command::RecordDrag(64.0, 48.0));
    session.advance_frame();
    assert!((session.orientation.yaw - 64.0 * k).abs() < 1e-6);
    assert!((session.orientation.pitch - 48.0 * k).abs() < 1e-6);

    // 100 idle frames: no drift
    for _ in 0..100 {
        session.advance_frame();
    }
    assert!((session.orientation.yaw - 64.0 * k).abs() < 1e-6);
    assert!((session.orientation.pitch - 48.0 * k).abs() < 1e-6);
}

#[test]
fn drag_samples_between_frames_coalesce() {
    let mut session = running_session();

    // three pointer samples arrive before the next frame
    session.apply(Command::RecordDrag(10.0, 0.0));
    session.apply(Command::RecordDrag(15.0, -5.0));
    session.apply(Command::RecordDrag(-5.0, 5.0));
    session.advance_frame();

    assert!((session.orientation.yaw - 20.0 * 0.005).abs() < 1e-6);
    assert!(session.orientation.pitch.abs() < 1e-6);
}

#[test]
fn holding_forward_n_frames_advances_n_times_move_speed() {
    let mut session = running_session();
    let n = 37;

    session.apply(Command::SetControlActive(Control::Forward, true));
    for _ in 0..n {
        session.advance_frame();
    }
    // fixed orientation for determinism: direction is the constant -Z
    assert_eq!(session.camera.position, Vec3::NEG_Z * (n as f32) * 0.5);
}

#[test]
fn movement_and_look_compose_within_a_frame_in_order() {
    let mut session = running_session();

    session.apply(Command::SetControlActive(Control::Forward, true));
    session.apply(Command::SetControlActive(Control::Up, true));
    session.apply(Command::RecordDrag(100.0, 0.0));
    session.advance_frame();

    // orientation moved the sphere, camera moved along its fixed axis
    assert!((session.orientation.yaw - 0.5).abs() < 1e-6);
    assert_eq!(session.camera.position, Vec3::new(0.0, 0.5, -0.5));
}

#[test]
fn resize_updates_aspect_before_the_next_frame() {
    let mut session = running_session();
    assert!((session.camera.aspect - 4.0 / 3.0).abs() < 1e-6);

    session.apply(Command::Resize(400, 300));
    assert!((session.camera.aspect - 4.0 / 3.0).abs() < 1e-6);

    session.apply(Command::Resize(1000, 300));
    assert!((session.camera.aspect - 10.0 / 3.0).abs() < 1e-6);

    // the projection the next draw would use reflects the new aspect already
    let proj = session.camera.projection();
    let fov = session.camera.fov_deg().to_radians();
    let expected_m00 = 1.0 / ((10.0 / 3.0) * (fov / 2.0).tan());
    assert!((proj.col(0).x - expected_m00).abs() < 1e-5);
}

#[test]
fn no_frames_run_before_the_texture_resolves() {
    let mut session = NavigationSession::new(800, 600);
    session.apply(Command::SetControlActive(Control::Forward, true));
    session.apply(Command::RecordDrag(500.0, 500.0));

    for _ in 0..10 {
        assert!(!session.advance_frame());
    }
    assert_eq!(session.camera.position, Vec3::ZERO);

    // decode completes: Running, and the stale drag is not replayed
    session.texture_ready();
    assert_eq!(*session.state(), SessionState::Running);
    session.advance_frame();
    assert_eq!(session.orientation.yaw, 0.0);
    // but the still-held control takes effect normally
    assert_eq!(session.camera.position, Vec3::NEG_Z * 0.5);
}

#[test]
fn decode_failure_surfaces_instead_of_hanging() {
    let mut session = NavigationSession::new(800, 600);
    session.texture_failed("decode error: not an image");

    assert!(matches!(session.state(), SessionState::Failed(msg) if msg.contains("decode error")));
    assert!(!session.advance_frame());
}
