// main.rs — native panorama viewer: winit event loop feeding a NavigationSession

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use clap::Parser;
use image::io::Reader as ImageReader;
use image::RgbaImage;
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::{Fullscreen, WindowBuilder},
};

use panowalk::renderer::Renderer;
use panowalk::{Command, Control, NavigationSession, SessionState};

#[derive(Parser, Debug)]
#[command(name = "panowalk", about = "Walk around inside an equirectangular panorama")]
struct Args {
    /// Panorama to open: a local file or an http(s) URL. With no image the
    /// viewer starts empty and shows only the open-file affordance.
    image: Option<String>,
}

#[derive(Debug, Clone)]
enum ImageSource {
    Path(PathBuf),
    Url(String),
}

impl ImageSource {
    fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            ImageSource::Url(raw.to_string())
        } else {
            ImageSource::Path(PathBuf::from(raw))
        }
    }
}

/// On-screen control pad, same eight buttons as the original web viewer.
const PAD: [(&str, Control); 8] = [
    ("↑", Control::Forward),
    ("←", Control::Left),
    ("↓", Control::Back),
    ("→", Control::Right),
    ("⤒", Control::Up),
    ("⤓", Control::Down),
    ("+", Control::ZoomIn),
    ("-", Control::ZoomOut),
];

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let event_loop = EventLoop::new();
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("panowalk")
            .with_inner_size(LogicalSize::new(1280, 720))
            .build(&event_loop)?,
    );

    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;
    let size = window.inner_size();
    let mut session = NavigationSession::new(size.width, size.height);

    // drag state
    let mut mouse_pressed = false;
    let mut last_mouse_pos: Option<winit::dpi::PhysicalPosition<f64>> = None;
    let mut active_touch: Option<(u64, winit::dpi::PhysicalPosition<f64>)> = None;

    // UI state
    let mut is_loading = false;
    let mut is_fullscreen = false;
    let mut pad_held = [false; 8];

    // decode runs off-thread; results come back through this channel
    let (tx, rx): (
        Sender<Result<RgbaImage, String>>,
        Receiver<Result<RgbaImage, String>>,
    ) = channel();

    if let Some(raw) = args.image.as_deref() {
        is_loading = true;
        start_load(ImageSource::parse(raw), tx.clone());
    }

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        if let Ok(result) = rx.try_recv() {
            is_loading = false;
            match result {
                Ok(rgba) => {
                    renderer.load_panorama(rgba);
                    session.texture_ready();
                }
                Err(msg) => {
                    log::error!("panorama load failed: {msg}");
                    session.texture_failed(msg);
                }
            }
        }

        match event {
            Event::WindowEvent { event, .. } => {
                // egui gets first refusal on window events
                let response = renderer.egui_state.on_event(&renderer.egui_ctx, &event);
                if response.consumed {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => {
                        *control_flow = ControlFlow::Exit;
                    }

                    WindowEvent::Resized(new_size) => {
                        renderer.resize(new_size);
                        session.apply(Command::Resize(new_size.width, new_size.height));
                    }

                    WindowEvent::KeyboardInput { input, .. } => {
                        let pressed = input.state == ElementState::Pressed;

                        if let Some(control) = control_for_key(input.virtual_keycode) {
                            session.apply(Command::SetControlActive(control, pressed));
                            return;
                        }

                        if pressed {
                            match input.virtual_keycode {
                                Some(VirtualKeyCode::O) => {
                                    if let Some(path) = pick_panorama_file() {
                                        is_loading = true;
                                        session.begin_loading();
                                        start_load(ImageSource::Path(path), tx.clone());
                                    }
                                }
                                Some(VirtualKeyCode::F11) => {
                                    is_fullscreen = !is_fullscreen;
                                    window.set_fullscreen(
                                        is_fullscreen.then(|| Fullscreen::Borderless(None)),
                                    );
                                }
                                _ => {}
                            }
                        }
                    }

                    WindowEvent::MouseInput { state, button, .. } => {
                        if button == MouseButton::Left {
                            mouse_pressed = state == ElementState::Pressed;
                            if !mouse_pressed {
                                last_mouse_pos = None;
                            }
                        }
                    }

                    WindowEvent::CursorMoved { position, .. } => {
                        if mouse_pressed {
                            if let Some(last) = last_mouse_pos {
                                session.apply(Command::RecordDrag(
                                    (position.x - last.x) as f32,
                                    (position.y - last.y) as f32,
                                ));
                            }
                            last_mouse_pos = Some(position);
                        }
                    }

                    WindowEvent::Touch(touch) => match touch.phase {
                        TouchPhase::Started => {
                            if active_touch.is_none() {
                                active_touch = Some((touch.id, touch.location));
                            }
                        }
                        TouchPhase::Moved => {
                            if let Some((id, last)) = active_touch {
                                if id == touch.id {
                                    session.apply(Command::RecordDrag(
                                        (touch.location.x - last.x) as f32,
                                        (touch.location.y - last.y) as f32,
                                    ));
                                    active_touch = Some((id, touch.location));
                                }
                            }
                        }
                        TouchPhase::Ended | TouchPhase::Cancelled => {
                            if active_touch.map_or(false, |(id, _)| id == touch.id) {
                                active_touch = None;
                            }
                        }
                    },

                    WindowEvent::DroppedFile(path) => {
                        is_loading = true;
                        session.begin_loading();
                        start_load(ImageSource::Path(path), tx.clone());
                    }

                    _ => {}
                }
            }

            Event::RedrawRequested(_) => {
                let drew_frame = session.advance_frame();
                if drew_frame {
                    renderer.update_scene(&session.camera, &session.orientation);
                }

                let mut pad_changes: Vec<(Control, bool)> = Vec::new();
                let mut next_image: Option<PathBuf> = None;

                let render_result = renderer.render_with_ui(&window, drew_frame, |ctx| {
                    draw_ui(
                        ctx,
                        &session,
                        is_loading,
                        &mut pad_held,
                        &mut pad_changes,
                        &mut next_image,
                    );
                });

                for (control, active) in pad_changes {
                    session.apply(Command::SetControlActive(control, active));
                }
                if let Some(path) = next_image {
                    is_loading = true;
                    session.begin_loading();
                    start_load(ImageSource::Path(path), tx.clone());
                }

                match render_result {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => renderer.resize(renderer.size),
                    Err(wgpu::SurfaceError::OutOfMemory) => *control_flow = ControlFlow::Exit,
                    Err(e) => log::error!("render error: {e:?}"),
                }
            }

            Event::MainEventsCleared => {
                window.request_redraw();
            }

            _ => {}
        }
    });
}

fn control_for_key(key: Option<VirtualKeyCode>) -> Option<Control> {
    match key? {
        VirtualKeyCode::W => Some(Control::Forward),
        VirtualKeyCode::S => Some(Control::Back),
        VirtualKeyCode::A | VirtualKeyCode::Left => Some(Control::Left),
        VirtualKeyCode::D | VirtualKeyCode::Right => Some(Control::Right),
        VirtualKeyCode::Up => Some(Control::Up),
        VirtualKeyCode::Down => Some(Control::Down),
        VirtualKeyCode::Equals | VirtualKeyCode::Plus | VirtualKeyCode::NumpadAdd => {
            Some(Control::ZoomIn)
        }
        VirtualKeyCode::Minus | VirtualKeyCode::NumpadSubtract => Some(Control::ZoomOut),
        _ => None,
    }
}

fn pick_panorama_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Panorama images", &["jpg", "jpeg", "png"])
        .pick_file()
}

fn start_load(source: ImageSource, tx: Sender<Result<RgbaImage, String>>) {
    thread::spawn(move || {
        log::info!("loading panorama from {source:?}");
        let result = decode_source(source);
        if tx.send(result).is_err() {
            log::warn!("viewer shut down before the panorama finished loading");
        }
    });
}

fn decode_source(source: ImageSource) -> Result<RgbaImage, String> {
    let img = match source {
        ImageSource::Path(path) => {
            let file = File::open(&path).map_err(|e| format!("open {path:?}: {e}"))?;
            ImageReader::new(BufReader::new(file))
                .with_guessed_format()
                .map_err(|e| format!("read {path:?}: {e}"))
                .and_then(|mut r| {
                    r.no_limits();
                    r.decode().map_err(|e| format!("decode {path:?}: {e}"))
                })?
        }
        ImageSource::Url(url) => {
            let bytes = reqwest::blocking::get(&url)
                .and_then(|r| r.error_for_status())
                .and_then(|r| r.bytes())
                .map_err(|e| format!("fetch {url}: {e}"))?;
            image::load_from_memory(&bytes).map_err(|e| format!("decode {url}: {e}"))?
        }
    };

    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    log::info!("panorama decoded: {w}x{h}");
    Ok(rgba)
}

fn draw_ui(
    ctx: &egui::Context,
    session: &NavigationSession,
    is_loading: bool,
    pad_held: &mut [bool; 8],
    pad_changes: &mut Vec<(Control, bool)>,
    next_image: &mut Option<PathBuf>,
) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("Open…").clicked() {
                if let Some(path) = pick_panorama_file() {
                    *next_image = Some(path);
                }
            }
            ui.label("|");

            match session.state() {
                SessionState::Loading if is_loading => {
                    ui.label(
                        egui::RichText::new("Loading panorama…").color(egui::Color32::YELLOW),
                    );
                }
                SessionState::Loading => {
                    ui.label("No panorama loaded");
                }
                SessionState::Failed(msg) => {
                    ui.label(
                        egui::RichText::new(format!("Load failed: {msg}"))
                            .color(egui::Color32::RED),
                    );
                }
                SessionState::Running => {
                    ui.label(format!("FOV: {:.1}°", session.camera.fov_deg()));
                    ui.label("|");
                    ui.label(format!("Yaw: {:.1}°", session.orientation.yaw.to_degrees()));
                    ui.label("|");
                    ui.label(format!(
                        "Pitch: {:.1}°",
                        session.orientation.pitch.to_degrees()
                    ));
                }
            }
        });
    });

    // press-and-hold pad, like the original page's touch buttons: commands
    // are emitted only on held-state edges so keyboard input is not clobbered
    if session.is_running() {
        egui::Area::new(egui::Id::new("control_pad"))
            .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -36.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for (i, (label, control)) in PAD.iter().enumerate() {
                        let held = ui
                            .add_sized([36.0, 36.0], egui::Button::new(*label))
                            .is_pointer_button_down_on();
                        if held != pad_held[i] {
                            pad_held[i] = held;
                            pad_changes.push((*control, held));
                        }
                    }
                });
            });
    }

    // upload affordance when there is nothing to show
    if !session.is_running() && !is_loading {
        egui::Area::new(egui::Id::new("open_prompt"))
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                if ui.button("Open panorama…").clicked() {
                    if let Some(path) = pick_panorama_file() {
                        *next_image = Some(path);
                    }
                }
            });
    }
}
