// Upload-to-viewer flow at the storage boundary: an accepted upload yields a
// servable name, the stored bytes decode, and the session enters Running.

use std::io::Cursor;

use image::{ImageOutputFormat, RgbaImage};
use panowalk::{Command, Control, NavigationSession, UploadStore};

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, image::Rgba([120, 180, 240, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .unwrap();
    bytes
}

fn temp_store(tag: &str) -> UploadStore {
    let root = std::env::temp_dir().join(format!(
        "panowalk-flow-{}-{}",
        tag,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&root);
    UploadStore::open(root).unwrap()
}

#[test]
fn uploaded_panorama_reaches_running_state() {
    let store = temp_store("e2e");

    // upload pano.jpg, get a servable URL path back
    let stored = store.store("pano.jpg", &png_bytes(8, 4)).unwrap();
    let url = format!("/uploads/{}", stored.file_name);
    assert!(url.starts_with("/uploads/"));
    assert!(stored.file_name.ends_with("_pano.jpg"));

    // "fetch" the URL and resolve the texture, as the viewer's loader does
    let served = store.read(&stored.file_name).unwrap();
    let decoded = image::load_from_memory(&served).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (8, 4));

    let mut session = NavigationSession::new(800, 600);
    assert!(!session.advance_frame());
    session.texture_ready();
    assert!(session.is_running());

    // zoom-out held for 200 frames walks fov from 75 to exactly 100
    session.apply(Command::SetControlActive(Control::ZoomOut, true));
    for _ in 0..200 {
        session.advance_frame();
    }
    assert_eq!(session.camera.fov_deg(), 100.0);
}

#[test]
fn rejected_upload_never_becomes_servable() {
    let store = temp_store("reject");
    assert!(store.store("photo.gif", &png_bytes(2, 2)).is_err());
    assert!(store.store("photo.JPG", &png_bytes(2, 2)).is_ok());
}
