// viewport.rs — display surface size and aspect ratio

/// Current pixel size of the display surface. A resize must land here (and in
/// the camera aspect) before the next frame's projection, or the image renders
/// stretched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Zero-sized dimensions are ignored — minimized windows report 0×0 and
    /// would poison the aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_follows_resize() {
        let mut vp = Viewport::new(800, 600);
        assert!((vp.aspect() - 4.0 / 3.0).abs() < 1e-6);

        assert!(vp.resize(400, 300));
        assert!((vp.aspect() - 4.0 / 3.0).abs() < 1e-6);

        assert!(vp.resize(1000, 300));
        assert!((vp.aspect() - 10.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn zero_sized_resize_is_ignored() {
        let mut vp = Viewport::new(800, 600);
        assert!(!vp.resize(0, 600));
        assert!(!vp.resize(800, 0));
        assert_eq!(vp, Viewport::new(800, 600));
    }
}
