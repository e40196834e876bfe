// input.rs — latched control state + command dispatch

use glam::Vec2;

/// Logical navigation controls. All eight are press-and-hold: latched true on
/// press/touch-start, false on release/touch-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
    ZoomIn,
    ZoomOut,
}

impl Control {
    pub const ALL: [Control; 8] = [
        Control::Forward,
        Control::Back,
        Control::Left,
        Control::Right,
        Control::Up,
        Control::Down,
        Control::ZoomIn,
        Control::ZoomOut,
    ];

    fn index(self) -> usize {
        match self {
            Control::Forward => 0,
            Control::Back => 1,
            Control::Left => 2,
            Control::Right => 3,
            Control::Up => 4,
            Control::Down => 5,
            Control::ZoomIn => 6,
            Control::ZoomOut => 7,
        }
    }
}

/// Everything an input source may ask of a session. Event callbacks build one
/// of these and hand it to [`crate::NavigationSession::apply`]; the frame loop
/// stays the only reader of the resulting state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SetControlActive(Control, bool),
    RecordDrag(f32, f32),
    Resize(u32, u32),
}

/// Latest logical state of all input devices: held controls plus the drag
/// delta accumulated since the last frame consumed it.
///
/// Pure storage: mutated by event sources, read once per frame, never mutated
/// by the frame loop itself (apart from the drag consume).
#[derive(Debug, Default)]
pub struct InputState {
    active: [bool; 8],
    drag: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_active(&mut self, control: Control, active: bool) {
        self.active[control.index()] = active;
    }

    pub fn is_active(&self, control: Control) -> bool {
        self.active[control.index()]
    }

    /// Accumulate a pointer/touch drag sample. Multiple samples between two
    /// frames sum; the whole delta is applied once at the next frame.
    pub fn record_drag(&mut self, dx: f32, dy: f32) {
        self.drag += Vec2::new(dx, dy);
    }

    /// Drag delta since the previous consume. Resets to zero so a frame with
    /// no new pointer movement sees (0, 0) rather than a stale delta.
    pub fn consume_drag_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.drag)
    }

    /// Discard anything buffered while no frames were running.
    pub fn clear_drag(&mut self) {
        self.drag = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_latch_and_release() {
        let mut input = InputState::new();
        assert!(!input.is_active(Control::Forward));

        input.set_active(Control::Forward, true);
        input.set_active(Control::ZoomOut, true);
        assert!(input.is_active(Control::Forward));
        assert!(input.is_active(Control::ZoomOut));
        assert!(!input.is_active(Control::Back));

        input.set_active(Control::Forward, false);
        assert!(!input.is_active(Control::Forward));
        assert!(input.is_active(Control::ZoomOut));
    }

    #[test]
    fn drag_accumulates_then_resets_on_consume() {
        let mut input = InputState::new();
        input.record_drag(3.0, -2.0);
        input.record_drag(1.0, 1.0);

        assert_eq!(input.consume_drag_delta(), Vec2::new(4.0, -1.0));
        // no new samples since the consume
        assert_eq!(input.consume_drag_delta(), Vec2::ZERO);
    }

    #[test]
    fn controls_are_independently_addressed() {
        let mut input = InputState::new();
        for c in Control::ALL {
            input.set_active(c, true);
        }
        for c in Control::ALL {
            assert!(input.is_active(c));
        }
        input.set_active(Control::Left, false);
        assert!(!input.is_active(Control::Left));
        assert!(input.is_active(Control::Right));
    }
}
