/// Platform-agnostic input events.
///
/// The host platform translates its native events into these and hands them
/// to the session, which stages them on the active controller. Events only
/// mutate lightweight state; motion is integrated in the per-frame update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A physical key changed state.
    Key(crate::RawKeyEvent),
    /// Relative pointer motion while the pointer is captured.
    PointerMotion {
        /// Horizontal motion in pixels.
        dx: f32,
        /// Vertical motion in pixels (positive = down).
        dy: f32,
    },
    /// Discrete click at an absolute screen position.
    Click {
        /// Horizontal position in pixels from the left edge.
        x: f32,
        /// Vertical position in pixels from the top edge.
        y: f32,
    },
    /// A touch point changed.
    Touch(TouchEvent),
    /// The host revoked pointer capture (e.g. the user pressed Escape).
    CaptureLost,
}

/// A single touch point update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// Stable identifier of the finger for the duration of the touch.
    pub id: u64,
    /// Started, moved, ended or cancelled.
    pub phase: winit::event::TouchPhase,
    /// Screen position in pixels.
    pub position: glam::Vec2,
}

impl From<&winit::event::Touch> for TouchEvent {
    fn from(touch: &winit::event::Touch) -> Self {
        Self {
            id: touch.id,
            phase: touch.phase,
            position: glam::Vec2::new(touch.location.x as f32, touch.location.y as f32),
        }
    }
}
