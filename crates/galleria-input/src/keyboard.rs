//! Movement-key mapping.
//!
//! Each movement flag is driven by two physical keys (a letter key and an
//! arrow key). Physical key codes are used so WASD works identically on any
//! keyboard layout.

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Minimal description of a key event for processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawKeyEvent {
    /// The physical key involved.
    pub key: PhysicalKey,
    /// Whether the key was pressed or released.
    pub state: ElementState,
    /// Whether this is an auto-repeat event.
    pub repeat: bool,
}

impl RawKeyEvent {
    /// Convenience constructor for a non-repeat event on a key code.
    #[must_use]
    pub fn code(code: KeyCode, state: ElementState) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state,
            repeat: false,
        }
    }
}

impl From<&KeyEvent> for RawKeyEvent {
    fn from(event: &KeyEvent) -> Self {
        Self {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        }
    }
}

/// One of the four planar movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Backward,
    Left,
    Right,
}

/// Map a physical key to the movement direction it drives, if any.
#[must_use]
pub fn move_key_for(key: PhysicalKey) -> Option<MoveKey> {
    match key {
        PhysicalKey::Code(KeyCode::KeyW | KeyCode::ArrowUp) => Some(MoveKey::Forward),
        PhysicalKey::Code(KeyCode::KeyS | KeyCode::ArrowDown) => Some(MoveKey::Backward),
        PhysicalKey::Code(KeyCode::KeyA | KeyCode::ArrowLeft) => Some(MoveKey::Left),
        PhysicalKey::Code(KeyCode::KeyD | KeyCode::ArrowRight) => Some(MoveKey::Right),
        _ => None,
    }
}

/// Held state of the four movement directions.
///
/// Flags are set on key-down and cleared on key-up; both keys mapped to a
/// direction drive the same flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveFlags {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveFlags {
    /// Set or clear the flag for one direction.
    pub fn set(&mut self, key: MoveKey, held: bool) {
        match key {
            MoveKey::Forward => self.forward = held,
            MoveKey::Backward => self.backward = held,
            MoveKey::Left => self.left = held,
            MoveKey::Right => self.right = held,
        }
    }

    /// Apply a key event. Returns `true` if the key is a movement key.
    /// Repeat events are recognized but change nothing.
    pub fn process_raw(&mut self, event: RawKeyEvent) -> bool {
        let Some(key) = move_key_for(event.key) else {
            return false;
        };
        if !event.repeat {
            self.set(key, event.state == ElementState::Pressed);
        }
        true
    }

    /// `+1` forward, `-1` backward, `0` for none or both.
    #[must_use]
    pub fn forward_axis(&self) -> f32 {
        f32::from(u8::from(self.forward)) - f32::from(u8::from(self.backward))
    }

    /// `+1` right, `-1` left, `0` for none or both.
    #[must_use]
    pub fn strafe_axis(&self) -> f32 {
        f32::from(u8::from(self.right)) - f32::from(u8::from(self.left))
    }

    #[must_use]
    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Release every direction.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
