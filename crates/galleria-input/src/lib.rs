//! Platform-neutral input for gallery navigation: movement keys, touch
//! routing between joystick, rotation wheel and look region, and the event
//! enum the session consumes.

pub mod event;
pub mod keyboard;
pub mod touch;

pub use event::{InputEvent, TouchEvent};
pub use keyboard::{MoveFlags, MoveKey, RawKeyEvent, move_key_for};
pub use touch::{ScreenRect, TouchIntent, TouchLayout, TouchRouter};
