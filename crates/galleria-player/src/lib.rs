//! Camera controllers for moving through the gallery.
//!
//! Both variants implement [`CameraController`]; the session owns one of
//! them through the [`Controller`] tagged union.

pub mod auto_advance;
pub mod capture;
pub mod continuous;
pub mod controller;
pub mod guided;

pub use auto_advance::{AdvanceTimer, AdvanceToken};
pub use capture::{CaptureError, GrantedCapture, PointerCapture};
pub use continuous::{ContinuousController, ContinuousSettings};
pub use controller::{CameraController, Controller};
pub use guided::{GuidedController, GuidedSettings};
