//! Pointer-capture seam between the continuous controller and the host.

use std::fmt;

/// Errors reported by the host when asked to capture the pointer.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The platform refused to grant pointer capture.
    #[error("pointer capture denied: {0}")]
    Denied(String),
}

/// Host-side pointer capture (pointer lock, cursor grab).
pub trait PointerCapture: fmt::Debug {
    /// Ask the host to capture the pointer.
    fn request_capture(&mut self) -> Result<(), CaptureError>;
    /// Give the pointer back to the host.
    fn release_capture(&mut self);
}

/// A host that always grants capture, for headless sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrantedCapture;

impl PointerCapture for GrantedCapture {
    fn request_capture(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }

    fn release_capture(&mut self) {}
}
