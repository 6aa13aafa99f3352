//! Continuous free-look controller: captured-pointer look plus WASD/arrow
//! movement along the camera's local axes.

use galleria_input::{MoveFlags, RawKeyEvent};
use galleria_math::{Bounds, Camera};
use glam::{Vec2, Vec3};
use tracing::{info, warn};

use crate::{CameraController, CaptureError, GrantedCapture, PointerCapture};

/// Tunables for [`ContinuousController`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContinuousSettings {
    /// Movement speed in world units per second.
    pub move_speed: f32,
    /// Radians of rotation per pixel of pointer motion.
    pub look_speed: f32,
}

impl Default for ContinuousSettings {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            look_speed: 0.002,
        }
    }
}

/// Free movement with captured-pointer look.
///
/// `Unlocked` until [`lock`](CameraController::lock) succeeds. Pointer motion
/// rotates the camera immediately; key events only toggle [`MoveFlags`];
/// [`update`](CameraController::update) turns the flags into one frame of
/// motion with no carry-over between frames.
#[derive(Debug)]
pub struct ContinuousController {
    camera: Camera,
    settings: ContinuousSettings,
    locked: bool,
    flags: MoveFlags,
    bounds: Option<Bounds>,
    capture: Box<dyn PointerCapture>,
}

impl ContinuousController {
    /// Create an unlocked controller whose host always grants capture.
    #[must_use]
    pub fn new(camera: Camera, settings: ContinuousSettings) -> Self {
        Self {
            camera,
            settings,
            locked: false,
            flags: MoveFlags::default(),
            bounds: None,
            capture: Box::new(GrantedCapture),
        }
    }

    /// Use `capture` to talk to the host's pointer lock.
    #[must_use]
    pub fn with_capture(mut self, capture: impl PointerCapture + 'static) -> Self {
        self.capture = Box::new(capture);
        self
    }

    /// Swap the host capture seam. Releases any capture held by the old one.
    pub fn set_capture(&mut self, capture: impl PointerCapture + 'static) {
        if self.locked {
            self.capture.release_capture();
            self.locked = false;
            self.flags.clear();
        }
        self.capture = Box::new(capture);
    }

    #[must_use]
    pub fn settings(&self) -> &ContinuousSettings {
        &self.settings
    }

    #[must_use]
    pub fn move_flags(&self) -> MoveFlags {
        self.flags
    }

    /// Relative pointer motion. Applied to the orientation at once.
    pub fn on_pointer_motion(&mut self, dx: f32, dy: f32) {
        if !self.locked {
            return;
        }
        let mut orientation = self.camera.orientation();
        orientation.apply_look_delta(dx, dy, self.settings.look_speed);
        self.camera.set_orientation(orientation);
    }

    /// Key down/up. Returns `true` if the key drives movement.
    pub fn on_key(&mut self, event: RawKeyEvent) -> bool {
        if !self.locked {
            return false;
        }
        self.flags.process_raw(event)
    }

    /// The host revoked pointer capture.
    pub fn on_capture_lost(&mut self) {
        if self.locked {
            info!("pointer capture lost; controls unlocked");
        }
        self.locked = false;
        self.flags.clear();
    }

    /// One frame of displacement in the camera's local frame for the current
    /// flags: x along right, z along backward.
    fn local_velocity(&self, dt: f32) -> Vec3 {
        let direction = Vec2::new(self.flags.strafe_axis(), self.flags.forward_axis())
            .normalize_or_zero();
        let speed = self.settings.move_speed * dt;
        Vec3::new(direction.x * speed, 0.0, -direction.y * speed)
    }
}

impl CameraController for ContinuousController {
    fn lock(&mut self) -> Result<(), CaptureError> {
        if self.locked {
            return Ok(());
        }
        match self.capture.request_capture() {
            Ok(()) => {
                self.locked = true;
                info!("continuous controls locked");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "pointer capture request failed; staying unlocked");
                Err(e)
            }
        }
    }

    fn unlock(&mut self) {
        if self.locked {
            self.capture.release_capture();
            info!("continuous controls unlocked");
        }
        self.locked = false;
        self.flags.clear();
    }

    fn is_locked(&self) -> bool {
        self.locked
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
    }

    fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    fn update(&mut self, dt: f32) {
        if !self.locked {
            return;
        }
        let velocity = self.local_velocity(dt);
        self.camera.translate_local(velocity);
        if let Some(bounds) = self.bounds {
            self.camera.position = bounds.clamp(self.camera.position);
        }
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }
}
