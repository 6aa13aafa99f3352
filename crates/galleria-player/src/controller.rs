//! The contract shared by every camera controller.

use galleria_math::{Bounds, Camera};

use crate::{CaptureError, ContinuousController, GuidedController};

/// Lock/unlock, bounds and the per-frame update.
///
/// While unlocked a controller ignores movement input and `update` is a
/// no-op. Input handlers only stage state; positions are integrated in
/// `update`.
pub trait CameraController {
    /// Enable input. Fails (and stays unlocked) if the host denies it.
    fn lock(&mut self) -> Result<(), CaptureError>;
    /// Disable input.
    fn unlock(&mut self);
    fn is_locked(&self) -> bool;
    /// Constrain the camera's x/z to `bounds` from now on.
    fn set_bounds(&mut self, bounds: Bounds);
    fn bounds(&self) -> Option<Bounds>;
    /// Integrate one frame of `dt` seconds.
    fn update(&mut self, dt: f32);
    fn camera(&self) -> &Camera;
    fn camera_mut(&mut self) -> &mut Camera;
}

/// The controller variant chosen for a session.
#[derive(Debug)]
pub enum Controller {
    /// Keyboard + captured-pointer free movement.
    Continuous(ContinuousController),
    /// Joystick, swipe and waypoint tour.
    Guided(GuidedController),
}

impl Controller {
    #[must_use]
    pub fn as_continuous_mut(&mut self) -> Option<&mut ContinuousController> {
        match self {
            Controller::Continuous(c) => Some(c),
            Controller::Guided(_) => None,
        }
    }

    #[must_use]
    pub fn as_guided(&self) -> Option<&GuidedController> {
        match self {
            Controller::Guided(g) => Some(g),
            Controller::Continuous(_) => None,
        }
    }

    #[must_use]
    pub fn as_guided_mut(&mut self) -> Option<&mut GuidedController> {
        match self {
            Controller::Guided(g) => Some(g),
            Controller::Continuous(_) => None,
        }
    }

    fn inner(&self) -> &dyn CameraController {
        match self {
            Controller::Continuous(c) => c,
            Controller::Guided(g) => g,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn CameraController {
        match self {
            Controller::Continuous(c) => c,
            Controller::Guided(g) => g,
        }
    }
}

impl CameraController for Controller {
    fn lock(&mut self) -> Result<(), CaptureError> {
        self.inner_mut().lock()
    }

    fn unlock(&mut self) {
        self.inner_mut().unlock();
    }

    fn is_locked(&self) -> bool {
        self.inner().is_locked()
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.inner_mut().set_bounds(bounds);
    }

    fn bounds(&self) -> Option<Bounds> {
        self.inner().bounds()
    }

    fn update(&mut self, dt: f32) {
        self.inner_mut().update(dt);
    }

    fn camera(&self) -> &Camera {
        self.inner().camera()
    }

    fn camera_mut(&mut self) -> &mut Camera {
        self.inner_mut().camera_mut()
    }
}

impl From<ContinuousController> for Controller {
    fn from(c: ContinuousController) -> Self {
        Controller::Continuous(c)
    }
}

impl From<GuidedController> for Controller {
    fn from(g: GuidedController) -> Self {
        Controller::Guided(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ContinuousSettings, GuidedSettings};
    use glam::Vec3;

    #[test]
    fn test_dispatch_reaches_variant() {
        let mut c: Controller =
            ContinuousController::new(Camera::default(), ContinuousSettings::default()).into();
        assert!(!c.is_locked());
        c.lock().unwrap();
        assert!(c.is_locked());
        assert!(c.as_guided().is_none());
        c.unlock();
        assert!(!c.is_locked());
    }

    #[test]
    fn test_bounds_apply_through_union() {
        let mut g: Controller =
            GuidedController::new(Camera::default(), GuidedSettings::default()).into();
        g.set_bounds(Bounds::new(-1.0, 1.0, -1.0, 1.0));
        g.camera_mut().position = Vec3::new(5.0, 1.6, 5.0);
        g.lock().unwrap();
        g.update(0.016);
        assert_eq!(g.camera().position, Vec3::new(1.0, 1.6, 1.0));
    }
}
