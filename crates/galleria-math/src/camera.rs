//! View camera: world position, yaw/pitch orientation, and the perspective
//! parameters needed to turn a screen point into a pick ray.

use glam::{Quat, Vec2, Vec3};

use crate::{Ray, YawPitch};

/// Default vertical field of view: 70 degrees.
pub const DEFAULT_FOV_Y: f32 = 70.0 * std::f32::consts::PI / 180.0;

/// A perspective camera positioned in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// World-space eye position.
    pub position: Vec3,
    orientation: YawPitch,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport width / height.
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 1.6, 5.0), DEFAULT_FOV_Y, 16.0 / 9.0)
    }
}

impl Camera {
    /// Create a camera looking down -Z.
    #[must_use]
    pub fn new(position: Vec3, fov_y: f32, aspect: f32) -> Self {
        Self {
            position,
            orientation: YawPitch::default(),
            fov_y,
            aspect,
        }
    }

    #[must_use]
    pub fn orientation(&self) -> YawPitch {
        self.orientation
    }

    /// Set the orientation. Pitch is re-clamped.
    pub fn set_orientation(&mut self, orientation: YawPitch) {
        self.orientation = YawPitch::new(orientation.yaw, orientation.pitch);
    }

    /// Turn to face `target`. No-op if the target is the eye position.
    pub fn look_at(&mut self, target: Vec3) {
        if let Some(o) = YawPitch::looking_at(self.position, target) {
            self.orientation = o;
        }
    }

    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.orientation.to_quat()
    }

    /// Unit view direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Unit local +X axis in world space.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    /// Forward with its vertical component discarded, renormalized. Derived
    /// from yaw alone so it stays defined when looking straight up or down.
    #[must_use]
    pub fn planar_forward(&self) -> Vec3 {
        Quat::from_rotation_y(self.orientation.yaw) * Vec3::NEG_Z
    }

    /// Horizontal right vector: `planar_forward × up`.
    #[must_use]
    pub fn planar_right(&self) -> Vec3 {
        self.planar_forward().cross(Vec3::Y)
    }

    /// Move along the camera's local axes: `local.x` along right, `local.y`
    /// along up, `local.z` along backward (so `-z` is forward).
    pub fn translate_local(&mut self, local: Vec3) {
        self.position += self.rotation() * local;
    }

    /// Ray from the eye through a normalized device coordinate
    /// (`-1..=1` on both axes, +y up).
    #[must_use]
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        let tan_half = (self.fov_y * 0.5).tan();
        let local = Vec3::new(ndc.x * tan_half * self.aspect, ndc.y * tan_half, -1.0);
        Ray::new(self.position, self.rotation() * local)
    }

    /// Ray straight ahead through the screen center.
    #[must_use]
    pub fn center_ray(&self) -> Ray {
        Ray::new(self.position, self.forward())
    }
}
