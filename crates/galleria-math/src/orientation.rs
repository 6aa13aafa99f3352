//! Yaw/pitch orientation shared by every camera controller.
//!
//! Rotation order is yaw about +Y, then pitch about the rotated +X, with no
//! roll. Yaw 0 looks down -Z; positive yaw turns counter-clockwise when
//! viewed from above.

use glam::{EulerRot, Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Pitch is clamped to `[-PITCH_LIMIT, PITCH_LIMIT]` so the view never flips
/// over the vertical.
pub const PITCH_LIMIT: f32 = FRAC_PI_2;

/// Wrap an angle into `[-PI, PI)`.
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Camera orientation as yaw and pitch in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct YawPitch {
    /// Rotation about the vertical axis.
    pub yaw: f32,
    /// Rotation about the camera's local X axis. Positive looks up.
    pub pitch: f32,
}

impl YawPitch {
    /// Create an orientation, clamping pitch.
    #[must_use]
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
        }
    }

    /// Extract yaw and pitch from a rotation, discarding any roll.
    #[must_use]
    pub fn from_quat(rotation: Quat) -> Self {
        let (yaw, pitch, _roll) = rotation.to_euler(EulerRot::YXZ);
        Self::new(yaw, pitch)
    }

    /// Build the rotation quaternion for this orientation.
    #[must_use]
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Orientation that looks from `from` toward `target`.
    ///
    /// Returns `None` when the two points coincide and no direction exists.
    #[must_use]
    pub fn looking_at(from: Vec3, target: Vec3) -> Option<Self> {
        let dir = (target - from).try_normalize()?;
        Some(Self::new(
            (-dir.x).atan2(-dir.z),
            dir.y.clamp(-1.0, 1.0).asin(),
        ))
    }

    /// Apply a relative pointer delta: `yaw -= dx * speed`, `pitch -= dy * speed`,
    /// with pitch clamped.
    pub fn apply_look_delta(&mut self, dx: f32, dy: f32, speed: f32) {
        self.yaw -= dx * speed;
        self.pitch = (self.pitch - dy * speed).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Exponential approach toward `target`: each component moves by
    /// `factor` (clamped to `0..=1`) of its remaining difference. Yaw follows
    /// the shortest arc.
    #[must_use]
    pub fn blend_toward(self, target: Self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self::new(
            self.yaw + wrap_angle(target.yaw - self.yaw) * f,
            self.pitch + (target.pitch - self.pitch) * f,
        )
    }

    /// Unit view direction.
    #[must_use]
    pub fn forward(self) -> Vec3 {
        self.to_quat() * Vec3::NEG_Z
    }
}
