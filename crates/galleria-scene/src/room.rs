use std::fmt;

use galleria_math::Bounds;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Stable reference to an exhibit item.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier of a room in the gallery.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Interior size of a room in world units (meters). The room is centered on
/// the origin of the XZ plane with its floor at y = 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    /// Extent along X.
    pub width: f32,
    /// Floor-to-ceiling height.
    pub height: f32,
    /// Extent along Z.
    pub depth: f32,
}

impl RoomDimensions {
    #[must_use]
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    #[must_use]
    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }

    #[must_use]
    pub fn half_depth(&self) -> f32 {
        self.depth * 0.5
    }

    /// The full floor rectangle.
    #[must_use]
    pub fn floor_bounds(&self) -> Bounds {
        Bounds::from_center_half_extents(
            Vec2::ZERO,
            Vec2::new(self.half_width(), self.half_depth()),
        )
    }
}

/// Where the visitor first stands in a room.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for SpawnPoint {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 1.6,
            z: 0.0,
        }
    }
}

impl From<SpawnPoint> for Vec3 {
    fn from(p: SpawnPoint) -> Self {
        Vec3::new(p.x, p.y, p.z)
    }
}

/// A room of the gallery.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    #[serde(default)]
    pub name: String,
    pub dimensions: RoomDimensions,
    #[serde(default)]
    pub spawn_point: SpawnPoint,
}

impl Room {
    /// Camera bounds: the floor shrunk by `margin` on every side so the
    /// visitor cannot press against a wall.
    #[must_use]
    pub fn bounds(&self, margin: f32) -> Bounds {
        self.dimensions.floor_bounds().shrink(margin)
    }
}
