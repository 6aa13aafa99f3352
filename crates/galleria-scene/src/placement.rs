//! Wall-relative placement.
//!
//! An item is stored as "wall + offset along the wall + height". The
//! resolver turns that into a world position just off the wall plane and a
//! rotation about +Y that makes the item's front (+Z in its local frame)
//! face into the room.
//!
//! Offsets are not validated: a value past the end of the wall positions
//! the item off-wall exactly as computed.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::{RoomDimensions, RoomId};

/// Distance the item is pulled off the wall plane to avoid z-fighting.
pub const WALL_INSET: f32 = 0.05;

/// The four walls of a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallSide {
    /// The wall at `z = -depth/2`.
    North,
    /// The wall at `z = +depth/2`.
    South,
    /// The wall at `x = +width/2`.
    East,
    /// The wall at `x = -width/2`.
    West,
}

impl WallSide {
    pub const ALL: [WallSide; 4] = [
        WallSide::North,
        WallSide::South,
        WallSide::East,
        WallSide::West,
    ];

    /// Rotation about +Y that turns an item's local +Z into this wall's
    /// inward normal.
    #[must_use]
    pub fn facing_yaw(self) -> f32 {
        match self {
            WallSide::North => 0.0,
            WallSide::South => PI,
            WallSide::East => -FRAC_PI_2,
            WallSide::West => FRAC_PI_2,
        }
    }

    /// Unit normal pointing from the wall toward the room center.
    #[must_use]
    pub fn inward_normal(self) -> Vec3 {
        match self {
            WallSide::North => Vec3::Z,
            WallSide::South => Vec3::NEG_Z,
            WallSide::East => Vec3::NEG_X,
            WallSide::West => Vec3::X,
        }
    }

    /// Length of this wall. North/south walls span the width, east/west walls
    /// span the depth.
    #[must_use]
    pub fn length(self, room: &RoomDimensions) -> f32 {
        match self {
            WallSide::North | WallSide::South => room.width,
            WallSide::East | WallSide::West => room.depth,
        }
    }

    /// Floor-level point on the wall plane at `offset` along the wall.
    /// North/south offsets run along X; east/west offsets run along Z.
    #[must_use]
    pub fn anchor(self, offset: f32, room: &RoomDimensions) -> Vec3 {
        let hw = room.half_width();
        let hd = room.half_depth();
        match self {
            WallSide::North => Vec3::new(offset, 0.0, -hd),
            WallSide::South => Vec3::new(offset, 0.0, hd),
            WallSide::East => Vec3::new(hw, 0.0, offset),
            WallSide::West => Vec3::new(-hw, 0.0, offset),
        }
    }
}

/// Abstract position of an exhibit item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemPlacement {
    /// The room the item hangs in.
    pub room: RoomId,
    /// The wall it hangs on.
    pub wall: WallSide,
    /// Offset along the wall from its midpoint.
    pub x: f32,
    /// Height of the item's center above the floor.
    pub y: f32,
}

impl ItemPlacement {
    /// True when `|x|` exceeds half of the wall's length.
    #[must_use]
    pub fn exceeds_wall(&self, room: &RoomDimensions) -> bool {
        self.x.abs() > self.wall.length(room) * 0.5
    }
}

/// Resolved world placement of an item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldTransform {
    /// World position of the item's center.
    pub position: Vec3,
    /// Rotation about +Y.
    pub yaw: f32,
}

impl WorldTransform {
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// The item's front direction in world space.
    #[must_use]
    pub fn normal(&self) -> Vec3 {
        self.rotation() * Vec3::Z
    }
}

/// Maps wall-relative placements to world transforms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementResolver {
    /// Distance off the wall plane.
    pub inset: f32,
}

impl Default for PlacementResolver {
    fn default() -> Self {
        Self { inset: WALL_INSET }
    }
}

impl PlacementResolver {
    #[must_use]
    pub fn new(inset: f32) -> Self {
        Self { inset }
    }

    /// Resolve a placement against the dimensions of its room.
    #[must_use]
    pub fn resolve(&self, placement: &ItemPlacement, room: &RoomDimensions) -> WorldTransform {
        let wall = placement.wall;
        let on_wall = wall.anchor(placement.x, room) + wall.inward_normal() * self.inset;
        WorldTransform {
            position: Vec3::new(on_wall.x, placement.y, on_wall.z),
            yaw: wall.facing_yaw(),
        }
    }
}

/// Resolve with the default wall inset.
#[must_use]
pub fn resolve_world_transform(placement: &ItemPlacement, room: &RoomDimensions) -> WorldTransform {
    PlacementResolver::default().resolve(placement, room)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> RoomDimensions {
        RoomDimensions::new(10.0, 4.0, 8.0)
    }

    fn placement(wall: WallSide, x: f32, y: f32) -> ItemPlacement {
        ItemPlacement {
            room: "main".into(),
            wall,
            x,
            y,
        }
    }

    #[test]
    fn test_zero_offset_is_wall_midpoint() {
        let r = room();
        let expected = [
            (WallSide::North, Vec3::new(0.0, 1.5, -4.0 + WALL_INSET)),
            (WallSide::South, Vec3::new(0.0, 1.5, 4.0 - WALL_INSET)),
            (WallSide::East, Vec3::new(5.0 - WALL_INSET, 1.5, 0.0)),
            (WallSide::West, Vec3::new(-5.0 + WALL_INSET, 1.5, 0.0)),
        ];
        for (wall, pos) in expected {
            let t = resolve_world_transform(&placement(wall, 0.0, 1.5), &r);
            assert!((t.position - pos).length() < 1e-6, "{wall:?}: {:?}", t.position);
        }
    }

    #[test]
    fn test_normal_points_into_room() {
        let r = room();
        for wall in WallSide::ALL {
            let t = resolve_world_transform(&placement(wall, 0.0, 1.5), &r);
            assert!((t.normal() - wall.inward_normal()).length() < 1e-6, "{wall:?}");
            let to_center = Vec3::new(0.0, t.position.y, 0.0) - t.position;
            assert!(t.normal().dot(to_center) > 0.0, "{wall:?}");
        }
    }

    #[test]
    fn test_facing_yaw_values() {
        assert_eq!(WallSide::North.facing_yaw(), 0.0);
        assert_eq!(WallSide::South.facing_yaw(), PI);
        assert_eq!(WallSide::East.facing_yaw(), -FRAC_PI_2);
        assert_eq!(WallSide::West.facing_yaw(), FRAC_PI_2);
    }

    #[test]
    fn test_east_west_offset_runs_along_depth() {
        let t = resolve_world_transform(&placement(WallSide::East, 2.0, 1.8), &room());
        assert!((t.position.z - 2.0).abs() < 1e-6);
        let t = resolve_world_transform(&placement(WallSide::West, -1.5, 1.8), &room());
        assert!((t.position.z + 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_height_copied_unchanged() {
        let t = resolve_world_transform(&placement(WallSide::South, 1.0, 2.25), &room());
        assert_eq!(t.position.y, 2.25);
    }

    #[test]
    fn test_out_of_range_offset_is_not_clamped() {
        let p = placement(WallSide::North, 9.0, 1.5);
        assert!(p.exceeds_wall(&room()));
        let t = resolve_world_transform(&p, &room());
        assert_eq!(t.position.x, 9.0);
    }

    #[test]
    fn test_custom_inset() {
        let t = PlacementResolver::new(0.0).resolve(&placement(WallSide::North, 0.0, 1.0), &room());
        assert_eq!(t.position.z, -4.0);
    }

    #[test]
    fn test_wall_side_deserializes_lowercase() {
        let wall: WallSide = serde_json::from_str("\"east\"").unwrap();
        assert_eq!(wall, WallSide::East);
    }
}
