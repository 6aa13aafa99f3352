//! Guided-tour waypoints derived from item placements.
//!
//! One waypoint per viewable item in a room, in the order the items are
//! listed (curatorial order, not spatial order). The viewing position sits
//! `view_distance` in front of the item's wall at eye height; the look-at
//! target is the item's resolved world position.

use glam::Vec3;

use crate::{ExhibitItem, ItemId, PlacementResolver, Room};

/// Default distance between a waypoint and the wall it faces.
pub const DEFAULT_VIEW_DISTANCE: f32 = 2.5;
/// Default camera height at a waypoint.
pub const DEFAULT_EYE_HEIGHT: f32 = 1.6;

/// A precomputed camera pose for viewing one item.
#[derive(Clone, Debug, PartialEq)]
pub struct Waypoint {
    pub item: ItemId,
    pub view_position: Vec3,
    pub look_at: Vec3,
}

/// Ordered, read-only sequence of waypoints for one room.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WaypointSet {
    waypoints: Vec<Waypoint>,
}

impl WaypointSet {
    #[must_use]
    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        Self { waypoints }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> {
        self.waypoints.iter()
    }

    /// Index after `index`, wrapping to 0. `None` for an empty set.
    #[must_use]
    pub fn next_index(&self, index: usize) -> Option<usize> {
        let n = self.waypoints.len();
        (n > 0).then(|| (index + 1) % n)
    }

    /// Index before `index`, wrapping to the last. `None` for an empty set.
    #[must_use]
    pub fn prev_index(&self, index: usize) -> Option<usize> {
        let n = self.waypoints.len();
        (n > 0).then(|| (index % n + n - 1) % n)
    }
}

/// Builds a [`WaypointSet`] from the items hanging in a room.
#[derive(Clone, Debug, PartialEq)]
pub struct WaypointBuilder {
    pub view_distance: f32,
    pub eye_height: f32,
    /// Item never visited by the tour (e.g. the cover/title piece).
    pub excluded: Option<ItemId>,
    pub resolver: PlacementResolver,
}

impl Default for WaypointBuilder {
    fn default() -> Self {
        Self {
            view_distance: DEFAULT_VIEW_DISTANCE,
            eye_height: DEFAULT_EYE_HEIGHT,
            excluded: None,
            resolver: PlacementResolver::default(),
        }
    }
}

impl WaypointBuilder {
    /// Build the waypoints for `room`. Items placed in other rooms and the
    /// excluded item are skipped; the rest keep their input order.
    #[must_use]
    pub fn build(&self, items: &[ExhibitItem], room: &Room) -> WaypointSet {
        let waypoints: Vec<Waypoint> = items
            .iter()
            .filter(|item| item.position.room == room.id)
            .filter(|item| self.excluded.as_ref() != Some(&item.id))
            .map(|item| {
                let wall = item.position.wall;
                let view = wall.anchor(item.position.x, &room.dimensions)
                    + wall.inward_normal() * self.view_distance;
                Waypoint {
                    item: item.id.clone(),
                    view_position: Vec3::new(view.x, self.eye_height, view.z),
                    look_at: self
                        .resolver
                        .resolve(&item.position, &room.dimensions)
                        .position,
                }
            })
            .collect();
        tracing::debug!(room = %room.id, count = waypoints.len(), "built waypoint set");
        WaypointSet::new(waypoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ItemPlacement, ItemSize, RoomDimensions, SpawnPoint, WallSide};

    fn room() -> Room {
        Room {
            id: "main".into(),
            name: String::new(),
            dimensions: RoomDimensions::new(10.0, 4.0, 8.0),
            spawn_point: SpawnPoint::default(),
        }
    }

    fn item(id: &str, room: &str, wall: WallSide, x: f32) -> ExhibitItem {
        ExhibitItem {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            position: ItemPlacement {
                room: room.into(),
                wall,
                x,
                y: 1.8,
            },
            dimensions: ItemSize::default(),
            frame: None,
        }
    }

    #[test]
    fn test_one_waypoint_per_wall() {
        let items: Vec<_> = WallSide::ALL
            .iter()
            .enumerate()
            .map(|(i, &w)| item(&format!("p{i}"), "main", w, 0.0))
            .collect();
        let set = WaypointBuilder::default().build(&items, &room());
        assert_eq!(set.len(), 4);
        let north = set.get(0).unwrap();
        assert!((north.view_position - Vec3::new(0.0, 1.6, -1.5)).length() < 1e-6);
        assert!((north.look_at.z + 4.0 - 0.05).abs() < 1e-6);
        let east = set.get(2).unwrap();
        assert!((east.view_position - Vec3::new(2.5, 1.6, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_view_position_between_wall_and_center() {
        let r = room();
        let items: Vec<_> = WallSide::ALL
            .iter()
            .map(|&w| item("p", "main", w, 1.0))
            .collect();
        let builder = WaypointBuilder::default();
        let set = builder.build(&items, &r);
        for (wp, it) in set.iter().zip(&items) {
            let wall = it.position.wall;
            let anchor = wall.anchor(it.position.x, &r.dimensions);
            let from_wall = (wp.view_position - anchor).dot(wall.inward_normal());
            assert!((from_wall - builder.view_distance).abs() < 1e-5);
            let half = wall_half_span(wall, &r.dimensions);
            assert!(from_wall > 0.0 && from_wall < half, "{wall:?}");
        }
    }

    fn wall_half_span(wall: WallSide, dims: &RoomDimensions) -> f32 {
        match wall {
            WallSide::North | WallSide::South => dims.half_depth(),
            WallSide::East | WallSide::West => dims.half_width(),
        }
    }

    #[test]
    fn test_excluded_item_and_other_rooms_skipped() {
        let items = vec![
            item("photo-cover", "main", WallSide::North, 0.0),
            item("a", "main", WallSide::South, 0.0),
            item("b", "annex", WallSide::South, 0.0),
            item("c", "main", WallSide::West, 0.5),
        ];
        let builder = WaypointBuilder {
            excluded: Some("photo-cover".into()),
            ..Default::default()
        };
        let set = builder.build(&items, &room());
        let ids: Vec<_> = set.iter().map(|w| w.item.0.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn test_empty_items_give_empty_set() {
        let set = WaypointBuilder::default().build(&[], &room());
        assert!(set.is_empty());
        assert_eq!(set.next_index(0), None);
        assert_eq!(set.prev_index(0), None);
    }

    #[test]
    fn test_index_wraps_both_directions() {
        let set = WaypointSet::new(
            (0..4)
                .map(|i| Waypoint {
                    item: ItemId(format!("p{i}")),
                    view_position: Vec3::ZERO,
                    look_at: Vec3::ONE,
                })
                .collect(),
        );
        assert_eq!(set.next_index(3), Some(0));
        assert_eq!(set.prev_index(0), Some(3));
        assert_eq!(set.prev_index(2), Some(1));
    }
}
