//! Gallery scene description and the spatial logic derived from it:
//! wall-relative placement of exhibit items and the guided-tour waypoints.

mod error;
mod layout;
mod placement;
mod room;
mod waypoint;

pub use error::LayoutError;
pub use layout::{ExhibitItem, FrameSpec, GalleryInfo, GalleryLayout, ItemSize};
pub use placement::{
    ItemPlacement, PlacementResolver, WALL_INSET, WallSide, WorldTransform,
    resolve_world_transform,
};
pub use room::{ItemId, Room, RoomDimensions, RoomId, SpawnPoint};
pub use waypoint::{
    DEFAULT_EYE_HEIGHT, DEFAULT_VIEW_DISTANCE, Waypoint, WaypointBuilder, WaypointSet,
};
