//! Gallery description: rooms and the items hung in them, loaded from the
//! JSON document the content editor produces.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ItemId, ItemPlacement, LayoutError, Room, RoomId};

/// Gallery-wide metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryInfo {
    pub name: String,
    pub description: String,
}

/// Physical size of an item's picture area.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemSize {
    pub width: f32,
    pub height: f32,
}

impl Default for ItemSize {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 0.75,
        }
    }
}

/// Frame around the picture. A zero width means no frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSpec {
    pub style: String,
    pub color: String,
    pub width: f32,
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self {
            style: "modern".to_string(),
            color: "#1a1a1a".to_string(),
            width: 0.05,
        }
    }
}

impl FrameSpec {
    /// Effective border width; `style: "none"` disables the frame.
    #[must_use]
    pub fn border(&self) -> f32 {
        if self.style == "none" {
            0.0
        } else {
            self.width.max(0.0)
        }
    }
}

/// One exhibited item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExhibitItem {
    pub id: ItemId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub position: ItemPlacement,
    #[serde(default)]
    pub dimensions: ItemSize,
    #[serde(default)]
    pub frame: Option<FrameSpec>,
}

impl ExhibitItem {
    /// Frame border width, using the default frame when none is given.
    #[must_use]
    pub fn frame_border(&self) -> f32 {
        self.frame.clone().unwrap_or_default().border()
    }
}

/// The complete gallery description.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryLayout {
    #[serde(default)]
    pub gallery: GalleryInfo,
    pub rooms: Vec<Room>,
    /// Items in curatorial order.
    #[serde(rename = "photos", default)]
    pub items: Vec<ExhibitItem>,
}

impl GalleryLayout {
    /// Parse a description from JSON.
    ///
    /// Data-quality problems (items in unknown rooms, offsets past the end of
    /// a wall) are logged, not rejected.
    pub fn from_json_str(json: &str) -> Result<Self, LayoutError> {
        let layout: Self = serde_json::from_str(json).map_err(LayoutError::ParseError)?;
        if layout.rooms.is_empty() {
            return Err(LayoutError::NoRooms);
        }
        layout.report_placement_issues();
        Ok(layout)
    }

    /// Read and parse a description file.
    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let contents = std::fs::read_to_string(path).map_err(LayoutError::ReadError)?;
        let layout = Self::from_json_str(&contents)?;
        tracing::info!(
            path = %path.display(),
            rooms = layout.rooms.len(),
            items = layout.items.len(),
            "loaded gallery description"
        );
        Ok(layout)
    }

    /// The room the visitor starts in.
    pub fn entry_room(&self) -> Result<&Room, LayoutError> {
        self.rooms.first().ok_or(LayoutError::NoRooms)
    }

    #[must_use]
    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| &r.id == id)
    }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&ExhibitItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    fn report_placement_issues(&self) {
        for item in &self.items {
            match self.room(&item.position.room) {
                None => tracing::warn!(
                    item = %item.id,
                    room = %item.position.room,
                    "item placed in unknown room"
                ),
                Some(room) if item.position.exceeds_wall(&room.dimensions) => tracing::warn!(
                    item = %item.id,
                    wall = ?item.position.wall,
                    offset = item.position.x,
                    "wall offset exceeds half the wall length; item will hang off-wall"
                ),
                Some(_) => {}
            }
        }
    }
}
