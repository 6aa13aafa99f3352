//! Screen point → item resolution.

use glam::Vec2;

use galleria_math::{Camera, Ray};
use galleria_scene::ItemId;

use crate::{SurfaceId, SurfaceIntersector, SurfaceRegistry};

/// Hover is suppressed for aimed hits farther than this.
pub const DEFAULT_MAX_HOVER_DISTANCE: f32 = 5.0;

/// Where the pick ray goes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Aim {
    /// Straight ahead through the crosshair.
    Center,
    /// Through a pixel of a viewport of the given size (origin top-left).
    Screen { point: Vec2, viewport: Vec2 },
}

impl Aim {
    /// Pick ray from `camera`.
    #[must_use]
    pub fn ray(self, camera: &Camera) -> Ray {
        match self {
            Aim::Center => camera.center_ray(),
            Aim::Screen { point, viewport } => camera.ray_through(screen_to_ndc(point, viewport)),
        }
    }
}

/// Pixel coordinates (origin top-left, +y down) to normalized device
/// coordinates (`-1..=1`, +y up). A degenerate viewport maps to the center.
#[must_use]
pub fn screen_to_ndc(point: Vec2, viewport: Vec2) -> Vec2 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (point.x / viewport.x) * 2.0 - 1.0,
        -((point.y / viewport.y) * 2.0 - 1.0),
    )
}

/// The item under a pick ray.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemHit {
    pub item: ItemId,
    pub surface: SurfaceId,
    pub distance: f32,
}

/// Resolves pick rays to items and applies the hover distance cutoff.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionResolver {
    pub max_hover_distance: f32,
}

impl Default for InteractionResolver {
    fn default() -> Self {
        Self {
            max_hover_distance: DEFAULT_MAX_HOVER_DISTANCE,
        }
    }
}

impl InteractionResolver {
    #[must_use]
    pub fn new(max_hover_distance: f32) -> Self {
        Self { max_hover_distance }
    }

    /// The item owning the nearest surface along the ray, if that surface
    /// resolves to one. No distance limit.
    #[must_use]
    pub fn resolve_hit(
        &self,
        aim: Aim,
        camera: &Camera,
        surfaces: &dyn SurfaceIntersector,
        registry: &SurfaceRegistry,
    ) -> Option<ItemHit> {
        let nearest = surfaces.intersect(&aim.ray(camera)).into_iter().next()?;
        let item = registry.resolve(nearest.surface)?;
        Some(ItemHit {
            item: item.clone(),
            surface: nearest.surface,
            distance: nearest.distance,
        })
    }

    /// Like [`resolve_hit`](Self::resolve_hit), but aimed hits at or beyond
    /// `max_hover_distance` count as nothing.
    #[must_use]
    pub fn resolve_hover(
        &self,
        aim: Aim,
        camera: &Camera,
        surfaces: &dyn SurfaceIntersector,
        registry: &SurfaceRegistry,
    ) -> Option<ItemHit> {
        let hit = self.resolve_hit(aim, camera, surfaces, registry)?;
        match aim {
            Aim::Center if hit.distance >= self.max_hover_distance => None,
            _ => Some(hit),
        }
    }
}
