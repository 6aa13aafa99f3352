//! Ray intersection against the flat surfaces items are drawn on.

use glam::{Quat, Vec2, Vec3};
use tracing::{debug, warn};

use galleria_math::Ray;
use galleria_scene::{GalleryLayout, PlacementResolver, WorldTransform};

use crate::{SurfaceId, SurfaceRegistry};

/// Rays hitting closer than this are treated as starting behind the surface.
const MIN_HIT_DISTANCE: f32 = 1e-4;
/// Frames sit this far behind the canvas they surround.
const FRAME_DEPTH_OFFSET: f32 = 0.01;

/// One intersection of a ray with a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceHit {
    pub surface: SurfaceId,
    /// Distance from the ray origin along its (unit) direction.
    pub distance: f32,
}

/// Anything that can intersect a ray with pickable surfaces.
pub trait SurfaceIntersector {
    /// All hits along `ray`, nearest first. Equal distances are ordered by
    /// surface id so results are deterministic.
    fn intersect(&self, ray: &Ray) -> Vec<SurfaceHit>;
}

/// A double-sided vertical rectangle rotated about +Y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub id: SurfaceId,
    pub center: Vec3,
    /// Half width and half height.
    pub half_size: Vec2,
    pub yaw: f32,
}

impl Quad {
    /// Distance along `ray` to this quad, if it is hit in front of the origin.
    #[must_use]
    pub fn hit_distance(&self, ray: &Ray) -> Option<f32> {
        let rotation = Quat::from_rotation_y(self.yaw);
        let normal = rotation * Vec3::Z;
        let denom = ray.direction.dot(normal);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = (self.center - ray.origin).dot(normal) / denom;
        if t < MIN_HIT_DISTANCE {
            return None;
        }
        let local = ray.at(t) - self.center;
        let along = local.dot(rotation * Vec3::X);
        (along.abs() <= self.half_size.x && local.y.abs() <= self.half_size.y).then_some(t)
    }
}

/// The pickable surfaces of a gallery.
#[derive(Clone, Debug, Default)]
pub struct QuadScene {
    quads: Vec<Quad>,
    next_id: u32,
}

impl QuadScene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a surface and return its id.
    pub fn add(&mut self, center: Vec3, half_size: Vec2, yaw: f32) -> SurfaceId {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        self.quads.push(Quad {
            id,
            center,
            half_size,
            yaw,
        });
        id
    }

    #[must_use]
    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Build one canvas surface per item, registered to the item, plus a
    /// frame surface attached under it when the item has a border. Items in
    /// unknown rooms are skipped.
    #[must_use]
    pub fn from_layout(layout: &GalleryLayout, resolver: &PlacementResolver) -> (Self, SurfaceRegistry) {
        let mut scene = Self::new();
        let mut registry = SurfaceRegistry::new();
        for item in &layout.items {
            let Some(room) = layout.room(&item.position.room) else {
                warn!(item = %item.id, room = %item.position.room, "item skipped: unknown room");
                continue;
            };
            let transform = resolver.resolve(&item.position, &room.dimensions);
            let half = Vec2::new(item.dimensions.width, item.dimensions.height) * 0.5;
            let canvas = scene.add(transform.position, half, transform.yaw);
            registry.register(canvas, item.id.clone());

            let border = item.frame_border();
            if border > 0.0 {
                let frame = scene.add_frame(&transform, half + Vec2::splat(border));
                registry.attach(frame, canvas);
            }
        }
        debug!(surfaces = scene.len(), items = registry.len(), "built pick surfaces");
        (scene, registry)
    }

    fn add_frame(&mut self, canvas: &WorldTransform, half_size: Vec2) -> SurfaceId {
        let center = canvas.position - canvas.normal() * FRAME_DEPTH_OFFSET;
        self.add(center, half_size, canvas.yaw)
    }
}

impl SurfaceIntersector for QuadScene {
    fn intersect(&self, ray: &Ray) -> Vec<SurfaceHit> {
        if ray.direction == Vec3::ZERO {
            return Vec::new();
        }
        let mut hits: Vec<SurfaceHit> = self
            .quads
            .iter()
            .filter_map(|q| {
                q.hit_distance(ray).map(|distance| SurfaceHit {
                    surface: q.id,
                    distance,
                })
            })
            .collect();
        hits.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.surface.cmp(&b.surface))
        });
        hits
    }
}
