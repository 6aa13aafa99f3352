use glam::{Vec2, Vec3};

/// Axis-aligned rectangle on the floor (XZ) plane that constrains camera
/// position.
///
/// Invariant: `min_x <= max_x` and `min_z <= max_z`. The constructor sorts
/// the components, so the invariant holds for any input. Fields are private:
/// a `Bounds` is fixed once the scene hands it to a controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    min_x: f32,
    max_x: f32,
    min_z: f32,
    max_z: f32,
}

impl Bounds {
    /// Create bounds from the two X limits and the two Z limits, in any order.
    #[must_use]
    pub fn new(x0: f32, x1: f32, z0: f32, z1: f32) -> Self {
        Self {
            min_x: x0.min(x1),
            max_x: x0.max(x1),
            min_z: z0.min(z1),
            max_z: z0.max(z1),
        }
    }

    /// Create bounds centered on `center` (x, z) with the given half-extents.
    /// Negative half-extents are treated as their absolute value.
    #[must_use]
    pub fn from_center_half_extents(center: Vec2, half: Vec2) -> Self {
        let half = half.abs();
        Self::new(
            center.x - half.x,
            center.x + half.x,
            center.y - half.y,
            center.y + half.y,
        )
    }

    #[must_use]
    pub fn min_x(&self) -> f32 {
        self.min_x
    }

    #[must_use]
    pub fn max_x(&self) -> f32 {
        self.max_x
    }

    #[must_use]
    pub fn min_z(&self) -> f32 {
        self.min_z
    }

    #[must_use]
    pub fn max_z(&self) -> f32 {
        self.max_z
    }

    /// Center of the rectangle as (x, z).
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_z + self.max_z) * 0.5,
        )
    }

    /// Returns a copy shrunk by `margin` on every side. An axis narrower than
    /// `2 * margin` collapses to its center line instead of inverting.
    #[must_use]
    pub fn shrink(&self, margin: f32) -> Self {
        let center = self.center();
        let half_x = ((self.max_x - self.min_x) * 0.5 - margin).max(0.0);
        let half_z = ((self.max_z - self.min_z) * 0.5 - margin).max(0.0);
        Self::from_center_half_extents(center, Vec2::new(half_x, half_z))
    }

    /// Returns true if the point's x/z lie inside or on the boundary.
    /// The y component is ignored.
    #[must_use]
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.z >= self.min_z && p.z <= self.max_z
    }

    /// Clamp the point's x/z into the rectangle, leaving y untouched.
    #[must_use]
    pub fn clamp(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x.clamp(self.min_x, self.max_x),
            p.y,
            p.z.clamp(self.min_z, self.max_z),
        )
    }
}
