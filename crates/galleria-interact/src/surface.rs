//! Mapping from pickable surfaces back to the items that own them.

use rustc_hash::FxHashMap;

use galleria_scene::ItemId;

/// Identifies one pickable surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u32);

/// Surface → item registrations plus a surface hierarchy.
///
/// Resolution checks the surface itself, then walks exactly one level up to
/// its parent. Deeper descendants do not resolve.
#[derive(Clone, Debug, Default)]
pub struct SurfaceRegistry {
    owners: FxHashMap<SurfaceId, ItemId>,
    parents: FxHashMap<SurfaceId, SurfaceId>,
}

impl SurfaceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `surface` as belonging to `item`.
    pub fn register(&mut self, surface: SurfaceId, item: ItemId) {
        self.owners.insert(surface, item);
    }

    /// Record `child` as attached under `parent`.
    pub fn attach(&mut self, child: SurfaceId, parent: SurfaceId) {
        self.parents.insert(child, parent);
    }

    #[must_use]
    pub fn parent(&self, surface: SurfaceId) -> Option<SurfaceId> {
        self.parents.get(&surface).copied()
    }

    /// The item owning `surface`, if any.
    #[must_use]
    pub fn resolve(&self, surface: SurfaceId) -> Option<&ItemId> {
        self.owners.get(&surface).or_else(|| {
            self.parent(surface)
                .and_then(|parent| self.owners.get(&parent))
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_registered_surface() {
        let mut reg = SurfaceRegistry::new();
        reg.register(SurfaceId(1), ItemId::from("a"));
        assert_eq!(reg.resolve(SurfaceId(1)), Some(&ItemId::from("a")));
        assert_eq!(reg.resolve(SurfaceId(2)), None);
    }

    #[test]
    fn test_child_resolves_through_parent() {
        let mut reg = SurfaceRegistry::new();
        reg.register(SurfaceId(1), ItemId::from("a"));
        reg.attach(SurfaceId(2), SurfaceId(1));
        assert_eq!(reg.resolve(SurfaceId(2)), Some(&ItemId::from("a")));
    }

    #[test]
    fn test_grandchild_does_not_resolve() {
        let mut reg = SurfaceRegistry::new();
        reg.register(SurfaceId(1), ItemId::from("a"));
        reg.attach(SurfaceId(2), SurfaceId(1));
        reg.attach(SurfaceId(3), SurfaceId(2));
        assert_eq!(reg.resolve(SurfaceId(3)), None);
    }
}
