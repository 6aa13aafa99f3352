//! Hover bookkeeping: enter/exit transitions only when the hovered item
//! changes.

use galleria_scene::ItemId;

use crate::{InteractionEvent, ItemHit, SurfaceId};

/// What is currently hovered.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverState {
    pub item: ItemId,
    pub surface: SurfaceId,
}

/// A change of hovered item.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverChange {
    pub exited: Option<ItemId>,
    pub entered: Option<ItemId>,
}

impl HoverChange {
    /// Exit first, then enter.
    pub fn into_events(self) -> impl Iterator<Item = InteractionEvent> {
        self.exited
            .map(InteractionEvent::HoverExited)
            .into_iter()
            .chain(self.entered.map(InteractionEvent::HoverEntered))
    }
}

#[derive(Clone, Debug, Default)]
pub struct HoverTracker {
    current: Option<HoverState>,
}

impl HoverTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<&HoverState> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn hovered_item(&self) -> Option<&ItemId> {
        self.current.as_ref().map(|s| &s.item)
    }

    /// Feed this frame's hover hit. Returns a change only when the hovered
    /// item differs from last frame; moving between surfaces of the same
    /// item updates the state silently.
    pub fn update(&mut self, hit: Option<ItemHit>) -> Option<HoverChange> {
        let next = hit.map(|h| HoverState {
            item: h.item,
            surface: h.surface,
        });
        let previous = self.hovered_item().cloned();
        let changed = previous.as_ref() != next.as_ref().map(|s| &s.item);
        self.current = next;
        changed.then(|| HoverChange {
            exited: previous,
            entered: self.hovered_item().cloned(),
        })
    }

    /// Drop any hover, e.g. when input is disabled.
    pub fn clear(&mut self) -> Option<HoverChange> {
        self.update(None)
    }
}
