use galleria_scene::ItemId;

/// Notifications for the UI layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractionEvent {
    /// The pointer (or view center) moved onto an item.
    HoverEntered(ItemId),
    /// The pointer left the previously hovered item.
    HoverExited(ItemId),
    /// The visitor clicked or tapped an item. Fired once per activation.
    Activated(ItemId),
}
