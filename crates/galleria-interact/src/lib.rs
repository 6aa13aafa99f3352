//! Ray picking of exhibit items: which item the visitor is pointing at,
//! hover enter/exit bookkeeping, and activation.

mod event;
mod hover;
mod intersect;
mod resolver;
mod surface;

pub use event::InteractionEvent;
pub use hover::{HoverChange, HoverState, HoverTracker};
pub use intersect::{Quad, QuadScene, SurfaceHit, SurfaceIntersector};
pub use resolver::{Aim, DEFAULT_MAX_HOVER_DISTANCE, InteractionResolver, ItemHit, screen_to_ndc};
pub use surface::{SurfaceId, SurfaceRegistry};
