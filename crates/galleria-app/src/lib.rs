//! Gallery viewer application: the session that ties controllers, picking
//! and input together, plus platform directory resolution.

pub mod platform;
pub mod session;

pub use session::{DEMO_GALLERY, GallerySession};
