//! Leaf math types for gallery navigation: floor-plane bounds, yaw/pitch
//! orientation, rays, and the view camera driven by the controllers.

mod bounds;
mod camera;
mod orientation;
mod ray;

pub use bounds::Bounds;
pub use camera::{Camera, DEFAULT_FOV_Y};
pub use orientation::{PITCH_LIMIT, YawPitch, wrap_angle};
pub use ray::Ray;
