mod bounding_box;
mod bounding_sphere;
mod bounding_volume;
mod color;
pub mod transform_ops;

pub use bounding_box::BoundingBox;
pub use bounding_sphere::BoundingSphere;
pub use bounding_volume::{BoundingVolume, BoundsType};
pub use color::RgbaColor;

/// Tolerance used for floating-point comparisons across the crate.
pub const EPSILON: f32 = 1e-5;
