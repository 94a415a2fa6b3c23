//! Bounding volumes and their operators.

pub use self::aabb::Aabb;
pub use self::bounding_volume::BoundingVolume;

/// Free functions computing the AABB of specific shape classes.
pub mod details {
    pub use super::aabb_support_map::support_map_aabb;
}

mod aabb;
mod aabb_support_map;
mod bounding_volume;
