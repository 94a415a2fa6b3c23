//! Collision manifolds for candidate pairs.

pub use self::collision::{
    collision, collision_ball_ball, collision_support_map_support_map, CollisionResult,
    MAX_CONTACT_POINTS,
};

mod collision;
