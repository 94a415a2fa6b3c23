//! Non-persistent geometric queries.
//!
//! The most general entry point is [`query::collision()`](collision), which
//! turns one candidate pair (two posed shapes) into a [`CollisionResult`]
//! describing whether and how the shapes touch. It is backed by two testers:
//!
//! * [`query::gjk`](gjk) — a support-mapping based boolean overlap test on
//!   the Minkowski difference of the two shapes;
//! * [`query::sat`](sat) — a separating-axis test, exact for convex
//!   polytopes, which also yields the penetration normal and depth needed to
//!   build a full manifold.
//!
//! The functions exported by the `details` submodule are specialized
//! versions for pairs of shapes known at compile-time, following the naming
//! scheme `[operation]_[shape1]_[shape2]()`.

pub use self::contact::{collision, CollisionResult, MAX_CONTACT_POINTS};
pub use self::dispatcher::{CollisionDispatcher, DefaultCollisionDispatcher};
pub use self::error::Unsupported;

pub mod contact;
mod dispatcher;
mod error;
pub mod gjk;
pub mod sat;

/// Queries dedicated to specific pairs of shapes.
pub mod details {
    pub use super::contact::{collision_ball_ball, collision_support_map_support_map};
}
