//! Shapes usable by the narrow phase: support mappings and separating axes.

pub use self::ball::Ball;
pub use self::convex_polytope::ConvexPolytope;
pub use self::cuboid::Cuboid;
pub use self::shape::{AxisSet, Shape};
pub use self::support_map::SupportMap;

mod ball;
mod convex_polytope;
mod cuboid;
mod shape;
mod support_map;
