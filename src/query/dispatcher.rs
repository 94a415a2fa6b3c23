use crate::math::{Isometry, Real};
use crate::query::details;
use crate::query::{CollisionResult, Unsupported};
use crate::shape::{Ball, Shape};

/// Trait implemented by collision dispatchers.
///
/// A dispatcher maps a pair of posed shapes to the narrow-phase routine
/// handling that pair. This is a capability lookup over the shapes' traits,
/// not a closed type hierarchy: custom dispatchers can specialize additional
/// pairs, restrict coverage, or chain to another dispatcher.
pub trait CollisionDispatcher: Send + Sync {
    /// Computes the collision manifold of one candidate pair.
    ///
    /// `pos12` is the pose of the second shape in the local frame of the
    /// first; the result is expressed in the local frame of the first shape.
    fn collision(
        &self,
        pos12: &Isometry<Real>,
        g1: &dyn Shape,
        g2: &dyn Shape,
    ) -> Result<CollisionResult, Unsupported>;
}

/// The default collision dispatcher.
///
/// Specializes ball-ball pairs to their closed form, and routes every other
/// pair through the generic support-mapping path (GJK overlap gate followed
/// by SAT manifold extraction). Since every [`Shape`] is support-mapped,
/// this dispatcher never returns [`Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCollisionDispatcher;

impl CollisionDispatcher for DefaultCollisionDispatcher {
    fn collision(
        &self,
        pos12: &Isometry<Real>,
        g1: &dyn Shape,
        g2: &dyn Shape,
    ) -> Result<CollisionResult, Unsupported> {
        if let (Some(b1), Some(b2)) = (g1.downcast_ref::<Ball>(), g2.downcast_ref::<Ball>()) {
            Ok(details::collision_ball_ball(pos12, b1, b2))
        } else {
            Ok(details::collision_support_map_support_map(pos12, g1, g2))
        }
    }
}
