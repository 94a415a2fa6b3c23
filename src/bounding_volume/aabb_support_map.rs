use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real, Vector, DIM};
use crate::shape::SupportMap;

/// Computes the world-space AABB of a support-mapped shape at the pose `m`.
///
/// Six support-point evaluations, one along each signed world axis. Exact
/// for any convex shape; shapes with a cheaper closed form (balls, cuboids)
/// override this in their `Shape::compute_aabb` implementation.
pub fn support_map_aabb<G>(m: &Isometry<Real>, g: &G) -> Aabb
where
    G: SupportMap + ?Sized,
{
    let mut mins = Point::origin();
    let mut maxs = Point::origin();

    for d in 0..DIM {
        let axis = Vector::ith(d, 1.0);
        maxs[d] = g.support_point(m, &axis)[d];
        mins[d] = g.support_point(m, &-axis)[d];
    }

    Aabb::new(mins, maxs)
}
