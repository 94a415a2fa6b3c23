//! Boolean overlap test based on the Gilbert-Johnson-Keerthi algorithm.
//!
//! The test operates on the Minkowski difference of the two shapes, built
//! lazily through their support functions: the shapes overlap if and only if
//! the origin lies inside that difference. A simplex of up to 4 vertices is
//! iteratively replaced by the sub-simplex closest to the origin while the
//! search direction is refined.
//!
//! This test is cheap but yields neither a penetration depth nor a contact
//! normal; callers needing a full manifold pair it with the
//! [`sat`](crate::query::sat) tester once an overlap is reported.

use crate::math::{Isometry, Real, Vector, DEFAULT_EPSILON};
use crate::query::gjk::Simplex;
use crate::shape::SupportMap;

/// The maximum number of refinement iterations of the GJK loop.
///
/// Convergence is bounded by the simplex cardinality and in practice takes a
/// handful of iterations; reaching this cap indicates numerical stagnation
/// and is treated as "inconclusive", reported as no intersection.
pub const GJK_MAX_ITERATIONS: usize = 25;

/// Support point of the Minkowski difference `g1 ⊖ (pos12 · g2)` along `dir`.
#[inline]
fn cso_support<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    dir: &Vector<Real>,
) -> Vector<Real>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let pt1 = g1.local_support_point(dir);
    let pt2 = pos12 * g2.local_support_point(&pos12.inverse_transform_vector(&-dir));
    pt1 - pt2
}

/// An arbitrary vector orthogonal to `v`.
fn any_orthogonal(v: &Vector<Real>) -> Vector<Real> {
    let axis = if v.x.abs() <= v.y.abs() && v.x.abs() <= v.z.abs() {
        Vector::x()
    } else if v.y.abs() <= v.z.abs() {
        Vector::y()
    } else {
        Vector::z()
    };
    v.cross(&axis)
}

/// Tests whether two support-mapped shapes overlap.
///
/// `pos12` is the pose of the second shape relative to the first; everything
/// is computed in the local frame of the first shape.
///
/// Degenerate configurations (zero-length search directions, coincident
/// support points) and iteration-cap exhaustion never abort: they resolve to
/// `false`, keeping the collision step total.
pub fn intersection_test<G1, G2>(pos12: &Isometry<Real>, g1: &G1, g2: &G2) -> bool
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let mut simplex = Simplex::new();

    let mut dir = pos12.translation.vector;
    if dir.norm_squared() < DEFAULT_EPSILON {
        dir = Vector::x();
    }

    let support = cso_support(pos12, g1, g2, &dir);
    simplex.push(support);
    let mut dir = -support;

    for _ in 0..GJK_MAX_ITERATIONS {
        if dir.norm_squared() < DEFAULT_EPSILON {
            // The origin lies on the current simplex.
            return true;
        }

        let support = cso_support(pos12, g1, g2, &dir);

        if support.dot(&dir) < 0.0 {
            // The newest support point fails to pass the origin: no further
            // progress toward the origin is possible.
            return false;
        }

        simplex.push(support);

        if closest_sub_simplex(&mut simplex, &mut dir) {
            return true;
        }
    }

    log::trace!(
        "GJK reached its iteration cap ({GJK_MAX_ITERATIONS}); reporting no intersection"
    );
    false
}

/// Replaces `simplex` by its sub-simplex closest to the origin and updates
/// the search direction. Returns `true` if the simplex encloses the origin.
fn closest_sub_simplex(simplex: &mut Simplex, dir: &mut Vector<Real>) -> bool {
    match simplex.dimension() {
        2 => segment_case(simplex, dir),
        3 => triangle_case(simplex, dir),
        4 => tetrahedron_case(simplex, dir),
        _ => unreachable!("the simplex holds between 2 and 4 vertices here"),
    }
}

fn segment_case(simplex: &mut Simplex, dir: &mut Vector<Real>) -> bool {
    let a = simplex.point(1);
    let b = simplex.point(0);

    let ab = b - a;
    let ao = -a;

    if ab.dot(&ao) > 0.0 {
        let perp = ab.cross(&ao).cross(&ab);
        if perp.norm_squared() < DEFAULT_EPSILON {
            // The origin sits on the segment's line; search sideways.
            *dir = any_orthogonal(&ab);
        } else {
            *dir = perp;
        }
    } else {
        simplex.rebuild([a]);
        *dir = ao;
    }

    false
}

fn triangle_case(simplex: &mut Simplex, dir: &mut Vector<Real>) -> bool {
    let a = simplex.point(2);
    let b = simplex.point(1);
    let c = simplex.point(0);

    let ab = b - a;
    let ac = c - a;
    let ao = -a;
    let abc = ab.cross(&ac);

    if abc.cross(&ac).dot(&ao) > 0.0 {
        if ac.dot(&ao) > 0.0 {
            // Closest to edge AC.
            simplex.rebuild([c, a]);
            *dir = ac.cross(&ao).cross(&ac);
        } else {
            simplex.rebuild([b, a]);
            return segment_case(simplex, dir);
        }
    } else if ab.cross(&abc).dot(&ao) > 0.0 {
        simplex.rebuild([b, a]);
        return segment_case(simplex, dir);
    } else {
        let side = abc.dot(&ao);
        if side > 0.0 {
            *dir = abc;
        } else if side < 0.0 {
            // Below the triangle: flip the winding.
            simplex.rebuild([b, c, a]);
            *dir = -abc;
        } else {
            // The origin lies within the triangle itself.
            return true;
        }
    }

    false
}

fn tetrahedron_case(simplex: &mut Simplex, dir: &mut Vector<Real>) -> bool {
    let a = simplex.point(3);
    let b = simplex.point(2);
    let c = simplex.point(1);
    let d = simplex.point(0);

    let ab = b - a;
    let ac = c - a;
    let ad = d - a;
    let ao = -a;

    let abc = ab.cross(&ac);
    let acd = ac.cross(&ad);
    let adb = ad.cross(&ab);

    if abc.dot(&ao) > 0.0 {
        simplex.rebuild([c, b, a]);
        return triangle_case(simplex, dir);
    }

    if acd.dot(&ao) > 0.0 {
        simplex.rebuild([d, c, a]);
        return triangle_case(simplex, dir);
    }

    if adb.dot(&ao) > 0.0 {
        simplex.rebuild([b, d, a]);
        return triangle_case(simplex, dir);
    }

    // No face separates the origin from the tetrahedron's interior.
    true
}

#[cfg(test)]
mod test {
    use super::intersection_test;
    use crate::math::{Isometry, Vector};
    use crate::shape::{Ball, Cuboid};

    #[test]
    fn gjk_separated_balls() {
        let b1 = Ball::new(1.0);
        let b2 = Ball::new(1.0);
        let pos12 = Isometry::translation(3.0, 0.0, 0.0);
        assert!(!intersection_test(&pos12, &b1, &b2));
    }

    #[test]
    fn gjk_overlapping_balls() {
        let b1 = Ball::new(1.0);
        let b2 = Ball::new(1.0);
        let pos12 = Isometry::translation(1.5, 0.0, 0.0);
        assert!(intersection_test(&pos12, &b1, &b2));
    }

    #[test]
    fn gjk_concentric_balls() {
        let b1 = Ball::new(1.0);
        let b2 = Ball::new(0.5);
        assert!(intersection_test(&Isometry::identity(), &b1, &b2));
    }

    #[test]
    fn gjk_cuboid_ball_terminates() {
        let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
        let ball = Ball::new(0.5);

        // Coarse sampling of poses around the cuboid; every call must
        // terminate within the iteration cap and agree with the analytic
        // point-box distance. The grid keeps every sample well away from
        // exact tangency.
        for i in -4i32..=4 {
            for j in -4i32..=4 {
                let (x, y) = (i as f32 * 0.6, j as f32 * 0.6);
                let pos12 = Isometry::translation(x, y, 0.0);
                let dx = (x.abs() - 1.0).max(0.0);
                let dy = (y.abs() - 1.0).max(0.0);
                let expected = dx * dx + dy * dy < 0.25;
                assert_eq!(
                    intersection_test(&pos12, &cuboid, &ball),
                    expected,
                    "pose ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn gjk_rotated_cuboids() {
        let c1 = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
        let c2 = Cuboid::new(Vector::new(1.0, 1.0, 1.0));

        // A cuboid rotated by 45° around z reaches sqrt(2) along x.
        let rotated = Isometry::new(
            Vector::new(3.0, 0.0, 0.0),
            Vector::new(0.0, 0.0, std::f32::consts::FRAC_PI_4),
        );
        assert!(!intersection_test(&rotated, &c1, &c2));

        let rotated_close = Isometry::new(
            Vector::new(2.3, 0.0, 0.0),
            Vector::new(0.0, 0.0, std::f32::consts::FRAC_PI_4),
        );
        assert!(intersection_test(&rotated_close, &c1, &c2));
    }
}
