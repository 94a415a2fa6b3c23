use crate::math::{Isometry, Point, Real, UnitVector, Vector};
use crate::query::{gjk, sat};
use crate::shape::{Ball, Shape, SupportMap};
use arrayvec::ArrayVec;
use na::{self, Unit};

/// Maximum number of contact points carried by a [`CollisionResult`].
pub const MAX_CONTACT_POINTS: usize = 4;

/// The outcome of the narrow-phase test of one candidate pair.
///
/// A `CollisionResult` is immutable after construction: it is produced by
/// one narrow-phase call, consumed once by a resolver, then discarded. It is
/// never cached across simulation steps.
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionResult {
    colliding: bool,
    normal: UnitVector<Real>,
    depth: Real,
    contacts: ArrayVec<Point<Real>, MAX_CONTACT_POINTS>,
}

impl CollisionResult {
    /// A result describing two non-touching shapes.
    pub fn separated() -> Self {
        CollisionResult {
            colliding: false,
            normal: Vector::x_axis(),
            depth: 0.0,
            contacts: ArrayVec::new(),
        }
    }

    /// A result describing a penetrating pair.
    ///
    /// `normal` must point from the first shape toward the second and
    /// `depth` must be non-negative.
    pub fn penetrating(
        normal: UnitVector<Real>,
        depth: Real,
        contacts: ArrayVec<Point<Real>, MAX_CONTACT_POINTS>,
    ) -> Self {
        debug_assert!(depth >= 0.0, "penetration depth must be non-negative");
        CollisionResult {
            colliding: true,
            normal,
            depth: depth.max(0.0),
            contacts,
        }
    }

    /// Are the two shapes colliding?
    #[inline]
    pub fn is_colliding(&self) -> bool {
        self.colliding
    }

    /// The contact normal, pointing from the first shape toward the second.
    ///
    /// Meaningless when [`Self::is_colliding`] is `false`.
    #[inline]
    pub fn normal(&self) -> UnitVector<Real> {
        self.normal
    }

    /// The penetration depth along the normal. Always non-negative; zero for
    /// a separated or exactly-tangent pair.
    #[inline]
    pub fn depth(&self) -> Real {
        self.depth
    }

    /// The world-space contact points, deepest first.
    #[inline]
    pub fn contacts(&self) -> &[Point<Real>] {
        &self.contacts
    }

    /// Transforms this result by `pos` into another frame (typically from
    /// the local frame of the first shape into world space).
    pub fn transformed(self, pos: &Isometry<Real>) -> Self {
        CollisionResult {
            colliding: self.colliding,
            normal: Unit::new_unchecked(pos * self.normal.into_inner()),
            depth: self.depth,
            contacts: self.contacts.iter().map(|pt| pos * pt).collect(),
        }
    }
}

/// Computes the collision manifold between two posed shapes, in world space.
///
/// This is the `solve(pair)` operation of the pipeline: it is invoked once
/// per candidate pair per step and its result is consumed once by a
/// resolver. Geometric degeneracies resolve to a separated result; the call
/// never fails.
pub fn collision(
    pos1: &Isometry<Real>,
    g1: &dyn Shape,
    pos2: &Isometry<Real>,
    g2: &dyn Shape,
) -> CollisionResult {
    let pos12 = pos1.inv_mul(pos2);

    let local_result = if let (Some(b1), Some(b2)) =
        (g1.downcast_ref::<Ball>(), g2.downcast_ref::<Ball>())
    {
        collision_ball_ball(&pos12, b1, b2)
    } else {
        collision_support_map_support_map(&pos12, g1, g2)
    };

    local_result.transformed(pos1)
}

/// Closed-form collision test between two balls, in the local frame of the
/// first.
pub fn collision_ball_ball(pos12: &Isometry<Real>, b1: &Ball, b2: &Ball) -> CollisionResult {
    let center2 = pos12.translation.vector;
    let distance = center2.norm();
    let sum_radius = b1.radius + b2.radius;

    if distance > sum_radius {
        return CollisionResult::separated();
    }

    // Concentric balls have no meaningful direction; any unit vector is as
    // good as another.
    let normal = Unit::try_new(center2, crate::math::DEFAULT_EPSILON)
        .unwrap_or_else(Vector::x_axis);

    let on_surface1 = Point::from(normal.into_inner() * b1.radius);
    let on_surface2 = Point::from(center2 - normal.into_inner() * b2.radius);

    let mut contacts = ArrayVec::new();
    contacts.push(na::center(&on_surface1, &on_surface2));

    CollisionResult::penetrating(normal, sum_radius - distance, contacts)
}

/// Collision test between two support-mapped shapes, in the local frame of
/// the first.
///
/// A GJK overlap test gates the more expensive SAT pass: GJK alone yields no
/// penetration depth, so once it reports an overlap the separating-axis test
/// supplies the manifold normal, depth, and contact point. The two testers
/// may disagree at exact tangency; that boundary resolves to "separated".
pub fn collision_support_map_support_map(
    pos12: &Isometry<Real>,
    g1: &dyn Shape,
    g2: &dyn Shape,
) -> CollisionResult {
    if !gjk::intersection_test(pos12, g1, g2) {
        return CollisionResult::separated();
    }

    match sat::find_local_separating_axis(pos12, g1, g2) {
        None => {
            // Tangency disagreement between the two testers.
            log::trace!("GJK reported an overlap but SAT found a separating axis");
            CollisionResult::separated()
        }
        Some((normal, depth)) => {
            let deepest1 = g1.local_support_point_toward(&normal);
            let deepest2 = g2.support_point_toward(pos12, &-normal);

            let mut contacts = ArrayVec::new();
            contacts.push(na::center(&deepest1, &deepest2));

            CollisionResult::penetrating(normal, depth, contacts)
        }
    }
}
