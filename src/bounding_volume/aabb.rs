//! Axis Aligned Bounding Box.

use crate::bounding_volume::BoundingVolume;
use crate::math::{Point, Real, Vector, DIM};
use na;

/// An Axis-Aligned Bounding Box.
///
/// An AABB is the simplest bounding volume, defined by its minimum and
/// maximum corners. Its edges are always parallel to the coordinate axes,
/// making intersection tests a handful of coordinate comparisons.
///
/// # Invariant
///
/// `mins[i] <= maxs[i]` for every axis `i`. An AABB is always derived from
/// the current pose of the shape it bounds and recomputed whenever that pose
/// changes; it is never persisted independently of its owner.
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with the smallest coordinates on each axis.
    pub mins: Point<Real>,
    /// The point with the greatest coordinates on each axis.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB from its minimum and maximum corners.
    ///
    /// Each component of `mins` should be smaller than or equal to the
    /// corresponding component of `maxs`.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with `mins` components all set to `+∞` and
    /// `maxs` components all set to `-∞`.
    ///
    /// Useful as the neutral element of [`BoundingVolume::merge`].
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::MAX).into(),
            Vector::repeat(-Real::MAX).into(),
        )
    }

    /// Creates a new AABB from its center and half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Creates a new AABB enclosing the given set of points.
    pub fn from_points<'a, I>(pts: I) -> Self
    where
        I: IntoIterator<Item = &'a Point<Real>>,
    {
        let mut result = Aabb::new_invalid();

        for pt in pts {
            result.mins = result.mins.inf(pt);
            result.maxs = result.maxs.sup(pt);
        }

        result
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The half extents of this AABB.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        (self.maxs - self.mins) * 0.5
    }

    /// The extents of this AABB.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// The volume of this AABB.
    #[inline]
    pub fn volume(&self) -> Real {
        let extents = self.extents();
        extents.x * extents.y * extents.z
    }

    /// The total area of the six faces of this AABB.
    ///
    /// Used as the cost measure of the surface-area heuristic driving BVH
    /// insertions.
    #[inline]
    pub fn surface_area(&self) -> Real {
        let e = self.extents();
        2.0 * (e.x * e.y + e.y * e.z + e.z * e.x)
    }

    /// Does this AABB satisfy `mins[i] <= maxs[i]` on every axis, with all
    /// bounds finite?
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..DIM).all(|i| self.mins[i] <= self.maxs[i] && self.mins[i].is_finite() && self.maxs[i].is_finite())
    }

    /// Does this AABB contain the given point?
    ///
    /// Points on the boundary are considered contained.
    #[inline]
    pub fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        (0..DIM).all(|i| pt[i] >= self.mins[i] && pt[i] <= self.maxs[i])
    }
}

impl BoundingVolume for Aabb {
    #[inline]
    fn center(&self) -> Point<Real> {
        self.center()
    }

    #[inline]
    fn intersects(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.maxs) && na::partial_ge(&self.maxs, &other.mins)
    }

    #[inline]
    fn contains(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.mins) && na::partial_ge(&self.maxs, &other.maxs)
    }

    #[inline]
    fn merge(&mut self, other: &Aabb) {
        self.mins = self.mins.inf(&other.mins);
        self.maxs = self.maxs.sup(&other.maxs);
    }

    #[inline]
    fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    #[inline]
    fn loosen(&mut self, amount: Real) {
        debug_assert!(amount >= 0.0, "the loosening margin must be positive");
        self.mins += Vector::repeat(-amount);
        self.maxs += Vector::repeat(amount);
    }

    #[inline]
    fn loosened(&self, amount: Real) -> Aabb {
        debug_assert!(amount >= 0.0, "the loosening margin must be positive");
        Aabb {
            mins: self.mins + Vector::repeat(-amount),
            maxs: self.maxs + Vector::repeat(amount),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Aabb;
    use crate::bounding_volume::BoundingVolume;
    use crate::math::{Point, Vector};

    #[test]
    fn aabb_intersects_overlapping() {
        let a = Aabb::new(Point::origin(), Point::new(2.0, 2.0, 2.0));
        let b = Aabb::new(Point::new(1.0, 1.0, 1.0), Point::new(3.0, 3.0, 3.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn aabb_intersects_touching() {
        // Shared boundaries count as intersecting: the broad phase stays
        // conservative and lets the narrow phase decide.
        let a = Aabb::new(Point::origin(), Point::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Point::new(1.0, 0.0, 0.0), Point::new(2.0, 1.0, 1.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn aabb_disjoint() {
        let a = Aabb::new(Point::origin(), Point::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Point::new(2.0, 0.0, 0.0), Point::new(3.0, 1.0, 1.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn aabb_merged_contains_both() {
        let a = Aabb::from_half_extents(Point::new(-1.0, 0.0, 0.0), Vector::repeat(0.5));
        let b = Aabb::from_half_extents(Point::new(3.0, 1.0, -2.0), Vector::repeat(0.25));
        let m = a.merged(&b);
        assert!(m.contains(&a));
        assert!(m.contains(&b));
    }

    #[test]
    fn aabb_loosened_measures() {
        let aabb = Aabb::from_half_extents(Point::origin(), Vector::repeat(1.0));
        let loose = aabb.loosened(0.5);
        assert_relative_eq!(loose.extents().x, 3.0);
        assert_relative_eq!(loose.surface_area(), 54.0);
        assert_relative_eq!(loose.volume(), 27.0);
    }
}
