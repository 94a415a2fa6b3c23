use crate::bounding_volume::{details::support_map_aabb, Aabb};
use crate::math::{Isometry, Real, UnitVector};
use crate::shape::SupportMap;
use downcast_rs::{impl_downcast, DowncastSync};
use smallvec::SmallVec;

/// The set of candidate separating-axis directions exposed by a shape.
///
/// Face axes and edge axes of typical shapes fit inline; larger polytopes
/// spill to the heap.
pub type AxisSet = SmallVec<[UnitVector<Real>; 6]>;

/// Trait implemented by every shape usable by the narrow phase.
///
/// A shape participates through two capabilities rather than a type
/// hierarchy:
///
/// * the support mapping ([`SupportMap`]), consumed by the GJK tester and by
///   the axis-projection step of the SAT tester;
/// * the separating-axis sets ([`Shape::local_face_axes`] and
///   [`Shape::local_edge_axes`]), consumed by the SAT tester. Shapes without
///   polyhedral features (e.g. [`Ball`](crate::shape::Ball)) return empty
///   sets; the testers fall back to the center-to-center direction.
///
/// The trait is also the dynamic-dispatch surface of the collision
/// dispatcher, hence the `DowncastSync` bound: specialized shape-pair
/// routines downcast instead of matching on an enum.
pub trait Shape: SupportMap + DowncastSync {
    /// The AABB of this shape in its local frame.
    fn compute_local_aabb(&self) -> Aabb;

    /// The AABB of this shape at the pose `position`.
    fn compute_aabb(&self, position: &Isometry<Real>) -> Aabb {
        support_map_aabb(position, self)
    }

    /// The face normals of this shape, in its local frame.
    fn local_face_axes(&self) -> AxisSet {
        AxisSet::new()
    }

    /// The edge directions of this shape, in its local frame.
    ///
    /// The SAT tester crosses these pairwise with the other shape's edge
    /// directions to complete the candidate axis set.
    fn local_edge_axes(&self) -> AxisSet {
        AxisSet::new()
    }
}

impl_downcast!(sync Shape);
