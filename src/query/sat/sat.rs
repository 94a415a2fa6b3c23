//! The Separating Axis Theorem test.
//!
//! For two convex shapes, a finite candidate axis set suffices to decide
//! intersection exactly: the face normals of each shape, plus the pairwise
//! cross products of their edge directions. If some candidate axis yields
//! disjoint projection intervals, the shapes are separated and the test
//! terminates early. Otherwise the axis with the smallest overlap is the
//! contact normal and that overlap is the penetration depth.

use crate::math::{Isometry, Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::shape::{Shape, SupportMap};
use na::Unit;
use num::Bounded;
use smallvec::SmallVec;

/// Projects a shape onto `axis`, given its pose relative to the projection
/// frame. Returns the `(min, max)` interval.
#[inline]
fn project_onto_axis(
    pos: Option<&Isometry<Real>>,
    g: &dyn Shape,
    axis: &UnitVector<Real>,
) -> (Real, Real) {
    match pos {
        None => {
            let max = g.local_support_point_toward(axis).coords.dot(axis);
            let min = g.local_support_point_toward(&-*axis).coords.dot(axis);
            (min, max)
        }
        Some(pos) => {
            let max = g.support_point_toward(pos, axis).coords.dot(axis);
            let min = g.support_point_toward(pos, &-*axis).coords.dot(axis);
            (min, max)
        }
    }
}

/// Collects the candidate separating axes for the pair `(g1, pos12 · g2)`,
/// expressed in the local frame of `g1`.
fn candidate_axes(
    pos12: &Isometry<Real>,
    g1: &dyn Shape,
    g2: &dyn Shape,
) -> SmallVec<[UnitVector<Real>; 16]> {
    let mut axes = SmallVec::new();

    axes.extend(g1.local_face_axes());
    axes.extend(
        g2.local_face_axes()
            .into_iter()
            .map(|axis| Unit::new_unchecked(pos12 * axis.into_inner())),
    );

    let edges1 = g1.local_edge_axes();
    let edges2 = g2.local_edge_axes();
    for e1 in &edges1 {
        for e2 in &edges2 {
            let cross = e1.cross(&(pos12 * e2.into_inner()));
            // Parallel edge pairs contribute no new axis.
            if let Some(axis) = Unit::try_new(cross, DEFAULT_EPSILON) {
                axes.push(axis);
            }
        }
    }

    if axes.is_empty() {
        // Neither shape exposes polyhedral features (e.g. two balls): fall
        // back to the center-to-center direction.
        let centers = pos12.translation.vector;
        let fallback =
            Unit::try_new(centers, DEFAULT_EPSILON).unwrap_or_else(Vector::x_axis);
        axes.push(fallback);
    }

    axes
}

/// Finds the axis of minimum overlap between two posed shapes, in the local
/// frame of the first.
///
/// Returns `None` if some candidate axis separates the shapes. Otherwise the
/// returned axis points from the first shape toward the second, and the
/// scalar is the (non-negative) penetration depth along it.
pub fn find_local_separating_axis(
    pos12: &Isometry<Real>,
    g1: &dyn Shape,
    g2: &dyn Shape,
) -> Option<(UnitVector<Real>, Real)> {
    let mut best_overlap = Real::max_value();
    let mut best_axis = Vector::x_axis();

    for axis in candidate_axes(pos12, g1, g2) {
        let (min1, max1) = project_onto_axis(None, g1, &axis);
        let (min2, max2) = project_onto_axis(Some(pos12), g2, &axis);

        let overlap = max1.min(max2) - min1.max(min2);
        if overlap < 0.0 {
            // A separating axis: early out, the shapes do not intersect.
            return None;
        }

        if overlap < best_overlap {
            best_overlap = overlap;
            best_axis = axis;
        }
    }

    // Orient the normal from the first shape toward the second.
    if best_axis.dot(&pos12.translation.vector) < 0.0 {
        best_axis = -best_axis;
    }

    Some((best_axis, best_overlap))
}

/// SAT test between two posed shapes exposing support mappings and candidate
/// axes. Alias of [`find_local_separating_axis`] following the
/// `[operation]_[shape1]_[shape2]` naming used by the `details` modules.
pub fn sat_support_map_support_map(
    pos12: &Isometry<Real>,
    g1: &dyn Shape,
    g2: &dyn Shape,
) -> Option<(UnitVector<Real>, Real)> {
    find_local_separating_axis(pos12, g1, g2)
}
