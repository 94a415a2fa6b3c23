use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, UnitVector, Vector};
use crate::shape::{AxisSet, Shape, SupportMap};
use na::Unit;

/// A convex polytope given by its vertices and its candidate separating
/// axes.
///
/// The vertices are assumed to describe a convex set; convex-hull
/// construction is not performed here. The face normals and edge directions
/// are provided by the caller (typically alongside the hull they were
/// extracted from) and are normalized at construction time.
#[derive(PartialEq, Debug, Clone)]
pub struct ConvexPolytope {
    points: Vec<Point<Real>>,
    face_axes: Vec<UnitVector<Real>>,
    edge_axes: Vec<UnitVector<Real>>,
}

impl ConvexPolytope {
    /// Attempts to create a new convex polytope from its vertices and axes.
    ///
    /// Returns `None` if `points` is empty. Axis directions too short to be
    /// normalized are dropped silently; a polytope may legitimately end up
    /// with no axes at all (a single point), in which case the SAT tester
    /// falls back to the center-to-center direction.
    pub fn try_new(
        points: Vec<Point<Real>>,
        face_axes: Vec<Vector<Real>>,
        edge_axes: Vec<Vector<Real>>,
    ) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let normalize = |axes: Vec<Vector<Real>>| {
            axes.into_iter()
                .filter_map(|axis| Unit::try_new(axis, crate::math::DEFAULT_EPSILON))
                .collect::<Vec<_>>()
        };

        Some(ConvexPolytope {
            points,
            face_axes: normalize(face_axes),
            edge_axes: normalize(edge_axes),
        })
    }

    /// The vertices of this polytope.
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
    }
}

impl SupportMap for ConvexPolytope {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let mut best = self.points[0];
        let mut best_dot = best.coords.dot(dir);

        for pt in &self.points[1..] {
            let dot = pt.coords.dot(dir);
            if dot > best_dot {
                best_dot = dot;
                best = *pt;
            }
        }

        best
    }
}

impl Shape for ConvexPolytope {
    fn compute_local_aabb(&self) -> Aabb {
        Aabb::from_points(&self.points)
    }

    fn local_face_axes(&self) -> AxisSet {
        self.face_axes.iter().copied().collect()
    }

    fn local_edge_axes(&self) -> AxisSet {
        self.edge_axes.iter().copied().collect()
    }
}
