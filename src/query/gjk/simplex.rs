use crate::math::{Real, Vector};
use arrayvec::ArrayVec;

/// A simplex of 1 to 4 vertices of the Minkowski difference of two shapes.
///
/// The GJK loop grows and shrinks this simplex while steering it toward the
/// origin. The most recently added vertex is always the last element.
#[derive(Clone, Debug, Default)]
pub struct Simplex {
    points: ArrayVec<Vector<Real>, 4>,
}

impl Simplex {
    /// Creates an empty simplex.
    pub fn new() -> Self {
        Simplex {
            points: ArrayVec::new(),
        }
    }

    /// Adds a vertex to this simplex.
    ///
    /// The simplex must not already hold 4 vertices.
    #[inline]
    pub fn push(&mut self, pt: Vector<Real>) {
        self.points.push(pt);
    }

    /// The number of vertices of this simplex.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.points.len()
    }

    /// The `i`-th vertex of this simplex.
    #[inline]
    pub fn point(&self, i: usize) -> Vector<Real> {
        self.points[i]
    }

    /// Replaces the content of this simplex by the given vertices.
    ///
    /// The most recently added vertex must come last.
    #[inline]
    pub fn rebuild<const N: usize>(&mut self, pts: [Vector<Real>; N]) {
        self.points.clear();
        self.points.extend(pts);
    }
}
