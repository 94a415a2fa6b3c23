use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, UnitVector, Vector, DIM};
use crate::shape::{AxisSet, Shape, SupportMap};

/// A cuboid shape, defined by its half-extents, centered at the origin of
/// its local frame and aligned with its local axes.
#[derive(PartialEq, Debug, Copy, Clone)]
#[repr(C)]
pub struct Cuboid {
    /// The half-extents (half-width along each local axis) of the cuboid.
    pub half_extents: Vector<Real>,
}

impl Cuboid {
    /// Creates a new cuboid from its half-extents.
    pub fn new(half_extents: Vector<Real>) -> Cuboid {
        Cuboid { half_extents }
    }
}

impl SupportMap for Cuboid {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        self.half_extents.zip_map(dir, |he, d| he.copysign(d)).into()
    }
}

impl Shape for Cuboid {
    fn compute_local_aabb(&self) -> Aabb {
        Aabb::new(
            Point::from(-self.half_extents),
            Point::from(self.half_extents),
        )
    }

    fn local_face_axes(&self) -> AxisSet {
        (0..DIM)
            .map(|i| UnitVector::new_unchecked(Vector::ith(i, 1.0)))
            .collect()
    }

    fn local_edge_axes(&self) -> AxisSet {
        // For a cuboid the edge directions coincide with the face normals.
        self.local_face_axes()
    }
}
