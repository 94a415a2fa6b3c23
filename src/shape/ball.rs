use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::{Shape, SupportMap};

/// A ball shape, defined by its radius, centered at the origin of its local
/// frame.
#[derive(PartialEq, Debug, Copy, Clone)]
#[repr(C)]
pub struct Ball {
    /// The radius of the ball.
    pub radius: Real,
}

impl Ball {
    /// Creates a new ball with the given radius.
    pub fn new(radius: Real) -> Ball {
        Ball { radius }
    }
}

impl SupportMap for Ball {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let dir = dir
            .try_normalize(crate::math::DEFAULT_EPSILON)
            .unwrap_or_else(Vector::x);
        Point::from(dir * self.radius)
    }
}

impl Shape for Ball {
    fn compute_local_aabb(&self) -> Aabb {
        let half_extents = Vector::repeat(self.radius);
        Aabb::new(Point::from(-half_extents), Point::from(half_extents))
    }

    fn compute_aabb(&self, position: &Isometry<Real>) -> Aabb {
        // Rotation-invariant: only the translation matters.
        let center = Point::from(position.translation.vector);
        Aabb::from_half_extents(center, Vector::repeat(self.radius))
    }
}
