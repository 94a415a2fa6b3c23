use crate::math::{Point, Real, Vector};

/// A point-mass body.
///
/// The particle capability consumed by the
/// [`ParticleContactResolver`](crate::dynamics::ParticleContactResolver):
/// readable position, velocity and inverse mass, writable corrections.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// World-space position.
    pub position: Point<Real>,
    /// Linear velocity.
    pub velocity: Vector<Real>,
    /// Inverse mass; zero for a fixed particle.
    pub inv_mass: Real,
}

impl Particle {
    /// Creates a dynamic particle of the given mass at the given position.
    ///
    /// A zero mass yields a fixed particle.
    pub fn dynamic(position: Point<Real>, mass: Real) -> Self {
        Particle {
            position,
            velocity: Vector::zeros(),
            inv_mass: if mass > 0.0 { 1.0 / mass } else { 0.0 },
        }
    }

    /// Creates a fixed (infinite-mass) particle.
    pub fn fixed(position: Point<Real>) -> Self {
        Particle {
            position,
            velocity: Vector::zeros(),
            inv_mass: 0.0,
        }
    }

    /// Is this particle fixed (infinite mass)?
    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.inv_mass == 0.0
    }
}
