use crate::math::{Isometry, Matrix, Point, Real, Rotation, Translation, Vector};

/// An oriented body with linear and angular state.
///
/// This is the body capability consumed by the rigid
/// [`ContactResolver`](crate::dynamics::ContactResolver): readable pose,
/// velocities and inverse mass properties, and writable velocity/position
/// corrections. The surrounding simulation owns its bodies and integrates
/// them; the collision core never creates, destroys, or integrates one.
#[derive(Clone, Debug)]
pub struct RigidBody {
    /// World-space position of the center of mass.
    pub position: Point<Real>,
    /// World-space orientation.
    pub rotation: Rotation,
    /// Linear velocity.
    pub linvel: Vector<Real>,
    /// Angular velocity.
    pub angvel: Vector<Real>,
    /// Inverse mass; zero for a fixed (infinite-mass) body.
    pub inv_mass: Real,
    /// Inverse inertia tensor in the body's local frame.
    pub inv_inertia_local: Matrix<Real>,
    /// Coefficient of restitution in `[0, 1]`.
    pub restitution: Real,
}

impl RigidBody {
    /// Creates a dynamic body of the given mass at the given position.
    ///
    /// The inertia defaults to that of a unit-radius solid ball of the same
    /// mass; use [`RigidBody::with_inertia`] for other shapes. A zero mass
    /// yields a fixed body.
    pub fn dynamic(position: Point<Real>, mass: Real) -> Self {
        let inv_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
        let inertia = 0.4 * mass;
        let inv_inertia_local = if inertia > 0.0 {
            Matrix::identity() / inertia
        } else {
            Matrix::zeros()
        };

        RigidBody {
            position,
            rotation: Rotation::identity(),
            linvel: Vector::zeros(),
            angvel: Vector::zeros(),
            inv_mass,
            inv_inertia_local,
            restitution: 0.3,
        }
    }

    /// Creates a fixed (infinite-mass, never moving) body.
    pub fn fixed(position: Point<Real>) -> Self {
        RigidBody {
            position,
            rotation: Rotation::identity(),
            linvel: Vector::zeros(),
            angvel: Vector::zeros(),
            inv_mass: 0.0,
            inv_inertia_local: Matrix::zeros(),
            restitution: 0.3,
        }
    }

    /// Replaces the local inverse inertia tensor.
    pub fn with_inertia(mut self, inv_inertia_local: Matrix<Real>) -> Self {
        self.inv_inertia_local = inv_inertia_local;
        self
    }

    /// Replaces the restitution coefficient.
    pub fn with_restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    /// Is this body fixed (infinite mass)?
    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.inv_mass == 0.0
    }

    /// The pose of this body as an isometry.
    #[inline]
    pub fn pose(&self) -> Isometry<Real> {
        Isometry::from_parts(Translation::from(self.position.coords), self.rotation)
    }

    /// The inverse inertia tensor expressed in the world frame.
    #[inline]
    pub fn inv_inertia_world(&self) -> Matrix<Real> {
        let rot = self.rotation.to_rotation_matrix();
        rot * self.inv_inertia_local * rot.transpose()
    }

    /// The velocity of the material point of this body at the world-space
    /// point `pt`.
    #[inline]
    pub fn velocity_at_point(&self, pt: &Point<Real>) -> Vector<Real> {
        self.linvel + self.angvel.cross(&(pt - self.position))
    }

    /// Applies an impulse at the center of mass.
    #[inline]
    pub fn apply_impulse(&mut self, impulse: Vector<Real>) {
        self.linvel += impulse * self.inv_mass;
    }

    /// Applies an impulse at the world-space point `pt`, affecting both the
    /// linear and the angular velocity.
    pub fn apply_impulse_at_point(&mut self, impulse: Vector<Real>, pt: &Point<Real>) {
        if self.is_fixed() {
            return;
        }

        self.linvel += impulse * self.inv_mass;
        let torque = (pt - self.position).cross(&impulse);
        self.angvel += self.inv_inertia_world() * torque;
    }

    /// Translates this body by `delta` (positional correction).
    #[inline]
    pub fn translate(&mut self, delta: Vector<Real>) {
        self.position += delta;
    }
}
