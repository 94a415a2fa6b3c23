use crate::dynamics::RigidBody;
use crate::math::{Real, Vector, DEFAULT_EPSILON};
use crate::query::CollisionResult;

/// Impulse-based contact resolution for rigid bodies.
///
/// For every contact point of a manifold, the resolver computes the relative
/// velocity along the contact normal, derives an impulse magnitude from the
/// bodies' inverse mass properties and restitution, and applies
/// equal-and-opposite impulses. A positional correction proportional to the
/// remaining depth then removes residual interpenetration. Separating
/// contacts receive no impulse, so resting stacks do not gain energy.
#[derive(Clone, Copy, Debug)]
pub struct ContactResolver {
    /// Penetration below this threshold is tolerated without positional
    /// correction, avoiding jitter on resting contacts.
    pub penetration_slop: Real,
    /// Fraction of the remaining penetration corrected per resolution.
    pub correction_factor: Real,
}

impl Default for ContactResolver {
    fn default() -> Self {
        ContactResolver {
            penetration_slop: 0.005,
            correction_factor: 0.5,
        }
    }
}

impl ContactResolver {
    /// Creates a resolver with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves one manifold between two bodies.
    ///
    /// The manifold's normal must point from `b1` toward `b2`, as produced
    /// by [`query::collision`](crate::query::collision). Non-colliding
    /// results and fixed-fixed pairs are no-ops.
    pub fn resolve(&self, result: &CollisionResult, b1: &mut RigidBody, b2: &mut RigidBody) {
        if !result.is_colliding() {
            return;
        }

        let total_inv_mass = b1.inv_mass + b2.inv_mass;
        if total_inv_mass <= DEFAULT_EPSILON {
            return;
        }

        let normal = result.normal().into_inner();

        for pt in result.contacts() {
            let r1 = pt - b1.position;
            let r2 = pt - b2.position;

            let relative_velocity = b2.velocity_at_point(pt) - b1.velocity_at_point(pt);
            let normal_velocity = relative_velocity.dot(&normal);
            if normal_velocity > 0.0 {
                // Already separating at this point.
                continue;
            }

            let restitution = b1.restitution.min(b2.restitution);

            let angular_term = |body: &RigidBody, r: &Vector<Real>| {
                (body.inv_inertia_world() * r.cross(&normal))
                    .cross(r)
                    .dot(&normal)
            };
            let effective_mass =
                total_inv_mass + angular_term(b1, &r1) + angular_term(b2, &r2);
            if effective_mass <= DEFAULT_EPSILON {
                continue;
            }

            let impulse_magnitude = -(1.0 + restitution) * normal_velocity / effective_mass;
            let impulse = normal * impulse_magnitude;

            b1.apply_impulse_at_point(-impulse, pt);
            b2.apply_impulse_at_point(impulse, pt);
        }

        // Positional correction: split the residual depth between the bodies
        // proportionally to their relative inverse masses.
        let correction_magnitude = (result.depth() - self.penetration_slop).max(0.0)
            / total_inv_mass
            * self.correction_factor;
        let correction = normal * correction_magnitude;

        b1.translate(-correction * b1.inv_mass);
        b2.translate(correction * b2.inv_mass);
    }
}
