use crate::dynamics::Particle;
use crate::math::{Real, UnitVector, Vector, DEFAULT_EPSILON};

/// Iteration budget of the particle contact resolver.
///
/// The budget only bounds CPU cost per frame; resolution is single-pass per
/// step and stability comes from the iteration count, not from retries. The
/// variants are unsigned, so an invalid (negative) budget is unrepresentable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Iterations {
    /// Twice the number of contacts submitted for resolution.
    Auto,
    /// An explicit iteration count.
    Fixed(u32),
}

/// One contact between two particles, or between a particle and the fixed
/// environment (`b == None`).
#[derive(Clone, Debug)]
pub struct ParticleContact {
    /// Index of the first particle.
    pub a: usize,
    /// Index of the second particle; `None` for an environment contact.
    pub b: Option<usize>,
    /// Contact normal, pointing in the direction along which `a` separates.
    pub normal: UnitVector<Real>,
    /// Current interpenetration along the normal; updated in place while
    /// sibling contacts are resolved.
    pub penetration: Real,
    /// Coefficient of restitution of this contact.
    pub restitution: Real,
}

impl ParticleContact {
    /// The separating velocity of this contact: negative when the particles
    /// approach each other.
    pub fn separating_velocity(&self, particles: &[Particle]) -> Real {
        let mut relative = particles[self.a].velocity;
        if let Some(b) = self.b {
            relative -= particles[b].velocity;
        }
        relative.dot(&self.normal)
    }

    fn total_inv_mass(&self, particles: &[Particle]) -> Real {
        let mut total = particles[self.a].inv_mass;
        if let Some(b) = self.b {
            total += particles[b].inv_mass;
        }
        total
    }
}

/// Iterative, penetration-priority resolver for particle contacts.
///
/// Each iteration selects the single worst contact — the one with the
/// largest unresolved penetration, or failing that the most negative
/// separating velocity — resolves it (impulse plus interpenetration
/// movement), and folds the movement back into the stored penetration of
/// every other pending contact sharing a particle. One contact per
/// iteration, worst first, with re-evaluation after each resolution: this
/// deliberately trades optimality for guaranteed termination and stability
/// under a limited budget.
#[derive(Copy, Clone, Debug)]
pub struct ParticleContactResolver {
    /// The iteration budget.
    pub iterations: Iterations,
}

impl ParticleContactResolver {
    /// Creates a resolver with the given iteration budget.
    pub fn new(iterations: Iterations) -> Self {
        ParticleContactResolver { iterations }
    }

    /// Creates a resolver with the automatic budget (twice the contact
    /// count).
    pub fn auto() -> Self {
        Self::new(Iterations::Auto)
    }

    /// Resolves the given contacts, mutating particle velocities and
    /// positions. Returns the number of iterations actually used.
    ///
    /// # Panics
    ///
    /// Panics if a contact references a particle index out of bounds: that
    /// is a caller contract violation, not a recoverable geometric
    /// degeneracy.
    pub fn resolve(&self, particles: &mut [Particle], contacts: &mut [ParticleContact]) -> u32 {
        for contact in contacts.iter() {
            assert!(
                contact.a < particles.len() && contact.b.map_or(true, |b| b < particles.len()),
                "particle contact references an out-of-bounds particle"
            );
        }

        let budget = match self.iterations {
            Iterations::Auto => 2 * contacts.len() as u32,
            Iterations::Fixed(n) => n,
        };

        let mut used = 0;
        while used < budget {
            let Some(index) = Self::worst_contact(particles, contacts) else {
                break;
            };

            let (move_a, move_b) = Self::resolve_contact(&contacts[index], particles);

            let (ia, ib) = (contacts[index].a, contacts[index].b);
            contacts[index].penetration = 0.0;

            // Moving the shared particles changed the depth of every other
            // contact involving them.
            for (i, other) in contacts.iter_mut().enumerate() {
                if i == index {
                    continue;
                }

                if other.a == ia {
                    other.penetration -= move_a.dot(&other.normal);
                }
                if Some(other.a) == ib {
                    other.penetration -= move_b.dot(&other.normal);
                }
                if let Some(ob) = other.b {
                    if ob == ia {
                        other.penetration += move_a.dot(&other.normal);
                    }
                    if Some(ob) == ib {
                        other.penetration += move_b.dot(&other.normal);
                    }
                }
            }

            used += 1;
        }

        used
    }

    /// Picks the contact to resolve next: the largest positive penetration,
    /// or the most negative separating velocity when nothing penetrates.
    fn worst_contact(particles: &[Particle], contacts: &[ParticleContact]) -> Option<usize> {
        let mut worst = None;

        let mut worst_penetration = 0.0;
        for (i, contact) in contacts.iter().enumerate() {
            if contact.penetration > worst_penetration {
                worst_penetration = contact.penetration;
                worst = Some(i);
            }
        }
        if worst.is_some() {
            return worst;
        }

        let mut worst_velocity = 0.0;
        for (i, contact) in contacts.iter().enumerate() {
            let velocity = contact.separating_velocity(particles);
            if velocity < worst_velocity {
                worst_velocity = velocity;
                worst = Some(i);
            }
        }
        worst
    }

    /// Resolves one contact: restitution impulse, then interpenetration
    /// movement split by relative inverse mass. Returns the movements
    /// applied to `a` and `b`.
    fn resolve_contact(
        contact: &ParticleContact,
        particles: &mut [Particle],
    ) -> (Vector<Real>, Vector<Real>) {
        let total_inv_mass = contact.total_inv_mass(particles);
        if total_inv_mass <= DEFAULT_EPSILON {
            // Both ends have infinite mass; nothing can move.
            return (Vector::zeros(), Vector::zeros());
        }

        let normal = contact.normal.into_inner();

        let separating = contact.separating_velocity(particles);
        if separating < 0.0 {
            let target = -contact.restitution * separating;
            let impulse_per_inv_mass = normal * ((target - separating) / total_inv_mass);

            let inv_a = particles[contact.a].inv_mass;
            particles[contact.a].velocity += impulse_per_inv_mass * inv_a;
            if let Some(b) = contact.b {
                let inv_b = particles[b].inv_mass;
                particles[b].velocity -= impulse_per_inv_mass * inv_b;
            }
        }

        if contact.penetration <= 0.0 {
            return (Vector::zeros(), Vector::zeros());
        }

        let move_per_inv_mass = normal * (contact.penetration / total_inv_mass);
        let move_a = move_per_inv_mass * particles[contact.a].inv_mass;
        particles[contact.a].position += move_a;

        let move_b = match contact.b {
            Some(b) => {
                let move_b = -move_per_inv_mass * particles[b].inv_mass;
                particles[b].position += move_b;
                move_b
            }
            None => Vector::zeros(),
        };

        (move_a, move_b)
    }
}
