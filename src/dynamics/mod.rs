//! Bodies and contact resolution.
//!
//! The resolvers consume the manifolds produced by the narrow phase and
//! mutate body velocities and positions so that contacts neither
//! interpenetrate nor inject energy. Bodies are owned by the surrounding
//! simulation; this crate only reads their state and applies corrections.

pub use self::contact_resolver::ContactResolver;
pub use self::particle::Particle;
pub use self::particle_resolver::{Iterations, ParticleContact, ParticleContactResolver};
pub use self::rigid_body::RigidBody;

mod contact_resolver;
mod particle;
mod particle_resolver;
mod rigid_body;
