//! Spatial partitioning structures for broad-phase pair pruning.
//!
//! Two interchangeable implementations of the [`BroadPhase`] contract are
//! provided: [`SweepAndPrune`] maintains per-axis sorted endpoint lists, and
//! [`Bvh`] maintains a dynamic bounding-volume tree. Both report the exact
//! same pair set for the same AABB set; they differ only in traversal order
//! and update cost profile.

pub use self::broad_phase::{BodyHandle, BroadPhase, BroadPhaseError, BroadPhaseProxy};
pub use self::bvh::{Bvh, DEFAULT_MARGIN};
pub use self::sap::SweepAndPrune;

mod broad_phase;
mod bvh;
mod sap;

#[cfg(test)]
mod broad_phase_tests;
