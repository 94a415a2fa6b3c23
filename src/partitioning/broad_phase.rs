use crate::bounding_volume::Aabb;
use crate::utils::SortedPair;
use std::collections::HashSet;
use thiserror::Error;

/// A stable identifier of the body owning a broad-phase box.
///
/// Handles are allocated by the simulation owning the bodies; the broad
/// phase only stores them. Box identity and equality are defined by this
/// handle, never by geometry: two boxes referencing the same body are the
/// same box.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyHandle(pub u32);

impl BodyHandle {
    /// This handle as an index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A broad-phase box: an AABB plus the handle of its owning body.
#[derive(Copy, Clone, Debug)]
pub struct BroadPhaseProxy {
    /// The owning body.
    pub handle: BodyHandle,
    /// The box bounds, recomputed by the caller whenever the body moves.
    pub aabb: Aabb,
}

impl PartialEq for BroadPhaseProxy {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for BroadPhaseProxy {}

/// Caller contract violations of the broad-phase boundary API.
///
/// These fail fast and loudly, unlike the geometric degeneracies of the
/// narrow phase which silently resolve to "not colliding".
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BroadPhaseError {
    /// The handle is already tracked; equal boxes are never duplicated.
    #[error("object {0:?} is already tracked by this broad-phase")]
    DuplicateObject(BodyHandle),
    /// The handle is not tracked by this broad-phase.
    #[error("object {0:?} is not tracked by this broad-phase")]
    UnknownObject(BodyHandle),
    /// The AABB has non-finite bounds or `mins > maxs` on some axis.
    #[error("malformed AABB: bounds must be finite with mins not exceeding maxs")]
    MalformedAabb,
}

/// The broad-phase contract shared by all implementations.
///
/// After any sequence of `add`/`remove`/`update`, [`BroadPhase::pairs`]
/// reflects exactly the current AABB set: no stale pairs, no missing pairs,
/// and nothing referencing a removed box. The structure is mutated only
/// between simulation steps and queried during a step; the two must not be
/// interleaved.
pub trait BroadPhase {
    /// Starts tracking a box for the given body.
    fn add(&mut self, handle: BodyHandle, aabb: Aabb) -> Result<(), BroadPhaseError>;

    /// Stops tracking the given body's box.
    fn remove(&mut self, handle: BodyHandle) -> Result<(), BroadPhaseError>;

    /// Repositions the given body's box after its AABB changed.
    ///
    /// Other boxes are left untouched.
    fn update(&mut self, handle: BodyHandle, aabb: Aabb) -> Result<(), BroadPhaseError>;

    /// All pairs of boxes currently overlapping on all three axes.
    ///
    /// Pairs are unordered, deduplicated, and never pair a box with itself.
    fn pairs(&self) -> HashSet<SortedPair<BodyHandle>>;

    /// All tracked boxes overlapping the given AABB.
    fn query(&self, aabb: &Aabb) -> Vec<BroadPhaseProxy>;

    /// Removes every tracked box.
    fn clear(&mut self);

    /// The number of tracked boxes.
    fn len(&self) -> usize;

    /// Is no box tracked?
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Rejects AABBs violating the broad-phase input contract.
pub(super) fn check_aabb(aabb: &Aabb) -> Result<(), BroadPhaseError> {
    if aabb.is_valid() {
        Ok(())
    } else {
        Err(BroadPhaseError::MalformedAabb)
    }
}
