//! The collision pipeline: an explicit engine context owning one broad
//! phase and one narrow-phase dispatcher.
//!
//! The simulation orchestrator owns a [`CollisionPipeline`] instance and
//! threads it through calls; there is no process-wide singleton, so several
//! independent simulations can coexist. Per step, the intended control flow
//! is:
//!
//! 1. [`CollisionPipeline::update_object`] for every body that moved;
//! 2. [`CollisionPipeline::candidate_pairs`] to prune the pair space;
//! 3. [`CollisionPipeline::solve`] once per candidate pair;
//! 4. a resolver from [`crate::dynamics`] for every colliding result.
//!
//! Everything is synchronous and single-threaded: the structure must be
//! mutated only between steps and queried only within one, never both
//! concurrently. Nothing here blocks or performs I/O.

use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Real};
use crate::partitioning::{
    BodyHandle, BroadPhase, BroadPhaseError, BroadPhaseProxy, Bvh, SweepAndPrune, DEFAULT_MARGIN,
};
use crate::query::{CollisionDispatcher, CollisionResult, DefaultCollisionDispatcher, Unsupported};
use crate::shape::Shape;
use crate::utils::SortedPair;
use std::collections::HashSet;

/// Selects the broad-phase implementation of a pipeline.
///
/// Both strategies honor the same contract and report the same pair sets;
/// they differ in update cost profile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BroadPhaseKind {
    /// Per-axis sorted endpoint lists with incremental repair.
    SweepAndPrune,
    /// A dynamic bounding-volume tree with lazy refits.
    #[default]
    Bvh,
}

/// Configuration of a [`CollisionPipeline`].
#[derive(Copy, Clone, Debug)]
pub struct PipelineConfig {
    /// The broad-phase implementation to instantiate.
    pub broad_phase: BroadPhaseKind,
    /// Fattening margin of BVH leaves; ignored by sweep-and-prune.
    pub bvh_margin: Real,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            broad_phase: BroadPhaseKind::default(),
            bvh_margin: DEFAULT_MARGIN,
        }
    }
}

/// An engine context owning one broad phase and one collision dispatcher.
pub struct CollisionPipeline {
    broad_phase: Box<dyn BroadPhase>,
    dispatcher: Box<dyn CollisionDispatcher>,
}

impl Default for CollisionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionPipeline {
    /// Creates a pipeline with the default configuration and dispatcher.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Creates a pipeline from the given configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        let broad_phase: Box<dyn BroadPhase> = match config.broad_phase {
            BroadPhaseKind::SweepAndPrune => Box::new(SweepAndPrune::new()),
            BroadPhaseKind::Bvh => Box::new(Bvh::with_margin(config.bvh_margin)),
        };

        CollisionPipeline {
            broad_phase,
            dispatcher: Box::new(DefaultCollisionDispatcher),
        }
    }

    /// Replaces the collision dispatcher.
    pub fn with_dispatcher(mut self, dispatcher: Box<dyn CollisionDispatcher>) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// Starts tracking a body's box.
    pub fn add_object(&mut self, handle: BodyHandle, aabb: Aabb) -> Result<(), BroadPhaseError> {
        self.broad_phase.add(handle, aabb)
    }

    /// Stops tracking a body's box.
    pub fn remove_object(&mut self, handle: BodyHandle) -> Result<(), BroadPhaseError> {
        self.broad_phase.remove(handle)
    }

    /// Repositions a body's box after it moved or changed shape.
    pub fn update_object(&mut self, handle: BodyHandle, aabb: Aabb) -> Result<(), BroadPhaseError> {
        self.broad_phase.update(handle, aabb)
    }

    /// All candidate pairs whose boxes currently overlap.
    pub fn candidate_pairs(&self) -> HashSet<SortedPair<BodyHandle>> {
        self.broad_phase.pairs()
    }

    /// All tracked boxes overlapping the given AABB.
    pub fn query(&self, aabb: &Aabb) -> Vec<BroadPhaseProxy> {
        self.broad_phase.query(aabb)
    }

    /// Runs the narrow phase on one candidate pair, in world space.
    ///
    /// Consumed once per candidate pair per step; the result is handed to a
    /// resolver and discarded, never cached across steps.
    pub fn solve(
        &self,
        pos1: &Isometry<Real>,
        g1: &dyn Shape,
        pos2: &Isometry<Real>,
        g2: &dyn Shape,
    ) -> Result<CollisionResult, Unsupported> {
        let pos12 = pos1.inv_mul(pos2);
        self.dispatcher
            .collision(&pos12, g1, g2)
            .map(|result| result.transformed(pos1))
    }

    /// Removes every tracked box.
    pub fn clear(&mut self) {
        self.broad_phase.clear();
    }

    /// The number of tracked boxes.
    pub fn len(&self) -> usize {
        self.broad_phase.len()
    }

    /// Is no box tracked?
    pub fn is_empty(&self) -> bool {
        self.broad_phase.is_empty()
    }
}
