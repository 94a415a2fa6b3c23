//! Sweep-and-prune broad phase.

use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::DIM;
use crate::partitioning::broad_phase::check_aabb;
use crate::partitioning::{BodyHandle, BroadPhase, BroadPhaseError, BroadPhaseProxy};
use crate::utils::{FloatKey, SortedPair};
use slab::Slab;
use std::collections::{HashMap, HashSet};

/// A sorted marker on one axis: the min or max boundary of one box's
/// interval on that axis.
///
/// The scalar boundary value is stored as an order-preserving integer key
/// ([`FloatKey`]), so endpoint comparisons are integer comparisons with an
/// identical total order on every platform. At equal key, a "min" endpoint
/// sorts before a "max" endpoint, so a box opening at the exact value where
/// another closes still registers as a candidate (shared boundaries are
/// conservative, consistently with [`Aabb::intersects`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Endpoint {
    key: FloatKey,
    /// Packed owner: `box_id << 1 | is_max`.
    data: u32,
}

impl Endpoint {
    #[inline]
    fn min(key: FloatKey, box_id: u32) -> Self {
        Endpoint {
            key,
            data: box_id << 1,
        }
    }

    #[inline]
    fn max(key: FloatKey, box_id: u32) -> Self {
        Endpoint {
            key,
            data: (box_id << 1) | 1,
        }
    }

    #[inline]
    fn box_id(self) -> u32 {
        self.data >> 1
    }

    #[inline]
    fn is_max(self) -> bool {
        self.data & 1 == 1
    }
}

impl PartialOrd for Endpoint {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Endpoint {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Min endpoints precede max endpoints at equal value; the owner id
        // only disambiguates fully-equal keys.
        (self.key, self.is_max(), self.box_id()).cmp(&(
            other.key,
            other.is_max(),
            other.box_id(),
        ))
    }
}

struct SapBox {
    proxy: BroadPhaseProxy,
    /// Position of this box's `[min, max]` endpoints in each axis array.
    endpoints: [[usize; 2]; DIM],
}

/// Sweep-and-prune broad phase.
///
/// Maintains, per axis, the sorted sequence of the interval endpoints of
/// every tracked box. Because motion between steps is typically small, the
/// sequences stay nearly sorted across updates and an insertion-sort pass
/// repairs them in close to linear time; this incremental repair is what
/// makes sweep-and-prune cheaper than re-examining all pairs.
pub struct SweepAndPrune {
    boxes: Slab<SapBox>,
    axes: [Vec<Endpoint>; DIM],
    handles: HashMap<BodyHandle, u32>,
}

impl Default for SweepAndPrune {
    fn default() -> Self {
        Self::new()
    }
}

impl SweepAndPrune {
    /// Creates an empty sweep-and-prune broad phase.
    pub fn new() -> Self {
        SweepAndPrune {
            boxes: Slab::new(),
            axes: [Vec::new(), Vec::new(), Vec::new()],
            handles: HashMap::new(),
        }
    }

    /// Repairs the ordering of one axis with an insertion-sort pass, then
    /// refreshes the endpoint positions recorded by the boxes.
    ///
    /// Nearly-sorted input makes this O(n + inversions).
    fn sort_axis(&mut self, d: usize) {
        let axis = &mut self.axes[d];

        for i in 1..axis.len() {
            let mut j = i;
            while j > 0 && axis[j] < axis[j - 1] {
                axis.swap(j, j - 1);
                j -= 1;
            }
        }

        for (i, ep) in axis.iter().enumerate() {
            self.boxes[ep.box_id() as usize].endpoints[d][ep.is_max() as usize] = i;
        }
    }

    fn box_id(&self, handle: BodyHandle) -> Result<u32, BroadPhaseError> {
        self.handles
            .get(&handle)
            .copied()
            .ok_or(BroadPhaseError::UnknownObject(handle))
    }
}

impl BroadPhase for SweepAndPrune {
    fn add(&mut self, handle: BodyHandle, aabb: Aabb) -> Result<(), BroadPhaseError> {
        check_aabb(&aabb)?;
        if self.handles.contains_key(&handle) {
            return Err(BroadPhaseError::DuplicateObject(handle));
        }

        let id = self.boxes.insert(SapBox {
            proxy: BroadPhaseProxy { handle, aabb },
            endpoints: [[0; 2]; DIM],
        }) as u32;
        let _ = self.handles.insert(handle, id);

        for d in 0..DIM {
            self.axes[d].push(Endpoint::min(FloatKey::new(aabb.mins[d]), id));
            self.axes[d].push(Endpoint::max(FloatKey::new(aabb.maxs[d]), id));
            self.sort_axis(d);
        }

        Ok(())
    }

    fn remove(&mut self, handle: BodyHandle) -> Result<(), BroadPhaseError> {
        let id = self.box_id(handle)?;
        let _ = self.handles.remove(&handle);

        for d in 0..DIM {
            let [mut lo, mut hi] = self.boxes[id as usize].endpoints[d];
            if lo > hi {
                std::mem::swap(&mut lo, &mut hi);
            }
            // Remove the higher position first so the lower one stays valid.
            let _ = self.axes[d].remove(hi);
            let _ = self.axes[d].remove(lo);
        }

        let _ = self.boxes.remove(id as usize);

        for d in 0..DIM {
            // Positions shifted; refresh every box's records on this axis.
            let axis = &self.axes[d];
            for (i, ep) in axis.iter().enumerate() {
                self.boxes[ep.box_id() as usize].endpoints[d][ep.is_max() as usize] = i;
            }
        }

        Ok(())
    }

    fn update(&mut self, handle: BodyHandle, aabb: Aabb) -> Result<(), BroadPhaseError> {
        check_aabb(&aabb)?;
        let id = self.box_id(handle)? as usize;

        self.boxes[id].proxy.aabb = aabb;
        for d in 0..DIM {
            let [min_pos, max_pos] = self.boxes[id].endpoints[d];
            self.axes[d][min_pos].key = FloatKey::new(aabb.mins[d]);
            self.axes[d][max_pos].key = FloatKey::new(aabb.maxs[d]);
            self.sort_axis(d);
        }

        Ok(())
    }

    fn pairs(&self) -> HashSet<SortedPair<BodyHandle>> {
        let mut out = HashSet::new();
        let mut active: Vec<u32> = Vec::new();

        // Sweep the x axis; the active set holds the boxes whose x interval
        // contains the sweep line. Full 3-axis overlap is confirmed on the
        // stored AABBs before a pair is reported.
        for ep in &self.axes[0] {
            let id = ep.box_id();
            if ep.is_max() {
                active.retain(|&other| other != id);
            } else {
                let sap_box = &self.boxes[id as usize];
                for &other in &active {
                    let other_box = &self.boxes[other as usize];
                    if sap_box.proxy.aabb.intersects(&other_box.proxy.aabb) {
                        let _ = out.insert(SortedPair::new(
                            sap_box.proxy.handle,
                            other_box.proxy.handle,
                        ));
                    }
                }
                active.push(id);
            }
        }

        out
    }

    fn query(&self, aabb: &Aabb) -> Vec<BroadPhaseProxy> {
        self.boxes
            .iter()
            .filter(|(_, sap_box)| sap_box.proxy.aabb.intersects(aabb))
            .map(|(_, sap_box)| sap_box.proxy)
            .collect()
    }

    fn clear(&mut self) {
        self.boxes.clear();
        self.handles.clear();
        for axis in &mut self.axes {
            axis.clear();
        }
    }

    fn len(&self) -> usize {
        self.handles.len()
    }
}
