//! Dynamic bounding-volume-hierarchy broad phase.

use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::Real;
use crate::partitioning::broad_phase::check_aabb;
use crate::partitioning::{BodyHandle, BroadPhase, BroadPhaseError, BroadPhaseProxy};
use crate::utils::SortedPair;
use slab::Slab;
use std::collections::{HashMap, HashSet};

const NULL_NODE: u32 = u32::MAX;

/// The default margin added on each side of a leaf's AABB.
///
/// Fattened leaves let a slowly moving box wander without touching the tree:
/// an update whose new tight AABB still fits inside the stored fat volume is
/// a no-op.
pub const DEFAULT_MARGIN: Real = 0.1;

/// A node of the tree. Leaves carry the tracked proxy (tight AABB); internal
/// nodes carry the union of their children's volumes.
#[derive(Clone, Debug)]
struct BvhNode {
    /// Fattened bounds for leaves, children union for internal nodes.
    aabb: Aabb,
    parent: u32,
    left: u32,
    right: u32,
    /// 0 for leaves, `1 + max(children heights)` otherwise.
    height: i32,
    leaf: Option<BroadPhaseProxy>,
}

impl BvhNode {
    #[inline]
    fn is_leaf(&self) -> bool {
        self.leaf.is_some()
    }
}

/// Bounding-volume-hierarchy broad phase.
///
/// A binary tree of bounding volumes: each leaf holds exactly one box, each
/// internal node's volume is the union of its children's. Insertions descend
/// toward the sibling minimizing the surface-area cost, then refit and
/// height-balance the ancestors with local rotations; removals do the
/// opposite surgery. There is no global rebuild: per-frame updates dominate
/// the cost profile of a dynamic simulation, so the tree trades build-time
/// quality for cheap local repair.
pub struct Bvh {
    nodes: Slab<BvhNode>,
    root: u32,
    leaves: HashMap<BodyHandle, u32>,
    margin: Real,
}

impl Default for Bvh {
    fn default() -> Self {
        Self::new()
    }
}

impl Bvh {
    /// Creates an empty tree with the default leaf margin.
    pub fn new() -> Self {
        Self::with_margin(DEFAULT_MARGIN)
    }

    /// Creates an empty tree whose leaves are fattened by `margin` on each
    /// side.
    pub fn with_margin(margin: Real) -> Self {
        Bvh {
            nodes: Slab::new(),
            root: NULL_NODE,
            leaves: HashMap::new(),
            margin: margin.max(0.0),
        }
    }

    fn alloc_leaf(&mut self, proxy: BroadPhaseProxy) -> u32 {
        self.nodes.insert(BvhNode {
            aabb: proxy.aabb.loosened(self.margin),
            parent: NULL_NODE,
            left: NULL_NODE,
            right: NULL_NODE,
            height: 0,
            leaf: Some(proxy),
        }) as u32
    }

    /// Finds the leaf or internal node the new leaf should become a sibling
    /// of, descending toward the smallest surface-area cost.
    fn find_best_sibling(&self, leaf_aabb: &Aabb) -> u32 {
        let mut index = self.root;

        while !self.nodes[index as usize].is_leaf() {
            let node = &self.nodes[index as usize];
            let area = node.aabb.surface_area();
            let combined_area = node.aabb.merged(leaf_aabb).surface_area();

            // Cost of making a new parent for this node and the new leaf.
            let cost = 2.0 * combined_area;
            // Minimum cost of pushing the leaf further down the tree.
            let inheritance = 2.0 * (combined_area - area);

            let child_cost = |child: u32| {
                let child_node = &self.nodes[child as usize];
                let merged_area = child_node.aabb.merged(leaf_aabb).surface_area();
                if child_node.is_leaf() {
                    merged_area + inheritance
                } else {
                    (merged_area - child_node.aabb.surface_area()) + inheritance
                }
            };

            let cost_left = child_cost(node.left);
            let cost_right = child_cost(node.right);

            if cost < cost_left && cost < cost_right {
                break;
            }

            index = if cost_left < cost_right {
                node.left
            } else {
                node.right
            };
        }

        index
    }

    fn insert_leaf(&mut self, leaf: u32) {
        if self.root == NULL_NODE {
            self.root = leaf;
            self.nodes[leaf as usize].parent = NULL_NODE;
            return;
        }

        let leaf_aabb = self.nodes[leaf as usize].aabb;
        let sibling = self.find_best_sibling(&leaf_aabb);

        let old_parent = self.nodes[sibling as usize].parent;
        let new_parent = self.nodes.insert(BvhNode {
            aabb: leaf_aabb.merged(&self.nodes[sibling as usize].aabb),
            parent: old_parent,
            left: sibling,
            right: leaf,
            height: self.nodes[sibling as usize].height + 1,
            leaf: None,
        }) as u32;

        self.nodes[sibling as usize].parent = new_parent;
        self.nodes[leaf as usize].parent = new_parent;

        if old_parent == NULL_NODE {
            self.root = new_parent;
        } else {
            let old_parent_node = &mut self.nodes[old_parent as usize];
            if old_parent_node.left == sibling {
                old_parent_node.left = new_parent;
            } else {
                old_parent_node.right = new_parent;
            }
        }

        self.refit_from(new_parent);
    }

    fn remove_leaf(&mut self, leaf: u32) {
        if leaf == self.root {
            self.root = NULL_NODE;
            return;
        }

        let parent = self.nodes[leaf as usize].parent;
        let grandparent = self.nodes[parent as usize].parent;
        let parent_node = &self.nodes[parent as usize];
        let sibling = if parent_node.left == leaf {
            parent_node.right
        } else {
            parent_node.left
        };

        if grandparent == NULL_NODE {
            self.root = sibling;
            self.nodes[sibling as usize].parent = NULL_NODE;
        } else {
            let grandparent_node = &mut self.nodes[grandparent as usize];
            if grandparent_node.left == parent {
                grandparent_node.left = sibling;
            } else {
                grandparent_node.right = sibling;
            }
            self.nodes[sibling as usize].parent = grandparent;
        }

        let _ = self.nodes.remove(parent as usize);

        if grandparent != NULL_NODE {
            self.refit_from(grandparent);
        }
    }

    /// Walks from `start` up to the root, rebalancing each node and
    /// recomputing its union volume and height.
    fn refit_from(&mut self, start: u32) {
        let mut index = start;

        while index != NULL_NODE {
            index = self.balance(index);

            let node = &self.nodes[index as usize];
            let (left, right, parent) = (node.left, node.right, node.parent);

            let left_node = &self.nodes[left as usize];
            let right_node = &self.nodes[right as usize];
            let aabb = left_node.aabb.merged(&right_node.aabb);
            let height = 1 + left_node.height.max(right_node.height);

            let node = &mut self.nodes[index as usize];
            node.aabb = aabb;
            node.height = height;

            index = parent;
        }
    }

    /// Performs one local rotation if the subtree rooted at `i_a` is
    /// unbalanced by more than one level. Returns the index of the new
    /// subtree root.
    fn balance(&mut self, i_a: u32) -> u32 {
        let a = &self.nodes[i_a as usize];
        if a.is_leaf() || a.height < 2 {
            return i_a;
        }

        let i_b = a.left;
        let i_c = a.right;
        let balance = self.nodes[i_c as usize].height - self.nodes[i_b as usize].height;

        if balance > 1 {
            self.rotate_up(i_a, i_c, i_b)
        } else if balance < -1 {
            self.rotate_up(i_a, i_b, i_c)
        } else {
            i_a
        }
    }

    /// Rotates child `i_c` above its parent `i_a`; `i_other` is the sibling
    /// of `i_c` that stays below `i_a`.
    fn rotate_up(&mut self, i_a: u32, i_c: u32, i_other: u32) -> u32 {
        let i_f = self.nodes[i_c as usize].left;
        let i_g = self.nodes[i_c as usize].right;
        let parent = self.nodes[i_a as usize].parent;

        // `i_c` takes `i_a`'s place.
        self.nodes[i_c as usize].left = i_a;
        self.nodes[i_c as usize].parent = parent;
        self.nodes[i_a as usize].parent = i_c;

        if parent == NULL_NODE {
            self.root = i_c;
        } else {
            let parent_node = &mut self.nodes[parent as usize];
            if parent_node.left == i_a {
                parent_node.left = i_c;
            } else {
                parent_node.right = i_c;
            }
        }

        // The taller grandchild moves up next to `i_a`; the shorter one
        // becomes `i_a`'s child in place of `i_c`.
        let (up, down) = if self.nodes[i_f as usize].height > self.nodes[i_g as usize].height {
            (i_f, i_g)
        } else {
            (i_g, i_f)
        };

        self.nodes[i_c as usize].right = up;
        self.nodes[up as usize].parent = i_c;

        if self.nodes[i_a as usize].left == i_c {
            self.nodes[i_a as usize].left = down;
        } else {
            self.nodes[i_a as usize].right = down;
        }
        self.nodes[down as usize].parent = i_a;

        let down_aabb = self.nodes[down as usize].aabb;
        let other_aabb = self.nodes[i_other as usize].aabb;
        let down_height = self.nodes[down as usize].height;
        let other_height = self.nodes[i_other as usize].height;

        self.nodes[i_a as usize].aabb = down_aabb.merged(&other_aabb);
        self.nodes[i_a as usize].height = 1 + down_height.max(other_height);

        let up_aabb = self.nodes[up as usize].aabb;
        let a_aabb = self.nodes[i_a as usize].aabb;
        let up_height = self.nodes[up as usize].height;
        let a_height = self.nodes[i_a as usize].height;

        self.nodes[i_c as usize].aabb = a_aabb.merged(&up_aabb);
        self.nodes[i_c as usize].height = 1 + a_height.max(up_height);

        i_c
    }

    fn leaf_id(&self, handle: BodyHandle) -> Result<u32, BroadPhaseError> {
        self.leaves
            .get(&handle)
            .copied()
            .ok_or(BroadPhaseError::UnknownObject(handle))
    }

    /// Collects the leaves whose subtree volumes overlap `aabb`.
    fn traverse<'a>(&'a self, aabb: &Aabb, mut visit: impl FnMut(&'a BroadPhaseProxy)) {
        if self.root == NULL_NODE {
            return;
        }

        let mut stack = vec![self.root];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index as usize];
            if !node.aabb.intersects(aabb) {
                continue;
            }

            match &node.leaf {
                Some(proxy) => visit(proxy),
                None => {
                    stack.push(node.left);
                    stack.push(node.right);
                }
            }
        }
    }

    /// Checks the structural invariants of the whole tree: parent/child
    /// links, heights, volume containment, and the leaf registry. Intended
    /// for tests.
    pub fn assert_well_formed(&self) {
        if self.root == NULL_NODE {
            assert!(self.leaves.is_empty());
            assert_eq!(self.nodes.len(), 0);
            return;
        }

        assert_eq!(self.nodes[self.root as usize].parent, NULL_NODE);

        let mut leaf_count = 0;
        let mut stack = vec![self.root];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index as usize];

            if let Some(proxy) = &node.leaf {
                assert_eq!(node.height, 0);
                assert_eq!(node.left, NULL_NODE);
                assert_eq!(node.right, NULL_NODE);
                assert!(node.aabb.contains(&proxy.aabb));
                assert_eq!(self.leaves.get(&proxy.handle), Some(&index));
                leaf_count += 1;
            } else {
                let left = &self.nodes[node.left as usize];
                let right = &self.nodes[node.right as usize];

                assert_eq!(left.parent, index);
                assert_eq!(right.parent, index);
                assert_eq!(node.height, 1 + left.height.max(right.height));
                assert_eq!(node.aabb, left.aabb.merged(&right.aabb));

                stack.push(node.left);
                stack.push(node.right);
            }
        }

        assert_eq!(leaf_count, self.leaves.len());
        assert_eq!(self.nodes.len(), 2 * leaf_count - 1);
    }
}

impl BroadPhase for Bvh {
    fn add(&mut self, handle: BodyHandle, aabb: Aabb) -> Result<(), BroadPhaseError> {
        check_aabb(&aabb)?;
        if self.leaves.contains_key(&handle) {
            return Err(BroadPhaseError::DuplicateObject(handle));
        }

        let leaf = self.alloc_leaf(BroadPhaseProxy { handle, aabb });
        self.insert_leaf(leaf);
        let _ = self.leaves.insert(handle, leaf);
        Ok(())
    }

    fn remove(&mut self, handle: BodyHandle) -> Result<(), BroadPhaseError> {
        let leaf = self.leaf_id(handle)?;
        self.remove_leaf(leaf);
        let _ = self.nodes.remove(leaf as usize);
        let _ = self.leaves.remove(&handle);
        Ok(())
    }

    fn update(&mut self, handle: BodyHandle, aabb: Aabb) -> Result<(), BroadPhaseError> {
        check_aabb(&aabb)?;
        let leaf = self.leaf_id(handle)?;

        let node = &mut self.nodes[leaf as usize];
        let proxy = node.leaf.as_mut().expect("leaf registry points at a leaf");
        proxy.aabb = aabb;

        if node.aabb.contains(&aabb) {
            // Lazy refit: the fattened volume still bounds the new AABB, no
            // tree surgery needed.
            return Ok(());
        }

        log::trace!("BVH leaf for {handle:?} escaped its fattened volume; reinserting");
        self.remove_leaf(leaf);
        self.nodes[leaf as usize].aabb = aabb.loosened(self.margin);
        self.nodes[leaf as usize].parent = NULL_NODE;
        self.insert_leaf(leaf);
        Ok(())
    }

    fn pairs(&self) -> HashSet<SortedPair<BodyHandle>> {
        let mut out = HashSet::new();

        for (&handle, &leaf) in &self.leaves {
            let proxy = self.nodes[leaf as usize]
                .leaf
                .as_ref()
                .expect("leaf registry points at a leaf");
            let tight = proxy.aabb;

            // The tree volumes are fattened supersets of the tight AABBs, so
            // pruning on them is conservative; the final test is tight-tight.
            self.traverse(&tight, |other| {
                if other.handle != handle && tight.intersects(&other.aabb) {
                    let _ = out.insert(SortedPair::new(handle, other.handle));
                }
            });
        }

        out
    }

    fn query(&self, aabb: &Aabb) -> Vec<BroadPhaseProxy> {
        let mut out = Vec::new();
        self.traverse(aabb, |proxy| {
            if proxy.aabb.intersects(aabb) {
                out.push(*proxy);
            }
        });
        out
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.leaves.clear();
        self.root = NULL_NODE;
    }

    fn len(&self) -> usize {
        self.leaves.len()
    }
}
