use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::partitioning::{BodyHandle, BroadPhase, BroadPhaseError, Bvh, SweepAndPrune};
use crate::utils::SortedPair;
use std::collections::HashSet;

fn aabb(mins: [Real; 3], maxs: [Real; 3]) -> Aabb {
    Aabb::new(Point::from(mins), Point::from(maxs))
}

fn both() -> [Box<dyn BroadPhase>; 2] {
    [Box::new(SweepAndPrune::new()), Box::new(Bvh::new())]
}

/// Five boxes positioned so exactly two pairs overlap: (0, 1) and (2, 3).
fn five_boxes(bp: &mut dyn BroadPhase) {
    bp.add(BodyHandle(0), aabb([0.0, 0.0, 0.0], [2.0, 2.0, 1.0]))
        .unwrap();
    bp.add(BodyHandle(1), aabb([1.0, 1.0, 0.0], [3.0, 3.0, 1.0]))
        .unwrap();
    bp.add(BodyHandle(2), aabb([10.0, 0.0, 0.0], [12.0, 2.0, 1.0]))
        .unwrap();
    bp.add(BodyHandle(3), aabb([11.0, 1.0, 0.0], [13.0, 3.0, 1.0]))
        .unwrap();
    bp.add(BodyHandle(4), aabb([20.0, 20.0, 20.0], [21.0, 21.0, 21.0]))
        .unwrap();
}

#[test]
fn broad_phase_five_boxes_two_pairs() {
    for mut bp in both() {
        five_boxes(bp.as_mut());

        let pairs = bp.pairs();
        assert_eq!(pairs.len(), 2);
        assert!(pairs.contains(&SortedPair::new(BodyHandle(0), BodyHandle(1))));
        assert!(pairs.contains(&SortedPair::new(BodyHandle(2), BodyHandle(3))));

        bp.clear();
        assert_eq!(bp.pairs().len(), 0);
        assert!(bp.is_empty());
    }
}

#[test]
fn broad_phase_add_all_remove_all_round_trip() {
    for mut bp in both() {
        for i in 0..32u32 {
            let center = Point::new((i % 8) as Real, (i / 8) as Real, 0.0);
            bp.add(BodyHandle(i), Aabb::from_half_extents(center, Vector::repeat(0.7)))
                .unwrap();
        }
        assert!(!bp.pairs().is_empty());

        for i in 0..32u32 {
            bp.remove(BodyHandle(i)).unwrap();
        }
        assert_eq!(bp.pairs().len(), 0);
        assert_eq!(bp.len(), 0);
    }
}

#[test]
fn broad_phase_removed_box_never_reported() {
    for mut bp in both() {
        five_boxes(bp.as_mut());
        bp.remove(BodyHandle(1)).unwrap();

        let pairs = bp.pairs();
        assert_eq!(pairs.len(), 1);
        for pair in &pairs {
            assert_ne!(*pair.first(), BodyHandle(1));
            assert_ne!(*pair.second(), BodyHandle(1));
        }
    }
}

#[test]
fn broad_phase_update_grows_pair_set() {
    for mut bp in both() {
        five_boxes(bp.as_mut());
        assert_eq!(bp.pairs().len(), 2);

        // Stretch box 1's max corner until it also reaches boxes 2 and 3.
        bp.update(BodyHandle(1), aabb([1.0, 1.0, 0.0], [11.5, 3.0, 1.0]))
            .unwrap();

        let pairs = bp.pairs();
        assert_eq!(pairs.len(), 4);
        assert!(pairs.contains(&SortedPair::new(BodyHandle(0), BodyHandle(1))));
        assert!(pairs.contains(&SortedPair::new(BodyHandle(1), BodyHandle(2))));
        assert!(pairs.contains(&SortedPair::new(BodyHandle(1), BodyHandle(3))));
        assert!(pairs.contains(&SortedPair::new(BodyHandle(2), BodyHandle(3))));
    }
}

#[test]
fn broad_phase_query_box() {
    for mut bp in both() {
        five_boxes(bp.as_mut());

        let hits = bp.query(&aabb([0.5, 0.5, 0.0], [1.5, 1.5, 1.0]));
        let handles: HashSet<_> = hits.iter().map(|proxy| proxy.handle).collect();
        assert_eq!(handles, [BodyHandle(0), BodyHandle(1)].into_iter().collect());

        let empty = bp.query(&aabb([100.0, 100.0, 100.0], [101.0, 101.0, 101.0]));
        assert!(empty.is_empty());
    }
}

#[test]
fn broad_phase_boundary_errors() {
    for mut bp in both() {
        bp.add(BodyHandle(7), aabb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]))
            .unwrap();

        assert_eq!(
            bp.add(BodyHandle(7), aabb([5.0, 5.0, 5.0], [6.0, 6.0, 6.0])),
            Err(BroadPhaseError::DuplicateObject(BodyHandle(7)))
        );
        assert_eq!(
            bp.remove(BodyHandle(8)),
            Err(BroadPhaseError::UnknownObject(BodyHandle(8)))
        );
        assert_eq!(
            bp.update(BodyHandle(8), aabb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0])),
            Err(BroadPhaseError::UnknownObject(BodyHandle(8)))
        );
        assert_eq!(
            bp.add(BodyHandle(9), aabb([1.0, 0.0, 0.0], [0.0, 1.0, 1.0])),
            Err(BroadPhaseError::MalformedAabb)
        );

        // A failed call leaves the structure untouched.
        assert_eq!(bp.len(), 1);
        assert_eq!(bp.pairs().len(), 0);
    }
}

fn random_aabb(rng: &mut oorandom::Rand32) -> Aabb {
    let center = Point::new(
        rng.rand_float() * 20.0 - 10.0,
        rng.rand_float() * 20.0 - 10.0,
        rng.rand_float() * 20.0 - 10.0,
    );
    let half = Vector::new(
        rng.rand_float() * 1.5 + 0.1,
        rng.rand_float() * 1.5 + 0.1,
        rng.rand_float() * 1.5 + 0.1,
    );
    Aabb::from_half_extents(center, half)
}

#[test]
fn sap_and_bvh_report_identical_pairs_under_churn() {
    let mut rng = oorandom::Rand32::new(42);
    let mut sap = SweepAndPrune::new();
    let mut bvh = Bvh::new();
    let mut alive: Vec<BodyHandle> = Vec::new();
    let mut next_handle = 0u32;

    for step in 0..400 {
        let roll = rng.rand_u32() % 10;

        if roll < 4 || alive.is_empty() {
            let handle = BodyHandle(next_handle);
            next_handle += 1;
            let aabb = random_aabb(&mut rng);
            sap.add(handle, aabb).unwrap();
            bvh.add(handle, aabb).unwrap();
            alive.push(handle);
        } else if roll < 8 {
            let handle = alive[rng.rand_u32() as usize % alive.len()];
            let aabb = random_aabb(&mut rng);
            sap.update(handle, aabb).unwrap();
            bvh.update(handle, aabb).unwrap();
        } else {
            let handle = alive.swap_remove(rng.rand_u32() as usize % alive.len());
            sap.remove(handle).unwrap();
            bvh.remove(handle).unwrap();
        }

        bvh.assert_well_formed();
        assert_eq!(
            sap.pairs(),
            bvh.pairs(),
            "pair sets diverged at churn step {step}"
        );
    }
}

#[test]
fn bvh_lazy_refit_small_motion() {
    let mut bvh = Bvh::with_margin(0.5);
    bvh.add(BodyHandle(0), aabb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]))
        .unwrap();
    bvh.add(BodyHandle(1), aabb([4.0, 0.0, 0.0], [5.0, 1.0, 1.0]))
        .unwrap();

    // Drift within the fattened volume: still exact, still no pair.
    bvh.update(BodyHandle(0), aabb([0.2, 0.0, 0.0], [1.2, 1.0, 1.0]))
        .unwrap();
    bvh.assert_well_formed();
    assert_eq!(bvh.pairs().len(), 0);

    // Large motion forces a reinsertion and creates the pair.
    bvh.update(BodyHandle(0), aabb([3.5, 0.0, 0.0], [4.5, 1.0, 1.0]))
        .unwrap();
    bvh.assert_well_formed();
    assert_eq!(bvh.pairs().len(), 1);
}
