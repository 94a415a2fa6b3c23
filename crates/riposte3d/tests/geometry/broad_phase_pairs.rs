use riposte3d::bounding_volume::Aabb;
use riposte3d::math::Point;
use riposte3d::partitioning::{BodyHandle, BroadPhase, Bvh, SweepAndPrune};

fn aabb(mins: [f32; 3], maxs: [f32; 3]) -> Aabb {
    Aabb::new(Point::from(mins), Point::from(maxs))
}

/// The pair-set cardinality must be invariant to the broad-phase
/// implementation choice, over a scene mixing clusters, isolated boxes and
/// a long thin box crossing a cluster.
#[test]
fn pair_count_invariant_to_implementation() {
    let boxes = [
        aabb([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]),
        aabb([1.0, 1.0, 1.0], [3.0, 3.0, 3.0]),
        aabb([2.5, 2.5, 2.5], [4.0, 4.0, 4.0]),
        aabb([-10.0, 0.0, 0.0], [-8.0, 2.0, 2.0]),
        aabb([-1.0, 0.5, 0.5], [3.5, 1.0, 1.0]),
        aabb([50.0, 50.0, 50.0], [51.0, 51.0, 51.0]),
    ];

    let mut sap = SweepAndPrune::new();
    let mut bvh = Bvh::new();
    for (i, aabb) in boxes.iter().enumerate() {
        sap.add(BodyHandle(i as u32), *aabb).unwrap();
        bvh.add(BodyHandle(i as u32), *aabb).unwrap();
    }

    let sap_pairs = sap.pairs();
    let bvh_pairs = bvh.pairs();
    assert_eq!(sap_pairs.len(), bvh_pairs.len());
    assert_eq!(sap_pairs, bvh_pairs);
}

/// Add-all then remove-all of the same set round-trips to the empty set.
#[test]
fn round_trip_leaves_no_pairs() {
    let handles: Vec<_> = (0..20u32).map(BodyHandle).collect();

    let run = |bp: &mut dyn BroadPhase| {
        for &handle in &handles {
            let offset = handle.0 as f32 * 0.5;
            bp.add(handle, aabb([offset, 0.0, 0.0], [offset + 1.0, 1.0, 1.0]))
                .unwrap();
        }
        assert!(!bp.pairs().is_empty());

        for &handle in &handles {
            bp.remove(handle).unwrap();
        }
        assert!(bp.pairs().is_empty());
        assert!(bp.is_empty());
    };

    run(&mut SweepAndPrune::new());
    run(&mut Bvh::new());
}
