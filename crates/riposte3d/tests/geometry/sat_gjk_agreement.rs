use riposte3d::math::{Isometry, Point, Vector};
use riposte3d::na;
use riposte3d::query::{collision, gjk};
use riposte3d::shape::Cuboid;

/// Builds the cuboid and pose equivalent to an axis-aligned box given by its
/// corners.
fn cuboid_from_corners(mins: [f32; 3], maxs: [f32; 3]) -> (Cuboid, Isometry<f32>) {
    let mins = Point::from(mins);
    let maxs = Point::from(maxs);
    let center = na::center(&mins, &maxs);
    let cuboid = Cuboid::new((maxs - mins) * 0.5);
    (cuboid, Isometry::translation(center.x, center.y, center.z))
}

#[test]
fn overlapping_flat_boxes_collide() {
    let (c1, pos1) = cuboid_from_corners([0.0, 0.0, 0.0], [2.0, 2.0, 0.0]);
    let (c2, pos2) = cuboid_from_corners([1.0, 1.0, 0.0], [3.0, 3.0, 0.0]);

    let result = collision(&pos1, &c1, &pos2, &c2);
    assert!(result.is_colliding());
    assert!(result.depth() >= 0.0);
}

#[test]
fn distant_boxes_do_not_collide() {
    let (c1, pos1) = cuboid_from_corners([-5.0, -5.0, 0.0], [-1.0, -1.0, 0.0]);
    let (c2, pos2) = cuboid_from_corners([1.0, 1.0, 0.0], [3.0, 3.0, 0.0]);

    let result = collision(&pos1, &c1, &pos2, &c2);
    assert!(!result.is_colliding());
    assert_eq!(result.depth(), 0.0);
    assert!(result.contacts().is_empty());
}

#[test]
fn sat_positive_depth_implies_gjk_overlap() {
    let c1 = Cuboid::new(Vector::new(1.0, 0.8, 0.6));
    let c2 = Cuboid::new(Vector::new(0.7, 1.1, 0.9));

    // Sample relative poses, some colliding and some not; wherever the full
    // narrow phase reports a positive depth, the GJK tester must agree that
    // the shapes overlap. (The converse is not required: at exact tangency
    // the two testers may disagree, an accepted boundary ambiguity.)
    let mut rng = oorandom::Rand32::new(7);
    for _ in 0..200 {
        let translation = Vector::new(
            rng.rand_float() * 6.0 - 3.0,
            rng.rand_float() * 6.0 - 3.0,
            rng.rand_float() * 6.0 - 3.0,
        );
        let axisangle = Vector::new(
            rng.rand_float() * 2.0,
            rng.rand_float() * 2.0,
            rng.rand_float() * 2.0,
        );
        let pos12 = Isometry::new(translation, axisangle);

        let result = collision(&Isometry::identity(), &c1, &pos12, &c2);
        if result.is_colliding() && result.depth() > 0.0 {
            assert!(
                gjk::intersection_test(&pos12, &c1, &c2),
                "SAT found depth {} but GJK disagrees at {:?}",
                result.depth(),
                pos12
            );
        }
    }
}
