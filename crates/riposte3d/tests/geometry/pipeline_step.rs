use riposte3d::dynamics::{ContactResolver, RigidBody};
use riposte3d::math::{Point, Vector};
use riposte3d::pipeline::{BroadPhaseKind, CollisionPipeline, PipelineConfig};
use riposte3d::partitioning::BodyHandle;
use riposte3d::shape::{Ball, Shape};

/// One full step of the intended control flow, against both broad phases:
/// broad phase candidates, narrow phase manifolds, impulse resolution.
#[test]
fn full_step_resolves_the_single_colliding_pair() {
    for kind in [BroadPhaseKind::SweepAndPrune, BroadPhaseKind::Bvh] {
        let mut pipeline = CollisionPipeline::with_config(PipelineConfig {
            broad_phase: kind,
            ..PipelineConfig::default()
        });

        let ball = Ball::new(1.0);
        let mut bodies = vec![
            RigidBody::dynamic(Point::origin(), 1.0),
            RigidBody::dynamic(Point::new(1.5, 0.0, 0.0), 1.0),
            RigidBody::dynamic(Point::new(10.0, 0.0, 0.0), 1.0),
        ];
        bodies[0].linvel = Vector::new(1.0, 0.0, 0.0);
        bodies[1].linvel = Vector::new(-1.0, 0.0, 0.0);

        for (i, body) in bodies.iter().enumerate() {
            pipeline
                .add_object(BodyHandle(i as u32), ball.compute_aabb(&body.pose()))
                .unwrap();
        }

        let pairs = pipeline.candidate_pairs();
        assert_eq!(pairs.len(), 1);

        let mut resolved = 0;
        for pair in &pairs {
            let (h1, h2) = pair.elements();
            let (i1, i2) = (h1.index(), h2.index());

            let result = pipeline
                .solve(&bodies[i1].pose(), &ball, &bodies[i2].pose(), &ball)
                .unwrap();

            if result.is_colliding() {
                let (left, right) = bodies.split_at_mut(i2);
                ContactResolver::new().resolve(&result, &mut left[i1], &mut right[0]);
                resolved += 1;
            }
        }

        assert_eq!(resolved, 1);
        // The approaching pair now separates; the bystander is untouched.
        assert!(bodies[0].linvel.x < 0.0);
        assert!(bodies[1].linvel.x > 0.0);
        assert_eq!(bodies[2].linvel, Vector::zeros());
        assert_eq!(bodies[2].position, Point::new(10.0, 0.0, 0.0));

        // After moving a body, updating its box keeps the index exact.
        pipeline
            .update_object(
                BodyHandle(2),
                ball.compute_aabb(&RigidBody::dynamic(Point::new(0.5, 0.0, 0.0), 1.0).pose()),
            )
            .unwrap();
        assert_eq!(pipeline.candidate_pairs().len(), 3);

        pipeline.clear();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.candidate_pairs().len(), 0);
    }
}
