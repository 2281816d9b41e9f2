//! End-to-end simulation scenarios driven through the public API.

use approx::assert_relative_eq;
use kinetix::prelude::*;

fn zero_gravity_world() -> World {
    let mut world = World::new();
    world.set_gravity(Vec3::ZERO);
    world
}

#[test]
fn free_fall_matches_closed_form() {
    let mut world = World::new();
    world.set_fixed_delta_time(1.0);
    let ball = world.add_body(Body::new(Shape::sphere(1.0)).with_mass(1.0));

    world.step();

    let body = world.body(ball).unwrap();
    assert_relative_eq!(body.position.y, -4.905, epsilon = 1e-3);
    assert_relative_eq!(body.velocity.y, -9.81, epsilon = 1e-3);
}

#[test]
fn constant_force_for_one_second() {
    let mut world = zero_gravity_world();
    world.set_fixed_delta_time(1.0);
    let handle = world.add_body(Body::new(Shape::sphere(1.0)).with_mass(1.0));

    world.body_mut(handle).unwrap().apply_force(Vec3::new(10.0, 0.0, 0.0));
    world.step();

    let body = world.body(handle).unwrap();
    assert_relative_eq!(body.position.x, 5.0, epsilon = 1e-5);
    assert_relative_eq!(body.velocity.x, 10.0, epsilon = 1e-5);
}

#[test]
fn constant_torque_spins_up_unit_inertia() {
    let mut world = zero_gravity_world();
    world.set_fixed_delta_time(1.0);
    let handle = world.add_body(Body::new(Shape::sphere(1.0)).with_mass(1.0));

    world.body_mut(handle).unwrap().apply_torque(Vec3::new(0.0, 0.0, 5.0));
    world.step();

    let body = world.body(handle).unwrap();
    assert_relative_eq!(body.angular_velocity.z, 5.0, epsilon = 1e-5);
    assert_relative_eq!(body.orientation.length(), 1.0, epsilon = 1e-5);
}

#[test]
fn forces_on_static_bodies_do_nothing() {
    let mut world = zero_gravity_world();
    world.set_fixed_delta_time(1.0);
    let handle = world.add_body(Body::new(Shape::sphere(1.0)));

    world.body_mut(handle).unwrap().apply_force(Vec3::new(10.0, 0.0, 0.0));
    world.step();

    let body = world.body(handle).unwrap();
    assert_eq!(body.position, Vec3::ZERO);
    assert_eq!(body.velocity, Vec3::ZERO);
}

#[test]
fn head_on_spheres_conserve_momentum_without_gaining_energy() {
    let mut world = zero_gravity_world();
    let a = world.add_body(
        Body::new(Shape::sphere(1.0))
            .with_mass(1.0)
            .with_position(Vec3::new(-2.0, 0.0, 0.0))
            .with_velocity(Vec3::new(5.0, 0.0, 0.0)),
    );
    let b = world.add_body(
        Body::new(Shape::sphere(1.0))
            .with_mass(1.0)
            .with_position(Vec3::new(2.0, 0.0, 0.0))
            .with_velocity(Vec3::new(-5.0, 0.0, 0.0)),
    );

    // two simulated seconds at 60 Hz: approach, collide, separate
    for _ in 0..120 {
        world.step();
    }

    let a = world.body(a).unwrap();
    let b = world.body(b).unwrap();

    assert!(
        a.position.x <= b.position.x,
        "spheres tunnelled: a={} b={}",
        a.position.x,
        b.position.x
    );
    assert!((a.velocity.x + b.velocity.x).abs() < 1e-5, "momentum drifted");
    assert!(a.velocity.x.abs() <= 5.0 + 1e-5, "energy gained");
    assert!(b.velocity.x.abs() <= 5.0 + 1e-5, "energy gained");
}

#[test]
fn engine_clamp_prevents_tunnelling_on_huge_deltas() {
    let mut engine = Engine::new();
    let a = engine.create_sphere(Vec3::new(-2.0, 0.0, 0.0), 1.0, 1.0);
    let b = engine.create_sphere(Vec3::new(2.0, 0.0, 0.0), 1.0, 1.0);
    engine.world_mut().set_gravity(Vec3::ZERO);
    engine.world_mut().body_mut(a).unwrap().velocity = Vec3::new(5.0, 0.0, 0.0);
    engine.world_mut().body_mut(b).unwrap().velocity = Vec3::new(-5.0, 0.0, 0.0);

    // a one-second wall delta is clamped and substepped instead of being
    // integrated in one leap
    engine.update(1.0);

    let a = engine.world().body(a).unwrap();
    let b = engine.world().body(b).unwrap();
    assert!(a.position.x <= b.position.x);
}

#[test]
fn orientations_stay_unit_length_under_spin() {
    let mut world = zero_gravity_world();
    let handle = world.add_body(
        Body::new(Shape::oriented_cuboid(Vec3::splat(0.5))).with_mass(1.0),
    );

    world.body_mut(handle).unwrap().apply_torque(Vec3::new(3.0, 7.0, -2.0));
    for _ in 0..600 {
        world.step();
    }

    let q = world.body(handle).unwrap().orientation;
    assert_relative_eq!(q.length(), 1.0, epsilon = 1e-5);
}

#[test]
fn static_bodies_are_bit_stable_across_steps() {
    let mut world = World::new();
    let floor = world.add_body(
        Body::new(Shape::cuboid(Vec3::new(10.0, 0.5, 10.0)))
            .with_position(Vec3::new(0.0, -0.5, 0.0)),
    );
    world.add_body(
        Body::new(Shape::cuboid(Vec3::splat(0.5)))
            .with_mass(1.0)
            .with_position(Vec3::new(0.0, 2.0, 0.0)),
    );

    for _ in 0..600 {
        world.step();
        let body = world.body(floor).unwrap();
        assert_eq!(body.position, Vec3::new(0.0, -0.5, 0.0));
        assert_eq!(body.velocity, Vec3::ZERO);
    }
}

#[test]
fn box_rests_on_the_floor() {
    let mut world = World::new();
    world.add_body(
        Body::new(Shape::cuboid(Vec3::new(10.0, 0.5, 10.0)))
            .with_position(Vec3::new(0.0, -0.5, 0.0)),
    );
    let crate_ = world.add_body(
        Body::new(Shape::cuboid(Vec3::splat(0.5)))
            .with_mass(1.0)
            .with_position(Vec3::new(0.0, 3.0, 0.0)),
    );

    for _ in 0..600 {
        world.step();
    }

    let body = world.body(crate_).unwrap();
    // floor top at y=0, box half-height 0.5: resting centre near 0.5
    assert!(body.position.y > 0.0, "box fell through: y={}", body.position.y);
    assert!(body.position.y < 1.0, "box never settled: y={}", body.position.y);
}

#[test]
fn grid_pairs_match_adjacency_guarantees() {
    let mut grid = UniformGrid::new(2.0);
    grid.insert(0, Vec3::new(1.0, 1.0, 1.0));
    grid.insert(1, Vec3::new(1.5, 1.5, 1.5));
    grid.insert(2, Vec3::new(3.0, 3.0, 3.0));
    assert_eq!(grid.candidate_pairs().len(), 3);

    grid.clear();
    grid.insert(0, Vec3::new(1.0, 1.0, 1.0));
    grid.insert(1, Vec3::new(5.0, 5.0, 5.0));
    grid.insert(2, Vec3::new(-3.0, -3.0, -3.0));
    assert!(grid.candidate_pairs().is_empty());
}

#[test]
fn pendulum_constraint_keeps_the_bob_close() {
    let mut world = World::new();
    let anchor = world.add_body(Body::new(Shape::sphere(0.1)));
    let bob = world.add_body(
        Body::new(Shape::sphere(0.1))
            .with_mass(1.0)
            .with_position(Vec3::new(0.0, -2.0, 0.0)),
    );
    world.add_constraint(Box::new(DistanceConstraint::new(
        anchor,
        bob,
        Vec3::ZERO,
        Vec3::ZERO,
        2.0,
    )));

    // give the bob a sideways push and let it swing
    world.body_mut(bob).unwrap().velocity = Vec3::new(2.0, 0.0, 0.0);
    for _ in 0..300 {
        world.step();
    }

    let bob = world.body(bob).unwrap();
    let length = bob.position.length();
    assert!(
        (length - 2.0).abs() < 0.2,
        "rod length drifted to {length}"
    );
}

#[test]
fn scene_round_trip_through_the_engine() {
    let mut path = std::env::temp_dir();
    path.push(format!("kinetix-sim-roundtrip-{}.txt", std::process::id()));

    let mut engine = Engine::new();
    engine.create_plane(Vec3::Y, 0.0, 0.0);
    engine.create_sphere(Vec3::new(0.0, 4.0, 0.0), 1.0, 2.0);
    engine.save_scene(&path).unwrap();

    engine.reset_scene();
    assert_eq!(engine.body_count(), 0);

    engine.load_scene(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(engine.body_count(), 2);
    let ball = engine.body_snapshot(1).unwrap();
    assert_eq!(ball.shape, Shape::sphere(1.0));
    assert_relative_eq!(ball.position.y, 4.0);
}

#[test]
fn failed_load_leaves_the_world_empty() {
    let mut engine = Engine::new();
    engine.create_sphere(Vec3::ZERO, 1.0, 1.0);

    let result = engine.load_scene(std::path::Path::new("/nonexistent/scene.txt"));
    assert!(result.is_err());
    assert_eq!(engine.body_count(), 0);
}
