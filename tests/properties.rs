//! Property-based tests for the body store, gravity and diagnostics.
//!
//! Run with: cargo test --test properties

use orrery::prelude::*;
use proptest::prelude::*;

type BodySpec = ([f64; 3], [f64; 3], f64);

fn arb_vector(range: f64) -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3(-range..range)
}

fn arb_body() -> impl Strategy<Value = BodySpec> {
    (arb_vector(100.0), arb_vector(10.0), 0.1..1e3f64)
}

fn arb_bodies(min: usize, max: usize) -> impl Strategy<Value = Vec<BodySpec>> {
    prop::collection::vec(arb_body(), min..=max)
}

fn world_from(bodies: &[BodySpec]) -> World {
    let mut world = World::with_gravitational_constant(1.0);
    for &(position, velocity, mass) in bodies {
        world.add_body(position, velocity, mass);
    }
    world
}

fn min_separation(world: &World) -> f64 {
    let bodies: Vec<_> = world.bodies().collect();
    let mut min = f64::INFINITY;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            min = min.min(a.position.distance(b.position));
        }
    }
    min
}

proptest! {
    #[test]
    fn indices_follow_insertion_order(bodies in arb_bodies(0, 32)) {
        let mut world = World::new();
        for (k, &(position, velocity, mass)) in bodies.iter().enumerate() {
            prop_assert_eq!(world.add_body(position, velocity, mass), k);
        }

        prop_assert_eq!(world.count(), bodies.len());
        prop_assert_eq!(world.positions().len(), bodies.len());
        prop_assert_eq!(world.masses().len(), bodies.len());

        for (k, &(position, _, mass)) in bodies.iter().enumerate() {
            prop_assert_eq!(world.body(k).position, Vec3::from(position));
            prop_assert_eq!(world.body(k).mass, mass);
        }
    }

    #[test]
    fn total_energy_is_kinetic_plus_potential(bodies in arb_bodies(0, 16)) {
        let world = world_from(&bodies);
        prop_assert_eq!(world.total_energy(), world.kinetic_energy() + world.potential_energy());
        prop_assert!(world.kinetic_energy() >= 0.0);
    }

    #[test]
    fn potential_energy_is_negative(bodies in arb_bodies(2, 16)) {
        let world = world_from(&bodies);
        prop_assume!(min_separation(&world) > 1e-6);
        prop_assert!(world.potential_energy() < 0.0);
    }

    #[test]
    fn net_force_vanishes(bodies in arb_bodies(2, 24)) {
        let mut world = world_from(&bodies);
        prop_assume!(min_separation(&world) > 1e-3);
        compute_gravity(&mut world);

        let (net, scale) = world.bodies().fold((Vec3::ZERO, 0.0), |(net, scale), b| {
            (net + b.acceleration * b.mass, scale + (b.acceleration * b.mass).length())
        });
        prop_assert!(net.length() <= 1e-10 * scale, "net {} for scale {}", net.length(), scale);
    }

    #[test]
    fn softening_weakens_pair_acceleration(
        bodies in arb_bodies(2, 2),
        softening in 1e-3..1e2f64,
    ) {
        let mut world = world_from(&bodies);
        prop_assume!(min_separation(&world) > 1e-3);

        compute_gravity(&mut world);
        let plain: Vec<_> = world.accelerations().iter().map(|a| a.length()).collect();

        compute_gravity_softened(&mut world, softening);
        let softened: Vec<_> = world.accelerations().iter().map(|a| a.length()).collect();

        for (softened, plain) in softened.iter().zip(&plain) {
            prop_assert!(softened < plain);
        }
    }

    #[test]
    fn rk4_zero_step_keeps_state(bodies in arb_bodies(1, 8)) {
        let mut world = world_from(&bodies);
        prop_assume!(world.count() < 2 || min_separation(&world) > 1e-3);
        let before: Vec<_> = world.bodies().map(|b| (b.position, b.velocity)).collect();

        step_rk4(&mut world, 0.0);

        let after: Vec<_> = world.bodies().map(|b| (b.position, b.velocity)).collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(world.time(), 0.0);
    }
}
