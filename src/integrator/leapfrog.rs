use super::Integrator;
use crate::{
    gravity::{BruteForcePairs, ComputeMethod},
    world::World,
};

/// Kick-drift-kick leapfrog integrator.
///
/// A step applies half a velocity kick with the accelerations currently stored in the world,
/// drifts positions by the full step, recomputes accelerations at the new positions and applies
/// the second half kick. Only one gravity evaluation is needed per step and, being symplectic,
/// the energy error stays bounded over long integrations instead of drifting.
///
/// The first half kick trusts the stored accelerations. A world whose accelerations are stale,
/// such as one with freshly added bodies, should be primed with [`Leapfrog::prime`] first;
/// otherwise the first half kick uses whatever is stored, zero for new bodies.
///
/// ```
/// use orrery::prelude::*;
///
/// let mut world = World::with_gravitational_constant(1.0);
/// world.add_body(Vec3::ZERO, Vec3::ZERO, 1.0);
/// world.add_body([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], 1e-3);
///
/// let mut leapfrog = Leapfrog::new();
/// leapfrog.prime(&mut world);
/// for _ in 0..1000 {
///     leapfrog.step(&mut world, 0.01);
/// }
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Leapfrog<C = BruteForcePairs> {
    /// Gravity solver evaluated after each drift.
    pub gravity: C,
}

impl Leapfrog {
    /// Creates a new [`Leapfrog`] integrator using unsoftened gravity.
    #[inline]
    pub const fn new() -> Self {
        Self::with_gravity(BruteForcePairs::new())
    }
}

impl<C> Leapfrog<C> {
    /// Creates a new [`Leapfrog`] integrator using the given gravity solver.
    #[inline]
    pub const fn with_gravity(gravity: C) -> Self {
        Self { gravity }
    }
}

impl<C: ComputeMethod> Leapfrog<C> {
    /// Computes the accelerations of `world` so the next step starts from up-to-date values.
    #[inline]
    pub fn prime(&mut self, world: &mut World) {
        self.gravity.compute(world);
    }
}

impl<C: ComputeMethod> Integrator for Leapfrog<C> {
    type Output = ();

    fn step(&mut self, world: &mut World, dt: f64) {
        let half_dt = 0.5 * dt;

        world.velocity.add_scaled(&world.acceleration, half_dt);
        world.position.add_scaled(&world.velocity, dt);

        self.gravity.compute(world);

        world.velocity.add_scaled(&world.acceleration, half_dt);
        world.time += dt;
    }
}

/// Advances `world` by `dt` with one kick-drift-kick leapfrog step using unsoftened gravity.
///
/// The stored accelerations must be current, see [`Leapfrog::prime`].
#[inline]
pub fn step_leapfrog(world: &mut World, dt: f64) {
    Leapfrog::new().step(world, dt)
}

#[cfg(test)]
mod tests {
    use super::super::tests::*;
    use super::*;
    use crate::{gravity::compute_gravity, vector::Vec3};

    #[test]
    fn energy_conservation() {
        let mut world = two_body();
        let mut leapfrog = Leapfrog::new();
        leapfrog.prime(&mut world);

        let energy_before = world.total_energy();
        for _ in 0..10_000 {
            leapfrog.step(&mut world, 0.01);
        }

        let error = relative_error(energy_before, world.total_energy());
        dbg!(error);
        assert!(error < 1e-4);
        assert!(relative_error(100.0, world.time()) < 1e-9);
    }

    #[test]
    fn energy_error_stays_bounded() {
        let mut world = eccentric_orbit();
        let mut leapfrog = Leapfrog::new();
        leapfrog.prime(&mut world);

        let energy_before = world.total_energy();
        let errors: Vec<_> = (0..100_000)
            .map(|_| {
                leapfrog.step(&mut world, 0.002);
                relative_error(energy_before, world.total_energy())
            })
            .collect();

        let (first, second) = errors.split_at(errors.len() / 2);
        let max = |errors: &[f64]| errors.iter().copied().fold(0.0, f64::max);

        dbg!(max(first), max(second));
        assert!(max(second) < 2.0 * max(first));
        assert!(max(first) < 1e-3 && max(second) < 1e-3);
    }

    #[test]
    fn circular_orbit_period() {
        let (mut world, period) = circular_orbit();
        let (radius_before, angle_before) = polar(&world);

        let mut leapfrog = Leapfrog::new();
        leapfrog.prime(&mut world);
        for _ in 0..1000 {
            leapfrog.step(&mut world, period / 1000.0);
        }

        let (radius_after, angle_after) = polar(&world);
        assert!(relative_error(radius_before, radius_after) < 1e-2);
        assert!(angle_difference(angle_before, angle_after) < 0.05);
    }

    #[test]
    fn unprimed_first_kick_uses_stored_accelerations() {
        let mut world = two_body();
        let (p0, v0) = (world.body(1).position, world.body(1).velocity);

        step_leapfrog(&mut world, 0.5);

        assert_eq!(world.body(1).position, p0 + v0 * 0.5);
        assert_eq!(world.time(), 0.5);
    }

    #[test]
    fn prime_computes_gravity() {
        let mut primed = two_body();
        Leapfrog::new().prime(&mut primed);

        let mut computed = two_body();
        compute_gravity(&mut computed);

        assert_eq!(primed.body(1).acceleration, computed.body(1).acceleration);
        assert_ne!(primed.body(1).acceleration, Vec3::ZERO);
    }

    #[test]
    fn angular_momentum_conservation() {
        let mut world = three_body();
        let before = world.angular_momentum();

        let mut leapfrog = Leapfrog::new();
        leapfrog.prime(&mut world);
        for _ in 0..5000 {
            leapfrog.step(&mut world, 0.01);
        }

        let after = world.angular_momentum();
        let error = (after - before).length() / before.length();
        dbg!(error);
        assert!(error < 1e-10);
    }
}
