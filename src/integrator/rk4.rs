use super::{Integrator, Workspace};
use crate::{
    gravity::{BruteForcePairs, ComputeMethod},
    world::World,
};

/// Classical fixed-step fourth-order Runge-Kutta integrator.
///
/// Each step evaluates the gravity solver four times, at the start of the step, twice at its
/// midpoint and once at its end, and combines the stage derivatives with the weights
/// `(1, 2, 2, 1) / 6`. A step always succeeds and advances time by exactly `dt`.
///
/// RK4 is not symplectic: over very long integrations its energy error drifts.
///
/// ```
/// use orrery::prelude::*;
///
/// let mut world = World::new();
/// world.add_body(Vec3::ZERO, Vec3::ZERO, constants::M_EARTH);
/// world.add_body([384_400e3, 0.0, 0.0], [0.0, 1022.0, 0.0], constants::M_MOON);
///
/// let mut rk4 = Rk4::new();
/// for _ in 0..60 {
///     rk4.step(&mut world, 60.0);
/// }
/// assert_eq!(world.time(), 3600.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Rk4<C = BruteForcePairs> {
    /// Gravity solver evaluated at each stage.
    pub gravity: C,
    workspace: Workspace,
}

impl Rk4 {
    /// Creates a new [`Rk4`] integrator using unsoftened gravity.
    #[inline]
    pub const fn new() -> Self {
        Self::with_gravity(BruteForcePairs::new())
    }
}

impl<C> Rk4<C> {
    /// Creates a new [`Rk4`] integrator using the given gravity solver.
    #[inline]
    pub const fn with_gravity(gravity: C) -> Self {
        Self {
            gravity,
            workspace: Workspace::new(),
        }
    }
}

impl<C: ComputeMethod> Integrator for Rk4<C> {
    type Output = ();

    fn step(&mut self, world: &mut World, dt: f64) {
        let (gravity, ws) = (&mut self.gravity, &mut self.workspace);

        ws.prepare(world.count(), 4);
        ws.save(world);

        ws.evaluate(gravity, world, 0);
        ws.load(world, dt, [(0, 0.5)]);

        ws.evaluate(gravity, world, 1);
        ws.load(world, dt, [(1, 0.5)]);

        ws.evaluate(gravity, world, 2);
        ws.load(world, dt, [(2, 1.0)]);

        ws.evaluate(gravity, world, 3);
        ws.load(
            world,
            dt,
            [(0, 1.0 / 6.0), (1, 1.0 / 3.0), (2, 1.0 / 3.0), (3, 1.0 / 6.0)],
        );

        world.time += dt;
    }
}

/// Advances `world` by `dt` with one fourth-order Runge-Kutta step using unsoftened gravity.
///
/// This allocates scratch memory on every call; keep an [`Rk4`] around to step repeatedly.
#[inline]
pub fn step_rk4(world: &mut World, dt: f64) {
    Rk4::new().step(world, dt)
}
