mod dormand_prince;
mod leapfrog;
mod rk4;

pub use dormand_prince::{
    step_dopri54, AdaptiveParams, AdaptiveRun, DormandPrince54, StepResult, DEFAULT_TOLERANCE,
};
pub use leapfrog::{step_leapfrog, Leapfrog};
pub use rk4::{step_rk4, Rk4};

use crate::{columns::Columns, gravity::ComputeMethod, world::World};
use tracing::debug;

/// Trait for time-integration schemes advancing the positions, velocities and time of a
/// [`World`].
pub trait Integrator {
    /// The outcome of one step.
    type Output;

    /// Advances `world` by the time increment `dt`.
    fn step(&mut self, world: &mut World, dt: f64) -> Self::Output;
}

impl<I> Integrator for &mut I
where
    I: Integrator + ?Sized,
{
    type Output = I::Output;

    #[inline]
    fn step(&mut self, world: &mut World, dt: f64) -> Self::Output {
        (**self).step(world, dt)
    }
}

/// Derivative of the state at one stage: velocities for positions, accelerations for velocities.
#[derive(Clone, Debug, Default)]
pub(crate) struct Stage {
    pub(crate) dp: Columns,
    pub(crate) dv: Columns,
}

/// Reusable scratch memory for multi-stage integrators.
///
/// Holds the state saved at the start of a step and the derivative of each stage. It is resized
/// to fit the world it is used with and keeps its allocation, so repeated steps do not allocate.
/// Each multi-stage integrator owns one; independent simulations should not share integrators.
#[derive(Clone, Debug, Default)]
pub(crate) struct Workspace {
    saved_position: Columns,
    saved_velocity: Columns,
    stages: Vec<Stage>,
}

impl Workspace {
    /// Creates an empty [`Workspace`].
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            saved_position: Columns::new(),
            saved_velocity: Columns::new(),
            stages: Vec::new(),
        }
    }

    /// Returns the number of bodies the workspace is currently sized for.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.saved_position.len()
    }

    // Sizes the workspace for `bodies` bodies and `stages` stages.
    pub(crate) fn prepare(&mut self, bodies: usize, stages: usize) {
        if self.len() != bodies || self.stages.len() < stages {
            if self.len() < bodies {
                debug!(bodies, stages, "growing integrator workspace");
            }

            self.saved_position.resize(bodies);
            self.saved_velocity.resize(bodies);

            if self.stages.len() < stages {
                self.stages.resize_with(stages, Stage::default);
            }
            for stage in &mut self.stages {
                stage.dp.resize(bodies);
                stage.dv.resize(bodies);
            }
        }
    }

    #[inline]
    pub(crate) fn save(&mut self, world: &World) {
        self.saved_position.copy_from(&world.position);
        self.saved_velocity.copy_from(&world.velocity);
    }

    #[inline]
    pub(crate) fn restore(&self, world: &mut World) {
        world.position.copy_from(&self.saved_position);
        world.velocity.copy_from(&self.saved_velocity);
    }

    #[inline]
    pub(crate) fn stage(&self, k: usize) -> &Stage {
        &self.stages[k]
    }

    /// Evaluates the derivative of the current state of `world` into stage `k`.
    #[inline]
    pub(crate) fn evaluate<C>(&mut self, gravity: &mut C, world: &mut World, k: usize)
    where
        C: ComputeMethod + ?Sized,
    {
        gravity.compute(world);

        let stage = &mut self.stages[k];
        stage.dp.copy_from(&world.velocity);
        stage.dv.copy_from(&world.acceleration);
    }

    /// Sets the state of `world` to the saved state plus `dt` times the weighted stages.
    #[inline]
    pub(crate) fn load<const K: usize>(&self, world: &mut World, dt: f64, weights: [(usize, f64); K]) {
        let stages = &self.stages;
        world.position.combine(
            &self.saved_position,
            dt,
            weights.map(move |(k, c)| (c, &stages[k].dp)),
        );
        world.velocity.combine(
            &self.saved_velocity,
            dt,
            weights.map(move |(k, c)| (c, &stages[k].dv)),
        );
    }
}
