use super::{Integrator, Workspace};
use crate::{
    error::{Error, Result},
    gravity::{BruteForcePairs, ComputeMethod},
    world::World,
};
use tracing::{debug, trace};

/// Error tolerance used by [`AdaptiveParams::default`].
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

// Dormand-Prince 5(4) tableau, as (stage, coefficient) pairs. The last row gives the fifth-order
// solution, at which the seventh stage is evaluated.
const A2: [(usize, f64); 1] = [(0, 1.0 / 5.0)];
const A3: [(usize, f64); 2] = [(0, 3.0 / 40.0), (1, 9.0 / 40.0)];
const A4: [(usize, f64); 3] = [(0, 44.0 / 45.0), (1, -56.0 / 15.0), (2, 32.0 / 9.0)];
const A5: [(usize, f64); 4] = [
    (0, 19372.0 / 6561.0),
    (1, -25360.0 / 2187.0),
    (2, 64448.0 / 6561.0),
    (3, -212.0 / 729.0),
];
const A6: [(usize, f64); 5] = [
    (0, 9017.0 / 3168.0),
    (1, -355.0 / 33.0),
    (2, 46732.0 / 5247.0),
    (3, 49.0 / 176.0),
    (4, -5103.0 / 18656.0),
];
const B: [(usize, f64); 5] = [
    (0, 35.0 / 384.0),
    (2, 500.0 / 1113.0),
    (3, 125.0 / 192.0),
    (4, -2187.0 / 6784.0),
    (5, 11.0 / 84.0),
];

// Difference between the fifth and fourth-order weights.
const E: [f64; 7] = [
    71.0 / 57600.0,
    0.0,
    -71.0 / 16695.0,
    71.0 / 1920.0,
    -17253.0 / 339200.0,
    22.0 / 525.0,
    -1.0 / 40.0,
];

/// Step-size control parameters of [`DormandPrince54`].
///
/// After each attempt the next step size is `dt · clamp(safety · (tolerance / error)^(1/5),
/// min_scale, max_scale)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdaptiveParams {
    /// Largest accepted error estimate. Must be finite and positive.
    pub tolerance: f64,
    /// Factor applied to the optimal scale, in `(0, 1]`.
    pub safety: f64,
    /// Smallest step-size scale, in `(0, 1]`.
    pub min_scale: f64,
    /// Largest step-size scale, at least `1`.
    pub max_scale: f64,
}

impl Default for AdaptiveParams {
    #[inline]
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            safety: 0.9,
            min_scale: 0.2,
            max_scale: 5.0,
        }
    }
}

impl AdaptiveParams {
    /// Default parameters with the given tolerance.
    #[inline]
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    /// Checks that the parameters are in range.
    pub fn validate(&self) -> Result<()> {
        let Self {
            tolerance,
            safety,
            min_scale,
            max_scale,
        } = *self;

        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(Error::InvalidParams(format!(
                "tolerance must be finite and positive, found {tolerance}"
            )));
        }
        if !(safety > 0.0 && safety <= 1.0) {
            return Err(Error::InvalidParams(format!(
                "safety must be in (0, 1], found {safety}"
            )));
        }
        if !(min_scale > 0.0 && min_scale <= 1.0 && max_scale >= 1.0 && max_scale.is_finite()) {
            return Err(Error::InvalidParams(format!(
                "scale bounds must satisfy 0 < min_scale <= 1 <= max_scale, found [{min_scale}, {max_scale}]"
            )));
        }

        Ok(())
    }
}

/// Outcome of one adaptive step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepResult {
    accepted: bool,
    dt_used: f64,
    dt_next: f64,
    error_estimate: f64,
}

impl StepResult {
    /// Time actually advanced: the requested `dt` if the step was accepted, `0` if rejected.
    #[inline]
    pub const fn dt_used(&self) -> f64 {
        self.dt_used
    }

    /// Suggested size of the next step, or of the retry after a rejection. Always positive for a
    /// positive requested step, and zero for a zero-length one.
    #[inline]
    pub const fn dt_next(&self) -> f64 {
        self.dt_next
    }

    /// Scaled error estimate of the attempt.
    #[inline]
    pub const fn error_estimate(&self) -> f64 {
        self.error_estimate
    }

    /// Returns `true` if the error estimate was within tolerance and the world holds the new
    /// state. A zero-length step is accepted with a zero [`dt_used`](Self::dt_used).
    #[inline]
    pub const fn is_accepted(&self) -> bool {
        self.accepted
    }
}

/// Summary of [`DormandPrince54::advance`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AdaptiveRun {
    /// Number of accepted steps.
    pub accepted: usize,
    /// Number of rejected attempts.
    pub rejected: usize,
    /// Time advanced.
    pub elapsed: f64,
    /// Step size suggested by the last attempt.
    pub dt_next: f64,
    /// Largest error estimate among accepted steps.
    pub max_error: f64,
}

/// Adaptive Dormand-Prince 5(4) integrator.
///
/// Each attempt evaluates the gravity solver seven times and compares the embedded fourth and
/// fifth-order solutions. For every body the error of positions and velocities is the sum over
/// axes of the absolute difference, divided by the magnitude of the fifth-order position or
/// velocity (at least `1`); the error of the step is the largest of these.
///
/// If the error exceeds the tolerance the step is rejected: positions, velocities and time are
/// left as they were and [`StepResult::dt_used`] is `0`. Accelerations are overwritten either
/// way. Otherwise the world holds the fifth-order solution and time advances by `dt`. In both
/// cases [`StepResult::dt_next`] suggests the step to try next.
///
/// ```
/// use orrery::prelude::*;
///
/// let mut world = World::new();
/// world.add_body(Vec3::ZERO, Vec3::ZERO, 1e12);
/// world.add_body([1000.0, 0.0, 0.0], [0.0, 8.0, 0.0], 1.0);
///
/// let mut dopri = DormandPrince54::new();
/// let mut dt = 100.0;
/// while world.time() < 10_000.0 {
///     dt = dopri.step(&mut world, dt).dt_next();
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct DormandPrince54<C = BruteForcePairs> {
    /// Gravity solver evaluated at each stage.
    pub gravity: C,
    params: AdaptiveParams,
    workspace: Workspace,
}

impl DormandPrince54 {
    /// Creates a new [`DormandPrince54`] integrator using unsoftened gravity and the default
    /// parameters.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [`DormandPrince54`] integrator using unsoftened gravity and the given
    /// parameters, or an error if they are out of range.
    #[inline]
    pub fn with_params(params: AdaptiveParams) -> Result<Self> {
        Self::with_gravity(BruteForcePairs::new(), params)
    }
}

impl<C> DormandPrince54<C> {
    /// Creates a new [`DormandPrince54`] integrator using the given gravity solver and
    /// parameters, or an error if the parameters are out of range.
    #[inline]
    pub fn with_gravity(gravity: C, params: AdaptiveParams) -> Result<Self> {
        params.validate()?;

        Ok(Self {
            gravity,
            params,
            workspace: Workspace::new(),
        })
    }

    /// Returns the step-size control parameters.
    #[inline]
    pub const fn params(&self) -> &AdaptiveParams {
        &self.params
    }
}

impl<C: ComputeMethod> DormandPrince54<C> {
    /// Advances `world` by `duration`, starting with steps of `dt` and retrying rejected steps.
    ///
    /// The final step is shortened so that the world lands exactly on its starting time plus
    /// `duration`. A non-positive `dt` starts with a single step over the whole duration. Nothing
    /// happens if `duration` is not positive.
    ///
    /// NaN terms of the error estimate are ignored, so once two unsoftened bodies collide the
    /// run shrinks its steps until the state turns non-finite and then accepts it. Use a softened
    /// solver, see [`BruteForcePairs::softened`], when close encounters are expected.
    pub fn advance(&mut self, world: &mut World, duration: f64, dt: f64) -> AdaptiveRun {
        let end = world.time + duration;
        let mut run = AdaptiveRun {
            dt_next: dt,
            ..AdaptiveRun::default()
        };

        let mut dt = if dt > 0.0 { dt } else { duration };
        while run.elapsed < duration {
            let remaining = duration - run.elapsed;
            let last = dt >= remaining;

            let result = self.step(world, dt.min(remaining));
            run.dt_next = result.dt_next;

            if result.is_accepted() {
                run.accepted += 1;
                run.max_error = run.max_error.max(result.error_estimate);

                if last {
                    run.elapsed = duration;
                    world.time = end;
                } else {
                    run.elapsed += result.dt_used;
                }
            } else {
                run.rejected += 1;
            }

            dt = result.dt_next;
        }

        debug!(
            accepted = run.accepted,
            rejected = run.rejected,
            elapsed = run.elapsed,
            max_error = run.max_error,
            "adaptive run finished"
        );
        run
    }
}

impl<C: ComputeMethod> Integrator for DormandPrince54<C> {
    type Output = StepResult;

    fn step(&mut self, world: &mut World, dt: f64) -> StepResult {
        let (gravity, ws) = (&mut self.gravity, &mut self.workspace);

        ws.prepare(world.count(), 7);
        ws.save(world);

        ws.evaluate(gravity, world, 0);
        ws.load(world, dt, A2);
        ws.evaluate(gravity, world, 1);
        ws.load(world, dt, A3);
        ws.evaluate(gravity, world, 2);
        ws.load(world, dt, A4);
        ws.evaluate(gravity, world, 3);
        ws.load(world, dt, A5);
        ws.evaluate(gravity, world, 4);
        ws.load(world, dt, A6);
        ws.evaluate(gravity, world, 5);
        ws.load(world, dt, B);
        ws.evaluate(gravity, world, 6);

        let error = error_estimate(ws, world, dt);

        let AdaptiveParams {
            tolerance,
            safety,
            min_scale,
            max_scale,
        } = self.params;
        let scale = (safety * (tolerance / (error + 1e-30)).powf(0.2)).clamp(min_scale, max_scale);
        let dt_next = dt * scale;

        if error > tolerance {
            ws.restore(world);
            debug!(dt, error, dt_next, "rejected step");

            return StepResult {
                accepted: false,
                dt_used: 0.0,
                dt_next,
                error_estimate: error,
            };
        }

        world.time += dt;
        trace!(dt, error, dt_next, "accepted step");

        StepResult {
            accepted: true,
            dt_used: dt,
            dt_next,
            error_estimate: error,
        }
    }
}

// Largest scaled difference between the embedded solutions, with `world` at the fifth-order one.
fn error_estimate(ws: &Workspace, world: &World, dt: f64) -> f64 {
    let stages: [_; 7] = std::array::from_fn(|k| ws.stage(k));
    let mut max_error = 0.0_f64;

    for i in 0..world.count() {
        let (mut err_p, mut err_v) = (0.0_f64, 0.0_f64);

        for axis in 0..3 {
            let (mut dp, mut dv) = (0.0_f64, 0.0_f64);
            for (e, stage) in E.iter().zip(&stages) {
                dp += e * stage.dp.axis(axis)[i];
                dv += e * stage.dv.axis(axis)[i];
            }

            err_p += (dt * dp).abs();
            err_v += (dt * dv).abs();
        }

        let scale_p = world.position.get(i).length().max(1.0);
        let scale_v = world.velocity.get(i).length().max(1.0);
        max_error = max_error.max(err_p / scale_p).max(err_v / scale_v);
    }

    max_error
}

/// Attempts one adaptive Dormand-Prince 5(4) step of `dt` with the given tolerance and unsoftened
/// gravity.
///
/// The tolerance is not validated. This allocates scratch memory on every call; keep a
/// [`DormandPrince54`] around to step repeatedly.
#[inline]
pub fn step_dopri54(world: &mut World, dt: f64, tolerance: f64) -> StepResult {
    DormandPrince54 {
        gravity: BruteForcePairs::new(),
        params: AdaptiveParams::with_tolerance(tolerance),
        workspace: Workspace::new(),
    }
    .step(world, dt)
}
