use crate::world::World;

/// Trait for algorithms that write the gravitational acceleration of every body of a [`World`].
///
/// Integrators are generic over this trait and call it once per derivative evaluation.
///
/// # Example
///
/// ```
/// use orrery::prelude::*;
///
/// // Uniform field pulling everything towards -z.
/// struct Uniform(f64);
///
/// impl ComputeMethod for Uniform {
///     fn compute(&mut self, world: &mut World) {
///         // ...
///         # let _ = world;
///     }
/// }
/// ```
pub trait ComputeMethod {
    /// Overwrites the accelerations of `world` from its current positions and masses.
    fn compute(&mut self, world: &mut World);
}

impl<C> ComputeMethod for &mut C
where
    C: ComputeMethod + ?Sized,
{
    #[inline]
    fn compute(&mut self, world: &mut World) {
        (**self).compute(world)
    }
}

/// Brute-force algorithm using one CPU thread, computing each pair of bodies once.
///
/// The acceleration of a pair `(i, j)`, `i < j`, is computed once and applied to both bodies with
/// opposite signs, each scaled by the other body's mass. This performs `n·(n-1)/2` distance
/// evaluations instead of `n·(n-1)`.
///
/// A non-zero `softening` length `ε` replaces every squared distance `r²` with `r² + ε²`, which
/// bounds the acceleration of close pairs. With no softening, two bodies sharing a position
/// produce non-finite accelerations.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BruteForcePairs {
    /// Softening length, in the world's length unit.
    pub softening: f64,
}

impl BruteForcePairs {
    /// Creates a new [`BruteForcePairs`] without softening.
    #[inline]
    pub const fn new() -> Self {
        Self { softening: 0.0 }
    }

    /// Creates a new [`BruteForcePairs`] with the given softening length.
    #[inline]
    pub const fn softened(softening: f64) -> Self {
        Self { softening }
    }
}

impl ComputeMethod for BruteForcePairs {
    fn compute(&mut self, world: &mut World) {
        let World {
            position: p,
            acceleration: a,
            mass,
            g,
            ..
        } = world;

        let g = *g;
        let eps2 = self.softening * self.softening;
        let len = mass.len();

        a.fill_zero();

        for i in 0..len {
            let (xi, yi, zi, mi) = (p.x[i], p.y[i], p.z[i], mass[i]);
            let (mut axi, mut ayi, mut azi) = (0.0, 0.0, 0.0);

            for j in (i + 1)..len {
                let dx = p.x[j] - xi;
                let dy = p.y[j] - yi;
                let dz = p.z[j] - zi;

                let dist2 = dx * dx + dy * dy + dz * dz + eps2;
                let f = g / (dist2 * dist2.sqrt());
                let (fx, fy, fz) = (dx * f, dy * f, dz * f);

                let mj = mass[j];
                axi += fx * mj;
                ayi += fy * mj;
                azi += fz * mj;

                a.x[j] -= fx * mi;
                a.y[j] -= fy * mi;
                a.z[j] -= fz * mi;
            }

            a.x[i] += axi;
            a.y[i] += ayi;
            a.z[i] += azi;
        }
    }
}

/// Overwrites the accelerations of `world` using Newton's law of universal gravitation.
#[inline]
pub fn compute_gravity(world: &mut World) {
    BruteForcePairs::new().compute(world)
}

/// Overwrites the accelerations of `world` using Newton's law of universal gravitation with the
/// given softening length.
#[inline]
pub fn compute_gravity_softened(world: &mut World, softening: f64) {
    BruteForcePairs::softened(softening).compute(world)
}
