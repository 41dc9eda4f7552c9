//! # Orrery
//!
//! Orrery is a crate providing a compact engine to simulate N-body gravitational interaction of
//! point masses in Rust.
//!
//! ## Goals
//!
//! The main goal of this crate is to provide a small, predictable core for orbital mechanics:
//! a struct-of-arrays body store, an exact pairwise gravity solver and a choice of numerical
//! integrators with diagnostics to check how well they conserve energy and angular momentum.
//!
//! Gravity is computed by brute force over each pair of bodies, which is exact and well suited to
//! systems of a few hundred bodies. The solver sits behind the
//! [`ComputeMethod`](gravity::ComputeMethod) trait so integrators can be used with other
//! algorithms.
//!
//! # Using Orrery
//!
//! ## Setting up the simulation
//!
//! Bodies are added to a [`World`](world::World) with a position, a velocity and a mass, in SI
//! units unless the world is created with another gravitational constant. Each body is addressed
//! by the index returned when adding it.
//!
//! ```
//! use orrery::prelude::*;
//!
//! let mut world = World::new();
//! let sun = world.add_body(Vec3::ZERO, Vec3::ZERO, constants::M_SUN);
//! let earth = world.add_body([constants::AU, 0.0, 0.0], [0.0, 29_780.0, 0.0], constants::M_EARTH);
//! # assert_eq!((sun, earth), (0, 1));
//! ```
//!
//! ## Choosing an integrator
//!
//! Every integrator implements [`Integrator`](integrator::Integrator):
//!
//! - [`Rk4`](integrator::Rk4) takes fixed fourth-order Runge-Kutta steps.
//! - [`DormandPrince54`](integrator::DormandPrince54) takes adaptive steps, rejecting those whose
//!   error estimate exceeds its tolerance and suggesting the size of the next one.
//! - [`Leapfrog`](integrator::Leapfrog) takes symplectic kick-drift-kick steps whose energy error
//!   stays bounded over long integrations.
//!
//! ```
//! # use orrery::prelude::*;
//! # let mut world = World::new();
//! # world.add_body(Vec3::ZERO, Vec3::ZERO, constants::M_SUN);
//! # world.add_body([constants::AU, 0.0, 0.0], [0.0, 29_780.0, 0.0], constants::M_EARTH);
//! let energy = world.total_energy();
//!
//! let mut rk4 = Rk4::new();
//! for _ in 0..24 {
//!     rk4.step(&mut world, 3600.0);
//! }
//!
//! assert_eq!(world.time(), constants::DAY);
//! assert!(((world.total_energy() - energy) / energy).abs() < 1e-6);
//! ```
//!
//! Integrators keep their scratch memory between steps. One-off free functions such as
//! [`step_rk4`](integrator::step_rk4) are provided for convenience.

#![warn(missing_docs)]

/// Struct-of-arrays storage of per-body vector quantities.
pub mod columns;

/// Physical and astronomical constants.
pub mod constants;

mod diagnostics;

/// Error type of the crate.
pub mod error;

/// Trait for computing accelerations and the pairwise gravity solver.
pub mod gravity;

/// Time integration schemes.
pub mod integrator;

/// Vector type used at the API boundary.
pub mod vector;

/// The body store.
pub mod world;

pub use error::{Error, Result};

/// Everything needed to use the crate.
pub mod prelude {
    pub use crate::constants;
    pub use crate::gravity::{
        compute_gravity, compute_gravity_softened, BruteForcePairs, ComputeMethod,
    };
    pub use crate::integrator::{
        step_dopri54, step_leapfrog, step_rk4, AdaptiveParams, DormandPrince54, Integrator,
        Leapfrog, Rk4, StepResult,
    };
    pub use crate::vector::Vec3;
    pub use crate::world::{Body, World};
}
