use crate::{
    columns::{Columns, ColumnsView, ColumnsViewMut},
    constants,
    vector::Vec3,
};

/// Snapshot of a single body.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[allow(missing_docs)]
pub struct Body {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub mass: f64,
}

/// Struct-of-arrays storage of every simulated body.
///
/// Position, velocity and acceleration are each stored as three parallel sequences (one per axis)
/// next to a mass sequence. All sequences share the same length, the body count, and are only
/// grown or cleared together. Bodies are addressed by the index returned from
/// [`World::add_body`], which stays valid until [`World::clear`].
///
/// Accelerations are a derivative cache written by the gravity solver; integrators other than
/// [`Leapfrog`](crate::integrator::Leapfrog) recompute them as they go.
///
/// ```
/// use orrery::prelude::*;
///
/// let mut world = World::new();
/// let sun = world.add_body(Vec3::ZERO, Vec3::ZERO, constants::M_SUN);
/// let earth = world.add_body([constants::AU, 0.0, 0.0], [0.0, 29_780.0, 0.0], constants::M_EARTH);
///
/// assert_eq!((sun, earth), (0, 1));
/// assert_eq!(world.count(), 2);
/// assert_eq!(world.positions().x[earth], constants::AU);
/// ```
#[derive(Clone, Debug)]
pub struct World {
    pub(crate) position: Columns,
    pub(crate) velocity: Columns,
    pub(crate) acceleration: Columns,
    pub(crate) mass: Vec<f64>,
    pub(crate) time: f64,
    pub(crate) g: f64,
}

impl Default for World {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates an empty [`World`] using the SI gravitational constant [`constants::G`].
    #[inline]
    pub const fn new() -> Self {
        Self::with_gravitational_constant(constants::G)
    }

    /// Creates an empty [`World`] using the given gravitational constant, for example `1.0` to
    /// simulate in natural units.
    #[inline]
    pub const fn with_gravitational_constant(g: f64) -> Self {
        Self {
            position: Columns::new(),
            velocity: Columns::new(),
            acceleration: Columns::new(),
            mass: Vec::new(),
            time: 0.0,
            g,
        }
    }

    /// Returns the gravitational constant used by this world.
    #[inline]
    pub const fn gravitational_constant(&self) -> f64 {
        self.g
    }

    /// Reserves capacity for at least `n` bodies in total. The body count is unchanged.
    #[inline]
    pub fn reserve(&mut self, n: usize) {
        let additional = n.saturating_sub(self.count());
        self.position.reserve(additional);
        self.velocity.reserve(additional);
        self.acceleration.reserve(additional);
        self.mass.reserve(additional);
    }

    /// Adds a body and returns its index. Its acceleration starts at zero.
    ///
    /// The mass should be positive; this is not checked.
    #[inline]
    pub fn add_body(
        &mut self,
        position: impl Into<Vec3>,
        velocity: impl Into<Vec3>,
        mass: f64,
    ) -> usize {
        let index = self.count();

        self.position.push(position.into());
        self.velocity.push(velocity.into());
        self.acceleration.push(Vec3::ZERO);
        self.mass.push(mass);

        debug_assert!(self.is_consistent());
        index
    }

    /// Removes every body and resets the elapsed time to zero.
    ///
    /// The gravitational constant is kept.
    #[inline]
    pub fn clear(&mut self) {
        self.position.clear();
        self.velocity.clear();
        self.acceleration.clear();
        self.mass.clear();
        self.time = 0.0;
    }

    /// Returns the number of bodies.
    #[inline]
    pub fn count(&self) -> usize {
        self.mass.len()
    }

    /// Returns `true` if the world holds no bodies.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }

    /// Returns the elapsed simulation time.
    #[inline]
    pub const fn time(&self) -> f64 {
        self.time
    }

    /// Overwrites the elapsed simulation time, typically when setting up a scenario.
    #[inline]
    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    /// Returns a view of the position sequences.
    #[inline]
    pub fn positions(&self) -> ColumnsView<'_> {
        self.position.view()
    }

    /// Returns a view of the velocity sequences.
    #[inline]
    pub fn velocities(&self) -> ColumnsView<'_> {
        self.velocity.view()
    }

    /// Returns a view of the acceleration sequences as last written by a gravity solver.
    #[inline]
    pub fn accelerations(&self) -> ColumnsView<'_> {
        self.acceleration.view()
    }

    /// Returns the masses.
    #[inline]
    pub fn masses(&self) -> &[f64] {
        &self.mass
    }

    /// Returns a mutable view of the position sequences. Writes are seen by every subsequent
    /// computation on this world.
    #[inline]
    pub fn positions_mut(&mut self) -> ColumnsViewMut<'_> {
        self.position.view_mut()
    }

    /// Returns a mutable view of the velocity sequences. Writes are seen by every subsequent
    /// computation on this world.
    #[inline]
    pub fn velocities_mut(&mut self) -> ColumnsViewMut<'_> {
        self.velocity.view_mut()
    }

    /// Returns the masses, mutably.
    #[inline]
    pub fn masses_mut(&mut self) -> &mut [f64] {
        &mut self.mass
    }

    /// Returns a snapshot of the body at `index`.
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn body(&self, index: usize) -> Body {
        Body {
            position: self.position.get(index),
            velocity: self.velocity.get(index),
            acceleration: self.acceleration.get(index),
            mass: self.mass[index],
        }
    }

    /// Returns an iterator over snapshots of every body, in index order.
    #[inline]
    pub fn bodies(&self) -> impl ExactSizeIterator<Item = Body> + '_ {
        (0..self.count()).map(|i| self.body(i))
    }

    #[inline]
    fn is_consistent(&self) -> bool {
        let count = self.count();
        self.position.len() == count
            && self.velocity.len() == count
            && self.acceleration.len() == count
    }
}
