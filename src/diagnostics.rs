//! Conserved quantities of a [`World`], used to check the accuracy of an integration.

use crate::{vector::Vec3, world::World};

impl World {
    /// Returns the total kinetic energy, `Σ ½·mᵢ·|vᵢ|²`.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        let v = &self.velocity;

        (0..self.count())
            .map(|i| 0.5 * self.mass[i] * (v.x[i] * v.x[i] + v.y[i] * v.y[i] + v.z[i] * v.z[i]))
            .sum()
    }

    /// Returns the total gravitational potential energy, `-Σᵢ<ⱼ G·mᵢ·mⱼ / |rᵢ - rⱼ|`.
    ///
    /// Two bodies at the same position make the result non-finite.
    pub fn potential_energy(&self) -> f64 {
        let p = &self.position;
        let n = self.count();
        let mut energy = 0.0;

        for i in 0..n {
            for j in (i + 1)..n {
                let dx = p.x[j] - p.x[i];
                let dy = p.y[j] - p.y[i];
                let dz = p.z[j] - p.z[i];

                let r = (dx * dx + dy * dy + dz * dz).sqrt();
                energy -= self.g * self.mass[i] * self.mass[j] / r;
            }
        }

        energy
    }

    /// Returns the total mechanical energy, kinetic plus potential.
    #[inline]
    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }

    /// Returns the total angular momentum about the origin, `Σ mᵢ·(rᵢ × vᵢ)`.
    #[inline]
    pub fn angular_momentum(&self) -> Vec3 {
        (0..self.count()).fold(Vec3::ZERO, |momentum, i| {
            momentum + self.mass[i] * self.position.get(i).cross(self.velocity.get(i))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{constants::G, prelude::*};
    use approx::assert_relative_eq;

    fn earth_moon() -> World {
        let mut world = World::new();
        world.add_body(Vec3::ZERO, Vec3::ZERO, 5.972e24);
        world.add_body([384_400e3, 0.0, 0.0], [0.0, 1022.0, 0.0], 7.342e22);
        world
    }

    #[test]
    fn empty_world() {
        let world = World::new();
        assert_eq!(world.kinetic_energy(), 0.0);
        assert_eq!(world.potential_energy(), 0.0);
        assert_eq!(world.angular_momentum(), Vec3::ZERO);
    }

    #[test]
    fn kinetic_energy() {
        let mut world = World::new();
        world.add_body(Vec3::ZERO, [3.0, 4.0, 0.0], 2.0);
        world.add_body(Vec3::X, [0.0, 0.0, 1.0], 4.0);

        assert_eq!(world.kinetic_energy(), 0.5 * 2.0 * 25.0 + 0.5 * 4.0 * 1.0);
    }

    #[test]
    fn potential_energy() {
        let world = earth_moon();
        let expected = -G * 5.972e24 * 7.342e22 / 384_400e3;

        assert_relative_eq!(world.potential_energy(), expected, max_relative = 1e-12);
        assert!(world.potential_energy() < 0.0);
    }

    #[test]
    fn potential_energy_uses_world_constant() {
        let mut world = World::with_gravitational_constant(1.0);
        world.add_body(Vec3::ZERO, Vec3::ZERO, 2.0);
        world.add_body([0.0, 4.0, 0.0], Vec3::ZERO, 3.0);
        world.add_body([0.0, 0.0, 3.0], Vec3::ZERO, 1.0);

        let expected = -(2.0 * 3.0 / 4.0 + 2.0 * 1.0 / 3.0 + 3.0 * 1.0 / 5.0);
        assert_relative_eq!(world.potential_energy(), expected, max_relative = 1e-14);
    }

    #[test]
    fn total_energy_is_sum() {
        let world = earth_moon();
        assert_eq!(
            world.total_energy(),
            world.kinetic_energy() + world.potential_energy()
        );
    }

    #[test]
    fn coincident_bodies_are_singular() {
        let mut world = World::new();
        world.add_body(Vec3::ONE, Vec3::ZERO, 1.0);
        world.add_body(Vec3::ONE, Vec3::ZERO, 1.0);

        assert!(!world.potential_energy().is_finite());
    }

    #[test]
    fn angular_momentum() {
        let world = earth_moon();
        let expected = Vec3::new(0.0, 0.0, 7.342e22 * 384_400e3 * 1022.0);

        assert_relative_eq!(world.angular_momentum().z, expected.z, max_relative = 1e-12);
        assert_eq!(world.angular_momentum().x, 0.0);
        assert_eq!(world.angular_momentum().y, 0.0);
    }
}
