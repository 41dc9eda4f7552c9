//! Values are in SI units: metres, kilograms and seconds.

/// Newtonian gravitational constant, in m³/(kg·s²).
pub const G: f64 = 6.67430e-11;

/// Astronomical unit, in metres.
pub const AU: f64 = 1.495978707e11;

/// Length of a day, in seconds.
pub const DAY: f64 = 86400.0;

/// Mass of the Sun, in kilograms.
pub const M_SUN: f64 = 1.98892e30;

/// Mass of the Earth, in kilograms.
pub const M_EARTH: f64 = 5.97217e24;

/// Mass of the Moon, in kilograms.
pub const M_MOON: f64 = 7.342e22;

/// Mass of Mars, in kilograms.
pub const M_MARS: f64 = 6.4171e23;

/// [Standard gravitational parameter](https://en.wikipedia.org/wiki/Standard_gravitational_parameter)
/// of the Sun, in m³/s².
pub const MU_SUN: f64 = G * M_SUN;

/// Standard gravitational parameter of the Earth, in m³/s².
pub const MU_EARTH: f64 = G * M_EARTH;
