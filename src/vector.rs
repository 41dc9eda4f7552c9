use crate::error::{Error, Result};

/// Three-component double precision vector used for insertion arguments and diagnostics.
///
/// Any `Into<Vec3>` value is accepted where a vector is expected, which includes `[f64; 3]`
/// and `(f64, f64, f64)`:
///
/// ```
/// use orrery::prelude::*;
///
/// let mut world = World::new();
/// world.add_body(Vec3::new(1.0, 0.0, 0.0), [0.0, 1.0, 0.0], 1.0);
/// world.add_body((2.0, 0.0, 0.0), Vec3::ZERO, 1.0);
/// assert_eq!(world.count(), 2);
/// ```
pub type Vec3 = glam::DVec3;

/// Converts a slice of exactly three numbers into a [`Vec3`].
///
/// Binding layers receiving untyped sequences should use this instead of indexing.
///
/// ```
/// use orrery::vector::vec3_from_slice;
///
/// assert_eq!(vec3_from_slice(&[1.0, 2.0, 3.0]).unwrap().y, 2.0);
/// assert!(vec3_from_slice(&[1.0, 2.0]).is_err());
/// ```
#[inline]
pub fn vec3_from_slice(slice: &[f64]) -> Result<Vec3> {
    match *slice {
        [x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(Error::VectorLength {
            expected: 3,
            found: slice.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice() {
        assert_eq!(vec3_from_slice(&[4.0, 5.0, 6.0]), Ok(Vec3::new(4.0, 5.0, 6.0)));
        assert_eq!(
            vec3_from_slice(&[1.0; 4]),
            Err(Error::VectorLength {
                expected: 3,
                found: 4
            })
        );
        assert!(vec3_from_slice(&[]).is_err());
    }

    #[test]
    fn triples_convert() {
        let a: Vec3 = [1.0, 2.0, 3.0].into();
        let b: Vec3 = (1.0, 2.0, 3.0).into();
        assert_eq!(a, b);
    }
}
