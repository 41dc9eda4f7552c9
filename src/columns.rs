use crate::vector::Vec3;

/// Three parallel sequences holding the x, y and z components of one per-body quantity.
///
/// All three sequences always have the same length. Inner loops read one axis at a time, which
/// keeps them contiguous in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Columns {
    pub(crate) x: Vec<f64>,
    pub(crate) y: Vec<f64>,
    pub(crate) z: Vec<f64>,
}

impl Columns {
    /// Creates empty [`Columns`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            z: Vec::new(),
        }
    }

    /// Creates [`Columns`] of `len` zeroed entries.
    #[inline]
    pub fn zeroed(len: usize) -> Self {
        Self {
            x: vec![0.0; len],
            y: vec![0.0; len],
            z: vec![0.0; len],
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns `true` if there are no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Returns the number of entries that can be held without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.x.capacity().min(self.y.capacity()).min(self.z.capacity())
    }

    /// Reserves capacity for at least `additional` more entries on every axis.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.x.reserve(additional);
        self.y.reserve(additional);
        self.z.reserve(additional);
    }

    /// Appends a vector.
    #[inline]
    pub fn push(&mut self, v: Vec3) {
        self.x.push(v.x);
        self.y.push(v.y);
        self.z.push(v.z);
    }

    /// Removes every entry, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
        self.z.clear();
    }

    /// Resizes every axis to `len`, filling new entries with zero.
    #[inline]
    pub fn resize(&mut self, len: usize) {
        self.x.resize(len, 0.0);
        self.y.resize(len, 0.0);
        self.z.resize(len, 0.0);
    }

    /// Sets every component to zero.
    #[inline]
    pub fn fill_zero(&mut self) {
        self.x.fill(0.0);
        self.y.fill(0.0);
        self.z.fill(0.0);
    }

    /// Returns the vector at `index`.
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Vec3 {
        Vec3::new(self.x[index], self.y[index], self.z[index])
    }

    /// Overwrites the vector at `index`.
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn set(&mut self, index: usize, v: Vec3) {
        self.x[index] = v.x;
        self.y[index] = v.y;
        self.z[index] = v.z;
    }

    /// Returns the sequence of one axis, `0` being x, `1` y and `2` z.
    #[inline]
    pub fn axis(&self, axis: usize) -> &[f64] {
        match axis {
            0 => &self.x,
            1 => &self.y,
            _ => &self.z,
        }
    }

    /// Returns an iterator over the stored vectors.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Vec3> + '_ {
        (0..self.len()).map(|i| self.get(i))
    }

    /// Copies the first `self.len()` entries of `other` into `self`.
    ///
    /// Panics if `other` is shorter than `self`.
    #[inline]
    pub fn copy_from(&mut self, other: &Columns) {
        let len = self.len();
        self.x.copy_from_slice(&other.x[..len]);
        self.y.copy_from_slice(&other.y[..len]);
        self.z.copy_from_slice(&other.z[..len]);
    }

    /// Adds `factor * rhs` to `self`, component by component.
    ///
    /// Panics if `rhs` is shorter than `self`.
    #[inline]
    pub fn add_scaled(&mut self, rhs: &Columns, factor: f64) {
        for (axis, out) in [&mut self.x, &mut self.y, &mut self.z].into_iter().enumerate() {
            let rhs = &rhs.axis(axis)[..out.len()];
            out.iter_mut().zip(rhs).for_each(|(out, r)| *out += factor * r);
        }
    }

    /// Overwrites `self` with `base + dt * Σ cₖ·termₖ`, component by component.
    ///
    /// Every term and `base` must hold at least `self.len()` entries.
    #[inline]
    pub fn combine<const K: usize>(&mut self, base: &Columns, dt: f64, terms: [(f64, &Columns); K]) {
        for (axis, out) in [&mut self.x, &mut self.y, &mut self.z].into_iter().enumerate() {
            let base = base.axis(axis);

            for (i, out) in out.iter_mut().enumerate() {
                let sum: f64 = terms.iter().map(|(c, k)| c * k.axis(axis)[i]).sum();
                *out = base[i] + dt * sum;
            }
        }
    }

    /// Returns a borrowed view of the three sequences.
    #[inline]
    pub fn view(&self) -> ColumnsView<'_> {
        ColumnsView {
            x: &self.x,
            y: &self.y,
            z: &self.z,
        }
    }

    /// Returns a mutable view of the three sequences. The view cannot change their length.
    #[inline]
    pub fn view_mut(&mut self) -> ColumnsViewMut<'_> {
        ColumnsViewMut {
            x: &mut self.x,
            y: &mut self.y,
            z: &mut self.z,
        }
    }
}

impl FromIterator<Vec3> for Columns {
    #[inline]
    fn from_iter<I: IntoIterator<Item = Vec3>>(iter: I) -> Self {
        let mut columns = Columns::new();
        iter.into_iter().for_each(|v| columns.push(v));
        columns
    }
}

/// Index-aligned slices sharing memory with a [`Columns`] storage.
#[derive(Clone, Copy, Debug)]
#[allow(missing_docs)]
pub struct ColumnsView<'a> {
    pub x: &'a [f64],
    pub y: &'a [f64],
    pub z: &'a [f64],
}

impl ColumnsView<'_> {
    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns `true` if there are no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Returns the vector at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Vec3> {
        Some(Vec3::new(
            *self.x.get(index)?,
            *self.y.get(index)?,
            *self.z.get(index)?,
        ))
    }

    /// Returns an iterator over the viewed vectors.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Vec3> + '_ {
        (0..self.len()).map(|i| Vec3::new(self.x[i], self.y[i], self.z[i]))
    }
}

#[cfg(feature = "bytemuck")]
impl<'a> ColumnsView<'a> {
    /// Returns the raw bytes of the x, y and z sequences, in native endianness. The bytes borrow
    /// the underlying storage, not the view.
    #[inline]
    pub fn as_bytes(&self) -> [&'a [u8]; 3] {
        [
            bytemuck::cast_slice(self.x),
            bytemuck::cast_slice(self.y),
            bytemuck::cast_slice(self.z),
        ]
    }
}

/// Mutable index-aligned slices sharing memory with a [`Columns`] storage.
#[derive(Debug)]
#[allow(missing_docs)]
pub struct ColumnsViewMut<'a> {
    pub x: &'a mut [f64],
    pub y: &'a mut [f64],
    pub z: &'a mut [f64],
}

impl ColumnsViewMut<'_> {
    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns `true` if there are no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Overwrites the vector at `index`.
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn set(&mut self, index: usize, v: Vec3) {
        self.x[index] = v.x;
        self.y[index] = v.y;
        self.z[index] = v.z;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_get() {
        let mut columns = Columns::new();
        columns.push(Vec3::new(1.0, 2.0, 3.0));
        columns.push(Vec3::new(4.0, 5.0, 6.0));

        assert_eq!(columns.len(), 2);
        assert_eq!(columns.get(1), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(columns.axis(1), &[2.0, 5.0]);

        columns.clear();
        assert!(columns.is_empty());
    }

    #[test]
    fn combine_weighted_terms() {
        let base: Columns = [Vec3::ONE, Vec3::ZERO].into_iter().collect();
        let k1: Columns = [Vec3::X, Vec3::Y].into_iter().collect();
        let k2: Columns = [Vec3::Z, Vec3::splat(2.0)].into_iter().collect();

        let mut out = Columns::zeroed(2);
        out.combine(&base, 0.5, [(2.0, &k1), (1.0, &k2)]);

        assert_eq!(out.get(0), Vec3::new(2.0, 1.0, 1.5));
        assert_eq!(out.get(1), Vec3::new(1.0, 2.0, 1.0));
    }

    #[test]
    fn add_scaled() {
        let mut columns: Columns = [Vec3::ONE, Vec3::X].into_iter().collect();
        let rhs: Columns = [Vec3::new(2.0, 4.0, 6.0), Vec3::Z].into_iter().collect();
        columns.add_scaled(&rhs, 0.5);

        assert_eq!(columns.get(0), Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(columns.get(1), Vec3::new(1.0, 0.0, 0.5));
    }

    #[test]
    fn views_share_memory() {
        let mut columns = Columns::zeroed(3);
        columns.view_mut().set(2, Vec3::new(7.0, 8.0, 9.0));

        let view = columns.view();
        assert_eq!(view.len(), 3);
        assert_eq!(view.get(2), Some(Vec3::new(7.0, 8.0, 9.0)));
        assert_eq!(view.get(3), None);
        assert_eq!(view.x.as_ptr(), columns.x.as_ptr());
    }

    #[cfg(feature = "bytemuck")]
    #[test]
    fn byte_view() {
        let columns: Columns = [Vec3::new(1.0, 2.0, 3.0)].into_iter().collect();
        let [x, _, z] = columns.view().as_bytes();
        assert_eq!(x, 1.0f64.to_ne_bytes());
        assert_eq!(z.len(), std::mem::size_of::<f64>());
    }
}
