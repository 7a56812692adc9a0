//! 3-dimensional lookup table.
//!
//! A 3D LUT maps RGB input to RGB output through a cube of color samples.
//! This type only stores and indexes the cube; interpolation lives in
//! `lutcam-ops`.

use lutcam_core::Vec3f;

use crate::{LutError, LutResult};

/// A 3-dimensional lookup table.
///
/// # Structure
///
/// - `size^3` samples, each an RGB output value
/// - Stored red-fastest, the `.cube` file order:
///   `index = r + g * size + b * size^2`
/// - `size == 0` is the empty cube, the "nothing loaded" value
///
/// # Example
///
/// ```rust
/// use lutcam_lut::Lut3D;
///
/// let lut = Lut3D::identity(17);
/// assert_eq!(lut.entry_count(), 17 * 17 * 17);
/// assert_eq!(lut.get(16, 0, 0).unwrap().r, 1.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lut3D {
    data: Vec<Vec3f>,
    size: usize,
}

impl Lut3D {
    /// Creates a cube of `size^3` zero samples.
    ///
    /// Returns an empty cube if `size^3` does not fit in `usize`.
    pub fn with_size(size: usize) -> Self {
        match Self::entries(size) {
            Some(total) => Self {
                data: vec![Vec3f::default(); total],
                size,
            },
            None => Self::default(),
        }
    }

    /// Sample count for a cube of edge `size`, if representable.
    pub fn entries(size: usize) -> Option<usize> {
        size.checked_pow(3)
    }

    /// Creates an identity (pass-through) 3D LUT.
    ///
    /// The sample at grid point (r, g, b) is `(r, g, b) / (size - 1)`. Empty,
    /// like [`Lut3D::with_size`], if `size^3` overflows.
    pub fn identity(size: usize) -> Self {
        let Some(total) = Self::entries(size) else {
            return Self::default();
        };
        let mut data = Vec::with_capacity(total);
        let n = size.saturating_sub(1).max(1) as f32;

        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    data.push(Vec3f::new(r as f32 / n, g as f32 / n, b as f32 / n));
                }
            }
        }

        Self { data, size }
    }

    /// Creates a 3D LUT from raw data.
    ///
    /// Data must be red-fastest with exactly `size^3` entries.
    pub fn from_data(data: Vec<Vec3f>, size: usize) -> LutResult<Self> {
        if size == 0 {
            return Err(LutError::InvalidSize("size must be at least 1".into()));
        }
        let expected = Self::entries(size)
            .ok_or_else(|| LutError::InvalidSize(format!("size {} is too large", size)))?;
        if data.len() != expected {
            return Err(LutError::InvalidSize(format!(
                "expected {} entries for size {}, got {}",
                expected,
                size,
                data.len()
            )));
        }
        Ok(Self { data, size })
    }

    /// Edge length of the cube.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the total number of entries in the LUT.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` for the empty cube.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Largest valid flat index, or `None` for the empty cube.
    #[inline]
    pub fn max_index(&self) -> Option<usize> {
        self.data.len().checked_sub(1)
    }

    /// Flat index of grid position (r, g, b).
    #[inline]
    pub fn index(&self, r: usize, g: usize, b: usize) -> usize {
        r + g * self.size + b * self.size * self.size
    }

    /// Sample at grid position (r, g, b).
    #[inline]
    pub fn get(&self, r: usize, g: usize, b: usize) -> Option<Vec3f> {
        if r >= self.size || g >= self.size || b >= self.size {
            return None;
        }
        self.data.get(self.index(r, g, b)).copied()
    }

    /// All samples in flat order.
    #[inline]
    pub fn samples(&self) -> &[Vec3f] {
        &self.data
    }

    /// Overwrites the sample at a flat index. Returns `false` when the index
    /// is past the end of the cube.
    #[inline]
    pub fn set_flat(&mut self, index: usize, value: Vec3f) -> bool {
        match self.data.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// First sample in flat order.
    pub fn first(&self) -> Option<Vec3f> {
        self.data.first().copied()
    }

    /// Sample at flat index `len / 2`.
    pub fn middle(&self) -> Option<Vec3f> {
        self.data.get(self.data.len() / 2).copied()
    }

    /// Last sample in flat order.
    pub fn last(&self) -> Option<Vec3f> {
        self.data.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_corners() {
        let lut = Lut3D::identity(33);
        assert_eq!(lut.get(0, 0, 0), Some(Vec3f::splat(0.0)));
        assert_eq!(lut.get(32, 32, 32), Some(Vec3f::splat(1.0)));
        assert_eq!(lut.get(32, 0, 0), Some(Vec3f::new(1.0, 0.0, 0.0)));
        assert_eq!(lut.get(0, 0, 32), Some(Vec3f::new(0.0, 0.0, 1.0)));
        assert_eq!(lut.get(33, 0, 0), None);
    }

    #[test]
    fn test_red_fastest_layout() {
        let lut = Lut3D::identity(2);
        let s = lut.samples();
        assert_eq!(s[1], Vec3f::new(1.0, 0.0, 0.0));
        assert_eq!(s[2], Vec3f::new(0.0, 1.0, 0.0));
        assert_eq!(s[4], Vec3f::new(0.0, 0.0, 1.0));
        assert_eq!(lut.index(1, 1, 1), 7);
    }

    #[test]
    fn test_from_data() {
        let data = vec![Vec3f::splat(0.5); 8];
        let lut = Lut3D::from_data(data, 2).unwrap();
        assert_eq!(lut.size(), 2);
        assert_eq!(lut.max_index(), Some(7));

        assert!(Lut3D::from_data(vec![Vec3f::default(); 7], 2).is_err());
        assert!(Lut3D::from_data(Vec::new(), 0).is_err());
    }

    #[test]
    fn test_empty() {
        let lut = Lut3D::default();
        assert!(lut.is_empty());
        assert_eq!(lut.max_index(), None);
        assert_eq!(lut.first(), None);
        assert_eq!(lut.middle(), None);
        assert!(Lut3D::with_size(0).is_empty());
    }

    #[test]
    fn test_oversized_edge() {
        assert_eq!(Lut3D::entries(33), Some(35937));
        assert_eq!(Lut3D::entries(usize::MAX), None);
        assert!(Lut3D::with_size(usize::MAX).is_empty());
        assert!(Lut3D::identity(usize::MAX).is_empty());
        assert!(Lut3D::from_data(vec![Vec3f::default()], usize::MAX).is_err());
    }

    #[test]
    fn test_set_flat() {
        let mut lut = Lut3D::with_size(2);
        assert!(lut.set_flat(7, Vec3f::splat(1.0)));
        assert!(!lut.set_flat(8, Vec3f::splat(1.0)));
        assert_eq!(lut.last(), Some(Vec3f::splat(1.0)));
        assert_eq!(lut.middle(), Some(Vec3f::default()));
    }
}
