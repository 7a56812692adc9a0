//! Trilinear lookup into a 3D LUT.
//!
//! An 8-bit input color is mapped into cube space, the enclosing grid cell
//! is located, and the eight corner samples are blended with weights that
//! are the products of the per-axis fractional offsets.
//!
//! Corner order everywhere in this module is `r | g << 1 | b << 2`, so
//! index 0 is the low corner `000` and index 7 the high corner `111`.

use lutcam_core::Vec3f;
use lutcam_lut::Lut3D;

/// Eight trilinear blend weights.
///
/// # Example
///
/// ```rust
/// use lutcam_ops::TrilinearWeights;
///
/// let w = TrilinearWeights::new(0.25, 0.5, 0.75);
/// assert!((w.sum() - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrilinearWeights([f32; 8]);

impl TrilinearWeights {
    /// Weights for fractional offsets `(dr, dg, db)` inside a cell.
    pub fn new(dr: f32, dg: f32, db: f32) -> Self {
        let mut w = [0.0f32; 8];
        for (corner, slot) in w.iter_mut().enumerate() {
            let wr = if corner & 1 != 0 { dr } else { 1.0 - dr };
            let wg = if corner & 2 != 0 { dg } else { 1.0 - dg };
            let wb = if corner & 4 != 0 { db } else { 1.0 - db };
            *slot = wr * wg * wb;
        }
        Self(w)
    }

    /// The weights in corner order.
    #[inline]
    pub fn weights(&self) -> [f32; 8] {
        self.0
    }

    /// Sum of all weights; 1 up to rounding.
    #[inline]
    pub fn sum(&self) -> f32 {
        self.0.iter().sum()
    }
}

/// The grid cell enclosing one input color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Lower grid index per axis, `clamp(floor(coord), 0, size - 1)`
    pub lo: [usize; 3],
    /// Upper grid index per axis, `clamp(lo + 1, 0, size - 1)`
    pub hi: [usize; 3],
    /// `coord - lo` per axis
    pub delta: [f32; 3],
}

impl Cell {
    /// Locates the cell for an 8-bit color in a cube of edge `size`.
    ///
    /// `size` must be at least 1.
    pub fn locate(rgb: [u8; 3], size: usize) -> Self {
        let top = size.saturating_sub(1);
        let scale = top as f32;
        let mut lo = [0usize; 3];
        let mut hi = [0usize; 3];
        let mut delta = [0.0f32; 3];

        for c in 0..3 {
            let coord = rgb[c] as f32 / 255.0 * scale;
            let c0 = (coord.floor().max(0.0) as usize).min(top);
            lo[c] = c0;
            hi[c] = (c0 + 1).min(top);
            delta[c] = coord - c0 as f32;
        }

        Self { lo, hi, delta }
    }

    /// Flat LUT indices of the eight corners.
    pub fn indices(&self, size: usize) -> [usize; 8] {
        let mut idx = [0usize; 8];
        for (corner, slot) in idx.iter_mut().enumerate() {
            let r = if corner & 1 != 0 { self.hi[0] } else { self.lo[0] };
            let g = if corner & 2 != 0 { self.hi[1] } else { self.lo[1] };
            let b = if corner & 4 != 0 { self.hi[2] } else { self.lo[2] };
            *slot = r + g * size + b * size * size;
        }
        idx
    }

    /// Blend weights for this cell.
    #[inline]
    pub fn weights(&self) -> TrilinearWeights {
        TrilinearWeights::new(self.delta[0], self.delta[1], self.delta[2])
    }
}

/// Interpolates `lut` at an 8-bit color.
///
/// Returns `None` for the empty cube, or if the low or high corner lands
/// outside the sample array.
pub fn sample(lut: &Lut3D, rgb: [u8; 3]) -> Option<Vec3f> {
    let max = lut.max_index()?;
    let size = lut.size();
    let cell = Cell::locate(rgb, size);
    let idx = cell.indices(size);

    // Corner indices grow monotonically from 000 to 111.
    if idx[0] > max || idx[7] > max {
        return None;
    }

    let samples = lut.samples();
    let w = cell.weights().weights();
    let mut out = Vec3f::default();
    for corner in 0..8 {
        out = out + samples[idx[corner]] * w[corner];
    }
    Some(out)
}
