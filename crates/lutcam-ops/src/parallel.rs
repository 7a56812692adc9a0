//! Row-parallel transform using Rayon.
//!
//! Pixels are independent, so rows are handed to the pool as disjoint
//! mutable chunks and the only synchronization is the final join.

use lutcam_core::RgbFrame;
use lutcam_lut::Lut3D;
use rayon::prelude::*;

use crate::engine::transform_row;
use crate::FilterOptions;

/// Transforms all rows of `frame` on the rayon pool.
///
/// Returns the number of pixels rewritten.
pub(crate) fn transform_rows(frame: &mut RgbFrame<'_>, lut: &Lut3D, opts: &FilterOptions) -> usize {
    let width = frame.width() as usize;
    let stride = frame.stride();
    if stride == 0 {
        return 0;
    }

    frame
        .as_bytes_mut()
        .par_chunks_mut(stride)
        .map(|row| transform_row(row, width, lut, opts))
        .sum()
}
