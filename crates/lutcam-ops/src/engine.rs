//! Applying a 3D LUT to an RGB8 frame in place.
//!
//! Each pixel is interpolated through the cube independently (see
//! [`trilinear`](crate::trilinear)), converted according to the
//! [`OutputMode`] and [`Quantize`](crate::Quantize) options, and written
//! back into the same bytes.
//!
//! # Example
//!
//! ```rust
//! use lutcam_core::RgbFrame;
//! use lutcam_lut::Lut3D;
//! use lutcam_ops::{apply, FilterOptions};
//!
//! let mut bytes = vec![30u8, 60, 90, 255, 255, 255];
//! let mut frame = RgbFrame::new(&mut bytes, 2, 1);
//! let stats = apply(&mut frame, &Lut3D::identity(17), &FilterOptions::default()).unwrap();
//! assert_eq!(stats.processed, 2);
//! assert_eq!(bytes[3..], [255, 255, 255]);
//! ```

use std::path::Path;
use std::time::{Duration, Instant};

use lutcam_core::{RgbFrame, Vec3f, CHANNELS};
use lutcam_lut::{cube, Lut3D, LutCache};
use tracing::{debug, error, info, trace, warn};

use crate::options::{FilterOptions, OutputMode, Schedule};
use crate::trilinear;
use crate::{OpsError, OpsResult};

/// Rows between progress log lines.
pub const PROGRESS_INTERVAL: usize = 50;

/// Summary of one transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Pixels rewritten
    pub processed: usize,
    /// Pixels left untouched because they fell outside the buffer
    pub skipped: usize,
    /// Wall time spent in the transform
    pub elapsed: Duration,
}

/// Applies `lut` to every pixel of `frame`.
///
/// # Errors
///
/// [`OpsError::EmptyLut`] if the cube has no samples; the frame is not
/// touched. Pixels outside the backing buffer are skipped, not errors.
pub fn apply(frame: &mut RgbFrame<'_>, lut: &Lut3D, opts: &FilterOptions) -> OpsResult<FilterStats> {
    if lut.is_empty() {
        return Err(OpsError::EmptyLut);
    }

    let start = Instant::now();
    let (width, height) = frame.dimensions();
    debug!(width, height, bytes = frame.declared_len(), "Applying LUT filter");
    log_lut(lut);

    if !frame.is_complete() {
        warn!(
            declared = frame.declared_len(),
            usable = frame.usable_len(),
            "Frame buffer is shorter than its dimensions"
        );
    }

    let processed = match opts.schedule() {
        Schedule::Sequential { yield_every } => sequential_rows(frame, lut, opts, yield_every),
        Schedule::Parallel => parallel_rows(frame, lut, opts),
    };

    let total = (width as usize).saturating_mul(height as usize);
    let stats = FilterStats {
        processed,
        skipped: total.saturating_sub(processed),
        elapsed: start.elapsed(),
    };

    if stats.skipped > 0 {
        warn!(skipped = stats.skipped, "Skipped pixels outside the frame buffer");
    }
    info!(
        processed = stats.processed,
        elapsed_ms = stats.elapsed.as_millis(),
        "LUT filter applied"
    );
    Ok(stats)
}

/// Loads the LUT at `lut_path` and applies it to `buffer` in place.
///
/// This is the single call a capture pipeline makes: load, check the cube
/// is non-empty, transform, report. On any load failure the buffer is left
/// unmodified.
pub fn apply_lut_file<P: AsRef<Path>>(
    buffer: &mut [u8],
    width: u32,
    height: u32,
    lut_path: P,
    opts: &FilterOptions,
) -> OpsResult<FilterStats> {
    let report = cube::load_with(lut_path.as_ref(), opts.parse).map_err(|e| {
        error!(error = %e, "Failed to load LUT file");
        OpsError::from(e)
    })?;

    let mut frame = RgbFrame::new(buffer, width, height);
    apply(&mut frame, &report.lut, opts)
}

/// Like [`apply_lut_file`], but reuses cubes held in `cache`.
///
/// The cache always parses tolerantly; `opts.parse` is not consulted.
pub fn apply_lut_file_cached<P: AsRef<Path>>(
    buffer: &mut [u8],
    width: u32,
    height: u32,
    lut_path: P,
    cache: &LutCache,
    opts: &FilterOptions,
) -> OpsResult<FilterStats> {
    let lut = cache.get_or_load(lut_path).map_err(|e| {
        error!(error = %e, "Failed to load LUT file");
        OpsError::from(e)
    })?;

    let mut frame = RgbFrame::new(buffer, width, height);
    apply(&mut frame, &lut, opts)
}

fn log_lut(lut: &Lut3D) {
    debug!(size = lut.size(), entries = lut.entry_count(), "LUT");
    if let (Some(first), Some(middle), Some(last)) = (lut.first(), lut.middle(), lut.last()) {
        debug!("First LUT entry: {}", first);
        debug!("Middle LUT entry: {}", middle);
        debug!("Last LUT entry: {}", last);
    }
}

fn sequential_rows(
    frame: &mut RgbFrame<'_>,
    lut: &Lut3D,
    opts: &FilterOptions,
    yield_every: usize,
) -> usize {
    let width = frame.width() as usize;
    let height = frame.height();
    let mut processed = 0;

    for (y, row) in frame.rows_mut().enumerate() {
        if y % PROGRESS_INTERVAL == 0 {
            debug!("Processing row {} of {}", y, height);
        }
        if yield_every > 0 && y > 0 && y % yield_every == 0 {
            std::thread::yield_now();
            trace!(row = y, "Yielded to scheduler");
        }
        processed += transform_row(row, width, lut, opts);
    }

    processed
}

#[cfg(feature = "parallel")]
fn parallel_rows(frame: &mut RgbFrame<'_>, lut: &Lut3D, opts: &FilterOptions) -> usize {
    crate::parallel::transform_rows(frame, lut, opts)
}

#[cfg(not(feature = "parallel"))]
fn parallel_rows(frame: &mut RgbFrame<'_>, lut: &Lut3D, opts: &FilterOptions) -> usize {
    sequential_rows(frame, lut, opts, opts.yield_every)
}

/// Transforms the pixels of one row; returns how many were rewritten.
///
/// `row` may be shorter than `width * 3` when the buffer ends mid-row.
pub(crate) fn transform_row(row: &mut [u8], width: usize, lut: &Lut3D, opts: &FilterOptions) -> usize {
    let mut done = 0;

    for x in 0..width {
        let idx = x * CHANNELS;
        if idx + 2 >= row.len() {
            // Every later pixel of the row is past the end as well.
            break;
        }

        let Some(out) = trilinear::sample(lut, [row[idx], row[idx + 1], row[idx + 2]]) else {
            continue;
        };
        row[idx..idx + CHANNELS].copy_from_slice(&encode(out, opts));
        done += 1;
    }

    done
}

/// Converts an interpolated color to output bytes.
#[inline]
fn encode(out: Vec3f, opts: &FilterOptions) -> [u8; 3] {
    let q = opts.quantize;
    match opts.mode {
        OutputMode::Monochrome => [q.to_u8(out.mean().clamp(0.0, 1.0)); 3],
        OutputMode::Color => {
            let c = out.saturate();
            [q.to_u8(c.r), q.to_u8(c.g), q.to_u8(c.b)]
        }
    }
}
