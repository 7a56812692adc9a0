//! # lutcam-ops
//!
//! The color transform engine: applies a 3D LUT to an interleaved RGB8
//! camera frame in place using trilinear interpolation.
//!
//! # Modules
//!
//! - [`trilinear`] - cell lookup and the eight blend weights
//! - [`engine`] - frame transform and the file-level entry point
//! - [`options`] - output mode, quantization, scheduling
//!
//! # Example
//!
//! ```rust,ignore
//! use lutcam_ops::{apply_lut_file, FilterOptions};
//!
//! let stats = apply_lut_file(&mut frame_bytes, 640, 480, "mono.cube", &FilterOptions::default())?;
//! println!("{} pixels graded", stats.processed);
//! ```
//!
//! # Output
//!
//! The default [`OutputMode::Monochrome`] averages the interpolated
//! channels and writes the same value to R, G and B. Use
//! [`OutputMode::Color`] to keep the LUT's color output.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod engine;
pub mod options;
pub mod trilinear;

#[cfg(feature = "parallel")]
mod parallel;

pub use engine::{apply, apply_lut_file, apply_lut_file_cached, FilterStats, PROGRESS_INTERVAL};
pub use error::{OpsError, OpsResult};
pub use options::{FilterOptions, OutputMode, Quantize, Schedule, DEFAULT_YIELD_EVERY};
pub use trilinear::{Cell, TrilinearWeights};
