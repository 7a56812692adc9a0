//! # lutcam-lut
//!
//! 3D Look-Up Table storage and `.cube` loading for the lutcam pipeline.
//!
//! - [`Lut3D`] - the cube: `size^3` [`Vec3f`](lutcam_core::Vec3f) samples,
//!   red fastest
//! - [`cube`] - tolerant `.cube` loader (size capped at [`MAX_LUT_SIZE`]),
//!   optional strict mode, and writer
//! - [`LutCache`] - explicit cache for callers that reuse one LUT across
//!   many frames
//!
//! # Usage
//!
//! ```rust
//! use lutcam_lut::Lut3D;
//!
//! let lut = Lut3D::identity(33);
//! assert_eq!(lut.size(), 33);
//! ```
//!
//! # Dependencies
//!
//! - [`lutcam-core`] - `Vec3f` sample type
//! - [`thiserror`] - Error handling
//! - [`tracing`] - Load diagnostics
//!
//! # Used By
//!
//! - `lutcam-ops` - the transform engine
//! - `lutcam-cli` - `info` and `identity` commands

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cache;
mod error;
mod lut3d;
pub mod cube;

pub use cache::{CacheStats, LutCache};
pub use cube::{IssueKind, LineIssue, LoadReport, ParseMode, MAX_LUT_SIZE};
pub use error::{LutError, LutResult};
pub use lut3d::Lut3D;
