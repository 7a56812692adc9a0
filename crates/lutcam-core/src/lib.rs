//! # lutcam-core
//!
//! Core types shared by the lutcam crates.
//!
//! - [`Vec3f`] - A single LUT color sample (three `f32` components)
//! - [`RgbFrame`] - Mutable, borrowed view over an interleaved RGB8 buffer
//! - [`Error`] - Frame access errors
//!
//! ## Crate Structure
//!
//! ```text
//! lutcam-core (this crate)
//!    ^
//!    |
//!    +-- lutcam-lut (LUT cube + .cube loader)
//!    +-- lutcam-ops (trilinear transform engine)
//!    +-- lutcam-cli (command line front end)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use lutcam_core::RgbFrame;
//!
//! let mut bytes = vec![0u8; 4 * 2 * 3];
//! let frame = RgbFrame::new(&mut bytes, 4, 2);
//! assert_eq!(frame.declared_len(), 24);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod frame;
pub mod pixel;

pub use error::{Error, Result};
pub use frame::{RgbFrame, CHANNELS};
pub use pixel::Vec3f;
