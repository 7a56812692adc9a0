//! LUT error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::cube::LineIssue;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur while loading or writing a LUT.
///
/// Oversized cubes are not an error: the loader clamps them. Malformed
/// lines are only an error in [`ParseMode::Strict`](crate::ParseMode::Strict).
#[derive(Debug, Error)]
pub enum LutError {
    /// The LUT source could not be opened or read.
    #[error("cannot read LUT source {}: {source}", .path.display())]
    SourceUnavailable {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// No `LUT_3D_SIZE` directive was found, so no cube was built.
    #[error("LUT has no LUT_3D_SIZE directive")]
    DegenerateLut,

    /// Invalid LUT size.
    #[error("invalid LUT size: {0}")]
    InvalidSize(String),

    /// Strict parsing found malformed lines.
    #[error(
        "malformed LUT: {} bad line(s), first at line {}",
        .issues.len(),
        .issues.first().map_or(0, |i| i.line)
    )]
    Malformed {
        /// Every malformed line that was found
        issues: Vec<LineIssue>,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LutError {
    /// Returns `true` when the error means "no usable cube" as opposed to a
    /// rejected-but-readable file.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. } | Self::DegenerateLut)
    }
}
