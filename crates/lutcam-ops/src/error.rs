//! Error types for the transform engine.

use lutcam_lut::LutError;
use thiserror::Error;

/// Error type for transform operations.
///
/// Only whole-cube problems surface here. Pixels that fall outside the
/// buffer are skipped and counted in [`FilterStats`](crate::FilterStats).
#[derive(Error, Debug)]
pub enum OpsError {
    /// The cube has no samples.
    #[error("LUT is empty")]
    EmptyLut,

    /// The LUT could not be loaded.
    #[error(transparent)]
    Lut(#[from] LutError),
}

/// Result type for transform operations.
pub type OpsResult<T> = Result<T, OpsError>;
