//! Error types for the link layer.

use thiserror::Error;

/// Result alias for link operations.
pub type LinkResult<T> = std::result::Result<T, LinkError>;

/// Link errors.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Notification attempted before the service was started.
    #[error("link service not initialized")]
    NotInitialized,

    /// A subscriber failed to take a payload.
    #[error("delivery failed: {0}")]
    Delivery(String),
}

impl LinkError {
    /// Creates a delivery error.
    pub fn delivery(msg: impl Into<String>) -> Self {
        Self::Delivery(msg.into())
    }
}
