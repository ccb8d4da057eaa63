use crate::foundation::core::EcLevel;

/// Convenience result type used across menuqr.
pub type MenuQrResult<T> = Result<T, MenuQrError>;

/// Top-level error taxonomy used by composer, exporter and share APIs.
#[derive(thiserror::Error, Debug)]
pub enum MenuQrError {
    /// Customization or configuration values outside their allowed range.
    #[error("validation error: {0}")]
    Validation(String),

    /// Target URL missing or malformed; rendering is blocked.
    #[error("input error: {0}")]
    Input(String),

    /// The target URL does not fit in a QR symbol at the requested level.
    #[error(
        "capacity error: {len} bytes do not fit at error correction level {level}; \
         lower the error correction level or shorten the URL"
    )]
    Capacity {
        /// Encoded payload length in bytes.
        len: usize,
        /// Requested error correction level.
        level: EcLevel,
    },

    /// A logo (or other asset) could not be fetched or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// An export was requested before its source surface exists.
    #[error("not ready: {0}")]
    NotReady(String),

    /// Transport or HTTP status failure talking to the share backend.
    #[error("network error: {0}")]
    Network(String),

    /// The operation observed its cancellation token before continuing.
    #[error("operation cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MenuQrError {
    /// Build a [`MenuQrError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MenuQrError::Input`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build a [`MenuQrError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`MenuQrError::NotReady`] value.
    pub fn not_ready(msg: impl Into<String>) -> Self {
        Self::NotReady(msg.into())
    }

    /// Build a [`MenuQrError::Network`] value.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// `true` for failures the user can retry or work around without changing input.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Asset(_) | Self::NotReady(_) | Self::Network(_) | Self::Cancelled
        )
    }
}

impl From<reqwest::Error> for MenuQrError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
