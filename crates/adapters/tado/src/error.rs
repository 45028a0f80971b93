//! tado adapter error types.

use heatgate_domain::error::{FatalError, HeatGateError};

/// Errors specific to the tado adapter.
#[derive(Debug, thiserror::Error)]
pub enum TadoError {
    /// The HTTP request could not be sent or its body not read.
    #[error("tado request failed")]
    Http(#[from] reqwest::Error),

    /// tado answered with a non-success status.
    #[error("tado returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The token file could not be read or written.
    #[error("token file error")]
    TokenFile(#[source] std::io::Error),

    /// The token file is not accessible to this process.
    #[error("permission denied on token file {path}")]
    PermissionDenied {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The token could not be serialized for the token file.
    #[error("failed to encode token file")]
    Encode(#[source] serde_json::Error),

    /// The account has no home to control.
    #[error("tado account has no home")]
    NoHome,

    /// A zone command was issued before the device was activated.
    #[error("device activation not completed")]
    NotActivated,
}

impl TadoError {
    /// Convert for propagation across port boundaries.
    ///
    /// Token-file permission problems become [`HeatGateError::Fatal`];
    /// everything else is a retryable [`HeatGateError::Vendor`].
    pub fn into_domain(self) -> HeatGateError {
        match self {
            Self::PermissionDenied { path, source } => {
                FatalError::PermissionDenied { path, source }.into()
            }
            other => HeatGateError::vendor(other),
        }
    }

    /// Build the error for a token-file IO failure.
    pub(crate) fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            Self::PermissionDenied {
                path: path.display().to_string(),
                source: err,
            }
        } else {
            Self::TokenFile(err)
        }
    }
}

impl From<TadoError> for HeatGateError {
    fn from(err: TadoError) -> Self {
        err.into_domain()
    }
}
