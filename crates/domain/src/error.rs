//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HeatGateError`] via `#[from]` or an explicit `into_domain()`.

/// Top-level error shared by the application and adapter layers.
#[derive(Debug, thiserror::Error)]
pub enum HeatGateError {
    /// Request input failed validation.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A zone lookup or scan found nothing.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The caller did not present the shared secret.
    #[error("forbidden")]
    Forbidden,

    /// The vendor heating API failed or returned something unusable.
    #[error("heating API error")]
    Vendor(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Unrecoverable condition; the process is expected to terminate.
    #[error("fatal error")]
    Fatal(#[from] FatalError),
}

impl HeatGateError {
    /// Wrap any adapter error as a [`HeatGateError::Vendor`].
    pub fn vendor(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Vendor(Box::new(err))
    }

    /// Whether this error should stop the process instead of being retried.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    /// Render the error and its whole source chain on one line, for logs.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            out.push_str(": ");
            out.push_str(&err.to_string());
            source = err.source();
        }
        out
    }
}

/// Input validation failures.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// `zone` query parameter was required but absent.
    #[error("Query parameter 'zone' is required")]
    MissingZone,
}

/// Lookup failures surfaced to callers as 404.
#[derive(Debug, thiserror::Error)]
pub enum NotFoundError {
    /// No zone carries the requested name.
    #[error("Zone '{0}' not found")]
    Zone(String),

    /// A detection scan found no zone with an open window.
    #[error("No zone with open window detected")]
    NoOpenWindow,
}

/// Errors that terminate the process.
#[derive(Debug, thiserror::Error)]
pub enum FatalError {
    /// The token file exists but cannot be read or written.
    #[error("permission denied on token file {path}")]
    PermissionDenied {
        /// Path of the token file.
        path: String,
        #[source]
        source: std::io::Error,
    },
}
