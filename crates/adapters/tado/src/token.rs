//! Refresh-token persistence.
//!
//! The file holds a single JSON object, `{"refresh_token": "<token>"}`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TadoError;

#[derive(Serialize, Deserialize)]
struct TokenFile {
    refresh_token: String,
}

/// Reads and writes the refresh token file.
#[derive(Debug, Clone)]
pub(crate) struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Stored refresh token, if any.
    ///
    /// A missing file or one that doesn't parse yields `None`; IO failures
    /// other than "not found" are errors.
    pub(crate) async fn load(&self) -> Result<Option<String>, TadoError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(TadoError::from_io(&self.path, err)),
        };
        match serde_json::from_str::<TokenFile>(&content) {
            Ok(file) if !file.refresh_token.is_empty() => Ok(Some(file.refresh_token)),
            Ok(_) => Ok(None),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "ignoring malformed token file"
                );
                Ok(None)
            }
        }
    }

    pub(crate) async fn save(&self, refresh_token: &str) -> Result<(), TadoError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| TadoError::from_io(&self.path, err))?;
        }
        let body = serde_json::to_string(&TokenFile {
            refresh_token: refresh_token.to_string(),
        })
        .map_err(TadoError::Encode)?;
        tokio::fs::write(&self.path, body)
            .await
            .map_err(|err| TadoError::from_io(&self.path, err))
    }
}
