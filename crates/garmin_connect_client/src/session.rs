//! On-disk hand-off of session documents.
//!
//! Session loading in [`http_client`](crate::http_client) is a plain
//! directory read: whoever stages the document and whoever loads it agree
//! only on a directory and the fixed [`TOKEN_FILE`] name inside it.

use std::path::{Path, PathBuf};

use crate::GarminError;

/// Fixed filename the session loader reads. The hand-off only works when
/// stager and loader agree on this exact name.
pub const TOKEN_FILE: &str = "oauth1_token.json";

/// Narrow adapter around the fixed-path convention so resolution logic never
/// hardcodes paths itself.
#[derive(Clone, Debug)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Process-local default under the system temp directory.
    pub fn scratch() -> Self {
        Self::new(std::env::temp_dir().join("garmin-fetch-session"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `document` under [`TOKEN_FILE`], creating the directory when
    /// missing, and return the directory to load from. Re-staging
    /// overwrites; the last write wins.
    pub fn stage(&self, document: &serde_json::Value) -> Result<PathBuf, GarminError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| GarminError::Session(format!("creating {}: {e}", self.dir.display())))?;
        let path = self.dir.join(TOKEN_FILE);
        let contents = serde_json::to_string_pretty(document)
            .map_err(|e| GarminError::Session(format!("encoding session document: {e}")))?;
        std::fs::write(&path, contents)
            .map_err(|e| GarminError::Session(format!("writing {}: {e}", path.display())))?;
        Ok(self.dir.clone())
    }
}
