//! Capability traits and models for talking to Garmin Connect.
//!
//! The entry point is [`GarminConnect`]: restoring a saved session or logging
//! in with credentials yields a [`GarminClient`] that can perform authorized
//! data calls. Wire details live in [`http_client`]; the on-disk session
//! hand-off convention lives in [`session`].

use std::path::Path;

use async_trait::async_trait;
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

pub mod http_client;
pub mod session;

#[derive(Debug, Error)]
pub enum GarminError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("authentication rejected: {0}")]
    Auth(String),
    #[error("rate limited by the service")]
    RateLimited,
    #[error("unexpected status {0}: {1}")]
    Status(u16, String),
    #[error("session error: {0}")]
    Session(String),
}

/// One activity as returned by the activity search endpoint.
///
/// Read-only projection: only the fields the reporting side consumes are
/// modeled, everything else in the payload is ignored.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub start_time_local: String,
    pub activity_name: String,
    /// Meters. Some activity types (strength, yoga) omit this.
    #[serde(default)]
    pub distance: f64,
}

/// Username/password pair for the explicit login fallback.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// Entry point to Garmin Connect: each method is one way of obtaining an
/// authorized [`GarminClient`].
#[async_trait]
pub trait GarminConnect: Send + Sync + 'static {
    /// Load a previously saved session from `token_dir`.
    ///
    /// Expects the fixed filename convention of [`session::TOKEN_FILE`]; a
    /// document staged under any other name is invisible here.
    async fn restore_session(
        &self,
        token_dir: &Path,
    ) -> Result<Box<dyn GarminClient>, GarminError>;

    /// Perform a fresh username/password login.
    async fn login(
        &self,
        credentials: &Credentials,
    ) -> Result<Box<dyn GarminClient>, GarminError>;
}

/// Authorized handle to the data endpoints. Values only exist as the output
/// of a successful [`GarminConnect`] call.
#[async_trait]
pub trait GarminClient: std::fmt::Debug + Send + Sync + 'static {
    /// Most recent activities first; `start` is the paging offset (0 = newest).
    async fn get_activities(
        &self,
        start: u32,
        limit: u32,
    ) -> Result<Vec<ActivityRecord>, GarminError>;
}
