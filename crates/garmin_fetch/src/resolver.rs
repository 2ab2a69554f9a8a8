//! Ordered credential strategies: saved session first, then password login.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use garmin_connect_client::session::SessionStore;
use garmin_connect_client::{Credentials, GarminClient, GarminConnect, GarminError};
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("username/password login failed: {0}")]
    LoginFailed(#[source] GarminError),
    #[error("no valid session and no username/password available")]
    NoCredentials,
}

/// Why the saved-session strategy did not produce a client. Only ever
/// logged; the caller falls through to the next strategy regardless.
#[derive(Debug, Error)]
enum RestoreError {
    #[error("decoding base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("parsing session document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("staging session document: {0}")]
    Stage(#[source] GarminError),
    #[error("loading session: {0}")]
    Load(#[source] GarminError),
}

/// Turns configuration into an authorized client by trying strategies in a
/// fixed order: the packed session from `GARMIN_SESSION_B64` first, then a
/// username/password login. The saved-session path runs first because
/// password logins may be rejected for shared network origins (e.g. CI
/// runners); the password pair is the fallback for interactive use.
pub struct CredentialResolver<'a> {
    config: &'a Config,
    connect: &'a dyn GarminConnect,
    store: &'a SessionStore,
}

impl<'a> CredentialResolver<'a> {
    pub fn new(
        config: &'a Config,
        connect: &'a dyn GarminConnect,
        store: &'a SessionStore,
    ) -> Self {
        Self {
            config,
            connect,
            store,
        }
    }

    /// Try each strategy in order and return the first client obtained.
    ///
    /// A broken saved session (bad base64, bad JSON, staging failure, or a
    /// rejected restore) is logged and falls through to the password login.
    /// A failed password login is fatal since there is nothing left to try.
    pub async fn resolve(&self) -> Result<Box<dyn GarminClient>, ResolveError> {
        if let Some(blob) = &self.config.session_b64 {
            match self.restore_saved_session(blob).await {
                Ok(client) => {
                    tracing::info!("authenticated from saved session");
                    return Ok(client);
                }
                Err(err) => {
                    tracing::warn!(
                        "failed to load saved session, will try username/password: {err}"
                    );
                }
            }
        }

        if let (Some(username), Some(password)) = (&self.config.username, &self.config.password) {
            let credentials = Credentials {
                username: username.clone(),
                password: password.clone(),
            };
            let client = self
                .connect
                .login(&credentials)
                .await
                .map_err(ResolveError::LoginFailed)?;
            tracing::info!("authenticated with username/password");
            return Ok(client);
        }

        Err(ResolveError::NoCredentials)
    }

    /// Unpack `blob`, stage it for the client library, and restore a session
    /// from the staged directory.
    async fn restore_saved_session(
        &self,
        blob: &str,
    ) -> Result<Box<dyn GarminClient>, RestoreError> {
        let raw = STANDARD.decode(blob.trim())?;
        let document: serde_json::Value = serde_json::from_slice(&raw)?;
        let token_dir = self.store.stage(&document).map_err(RestoreError::Stage)?;
        self.connect
            .restore_session(&token_dir)
            .await
            .map_err(RestoreError::Load)
    }
}
