//! HTTP implementation of the Garmin Connect capability traits.
//!
//! [`ReqwestGarminConnect`] implements [`GarminConnect`](crate::GarminConnect):
//! it restores staged sessions from disk and performs SSO form logins. Both
//! paths yield a [`ReqwestGarminClient`] bound to the extracted token.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::session::TOKEN_FILE;
use crate::{ActivityRecord, Credentials, GarminClient, GarminConnect, GarminError};

/// Data API host.
pub const DEFAULT_API_BASE_URL: &str = "https://connectapi.garmin.com";
/// Single sign-on host used for username/password logins.
pub const DEFAULT_SSO_BASE_URL: &str = "https://sso.garmin.com";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Entry-point client for Garmin Connect using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestGarminConnect {
    api_base_url: String,
    sso_base_url: String,
    client: reqwest::Client,
}

impl ReqwestGarminConnect {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `api_base_url` - base URL of the data API (e.g., "https://connectapi.garmin.com")
    /// * `sso_base_url` - base URL of the sign-on service (e.g., "https://sso.garmin.com")
    pub fn new(api_base_url: &str, sso_base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("reqwest client build should not fail");
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            sso_base_url: sso_base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn authorized(&self, token: SecretString) -> ReqwestGarminClient {
        ReqwestGarminClient {
            api_base_url: self.api_base_url.clone(),
            token,
            client: self.client.clone(),
        }
    }
}

/// The single field of the session document the client needs. Everything
/// else in the document is opaque and ignored.
#[derive(Deserialize)]
struct SessionToken {
    #[serde(alias = "access_token", alias = "token")]
    oauth_token: String,
}

impl SessionToken {
    fn into_secret(self) -> SecretString {
        SecretString::new(self.oauth_token.into())
    }
}

#[async_trait]
impl GarminConnect for ReqwestGarminConnect {
    async fn restore_session(
        &self,
        token_dir: &Path,
    ) -> Result<Box<dyn GarminClient>, GarminError> {
        let path = token_dir.join(TOKEN_FILE);
        let raw = std::fs::read_to_string(&path)
            .map_err(|e| GarminError::Session(format!("reading {}: {e}", path.display())))?;
        let token: SessionToken = serde_json::from_str(&raw).map_err(|e| {
            GarminError::Session(format!("no usable token in {}: {e}", path.display()))
        })?;
        tracing::debug!("restored session token from {}", path.display());
        Ok(Box::new(self.authorized(token.into_secret())))
    }

    async fn login(
        &self,
        credentials: &Credentials,
    ) -> Result<Box<dyn GarminClient>, GarminError> {
        let url = format!("{}/sso/signin", self.sso_base_url);
        let form = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.expose_secret()),
        ];
        let resp = self.client.post(&url).form(&form).send().await?;
        let token: SessionToken = json_or_error(resp).await?;
        tracing::debug!("signed in with username/password");
        Ok(Box::new(self.authorized(token.into_secret())))
    }
}

/// Authorized client produced by [`ReqwestGarminConnect`]; holds the bearer
/// token extracted from the session document.
#[derive(Clone, Debug)]
pub struct ReqwestGarminClient {
    api_base_url: String,
    token: SecretString,
    client: reqwest::Client,
}

#[async_trait]
impl GarminClient for ReqwestGarminClient {
    async fn get_activities(
        &self,
        start: u32,
        limit: u32,
    ) -> Result<Vec<ActivityRecord>, GarminError> {
        let url = format!(
            "{}/activitylist-service/activities/search/activities",
            self.api_base_url
        );
        let resp = self
            .client
            .get(&url)
            .query(&[("start", start.to_string()), ("limit", limit.to_string())])
            .bearer_auth(self.token.expose_secret())
            .send()
            .await?;
        json_or_error(resp).await
    }
}

/// Decode a JSON body, converting non-success statuses to appropriate errors.
async fn json_or_error<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, GarminError> {
    if !resp.status().is_success() {
        return Err(error_from_response(resp).await);
    }
    Ok(resp.json::<T>().await?)
}

/// Extract error information from a failed response.
async fn error_from_response(resp: reqwest::Response) -> GarminError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let snippet: String = body.chars().take(256).collect();

    match status {
        401 | 403 => GarminError::Auth(snippet),
        429 => GarminError::RateLimited,
        _ => GarminError::Status(status, snippet),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_token_accepts_known_aliases() {
        for raw in [
            r#"{"oauth_token": "t1"}"#,
            r#"{"access_token": "t1"}"#,
            r#"{"token": "t1"}"#,
        ] {
            let parsed: SessionToken = serde_json::from_str(raw).expect("parse");
            assert_eq!(parsed.oauth_token, "t1");
        }
    }

    #[test]
    fn session_token_ignores_the_rest_of_the_document() {
        let raw = r#"{"oauth_token": "t2", "oauth_token_secret": "s", "mfa_token": null}"#;
        let parsed: SessionToken = serde_json::from_str(raw).expect("parse");
        assert_eq!(parsed.oauth_token, "t2");
    }

    #[test]
    fn session_token_requires_a_token_field() {
        let res: Result<SessionToken, _> = serde_json::from_str(r#"{"scope": "all"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn base_urls_are_normalized() {
        let c = ReqwestGarminConnect::new("https://api.example.com/", "https://sso.example.com/");
        assert_eq!(c.api_base_url, "https://api.example.com");
        assert_eq!(c.sso_base_url, "https://sso.example.com");
    }
}
