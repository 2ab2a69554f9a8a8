use garmin_connect_client::http_client::{DEFAULT_API_BASE_URL, DEFAULT_SSO_BASE_URL};
use secrecy::SecretString;

/// How many activities to fetch and print when `GARMIN_FETCH_LIMIT` is unset.
pub const DEFAULT_ACTIVITY_COUNT: u32 = 5;

/// Everything the binary reads from the environment. No key is required
/// here; which combination is sufficient is decided by the resolver.
#[derive(Clone, Debug)]
pub struct Config {
    pub session_b64: Option<String>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub api_base_url: String,
    pub sso_base_url: String,
    pub limit: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function. This avoids mutating global environment in tests and keeps
    /// `from_env()` small and safe.
    ///
    /// Values set to the empty string count as unset.
    pub fn from_env_with<F>(mut get: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut get_set = |k: &str| get(k).filter(|v| !v.is_empty());
        let limit = get_set("GARMIN_FETCH_LIMIT")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_ACTIVITY_COUNT);
        Self {
            session_b64: get_set("GARMIN_SESSION_B64"),
            username: get_set("GARMIN_USERNAME"),
            password: get_set("GARMIN_PASSWORD").map(|p| SecretString::new(p.into())),
            api_base_url: get_set("GARMIN_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.into()),
            sso_base_url: get_set("GARMIN_SSO_BASE_URL")
                .unwrap_or_else(|| DEFAULT_SSO_BASE_URL.into()),
            limit,
        }
    }
}
