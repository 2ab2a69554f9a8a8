use std::io;

use garmin_connect_client::http_client::ReqwestGarminConnect;
use garmin_connect_client::session::SessionStore;
use garmin_fetch::config::Config;
use garmin_fetch::report::report;
use garmin_fetch::resolver::CredentialResolver;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
    // Load .env if present; real environment variables take precedence.
    dotenvy::dotenv().ok();

    // Configure logging from env var `GARMIN_FETCH_LOG` (or fallback to `RUST_LOG`, default `warn`).
    // Logs go to stderr so stdout stays exactly one line per activity.
    let log_env = std::env::var("GARMIN_FETCH_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::debug!("garmin_fetch: log filter: {}", log_env);

    let config = Config::from_env();
    let connect = ReqwestGarminConnect::new(&config.api_base_url, &config.sso_base_url);
    let store = SessionStore::scratch();

    let client = CredentialResolver::new(&config, &connect, &store)
        .resolve()
        .await?;
    report(client.as_ref(), config.limit, &mut io::stdout()).await?;

    Ok(())
}
