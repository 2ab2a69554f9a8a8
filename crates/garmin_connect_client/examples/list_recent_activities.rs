use garmin_connect_client::http_client::{
    DEFAULT_API_BASE_URL, DEFAULT_SSO_BASE_URL, ReqwestGarminConnect,
};
use garmin_connect_client::{Credentials, GarminConnect};
use secrecy::SecretString;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let username = std::env::var("GARMIN_USERNAME")?;
    let password = std::env::var("GARMIN_PASSWORD")?;

    let connect = ReqwestGarminConnect::new(DEFAULT_API_BASE_URL, DEFAULT_SSO_BASE_URL);
    let client = connect
        .login(&Credentials {
            username,
            password: SecretString::new(password.into()),
        })
        .await
        .map_err(|e| format!("login failed: {}", e))?;

    let limit = std::env::var("GARMIN_FETCH_LIMIT")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(5);

    let activities = client
        .get_activities(0, limit)
        .await
        .map_err(|e| format!("failed to fetch activities: {}", e))?;

    if activities.is_empty() {
        println!("No recent activities returned (check credentials or account)");
        return Ok(());
    }

    println!("Recent activities (limit {}):", limit);
    for a in activities {
        println!("- {} - {} ({}m)", a.start_time_local, a.activity_name, a.distance);
    }

    Ok(())
}
