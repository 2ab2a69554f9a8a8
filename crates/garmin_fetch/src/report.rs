//! Fetches the most recent activities and prints one line per activity.

use std::io;

use garmin_connect_client::{ActivityRecord, GarminClient, GarminError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("fetching activities: {0}")]
    Fetch(#[from] GarminError),
    #[error("writing report: {0}")]
    Write(#[from] io::Error),
}

/// One line per activity: start time, name, and distance in meters.
/// Whole-meter distances print without a fractional part.
pub fn format_activity(activity: &ActivityRecord) -> String {
    format!(
        "{} - {} - {}m",
        activity.start_time_local, activity.activity_name, activity.distance
    )
}

/// Fetch the `count` most recent activities and write one line for each.
pub async fn report(
    client: &dyn GarminClient,
    count: u32,
    out: &mut impl io::Write,
) -> Result<(), ReportError> {
    let activities = client.get_activities(0, count).await?;
    tracing::debug!("fetched {} activities", activities.len());
    for activity in &activities {
        writeln!(out, "{}", format_activity(activity))?;
    }
    Ok(())
}
