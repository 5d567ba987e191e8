use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;
use serde_json::Value;
use tokio::time::sleep;
use tracing::debug;

use super::CollectionSession;
use crate::error::Unavailable;
use crate::github::ApiClient;
use crate::outcome::Outcome;
use crate::types::MonthlyActivity;

/// One entry of `/stats/commit_activity`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WeekActivity {
    /// Unix timestamp (seconds) of the week's first day.
    pub week: i64,
    #[serde(default)]
    pub total: u64,
}

pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Add each week's total to the month its first day falls in, for weeks of `year`.
pub fn add_weeks(activity: &mut MonthlyActivity, weeks: &[WeekActivity]) {
    weeks
        .iter()
        .filter_map(|w| Some((DateTime::<Utc>::from_timestamp(w.week, 0)?, w.total)))
        .filter(|(start, _)| start.year() == activity.year)
        .for_each(|(start, total)| {
            let month = start.month0() as usize;
            activity.months[month] = activity.months[month].saturating_add(total);
        });
}

/// Weekly activity for one repository; 202 or a non-array body means not ready.
pub async fn weeks_for_repo(
    client: &ApiClient,
    owner: &str,
    name: &str,
) -> Outcome<Vec<WeekActivity>> {
    let path = format!("/repos/{owner}/{name}/stats/commit_activity");
    client
        .get(&path, &[])
        .await
        .into_result()
        .and_then(|resp| {
            if resp.status == 202 {
                Err(Unavailable::Pending)
            } else {
                resp.require_ok()
            }
        })
        .and_then(|resp| resp.json::<Value>())
        .and_then(|body| match body {
            Value::Array(items) => Ok(items
                .iter()
                .filter_map(|w| WeekActivity::deserialize(w).ok())
                .collect()),
            _ => Err(Unavailable::Pending),
        })
        .into()
}

/// Month buckets for `year`, plus how many repositories committed anything in
/// the weeks GitHub reports for them (the trailing year, not just `year`).
pub async fn monthly(session: &CollectionSession, year: i32) -> MonthlyActivity {
    let mut activity = MonthlyActivity::new(year);
    for repo in session.repositories().await {
        let Some((owner, name)) = repo.coordinates() else {
            continue;
        };
        match weeks_for_repo(session.client(), owner, name).await {
            Outcome::Success(weeks) => {
                if weeks.iter().any(|w| w.total > 0) {
                    activity.active_repos += 1;
                }
                add_weeks(&mut activity, &weeks);
            }
            Outcome::Unavailable(reason) => debug!(repo = name, %reason, "commit activity unavailable"),
        }
        sleep(session.pacing().commit_activity).await;
    }
    activity
}
