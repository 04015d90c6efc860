use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;
use validator::Validate;

use crate::auth::authorization::{load_project, verify_project_party};
use crate::db::freelancer_profiles as freelancer_db;
use crate::db::profiles as profile_db;
use crate::db::time_tracking as time_db;
use crate::domain::time;
use crate::error::AppError;
use crate::models::profiles;
use crate::models::time_tracking::{self, StartTimer, TimeEntryView, TimeSheet};

/// Start a timer for the freelancer working on the project. At most one
/// entry per project and freelancer may be running.
pub async fn start(
    db: &DatabaseConnection,
    user: &profiles::Model,
    project_id: Uuid,
    input: StartTimer,
) -> Result<time_tracking::Model, AppError> {
    input.validate()?;

    let txn = db.begin().await?;
    let project = load_project(&txn, project_id).await?;

    if project.selected_freelancer_id != Some(user.id) {
        return Err(AppError::Forbidden(
            "Only the freelancer working on this project can track time".to_string(),
        ));
    }
    if time_db::find_running(&txn, project_id, user.id).await?.is_some() {
        return Err(AppError::Conflict(
            "A timer is already running for this project".to_string(),
        ));
    }

    let rate = freelancer_db::get_by_id(&txn, user.id)
        .await?
        .and_then(|f| f.hourly_rate);

    let entry = time_db::start_entry(
        &txn,
        project_id,
        user.id,
        input.description.trim().to_string(),
        input.is_billable.unwrap_or(true),
        rate,
    )
    .await?;
    txn.commit().await?;

    tracing::info!(entry_id = %entry.id, project_id = %project_id, "timer started");
    Ok(entry)
}

pub async fn stop(
    db: &DatabaseConnection,
    user: &profiles::Model,
    entry_id: Uuid,
) -> Result<time_tracking::Model, AppError> {
    let entry = time_db::get_entry_by_id(db, entry_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Time entry {entry_id} not found")))?;

    if entry.freelancer_id != user.id {
        return Err(AppError::Forbidden(
            "You can only stop your own timers".to_string(),
        ));
    }
    if !entry.is_running() {
        return Err(AppError::InvalidTransition(
            "This time entry is already stopped".to_string(),
        ));
    }

    let stopped = time_db::stop_entry(db, entry, Utc::now()).await?;
    tracing::info!(entry_id = %stopped.id, minutes = ?stopped.duration_minutes, "timer stopped");
    Ok(stopped)
}

/// Render one entry. Running entries show a live `HH:MM:SS`; closed ones
/// show their duration and, when billable, what they earned.
pub fn entry_view(
    entry: time_tracking::Model,
    freelancer_name: Option<String>,
    fallback_rate: Option<f64>,
    now: DateTime<Utc>,
) -> TimeEntryView {
    if entry.is_running() {
        let elapsed = time::elapsed_seconds(entry.start_time, now);
        return TimeEntryView {
            entry,
            freelancer_name,
            elapsed_seconds: Some(elapsed),
            display: time::format_hms(elapsed),
            earnings: None,
        };
    }

    let minutes = i64::from(entry.duration_minutes.unwrap_or(0));
    let earnings = match (entry.is_billable, entry.hourly_rate.or(fallback_rate)) {
        (true, Some(rate)) => Some(time::format_money(time::earnings(minutes, rate))),
        _ => None,
    };

    TimeEntryView {
        entry,
        freelancer_name,
        elapsed_seconds: None,
        display: time::format_duration(minutes),
        earnings,
    }
}

/// Totals count only closed entries of `freelancer_id`, billed at `rate`.
pub fn build_timesheet(
    entries: Vec<time_tracking::Model>,
    names: &HashMap<Uuid, profiles::Model>,
    freelancer_id: Option<Uuid>,
    rate: Option<f64>,
    now: DateTime<Utc>,
) -> TimeSheet {
    let total_minutes: i64 = entries
        .iter()
        .filter(|e| Some(e.freelancer_id) == freelancer_id)
        .filter_map(|e| e.duration_minutes)
        .map(i64::from)
        .sum();

    let active_entry_id = entries
        .iter()
        .find(|e| e.is_running() && Some(e.freelancer_id) == freelancer_id)
        .map(|e| e.id);

    let total_earnings = rate.map(|r| time::earnings(total_minutes, r)).unwrap_or(0.0);

    let entries = entries
        .into_iter()
        .map(|e| {
            let name = names.get(&e.freelancer_id).map(|p| p.full_name.clone());
            entry_view(e, name, rate, now)
        })
        .collect();

    TimeSheet {
        entries,
        active_entry_id,
        total_minutes,
        total_duration: time::format_duration(total_minutes),
        total_earnings: time::format_money(total_earnings),
    }
}

pub async fn timesheet(
    db: &DatabaseConnection,
    user: &profiles::Model,
    project_id: Uuid,
) -> Result<TimeSheet, AppError> {
    let project = verify_project_party(db, project_id, user.id).await?;
    let entries = time_db::list_for_project(db, project_id).await?;

    let mut ids: Vec<Uuid> = entries.iter().map(|e| e.freelancer_id).collect();
    ids.sort();
    ids.dedup();
    let names = profile_db::profiles_by_ids(db, ids).await?;

    let freelancer_id = project.selected_freelancer_id;
    let rate = match freelancer_id {
        Some(id) => freelancer_db::get_by_id(db, id)
            .await?
            .and_then(|f| f.hourly_rate),
        None => None,
    };

    Ok(build_timesheet(entries, &names, freelancer_id, rate, Utc::now()))
}
