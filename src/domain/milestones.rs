use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::milestones::{self, MilestoneStatus};

/// Progress figures for a project's milestones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneSummary {
    pub total: usize,
    pub completed: usize,
    /// Always within `[0, 100]`; 0 when there are no milestones.
    pub progress_percent: f64,
    /// Sum of every milestone amount regardless of status.
    pub total_amount: f64,
    /// Sum of the amounts of completed milestones only.
    pub completed_amount: f64,
}

/// The `completed_at` stamp for a milestone entering `status` at `now`:
/// set on completion, cleared otherwise.
pub fn completion_stamp(status: MilestoneStatus, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    (status == MilestoneStatus::Completed).then_some(now)
}

pub fn progress_percent(statuses: &[MilestoneStatus]) -> f64 {
    if statuses.is_empty() {
        return 0.0;
    }
    let completed = statuses
        .iter()
        .filter(|s| **s == MilestoneStatus::Completed)
        .count();
    (completed as f64 / statuses.len() as f64) * 100.0
}

pub fn summarize(items: &[milestones::Model]) -> MilestoneSummary {
    let statuses: Vec<MilestoneStatus> = items.iter().map(|m| m.status).collect();

    let total_amount = items.iter().map(|m| m.amount.unwrap_or(0.0)).sum();
    let completed_amount = items
        .iter()
        .filter(|m| m.status == MilestoneStatus::Completed)
        .map(|m| m.amount.unwrap_or(0.0))
        .sum();

    MilestoneSummary {
        total: items.len(),
        completed: statuses
            .iter()
            .filter(|s| **s == MilestoneStatus::Completed)
            .count(),
        progress_percent: progress_percent(&statuses),
        total_amount,
        completed_amount,
    }
}
