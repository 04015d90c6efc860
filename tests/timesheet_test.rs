use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use freelancebot_backend::models::profiles::{self, UserType};
use freelancebot_backend::models::subscriptions::SubscriptionTier;
use freelancebot_backend::models::time_tracking;
use freelancebot_backend::services::time_tracking::{build_timesheet, entry_view};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
}

fn entry(
    freelancer_id: Uuid,
    start: DateTime<Utc>,
    minutes: Option<i32>,
    hourly_rate: Option<f64>,
) -> time_tracking::Model {
    time_tracking::Model {
        id: Uuid::new_v4(),
        project_id: Uuid::nil(),
        freelancer_id,
        start_time: start,
        end_time: minutes.map(|m| start + Duration::minutes(i64::from(m))),
        duration_minutes: minutes,
        description: None,
        is_billable: true,
        hourly_rate,
        created_at: start,
        updated_at: None,
    }
}

fn profile(id: Uuid, name: &str) -> profiles::Model {
    profiles::Model {
        id,
        user_type: UserType::Freelancer,
        full_name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        avatar_url: None,
        bio: None,
        location: None,
        website: None,
        phone: None,
        subscription_tier: SubscriptionTier::Free,
        created_at: now(),
        updated_at: None,
    }
}

#[test]
fn test_running_entry_shows_live_clock() {
    let start = now() - Duration::seconds(3661);
    let view = entry_view(entry(Uuid::new_v4(), start, None, Some(40.0)), None, None, now());

    assert_eq!(view.display, "01:01:01");
    assert_eq!(view.elapsed_seconds, Some(3661));
    assert!(view.earnings.is_none());
}

#[test]
fn test_closed_billable_entry_shows_earnings() {
    let view = entry_view(
        entry(Uuid::new_v4(), now() - Duration::hours(3), Some(90), None),
        Some("Eve".to_string()),
        Some(40.0),
        now(),
    );

    assert_eq!(view.display, "1h 30m");
    assert_eq!(view.earnings.as_deref(), Some("$60.00"));
    assert!(view.elapsed_seconds.is_none());
}

#[test]
fn test_non_billable_entry_has_no_earnings() {
    let mut e = entry(Uuid::new_v4(), now() - Duration::hours(2), Some(60), Some(40.0));
    e.is_billable = false;

    assert!(entry_view(e, None, None, now()).earnings.is_none());
}

#[test]
fn test_timesheet_totals_count_only_the_selected_freelancers_closed_entries() {
    let freelancer = Uuid::new_v4();
    let other = Uuid::new_v4();

    let running = entry(freelancer, now() - Duration::minutes(10), None, Some(40.0));
    let running_id = running.id;
    let entries = vec![
        running,
        entry(freelancer, now() - Duration::hours(5), Some(90), Some(40.0)),
        entry(freelancer, now() - Duration::hours(8), Some(30), Some(40.0)),
        entry(other, now() - Duration::hours(9), Some(600), Some(100.0)),
    ];

    let mut names = HashMap::new();
    names.insert(freelancer, profile(freelancer, "Eve"));

    let sheet = build_timesheet(entries, &names, Some(freelancer), Some(40.0), now());

    assert_eq!(sheet.total_minutes, 120);
    assert_eq!(sheet.total_duration, "2h 0m");
    assert_eq!(sheet.total_earnings, "$80.00");
    assert_eq!(sheet.active_entry_id, Some(running_id));
    assert_eq!(sheet.entries.len(), 4);
    assert_eq!(sheet.entries[0].freelancer_name.as_deref(), Some("Eve"));
    assert!(sheet.entries[3].freelancer_name.is_none());
}

#[test]
fn test_timesheet_without_selected_freelancer_is_empty_of_totals() {
    let entries = vec![entry(Uuid::new_v4(), now() - Duration::hours(1), Some(45), None)];

    let sheet = build_timesheet(entries, &HashMap::new(), None, None, now());

    assert_eq!(sheet.total_minutes, 0);
    assert_eq!(sheet.total_duration, "0m");
    assert_eq!(sheet.total_earnings, "$0.00");
    assert!(sheet.active_entry_id.is_none());
}
