//! Milestone edits against a mocked Postgres connection.
//!
//! Query results are consumed in order: the milestone, its project, then the
//! row returned by the update.
use chrono::{TimeZone, Utc};
use sea_orm::{DatabaseBackend, MockDatabase};
use uuid::Uuid;

use freelancebot_backend::domain::milestones::completion_stamp;
use freelancebot_backend::error::AppError;
use freelancebot_backend::models::milestones::{self, MilestoneStatus, UpdateMilestone};
use freelancebot_backend::models::profiles::{self, UserType};
use freelancebot_backend::models::projects::{self, ProjectStatus};
use freelancebot_backend::models::subscriptions::SubscriptionTier;
use freelancebot_backend::services::milestones::update;

fn user(id: Uuid, user_type: UserType) -> profiles::Model {
    profiles::Model {
        id,
        user_type,
        full_name: "User".to_string(),
        email: "user@example.com".to_string(),
        avatar_url: None,
        bio: None,
        location: None,
        website: None,
        phone: None,
        subscription_tier: SubscriptionTier::Free,
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn started_project(client_id: Uuid, freelancer_id: Uuid) -> projects::Model {
    projects::Model {
        id: Uuid::new_v4(),
        client_id,
        title: "Mobile app".to_string(),
        description: "iOS and Android".to_string(),
        budget_min: Some(2000.0),
        budget_max: Some(4000.0),
        deadline: None,
        required_skills: None,
        category_id: None,
        status: ProjectStatus::InProgress,
        selected_freelancer_id: Some(freelancer_id),
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn milestone(project_id: Uuid, status: MilestoneStatus) -> milestones::Model {
    milestones::Model {
        id: Uuid::new_v4(),
        project_id,
        title: "Wireframes".to_string(),
        description: None,
        amount: Some(500.0),
        due_date: None,
        status,
        completed_at: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

/// The `UPDATE ... SET ...` part of a statement, before `WHERE` and the
/// `RETURNING` column list.
fn set_clause(sql: &str) -> &str {
    sql.split(" WHERE ").next().unwrap_or(sql)
}

fn change(amount: Option<f64>, status: Option<MilestoneStatus>) -> UpdateMilestone {
    UpdateMilestone {
        title: None,
        description: None,
        amount,
        due_date: None,
        status,
    }
}

#[tokio::test]
async fn test_selected_freelancer_cannot_edit_or_complete_milestones() {
    let client = user(Uuid::new_v4(), UserType::Client);
    let freelancer = user(Uuid::new_v4(), UserType::Freelancer);
    let project = started_project(client.id, freelancer.id);
    let current = milestone(project.id, MilestoneStatus::InProgress);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![current.clone()]])
        .append_query_results([vec![project]])
        .into_connection();

    let err = update(
        &db,
        &freelancer,
        current.id,
        change(Some(100_000.0), Some(MilestoneStatus::Completed)),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Forbidden(_)));
    // Nothing past the ownership check reached the database.
    assert_eq!(db.into_transaction_log().len(), 2);
}

#[tokio::test]
async fn test_owner_completes_milestone_and_stamps_completion() {
    let client = user(Uuid::new_v4(), UserType::Client);
    let project = started_project(client.id, Uuid::new_v4());
    let current = milestone(project.id, MilestoneStatus::InProgress);

    let completed_row = milestones::Model {
        status: MilestoneStatus::Completed,
        completed_at: Some(Utc::now()),
        updated_at: Some(Utc::now()),
        ..current.clone()
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![current.clone()]])
        .append_query_results([vec![project]])
        .append_query_results([vec![completed_row]])
        .into_connection();

    let updated = update(&db, &client, current.id, change(None, Some(MilestoneStatus::Completed)))
        .await
        .unwrap();
    assert_eq!(updated.status, MilestoneStatus::Completed);
    assert!(updated.completed_at.is_some());

    let log = db.into_transaction_log();
    let set_clause = set_clause(&log[2].statements()[0].sql);
    assert!(set_clause.starts_with("UPDATE"));
    assert!(set_clause.contains("\"completed_at\""));
}

#[tokio::test]
async fn test_owner_edit_without_status_leaves_completion_alone() {
    let client = user(Uuid::new_v4(), UserType::Client);
    let project = started_project(client.id, Uuid::new_v4());
    let current = milestone(project.id, MilestoneStatus::Pending);

    let edited_row = milestones::Model {
        amount: Some(750.0),
        updated_at: Some(Utc::now()),
        ..current.clone()
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![current.clone()]])
        .append_query_results([vec![project]])
        .append_query_results([vec![edited_row]])
        .into_connection();

    let updated = update(&db, &client, current.id, change(Some(750.0), None))
        .await
        .unwrap();
    assert_eq!(updated.amount, Some(750.0));

    let log = db.into_transaction_log();
    let set_clause = set_clause(&log[2].statements()[0].sql);
    assert!(set_clause.contains("\"amount\""));
    assert!(!set_clause.contains("\"completed_at\""));
}

#[tokio::test]
async fn test_skipping_in_progress_is_an_invalid_transition() {
    let client = user(Uuid::new_v4(), UserType::Client);
    let project = started_project(client.id, Uuid::new_v4());
    let current = milestone(project.id, MilestoneStatus::Pending);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![current.clone()]])
        .append_query_results([vec![project]])
        .into_connection();

    let err = update(&db, &client, current.id, change(None, Some(MilestoneStatus::Completed)))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidTransition(_)));
}

#[test]
fn test_completed_at_is_set_exactly_on_completion() {
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

    assert_eq!(completion_stamp(MilestoneStatus::Completed, now), Some(now));
    assert_eq!(completion_stamp(MilestoneStatus::InProgress, now), None);
    assert_eq!(completion_stamp(MilestoneStatus::Pending, now), None);
    assert_eq!(completion_stamp(MilestoneStatus::Disputed, now), None);
}
