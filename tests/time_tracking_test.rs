//! Timer start and stop guards against a mocked Postgres connection.
use chrono::{Duration, Utc};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use uuid::Uuid;
use validator::Validate;

use freelancebot_backend::error::AppError;
use freelancebot_backend::models::profiles::{self, UserType};
use freelancebot_backend::models::projects::{self, ProjectStatus};
use freelancebot_backend::models::subscriptions::SubscriptionTier;
use freelancebot_backend::models::time_tracking::{self, StartTimer};
use freelancebot_backend::services::time_tracking::{start, stop};

fn freelancer(id: Uuid) -> profiles::Model {
    profiles::Model {
        id,
        user_type: UserType::Freelancer,
        full_name: "Eve".to_string(),
        email: "eve@example.com".to_string(),
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

fn project_with(selected: Option<Uuid>) -> projects::Model {
    projects::Model {
        id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        title: "Data pipeline".to_string(),
        description: "ETL jobs".to_string(),
        budget_min: None,
        budget_max: None,
        deadline: None,
        required_skills: None,
        category_id: None,
        status: ProjectStatus::InProgress,
        selected_freelancer_id: selected,
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn entry(project_id: Uuid, freelancer_id: Uuid, stopped: bool) -> time_tracking::Model {
    let start_time = Utc::now() - Duration::minutes(90);
    time_tracking::Model {
        id: Uuid::new_v4(),
        project_id,
        freelancer_id,
        start_time,
        end_time: stopped.then(|| start_time + Duration::minutes(60)),
        duration_minutes: stopped.then_some(60),
        description: Some("Schema design".to_string()),
        is_billable: true,
        hourly_rate: Some(50.0),
        created_at: start_time,
        updated_at: None,
    }
}

fn timer(description: &str) -> StartTimer {
    StartTimer {
        description: description.to_string(),
        is_billable: None,
    }
}

fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

#[test]
fn test_blank_descriptions_fail_validation() {
    assert!(timer("").validate().is_err());
    assert!(timer("   ").validate().is_err());
    assert!(timer("\t\n").validate().is_err());
    assert!(timer("Wiring the API").validate().is_ok());
}

#[tokio::test]
async fn test_whitespace_description_is_rejected_before_any_query() {
    let user = freelancer(Uuid::new_v4());

    let err = start(&empty_db(), &user, Uuid::new_v4(), timer("   "))
        .await
        .unwrap_err();

    assert!(
        matches!(err, AppError::Validation(ref msg) if msg == "Please enter a description for this time entry")
    );
}

#[tokio::test]
async fn test_only_the_selected_freelancer_can_start_a_timer() {
    let user = freelancer(Uuid::new_v4());
    let project = project_with(Some(Uuid::new_v4()));
    let project_id = project.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project]])
        .into_connection();

    let err = start(&db, &user, project_id, timer("Standup notes"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_second_running_timer_is_a_conflict() {
    let user = freelancer(Uuid::new_v4());
    let project = project_with(Some(user.id));
    let running = entry(project.id, user.id, false);
    let project_id = project.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project]])
        .append_query_results([vec![running]])
        .into_connection();

    let err = start(&db, &user, project_id, timer("More schema work"))
        .await
        .unwrap_err();

    assert!(
        matches!(err, AppError::Conflict(ref msg) if msg == "A timer is already running for this project")
    );
}

#[tokio::test]
async fn test_stopping_a_stopped_entry_is_rejected() {
    let user = freelancer(Uuid::new_v4());
    let closed = entry(Uuid::new_v4(), user.id, true);
    let closed_id = closed.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![closed]])
        .into_connection();

    let err = stop(&db, &user, closed_id).await.unwrap_err();

    assert!(
        matches!(err, AppError::InvalidTransition(ref msg) if msg == "This time entry is already stopped")
    );
}

#[tokio::test]
async fn test_stopping_someone_elses_timer_is_forbidden() {
    let user = freelancer(Uuid::new_v4());
    let running = entry(Uuid::new_v4(), Uuid::new_v4(), false);
    let running_id = running.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![running]])
        .into_connection();

    let err = stop(&db, &user, running_id).await.unwrap_err();

    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_stop_writes_end_time_and_duration() {
    let user = freelancer(Uuid::new_v4());
    let running = entry(Uuid::new_v4(), user.id, false);
    let stopped_row = time_tracking::Model {
        end_time: Some(Utc::now()),
        duration_minutes: Some(90),
        ..running.clone()
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![running.clone()]])
        .append_query_results([vec![stopped_row]])
        .into_connection();

    let stopped = stop(&db, &user, running.id).await.unwrap();
    assert_eq!(stopped.duration_minutes, Some(90));
    assert!(!stopped.is_running());

    let log = db.into_transaction_log();
    let update = &log[1].statements()[0].sql;
    let set_clause = update.split(" WHERE ").next().unwrap_or(update);
    assert!(set_clause.contains("\"end_time\""));
    assert!(set_clause.contains("\"duration_minutes\""));
}
