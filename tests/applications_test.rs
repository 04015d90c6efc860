//! Application acceptance against a mocked Postgres connection.
//!
//! Query results are consumed in order: the application, its project, then
//! the two rows returned by the updates.
use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase};
use uuid::Uuid;

use freelancebot_backend::error::AppError;
use freelancebot_backend::models::applications::{self, ApplicationStatus};
use freelancebot_backend::models::profiles::{self, UserType};
use freelancebot_backend::models::projects::{self, ProjectStatus};
use freelancebot_backend::models::subscriptions::SubscriptionTier;
use freelancebot_backend::services::applications::accept;

fn client(id: Uuid) -> profiles::Model {
    profiles::Model {
        id,
        user_type: UserType::Client,
        full_name: "Client".to_string(),
        email: "client@example.com".to_string(),
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

fn project(client_id: Uuid, status: ProjectStatus) -> projects::Model {
    projects::Model {
        id: Uuid::new_v4(),
        client_id,
        title: "Landing page".to_string(),
        description: "A marketing site".to_string(),
        budget_min: Some(500.0),
        budget_max: Some(1500.0),
        deadline: None,
        required_skills: Some(vec!["React".to_string()]),
        category_id: None,
        status,
        selected_freelancer_id: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn application(project_id: Uuid, status: ApplicationStatus) -> applications::Model {
    applications::Model {
        id: Uuid::new_v4(),
        project_id,
        freelancer_id: Uuid::new_v4(),
        cover_letter: Some("I can do this".to_string()),
        proposed_rate: Some(45.0),
        estimated_duration: Some("2 weeks".to_string()),
        status,
        created_at: Utc::now(),
        updated_at: None,
    }
}

#[tokio::test]
async fn test_accept_starts_the_project_with_the_freelancer() {
    let owner = client(Uuid::new_v4());
    let open = project(owner.id, ProjectStatus::Open);
    let pending = application(open.id, ApplicationStatus::Pending);

    let accepted_row = applications::Model {
        status: ApplicationStatus::Accepted,
        updated_at: Some(Utc::now()),
        ..pending.clone()
    };
    let started_row = projects::Model {
        status: ProjectStatus::InProgress,
        selected_freelancer_id: Some(pending.freelancer_id),
        updated_at: Some(Utc::now()),
        ..open.clone()
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![pending.clone()]])
        .append_query_results([vec![open.clone()]])
        .append_query_results([vec![accepted_row]])
        .append_query_results([vec![started_row]])
        .into_connection();

    let result = accept(&db, &owner, pending.id).await.unwrap();

    assert_eq!(result.application.status, ApplicationStatus::Accepted);
    assert_eq!(result.project.status, ProjectStatus::InProgress);
    assert_eq!(result.project.selected_freelancer_id, Some(pending.freelancer_id));
}

#[tokio::test]
async fn test_accept_locks_the_project_row_inside_the_transaction() {
    let owner = client(Uuid::new_v4());
    let open = project(owner.id, ProjectStatus::Open);
    let pending = application(open.id, ApplicationStatus::Pending);

    let accepted_row = applications::Model {
        status: ApplicationStatus::Accepted,
        ..pending.clone()
    };
    let started_row = projects::Model {
        status: ProjectStatus::InProgress,
        selected_freelancer_id: Some(pending.freelancer_id),
        ..open.clone()
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![pending.clone()]])
        .append_query_results([vec![open]])
        .append_query_results([vec![accepted_row]])
        .append_query_results([vec![started_row]])
        .into_connection();

    accept(&db, &owner, pending.id).await.unwrap();

    // A concurrent accept blocks on the lock and then sees the project started.
    let log = db.into_transaction_log();
    assert_eq!(log.len(), 1);
    let statements = log[0].statements();
    assert_eq!(statements.first().map(|s| s.sql.as_str()), Some("BEGIN"));
    assert_eq!(statements.last().map(|s| s.sql.as_str()), Some("COMMIT"));

    let project_read = statements
        .iter()
        .find(|s| s.sql.starts_with("SELECT") && s.sql.contains("FROM \"projects\""))
        .expect("project is read inside the transaction");
    assert!(project_read.sql.contains("FOR UPDATE"));
}

#[tokio::test]
async fn test_accept_on_a_started_project_is_rejected() {
    let owner = client(Uuid::new_v4());
    let started = project(owner.id, ProjectStatus::InProgress);
    let pending = application(started.id, ApplicationStatus::Pending);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![pending.clone()]])
        .append_query_results([vec![started]])
        .into_connection();

    let err = accept(&db, &owner, pending.id).await.unwrap_err();

    assert!(
        matches!(err, AppError::InvalidTransition(ref msg) if msg == "This project already has a selected freelancer")
    );
}

#[tokio::test]
async fn test_only_the_owner_can_accept() {
    let owner_id = Uuid::new_v4();
    let open = project(owner_id, ProjectStatus::Open);
    let pending = application(open.id, ApplicationStatus::Pending);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![pending.clone()]])
        .append_query_results([vec![open]])
        .into_connection();

    let stranger = client(Uuid::new_v4());
    let err = accept(&db, &stranger, pending.id).await.unwrap_err();

    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_decided_application_cannot_be_accepted() {
    let owner = client(Uuid::new_v4());
    let open = project(owner.id, ProjectStatus::Open);
    let rejected = application(open.id, ApplicationStatus::Rejected);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![rejected.clone()]])
        .append_query_results([vec![open]])
        .into_connection();

    let err = accept(&db, &owner, rejected.id).await.unwrap_err();

    assert!(matches!(err, AppError::InvalidTransition(_)));
}

#[tokio::test]
async fn test_missing_application_is_not_found() {
    let owner = client(Uuid::new_v4());

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<applications::Model>::new()])
        .into_connection();

    let err = accept(&db, &owner, Uuid::new_v4()).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}
