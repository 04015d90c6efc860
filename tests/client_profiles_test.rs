//! The client's active project counter against a mocked Postgres connection.
use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, Value};
use uuid::Uuid;

use freelancebot_backend::db::client_profiles::adjust_active_projects;
use freelancebot_backend::models::client_profiles;

fn client_row(active_projects: Option<i32>) -> client_profiles::Model {
    client_profiles::Model {
        id: Uuid::new_v4(),
        company_name: Some("Acme".to_string()),
        company_size: None,
        industry: None,
        total_spent: None,
        active_projects,
        rating: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

/// Values bound to the UPDATE issued for the counter.
async fn written_values(start: Option<i32>, delta: i32) -> Vec<Value> {
    let row = client_row(start);
    let id = row.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row.clone()]])
        .append_query_results([vec![row]])
        .into_connection();

    adjust_active_projects(&db, id, delta).await.unwrap();

    let log = db.into_transaction_log();
    let update = &log[1].statements()[0];
    assert!(update.sql.starts_with("UPDATE"));
    update.values.as_ref().map(|v| v.0.clone()).unwrap_or_default()
}

#[tokio::test]
async fn test_counter_never_goes_below_zero() {
    let values = written_values(Some(0), -1).await;
    assert!(values.contains(&Value::Int(Some(0))));
    assert!(!values.contains(&Value::Int(Some(-1))));
}

#[tokio::test]
async fn test_counter_starts_from_zero_when_unset() {
    let values = written_values(None, 1).await;
    assert!(values.contains(&Value::Int(Some(1))));
}

#[tokio::test]
async fn test_counter_decrements() {
    let values = written_values(Some(3), -1).await;
    assert!(values.contains(&Value::Int(Some(2))));
}
