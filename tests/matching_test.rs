//! Budget preferences applied to project matching.
use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase};
use uuid::Uuid;

use freelancebot_backend::models::freelancer_profiles;
use freelancebot_backend::models::preferences;
use freelancebot_backend::models::profiles::{self, UserType};
use freelancebot_backend::models::projects;
use freelancebot_backend::models::subscriptions::SubscriptionTier;
use freelancebot_backend::services::matching::{MatchQuery, recommend};

fn freelancer() -> profiles::Model {
    profiles::Model {
        id: Uuid::new_v4(),
        user_type: UserType::Freelancer,
        full_name: "Finn".to_string(),
        email: "finn@example.com".to_string(),
        avatar_url: None,
        bio: None,
        location: None,
        website: None,
        phone: None,
        subscription_tier: SubscriptionTier::Basic,
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn prefs(user_id: Uuid, min: Option<f64>, max: Option<f64>) -> preferences::Model {
    preferences::Model {
        id: Uuid::new_v4(),
        user_id,
        preferred_project_types: None,
        preferred_budget_range_min: min,
        preferred_budget_range_max: max,
        preferred_project_duration: None,
        notification_settings: serde_json::json!({}),
        ai_matching_enabled: true,
        created_at: Utc::now(),
        updated_at: None,
    }
}

/// Run a recommendation and return the SQL of the open-projects query.
async fn project_query_for(min: Option<f64>, max: Option<f64>) -> String {
    let user = freelancer();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![prefs(user.id, min, max)]])
        .append_query_results([Vec::<projects::Model>::new()])
        .append_query_results([Vec::<freelancer_profiles::Model>::new()])
        .into_connection();

    let ranked = recommend(&db, &user, &MatchQuery { limit: None }).await.unwrap();
    assert!(ranked.is_empty());

    let log = db.into_transaction_log();
    log[1].statements()[0].sql.clone()
}

#[tokio::test]
async fn test_zero_budget_preferences_do_not_filter() {
    let sql = project_query_for(Some(0.0), Some(0.0)).await;

    assert!(sql.contains("FROM \"projects\""));
    assert!(!sql.contains("\"budget_min\" >="));
    assert!(!sql.contains("\"budget_max\" <="));
}

#[tokio::test]
async fn test_positive_budget_preferences_filter() {
    let sql = project_query_for(Some(500.0), Some(5000.0)).await;

    assert!(sql.contains("\"budget_min\" >="));
    assert!(sql.contains("\"budget_max\" <="));
}

#[tokio::test]
async fn test_only_the_set_bound_filters() {
    let sql = project_query_for(None, Some(2000.0)).await;

    assert!(!sql.contains("\"budget_min\" >="));
    assert!(sql.contains("\"budget_max\" <="));
}

#[test]
fn test_budget_window_treats_zero_as_unset() {
    let id = Uuid::new_v4();

    assert_eq!(prefs(id, Some(0.0), Some(0.0)).budget_window(), (None, None));
    assert_eq!(prefs(id, Some(100.0), None).budget_window(), (Some(100.0), None));
    assert_eq!(
        prefs(id, Some(100.0), Some(900.0)).budget_window(),
        (Some(100.0), Some(900.0))
    );
}
