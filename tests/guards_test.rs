//! Requests that must be refused before any database work happens. The mock
//! connection has no prepared results, so a query would fail the test.
use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use uuid::Uuid;

use freelancebot_backend::error::AppError;
use freelancebot_backend::models::profiles::{self, UserType};
use freelancebot_backend::models::projects::CreateProject;
use freelancebot_backend::models::reviews::CreateReview;
use freelancebot_backend::models::subscriptions::{BillingInterval, Subscribe, SubscriptionTier};
use freelancebot_backend::services::{matching, projects, reviews, subscriptions};

fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

fn user(user_type: UserType, tier: SubscriptionTier) -> profiles::Model {
    profiles::Model {
        id: Uuid::new_v4(),
        user_type,
        full_name: "Sam".to_string(),
        email: "sam@example.com".to_string(),
        avatar_url: None,
        bio: None,
        location: None,
        website: None,
        phone: None,
        subscription_tier: tier,
        created_at: Utc::now(),
        updated_at: None,
    }
}

#[tokio::test]
async fn test_free_user_cannot_resubscribe_to_free() {
    let u = user(UserType::Client, SubscriptionTier::Free);
    let err = subscriptions::subscribe(
        &empty_db(),
        &u,
        Subscribe {
            tier: SubscriptionTier::Free,
            interval: None,
        },
        Utc::now(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Conflict(ref msg) if msg == "You're already on the Free plan"));
}

#[tokio::test]
async fn test_enterprise_requires_sales() {
    let u = user(UserType::Client, SubscriptionTier::Basic);
    let err = subscriptions::subscribe(
        &empty_db(),
        &u,
        Subscribe {
            tier: SubscriptionTier::Enterprise,
            interval: Some(BillingInterval::Yearly),
        },
        Utc::now(),
    )
    .await
    .unwrap_err();

    match err {
        AppError::Validation(msg) => assert!(msg.contains("contact sales")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_freelancers_cannot_post_projects() {
    let u = user(UserType::Freelancer, SubscriptionTier::Free);
    let input: CreateProject = serde_json::from_value(serde_json::json!({
        "title": "Need a logo",
        "description": "Vector logo for a bakery",
    }))
    .unwrap();

    let err = projects::create_project(&empty_db(), &u, input)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_reviewing_yourself_is_rejected() {
    let u = user(UserType::Client, SubscriptionTier::Free);
    let err = reviews::create(
        &empty_db(),
        &u,
        CreateReview {
            project_id: Uuid::new_v4(),
            reviewee_id: u.id,
            rating: 5,
            title: None,
            comment: "Great".to_string(),
            is_public: None,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Validation(ref msg) if msg == "You cannot review yourself"));
}

#[tokio::test]
async fn test_out_of_range_rating_is_rejected() {
    let u = user(UserType::Client, SubscriptionTier::Free);
    let err = reviews::create(
        &empty_db(),
        &u,
        CreateReview {
            project_id: Uuid::new_v4(),
            reviewee_id: Uuid::new_v4(),
            rating: 6,
            title: None,
            comment: "Too good".to_string(),
            is_public: Some(true),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Validation(ref msg) if msg == "Rating must be between 1 and 5"));
}

#[tokio::test]
async fn test_matching_is_for_freelancers_only() {
    let u = user(UserType::Client, SubscriptionTier::Basic);
    let err = matching::recommend(&empty_db(), &u, &matching::MatchQuery { limit: None })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Forbidden(_)));
}

#[test]
fn test_match_limit_defaults_and_clamps() {
    assert_eq!(matching::MatchQuery { limit: None }.limit(), 10);
    assert_eq!(matching::MatchQuery { limit: Some(0) }.limit(), 1);
    assert_eq!(matching::MatchQuery { limit: Some(500) }.limit(), 50);
    assert_eq!(matching::MatchQuery { limit: Some(25) }.limit(), 25);
}
