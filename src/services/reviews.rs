use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;
use validator::Validate;

use crate::auth::authorization::load_project;
use crate::db::client_profiles as client_db;
use crate::db::freelancer_profiles as freelancer_db;
use crate::db::profiles as profile_db;
use crate::db::projects as project_db;
use crate::db::reviews as review_db;
use crate::domain::reviews::{average_rating, summarize};
use crate::error::AppError;
use crate::models::profiles::{self, UserType};
use crate::models::reviews::{self, CreateReview, ReviewOverview, ReviewView};

/// Leave a review for the other party of a project. The reviewee's stored
/// average rating is recomputed in the same transaction.
pub async fn create(
    db: &DatabaseConnection,
    user: &profiles::Model,
    input: CreateReview,
) -> Result<reviews::Model, AppError> {
    input.validate()?;

    if input.reviewee_id == user.id {
        return Err(AppError::Validation("You cannot review yourself".to_string()));
    }

    let txn = db.begin().await?;
    let project = load_project(&txn, input.project_id).await?;

    if !project.is_party(user.id) || !project.is_party(input.reviewee_id) {
        return Err(AppError::Forbidden(
            "Reviews can only be left between the parties of a project".to_string(),
        ));
    }
    if review_db::review_exists(&txn, project.id, user.id, input.reviewee_id).await? {
        return Err(AppError::Conflict(
            "You have already reviewed this user for this project".to_string(),
        ));
    }

    let reviewee = profile_db::get_profile_by_id(&txn, input.reviewee_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", input.reviewee_id)))?;

    let review = review_db::insert_review(&txn, user.id, input).await?;

    let average = average_rating(&review_db::ratings_for_reviewee(&txn, reviewee.id).await?);
    match reviewee.user_type {
        UserType::Freelancer => freelancer_db::set_rating(&txn, reviewee.id, average).await?,
        UserType::Client => client_db::set_rating(&txn, reviewee.id, average).await?,
    }

    txn.commit().await?;
    Ok(review)
}

/// Public reviews about a user with reviewer and project details attached.
pub async fn for_user(db: &DatabaseConnection, user_id: Uuid) -> Result<ReviewOverview, AppError> {
    let rows = review_db::list_public_for_reviewee(db, user_id).await?;

    let reviewer_ids: Vec<Uuid> = rows.iter().map(|r| r.reviewer_id).collect();
    let project_ids: Vec<Uuid> = rows.iter().map(|r| r.project_id).collect();

    let reviewers = profile_db::profiles_by_ids(db, reviewer_ids).await?;
    let projects = project_db::get_projects_by_ids(db, project_ids).await?;

    let ratings: Vec<i16> = rows.iter().map(|r| r.rating).collect();

    let reviews = rows
        .into_iter()
        .map(|review| {
            let reviewer = reviewers.get(&review.reviewer_id);
            let project_title = projects
                .iter()
                .find(|p| p.id == review.project_id)
                .map(|p| p.title.clone());
            ReviewView {
                reviewer_name: reviewer.map(|p| p.full_name.clone()),
                reviewer_avatar_url: reviewer.and_then(|p| p.avatar_url.clone()),
                project_title,
                review,
            }
        })
        .collect();

    Ok(ReviewOverview {
        reviews,
        summary: summarize(&ratings),
    })
}
