use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::models::reviews::{self, CreateReview};

pub async fn insert_review<C: ConnectionTrait>(
    db: &C,
    reviewer_id: Uuid,
    input: CreateReview,
) -> Result<reviews::Model, DbErr> {
    let new_review = reviews::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(input.project_id),
        reviewer_id: Set(reviewer_id),
        reviewee_id: Set(input.reviewee_id),
        rating: Set(input.rating),
        title: Set(input.title),
        comment: Set(Some(input.comment)),
        is_public: Set(input.is_public.unwrap_or(true)),
        created_at: Set(Utc::now()),
    };

    new_review.insert(db).await
}

/// Public reviews about a user, newest first.
pub async fn list_public_for_reviewee<C: ConnectionTrait>(
    db: &C,
    reviewee_id: Uuid,
) -> Result<Vec<reviews::Model>, DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::RevieweeId.eq(reviewee_id))
        .filter(reviews::Column::IsPublic.eq(true))
        .order_by_desc(reviews::Column::CreatedAt)
        .all(db)
        .await
}

/// Every rating a user received, public or not, for the stored average.
pub async fn ratings_for_reviewee<C: ConnectionTrait>(
    db: &C,
    reviewee_id: Uuid,
) -> Result<Vec<i16>, DbErr> {
    let rows = reviews::Entity::find()
        .filter(reviews::Column::RevieweeId.eq(reviewee_id))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|r| r.rating).collect())
}

pub async fn review_exists<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
    reviewer_id: Uuid,
    reviewee_id: Uuid,
) -> Result<bool, DbErr> {
    let count = reviews::Entity::find()
        .filter(reviews::Column::ProjectId.eq(project_id))
        .filter(reviews::Column::ReviewerId.eq(reviewer_id))
        .filter(reviews::Column::RevieweeId.eq(reviewee_id))
        .count(db)
        .await?;
    Ok(count > 0)
}
