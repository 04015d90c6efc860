use chrono::{DateTime, Utc};
use sea_orm::*;
use uuid::Uuid;

use crate::models::subscriptions::{
    self, BillingInterval, SubscriptionStatus, SubscriptionTier,
};

pub struct NewSubscription {
    pub user_id: Uuid,
    pub tier: SubscriptionTier,
    pub interval: BillingInterval,
    pub amount: f64,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
}

pub async fn insert_subscription<C: ConnectionTrait>(
    db: &C,
    input: NewSubscription,
) -> Result<subscriptions::Model, DbErr> {
    let row = subscriptions::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(input.user_id),
        tier: Set(input.tier),
        billing_interval: Set(input.interval),
        status: Set(SubscriptionStatus::Active),
        amount: Set(input.amount),
        current_period_start: Set(input.period_start),
        current_period_end: Set(input.period_end),
        cancel_at_period_end: Set(false),
        created_at: Set(input.period_start),
        updated_at: Set(None),
    };

    row.insert(db).await
}

/// The user's most recent subscription that has not been marked expired.
pub async fn current_for_user<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Option<subscriptions::Model>, DbErr> {
    subscriptions::Entity::find()
        .filter(subscriptions::Column::UserId.eq(user_id))
        .filter(subscriptions::Column::Status.ne(SubscriptionStatus::Expired))
        .order_by_desc(subscriptions::Column::CreatedAt)
        .one(db)
        .await
}

pub async fn set_status<C: ConnectionTrait>(
    db: &C,
    subscription: subscriptions::Model,
    status: SubscriptionStatus,
) -> Result<subscriptions::Model, DbErr> {
    let mut active: subscriptions::ActiveModel = subscription.into();
    active.status = Set(status);
    active.updated_at = Set(Some(Utc::now()));
    active.update(db).await
}

/// Keep access until the period ends, then stop renewing.
pub async fn cancel<C: ConnectionTrait>(
    db: &C,
    subscription: subscriptions::Model,
) -> Result<subscriptions::Model, DbErr> {
    let mut active: subscriptions::ActiveModel = subscription.into();
    active.status = Set(SubscriptionStatus::Cancelled);
    active.cancel_at_period_end = Set(true);
    active.updated_at = Set(Some(Utc::now()));
    active.update(db).await
}
