use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::db::applications as application_db;
use crate::db::profiles as profile_db;
use crate::db::projects as project_db;
use crate::db::subscriptions::{self as subscription_db, NewSubscription};
use crate::domain::billing::{self, PlanView};
use crate::error::AppError;
use crate::models::profiles::{self, UserType};
use crate::models::subscriptions::{
    self, BillingInterval, CurrentSubscription, Subscribe, SubscriptionStatus, SubscriptionTier,
};

pub fn plans(interval: BillingInterval) -> Vec<PlanView> {
    billing::catalog()
        .into_iter()
        .map(|plan| billing::view(plan, interval))
        .collect()
}

/// Postings the user made this calendar month: projects for clients,
/// applications for freelancers.
pub async fn postings_this_month<C: ConnectionTrait>(
    db: &C,
    user: &profiles::Model,
    now: DateTime<Utc>,
) -> Result<u64, AppError> {
    let since = billing::month_start(now);
    let count = match user.user_type {
        UserType::Client => project_db::count_created_since(db, user.id, since).await?,
        UserType::Freelancer => application_db::count_created_since(db, user.id, since).await?,
    };
    Ok(count)
}

/// Fails with 402 when a free-tier user has used up this month's postings.
pub async fn ensure_posting_quota<C: ConnectionTrait>(
    db: &C,
    user: &profiles::Model,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let limit = billing::plan(user.subscription_tier).monthly_postings_limit;
    if limit.is_none() {
        return Ok(());
    }

    let used = postings_this_month(db, user, now).await?;
    if billing::quota_exceeded(limit, used) {
        let what = match user.user_type {
            UserType::Client => "project posts",
            UserType::Freelancer => "applications",
        };
        return Err(AppError::QuotaExceeded(format!(
            "The Free plan includes {} {what} per month. Upgrade to continue.",
            billing::FREE_MONTHLY_POSTINGS
        )));
    }
    Ok(())
}

/// Current subscription with expiry applied. An expired paid subscription
/// drops the profile back to the free tier.
pub async fn current(
    db: &DatabaseConnection,
    user: &profiles::Model,
    now: DateTime<Utc>,
) -> Result<CurrentSubscription, AppError> {
    let mut tier = user.subscription_tier;
    let mut subscription = subscription_db::current_for_user(db, user.id).await?;

    if let Some(sub) = subscription.take() {
        let status = billing::effective_status(sub.status, sub.current_period_end, now);
        if status == SubscriptionStatus::Expired {
            let txn = db.begin().await?;
            let expired = subscription_db::set_status(&txn, sub, SubscriptionStatus::Expired).await?;
            profile_db::set_subscription_tier(&txn, user.id, SubscriptionTier::Free).await?;
            txn.commit().await?;

            tracing::info!(user_id = %user.id, "subscription {} expired", expired.id);
            tier = SubscriptionTier::Free;
        } else {
            subscription = Some(sub);
        }
    }

    let profile_now = profiles::Model {
        subscription_tier: tier,
        ..user.clone()
    };

    Ok(CurrentSubscription {
        tier,
        subscription,
        monthly_postings_limit: billing::plan(tier).monthly_postings_limit,
        postings_this_month: postings_this_month(db, &profile_now, now).await?,
    })
}

/// Simulated checkout: paid tiers activate immediately.
pub async fn subscribe(
    db: &DatabaseConnection,
    user: &profiles::Model,
    input: Subscribe,
    now: DateTime<Utc>,
) -> Result<subscriptions::Model, AppError> {
    let interval = input.interval.unwrap_or(BillingInterval::Monthly);

    match input.tier {
        SubscriptionTier::Free if user.subscription_tier == SubscriptionTier::Free => {
            return Err(AppError::Conflict(
                "You're already on the Free plan".to_string(),
            ));
        }
        SubscriptionTier::Enterprise => {
            return Err(AppError::Validation(
                "Enterprise plans are sold through our sales team. Please contact sales."
                    .to_string(),
            ));
        }
        _ => {}
    }

    let amount = billing::charge(input.tier, interval).ok_or_else(|| {
        AppError::Validation("This plan cannot be purchased online".to_string())
    })?;

    let txn = db.begin().await?;

    if let Some(existing) = subscription_db::current_for_user(&txn, user.id).await? {
        subscription_db::set_status(&txn, existing, SubscriptionStatus::Expired).await?;
    }

    let created = subscription_db::insert_subscription(
        &txn,
        NewSubscription {
            user_id: user.id,
            tier: input.tier,
            interval,
            amount: f64::from(amount),
            period_start: now,
            period_end: billing::period_end(now, interval),
        },
    )
    .await?;
    profile_db::set_subscription_tier(&txn, user.id, input.tier).await?;

    txn.commit().await?;

    tracing::info!(user_id = %user.id, tier = ?input.tier, "subscription activated");
    Ok(created)
}

pub async fn cancel(
    db: &DatabaseConnection,
    user: &profiles::Model,
) -> Result<subscriptions::Model, AppError> {
    let sub = subscription_db::current_for_user(db, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("You have no active subscription".to_string()))?;

    if sub.status == SubscriptionStatus::Cancelled {
        return Ok(sub);
    }

    Ok(subscription_db::cancel(db, sub).await?)
}
