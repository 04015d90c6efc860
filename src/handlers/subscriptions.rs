use actix_web::{HttpResponse, web};
use chrono::Utc;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::keys;
use crate::error::AppError;
use crate::models::subscriptions::{BillingInterval, PlanQuery, Subscribe};
use crate::services::subscriptions;
use crate::state::AppState;

/// GET /api/subscriptions/plans?interval=monthly|yearly
pub async fn get_plans(query: web::Query<PlanQuery>) -> HttpResponse {
    let interval = query.interval.unwrap_or(BillingInterval::Monthly);
    HttpResponse::Ok().json(subscriptions::plans(interval))
}

/// GET /api/subscriptions/me
pub async fn get_my_subscription(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let current = subscriptions::current(&state.db, &user.0, Utc::now()).await?;
    if current.tier != user.0.subscription_tier {
        state.cache.evict(&keys::profile(user.id())).await;
    }
    Ok(HttpResponse::Ok().json(current))
}

/// POST /api/subscriptions
///
/// There is no payment processor; paid plans activate immediately.
pub async fn subscribe(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    body: web::Json<Subscribe>,
) -> Result<HttpResponse, AppError> {
    let subscription =
        subscriptions::subscribe(&state.db, &user.0, body.into_inner(), Utc::now()).await?;
    state.cache.evict(&keys::profile(user.id())).await;

    Ok(HttpResponse::Created().json(subscription))
}

/// POST /api/subscriptions/cancel
pub async fn cancel_subscription(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let subscription = subscriptions::cancel(&state.db, &user.0).await?;
    Ok(HttpResponse::Ok().json(subscription))
}
