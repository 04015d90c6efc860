use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::auth::authorization::require_user_type;
use crate::db::freelancer_profiles as freelancer_db;
use crate::db::preferences as preference_db;
use crate::db::projects as project_db;
use crate::domain::matching::{self, ScoredProject};
use crate::error::AppError;
use crate::models::profiles::{self, UserType};

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 50;

#[derive(Debug, Clone, Deserialize)]
pub struct MatchQuery {
    pub limit: Option<u64>,
}

impl MatchQuery {
    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }
}

/// Open projects for a freelancer, ranked by skill overlap.
pub async fn recommend(
    db: &DatabaseConnection,
    user: &profiles::Model,
    query: &MatchQuery,
) -> Result<Vec<ScoredProject>, AppError> {
    require_user_type(user, UserType::Freelancer, "Matching is available to freelancers only")?;

    let prefs = preference_db::get_for_user(db, user.id).await?;
    let ((budget_min, budget_max), enabled) = match &prefs {
        Some(p) => (p.budget_window(), p.ai_matching_enabled),
        None => ((None, None), true),
    };

    let projects = project_db::list_open_in_budget(db, budget_min, budget_max, query.limit()).await?;

    let skills = freelancer_db::get_by_id(db, user.id)
        .await?
        .and_then(|f| f.skills);

    Ok(match skills {
        Some(skills) if enabled => matching::rank(projects, &skills),
        _ => matching::unscored(projects),
    })
}
