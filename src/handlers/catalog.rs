use actix_web::{HttpResponse, web};

use crate::cache::keys;
use crate::db::catalog;
use crate::error::AppError;
use crate::models::skills::SkillQuery;
use crate::state::AppState;

// Catalog routes are public; they back the sign-up and project forms.

/// GET /api/skills?category=
pub async fn get_skills(
    state: web::Data<AppState>,
    query: web::Query<SkillQuery>,
) -> Result<HttpResponse, AppError> {
    let category = query.category.as_deref().filter(|c| !c.is_empty());
    let skills = state
        .cache
        .get_or_load(&keys::skills(category), state.config.cache.catalog_ttl, || async {
            catalog::list_skills(&state.db, category)
                .await
                .map_err(AppError::from)
        })
        .await?;

    Ok(HttpResponse::Ok().json(skills))
}

/// GET /api/skills/categories
pub async fn get_skill_categories(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let categories = state
        .cache
        .get_or_load(&keys::skill_categories(), state.config.cache.catalog_ttl, || async {
            catalog::list_skill_categories(&state.db)
                .await
                .map_err(AppError::from)
        })
        .await?;

    Ok(HttpResponse::Ok().json(categories))
}

/// GET /api/project-categories
pub async fn get_project_categories(
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let categories = state
        .cache
        .get_or_load(&keys::project_categories(), state.config.cache.catalog_ttl, || async {
            catalog::list_project_categories(&state.db)
                .await
                .map_err(AppError::from)
        })
        .await?;

    Ok(HttpResponse::Ok().json(categories))
}
