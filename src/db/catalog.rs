use sea_orm::*;

use crate::models::{project_categories, skills};

/// Active skills ordered by name, optionally restricted to one category.
pub async fn list_skills<C: ConnectionTrait>(
    db: &C,
    category: Option<&str>,
) -> Result<Vec<skills::Model>, DbErr> {
    let mut query = skills::Entity::find().filter(skills::Column::IsActive.eq(true));

    if let Some(category) = category {
        query = query.filter(skills::Column::Category.eq(category));
    }

    query.order_by_asc(skills::Column::Name).all(db).await
}

/// Distinct categories of active skills, sorted.
pub async fn list_skill_categories<C: ConnectionTrait>(db: &C) -> Result<Vec<String>, DbErr> {
    skills::Entity::find()
        .select_only()
        .column(skills::Column::Category)
        .filter(skills::Column::IsActive.eq(true))
        .distinct()
        .order_by_asc(skills::Column::Category)
        .into_tuple::<String>()
        .all(db)
        .await
}

pub async fn list_project_categories<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<project_categories::Model>, DbErr> {
    project_categories::Entity::find()
        .filter(project_categories::Column::IsActive.eq(true))
        .order_by_asc(project_categories::Column::Name)
        .all(db)
        .await
}
