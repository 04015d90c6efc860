use chrono::{DateTime, Utc};
use sea_orm::*;
use uuid::Uuid;

use crate::models::PaginationQuery;
use crate::models::projects::{self, CreateProject, ProjectFilters, ProjectStatus, UpdateProject};

/// Insert a new project (always starts `open`).
pub async fn insert_project<C: ConnectionTrait>(
    db: &C,
    input: CreateProject,
    client_id: Uuid,
) -> Result<projects::Model, DbErr> {
    let new_project = projects::ActiveModel {
        id: Set(Uuid::new_v4()),
        client_id: Set(client_id),
        title: Set(input.title),
        description: Set(input.description),
        budget_min: Set(input.budget_min),
        budget_max: Set(input.budget_max),
        deadline: Set(input.deadline),
        required_skills: Set(input.required_skills),
        category_id: Set(input.category_id),
        status: Set(ProjectStatus::Open),
        selected_freelancer_id: Set(None),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
    };

    new_project.insert(db).await
}

/// List projects newest first, optionally filtered by status and owner.
pub async fn list_projects<C: ConnectionTrait>(
    db: &C,
    filters: &ProjectFilters,
) -> Result<Vec<projects::Model>, DbErr> {
    let mut query = projects::Entity::find();

    if let Some(status) = filters.status {
        query = query.filter(projects::Column::Status.eq(status));
    }
    if let Some(client_id) = filters.client_id {
        query = query.filter(projects::Column::ClientId.eq(client_id));
    }

    let page: PaginationQuery = filters.pagination();
    query
        .order_by_desc(projects::Column::CreatedAt)
        .paginate(db, page.limit())
        .fetch_page(page.page() - 1)
        .await
}

/// Open projects inside an optional budget window, newest first.
pub async fn list_open_in_budget<C: ConnectionTrait>(
    db: &C,
    budget_min: Option<f64>,
    budget_max: Option<f64>,
    limit: u64,
) -> Result<Vec<projects::Model>, DbErr> {
    let mut query = projects::Entity::find().filter(projects::Column::Status.eq(ProjectStatus::Open));

    if let Some(min) = budget_min {
        query = query.filter(projects::Column::BudgetMin.gte(min));
    }
    if let Some(max) = budget_max {
        query = query.filter(projects::Column::BudgetMax.lte(max));
    }

    query
        .order_by_desc(projects::Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await
}

pub async fn get_project_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<projects::Model>, DbErr> {
    projects::Entity::find_by_id(id).one(db).await
}

/// Read a project and hold its row lock (`FOR UPDATE`) until the
/// surrounding transaction ends.
pub async fn lock_project_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<projects::Model>, DbErr> {
    projects::Entity::find_by_id(id).lock_exclusive().one(db).await
}

pub async fn get_projects_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: Vec<Uuid>,
) -> Result<Vec<projects::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    projects::Entity::find()
        .filter(projects::Column::Id.is_in(ids))
        .all(db)
        .await
}

/// Update the editable fields of a project.
pub async fn update_project<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    input: UpdateProject,
) -> Result<projects::Model, DbErr> {
    let project = projects::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Project not found".to_string()))?;

    let mut active: projects::ActiveModel = project.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(budget_min) = input.budget_min {
        active.budget_min = Set(Some(budget_min));
    }
    if let Some(budget_max) = input.budget_max {
        active.budget_max = Set(Some(budget_max));
    }
    if let Some(deadline) = input.deadline {
        active.deadline = Set(Some(deadline));
    }
    if let Some(required_skills) = input.required_skills {
        active.required_skills = Set(Some(required_skills));
    }
    if let Some(category_id) = input.category_id {
        active.category_id = Set(Some(category_id));
    }
    active.updated_at = Set(Some(Utc::now()));

    active.update(db).await
}

/// Write a new status, and the selected freelancer when one is given.
pub async fn set_status<C: ConnectionTrait>(
    db: &C,
    project: projects::Model,
    status: ProjectStatus,
    selected_freelancer_id: Option<Uuid>,
) -> Result<projects::Model, DbErr> {
    let mut active: projects::ActiveModel = project.into();
    active.status = Set(status);
    if let Some(freelancer_id) = selected_freelancer_id {
        active.selected_freelancer_id = Set(Some(freelancer_id));
    }
    active.updated_at = Set(Some(Utc::now()));

    active.update(db).await
}

/// Projects a client created since `since`, for the free-tier quota.
pub async fn count_created_since<C: ConnectionTrait>(
    db: &C,
    client_id: Uuid,
    since: DateTime<Utc>,
) -> Result<u64, DbErr> {
    projects::Entity::find()
        .filter(projects::Column::ClientId.eq(client_id))
        .filter(projects::Column::CreatedAt.gte(since))
        .count(db)
        .await
}

pub async fn delete_project<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<DeleteResult, DbErr> {
    projects::Entity::delete_by_id(id).exec(db).await
}
