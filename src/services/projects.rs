use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;
use validator::Validate;

use crate::auth::authorization::{load_project, require_user_type, verify_project_owner};
use crate::db::client_profiles as client_db;
use crate::db::freelancer_profiles as freelancer_db;
use crate::db::milestones as milestone_db;
use crate::db::projects as project_db;
use crate::domain::lifecycle::{Transition, check_manual_project_transition};
use crate::error::AppError;
use crate::models::milestones::MilestoneStatus;
use crate::models::profiles::{self, UserType};
use crate::models::projects::{self, CreateProject, ProjectStatus, UpdateProject};
use crate::services::subscriptions::ensure_posting_quota;

fn check_budget(min: Option<f64>, max: Option<f64>) -> Result<(), AppError> {
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(AppError::Validation(
                "Minimum budget cannot exceed maximum budget".to_string(),
            ));
        }
    }
    Ok(())
}

pub async fn create_project(
    db: &DatabaseConnection,
    user: &profiles::Model,
    input: CreateProject,
) -> Result<projects::Model, AppError> {
    require_user_type(user, UserType::Client, "Only clients can post projects")?;
    input.validate()?;
    check_budget(input.budget_min, input.budget_max)?;

    let txn = db.begin().await?;
    ensure_posting_quota(&txn, user, Utc::now()).await?;
    let project = project_db::insert_project(&txn, input, user.id).await?;
    client_db::adjust_active_projects(&txn, user.id, 1).await?;
    txn.commit().await?;

    tracing::info!(project_id = %project.id, client_id = %user.id, "project posted");
    Ok(project)
}

pub async fn get_project(db: &DatabaseConnection, id: Uuid) -> Result<projects::Model, AppError> {
    load_project(db, id).await
}

pub async fn update_project(
    db: &DatabaseConnection,
    user: &profiles::Model,
    id: Uuid,
    input: UpdateProject,
) -> Result<projects::Model, AppError> {
    input.validate()?;
    let project = verify_project_owner(db, id, user.id).await?;

    if project.status.is_terminal() {
        return Err(AppError::InvalidTransition(
            "Completed or cancelled projects cannot be edited".to_string(),
        ));
    }
    check_budget(
        input.budget_min.or(project.budget_min),
        input.budget_max.or(project.budget_max),
    )?;

    Ok(project_db::update_project(db, id, input).await?)
}

/// Move a project along its lifecycle. Completion credits the freelancer
/// with the value of the completed milestones.
pub async fn update_status(
    db: &DatabaseConnection,
    user: &profiles::Model,
    id: Uuid,
    next: ProjectStatus,
) -> Result<projects::Model, AppError> {
    let txn = db.begin().await?;
    let project = verify_project_owner(&txn, id, user.id).await?;

    if project.status == next {
        return Ok(project);
    }
    check_manual_project_transition(project.status, next)?;

    let freelancer = project.selected_freelancer_id;
    let client_id = project.client_id;
    let updated = project_db::set_status(&txn, project, next, None).await?;

    if next.is_terminal() {
        client_db::adjust_active_projects(&txn, client_id, -1).await?;
    }
    if let (ProjectStatus::Completed, Some(freelancer_id)) = (next, freelancer) {
        let earned: f64 = milestone_db::list_for_project(&txn, id)
            .await?
            .iter()
            .filter(|m| m.status == MilestoneStatus::Completed)
            .filter_map(|m| m.amount)
            .sum();
        freelancer_db::record_completion(&txn, freelancer_id, earned).await?;
    }

    txn.commit().await?;
    tracing::info!(project_id = %id, status = ?next, "project status changed");
    Ok(updated)
}

pub async fn delete_project(
    db: &DatabaseConnection,
    user: &profiles::Model,
    id: Uuid,
) -> Result<(), AppError> {
    let txn = db.begin().await?;
    let project = verify_project_owner(&txn, id, user.id).await?;

    project_db::delete_project(&txn, id).await?;
    if !project.status.is_terminal() {
        client_db::adjust_active_projects(&txn, project.client_id, -1).await?;
    }
    txn.commit().await?;
    Ok(())
}
