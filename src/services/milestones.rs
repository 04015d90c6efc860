use sea_orm::DatabaseConnection;
use uuid::Uuid;
use validator::Validate;

use crate::auth::authorization::{verify_project_owner, verify_project_party};
use crate::db::milestones as milestone_db;
use crate::domain::lifecycle::Transition;
use crate::domain::milestones::summarize;
use crate::error::AppError;
use crate::models::milestones::{self, CreateMilestone, MilestoneOverview, UpdateMilestone};
use crate::models::profiles;

pub async fn overview(
    db: &DatabaseConnection,
    user: &profiles::Model,
    project_id: Uuid,
) -> Result<MilestoneOverview, AppError> {
    verify_project_party(db, project_id, user.id).await?;

    let milestones = milestone_db::list_for_project(db, project_id).await?;
    let summary = summarize(&milestones);
    Ok(MilestoneOverview {
        milestones,
        summary,
    })
}

pub async fn create(
    db: &DatabaseConnection,
    user: &profiles::Model,
    project_id: Uuid,
    input: CreateMilestone,
) -> Result<milestones::Model, AppError> {
    input.validate()?;
    let project = verify_project_owner(db, project_id, user.id).await?;

    if project.status.is_terminal() {
        return Err(AppError::InvalidTransition(
            "Milestones cannot be added to a closed project".to_string(),
        ));
    }

    Ok(milestone_db::insert_milestone(db, project_id, input).await?)
}

/// Only the project owner may edit a milestone or move its status; amounts
/// feed the freelancer's earnings on completion.
pub async fn update(
    db: &DatabaseConnection,
    user: &profiles::Model,
    id: Uuid,
    input: UpdateMilestone,
) -> Result<milestones::Model, AppError> {
    input.validate()?;

    let milestone = milestone_db::get_milestone_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Milestone {id} not found")))?;
    verify_project_owner(db, milestone.project_id, user.id).await?;

    if let Some(next) = input.status {
        milestone.status.check(next)?;
    }

    Ok(milestone_db::update_milestone(db, milestone, input).await?)
}
