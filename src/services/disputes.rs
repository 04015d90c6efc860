use sea_orm::DatabaseConnection;
use uuid::Uuid;
use validator::Validate;

use crate::auth::authorization::{load_project, verify_project_party};
use crate::db::disputes as dispute_db;
use crate::db::profiles as profile_db;
use crate::domain::lifecycle::{Transition, dispute_settles};
use crate::error::AppError;
use crate::models::disputes::{self, CreateDispute, DisputeView, UpdateDisputeStatus};
use crate::models::profiles;

pub async fn open(
    db: &DatabaseConnection,
    user: &profiles::Model,
    project_id: Uuid,
    input: CreateDispute,
) -> Result<disputes::Model, AppError> {
    input.validate()?;
    verify_project_party(db, project_id, user.id).await?;

    let dispute = dispute_db::insert_dispute(db, project_id, user.id, input).await?;
    tracing::info!(dispute_id = %dispute.id, project_id = %project_id, "dispute opened");
    Ok(dispute)
}

pub async fn list(
    db: &DatabaseConnection,
    user: &profiles::Model,
    project_id: Uuid,
) -> Result<Vec<DisputeView>, AppError> {
    verify_project_party(db, project_id, user.id).await?;
    let rows = dispute_db::list_for_project(db, project_id).await?;

    let mut ids: Vec<Uuid> = rows
        .iter()
        .flat_map(|d| std::iter::once(d.initiated_by).chain(d.resolved_by))
        .collect();
    ids.sort();
    ids.dedup();
    let names = profile_db::profiles_by_ids(db, ids).await?;

    Ok(rows
        .into_iter()
        .map(|dispute| DisputeView {
            initiated_by_name: names.get(&dispute.initiated_by).map(|p| p.full_name.clone()),
            resolved_by_name: dispute
                .resolved_by
                .and_then(|id| names.get(&id))
                .map(|p| p.full_name.clone()),
            dispute,
        })
        .collect())
}

/// Only the project's client or the dispute's initiator may move a dispute.
pub async fn update_status(
    db: &DatabaseConnection,
    user: &profiles::Model,
    id: Uuid,
    input: UpdateDisputeStatus,
) -> Result<disputes::Model, AppError> {
    let dispute = dispute_db::get_dispute_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Dispute {id} not found")))?;
    let project = load_project(db, dispute.project_id).await?;

    if project.client_id != user.id && dispute.initiated_by != user.id {
        return Err(AppError::Forbidden(
            "Only the project client or the dispute initiator can update it".to_string(),
        ));
    }
    if dispute.status == input.status {
        return Ok(dispute);
    }
    dispute.status.check(input.status)?;

    let settled_by = dispute_settles(input.status).then_some(user.id);
    Ok(dispute_db::set_status(db, dispute, input.status, input.resolution_notes, settled_by).await?)
}
