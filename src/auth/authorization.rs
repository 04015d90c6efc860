use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::db::projects as project_db;
use crate::error::AppError;
use crate::models::profiles::{self, UserType};
use crate::models::projects;

pub async fn load_project<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
) -> Result<projects::Model, AppError> {
    project_db::get_project_by_id(db, project_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {project_id} not found")))
}

/// The project, if `user_id` is the client who posted it.
pub async fn verify_project_owner<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<projects::Model, AppError> {
    let project = load_project(db, project_id).await?;
    if project.client_id != user_id {
        return Err(AppError::Forbidden("You do not own this project".to_string()));
    }
    Ok(project)
}

/// The project, if `user_id` is its client or its selected freelancer.
pub async fn verify_project_party<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<projects::Model, AppError> {
    let project = load_project(db, project_id).await?;
    if !project.is_party(user_id) {
        return Err(AppError::Forbidden(
            "You are not a party to this project".to_string(),
        ));
    }
    Ok(project)
}

pub fn verify_self(user: &profiles::Model, id: Uuid) -> Result<(), AppError> {
    if user.id != id {
        return Err(AppError::Forbidden(
            "You can only modify your own profile".to_string(),
        ));
    }
    Ok(())
}

pub fn require_user_type(
    user: &profiles::Model,
    expected: UserType,
    message: &str,
) -> Result<(), AppError> {
    if user.user_type != expected {
        return Err(AppError::Forbidden(message.to_string()));
    }
    Ok(())
}
