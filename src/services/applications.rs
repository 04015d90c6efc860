use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use uuid::Uuid;
use validator::Validate;

use crate::auth::authorization::{load_project, require_user_type};
use crate::db::applications as application_db;
use crate::db::projects as project_db;
use crate::domain::lifecycle::Transition;
use crate::error::AppError;
use crate::models::applications::{
    self, AcceptedApplication, ApplicationFilters, ApplicationStatus, CreateApplication,
    UpdateApplication,
};
use crate::models::profiles::{self, UserType};
use crate::models::projects::ProjectStatus;
use crate::services::subscriptions::ensure_posting_quota;

async fn load_application<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<applications::Model, AppError> {
    application_db::get_application_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))
}

pub async fn submit(
    db: &DatabaseConnection,
    user: &profiles::Model,
    input: CreateApplication,
) -> Result<applications::Model, AppError> {
    require_user_type(user, UserType::Freelancer, "Only freelancers can apply to projects")?;
    input.validate()?;

    let txn = db.begin().await?;
    let project = load_project(&txn, input.project_id).await?;

    if project.client_id == user.id {
        return Err(AppError::Forbidden(
            "You cannot apply to your own project".to_string(),
        ));
    }
    if project.status != ProjectStatus::Open {
        return Err(AppError::InvalidTransition(
            "This project is no longer accepting applications".to_string(),
        ));
    }
    if application_db::application_exists(&txn, project.id, user.id).await? {
        return Err(AppError::Conflict(
            "You have already applied to this project".to_string(),
        ));
    }
    ensure_posting_quota(&txn, user, Utc::now()).await?;

    let application = application_db::insert_application(&txn, input, user.id).await?;
    txn.commit().await?;

    tracing::info!(application_id = %application.id, project_id = %project.id, "application submitted");
    Ok(application)
}

/// Clients see every application on their own project; everyone else only
/// sees their own applications.
pub async fn list(
    db: &DatabaseConnection,
    user: &profiles::Model,
    mut filters: ApplicationFilters,
) -> Result<Vec<applications::Model>, AppError> {
    let owns_project = match filters.project_id {
        Some(project_id) => load_project(db, project_id).await?.client_id == user.id,
        None => false,
    };
    if !owns_project {
        filters.freelancer_id = Some(user.id);
    }

    Ok(application_db::list_applications(db, &filters).await?)
}

pub async fn get(
    db: &DatabaseConnection,
    user: &profiles::Model,
    id: Uuid,
) -> Result<applications::Model, AppError> {
    let application = load_application(db, id).await?;
    if application.freelancer_id != user.id {
        let project = load_project(db, application.project_id).await?;
        if project.client_id != user.id {
            return Err(AppError::Forbidden(
                "You cannot view this application".to_string(),
            ));
        }
    }
    Ok(application)
}

async fn own_pending(
    db: &DatabaseConnection,
    user: &profiles::Model,
    id: Uuid,
) -> Result<applications::Model, AppError> {
    let application = load_application(db, id).await?;
    if application.freelancer_id != user.id {
        return Err(AppError::Forbidden(
            "You can only change your own applications".to_string(),
        ));
    }
    if application.status != ApplicationStatus::Pending {
        return Err(AppError::InvalidTransition(
            "Only pending applications can be changed".to_string(),
        ));
    }
    Ok(application)
}

pub async fn update(
    db: &DatabaseConnection,
    user: &profiles::Model,
    id: Uuid,
    input: UpdateApplication,
) -> Result<applications::Model, AppError> {
    input.validate()?;
    let application = own_pending(db, user, id).await?;
    Ok(application_db::update_application(db, application, input).await?)
}

pub async fn withdraw(
    db: &DatabaseConnection,
    user: &profiles::Model,
    id: Uuid,
) -> Result<(), AppError> {
    own_pending(db, user, id).await?;
    application_db::delete_application(db, id).await?;
    Ok(())
}

/// Accept an application and start the project in one transaction.
///
/// The project row is locked and must still be open, so concurrent accepts
/// on the same project serialize and only the first one wins. Other pending
/// applications are left untouched.
pub async fn accept(
    db: &DatabaseConnection,
    user: &profiles::Model,
    id: Uuid,
) -> Result<AcceptedApplication, AppError> {
    let txn = db.begin().await?;

    let application = load_application(&txn, id).await?;
    let project = project_db::lock_project_by_id(&txn, application.project_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Project {} not found", application.project_id))
        })?;

    if project.client_id != user.id {
        return Err(AppError::Forbidden(
            "Only the project owner can accept applications".to_string(),
        ));
    }
    if application.status != ApplicationStatus::Pending {
        return Err(AppError::InvalidTransition(format!(
            "Application is already {:?}",
            application.status
        )));
    }
    if project.status != ProjectStatus::Open {
        return Err(AppError::InvalidTransition(
            "This project already has a selected freelancer".to_string(),
        ));
    }
    application.status.check(ApplicationStatus::Accepted)?;
    project.status.check(ProjectStatus::InProgress)?;

    let freelancer_id = application.freelancer_id;
    let application =
        application_db::set_status(&txn, application, ApplicationStatus::Accepted).await?;
    let project =
        project_db::set_status(&txn, project, ProjectStatus::InProgress, Some(freelancer_id))
            .await?;

    txn.commit().await?;

    tracing::info!(
        application_id = %application.id,
        project_id = %project.id,
        freelancer_id = %freelancer_id,
        "application accepted"
    );
    Ok(AcceptedApplication {
        application,
        project,
    })
}

pub async fn reject(
    db: &DatabaseConnection,
    user: &profiles::Model,
    id: Uuid,
) -> Result<applications::Model, AppError> {
    let application = load_application(db, id).await?;
    let project = load_project(db, application.project_id).await?;

    if project.client_id != user.id {
        return Err(AppError::Forbidden(
            "Only the project owner can reject applications".to_string(),
        ));
    }
    if application.status == ApplicationStatus::Rejected {
        return Ok(application);
    }
    application.status.check(ApplicationStatus::Rejected)?;

    Ok(application_db::set_status(db, application, ApplicationStatus::Rejected).await?)
}
