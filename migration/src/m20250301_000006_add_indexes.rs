use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Projects {
    Table,
    ClientId,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Applications {
    Table,
    FreelancerId,
}

#[derive(DeriveIden)]
enum ProjectMilestones {
    Table,
    ProjectId,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    RevieweeId,
}

#[derive(DeriveIden)]
enum Subscriptions {
    Table,
    UserId,
    CurrentPeriodEnd,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on projects.client_id for a client's own postings
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_client_id")
                    .table(Projects::Table)
                    .col(Projects::ClientId)
                    .to_owned(),
            )
            .await?;

        // Composite index for the open-project feed, newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_status_created_at")
                    .table(Projects::Table)
                    .col(Projects::Status)
                    .col(Projects::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Index on applications.freelancer_id for "my applications"
        manager
            .create_index(
                Index::create()
                    .name("idx_applications_freelancer_id")
                    .table(Applications::Table)
                    .col(Applications::FreelancerId)
                    .to_owned(),
            )
            .await?;

        // A project can have only one accepted application
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_applications_one_accepted \
                 ON applications (project_id) WHERE status = 'accepted'",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_milestones_project_id")
                    .table(ProjectMilestones::Table)
                    .col(ProjectMilestones::ProjectId)
                    .to_owned(),
            )
            .await?;

        // Index on reviews.reviewee_id for profile review pages
        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_reviewee_id")
                    .table(Reviews::Table)
                    .col(Reviews::RevieweeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subscriptions_user_period_end")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::UserId)
                    .col(Subscriptions::CurrentPeriodEnd)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_projects_client_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_projects_status_created_at").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_applications_freelancer_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_applications_one_accepted").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_project_milestones_project_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_reviews_reviewee_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_subscriptions_user_period_end").to_owned())
            .await?;

        Ok(())
    }
}
