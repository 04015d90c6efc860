use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum ProjectMilestones {
    Table,
    Id,
    ProjectId,
    Title,
    Description,
    Amount,
    DueDate,
    Status,
    CompletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TimeTracking {
    Table,
    Id,
    ProjectId,
    FreelancerId,
    StartTime,
    EndTime,
    DurationMinutes,
    Description,
    IsBillable,
    HourlyRate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DisputeResolutions {
    Table,
    Id,
    ProjectId,
    InitiatedBy,
    DisputeType,
    Description,
    Status,
    ResolutionNotes,
    ResolvedBy,
    ResolvedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
    ProjectId,
    ReviewerId,
    RevieweeId,
    Rating,
    Title,
    Comment,
    IsPublic,
    CreatedAt,
}

#[derive(DeriveIden)]
enum FileAttachments {
    Table,
    Id,
    UploaderId,
    ProjectId,
    MessageId,
    FileName,
    FileSize,
    FileType,
    FileUrl,
    IsPublic,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
}

fn project_fk(name: &str, table: impl IntoIden, column: impl IntoIden) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(name)
        .from(table, column)
        .to(Projects::Table, Projects::Id)
        .on_delete(ForeignKeyAction::Cascade)
        .on_update(ForeignKeyAction::Cascade)
        .to_owned()
}

fn profile_fk(name: &str, table: impl IntoIden, column: impl IntoIden) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(name)
        .from(table, column)
        .to(Profiles::Table, Profiles::Id)
        .on_delete(ForeignKeyAction::Cascade)
        .on_update(ForeignKeyAction::Cascade)
        .to_owned()
}

fn created_at(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

fn updated_at(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .null()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProjectMilestones::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectMilestones::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProjectMilestones::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(ProjectMilestones::Title).string().not_null())
                    .col(ColumnDef::new(ProjectMilestones::Description).text().null())
                    .col(ColumnDef::new(ProjectMilestones::Amount).double().null())
                    .col(ColumnDef::new(ProjectMilestones::DueDate).date().null())
                    .col(
                        ColumnDef::new(ProjectMilestones::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(ProjectMilestones::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at(ProjectMilestones::CreatedAt))
                    .col(updated_at(ProjectMilestones::UpdatedAt))
                    .foreign_key(&mut project_fk(
                        "fk_project_milestones_project_id",
                        ProjectMilestones::Table,
                        ProjectMilestones::ProjectId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TimeTracking::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TimeTracking::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TimeTracking::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(TimeTracking::FreelancerId).uuid().not_null())
                    .col(
                        ColumnDef::new(TimeTracking::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimeTracking::EndTime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(TimeTracking::DurationMinutes).integer().null())
                    .col(ColumnDef::new(TimeTracking::Description).text().null())
                    .col(
                        ColumnDef::new(TimeTracking::IsBillable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(TimeTracking::HourlyRate).double().null())
                    .col(created_at(TimeTracking::CreatedAt))
                    .col(updated_at(TimeTracking::UpdatedAt))
                    .foreign_key(&mut project_fk(
                        "fk_time_tracking_project_id",
                        TimeTracking::Table,
                        TimeTracking::ProjectId,
                    ))
                    .foreign_key(&mut profile_fk(
                        "fk_time_tracking_freelancer_id",
                        TimeTracking::Table,
                        TimeTracking::FreelancerId,
                    ))
                    .to_owned(),
            )
            .await?;

        // At most one running timer per freelancer per project. The index
        // builder cannot express a WHERE clause, so this one is raw SQL.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_time_tracking_one_running \
                 ON time_tracking (project_id, freelancer_id) WHERE end_time IS NULL",
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DisputeResolutions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DisputeResolutions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DisputeResolutions::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(DisputeResolutions::InitiatedBy).uuid().not_null())
                    .col(ColumnDef::new(DisputeResolutions::DisputeType).string().not_null())
                    .col(ColumnDef::new(DisputeResolutions::Description).text().not_null())
                    .col(
                        ColumnDef::new(DisputeResolutions::Status)
                            .string()
                            .not_null()
                            .default("open"),
                    )
                    .col(ColumnDef::new(DisputeResolutions::ResolutionNotes).text().null())
                    .col(ColumnDef::new(DisputeResolutions::ResolvedBy).uuid().null())
                    .col(
                        ColumnDef::new(DisputeResolutions::ResolvedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at(DisputeResolutions::CreatedAt))
                    .col(updated_at(DisputeResolutions::UpdatedAt))
                    .foreign_key(&mut project_fk(
                        "fk_dispute_resolutions_project_id",
                        DisputeResolutions::Table,
                        DisputeResolutions::ProjectId,
                    ))
                    .foreign_key(&mut profile_fk(
                        "fk_dispute_resolutions_initiated_by",
                        DisputeResolutions::Table,
                        DisputeResolutions::InitiatedBy,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reviews::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Reviews::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(Reviews::ReviewerId).uuid().not_null())
                    .col(ColumnDef::new(Reviews::RevieweeId).uuid().not_null())
                    .col(ColumnDef::new(Reviews::Rating).small_integer().not_null())
                    .col(ColumnDef::new(Reviews::Title).string().null())
                    .col(ColumnDef::new(Reviews::Comment).text().null())
                    .col(
                        ColumnDef::new(Reviews::IsPublic)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(created_at(Reviews::CreatedAt))
                    .foreign_key(&mut project_fk(
                        "fk_reviews_project_id",
                        Reviews::Table,
                        Reviews::ProjectId,
                    ))
                    .foreign_key(&mut profile_fk(
                        "fk_reviews_reviewer_id",
                        Reviews::Table,
                        Reviews::ReviewerId,
                    ))
                    .foreign_key(&mut profile_fk(
                        "fk_reviews_reviewee_id",
                        Reviews::Table,
                        Reviews::RevieweeId,
                    ))
                    .to_owned(),
            )
            .await?;

        // One review per reviewer per reviewee per project
        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_project_reviewer_reviewee_unique")
                    .table(Reviews::Table)
                    .col(Reviews::ProjectId)
                    .col(Reviews::ReviewerId)
                    .col(Reviews::RevieweeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FileAttachments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FileAttachments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FileAttachments::UploaderId).uuid().not_null())
                    .col(ColumnDef::new(FileAttachments::ProjectId).uuid().null())
                    .col(ColumnDef::new(FileAttachments::MessageId).uuid().null())
                    .col(ColumnDef::new(FileAttachments::FileName).string().not_null())
                    .col(ColumnDef::new(FileAttachments::FileSize).big_integer().null())
                    .col(ColumnDef::new(FileAttachments::FileType).string().null())
                    .col(ColumnDef::new(FileAttachments::FileUrl).text().not_null())
                    .col(
                        ColumnDef::new(FileAttachments::IsPublic)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(created_at(FileAttachments::CreatedAt))
                    .foreign_key(&mut project_fk(
                        "fk_file_attachments_project_id",
                        FileAttachments::Table,
                        FileAttachments::ProjectId,
                    ))
                    .foreign_key(&mut profile_fk(
                        "fk_file_attachments_uploader_id",
                        FileAttachments::Table,
                        FileAttachments::UploaderId,
                    ))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FileAttachments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DisputeResolutions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TimeTracking::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectMilestones::Table).to_owned())
            .await
    }
}
