use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// `profiles.id` is the Supabase auth user id.
#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
    UserType,
    FullName,
    Email,
    AvatarUrl,
    Bio,
    Location,
    Website,
    Phone,
    SubscriptionTier,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FreelancerProfiles {
    Table,
    Id,
    Skills,
    HourlyRate,
    ExperienceLevel,
    PortfolioUrl,
    AvailabilityStatus,
    TotalEarnings,
    CompletedProjects,
    Rating,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ClientProfiles {
    Table,
    Id,
    CompanyName,
    CompanySize,
    Industry,
    TotalSpent,
    ActiveProjects,
    Rating,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Profiles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Profiles::UserType).string().not_null())
                    .col(ColumnDef::new(Profiles::FullName).string().not_null())
                    .col(ColumnDef::new(Profiles::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Profiles::AvatarUrl).string().null())
                    .col(ColumnDef::new(Profiles::Bio).text().null())
                    .col(ColumnDef::new(Profiles::Location).string().null())
                    .col(ColumnDef::new(Profiles::Website).string().null())
                    .col(ColumnDef::new(Profiles::Phone).string().null())
                    .col(
                        ColumnDef::new(Profiles::SubscriptionTier)
                            .string()
                            .not_null()
                            .default("free"),
                    )
                    .col(
                        ColumnDef::new(Profiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Profiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FreelancerProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FreelancerProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FreelancerProfiles::Skills)
                            .array(ColumnType::Text)
                            .null(),
                    )
                    .col(ColumnDef::new(FreelancerProfiles::HourlyRate).double().null())
                    .col(ColumnDef::new(FreelancerProfiles::ExperienceLevel).string().null())
                    .col(ColumnDef::new(FreelancerProfiles::PortfolioUrl).string().null())
                    .col(
                        ColumnDef::new(FreelancerProfiles::AvailabilityStatus)
                            .string()
                            .null()
                            .default("available"),
                    )
                    .col(
                        ColumnDef::new(FreelancerProfiles::TotalEarnings)
                            .double()
                            .null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(FreelancerProfiles::CompletedProjects)
                            .integer()
                            .null()
                            .default(0),
                    )
                    .col(ColumnDef::new(FreelancerProfiles::Rating).double().null())
                    .col(
                        ColumnDef::new(FreelancerProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(FreelancerProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_freelancer_profiles_id")
                            .from(FreelancerProfiles::Table, FreelancerProfiles::Id)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClientProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClientProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClientProfiles::CompanyName).string().null())
                    .col(ColumnDef::new(ClientProfiles::CompanySize).string().null())
                    .col(ColumnDef::new(ClientProfiles::Industry).string().null())
                    .col(
                        ColumnDef::new(ClientProfiles::TotalSpent)
                            .double()
                            .null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(ClientProfiles::ActiveProjects)
                            .integer()
                            .null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ClientProfiles::Rating).double().null())
                    .col(
                        ColumnDef::new(ClientProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ClientProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_profiles_id")
                            .from(ClientProfiles::Table, ClientProfiles::Id)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClientProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FreelancerProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await
    }
}
