use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Skills {
    Table,
    Id,
    Name,
    Category,
    Description,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ProjectCategories {
    Table,
    Id,
    Name,
    Description,
    Icon,
    IsActive,
    CreatedAt,
}

const SEED_SKILLS: &[(&str, &str)] = &[
    ("JavaScript", "Development"),
    ("TypeScript", "Development"),
    ("React", "Development"),
    ("Node.js", "Development"),
    ("Python", "Development"),
    ("Rust", "Development"),
    ("PostgreSQL", "Development"),
    ("UI Design", "Design"),
    ("UX Research", "Design"),
    ("Figma", "Design"),
    ("Copywriting", "Writing"),
    ("Technical Writing", "Writing"),
    ("SEO", "Marketing"),
    ("Social Media", "Marketing"),
    ("Data Analysis", "Data"),
    ("Machine Learning", "Data"),
];

const SEED_CATEGORIES: &[(&str, &str, &str)] = &[
    ("Web Development", "Websites, web apps and APIs", "code"),
    ("Mobile Development", "iOS, Android and cross-platform apps", "smartphone"),
    ("Design", "UI, UX, branding and illustration", "palette"),
    ("Writing", "Content, copy and documentation", "pen-tool"),
    ("Marketing", "SEO, social and growth", "trending-up"),
    ("Data & AI", "Analytics, data engineering and ML", "database"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Skills::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Skills::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(ColumnDef::new(Skills::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Skills::Category).string().not_null())
                    .col(ColumnDef::new(Skills::Description).text().null())
                    .col(
                        ColumnDef::new(Skills::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Skills::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectCategories::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(
                        ColumnDef::new(ProjectCategories::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ProjectCategories::Description).text().null())
                    .col(ColumnDef::new(ProjectCategories::Icon).string().null())
                    .col(
                        ColumnDef::new(ProjectCategories::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ProjectCategories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        let mut skills = Query::insert()
            .into_table(Skills::Table)
            .columns([Skills::Name, Skills::Category])
            .to_owned();
        for (name, category) in SEED_SKILLS {
            skills.values_panic([(*name).into(), (*category).into()]);
        }
        manager.exec_stmt(skills).await?;

        let mut categories = Query::insert()
            .into_table(ProjectCategories::Table)
            .columns([
                ProjectCategories::Name,
                ProjectCategories::Description,
                ProjectCategories::Icon,
            ])
            .to_owned();
        for (name, description, icon) in SEED_CATEGORIES {
            categories.values_panic([(*name).into(), (*description).into(), (*icon).into()]);
        }
        manager.exec_stmt(categories).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProjectCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Skills::Table).to_owned())
            .await
    }
}
