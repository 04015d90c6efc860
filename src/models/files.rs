use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `file_attachments` table. The bytes live in object
/// storage; this row keeps the metadata and public URL.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "file_attachments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub uploader_id: Uuid,
    pub project_id: Option<Uuid>,
    pub message_id: Option<Uuid>,
    pub file_name: String,
    pub file_size: Option<i64>,
    pub file_type: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub file_url: String,
    pub is_public: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id"
    )]
    Project,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadQuery {
    pub file_name: String,
}

#[derive(Debug, Clone)]
pub struct NewAttachment {
    pub uploader_id: Uuid,
    pub project_id: Uuid,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: Option<String>,
    pub file_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttachmentView {
    #[serde(flatten)]
    pub attachment: Model,
    pub uploader_name: Option<String>,
}
