use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::subscriptions::SubscriptionTier;

/// Which side of the marketplace a profile belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    #[sea_orm(string_value = "freelancer")]
    Freelancer,
    #[sea_orm(string_value = "client")]
    Client,
}

/// SeaORM entity for the `profiles` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_type: UserType,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub avatar_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub subscription_tier: SubscriptionTier,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::freelancer_profiles::Entity")]
    FreelancerProfile,
    #[sea_orm(has_one = "super::client_profiles::Entity")]
    ClientProfile,
    #[sea_orm(has_many = "super::applications::Entity")]
    Applications,
}

impl Related<super::freelancer_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FreelancerProfile.def()
    }
}

impl Related<super::client_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClientProfile.def()
    }
}

impl Related<super::applications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Built by the auth extractor from verified JWT claims on first sight of a user.
#[derive(Debug, Clone)]
pub struct CreateProfileFromAuth {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub user_type: UserType,
}

/// Body of `PUT /api/profiles/{id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfile {
    #[validate(length(min = 1, message = "Full name cannot be empty"))]
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    #[validate(url(message = "Website must be a valid URL"))]
    pub website: Option<String>,
    pub phone: Option<String>,
}

/// Profile together with its role-specific extension, as returned by `/api/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileBundle {
    #[serde(flatten)]
    pub profile: Model,
    pub freelancer: Option<super::freelancer_profiles::Model>,
    pub client: Option<super::client_profiles::Model>,
}
