//! Admin account entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Admin account entity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "admin")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Login name
    #[sea_orm(unique)]
    pub username: String,

    /// Argon2 hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Timestamp when the account was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp of the most recent successful login
    #[sea_orm(nullable)]
    pub last_login_at: Option<DateTimeWithTimeZone>,
}

/// Relations for admin.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::push_subscription::Entity")]
    PushSubscription,
}

impl Related<super::push_subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PushSubscription.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
