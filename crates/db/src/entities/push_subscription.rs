//! Push subscription entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Push subscription entity for Web Push notifications.
///
/// A subscription belongs to exactly one owner: an anonymous student
/// (`student_key`) or an admin (`admin_id`). The two nullable columns are a
/// storage detail; code speaks [`SubscriptionOwner`], which carries the
/// one-of-two invariant structurally.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "push_subscription")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Student owner key, set iff the subscription belongs to a student
    #[sea_orm(indexed, nullable)]
    pub student_key: Option<String>,

    /// Admin owner ID, set iff the subscription belongs to an admin
    #[sea_orm(indexed, nullable)]
    pub admin_id: Option<String>,

    /// Push subscription endpoint URL
    #[sea_orm(column_type = "Text")]
    pub endpoint: String,

    /// P256DH key for push subscription
    pub p256dh: String,

    /// Auth key for push subscription
    pub auth: String,

    /// Timestamp when the subscription was created
    pub created_at: DateTimeWithTimeZone,
}

/// Owner of a push subscription: an anonymous student or an admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionOwner {
    /// Identified by the client-generated student key.
    Student(String),
    /// Identified by the admin account ID.
    Admin(String),
}

impl SubscriptionOwner {
    /// Column values for persisting this owner.
    #[must_use]
    pub fn columns(&self) -> (Option<String>, Option<String>) {
        match self {
            Self::Student(key) => (Some(key.clone()), None),
            Self::Admin(id) => (None, Some(id.clone())),
        }
    }
}

impl Model {
    /// The owner of this subscription, when the row is well-formed.
    #[must_use]
    pub fn owner(&self) -> Option<SubscriptionOwner> {
        match (&self.student_key, &self.admin_id) {
            (Some(key), None) => Some(SubscriptionOwner::Student(key.clone())),
            (None, Some(id)) => Some(SubscriptionOwner::Admin(id.clone())),
            _ => None,
        }
    }
}

/// Relations for push subscription.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::admin::Entity",
        from = "Column::AdminId",
        to = "super::admin::Column::Id",
        on_delete = "Cascade"
    )]
    Admin,
}

impl Related<super::admin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Admin.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(student_key: Option<&str>, admin_id: Option<&str>) -> Model {
        Model {
            id: "01h0000000000000000000000p".to_string(),
            student_key: student_key.map(ToOwned::to_owned),
            admin_id: admin_id.map(ToOwned::to_owned),
            endpoint: "https://push.example/abc".to_string(),
            p256dh: "p256dh-key".to_string(),
            auth: "auth-secret".to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn owner_requires_exactly_one_side() {
        assert_eq!(
            row(Some("S1"), None).owner(),
            Some(SubscriptionOwner::Student("S1".to_string()))
        );
        assert_eq!(
            row(None, Some("a1")).owner(),
            Some(SubscriptionOwner::Admin("a1".to_string()))
        );
        assert_eq!(row(None, None).owner(), None);
        assert_eq!(row(Some("S1"), Some("a1")).owner(), None);
    }

    #[test]
    fn owner_columns_round_trip() {
        let owner = SubscriptionOwner::Student("S1".to_string());
        assert_eq!(owner.columns(), (Some("S1".to_string()), None));

        let owner = SubscriptionOwner::Admin("a1".to_string());
        assert_eq!(owner.columns(), (None, Some("a1".to_string())));
    }
}
