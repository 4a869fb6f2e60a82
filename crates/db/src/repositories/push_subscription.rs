//! Push subscription repository.

use std::sync::Arc;

use sea_orm::sea_query::SimpleExpr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entities::push_subscription::{ActiveModel, Column, Entity, Model, SubscriptionOwner};
use suggestbox_common::{AppError, AppResult};

/// Repository for push subscription operations.
#[derive(Clone)]
pub struct PushSubscriptionRepository {
    db: Arc<DatabaseConnection>,
}

impl PushSubscriptionRepository {
    /// Create a new push subscription repository.
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn owner_filter(owner: &SubscriptionOwner) -> SimpleExpr {
        match owner {
            SubscriptionOwner::Student(key) => Column::StudentKey.eq(key.as_str()),
            SubscriptionOwner::Admin(id) => Column::AdminId.eq(id.as_str()),
        }
    }

    /// All subscriptions belonging to an owner.
    pub async fn find_by_owner(&self, owner: &SubscriptionOwner) -> AppResult<Vec<Model>> {
        Entity::find()
            .filter(Self::owner_filter(owner))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All subscriptions belonging to any admin.
    pub async fn find_admin_subscriptions(&self) -> AppResult<Vec<Model>> {
        Entity::find()
            .filter(Column::AdminId.is_not_null())
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new push subscription.
    pub async fn create(&self, subscription: ActiveModel) -> AppResult<Model> {
        subscription
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete all subscriptions of an owner. Returns the number of rows
    /// removed.
    pub async fn delete_by_owner(&self, owner: &SubscriptionOwner) -> AppResult<u64> {
        let result = Entity::delete_many()
            .filter(Self::owner_filter(owner))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }
}
