//! Suggestion repository.

use std::sync::Arc;

use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::entities::suggestion::{ActiveModel, Column, Entity, Model, SuggestionStatus};
use suggestbox_common::{AppError, AppResult};

/// Filters for the admin suggestion listing.
#[derive(Debug, Clone, Default)]
pub struct SuggestionFilter {
    /// Restrict to a school grade.
    pub grade: Option<i32>,
    /// Restrict to a lifecycle status.
    pub status: Option<SuggestionStatus>,
    /// Case-insensitive substring search over title and content.
    pub q: Option<String>,
}

/// Repository for suggestion operations.
#[derive(Clone)]
pub struct SuggestionRepository {
    db: Arc<DatabaseConnection>,
}

impl SuggestionRepository {
    /// Create a new suggestion repository.
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a suggestion by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Model>> {
        Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a suggestion by ID or return an error.
    pub async fn get_by_id(&self, id: &str) -> AppResult<Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Suggestion {id} not found")))
    }

    /// Find a suggestion owned by a specific student.
    pub async fn find_by_id_for_student(
        &self,
        id: &str,
        student_key: &str,
    ) -> AppResult<Option<Model>> {
        Entity::find_by_id(id)
            .filter(Column::StudentKey.eq(student_key))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All suggestions of a student, newest first.
    ///
    /// With `answered_after`, only suggestions answered strictly after the
    /// given instant are returned (polling cursor for "new answers").
    pub async fn find_by_student(
        &self,
        student_key: &str,
        answered_after: Option<sea_orm::prelude::DateTimeWithTimeZone>,
    ) -> AppResult<Vec<Model>> {
        let mut query = Entity::find().filter(Column::StudentKey.eq(student_key));

        if let Some(after) = answered_after {
            query = query
                .filter(Column::AnsweredAt.is_not_null())
                .filter(Column::AnsweredAt.gt(after));
        }

        query
            .order_by_desc(Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All suggestions matching the admin filter, newest first.
    pub async fn search(&self, filter: &SuggestionFilter) -> AppResult<Vec<Model>> {
        let mut query = Entity::find();

        if let Some(grade) = filter.grade {
            query = query.filter(Column::Grade.eq(grade));
        }
        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status));
        }
        if let Some(q) = filter.q.as_deref() {
            let q = q.trim();
            if !q.is_empty() {
                let like = format!("%{q}%");
                query = query.filter(
                    Condition::any()
                        .add(Expr::col(Column::Title).ilike(like.clone()))
                        .add(Expr::col(Column::Content).ilike(like)),
                );
            }
        }

        query
            .order_by_desc(Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new suggestion.
    pub async fn create(&self, suggestion: ActiveModel) -> AppResult<Model> {
        suggestion
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a suggestion.
    pub async fn update(&self, suggestion: ActiveModel) -> AppResult<Model> {
        suggestion
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a suggestion.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
