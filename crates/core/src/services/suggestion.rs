//! Suggestion workflow service.

use chrono::{DateTime, Utc};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use suggestbox_common::{AppError, AppResult, IdGenerator};
use suggestbox_db::entities::suggestion::{self, SuggestionStatus};
use suggestbox_db::repositories::{SuggestionFilter, SuggestionRepository};

use crate::services::push_notification::PushNotificationService;

/// Notification title shown to a student when their suggestion is answered.
const ANSWER_PUSH_TITLE: &str = "새 답변이 도착했어요";

/// Notification body shown to admins when a new suggestion arrives.
const NEW_SUGGESTION_PUSH_BODY: &str = "학생이 새로운 건의사항을 등록했습니다.";

/// Input for creating a suggestion.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSuggestionInput {
    /// School grade (1-3)
    #[validate(range(min = 1, max = 3))]
    pub grade: i32,

    /// Short title
    #[validate(length(min = 2, max = 140))]
    pub title: String,

    /// Full suggestion text
    #[validate(length(min = 5, max = 10_000))]
    pub content: String,
}

/// Input for editing a pending suggestion.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateSuggestionInput {
    /// New school grade
    #[validate(range(min = 1, max = 3))]
    pub grade: Option<i32>,

    /// New title
    #[validate(length(min = 2, max = 140))]
    pub title: Option<String>,

    /// New suggestion text
    #[validate(length(min = 5, max = 10_000))]
    pub content: Option<String>,
}

/// Input for answering a suggestion.
#[derive(Debug, Deserialize, Validate)]
pub struct AnswerSuggestionInput {
    /// Answer text
    #[validate(length(min = 1, max = 10_000))]
    pub answer: String,
}

/// Suggestion service for student and admin workflows.
#[derive(Clone)]
pub struct SuggestionService {
    repo: SuggestionRepository,
    push: PushNotificationService,
    id_gen: IdGenerator,
}

impl SuggestionService {
    /// Create a new suggestion service.
    #[must_use]
    pub fn new(repo: SuggestionRepository, push: PushNotificationService) -> Self {
        Self {
            repo,
            push,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a pending suggestion and notify subscribed admins.
    ///
    /// The notification is best effort; its outcome never affects the
    /// response.
    pub async fn create(
        &self,
        student_key: &str,
        input: CreateSuggestionInput,
    ) -> AppResult<suggestion::Model> {
        input.validate()?;

        let now = Utc::now();
        let model = suggestion::ActiveModel {
            id: Set(self.id_gen.generate()),
            student_key: Set(student_key.to_string()),
            grade: Set(input.grade),
            title: Set(input.title.trim().to_string()),
            content: Set(input.content.trim().to_string()),
            status: Set(SuggestionStatus::Pending),
            answer: Set(None),
            answered_at: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let created = self.repo.create(model).await?;

        self.push
            .notify_admins(
                &format!("새 건의 등록: {}...", title_preview(&created.title)),
                NEW_SUGGESTION_PUSH_BODY,
            )
            .await;

        Ok(created)
    }

    /// A student's own suggestions, newest first.
    ///
    /// With `answered_after`, only suggestions answered strictly after the
    /// given instant are returned (polling cursor for new answers).
    pub async fn list_for_student(
        &self,
        student_key: &str,
        answered_after: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<suggestion::Model>> {
        self.repo
            .find_by_student(student_key, answered_after.map(Into::into))
            .await
    }

    /// Edit a student's own suggestion while it is still pending.
    pub async fn update_for_student(
        &self,
        student_key: &str,
        id: &str,
        input: UpdateSuggestionInput,
    ) -> AppResult<suggestion::Model> {
        input.validate()?;

        let existing = self
            .repo
            .find_by_id_for_student(id, student_key)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Suggestion {id} not found")))?;

        if existing.status != SuggestionStatus::Pending {
            return Err(AppError::Conflict(
                "Answered suggestions cannot be edited".to_string(),
            ));
        }

        let mut active: suggestion::ActiveModel = existing.into();
        if let Some(grade) = input.grade {
            active.grade = Set(grade);
        }
        if let Some(title) = input.title {
            active.title = Set(title.trim().to_string());
        }
        if let Some(content) = input.content {
            active.content = Set(content.trim().to_string());
        }
        active.updated_at = Set(Utc::now().into());

        self.repo.update(active).await
    }

    /// Delete a student's own suggestion while it is still pending.
    pub async fn delete_for_student(&self, student_key: &str, id: &str) -> AppResult<()> {
        let existing = self
            .repo
            .find_by_id_for_student(id, student_key)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Suggestion {id} not found")))?;

        if existing.status != SuggestionStatus::Pending {
            return Err(AppError::Conflict(
                "Answered suggestions cannot be deleted".to_string(),
            ));
        }

        self.repo.delete(&existing.id).await
    }

    /// All suggestions matching the admin filter, newest first.
    pub async fn list_all(&self, filter: &SuggestionFilter) -> AppResult<Vec<suggestion::Model>> {
        self.repo.search(filter).await
    }

    /// Answer a suggestion and notify the owning student.
    ///
    /// Only the pending-to-answered transition triggers notifications;
    /// editing an existing answer stays silent.
    pub async fn answer(
        &self,
        id: &str,
        input: AnswerSuggestionInput,
    ) -> AppResult<suggestion::Model> {
        input.validate()?;

        let existing = self.repo.get_by_id(id).await?;
        let first_answer = existing.status != SuggestionStatus::Answered;

        let now = Utc::now();
        let mut active: suggestion::ActiveModel = existing.into();
        active.answer = Set(Some(input.answer.trim().to_string()));
        active.status = Set(SuggestionStatus::Answered);
        active.answered_at = Set(Some(now.into()));
        active.updated_at = Set(now.into());

        let updated = self.repo.update(active).await?;

        if first_answer {
            self.push
                .notify_student(&updated.student_key, ANSWER_PUSH_TITLE, &updated.title)
                .await;
        }

        Ok(updated)
    }
}

/// First 30 characters of a title, for admin notification previews.
/// Counts characters, not bytes: titles are usually Korean.
fn title_preview(title: &str) -> String {
    title.chars().take(30).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::push_notification::PushNotificationService;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;
    use suggestbox_db::repositories::PushSubscriptionRepository;

    fn test_service() -> SuggestionService {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let push = PushNotificationService::new(
            PushSubscriptionRepository::new(Arc::clone(&db)),
            None,
        );
        SuggestionService::new(SuggestionRepository::new(db), push)
    }

    #[tokio::test]
    async fn create_rejects_out_of_range_grade() {
        let service = test_service();
        let result = service
            .create(
                "student-key-0001",
                CreateSuggestionInput {
                    grade: 7,
                    title: "급식 건의".to_string(),
                    content: "급식 메뉴를 늘려주세요".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn create_rejects_short_title() {
        let service = test_service();
        let result = service
            .create(
                "student-key-0001",
                CreateSuggestionInput {
                    grade: 2,
                    title: "급".to_string(),
                    content: "급식 메뉴를 늘려주세요".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn update_validates_partial_fields() {
        let service = test_service();
        let result = service
            .update_for_student(
                "student-key-0001",
                "some-id",
                UpdateSuggestionInput {
                    grade: Some(0),
                    ..UpdateSuggestionInput::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn title_preview_counts_characters_not_bytes() {
        let korean = "학교 체육관 개방 시간을 늘려 주시면 좋겠습니다 제발 부탁드립니다";
        let preview = title_preview(korean);
        assert_eq!(preview.chars().count(), 30);
        assert!(korean.starts_with(&preview));

        assert_eq!(title_preview("short"), "short");
    }
}
