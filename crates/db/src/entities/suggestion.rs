//! Suggestion entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a suggestion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    /// Waiting for an admin answer
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Answered by an admin
    #[sea_orm(string_value = "answered")]
    Answered,
}

impl SuggestionStatus {
    /// Parse a status query value. Unknown values yield `None` and are
    /// ignored by callers rather than rejected.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "answered" => Some(Self::Answered),
            _ => None,
        }
    }
}

/// Student suggestion entity.
///
/// `student_key` is a random identifier generated by the client and stored
/// in the browser, standing in for a full student login system.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "suggestion")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Client-generated anonymous owner key
    #[sea_orm(indexed)]
    pub student_key: String,

    /// School grade (1-3)
    #[sea_orm(indexed)]
    pub grade: i32,

    /// Short title
    pub title: String,

    /// Full suggestion text
    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// Lifecycle status
    #[sea_orm(indexed)]
    pub status: SuggestionStatus,

    /// Admin answer, present once answered
    #[sea_orm(column_type = "Text", nullable)]
    pub answer: Option<String>,

    /// Timestamp of the first answer
    #[sea_orm(nullable)]
    pub answered_at: Option<DateTimeWithTimeZone>,

    /// Timestamp when the suggestion was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the suggestion was last updated
    pub updated_at: DateTimeWithTimeZone,
}

/// Relations for suggestion.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_ignores_unknown_values() {
        assert_eq!(SuggestionStatus::parse("pending"), Some(SuggestionStatus::Pending));
        assert_eq!(SuggestionStatus::parse("answered"), Some(SuggestionStatus::Answered));
        assert_eq!(SuggestionStatus::parse("deleted"), None);
        assert_eq!(SuggestionStatus::parse(""), None);
    }
}
