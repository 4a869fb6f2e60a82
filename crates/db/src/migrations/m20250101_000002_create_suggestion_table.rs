//! Create suggestion table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Suggestion::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Suggestion::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Suggestion::StudentKey)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Suggestion::Grade).integer().not_null())
                    .col(ColumnDef::new(Suggestion::Title).string().not_null())
                    .col(ColumnDef::new(Suggestion::Content).text().not_null())
                    .col(
                        ColumnDef::new(Suggestion::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Suggestion::Answer).text().null())
                    .col(
                        ColumnDef::new(Suggestion::AnsweredAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Suggestion::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Suggestion::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Index on student_key for "my suggestions" lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_suggestion_student_key")
                    .table(Suggestion::Table)
                    .col(Suggestion::StudentKey)
                    .to_owned(),
            )
            .await?;

        // Index on grade for admin filtering
        manager
            .create_index(
                Index::create()
                    .name("idx_suggestion_grade")
                    .table(Suggestion::Table)
                    .col(Suggestion::Grade)
                    .to_owned(),
            )
            .await?;

        // Index on status for admin filtering
        manager
            .create_index(
                Index::create()
                    .name("idx_suggestion_status")
                    .table(Suggestion::Table)
                    .col(Suggestion::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Suggestion::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Suggestion {
    Table,
    Id,
    StudentKey,
    Grade,
    Title,
    Content,
    Status,
    Answer,
    AnsweredAt,
    CreatedAt,
    UpdatedAt,
}
