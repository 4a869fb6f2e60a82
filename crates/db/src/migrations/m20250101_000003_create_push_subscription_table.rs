//! Create push_subscription table for Web Push notifications.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PushSubscription::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PushSubscription::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PushSubscription::StudentKey)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(PushSubscription::AdminId).string().null())
                    .col(
                        ColumnDef::new(PushSubscription::Endpoint)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PushSubscription::P256dh)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PushSubscription::Auth).string().not_null())
                    .col(
                        ColumnDef::new(PushSubscription::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_push_subscription_admin")
                            .from(PushSubscription::Table, PushSubscription::AdminId)
                            .to(Admin::Table, Admin::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index on student_key for per-student fan-out
        manager
            .create_index(
                Index::create()
                    .name("idx_push_subscription_student_key")
                    .table(PushSubscription::Table)
                    .col(PushSubscription::StudentKey)
                    .to_owned(),
            )
            .await?;

        // Index on admin_id for admin fan-out
        manager
            .create_index(
                Index::create()
                    .name("idx_push_subscription_admin_id")
                    .table(PushSubscription::Table)
                    .col(PushSubscription::AdminId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PushSubscription::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum PushSubscription {
    Table,
    Id,
    StudentKey,
    AdminId,
    Endpoint,
    P256dh,
    Auth,
    CreatedAt,
}

#[derive(Iden)]
enum Admin {
    Table,
    Id,
}
