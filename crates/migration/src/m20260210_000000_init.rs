//! Initial schema migration - creates all tables from scratch.
//!
//! The complete schema for Divvy:
//!
//! - `users`: authentication + display name
//! - `lists`: shared-expense groups with a join code and running total
//! - `list_members`: multi-user list access
//! - `payments`: expense events against a list
//! - `paid_by_entries`: per-member cost shares of a payment

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Username,
    Nickname,
    Password,
}

#[derive(Iden)]
enum Lists {
    Table,
    Id,
    Name,
    Creator,
    ShareCode,
    TotalAmountMinor,
}

#[derive(Iden)]
enum ListMembers {
    Table,
    ListId,
    UserId,
}

#[derive(Iden)]
enum Payments {
    Table,
    Id,
    ListId,
    AmountMinor,
    PaymentFor,
    Category,
    IsEquallyPaid,
    CreatedAt,
}

#[derive(Iden)]
enum PaidByEntries {
    Table,
    Id,
    PaymentId,
    Member,
    AmountMinor,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Nickname).string().not_null())
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Lists
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Lists::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Lists::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Lists::Name).string().not_null())
                    .col(ColumnDef::new(Lists::Creator).string().not_null())
                    .col(ColumnDef::new(Lists::ShareCode).string().not_null())
                    .col(
                        ColumnDef::new(Lists::TotalAmountMinor)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-lists-creator")
                            .from(Lists::Table, Lists::Creator)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-lists-share_code-unique")
                    .table(Lists::Table)
                    .col(Lists::ShareCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-lists-creator")
                    .table(Lists::Table)
                    .col(Lists::Creator)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. List Members
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(ListMembers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ListMembers::ListId).string().not_null())
                    .col(ColumnDef::new(ListMembers::UserId).string().not_null())
                    .primary_key(
                        Index::create()
                            .col(ListMembers::ListId)
                            .col(ListMembers::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-list_members-list_id")
                            .from(ListMembers::Table, ListMembers::ListId)
                            .to(Lists::Table, Lists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-list_members-user_id")
                            .from(ListMembers::Table, ListMembers::UserId)
                            .to(Users::Table, Users::Username)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-list_members-user_id")
                    .table(ListMembers::Table)
                    .col(ListMembers::UserId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Payments
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payments::ListId).string().not_null())
                    .col(
                        ColumnDef::new(Payments::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Payments::PaymentFor).string().not_null())
                    .col(ColumnDef::new(Payments::Category).string().not_null())
                    .col(
                        ColumnDef::new(Payments::IsEquallyPaid)
                            .boolean()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Payments::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-payments-list_id")
                            .from(Payments::Table, Payments::ListId)
                            .to(Lists::Table, Lists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-payments-list_id-created_at")
                    .table(Payments::Table)
                    .col(Payments::ListId)
                    .col(Payments::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Paid-by entries
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(PaidByEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaidByEntries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PaidByEntries::PaymentId).string().not_null())
                    .col(ColumnDef::new(PaidByEntries::Member).string().not_null())
                    .col(
                        ColumnDef::new(PaidByEntries::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-paid_by_entries-payment_id")
                            .from(PaidByEntries::Table, PaidByEntries::PaymentId)
                            .to(Payments::Table, Payments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-paid_by_entries-member")
                            .from(PaidByEntries::Table, PaidByEntries::Member)
                            .to(Users::Table, Users::Username)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-paid_by_entries-payment_id")
                    .table(PaidByEntries::Table)
                    .col(PaidByEntries::PaymentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-paid_by_entries-member")
                    .table(PaidByEntries::Table)
                    .col(PaidByEntries::Member)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(PaidByEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ListMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Lists::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
