use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Deposits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Deposits::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Deposits::BrokerId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Deposits::Amount)
                            .decimal()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Deposits::Currency)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Deposits::PaymentMethod)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Deposits::Status)
                            .string()
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(Deposits::BankName)
                            .string(),
                    )
                    .col(
                        ColumnDef::new(Deposits::AccountNumber)
                            .string(),
                    )
                    .col(
                        ColumnDef::new(Deposits::TransactionId)
                            .string(),
                    )
                    .col(
                        ColumnDef::new(Deposits::BankReference)
                            .string(),
                    )
                    .col(
                        ColumnDef::new(Deposits::ReceiptUrl)
                            .string(),
                    )
                    .col(
                        ColumnDef::new(Deposits::AdminNotes)
                            .string(),
                    )
                    .col(
                        ColumnDef::new(Deposits::VerifiedAt)
                            .timestamp_with_time_zone(),
                    )
                    .col(
                        ColumnDef::new(Deposits::VerifiedBy)
                            .integer(),
                    )
                    .col(
                        ColumnDef::new(Deposits::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .to_owned(),
            )
            .await?;

        // Foreign key to broker_profiles
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_deposits_broker_id")
                    .from(Deposits::Table, Deposits::BrokerId)
                    .to(BrokerProfiles::Table, BrokerProfiles::UserId)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_deposits_broker_id")
                    .table(Deposits::Table)
                    .col(Deposits::BrokerId)
                    .to_owned(),
            )
            .await?;

        // Partial unique index: a broker may hold at most one PENDING or PAID
        // deposit at a time. sea-query's index builder cannot express the
        // WHERE clause, so this goes through raw SQL.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_deposits_one_outstanding \
                 ON deposits (broker_id) WHERE status IN ('PENDING', 'PAID')",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Deposits::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Deposits {
    Table,
    Id,
    BrokerId,
    Amount,
    Currency,
    PaymentMethod,
    Status,
    BankName,
    AccountNumber,
    TransactionId,
    BankReference,
    ReceiptUrl,
    AdminNotes,
    VerifiedAt,
    VerifiedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BrokerProfiles {
    Table,
    UserId,
}
