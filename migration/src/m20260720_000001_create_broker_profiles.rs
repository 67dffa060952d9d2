use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BrokerProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BrokerProfiles::UserId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BrokerProfiles::CompanyName)
                            .string(),
                    )
                    .col(
                        ColumnDef::new(BrokerProfiles::Phone)
                            .string(),
                    )
                    .col(
                        ColumnDef::new(BrokerProfiles::DepositStatus)
                            .string()
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(BrokerProfiles::Active)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(BrokerProfiles::ApprovedByAdmin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(BrokerProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BrokerProfiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BrokerProfiles {
    Table,
    UserId,
    CompanyName,
    Phone,
    DepositStatus,
    Active,
    ApprovedByAdmin,
    CreatedAt,
}
