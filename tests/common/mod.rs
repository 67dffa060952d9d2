use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    Set,
};
use sea_orm_migration::MigratorTrait;
use std::env;
use tokio::sync::OnceCell;

use brokerage_backend::entities::{broker_profiles, deposits, prelude::*};

static MIGRATIONS: OnceCell<()> = OnceCell::const_new();

/// Set up the integration-test database connection and bring the schema up.
/// Uses TEST_DATABASE_URL environment variable or falls back to default.
/// Callers skip their test when this fails, so the suite stays runnable on
/// machines without Postgres. Migrations run once per test binary; parallel
/// tests share the result instead of racing the schema manager.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let database_url = env::var("TEST_DATABASE_URL").unwrap_or_else(|_| {
        "postgresql://brokerage_user@localhost:5432/brokerage_test".to_string()
    });

    let db = Database::connect(&database_url).await?;
    MIGRATIONS
        .get_or_try_init(|| async {
            migration::Migrator::up(&db, None).await?;
            Ok::<(), DbErr>(())
        })
        .await?;
    Ok(db)
}

/// Insert an inactive, unverified profile for the given broker id.
#[allow(dead_code)]
pub async fn insert_broker_profile(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<broker_profiles::Model, DbErr> {
    broker_profiles::ActiveModel {
        user_id: Set(user_id),
        company_name: Set(Some("Test Realty".to_string())),
        phone: Set(None),
        deposit_status: Set("PENDING".to_string()),
        active: Set(false),
        approved_by_admin: Set(false),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await
}

/// Remove the broker's deposits and profile. Run before and after each test
/// so an aborted run cannot poison the next one.
#[allow(dead_code)]
pub async fn cleanup_broker(db: &DatabaseConnection, user_id: i32) -> Result<(), DbErr> {
    Deposits::delete_many()
        .filter(deposits::Column::BrokerId.eq(user_id))
        .exec(db)
        .await?;
    BrokerProfiles::delete_many()
        .filter(broker_profiles::Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(())
}
