//! SeaORM Entity for broker activation deposits
//!
//! One row per bank-transfer submission attempt. The partial unique index on
//! (broker_id) over PENDING/PAID rows keeps at most one outstanding deposit
//! per broker.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deposits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Owning broker (broker_profiles.user_id)
    pub broker_id: i32,
    /// Claimed transfer amount; display-only beyond the submission checks
    pub amount: Decimal,
    pub currency: String,
    /// Always "BANK_TRANSFER" for this workflow
    pub payment_method: String,
    /// PENDING until an admin resolves it to PAID or FAILED
    pub status: String,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub transaction_id: Option<String>,
    pub bank_reference: Option<String>,
    pub receipt_url: Option<String>,
    /// Free text set by the resolving admin
    pub admin_notes: Option<String>,
    pub verified_at: Option<DateTimeWithTimeZone>,
    /// Admin user id that resolved the deposit
    pub verified_by: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::broker_profiles::Entity",
        from = "Column::BrokerId",
        to = "super::broker_profiles::Column::UserId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    BrokerProfiles,
}

impl Related<super::broker_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BrokerProfiles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
