//! SeaORM Entity for broker profiles
//!
//! Pre-exists for every broker (created at registration). This workflow only
//! touches deposit_status and active, and only on a verified deposit.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "broker_profiles")]
pub struct Model {
    /// Broker user id, one-to-one with the identity context
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i32,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    /// Best-known deposit outcome, mirrors the verified deposit's status
    pub deposit_status: String,
    /// Gates public visibility of the broker's listings
    pub active: bool,
    /// Independent admin-approval flag, never written by the deposit workflow
    pub approved_by_admin: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::deposits::Entity")]
    Deposits,
}

impl Related<super::deposits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deposits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
