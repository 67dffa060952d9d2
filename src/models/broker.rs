//! Admin-facing broker and deposit listing types.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::entities::broker_profiles;
use crate::models::deposit::DepositResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerProfileResponse {
    pub user_id: i32,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub deposit_status: String,
    pub active: bool,
    pub approved_by_admin: bool,
    pub created_at: DateTimeWithTimeZone,
}

impl From<broker_profiles::Model> for BrokerProfileResponse {
    fn from(model: broker_profiles::Model) -> Self {
        BrokerProfileResponse {
            user_id: model.user_id,
            company_name: model.company_name,
            phone: model.phone,
            deposit_status: model.deposit_status,
            active: model.active,
            approved_by_admin: model.approved_by_admin,
            created_at: model.created_at,
        }
    }
}

/// One row of the admin deposits review queue
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDepositEntry {
    #[serde(flatten)]
    pub deposit: DepositResponse,
    pub broker: Option<BrokerProfileResponse>,
}

/// Dashboard counters over the full deposit table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositStats {
    pub pending: u64,
    pub paid: u64,
    pub failed: u64,
    /// Sum of verified (PAID) amounts
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDepositsResponse {
    pub deposits: Vec<AdminDepositEntry>,
    pub stats: DepositStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerSummary {
    #[serde(flatten)]
    pub profile: BrokerProfileResponse,
    pub deposit_count: u64,
    pub latest_deposit_status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminBrokersResponse {
    pub brokers: Vec<BrokerSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DepositListQuery {
    /// Optional status filter: PENDING, PAID or FAILED
    pub status: Option<String>,
}
