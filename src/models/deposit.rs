//! Deposit status/action enums and the request/response types for the
//! deposit endpoints.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::entities::deposits;

/// Deposit lifecycle: PENDING until an admin resolves it.
/// PAID and FAILED are terminal; no transition leads out of either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DepositStatus {
    Pending,
    Paid,
    Failed,
}

impl DepositStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepositStatus::Pending => "PENDING",
            DepositStatus::Paid => "PAID",
            DepositStatus::Failed => "FAILED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DepositStatus::Paid | DepositStatus::Failed)
    }
}

impl std::fmt::Display for DepositStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DepositStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(DepositStatus::Pending),
            "PAID" => Ok(DepositStatus::Paid),
            "FAILED" => Ok(DepositStatus::Failed),
            _ => Err(format!("Unknown deposit status: {}", s)),
        }
    }
}

/// Admin resolution actions; anything else is rejected before touching the row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveAction {
    Verify,
    Reject,
}

impl ResolveAction {
    /// Status a deposit ends up in after this action
    pub fn target_status(&self) -> DepositStatus {
        match self {
            ResolveAction::Verify => DepositStatus::Paid,
            ResolveAction::Reject => DepositStatus::Failed,
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            ResolveAction::Verify => "verified",
            ResolveAction::Reject => "rejected",
        }
    }
}

impl std::str::FromStr for ResolveAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verify" => Ok(ResolveAction::Verify),
            "reject" => Ok(ResolveAction::Reject),
            _ => Err(format!("Unknown action: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitDepositRequest {
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitDepositResponse {
    pub message: String,
    pub deposit_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveDepositRequest {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositResponse {
    pub id: i32,
    pub broker_id: i32,
    pub amount: Decimal,
    pub currency: String,
    pub payment_method: String,
    pub status: String,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub transaction_id: Option<String>,
    pub bank_reference: Option<String>,
    pub receipt_url: Option<String>,
    pub admin_notes: Option<String>,
    pub verified_at: Option<DateTimeWithTimeZone>,
    pub verified_by: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
}

impl From<deposits::Model> for DepositResponse {
    fn from(model: deposits::Model) -> Self {
        DepositResponse {
            id: model.id,
            broker_id: model.broker_id,
            amount: model.amount,
            currency: model.currency,
            payment_method: model.payment_method,
            status: model.status,
            bank_name: model.bank_name,
            account_number: model.account_number,
            transaction_id: model.transaction_id,
            bank_reference: model.bank_reference,
            receipt_url: model.receipt_url,
            admin_notes: model.admin_notes,
            verified_at: model.verified_at,
            verified_by: model.verified_by,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveDepositResponse {
    pub message: String,
    pub deposit: DepositResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerDepositsResponse {
    pub deposits: Vec<DepositResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_round_trip() {
        for status in [
            DepositStatus::Pending,
            DepositStatus::Paid,
            DepositStatus::Failed,
        ] {
            assert_eq!(DepositStatus::from_str(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_status_terminality() {
        assert!(!DepositStatus::Pending.is_terminal());
        assert!(DepositStatus::Paid.is_terminal());
        assert!(DepositStatus::Failed.is_terminal());
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!(ResolveAction::from_str("verify").unwrap(), ResolveAction::Verify);
        assert_eq!(ResolveAction::from_str("reject").unwrap(), ResolveAction::Reject);
    }

    #[test]
    fn test_action_parsing_rejects_unknown() {
        assert!(ResolveAction::from_str("cancel").is_err());
        // Case-sensitive on purpose: the wire format is lowercase
        assert!(ResolveAction::from_str("Verify").is_err());
        assert!(ResolveAction::from_str("").is_err());
    }

    #[test]
    fn test_action_target_status() {
        assert_eq!(ResolveAction::Verify.target_status(), DepositStatus::Paid);
        assert_eq!(ResolveAction::Reject.target_status(), DepositStatus::Failed);
    }
}
