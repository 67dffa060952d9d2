//! Broker-activation deposit workflow
//!
//! A broker submits one bank-transfer claim; an admin later verifies or
//! rejects it. Verification flips the broker profile to active/PAID in the
//! same transaction as the deposit update. Both operations take the caller
//! identity as an explicit argument and trust it as issued upstream.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QuerySelect, Set, SqlErr, TransactionTrait,
};
use std::str::FromStr;
use tracing::{info, warn};

use crate::entities::{broker_profiles, deposits, prelude::*};
use crate::models::auth::{CallerIdentity, Role};
use crate::models::deposit::{DepositStatus, ResolveAction, SubmitDepositRequest};

/// The only payment method this workflow records
pub const PAYMENT_METHOD_BANK_TRANSFER: &str = "BANK_TRANSFER";

/// Applied when a claim omits its currency
pub const DEFAULT_CURRENCY: &str = "ETB";

/// Optional fixed activation fee; when set, submitted amounts must match it
const ACTIVATION_FEE_ENV: &str = "ACTIVATION_FEE";

#[derive(Debug)]
pub enum DepositWorkflowError {
    Unauthorized(String),
    DuplicateSubmission,
    InvalidAmount(String),
    InvalidAction(String),
    NotFound(i32),
    AlreadyResolved { id: i32, status: String },
    /// A deposit points at a broker without a profile row; nothing commits
    ProfileMissing(i32),
    Database(DbErr),
}

impl std::fmt::Display for DepositWorkflowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepositWorkflowError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            DepositWorkflowError::DuplicateSubmission => {
                write!(f, "You already have a pending or completed deposit")
            }
            DepositWorkflowError::InvalidAmount(msg) => write!(f, "Invalid amount: {}", msg),
            DepositWorkflowError::InvalidAction(action) => {
                write!(f, "Invalid action: {}", action)
            }
            DepositWorkflowError::NotFound(id) => write!(f, "Deposit {} not found", id),
            DepositWorkflowError::AlreadyResolved { id, status } => {
                write!(f, "Deposit {} was already resolved to {}", id, status)
            }
            DepositWorkflowError::ProfileMissing(broker_id) => {
                write!(f, "No broker profile exists for broker {}", broker_id)
            }
            DepositWorkflowError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for DepositWorkflowError {}

impl From<DbErr> for DepositWorkflowError {
    fn from(e: DbErr) -> Self {
        DepositWorkflowError::Database(e)
    }
}

/// Submit a new activation deposit claim for the calling broker.
///
/// A broker may hold at most one PENDING or PAID deposit. The check runs
/// inside the insert transaction and the partial unique index on the
/// deposits table backstops it, so two racing submissions cannot both land.
pub async fn submit_deposit(
    db: &DatabaseConnection,
    caller: &CallerIdentity,
    claim: SubmitDepositRequest,
) -> Result<deposits::Model, DepositWorkflowError> {
    if caller.role != Role::Broker {
        return Err(DepositWorkflowError::Unauthorized(
            "only brokers can submit activation deposits".to_string(),
        ));
    }

    let expected_fee = std::env::var(ACTIVATION_FEE_ENV)
        .ok()
        .and_then(|v| Decimal::from_str(&v).ok());
    validate_claim(&claim, expected_fee)?;

    let txn = db.begin().await?;

    let outstanding = Deposits::find()
        .filter(deposits::Column::BrokerId.eq(caller.id))
        .filter(deposits::Column::Status.is_in([
            DepositStatus::Pending.as_str(),
            DepositStatus::Paid.as_str(),
        ]))
        .one(&txn)
        .await?;

    if let Some(existing) = outstanding {
        warn!(
            broker_id = caller.id,
            existing_deposit_id = existing.id,
            existing_status = %existing.status,
            "Rejected duplicate deposit submission"
        );
        return Err(DepositWorkflowError::DuplicateSubmission);
    }

    let deposit = deposits::ActiveModel {
        broker_id: Set(caller.id),
        amount: Set(claim.amount),
        currency: Set(claim
            .currency
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())),
        payment_method: Set(PAYMENT_METHOD_BANK_TRANSFER.to_string()),
        status: Set(DepositStatus::Pending.to_string()),
        bank_name: Set(claim.bank_name),
        account_number: Set(claim.account_number),
        transaction_id: Set(claim.transaction_id),
        bank_reference: Set(claim.bank_reference),
        receipt_url: Set(claim.receipt_url),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| match e.sql_err() {
        // The unique index fired: another submission won the race
        Some(SqlErr::UniqueConstraintViolation(_)) => DepositWorkflowError::DuplicateSubmission,
        _ => DepositWorkflowError::Database(e),
    })?;

    txn.commit().await?;

    info!(
        broker_id = caller.id,
        deposit_id = deposit.id,
        amount = %deposit.amount,
        currency = %deposit.currency,
        "Deposit submitted"
    );

    Ok(deposit)
}

/// Resolve a pending deposit to PAID (verify) or FAILED (reject).
///
/// The deposit row is locked for the duration of the transaction, so
/// concurrent resolutions of the same id serialize and the loser sees a
/// terminal status. On verify, the broker profile update commits together
/// with the deposit update or not at all.
pub async fn resolve_deposit(
    db: &DatabaseConnection,
    caller: &CallerIdentity,
    deposit_id: i32,
    action: &str,
    admin_notes: Option<String>,
) -> Result<deposits::Model, DepositWorkflowError> {
    if caller.role != Role::Admin {
        return Err(DepositWorkflowError::Unauthorized(
            "only admins can resolve deposits".to_string(),
        ));
    }

    let action = ResolveAction::from_str(action)
        .map_err(|_| DepositWorkflowError::InvalidAction(action.to_string()))?;

    let txn = db.begin().await?;

    let deposit = Deposits::find_by_id(deposit_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or(DepositWorkflowError::NotFound(deposit_id))?;

    let current = DepositStatus::from_str(&deposit.status).map_err(|_| {
        DepositWorkflowError::Database(DbErr::Custom(format!(
            "deposit {} carries unknown status {}",
            deposit.id, deposit.status
        )))
    })?;

    if current.is_terminal() {
        return Err(DepositWorkflowError::AlreadyResolved {
            id: deposit.id,
            status: deposit.status.clone(),
        });
    }

    let broker_id = deposit.broker_id;

    let mut deposit = deposit.into_active_model();
    deposit.status = Set(action.target_status().to_string());
    deposit.admin_notes = Set(admin_notes);
    deposit.verified_at = Set(Some(Utc::now().into()));
    deposit.verified_by = Set(Some(caller.id));
    let updated = deposit.update(&txn).await?;

    if action == ResolveAction::Verify {
        let profile = BrokerProfiles::find_by_id(broker_id)
            .one(&txn)
            .await?
            .ok_or(DepositWorkflowError::ProfileMissing(broker_id))?;

        let mut profile = profile.into_active_model();
        profile.deposit_status = Set(DepositStatus::Paid.to_string());
        profile.active = Set(true);
        profile.update(&txn).await?;
    }

    txn.commit().await?;

    info!(
        deposit_id = updated.id,
        broker_id,
        admin_id = caller.id,
        status = %updated.status,
        "Deposit {}",
        action.past_tense()
    );

    Ok(updated)
}

fn validate_claim(
    claim: &SubmitDepositRequest,
    expected_fee: Option<Decimal>,
) -> Result<(), DepositWorkflowError> {
    if claim.amount <= Decimal::ZERO {
        return Err(DepositWorkflowError::InvalidAmount(
            "deposit amount must be greater than zero".to_string(),
        ));
    }

    if let Some(fee) = expected_fee {
        if claim.amount != fee {
            return Err(DepositWorkflowError::InvalidAmount(format!(
                "deposit amount must equal the activation fee of {}",
                fee
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn claim(amount: Decimal) -> SubmitDepositRequest {
        SubmitDepositRequest {
            amount,
            currency: None,
            bank_name: None,
            account_number: None,
            transaction_id: None,
            bank_reference: None,
            receipt_url: None,
        }
    }

    #[test]
    fn test_validate_claim_positive_amount() {
        assert!(validate_claim(&claim(dec!(500)), None).is_ok());
    }

    #[test]
    fn test_validate_claim_zero_amount() {
        let result = validate_claim(&claim(dec!(0)), None);
        assert!(matches!(
            result,
            Err(DepositWorkflowError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_validate_claim_negative_amount() {
        let result = validate_claim(&claim(dec!(-10)), None);
        assert!(matches!(
            result,
            Err(DepositWorkflowError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_validate_claim_matching_fee() {
        assert!(validate_claim(&claim(dec!(500)), Some(dec!(500))).is_ok());
    }

    #[test]
    fn test_validate_claim_mismatched_fee() {
        let result = validate_claim(&claim(dec!(499)), Some(dec!(500)));
        assert!(matches!(
            result,
            Err(DepositWorkflowError::InvalidAmount(_))
        ));
    }
}
