//! Broker-facing deposit endpoints
//!
//! POST /api/broker/deposit submits an activation-fee claim; GET returns the
//! caller's own submissions, newest first.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use sea_orm::{ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder};
use tracing::{info, warn};

use crate::entities::{deposits, prelude::*};
use crate::handlers::auth::{caller_identity, unauthorized};
use crate::models::auth::{ErrorResponse, Role};
use crate::models::deposit::{
    BrokerDepositsResponse, SubmitDepositRequest, SubmitDepositResponse,
};
use crate::services::deposit_workflow::{self, DepositWorkflowError};
use crate::AppState;

pub async fn submit_deposit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SubmitDepositRequest>,
) -> Result<Json<SubmitDepositResponse>, (StatusCode, Json<ErrorResponse>)> {
    let caller = caller_identity(&headers)?;

    let correlation_id = uuid::Uuid::new_v4().to_string();
    info!(
        correlation_id = %correlation_id,
        caller_id = caller.id,
        role = %caller.role,
        amount = %payload.amount,
        "Deposit submission request received"
    );

    let deposit = deposit_workflow::submit_deposit(&state.db, &caller, payload)
        .await
        .map_err(|e| {
            warn!(correlation_id = %correlation_id, error = %e, "Deposit submission failed");
            map_workflow_error(e)
        })?;

    Ok(Json(SubmitDepositResponse {
        message: "Deposit submitted successfully".to_string(),
        deposit_id: deposit.id,
    }))
}

pub async fn get_broker_deposits(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<BrokerDepositsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let caller = caller_identity(&headers)?;

    // Broker routes also admit admins, matching the gateway's routing rule
    if caller.role != Role::Broker && caller.role != Role::Admin {
        return Err(unauthorized());
    }

    let rows = Deposits::find()
        .filter(deposits::Column::BrokerId.eq(caller.id))
        .order_by(deposits::Column::CreatedAt, Order::Desc)
        .all(&state.db)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Database error: {}", e),
                }),
            )
        })?;

    Ok(Json(BrokerDepositsResponse {
        deposits: rows.into_iter().map(Into::into).collect(),
    }))
}

/// Map workflow failures to HTTP responses; the message names the failure
/// category without leaking internals.
pub fn map_workflow_error(err: DepositWorkflowError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        DepositWorkflowError::Unauthorized(_) => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Unauthorized".to_string(),
            }),
        ),
        DepositWorkflowError::DuplicateSubmission => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "You already have a pending or completed deposit".to_string(),
            }),
        ),
        DepositWorkflowError::InvalidAmount(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Invalid amount: {}", msg),
            }),
        ),
        DepositWorkflowError::InvalidAction(action) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Invalid action: {}", action),
            }),
        ),
        DepositWorkflowError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Deposit {} not found", id),
            }),
        ),
        DepositWorkflowError::AlreadyResolved { id, status } => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: format!("Deposit {} was already resolved to {}", id, status),
            }),
        ),
        DepositWorkflowError::ProfileMissing(_) | DepositWorkflowError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to process deposit".to_string(),
            }),
        ),
    }
}
