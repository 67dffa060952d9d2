//! Admin endpoints: deposit review queue, deposit resolution, broker roster.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use rust_decimal::Decimal;
use sea_orm::{EntityTrait, Order, QueryOrder};
use std::str::FromStr;
use tracing::{info, warn};

use crate::entities::{deposits, prelude::*};
use crate::handlers::auth::{caller_identity, unauthorized};
use crate::handlers::deposit::map_workflow_error;
use crate::models::auth::{ErrorResponse, Role};
use crate::models::broker::{
    AdminBrokersResponse, AdminDepositEntry, AdminDepositsResponse, BrokerSummary,
    DepositListQuery, DepositStats,
};
use crate::models::deposit::{DepositStatus, ResolveDepositRequest, ResolveDepositResponse};
use crate::services::deposit_workflow;
use crate::AppState;

pub async fn resolve_deposit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(deposit_id): Path<i32>,
    Json(payload): Json<ResolveDepositRequest>,
) -> Result<Json<ResolveDepositResponse>, (StatusCode, Json<ErrorResponse>)> {
    let caller = caller_identity(&headers)?;

    let correlation_id = uuid::Uuid::new_v4().to_string();
    info!(
        correlation_id = %correlation_id,
        caller_id = caller.id,
        role = %caller.role,
        deposit_id,
        action = %payload.action,
        "Deposit resolution request received"
    );

    let deposit = deposit_workflow::resolve_deposit(
        &state.db,
        &caller,
        deposit_id,
        &payload.action,
        payload.admin_notes,
    )
    .await
    .map_err(|e| {
        warn!(correlation_id = %correlation_id, error = %e, "Deposit resolution failed");
        map_workflow_error(e)
    })?;

    let outcome = if deposit.status == DepositStatus::Paid.as_str() {
        "verified"
    } else {
        "rejected"
    };

    Ok(Json(ResolveDepositResponse {
        message: format!("Deposit {} successfully", outcome),
        deposit: deposit.into(),
    }))
}

pub async fn list_deposits(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DepositListQuery>,
) -> Result<Json<AdminDepositsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let caller = caller_identity(&headers)?;
    if caller.role != Role::Admin {
        return Err(unauthorized());
    }

    let status_filter = match query.status.as_deref() {
        Some(s) => Some(DepositStatus::from_str(s).map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Unknown status filter: {}", s),
                }),
            )
        })?),
        None => None,
    };

    let rows = Deposits::find()
        .find_also_related(BrokerProfiles)
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

    // Dashboard counters always cover the whole table, filter or not
    let stats = DepositStats {
        pending: count_with_status(&rows, DepositStatus::Pending),
        paid: count_with_status(&rows, DepositStatus::Paid),
        failed: count_with_status(&rows, DepositStatus::Failed),
        total_amount: rows
            .iter()
            .filter(|(d, _)| d.status == DepositStatus::Paid.as_str())
            .map(|(d, _)| d.amount)
            .sum::<Decimal>(),
    };

    let deposits = rows
        .into_iter()
        .filter(|(d, _)| {
            status_filter
                .map(|s| d.status == s.as_str())
                .unwrap_or(true)
        })
        .map(|(deposit, broker)| AdminDepositEntry {
            deposit: deposit.into(),
            broker: broker.map(Into::into),
        })
        .collect();

    Ok(Json(AdminDepositsResponse { deposits, stats }))
}

pub async fn list_brokers(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AdminBrokersResponse>, (StatusCode, Json<ErrorResponse>)> {
    let caller = caller_identity(&headers)?;
    if caller.role != Role::Admin {
        return Err(unauthorized());
    }

    let mut rows = BrokerProfiles::find()
        .find_with_related(Deposits)
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

    rows.sort_by(|a, b| b.0.created_at.cmp(&a.0.created_at));

    let brokers = rows
        .into_iter()
        .map(|(profile, deposits)| {
            let latest_deposit_status = deposits
                .iter()
                .max_by_key(|d| d.created_at)
                .map(|d| d.status.clone());

            BrokerSummary {
                profile: profile.into(),
                deposit_count: deposits.len() as u64,
                latest_deposit_status,
            }
        })
        .collect();

    Ok(Json(AdminBrokersResponse { brokers }))
}

fn count_with_status(
    rows: &[(deposits::Model, Option<crate::entities::broker_profiles::Model>)],
    status: DepositStatus,
) -> u64 {
    rows.iter()
        .filter(|(d, _)| d.status == status.as_str())
        .count() as u64
}
