//! Caller identity extraction from the trusted gateway headers.
//!
//! The upstream identity context authenticates the user and forwards
//! `x-user-id` and `x-user-role`; this crate performs no verification of its
//! own beyond parsing them.

use axum::{
    http::{HeaderMap, StatusCode},
    Json,
};
use std::str::FromStr;
use tracing::warn;

use crate::models::auth::{CallerIdentity, ErrorResponse, Role};

pub fn caller_identity(
    headers: &HeaderMap,
) -> Result<CallerIdentity, (StatusCode, Json<ErrorResponse>)> {
    let id = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i32>().ok());

    let role = headers
        .get("x-user-role")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Role::from_str(v).ok());

    match (id, role) {
        (Some(id), Some(role)) => Ok(CallerIdentity { id, role }),
        _ => {
            warn!("Request carried no usable caller identity");
            Err(unauthorized())
        }
    }
}

pub fn unauthorized() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: "Unauthorized".to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(id: &'static str, role: &'static str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert("x-user-id", HeaderValue::from_static(id));
        map.insert("x-user-role", HeaderValue::from_static(role));
        map
    }

    #[test]
    fn test_valid_identity() {
        let caller = caller_identity(&headers("42", "BROKER")).unwrap();
        assert_eq!(caller.id, 42);
        assert_eq!(caller.role, Role::Broker);
    }

    #[test]
    fn test_missing_headers() {
        let result = caller_identity(&HeaderMap::new());
        let (status, _) = result.unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_non_numeric_id() {
        let result = caller_identity(&headers("not-a-number", "ADMIN"));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_role() {
        let result = caller_identity(&headers("7", "SUPERUSER"));
        assert!(result.is_err());
    }
}
