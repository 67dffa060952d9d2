// src/lib.rs

use axum::{
    routing::{get, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

pub mod entities {
    pub mod prelude;
    pub mod broker_profiles;
    pub mod deposits;
}

pub mod models {
    pub mod auth;
    pub mod broker;
    pub mod deposit;
}

pub mod handlers {
    pub mod admin;
    pub mod auth;
    pub mod deposit;
}

pub mod services {
    pub mod deposit_workflow;
}

/// Build the application router; shared by the binary and the test suites.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello_brokerage))
        .route(
            "/api/broker/deposit",
            get(handlers::deposit::get_broker_deposits).post(handlers::deposit::submit_deposit),
        )
        .route("/api/admin/deposits", get(handlers::admin::list_deposits))
        .route(
            "/api/admin/deposits/{id}",
            put(handlers::admin::resolve_deposit),
        )
        .route("/api/admin/brokers", get(handlers::admin::list_brokers))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn hello_brokerage() -> &'static str {
    "Hello from Brokerage Backend! 🏠"
}
