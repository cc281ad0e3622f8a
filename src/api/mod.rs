//! HTTP API - JSON endpoints over the ledger services
//!
//! Responses are wrapped in `ApiResponse`; failures come back as `ErrorResponse`
//! with a status code chosen from the error kind.

/// Axum handlers and error mapping
pub mod handlers;
/// Request and response bodies
pub mod schemas;

#[cfg(test)]
mod tests;

use crate::errors::Result;
use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use handlers::{
    create_expense, create_vendor, delete_expense, get_ledger, get_report, health_check,
    list_vendors, update_budget, update_contribution, verify_vendor,
};
pub use schemas::AppState;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/groups/:id/ledger", get(get_ledger))
        .route("/groups/:id/report", get(get_report))
        .route("/groups/:id/expenses", post(create_expense))
        .route("/groups/:id/expenses/:expense_id", delete(delete_expense))
        .route("/groups/:id/budget", patch(update_budget))
        .route(
            "/groups/:id/members/:member_id/contribution",
            patch(update_contribution),
        )
        .route("/groups/:id/vendors", post(create_vendor))
        .route("/vendors", get(list_vendors))
        .route("/vendors/:vendor_id/verify", patch(verify_vendor))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the API on `addr` until the process stops.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("API listening on http://{addr}");
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
