//! Request and response bodies of the HTTP API.

use crate::core::{contribution::ContributionProgress, report::MemberLine, vendor::NewVendor};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

impl<T> ApiResponse<T> {
    /// Wraps `data` as a successful response.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Body of `POST /groups/:id/expenses`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    /// Category label, e.g. `"Prasad"`
    pub category: String,
    /// What the money was spent on
    pub description: String,
    /// Amount spent
    pub amount: f64,
    /// Id of the responsible member
    pub assigned_to: i64,
    /// Date incurred
    pub date: NaiveDate,
    /// Optional receipt reference
    #[serde(default)]
    pub receipt: Option<String>,
}

/// Body of `PATCH /groups/:id/budget`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBudgetRequest {
    /// New total budget
    pub total_budget: f64,
}

/// Body of `PATCH /groups/:id/members/:member_id/contribution`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateContributionRequest {
    /// New absolute contributed amount
    pub contributed_amount: f64,
}

/// Result of a contribution update: the member and the group's progress after it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionResponse {
    /// Updated member line
    pub member: MemberLine,
    /// Group progress after the update
    pub progress: ContributionProgress,
}

/// Query string of `GET /vendors`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorQuery {
    /// Only this category (key or label)
    pub category: Option<String>,
    /// `rating` (default), `price_low`, `price_high`, `reviews` or `newest`
    pub sort: Option<String>,
}

/// Body of `POST /groups/:id/vendors`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVendorRequest {
    /// Id of the management member listing the vendor
    pub added_by: i64,
    /// The listing
    #[serde(flatten)]
    pub listing: NewVendor,
}
