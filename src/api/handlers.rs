//! Axum handlers.
//!
//! Handlers only translate between HTTP and the `core` services. Every error
//! goes through `ApiError`, which picks the status code from the error kind.

use crate::{
    api::schemas::{
        ApiResponse, AppState, ContributionResponse, CreateExpenseRequest, CreateVendorRequest,
        ErrorResponse, HealthResponse, UpdateBudgetRequest, UpdateContributionRequest,
        VendorQuery,
    },
    core::{
        expense, group,
        ledger::{LedgerSnapshot, NewExpense},
        member,
        report::{self, GroupReport, MemberLine},
        vendor::{self, VendorCategory, VendorSort},
    },
    entities::{expense as expense_entity, vendor as vendor_entity},
    errors::Error,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{debug, error, instrument, warn};

/// An `Error` on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            err if err.is_validation() => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            err if err.is_not_found() => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Error::MemberHasExpenses { .. } => (StatusCode::CONFLICT, "CONFLICT"),
            Error::NotPermitted { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {}", self.0);
            "Internal server error".to_string()
        } else {
            warn!("Request rejected: {}", self.0);
            self.0.to_string()
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            success: false,
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

/// Health check endpoint
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.db.ping().await {
        Ok(()) => "connected",
        Err(_) => "disconnected",
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    })
}

/// `GET /groups/:id/ledger`
#[instrument(skip(state))]
pub async fn get_ledger(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
) -> ApiResult<LedgerSnapshot> {
    let ledger = report::load_ledger(&state.db, group_id).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(ledger.snapshot(), "Ledger retrieved successfully")),
    ))
}

/// `GET /groups/:id/report`
#[instrument(skip(state))]
pub async fn get_report(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
) -> ApiResult<GroupReport> {
    let today = chrono::Local::now().date_naive();
    let group_report = report::generate_group_report(&state.db, group_id, today).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(group_report, "Report generated successfully")),
    ))
}

/// `POST /groups/:id/expenses`
#[instrument(skip(state))]
pub async fn create_expense(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
    Json(request): Json<CreateExpenseRequest>,
) -> ApiResult<expense_entity::Model> {
    debug!("Creating expense '{}' for group {group_id}", request.description);

    let new_expense = NewExpense {
        category: request.category,
        description: request.description,
        amount: request.amount,
        member_id: request.assigned_to,
        date: request.date,
        receipt: request.receipt,
    };
    let created = expense::record_expense(&state.db, group_id, new_expense).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(created, "Expense recorded successfully")),
    ))
}

/// `DELETE /groups/:id/expenses/:expense_id`
#[instrument(skip(state))]
pub async fn delete_expense(
    State(state): State<AppState>,
    Path((group_id, expense_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    expense::delete_expense(&state.db, group_id, expense_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PATCH /groups/:id/budget`
#[instrument(skip(state))]
pub async fn update_budget(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
    Json(request): Json<UpdateBudgetRequest>,
) -> ApiResult<LedgerSnapshot> {
    group::update_total_budget(&state.db, group_id, request.total_budget).await?;
    let ledger = report::load_ledger(&state.db, group_id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(ledger.snapshot(), "Budget updated successfully")),
    ))
}

/// `PATCH /groups/:id/members/:member_id/contribution`
#[instrument(skip(state))]
pub async fn update_contribution(
    State(state): State<AppState>,
    Path((group_id, member_id)): Path<(i64, i64)>,
    Json(request): Json<UpdateContributionRequest>,
) -> ApiResult<ContributionResponse> {
    let updated =
        member::set_contribution(&state.db, group_id, member_id, request.contributed_amount)
            .await?;
    let ledger = report::load_ledger(&state.db, group_id).await?;

    let body = ContributionResponse {
        member: MemberLine::from(&updated),
        progress: ledger.progress(),
    };
    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(body, "Contribution updated successfully")),
    ))
}

/// `GET /vendors?category=&sort=`
#[instrument(skip(state))]
pub async fn list_vendors(
    State(state): State<AppState>,
    Query(query): Query<VendorQuery>,
) -> ApiResult<Vec<vendor_entity::Model>> {
    let category = query
        .category
        .as_deref()
        .map(str::parse::<VendorCategory>)
        .transpose()?;
    let sort = query
        .sort
        .as_deref()
        .map(str::parse::<VendorSort>)
        .transpose()?
        .unwrap_or_default();

    let vendors = vendor::list_vendors(&state.db, category, sort).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(vendors, "Vendors retrieved successfully")),
    ))
}

/// `POST /groups/:id/vendors`
#[instrument(skip(state, request))]
pub async fn create_vendor(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
    Json(request): Json<CreateVendorRequest>,
) -> ApiResult<vendor_entity::Model> {
    debug!("Listing vendor '{}' for group {group_id}", request.listing.name);

    let created =
        vendor::add_vendor(&state.db, group_id, request.added_by, request.listing).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(created, "Vendor submitted for review")),
    ))
}

/// `PATCH /vendors/:vendor_id/verify`
#[instrument(skip(state))]
pub async fn verify_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<i64>,
) -> ApiResult<vendor_entity::Model> {
    let verified = vendor::verify_vendor(&state.db, vendor_id).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(verified, "Vendor verified successfully")),
    ))
}
