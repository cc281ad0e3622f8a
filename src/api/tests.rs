#![allow(clippy::unwrap_used)]
#![allow(clippy::float_cmp)]

use super::{AppState, create_router};
use crate::{
    api::schemas::{
        ApiResponse, ContributionResponse, CreateExpenseRequest, CreateVendorRequest,
        ErrorResponse, HealthResponse, UpdateBudgetRequest, UpdateContributionRequest,
    },
    core::{contribution::ContributionStatus, group, ledger::LedgerSnapshot, report::GroupReport},
    entities::{expense, group as group_entity, vendor},
    test_utils::{new_vendor, sample_group_config, setup_test_db},
};
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::NaiveDate;

/// A server over a database seeded with the sample group.
async fn setup_test_server() -> (TestServer, group_entity::Model) {
    let db = setup_test_db().await.unwrap();
    let (seeded, _) = group::seed_group(&db, &sample_group_config()).await.unwrap();
    let server = TestServer::new(create_router(AppState { db })).unwrap();
    (server, seeded)
}

fn expense_request(amount: f64, assigned_to: i64) -> CreateExpenseRequest {
    CreateExpenseRequest {
        category: "Prasad".to_string(),
        description: "Sweets and fruits for prasad".to_string(),
        amount,
        assigned_to,
        date: NaiveDate::from_ymd_opt(2024, 8, 26).unwrap(),
        receipt: None,
    }
}

#[tokio::test]
async fn test_health_check() {
    let (server, _) = setup_test_server().await;

    let response = server.get("/health").await;

    response.assert_status(StatusCode::OK);
    let body: HealthResponse = response.json();
    assert_eq!(body.status, "healthy");
    assert_eq!(body.database, "connected");
}

#[tokio::test]
async fn test_get_ledger() {
    let (server, seeded) = setup_test_server().await;

    let response = server.get(&format!("/groups/{}/ledger", seeded.id)).await;

    response.assert_status(StatusCode::OK);
    let body: ApiResponse<LedgerSnapshot> = response.json();
    assert!(body.success);
    assert_eq!(body.data.total_budget, 5000.0);
    assert_eq!(body.data.collected_amount, 617.0);
    assert_eq!(body.data.total_expenses, 430.0);
    assert_eq!(body.data.remaining_balance, 187.0);
    assert_eq!(body.data.member_count, 3);
}

#[tokio::test]
async fn test_get_ledger_unknown_group() {
    let (server, _) = setup_test_server().await;

    let response = server.get("/groups/999/ledger").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: ErrorResponse = response.json();
    assert!(!body.success);
    assert_eq!(body.code, "NOT_FOUND");
}

#[tokio::test]
async fn test_get_report() {
    let (server, seeded) = setup_test_server().await;

    let response = server.get(&format!("/groups/{}/report", seeded.id)).await;

    response.assert_status(StatusCode::OK);
    let body: ApiResponse<GroupReport> = response.json();
    assert_eq!(body.data.group_name, "Diwali Celebration 2024");
    assert_eq!(body.data.members.len(), 3);
    assert_eq!(body.data.member_milestones.len(), 4);
}

#[tokio::test]
async fn test_create_expense() {
    let (server, seeded) = setup_test_server().await;
    let ledger: ApiResponse<serde_json::Value> = server
        .get(&format!("/groups/{}/report", seeded.id))
        .await
        .json();
    let member_id = ledger.data["members"][1]["member_id"].as_i64().unwrap();

    let response = server
        .post(&format!("/groups/{}/expenses", seeded.id))
        .json(&expense_request(320.0, member_id))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: ApiResponse<expense::Model> = response.json();
    assert_eq!(body.data.category, "Prasad");
    assert_eq!(body.data.member_id, member_id);

    let snapshot: ApiResponse<LedgerSnapshot> = server
        .get(&format!("/groups/{}/ledger", seeded.id))
        .await
        .json();
    assert_eq!(snapshot.data.total_expenses, 750.0);
    assert_eq!(snapshot.data.remaining_balance, -133.0);
}

#[tokio::test]
async fn test_create_expense_validation() {
    let (server, seeded) = setup_test_server().await;

    let response = server
        .post(&format!("/groups/{}/expenses", seeded.id))
        .json(&expense_request(-5.0, 1))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let mut unknown_category = expense_request(5.0, 1);
    unknown_category.category = "Fireworks".to_string();
    let response = server
        .post(&format!("/groups/{}/expenses", seeded.id))
        .json(&unknown_category)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "VALIDATION_ERROR");

    // Nothing was written
    let snapshot: ApiResponse<LedgerSnapshot> = server
        .get(&format!("/groups/{}/ledger", seeded.id))
        .await
        .json();
    assert_eq!(snapshot.data.total_expenses, 430.0);
}

#[tokio::test]
async fn test_create_expense_unknown_group() {
    let (server, _) = setup_test_server().await;

    let response = server
        .post("/groups/999/expenses")
        .json(&expense_request(5.0, 1))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_expense() {
    let (server, seeded) = setup_test_server().await;
    let created: ApiResponse<expense::Model> = server
        .post(&format!("/groups/{}/expenses", seeded.id))
        .json(&expense_request(99.0, 1))
        .await
        .json();

    let path = format!("/groups/{}/expenses/{}", seeded.id, created.data.id);
    server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
    server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);

    let snapshot: ApiResponse<LedgerSnapshot> = server
        .get(&format!("/groups/{}/ledger", seeded.id))
        .await
        .json();
    assert_eq!(snapshot.data.total_expenses, 430.0);
}

#[tokio::test]
async fn test_update_budget() {
    let (server, seeded) = setup_test_server().await;
    let path = format!("/groups/{}/budget", seeded.id);

    let response = server
        .patch(&path)
        .json(&UpdateBudgetRequest {
            total_budget: 6000.0,
        })
        .await;
    response.assert_status(StatusCode::OK);
    let body: ApiResponse<LedgerSnapshot> = response.json();
    assert_eq!(body.data.total_budget, 6000.0);
    assert_eq!(body.data.per_member_share, 2000.0);

    let response = server
        .patch(&path)
        .json(&UpdateBudgetRequest {
            total_budget: -1.0,
        })
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_contribution() {
    let (server, seeded) = setup_test_server().await;
    // Priya Sharma has paid 200 of 417
    let path = format!("/groups/{}/members/2/contribution", seeded.id);

    let response = server
        .patch(&path)
        .json(&UpdateContributionRequest {
            contributed_amount: 417.0,
        })
        .await;

    response.assert_status(StatusCode::OK);
    let body: ApiResponse<ContributionResponse> = response.json();
    assert_eq!(body.data.member.status, ContributionStatus::Paid);
    assert_eq!(body.data.progress.paid_count, 2);
    assert_eq!(body.data.progress.total_members, 3);

    let response = server
        .patch(&path)
        .json(&UpdateContributionRequest {
            contributed_amount: -10.0,
        })
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .patch(&format!("/groups/{}/members/99/contribution", seeded.id))
        .json(&UpdateContributionRequest {
            contributed_amount: 10.0,
        })
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

fn vendor_request(added_by: i64, name: &str, category: &str, price: f64) -> CreateVendorRequest {
    let mut listing = new_vendor();
    listing.name = name.to_string();
    listing.category = category.to_string();
    listing.starting_price = price;
    CreateVendorRequest { added_by, listing }
}

#[tokio::test]
async fn test_create_and_list_vendors() {
    let (server, seeded) = setup_test_server().await;
    // Rajesh Kumar (id 1) is the management member of the sample group
    let path = format!("/groups/{}/vendors", seeded.id);

    let response = server
        .post(&path)
        .json(&vendor_request(1, "Elegant Decorations", "decoration", 299.0))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: ApiResponse<vendor::Model> = response.json();
    assert_eq!(body.data.status, "pending_review");
    assert_eq!(body.data.group_id, seeded.id);

    server
        .post(&path)
        .json(&vendor_request(1, "Mithai Mahal", "Catering", 40.0))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.get("/vendors?category=catering&sort=price_high").await;
    response.assert_status(StatusCode::OK);
    let body: ApiResponse<Vec<vendor::Model>> = response.json();
    let names: Vec<&str> = body.data.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Mithai Mahal", "Spice Garden Catering"]);

    let all: ApiResponse<Vec<vendor::Model>> = server.get("/vendors").await.json();
    assert_eq!(all.data.len(), 3);
}

#[tokio::test]
async fn test_create_vendor_rejected() {
    let (server, seeded) = setup_test_server().await;
    let path = format!("/groups/{}/vendors", seeded.id);

    // Priya Sharma is the treasurer, not management
    let response = server
        .post(&path)
        .json(&vendor_request(2, "Elegant Decorations", "decoration", 299.0))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "FORBIDDEN");

    let response = server
        .post(&path)
        .json(&vendor_request(1, "Elegant Decorations", "decoration", 0.0))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let mut short = vendor_request(1, "Elegant Decorations", "decoration", 299.0);
    short.listing.description = "Flowers".to_string();
    server
        .post(&path)
        .json(&short)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .get("/vendors?sort=distance")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let all: ApiResponse<Vec<vendor::Model>> = server.get("/vendors").await.json();
    assert_eq!(all.data.len(), 1);
}

#[tokio::test]
async fn test_verify_vendor() {
    let (server, _) = setup_test_server().await;

    let response = server.patch("/vendors/1/verify").await;
    response.assert_status(StatusCode::OK);
    let body: ApiResponse<vendor::Model> = response.json();
    assert!(body.data.is_verified);
    assert_eq!(body.data.status, "verified");

    server
        .patch("/vendors/99/verify")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
