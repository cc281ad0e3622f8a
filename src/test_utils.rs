//! Shared test utilities for `FestivalLedger`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    config::group::{ExpenseConfig, GroupConfig, GroupSection, MemberConfig, VendorConfig},
    core::{expense, group, ledger::NewExpense, member, vendor::NewVendor},
    entities,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Sets up a complete test environment with an empty group.
/// Returns (db, group) with a budget of 5000.
pub async fn setup_with_group() -> Result<(DatabaseConnection, entities::group::Model)> {
    let db = setup_test_db().await?;
    let group = group::create_group(&db, "Diwali Celebration 2024", 5000.0).await?;
    Ok((db, group))
}

/// Sets up a group in a file-backed `SQLite` database inside a fresh temporary directory.
///
/// Use this for tests with concurrent writers: the in-memory database runs on a
/// single connection. Keep the returned `TempDir` alive for the whole test.
pub async fn setup_file_db_with_group()
-> Result<(TempDir, DatabaseConnection, entities::group::Model)> {
    let dir = tempfile::tempdir()?;
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("ledger.sqlite").display()
    );
    let db = crate::config::database::create_connection(&url).await?;
    crate::config::database::create_tables(&db).await?;
    let group = group::create_group(&db, "Diwali Celebration 2024", 5000.0).await?;
    Ok((dir, db, group))
}

/// Adds a test member.
///
/// # Defaults
/// * `role`: general member
/// * `expected_amount`: 417.0
pub async fn create_test_member(
    db: &DatabaseConnection,
    group_id: i64,
    name: &str,
) -> Result<entities::member::Model> {
    member::add_member(db, group_id, name, member::MemberRole::GeneralMember, Some(417.0)).await
}

/// Adds a test member with the management role, who may list vendors.
pub async fn create_test_manager(
    db: &DatabaseConnection,
    group_id: i64,
    name: &str,
) -> Result<entities::member::Model> {
    member::add_member(db, group_id, name, member::MemberRole::Management, Some(417.0)).await
}

/// A valid catering listing.
#[must_use]
pub fn new_vendor() -> NewVendor {
    NewVendor {
        name: "Spice Garden Catering".to_string(),
        category: "catering".to_string(),
        description: "Authentic Indian cuisine for festivals. Traditional sweets, prasad and vegetarian feasts."
            .to_string(),
        phone: "+1-555-0202".to_string(),
        email: "orders@spicegarden.com".to_string(),
        location: "Edison, NJ".to_string(),
        starting_price: 15.0,
        website: None,
        specialties: None,
        image: None,
    }
}

/// Records a test expense.
///
/// # Defaults
/// * `category`: "Decoration"
/// * `description`: "Test expense"
/// * `date`: 2024-08-25
pub async fn create_test_expense(
    db: &DatabaseConnection,
    group_id: i64,
    member_id: i64,
    amount: f64,
) -> Result<entities::expense::Model> {
    expense::record_expense(
        db,
        group_id,
        NewExpense {
            category: "Decoration".to_string(),
            description: "Test expense".to_string(),
            amount,
            member_id,
            date: test_date(),
            receipt: None,
        },
    )
    .await
}

/// Builds an unsaved member row for pure computations.
#[must_use]
pub fn member_model(id: i64, expected: f64, contributed: f64) -> entities::member::Model {
    entities::member::Model {
        id,
        group_id: 1,
        name: format!("Member {id}"),
        role: "general_member".to_string(),
        expected_amount: expected,
        contributed_amount: contributed,
    }
}

/// Builds an unsaved expense row for pure computations.
#[must_use]
pub fn expense_model(id: i64, category: &str, amount: f64) -> entities::expense::Model {
    entities::expense::Model {
        id,
        group_id: 1,
        category: category.to_string(),
        description: "Test expense".to_string(),
        amount,
        member_id: 1,
        date: test_date(),
        receipt: None,
        created_at: chrono::Utc::now(),
    }
}

/// Builds an unsaved catering vendor row for pure computations.
#[must_use]
pub fn vendor_model(
    id: i64,
    starting_price: f64,
    rating: f64,
    review_count: i32,
) -> entities::vendor::Model {
    entities::vendor::Model {
        id,
        group_id: 1,
        added_by: 1,
        name: format!("Vendor {id}"),
        category: "catering".to_string(),
        description: new_vendor().description,
        phone: "+1-555-0202".to_string(),
        email: "orders@example.com".to_string(),
        location: "Edison, NJ".to_string(),
        starting_price,
        website: None,
        specialties: None,
        image: None,
        rating,
        review_count,
        is_verified: false,
        status: "pending_review".to_string(),
        created_at: chrono::Utc::now(),
    }
}

/// A small seeded group: three members who have paid 617 between them, 430 spent on
/// decoration, and one caterer listed by Rajesh Kumar.
#[must_use]
pub fn sample_group_config() -> GroupConfig {
    let member = |name: &str, role: &str, contributed: f64| MemberConfig {
        name: name.to_string(),
        role: role.to_string(),
        expected_amount: Some(417.0),
        contributed_amount: contributed,
    };
    let decoration = |description: &str, amount: f64| ExpenseConfig {
        category: "Decoration".to_string(),
        description: description.to_string(),
        amount,
        assigned_to: "Rajesh Kumar".to_string(),
        date: test_date(),
        receipt: None,
    };

    GroupConfig {
        group: GroupSection {
            name: "Diwali Celebration 2024".to_string(),
            total_budget: 5000.0,
        },
        members: vec![
            member("Rajesh Kumar", "management", 417.0),
            member("Priya Sharma", "treasurer", 200.0),
            member("Amit Patel", "logistics", 0.0),
        ],
        expenses: vec![
            decoration("Marigold flowers and rangoli materials", 250.0),
            decoration("Diyas and lanterns", 180.0),
        ],
        vendors: vec![VendorConfig {
            added_by: "Rajesh Kumar".to_string(),
            listing: new_vendor(),
        }],
    }
}

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 8, 25).unwrap()
}
