//! Group business logic - Creating groups, changing their budget and seeding them.
//!
//! The group row carries running totals (`collected_amount`, `total_expenses`).
//! They only ever change through `adjust_group_totals`, inside the same database
//! transaction as the row change that caused them.

use crate::{
    config::group::GroupConfig,
    core::{
        ledger::{self, NewExpense},
        member::{self, MemberRole},
        vendor,
    },
    entities::{Group, group},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use std::collections::HashMap;
use tracing::{info, instrument};

/// Retrieves every group, ordered alphabetically by name.
pub async fn get_all_groups<C>(db: &C) -> Result<Vec<group::Model>>
where
    C: ConnectionTrait,
{
    Group::find()
        .order_by_asc(group::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a group by its unique ID.
pub async fn get_group_by_id<C>(db: &C, group_id: i64) -> Result<Option<group::Model>>
where
    C: ConnectionTrait,
{
    Group::find_by_id(group_id).one(db).await.map_err(Into::into)
}

/// Finds a group by its exact name.
pub async fn get_group_by_name<C>(db: &C, name: &str) -> Result<Option<group::Model>>
where
    C: ConnectionTrait,
{
    Group::find()
        .filter(group::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Like `get_group_by_id`, but a missing group is an error.
pub async fn require_group<C>(db: &C, group_id: i64) -> Result<group::Model>
where
    C: ConnectionTrait,
{
    get_group_by_id(db, group_id)
        .await?
        .ok_or(Error::GroupNotFound { id: group_id })
}

/// Creates a group with no members, no expenses and the given budget.
///
/// The name is trimmed and must not be empty; the budget must be finite and non-negative.
#[instrument(skip(db))]
pub async fn create_group<C>(db: &C, name: &str, total_budget: f64) -> Result<group::Model>
where
    C: ConnectionTrait,
{
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Group name cannot be empty".to_string(),
        });
    }
    ledger::validate_budget(total_budget)?;

    let group = group::ActiveModel {
        name: Set(name.to_string()),
        total_budget: Set(total_budget),
        collected_amount: Set(0.0),
        total_expenses: Set(0.0),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = group.insert(db).await?;
    info!(group_id = result.id, "Created group '{}'", result.name);
    Ok(result)
}

/// Replaces a group's total budget. Collected and spent totals are untouched.
#[instrument(skip(db))]
pub async fn update_total_budget<C>(db: &C, group_id: i64, total_budget: f64) -> Result<group::Model>
where
    C: ConnectionTrait,
{
    ledger::validate_budget(total_budget)?;

    let group = require_group(db, group_id).await?;
    let old_budget = group.total_budget;

    let mut active: group::ActiveModel = group.into();
    active.total_budget = Set(total_budget);
    let updated = active.update(db).await?;

    info!(group_id, old_budget, total_budget, "Updated total budget");
    Ok(updated)
}

/// Atomically shifts a group's running totals by the given deltas.
///
/// Runs a single `UPDATE ... SET col = col + delta` so concurrent writers to the
/// same group cannot lose each other's changes. Call it with the transaction
/// that wrote the member or expense row.
pub async fn adjust_group_totals<C>(
    db: &C,
    group_id: i64,
    collected_delta: f64,
    expenses_delta: f64,
) -> Result<group::Model>
where
    C: ConnectionTrait,
{
    let result = Group::update_many()
        .col_expr(
            group::Column::CollectedAmount,
            Expr::col(group::Column::CollectedAmount).add(collected_delta),
        )
        .col_expr(
            group::Column::TotalExpenses,
            Expr::col(group::Column::TotalExpenses).add(expenses_delta),
        )
        .filter(group::Column::Id.eq(group_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::GroupNotFound { id: group_id });
    }

    require_group(db, group_id).await
}

/// Takes the group's write lock for the rest of the transaction `txn`.
///
/// Must be the first statement of a mutation. It is a zero-delta write to the
/// group row, so overlapping mutations of the same group queue behind it and
/// never act on a read taken before another one committed.
pub async fn lock_group<C>(txn: &C, group_id: i64) -> Result<group::Model>
where
    C: ConnectionTrait,
{
    adjust_group_totals(txn, group_id, 0.0, 0.0).await
}

/// Seeds a group, its roster, its initial expenses and its vendors from configuration.
///
/// Does nothing if a group with the configured name already exists. Returns the
/// group and whether it was created by this call. All rows are written in one
/// transaction; an invalid member or expense leaves the database unchanged.
#[instrument(skip(db, config), fields(group = %config.group.name))]
pub async fn seed_group<C>(db: &C, config: &GroupConfig) -> Result<(group::Model, bool)>
where
    C: ConnectionTrait + TransactionTrait,
{
    if let Some(existing) = get_group_by_name(db, config.group.name.trim()).await? {
        info!(group_id = existing.id, "Group already seeded, skipping");
        return Ok((existing, false));
    }

    let txn = db.begin().await?;

    let group = create_group(&txn, &config.group.name, config.group.total_budget).await?;

    let mut member_ids = HashMap::new();
    for member_config in &config.members {
        let role: MemberRole = member_config.role.parse()?;
        let created = member::add_member(
            &txn,
            group.id,
            &member_config.name,
            role,
            member_config.expected_amount,
        )
        .await?;

        if member_config.contributed_amount > 0.0 {
            member::set_contribution(&txn, group.id, created.id, member_config.contributed_amount)
                .await?;
        }
        member_ids.insert(created.name.clone(), created.id);
    }

    for expense_config in &config.expenses {
        let member_id = *member_ids
            .get(expense_config.assigned_to.trim())
            .ok_or_else(|| Error::Config {
                message: format!(
                    "Expense '{}' is assigned to unknown member '{}'",
                    expense_config.description, expense_config.assigned_to
                ),
            })?;

        crate::core::expense::record_expense(
            &txn,
            group.id,
            NewExpense {
                category: expense_config.category.clone(),
                description: expense_config.description.clone(),
                amount: expense_config.amount,
                member_id,
                date: expense_config.date,
                receipt: expense_config.receipt.clone(),
            },
        )
        .await?;
    }

    for vendor_config in &config.vendors {
        let added_by = *member_ids
            .get(vendor_config.added_by.trim())
            .ok_or_else(|| Error::Config {
                message: format!(
                    "Vendor '{}' is added by unknown member '{}'",
                    vendor_config.listing.name, vendor_config.added_by
                ),
            })?;

        vendor::add_vendor(&txn, group.id, added_by, vendor_config.listing.clone()).await?;
    }

    let group = require_group(&txn, group.id).await?;
    txn.commit().await?;

    info!(
        group_id = group.id,
        members = config.members.len(),
        expenses = config.expenses.len(),
        vendors = config.vendors.len(),
        "Seeded group from configuration"
    );
    Ok((group, true))
}
