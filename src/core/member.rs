//! Member business logic - Roster management and contribution tracking.
//!
//! Every change to a member's contributed amount writes a contribution row with
//! the delta and moves the group's `collected_amount` by the same delta, in one
//! database transaction.

use crate::{
    core::{group, ledger},
    entities::{Contribution, Expense, Member, contribution, expense, member},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::{info, instrument};

/// Roles a committee member can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Collects contributions from the community
    FundCollection,
    /// Keeps the books
    Treasurer,
    /// Runs the committee
    Management,
    /// Venue, transport, rentals
    Logistics,
    /// Decoration team
    Decoration,
    /// Prepares the prasad
    PrasadPreparation,
    /// Organizes performances
    CulturalEvents,
    /// No specific duty
    GeneralMember,
}

impl MemberRole {
    /// Every role, in display order.
    pub const ALL: [Self; 8] = [
        Self::FundCollection,
        Self::Treasurer,
        Self::Management,
        Self::Logistics,
        Self::Decoration,
        Self::PrasadPreparation,
        Self::CulturalEvents,
        Self::GeneralMember,
    ];

    /// Stored form, e.g. `"prasad_preparation"`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::FundCollection => "fund_collection",
            Self::Treasurer => "treasurer",
            Self::Management => "management",
            Self::Logistics => "logistics",
            Self::Decoration => "decoration",
            Self::PrasadPreparation => "prasad_preparation",
            Self::CulturalEvents => "cultural_events",
            Self::GeneralMember => "general_member",
        }
    }

    /// Human-readable label, e.g. `"Prasad Preparation"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FundCollection => "Fund Collection",
            Self::Treasurer => "Treasurer",
            Self::Management => "Management",
            Self::Logistics => "Logistics",
            Self::Decoration => "Decoration",
            Self::PrasadPreparation => "Prasad Preparation",
            Self::CulturalEvents => "Cultural Events",
            Self::GeneralMember => "General Member",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MemberRole {
    type Err = Error;

    /// Accepts the key or the label, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(' ', "_");
        Self::ALL
            .into_iter()
            .find(|role| role.key() == normalized)
            .ok_or_else(|| Error::Validation {
                message: format!("unknown member role '{s}'"),
            })
    }
}

/// Retrieves a group's members in the order they joined.
pub async fn get_members_for_group<C>(db: &C, group_id: i64) -> Result<Vec<member::Model>>
where
    C: ConnectionTrait,
{
    Member::find()
        .filter(member::Column::GroupId.eq(group_id))
        .order_by_asc(member::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a member of `group_id` by ID; members of other groups are not returned.
pub async fn get_member_by_id<C>(
    db: &C,
    group_id: i64,
    member_id: i64,
) -> Result<Option<member::Model>>
where
    C: ConnectionTrait,
{
    Member::find_by_id(member_id)
        .filter(member::Column::GroupId.eq(group_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a member of `group_id` by exact name.
pub async fn get_member_by_name<C>(
    db: &C,
    group_id: i64,
    name: &str,
) -> Result<Option<member::Model>>
where
    C: ConnectionTrait,
{
    Member::find()
        .filter(member::Column::GroupId.eq(group_id))
        .filter(member::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Like `get_member_by_id`, but a missing member is an error.
pub async fn require_member<C>(db: &C, group_id: i64, member_id: i64) -> Result<member::Model>
where
    C: ConnectionTrait,
{
    get_member_by_id(db, group_id, member_id)
        .await?
        .ok_or(Error::MemberNotFound { id: member_id })
}

/// Adds a member to a group with nothing contributed yet.
///
/// Without an explicit `expected_amount`, the member is expected to pay an even
/// share of the budget across the roster including themselves, rounded to a
/// whole currency unit.
#[instrument(skip(db))]
pub async fn add_member<C>(
    db: &C,
    group_id: i64,
    name: &str,
    role: MemberRole,
    expected_amount: Option<f64>,
) -> Result<member::Model>
where
    C: ConnectionTrait,
{
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Member name cannot be empty".to_string(),
        });
    }

    if let Some(amount) = expected_amount {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidAmount { amount });
        }
    }

    let group = group::require_group(db, group_id).await?;

    if get_member_by_name(db, group_id, name).await?.is_some() {
        return Err(Error::Validation {
            message: format!("'{name}' is already a member of this group"),
        });
    }

    let expected_amount = match expected_amount {
        Some(amount) => amount,
        None => {
            let roster = Member::find()
                .filter(member::Column::GroupId.eq(group_id))
                .count(db)
                .await?;
            // Cast safety: rosters are far below usize::MAX.
            #[allow(clippy::cast_possible_truncation)]
            let roster = roster as usize;
            ledger::per_member_share(group.total_budget, roster + 1).round()
        }
    };

    let member = member::ActiveModel {
        group_id: Set(group_id),
        name: Set(name.to_string()),
        role: Set(role.key().to_string()),
        expected_amount: Set(expected_amount),
        contributed_amount: Set(0.0),
        ..Default::default()
    };

    let result = member.insert(db).await?;
    info!(group_id, member_id = result.id, "Added member '{}'", result.name);
    Ok(result)
}

/// Sets a member's contributed amount to an absolute value.
///
/// Records the change as a contribution row and shifts the group's collected
/// total by the same delta. Setting the current value again writes nothing.
#[instrument(skip(db))]
pub async fn set_contribution<C>(
    db: &C,
    group_id: i64,
    member_id: i64,
    contributed_amount: f64,
) -> Result<member::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    if !contributed_amount.is_finite() || contributed_amount < 0.0 {
        return Err(Error::InvalidAmount {
            amount: contributed_amount,
        });
    }

    let txn = db.begin().await?;
    group::lock_group(&txn, group_id).await?;

    let member = require_member(&txn, group_id, member_id).await?;
    let delta = contributed_amount - member.contributed_amount;

    if delta == 0.0 {
        txn.commit().await?;
        return Ok(member);
    }

    let updated = apply_contribution_delta(&txn, group_id, member_id, delta).await?;
    txn.commit().await?;

    info!(
        group_id,
        member_id,
        delta,
        status = %updated.status(),
        "Updated contribution"
    );
    Ok(updated)
}

/// Adds a payment on top of what the member has already contributed.
///
/// The payment is applied as a delta inside the group lock, so overlapping
/// payments for the same member all count.
#[instrument(skip(db))]
pub async fn record_contribution<C>(
    db: &C,
    group_id: i64,
    member_id: i64,
    amount: f64,
) -> Result<member::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }

    let txn = db.begin().await?;
    group::lock_group(&txn, group_id).await?;

    let updated = apply_contribution_delta(&txn, group_id, member_id, amount).await?;
    txn.commit().await?;

    info!(
        group_id,
        member_id,
        amount,
        status = %updated.status(),
        "Recorded contribution"
    );
    Ok(updated)
}

/// Writes the history row and moves the member's and the group's totals by `delta`.
async fn apply_contribution_delta<C>(
    txn: &C,
    group_id: i64,
    member_id: i64,
    delta: f64,
) -> Result<member::Model>
where
    C: ConnectionTrait,
{
    let result = Member::update_many()
        .col_expr(
            member::Column::ContributedAmount,
            Expr::col(member::Column::ContributedAmount).add(delta),
        )
        .filter(member::Column::Id.eq(member_id))
        .filter(member::Column::GroupId.eq(group_id))
        .exec(txn)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::MemberNotFound { id: member_id });
    }

    let record = contribution::ActiveModel {
        group_id: Set(group_id),
        member_id: Set(member_id),
        amount: Set(delta),
        timestamp: Set(chrono::Utc::now()),
        ..Default::default()
    };
    record.insert(txn).await?;

    group::adjust_group_totals(txn, group_id, delta, 0.0).await?;

    require_member(txn, group_id, member_id).await
}

/// Changes a member's role.
#[instrument(skip(db))]
pub async fn change_role<C>(
    db: &C,
    group_id: i64,
    member_id: i64,
    role: MemberRole,
) -> Result<member::Model>
where
    C: ConnectionTrait,
{
    let member = require_member(db, group_id, member_id).await?;

    let mut active: member::ActiveModel = member.into();
    active.role = Set(role.key().to_string());
    let updated = active.update(db).await?;

    info!(group_id, member_id, role = role.key(), "Changed member role");
    Ok(updated)
}

/// Removes a member, their contribution history, and their share of the collected total.
///
/// Refused with `MemberHasExpenses` while any expense is still assigned to them.
#[instrument(skip(db))]
pub async fn remove_member<C>(db: &C, group_id: i64, member_id: i64) -> Result<()>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    group::lock_group(&txn, group_id).await?;

    let member = require_member(&txn, group_id, member_id).await?;

    let assigned = Expense::find()
        .filter(expense::Column::MemberId.eq(member_id))
        .count(&txn)
        .await?;
    if assigned > 0 {
        return Err(Error::MemberHasExpenses { id: member_id });
    }

    Contribution::delete_many()
        .filter(contribution::Column::MemberId.eq(member_id))
        .exec(&txn)
        .await?;

    let contributed = member.contributed_amount;
    member.delete(&txn).await?;

    group::adjust_group_totals(&txn, group_id, -contributed, 0.0).await?;

    txn.commit().await?;
    info!(group_id, member_id, "Removed member");
    Ok(())
}

/// Contribution history of a member, oldest first.
pub async fn get_contributions_for_member<C>(
    db: &C,
    group_id: i64,
    member_id: i64,
) -> Result<Vec<contribution::Model>>
where
    C: ConnectionTrait,
{
    Contribution::find()
        .filter(contribution::Column::GroupId.eq(group_id))
        .filter(contribution::Column::MemberId.eq(member_id))
        .order_by_asc(contribution::Column::Timestamp)
        .order_by_asc(contribution::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
