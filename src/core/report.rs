//! Report generation business logic.
//!
//! This module rebuilds a `BudgetLedger` from the database, turns it into a
//! structured `GroupReport`, checks the stored running totals against the rows
//! they summarize, and formats figures for chat output. Everything returned is
//! plain data; the bot and API layers decide how to present it.

use crate::{
    core::{
        contribution::ContributionStatus,
        expense, group,
        ledger::{BudgetLedger, LedgerSnapshot},
        member::{self, MemberRole},
        milestone::{self, CompletionEstimate, Milestone},
    },
    entities::{Contribution, contribution, expense as expense_entity, member as member_entity},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Differences below half a cent are rounding noise.
const TOLERANCE: f64 = 0.005;

/// One roster line of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberLine {
    /// Member id
    pub member_id: i64,
    /// Display name
    pub name: String,
    /// Role label; the raw key when it no longer parses
    pub role: String,
    /// Expected contribution
    pub expected_amount: f64,
    /// Contributed so far
    pub contributed_amount: f64,
    /// Still owed, never negative
    pub outstanding: f64,
    /// Derived status
    pub status: ContributionStatus,
    /// Contributed as a percentage of expected
    pub progress_percent: f64,
}

impl From<&member_entity::Model> for MemberLine {
    fn from(m: &member_entity::Model) -> Self {
        let role = m
            .role
            .parse::<MemberRole>()
            .map_or_else(|_| m.role.clone(), |r| r.label().to_string());

        Self {
            member_id: m.id,
            name: m.name.clone(),
            role,
            expected_amount: m.expected_amount,
            contributed_amount: m.contributed_amount,
            outstanding: m.outstanding(),
            status: m.status(),
            progress_percent: calculate_progress(m.contributed_amount, m.expected_amount),
        }
    }
}

/// Everything a committee dashboard shows about one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupReport {
    /// Group name
    pub group_name: String,
    /// Date the report was generated for
    pub generated_on: NaiveDate,
    /// Ledger figures
    pub ledger: LedgerSnapshot,
    /// Milestones on the share of members who have paid in full
    pub member_milestones: Vec<Milestone>,
    /// Milestones on collected amount against the budget
    pub collection_milestones: Vec<Milestone>,
    /// Next member milestone not yet reached
    pub next_milestone: Option<u8>,
    /// Rough completion estimate; see `milestone::project_completion`
    pub projected_completion: CompletionEstimate,
    /// Roster lines, in join order
    pub members: Vec<MemberLine>,
}

/// A stored running total that disagrees with the rows it summarizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discrepancy {
    /// `group.collected_amount` differs from the sum of member contributions
    CollectedAmount {
        /// Value on the group row
        stored: f64,
        /// Sum over members
        computed: f64,
    },
    /// `group.total_expenses` differs from the sum of expense amounts
    TotalExpenses {
        /// Value on the group row
        stored: f64,
        /// Sum over expenses
        computed: f64,
    },
    /// A member's contributed amount is negative
    NegativeContribution {
        /// Offending member
        member_id: i64,
        /// Their contributed amount
        amount: f64,
    },
    /// A member's contributed amount differs from their contribution history
    ContributionHistory {
        /// Offending member
        member_id: i64,
        /// Their contributed amount
        stored: f64,
        /// Sum of their contribution rows
        computed: f64,
    },
}

/// Loads a group's ledger from the database.
pub async fn load_ledger<C>(db: &C, group_id: i64) -> Result<BudgetLedger>
where
    C: ConnectionTrait,
{
    let group = group::require_group(db, group_id).await?;
    let members = member::get_members_for_group(db, group_id).await?;
    let expenses = expense::get_expenses_for_group(db, group_id).await?;
    Ok(BudgetLedger::from_group(&group, members, expenses))
}

/// Generates the full report for a group as of `today`.
pub async fn generate_group_report<C>(db: &C, group_id: i64, today: NaiveDate) -> Result<GroupReport>
where
    C: ConnectionTrait,
{
    let group = group::require_group(db, group_id).await?;
    let ledger = load_ledger(db, group_id).await?;
    Ok(build_report(&group.name, &ledger, today))
}

/// Builds a report from an already loaded ledger.
#[must_use]
pub fn build_report(group_name: &str, ledger: &BudgetLedger, today: NaiveDate) -> GroupReport {
    let snapshot = ledger.snapshot();
    let progress = snapshot.progress;

    GroupReport {
        group_name: group_name.to_string(),
        generated_on: today,
        member_milestones: milestone::evaluate(progress.percentage_complete),
        collection_milestones: milestone::evaluate(snapshot.collected_percentage),
        next_milestone: milestone::next_milestone(progress.percentage_complete),
        projected_completion: milestone::project_completion(
            progress.paid_count,
            progress.total_members,
            today,
        ),
        members: ledger.members().iter().map(MemberLine::from).collect(),
        ledger: snapshot,
    }
}

/// Compares the group's stored running totals with the rows behind them.
///
/// An empty result means every ledger invariant holds.
pub async fn reconcile<C>(db: &C, group_id: i64) -> Result<Vec<Discrepancy>>
where
    C: ConnectionTrait,
{
    let group = group::require_group(db, group_id).await?;
    let members = member::get_members_for_group(db, group_id).await?;
    let expenses = expense::get_expenses_for_group(db, group_id).await?;
    let history = Contribution::find()
        .filter(contribution::Column::GroupId.eq(group_id))
        .all(db)
        .await?;

    Ok(find_discrepancies(&group, &members, &expenses, &history))
}

fn find_discrepancies(
    group: &crate::entities::group::Model,
    members: &[member_entity::Model],
    expenses: &[expense_entity::Model],
    history: &[contribution::Model],
) -> Vec<Discrepancy> {
    let mut found = Vec::new();

    let collected: f64 = members.iter().map(|m| m.contributed_amount).sum();
    if (collected - group.collected_amount).abs() > TOLERANCE {
        found.push(Discrepancy::CollectedAmount {
            stored: group.collected_amount,
            computed: collected,
        });
    }

    let spent: f64 = expenses.iter().map(|e| e.amount).sum();
    if (spent - group.total_expenses).abs() > TOLERANCE {
        found.push(Discrepancy::TotalExpenses {
            stored: group.total_expenses,
            computed: spent,
        });
    }

    let mut per_member: HashMap<i64, f64> = HashMap::new();
    for record in history {
        *per_member.entry(record.member_id).or_default() += record.amount;
    }

    for m in members {
        if m.contributed_amount < 0.0 {
            found.push(Discrepancy::NegativeContribution {
                member_id: m.id,
                amount: m.contributed_amount,
            });
        }

        let recorded = per_member.get(&m.id).copied().unwrap_or(0.0);
        if (recorded - m.contributed_amount).abs() > TOLERANCE {
            found.push(Discrepancy::ContributionHistory {
                member_id: m.id,
                stored: m.contributed_amount,
                computed: recorded,
            });
        }
    }

    found
}

/// Calculates `part` as a percentage of `whole`.
///
/// Returns 0 when `whole` is 0 so an empty expectation never divides by zero.
#[must_use]
pub fn calculate_progress(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }

    (part / whole) * 100.0
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80.0%`
///
/// # Arguments
/// * `progress_percent` - Progress percentage (0-100)
/// * `bar_length` - Length of the progress bar in characters (default 10)
#[must_use]
pub fn format_progress_bar(progress_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped_progress = progress_percent.clamp(0.0, 100.0);

    // Cast safety: clamped_progress ∈ [0, 100], length is small (10-20).
    // Result is mathematically in [0, length], truncation/sign loss intentional for display.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped_progress / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!("[{filled_str}{empty_str}] {progress_percent:.1}%")
}

/// Formats a currency amount, e.g. `$1,150.00` or `-$25.50`.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{cents}")
}

/// Renders the milestone row, e.g. `25% ✅ · 50% ✅ · 75% ⬜ · 100% ⬜`.
#[must_use]
pub fn format_milestones(milestones: &[Milestone]) -> String {
    milestones
        .iter()
        .map(|m| format!("{}% {}", m.threshold, if m.reached { "✅" } else { "⬜" }))
        .collect::<Vec<_>>()
        .join(" · ")
}

/// Describes a completion estimate for display.
#[must_use]
pub fn format_completion(estimate: &CompletionEstimate) -> String {
    match estimate {
        CompletionEstimate::NotAvailable => "Not available".to_string(),
        CompletionEstimate::Estimated { days: 0, date } => {
            format!("Complete ({})", date.format("%b %-d, %Y"))
        }
        CompletionEstimate::Estimated { days, date } => {
            format!("~{} (in {days} days, rough estimate)", date.format("%b %-d, %Y"))
        }
    }
}

/// One-line summary of an expense with its assignee resolved to a name.
#[must_use]
pub fn format_expense_line(expense: &expense_entity::Model, assignee: &str) -> String {
    format!(
        "#{} | {} | {} | {} | {} | {}",
        expense.id,
        expense.date.format("%Y-%m-%d"),
        expense.category,
        format_amount(expense.amount),
        expense.description,
        assignee
    )
}
