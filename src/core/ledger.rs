//! In-memory budget ledger for one group.
//!
//! The ledger owns the group's total budget, its members' expected and
//! contributed amounts, and its expenses, and derives collected total,
//! spent total and remaining balance from them. It never touches the
//! database; the persistence services validate through it and
//! `core::report::load_ledger` rebuilds it from stored rows.

use crate::{
    core::{
        category::{self, ExpenseCategory},
        contribution::{self, ContributionProgress},
    },
    entities::{expense, group, member},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Input for a new expense, before it has an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    /// Category label or snake form, e.g. `"Pooja Items"` or `"pooja_items"`
    pub category: String,
    /// What the money was spent on
    pub description: String,
    /// Amount spent; must be positive and finite
    pub amount: f64,
    /// Member responsible for the expense
    pub member_id: i64,
    /// Date the expense was incurred
    pub date: NaiveDate,
    /// Optional receipt reference
    pub receipt: Option<String>,
}

impl NewExpense {
    /// Checks the fields that do not depend on group state and returns the parsed category.
    pub fn validate(&self) -> Result<ExpenseCategory> {
        validate_expense_fields(&self.category, &self.description, self.amount)
    }
}

fn validate_expense_fields(
    category: &str,
    description: &str,
    amount: f64,
) -> Result<ExpenseCategory> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidExpense {
            reason: format!("amount must be a positive number, got {amount}"),
        });
    }

    if description.trim().is_empty() {
        return Err(Error::InvalidExpense {
            reason: "description cannot be empty".to_string(),
        });
    }

    category.parse()
}

/// Spending by one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category
    pub category: ExpenseCategory,
    /// Number of expenses in it
    pub count: usize,
    /// Sum of their amounts
    pub total: f64,
}

/// Point-in-time view of a ledger, as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Group the ledger belongs to
    pub group_id: i64,
    /// Pledged budget
    pub total_budget: f64,
    /// Sum of member contributions
    pub collected_amount: f64,
    /// Sum of expense amounts
    pub total_expenses: f64,
    /// `collected_amount - total_expenses`
    pub remaining_balance: f64,
    /// `total_budget / member_count`, 0 with no members
    pub per_member_share: f64,
    /// Number of members
    pub member_count: usize,
    /// Number of expenses
    pub expense_count: usize,
    /// Collected as a percentage of the budget
    pub collected_percentage: f64,
    /// Spent as a percentage of the budget
    pub spent_percentage: f64,
    /// Remaining balance as a percentage of the budget
    pub remaining_percentage: f64,
    /// Member payment progress
    pub progress: ContributionProgress,
    /// Spending per category, one entry per category
    pub categories: Vec<CategoryTotal>,
}

/// Budget, roster and expenses of one group, with derived totals.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetLedger {
    group_id: i64,
    total_budget: f64,
    members: Vec<member::Model>,
    expenses: Vec<expense::Model>,
    total_expenses: f64,
}

impl BudgetLedger {
    /// Builds a ledger; `total_expenses` is summed from `expenses`.
    #[must_use]
    pub fn new(
        group_id: i64,
        total_budget: f64,
        members: Vec<member::Model>,
        expenses: Vec<expense::Model>,
    ) -> Self {
        let total_expenses = expenses.iter().map(|exp| exp.amount).sum();
        Self {
            group_id,
            total_budget,
            members,
            expenses,
            total_expenses,
        }
    }

    /// Builds a ledger from a stored group and its rows.
    #[must_use]
    pub fn from_group(
        group: &group::Model,
        members: Vec<member::Model>,
        expenses: Vec<expense::Model>,
    ) -> Self {
        Self::new(group.id, group.total_budget, members, expenses)
    }

    /// Group id this ledger belongs to.
    #[must_use]
    pub const fn group_id(&self) -> i64 {
        self.group_id
    }

    /// Pledged budget.
    #[must_use]
    pub const fn total_budget(&self) -> f64 {
        self.total_budget
    }

    /// Roster, in insertion order.
    #[must_use]
    pub fn members(&self) -> &[member::Model] {
        &self.members
    }

    /// Expenses, in insertion order.
    #[must_use]
    pub fn expenses(&self) -> &[expense::Model] {
        &self.expenses
    }

    /// Looks up a member by id.
    #[must_use]
    pub fn member(&self, member_id: i64) -> Option<&member::Model> {
        self.members.iter().find(|m| m.id == member_id)
    }

    /// Sum of all member contributions.
    #[must_use]
    pub fn collected_amount(&self) -> f64 {
        self.members.iter().map(|m| m.contributed_amount).sum()
    }

    /// Running total of expense amounts.
    #[must_use]
    pub const fn total_expenses(&self) -> f64 {
        self.total_expenses
    }

    /// Cash on hand: collected minus spent.
    #[must_use]
    pub fn remaining_balance(&self) -> f64 {
        self.collected_amount() - self.total_expenses
    }

    /// Budget divided evenly across members.
    ///
    /// Returns 0 when the group has no members.
    #[must_use]
    pub fn per_member_share(&self) -> f64 {
        per_member_share(self.total_budget, self.members.len())
    }

    /// Validates an expense against this ledger without recording it.
    ///
    /// Beyond the field checks, the assignee must be one of the ledger's members.
    pub fn validate_expense(&self, new_expense: &NewExpense) -> Result<ExpenseCategory> {
        let category = new_expense.validate()?;
        if self.member(new_expense.member_id).is_none() {
            return Err(Error::InvalidExpense {
                reason: format!("assignee {} is not a member", new_expense.member_id),
            });
        }
        Ok(category)
    }

    /// Appends an expense and adds its amount to the running total.
    ///
    /// Fails with `InvalidExpense` (and leaves the ledger untouched) if the amount is
    /// not positive, the category is unknown, the description is empty, the assignee is
    /// not a member, or the id is already present.
    pub fn record_expense(&mut self, expense: expense::Model) -> Result<()> {
        validate_expense_fields(&expense.category, &expense.description, expense.amount)?;

        if self.member(expense.member_id).is_none() {
            return Err(Error::InvalidExpense {
                reason: format!("assignee {} is not a member", expense.member_id),
            });
        }

        if self.expenses.iter().any(|exp| exp.id == expense.id) {
            return Err(Error::InvalidExpense {
                reason: format!("expense {} already recorded", expense.id),
            });
        }

        self.total_expenses += expense.amount;
        self.expenses.push(expense);
        Ok(())
    }

    /// Removes an expense and subtracts its amount from the running total.
    pub fn remove_expense(&mut self, expense_id: i64) -> Result<expense::Model> {
        let index = self
            .expenses
            .iter()
            .position(|exp| exp.id == expense_id)
            .ok_or(Error::ExpenseNotFound { id: expense_id })?;

        let removed = self.expenses.remove(index);
        self.total_expenses -= removed.amount;
        Ok(removed)
    }

    /// Replaces the total budget. Collected and spent totals are unaffected.
    pub fn update_total_budget(&mut self, new_total: f64) -> Result<()> {
        validate_budget(new_total)?;
        self.total_budget = new_total;
        Ok(())
    }

    /// Sets a member's contributed amount (absolute, not a delta).
    pub fn set_contribution(&mut self, member_id: i64, amount: f64) -> Result<&member::Model> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::InvalidAmount { amount });
        }

        let member = self
            .members
            .iter_mut()
            .find(|m| m.id == member_id)
            .ok_or(Error::MemberNotFound { id: member_id })?;
        member.contributed_amount = amount;
        Ok(member)
    }

    /// Payment progress across the roster.
    #[must_use]
    pub fn progress(&self) -> ContributionProgress {
        contribution::aggregate_progress(&self.members)
    }

    /// Collected amount as a percentage of the budget, 0 when the budget is 0.
    #[must_use]
    pub fn collection_percentage(&self) -> f64 {
        share_of_budget(self.collected_amount(), self.total_budget)
    }

    /// Expenses keyed by category; every category is present.
    #[must_use]
    pub fn expenses_by_category(&self) -> BTreeMap<ExpenseCategory, Vec<expense::Model>> {
        category::group_by_category(&self.expenses)
    }

    /// Per-category totals, one entry per category in display order.
    #[must_use]
    pub fn category_totals(&self) -> Vec<CategoryTotal> {
        self.expenses_by_category()
            .into_iter()
            .map(|(category, items)| CategoryTotal {
                category,
                count: items.len(),
                total: items.iter().map(|exp| exp.amount).sum(),
            })
            .collect()
    }

    /// Captures every derived figure at once.
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        let collected_amount = self.collected_amount();
        let remaining_balance = self.remaining_balance();

        LedgerSnapshot {
            group_id: self.group_id,
            total_budget: self.total_budget,
            collected_amount,
            total_expenses: self.total_expenses,
            remaining_balance,
            per_member_share: self.per_member_share(),
            member_count: self.members.len(),
            expense_count: self.expenses.len(),
            collected_percentage: share_of_budget(collected_amount, self.total_budget),
            spent_percentage: share_of_budget(self.total_expenses, self.total_budget),
            remaining_percentage: share_of_budget(remaining_balance, self.total_budget),
            progress: self.progress(),
            categories: self.category_totals(),
        }
    }
}

/// `total_budget / member_count`, or 0 with no members.
#[must_use]
pub fn per_member_share(total_budget: f64, member_count: usize) -> f64 {
    if member_count == 0 {
        return 0.0;
    }

    // Cast safety: member counts are far below 2^52.
    #[allow(clippy::cast_precision_loss)]
    let count = member_count as f64;
    total_budget / count
}

/// `amount` as a percentage of `total_budget`, 0 when the budget is not positive.
#[must_use]
pub fn share_of_budget(amount: f64, total_budget: f64) -> f64 {
    if total_budget <= 0.0 {
        return 0.0;
    }
    (amount / total_budget) * 100.0
}

/// A budget must be a finite, non-negative number.
pub fn validate_budget(total_budget: f64) -> Result<()> {
    if !total_budget.is_finite() || total_budget < 0.0 {
        return Err(Error::InvalidAmount {
            amount: total_budget,
        });
    }
    Ok(())
}
