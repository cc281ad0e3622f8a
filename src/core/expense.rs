//! Expense business logic - Recording and deleting group expenses.
//!
//! Recording validates first and writes nothing on failure. Both recording and
//! deleting move the group's `total_expenses` in the same transaction as the row.

use crate::{
    core::{group, ledger::NewExpense, member},
    entities::{Expense, expense},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Records an expense against a group.
///
/// Fails with `InvalidExpense` if the amount is not positive, the category is
/// unknown, the description is empty, or the assignee is not a member of the
/// group; fails with `GroupNotFound` for an unknown group. The category is stored
/// in its canonical label form.
#[instrument(skip(db))]
pub async fn record_expense<C>(
    db: &C,
    group_id: i64,
    new_expense: NewExpense,
) -> Result<expense::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let category = new_expense.validate()?;

    let txn = db.begin().await?;

    group::lock_group(&txn, group_id).await?;

    if member::get_member_by_id(&txn, group_id, new_expense.member_id)
        .await?
        .is_none()
    {
        return Err(Error::InvalidExpense {
            reason: format!(
                "assignee {} is not a member of this group",
                new_expense.member_id
            ),
        });
    }

    let receipt = new_expense
        .receipt
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());

    let expense_model = expense::ActiveModel {
        group_id: Set(group_id),
        category: Set(category.label().to_string()),
        description: Set(new_expense.description.trim().to_string()),
        amount: Set(new_expense.amount),
        member_id: Set(new_expense.member_id),
        date: Set(new_expense.date),
        receipt: Set(receipt),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = expense_model.insert(&txn).await?;

    group::adjust_group_totals(&txn, group_id, 0.0, result.amount).await?;

    txn.commit().await?;

    info!(
        group_id,
        expense_id = result.id,
        category = %category,
        amount = result.amount,
        "Recorded expense"
    );
    Ok(result)
}

/// Deletes an expense and takes its amount back out of the group's spent total.
///
/// Returns the deleted expense. Fails with `ExpenseNotFound` when the id does
/// not belong to the group.
#[instrument(skip(db))]
pub async fn delete_expense<C>(db: &C, group_id: i64, expense_id: i64) -> Result<expense::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    group::lock_group(&txn, group_id).await?;

    let existing = Expense::find_by_id(expense_id)
        .filter(expense::Column::GroupId.eq(group_id))
        .one(&txn)
        .await?
        .ok_or(Error::ExpenseNotFound { id: expense_id })?;

    let amount = existing.amount;
    existing.clone().delete(&txn).await?;

    group::adjust_group_totals(&txn, group_id, 0.0, -amount).await?;

    txn.commit().await?;

    info!(group_id, expense_id, amount, "Deleted expense");
    Ok(existing)
}

/// Finds an expense of `group_id` by ID.
pub async fn get_expense_by_id<C>(
    db: &C,
    group_id: i64,
    expense_id: i64,
) -> Result<Option<expense::Model>>
where
    C: ConnectionTrait,
{
    Expense::find_by_id(expense_id)
        .filter(expense::Column::GroupId.eq(group_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a group's expenses, oldest first by date.
pub async fn get_expenses_for_group<C>(db: &C, group_id: i64) -> Result<Vec<expense::Model>>
where
    C: ConnectionTrait,
{
    Expense::find()
        .filter(expense::Column::GroupId.eq(group_id))
        .order_by_asc(expense::Column::Date)
        .order_by_asc(expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
