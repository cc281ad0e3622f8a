//! Expense Discord commands - `add_expense`, `delete_expense` and `expenses`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{category::ExpenseCategory, expense, ledger::NewExpense, member, report},
        errors::{Error, Result},
    };
    use chrono::NaiveDate;
    use std::{collections::HashMap, fmt::Write};

    /// Discord rejects messages longer than this
    const MESSAGE_LIMIT: usize = 1900;

    fn parse_date(input: Option<&str>) -> Result<NaiveDate> {
        match input {
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                Error::Validation {
                    message: format!("'{raw}' is not a date in YYYY-MM-DD form"),
                }
            }),
            None => Ok(chrono::Local::now().date_naive()),
        }
    }

    /// Records an expense for the group.
    ///
    /// The date defaults to today. The assignee is the member responsible for
    /// the purchase.
    #[poise::command(slash_command, prefix_command)]
    pub async fn add_expense(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Expense category"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: String,
        #[description = "Amount spent"] amount: f64,
        #[description = "What the money was spent on"] description: String,
        #[description = "Member responsible for the expense"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        assigned_to: String,
        #[description = "Date (YYYY-MM-DD), defaults to today"] date: Option<String>,
        #[description = "Receipt reference or link"] receipt: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let db = &data.database;

        let date = parse_date(date.as_deref())?;

        let Some(assignee) = member::get_member_by_name(db, data.group_id, &assigned_to).await?
        else {
            ctx.say(format!(
                "❌ '{assigned_to}' is not a member of this group. Use `/members` to see the roster."
            ))
            .await?;
            return Ok(());
        };

        let created = expense::record_expense(
            db,
            data.group_id,
            NewExpense {
                category,
                description,
                amount,
                member_id: assignee.id,
                date,
                receipt,
            },
        )
        .await?;

        ctx.say(format!(
            "✅ Recorded {} for {} - {} (Expense ID: {})",
            report::format_amount(created.amount),
            created.category,
            created.description,
            created.id
        ))
        .await?;
        Ok(())
    }

    /// Deletes an expense by its ID.
    #[poise::command(slash_command, prefix_command)]
    pub async fn delete_expense(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Expense ID (see /expenses)"] expense_id: i64,
    ) -> Result<()> {
        let data = ctx.data();
        let deleted = expense::delete_expense(&data.database, data.group_id, expense_id).await?;

        ctx.say(format!(
            "🗑️ Deleted expense #{} ({} for {})",
            deleted.id,
            report::format_amount(deleted.amount),
            deleted.category
        ))
        .await?;
        Ok(())
    }

    /// Lists the group's expenses, optionally for one category only.
    #[poise::command(slash_command, prefix_command)]
    pub async fn expenses(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only show this category"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let db = &data.database;

        let filter = category
            .as_deref()
            .map(str::parse::<ExpenseCategory>)
            .transpose()?;

        let names: HashMap<i64, String> = member::get_members_for_group(db, data.group_id)
            .await?
            .into_iter()
            .map(|m| (m.id, m.name))
            .collect();

        let listed: Vec<_> = expense::get_expenses_for_group(db, data.group_id)
            .await?
            .into_iter()
            .filter(|exp| filter.is_none_or(|cat| exp.category == cat.label()))
            .collect();

        if listed.is_empty() {
            ctx.say("📋 No expenses recorded yet.").await?;
            return Ok(());
        }

        let total: f64 = listed.iter().map(|exp| exp.amount).sum();
        let mut message = String::new();
        writeln!(
            &mut message,
            "📋 **Expenses** ({} total)\n```",
            report::format_amount(total)
        )?;
        let mut shown = 0;
        for exp in &listed {
            let assignee = names.get(&exp.member_id).map_or("Unknown", String::as_str);
            let line = report::format_expense_line(exp, assignee);
            if message.len() + line.len() > MESSAGE_LIMIT {
                break;
            }
            writeln!(&mut message, "{line}")?;
            shown += 1;
        }
        message.push_str("```");
        if shown < listed.len() {
            write!(&mut message, "\n…and {} more", listed.len() - shown)?;
        }

        ctx.say(message).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
