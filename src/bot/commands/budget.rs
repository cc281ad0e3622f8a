//! Budget Discord commands - `report`, `milestones` and `set_budget`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::{group, report},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;

    const EMBED_COLOR: u32 = 0x00F3_9C12;

    /// Shows the budget overview of the group.
    ///
    /// The embed covers the four headline numbers, collection progress, spending
    /// per category and the milestone row.
    #[poise::command(slash_command, prefix_command)]
    pub async fn report(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let today = chrono::Local::now().date_naive();
        let group_report = report::generate_group_report(&data.database, data.group_id, today).await?;
        let snapshot = &group_report.ledger;
        let progress = &snapshot.progress;

        let mut overview = String::new();
        writeln!(
            &mut overview,
            "**Total Budget:** {}",
            report::format_amount(snapshot.total_budget)
        )?;
        writeln!(
            &mut overview,
            "**Collected:** {} ({:.1}%)",
            report::format_amount(snapshot.collected_amount),
            snapshot.collected_percentage
        )?;
        writeln!(
            &mut overview,
            "**Spent:** {} ({:.1}%)",
            report::format_amount(snapshot.total_expenses),
            snapshot.spent_percentage
        )?;
        writeln!(
            &mut overview,
            "**Remaining:** {}",
            report::format_amount(snapshot.remaining_balance)
        )?;
        write!(
            &mut overview,
            "**Per Member Share:** {}",
            report::format_amount(snapshot.per_member_share)
        )?;

        let mut collection = String::new();
        writeln!(
            &mut collection,
            "{}",
            report::format_progress_bar(snapshot.collected_percentage, Some(10))
        )?;
        write!(
            &mut collection,
            "✅ {} paid · 🟡 {} partial · 🔴 {} overdue",
            progress.paid_count, progress.partial_count, progress.overdue_count
        )?;

        let mut spending = String::new();
        for total in snapshot.categories.iter().filter(|t| t.count > 0) {
            writeln!(
                &mut spending,
                "**{}:** {} ({} item{})",
                total.category,
                report::format_amount(total.total),
                total.count,
                if total.count == 1 { "" } else { "s" }
            )?;
        }
        if spending.is_empty() {
            spending.push_str("No expenses recorded yet.");
        }

        let embed = serenity::CreateEmbed::default()
            .title(format!("📊 {}", group_report.group_name))
            .description(format!("As of {}", today.format("%Y-%m-%d")))
            .color(EMBED_COLOR)
            .field("Overview", overview, false)
            .field("Collection", collection, false)
            .field("Spending by Category", spending, false)
            .field(
                "Milestones",
                report::format_milestones(&group_report.collection_milestones),
                false,
            )
            .footer(serenity::CreateEmbedFooter::new(format!(
                "{} member{} | {} expense{}",
                snapshot.member_count,
                if snapshot.member_count == 1 { "" } else { "s" },
                snapshot.expense_count,
                if snapshot.expense_count == 1 { "" } else { "s" }
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows which collection milestones have been reached and a rough completion date.
    #[poise::command(slash_command, prefix_command)]
    pub async fn milestones(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let today = chrono::Local::now().date_naive();
        let group_report = report::generate_group_report(&data.database, data.group_id, today).await?;
        let progress = &group_report.ledger.progress;

        let mut message = String::new();
        writeln!(&mut message, "🎯 **Collection Milestones**")?;
        writeln!(
            &mut message,
            "Members paid in full: {}/{} ({:.1}%)",
            progress.paid_count, progress.total_members, progress.percentage_complete
        )?;
        writeln!(
            &mut message,
            "{}",
            report::format_milestones(&group_report.member_milestones)
        )?;
        if let Some(next) = group_report.next_milestone {
            writeln!(&mut message, "Next milestone: {next}%")?;
        }
        write!(
            &mut message,
            "Projected completion: {}",
            report::format_completion(&group_report.projected_completion)
        )?;

        ctx.say(message).await?;
        Ok(())
    }

    /// Changes the group's total budget.
    ///
    /// Collected and spent totals are not affected, and members' expected
    /// amounts stay as they are.
    #[poise::command(slash_command, prefix_command)]
    pub async fn set_budget(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "New total budget"] amount: f64,
    ) -> Result<()> {
        let data = ctx.data();
        let old = group::require_group(&data.database, data.group_id).await?;
        let updated = group::update_total_budget(&data.database, data.group_id, amount).await?;

        ctx.say(format!(
            "✅ Total budget changed from {} to {}",
            report::format_amount(old.total_budget),
            report::format_amount(updated.total_budget)
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
