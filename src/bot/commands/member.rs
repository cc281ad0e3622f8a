//! Member Discord commands - `members`, `contribute` and `set_role`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{
            contribution::{self, ContributionStatus},
            member::{self, MemberRole},
            report::{self, MemberLine},
        },
        entities::member as member_entity,
        errors::{Error, Result},
    };
    use std::fmt::Write;

    const fn status_emoji(status: ContributionStatus) -> &'static str {
        match status {
            ContributionStatus::Paid => "✅",
            ContributionStatus::Partial => "🟡",
            ContributionStatus::Overdue => "🔴",
        }
    }

    async fn find_member(
        ctx: poise::Context<'_, BotData, Error>,
        name: &str,
    ) -> Result<Option<member_entity::Model>> {
        let data = ctx.data();
        let found = member::get_member_by_name(&data.database, data.group_id, name).await?;
        if found.is_none() {
            ctx.say(format!(
                "❌ '{name}' is not a member of this group. Use `/members` to see the roster."
            ))
            .await?;
        }
        Ok(found)
    }

    /// Shows the roster with each member's contribution status.
    #[poise::command(slash_command, prefix_command)]
    pub async fn members(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let roster = member::get_members_for_group(&data.database, data.group_id).await?;

        if roster.is_empty() {
            ctx.say("👥 No members yet.").await?;
            return Ok(());
        }

        let progress = contribution::aggregate_progress(&roster);
        let mut message = String::new();
        writeln!(
            &mut message,
            "👥 **Members** ({}/{} paid in full)",
            progress.paid_count, progress.total_members
        )?;
        for line in roster.iter().map(MemberLine::from) {
            writeln!(
                &mut message,
                "{} **{}** ({}) - {} / {} · {}",
                status_emoji(line.status),
                line.name,
                line.role,
                report::format_amount(line.contributed_amount),
                report::format_amount(line.expected_amount),
                line.status
            )?;
        }

        ctx.say(message).await?;
        Ok(())
    }

    /// Records a payment from a member on top of what they have already paid.
    #[poise::command(slash_command, prefix_command)]
    pub async fn contribute(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member who paid"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        member_name: String,
        #[description = "Amount paid"] amount: f64,
    ) -> Result<()> {
        let Some(found) = find_member(ctx, &member_name).await? else {
            return Ok(());
        };

        let data = ctx.data();
        let updated =
            member::record_contribution(&data.database, data.group_id, found.id, amount).await?;
        let status = updated.status();

        ctx.say(format!(
            "{} Recorded {} from {}. Contributed {} of {} ({})",
            status_emoji(status),
            report::format_amount(amount),
            updated.name,
            report::format_amount(updated.contributed_amount),
            report::format_amount(updated.expected_amount),
            status
        ))
        .await?;
        Ok(())
    }

    /// Changes a member's role.
    #[poise::command(slash_command, prefix_command)]
    pub async fn set_role(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to update"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        member_name: String,
        #[description = "New role"]
        #[autocomplete = "autocomplete::autocomplete_role"]
        role: String,
    ) -> Result<()> {
        let role: MemberRole = role.parse()?;
        let Some(found) = find_member(ctx, &member_name).await? else {
            return Ok(());
        };

        let data = ctx.data();
        let updated = member::change_role(&data.database, data.group_id, found.id, role).await?;

        ctx.say(format!("✅ {} is now {}", updated.name, role))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
