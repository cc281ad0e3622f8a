//! General Discord commands - ping and help.
//! These commands don't touch the database.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**FestivalLedger Help**\n\
        Here is a summary of all available commands.\n\n\
        **Budget**\n\
        • `/report` - Budget overview, category spending and collection progress.\n\
        • `/milestones` - Collection milestones and the projected completion date.\n\
        • `/set_budget <amount>` - Changes the group's total budget.\n\n\
        **Expenses**\n\
        • `/add_expense <category> <amount> <description> <assigned_to> [date] [receipt]` - Records an expense.\n\
        • `/delete_expense <id>` - Deletes an expense.\n\
        • `/expenses [category]` - Lists expenses.\n\n\
        **Members**\n\
        • `/members` - Shows the roster with contribution status.\n\
        • `/contribute <member> <amount>` - Records a payment from a member.\n\
        • `/set_role <member> <role>` - Changes a member's role.\n\n\
        **Marketplace**\n\
        • `/vendors [category] [sort]` - Browses community vendors.\n\
        • `/add_vendor <added_by> <name> <category> ...` - Lists a vendor (management only).\n\
        • `/verify_vendor <id>` - Marks a vendor as verified.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
