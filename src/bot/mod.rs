//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the `FestivalLedger` application,
//! including all slash commands, autocomplete handlers, and bot startup. Every
//! command works on the one group the bot was started for.

/// Discord command implementations (general, budget, expense, member, vendor)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::errors::{Error, Result};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// This structure holds the database connection and the group the
/// commands operate on.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Group managed from this Discord server
    pub group_id: i64,
}

impl BotData {
    /// Creates a new `BotData` instance for `group_id`.
    #[must_use]
    pub const fn new(database: DatabaseConnection, group_id: i64) -> Self {
        Self { database, group_id }
    }
}

/// Every command the bot registers.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::ping(),
        commands::help(),
        commands::report(),
        commands::milestones(),
        commands::set_budget(),
        commands::add_expense(),
        commands::delete_expense(),
        commands::expenses(),
        commands::members(),
        commands::contribute(),
        commands::set_role(),
        commands::vendors(),
        commands::add_vendor(),
        commands::verify_vendor(),
    ]
}

/// Replies with the error when the user can fix it; logs everything else.
async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            let reply = if error.is_validation()
                || error.is_not_found()
                || matches!(error, Error::NotPermitted { .. })
            {
                format!("❌ {error}")
            } else {
                error!("Error in command `{}`: {:?}", ctx.command().name, error);
                "❌ Something went wrong while handling that command.".to_string()
            };
            if let Err(e) = ctx.say(reply).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Connects to Discord and runs the bot until the connection closes.
#[instrument(skip(token, data))]
pub async fn run_bot(token: &str, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Registered {} commands globally", framework.options().commands.len());
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Starting Discord client...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;
    client.start().await?;
    Ok(())
}
