use festival_ledger::{
    api::{self, AppState},
    bot::{self, BotData},
    config::{database, group::load_config, settings::Settings},
    core::{group, report},
    errors::Result,
};
use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Settings and the group seed file
    let settings = Settings::from_env()?;
    let group_config = load_config(&settings.group_config_path)
        .inspect_err(|e| error!("Failed to load group config: {}", e))?;

    // 4. Database
    let db = database::create_connection(&settings.database_url).await?;
    database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    // 5. Seed the configured group on first start
    let (seeded, created) = group::seed_group(&db, &group_config).await?;
    if created {
        info!(group_id = seeded.id, "Seeded group '{}'", seeded.name);
    }

    let discrepancies = report::reconcile(&db, seeded.id).await?;
    for discrepancy in &discrepancies {
        warn!(group_id = seeded.id, ?discrepancy, "Ledger totals out of step");
    }

    // 6. Serve the API, plus the bot when a token is configured
    let api_server = api::serve(AppState { db: db.clone() }, settings.bind_address);

    match settings.discord_token {
        Some(token) => {
            let bot_data = BotData::new(db, seeded.id);
            tokio::try_join!(api_server, bot::run_bot(&token, bot_data))?;
        }
        None => {
            info!("DISCORD_BOT_TOKEN not set; running the API only");
            api_server.await?;
        }
    }

    Ok(())
}
