use anyhow::Result;
use dotenvy::dotenv;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;

use filtro_do_lula::core::{config, init_logger};
use filtro_do_lula::filter::overlay;
use filtro_do_lula::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point for the Telegram bot
///
/// # Errors
/// Returns an error if initialization fails (logging, overlay asset, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    // Set up global panic handler to catch panics in dispatcher tasks,
    // so they end up in the log instead of only on stderr
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    // Load environment variables from .env if present
    let _ = dotenv();

    run_bot().await
}

/// Run the Telegram bot
async fn run_bot() -> Result<()> {
    log::info!("Starting bot...");

    // The overlay is mandatory: without it no request can succeed, so a
    // missing or corrupt asset aborts startup instead of failing the first
    // user request.
    overlay::init().map_err(|e| anyhow::anyhow!("Cannot start without the overlay asset: {}", e))?;

    // Create bot instance
    let bot = create_bot()?;

    let bot_info = bot.get_me().await?;
    log::info!("Bot username: {:?}, Bot ID: {}", bot_info.username, bot_info.id);

    // Set up bot commands in the Telegram UI
    setup_bot_commands(&bot).await?;

    // Shared download client; one pool for all concurrent photo fetches
    let http = reqwest::Client::builder().timeout(config::network::timeout()).build()?;

    // Create the dispatcher handler tree
    let handler = schema(HandlerDeps::new(http));

    log::info!("Starting bot in long polling mode");
    log::info!("Ready to receive updates!");

    // Create polling listener that drops pending updates on start
    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

    Dispatcher::builder(bot, handler)
        .dependencies(DependencyMap::new())
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    Ok(())
}
