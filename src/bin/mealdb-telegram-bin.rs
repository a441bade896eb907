use mealdb_telegram_rs::bot_command_handlers::{help, invalid_cmd, menu_cmd, start};
use mealdb_telegram_rs::constants::{DEFAULT_API_URL, DEFAULT_LETTER};
use mealdb_telegram_rs::data_backend::mealdb_client::MealDbClient;
use mealdb_telegram_rs::data_types::Command;
use mealdb_telegram_rs::navigator::Navigator;
use mealdb_telegram_rs::shared_main::{callback_handler, logger_init, TelegramSink};

use clap::Parser;
use log::log_enabled;
use std::sync::Arc;
use teloxide::{dispatching::UpdateHandler, prelude::*, utils::command::BotCommands};

/// Telegram bot that serves a menu from TheMealDB and answers every pick
/// with a surprise recipe.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// The telegram bot token to be used
    #[arg(short, long, env)]
    token: String,
    /// Enable verbose logging (mostly fetch timings){n}[SETS env: RUST_LOG=debug]
    #[arg(short, long)]
    verbose: bool,
    /// TheMealDB API base URL
    #[arg(long, env = "MEALDB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
    /// First letter of the meals shown on the menu
    #[arg(short, long, env = "MEALDB_LETTER", default_value_t = DEFAULT_LETTER)]
    letter: char,
}

#[tokio::main]
async fn main() {
    //// Args setup
    let args = Args::parse();

    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }

    logger_init(module_path!());
    log::info!("Starting bot...");

    if !(log_enabled!(log::Level::Debug) || log_enabled!(log::Level::Trace)) {
        log::info!("Enable verbose logging for fetch timings");
    }

    let bot = Bot::new(args.token);
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        log::warn!("Could not register bot commands: {}", e);
    }

    log::info!("Menu: {} (letter '{}')", args.api_url, args.letter);
    let api = Arc::new(MealDbClient::new(args.api_url, args.letter));
    let navigator = Navigator::new(api, Arc::new(TelegramSink::new(bot.clone())));

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![navigator])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(dptree::case![Command::Start].endpoint(start))
        .branch(dptree::case![Command::Menu].endpoint(menu_cmd))
        .branch(dptree::case![Command::Ayuda].endpoint(help));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(dptree::endpoint(invalid_cmd));

    let callback_query_handler = Update::filter_callback_query().endpoint(callback_handler);

    dptree::entry()
        .branch(message_handler)
        .branch(callback_query_handler)
}
