//! PickBuddy Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use teloxide::{prelude::*, types::{CallbackQuery, ChatMemberUpdated, Update}};
use teloxide::dispatching::UpdateHandler;
use tracing::{info, warn, error};

use PickBuddy::{
    config::Settings,
    utils::logging,
    database::{DatabaseService, connection::{self, create_pool, run_migrations}},
    services::ServiceFactory,
    handlers::{
        Command,
        handle_command,
        handle_callback_query,
        handle_message,
        handle_my_chat_member,
    },
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", PickBuddy::info());

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = create_pool(&connection::DatabaseConfig::from(&settings.database)).await?;

    // Run database migrations
    run_migrations(&db_pool).await?;

    let database_service = DatabaseService::new(db_pool);

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(bot.clone(), settings.clone(), database_service);

    // Publish command menus
    if let Err(e) = services.commands.register_group_commands().await {
        warn!(error = %e, "Failed to register group commands");
    }
    services.commands.grant_admin_commands(&settings.bot.admin_ids).await;

    // Wrap services in Arc for dependency injection
    let services_arc = Arc::new(services);

    let handler = create_handler();

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![services_arc])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    info!("PickBuddy bot is ready, starting polling...");

    dispatcher.dispatch().await;

    info!("PickBuddy bot has been shut down.");

    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::{HandlerExt, UpdateFilterExt};

    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    // Handle commands
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_commands),
                )
                .branch(
                    // Sync players and follow migrations
                    dptree::endpoint(handle_messages),
                ),
        )
        .branch(
            // Handle callback queries
            Update::filter_callback_query().endpoint(handle_callbacks),
        )
        .branch(
            // Handle my chat member updates (bot added/removed/promoted in groups)
            Update::filter_my_chat_member().endpoint(handle_chat_member_updates),
        )
}

/// Handle bot commands
async fn handle_commands(bot: Bot, msg: Message, cmd: Command, services: Arc<ServiceFactory>) -> HandlerResult {
    let services = (*services).clone();

    if let Err(e) = handle_command(bot, msg, cmd, services).await {
        error!(error = %e, "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(msg: Message, services: Arc<ServiceFactory>) -> HandlerResult {
    let services = (*services).clone();

    if let Err(e) = handle_message(msg, services).await {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }

    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(bot: Bot, query: CallbackQuery, services: Arc<ServiceFactory>) -> HandlerResult {
    let user_id = query.from.id.0 as i64;
    let services = (*services).clone();

    if let Err(e) = handle_callback_query(bot, query, services).await {
        error!(user_id = user_id, error = %e, "Error handling callback query");
        return Err(e.into());
    }

    Ok(())
}

/// Handle the bot's own chat member updates
async fn handle_chat_member_updates(update: ChatMemberUpdated, services: Arc<ServiceFactory>) -> HandlerResult {
    let services = (*services).clone();

    if let Err(e) = handle_my_chat_member(update, services).await {
        error!(error = %e, "Error handling chat member update");
        return Err(e.into());
    }

    Ok(())
}
