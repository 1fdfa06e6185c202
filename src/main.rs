use std::error::Error;
use std::sync::Arc;

use city_services::{
    catalog::ServiceCatalog,
    config::Config,
    dispatch::LogDispatcher,
    flow::Flow,
    machine::ConversationMachine,
    storage::SessionStore,
    templates::Templates,
    transport::{self, BotName},
};
use teloxide::{error_handlers::LoggingErrorHandler, prelude::*};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    log::info!("Starting...");
    let config = Config::init();
    log::info!("Initialized config...");

    let _sentry = config.sentry_url.as_deref().map(sentry::init);

    let templates = Templates::new()?;
    let machine = ConversationMachine::new(
        Arc::new(ServiceCatalog::city_services()),
        templates,
        config.location_input,
    );
    let flow = Arc::new(Flow::new(
        machine,
        SessionStore::new(),
        Arc::new(LogDispatcher),
    ));
    log::info!("Accepting {} locations...", config.location_input);

    let bot = Bot::new(config.bot_token);
    let me = bot.get_me().await?;
    let bot_name = BotName(me.user.username.clone().unwrap_or_default());
    log::info!("Running as @{}...", bot_name.0);

    log::info!("Started listening...");
    Dispatcher::builder(bot, transport::schema())
        .dependencies(dptree::deps![flow, bot_name])
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Exception while handling an update",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
