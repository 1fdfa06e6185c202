use std::{error::Error, sync::Arc};

use teloxide::{
    dispatching::UpdateHandler,
    prelude::*,
    types::{MessageId, ParseMode},
    utils::command::BotCommands,
};

use crate::{
    flow::Flow,
    keyboards::reply_markup,
    types::{Event, EventKind, Outbound},
};

pub type HandlerError = Box<dyn Error + Send + Sync>;
pub type HandlerResult = Result<(), HandlerError>;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "request a city service worker.")]
    Start,
    #[command(description = "cancel the current request.")]
    Cancel,
    #[command(description = "display this text.")]
    Help,
}

/// Username of the bot, so group commands like `/start@city_bot` parse.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BotName(pub String);

pub fn parse_command(text: &str, bot_name: &BotName) -> Option<Command> {
    Command::parse(text, &bot_name.0).ok()
}

pub fn schema() -> UpdateHandler<HandlerError> {
    let message_handler = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_map(|msg: Message, bot_name: BotName| {
                    parse_command(msg.text().unwrap_or_default(), &bot_name)
                })
                .endpoint(handle_command),
        )
        .endpoint(handle_message);

    dptree::entry()
        .branch(message_handler)
        .branch(Update::filter_callback_query().endpoint(handle_callback))
}

async fn handle_command(bot: Bot, msg: Message, command: Command, flow: Arc<Flow>) -> HandlerResult {
    let kind = match command {
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
            return Ok(());
        }
        Command::Start => EventKind::StartCommand,
        Command::Cancel => EventKind::CancelCommand,
    };

    let event = message_event(&msg, kind);
    log::info!("User {} sent {}", event.session_id, event.kind.name());
    deliver(&bot, msg.chat.id, None, flow.handle(event).await).await
}

async fn handle_message(bot: Bot, msg: Message, flow: Arc<Flow>) -> HandlerResult {
    let kind = match msg.location() {
        Some(location) => Some(EventKind::GeoInput {
            latitude: location.latitude,
            longitude: location.longitude,
        }),
        None => msg.text().and_then(text_event_kind),
    };
    let Some(kind) = kind else {
        log::debug!("Ignoring message {} in chat {}", msg.id.0, msg.chat.id.0);
        return Ok(());
    };

    let event = message_event(&msg, kind);
    deliver(&bot, msg.chat.id, None, flow.handle(event).await).await
}

async fn handle_callback(bot: Bot, q: CallbackQuery, flow: Arc<Flow>) -> HandlerResult {
    bot.answer_callback_query(q.id.clone()).await?;

    let (Some(data), Some(message)) = (q.data.clone(), q.message.as_ref()) else {
        return Ok(());
    };
    let event = Event::new(q.from.id.0.to_string(), EventKind::ServiceSelection { id: data })
        .with_sender(q.from.first_name.clone());
    let replies = flow.handle(event).await;
    deliver(&bot, message.chat.id, Some(message.id), replies).await
}

/// Unknown commands are not locations.
pub fn text_event_kind(text: &str) -> Option<EventKind> {
    if text.starts_with('/') {
        return None;
    }
    Some(EventKind::TextInput {
        text: text.to_string(),
    })
}

fn message_event(msg: &Message, kind: EventKind) -> Event {
    match msg.from() {
        Some(user) => Event::new(user.id.0.to_string(), kind).with_sender(user.first_name.clone()),
        None => Event::new(msg.chat.id.0.to_string(), kind),
    }
}

/// Sends `outbound`, or edits `origin` in place when the reply replaces it.
pub async fn send(
    bot: &Bot,
    chat_id: ChatId,
    origin: Option<MessageId>,
    outbound: Outbound,
) -> HandlerResult {
    if let (true, Some(message_id)) = (outbound.replaces_origin, origin) {
        bot.edit_message_text(chat_id, message_id, outbound.text)
            .parse_mode(ParseMode::Html)
            .await?;
        return Ok(());
    }

    let mut request = bot
        .send_message(chat_id, outbound.text)
        .parse_mode(ParseMode::Html);
    if let Some(markup) = reply_markup(&outbound.keyboard) {
        request = request.reply_markup(markup);
    }
    if outbound.disable_link_preview {
        request = request.disable_web_page_preview(true);
    }
    request.await?;
    Ok(())
}

async fn deliver(
    bot: &Bot,
    chat_id: ChatId,
    origin: Option<MessageId>,
    messages: Vec<Outbound>,
) -> HandlerResult {
    for outbound in messages {
        if let Err(err) = send(bot, chat_id, origin, outbound).await {
            log::error!("Can't send a message to chat {}: {:?}", chat_id.0, err);
            sentry::capture_error(err.as_ref());
            return Err(err);
        }
    }
    Ok(())
}
