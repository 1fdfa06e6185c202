use teloxide::types::{
    ButtonRequest, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup,
    KeyboardRemove, ReplyMarkup,
};

use crate::types::{Keyboard, KeyboardOption};

pub const SHARE_LOCATION_BUTTON: &str = "📍 Share My Location";
pub const CANCEL_BUTTON: &str = "❌ Cancel";

pub fn get_options_keyboard(options: &[KeyboardOption]) -> InlineKeyboardMarkup {
    let keyboard: Vec<Vec<InlineKeyboardButton>> = options
        .iter()
        .map(|option| {
            vec![InlineKeyboardButton::callback(
                option.label.clone(),
                option.value.clone(),
            )]
        })
        .collect();

    InlineKeyboardMarkup::new(keyboard)
}

pub fn get_location_keyboard() -> KeyboardMarkup {
    let mut keyboard: Vec<Vec<KeyboardButton>> = vec![];

    keyboard.push(vec![
        KeyboardButton::new(SHARE_LOCATION_BUTTON).request(ButtonRequest::Location)
    ]);
    keyboard.push(vec![KeyboardButton::new(CANCEL_BUTTON)]);

    KeyboardMarkup::new(keyboard)
        .resize_keyboard(true)
        .one_time_keyboard(true)
}

pub fn reply_markup(keyboard: &Keyboard) -> Option<ReplyMarkup> {
    match keyboard {
        Keyboard::None => None,
        Keyboard::InlineOptions(options) => Some(ReplyMarkup::InlineKeyboard(
            get_options_keyboard(options),
        )),
        Keyboard::LocationPrompt => Some(ReplyMarkup::Keyboard(get_location_keyboard())),
        Keyboard::Dismiss => Some(ReplyMarkup::KeyboardRemove(KeyboardRemove::new())),
    }
}
