use std::env;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide_core::types::{InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode};

use crate::data_types::{Alert, CallbackAction, ChatKey, HandlerResult, ScreenView, ViewHandle};
use crate::navigator::{Navigator, ScreenSink};
use crate::screens::alert_text;

pub fn logger_init(module_path: &str) {
    let crate_level =
        if env::var(pretty_env_logger::env_logger::DEFAULT_FILTER_ENV).unwrap_or_default() == "debug" {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };

    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        .filter_module(module_path, crate_level)
        .filter_module("mealdb_telegram_rs", crate_level)
        .init();
}

pub fn make_inline_keyboard(view: &ScreenView) -> InlineKeyboardMarkup {
    let keyboard = view.keyboard.iter().map(|row| {
        row.iter()
            .map(|button| InlineKeyboardButton::callback(&button.label, button.action.encode()))
            .collect::<Vec<_>>()
    });
    InlineKeyboardMarkup::new(keyboard)
}

/// Renders screens as MarkdownV2 messages with inline keyboards.
pub struct TelegramSink {
    bot: Bot,
}

impl TelegramSink {
    pub fn new(bot: Bot) -> Self {
        TelegramSink { bot }
    }
}

#[async_trait]
impl ScreenSink for TelegramSink {
    async fn present(&self, chat: ChatKey, view: &ScreenView) -> anyhow::Result<ViewHandle> {
        let msg = self
            .bot
            .send_message(ChatId(chat), view.text.clone())
            .parse_mode(ParseMode::MarkdownV2)
            .reply_markup(make_inline_keyboard(view))
            .await?;
        Ok(msg.id.0)
    }

    async fn replace(
        &self,
        chat: ChatKey,
        message: ViewHandle,
        view: &ScreenView,
    ) -> anyhow::Result<()> {
        self.bot
            .edit_message_text(ChatId(chat), MessageId(message), view.text.clone())
            .parse_mode(ParseMode::MarkdownV2)
            .reply_markup(make_inline_keyboard(view))
            .await?;
        Ok(())
    }

    async fn alert(&self, chat: ChatKey, alert: &Alert) -> anyhow::Result<()> {
        self.bot
            .send_message(ChatId(chat), alert_text(alert))
            .parse_mode(ParseMode::MarkdownV2)
            .await?;
        Ok(())
    }
}

pub async fn callback_handler(bot: Bot, q: CallbackQuery, navigator: Navigator) -> HandlerResult {
    if let Some(q_data) = q.data {
        // acknowledge callback query to remove the loading alert
        bot.answer_callback_query(q.id).await?;

        if let Some(message) = q.message {
            let chat = message.chat.id.0;
            let message_id = message.id.0;

            match CallbackAction::parse(&q_data) {
                Some(CallbackAction::Pick(meal_id)) => {
                    navigator.pick(chat, &meal_id).await?;
                }
                Some(CallbackAction::NewSurprise | CallbackAction::Retry) => {
                    navigator.new_surprise(chat, message_id).await?;
                }
                Some(CallbackAction::BackToMenu) => {
                    navigator.back_to_menu(chat, message_id).await?;
                }
                None => log::warn!("Unknown callback query data: {}", q_data),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::ViewButton;

    #[test]
    fn keyboard_keeps_rows_and_callback_data() {
        let view = ScreenView {
            text: String::new(),
            keyboard: vec![
                vec![
                    ViewButton {
                        label: "Corba".to_string(),
                        action: CallbackAction::Pick("52977".to_string()),
                    },
                    ViewButton {
                        label: "Kumpir".to_string(),
                        action: CallbackAction::Pick("52978".to_string()),
                    },
                ],
                vec![ViewButton {
                    label: "⬅️ Volver al menú".to_string(),
                    action: CallbackAction::BackToMenu,
                }],
            ],
        };

        let markup = make_inline_keyboard(&view);
        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(markup.inline_keyboard[0].len(), 2);
        assert_eq!(markup.inline_keyboard[0][1].text, "Kumpir");
        assert_eq!(markup.inline_keyboard[1][0].text, "⬅️ Volver al menú");
    }
}
