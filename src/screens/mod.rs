pub mod footer;
pub mod menu_screen;
pub mod random_recipe_screen;
pub mod recipe_card;

use teloxide::utils::markdown;

use crate::data_types::{Alert, ScreenView};
use crate::errors::FetchError;

/// What a screen currently shows. A screen starts out `Loading`; only a
/// fetch completion moves it to `Success` or `Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> ScreenState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ScreenState::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Applies a fetch result. Returns the alert to show for failures, or
    /// `None` if the screen was not waiting for one.
    fn complete(&mut self, result: Result<T, FetchError>) -> Option<Alert> {
        if !self.is_loading() {
            log::warn!("Dropping fetch result for a screen that is not loading");
            return None;
        }

        match result {
            Ok(data) => {
                *self = ScreenState::Success(data);
                None
            }
            Err(e) => {
                let reason = e.to_string();
                *self = ScreenState::Error(reason.clone());
                Some(Alert::error(reason))
            }
        }
    }
}

pub fn loading_view(caption: &str) -> ScreenView {
    ScreenView {
        text: format!("⏳ {}", markdown::italic(&markdown::escape(caption))),
        keyboard: Vec::new(),
    }
}

pub fn alert_text(alert: &Alert) -> String {
    format!(
        "⚠️ {}\n{}",
        markdown::bold(&markdown::escape(&alert.title)),
        markdown::escape(&alert.message)
    )
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", text[..idx].trim_end()),
        None => text.to_string(),
    }
}
