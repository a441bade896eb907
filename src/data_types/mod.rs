pub mod mealdb_data_types;

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "Ver el menú")]
    Menu,
    #[command(description = "Mostrar esta ayuda")]
    Ayuda,
    #[command(description = "off")]
    Start,
}

pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Telegram chat id, the key every mounted screen lives under.
pub type ChatKey = i64;
/// Message id of the bot message a screen is rendered into.
pub type ViewHandle = i32;

/// Inline keyboard actions, encoded as `cmd:arg` callback data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// A recipe card was tapped
    Pick(String),
    NewSurprise,
    Retry,
    BackToMenu,
}

impl CallbackAction {
    pub fn encode(&self) -> String {
        match self {
            CallbackAction::Pick(meal_id) => format!("pick:{}", meal_id),
            CallbackAction::NewSurprise => "surprise:".to_string(),
            CallbackAction::Retry => "retry:".to_string(),
            CallbackAction::BackToMenu => "menu:".to_string(),
        }
    }

    pub fn parse(data: &str) -> Option<Self> {
        let (cmd, arg) = data.split_once(':')?;
        match cmd {
            "pick" if !arg.is_empty() => Some(CallbackAction::Pick(arg.to_string())),
            "surprise" => Some(CallbackAction::NewSurprise),
            "retry" => Some(CallbackAction::Retry),
            "menu" => Some(CallbackAction::BackToMenu),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewButton {
    pub label: String,
    pub action: CallbackAction,
}

/// Rendered screen: MarkdownV2 text plus inline keyboard rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScreenView {
    pub text: String,
    pub keyboard: Vec<Vec<ViewButton>>,
}

impl ScreenView {
    pub fn buttons(&self) -> impl Iterator<Item = &ViewButton> {
        self.keyboard.iter().flatten()
    }
}

/// One-shot user-facing failure notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn error(message: impl Into<String>) -> Self {
        Alert {
            title: "Error".to_string(),
            message: message.into(),
        }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Alert {
            title: "Aviso".to_string(),
            message: message.into(),
        }
    }
}
