use rand::Rng;
use teloxide::utils::markdown;

use crate::constants::{MAX_INSTRUCTIONS_CHARS, SURPRISE_LOADING_CAPTION};
use crate::data_types::{
    mealdb_data_types::{MealDetail, MealSummary},
    Alert, CallbackAction, ScreenView, ViewButton,
};
use crate::errors::FetchError;
use crate::screens::{loading_view, truncate_chars, ScreenState};

// entrance flourish, one is drawn per successful fetch
const FLOURISHES: [&str; 6] = ["🎲", "✨", "🎉", "🌟", "🥳", "💫"];

#[derive(Debug, Clone)]
pub struct RandomRecipeScreen {
    selected: MealSummary,
    state: ScreenState<MealDetail>,
    flourish: &'static str,
}

impl RandomRecipeScreen {
    /// Mounts the screen for the meal tapped on the menu. The first fetch
    /// is already pending.
    pub fn new(selected: MealSummary) -> Self {
        RandomRecipeScreen {
            selected,
            state: ScreenState::Loading,
            flourish: FLOURISHES[0],
        }
    }

    pub fn selected(&self) -> &MealSummary {
        &self.selected
    }

    pub fn state(&self) -> &ScreenState<MealDetail> {
        &self.state
    }

    /// "New surprise" / "retry". Refused while a fetch is still pending.
    pub fn request_fetch(&mut self) -> bool {
        if self.state.is_loading() {
            return false;
        }
        self.state = ScreenState::Loading;
        true
    }

    pub fn complete(&mut self, result: Result<MealDetail, FetchError>) -> Option<Alert> {
        let alert = self.state.complete(result);
        if self.state.data().is_some() {
            self.flourish = FLOURISHES[rand::thread_rng().gen_range(0..FLOURISHES.len())];
        }
        alert
    }

    pub fn view(&self) -> ScreenView {
        match &self.state {
            ScreenState::Loading => loading_view(SURPRISE_LOADING_CAPTION),
            ScreenState::Success(meal) => ScreenView {
                text: format!("{}\n\n{}", self.detail_text(meal), self.selected_text()),
                keyboard: vec![
                    vec![button("🎲 ¡Nueva Sorpresa!", CallbackAction::NewSurprise)],
                    vec![button("⬅️ Volver al menú", CallbackAction::BackToMenu)],
                ],
            },
            ScreenState::Error(_) => ScreenView {
                text: format!(
                    "{}\n\n{}",
                    markdown::escape("😔 No se pudo cargar el platillo"),
                    self.selected_text()
                ),
                keyboard: vec![
                    vec![button("🔄 Intentar de nuevo", CallbackAction::Retry)],
                    vec![button("⬅️ Volver al menú", CallbackAction::BackToMenu)],
                ],
            },
        }
    }

    fn detail_text(&self, meal: &MealDetail) -> String {
        let mut msg = format!(
            "{} {} {}\n",
            self.flourish,
            markdown::bold(&markdown::escape("¡PLATILLO SORPRESA!")),
            self.flourish
        );

        msg += &format!("\n{}\n", markdown::bold(&markdown::escape(&meal.name)));
        msg += &markdown::escape(&format!("🍽️ {}   🌍 {}", meal.category, meal.area));
        msg += "\n";
        if !meal.thumbnail.is_empty() {
            msg += &format!("{}\n", photo_link(&meal.thumbnail));
        }

        msg += &format!("\n{}\n", markdown::bold("🥘 Ingredientes"));
        for line in meal.ingredient_lines() {
            msg += &format!(" • {}\n", markdown::escape(&line));
        }

        msg += &format!("\n{}\n", markdown::bold("👨‍🍳 Preparación"));
        msg += &markdown::escape(&truncate_chars(
            meal.instructions.trim(),
            MAX_INSTRUCTIONS_CHARS,
        ));

        msg
    }

    fn selected_text(&self) -> String {
        let mut msg = format!(
            "{}\n{}",
            markdown::bold("📋 Platillo que seleccionaste:"),
            markdown::underline(&markdown::escape(&self.selected.name))
        );
        if !self.selected.category.is_empty() {
            msg += &format!("\n{}", markdown::italic(&markdown::escape(&self.selected.category)));
        }
        if !self.selected.thumbnail.is_empty() {
            msg += &format!("\n{}", photo_link(&self.selected.thumbnail));
        }
        msg
    }
}

// `markdown::link` escapes ')' and '`' in the url but not '\\'
fn photo_link(url: &str) -> String {
    markdown::link(&url.replace('\\', r"\\"), "🖼️ Foto")
}

fn button(label: &str, action: CallbackAction) -> ViewButton {
    ViewButton {
        label: label.to_string(),
        action,
    }
}
