use teloxide::utils::markdown;

use crate::constants::MENU_LOADING_CAPTION;
use crate::data_types::{mealdb_data_types::MealSummary, Alert, ScreenView, ViewButton};
use crate::errors::FetchError;
use crate::screens::{footer::footer, loading_view, recipe_card::recipe_card, ScreenState};

const GRID_COLUMNS: usize = 2;

#[derive(Debug, Clone)]
pub struct MenuScreen {
    state: ScreenState<Vec<MealSummary>>,
}

impl Default for MenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuScreen {
    pub fn new() -> Self {
        MenuScreen {
            state: ScreenState::Loading,
        }
    }

    pub fn state(&self) -> &ScreenState<Vec<MealSummary>> {
        &self.state
    }

    pub fn complete(&mut self, result: Result<Vec<MealSummary>, FetchError>) -> Option<Alert> {
        self.state.complete(result)
    }

    /// Cards in API order; empty unless the list loaded.
    pub fn cards(&self) -> Vec<ViewButton> {
        self.state
            .data()
            .map(|meals| meals.iter().map(recipe_card).collect())
            .unwrap_or_default()
    }

    /// Resolves a tapped card to the summary it was rendered from.
    pub fn select(&self, meal_id: &str) -> Option<MealSummary> {
        self.state
            .data()?
            .iter()
            .find(|meal| meal.id == meal_id)
            .cloned()
    }

    pub fn view(&self) -> ScreenView {
        if self.state.is_loading() {
            return loading_view(MENU_LOADING_CAPTION);
        }

        let mut text = format!(
            "{}\n{}\n\n",
            markdown::bold("🍽️ Nuestro Menú Especial"),
            markdown::italic("Descubre sabores únicos")
        );

        match &self.state {
            ScreenState::Loading => {}
            ScreenState::Success(meals) if meals.is_empty() => {
                text += &markdown::escape("Hoy no hay platillos en el menú.");
            }
            ScreenState::Success(meals) => {
                text += &markdown::escape(&format!(
                    "{} recetas, toca una para tu sorpresa 👆",
                    meals.len()
                ));
            }
            ScreenState::Error(_) => {
                text += &markdown::escape("😔 No hay recetas para mostrar. Usa /menu para intentarlo de nuevo.");
            }
        }
        text += &format!("\n\n{}", footer());

        let keyboard = self
            .cards()
            .chunks(GRID_COLUMNS)
            .map(|row| row.to_vec())
            .collect();

        ScreenView { text, keyboard }
    }
}
