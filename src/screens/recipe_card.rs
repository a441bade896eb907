use crate::data_types::{mealdb_data_types::MealSummary, CallbackAction, ViewButton};

/// One menu grid cell. Tapping it hands the meal id back to the menu
/// screen, which resolves it to the untouched summary.
pub fn recipe_card(meal: &MealSummary) -> ViewButton {
    let mut label = String::new();
    if !meal.category.is_empty() {
        label += &format!("[{}] ", meal.category);
    }
    label += &meal.name;
    if !meal.area.is_empty() {
        label += &format!(" · 🌍 {}", meal.area);
    }

    ViewButton {
        label,
        action: CallbackAction::Pick(meal.id.clone()),
    }
}
