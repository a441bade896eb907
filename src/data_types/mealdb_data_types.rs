use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Number of numbered ingredient/measure slots TheMealDB exposes per meal.
pub const INGREDIENT_SLOTS: usize = 20;

// TheMealDB sends `null` for most text fields it has no value for
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// `{"meals": [...]}` wrapper used by every endpoint. An absent or `null`
/// field means "no results".
#[derive(Deserialize, Debug)]
pub struct MealsEnvelope<T> {
    pub meals: Option<Vec<T>>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MealSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "strMealThumb", default, deserialize_with = "null_as_empty")]
    pub thumbnail: String,
    #[serde(rename = "strCategory", default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(rename = "strArea", default, deserialize_with = "null_as_empty")]
    pub area: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientSlot {
    pub ingredient: Option<String>,
    pub measure: Option<String>,
}

impl IngredientSlot {
    /// `"<ingredient> <measure>"`, trimmed. `None` for blank slots.
    pub fn display_line(&self) -> Option<String> {
        let ingredient = self.ingredient.as_deref()?;
        if ingredient.trim().is_empty() {
            return None;
        }
        let measure = self.measure.as_deref().unwrap_or_default();

        Some(format!("{} {}", ingredient, measure).trim().to_string())
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "RawMealDetail")]
pub struct MealDetail {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    pub category: String,
    pub area: String,
    pub instructions: String,
    pub ingredients: [IngredientSlot; INGREDIENT_SLOTS],
}

impl MealDetail {
    pub fn ingredient_lines(&self) -> Vec<String> {
        self.ingredients
            .iter()
            .filter_map(IngredientSlot::display_line)
            .collect()
    }
}

#[derive(Deserialize)]
struct RawMealDetail {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal", default, deserialize_with = "null_as_empty")]
    name: String,
    #[serde(rename = "strMealThumb", default, deserialize_with = "null_as_empty")]
    thumbnail: String,
    #[serde(rename = "strCategory", default, deserialize_with = "null_as_empty")]
    category: String,
    #[serde(rename = "strArea", default, deserialize_with = "null_as_empty")]
    area: String,
    #[serde(rename = "strInstructions", default, deserialize_with = "null_as_empty")]
    instructions: String,
    // strIngredient1..20, strMeasure1..20 and whatever else the API adds
    #[serde(flatten)]
    numbered: HashMap<String, Value>,
}

impl From<RawMealDetail> for MealDetail {
    fn from(mut raw: RawMealDetail) -> Self {
        let mut take = |key: String| match raw.numbered.remove(&key) {
            Some(Value::String(text)) => Some(text),
            _ => None,
        };

        let ingredients = std::array::from_fn(|i| IngredientSlot {
            ingredient: take(format!("strIngredient{}", i + 1)),
            measure: take(format!("strMeasure{}", i + 1)),
        });

        MealDetail {
            id: raw.id,
            name: raw.name,
            thumbnail: raw.thumbnail,
            category: raw.category,
            area: raw.area,
            instructions: raw.instructions,
            ingredients,
        }
    }
}
