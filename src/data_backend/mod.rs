use async_trait::async_trait;

use crate::data_types::mealdb_data_types::{MealDetail, MealSummary};
use crate::errors::FetchError;

pub mod mealdb_client;

/// Source of meal data for the screens.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Meals for the menu, in the order the backend returns them.
    async fn list_meals(&self) -> Result<Vec<MealSummary>, FetchError>;

    /// One randomly chosen meal.
    async fn random_meal(&self) -> Result<MealDetail, FetchError>;
}
