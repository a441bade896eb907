use std::time::Instant;

use async_trait::async_trait;

use crate::data_backend::RecipeApi;
use crate::data_types::mealdb_data_types::{MealDetail, MealSummary, MealsEnvelope};
use crate::errors::FetchError;

#[derive(Debug, Clone)]
pub struct MealDbClient {
    client: reqwest::Client,
    api_url: String,
    letter: char,
}

impl MealDbClient {
    pub fn new(api_url: impl Into<String>, letter: char) -> Self {
        MealDbClient {
            client: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            letter,
        }
    }

    async fn get_text(&self, endpoint: &str, query: &[(&str, String)]) -> Result<String, FetchError> {
        let now = Instant::now();
        let body = self
            .client
            .get(format!("{}/{}", self.api_url, endpoint))
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        log::debug!("TheMealDB {} response: {:.2?}", endpoint, now.elapsed());
        Ok(body)
    }
}

#[async_trait]
impl RecipeApi for MealDbClient {
    async fn list_meals(&self) -> Result<Vec<MealSummary>, FetchError> {
        let body = self
            .get_text("search.php", &[("f", self.letter.to_string())])
            .await?;
        parse_meal_list(&body)
    }

    async fn random_meal(&self) -> Result<MealDetail, FetchError> {
        let body = self.get_text("random.php", &[]).await?;
        parse_random_meal(&body)
    }
}

pub fn parse_meal_list(body: &str) -> Result<Vec<MealSummary>, FetchError> {
    let envelope: MealsEnvelope<MealSummary> = serde_json::from_str(body)?;
    envelope.meals.ok_or(FetchError::EmptyMenu)
}

pub fn parse_random_meal(body: &str) -> Result<MealDetail, FetchError> {
    let envelope: MealsEnvelope<MealDetail> = serde_json::from_str(body)?;
    envelope
        .meals
        .and_then(|meals| meals.into_iter().next())
        .ok_or(FetchError::EmptySurprise)
}
