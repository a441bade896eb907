//! In-memory stand-ins for TheMealDB and Telegram.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};

use mealdb_telegram_rs::data_backend::RecipeApi;
use mealdb_telegram_rs::data_types::mealdb_data_types::{
    IngredientSlot, MealDetail, MealSummary, INGREDIENT_SLOTS,
};
use mealdb_telegram_rs::data_types::{Alert, ChatKey, ScreenView, ViewHandle};
use mealdb_telegram_rs::errors::FetchError;
use mealdb_telegram_rs::navigator::{Navigator, ScreenSink};

pub const CHAT: ChatKey = 1337;

/// Scripted API. Each call pops the next queued result; a call can be held
/// back until the test releases its gate.
#[derive(Default)]
pub struct MockApi {
    menus: Mutex<VecDeque<Result<Vec<MealSummary>, FetchError>>>,
    surprises: Mutex<VecDeque<Result<MealDetail, FetchError>>>,
    pub menu_gate: Option<Arc<Semaphore>>,
    pub surprise_gate: Option<Arc<Semaphore>>,
    pub list_calls: AtomicUsize,
    pub random_calls: AtomicUsize,
}

impl MockApi {
    pub fn with_menu(self, result: Result<Vec<MealSummary>, FetchError>) -> Self {
        self.menus.lock().unwrap().push_back(result);
        self
    }

    pub fn with_surprise(self, result: Result<MealDetail, FetchError>) -> Self {
        self.surprises.lock().unwrap().push_back(result);
        self
    }

    pub fn gate_menu(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.menu_gate = Some(gate.clone());
        (self, gate)
    }

    pub fn gate_surprise(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.surprise_gate = Some(gate.clone());
        (self, gate)
    }
}

async fn pass(gate: &Option<Arc<Semaphore>>) {
    if let Some(gate) = gate {
        gate.acquire().await.expect("gate closed").forget();
    }
}

#[async_trait]
impl RecipeApi for MockApi {
    async fn list_meals(&self) -> Result<Vec<MealSummary>, FetchError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        pass(&self.menu_gate).await;
        self.menus
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(FetchError::EmptyMenu))
    }

    async fn random_meal(&self) -> Result<MealDetail, FetchError> {
        self.random_calls.fetch_add(1, Ordering::SeqCst);
        pass(&self.surprise_gate).await;
        self.surprises
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(FetchError::EmptySurprise))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Present(ViewHandle, ScreenView),
    Replace(ViewHandle, ScreenView),
    Alert(Alert),
}

/// Records everything the navigator shows. Message handles count up from 1.
#[derive(Default)]
pub struct RecordingSink {
    next_message: AtomicI32,
    events: Mutex<Vec<SinkEvent>>,
    replace_calls: AtomicUsize,
    hold: Option<Hold>,
}

// holds the nth replace until the gate opens
struct Hold {
    nth: usize,
    reached: Arc<Notify>,
    gate: Arc<Semaphore>,
}

impl RecordingSink {
    /// Sink whose `nth` replace (counting from 1) signals `reached` and then
    /// waits for a permit on the returned gate.
    pub fn holding_replace(nth: usize) -> (Self, Arc<Notify>, Arc<Semaphore>) {
        let reached = Arc::new(Notify::new());
        let gate = Arc::new(Semaphore::new(0));
        let sink = RecordingSink {
            hold: Some(Hold {
                nth,
                reached: reached.clone(),
                gate: gate.clone(),
            }),
            ..Default::default()
        };
        (sink, reached, gate)
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SinkEvent::Alert(alert) => Some(alert),
                _ => None,
            })
            .collect()
    }

    /// Latest view rendered into `message`.
    pub fn view_of(&self, message: ViewHandle) -> Option<ScreenView> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SinkEvent::Present(id, view) | SinkEvent::Replace(id, view) if id == message => {
                    Some(view)
                }
                _ => None,
            })
            .last()
    }
}

#[async_trait]
impl ScreenSink for RecordingSink {
    async fn present(&self, _chat: ChatKey, view: &ScreenView) -> anyhow::Result<ViewHandle> {
        let id = self.next_message.fetch_add(1, Ordering::SeqCst) + 1;
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::Present(id, view.clone()));
        Ok(id)
    }

    async fn replace(
        &self,
        _chat: ChatKey,
        message: ViewHandle,
        view: &ScreenView,
    ) -> anyhow::Result<()> {
        let call = self.replace_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(hold) = self.hold.as_ref().filter(|hold| hold.nth == call) {
            hold.reached.notify_one();
            hold.gate.acquire().await.expect("gate closed").forget();
        }
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::Replace(message, view.clone()));
        Ok(())
    }

    async fn alert(&self, _chat: ChatKey, alert: &Alert) -> anyhow::Result<()> {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::Alert(alert.clone()));
        Ok(())
    }
}

pub fn navigator(api: MockApi) -> (Navigator, Arc<MockApi>, Arc<RecordingSink>) {
    let api = Arc::new(api);
    let (nav, sink) = navigator_with(api.clone(), RecordingSink::default());
    (nav, api, sink)
}

pub fn navigator_with(api: Arc<dyn RecipeApi>, sink: RecordingSink) -> (Navigator, Arc<RecordingSink>) {
    let sink = Arc::new(sink);
    (Navigator::new(api, sink.clone()), sink)
}

pub fn summary(id: &str, name: &str, category: &str, area: &str) -> MealSummary {
    MealSummary {
        id: id.to_string(),
        name: name.to_string(),
        thumbnail: format!("https://www.themealdb.com/images/media/meals/{}.jpg", id),
        category: category.to_string(),
        area: area.to_string(),
    }
}

pub fn menu() -> Vec<MealSummary> {
    vec![
        summary("52768", "Apple Frangipan Tart", "Dessert", "British"),
        summary("52893", "Apple & Blackberry Crumble", "Dessert", "British"),
        summary("52977", "Corba", "Side", "Turkish"),
        summary("53049", "Apam balik", "Dessert", "Malaysian"),
        summary("52804", "Ayam Percik", "Chicken", "Malaysian"),
    ]
}

pub fn detail(id: &str, name: &str, ingredients: &[(&str, &str)]) -> MealDetail {
    let mut slots: [IngredientSlot; INGREDIENT_SLOTS] = Default::default();
    for (slot, (ingredient, measure)) in slots.iter_mut().zip(ingredients) {
        slot.ingredient = Some(ingredient.to_string());
        slot.measure = Some(measure.to_string());
    }
    MealDetail {
        id: id.to_string(),
        name: name.to_string(),
        thumbnail: format!("https://www.themealdb.com/images/media/meals/{}.jpg", id),
        category: "Beef".to_string(),
        area: "British".to_string(),
        instructions: "Preheat the oven to 200C.".to_string(),
        ingredients: slots,
    }
}
