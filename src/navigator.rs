//! Screen flows: mounting screens, running their fetches in the background
//! and pushing the rendered result to the chat.

use std::{sync::Arc, time::Instant};

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::constants::{
    MENU_EXPIRED_MSG, MENU_LOADING_CAPTION, SCREEN_INACTIVE_MSG, SURPRISE_LOADING_CAPTION,
};
use crate::data_backend::RecipeApi;
use crate::data_types::{Alert, ChatKey, ScreenView, ViewHandle};
use crate::screen_registry::{Lease, RefetchOutcome, Route, ScreenRegistry, ScreenUpdate};
use crate::screens::loading_view;

/// Where rendered screens end up.
#[async_trait]
pub trait ScreenSink: Send + Sync {
    /// Shows `view` as a new message and returns its handle.
    async fn present(&self, chat: ChatKey, view: &ScreenView) -> anyhow::Result<ViewHandle>;

    /// Re-renders an already presented message.
    async fn replace(&self, chat: ChatKey, message: ViewHandle, view: &ScreenView)
        -> anyhow::Result<()>;

    async fn alert(&self, chat: ChatKey, alert: &Alert) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct Navigator {
    api: Arc<dyn RecipeApi>,
    sink: Arc<dyn ScreenSink>,
    registry: ScreenRegistry,
}

impl Navigator {
    pub fn new(api: Arc<dyn RecipeApi>, sink: Arc<dyn ScreenSink>) -> Self {
        Navigator {
            api,
            sink,
            registry: ScreenRegistry::new(),
        }
    }

    pub fn registry(&self) -> &ScreenRegistry {
        &self.registry
    }

    /// Mounts a fresh menu in `chat` and starts loading the meal list.
    pub async fn open_menu(&self, chat: ChatKey) -> anyhow::Result<JoinHandle<()>> {
        let message = self
            .sink
            .present(chat, &loading_view(MENU_LOADING_CAPTION))
            .await?;
        let lease = self.registry.mount_menu(chat, message).await;

        let nav = self.clone();
        let task = tokio::spawn(async move {
            let now = Instant::now();
            let result = nav.api.list_meals().await;
            log::debug!("Menu fetch for chat {}: {:.2?}", chat, now.elapsed());

            let render = nav.registry.render_lock(chat).await;
            let rendering = render.lock().await;
            let update = nav.registry.complete_menu(chat, lease, result).await;
            nav.show(chat, update).await;
            drop(rendering);
            drop(render);
            nav.registry.prune(chat).await;
        });

        self.registry
            .attach_task(chat, Route::Menu, lease, task.abort_handle())
            .await;
        Ok(task)
    }

    /// A recipe card was tapped: navigate to the random-recipe screen with
    /// the tapped meal as its parameter.
    pub async fn pick(&self, chat: ChatKey, meal_id: &str) -> anyhow::Result<Option<JoinHandle<()>>> {
        let Some(selected) = self.registry.selected_meal(chat, meal_id).await else {
            log::debug!("Chat {} picked {} from an inactive menu", chat, meal_id);
            self.sink
                .alert(chat, &Alert::notice(MENU_EXPIRED_MSG))
                .await?;
            return Ok(None);
        };

        let message = self
            .sink
            .present(chat, &loading_view(SURPRISE_LOADING_CAPTION))
            .await?;
        let lease = self.registry.mount_recipe(chat, message, selected).await;

        Ok(Some(self.spawn_surprise(chat, lease).await))
    }

    /// "New surprise" or "retry" on the recipe screen shown in `message`.
    pub async fn new_surprise(
        &self,
        chat: ChatKey,
        message: ViewHandle,
    ) -> anyhow::Result<Option<JoinHandle<()>>> {
        let render = self.registry.render_lock(chat).await;
        let _rendering = render.lock().await;
        let lease = match self.registry.refetch_recipe(chat, message).await {
            RefetchOutcome::Started(lease) => lease,
            RefetchOutcome::Busy => {
                log::debug!("Chat {} asked for a surprise while one is loading", chat);
                return Ok(None);
            }
            RefetchOutcome::Inactive => {
                self.sink
                    .alert(chat, &Alert::notice(SCREEN_INACTIVE_MSG))
                    .await?;
                return Ok(None);
            }
        };

        if let Err(e) = self
            .sink
            .replace(chat, message, &loading_view(SURPRISE_LOADING_CAPTION))
            .await
        {
            log::warn!("Could not show loading state in chat {}: {}", chat, e);
        }

        Ok(Some(self.spawn_surprise(chat, lease).await))
    }

    /// Leaves the recipe screen shown in `message`. The menu underneath is
    /// shown again as it was; without one a fresh menu is opened.
    pub async fn back_to_menu(
        &self,
        chat: ChatKey,
        message: ViewHandle,
    ) -> anyhow::Result<Option<JoinHandle<()>>> {
        let render = self.registry.render_lock(chat).await;
        let rendering = render.lock().await;
        let Some(view) = self.registry.pop_to_menu(chat, message).await else {
            drop(rendering);
            return Ok(Some(self.open_menu(chat).await?));
        };

        let shown = self.sink.replace(chat, message, &view).await;
        drop(rendering);
        drop(render);
        self.registry.prune(chat).await;
        shown?;
        Ok(None)
    }

    async fn spawn_surprise(&self, chat: ChatKey, lease: Lease) -> JoinHandle<()> {
        let nav = self.clone();
        let task = tokio::spawn(async move {
            let now = Instant::now();
            let result = nav.api.random_meal().await;
            log::debug!("Surprise fetch for chat {}: {:.2?}", chat, now.elapsed());

            let render = nav.registry.render_lock(chat).await;
            let rendering = render.lock().await;
            let update = nav.registry.complete_recipe(chat, lease, result).await;
            nav.show(chat, update).await;
            drop(rendering);
            drop(render);
            nav.registry.prune(chat).await;
        });

        self.registry
            .attach_task(chat, Route::RandomRecipe, lease, task.abort_handle())
            .await;
        task
    }

    async fn show(&self, chat: ChatKey, update: Option<ScreenUpdate>) {
        let Some(update) = update else {
            log::debug!("Dropping stale fetch result for chat {}", chat);
            return;
        };

        if let Err(e) = self.sink.replace(chat, update.message_id, &update.view).await {
            log::warn!("Could not update screen in chat {}: {}", chat, e);
        }
        if let Some(alert) = update.alert {
            log::info!("Fetch failed in chat {}: {}", chat, alert.message);
            if let Err(e) = self.sink.alert(chat, &alert).await {
                log::warn!("Could not send alert to chat {}: {}", chat, e);
            }
        }
    }
}
