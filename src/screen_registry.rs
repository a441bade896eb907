use std::{collections::BTreeMap, sync::Arc};

use tokio::{sync::Mutex, task::AbortHandle};

use crate::data_types::{
    mealdb_data_types::{MealDetail, MealSummary},
    Alert, ChatKey, ScreenView, ViewHandle,
};
use crate::errors::FetchError;
use crate::screens::{menu_screen::MenuScreen, random_recipe_screen::RandomRecipeScreen};

/// Identifies one fetch of one mounted screen. Results carrying any other
/// lease than the screen's current one are dropped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Lease(u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Route {
    Menu,
    RandomRecipe,
}

/// Result of a completed fetch that still belongs to its screen.
#[derive(Debug, Clone)]
pub struct ScreenUpdate {
    pub message_id: ViewHandle,
    pub view: ScreenView,
    pub alert: Option<Alert>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RefetchOutcome {
    Started(Lease),
    /// a fetch for this screen is still pending
    Busy,
    /// the message does not belong to the mounted recipe screen
    Inactive,
}

// aborts the pending fetch when the screen goes away
struct FetchGuard(Option<AbortHandle>);

impl FetchGuard {
    // result applied, the task only renders from here on
    fn disarm(mut self) {
        self.0 = None;
    }
}

impl Drop for FetchGuard {
    fn drop(&mut self) {
        if let Some(handle) = self.0.take() {
            handle.abort();
        }
    }
}

struct Mounted<S> {
    screen: S,
    lease: Lease,
    message_id: ViewHandle,
    task: Option<FetchGuard>,
    /// result for the current lease has been applied
    settled: bool,
}

impl<S> Mounted<S> {
    fn new(screen: S, lease: Lease, message_id: ViewHandle) -> Self {
        Mounted {
            screen,
            lease,
            message_id,
            task: None,
            settled: false,
        }
    }

    fn attach(&mut self, lease: Lease, handle: AbortHandle) -> bool {
        if self.lease != lease {
            return false;
        }
        if !self.settled {
            self.task = Some(FetchGuard(Some(handle)));
        }
        true
    }

    fn settle(&mut self) {
        self.settled = true;
        if let Some(guard) = self.task.take() {
            guard.disarm();
        }
    }

    fn renew(&mut self, lease: Lease) {
        self.lease = lease;
        self.settled = false;
    }
}

#[derive(Default)]
struct ChatScreens {
    menu: Option<Mounted<MenuScreen>>,
    recipe: Option<Mounted<RandomRecipeScreen>>,
    /// serializes everything that edits this chat's messages
    render: Arc<Mutex<()>>,
}

impl ChatScreens {
    fn is_idle(&self) -> bool {
        self.menu.is_none() && self.recipe.is_none() && Arc::strong_count(&self.render) == 1
    }
}

#[derive(Default)]
struct RegistryInner {
    next_lease: u64,
    chats: BTreeMap<ChatKey, ChatScreens>,
}

impl RegistryInner {
    fn lease(&mut self) -> Lease {
        self.next_lease += 1;
        Lease(self.next_lease)
    }

    fn chat(&mut self, chat: ChatKey) -> &mut ChatScreens {
        self.chats.entry(chat).or_default()
    }
}

/// Screens currently mounted in each chat. At most one menu and one
/// random-recipe screen per chat.
#[derive(Clone, Default)]
pub struct ScreenRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl ScreenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock to hold while applying a state change and rendering it, so
    /// edits of the same message land in the order the changes were made.
    pub async fn render_lock(&self, chat: ChatKey) -> Arc<Mutex<()>> {
        let mut inner = self.inner.lock().await;
        inner.chat(chat).render.clone()
    }

    /// Forgets a chat that has nothing mounted and nobody rendering.
    pub async fn prune(&self, chat: ChatKey) {
        let mut inner = self.inner.lock().await;
        if inner.chats.get(&chat).map_or(false, ChatScreens::is_idle) {
            inner.chats.remove(&chat);
        }
    }

    /// Mounts a fresh, loading menu. Whatever was mounted in the chat
    /// before is unmounted and its pending fetches are aborted.
    pub async fn mount_menu(&self, chat: ChatKey, message_id: ViewHandle) -> Lease {
        let mut inner = self.inner.lock().await;
        let lease = inner.lease();
        let screens = inner.chat(chat);
        screens.recipe = None;
        screens.menu = Some(Mounted::new(MenuScreen::new(), lease, message_id));
        lease
    }

    /// Mounts a fresh, loading random-recipe screen on top of the menu.
    pub async fn mount_recipe(
        &self,
        chat: ChatKey,
        message_id: ViewHandle,
        selected: MealSummary,
    ) -> Lease {
        let mut inner = self.inner.lock().await;
        let lease = inner.lease();
        inner.chat(chat).recipe = Some(Mounted::new(
            RandomRecipeScreen::new(selected),
            lease,
            message_id,
        ));
        lease
    }

    /// Ties a spawned fetch to its screen. If the screen has already moved
    /// on, the task is aborted right away.
    pub async fn attach_task(&self, chat: ChatKey, route: Route, lease: Lease, handle: AbortHandle) {
        let mut inner = self.inner.lock().await;
        let attached = match (route, inner.chats.get_mut(&chat)) {
            (_, None) => false,
            (Route::Menu, Some(screens)) => screens
                .menu
                .as_mut()
                .map_or(false, |m| m.attach(lease, handle.clone())),
            (Route::RandomRecipe, Some(screens)) => screens
                .recipe
                .as_mut()
                .map_or(false, |m| m.attach(lease, handle.clone())),
        };

        if !attached {
            log::debug!("{:?} fetch for chat {} outlived its screen", route, chat);
            handle.abort();
        }
    }

    pub async fn complete_menu(
        &self,
        chat: ChatKey,
        lease: Lease,
        result: Result<Vec<MealSummary>, FetchError>,
    ) -> Option<ScreenUpdate> {
        let mut inner = self.inner.lock().await;
        let mounted = inner.chats.get_mut(&chat)?.menu.as_mut()?;
        if mounted.lease != lease {
            return None;
        }

        mounted.settle();
        let alert = mounted.screen.complete(result);
        Some(ScreenUpdate {
            message_id: mounted.message_id,
            view: mounted.screen.view(),
            alert,
        })
    }

    pub async fn complete_recipe(
        &self,
        chat: ChatKey,
        lease: Lease,
        result: Result<MealDetail, FetchError>,
    ) -> Option<ScreenUpdate> {
        let mut inner = self.inner.lock().await;
        let mounted = inner.chats.get_mut(&chat)?.recipe.as_mut()?;
        if mounted.lease != lease {
            return None;
        }

        mounted.settle();
        let alert = mounted.screen.complete(result);
        Some(ScreenUpdate {
            message_id: mounted.message_id,
            view: mounted.screen.view(),
            alert,
        })
    }

    /// Summary behind a tapped card of the mounted menu.
    pub async fn selected_meal(&self, chat: ChatKey, meal_id: &str) -> Option<MealSummary> {
        let inner = self.inner.lock().await;
        inner.chats.get(&chat)?.menu.as_ref()?.screen.select(meal_id)
    }

    /// Puts the recipe screen rendered in `message_id` back into loading.
    pub async fn refetch_recipe(&self, chat: ChatKey, message_id: ViewHandle) -> RefetchOutcome {
        let mut inner = self.inner.lock().await;
        let lease = inner.lease();
        let Some(mounted) = inner
            .chats
            .get_mut(&chat)
            .and_then(|screens| screens.recipe.as_mut())
            .filter(|mounted| mounted.message_id == message_id)
        else {
            return RefetchOutcome::Inactive;
        };

        if !mounted.screen.request_fetch() {
            return RefetchOutcome::Busy;
        }
        mounted.renew(lease);
        RefetchOutcome::Started(lease)
    }

    /// Unmounts the recipe screen rendered in `message_id` and moves the
    /// menu into that message. Returns the menu view to show there, or
    /// `None` if there is no such recipe screen or no menu to return to.
    pub async fn pop_to_menu(&self, chat: ChatKey, message_id: ViewHandle) -> Option<ScreenView> {
        let mut inner = self.inner.lock().await;
        let screens = inner.chats.get_mut(&chat)?;
        if screens.recipe.as_ref()?.message_id != message_id {
            return None;
        }
        screens.recipe = None;

        let menu = screens.menu.as_mut()?;
        menu.message_id = message_id;
        Some(menu.screen.view())
    }

    pub async fn menu(&self, chat: ChatKey) -> Option<MenuScreen> {
        let inner = self.inner.lock().await;
        Some(inner.chats.get(&chat)?.menu.as_ref()?.screen.clone())
    }

    pub async fn recipe(&self, chat: ChatKey) -> Option<RandomRecipeScreen> {
        let inner = self.inner.lock().await;
        Some(inner.chats.get(&chat)?.recipe.as_ref()?.screen.clone())
    }

    pub async fn message_of(&self, chat: ChatKey, route: Route) -> Option<ViewHandle> {
        let inner = self.inner.lock().await;
        let screens = inner.chats.get(&chat)?;
        match route {
            Route::Menu => screens.menu.as_ref().map(|m| m.message_id),
            Route::RandomRecipe => screens.recipe.as_ref().map(|m| m.message_id),
        }
    }
}
