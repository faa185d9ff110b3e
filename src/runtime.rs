//! Page lifecycle wiring.
//!
//! Owns the engines, the favorites store and the page's listener registry,
//! and exposes the two moments the page scripts care about: the page became
//! ready, and the catalog renderer finished injecting cards.

use crate::catalog::ItemId;
use crate::config::Config;
use crate::favorites::FavoritesStore;
use crate::page::anchors::{NAV_SEARCH_INPUT, RESET_BUTTON, SEARCH_INPUT};
use crate::page::{DispatchOutcome, Event, EventKind, EventLoop, Page};
use crate::search::{CatalogSearch, CustomSearch, Ready, Unavailable};
use crate::storage::KeyValueStore;
use anyhow::Result;
use tracing::{info, warn};

/// What `on_ready` managed to set up.
#[derive(Debug)]
pub struct ReadyReport {
    pub catalog_search: Result<Ready, Unavailable>,
    pub custom_search: Result<Ready, Unavailable>,
    pub favorites_restored: usize,
}

/// Engine whose pass currently decides card visibility.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActiveSearch {
    Catalog,
    Custom,
}

pub struct PageRuntime<S> {
    catalog_search: CatalogSearch,
    custom_search: CustomSearch,
    favorites: FavoritesStore<S>,
    events: EventLoop,
    active: Option<ActiveSearch>,
}

impl<S: KeyValueStore> PageRuntime<S> {
    pub fn new(store: S, config: &Config) -> Self {
        Self {
            catalog_search: CatalogSearch::new(),
            custom_search: CustomSearch::new(),
            favorites: FavoritesStore::new(store, config.favorites_key.clone()),
            events: EventLoop::new(),
            active: None,
        }
    }

    /// Initialize both engines and restore favorites. An engine that cannot
    /// bind is logged and left inert; the other still starts.
    pub fn on_ready(&mut self, page: &mut dyn Page) -> ReadyReport {
        let catalog_search = self.catalog_search.initialize(page, &mut self.events);
        if let Err(err) = &catalog_search {
            warn!("{err}; navigation search disabled");
        }
        let custom_search = self.custom_search.initialize(page, &mut self.events);
        if let Err(err) = &custom_search {
            warn!("{err}; page search disabled");
        }
        let favorites_restored = self.favorites.init_favorites(page);

        ReadyReport {
            catalog_search,
            custom_search,
            favorites_restored,
        }
    }

    /// Re-apply the engine that last filtered the page, then repaint
    /// favorites, after the catalog renderer has added or replaced cards.
    ///
    /// Before any search ran, the navigation search is applied when it is
    /// bound, otherwise the page search.
    pub fn after_render(&self, page: &mut dyn Page) {
        let engine = self.active.or_else(|| {
            if self.catalog_search.is_initialized() {
                Some(ActiveSearch::Catalog)
            } else if self.custom_search.is_initialized() {
                Some(ActiveSearch::Custom)
            } else {
                None
            }
        });
        info!(?engine, "re-applying search after render");
        match engine {
            Some(ActiveSearch::Catalog) => {
                self.catalog_search.apply_filters(page);
            }
            Some(ActiveSearch::Custom) => {
                self.custom_search.filter_food(page);
            }
            None => {}
        }
        self.favorites.init_favorites(page);
    }

    /// Deliver `event` to its listeners, remembering which engine handled it.
    pub fn dispatch(&mut self, page: &mut dyn Page, event: Event) -> DispatchOutcome {
        let engine = search_for_event(page, &event);
        let outcome = self.events.dispatch(page, event);
        if outcome.handled > 0 && engine.is_some() {
            self.active = engine;
        }
        outcome
    }

    /// Engine that last changed card visibility through an event.
    pub fn active_search(&self) -> Option<ActiveSearch> {
        self.active
    }

    pub fn toggle_favorite(&mut self, page: &mut dyn Page, id: &ItemId) -> Result<bool> {
        self.favorites.toggle_favorite(page, id)
    }

    pub fn catalog_search(&self) -> &CatalogSearch {
        &self.catalog_search
    }

    pub fn custom_search(&self) -> &CustomSearch {
        &self.custom_search
    }

    pub fn favorites(&self) -> &FavoritesStore<S> {
        &self.favorites
    }

    pub fn events(&self) -> &EventLoop {
        &self.events
    }
}

/// Which engine an event on the page would drive, judged by its target.
fn search_for_event(page: &dyn Page, event: &Event) -> Option<ActiveSearch> {
    let target = Some(event.target);
    match event.kind {
        EventKind::Input if target == page.element_by_id(NAV_SEARCH_INPUT) => {
            Some(ActiveSearch::Catalog)
        }
        EventKind::Input if target == page.element_by_id(SEARCH_INPUT) => {
            Some(ActiveSearch::Custom)
        }
        EventKind::Click if target == page.element_by_id(RESET_BUTTON) => {
            Some(ActiveSearch::Custom)
        }
        EventKind::Click
            if page
                .filter_chips()
                .iter()
                .any(|chip| chip.node == event.target) =>
        {
            Some(ActiveSearch::Catalog)
        }
        _ => None,
    }
}
