//! Persisted favorites and the heart indicators that mirror them.
//!
//! The set is stored as a JSON list of item ids. Every toggle starts from the
//! stored list rather than a copy held by the page.

use crate::catalog::ItemId;
use crate::page::{HeartState, Page};
use crate::storage::{KeyValueStore, load_list, save_list};
use anyhow::Result;
use tracing::{debug, info};

/// Ordered set of favorited item ids.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FavoritesSet {
    ids: Vec<ItemId>,
}

impl FavoritesSet {
    /// Build a set, keeping the first occurrence of any repeated id.
    pub fn from_ids(ids: impl IntoIterator<Item = ItemId>) -> Self {
        let mut set = Self::default();
        for id in ids {
            if !set.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.ids.contains(id)
    }

    /// Remove `id` if present, append it otherwise. Returns the new membership.
    pub fn toggle(&mut self, id: &ItemId) -> bool {
        match self.ids.iter().position(|existing| existing == id) {
            Some(index) => {
                self.ids.remove(index);
                false
            }
            None => {
                self.ids.push(id.clone());
                true
            }
        }
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Favorites persisted under one key of a [`KeyValueStore`].
#[derive(Debug)]
pub struct FavoritesStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Current stored set; empty when nothing (or nothing readable) is stored.
    pub fn load(&self) -> FavoritesSet {
        FavoritesSet::from_ids(load_list::<ItemId>(&self.store, &self.key))
    }

    /// Flip membership of `id`, persist, and repaint every card showing it.
    ///
    /// The page is only touched once the new set has been stored.
    pub fn toggle_favorite(&mut self, page: &mut dyn Page, id: &ItemId) -> Result<bool> {
        let mut favorites = self.load();
        let is_favorite = favorites.toggle(id);
        save_list(&mut self.store, &self.key, favorites.ids())?;
        info!(%id, is_favorite, total = favorites.len(), "favorite toggled");
        update_favorite_btn_ui(page, id, is_favorite);
        Ok(is_favorite)
    }

    /// Mark every stored favorite on the page. Returns how many ids were applied.
    pub fn init_favorites(&self, page: &mut dyn Page) -> usize {
        let favorites = self.load();
        for id in favorites.ids() {
            update_favorite_btn_ui(page, id, true);
        }
        debug!(count = favorites.len(), "favorites restored");
        favorites.len()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

/// Set the heart on every card rendering `id`. Returns the number of
/// indicators updated; cards without a favorite button are skipped.
pub fn update_favorite_btn_ui(page: &mut dyn Page, id: &ItemId, is_favorite: bool) -> usize {
    let state = HeartState::from_membership(is_favorite);
    let mut updated = 0;
    for card in page.cards_with_id(id) {
        if page.set_favorite_indicator(card, state) {
            updated += 1;
        }
    }
    updated
}
