//! Shared library for the Khaja Time menu tools.
//!
//! The crate exposes the menu catalog (load, validate, render), an abstract
//! page surface with an in-memory implementation, the two search engines that
//! filter item cards on that page, and the favorites and mood journal lists
//! persisted in a key-value store. Public items here form the contract the
//! binaries depend on.

pub mod catalog;
pub mod config;
pub mod favorites;
pub mod journal;
pub mod page;
pub mod runtime;
mod schema_loader;
pub mod search;
pub mod storage;

pub use catalog::{
    CatalogIndex, Category, FilterValue, FoodItem, FoodType, ItemId, MenuCatalog, PageShell,
    load_catalog_from_path, render_catalog,
};
pub use config::Config;
pub use favorites::{FavoritesSet, FavoritesStore, update_favorite_btn_ui};
pub use journal::{JournalEntry, JournalError, JournalStore};
pub use page::{Event, EventLoop, MemoryPage, NodeKey, Page, PageSnapshot};
pub use runtime::{ActiveSearch, PageRuntime, ReadyReport};
pub use schema_loader::CATALOG_SCHEMA_VERSION;
pub use search::{CatalogSearch, CustomSearch, FilterPass, Ready, Unavailable};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

/// Install the stderr log subscriber used by every binary.
///
/// The filter comes from `RUST_LOG`; warnings are shown when it is unset.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
