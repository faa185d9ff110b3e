//! Menu catalog wiring.
//!
//! Wraps the JSON catalog file so tools can load a validated snapshot, look
//! items up by id, and render the categories onto a page. Types here mirror
//! the schema fields; `CatalogIndex` is the validated entry point.

pub mod identity;
pub mod index;
pub mod model;
pub mod render;

pub use identity::{FilterValue, FoodType, ItemId};
pub use index::CatalogIndex;
pub use model::{Category, FoodItem, MenuCatalog};
pub use render::{PageShell, render_catalog};

pub use model::load_catalog_from_path;
