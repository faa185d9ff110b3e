//! Deserializable representation of a menu catalog file.
//!
//! The types mirror `schema/catalog.schema.json`. Use `CatalogIndex` when the
//! catalog should be validated and looked up by id; use these structs directly
//! when only the raw layout (categories in display order) is needed.

use crate::catalog::identity::{FoodType, ItemId};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Full menu catalog as stored on disk.
pub struct MenuCatalog {
    pub schema_version: String,
    pub title: String,
    pub categories: Vec<Category>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// One titled group of items; rendered as a section on the page.
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub items: Vec<FoodItem>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// A single menu entry.
pub struct FoodItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub food_type: FoodType,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl FoodItem {
    /// Tags in the joined form carried by a card's `data-tags` attribute.
    pub fn tags_attribute(&self) -> String {
        self.tags.join(" ")
    }
}

impl MenuCatalog {
    /// Iterate every item in display order, including repeats across categories.
    pub fn items(&self) -> impl Iterator<Item = &FoodItem> {
        self.categories.iter().flat_map(|category| category.items.iter())
    }
}

/// Read and parse a menu catalog from disk without additional validation.
pub fn load_catalog_from_path(path: &Path) -> Result<MenuCatalog> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let catalog: MenuCatalog =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(catalog)
}
