//! Validated, id-indexed view of a menu catalog.
//!
//! The index checks the file against the embedded schema before deserializing
//! it, then enforces the rules the schema cannot express: ids unique within a
//! category and consistent across categories.

use crate::catalog::identity::{FilterValue, FoodType, ItemId};
use crate::catalog::model::{FoodItem, MenuCatalog};
use crate::schema_loader::CatalogSchema;
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

#[derive(Debug)]
/// Menu catalog plus a derived index keyed by item id.
pub struct CatalogIndex {
    catalog: MenuCatalog,
    by_id: BTreeMap<ItemId, FoodItem>,
}

impl CatalogIndex {
    /// Load and validate a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening catalog {}", path.display()))?;
        let value: Value = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing catalog {}", path.display()))?;
        Self::from_value(value).with_context(|| format!("loading {}", path.display()))
    }

    /// Validate and index an already-parsed catalog document.
    pub fn from_value(value: Value) -> Result<Self> {
        let schema = CatalogSchema::load()?;
        schema
            .validate(&value)
            .context("catalog failed schema validation")?;
        let catalog: MenuCatalog = serde_json::from_value(value)?;
        let by_id = build_index(&catalog)?;
        debug!(
            items = by_id.len(),
            categories = catalog.categories.len(),
            "catalog indexed"
        );
        Ok(Self { catalog, by_id })
    }

    /// Resolve an item by id.
    pub fn item(&self, id: &ItemId) -> Option<&FoodItem> {
        self.by_id.get(id)
    }

    /// Iterates item ids in stable order.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.by_id.keys()
    }

    pub fn catalog(&self) -> &MenuCatalog {
        &self.catalog
    }

    /// Chip values offered for this catalog: "all", the dietary types, then
    /// every tag in sorted order.
    pub fn filter_values(&self) -> Vec<FilterValue> {
        let tags: BTreeSet<&str> = self
            .by_id
            .values()
            .flat_map(|item| item.tags.iter().map(String::as_str))
            .collect();
        let mut values = vec![
            FilterValue::All,
            FilterValue::Type(FoodType::Veg),
            FilterValue::Type(FoodType::NonVeg),
        ];
        values.extend(tags.into_iter().map(FilterValue::parse));
        values
    }
}

fn build_index(catalog: &MenuCatalog) -> Result<BTreeMap<ItemId, FoodItem>> {
    let mut map: BTreeMap<ItemId, FoodItem> = BTreeMap::new();
    for category in &catalog.categories {
        let mut seen: BTreeSet<&ItemId> = BTreeSet::new();
        for item in &category.items {
            if item.id.0.trim().is_empty() {
                bail!("category '{}' contains an item with no id", category.name);
            }
            if item.name.trim().is_empty() {
                bail!("item {} has an empty name", item.id);
            }
            if !seen.insert(&item.id) {
                bail!(
                    "duplicate item id {} in category '{}'",
                    item.id,
                    category.name
                );
            }
            if let Some(existing) = map.get(&item.id) {
                if existing.name != item.name {
                    bail!(
                        "item {} is defined as both '{}' and '{}'",
                        item.id,
                        existing.name,
                        item.name
                    );
                }
                continue;
            }
            map.insert(item.id.clone(), item.clone());
        }
    }
    Ok(map)
}
