//! Renders a catalog into a `MemoryPage` the way the menu page lays it out.
//!
//! The shell holds the navigation search and chips, the page search form,
//! and an empty main content area; `render_catalog` fills the main content
//! with one titled section per category.

use crate::catalog::{FilterValue, MenuCatalog};
use crate::page::anchors::{NAV_SEARCH_INPUT, RESET_BUTTON, SEARCH_FORM, SEARCH_INPUT};
use crate::page::{CardData, Element, MemoryPage, NodeKey};
use tracing::debug;

/// Page skeleton with the anchors both search engines bind to.
pub struct PageShell {
    pub page: MemoryPage,
    pub main: NodeKey,
    pub nav_input: NodeKey,
    pub search_input: NodeKey,
    pub reset_button: NodeKey,
    /// Chip nodes in the order of the filters they were built from.
    pub chips: Vec<(FilterValue, NodeKey)>,
}

impl PageShell {
    pub fn new(filters: &[FilterValue]) -> Self {
        let mut page = MemoryPage::new();
        let nav = page.append(page.body(), Element::Block);
        let nav_input = page.add_input(nav, NAV_SEARCH_INPUT);
        let chips = filters
            .iter()
            .map(|filter| (filter.clone(), page.add_filter_chip(nav, filter.as_str())))
            .collect();

        let form = page.append_with_id(page.body(), SEARCH_FORM, Element::Form);
        let search_input = page.add_input(form, SEARCH_INPUT);
        let reset_button = page.append_with_id(
            form,
            RESET_BUTTON,
            Element::Button {
                label: "Reset".to_string(),
            },
        );
        let main = page.add_main_content();

        Self {
            page,
            main,
            nav_input,
            search_input,
            reset_button,
            chips,
        }
    }

    pub fn chip(&self, filter: &FilterValue) -> Option<NodeKey> {
        self.chips
            .iter()
            .find(|(value, _)| value == filter)
            .map(|(_, node)| *node)
    }
}

/// Append one title and section per category under `parent`, with a card per
/// item. Returns the section nodes in category order.
pub fn render_catalog(catalog: &MenuCatalog, page: &mut MemoryPage, parent: NodeKey) -> Vec<NodeKey> {
    let sections: Vec<NodeKey> = catalog
        .categories
        .iter()
        .map(|category| {
            let section = page.add_section(parent, &category.name);
            for item in &category.items {
                page.add_card(section, CardData::from(item));
            }
            section
        })
        .collect();
    debug!(sections = sections.len(), "catalog rendered");
    sections
}
