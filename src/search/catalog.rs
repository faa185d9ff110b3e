//! Navigation-bar search: name substring AND category/tag chip.

use super::{FilterPass, Ready, Unavailable, handle_empty_sections, matches_filter};
use super::{normalize_query, text_matches};
use crate::catalog::FilterValue;
use crate::page::anchors::NAV_SEARCH_INPUT;
use crate::page::{EventKind, EventLoop, NodeKey, Page};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};

const ENGINE: &str = "catalog search";

#[derive(Debug, Default)]
struct SearchState {
    query: String,
    filter: FilterValue,
    initialized: bool,
}

/// Handle to the catalog search engine.
///
/// Clones share state; listeners registered by `initialize` hold a clone.
#[derive(Clone, Debug, Default)]
pub struct CatalogSearch {
    state: Rc<RefCell<SearchState>>,
}

impl CatalogSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_query(&self) -> String {
        self.state.borrow().query.clone()
    }

    pub fn current_filter(&self) -> FilterValue {
        self.state.borrow().filter.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.borrow().initialized
    }

    /// Bind to the navigation search input and every filter chip.
    pub fn initialize(&self, page: &dyn Page, events: &mut EventLoop) -> Result<Ready, Unavailable> {
        if self.is_initialized() {
            return Ok(Ready::AlreadyInitialized);
        }
        info!("{ENGINE} initializing");

        let Some(input) = page.element_by_id(NAV_SEARCH_INPUT) else {
            warn!(anchor = NAV_SEARCH_INPUT, "{ENGINE}: search input not found");
            return Err(Unavailable::MissingAnchor {
                engine: ENGINE,
                anchor: NAV_SEARCH_INPUT,
            });
        };

        let engine = self.clone();
        events.listen(input, EventKind::Input, move |ctx| {
            let raw = ctx.page.value(ctx.event.target).unwrap_or_default();
            engine.set_query(&raw);
            engine.apply_filters(ctx.page);
        });

        let chips = page.filter_chips();
        for chip in &chips {
            let engine = self.clone();
            events.listen(chip.node, EventKind::Click, move |ctx| {
                engine.select_chip(ctx.page, ctx.event.target);
            });
        }

        self.state.borrow_mut().initialized = true;
        info!(chips = chips.len(), "{ENGINE} initialized");
        Ok(Ready::Initialized)
    }

    /// Store a new query in normalized form without re-filtering.
    pub fn set_query(&self, raw: &str) {
        let query = normalize_query(raw);
        debug!(query = %query, "{ENGINE} query");
        self.state.borrow_mut().query = query;
    }

    /// Make `chip` the only active chip, adopt its filter value and re-filter.
    ///
    /// A chip without a `data-filter` attribute selects "all".
    pub fn select_chip(&self, page: &mut dyn Page, chip: NodeKey) -> FilterPass {
        let chips = page.filter_chips();
        for other in &chips {
            page.set_active(other.node, false);
        }
        page.set_active(chip, true);

        let filter = chips
            .iter()
            .find(|candidate| candidate.node == chip)
            .and_then(|candidate| candidate.filter.as_deref())
            .map(FilterValue::parse)
            .unwrap_or_default();
        self.state.borrow_mut().filter = filter;
        self.apply_filters(page)
    }

    /// Re-scan every card on the page and show those matching both the query
    /// and the active filter, then recompute section visibility.
    ///
    /// Cards without a name element are left untouched.
    pub fn apply_filters(&self, page: &mut dyn Page) -> FilterPass {
        let cards = page.item_cards();
        if cards.is_empty() {
            warn!("{ENGINE}: no item cards found");
            return FilterPass::default();
        }

        let (query, filter) = {
            let state = self.state.borrow();
            (state.query.clone(), state.filter.clone())
        };
        debug!(cards = cards.len(), query = %query, filter = %filter, "{ENGINE} filtering");

        let mut pass = FilterPass::default();
        for card in &cards {
            let Some(name) = card.name.as_deref() else {
                warn!(node = card.node.0, "{ENGINE}: item card has no name");
                continue;
            };
            let shown = text_matches(&query, name) && matches_filter(&filter, card);
            page.set_visible(card.node, shown);
            pass.record(shown);
        }
        debug!(visible = pass.visible, hidden = pass.hidden, "{ENGINE} pass complete");

        self.handle_empty_sections(page);
        pass
    }

    pub fn handle_empty_sections(&self, page: &mut dyn Page) {
        handle_empty_sections(page);
    }

    /// Clear the query and filter, empty the input, re-select the "all" chip
    /// and show everything again.
    pub fn reset(&self, page: &mut dyn Page) -> FilterPass {
        {
            let mut state = self.state.borrow_mut();
            state.query.clear();
            state.filter = FilterValue::All;
        }
        if let Some(input) = page.element_by_id(NAV_SEARCH_INPUT) {
            page.set_value(input, "");
        }
        for chip in page.filter_chips() {
            let selects_all = chip
                .filter
                .as_deref()
                .is_none_or(|raw| FilterValue::parse(raw) == FilterValue::All);
            page.set_active(chip.node, selects_all);
        }
        self.apply_filters(page)
    }
}
