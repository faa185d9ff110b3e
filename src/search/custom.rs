//! Page search: name OR description substring, with a no-results notice.

use super::{FilterPass, Ready, Unavailable, handle_empty_sections, normalize_query, text_matches};
use crate::page::anchors::{NO_RESULTS_MESSAGE, RESET_BUTTON, SEARCH_FORM, SEARCH_INPUT};
use crate::page::{EventKind, EventLoop, Notice, Page};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};

const ENGINE: &str = "custom search";

#[derive(Debug, Default)]
struct SearchState {
    query: String,
    initialized: bool,
}

/// Handle to the page search engine. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct CustomSearch {
    state: Rc<RefCell<SearchState>>,
}

impl CustomSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_query(&self) -> String {
        self.state.borrow().query.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.borrow().initialized
    }

    /// Bind to the search input, and to the form and reset button when the
    /// page has them.
    pub fn initialize(&self, page: &dyn Page, events: &mut EventLoop) -> Result<Ready, Unavailable> {
        if self.is_initialized() {
            return Ok(Ready::AlreadyInitialized);
        }
        info!("{ENGINE} initializing");

        let Some(input) = page.element_by_id(SEARCH_INPUT) else {
            warn!(anchor = SEARCH_INPUT, "{ENGINE}: search input not found");
            return Err(Unavailable::MissingAnchor {
                engine: ENGINE,
                anchor: SEARCH_INPUT,
            });
        };

        // Enter inside the form must not navigate away.
        if let Some(form) = page.element_by_id(SEARCH_FORM) {
            events.listen(form, EventKind::Submit, |ctx| ctx.prevent_default());
        }

        let engine = self.clone();
        events.listen(input, EventKind::Input, move |ctx| {
            let raw = ctx.page.value(ctx.event.target).unwrap_or_default();
            engine.set_query(&raw);
            engine.filter_food(ctx.page);
        });

        if let Some(reset) = page.element_by_id(RESET_BUTTON) {
            let engine = self.clone();
            events.listen(reset, EventKind::Click, move |ctx| {
                engine.reset(ctx.page);
            });
        }

        self.state.borrow_mut().initialized = true;
        info!("{ENGINE} initialized");
        Ok(Ready::Initialized)
    }

    /// Store a new query in normalized form without re-filtering.
    pub fn set_query(&self, raw: &str) {
        let query = normalize_query(raw);
        debug!(query = %query, "{ENGINE} query");
        self.state.borrow_mut().query = query;
    }

    /// Show cards whose name or description contains the query, recompute
    /// sections, and refresh the no-results notice.
    pub fn filter_food(&self, page: &mut dyn Page) -> FilterPass {
        let cards = page.item_cards();
        if cards.is_empty() {
            // Sections and any notice from an earlier pass stay as they are.
            warn!("{ENGINE}: no item cards found");
            return FilterPass::default();
        }

        let query = self.current_query();
        debug!(cards = cards.len(), query = %query, "{ENGINE} filtering");

        let mut pass = FilterPass::default();
        for card in &cards {
            let Some(name) = card.name.as_deref() else {
                warn!(node = card.node.0, "{ENGINE}: item card has no name");
                continue;
            };
            let description = card.description.as_deref().unwrap_or_default();
            let shown = text_matches(&query, name) || text_matches(&query, description);
            page.set_visible(card.node, shown);
            pass.record(shown);
        }
        debug!(visible = pass.visible, hidden = pass.hidden, "{ENGINE} pass complete");

        self.handle_empty_sections(page);
        self.show_no_results_message(page, pass.visible);
        pass
    }

    pub fn handle_empty_sections(&self, page: &mut dyn Page) {
        handle_empty_sections(page);
    }

    /// Replace any previous notice; insert a fresh one only when a non-empty
    /// query matched nothing. Pages without a main content area get no notice.
    pub fn show_no_results_message(&self, page: &mut dyn Page, visible_count: usize) {
        if let Some(existing) = page.element_by_id(NO_RESULTS_MESSAGE) {
            page.remove(existing);
        }

        if visible_count > 0 || self.state.borrow().query.is_empty() {
            return;
        }
        match page.main_content() {
            Some(main) => {
                page.prepend_notice(main, &Notice::no_results());
            }
            None => debug!("{ENGINE}: no main content area for notice"),
        }
    }

    /// Clear the query and input and re-run the search, which also drops any
    /// no-results notice. A page with no cards left keeps its notice.
    pub fn reset(&self, page: &mut dyn Page) -> FilterPass {
        self.state.borrow_mut().query.clear();
        if let Some(input) = page.element_by_id(SEARCH_INPUT) {
            page.set_value(input, "");
        }
        let pass = self.filter_food(page);
        info!("{ENGINE} reset");
        pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{CardData, Element, Event, MemoryPage, NodeKey};
    use tracing_test::traced_test;

    struct Fixture {
        page: MemoryPage,
        events: EventLoop,
        input: NodeKey,
        form: NodeKey,
        reset: NodeKey,
        noodles: NodeKey,
    }

    fn fixture() -> Fixture {
        let mut page = MemoryPage::new();
        let form = page.append_with_id(page.body(), SEARCH_FORM, Element::Form);
        let input = page.add_input(form, SEARCH_INPUT);
        let reset = page.append_with_id(
            form,
            RESET_BUTTON,
            Element::Button {
                label: "Reset".to_string(),
            },
        );
        let main = page.add_main_content();
        let momo = page.add_section(main, "Momo");
        page.add_card(
            momo,
            CardData::new("m1", "Jhol Momo").with_description("dumplings in sesame broth"),
        );
        let noodles = page.add_section(main, "Noodles");
        page.add_card(
            noodles,
            CardData::new("n1", "Chowmein").with_description("spicy noodles"),
        );
        page.add_card(noodles, CardData::new("n2", "Thukpa"));
        Fixture {
            page,
            events: EventLoop::new(),
            input,
            form,
            reset,
            noodles,
        }
    }

    #[test]
    fn name_match_shows_card() {
        let mut fx = fixture();
        let engine = CustomSearch::new();
        engine.initialize(&fx.page, &mut fx.events).unwrap();

        fx.events.dispatch(&mut fx.page, Event::input(fx.input, "chow"));

        assert_eq!(fx.page.visible_card_names(), ["Chowmein"]);
        assert!(fx.page.is_visible(fx.noodles));
        assert!(fx.page.notice().is_none());
    }

    #[test]
    fn description_match_shows_card() {
        let mut fx = fixture();
        let engine = CustomSearch::new();
        engine.initialize(&fx.page, &mut fx.events).unwrap();

        fx.events.dispatch(&mut fx.page, Event::input(fx.input, "SESAME"));

        assert_eq!(fx.page.visible_card_names(), ["Jhol Momo"]);
        assert!(!fx.page.is_visible(fx.noodles));
    }

    #[test]
    #[traced_test]
    fn nameless_card_keeps_its_visibility_and_is_not_counted() {
        let mut fx = fixture();
        let nameless = fx.page.add_card(
            fx.noodles,
            CardData {
                name: None,
                ..CardData::new("n3", "")
            },
        );
        fx.page.set_visible(nameless, false);
        let engine = CustomSearch::new();

        let pass = engine.filter_food(&mut fx.page);

        assert_eq!(pass, FilterPass { visible: 3, hidden: 0 });
        assert!(!fx.page.is_visible(nameless));
        assert!(logs_contain("item card has no name"));
    }

    #[test]
    #[traced_test]
    fn notice_outlives_reset_once_cards_are_gone() {
        let mut fx = fixture();
        let engine = CustomSearch::new();
        engine.initialize(&fx.page, &mut fx.events).unwrap();
        fx.events.dispatch(&mut fx.page, Event::input(fx.input, "xyz123"));
        assert!(fx.page.notice().is_some());

        for card in fx.page.item_cards() {
            fx.page.remove(card.node);
        }
        fx.events.dispatch(&mut fx.page, Event::click(fx.reset));

        assert_eq!(engine.current_query(), "");
        assert_eq!(
            fx.page.notice().map(|notice| notice.heading.as_str()),
            Some("No results found")
        );
        assert!(logs_contain("no item cards found"));
    }

    #[test]
    fn no_match_inserts_single_notice_and_reset_clears_it() {
        let mut fx = fixture();
        let engine = CustomSearch::new();
        engine.initialize(&fx.page, &mut fx.events).unwrap();

        fx.events.dispatch(&mut fx.page, Event::input(fx.input, "xyz12"));
        let outcome = fx
            .events
            .dispatch(&mut fx.page, Event::input(fx.input, "xyz123"));
        assert_eq!(outcome.handled, 1);

        assert!(fx.page.visible_card_names().is_empty());
        let notice = fx.page.notice().expect("notice inserted");
        assert_eq!(notice.heading, "No results found");
        let main = fx.page.main_content().unwrap();
        assert_eq!(fx.page.children(main).len(), 5);

        fx.events.dispatch(&mut fx.page, Event::click(fx.reset));

        assert_eq!(engine.current_query(), "");
        assert_eq!(fx.page.value(fx.input).as_deref(), Some(""));
        assert_eq!(
            fx.page.visible_card_names(),
            ["Jhol Momo", "Chowmein", "Thukpa"]
        );
        assert!(fx.page.notice().is_none());
    }

    #[test]
    fn empty_query_never_shows_notice() {
        let mut page = MemoryPage::new();
        page.add_main_content();
        let engine = CustomSearch::new();
        engine.show_no_results_message(&mut page, 0);
        assert!(page.notice().is_none());
    }

    #[test]
    fn missing_main_content_skips_notice() {
        let mut page = MemoryPage::new();
        let section = page.add_section(page.body(), "Momo");
        page.add_card(section, CardData::new("m1", "Jhol Momo"));
        let engine = CustomSearch::new();
        engine.set_query("pizza");

        let pass = engine.filter_food(&mut page);
        assert_eq!(pass, FilterPass { visible: 0, hidden: 1 });
        assert!(page.notice().is_none());
    }

    #[test]
    fn form_submission_is_prevented() {
        let mut fx = fixture();
        let engine = CustomSearch::new();
        engine.initialize(&fx.page, &mut fx.events).unwrap();

        let outcome = fx.events.dispatch(&mut fx.page, Event::submit(fx.form));
        assert!(outcome.default_prevented);
    }

    #[test]
    fn optional_anchors_may_be_absent() {
        let mut page = MemoryPage::new();
        let input = page.add_input(page.body(), SEARCH_INPUT);
        let mut events = EventLoop::new();
        let engine = CustomSearch::new();

        assert_eq!(engine.initialize(&page, &mut events), Ok(Ready::Initialized));
        assert_eq!(events.total_listeners(), 1);
        assert_eq!(events.listener_count(input, EventKind::Input), 1);
        assert_eq!(
            engine.initialize(&page, &mut events),
            Ok(Ready::AlreadyInitialized)
        );
        assert_eq!(events.total_listeners(), 1);
    }

    #[test]
    fn missing_input_is_unavailable() {
        let page = MemoryPage::new();
        let mut events = EventLoop::new();
        let err = CustomSearch::new()
            .initialize(&page, &mut events)
            .unwrap_err();
        assert_eq!(err.to_string(), "custom search: element #searchInput not found on page");
    }
}
