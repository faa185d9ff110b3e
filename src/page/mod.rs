//! Page surface the search engines and favorites run against.
//!
//! `Page` is the small read/query capability the engines need from a rendered
//! menu page: find cards and sections, toggle visibility, read inputs, and
//! manage the no-results notice and favorite indicators. `MemoryPage` is the
//! arena-backed implementation used by the binaries and the tests;
//! `EventLoop` holds the listeners the engines register.

pub mod events;
pub mod memory;

pub use events::{DispatchOutcome, Event, EventContext, EventKind, EventLoop};
pub use memory::{CardData, Element, MemoryPage, PageSnapshot, SectionSnapshot};

use crate::catalog::{FoodType, ItemId};
use serde::Serialize;

/// Element ids and class markers the page scripts agree on.
pub mod anchors {
    pub const NAV_SEARCH_INPUT: &str = "navSearchInput";
    pub const SEARCH_INPUT: &str = "searchInput";
    pub const SEARCH_FORM: &str = "searchForm";
    pub const RESET_BUTTON: &str = "resetButton";
    pub const NO_RESULTS_MESSAGE: &str = "noResultsMessage";

    pub const FILTER_CHIP_CLASS: &str = "filter-chip";
    pub const ITEM_CARD_CLASS: &str = "food-preview";
    pub const SECTION_CLASS: &str = "food-1-preview";
    pub const SECTION_TITLE_CLASS: &str = "food-type-name";
    pub const MAIN_CONTENT_CLASS: &str = "main-content";
}

/// Handle to one element of a page. Only meaningful for the page that issued it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeKey(pub usize);

/// Searchable attributes of an item card as read from the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardView {
    pub node: NodeKey,
    pub id: Option<ItemId>,
    /// Text of the card's name element; `None` when the card has none.
    pub name: Option<String>,
    pub description: Option<String>,
    pub food_type: Option<FoodType>,
    /// Raw `data-tags` text (space or comma joined).
    pub tags: String,
}

/// A filter chip and its `data-filter` attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterChip {
    pub node: NodeKey,
    pub filter: Option<String>,
}

/// Visual state of a card's favorite button.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeartState {
    Filled,
    Outline,
}

impl HeartState {
    pub fn from_membership(is_favorite: bool) -> Self {
        if is_favorite {
            HeartState::Filled
        } else {
            HeartState::Outline
        }
    }

    /// Icon class rendered inside the button.
    pub fn icon_class(self) -> &'static str {
        match self {
            HeartState::Filled => "fas fa-heart",
            HeartState::Outline => "far fa-heart",
        }
    }
}

/// Placeholder block inserted at the top of the main content area.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub id: String,
    pub icon: String,
    pub heading: String,
    pub hint: String,
}

impl Notice {
    pub fn no_results() -> Self {
        Self {
            id: anchors::NO_RESULTS_MESSAGE.to_string(),
            icon: "\u{1F50D}".to_string(),
            heading: "No results found".to_string(),
            hint: "Try searching for something else".to_string(),
        }
    }
}

/// Read/query capability over a rendered menu page.
///
/// Queries always reflect the current tree; nothing is cached between calls,
/// so cards injected after an engine initialized are seen on the next pass.
pub trait Page {
    /// Attached element carrying `id`, if any.
    fn element_by_id(&self, id: &str) -> Option<NodeKey>;

    /// First `.main-content` container.
    fn main_content(&self) -> Option<NodeKey>;

    /// Current text of an input element.
    fn value(&self, node: NodeKey) -> Option<String>;

    fn set_value(&mut self, node: NodeKey, value: &str);

    /// All filter chips in document order.
    fn filter_chips(&self) -> Vec<FilterChip>;

    fn set_active(&mut self, node: NodeKey, active: bool);

    /// All item cards in document order.
    fn item_cards(&self) -> Vec<CardView>;

    /// Cards whose `data-id` equals `id`.
    fn cards_with_id(&self, id: &ItemId) -> Vec<NodeKey>;

    /// All section containers in document order.
    fn sections(&self) -> Vec<NodeKey>;

    fn children(&self, node: NodeKey) -> Vec<NodeKey>;

    fn previous_sibling(&self, node: NodeKey) -> Option<NodeKey>;

    /// Whether `node` is a section-title marker.
    fn is_section_title(&self, node: NodeKey) -> bool;

    fn is_visible(&self, node: NodeKey) -> bool;

    fn set_visible(&mut self, node: NodeKey, visible: bool);

    /// Insert `notice` as the first child of `parent`.
    fn prepend_notice(&mut self, parent: NodeKey, notice: &Notice) -> NodeKey;

    /// Detach `node` (and its subtree) from the page.
    fn remove(&mut self, node: NodeKey);

    /// Set the favorite indicator of a card. Returns false when the card has
    /// no favorite button.
    fn set_favorite_indicator(&mut self, card: NodeKey, state: HeartState) -> bool;
}
