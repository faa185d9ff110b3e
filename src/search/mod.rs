//! Text search and filter engines over item cards.
//!
//! Two engines share the card/section model but keep separate contracts:
//! `CatalogSearch` ANDs a name match with a category/tag chip, while
//! `CustomSearch` ORs name and description and reports empty results to the
//! user. Both derive section visibility from card visibility after every pass.

pub mod catalog;
pub mod custom;

pub use catalog::CatalogSearch;
pub use custom::CustomSearch;

use crate::catalog::FilterValue;
use crate::page::{CardView, NodeKey, Page};
use serde::Serialize;
use thiserror::Error;

/// Successful engine setup.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Ready {
    Initialized,
    /// Setup already ran on this page; nothing was registered.
    AlreadyInitialized,
}

/// Setup could not bind to the page. The engine stays inert; other engines
/// are unaffected.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Unavailable {
    #[error("{engine}: element #{anchor} not found on page")]
    MissingAnchor {
        engine: &'static str,
        anchor: &'static str,
    },
}

/// Visible/hidden tally of one filter pass.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct FilterPass {
    pub visible: usize,
    pub hidden: usize,
}

impl FilterPass {
    fn record(&mut self, shown: bool) {
        if shown {
            self.visible += 1;
        } else {
            self.hidden += 1;
        }
    }
}

/// Lowercase and trim raw input into the stored query form.
pub fn normalize_query(raw: &str) -> String {
    raw.to_lowercase().trim().to_string()
}

/// Case-insensitive substring test; an empty query matches everything.
pub fn text_matches(query: &str, text: &str) -> bool {
    query.is_empty() || text.to_lowercase().contains(query)
}

/// Whether a card passes the active chip filter.
pub fn matches_filter(filter: &FilterValue, card: &CardView) -> bool {
    match filter {
        FilterValue::All => true,
        FilterValue::Type(wanted) => card
            .food_type
            .as_ref()
            .is_some_and(|food_type| food_type.as_str() == wanted.as_str()),
        FilterValue::Tag(tag) => card.tags.contains(tag.as_str()),
    }
}

/// Hide sections with no visible children, together with their titles, and
/// show every other section and title.
pub fn handle_empty_sections(page: &mut dyn Page) {
    for section in page.sections() {
        let any_visible = page
            .children(section)
            .into_iter()
            .any(|child| page.is_visible(child));
        let title = section_title(page, section);

        page.set_visible(section, any_visible);
        if let Some(title) = title {
            page.set_visible(title, any_visible);
        }
    }
}

/// Nearest preceding sibling marked as a section title.
fn section_title(page: &dyn Page, section: NodeKey) -> Option<NodeKey> {
    let mut cursor = page.previous_sibling(section);
    while let Some(node) = cursor {
        if page.is_section_title(node) {
            return Some(node);
        }
        cursor = page.previous_sibling(node);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FoodType;
    use crate::page::{CardData, Element, MemoryPage};

    fn view(food_type: Option<&str>, tags: &str) -> CardView {
        CardView {
            node: NodeKey(1),
            id: None,
            name: Some("Card".to_string()),
            description: None,
            food_type: food_type.map(FoodType::parse),
            tags: tags.to_string(),
        }
    }

    #[test]
    fn normalize_lowercases_and_trims() {
        assert_eq!(normalize_query("  MoMo \n"), "momo");
        assert_eq!(normalize_query("   "), "");
    }

    #[test]
    fn query_match_is_case_insensitive() {
        assert!(text_matches("momo", "momo special"));
        assert!(text_matches(&normalize_query("MoMo"), "MOMO Special"));
        assert!(text_matches("", "anything"));
        assert!(!text_matches("thukpa", "Chowmein"));
    }

    #[test]
    fn dietary_filter_compares_type_exactly() {
        let veg = FilterValue::parse("veg");
        assert!(matches_filter(&veg, &view(Some("veg"), "")));
        assert!(!matches_filter(&veg, &view(Some("non-veg"), "")));
        assert!(!matches_filter(&veg, &view(None, "veg")));
        assert!(matches_filter(&FilterValue::All, &view(None, "")));
    }

    #[test]
    fn tag_filter_is_substring_of_tag_text() {
        let spicy = FilterValue::parse("spicy");
        assert!(matches_filter(&spicy, &view(Some("veg"), "popular,spicy")));
        assert!(matches_filter(&spicy, &view(Some("veg"), "extra-spicy")));
        assert!(!matches_filter(&spicy, &view(Some("veg"), "mild")));
    }

    #[test]
    fn empty_sections_hide_with_their_titles() {
        let mut page = MemoryPage::new();
        let main = page.add_main_content();
        let momo = page.add_section(main, "Momo");
        let card = page.add_card(momo, CardData::new("a", "Veg Momo"));
        // A non-title block between title and section is skipped over.
        let noodles_title = page.append(
            main,
            Element::SectionTitle {
                text: "Noodles".to_string(),
            },
        );
        page.append(main, Element::Block);
        let noodles = page.append(main, Element::Section);
        page.add_card(noodles, CardData::new("b", "Chowmein"));

        page.set_visible(card, false);
        handle_empty_sections(&mut page);
        let momo_title = page.previous_sibling(momo).unwrap();
        assert!(!page.is_visible(momo));
        assert!(!page.is_visible(momo_title));
        assert!(page.is_visible(noodles));
        assert!(page.is_visible(noodles_title));

        page.set_visible(card, true);
        handle_empty_sections(&mut page);
        assert!(page.is_visible(momo));
        assert!(page.is_visible(momo_title));
    }
}
