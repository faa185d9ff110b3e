//! Arena-backed in-memory page.
//!
//! Elements live in a flat `Vec` and refer to each other by `NodeKey`. Removed
//! elements stay in the arena but are detached, so stale keys never alias a
//! different element.

use super::{CardView, FilterChip, HeartState, NodeKey, Notice, Page, anchors};
use crate::catalog::{FoodItem, FoodType, ItemId};
use serde::Serialize;

/// Element kinds the menu page is built from.
#[derive(Clone, Debug)]
pub enum Element {
    Body,
    MainContent,
    Form,
    Input { value: String },
    Button { label: String },
    FilterChip { filter: Option<String>, active: bool },
    SectionTitle { text: String },
    Section,
    Card(CardData),
    Notice(Notice),
    Block,
}

/// Attributes and nested content of one item card.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardData {
    pub id: Option<ItemId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub food_type: Option<FoodType>,
    pub tags: String,
    /// `None` when the card renders no favorite button.
    pub favorite: Option<HeartState>,
}

impl CardData {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: Some(ItemId::from(id)),
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_type(mut self, food_type: &str) -> Self {
        self.food_type = Some(FoodType::parse(food_type));
        self
    }

    pub fn with_tags(mut self, tags: &str) -> Self {
        self.tags = tags.to_string();
        self
    }

    pub fn with_favorite_button(mut self) -> Self {
        self.favorite = Some(HeartState::Outline);
        self
    }
}

impl From<&FoodItem> for CardData {
    fn from(item: &FoodItem) -> Self {
        Self {
            id: Some(item.id.clone()),
            name: Some(item.name.clone()),
            description: item.description.clone(),
            food_type: Some(item.food_type.clone()),
            tags: item.tags_attribute(),
            favorite: Some(HeartState::Outline),
        }
    }
}

#[derive(Clone, Debug)]
struct Node {
    element: Element,
    id: Option<String>,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
    hidden: bool,
    attached: bool,
}

/// In-memory page tree rooted at a body element.
#[derive(Clone, Debug)]
pub struct MemoryPage {
    nodes: Vec<Node>,
    body: NodeKey,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    pub fn new() -> Self {
        let body = Node {
            element: Element::Body,
            id: None,
            parent: None,
            children: Vec::new(),
            hidden: false,
            attached: true,
        };
        Self {
            nodes: vec![body],
            body: NodeKey(0),
        }
    }

    pub fn body(&self) -> NodeKey {
        self.body
    }

    /// Append `element` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeKey, element: Element) -> NodeKey {
        self.insert_child(parent, None, element, None)
    }

    /// Append `element` carrying the element id `id`.
    pub fn append_with_id(&mut self, parent: NodeKey, id: &str, element: Element) -> NodeKey {
        self.insert_child(parent, Some(id.to_string()), element, None)
    }

    pub fn add_main_content(&mut self) -> NodeKey {
        self.append(self.body, Element::MainContent)
    }

    pub fn add_input(&mut self, parent: NodeKey, id: &str) -> NodeKey {
        self.append_with_id(
            parent,
            id,
            Element::Input {
                value: String::new(),
            },
        )
    }

    pub fn add_filter_chip(&mut self, parent: NodeKey, filter: &str) -> NodeKey {
        self.append(
            parent,
            Element::FilterChip {
                filter: Some(filter.to_string()),
                active: filter == "all",
            },
        )
    }

    /// Append a section title followed by its (empty) section container.
    /// Returns the section.
    pub fn add_section(&mut self, parent: NodeKey, title: &str) -> NodeKey {
        self.append(
            parent,
            Element::SectionTitle {
                text: title.to_string(),
            },
        );
        self.append(parent, Element::Section)
    }

    pub fn add_card(&mut self, section: NodeKey, card: CardData) -> NodeKey {
        self.append(section, Element::Card(card))
    }

    pub fn element(&self, node: NodeKey) -> Option<&Element> {
        self.nodes.get(node.0).map(|n| &n.element)
    }

    pub fn card(&self, node: NodeKey) -> Option<&CardData> {
        match self.element(node)? {
            Element::Card(card) => Some(card),
            _ => None,
        }
    }

    /// Active state of a filter chip; false for anything else.
    pub fn is_active(&self, node: NodeKey) -> bool {
        matches!(
            self.element(node),
            Some(Element::FilterChip { active: true, .. })
        )
    }

    pub fn favorite_state(&self, card: NodeKey) -> Option<HeartState> {
        self.card(card)?.favorite
    }

    /// The no-results notice, when one is attached.
    pub fn notice(&self) -> Option<&Notice> {
        let node = self.element_by_id(anchors::NO_RESULTS_MESSAGE)?;
        match self.element(node)? {
            Element::Notice(notice) => Some(notice),
            _ => None,
        }
    }

    /// Names of cards whose own display state is visible, in document order.
    pub fn visible_card_names(&self) -> Vec<String> {
        self.walk()
            .into_iter()
            .filter(|key| !self.nodes[key.0].hidden)
            .filter_map(|key| self.card(key).and_then(|card| card.name.clone()))
            .collect()
    }

    /// Serializable summary of sections, cards and the notice.
    pub fn snapshot(&self) -> PageSnapshot {
        let sections = self
            .sections()
            .into_iter()
            .map(|section| {
                let title = self.title_for(section).and_then(|key| match self.element(key) {
                    Some(Element::SectionTitle { text }) => Some(text.clone()),
                    _ => None,
                });
                let cards = self
                    .children(section)
                    .into_iter()
                    .filter_map(|key| {
                        self.card(key).map(|card| CardSnapshot {
                            id: card.id.clone(),
                            name: card.name.clone(),
                            visible: self.is_visible(key),
                            favorite: card.favorite,
                        })
                    })
                    .collect();
                SectionSnapshot {
                    title,
                    visible: self.is_visible(section),
                    cards,
                }
            })
            .collect();
        PageSnapshot {
            notice: self.notice().cloned(),
            sections,
        }
    }

    fn title_for(&self, section: NodeKey) -> Option<NodeKey> {
        let mut cursor = self.previous_sibling(section);
        while let Some(node) = cursor {
            if self.is_section_title(node) {
                return Some(node);
            }
            cursor = self.previous_sibling(node);
        }
        None
    }

    fn insert_child(
        &mut self,
        parent: NodeKey,
        id: Option<String>,
        element: Element,
        position: Option<usize>,
    ) -> NodeKey {
        let key = NodeKey(self.nodes.len());
        let attached = self.nodes[parent.0].attached;
        self.nodes.push(Node {
            element,
            id,
            parent: Some(parent),
            children: Vec::new(),
            hidden: false,
            attached,
        });
        let siblings = &mut self.nodes[parent.0].children;
        match position {
            Some(index) if index <= siblings.len() => siblings.insert(index, key),
            _ => siblings.push(key),
        }
        key
    }

    /// Attached nodes in document (pre-)order, body first.
    fn walk(&self) -> Vec<NodeKey> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.body];
        while let Some(key) = stack.pop() {
            order.push(key);
            stack.extend(self.nodes[key.0].children.iter().rev().copied());
        }
        order
    }

    fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key.0).filter(|node| node.attached)
    }
}

impl Page for MemoryPage {
    fn element_by_id(&self, id: &str) -> Option<NodeKey> {
        self.walk()
            .into_iter()
            .find(|key| self.nodes[key.0].id.as_deref() == Some(id))
    }

    fn main_content(&self) -> Option<NodeKey> {
        self.walk()
            .into_iter()
            .find(|key| matches!(self.nodes[key.0].element, Element::MainContent))
    }

    fn value(&self, node: NodeKey) -> Option<String> {
        match &self.node(node)?.element {
            Element::Input { value } => Some(value.clone()),
            _ => None,
        }
    }

    fn set_value(&mut self, node: NodeKey, new_value: &str) {
        if let Some(Element::Input { value }) = self.nodes.get_mut(node.0).map(|n| &mut n.element)
        {
            *value = new_value.to_string();
        }
    }

    fn filter_chips(&self) -> Vec<FilterChip> {
        self.walk()
            .into_iter()
            .filter_map(|key| match &self.nodes[key.0].element {
                Element::FilterChip { filter, .. } => Some(FilterChip {
                    node: key,
                    filter: filter.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    fn set_active(&mut self, node: NodeKey, is_active: bool) {
        if let Some(Element::FilterChip { active, .. }) =
            self.nodes.get_mut(node.0).map(|n| &mut n.element)
        {
            *active = is_active;
        }
    }

    fn item_cards(&self) -> Vec<CardView> {
        self.walk()
            .into_iter()
            .filter_map(|key| {
                self.card(key).map(|card| CardView {
                    node: key,
                    id: card.id.clone(),
                    name: card.name.clone(),
                    description: card.description.clone(),
                    food_type: card.food_type.clone(),
                    tags: card.tags.clone(),
                })
            })
            .collect()
    }

    fn cards_with_id(&self, id: &ItemId) -> Vec<NodeKey> {
        self.walk()
            .into_iter()
            .filter(|key| self.card(*key).and_then(|c| c.id.as_ref()) == Some(id))
            .collect()
    }

    fn sections(&self) -> Vec<NodeKey> {
        self.walk()
            .into_iter()
            .filter(|key| matches!(self.nodes[key.0].element, Element::Section))
            .collect()
    }

    fn children(&self, node: NodeKey) -> Vec<NodeKey> {
        self.node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn previous_sibling(&self, node: NodeKey) -> Option<NodeKey> {
        let parent = self.node(node)?.parent?;
        let siblings = &self.nodes[parent.0].children;
        let index = siblings.iter().position(|key| *key == node)?;
        index.checked_sub(1).map(|prev| siblings[prev])
    }

    fn is_section_title(&self, node: NodeKey) -> bool {
        matches!(
            self.node(node).map(|n| &n.element),
            Some(Element::SectionTitle { .. })
        )
    }

    fn is_visible(&self, node: NodeKey) -> bool {
        self.node(node).is_some_and(|n| !n.hidden)
    }

    fn set_visible(&mut self, node: NodeKey, visible: bool) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.hidden = !visible;
        }
    }

    fn prepend_notice(&mut self, parent: NodeKey, notice: &Notice) -> NodeKey {
        self.insert_child(
            parent,
            Some(notice.id.clone()),
            Element::Notice(notice.clone()),
            Some(0),
        )
    }

    fn remove(&mut self, node: NodeKey) {
        if node == self.body {
            return;
        }
        let Some(parent) = self.nodes.get(node.0).and_then(|n| n.parent) else {
            return;
        };
        self.nodes[parent.0].children.retain(|key| *key != node);
        let mut stack = vec![node];
        while let Some(key) = stack.pop() {
            let n = &mut self.nodes[key.0];
            n.attached = false;
            stack.extend(n.children.iter().copied());
        }
    }

    fn set_favorite_indicator(&mut self, card: NodeKey, state: HeartState) -> bool {
        match self.nodes.get_mut(card.0).map(|n| &mut n.element) {
            Some(Element::Card(CardData {
                favorite: Some(current),
                ..
            })) => {
                *current = state;
                true
            }
            _ => false,
        }
    }
}

/// Section-level view of a page, as printed by `menu-search`.
#[derive(Clone, Debug, Serialize)]
pub struct PageSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
    pub sections: Vec<SectionSnapshot>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SectionSnapshot {
    pub title: Option<String>,
    pub visible: bool,
    pub cards: Vec<CardSnapshot>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CardSnapshot {
    pub id: Option<ItemId>,
    pub name: Option<String>,
    pub visible: bool,
    pub favorite: Option<HeartState>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previous_sibling_walks_back_to_title() {
        let mut page = MemoryPage::new();
        let main = page.add_main_content();
        let section = page.add_section(main, "Momo");
        let title = page.previous_sibling(section).expect("title precedes section");
        assert!(page.is_section_title(title));
        assert!(page.previous_sibling(title).is_none());
    }

    #[test]
    fn removed_nodes_drop_out_of_queries() {
        let mut page = MemoryPage::new();
        let main = page.add_main_content();
        let notice = page.prepend_notice(main, &Notice::no_results());
        assert_eq!(page.element_by_id(anchors::NO_RESULTS_MESSAGE), Some(notice));

        page.remove(notice);
        assert!(page.element_by_id(anchors::NO_RESULTS_MESSAGE).is_none());
        assert!(!page.is_visible(notice));
        assert!(page.children(main).is_empty());
    }

    #[test]
    fn prepend_places_notice_before_sections() {
        let mut page = MemoryPage::new();
        let main = page.add_main_content();
        let section = page.add_section(main, "Momo");
        let notice = page.prepend_notice(main, &Notice::no_results());
        assert_eq!(page.children(main).first(), Some(&notice));
        assert_eq!(page.children(main).last(), Some(&section));
    }

    #[test]
    fn cards_are_listed_in_document_order() {
        let mut page = MemoryPage::new();
        let main = page.add_main_content();
        let first = page.add_section(main, "Momo");
        let second = page.add_section(main, "Noodles");
        page.add_card(second, CardData::new("c", "Chowmein"));
        page.add_card(first, CardData::new("a", "Veg Momo"));
        page.add_card(first, CardData::new("b", "Jhol Momo"));

        let names: Vec<_> = page
            .item_cards()
            .into_iter()
            .filter_map(|card| card.name)
            .collect();
        assert_eq!(names, ["Veg Momo", "Jhol Momo", "Chowmein"]);
    }

    #[test]
    fn favorite_indicator_requires_a_button() {
        let mut page = MemoryPage::new();
        let main = page.add_main_content();
        let section = page.add_section(main, "Momo");
        let plain = page.add_card(section, CardData::new("a", "Veg Momo"));
        let with_button = page.add_card(
            section,
            CardData::new("b", "Jhol Momo").with_favorite_button(),
        );

        assert!(!page.set_favorite_indicator(plain, HeartState::Filled));
        assert!(page.set_favorite_indicator(with_button, HeartState::Filled));
        assert_eq!(page.favorite_state(with_button), Some(HeartState::Filled));
        assert_eq!(page.favorite_state(plain), None);
    }
}
