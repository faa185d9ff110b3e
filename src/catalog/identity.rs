use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Stable identifier for a menu item (the card's `data-id`).
///
/// The same id may be rendered more than once on a page, e.g. in a
/// "popular" strip and again under its own category.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Dietary type carried in a card's `data-type` attribute.
///
/// `Other` keeps unknown markers (e.g. "egg") intact so they still compare
/// against filter values verbatim.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum FoodType {
    Veg,
    NonVeg,
    Other(String),
}

impl FoodType {
    pub fn as_str(&self) -> &str {
        match self {
            FoodType::Veg => "veg",
            FoodType::NonVeg => "non-veg",
            FoodType::Other(value) => value.as_str(),
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "veg" => FoodType::Veg,
            "non-veg" => FoodType::NonVeg,
            other => FoodType::Other(other.to_string()),
        }
    }
}

impl Serialize for FoodType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FoodType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

/// Value selected by a filter chip (`data-filter`).
///
/// "all" disables the category dimension, the two dietary values compare
/// against the card type, and anything else is treated as a tag token.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum FilterValue {
    #[default]
    All,
    Type(FoodType),
    Tag(String),
}

impl FilterValue {
    pub fn parse(value: &str) -> Self {
        match value {
            "all" => FilterValue::All,
            "veg" => FilterValue::Type(FoodType::Veg),
            "non-veg" => FilterValue::Type(FoodType::NonVeg),
            other => FilterValue::Tag(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FilterValue::All => "all",
            FilterValue::Type(food_type) => food_type.as_str(),
            FilterValue::Tag(tag) => tag.as_str(),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
