use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity categories the extraction actor keeps values for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Person,
    Date,
    Location,
    Organization,
    Money,
    Percent,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Person,
        Category::Date,
        Category::Location,
        Category::Organization,
        Category::Money,
        Category::Percent,
    ];

    /// Tag used on the wire, e.g. in `GET_EXTRACTED_PERSON`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Person => "PERSON",
            Category::Date => "DATE",
            Category::Location => "LOCATION",
            Category::Organization => "ORGANIZATION",
            Category::Money => "MONEY",
            Category::Percent => "PERCENT",
        }
    }

    /// Plural name shown to chat users.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Person => "people",
            Category::Date => "dates",
            Category::Location => "locations",
            Category::Organization => "organizations",
            Category::Money => "amounts of money",
            Category::Percent => "percentages",
        }
    }

    /// Map an annotation label onto a supported category.
    ///
    /// Matching is case-insensitive and accepts the short tags common NER
    /// tools emit (`PER`, `LOC`, `ORG`, `GPE`). Anything else is `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "PERSON" | "PER" | "PEOPLE" => Some(Category::Person),
            "DATE" => Some(Category::Date),
            "LOCATION" | "LOC" | "GPE" => Some(Category::Location),
            "ORGANIZATION" | "ORGANISATION" | "ORG" => Some(Category::Organization),
            "MONEY" => Some(Category::Money),
            "PERCENT" | "PERCENTAGE" => Some(Category::Percent),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
