//! Category model for miniboard.
//!
//! Posts are filed under exactly one category from a closed set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Topic category of a post.
///
/// On the wire a category is its upper-case name (`"FOOD"`); parsing accepts
/// any letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum Category {
    /// Everyday life.
    Daily,
    /// Food and restaurants.
    Food,
    /// Travel.
    Travel,
    /// Hobbies.
    Hobby,
    /// Study and work.
    Study,
    /// Anything else.
    #[default]
    Etc,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 6] = [
        Category::Daily,
        Category::Food,
        Category::Travel,
        Category::Hobby,
        Category::Study,
        Category::Etc,
    ];

    /// Convert category to its database/wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Daily => "DAILY",
            Category::Food => "FOOD",
            Category::Travel => "TRAVEL",
            Category::Hobby => "HOBBY",
            Category::Study => "STUDY",
            Category::Etc => "ETC",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

impl TryFrom<String> for Category {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
