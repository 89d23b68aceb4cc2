//! Priority and text filtering for board cards

use serde::{Deserialize, Serialize};

use super::item::BoardItem;
use crate::types::Priority;

/// User-specified filter; every active predicate must pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardFilter {
    /// Exact priority match when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Case-insensitive title substring when non-empty; whitespace counts
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub search: String,
}

impl BoardFilter {
    pub fn new(priority: Option<Priority>, search: &str) -> Self {
        BoardFilter {
            priority,
            search: search.to_string(),
        }
    }

    /// True when no predicate is active
    pub fn is_empty(&self) -> bool {
        self.priority.is_none() && self.search.is_empty()
    }

    /// Whether a single card passes the filter
    pub fn matches(&self, item: &BoardItem) -> bool {
        if let Some(priority) = self.priority
            && item.priority != Some(priority)
        {
            return false;
        }

        if !self.search.is_empty() && !title_contains(&item.title, &self.search) {
            return false;
        }

        true
    }
}

fn title_contains(title: &str, needle: &str) -> bool {
    title.to_lowercase().contains(&needle.to_lowercase())
}

/// Keep the cards that pass `filter`, preserving order
pub fn filter_items(items: &[BoardItem], filter: &BoardFilter) -> Vec<BoardItem> {
    if filter.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect()
}
