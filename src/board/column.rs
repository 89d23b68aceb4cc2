//! Column bucketing and work-in-progress flags

use serde::Serialize;

use super::item::BoardItem;
use crate::types::Column;

/// Advisory WIP state of a column. Styling only; drops are never refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WipStatus {
    pub has_limit: bool,
    pub is_over_limit: bool,
}

impl WipStatus {
    pub fn of(wip_limit: Option<u32>, item_count: usize) -> Self {
        let limit = wip_limit.unwrap_or(0);
        let has_limit = limit > 0;
        WipStatus {
            has_limit,
            is_over_limit: has_limit && item_count > limit as usize,
        }
    }
}

/// View model for one rendered column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnViewModel {
    /// Drop-target identity
    pub key: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wip_limit: Option<u32>,
    pub item_count: usize,
    pub wip: WipStatus,
    /// Cards in encounter order
    pub cards: Vec<BoardItem>,
}

impl ColumnViewModel {
    pub fn new(column: &Column, cards: Vec<BoardItem>) -> Self {
        let item_count = cards.len();
        ColumnViewModel {
            key: column.column_key.clone(),
            name: column.column_name.clone(),
            color: column.color.clone(),
            wip_limit: column.wip_limit,
            item_count,
            wip: WipStatus::of(column.wip_limit, item_count),
            cards,
        }
    }

    /// Whether the placeholder should be shown instead of cards
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Count badge, e.g. "3" or "6/5" when a limit is set
    pub fn count_badge(&self) -> String {
        match self.wip_limit {
            Some(limit) if self.wip.has_limit => format!("{}/{}", self.item_count, limit),
            _ => self.item_count.to_string(),
        }
    }
}

/// Cards placed in `column_key`, in encounter order
pub fn column_items(items: &[BoardItem], column_key: &str) -> Vec<BoardItem> {
    items
        .iter()
        .filter(|item| item.column_id == column_key)
        .cloned()
        .collect()
}

/// Bucket cards into the given columns.
///
/// Cards whose `column_id` matches no column are not rendered.
pub fn build_columns(columns: &[Column], items: &[BoardItem]) -> Vec<ColumnViewModel> {
    columns
        .iter()
        .map(|column| ColumnViewModel::new(column, column_items(items, &column.column_key)))
        .collect()
}

/// Number of cards that no column will render
pub fn orphaned_count(columns: &[Column], items: &[BoardItem]) -> usize {
    items
        .iter()
        .filter(|item| !columns.iter().any(|c| c.column_key == item.column_id))
        .count()
}
