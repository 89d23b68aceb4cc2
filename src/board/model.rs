//! Board model types for testable state management
//!
//! This module separates state (BoardState) from view (BoardViewModel)
//! enabling unit testing without any rendering layer.

use serde::Serialize;

use super::column::{ColumnViewModel, build_columns, orphaned_count};
use super::drag::DragController;
use super::filter::{BoardFilter, filter_items};
use super::item::BoardItem;
use super::swimlane::{GroupBy, LaneKey, group_into_swimlanes};
use crate::types::{Column, Priority, StaffMember};

/// Raw state that changes during user interaction
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    /// Active priority and search filter
    pub filter: BoardFilter,
    /// Current swimlane grouping mode
    pub group_by: GroupBy,
    /// Drag coordinator
    pub drag: DragController,
}

/// All synchronous actions on the board
#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
    // Filters
    /// Set or clear the priority filter
    SetPriorityFilter(Option<Priority>),
    /// Update the search query text
    UpdateSearch(String),
    /// Reset every filter
    ClearFilters,

    // Grouping
    /// Switch the swimlane mode
    SetGroupBy(GroupBy),

    // Drag
    /// A card was lifted
    DragStart(String),
    /// The drag was abandoned
    DragCancel,
}

/// Computed view model for rendering
#[derive(Debug, Clone, Serialize)]
pub struct BoardViewModel {
    /// Columns for the ungrouped board (always computed, used for headers)
    pub columns: Vec<ColumnViewModel>,
    /// Lanes when grouping is on, each with its own columns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swimlanes: Option<Vec<SwimlaneViewModel>>,
    /// Card following the pointer during a drag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drag_overlay: Option<BoardItem>,
    pub filter: BoardFilter,
    pub group_by: GroupBy,
    /// Cards before filtering
    pub total_items: usize,
    /// Cards after filtering
    pub total_filtered: usize,
    /// Filtered cards whose column does not exist
    pub hidden_items: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SwimlaneViewModel {
    pub key: LaneKey,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub item_count: usize,
    pub columns: Vec<ColumnViewModel>,
}

// ============================================================================
// Pure Functions
// ============================================================================

/// Pure function: compute view model from state and the unified cards
///
/// Filtering, grouping and column bucketing all happen here so the renderer
/// only walks the result.
pub fn compute_board_view_model(
    state: &BoardState,
    items: &[BoardItem],
    columns: &[Column],
    staff: &[StaffMember],
) -> BoardViewModel {
    let filtered = filter_items(items, &state.filter);

    let swimlanes = group_into_swimlanes(&filtered, staff, state.group_by).map(|lanes| {
        lanes
            .iter()
            .map(|lane| SwimlaneViewModel {
                key: lane.key.clone(),
                display_name: lane.display_name.clone(),
                avatar_url: lane.avatar_url.clone(),
                item_count: lane.items.len(),
                columns: build_columns(columns, &lane.items),
            })
            .collect()
    });

    BoardViewModel {
        columns: build_columns(columns, &filtered),
        swimlanes,
        drag_overlay: state.drag.active_item(items).cloned(),
        filter: state.filter.clone(),
        group_by: state.group_by,
        total_items: items.len(),
        total_filtered: filtered.len(),
        hidden_items: orphaned_count(columns, &filtered),
    }
}

/// Pure function: apply action to state (reducer pattern)
///
/// Drops are not handled here: they need the current cards and may issue a
/// write, so the controller runs them through `DragController` directly.
pub fn reduce_board_state(mut state: BoardState, action: BoardAction) -> BoardState {
    match action {
        BoardAction::SetPriorityFilter(priority) => {
            state.filter.priority = priority;
        }
        BoardAction::UpdateSearch(query) => {
            state.filter.search = query;
        }
        BoardAction::ClearFilters => {
            state.filter = BoardFilter::default();
        }
        BoardAction::SetGroupBy(group_by) => {
            state.group_by = group_by;
        }
        BoardAction::DragStart(item_id) => {
            state.drag.on_start(&item_id);
        }
        BoardAction::DragCancel => {
            state.drag.on_cancel();
        }
    }
    state
}

// ============================================================================
// Tests
// ============================================================================
