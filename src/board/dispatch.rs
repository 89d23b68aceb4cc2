//! Move decision for a completed drop
//!
//! The only business rules of the drag flow live here. A drop either produces
//! a single `MoveCommand` or is skipped for one of a few benign reasons.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::item::BoardItem;

/// Relocate one native card to a new column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCommand {
    pub id: String,
    pub column_id: String,
}

/// Why a drop did not produce a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Released outside every drop target
    NoTarget,
    /// The dragged id is not on the board any more
    UnknownItem,
    /// Dropped on the column it already sits in
    SameColumn,
    /// Work-order cards are read only with respect to column moves
    DerivedItem,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoTarget => write!(f, "no drop target"),
            SkipReason::UnknownItem => write!(f, "item is not on the board"),
            SkipReason::SameColumn => write!(f, "item is already in that column"),
            SkipReason::DerivedItem => write!(f, "work-order cards cannot be moved from the board"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveDecision {
    Move(MoveCommand),
    Skip { reason: SkipReason },
}

impl MoveDecision {
    fn skip(reason: SkipReason) -> Self {
        MoveDecision::Skip { reason }
    }

    pub fn command(&self) -> Option<&MoveCommand> {
        match self {
            MoveDecision::Move(cmd) => Some(cmd),
            MoveDecision::Skip { .. } => None,
        }
    }

    pub fn into_command(self) -> Option<MoveCommand> {
        match self {
            MoveDecision::Move(cmd) => Some(cmd),
            MoveDecision::Skip { .. } => None,
        }
    }
}

/// Decide what dropping `item_id` over `over` should do
pub fn decide_move(items: &[BoardItem], item_id: &str, over: Option<&str>) -> MoveDecision {
    let Some(target) = over else {
        return MoveDecision::skip(SkipReason::NoTarget);
    };

    let Some(item) = items.iter().find(|i| i.id == item_id) else {
        return MoveDecision::skip(SkipReason::UnknownItem);
    };

    if item.column_id == target {
        return MoveDecision::skip(SkipReason::SameColumn);
    }

    if item.is_read_only() {
        return MoveDecision::skip(SkipReason::DerivedItem);
    }

    MoveDecision::Move(MoveCommand {
        id: item.id.clone(),
        column_id: target.to_string(),
    })
}
