//! Kanban planner board
//!
//! Pipeline: unify sources into cards, filter, optionally group into
//! swimlanes, bucket by column, then coordinate drags and decide moves.

pub mod column;
pub mod dispatch;
pub mod drag;
pub mod filter;
pub mod item;
pub mod model;
pub mod swimlane;

pub use column::{ColumnViewModel, WipStatus, build_columns, column_items};
pub use dispatch::{MoveCommand, MoveDecision, SkipReason, decide_move};
pub use drag::{DragController, DragEvent, DragState, Point, PointerSensor, Rect};
pub use filter::{BoardFilter, filter_items};
pub use item::{BoardItem, ItemSource, column_for_status, unify_items};
pub use model::{
    BoardAction, BoardState, BoardViewModel, SwimlaneViewModel, compute_board_view_model,
    reduce_board_state,
};
pub use swimlane::{GroupBy, LaneKey, Swimlane, Swimlanes, group_into_swimlanes};
