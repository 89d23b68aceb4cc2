pub mod board;
pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod paths;
pub mod repository;
pub mod types;

pub use board::{
    BoardAction, BoardFilter, BoardItem, BoardState, BoardViewModel, GroupBy, ItemSource,
    MoveCommand, MoveDecision, SkipReason,
};
pub use config::Config;
pub use controller::{BoardController, DropOutcome};
pub use error::{PlannerError, Result};
pub use repository::{BoardRepository, BoardSnapshot, FileRepository, MemoryRepository};
pub use types::{
    Column, ItemType, KANBAN_BOARD, PlannerItem, Priority, StaffMember, WorkOrder,
    WorkOrderStatus,
};
