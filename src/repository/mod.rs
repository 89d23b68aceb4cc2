//! Data-layer boundary for the board
//!
//! The board never reaches for a global cache: callers inject a
//! `BoardRepository` and work with explicit `BoardSnapshot`s.

mod file;
mod memory;

pub use file::FileRepository;
pub use memory::MemoryRepository;

use crate::board::MoveCommand;
use crate::error::Result;
use crate::types::{Column, PlannerItem, StaffMember, WorkOrder};

/// Sources the board reads from and the single write it issues
#[async_trait::async_trait]
pub trait BoardRepository: Send + Sync {
    /// Ordered column definitions for a board type
    async fn columns(&self, board_type: &str) -> Result<Vec<Column>>;

    /// Native items for a board type
    async fn items(&self, board_type: &str) -> Result<Vec<PlannerItem>>;

    /// Externally owned work orders (read only)
    async fn work_orders(&self) -> Result<Vec<WorkOrder>>;

    /// Staff roster used for swimlane seeding
    async fn staff(&self) -> Result<Vec<StaffMember>>;

    /// Persist a column move for a native item
    async fn move_item(&self, command: &MoveCommand) -> Result<()>;
}

/// Everything a render pass needs, fetched together
#[derive(Debug, Clone, Default)]
pub struct BoardSnapshot {
    pub columns: Vec<Column>,
    pub items: Vec<PlannerItem>,
    pub work_orders: Vec<WorkOrder>,
    pub staff: Vec<StaffMember>,
    /// Bumped on every refetch; identity key for derived data
    pub generation: u64,
}

impl BoardSnapshot {
    /// Load all four sources concurrently
    pub async fn fetch(repo: &dyn BoardRepository, board_type: &str) -> Result<Self> {
        let (columns, items, work_orders, staff) = futures::try_join!(
            repo.columns(board_type),
            repo.items(board_type),
            repo.work_orders(),
            repo.staff(),
        )?;

        Ok(BoardSnapshot {
            columns,
            items,
            work_orders,
            staff,
            generation: 0,
        })
    }

    pub fn has_column(&self, key: &str) -> bool {
        self.columns.iter().any(|c| c.column_key == key)
    }

    /// Patch a native item's column locally; returns the previous column
    pub fn set_item_column(&mut self, id: &str, column_id: &str) -> Option<String> {
        let item = self.items.iter_mut().find(|i| i.id == id)?;
        Some(std::mem::replace(&mut item.column_id, column_id.to_string()))
    }
}
