use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::RwLock;

use super::BoardRepository;
use crate::board::MoveCommand;
use crate::error::{PlannerError, Result};
use crate::types::{Column, PlannerItem, StaffMember, WorkOrder};

#[derive(Debug, Default)]
struct Tables {
    columns: Vec<Column>,
    items: Vec<PlannerItem>,
    work_orders: Vec<WorkOrder>,
    staff: Vec<StaffMember>,
}

/// In-process board store.
///
/// Cloning shares the underlying tables, so a test can keep a handle while
/// the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    tables: Arc<RwLock<Tables>>,
    moves: Arc<RwLock<Vec<MoveCommand>>>,
    fetches: Arc<AtomicUsize>,
    fail_moves: Arc<AtomicBool>,
}

impl MemoryRepository {
    pub fn new(
        columns: Vec<Column>,
        items: Vec<PlannerItem>,
        work_orders: Vec<WorkOrder>,
        staff: Vec<StaffMember>,
    ) -> Self {
        MemoryRepository {
            tables: Arc::new(RwLock::new(Tables {
                columns,
                items,
                work_orders,
                staff,
            })),
            ..Default::default()
        }
    }

    /// Every move command received, in arrival order
    pub fn moves(&self) -> Vec<MoveCommand> {
        self.moves.read().clone()
    }

    /// Number of item fetches served (one per snapshot load)
    pub fn item_fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Make subsequent moves fail, as a lost connection would
    pub fn fail_moves(&self, fail: bool) {
        self.fail_moves.store(fail, Ordering::SeqCst);
    }

    pub fn item(&self, id: &str) -> Option<PlannerItem> {
        self.tables.read().items.iter().find(|i| i.id == id).cloned()
    }

    pub fn insert_item(&self, item: PlannerItem) {
        self.tables.write().items.push(item);
    }
}

#[async_trait::async_trait]
impl BoardRepository for MemoryRepository {
    async fn columns(&self, _board_type: &str) -> Result<Vec<Column>> {
        Ok(self.tables.read().columns.clone())
    }

    async fn items(&self, board_type: &str) -> Result<Vec<PlannerItem>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .tables
            .read()
            .items
            .iter()
            .filter(|i| i.board_type == board_type)
            .cloned()
            .collect())
    }

    async fn work_orders(&self) -> Result<Vec<WorkOrder>> {
        Ok(self.tables.read().work_orders.clone())
    }

    async fn staff(&self) -> Result<Vec<StaffMember>> {
        Ok(self.tables.read().staff.clone())
    }

    async fn move_item(&self, command: &MoveCommand) -> Result<()> {
        if self.fail_moves.load(Ordering::SeqCst) {
            return Err(PlannerError::Repository(format!(
                "failed to move '{}'",
                command.id
            )));
        }

        {
            let mut tables = self.tables.write();
            let item = tables
                .items
                .iter_mut()
                .find(|i| i.id == command.id)
                .ok_or_else(|| PlannerError::ItemNotFound(command.id.clone()))?;
            item.column_id = command.column_id.clone();
        }
        self.moves.write().push(command.clone());
        Ok(())
    }
}
