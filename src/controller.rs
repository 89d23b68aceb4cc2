//! Board controller
//!
//! Owns the board's snapshot explicitly instead of relying on an ambient
//! query cache. Moves are fire-and-forget: each accepted drop spawns its own
//! write followed by an invalidate-and-refetch of the snapshot.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::board::drag::DEFAULT_ACTIVATION_DISTANCE;
use crate::board::{
    BoardAction, BoardItem, BoardState, BoardViewModel, DragEvent, MoveCommand, MoveDecision,
    PointerSensor, compute_board_view_model, reduce_board_state, unify_items,
};
use crate::config::Config;
use crate::error::{PlannerError, Result};
use crate::repository::{BoardRepository, BoardSnapshot};

/// What happened to a drop
#[derive(Debug)]
pub struct DropOutcome {
    pub decision: MoveDecision,
    /// Background write, present only when a command was issued.
    /// Dropping the handle does not cancel the write.
    pub pending: Option<JoinHandle<Result<()>>>,
}

pub struct BoardController {
    repo: Arc<dyn BoardRepository>,
    board_type: String,
    optimistic: bool,
    activation_distance: f64,
    snapshot: Arc<RwLock<BoardSnapshot>>,
    // Unified cards keyed on the snapshot generation they were derived from
    unified: Mutex<Option<(u64, Arc<Vec<BoardItem>>)>>,
    state: BoardState,
}

impl BoardController {
    /// Fetch the initial snapshot and build a controller around it
    pub async fn load(
        repo: Arc<dyn BoardRepository>,
        board_type: &str,
        optimistic: bool,
    ) -> Result<Self> {
        let snapshot = BoardSnapshot::fetch(repo.as_ref(), board_type).await?;
        Ok(BoardController {
            repo,
            board_type: board_type.to_string(),
            optimistic,
            activation_distance: DEFAULT_ACTIVATION_DISTANCE,
            snapshot: Arc::new(RwLock::new(snapshot)),
            unified: Mutex::new(None),
            state: BoardState::default(),
        })
    }

    /// Load using the board type, grouping and move settings from `config`
    pub async fn from_config(repo: Arc<dyn BoardRepository>, config: &Config) -> Result<Self> {
        let mut controller = Self::load(repo, &config.board_type, config.moves.optimistic).await?;
        controller.activation_distance = config.drag.activation_distance;
        controller.dispatch(BoardAction::SetGroupBy(config.swimlanes.group_by));
        Ok(controller)
    }

    pub fn board_type(&self) -> &str {
        &self.board_type
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// A fresh drag sensor using the configured activation distance.
    ///
    /// Drop regions are registered by whoever lays out the columns.
    pub fn sensor(&self) -> PointerSensor {
        PointerSensor::new(self.activation_distance)
    }

    /// Copy of the current snapshot
    pub fn snapshot(&self) -> BoardSnapshot {
        self.snapshot.read().clone()
    }

    /// Invalidate and refetch, returning the fresh snapshot
    pub async fn refresh(&self) -> Result<BoardSnapshot> {
        let fresh = BoardSnapshot::fetch(self.repo.as_ref(), &self.board_type).await?;
        Ok(store_snapshot(&self.snapshot, fresh))
    }

    /// Unified cards for the current snapshot, re-derived only when it changed
    pub fn items(&self) -> Arc<Vec<BoardItem>> {
        let snapshot = self.snapshot.read();
        let mut memo = self.unified.lock();
        if let Some((generation, items)) = memo.as_ref()
            && *generation == snapshot.generation
        {
            return Arc::clone(items);
        }

        let items = Arc::new(unify_items(&snapshot.items, &snapshot.work_orders));
        *memo = Some((snapshot.generation, Arc::clone(&items)));
        items
    }

    pub fn dispatch(&mut self, action: BoardAction) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce_board_state(state, action);
    }

    pub fn view_model(&self) -> BoardViewModel {
        let items = self.items();
        let snapshot = self.snapshot.read();
        compute_board_view_model(&self.state, &items, &snapshot.columns, &snapshot.staff)
    }

    /// Complete a drag over `over` (a column key, or nothing).
    ///
    /// An accepted move is written on the current tokio runtime. Called
    /// outside one, it fails with `NoRuntime` before touching the snapshot;
    /// skipped drops need no runtime.
    pub fn drop_item(&mut self, item_id: &str, over: Option<&str>) -> Result<DropOutcome> {
        let items = self.items();
        let decision = self.state.drag.on_drop_decision(item_id, over, &items);
        let pending = match decision.command() {
            Some(command) => {
                let runtime = Handle::try_current().map_err(|_| PlannerError::NoRuntime)?;
                Some(self.spawn_move(&runtime, command.clone()))
            }
            None => None,
        };
        Ok(DropOutcome { decision, pending })
    }

    /// Route a drag-engine event; drops produce an outcome
    pub fn handle_drag_event(&mut self, event: DragEvent) -> Result<Option<DropOutcome>> {
        match event {
            DragEvent::Start { item_id } => {
                self.dispatch(BoardAction::DragStart(item_id));
                Ok(None)
            }
            DragEvent::Cancel { .. } => {
                self.dispatch(BoardAction::DragCancel);
                Ok(None)
            }
            DragEvent::Drop { item_id, over } => {
                self.drop_item(&item_id, over.as_deref()).map(Some)
            }
        }
    }

    fn spawn_move(&self, runtime: &Handle, command: MoveCommand) -> JoinHandle<Result<()>> {
        let previous = if self.optimistic {
            let mut snapshot = self.snapshot.write();
            let previous = snapshot.set_item_column(&command.id, &command.column_id);
            snapshot.generation += 1;
            previous
        } else {
            None
        };

        let repo = Arc::clone(&self.repo);
        let snapshot = Arc::clone(&self.snapshot);
        let board_type = self.board_type.clone();

        runtime.spawn(async move {
            let result = repo.move_item(&command).await;
            match &result {
                Ok(()) => {
                    tracing::info!(id = %command.id, column = %command.column_id, "item moved");
                }
                Err(e) => {
                    tracing::warn!(id = %command.id, column = %command.column_id, "move failed: {e}");
                    if let Some(previous) = previous {
                        rollback(&snapshot, &command, &previous);
                    }
                }
            }

            match BoardSnapshot::fetch(repo.as_ref(), &board_type).await {
                Ok(fresh) => {
                    store_snapshot(&snapshot, fresh);
                }
                Err(e) => tracing::warn!("failed to refetch board after move: {e}"),
            }

            result
        })
    }
}

/// Replace the shared snapshot, advancing its generation
fn store_snapshot(slot: &RwLock<BoardSnapshot>, mut fresh: BoardSnapshot) -> BoardSnapshot {
    let mut current = slot.write();
    fresh.generation = current.generation + 1;
    *current = fresh;
    current.clone()
}

// Undo an optimistic patch unless something else already moved the item
fn rollback(slot: &RwLock<BoardSnapshot>, command: &MoveCommand, previous: &str) {
    let mut snapshot = slot.write();
    let still_patched = snapshot
        .items
        .iter()
        .any(|i| i.id == command.id && i.column_id == command.column_id);
    if still_patched {
        snapshot.set_item_column(&command.id, previous);
        snapshot.generation += 1;
    }
}
