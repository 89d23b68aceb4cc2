use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tokio::sync::Mutex;

use super::BoardRepository;
use crate::board::MoveCommand;
use crate::error::{PlannerError, Result};
use crate::paths::planner_root;
use crate::types::{Column, PlannerItem, StaffMember, WorkOrder};

const COLUMNS_FILE: &str = "columns.yaml";
const ITEMS_FILE: &str = "items.yaml";
const WORK_ORDERS_FILE: &str = "work_orders.yaml";
const STAFF_FILE: &str = "staff.yaml";

/// Board store backed by YAML lists in a planner directory
#[derive(Debug)]
pub struct FileRepository {
    root: PathBuf,
    // Serializes read-modify-write cycles on items.yaml within this process
    write_lock: Mutex<()>,
}

impl FileRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileRepository {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Repository rooted at `PLANNER_ROOT` or `./.planner`
    pub fn from_env() -> Self {
        Self::new(planner_root())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Create the directory with the given columns and empty sources.
    ///
    /// Existing files are left untouched.
    pub async fn init(&self, columns: &[Column]) -> Result<bool> {
        fs::create_dir_all(&self.root).await?;

        let mut created = false;
        if !self.path(COLUMNS_FILE).exists() {
            self.write_list(COLUMNS_FILE, columns).await?;
            created = true;
        }
        for file in [ITEMS_FILE, WORK_ORDERS_FILE, STAFF_FILE] {
            if !self.path(file).exists() {
                self.write_list::<PlannerItem>(file, &[]).await?;
                created = true;
            }
        }
        Ok(created)
    }

    fn path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    async fn read_list<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.path(file);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("{} not found, treating as empty", path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(PlannerError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to read {}: {}", path.display(), e),
                )));
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let list: Option<Vec<T>> = serde_yaml_ng::from_str(&content)?;
        Ok(list.unwrap_or_default())
    }

    async fn write_list<T: Serialize>(&self, file: &str, list: &[T]) -> Result<()> {
        let path = self.path(file);
        let content = serde_yaml_ng::to_string(list)?;

        // Write to a sibling then rename so readers never see a partial file
        let tmp = path.with_extension("yaml.tmp");
        fs::write(&tmp, content).await.map_err(|e| {
            PlannerError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write {}: {}", tmp.display(), e),
            ))
        })?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl BoardRepository for FileRepository {
    async fn columns(&self, _board_type: &str) -> Result<Vec<Column>> {
        self.read_list(COLUMNS_FILE).await
    }

    async fn items(&self, board_type: &str) -> Result<Vec<PlannerItem>> {
        let items: Vec<PlannerItem> = self.read_list(ITEMS_FILE).await?;
        Ok(items
            .into_iter()
            .filter(|i| i.board_type == board_type)
            .collect())
    }

    async fn work_orders(&self) -> Result<Vec<WorkOrder>> {
        self.read_list(WORK_ORDERS_FILE).await
    }

    async fn staff(&self) -> Result<Vec<StaffMember>> {
        self.read_list(STAFF_FILE).await
    }

    async fn move_item(&self, command: &MoveCommand) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut items: Vec<PlannerItem> = self.read_list(ITEMS_FILE).await?;
        let item = items
            .iter_mut()
            .find(|i| i.id == command.id)
            .ok_or_else(|| PlannerError::ItemNotFound(command.id.clone()))?;
        item.column_id = command.column_id.clone();

        self.write_list(ITEMS_FILE, &items).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{KANBAN_BOARD, WorkOrderStatus, default_columns};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_files_read_as_empty() {
        let dir = TempDir::new().unwrap();
        let repo = FileRepository::new(dir.path().join(".planner"));
        assert!(repo.columns(KANBAN_BOARD).await.unwrap().is_empty());
        assert!(repo.items(KANBAN_BOARD).await.unwrap().is_empty());
        assert!(repo.work_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_init_writes_columns_once() {
        let dir = TempDir::new().unwrap();
        let repo = FileRepository::new(dir.path().join(".planner"));
        assert!(repo.init(&default_columns()).await.unwrap());
        assert!(!repo.init(&default_columns()).await.unwrap());

        let columns = repo.columns(KANBAN_BOARD).await.unwrap();
        assert_eq!(columns, default_columns());
    }

    #[tokio::test]
    async fn test_reads_work_orders_yaml() {
        let dir = TempDir::new().unwrap();
        let repo = FileRepository::new(dir.path());
        std::fs::write(
            dir.path().join(WORK_ORDERS_FILE),
            r#"
- id: "42"
  title: Pump out tank
  status: in_progress
  assigned_technician: emp-1
- id: "43"
  status: rescheduled
"#,
        )
        .unwrap();

        let orders = repo.work_orders().await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].status, Some(WorkOrderStatus::InProgress));
        assert_eq!(orders[1].status, Some(WorkOrderStatus::Unknown));
        assert_eq!(orders[1].title, "");
    }

    #[tokio::test]
    async fn test_move_item_rewrites_items() {
        let dir = TempDir::new().unwrap();
        let repo = FileRepository::new(dir.path());
        std::fs::write(
            dir.path().join(ITEMS_FILE),
            r#"
- id: item-1
  title: Order parts
  column_id: todo
- id: item-2
  title: Call customer
  column_id: todo
"#,
        )
        .unwrap();

        repo.move_item(&MoveCommand {
            id: "item-2".to_string(),
            column_id: "done".to_string(),
        })
        .await
        .unwrap();

        let items = repo.items(KANBAN_BOARD).await.unwrap();
        assert_eq!(items[0].column_id, "todo");
        assert_eq!(items[1].column_id, "done");
        assert!(!dir.path().join("items.yaml.tmp").exists());
    }

    #[tokio::test]
    async fn test_move_unknown_item_errors() {
        let dir = TempDir::new().unwrap();
        let repo = FileRepository::new(dir.path());
        let result = repo
            .move_item(&MoveCommand {
                id: "ghost".to_string(),
                column_id: "done".to_string(),
            })
            .await;
        assert!(matches!(result, Err(PlannerError::ItemNotFound(id)) if id == "ghost"));
    }
}
