use std::path::PathBuf;

/// Returns the root planner directory path.
///
/// Resolution order:
/// 1. `PLANNER_ROOT` environment variable (if set)
/// 2. Current working directory + `.planner`
pub fn planner_root() -> PathBuf {
    if let Ok(root) = std::env::var("PLANNER_ROOT") {
        PathBuf::from(root)
    } else {
        PathBuf::from(".planner")
    }
}

/// Returns the path to the column definitions file.
pub fn columns_path() -> PathBuf {
    planner_root().join("columns.yaml")
}

/// Returns the path to the native board items file.
pub fn items_path() -> PathBuf {
    planner_root().join("items.yaml")
}

/// Returns the path to the work-order export.
pub fn work_orders_path() -> PathBuf {
    planner_root().join("work_orders.yaml")
}

/// Returns the path to the staff roster.
pub fn staff_path() -> PathBuf {
    planner_root().join("staff.yaml")
}
