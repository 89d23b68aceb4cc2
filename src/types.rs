use jiff::Timestamp;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PlannerError;

/// Board type the planner views load items for
pub const KANBAN_BOARD: &str = "kanban";

// Column keys produced by the work-order status mapping
pub const COLUMN_BACKLOG: &str = "backlog";
pub const COLUMN_TODO: &str = "todo";
pub const COLUMN_IN_PROGRESS: &str = "in_progress";
pub const COLUMN_REVIEW: &str = "review";
pub const COLUMN_DONE: &str = "done";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    WorkOrder,
    #[default]
    Task,
    Note,
    Assignment,
    Milestone,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemType::WorkOrder => write!(f, "work_order"),
            ItemType::Task => write!(f, "task"),
            ItemType::Note => write!(f, "note"),
            ItemType::Assignment => write!(f, "assignment"),
            ItemType::Milestone => write!(f, "milestone"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
            Priority::Urgent => write!(f, "urgent"),
        }
    }
}

impl FromStr for Priority {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(PlannerError::InvalidPriority(s.to_string())),
        }
    }
}

pub const VALID_PRIORITIES: &[&str] = &["low", "medium", "high", "urgent"];

/// Lifecycle status of an externally owned work order.
///
/// Statuses this board does not know about deserialize to `Unknown`
/// instead of failing the whole load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    Pending,
    Scheduled,
    InProgress,
    WaitingParts,
    WaitingApproval,
    Completed,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkOrderStatus::Pending => write!(f, "pending"),
            WorkOrderStatus::Scheduled => write!(f, "scheduled"),
            WorkOrderStatus::InProgress => write!(f, "in_progress"),
            WorkOrderStatus::WaitingParts => write!(f, "waiting_parts"),
            WorkOrderStatus::WaitingApproval => write!(f, "waiting_approval"),
            WorkOrderStatus::Completed => write!(f, "completed"),
            WorkOrderStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Ordered bucket definition for a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Stable key that items reference through `column_id`
    pub column_key: String,
    pub column_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Advisory maximum item count; exceeding it only changes styling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wip_limit: Option<u32>,
}

impl Column {
    pub fn new(column_key: &str, column_name: &str) -> Self {
        Column {
            column_key: column_key.to_string(),
            column_name: column_name.to_string(),
            color: None,
            wip_limit: None,
        }
    }

    pub fn with_wip_limit(mut self, limit: u32) -> Self {
        self.wip_limit = Some(limit);
        self
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }
}

/// The column set written by `planner init`
pub fn default_columns() -> Vec<Column> {
    vec![
        Column::new(COLUMN_BACKLOG, "Backlog").with_color("gray"),
        Column::new(COLUMN_TODO, "To Do").with_color("blue"),
        Column::new(COLUMN_IN_PROGRESS, "In Progress")
            .with_color("yellow")
            .with_wip_limit(5),
        Column::new(COLUMN_REVIEW, "Review").with_color("magenta"),
        Column::new(COLUMN_DONE, "Done").with_color("green"),
    ]
}

/// Assignee summary embedded in a card so it renders without another fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Work-order summary embedded in a derived card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrderSummary {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkOrderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}

/// A native planner entry as stored by the data layer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlannerItem {
    pub id: String,
    #[serde(default = "default_board_type")]
    pub board_type: String,
    #[serde(default)]
    pub item_type: ItemType,
    pub title: String,
    pub column_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_order: Option<WorkOrderSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeSummary>,
}

fn default_board_type() -> String {
    KANBAN_BOARD.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

/// Externally owned work-order record; read only from the board's perspective
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_technician: Option<String>,
    /// Unrecognised priorities read as `None` rather than failing the load
    #[serde(
        default,
        deserialize_with = "lenient_priority",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkOrderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerRef>,
}

fn lenient_priority<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPriority {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<RawPriority>::deserialize(deserializer)? {
        None => None,
        Some(RawPriority::Text(text)) => match text.parse() {
            Ok(priority) => Some(priority),
            Err(_) => {
                tracing::warn!(priority = %text, "ignoring unknown work-order priority");
                None
            }
        },
        Some(RawPriority::Other(_)) => {
            tracing::warn!("ignoring non-text work-order priority");
            None
        }
    })
}

/// Staff record used only for swimlane seeding
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl StaffMember {
    /// Full name, falling back to email, then to "Unknown"
    pub fn display_name(&self) -> String {
        let full = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let full = full.trim();
        if !full.is_empty() {
            return full.to_string();
        }
        match self.email.as_deref() {
            Some(email) if !email.trim().is_empty() => email.to_string(),
            _ => "Unknown".to_string(),
        }
    }
}
