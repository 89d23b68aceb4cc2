//! Unified card model
//!
//! Native planner entries and externally owned work orders are merged into a
//! single `BoardItem` shape. The origin is kept as an explicit `ItemSource`
//! discriminant. Ids in the derived namespace are still treated as read only
//! wherever they come from, since the data layer cannot tell them apart.

use std::collections::HashSet;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::types::{
    COLUMN_BACKLOG, COLUMN_DONE, COLUMN_IN_PROGRESS, COLUMN_REVIEW, COLUMN_TODO, EmployeeSummary,
    ItemType, PlannerItem, Priority, WorkOrder, WorkOrderStatus, WorkOrderSummary,
};

/// Namespace prefix for ids of cards synthesized from work orders
pub const DERIVED_ID_PREFIX: &str = "wo-";

/// Title used when a work order has an empty title
pub const UNTITLED_WORK_ORDER: &str = "Untitled Work Order";

/// Where a card came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemSource {
    /// Created on the board and stored with it
    Native,
    /// Synthesized from an external work order on every render
    Derived { work_order_id: String },
}

impl ItemSource {
    pub fn is_derived(&self) -> bool {
        matches!(self, ItemSource::Derived { .. })
    }
}

/// A card on the board, regardless of origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardItem {
    pub id: String,
    pub source: ItemSource,
    pub item_type: ItemType,
    pub title: String,
    /// Key of the column this card is placed in
    pub column_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_order: Option<WorkOrderSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeSummary>,
}

impl BoardItem {
    /// Card for a native planner entry
    pub fn from_native(item: &PlannerItem) -> Self {
        BoardItem {
            id: item.id.clone(),
            source: ItemSource::Native,
            item_type: item.item_type,
            title: item.title.clone(),
            column_id: item.column_id.clone(),
            priority: item.priority,
            employee_id: item.employee_id.clone(),
            start_date: item.start_date,
            duration_hours: item.duration_hours,
            work_order: item.work_order.clone(),
            employee: item.employee.clone(),
        }
    }

    /// Card synthesized from a work order.
    ///
    /// The column is derived from the work-order status, never stored.
    pub fn from_work_order(order: &WorkOrder) -> Self {
        let title = if order.title.is_empty() {
            UNTITLED_WORK_ORDER.to_string()
        } else {
            order.title.clone()
        };

        BoardItem {
            id: derived_id(&order.id),
            source: ItemSource::Derived {
                work_order_id: order.id.clone(),
            },
            item_type: ItemType::WorkOrder,
            title,
            column_id: column_for_status(order.status).to_string(),
            priority: order.priority,
            employee_id: order.assigned_technician.clone(),
            start_date: order.start_time,
            duration_hours: order.estimated_hours,
            work_order: Some(WorkOrderSummary {
                id: order.id.clone(),
                status: order.status,
                customer_name: order.customer.as_ref().map(|c| c.name.clone()),
            }),
            employee: None,
        }
    }

    pub fn is_derived(&self) -> bool {
        self.source.is_derived()
    }

    /// Derived cards, and any card whose id sits in the derived namespace,
    /// never produce column moves
    pub fn is_read_only(&self) -> bool {
        self.is_derived() || self.id.starts_with(DERIVED_ID_PREFIX)
    }
}

/// Namespaced id for a derived card, so it cannot collide with a native id
pub fn derived_id(work_order_id: &str) -> String {
    format!("{DERIVED_ID_PREFIX}{work_order_id}")
}

/// Map a work-order status to the column key it is shown in.
///
/// Total: every status, including unknown and absent ones, lands in a column.
pub fn column_for_status(status: Option<WorkOrderStatus>) -> &'static str {
    match status {
        Some(WorkOrderStatus::Pending) | Some(WorkOrderStatus::Scheduled) => COLUMN_TODO,
        Some(WorkOrderStatus::InProgress) => COLUMN_IN_PROGRESS,
        Some(WorkOrderStatus::WaitingParts) | Some(WorkOrderStatus::WaitingApproval) => {
            COLUMN_REVIEW
        }
        Some(WorkOrderStatus::Completed) => COLUMN_DONE,
        Some(WorkOrderStatus::Unknown) | None => COLUMN_BACKLOG,
    }
}

/// Merge both sources into one card sequence: native cards first, then
/// derived cards, each in input order.
///
/// Ids stay unique: a native item whose id equals a derived card's id is
/// left out, so a drag on the work-order card can never reach it.
pub fn unify_items(native: &[PlannerItem], work_orders: &[WorkOrder]) -> Vec<BoardItem> {
    let derived: Vec<BoardItem> = work_orders.iter().map(BoardItem::from_work_order).collect();
    let derived_ids: HashSet<&str> = derived.iter().map(|d| d.id.as_str()).collect();

    let mut items = Vec::with_capacity(native.len() + derived.len());
    for item in native {
        if derived_ids.contains(item.id.as_str()) {
            tracing::warn!(id = %item.id, "native item id collides with a work order, skipping");
            continue;
        }
        items.push(BoardItem::from_native(item));
    }
    items.extend(derived);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CustomerRef;

    fn work_order(id: &str, title: &str, status: Option<WorkOrderStatus>) -> WorkOrder {
        WorkOrder {
            id: id.to_string(),
            title: title.to_string(),
            status,
            ..Default::default()
        }
    }

    #[test]
    fn test_column_for_status_table() {
        let cases = [
            (Some(WorkOrderStatus::Pending), "todo"),
            (Some(WorkOrderStatus::Scheduled), "todo"),
            (Some(WorkOrderStatus::InProgress), "in_progress"),
            (Some(WorkOrderStatus::WaitingParts), "review"),
            (Some(WorkOrderStatus::WaitingApproval), "review"),
            (Some(WorkOrderStatus::Completed), "done"),
            (Some(WorkOrderStatus::Unknown), "backlog"),
            (None, "backlog"),
        ];
        for (status, expected) in cases {
            assert_eq!(column_for_status(status), expected, "status {status:?}");
            // Same input, same output
            assert_eq!(column_for_status(status), column_for_status(status));
        }
    }

    #[test]
    fn test_from_work_order_namespaces_id() {
        let item = BoardItem::from_work_order(&work_order(
            "42",
            "Replace filter",
            Some(WorkOrderStatus::InProgress),
        ));
        assert_eq!(item.id, "wo-42");
        assert_eq!(item.column_id, "in_progress");
        assert_eq!(item.item_type, ItemType::WorkOrder);
        assert_eq!(
            item.source,
            ItemSource::Derived {
                work_order_id: "42".to_string()
            }
        );
    }

    #[test]
    fn test_from_work_order_untitled_fallback() {
        let item = BoardItem::from_work_order(&work_order("7", "", None));
        assert_eq!(item.title, UNTITLED_WORK_ORDER);
        assert_eq!(item.column_id, "backlog");

        // Only an empty title falls back
        let item = BoardItem::from_work_order(&work_order("8", "  ", None));
        assert_eq!(item.title, "  ");
    }

    #[test]
    fn test_from_work_order_carries_assignment_and_customer() {
        let order = WorkOrder {
            id: "9".to_string(),
            title: "Pump out tank".to_string(),
            assigned_technician: Some("emp-3".to_string()),
            priority: Some(Priority::High),
            estimated_hours: Some(2.5),
            customer: Some(CustomerRef {
                id: None,
                name: "Acme Farms".to_string(),
            }),
            ..Default::default()
        };
        let item = BoardItem::from_work_order(&order);
        assert_eq!(item.employee_id.as_deref(), Some("emp-3"));
        assert_eq!(item.priority, Some(Priority::High));
        assert_eq!(item.duration_hours, Some(2.5));
        let summary = item.work_order.unwrap();
        assert_eq!(summary.customer_name.as_deref(), Some("Acme Farms"));
    }

    #[test]
    fn test_unify_native_first_then_derived() {
        let native = vec![PlannerItem {
            id: "item-1".to_string(),
            title: "Order parts".to_string(),
            column_id: "todo".to_string(),
            ..Default::default()
        }];
        let orders = vec![
            work_order("1", "A", Some(WorkOrderStatus::Completed)),
            work_order("2", "B", None),
        ];

        let items = unify_items(&native, &orders);
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["item-1", "wo-1", "wo-2"]);
        assert!(!items[0].is_derived());
        assert!(items[1].is_derived());
    }

    #[test]
    fn test_native_id_with_prefix_is_read_only() {
        let native = vec![PlannerItem {
            id: "wo-imported".to_string(),
            title: "Imported".to_string(),
            column_id: "todo".to_string(),
            ..Default::default()
        }];
        let items = unify_items(&native, &[]);
        assert_eq!(items[0].source, ItemSource::Native);
        assert!(items[0].is_read_only());
    }

    #[test]
    fn test_unify_drops_native_id_colliding_with_work_order() {
        let native = vec![
            PlannerItem {
                id: "wo-42".to_string(),
                title: "Imported copy".to_string(),
                column_id: "todo".to_string(),
                ..Default::default()
            },
            PlannerItem {
                id: "item-1".to_string(),
                title: "Order parts".to_string(),
                column_id: "todo".to_string(),
                ..Default::default()
            },
        ];
        let orders = vec![work_order("42", "Pump out tank", Some(WorkOrderStatus::Pending))];

        let items = unify_items(&native, &orders);
        let ids: Vec<_> = items.iter().map(|i| (i.id.as_str(), i.is_derived())).collect();
        assert_eq!(ids, vec![("item-1", false), ("wo-42", true)]);
    }
}
