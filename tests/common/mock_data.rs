//! Builders for board records, so tests can describe just the fields they
//! care about.

use planner::board::{BoardItem, unify_items};
use planner::types::{
    Column, CustomerRef, PlannerItem, Priority, StaffMember, WorkOrder, WorkOrderStatus,
    default_columns,
};

/// Builder for native planner items
pub struct ItemBuilder {
    item: PlannerItem,
}

impl ItemBuilder {
    /// A task in the `todo` column of the kanban board
    pub fn new(id: &str) -> Self {
        Self {
            item: PlannerItem {
                id: id.to_string(),
                title: format!("Item {id}"),
                column_id: "todo".to_string(),
                ..Default::default()
            },
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.item.title = title.to_string();
        self
    }

    pub fn column(mut self, column: &str) -> Self {
        self.item.column_id = column.to_string();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.item.priority = Some(priority);
        self
    }

    pub fn employee(mut self, employee_id: &str) -> Self {
        self.item.employee_id = Some(employee_id.to_string());
        self
    }

    pub fn board_type(mut self, board_type: &str) -> Self {
        self.item.board_type = board_type.to_string();
        self
    }

    pub fn build(self) -> PlannerItem {
        self.item
    }
}

/// Builder for externally owned work orders
pub struct WorkOrderBuilder {
    order: WorkOrder,
}

impl WorkOrderBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            order: WorkOrder {
                id: id.to_string(),
                title: format!("Work order {id}"),
                ..Default::default()
            },
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.order.title = title.to_string();
        self
    }

    pub fn status(mut self, status: WorkOrderStatus) -> Self {
        self.order.status = Some(status);
        self
    }

    pub fn technician(mut self, employee_id: &str) -> Self {
        self.order.assigned_technician = Some(employee_id.to_string());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.order.priority = Some(priority);
        self
    }

    pub fn customer(mut self, name: &str) -> Self {
        self.order.customer = Some(CustomerRef {
            id: None,
            name: name.to_string(),
        });
        self
    }

    pub fn build(self) -> WorkOrder {
        self.order
    }
}

pub fn staff(id: &str, first: &str, last: &str) -> StaffMember {
    StaffMember {
        id: id.to_string(),
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        ..Default::default()
    }
}

/// The default five columns
pub fn columns() -> Vec<Column> {
    default_columns()
}

/// Unified cards for the given sources
pub fn cards(items: &[PlannerItem], orders: &[WorkOrder]) -> Vec<BoardItem> {
    unify_items(items, orders)
}
