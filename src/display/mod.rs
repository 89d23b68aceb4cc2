//! Terminal rendering of the board view model

use owo_colors::{OwoColorize, Stream};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::board::{BoardItem, BoardViewModel, ColumnViewModel, SwimlaneViewModel};
use crate::types::{Column, ItemType, Priority};

/// Text shown in a column with no cards
pub const EMPTY_COLUMN_PLACEHOLDER: &str = "(no items)";

/// A row in the column list table
#[derive(Tabled)]
struct ColumnRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "WIP Limit")]
    wip_limit: String,
    #[tabled(rename = "Items")]
    items: String,
}

/// Short tag for a priority, colored by severity
fn format_priority(priority: Priority) -> String {
    let tag = format!("[{priority}]");
    match priority {
        Priority::Urgent => tag
            .if_supports_color(Stream::Stdout, |t| t.red())
            .to_string(),
        Priority::High => tag
            .if_supports_color(Stream::Stdout, |t| t.yellow())
            .to_string(),
        Priority::Medium | Priority::Low => tag
            .if_supports_color(Stream::Stdout, |t| t.dimmed())
            .to_string(),
    }
}

/// Plain detail suffix for a card: assignee, work order, schedule
pub fn card_details(item: &BoardItem) -> Vec<String> {
    let mut details = Vec::new();

    // Tasks are the default and work orders carry their own tag below
    if !matches!(item.item_type, ItemType::Task | ItemType::WorkOrder) {
        details.push(item.item_type.to_string());
    }

    if let Some(employee) = &item.employee {
        details.push(format!("@{}", employee.display_name));
    } else if let Some(id) = &item.employee_id {
        details.push(format!("@{id}"));
    }

    if let Some(order) = &item.work_order {
        match &order.customer_name {
            Some(customer) => details.push(format!("WO #{} - {}", order.id, customer)),
            None => details.push(format!("WO #{}", order.id)),
        }
    }

    if let Some(start) = item.start_date {
        details.push(start.strftime("%b %d").to_string());
    }

    if let Some(hours) = item.duration_hours {
        details.push(format!("{hours:.1}h"));
    }

    details
}

/// Format a card for single-line display
pub fn format_card_line(item: &BoardItem) -> String {
    let mut line = String::from("  - ");
    if let Some(priority) = item.priority {
        line.push_str(&format_priority(priority));
        line.push(' ');
    }
    line.push_str(&item.title);

    let details = card_details(item);
    if !details.is_empty() {
        let suffix = format!("  {}", details.join("  "));
        line.push_str(
            &suffix
                .if_supports_color(Stream::Stdout, |t| t.dimmed())
                .to_string(),
        );
    }
    line
}

/// Column heading with count badge; over-limit columns are highlighted
pub fn format_column_header(column: &ColumnViewModel) -> String {
    let badge = format!("({})", column.count_badge());
    let name = column.name.to_uppercase();
    if column.wip.is_over_limit {
        format!(
            "{} {} {}",
            name.if_supports_color(Stream::Stdout, |t| t.red()),
            badge.if_supports_color(Stream::Stdout, |t| t.red()),
            "over WIP limit".if_supports_color(Stream::Stdout, |t| t.red())
        )
    } else {
        format!(
            "{} {}",
            name.if_supports_color(Stream::Stdout, |t| t.cyan()),
            badge
        )
    }
}

fn render_columns(columns: &[ColumnViewModel], indent: &str, out: &mut String) {
    for column in columns {
        out.push_str(&format!("{indent}{}\n", format_column_header(column)));
        if column.is_empty() {
            out.push_str(&format!(
                "{indent}  {}\n",
                EMPTY_COLUMN_PLACEHOLDER.if_supports_color(Stream::Stdout, |t| t.dimmed())
            ));
        } else {
            for card in &column.cards {
                out.push_str(&format!("{indent}{}\n", format_card_line(card)));
            }
        }
    }
}

fn render_lane(lane: &SwimlaneViewModel, out: &mut String) {
    out.push_str(&format!(
        "{} ({})\n",
        lane.display_name
            .if_supports_color(Stream::Stdout, |t| t.bold()),
        lane.item_count
    ));
    render_columns(&lane.columns, "  ", out);
}

/// Render the whole board as text
pub fn render_board(vm: &BoardViewModel) -> String {
    let mut out = String::new();

    match &vm.swimlanes {
        Some(lanes) => {
            for (i, lane) in lanes.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                render_lane(lane, &mut out);
            }
        }
        None => render_columns(&vm.columns, "", &mut out),
    }

    out.push('\n');
    let mut summary = if vm.filter.is_empty() {
        format!("{} item(s)", vm.total_items)
    } else {
        format!("{} of {} item(s) match", vm.total_filtered, vm.total_items)
    };
    if vm.hidden_items > 0 {
        summary.push_str(&format!(", {} in unknown columns", vm.hidden_items));
    }
    out.push_str(
        &summary
            .if_supports_color(Stream::Stdout, |t| t.dimmed())
            .to_string(),
    );
    out
}

/// Table of column definitions with their current card counts
pub fn columns_table(columns: &[Column], counts: &[usize]) -> String {
    let rows: Vec<ColumnRow> = columns
        .iter()
        .zip(counts.iter())
        .map(|(column, count)| ColumnRow {
            key: column.column_key.clone(),
            name: column.column_name.clone(),
            color: column.color.clone().unwrap_or_else(|| "-".to_string()),
            wip_limit: column
                .wip_limit
                .filter(|l| *l > 0)
                .map(|l| l.to_string())
                .unwrap_or_else(|| "-".to_string()),
            items: count.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}
