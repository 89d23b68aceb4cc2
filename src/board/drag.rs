//! Drag coordination
//!
//! Two layers:
//! - `PointerSensor` turns raw pointer input into drag events. It owns the
//!   activation threshold and the drop-target collision pass, so it can be
//!   replaced by any other input engine.
//! - `DragController` tracks the lifted card and hands completed drops to the
//!   move dispatcher. It knows nothing about pointers or geometry.

use serde::{Deserialize, Serialize};

use super::dispatch::{MoveCommand, MoveDecision, decide_move};
use super::item::BoardItem;

/// Pointer travel required before a press becomes a drag
pub const DEFAULT_ACTIVATION_DISTANCE: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Rect {
            left,
            top,
            width,
            height,
        }
    }

    /// Top-left, top-right, bottom-left, bottom-right
    pub fn corners(&self) -> [Point; 4] {
        let right = self.left + self.width;
        let bottom = self.top + self.height;
        [
            Point::new(self.left, self.top),
            Point::new(right, self.top),
            Point::new(self.left, bottom),
            Point::new(right, bottom),
        ]
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.left + dx, self.top + dy, self.width, self.height)
    }
}

/// A registered drop target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Droppable {
    /// Column key the target resolves to
    pub key: String,
    pub rect: Rect,
}

/// Mean distance between corresponding corners of two rects
pub fn corner_distance(a: &Rect, b: &Rect) -> f64 {
    let total: f64 = a
        .corners()
        .iter()
        .zip(b.corners().iter())
        .map(|(p, q)| p.distance_to(*q))
        .sum();
    total / 4.0
}

/// Nearest droppable by corner distance.
///
/// Ties go to whichever droppable was registered first.
pub fn closest_corners<'a>(dragged: &Rect, droppables: &'a [Droppable]) -> Option<&'a Droppable> {
    let mut best: Option<(&Droppable, f64)> = None;
    for droppable in droppables {
        let distance = corner_distance(dragged, &droppable.rect);
        match best {
            Some((_, current)) if distance >= current => {}
            _ => best = Some((droppable, distance)),
        }
    }
    best.map(|(d, _)| d)
}

/// Events the sensor emits towards the drag controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Start { item_id: String },
    Drop { item_id: String, over: Option<String> },
    Cancel { item_id: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
enum SensorPhase {
    #[default]
    Idle,
    /// Pressed but not yet past the activation distance
    Pending {
        item_id: String,
        origin: Point,
        card: Rect,
    },
    Active {
        item_id: String,
        origin: Point,
        card: Rect,
        pointer: Point,
    },
}

/// Pointer-driven drag engine with a distance activation constraint
#[derive(Debug, Clone)]
pub struct PointerSensor {
    activation_distance: f64,
    droppables: Vec<Droppable>,
    phase: SensorPhase,
}

impl Default for PointerSensor {
    fn default() -> Self {
        PointerSensor::new(DEFAULT_ACTIVATION_DISTANCE)
    }
}

impl PointerSensor {
    pub fn new(activation_distance: f64) -> Self {
        PointerSensor {
            activation_distance: activation_distance.max(0.0),
            droppables: Vec::new(),
            phase: SensorPhase::Idle,
        }
    }

    /// Register (or re-measure) a column drop region
    pub fn register_droppable(&mut self, key: &str, rect: Rect) {
        if let Some(existing) = self.droppables.iter_mut().find(|d| d.key == key) {
            existing.rect = rect;
        } else {
            self.droppables.push(Droppable {
                key: key.to_string(),
                rect,
            });
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, SensorPhase::Active { .. })
    }

    /// Press on a card. Nothing is emitted until the pointer travels.
    pub fn pointer_down(&mut self, item_id: &str, at: Point, card: Rect) {
        self.phase = SensorPhase::Pending {
            item_id: item_id.to_string(),
            origin: at,
            card,
        };
    }

    pub fn pointer_move(&mut self, to: Point) -> Option<DragEvent> {
        match &mut self.phase {
            SensorPhase::Idle => None,
            SensorPhase::Pending {
                item_id,
                origin,
                card,
            } => {
                if origin.distance_to(to) <= self.activation_distance {
                    return None;
                }
                let item_id = std::mem::take(item_id);
                let (origin, card) = (*origin, *card);
                self.phase = SensorPhase::Active {
                    item_id: item_id.clone(),
                    origin,
                    card,
                    pointer: to,
                };
                Some(DragEvent::Start { item_id })
            }
            SensorPhase::Active { pointer, .. } => {
                *pointer = to;
                None
            }
        }
    }

    /// Release. A press that never activated is a click and emits nothing.
    pub fn pointer_up(&mut self, at: Point) -> Option<DragEvent> {
        match std::mem::take(&mut self.phase) {
            SensorPhase::Idle | SensorPhase::Pending { .. } => None,
            SensorPhase::Active {
                item_id,
                origin,
                card,
                ..
            } => {
                let dragged = card.translate(at.x - origin.x, at.y - origin.y);
                let over = closest_corners(&dragged, &self.droppables).map(|d| d.key.clone());
                Some(DragEvent::Drop { item_id, over })
            }
        }
    }

    /// Escape or pointer loss
    pub fn cancel(&mut self) -> Option<DragEvent> {
        match std::mem::take(&mut self.phase) {
            SensorPhase::Active { item_id, .. } => Some(DragEvent::Cancel { item_id }),
            SensorPhase::Idle | SensorPhase::Pending { .. } => None,
        }
    }
}

/// Drag state: either nothing is lifted or exactly one card is
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { active_id: String },
}

/// Tracks the lifted card and decides what a drop does
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn active_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { active_id } => Some(active_id),
            DragState::Idle => None,
        }
    }

    /// Card shown in the drag overlay
    pub fn active_item<'a>(&self, items: &'a [BoardItem]) -> Option<&'a BoardItem> {
        let id = self.active_id()?;
        items.iter().find(|i| i.id == id)
    }

    pub fn on_start(&mut self, item_id: &str) {
        self.state = DragState::Dragging {
            active_id: item_id.to_string(),
        };
    }

    pub fn on_cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Finish the drag and decide the move.
    ///
    /// The controller always returns to idle, whatever the decision.
    pub fn on_drop_decision(
        &mut self,
        item_id: &str,
        over: Option<&str>,
        items: &[BoardItem],
    ) -> MoveDecision {
        self.state = DragState::Idle;
        let decision = decide_move(items, item_id, over);
        match &decision {
            MoveDecision::Move(cmd) => {
                tracing::debug!(id = %cmd.id, column = %cmd.column_id, "drop accepted");
            }
            MoveDecision::Skip { reason } => {
                tracing::debug!(id = item_id, ?over, %reason, "drop skipped");
            }
        }
        decision
    }

    pub fn on_drop(
        &mut self,
        item_id: &str,
        over: Option<&str>,
        items: &[BoardItem],
    ) -> Option<MoveCommand> {
        self.on_drop_decision(item_id, over, items).into_command()
    }

    /// Feed a sensor event; returns the decision for drop events
    pub fn handle_event(&mut self, event: DragEvent, items: &[BoardItem]) -> Option<MoveDecision> {
        match event {
            DragEvent::Start { item_id } => {
                self.on_start(&item_id);
                None
            }
            DragEvent::Cancel { .. } => {
                self.on_cancel();
                None
            }
            DragEvent::Drop { item_id, over } => {
                Some(self.on_drop_decision(&item_id, over.as_deref(), items))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::dispatch::SkipReason;
    use crate::board::item::ItemSource;
    use crate::types::ItemType;

    fn card(id: &str, column: &str) -> BoardItem {
        BoardItem {
            id: id.to_string(),
            source: ItemSource::Native,
            item_type: ItemType::Task,
            title: id.to_string(),
            column_id: column.to_string(),
            priority: None,
            employee_id: None,
            start_date: None,
            duration_hours: None,
            work_order: None,
            employee: None,
        }
    }

    // Three 200px columns side by side, 20px gutters
    fn sensor_with_columns() -> PointerSensor {
        let mut sensor = PointerSensor::default();
        sensor.register_droppable("todo", Rect::new(0.0, 0.0, 200.0, 600.0));
        sensor.register_droppable("in_progress", Rect::new(220.0, 0.0, 200.0, 600.0));
        sensor.register_droppable("done", Rect::new(440.0, 0.0, 200.0, 600.0));
        sensor
    }

    #[test]
    fn test_click_does_not_start_drag() {
        let mut sensor = sensor_with_columns();
        sensor.pointer_down("item-1", Point::new(50.0, 50.0), Rect::new(0.0, 0.0, 200.0, 80.0));
        assert_eq!(sensor.pointer_move(Point::new(53.0, 54.0)), None);
        assert!(!sensor.is_dragging());
        assert_eq!(sensor.pointer_up(Point::new(53.0, 54.0)), None);
    }

    #[test]
    fn test_activation_requires_distance_strictly_greater() {
        let mut sensor = PointerSensor::new(8.0);
        sensor.pointer_down("item-1", Point::new(0.0, 0.0), Rect::default());
        assert_eq!(sensor.pointer_move(Point::new(8.0, 0.0)), None);
        assert_eq!(
            sensor.pointer_move(Point::new(8.5, 0.0)),
            Some(DragEvent::Start {
                item_id: "item-1".to_string()
            })
        );
        // Further movement emits nothing new
        assert_eq!(sensor.pointer_move(Point::new(100.0, 0.0)), None);
    }

    #[test]
    fn test_drop_resolves_nearest_column() {
        let mut sensor = sensor_with_columns();
        let card_rect = Rect::new(0.0, 0.0, 200.0, 80.0);
        sensor.pointer_down("item-1", Point::new(100.0, 40.0), card_rect);
        sensor.pointer_move(Point::new(300.0, 40.0));
        let event = sensor.pointer_up(Point::new(545.0, 40.0));
        assert_eq!(
            event,
            Some(DragEvent::Drop {
                item_id: "item-1".to_string(),
                over: Some("done".to_string()),
            })
        );
        assert!(!sensor.is_dragging());
    }

    #[test]
    fn test_drop_without_droppables_has_no_target() {
        let mut sensor = PointerSensor::default();
        sensor.pointer_down("item-1", Point::default(), Rect::default());
        sensor.pointer_move(Point::new(50.0, 0.0));
        assert_eq!(
            sensor.pointer_up(Point::new(60.0, 0.0)),
            Some(DragEvent::Drop {
                item_id: "item-1".to_string(),
                over: None,
            })
        );
    }

    #[test]
    fn test_cancel_only_emits_when_active() {
        let mut sensor = sensor_with_columns();
        sensor.pointer_down("item-1", Point::default(), Rect::default());
        assert_eq!(sensor.cancel(), None);

        sensor.pointer_down("item-1", Point::default(), Rect::default());
        sensor.pointer_move(Point::new(20.0, 0.0));
        assert_eq!(
            sensor.cancel(),
            Some(DragEvent::Cancel {
                item_id: "item-1".to_string()
            })
        );
        assert!(!sensor.is_dragging());
    }

    #[test]
    fn test_closest_corners_tie_goes_to_first_registered() {
        let overlapping = vec![
            Droppable {
                key: "a".to_string(),
                rect: Rect::new(0.0, 0.0, 100.0, 100.0),
            },
            Droppable {
                key: "b".to_string(),
                rect: Rect::new(0.0, 0.0, 100.0, 100.0),
            },
        ];
        let dragged = Rect::new(10.0, 10.0, 50.0, 50.0);
        assert_eq!(closest_corners(&dragged, &overlapping).unwrap().key, "a");
        assert!(closest_corners(&dragged, &[]).is_none());
    }

    #[test]
    fn test_register_droppable_remeasures_existing_key() {
        let mut sensor = PointerSensor::default();
        sensor.register_droppable("todo", Rect::new(0.0, 0.0, 10.0, 10.0));
        sensor.register_droppable("todo", Rect::new(500.0, 0.0, 10.0, 10.0));
        assert_eq!(sensor.droppables.len(), 1);
        assert_eq!(sensor.droppables[0].rect.left, 500.0);
    }

    #[test]
    fn test_controller_returns_to_idle_after_drop() {
        let items = vec![card("item-1", "todo")];
        let mut controller = DragController::new();
        controller.on_start("item-1");
        assert_eq!(controller.active_id(), Some("item-1"));
        assert_eq!(controller.active_item(&items).unwrap().id, "item-1");

        assert!(controller.on_drop("item-1", Some("todo"), &items).is_none());
        assert_eq!(controller.state(), &DragState::Idle);

        controller.on_start("item-1");
        let cmd = controller.on_drop("item-1", Some("done"), &items).unwrap();
        assert_eq!(cmd.column_id, "done");
        assert_eq!(controller.state(), &DragState::Idle);
    }

    #[test]
    fn test_controller_cancel_clears_active() {
        let mut controller = DragController::new();
        controller.on_start("item-1");
        controller.on_cancel();
        assert!(controller.active_id().is_none());
    }

    #[test]
    fn test_sensor_events_drive_controller() {
        let items = vec![card("item-1", "todo")];
        let mut sensor = sensor_with_columns();
        let mut controller = DragController::new();

        sensor.pointer_down("item-1", Point::new(100.0, 40.0), Rect::new(0.0, 0.0, 200.0, 80.0));
        let start = sensor.pointer_move(Point::new(130.0, 40.0)).unwrap();
        assert!(controller.handle_event(start, &items).is_none());
        assert_eq!(controller.active_id(), Some("item-1"));

        let drop = sensor.pointer_up(Point::new(110.0, 45.0)).unwrap();
        let decision = controller.handle_event(drop, &items).unwrap();
        assert_eq!(
            decision,
            MoveDecision::Skip {
                reason: SkipReason::SameColumn
            }
        );
        assert!(controller.active_id().is_none());
    }
}
