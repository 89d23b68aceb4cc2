//! Swimlane grouping
//!
//! Lanes exist only for the duration of a render pass. The unassigned lane is
//! always present, followed by one lane per known staff member in roster order.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::item::BoardItem;
use crate::error::PlannerError;
use crate::types::StaffMember;

/// Display label of the unassigned lane key
pub const UNASSIGNED_LANE: &str = "unassigned";

/// How cards are partitioned into lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    None,
    Employee,
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupBy::None => write!(f, "none"),
            GroupBy::Employee => write!(f, "employee"),
        }
    }
}

impl FromStr for GroupBy {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(GroupBy::None),
            "employee" => Ok(GroupBy::Employee),
            _ => Err(PlannerError::InvalidGroupBy(s.to_string())),
        }
    }
}

pub const VALID_GROUP_BY: &[&str] = &["none", "employee"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaneKey {
    Unassigned,
    Employee(String),
}

impl fmt::Display for LaneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneKey::Unassigned => write!(f, "{UNASSIGNED_LANE}"),
            LaneKey::Employee(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Swimlane {
    pub key: LaneKey,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub items: Vec<BoardItem>,
}

/// Lanes in seeding order, with lookup by key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Swimlanes {
    lanes: Vec<Swimlane>,
    #[serde(skip)]
    index: HashMap<LaneKey, usize>,
}

impl Swimlanes {
    fn seed(staff: &[StaffMember]) -> Self {
        let mut lanes = Swimlanes {
            lanes: Vec::with_capacity(staff.len() + 1),
            index: HashMap::new(),
        };
        lanes.push(Swimlane {
            key: LaneKey::Unassigned,
            display_name: "Unassigned".to_string(),
            avatar_url: None,
            items: Vec::new(),
        });
        for member in staff {
            lanes.push(Swimlane {
                key: LaneKey::Employee(member.id.clone()),
                display_name: member.display_name(),
                avatar_url: member.avatar_url.clone(),
                items: Vec::new(),
            });
        }
        lanes
    }

    // First registration wins when the roster repeats an id
    fn push(&mut self, lane: Swimlane) {
        if self.index.contains_key(&lane.key) {
            return;
        }
        self.index.insert(lane.key.clone(), self.lanes.len());
        self.lanes.push(lane);
    }

    pub fn get(&self, key: &LaneKey) -> Option<&Swimlane> {
        self.index.get(key).map(|&i| &self.lanes[i])
    }

    pub fn unassigned(&self) -> &Swimlane {
        // Seeding always creates the unassigned lane at position 0
        &self.lanes[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Swimlane> {
        self.lanes.iter()
    }

    /// Total cards across every lane
    pub fn item_count(&self) -> usize {
        self.lanes.iter().map(|l| l.items.len()).sum()
    }
}

impl<'a> IntoIterator for &'a Swimlanes {
    type Item = &'a Swimlane;
    type IntoIter = std::slice::Iter<'a, Swimlane>;

    fn into_iter(self) -> Self::IntoIter {
        self.lanes.iter()
    }
}

/// Partition cards into lanes, or `None` when grouping is off.
///
/// Cards whose assignee is absent, or not on the roster, go to the
/// unassigned lane, so each card appears in exactly one lane.
pub fn group_into_swimlanes(
    items: &[BoardItem],
    staff: &[StaffMember],
    group_by: GroupBy,
) -> Option<Swimlanes> {
    match group_by {
        GroupBy::None => None,
        GroupBy::Employee => {
            let mut lanes = Swimlanes::seed(staff);
            for item in items {
                let slot = item
                    .employee_id
                    .as_ref()
                    .and_then(|id| lanes.index.get(&LaneKey::Employee(id.clone())).copied())
                    .unwrap_or(0);
                lanes.lanes[slot].items.push(item.clone());
            }
            Some(lanes)
        }
    }
}
