//! Building layout tree: wings, floors and units.
//!
//! Which nodes are expanded is explicit state keyed by entity id, owned by the
//! caller and passed in; the layout itself is rebuilt from a snapshot.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

use super::models::{Building, Unit};
use super::stats::FloorStats;

/// Key of a wing node: `"{building}:{wing}"`
pub fn wing_key(building_id: Uuid, wing: &str) -> String {
    format!("{}:{}", building_id, wing)
}

/// Key of a floor node: `"{building}:{wing}:{floor}"`
pub fn floor_key(building_id: Uuid, wing: &str, floor: u32) -> String {
    format!("{}:{}:{}", building_id, wing, floor)
}

/// Expanded wing and floor ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    wings: HashSet<String>,
    floors: HashSet<String>,
}

impl ExpansionState {
    /// Parse a comma-separated list of wing and floor keys.
    ///
    /// Keys with two segments are wings, three segments floors; anything else
    /// is ignored.
    pub fn from_keys(raw: &str) -> Self {
        let mut state = Self::default();
        for key in raw.split(',').map(str::trim).filter(|k| !k.is_empty()) {
            match key.split(':').count() {
                2 => {
                    state.wings.insert(key.to_string());
                }
                3 => {
                    state.floors.insert(key.to_string());
                }
                _ => {}
            }
        }
        state
    }

    /// Flip a wing; returns whether it is now expanded
    pub fn toggle_wing(&mut self, key: &str) -> bool {
        toggle(&mut self.wings, key)
    }

    /// Flip a floor; returns whether it is now expanded
    pub fn toggle_floor(&mut self, key: &str) -> bool {
        toggle(&mut self.floors, key)
    }

    pub fn is_wing_expanded(&self, key: &str) -> bool {
        self.wings.contains(key)
    }

    pub fn is_floor_expanded(&self, key: &str) -> bool {
        self.floors.contains(key)
    }
}

fn toggle(set: &mut HashSet<String>, key: &str) -> bool {
    if set.remove(key) {
        false
    } else {
        set.insert(key.to_string());
        true
    }
}

/// Floor node; units are listed only while the floor and its wing are expanded
#[derive(Debug, Clone, Serialize)]
pub struct FloorNode {
    pub key: String,
    pub floor: u32,
    pub expanded: bool,
    pub stats: FloorStats,
    pub units: Vec<Unit>,
}

/// Wing node with its floors in ascending order
#[derive(Debug, Clone, Serialize)]
pub struct WingNode {
    pub key: String,
    pub wing: String,
    pub expanded: bool,
    pub stats: FloorStats,
    pub floors: Vec<FloorNode>,
}

/// Wing -> floor -> unit tree of one building
#[derive(Debug, Clone, Serialize)]
pub struct BuildingLayout {
    pub building: Building,
    pub occupancy_rate: Decimal,
    pub wings: Vec<WingNode>,
}

impl BuildingLayout {
    /// Group a building's units into sorted wings and floors.
    pub fn build<'a>(
        building: &Building,
        units: impl IntoIterator<Item = &'a Unit>,
        expansion: &ExpansionState,
    ) -> Self {
        let mut grouped: BTreeMap<&str, BTreeMap<u32, Vec<&Unit>>> = BTreeMap::new();
        for unit in units.into_iter().filter(|u| u.building_id == building.id) {
            grouped
                .entry(unit.wing.as_str())
                .or_default()
                .entry(unit.floor)
                .or_default()
                .push(unit);
        }

        let wings = grouped
            .into_iter()
            .map(|(wing, floors)| {
                let key = wing_key(building.id, wing);
                let wing_expanded = expansion.is_wing_expanded(&key);

                let floors: Vec<FloorNode> = floors
                    .into_iter()
                    .map(|(floor, units)| {
                        let key = floor_key(building.id, wing, floor);
                        let expanded = expansion.is_floor_expanded(&key);
                        let stats = FloorStats::from_units(units.iter().copied());
                        let units = if wing_expanded && expanded {
                            units.into_iter().cloned().collect()
                        } else {
                            Vec::new()
                        };
                        FloorNode {
                            key,
                            floor,
                            expanded,
                            stats,
                            units,
                        }
                    })
                    .collect();

                WingNode {
                    stats: FloorStats::combine(floors.iter().map(|f| &f.stats)),
                    key,
                    wing: wing.to_string(),
                    expanded: wing_expanded,
                    floors,
                }
            })
            .collect();

        Self {
            building: building.clone(),
            occupancy_rate: building.occupancy_rate(),
            wings,
        }
    }
}
