use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Area hierarchy: Building → Floor → Room
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    pub id: String,
    pub building_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub floor_id: String,
    pub name: String,
}

/// Read-only location reference data, fetched once per session and consumed
/// to build cascading Building → Floor → Room pickers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaCatalog {
    #[serde(default)]
    pub buildings: Vec<Building>,
    #[serde(default)]
    pub floors: Vec<Floor>,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl AreaCatalog {
    /// Floors belonging to the given building, in catalog order.
    pub fn floors_in(&self, building_id: &str) -> Vec<&Floor> {
        self.floors
            .iter()
            .filter(|f| f.building_id == building_id)
            .collect()
    }

    /// Rooms belonging to the given floor, in catalog order.
    pub fn rooms_in(&self, floor_id: &str) -> Vec<&Room> {
        self.rooms.iter().filter(|r| r.floor_id == floor_id).collect()
    }

    pub fn building_name(&self, id: &str) -> Option<&str> {
        self.buildings
            .iter()
            .find(|b| b.id == id)
            .map(|b| b.name.as_str())
    }

    pub fn floor_name(&self, id: &str) -> Option<&str> {
        self.floors.iter().find(|f| f.id == id).map(|f| f.name.as_str())
    }

    pub fn room_name(&self, id: &str) -> Option<&str> {
        self.rooms.iter().find(|r| r.id == id).map(|r| r.name.as_str())
    }

    /// Human-readable `building / floor / room` label for a location triple,
    /// falling back to raw ids for entries missing from the catalog.
    pub fn location_label(&self, building_id: &str, floor_id: &str, room_id: &str) -> String {
        format!(
            "{} / {} / {}",
            self.building_name(building_id).unwrap_or(building_id),
            self.floor_name(floor_id).unwrap_or(floor_id),
            self.room_name(room_id).unwrap_or(room_id),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> AreaCatalog {
        AreaCatalog {
            buildings: vec![
                Building {
                    id: "b1".into(),
                    name: "Main".into(),
                },
                Building {
                    id: "b2".into(),
                    name: "Annex".into(),
                },
            ],
            floors: vec![
                Floor {
                    id: "f1".into(),
                    building_id: "b1".into(),
                    name: "Ground".into(),
                },
                Floor {
                    id: "f2".into(),
                    building_id: "b1".into(),
                    name: "First".into(),
                },
                Floor {
                    id: "f3".into(),
                    building_id: "b2".into(),
                    name: "Ground".into(),
                },
            ],
            rooms: vec![
                Room {
                    id: "r1".into(),
                    floor_id: "f1".into(),
                    name: "101".into(),
                },
                Room {
                    id: "r2".into(),
                    floor_id: "f2".into(),
                    name: "201".into(),
                },
            ],
        }
    }

    #[test]
    fn cascading_lookups() {
        let c = catalog();
        let floors: Vec<&str> = c.floors_in("b1").iter().map(|f| f.id.as_str()).collect();
        assert_eq!(floors, vec!["f1", "f2"]);
        let rooms: Vec<&str> = c.rooms_in("f1").iter().map(|r| r.id.as_str()).collect();
        assert_eq!(rooms, vec!["r1"]);
        assert!(c.rooms_in("f3").is_empty());
    }

    #[test]
    fn location_label_falls_back_to_ids() {
        let c = catalog();
        assert_eq!(c.location_label("b1", "f1", "r1"), "Main / Ground / 101");
        assert_eq!(c.location_label("bX", "f1", "rX"), "bX / Ground / rX");
    }
}
