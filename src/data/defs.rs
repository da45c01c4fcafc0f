//! Definition templates
//!
//! Named room, door, and entity definitions loaded from RON files and
//! resolved into live instances by the registry. Each collection ships a
//! hardcoded default set used when the data files are missing.

use serde::{Deserialize, Serialize};

use crate::ecs::Side;
use crate::house::Furniture;

/// A named room definition: everything constant across instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDef {
    /// Unique name, the registry key
    pub name: String,
    /// Size in cells `(dx, dy)`
    pub size: (i32, i32),
    /// Wall cells that cannot host a door, room-relative
    #[serde(default)]
    pub no_door_cells: Vec<(i32, i32)>,
    /// Furniture present in every instance of this room
    #[serde(default)]
    pub furniture: Vec<Furniture>,
}

/// Collection of room definitions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomDefs {
    pub defs: Vec<RoomDef>,
}

impl RoomDefs {
    pub fn find(&self, name: &str) -> Option<&RoomDef> {
        self.defs.iter().find(|d| d.name == name)
    }

    /// All definition names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.defs.iter().map(|d| d.name.clone()).collect();
        names.sort();
        names
    }
}

/// A named door definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorDef {
    pub name: String,
    /// Number of cells the door spans
    pub width: i32,
}

/// Collection of door definitions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoorDefs {
    pub defs: Vec<DoorDef>,
}

impl DoorDefs {
    pub fn find(&self, name: &str) -> Option<&DoorDef> {
        self.defs.iter().find(|d| d.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.defs.iter().map(|d| d.name.clone()).collect();
        names.sort();
        names
    }
}

/// A named entity definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDef {
    pub name: String,
    /// Which side the entity plays for
    pub side: Side,
    /// Sight radius in cells
    pub sight: i32,
}

/// Collection of entity definitions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityDefs {
    pub defs: Vec<EntityDef>,
}

impl EntityDefs {
    pub fn find(&self, name: &str) -> Option<&EntityDef> {
        self.defs.iter().find(|d| d.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.defs.iter().map(|d| d.name.clone()).collect();
        names.sort();
        names
    }
}

/// Create default room definitions (hardcoded fallback)
pub fn default_room_defs() -> RoomDefs {
    RoomDefs {
        defs: vec![
            RoomDef {
                name: "parlor".to_string(),
                size: (10, 8),
                no_door_cells: vec![],
                furniture: vec![
                    Furniture {
                        defname: "couch".to_string(),
                        x: 3,
                        y: 3,
                        dx: 3,
                        dy: 1,
                        blocks_los: false,
                    },
                    Furniture {
                        defname: "armoire".to_string(),
                        x: 7,
                        y: 5,
                        dx: 2,
                        dy: 1,
                        blocks_los: true,
                    },
                ],
            },
            RoomDef {
                name: "dining hall".to_string(),
                size: (12, 10),
                no_door_cells: vec![(0, 4)], // bay window
                furniture: vec![Furniture {
                    defname: "long table".to_string(),
                    x: 3,
                    y: 4,
                    dx: 6,
                    dy: 2,
                    blocks_los: false,
                }],
            },
            RoomDef {
                name: "corridor".to_string(),
                size: (12, 3),
                no_door_cells: vec![],
                furniture: vec![],
            },
            RoomDef {
                name: "closet".to_string(),
                size: (3, 3),
                no_door_cells: vec![],
                furniture: vec![],
            },
        ],
    }
}

/// Create default door definitions (hardcoded fallback)
pub fn default_door_defs() -> DoorDefs {
    DoorDefs {
        defs: vec![
            DoorDef {
                name: "plain door".to_string(),
                width: 1,
            },
            DoorDef {
                name: "double door".to_string(),
                width: 2,
            },
            DoorDef {
                name: "archway".to_string(),
                width: 3,
            },
        ],
    }
}

/// Create default entity definitions (hardcoded fallback)
pub fn default_entity_defs() -> EntityDefs {
    EntityDefs {
        defs: vec![
            EntityDef {
                name: "teenager".to_string(),
                side: Side::Explorers,
                sight: 10,
            },
            EntityDef {
                name: "occultist".to_string(),
                side: Side::Explorers,
                sight: 12,
            },
            EntityDef {
                name: "specter".to_string(),
                side: Side::Haunt,
                sight: 8,
            },
            EntityDef {
                name: "poltergeist".to_string(),
                side: Side::Haunt,
                sight: 6,
            },
        ],
    }
}
