//! RON definition registry
//!
//! Resolves definition names into fully populated rooms, doors, and
//! entities. Definitions come from external RON files under
//! `assets/data/`, with fallback to hardcoded defaults when a file is
//! missing or fails to parse.

use std::fs;
use std::path::Path;

use hecs::{Entity, World};
use thiserror::Error;

use super::defs::{
    default_door_defs, default_entity_defs, default_room_defs, DoorDefs, EntityDefs, RoomDefs,
};
use crate::ecs::{Name, Position, Sight, SightMemory};
use crate::house::{Door, Room, WallFacing};

/// Errors from resolving definition names.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("unknown {kind} definition '{name}'")]
    UnknownDef { kind: &'static str, name: String },
}

/// The definition registry: every named def the game can instantiate.
#[derive(Debug, Clone)]
pub struct Registry {
    pub rooms: RoomDefs,
    pub doors: DoorDefs,
    pub entities: EntityDefs,
}

impl Registry {
    /// Create a registry, loading from files or using defaults.
    pub fn new() -> Self {
        Self::load_from_assets()
    }

    /// A registry built purely from the compiled-in defaults.
    pub fn defaults() -> Self {
        Self {
            rooms: default_room_defs(),
            doors: default_door_defs(),
            entities: default_entity_defs(),
        }
    }

    /// Load definitions from the `assets/data/` directory, falling back
    /// per file to the defaults.
    pub fn load_from_assets() -> Self {
        let base_path = Path::new("assets/data");
        Self {
            rooms: Self::load_rooms(base_path),
            doors: Self::load_doors(base_path),
            entities: Self::load_entities(base_path),
        }
    }

    fn load_rooms(base_path: &Path) -> RoomDefs {
        let path = base_path.join("rooms.ron");
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match ron::from_str(&content) {
                    Ok(defs) => return defs,
                    Err(e) => log::warn!("Failed to parse rooms.ron: {}. Using defaults.", e),
                },
                Err(e) => log::warn!("Failed to read rooms.ron: {}. Using defaults.", e),
            }
        }
        default_room_defs()
    }

    fn load_doors(base_path: &Path) -> DoorDefs {
        let path = base_path.join("doors.ron");
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match ron::from_str(&content) {
                    Ok(defs) => return defs,
                    Err(e) => log::warn!("Failed to parse doors.ron: {}. Using defaults.", e),
                },
                Err(e) => log::warn!("Failed to read doors.ron: {}. Using defaults.", e),
            }
        }
        default_door_defs()
    }

    fn load_entities(base_path: &Path) -> EntityDefs {
        let path = base_path.join("entities.ron");
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match ron::from_str(&content) {
                    Ok(defs) => return defs,
                    Err(e) => log::warn!("Failed to parse entities.ron: {}. Using defaults.", e),
                },
                Err(e) => log::warn!("Failed to read entities.ron: {}. Using defaults.", e),
            }
        }
        default_entity_defs()
    }

    /// Materialize a room instance at a floor offset.
    pub fn make_room(&self, name: &str, x: i32, y: i32) -> Result<Room, DataError> {
        let def = self.rooms.find(name).ok_or_else(|| DataError::UnknownDef {
            kind: "room",
            name: name.to_string(),
        })?;
        let mut room = Room::new(&def.name, x, y, def.size.0, def.size.1);
        for &(cx, cy) in &def.no_door_cells {
            room.forbid_door_at(cx, cy);
        }
        room.furniture = def.furniture.clone();
        Ok(room)
    }

    /// Materialize a door instance on a wall. Doors start closed.
    pub fn make_door(&self, name: &str, facing: WallFacing, pos: i32) -> Result<Door, DataError> {
        let def = self.doors.find(name).ok_or_else(|| DataError::UnknownDef {
            kind: "door",
            name: name.to_string(),
        })?;
        Ok(Door {
            defname: def.name.clone(),
            facing,
            pos,
            width: def.width,
            opened: false,
        })
    }

    /// Spawn an entity from its definition into the world.
    pub fn spawn_entity(
        &self,
        world: &mut World,
        name: &str,
        x: i32,
        y: i32,
    ) -> Result<Entity, DataError> {
        let def = self
            .entities
            .find(name)
            .ok_or_else(|| DataError::UnknownDef {
                kind: "entity",
                name: name.to_string(),
            })?;
        Ok(world.spawn((
            Name::new(&def.name),
            Position::new(x, y),
            def.side,
            Sight(def.sight),
            SightMemory::new(),
        )))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::defaults()
    }
}
