//! Data module
//!
//! External definitions for rooms, doors, and entities, and the registry
//! that resolves names into live instances.

pub mod defs;
pub mod loader;

pub use defs::{DoorDef, DoorDefs, EntityDef, EntityDefs, RoomDef, RoomDefs};
pub use loader::{DataError, Registry};
