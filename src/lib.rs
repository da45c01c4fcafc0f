//! Haunts - a haunted-house tactical board game core
//!
//! Explorers and haunts move through the rooms of an old house; what each
//! side can see is decided here. The crate models floor topology (rooms,
//! doors, connectivity), the line-of-sight engine that traces sight rays
//! through it, the movement adjacency graph pathfinders consume, and the
//! decaying fog-of-war field shared by a side.

pub mod data;
pub mod ecs;
pub mod game;
pub mod house;

// Re-export commonly used types
pub use data::Registry;
pub use ecs::{Position, Side, Sight, SightMemory};
pub use game::{bresenham, Game, MoveGraph};
pub use house::{Door, Floor, House, LosField, Room, WallFacing};
