//! ECS module
//!
//! Entity components and the queries run over them.

pub mod components;
pub mod systems;

pub use components::{Name, Position, Side, Sight, SightMemory};
pub use systems::{occupied_cells, side_entities};
