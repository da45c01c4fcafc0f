//! ECS Systems
//!
//! World-wide queries the simulation runs every tick: which cells entities
//! occupy, and which entities belong to the side whose turn it is.

use std::collections::HashSet;

use hecs::{Entity, World};

use crate::ecs::{Position, Side};

/// Collect the set of cells occupied by any entity.
pub fn occupied_cells(world: &World) -> HashSet<(i32, i32)> {
    world
        .query::<&Position>()
        .iter()
        .map(|(_, pos)| (pos.x, pos.y))
        .collect()
}

/// All entities playing for `side`.
pub fn side_entities(world: &World, side: Side) -> Vec<Entity> {
    world
        .query::<&Side>()
        .iter()
        .filter(|(_, s)| **s == side)
        .map(|(e, _)| e)
        .collect()
}
