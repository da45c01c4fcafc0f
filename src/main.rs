//! Haunts - headless simulation demo
//!
//! Builds a small house from the definition registry, spawns a few
//! entities, and runs the visibility simulation for a stretch of ticks
//! while one explorer wanders the floor.

use std::time::Duration;

use anyhow::Result;
use hecs::World;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use haunts::ecs::Position;
use haunts::house::{LOS_MIN_VISIBILITY, LOS_VISIBILITY_THRESHOLD};
use haunts::{Floor, Game, House, Registry, WallFacing};

/// Simulated tick length
const TICK: Duration = Duration::from_millis(50);
const TICKS: u32 = 120;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Haunts demo v{}", env!("CARGO_PKG_VERSION"));

    let registry = Registry::new();

    let mut floor = Floor::default();
    for (name, x, y) in [("parlor", 0, 0), ("dining hall", 10, 0)] {
        let room = registry.make_room(name, x, y)?;
        if floor.can_add_room(&room) {
            floor.rooms.push(room);
        } else {
            log::warn!("room '{}' overlaps an existing room, skipped", name);
        }
    }

    let door = registry.make_door("double door", WallFacing::FarRight, 2)?;
    if !floor.add_door(0, door) {
        log::warn!("door placement failed");
    }
    for room in &mut floor.rooms {
        for door in &mut room.doors {
            door.opened = true;
        }
    }

    let mut world = World::new();
    let explorer = registry.spawn_entity(&mut world, "teenager", 2, 2)?;
    registry.spawn_entity(&mut world, "occultist", 4, 5)?;
    registry.spawn_entity(&mut world, "specter", 15, 4)?;

    let mut game = Game::new(House::new(vec![floor], 0), world);
    let mut rng = StdRng::seed_from_u64(0xB00);

    for tick in 0..TICKS {
        if tick % 10 == 0 {
            wander(&mut game, explorer, &mut rng);
        }
        if tick > 0 && tick % 40 == 0 {
            game.on_round();
        }
        game.think(TICK);
    }

    let (x, y, x2, y2) = game.los_field().region();
    let mut seen = 0u32;
    let mut lit = 0u32;
    for i in x..=x2 {
        for j in y..=y2 {
            let v = game.los_field().get(i, j);
            if v >= LOS_VISIBILITY_THRESHOLD {
                lit += 1;
            } else if v > LOS_MIN_VISIBILITY {
                seen += 1;
            }
        }
    }
    log::info!(
        "after {} ticks: {} cells visible, {} fading, turn {}",
        TICKS,
        lit,
        seen,
        game.turn()
    );

    Ok(())
}

/// Step an entity along a random open edge of the movement graph.
fn wander(game: &mut Game, ent: hecs::Entity, rng: &mut StdRng) {
    let step = {
        let Ok(pos) = game.world().get::<&Position>(ent).map(|p| *p) else {
            return;
        };
        let graph = game.move_graph();
        let (adj, _) = graph.adjacent(graph.to_vertex(pos.x, pos.y));
        adj.choose(rng).and_then(|&v| graph.from_vertex(v))
    };
    if let Some((_, nx, ny)) = step {
        log::debug!("entity wanders to ({}, {})", nx, ny);
        game.set_position(ent, nx, ny);
    }
}
