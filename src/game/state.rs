//! Game session state
//!
//! Owns the house, the entity world, and the fog field, and drives the
//! per-tick visibility simulation: recompute each active-side entity's
//! line of sight, merge the results into the shared field, then decay the
//! field toward its resting state.

use std::collections::HashSet;
use std::time::Duration;

use hecs::{Entity, World};

use crate::ecs::{occupied_cells, side_entities, Position, Side, Sight, SightMemory};
use crate::game::adjacency::MoveGraph;
use crate::game::los::{bresenham, sweep_ray};
use crate::house::{Floor, House, LosField, LOS_FIELD_SIZE, LOS_VISIBILITY_THRESHOLD};

/// Fixed reference the fog window re-centers on.
/// TODO: follow the camera once one exists.
const LOS_FIELD_ORIGIN: (i32, i32) = (-20, -20);

/// Milliseconds of elapsed time per unit of fog decay.
const LOS_DECAY_DIVISOR: i64 = 5;

/// A running game session.
pub struct Game {
    house: House,
    world: World,
    los_field: LosField,
    /// Side whose turn it is
    side: Side,
    /// Incremented on each round; every two turns is a complete round
    turn: u32,
}

impl Game {
    /// Start a session over a house and a populated entity world.
    ///
    /// The fog field is created once here and lives for the whole session.
    /// The starting side's sight is computed and merged immediately so the
    /// first frame has a fog state.
    pub fn new(house: House, world: World) -> Self {
        let mut game = Self {
            house,
            world,
            los_field: LosField::new(LOS_FIELD_SIZE),
            side: Side::Explorers,
            turn: 0,
        };
        game.los_field.remap(LOS_FIELD_ORIGIN.0, LOS_FIELD_ORIGIN.1);
        let ents = side_entities(&game.world, game.side);
        for &ent in &ents {
            game.determine_los(ent, true);
        }
        game.merge_los(&ents);
        log::info!(
            "session started: {} rooms, {} entities",
            game.floor().rooms.len(),
            game.world.len()
        );
        game
    }

    /// The floor play happens on.
    pub fn floor(&self) -> &Floor {
        self.house.floor()
    }

    pub fn house(&self) -> &House {
        &self.house
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn los_field(&self) -> &LosField {
        &self.los_field
    }

    /// Side whose turn it is.
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Move an entity to an absolute cell. Sight is recomputed lazily on
    /// the next tick from the position change.
    pub fn set_position(&mut self, ent: Entity, x: i32, y: i32) {
        if let Ok(mut pos) = self.world.get::<&mut Position>(ent) {
            pos.x = x;
            pos.y = y;
        }
    }

    /// Advance the round: the other side becomes active, and its sight is
    /// recomputed and merged so the fog reflects the new point of view.
    pub fn on_round(&mut self) {
        self.turn += 1;
        self.side = self.side.opponent();
        log::debug!("turn {} begins, {:?} active", self.turn, self.side);
        let ents = side_entities(&self.world, self.side);
        for &ent in &ents {
            self.determine_los(ent, true);
        }
        self.merge_los(&ents);
    }

    /// One simulation tick: refresh active-side sight, merge it into the
    /// fog field, then decay the field by an amount proportional to the
    /// elapsed time. A changed field is remapped to the fixed reference.
    pub fn think(&mut self, dt: Duration) {
        let ents = side_entities(&self.world, self.side);
        for &ent in &ents {
            self.determine_los(ent, false);
        }
        self.merge_los(&ents);

        let amt = dt.as_millis() as i64 / LOS_DECAY_DIVISOR;
        if self.los_field.decay(amt) {
            self.los_field.remap(LOS_FIELD_ORIGIN.0, LOS_FIELD_ORIGIN.1);
        }
    }

    /// Recompute an entity's visible-cell set.
    ///
    /// Skipped when the entity has not moved since the cached set was
    /// computed, unless `force` is set. Rays are cast to every cell on the
    /// perimeter of the sight-radius square; each ray is clipped by walls,
    /// closed doors, blocking furniture, and the sight budget.
    pub fn determine_los(&mut self, ent: Entity, force: bool) {
        let Ok(pos) = self.world.get::<&Position>(ent).map(|p| *p) else {
            return;
        };
        let Ok(sight) = self.world.get::<&Sight>(ent).map(|s| s.0) else {
            return;
        };
        {
            let Ok(mem) = self.world.get::<&SightMemory>(ent) else {
                return;
            };
            if !force && pos.x == mem.losx && pos.y == mem.losy {
                return;
            }
        }

        let (ex, ey) = (pos.x, pos.y);
        let floor = self.house.floor();
        let mut los = HashSet::new();
        let (minx, miny) = (ex - sight, ey - sight);
        let (maxx, maxy) = (ex + sight, ey + sight);
        for x in minx..=maxx {
            sweep_ray(floor, sight, &bresenham(ex, ey, x, miny), &mut los);
            sweep_ray(floor, sight, &bresenham(ex, ey, x, maxy), &mut los);
        }
        for y in miny..=maxy {
            sweep_ray(floor, sight, &bresenham(ex, ey, minx, y), &mut los);
            sweep_ray(floor, sight, &bresenham(ex, ey, maxx, y), &mut los);
        }

        // The ray cells come out displaced by one from the cells the fog
        // field samples; shifting the whole set keeps the two aligned.
        // TODO: find the ray/field origin mismatch and remove this shift.
        let los = los.into_iter().map(|(x, y)| (x + 1, y + 1)).collect();

        if let Ok(mut mem) = self.world.get::<&mut SightMemory>(ent) {
            mem.losx = ex;
            mem.losy = ey;
            mem.los = los;
        }
    }

    /// Merge the given entities' sight sets into the fog field.
    ///
    /// Cells in the window that fell out of the union fade below the
    /// visibility threshold; cells in the union are raised to at least the
    /// threshold.
    pub fn merge_los(&mut self, ents: &[Entity]) {
        let mut merge: HashSet<(i32, i32)> = HashSet::new();
        for &ent in ents {
            if let Ok(mem) = self.world.get::<&SightMemory>(ent) {
                merge.extend(mem.los.iter().copied());
            }
        }

        let (ltx, lty, ltx2, lty2) = self.los_field.region();
        for i in ltx..=ltx2 {
            for j in lty..=lty2 {
                if merge.contains(&(i, j)) {
                    continue;
                }
                if self.los_field.get(i, j) >= LOS_VISIBILITY_THRESHOLD {
                    self.los_field.set(i, j, LOS_VISIBILITY_THRESHOLD - 1);
                }
            }
        }
        for &(x, y) in &merge {
            if self.los_field.get(x, y) < LOS_VISIBILITY_THRESHOLD {
                self.los_field.set(x, y, LOS_VISIBILITY_THRESHOLD);
            }
        }
    }

    /// Can the entity currently see this absolute cell?
    pub fn sees(&self, ent: Entity, x: i32, y: i32) -> bool {
        self.world
            .get::<&SightMemory>(ent)
            .map(|mem| mem.sees(x, y))
            .unwrap_or(false)
    }

    /// Adjacency view over the floor and current occupancy, for
    /// pathfinding.
    pub fn move_graph(&self) -> MoveGraph<'_> {
        MoveGraph::new(self.house.floor(), occupied_cells(&self.world))
    }

    /// Walkable neighbors of a vertex with edge weights.
    pub fn adjacent(&self, v: usize) -> (Vec<usize>, Vec<f64>) {
        self.move_graph().adjacent(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::house::{Door, Room, WallFacing, LOS_MIN_VISIBILITY};

    /// Two 5x5 rooms sharing the wall at x = 5, with a width-2 door at
    /// position 1, and one explorer standing next to the door at (4, 1).
    fn door_scenario(opened: bool) -> (Game, Entity) {
        let mut floor = Floor {
            rooms: vec![Room::new("west", 0, 0, 5, 5), Room::new("east", 5, 0, 5, 5)],
        };
        let placed = floor.add_door(
            0,
            Door {
                defname: "plain".to_string(),
                facing: WallFacing::FarRight,
                pos: 1,
                width: 2,
                opened,
            },
        );
        assert!(placed);

        let mut world = World::new();
        let ent = world.spawn((
            Position::new(4, 1),
            Side::Explorers,
            Sight(10),
            SightMemory::new(),
        ));
        (Game::new(House::new(vec![floor], 0), world), ent)
    }

    // The recorded sight cells carry the engine's (+1, +1) shift, so a
    // floor cell (x, y) shows up in the sight set as (x + 1, y + 1).
    fn sees_floor_cell(game: &Game, ent: Entity, x: i32, y: i32) -> bool {
        game.sees(ent, x + 1, y + 1)
    }

    #[test]
    fn test_open_door_reveals_far_side_span() {
        let (game, ent) = door_scenario(true);
        // The two cells of the door span on the east side are visible.
        assert!(sees_floor_cell(&game, ent, 5, 1));
        assert!(sees_floor_cell(&game, ent, 5, 2));
        // Cells behind the wall outside the span are not.
        assert!(!sees_floor_cell(&game, ent, 5, 0));
        assert!(!sees_floor_cell(&game, ent, 5, 3));
        assert!(!sees_floor_cell(&game, ent, 5, 4));
    }

    #[test]
    fn test_closing_door_hides_far_side() {
        let (mut game, ent) = door_scenario(true);
        assert!(sees_floor_cell(&game, ent, 5, 1));

        for room in &mut game.house.floors[0].rooms {
            for door in &mut room.doors {
                door.opened = false;
            }
        }
        game.determine_los(ent, true);

        assert!(!sees_floor_cell(&game, ent, 5, 1));
        assert!(!sees_floor_cell(&game, ent, 5, 2));
        // The near side stays visible.
        assert!(sees_floor_cell(&game, ent, 2, 1));
    }

    #[test]
    fn test_los_bounded_by_sight_radius() {
        let (game, ent) = door_scenario(true);
        let mem = game.world.get::<&SightMemory>(ent).unwrap();
        for &(x, y) in &mem.los {
            // Distances measured in shifted coordinates against the
            // shifted origin.
            let d = (x - 5).abs().max((y - 2).abs());
            assert!(d <= 10, "cell {:?} beyond sight radius", (x, y));
        }
        assert!(!mem.los.is_empty());
    }

    #[test]
    fn test_determine_los_cached_until_moved() {
        let (mut game, ent) = door_scenario(true);
        let before: HashSet<(i32, i32)> =
            game.world.get::<&SightMemory>(ent).unwrap().los.clone();

        // Same position, no force: the cache stands.
        game.determine_los(ent, false);
        assert_eq!(game.world.get::<&SightMemory>(ent).unwrap().los, before);

        // Moving invalidates it on the next tick.
        game.set_position(ent, 1, 3);
        game.think(Duration::from_millis(16));
        let after = &game.world.get::<&SightMemory>(ent).unwrap().los;
        assert_ne!(*after, before);
        assert_eq!(game.world.get::<&SightMemory>(ent).unwrap().losx, 1);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let (mut game, ent) = door_scenario(true);
        game.merge_los(&[ent]);
        let snapshot = game.los_field.clone();
        game.merge_los(&[ent]);
        assert_eq!(game.los_field, snapshot);
    }

    #[test]
    fn test_merge_raises_seen_and_drops_unseen() {
        let (mut game, ent) = door_scenario(true);
        // Seed an old visible cell that the entity does not see.
        game.los_field.set(-10, -10, 255);
        game.merge_los(&[ent]);

        assert_eq!(game.los_field.get(-10, -10), LOS_VISIBILITY_THRESHOLD - 1);
        let mem_cell = {
            let mem = game.world.get::<&SightMemory>(ent).unwrap();
            *mem.los.iter().next().unwrap()
        };
        assert!(game.los_field.get(mem_cell.0, mem_cell.1) >= LOS_VISIBILITY_THRESHOLD);
    }

    #[test]
    fn test_field_stays_in_range_across_ticks() {
        let (mut game, _ent) = door_scenario(true);
        for _ in 0..50 {
            game.think(Duration::from_millis(100));
        }
        let (x, y, x2, y2) = game.los_field.region();
        for i in x..=x2 {
            for j in y..=y2 {
                let v = game.los_field.get(i, j);
                assert!(v >= LOS_MIN_VISIBILITY);
            }
        }
    }

    #[test]
    fn test_on_round_flips_sides() {
        let (mut game, _ent) = door_scenario(true);
        assert_eq!(game.side(), Side::Explorers);
        game.on_round();
        assert_eq!(game.side(), Side::Haunt);
        assert_eq!(game.turn(), 1);
        game.on_round();
        assert_eq!(game.side(), Side::Explorers);
    }

    #[test]
    fn test_adjacent_through_session() {
        let (game, _ent) = door_scenario(true);
        let g = game.move_graph();
        // The occupied entity cell is excluded from its neighbors' edges.
        let (adj, _) = game.adjacent(g.to_vertex(3, 1));
        assert!(!adj.contains(&g.to_vertex(4, 1)));
        assert!(adj.contains(&g.to_vertex(3, 2)));
    }
}
