//! Movement adjacency graph
//!
//! A read-only view over a floor plus the current entity occupancy,
//! exposing the walkable-neighbor query a pathfinder consumes. Cells are
//! addressed by vertex: a room-major linearization of every cell on the
//! floor, concatenated in room order.

use std::collections::HashSet;

use crate::house::Floor;

/// Adjacency view for pathfinding over one floor.
pub struct MoveGraph<'a> {
    floor: &'a Floor,
    occupied: HashSet<(i32, i32)>,
}

impl<'a> MoveGraph<'a> {
    pub fn new(floor: &'a Floor, occupied: HashSet<(i32, i32)>) -> Self {
        Self { floor, occupied }
    }

    /// Total number of cells across all rooms on the floor.
    pub fn num_vertices(&self) -> usize {
        self.floor
            .rooms
            .iter()
            .map(|r| (r.dx * r.dy) as usize)
            .sum()
    }

    /// Vertex for the absolute coordinate `(x, y)`.
    ///
    /// Coordinates outside every room map to `num_vertices()`, which
    /// `from_vertex` refuses to resolve.
    pub fn to_vertex(&self, x: i32, y: i32) -> usize {
        let mut v = 0usize;
        for room in &self.floor.rooms {
            if room.contains(x, y) {
                let lx = x - room.x;
                let ly = y - room.y;
                v += (lx + ly * room.dx) as usize;
                return v;
            }
            v += (room.dx * room.dy) as usize;
        }
        v
    }

    /// Resolve a vertex to `(room index, x, y)` in absolute coordinates.
    pub fn from_vertex(&self, v: usize) -> Option<(usize, i32, i32)> {
        let mut v = v;
        for (i, room) in self.floor.rooms.iter().enumerate() {
            let size = (room.dx * room.dy) as usize;
            if v >= size {
                v -= size;
                continue;
            }
            let v = v as i32;
            return Some((i, room.x + v % room.dx, room.y + v / room.dx));
        }
        None
    }

    /// Is the cell free of entities and furniture, and part of some room?
    /// Returns the room index when it is.
    fn open_cell(&self, x: i32, y: i32) -> Option<usize> {
        if self.occupied.contains(&(x, y)) {
            return None;
        }
        let r = self.floor.room_at(x, y)?;
        let room = &self.floor.rooms[r];
        if room.furniture_at(x - room.x, y - room.y).is_some() {
            return None;
        }
        Some(r)
    }

    /// Walkable neighbors of a vertex with their edge weights.
    ///
    /// Cardinal steps need an open target cell and connectivity across any
    /// room boundary. Diagonal steps additionally need both contributing
    /// cardinal directions open (no cutting a blocked corner) and
    /// connectivity in both directions, so a one-way door cannot be
    /// slipped through diagonally. A diagonal's weight is the average of
    /// its two contributing cardinal weights.
    pub fn adjacent(&self, v: usize) -> (Vec<usize>, Vec<f64>) {
        let mut adj = Vec::new();
        let mut weight = Vec::new();
        let Some((room, x, y)) = self.from_vertex(v) else {
            return (adj, weight);
        };

        let mut moves = [[0f64; 3]; 3];
        for dx in -1i32..=1 {
            for dy in -1i32..=1 {
                // Cardinals: exactly one of dx, dy is non-zero.
                if (dx == 0) == (dy == 0) {
                    continue;
                }
                let (tx, ty) = (x + dx, y + dy);
                let Some(troom) = self.open_cell(tx, ty) else {
                    continue;
                };
                if !self.floor.connected(room, troom, x, y, tx, ty) {
                    continue;
                }
                adj.push(self.to_vertex(tx, ty));
                moves[(dx + 1) as usize][(dy + 1) as usize] = 1.0;
                weight.push(1.0);
            }
        }
        for dx in -1i32..=1 {
            for dy in -1i32..=1 {
                if dx == 0 || dy == 0 {
                    continue;
                }
                let (tx, ty) = (x + dx, y + dy);
                let Some(troom) = self.open_cell(tx, ty) else {
                    continue;
                };
                if !self.floor.connected(room, troom, x, y, tx, ty) {
                    continue;
                }
                if !self.floor.connected(troom, room, tx, ty, x, y) {
                    continue;
                }
                if moves[(dx + 1) as usize][1] == 0.0 || moves[1][(dy + 1) as usize] == 0.0 {
                    continue;
                }
                let w = (moves[(dx + 1) as usize][1] + moves[1][(dy + 1) as usize]) / 2.0;
                moves[(dx + 1) as usize][(dy + 1) as usize] = w;
                adj.push(self.to_vertex(tx, ty));
                weight.push(w);
            }
        }
        (adj, weight)
    }
}
