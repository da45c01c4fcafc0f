//! Rooms, doors, and furniture
//!
//! A room is a rectangular region placed on a floor, with door openings
//! along its walls and furniture occupying some of its cells.

use serde::{Deserialize, Serialize};

/// Which wall of a room a door sits on, in room-local terms.
///
/// NearLeft is the `x == 0` wall, FarRight the `x == dx - 1` wall; both run
/// along the y axis, so a door on them is positioned by its y offset.
/// NearRight (`y == 0`) and FarLeft (`y == dy - 1`) run along the x axis
/// and position doors by x offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallFacing {
    NearLeft,
    NearRight,
    FarLeft,
    FarRight,
}

impl WallFacing {
    /// The facing a matching door in the adjoining room must have.
    pub fn mirror(self) -> WallFacing {
        match self {
            WallFacing::NearLeft => WallFacing::FarRight,
            WallFacing::NearRight => WallFacing::FarLeft,
            WallFacing::FarLeft => WallFacing::NearRight,
            WallFacing::FarRight => WallFacing::NearLeft,
        }
    }
}

/// One side of a door opening, owned by the room it is placed in.
///
/// A physical opening between two rooms exists as two `Door` instances,
/// one per room, with mirrored facings and positions offset by the rooms'
/// relative placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Door {
    /// Name of the door definition this was resolved from
    pub defname: String,
    /// Which wall the door is on
    pub facing: WallFacing,
    /// How far along that wall the door starts
    pub pos: i32,
    /// Number of cells the door spans
    pub width: i32,
    /// Whether the door is currently open
    pub opened: bool,
}

impl Door {
    /// Does the door's span `[pos, pos + width)` cover this wall offset?
    pub fn covers(&self, pos: i32) -> bool {
        pos >= self.pos && pos < self.pos + self.width
    }
}

/// A piece of furniture occupying cells inside a room.
///
/// Coordinates are room-relative. All furniture blocks movement; only
/// pieces with `blocks_los` set stop sight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Furniture {
    pub defname: String,
    pub x: i32,
    pub y: i32,
    pub dx: i32,
    pub dy: i32,
    pub blocks_los: bool,
}

impl Furniture {
    /// Does this piece cover the room-relative cell `(x, y)`?
    pub fn covers(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.dx && y >= self.y && y < self.y + self.dy
    }
}

/// Per-cell room data consulted by the editor-facing validation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CellData {
    /// Whether a door may occupy this cell
    pub can_have_door: bool,
}

impl Default for CellData {
    fn default() -> Self {
        Self { can_have_door: true }
    }
}

/// A rectangular room placed on a floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Name of the room definition this was resolved from
    pub defname: String,
    /// Floor offset
    pub x: i32,
    pub y: i32,
    /// Size in cells
    pub dx: i32,
    pub dy: i32,
    /// Doors placed along this room's walls
    pub doors: Vec<Door>,
    /// Furniture inside this room
    pub furniture: Vec<Furniture>,
    /// Per-cell data, row-major over `dx * dy` cells
    pub cells: Vec<CellData>,
}

impl Room {
    /// Create an empty room of the given size at the given floor offset.
    pub fn new(defname: impl Into<String>, x: i32, y: i32, dx: i32, dy: i32) -> Self {
        Self {
            defname: defname.into(),
            x,
            y,
            dx,
            dy,
            doors: Vec::new(),
            furniture: Vec::new(),
            cells: vec![CellData::default(); (dx * dy).max(0) as usize],
        }
    }

    #[inline]
    fn cell_idx(&self, x: i32, y: i32) -> usize {
        (y * self.dx + x) as usize
    }

    /// Cell data at a room-relative coordinate. Out-of-room cells read as
    /// not door-capable.
    pub fn cell(&self, x: i32, y: i32) -> CellData {
        if x < 0 || x >= self.dx || y < 0 || y >= self.dy {
            return CellData { can_have_door: false };
        }
        self.cells
            .get(self.cell_idx(x, y))
            .copied()
            .unwrap_or(CellData { can_have_door: false })
    }

    /// Mark a room-relative cell as unable to host a door.
    pub fn forbid_door_at(&mut self, x: i32, y: i32) {
        if x >= 0 && x < self.dx && y >= 0 && y < self.dy {
            let idx = self.cell_idx(x, y);
            if let Some(cell) = self.cells.get_mut(idx) {
                cell.can_have_door = false;
            }
        }
    }

    /// Does this room cover the absolute floor coordinate `(x, y)`?
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.dx && y >= self.y && y < self.y + self.dy
    }

    /// Do two rooms overlap anywhere on the floor?
    pub fn overlaps(&self, other: &Room) -> bool {
        self.x < other.x + other.dx
            && other.x < self.x + self.dx
            && self.y < other.y + other.dy
            && other.y < self.y + self.dy
    }

    /// The furniture piece covering the room-relative cell `(x, y)`, if any.
    pub fn furniture_at(&self, x: i32, y: i32) -> Option<&Furniture> {
        self.furniture.iter().find(|f| f.covers(x, y))
    }

    /// Validate a door placement on this room.
    ///
    /// Rejects doors with a negative position, doors that run past the wall
    /// extent, doors over cells that cannot host one, and doors overlapping
    /// an existing door on the same facing.
    pub fn can_add_door(&self, door: &Door) -> bool {
        if door.pos < 0 {
            return false;
        }

        match door.facing {
            WallFacing::FarLeft | WallFacing::NearRight => {
                if door.pos + door.width >= self.dx {
                    return false;
                }
                let y = if door.facing == WallFacing::FarLeft {
                    self.dy - 1
                } else {
                    0
                };
                for pos in door.pos..=door.pos + door.width {
                    if !self.cell(pos, y).can_have_door {
                        return false;
                    }
                }
            }
            WallFacing::FarRight | WallFacing::NearLeft => {
                if door.pos + door.width >= self.dy {
                    return false;
                }
                let x = if door.facing == WallFacing::FarRight {
                    self.dx - 1
                } else {
                    0
                };
                for pos in door.pos..=door.pos + door.width {
                    if !self.cell(x, pos).can_have_door {
                        return false;
                    }
                }
            }
        }

        for other in &self.doors {
            if other.facing != door.facing {
                continue;
            }
            if other.pos >= door.pos && other.pos - door.pos < door.width {
                return false;
            }
            if door.pos >= other.pos && door.pos - other.pos < other.width {
                return false;
            }
        }

        true
    }
}
