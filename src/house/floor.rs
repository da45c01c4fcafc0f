//! Floors and houses
//!
//! A floor is an ordered set of non-overlapping rooms. Connectivity between
//! rooms is decided here: two cells in different rooms only connect across
//! an open door span on the wall between them. Anything the geometry does
//! not recognize reads as not connected.

use serde::{Deserialize, Serialize};

use super::room::{Door, Room, WallFacing};

/// One floor of a house.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Floor {
    pub rooms: Vec<Room>,
}

impl Floor {
    /// Index of the room covering the absolute coordinate `(x, y)`, if any.
    pub fn room_at(&self, x: i32, y: i32) -> Option<usize> {
        self.rooms.iter().position(|r| r.contains(x, y))
    }

    /// Room placement validation: rooms on a floor may never overlap.
    pub fn can_add_room(&self, add: &Room) -> bool {
        self.rooms.iter().all(|r| !r.overlaps(add))
    }

    /// Decide whether movement or sight crosses freely between two cells.
    ///
    /// `(x, y)` must lie in room `r` and `(x2, y2)` in room `r2`, in
    /// absolute floor coordinates. Within a single room the answer is
    /// always yes. Across rooms, the crossing is resolved to a wall facing
    /// of `r` and granted only by an open door covering the crossing
    /// point on that facing.
    pub fn connected(&self, r: usize, r2: usize, x: i32, y: i32, x2: i32, y2: i32) -> bool {
        if r == r2 {
            return true;
        }
        let (Some(room), Some(room2)) = (self.rooms.get(r), self.rooms.get(r2)) else {
            return false;
        };
        let x = x - room.x;
        let y = y - room.y;
        let x2 = x2 - room2.x;
        let y2 = y2 - room2.y;
        let facing = if x == 0 && x2 != 0 {
            WallFacing::NearLeft
        } else if y == 0 && y2 != 0 {
            WallFacing::NearRight
        } else if x != 0 && x2 == 0 {
            WallFacing::FarRight
        } else if y != 0 && y2 == 0 {
            WallFacing::FarLeft
        } else {
            // Unrecognized crossings must never read as an open door.
            return false;
        };
        for door in &room.doors {
            if door.facing != facing {
                continue;
            }
            // NearLeft/FarRight walls run along the y axis, the other two
            // along the x axis.
            let pos = match facing {
                WallFacing::NearLeft | WallFacing::FarRight => y,
                WallFacing::NearRight | WallFacing::FarLeft => x,
            };
            if door.covers(pos) {
                return door.opened;
            }
        }
        false
    }

    /// Find the counterpart of `door` (on room `r`) in the adjoining room.
    ///
    /// Returns `(room index, door index)` of the matching instance: the
    /// adjoining room must sit immediately across the door's wall, carry a
    /// door with the mirrored facing, and that door's position must equal
    /// this one's adjusted by the rooms' offset.
    pub fn find_matching_door(&self, r: usize, door: &Door) -> Option<(usize, usize)> {
        let room = self.rooms.get(r)?;
        for (oi, other_room) in self.rooms.iter().enumerate() {
            if oi == r {
                continue;
            }
            let across_wall = match door.facing {
                WallFacing::FarLeft => other_room.y == room.y + room.dy,
                WallFacing::NearRight => room.y == other_room.y + other_room.dy,
                WallFacing::FarRight => other_room.x == room.x + room.dx,
                WallFacing::NearLeft => room.x == other_room.x + other_room.dx,
            };
            if !across_wall {
                continue;
            }
            for (di, other_door) in other_room.doors.iter().enumerate() {
                if other_door.facing != door.facing.mirror() {
                    continue;
                }
                let matched = match door.facing {
                    WallFacing::FarLeft | WallFacing::NearRight => {
                        door.pos == other_door.pos - (room.x - other_room.x)
                    }
                    WallFacing::FarRight | WallFacing::NearLeft => {
                        door.pos == other_door.pos - (room.y - other_room.y)
                    }
                };
                if matched {
                    return Some((oi, di));
                }
            }
        }
        None
    }

    /// Find the room that would receive the counterpart of `door` placed on
    /// room `target`, and build that counterpart instance.
    ///
    /// Placement is always initiated from the far-facing side, so only
    /// FarLeft and FarRight doors resolve here.
    pub fn find_room_for_door(&self, target: usize, door: &Door) -> Option<(usize, Door)> {
        let room = self.rooms.get(target)?;
        if !room.can_add_door(door) {
            return None;
        }

        match door.facing {
            WallFacing::FarLeft => {
                for (i, other) in self.rooms.iter().enumerate() {
                    if other.y == room.y + room.dy {
                        let mut twin = door.clone();
                        twin.pos = door.pos - (other.x - room.x);
                        twin.facing = WallFacing::NearRight;
                        if other.can_add_door(&twin) {
                            return Some((i, twin));
                        }
                    }
                }
            }
            WallFacing::FarRight => {
                for (i, other) in self.rooms.iter().enumerate() {
                    if other.x == room.x + room.dx {
                        let mut twin = door.clone();
                        twin.pos = door.pos - (other.y - room.y);
                        twin.facing = WallFacing::NearLeft;
                        if other.can_add_door(&twin) {
                            return Some((i, twin));
                        }
                    }
                }
            }
            WallFacing::NearLeft | WallFacing::NearRight => {}
        }
        None
    }

    /// Would placing `door` on room `target` succeed, counterpart included?
    pub fn can_add_door(&self, target: usize, door: &Door) -> bool {
        self.find_room_for_door(target, door).is_some()
    }

    /// Place `door` on room `target` together with its counterpart in the
    /// adjoining room. Returns false and leaves the floor untouched if the
    /// placement does not validate.
    pub fn add_door(&mut self, target: usize, door: Door) -> bool {
        let Some((other, twin)) = self.find_room_for_door(target, &door) else {
            return false;
        };
        self.rooms[other].doors.push(twin);
        self.rooms[target].doors.push(door);
        true
    }

    /// Prune doors whose matching counterpart no longer exists.
    ///
    /// Called whenever the room set changes: moving or removing a room
    /// orphans the door instances that pointed across its walls.
    pub fn remove_invalid_doors(&mut self) {
        for i in 0..self.rooms.len() {
            let keep: Vec<bool> = self.rooms[i]
                .doors
                .iter()
                .map(|d| self.find_matching_door(i, d).is_some())
                .collect();
            let mut keep = keep.iter().copied();
            self.rooms[i].doors.retain(|_| keep.next().unwrap_or(false));
        }
    }
}

/// A house: a stack of floors and the floor play starts on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct House {
    pub floors: Vec<Floor>,
    pub starting_floor: usize,
}

impl House {
    /// Build a house, guaranteeing at least one floor.
    pub fn new(mut floors: Vec<Floor>, starting_floor: usize) -> Self {
        if floors.is_empty() {
            floors.push(Floor::default());
        }
        let starting_floor = starting_floor.min(floors.len() - 1);
        Self {
            floors,
            starting_floor,
        }
    }

    /// The floor play happens on.
    pub fn floor(&self) -> &Floor {
        &self.floors[self.starting_floor]
    }

    pub fn floor_mut(&mut self) -> &mut Floor {
        let i = self.starting_floor;
        &mut self.floors[i]
    }
}
