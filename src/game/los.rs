//! Sight rays
//!
//! Bresenham rasterization of sight lines and the walk that traces each
//! ray through the room graph, stopping at walls without an open door,
//! sight-blocking furniture, the floor's edge, or the sight budget.

use std::collections::HashSet;

use crate::house::Floor;

/// Rasterize the line from `(x, y)` to `(x2, y2)` into the ordered cells
/// it passes through, endpoints included.
///
/// Standard integer-error Bresenham with an axis swap for steep slopes.
/// Always yields `max(|dx|, |dy|) + 1` cells.
pub fn bresenham(mut x: i32, mut y: i32, mut x2: i32, mut y2: i32) -> Vec<(i32, i32)> {
    let mut dx = (x2 - x).abs();
    let mut dy = (y2 - y).abs();

    let steep = dy > dx;
    if steep {
        std::mem::swap(&mut x, &mut y);
        std::mem::swap(&mut x2, &mut y2);
        std::mem::swap(&mut dx, &mut dy);
    }

    let mut cells = Vec::with_capacity(dx as usize + 1);
    let mut err = dx >> 1;
    let mut cy = y;
    let xstep = if x2 < x { -1 } else { 1 };
    let ystep = if y2 < y { -1 } else { 1 };

    let mut cx = x;
    while cx != x2 {
        cells.push(if steep { (cy, cx) } else { (cx, cy) });
        err -= dy;
        if err < 0 {
            cy += ystep;
            err += dx;
        }
        cx += xstep;
    }
    cells.push(if steep { (cy, x2) } else { (x2, cy) });
    cells
}

/// Walk one sight ray and record the cells it reveals into `los`.
///
/// The ray's origin is always visible. Each following cell must resolve to
/// a room; axis-aligned steps across a room boundary need an open door at
/// the crossing, and diagonal steps additionally need connectivity through
/// both orthogonal corner rooms, checked against the previous and current
/// cell's rooms. Sight-blocking furniture ends the ray without revealing
/// its own cell, and `dist` bounds how many cells the ray may reveal.
pub(crate) fn sweep_ray(
    floor: &Floor,
    mut dist: i32,
    line: &[(i32, i32)],
    los: &mut HashSet<(i32, i32)>,
) {
    let Some(&(mut x, mut y)) = line.first() else {
        return;
    };
    los.insert((x, y));
    let mut room = floor.room_at(x, y);

    for &(px, py) in &line[1..] {
        let (x0, y0) = (x, y);
        x = px;
        y = py;
        let room0 = room;
        room = floor.room_at(x, y);
        let Some(r) = room else {
            // Walked off the floor.
            return;
        };

        if x == x0 || y == y0 {
            if let Some(r0) = room0 {
                if r0 != r && !floor.connected(r, r0, x, y, x0, y0) {
                    return;
                }
            }
        } else {
            // Diagonal step: sight must pass both corner rooms.
            let room_a = floor.room_at(x0, y0);
            let room_b = floor.room_at(x, y0);
            let room_c = floor.room_at(x0, y);
            if let (Some(a), Some(b)) = (room_a, room_b) {
                if a != b && !floor.connected(a, b, x0, y0, x, y0) {
                    return;
                }
            }
            if let (Some(a), Some(c)) = (room_a, room_c) {
                if a != c && !floor.connected(a, c, x0, y0, x0, y) {
                    return;
                }
            }
            if let Some(b) = room_b {
                if r != b && !floor.connected(r, b, x, y, x, y0) {
                    return;
                }
            }
            if let Some(c) = room_c {
                if r != c && !floor.connected(r, c, x, y, x0, y) {
                    return;
                }
            }
        }

        let rm = &floor.rooms[r];
        if let Some(furn) = rm.furniture_at(x - rm.x, y - rm.y) {
            if furn.blocks_los {
                return;
            }
        }

        dist -= 1;
        if dist <= 0 {
            return;
        }
        los.insert((x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::house::{Door, Furniture, Room, WallFacing};

    #[test]
    fn test_bresenham_single_cell() {
        assert_eq!(bresenham(3, 7, 3, 7), vec![(3, 7)]);
    }

    #[test]
    fn test_bresenham_horizontal() {
        assert_eq!(
            bresenham(0, 0, 5, 0),
            vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0)]
        );
    }

    #[test]
    fn test_bresenham_cell_count_and_endpoints() {
        let cases = [(0, 0, 7, 3), (2, 5, -4, 9), (-3, -3, 6, -8), (0, 0, 1, 9)];
        for &(x, y, x2, y2) in &cases {
            let cells = bresenham(x, y, x2, y2);
            let expected = (x2 - x).abs().max((y2 - y).abs()) as usize + 1;
            assert_eq!(cells.len(), expected, "length for {:?}", (x, y, x2, y2));
            assert_eq!(cells[0], (x, y));
            assert_eq!(*cells.last().unwrap(), (x2, y2));
        }
    }

    #[test]
    fn test_bresenham_reversal_on_straight_lines() {
        let mut rev = bresenham(5, 0, 0, 0);
        rev.reverse();
        assert_eq!(bresenham(0, 0, 5, 0), rev);

        let mut rev = bresenham(4, 4, 0, 0);
        rev.reverse();
        assert_eq!(bresenham(0, 0, 4, 4), rev);
    }

    #[test]
    fn test_bresenham_steep_slope() {
        let cells = bresenham(0, 0, 1, 4);
        assert_eq!(cells.len(), 5);
        assert_eq!(cells[0], (0, 0));
        assert_eq!(*cells.last().unwrap(), (1, 4));
        // Every step advances y by exactly one.
        for pair in cells.windows(2) {
            assert_eq!(pair[1].1 - pair[0].1, 1);
        }
    }

    fn open_door(facing: WallFacing, pos: i32, width: i32) -> Door {
        Door {
            defname: "plain".to_string(),
            facing,
            pos,
            width,
            opened: true,
        }
    }

    fn two_rooms(opened: bool) -> Floor {
        let mut floor = Floor {
            rooms: vec![Room::new("west", 0, 0, 5, 5), Room::new("east", 5, 0, 5, 5)],
        };
        let mut west_door = open_door(WallFacing::FarRight, 1, 2);
        let mut east_door = open_door(WallFacing::NearLeft, 1, 2);
        west_door.opened = opened;
        east_door.opened = opened;
        floor.rooms[0].doors.push(west_door);
        floor.rooms[1].doors.push(east_door);
        floor
    }

    #[test]
    fn test_sweep_ray_marks_open_run() {
        let floor = Floor {
            rooms: vec![Room::new("hall", 0, 0, 10, 10)],
        };
        let mut los = HashSet::new();
        sweep_ray(&floor, 20, &bresenham(1, 1, 6, 1), &mut los);
        for x in 1..=6 {
            assert!(los.contains(&(x, 1)));
        }
    }

    #[test]
    fn test_sweep_ray_budget() {
        let floor = Floor {
            rooms: vec![Room::new("hall", 0, 0, 10, 10)],
        };
        let mut los = HashSet::new();
        // Budget of 3 reveals the origin plus two more cells.
        sweep_ray(&floor, 3, &bresenham(1, 1, 8, 1), &mut los);
        assert_eq!(los.len(), 3);
        assert!(los.contains(&(1, 1)));
        assert!(los.contains(&(2, 1)));
        assert!(los.contains(&(3, 1)));
        assert!(!los.contains(&(4, 1)));
    }

    #[test]
    fn test_sweep_ray_stops_off_floor() {
        let floor = Floor {
            rooms: vec![Room::new("hall", 0, 0, 5, 5)],
        };
        let mut los = HashSet::new();
        sweep_ray(&floor, 20, &bresenham(2, 2, 9, 2), &mut los);
        assert!(los.contains(&(4, 2)));
        assert!(!los.contains(&(5, 2)));
        assert!(!los.contains(&(6, 2)));
    }

    #[test]
    fn test_sweep_ray_blocked_by_closed_door() {
        let floor = two_rooms(false);
        let mut los = HashSet::new();
        sweep_ray(&floor, 20, &bresenham(2, 1, 8, 1), &mut los);
        assert!(los.contains(&(4, 1)));
        assert!(!los.contains(&(5, 1)));
    }

    #[test]
    fn test_sweep_ray_passes_open_door() {
        let floor = two_rooms(true);
        let mut los = HashSet::new();
        sweep_ray(&floor, 20, &bresenham(2, 1, 8, 1), &mut los);
        assert!(los.contains(&(5, 1)));
        assert!(los.contains(&(8, 1)));
        // A parallel ray outside the door span stays blocked.
        let mut los = HashSet::new();
        sweep_ray(&floor, 20, &bresenham(2, 4, 8, 4), &mut los);
        assert!(!los.contains(&(5, 4)));
    }

    #[test]
    fn test_sweep_ray_furniture_blocks_beyond_itself() {
        let mut floor = Floor {
            rooms: vec![Room::new("hall", 0, 0, 10, 10)],
        };
        floor.rooms[0].furniture.push(Furniture {
            defname: "armoire".to_string(),
            x: 4,
            y: 1,
            dx: 1,
            dy: 1,
            blocks_los: true,
        });
        let mut los = HashSet::new();
        sweep_ray(&floor, 20, &bresenham(1, 1, 8, 1), &mut los);
        assert!(los.contains(&(3, 1)));
        // Neither the blocker nor anything past it is revealed.
        assert!(!los.contains(&(4, 1)));
        assert!(!los.contains(&(5, 1)));
    }

    #[test]
    fn test_sweep_ray_low_furniture_lets_sight_pass() {
        let mut floor = Floor {
            rooms: vec![Room::new("hall", 0, 0, 10, 10)],
        };
        floor.rooms[0].furniture.push(Furniture {
            defname: "table".to_string(),
            x: 4,
            y: 1,
            dx: 1,
            dy: 1,
            blocks_los: false,
        });
        let mut los = HashSet::new();
        sweep_ray(&floor, 20, &bresenham(1, 1, 8, 1), &mut los);
        assert!(los.contains(&(4, 1)));
        assert!(los.contains(&(8, 1)));
    }

    #[test]
    fn test_sweep_ray_diagonal_needs_connected_corners() {
        // Four 3x3 rooms in a 2x2 block, no doors anywhere: a diagonal
        // step across the shared corner must not see through.
        let floor = Floor {
            rooms: vec![
                Room::new("sw", 0, 0, 3, 3),
                Room::new("se", 3, 0, 3, 3),
                Room::new("nw", 0, 3, 3, 3),
                Room::new("ne", 3, 3, 3, 3),
            ],
        };
        let mut los = HashSet::new();
        sweep_ray(&floor, 20, &bresenham(2, 2, 4, 4), &mut los);
        assert!(los.contains(&(2, 2)));
        assert!(!los.contains(&(3, 3)));
        assert!(!los.contains(&(4, 4)));
    }
}
