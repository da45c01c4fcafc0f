//! ECS Components
//!
//! Components carried by board entities: where they stand, which side they
//! play for, how far they see, and what they currently see.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Position on the floor, in absolute cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance (diagonal steps count as one)
    pub fn chebyshev_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// Which side an entity plays for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Explorers,
    Haunt,
}

impl Side {
    /// The side that moves after this one
    pub fn opponent(self) -> Side {
        match self {
            Side::Explorers => Side::Haunt,
            Side::Haunt => Side::Explorers,
        }
    }
}

/// Sight radius in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sight(pub i32);

/// Name component for entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// An entity's cached line of sight.
///
/// Holds the position the cache was computed at and the set of absolute
/// cells visible from there. The cache is only rebuilt when the entity
/// moves or a recompute is forced.
#[derive(Debug, Clone)]
pub struct SightMemory {
    /// Position the cached set was computed at; out-of-board sentinel
    /// until the first computation so a fresh entity always recomputes.
    pub losx: i32,
    pub losy: i32,
    /// Visible cells, absolute floor coordinates
    pub los: HashSet<(i32, i32)>,
}

impl SightMemory {
    pub fn new() -> Self {
        Self {
            losx: i32::MIN,
            losy: i32::MIN,
            los: HashSet::new(),
        }
    }

    /// Can the entity currently see this cell?
    pub fn sees(&self, x: i32, y: i32) -> bool {
        self.los.contains(&(x, y))
    }
}
