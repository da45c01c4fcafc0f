//! Game module
//!
//! Session state, the line-of-sight engine, and the movement adjacency
//! graph.

pub mod adjacency;
pub mod los;
pub mod state;

pub use adjacency::MoveGraph;
pub use los::bresenham;
pub use state::Game;
