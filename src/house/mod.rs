//! House module
//!
//! Room/door/floor topology and the fog-of-war visibility field.

pub mod floor;
pub mod fog;
pub mod room;

pub use floor::{Floor, House};
pub use fog::{LosField, LOS_FIELD_SIZE, LOS_MIN_VISIBILITY, LOS_VISIBILITY_THRESHOLD};
pub use room::{CellData, Door, Furniture, Room, WallFacing};
