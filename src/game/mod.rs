//! Game domain — apples, the arena they move in, and the level table.
//!
//! Everything here is pure data and arithmetic on the session clock.
//! Nothing reads hardware or keeps wall-clock time of its own.

pub mod apple;
pub mod arena;
pub mod levels;

pub use apple::{Apple, Edge, SliceAction};
pub use arena::{Arena, Rect};
pub use levels::{Difficulty, LEVELS, Level, SpeedClass};

/// Capacity of the live apple list.  Comfortably above the largest
/// level target so a level can never run out of slots.
pub const MAX_APPLES: usize = 64;

/// The live apple list for one level.  Cleared only on level start.
pub type AppleList = heapless::Vec<Apple, MAX_APPLES>;
