//! Domain services - stateless logic that doesn't belong to the entity
//!
//! - `display`: task status to presentation facts
//! - `statistics`: per-user counts, completion rate and insights

pub mod display;
pub mod statistics;

pub use display::*;
pub use statistics::*;
