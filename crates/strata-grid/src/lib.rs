//! Mutable tile grid: placement, removal, and overwrite rules.
#![forbid(unsafe_code)]

mod change;
mod grid;
pub mod reach;

pub use change::TileChange;
pub use grid::{TileGrid, TileGridStats};
pub use reach::within_reach;
