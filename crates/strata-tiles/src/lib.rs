//! Tile materials, the material atlas, and grid entries.
#![forbid(unsafe_code)]

pub mod material;
pub mod types;

pub use material::{MaterialCatalog, MaterialDef, MaterialError};
pub use types::{MaterialId, TileEntry};
