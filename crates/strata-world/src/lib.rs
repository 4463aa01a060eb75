//! World sizing, noise sampling, and terrain generation.
#![forbid(unsafe_code)]

pub mod biome;
pub mod error;
mod gen_ctx;
pub mod generation;
pub mod height;
pub mod mask;
pub mod noise;
mod world;
pub mod worldgen;

pub use biome::{BiomeId, BiomeMap, resolve_bucket};
pub use error::{ConfigError, LoadError};
pub use gen_ctx::{GenCtx, GenStats};
pub use generation::{GeneratedWorld, Vegetation, generate};
pub use height::{HeightProfile, SpawnPoint};
pub use mask::MaskField;
pub use noise::NoiseField;
pub use world::World;
pub use worldgen::{BiomeParams, OreParams, TilePalette, WorldGenConfig, WorldGenParams};
