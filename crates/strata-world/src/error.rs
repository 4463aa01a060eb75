use thiserror::Error;

/// Configuration rejected before generation starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("world size must be in 1..={max}, got {0}", max = crate::worldgen::MAX_WORLD_SIZE)]
    WorldSize(i32),

    #[error("chunk size must be positive, got {0}")]
    ChunkSize(i32),

    #[error("no biomes configured")]
    NoBiomes,

    #[error("material '{0}' has an empty sprite pool")]
    EmptyVariantPool(String),

    #[error("biome '{biome}' references unknown material '{key}'")]
    UnknownMaterial { biome: String, key: String },

    #[error("biome '{biome}' selector {value} is outside [0, 1]")]
    SelectorOutOfRange { biome: String, value: f32 },

    #[error("biome '{biome}' selector must be greater than the previous biome's")]
    SelectorsNotAscending { biome: String },

    #[error("{what} threshold {value} is outside [0, 1]")]
    ThresholdOutOfRange { what: String, value: f32 },

    #[error("{what} frequency must be positive, got {value}")]
    Frequency { what: String, value: f32 },

    #[error("biome '{biome}' dirt layer height {value} is negative")]
    DirtLayer { biome: String, value: i32 },

    #[error("biome '{biome}' {what} chance {value} is negative")]
    Chance {
        biome: String,
        what: &'static str,
        value: i32,
    },

    #[error("biome '{biome}' tree height range [{min}, {max}) is invalid")]
    TreeHeight { biome: String, min: i32, max: i32 },

    #[error("{what} must be finite, got {value}")]
    NonFinite { what: String, value: f32 },

    #[error("biome '{biome}' column heights span [{min}, {max}], beyond the supported range")]
    HeightOutOfRange { biome: String, min: f32, max: f32 },
}

/// Failure to read or parse a configuration file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Material(#[from] strata_tiles::MaterialError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
