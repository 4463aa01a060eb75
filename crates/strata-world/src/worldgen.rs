use std::fs;
use std::path::Path;

use serde::Deserialize;
use strata_tiles::{MaterialCatalog, MaterialId};

use crate::biome::BiomeId;
use crate::error::{ConfigError, LoadError};

#[derive(Clone, Debug, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub noise: NoiseSection,
    #[serde(default = "default_biomes")]
    pub biomes: Vec<BiomeDef>,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            world: WorldSection::default(),
            noise: NoiseSection::default(),
            biomes: default_biomes(),
        }
    }
}

impl WorldGenConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(s)?)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct WorldSection {
    #[serde(default)]
    pub seed: i32,
    #[serde(default = "default_size")]
    pub size: i32,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: i32,
    #[serde(default = "default_height_addition")]
    pub height_addition: f32,
    #[serde(default = "default_generate_caves")]
    pub generate_caves: bool,
}
fn default_size() -> i32 {
    100
}
fn default_chunk_size() -> i32 {
    16
}
fn default_height_addition() -> f32 {
    25.0
}
fn default_generate_caves() -> bool {
    true
}
impl Default for WorldSection {
    fn default() -> Self {
        Self {
            seed: 0,
            size: default_size(),
            chunk_size: default_chunk_size(),
            height_addition: default_height_addition(),
            generate_caves: default_generate_caves(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NoiseSection {
    #[serde(default = "default_terrain_freq")]
    pub terrain_freq: f32,
    #[serde(default = "default_cave_freq")]
    pub cave_freq: f32,
    #[serde(default = "default_biome_freq")]
    pub biome_freq: f32,
}
fn default_terrain_freq() -> f32 {
    0.05
}
fn default_cave_freq() -> f32 {
    0.05
}
fn default_biome_freq() -> f32 {
    0.03
}
impl Default for NoiseSection {
    fn default() -> Self {
        Self {
            terrain_freq: default_terrain_freq(),
            cave_freq: default_cave_freq(),
            biome_freq: default_biome_freq(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct BiomeDef {
    pub name: String,
    /// Upper edge of this biome's bucket on the [0, 1] selection gradient.
    pub selector: f32,
    #[serde(default)]
    pub terrain_freq: Option<f32>,
    #[serde(default = "default_height_multiplier")]
    pub height_multiplier: f32,
    #[serde(default = "default_surface_value")]
    pub surface_value: f32,
    #[serde(default = "default_dirt_layer")]
    pub dirt_layer_height: i32,
    #[serde(default = "default_tree_chance")]
    pub tree_chance: i32,
    #[serde(default = "default_min_tree")]
    pub min_tree_height: i32,
    #[serde(default = "default_max_tree")]
    pub max_tree_height: i32,
    #[serde(default = "default_tall_grass_chance")]
    pub tall_grass_chance: i32,
    #[serde(default)]
    pub generate_caves: Option<bool>,
    #[serde(default)]
    pub color: Option<[u8; 3]>,
    #[serde(default)]
    pub palette: PaletteDef,
    #[serde(default = "default_ores")]
    pub ores: Vec<OreDef>,
}
fn default_height_multiplier() -> f32 {
    4.0
}
fn default_surface_value() -> f32 {
    0.25
}
fn default_dirt_layer() -> i32 {
    5
}
fn default_tree_chance() -> i32 {
    10
}
fn default_min_tree() -> i32 {
    4
}
fn default_max_tree() -> i32 {
    6
}
fn default_tall_grass_chance() -> i32 {
    10
}
impl Default for BiomeDef {
    fn default() -> Self {
        Self {
            name: "plains".into(),
            selector: 1.0,
            terrain_freq: None,
            height_multiplier: default_height_multiplier(),
            surface_value: default_surface_value(),
            dirt_layer_height: default_dirt_layer(),
            tree_chance: default_tree_chance(),
            min_tree_height: default_min_tree(),
            max_tree_height: default_max_tree(),
            tall_grass_chance: default_tall_grass_chance(),
            generate_caves: None,
            color: None,
            palette: PaletteDef::default(),
            ores: default_ores(),
        }
    }
}

/// Material keys a biome uses for each layer.
#[derive(Clone, Debug, Deserialize)]
pub struct PaletteDef {
    #[serde(default = "p_grass")]
    pub grass: String,
    #[serde(default = "p_dirt")]
    pub dirt: String,
    #[serde(default = "p_stone")]
    pub stone: String,
    #[serde(default = "p_log")]
    pub log: String,
    #[serde(default = "p_leaf")]
    pub leaf: String,
    #[serde(default = "p_tall_grass")]
    pub tall_grass: Option<String>,
}
fn p_grass() -> String {
    "grass".into()
}
fn p_dirt() -> String {
    "dirt".into()
}
fn p_stone() -> String {
    "stone".into()
}
fn p_log() -> String {
    "log".into()
}
fn p_leaf() -> String {
    "leaf".into()
}
fn p_tall_grass() -> Option<String> {
    Some("tall_grass".into())
}
impl Default for PaletteDef {
    fn default() -> Self {
        Self {
            grass: p_grass(),
            dirt: p_dirt(),
            stone: p_stone(),
            log: p_log(),
            leaf: p_leaf(),
            tall_grass: p_tall_grass(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct OreDef {
    pub material: String,
    pub frequency: f32,
    pub size: f32,
    /// Minimum depth below the surface before the ore may appear.
    #[serde(default)]
    pub max_spawn_height: i32,
}

fn ore(material: &str, frequency: f32, size: f32, max_spawn_height: i32) -> OreDef {
    OreDef {
        material: material.into(),
        frequency,
        size,
        max_spawn_height,
    }
}

fn default_ores() -> Vec<OreDef> {
    vec![
        ore("coal", 0.2, 0.68, 4),
        ore("iron", 0.18, 0.72, 8),
        ore("gold", 0.15, 0.76, 12),
        ore("diamond", 0.12, 0.8, 18),
    ]
}

fn default_biomes() -> Vec<BiomeDef> {
    vec![
        BiomeDef {
            name: "grassland".into(),
            selector: 0.35,
            height_multiplier: 6.0,
            tree_chance: 14,
            tall_grass_chance: 3,
            color: Some([120, 200, 80]),
            ..BiomeDef::default()
        },
        BiomeDef {
            name: "forest".into(),
            selector: 0.6,
            height_multiplier: 8.0,
            tree_chance: 4,
            tall_grass_chance: 6,
            color: Some([40, 130, 50]),
            ..BiomeDef::default()
        },
        BiomeDef {
            name: "desert".into(),
            selector: 0.8,
            height_multiplier: 4.0,
            dirt_layer_height: 7,
            tree_chance: 0,
            tall_grass_chance: 0,
            color: Some([230, 210, 140]),
            palette: PaletteDef {
                grass: "sand".into(),
                dirt: "sand".into(),
                tall_grass: None,
                ..PaletteDef::default()
            },
            ..BiomeDef::default()
        },
        BiomeDef {
            name: "tundra".into(),
            selector: 1.0,
            height_multiplier: 14.0,
            tree_chance: 20,
            tall_grass_chance: 0,
            color: Some([220, 230, 240]),
            palette: PaletteDef {
                grass: "snow".into(),
                tall_grass: None,
                ..PaletteDef::default()
            },
            ..BiomeDef::default()
        },
    ]
}

/// Largest accepted `world_size`; masks hold `size * size` cells per biome.
pub const MAX_WORLD_SIZE: i32 = 4096;

/// Bound on `|height|` for any column, keeping surface rows inside `i32`.
pub const MAX_COLUMN_HEIGHT: f32 = 1.0e9;

// Validated, id-resolved snapshot of the config used during generation.
#[derive(Clone, Debug)]
pub struct WorldGenParams {
    pub seed: i32,
    pub world_size: i32,
    pub chunk_size: i32,
    pub height_addition: f32,
    pub generate_caves: bool,
    pub terrain_freq: f32,
    pub cave_freq: f32,
    pub biome_freq: f32,
    pub biomes: Vec<BiomeParams>,
}

#[derive(Clone, Debug)]
pub struct BiomeParams {
    pub id: BiomeId,
    pub name: String,
    pub selector: f32,
    pub terrain_freq: f32,
    pub height_multiplier: f32,
    pub surface_value: f32,
    pub dirt_layer_height: i32,
    /// 0 disables trees.
    pub tree_chance: u32,
    pub min_tree_height: i32,
    pub max_tree_height: i32,
    /// 0 disables tall grass.
    pub tall_grass_chance: u32,
    pub generate_caves: bool,
    pub color: [u8; 3],
    pub palette: TilePalette,
    pub ores: Vec<OreParams>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TilePalette {
    pub grass: MaterialId,
    pub dirt: MaterialId,
    pub stone: MaterialId,
    pub log: MaterialId,
    pub leaf: MaterialId,
    pub tall_grass: Option<MaterialId>,
}

#[derive(Clone, Debug)]
pub struct OreParams {
    pub material: MaterialId,
    pub name: String,
    pub frequency: f32,
    pub size: f32,
    pub max_spawn_height: i32,
}

impl WorldGenParams {
    /// Resolves material keys against `catalog`, then validates the result.
    pub fn from_config(cfg: &WorldGenConfig, catalog: &MaterialCatalog) -> Result<Self, ConfigError> {
        if let Some(def) = catalog.iter().find(|m| m.variant_count() == 0) {
            return Err(ConfigError::EmptyVariantPool(def.key.clone()));
        }
        let biomes = cfg
            .biomes
            .iter()
            .enumerate()
            .map(|(i, def)| biome_params(BiomeId(i as u16), def, cfg, catalog))
            .collect::<Result<Vec<_>, _>>()?;

        let params = Self {
            seed: cfg.world.seed,
            world_size: cfg.world.size,
            chunk_size: cfg.world.chunk_size,
            height_addition: cfg.world.height_addition,
            generate_caves: cfg.world.generate_caves,
            terrain_freq: cfg.noise.terrain_freq,
            cave_freq: cfg.noise.cave_freq,
            biome_freq: cfg.noise.biome_freq,
            biomes,
        };
        params.validate()?;
        Ok(params)
    }

    /// Structural checks on sizes, frequencies, selectors and thresholds.
    /// Params built by hand should pass through here before generation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_WORLD_SIZE).contains(&self.world_size) {
            return Err(ConfigError::WorldSize(self.world_size));
        }
        if self.chunk_size <= 0 {
            return Err(ConfigError::ChunkSize(self.chunk_size));
        }
        check_frequency("terrain", self.terrain_freq)?;
        check_frequency("cave", self.cave_freq)?;
        check_frequency("biome", self.biome_freq)?;
        check_finite("height addition", self.height_addition)?;
        if self.biomes.is_empty() {
            return Err(ConfigError::NoBiomes);
        }

        let mut prev_selector: Option<f32> = None;
        for b in &self.biomes {
            let name = &b.name;
            if !(0.0..=1.0).contains(&b.selector) {
                return Err(ConfigError::SelectorOutOfRange {
                    biome: name.clone(),
                    value: b.selector,
                });
            }
            if prev_selector.is_some_and(|p| b.selector <= p) {
                return Err(ConfigError::SelectorsNotAscending { biome: name.clone() });
            }
            prev_selector = Some(b.selector);

            check_frequency(&format!("biome '{name}' terrain"), b.terrain_freq)?;
            check_finite(&format!("biome '{name}' height multiplier"), b.height_multiplier)?;
            // noise is in [0, 1], so the multiplier stretches the base height one way
            let lo = self.height_addition + b.height_multiplier.min(0.0);
            let hi = self.height_addition + b.height_multiplier.max(0.0);
            if lo < -MAX_COLUMN_HEIGHT || hi > MAX_COLUMN_HEIGHT {
                return Err(ConfigError::HeightOutOfRange {
                    biome: name.clone(),
                    min: lo,
                    max: hi,
                });
            }
            check_threshold(&format!("biome '{name}' cave"), b.surface_value)?;
            if b.dirt_layer_height < 0 {
                return Err(ConfigError::DirtLayer {
                    biome: name.clone(),
                    value: b.dirt_layer_height,
                });
            }
            if b.min_tree_height < 0
                || b.min_tree_height > b.max_tree_height
                || b.max_tree_height > self.world_size
            {
                return Err(ConfigError::TreeHeight {
                    biome: name.clone(),
                    min: b.min_tree_height,
                    max: b.max_tree_height,
                });
            }
            for o in &b.ores {
                check_frequency(&format!("ore '{}'", o.name), o.frequency)?;
                check_threshold(&format!("ore '{}' size", o.name), o.size)?;
            }
        }
        Ok(())
    }

    #[inline]
    pub fn biome(&self, id: BiomeId) -> &BiomeParams {
        &self.biomes[id.0 as usize]
    }

    pub fn biome_by_name(&self, name: &str) -> Option<&BiomeParams> {
        self.biomes.iter().find(|b| b.name == name)
    }

    pub fn selectors(&self) -> Vec<f32> {
        self.biomes.iter().map(|b| b.selector).collect()
    }
}

fn biome_params(
    id: BiomeId,
    def: &BiomeDef,
    cfg: &WorldGenConfig,
    catalog: &MaterialCatalog,
) -> Result<BiomeParams, ConfigError> {
    let name = &def.name;
    let tree_chance = check_chance(name, "tree", def.tree_chance)?;
    let tall_grass_chance = check_chance(name, "tall grass", def.tall_grass_chance)?;

    let lookup = |key: &str| {
        catalog
            .get_id(key)
            .ok_or_else(|| ConfigError::UnknownMaterial {
                biome: name.clone(),
                key: key.to_string(),
            })
    };
    let palette = TilePalette {
        grass: lookup(&def.palette.grass)?,
        dirt: lookup(&def.palette.dirt)?,
        stone: lookup(&def.palette.stone)?,
        log: lookup(&def.palette.log)?,
        leaf: lookup(&def.palette.leaf)?,
        // an empty key in TOML means "no tall grass"
        tall_grass: def
            .palette
            .tall_grass
            .as_deref()
            .filter(|k| !k.is_empty())
            .map(lookup)
            .transpose()?,
    };

    let ores = def
        .ores
        .iter()
        .map(|o| {
            Ok(OreParams {
                material: lookup(&o.material)?,
                name: o.material.clone(),
                frequency: o.frequency,
                size: o.size,
                max_spawn_height: o.max_spawn_height,
            })
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;

    Ok(BiomeParams {
        id,
        name: name.clone(),
        selector: def.selector,
        terrain_freq: def.terrain_freq.unwrap_or(cfg.noise.terrain_freq),
        height_multiplier: def.height_multiplier,
        surface_value: def.surface_value,
        dirt_layer_height: def.dirt_layer_height,
        tree_chance,
        min_tree_height: def.min_tree_height,
        max_tree_height: def.max_tree_height,
        tall_grass_chance,
        generate_caves: def.generate_caves.unwrap_or(cfg.world.generate_caves),
        color: def.color.unwrap_or([128, 128, 128]),
        palette,
        ores,
    })
}

fn check_finite(what: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite {
            what: what.to_string(),
            value,
        })
    }
}

fn check_frequency(what: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Frequency {
            what: what.to_string(),
            value,
        })
    }
}

fn check_threshold(what: &str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOutOfRange {
            what: what.to_string(),
            value,
        })
    }
}

fn check_chance(biome: &str, what: &'static str, value: i32) -> Result<u32, ConfigError> {
    u32::try_from(value).map_err(|_| ConfigError::Chance {
        biome: biome.to_string(),
        what,
        value,
    })
}

pub fn load_config_from_path(path: &Path) -> Result<WorldGenConfig, LoadError> {
    let s = fs::read_to_string(path)?;
    WorldGenConfig::from_toml_str(&s)
}

pub fn load_params_from_path(
    path: &Path,
    catalog: &MaterialCatalog,
) -> Result<WorldGenParams, LoadError> {
    let cfg = load_config_from_path(path)?;
    Ok(WorldGenParams::from_config(&cfg, catalog)?)
}
