use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::types::MaterialId;

#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("failed to read material atlas: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse material atlas: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug)]
pub struct MaterialDef {
    pub id: MaterialId,
    pub key: String,
    /// Sprite names; only the count matters to generation.
    pub sprites: Vec<String>,
    pub is_background: bool,
    pub glyph: char,
    pub color: [u8; 3],
}

impl MaterialDef {
    #[inline]
    pub fn variant_count(&self) -> usize {
        self.sprites.len()
    }

    #[inline]
    pub fn has_collision(&self) -> bool {
        !self.is_background
    }
}

#[derive(Default, Clone, Debug)]
pub struct MaterialCatalog {
    pub materials: Vec<MaterialDef>,
    pub by_key: HashMap<String, MaterialId>,
}

impl MaterialCatalog {
    pub fn new() -> Self {
        Self {
            materials: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    pub fn get_id(&self, key: &str) -> Option<MaterialId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: MaterialId) -> Option<&MaterialDef> {
        self.materials.get(id.0 as usize)
    }

    pub fn by_key(&self, key: &str) -> Option<&MaterialDef> {
        self.get_id(key).and_then(|id| self.get(id))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaterialDef> {
        self.materials.iter()
    }

    /// Appends a material, replacing the definition if the key already exists.
    pub fn insert(
        &mut self,
        key: &str,
        sprites: Vec<String>,
        is_background: bool,
        glyph: Option<char>,
        color: Option<[u8; 3]>,
    ) -> MaterialId {
        let glyph = glyph.unwrap_or_else(|| default_glyph(key));
        let color = color.unwrap_or(DEFAULT_COLOR);
        if let Some(id) = self.get_id(key) {
            let def = &mut self.materials[id.0 as usize];
            def.sprites = sprites;
            def.is_background = is_background;
            def.glyph = glyph;
            def.color = color;
            return id;
        }
        let id = MaterialId(self.materials.len() as u16);
        self.by_key.insert(key.to_string(), id);
        self.materials.push(MaterialDef {
            id,
            key: key.to_string(),
            sprites,
            is_background,
            glyph,
            color,
        });
        id
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, MaterialError> {
        let cfg: MaterialsConfig = toml::from_str(toml_str)?;
        let mut catalog = MaterialCatalog::new();
        let mut entries: Vec<(String, MaterialEntry)> = cfg.materials.into_iter().collect();
        // HashMap iteration order is nondeterministic; sort keys so MaterialId assignment is stable.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, entry) in entries {
            match entry {
                MaterialEntry::Sprites(sprites) => {
                    catalog.insert(&key, sprites, false, None, None);
                }
                MaterialEntry::Detail {
                    sprites,
                    background,
                    glyph,
                    color,
                } => {
                    catalog.insert(&key, sprites, background, glyph, color);
                }
            }
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MaterialError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// The canonical atlas: terrain layers, vegetation, and the four ores.
    pub fn builtin() -> Self {
        let mut catalog = MaterialCatalog::new();
        for (key, count, background, glyph, color) in BUILTIN {
            let sprites = (0..*count).map(|i| format!("tiles/{key}_{i}")).collect();
            catalog.insert(key, sprites, *background, Some(*glyph), Some(*color));
        }
        catalog
    }
}

const DEFAULT_COLOR: [u8; 3] = [128, 128, 128];

const BUILTIN: &[(&str, usize, bool, char, [u8; 3])] = &[
    ("grass", 3, false, '"', [86, 160, 62]),
    ("dirt", 2, false, ':', [121, 85, 58]),
    ("stone", 3, false, '#', [112, 112, 116]),
    ("log", 1, false, '|', [102, 74, 44]),
    ("leaf", 2, true, '*', [58, 122, 48]),
    ("tall_grass", 2, true, ',', [120, 184, 80]),
    ("sand", 2, false, '.', [219, 204, 150]),
    ("snow", 1, false, '~', [236, 240, 245]),
    ("coal", 1, false, 'c', [40, 40, 44]),
    ("iron", 1, false, 'i', [184, 150, 128]),
    ("gold", 1, false, 'g', [232, 196, 64]),
    ("diamond", 1, false, 'd', [96, 220, 230]),
];

fn default_glyph(key: &str) -> char {
    key.chars().next().unwrap_or('?')
}

// --- Config ---

#[derive(Deserialize)]
pub struct MaterialsConfig {
    pub materials: HashMap<String, MaterialEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum MaterialEntry {
    // Simple: stone = ["tiles/stone_0", "tiles/stone_1"]
    Sprites(Vec<String>),
    // Detailed: leaf = { sprites = ["..."], background = true, glyph = "*" }
    Detail {
        sprites: Vec<String>,
        #[serde(default)]
        background: bool,
        #[serde(default)]
        glyph: Option<char>,
        #[serde(default)]
        color: Option<[u8; 3]>,
    },
}
