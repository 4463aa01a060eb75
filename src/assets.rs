use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use strata_tiles::MaterialCatalog;
use strata_world::WorldGenConfig;
use strata_world::worldgen::load_config_from_path;

pub fn resolve_assets_root(cli: Option<PathBuf>) -> PathBuf {
    // Precedence: CLI flag -> STRATA_ASSETS env -> search nearby dirs -> CWD
    if let Some(p) = cli {
        if p.exists() {
            return p;
        }
        log::warn!("assets dir {} does not exist; searching defaults", p.display());
    }
    if let Ok(p) = std::env::var("STRATA_ASSETS") {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return pb;
        }
    }
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd);
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            candidates.push(dir.to_path_buf());
        }
    }
    candidates.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")));

    for base in candidates {
        let mut cur = base;
        for _ in 0..5 {
            if materials_path(&cur).exists() {
                return cur;
            }
            match cur.parent() {
                Some(parent) => cur = parent.to_path_buf(),
                None => break,
            }
        }
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

pub fn materials_path(root: &Path) -> PathBuf {
    root.join("assets/materials.toml")
}

pub fn worldgen_path(root: &Path) -> PathBuf {
    root.join("assets/worldgen.toml")
}

/// Atlas from `assets/materials.toml`, or the built-in one when the file is absent.
pub fn load_catalog(root: &Path) -> Result<MaterialCatalog> {
    let path = materials_path(root);
    if !path.exists() {
        log::info!("{} not found; using built-in materials", path.display());
        return Ok(MaterialCatalog::builtin());
    }
    let catalog = MaterialCatalog::from_path(&path)
        .with_context(|| format!("loading materials from {}", path.display()))?;
    log::info!("loaded {} materials from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// World config from `assets/worldgen.toml`, or the defaults when absent.
pub fn load_worldgen(root: &Path) -> Result<WorldGenConfig> {
    let path = worldgen_path(root);
    if !path.exists() {
        log::info!("{} not found; using default worldgen config", path.display());
        return Ok(WorldGenConfig::default());
    }
    load_config_from_path(&path).with_context(|| format!("loading worldgen from {}", path.display()))
}
