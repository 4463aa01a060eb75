use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use strata_world::GeneratedWorld;

const SKY: [u8; 3] = [150, 196, 235];
const BIOME_STRIP: usize = 4;

/// Grid rows top-down, one glyph per cell. Empty cells are spaces and
/// background tiles keep their glyph.
pub fn render_ascii(world: &GeneratedWorld) -> String {
    let size = world.grid.size();
    let catalog = world.grid.catalog();
    let mut out = String::with_capacity(((size + 2) * (size + 1)) as usize);
    for y in (0..=size).rev() {
        let row: String = (0..=size)
            .map(|x| {
                world
                    .grid
                    .query(x, y)
                    .and_then(|e| catalog.get(e.material))
                    .map_or(' ', |def| def.glyph)
            })
            .collect();
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}

/// Binary PPM (P6) of the grid with a strip of biome colours along the bottom.
pub fn write_ppm(world: &GeneratedWorld, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut w = BufWriter::new(file);
    let bytes = ppm_bytes(world);
    w.write_all(&bytes)?;
    w.flush()?;
    log::info!("wrote preview to {}", path.display());
    Ok(())
}

fn ppm_bytes(world: &GeneratedWorld) -> Vec<u8> {
    let side = (world.grid.size() + 1) as usize;
    let height = side + BIOME_STRIP;
    let catalog = world.grid.catalog();
    let mut out = format!("P6\n{side} {height}\n255\n").into_bytes();
    out.reserve(side * height * 3);
    for y in (0..side as i32).rev() {
        for x in 0..side as i32 {
            let rgb = world
                .grid
                .query(x, y)
                .and_then(|e| catalog.get(e.material))
                .map_or(SKY, |def| def.color);
            out.extend_from_slice(&rgb);
        }
    }
    for _ in 0..BIOME_STRIP {
        for x in 0..side as i32 {
            let rgb = world.column_biome(x).map_or(SKY, |b| b.color);
            out.extend_from_slice(&rgb);
        }
    }
    out
}
