mod assets;
mod edit;
mod preview;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use strata_chunk::ChunkIndex;
use strata_world::{GeneratedWorld, World};

use crate::edit::{Cell, EditOp, EditOutcome, PlaceSpec, apply_edit};

#[derive(Parser, Debug)]
#[command(author, version, about = "Strata 2D tile world generator", long_about = None)]
struct Cli {
    /// Directory containing assets/materials.toml and assets/worldgen.toml
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    /// Override the configured world seed
    #[arg(long, global = true)]
    seed: Option<i32>,

    /// Debug logging (RUST_LOG still wins when set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a world and report stats and spawn
    Generate {
        /// Print the grid as text, top row first
        #[arg(long)]
        ascii: bool,
        /// Write a colour preview image (binary PPM)
        #[arg(long)]
        ppm: Option<PathBuf>,
    },
    /// List chunks active around a viewer
    Chunks {
        #[arg(long, default_value_t = 0.0)]
        viewer_x: f32,
        #[arg(long, default_value_t = 32.0)]
        radius: f32,
    },
    /// Apply edits to a freshly generated world
    Edit(EditArgs),
}

#[derive(Args, Debug)]
struct EditArgs {
    /// Place a tile: material@x,y (repeatable)
    #[arg(long = "place")]
    place: Vec<PlaceSpec>,
    /// Remove the tile at x,y (repeatable)
    #[arg(long = "remove")]
    remove: Vec<Cell>,
    /// Actor position; defaults to the spawn point
    #[arg(long, value_names = ["X", "Y"], num_args = 2, allow_negative_numbers = true)]
    actor: Option<Vec<f32>>,
    /// Reach radius in cells
    #[arg(long, default_value_t = 5.0)]
    reach: f32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let root = assets::resolve_assets_root(cli.assets.clone());
    let catalog = Arc::new(assets::load_catalog(&root)?);
    let mut cfg = assets::load_worldgen(&root)?;
    if let Some(seed) = cli.seed {
        cfg.world.seed = seed;
    }
    let world = World::from_config(&cfg, catalog).context("invalid world configuration")?;

    match cli.command {
        Command::Generate { ascii, ppm } => run_generate(&world, ascii, ppm),
        Command::Chunks { viewer_x, radius } => run_chunks(&world, viewer_x, radius),
        Command::Edit(args) => run_edit(&world, args),
    }
}

fn summarize(generated: &GeneratedWorld) {
    let grid = generated.grid.stats();
    println!(
        "seed {} | {}x{} | {} tiles ({} foreground, {} background)",
        generated.params.seed,
        generated.params.world_size,
        generated.params.world_size,
        grid.tiles,
        grid.foreground,
        grid.background
    );
    println!("{}", generated.stats);
    println!("spawn at x={} y={:.2}", generated.spawn.x, generated.spawn.y);
}

fn run_generate(world: &World, ascii: bool, ppm: Option<PathBuf>) -> Result<()> {
    let generated = world.generate();
    summarize(&generated);
    if ascii {
        print!("{}", preview::render_ascii(&generated));
    }
    if let Some(path) = ppm {
        preview::write_ppm(&generated, &path)?;
    }
    Ok(())
}

fn run_chunks(world: &World, viewer_x: f32, radius: f32) -> Result<()> {
    let generated = world.generate();
    let index = ChunkIndex::new(generated.params.world_size, generated.params.chunk_size)?;
    let active = index.active_set(viewer_x, radius);
    let groups = index.group_tiles(&generated.grid);
    println!(
        "{} chunks of {} columns; {} active around x={viewer_x} (radius {radius})",
        index.len(),
        index.chunk_size(),
        active.len()
    );
    for chunk in index.chunks() {
        let mark = if active.contains(&chunk.id) { '*' } else { ' ' };
        println!(
            "{mark} chunk {:>3} cols {:>4}..{:<4} center {:>6.1} tiles {}",
            chunk.id.0,
            chunk.columns.start,
            chunk.columns.end,
            chunk.center,
            groups[chunk.id.0 as usize].len()
        );
    }
    Ok(())
}

fn run_edit(world: &World, args: EditArgs) -> Result<()> {
    let mut generated = world.generate();
    let actor = match args.actor.as_deref() {
        Some([x, y]) => (*x, *y),
        _ => (generated.spawn.x as f32, generated.spawn.y),
    };
    let ops = args
        .place
        .into_iter()
        .map(|p| EditOp::Place {
            material: p.material,
            x: p.cell.0,
            y: p.cell.1,
        })
        .chain(args.remove.into_iter().map(|Cell(x, y)| EditOp::Remove { x, y }));

    let (mut applied, mut failed) = (0usize, 0usize);
    for op in ops {
        match apply_edit(&mut generated.grid, actor, args.reach, &op) {
            EditOutcome::Applied(changes) => {
                applied += 1;
                println!("ok       {op} ({} changes)", changes.len());
            }
            other => {
                failed += 1;
                println!("rejected {op}: {other:?}");
            }
        }
    }
    println!(
        "actor ({:.1}, {:.1}) reach {}: {applied} applied, {failed} rejected",
        actor.0, actor.1, args.reach
    );
    Ok(())
}
