use std::sync::Arc;

use proptest::prelude::*;
use strata_tiles::MaterialCatalog;
use strata_world::height::surface_row;
use strata_world::worldgen::{BiomeDef, OreDef};
use strata_world::{ConfigError, MaskField, NoiseField, World, WorldGenConfig, generate};

fn catalog() -> Arc<MaterialCatalog> {
    Arc::new(MaterialCatalog::builtin())
}

/// One flat biome, five rows of terrain, nothing else switched on.
fn flat(size: i32) -> WorldGenConfig {
    let mut cfg = WorldGenConfig::default();
    cfg.world.seed = 42;
    cfg.world.size = size;
    cfg.world.chunk_size = 5;
    cfg.world.height_addition = 5.0;
    cfg.world.generate_caves = false;
    cfg.noise.terrain_freq = 0.1;
    cfg.biomes = vec![BiomeDef {
        name: "flat".into(),
        selector: 1.0,
        height_multiplier: 0.0,
        dirt_layer_height: 2,
        tree_chance: 0,
        tall_grass_chance: 0,
        ores: Vec::new(),
        ..BiomeDef::default()
    }];
    cfg
}

fn ore(material: &str, frequency: f32, size: f32) -> OreDef {
    OreDef {
        material: material.into(),
        frequency,
        size,
        max_spawn_height: 0,
    }
}

#[test]
fn identical_ore_masks_resolve_to_the_later_ore() {
    let mut cfg = flat(24);
    cfg.world.height_addition = 12.0;
    cfg.biomes[0].ores = vec![ore("coal", 0.2, 0.3), ore("diamond", 0.2, 0.3)];
    let world = generate(&cfg, catalog()).unwrap();
    let cat = world.grid.catalog();
    let coal = cat.get_id("coal").unwrap();
    let diamond = cat.get_id("diamond").unwrap();
    assert!(world.grid.iter().all(|(_, _, e)| e.material != coal));
    assert!(world.grid.iter().any(|(_, _, e)| e.material == diamond));
    assert!(world.stats.ore_tiles > 0);
}

#[test]
fn ores_stay_below_their_spawn_depth() {
    let mut cfg = flat(24);
    cfg.world.height_addition = 12.0;
    cfg.biomes[0].dirt_layer_height = 1;
    cfg.biomes[0].ores = vec![OreDef {
        max_spawn_height: 6,
        ..ore("iron", 0.2, 0.2)
    }];
    let world = generate(&cfg, catalog()).unwrap();
    let iron = world.grid.catalog().get_id("iron").unwrap();
    for (_, y, e) in world.grid.iter() {
        if e.material == iron {
            assert!(12.0 - y as f32 > 6.0, "iron at row {y}");
        }
    }
}

#[test]
fn saturated_cave_threshold_carves_everything() {
    let mut cfg = flat(16);
    cfg.world.generate_caves = true;
    cfg.biomes[0].surface_value = 1.0;
    cfg.biomes[0].tree_chance = 1;
    let world = generate(&cfg, catalog()).unwrap();
    assert!(world.grid.is_empty());
    assert_eq!(world.stats.carved_cells, 16 * 5);
    assert_eq!(world.stats.bare_columns, 16);
    assert_eq!(world.stats.trees, 0);
}

#[test]
fn caves_follow_the_cave_mask() {
    let mut cfg = flat(16);
    cfg.world.generate_caves = true;
    cfg.biomes[0].surface_value = 0.5;
    let world = generate(&cfg, catalog()).unwrap();
    let mask = MaskField::build(&NoiseField::new(42), cfg.noise.cave_freq, 0.5, 16, 16);
    for x in 0..16 {
        for y in 0..5 {
            assert_eq!(world.grid.contains(x, y), mask.get(x, y), "cell ({x}, {y})");
        }
    }
}

#[test]
fn per_biome_cave_override_wins() {
    let mut cfg = flat(16);
    cfg.world.generate_caves = true;
    cfg.biomes[0].surface_value = 1.0;
    cfg.biomes[0].generate_caves = Some(false);
    let world = generate(&cfg, catalog()).unwrap();
    assert_eq!(world.grid.len(), 16 * 5);
}

#[test]
fn every_column_grows_a_tree() {
    let mut cfg = flat(20);
    cfg.biomes[0].tree_chance = 1;
    cfg.biomes[0].min_tree_height = 4;
    cfg.biomes[0].max_tree_height = 5;
    let world = generate(&cfg, catalog()).unwrap();
    let cat = world.grid.catalog();
    let log = cat.get_id("log").unwrap();
    let leaf = cat.get_id("leaf").unwrap();
    for x in 0..20 {
        for y in 5..=8 {
            let e = world.grid.query(x, y).unwrap();
            assert_eq!(e.material, log, "log at ({x}, {y})");
            assert!(!e.is_background);
        }
        for y in 9..=11 {
            let e = world.grid.query(x, y).unwrap();
            assert_eq!(e.material, leaf, "leaf at ({x}, {y})");
            assert!(e.is_background);
        }
        assert!(world.grid.query(x, 12).is_none());
    }
    assert_eq!(world.stats.trees, 20);
    assert_eq!(world.stats.tall_grass, 0);
}

#[test]
fn tall_grass_sits_on_the_surface() {
    let mut cfg = flat(12);
    cfg.biomes[0].tall_grass_chance = 1;
    let world = generate(&cfg, catalog()).unwrap();
    let tall = world.grid.catalog().get_id("tall_grass").unwrap();
    for x in 0..12 {
        let e = world.grid.query(x, 5).unwrap();
        assert_eq!(e.material, tall);
        assert!(e.is_background);
    }
    assert_eq!(world.stats.tall_grass, 12);
}

#[test]
fn out_of_range_heights_fail_before_generation() {
    let mut cfg = flat(16);
    cfg.world.height_addition = -3.0e9;
    assert!(matches!(
        generate(&cfg, catalog()),
        Err(ConfigError::HeightOutOfRange { .. })
    ));

    let mut cfg = flat(16);
    cfg.world.height_addition = f32::NAN;
    assert!(matches!(generate(&cfg, catalog()), Err(ConfigError::NonFinite { .. })));
}

#[test]
fn deep_negative_terrain_generates_an_empty_world() {
    let mut cfg = flat(16);
    cfg.world.height_addition = -9.0e8;
    let world = generate(&cfg, catalog()).unwrap();
    assert!(world.grid.is_empty());
    assert_eq!(world.stats.columns, 16);
}

#[test]
fn spawn_matches_world_query() {
    let world = World::from_config(&WorldGenConfig::default(), catalog()).unwrap();
    let generated = world.generate();
    assert_eq!(generated.spawn_point(), world.spawn_point());
    for x in [0, 17, 50, 99] {
        assert_eq!(generated.heights.at(x), Some(world.height_at(x)));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn same_seed_same_world(seed in any::<i32>()) {
        let mut cfg = WorldGenConfig::default();
        cfg.world.seed = seed;
        cfg.world.size = 32;
        let a = generate(&cfg, catalog()).unwrap();
        let b = generate(&cfg, catalog()).unwrap();
        prop_assert_eq!(a.grid.snapshot(), b.grid.snapshot());
        prop_assert_eq!(a.stats, b.stats);
        prop_assert_eq!(a.spawn, b.spawn);
    }

    // Without caves each column is solid from row 0 up to its surface row.
    #[test]
    fn solid_columns_without_caves(seed in any::<i32>(), add in 1.0f32..20.0) {
        let mut cfg = WorldGenConfig::default();
        cfg.world.seed = seed;
        cfg.world.size = 24;
        cfg.world.height_addition = add;
        cfg.world.generate_caves = false;
        let world = generate(&cfg, catalog()).unwrap();
        for x in 0..24 {
            let h = world.heights.at(x).unwrap();
            let top = surface_row(h).min(24);
            for y in 0..=top {
                let e = world.grid.query(x, y);
                prop_assert!(e.is_some_and(|e| !e.is_background), "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn variants_come_from_the_material_pool(seed in any::<i32>()) {
        let mut cfg = WorldGenConfig::default();
        cfg.world.seed = seed;
        cfg.world.size = 24;
        let world = generate(&cfg, catalog()).unwrap();
        let cat = world.grid.catalog();
        for (_, _, e) in world.grid.iter() {
            let def = cat.get(e.material).unwrap();
            prop_assert!((e.variant as usize) < def.variant_count());
        }
    }
}
