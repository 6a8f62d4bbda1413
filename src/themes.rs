//! Theme presets (§4.9): bind a generator to a post-process and feature
//! mix so a whole dungeon style can be requested by name.

use crate::algorithms::{Agent, AgentConfig, Bsp, BspConfig, Cave, CaveConfig};
use crate::features::{place_features, FeatureOptions};
use crate::prefab::{place_prefabs, Prefab, PrefabOptions, PrefabPlacementResult};
use crate::{Algorithm, Grid, Rng, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dungeon,
    Cavern,
    Crypt,
    Sewer,
    Castle,
    Mine,
    Ruins,
    Temple,
}

impl Theme {
    pub const ALL: [Theme; 8] = [
        Theme::Dungeon,
        Theme::Cavern,
        Theme::Crypt,
        Theme::Sewer,
        Theme::Castle,
        Theme::Mine,
        Theme::Ruins,
        Theme::Temple,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Dungeon => "dungeon",
            Theme::Cavern => "cavern",
            Theme::Crypt => "crypt",
            Theme::Sewer => "sewer",
            Theme::Castle => "castle",
            Theme::Mine => "mine",
            Theme::Ruins => "ruins",
            Theme::Temple => "temple",
        }
    }
}

enum ThemeGenerator {
    Bsp(BspConfig),
    Cave(CaveConfig),
    Agent(AgentConfig),
}

#[derive(Debug, Clone)]
pub struct PostProcessOptions {
    pub door_chance: f64,
    pub secret_door_chance: f64,
    pub water_chance: f64,
    pub rubble_chance: f64,
    pub erode_walls_chance: f64,
}

#[derive(Debug, Clone)]
pub struct ThemeOverrides {
    pub post_process: Option<PostProcessOptions>,
    pub prefabs: Option<PrefabOptions>,
    pub features: Option<FeatureOptions>,
}

impl Default for ThemeOverrides {
    fn default() -> Self {
        Self { post_process: None, prefabs: None, features: None }
    }
}

struct ThemeBlocks {
    generator: ThemeGenerator,
    post_process: PostProcessOptions,
    prefabs: PrefabOptions,
    features: FeatureOptions,
}

fn blocks_for(theme: Theme) -> ThemeBlocks {
    let post_process = PostProcessOptions {
        door_chance: 0.4,
        secret_door_chance: 0.05,
        water_chance: 0.1,
        rubble_chance: 0.1,
        erode_walls_chance: 0.05,
    };
    let prefabs = PrefabOptions { max_prefabs: 2, min_distance: 6, ..Default::default() };
    let features = FeatureOptions::default();

    match theme {
        Theme::Dungeon => ThemeBlocks { generator: ThemeGenerator::Bsp(BspConfig::default()), post_process, prefabs, features },
        Theme::Castle => ThemeBlocks {
            generator: ThemeGenerator::Bsp(BspConfig { door_chance: 0.6, ..Default::default() }),
            post_process: PostProcessOptions { rubble_chance: 0.02, ..post_process },
            prefabs,
            features,
        },
        Theme::Temple => ThemeBlocks {
            generator: ThemeGenerator::Bsp(BspConfig::default()),
            post_process: PostProcessOptions { secret_door_chance: 0.15, ..post_process },
            prefabs: PrefabOptions { categories: vec!["shrine".into()], ..prefabs },
            features: FeatureOptions { treasure_chance: 0.7, ..features },
        },
        Theme::Cavern => ThemeBlocks {
            generator: ThemeGenerator::Cave(CaveConfig::default()),
            post_process: PostProcessOptions { door_chance: 0.1, water_chance: 0.3, ..post_process },
            prefabs,
            features,
        },
        Theme::Mine => ThemeBlocks {
            generator: ThemeGenerator::Cave(CaveConfig { initial_fill_probability: 0.45, ..Default::default() }),
            post_process: PostProcessOptions { rubble_chance: 0.25, erode_walls_chance: 0.15, ..post_process },
            prefabs,
            features: FeatureOptions { trap_chance: 0.5, ..features },
        },
        Theme::Sewer => ThemeBlocks {
            generator: ThemeGenerator::Agent(AgentConfig::default()),
            post_process: PostProcessOptions { water_chance: 0.6, ..post_process },
            prefabs,
            features,
        },
        Theme::Crypt => ThemeBlocks {
            generator: ThemeGenerator::Bsp(BspConfig { door_chance: 0.2, ..Default::default() }),
            post_process: PostProcessOptions { secret_door_chance: 0.2, rubble_chance: 0.2, ..post_process },
            prefabs,
            features: FeatureOptions { trap_chance: 0.5, treasure_chance: 0.6, ..features },
        },
        Theme::Ruins => ThemeBlocks {
            generator: ThemeGenerator::Bsp(BspConfig::default()),
            post_process: PostProcessOptions { rubble_chance: 0.35, erode_walls_chance: 0.3, ..post_process },
            prefabs,
            features,
        },
    }
}

fn apply_post_process(grid: &mut Grid<Tile>, options: &PostProcessOptions, rng: &mut Rng) {
    // doors
    let (w, h) = (grid.width(), grid.height());
    let mut door_candidates = Vec::new();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            if grid[(x, y)] == Tile::Corridor {
                let abuts_floor = grid.neighbors_4(x, y).iter().any(|&(nx, ny)| grid[(nx, ny)] == Tile::Floor);
                if abuts_floor {
                    door_candidates.push((x, y));
                }
            }
        }
    }
    for (x, y) in door_candidates {
        if rng.chance(options.door_chance) {
            grid.set(x as i32, y as i32, Tile::Door);
        }
    }

    // secret_doors
    let doors: Vec<(usize, usize)> = grid.iter().filter(|(_, _, t)| **t == Tile::Door).map(|(x, y, _)| (x, y)).collect();
    for (x, y) in doors {
        if rng.chance(options.secret_door_chance) {
            grid.set(x as i32, y as i32, Tile::SecretDoor);
        }
    }

    // water
    let floors: Vec<(usize, usize)> = grid.iter().filter(|(_, _, t)| **t == Tile::Floor).map(|(x, y, _)| (x, y)).collect();
    for (x, y) in &floors {
        if rng.chance(options.water_chance * 0.1) {
            grid.set(*x as i32, *y as i32, Tile::Water);
        }
    }

    // rubble
    let floors: Vec<(usize, usize)> = grid.iter().filter(|(_, _, t)| **t == Tile::Floor).map(|(x, y, _)| (x, y)).collect();
    for (x, y) in floors {
        if rng.chance(options.rubble_chance) {
            grid.set(x as i32, y as i32, Tile::Rubble);
        }
    }

    // erode_walls
    let walls: Vec<(usize, usize)> = (1..h - 1)
        .flat_map(|y| (1..w - 1).map(move |x| (x, y)))
        .filter(|&(x, y)| grid[(x, y)].is_wall() && grid.neighbors_4(x, y).iter().any(|&(nx, ny)| grid[(nx, ny)].is_walkable()))
        .collect();
    for (x, y) in walls {
        if rng.chance(options.erode_walls_chance) {
            grid.set(x as i32, y as i32, Tile::Rubble);
        }
    }
}

#[derive(Debug, Clone)]
pub struct ThemedDungeonMetadata {
    pub generator: &'static str,
    pub prefabs_placed: usize,
    pub features_added: usize,
}

#[derive(Debug, Clone)]
pub struct ThemedDungeon {
    pub grid: Grid<Tile>,
    pub theme_name: &'static str,
    pub seed: u64,
    pub metadata: ThemedDungeonMetadata,
}

pub fn generate_themed_dungeon(size: usize, theme: Theme, seed: u64, prefab_library: &[Prefab], overrides: Option<ThemeOverrides>) -> ThemedDungeon {
    let mut blocks = blocks_for(theme);
    if let Some(over) = overrides {
        if let Some(pp) = over.post_process {
            blocks.post_process = pp;
        }
        if let Some(pf) = over.prefabs {
            blocks.prefabs = pf;
        }
        if let Some(f) = over.features {
            blocks.features = f;
        }
    }

    let mut grid = Grid::new(size, size);
    let generator_name = match &blocks.generator {
        ThemeGenerator::Bsp(c) => {
            Bsp::new(c.clone()).generate(&mut grid, seed);
            "bsp"
        }
        ThemeGenerator::Cave(c) => {
            Cave::new(c.clone()).generate(&mut grid, seed);
            "cave"
        }
        ThemeGenerator::Agent(c) => {
            Agent::new(c.clone()).generate(&mut grid, seed);
            "agent"
        }
    };

    let mut rng = Rng::new(seed ^ 0x5151);
    apply_post_process(&mut grid, &blocks.post_process, &mut rng);

    let prefab_result: PrefabPlacementResult = place_prefabs(&mut grid, prefab_library, &blocks.prefabs, seed ^ 0xA11A);
    let feature_report = place_features(&mut grid, &blocks.features, seed ^ 0xFEA7);

    ThemedDungeon {
        grid,
        theme_name: theme.name(),
        seed,
        metadata: ThemedDungeonMetadata {
            generator: generator_name,
            prefabs_placed: prefab_result.placed.len(),
            features_added: feature_report.treasures_placed + feature_report.traps_placed + feature_report.pillars_placed,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_eight_themes_generate() {
        for theme in Theme::ALL {
            let result = generate_themed_dungeon(32, theme, 1, &[], None);
            assert_eq!(result.theme_name, theme.name());
            assert!(result.grid.count(|t| t.is_walkable()) > 0);
        }
    }

    #[test]
    fn s7_themed_crypt_has_door_and_is_deterministic() {
        let overrides = ThemeOverrides {
            post_process: Some(PostProcessOptions { door_chance: 1.0, secret_door_chance: 0.0, ..blocks_for(Theme::Crypt).post_process }),
            prefabs: None,
            features: None,
        };
        let first = generate_themed_dungeon(48, Theme::Crypt, 12345, &[], Some(overrides.clone()));
        let second = generate_themed_dungeon(48, Theme::Crypt, 12345, &[], Some(overrides));
        assert_eq!(first.grid, second.grid);
        assert!(first.grid.count(|t| *t == Tile::Door || *t == Tile::SecretDoor) >= 1);
    }

    #[test]
    fn overrides_shallow_merge_into_post_process() {
        let overrides = ThemeOverrides {
            post_process: Some(PostProcessOptions { door_chance: 1.0, secret_door_chance: 0.0, water_chance: 0.0, rubble_chance: 0.0, erode_walls_chance: 0.0 }),
            prefabs: None,
            features: None,
        };
        let result = generate_themed_dungeon(32, Theme::Dungeon, 5, &[], Some(overrides));
        assert!(result.grid.count(|t| t.is_walkable()) > 0);
    }
}
