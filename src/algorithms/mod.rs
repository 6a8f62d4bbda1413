//! Generator library (§4.4): one module per algorithm, plus free
//! `generate_*` functions that validate `size` and drive the
//! [`crate::Algorithm`] trait.

mod agent;
mod bsp;
mod cave;
mod dla;
mod drunkard;
mod maze;
mod perlin;
mod poisson;
mod voronoi;
mod wfc;

pub use agent::{Agent, AgentConfig};
pub use bsp::{Bsp, BspConfig};
pub use cave::{Cave, CaveConfig};
pub use dla::{Dla, DlaConfig};
pub use drunkard::{DrunkardConfig, DrunkardVariant, DrunkardWalk};
pub use maze::{Maze, MazeAlgorithm, MazeConfig};
pub use perlin::{PerlinConfig, PerlinTerrain};
pub use poisson::{Poisson, PoissonConfig};
pub use voronoi::{Voronoi, VoronoiConfig};
pub use wfc::{Wfc, WfcConfig, WfcRules, WfcTile};

use crate::compose::{BlendMode, LayeredGenerator};
use crate::error::{validate_size, Result};
use crate::{Algorithm, Grid, TerrainTile, Tile};

/// A `Grid<Tile>` generator choice usable as a hybrid layer; mirrors
/// [`crate::multilevel::LevelGenerator`]'s pattern of wrapping a config
/// enum so callers can name a generator without boxing it themselves.
#[derive(Debug, Clone)]
pub enum GeneratorSpec {
    Bsp(BspConfig),
    Cave(CaveConfig),
    Dla(DlaConfig),
    DrunkardWalk(DrunkardConfig),
    Voronoi(VoronoiConfig),
    Wfc(WfcConfig),
    Agent(AgentConfig),
    Poisson(PoissonConfig),
}

impl Algorithm<Tile> for GeneratorSpec {
    fn generate(&self, grid: &mut Grid<Tile>, seed: u64) {
        match self {
            GeneratorSpec::Bsp(c) => Bsp::new(c.clone()).generate(grid, seed),
            GeneratorSpec::Cave(c) => Cave::new(c.clone()).generate(grid, seed),
            GeneratorSpec::Dla(c) => Dla::new(c.clone()).generate(grid, seed),
            GeneratorSpec::DrunkardWalk(c) => DrunkardWalk::new(c.clone()).generate(grid, seed),
            GeneratorSpec::Voronoi(c) => Voronoi::new(c.clone()).generate(grid, seed),
            GeneratorSpec::Wfc(c) => Wfc::new(c.clone()).generate(grid, seed),
            GeneratorSpec::Agent(c) => Agent::new(c.clone()).generate(grid, seed),
            GeneratorSpec::Poisson(c) => Poisson::new(c.clone()).generate(grid, seed),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            GeneratorSpec::Bsp(_) => "bsp",
            GeneratorSpec::Cave(_) => "cave",
            GeneratorSpec::Dla(_) => "dla",
            GeneratorSpec::DrunkardWalk(_) => "drunkard_walk",
            GeneratorSpec::Voronoi(_) => "voronoi",
            GeneratorSpec::Wfc(_) => "wfc",
            GeneratorSpec::Agent(_) => "agent",
            GeneratorSpec::Poisson(_) => "poisson",
        }
    }
}

fn run<T: crate::GridTile, A: Algorithm<T>>(name: &'static str, size: usize, seed: u64, algo: A) -> Result<Grid<T>> {
    validate_size(name, size)?;
    let mut grid = Grid::new(size, size);
    algo.generate(&mut grid, seed);
    Ok(grid)
}

pub fn generate_bsp(size: usize, seed: u64, config: BspConfig) -> Result<Grid<Tile>> {
    run("generate_bsp", size, seed, Bsp::new(config))
}

pub fn generate_cave(size: usize, seed: u64, config: CaveConfig) -> Result<Grid<Tile>> {
    run("generate_cave", size, seed, Cave::new(config))
}

pub fn generate_dla(size: usize, seed: u64, config: DlaConfig) -> Result<Grid<Tile>> {
    run("generate_dla", size, seed, Dla::new(config))
}

pub fn generate_drunkard_walk(size: usize, seed: u64, config: DrunkardConfig) -> Result<Grid<Tile>> {
    run("generate_drunkard_walk", size, seed, DrunkardWalk::new(config))
}

pub fn generate_maze(size: usize, seed: u64, config: MazeConfig) -> Result<Grid<Tile>> {
    validate_size("generate_maze", size)?;
    // Even inputs decrement to the nearest odd size.
    let odd_size = if size % 2 == 0 { size - 1 } else { size };
    let mut grid = Grid::new(odd_size, odd_size);
    Maze::new(config).generate(&mut grid, seed);
    Ok(grid)
}

pub fn generate_perlin(size: usize, seed: u64, config: PerlinConfig) -> Result<Grid<TerrainTile>> {
    run("generate_perlin", size, seed, PerlinTerrain::new(config))
}

pub fn generate_voronoi(size: usize, seed: u64, config: VoronoiConfig) -> Result<Grid<Tile>> {
    run("generate_voronoi", size, seed, Voronoi::new(config))
}

pub fn generate_wfc(size: usize, seed: u64, config: WfcConfig) -> Result<Grid<Tile>> {
    run("generate_wfc", size, seed, Wfc::new(config))
}

pub fn generate_agent(size: usize, seed: u64, config: AgentConfig) -> Result<Grid<Tile>> {
    run("generate_agent", size, seed, Agent::new(config))
}

pub fn generate_poisson(size: usize, seed: u64, config: PoissonConfig) -> Result<Grid<Tile>> {
    run("generate_poisson", size, seed, Poisson::new(config))
}

/// Runs a base generator then blends a second generator's output over it
/// (§6); layers are evaluated in the same order a [`LayeredGenerator`]
/// would apply them.
pub fn generate_hybrid(size: usize, seed: u64, base: GeneratorSpec, overlay: GeneratorSpec, mode: BlendMode) -> Result<Grid<Tile>> {
    validate_size("generate_hybrid", size)?;
    let layered = LayeredGenerator::new().base(base).add(overlay, mode);
    let mut grid = Grid::new(size, size);
    layered.generate(&mut grid, seed);
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_size_is_rejected() {
        let err = generate_bsp(2, 1, BspConfig::default()).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidSize { .. }));
    }

    #[test]
    fn hybrid_unions_base_and_overlay_floors() {
        let base = GeneratorSpec::Bsp(BspConfig::default());
        let overlay = GeneratorSpec::Cave(CaveConfig::default());
        let grid = generate_hybrid(32, 42, base, overlay, BlendMode::Union).unwrap();
        assert!(grid.count(|t| t.is_walkable()) > 0);
    }

    #[test]
    fn maze_decrements_even_size() {
        let grid = generate_maze(32, 1, MazeConfig::default()).unwrap();
        assert_eq!(grid.width(), 31);
        assert_eq!(grid.height(), 31);
    }

    #[test]
    fn s1_bsp_scenario() {
        let grid = generate_bsp(32, 12345, BspConfig::default()).unwrap();
        let pct = grid.count(|t| t.is_walkable()) as f64 / (32.0 * 32.0) * 100.0;
        assert!((5.0..=70.0).contains(&pct), "walkable% = {pct}");
        assert_eq!(grid.flood_regions().len(), 1);
        for x in 0..32 {
            assert!(grid[(x, 0)].is_wall());
            assert!(grid[(x, 31)].is_wall());
        }
    }
}
