//! Multi-level dungeon builder (§4.8): generates a stack of levels and
//! threads stair pairs between each consecutive pair.

use crate::connectivity::is_fully_connected;
use crate::{Grid, Rng, Tile};

#[derive(Debug, Clone)]
pub struct LevelSpec {
    pub generator: LevelGenerator,
    pub name: Option<String>,
}

/// The subset of generators usable in a level palette; each wraps its
/// config so [`build_multi_level`] can retry a level with a fresh seed.
#[derive(Debug, Clone)]
pub enum LevelGenerator {
    Bsp(crate::algorithms::BspConfig),
    Cave(crate::algorithms::CaveConfig),
    Agent(crate::algorithms::AgentConfig),
}

impl LevelGenerator {
    fn generate(&self, size: usize, seed: u64) -> Grid<Tile> {
        use crate::Algorithm;
        let mut grid = Grid::new(size, size);
        match self {
            LevelGenerator::Bsp(c) => crate::algorithms::Bsp::new(c.clone()).generate(&mut grid, seed),
            LevelGenerator::Cave(c) => crate::algorithms::Cave::new(c.clone()).generate(&mut grid, seed),
            LevelGenerator::Agent(c) => crate::algorithms::Agent::new(c.clone()).generate(&mut grid, seed),
        }
        grid
    }
}

#[derive(Debug, Clone)]
pub struct MultiLevelOptions {
    pub stairs_per_connection: usize,
    pub min_stair_distance: i32,
    pub ensure_connectivity: bool,
}

impl Default for MultiLevelOptions {
    fn default() -> Self {
        Self { stairs_per_connection: 2, min_stair_distance: 8, ensure_connectivity: true }
    }
}

#[derive(Debug, Clone)]
pub struct StairConnection {
    pub from_level: usize,
    pub to_level: usize,
    pub upper_pos: (usize, usize),
    pub lower_pos: (usize, usize),
}

#[derive(Debug, Clone)]
pub struct MultiLevelResult {
    pub levels: Vec<Grid<Tile>>,
    pub names: Vec<Option<String>>,
    pub connections: Vec<StairConnection>,
}

fn manhattan(a: (usize, usize), b: (usize, usize)) -> i32 {
    (a.0 as i32 - b.0 as i32).abs() + (a.1 as i32 - b.1 as i32).abs()
}

fn stair_candidates(grid: &Grid<Tile>, taken: &[(usize, usize)], min_distance: i32) -> Vec<(usize, usize)> {
    let (w, h) = (grid.width(), grid.height());
    let mut out = Vec::new();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            if grid[(x, y)] != Tile::Floor {
                continue;
            }
            let neighbors = grid.neighbors_4(x, y);
            if neighbors.len() != 4 || !neighbors.iter().all(|&(nx, ny)| grid[(nx, ny)] == Tile::Floor) {
                continue;
            }
            if taken.iter().any(|&t| manhattan(t, (x, y)) < min_distance) {
                continue;
            }
            out.push((x, y));
        }
    }
    out
}

fn generate_connected_level(spec: &LevelGenerator, size: usize, seed: u64, ensure_connectivity: bool) -> Grid<Tile> {
    let mut grid = spec.generate(size, seed);
    if !ensure_connectivity {
        return grid;
    }
    for attempt in 1..5 {
        if is_fully_connected(&grid) {
            return grid;
        }
        grid = spec.generate(size, seed.wrapping_add(attempt as u64 * 7919));
    }
    grid
}

/// Convenience entry point (§6): builds `num_levels` BSP levels of the
/// given size with the requested stair density.
pub fn generate_multi_level(size: usize, num_levels: usize, seed: u64, stairs_per_connection: usize) -> crate::error::Result<MultiLevelResult> {
    crate::error::validate_size("generate_multi_level", size)?;
    let specs: Vec<LevelSpec> = (0..num_levels)
        .map(|i| LevelSpec { generator: LevelGenerator::Bsp(crate::algorithms::BspConfig::default()), name: Some(format!("level-{i}")) })
        .collect();
    let options = MultiLevelOptions { stairs_per_connection, ..Default::default() };
    Ok(build_multi_level(&specs, size, seed, &options))
}

pub fn build_multi_level(specs: &[LevelSpec], size: usize, seed: u64, options: &MultiLevelOptions) -> MultiLevelResult {
    let mut rng = Rng::new(seed);
    let mut levels = Vec::new();
    let mut names = Vec::new();

    for spec in specs {
        let level_seed = rng.next_u64();
        levels.push(generate_connected_level(&spec.generator, size, level_seed, options.ensure_connectivity));
        names.push(spec.name.clone());
    }

    let mut connections = Vec::new();
    for i in 0..levels.len().saturating_sub(1) {
        let mut upper_taken = Vec::new();
        let mut lower_taken = Vec::new();

        for _ in 0..options.stairs_per_connection {
            let upper_candidates = stair_candidates(&levels[i], &upper_taken, options.min_stair_distance);
            let Some(&upper_pos) = rng.pick(&upper_candidates) else { break };

            let lower_candidates = stair_candidates(&levels[i + 1], &lower_taken, options.min_stair_distance);
            if lower_candidates.is_empty() {
                break;
            }
            let nearest = lower_candidates
                .iter()
                .copied()
                .min_by_key(|&p| manhattan(p, upper_pos))
                .unwrap();
            let lower_pos = if manhattan(nearest, upper_pos) < 15 {
                nearest
            } else {
                *rng.pick(&lower_candidates).unwrap()
            };

            levels[i].set(upper_pos.0 as i32, upper_pos.1 as i32, Tile::StairsDown);
            levels[i + 1].set(lower_pos.0 as i32, lower_pos.1 as i32, Tile::StairsUp);
            upper_taken.push(upper_pos);
            lower_taken.push(lower_pos);
            connections.push(StairConnection { from_level: i, to_level: i + 1, upper_pos, lower_pos });
        }
    }

    MultiLevelResult { levels, names, connections }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_requested_number_of_levels() {
        let specs = vec![
            LevelSpec { generator: LevelGenerator::Bsp(Default::default()), name: Some("L1".into()) },
            LevelSpec { generator: LevelGenerator::Bsp(Default::default()), name: Some("L2".into()) },
        ];
        let result = build_multi_level(&specs, 32, 12345, &MultiLevelOptions::default());
        assert_eq!(result.levels.len(), 2);
    }

    #[test]
    fn s5_three_level_stack_has_at_least_two_connections() {
        let result = generate_multi_level(32, 3, 12345, 2).unwrap();
        assert_eq!(result.levels.len(), 3);
        assert!(result.connections.len() >= 2);
        for conn in &result.connections {
            assert_eq!(result.levels[conn.from_level][conn.upper_pos], Tile::StairsDown);
            assert_eq!(result.levels[conn.to_level][conn.lower_pos], Tile::StairsUp);
        }
    }

    #[test]
    fn connects_consecutive_levels_with_stair_pairs() {
        let specs = vec![
            LevelSpec { generator: LevelGenerator::Bsp(Default::default()), name: None },
            LevelSpec { generator: LevelGenerator::Bsp(Default::default()), name: None },
        ];
        let result = build_multi_level(&specs, 40, 7, &MultiLevelOptions::default());
        assert!(!result.connections.is_empty());
        for conn in &result.connections {
            assert_eq!(result.levels[conn.from_level][conn.upper_pos], Tile::StairsDown);
            assert_eq!(result.levels[conn.to_level][conn.lower_pos], Tile::StairsUp);
        }
    }
}
