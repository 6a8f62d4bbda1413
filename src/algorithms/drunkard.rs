//! Drunkard's walk generator (§4.4): simple, weighted, and multi-walker variants.

use crate::{Algorithm, Grid, Rng, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrunkardVariant {
    Simple,
    Weighted,
    Multiple,
}

#[derive(Debug, Clone)]
pub struct DrunkardConfig {
    pub variant: DrunkardVariant,
    pub floor_percentage: f64,
    pub num_walkers: usize,
    pub max_steps: usize,
}

impl Default for DrunkardConfig {
    fn default() -> Self {
        Self {
            variant: DrunkardVariant::Simple,
            floor_percentage: 0.4,
            num_walkers: 4,
            max_steps: 50_000,
        }
    }
}

pub struct DrunkardWalk {
    config: DrunkardConfig,
}

impl DrunkardWalk {
    pub fn new(config: DrunkardConfig) -> Self {
        Self { config }
    }
}

impl Default for DrunkardWalk {
    fn default() -> Self {
        Self::new(DrunkardConfig::default())
    }
}

const DIRS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

fn wall_neighbor_count(grid: &Grid<Tile>, x: usize, y: usize) -> usize {
    grid.neighbors_8(x, y).iter().filter(|&&(nx, ny)| grid[(nx, ny)].is_wall()).count()
}

fn step_simple(grid: &Grid<Tile>, x: usize, y: usize, rng: &mut Rng) -> (i32, i32) {
    let _ = (grid, x, y);
    *rng.pick(&DIRS).unwrap()
}

/// Bias toward directions whose target has more wall neighbors (unexplored).
fn step_weighted(grid: &Grid<Tile>, x: usize, y: usize, rng: &mut Rng) -> (i32, i32) {
    let w = grid.width() as i32;
    let h = grid.height() as i32;
    let weights: Vec<f64> = DIRS
        .iter()
        .map(|(dx, dy)| {
            let (nx, ny) = (x as i32 + dx, y as i32 + dy);
            if nx <= 0 || ny <= 0 || nx >= w - 1 || ny >= h - 1 {
                0.0
            } else {
                1.0 + wall_neighbor_count(grid, nx as usize, ny as usize) as f64
            }
        })
        .collect();
    match rng.weighted(&weights) {
        Some(i) => DIRS[i],
        None => DIRS[rng.range_usize(0, DIRS.len())],
    }
}

fn walk(
    grid: &mut Grid<Tile>,
    start: (usize, usize),
    target: usize,
    max_steps: usize,
    weighted: bool,
    rng: &mut Rng,
) {
    let (w, h) = (grid.width(), grid.height());
    let (mut x, mut y) = start;
    if !grid[(x, y)].is_floor() {
        grid.set(x as i32, y as i32, Tile::Floor);
    }

    for _ in 0..max_steps {
        if grid.count(|t| t.is_floor()) >= target {
            break;
        }
        let (dx, dy) = if weighted {
            step_weighted(grid, x, y, rng)
        } else {
            step_simple(grid, x, y, rng)
        };
        let (nx, ny) = (x as i32 + dx, y as i32 + dy);
        if nx > 0 && nx < w as i32 - 1 && ny > 0 && ny < h as i32 - 1 {
            x = nx as usize;
            y = ny as usize;
            grid.set(x as i32, y as i32, Tile::Floor);
        }
    }
}

impl Algorithm<Tile> for DrunkardWalk {
    fn generate(&self, grid: &mut Grid<Tile>, seed: u64) {
        let mut rng = Rng::new(seed);
        let (w, h) = (grid.width(), grid.height());
        grid.fill(Tile::Wall);

        let target = (self.config.floor_percentage * ((w - 2) * (h - 2)) as f64) as usize;
        let center = (w / 2, h / 2);

        match self.config.variant {
            DrunkardVariant::Simple => {
                walk(grid, center, target, self.config.max_steps, false, &mut rng);
            }
            DrunkardVariant::Weighted => {
                walk(grid, center, target, self.config.max_steps, true, &mut rng);
            }
            DrunkardVariant::Multiple => {
                grid.set(center.0 as i32, center.1 as i32, Tile::Floor);
                let per_walker = target.div_ceil(self.config.num_walkers.max(1));
                let steps_per_walker = self.config.max_steps / self.config.num_walkers.max(1);
                for _ in 0..self.config.num_walkers {
                    let floors: Vec<(usize, usize)> = grid
                        .iter()
                        .filter(|(_, _, t)| t.is_floor())
                        .map(|(x, y, _)| (x, y))
                        .collect();
                    let start = *rng.pick(&floors).unwrap_or(&center);
                    let running_target = grid.count(|t| t.is_floor()) + per_walker;
                    walk(grid, start, running_target.min(target), steps_per_walker, false, &mut rng);
                }
            }
        }

        grid.fill_border(Tile::Wall);
    }

    fn name(&self) -> &'static str {
        "DrunkardWalk"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drunkard_simple_reaches_target_area() {
        let mut grid: Grid<Tile> = Grid::new(50, 50);
        DrunkardWalk::default().generate(&mut grid, 12345);
        assert!(grid.count(|t| t.is_floor()) > 100);
    }

    #[test]
    fn drunkard_is_deterministic() {
        let mut g1: Grid<Tile> = Grid::new(40, 40);
        let mut g2: Grid<Tile> = Grid::new(40, 40);
        DrunkardWalk::default().generate(&mut g1, 42);
        DrunkardWalk::default().generate(&mut g2, 42);
        assert_eq!(g1, g2);
    }

    #[test]
    fn drunkard_multiple_walkers_carve_floor() {
        let config = DrunkardConfig { variant: DrunkardVariant::Multiple, num_walkers: 5, ..Default::default() };
        let mut grid: Grid<Tile> = Grid::new(40, 40);
        DrunkardWalk::new(config).generate(&mut grid, 5);
        assert!(grid.count(|t| t.is_floor()) > 50);
    }
}
