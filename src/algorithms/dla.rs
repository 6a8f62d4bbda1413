//! Diffusion-limited aggregation generator (§4.4).

use crate::{Algorithm, Grid, Rng, Tile};

#[derive(Debug, Clone)]
pub struct DlaConfig {
    pub num_seeds: usize,
    pub fill_percentage: f64,
    pub stickiness: f64,
    pub max_walk_steps: usize,
}

impl Default for DlaConfig {
    fn default() -> Self {
        Self {
            num_seeds: 1,
            fill_percentage: 0.3,
            stickiness: 0.8,
            max_walk_steps: 2000,
        }
    }
}

pub struct Dla {
    config: DlaConfig,
}

impl Dla {
    pub fn new(config: DlaConfig) -> Self {
        Self { config }
    }
}

impl Default for Dla {
    fn default() -> Self {
        Self::new(DlaConfig::default())
    }
}

impl Algorithm<Tile> for Dla {
    fn generate(&self, grid: &mut Grid<Tile>, seed: u64) {
        let mut rng = Rng::new(seed);
        let (w, h) = (grid.width(), grid.height());
        grid.fill(Tile::Wall);

        let cx = w / 2;
        let cy = h / 2;
        let spread = self.config.num_seeds.max(1);
        for i in 0..spread {
            let offset = i as i32 - spread as i32 / 2;
            grid.set((cx as i32 + offset).clamp(1, w as i32 - 2), cy as i32, Tile::Floor);
        }

        let target = (self.config.fill_percentage * ((w - 2) * (h - 2)) as f64) as usize;

        while grid.count(|t| t.is_floor()) < target {
            let (mut x, mut y) = match rng.range(0, 4) {
                0 => (rng.range_usize(1, w - 1), 1),
                1 => (rng.range_usize(1, w - 1), h - 2),
                2 => (1, rng.range_usize(1, h - 1)),
                _ => (w - 2, rng.range_usize(1, h - 1)),
            };

            let mut stuck = false;
            for _ in 0..self.config.max_walk_steps {
                let has_floor_neighbor = grid
                    .neighbors_4(x, y)
                    .iter()
                    .any(|&(nx, ny)| grid[(nx, ny)].is_floor());
                if has_floor_neighbor && rng.chance(self.config.stickiness) {
                    grid.set(x as i32, y as i32, Tile::Floor);
                    stuck = true;
                    break;
                }

                let (dx, dy) = match rng.range(0, 4) {
                    0 => (1i32, 0i32),
                    1 => (-1, 0),
                    2 => (0, 1),
                    _ => (0, -1),
                };
                let (nx, ny) = (x as i32 + dx, y as i32 + dy);
                if nx > 0 && nx < w as i32 - 1 && ny > 0 && ny < h as i32 - 1 {
                    x = nx as usize;
                    y = ny as usize;
                }
            }
            if !stuck {
                // couldn't find the cluster within the walk budget; try a fresh spawn
                continue;
            }
        }

        grid.fill_border(Tile::Wall);
    }

    fn name(&self) -> &'static str {
        "DLA"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dla_grows_from_seed() {
        let mut grid: Grid<Tile> = Grid::new(40, 40);
        Dla::default().generate(&mut grid, 12345);
        assert!(grid.count(|t| t.is_floor()) > 10);
    }

    #[test]
    fn dla_is_deterministic() {
        let mut g1: Grid<Tile> = Grid::new(30, 30);
        let mut g2: Grid<Tile> = Grid::new(30, 30);
        Dla::default().generate(&mut g1, 7);
        Dla::default().generate(&mut g2, 7);
        assert_eq!(g1, g2);
    }
}
