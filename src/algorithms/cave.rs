//! Cellular-automata cave generator (§4.4).

use crate::{Algorithm, Grid, Rng, Tile};

#[derive(Debug, Clone)]
pub struct CaveConfig {
    pub initial_fill_probability: f64,
    pub iterations: usize,
    pub birth_limit: usize,
    pub death_limit: usize,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            initial_fill_probability: 0.5,
            iterations: 3,
            birth_limit: 5,
            death_limit: 5,
        }
    }
}

pub struct Cave {
    config: CaveConfig,
}

impl Cave {
    pub fn new(config: CaveConfig) -> Self {
        Self { config }
    }
}

impl Default for Cave {
    fn default() -> Self {
        Self::new(CaveConfig::default())
    }
}

impl Algorithm<Tile> for Cave {
    fn generate(&self, grid: &mut Grid<Tile>, seed: u64) {
        let mut rng = Rng::new(seed);
        let (w, h) = (grid.width(), grid.height());

        grid.fill(Tile::Wall);
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                if rng.chance(self.config.initial_fill_probability) {
                    grid.set(x as i32, y as i32, Tile::Floor);
                }
            }
        }

        for _ in 0..self.config.iterations {
            let mut next = vec![Tile::Wall; w * h];
            for y in 1..h - 1 {
                for x in 1..w - 1 {
                    let count = grid.count_in_radius(x as i32, y as i32, 1, &|t: &Tile| t.is_floor());
                    let empty_5x5 = grid.count_in_radius(x as i32, y as i32, 2, &|t: &Tile| t.is_floor()) == 0;
                    let new_floor = if empty_5x5 {
                        true
                    } else if grid[(x, y)].is_floor() {
                        count >= self.config.death_limit
                    } else {
                        count >= self.config.birth_limit
                    };
                    next[y * w + x] = if new_floor { Tile::Floor } else { Tile::Wall };
                }
            }
            for y in 1..h - 1 {
                for x in 1..w - 1 {
                    grid.set(x as i32, y as i32, next[y * w + x]);
                }
            }
        }

        grid.fill_border(Tile::Wall);
    }

    fn name(&self) -> &'static str {
        "Cave"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cave_creates_organic_floors() {
        let mut grid: Grid<Tile> = Grid::new(50, 50);
        Cave::default().generate(&mut grid, 12345);
        let floor = grid.count(|t| t.is_floor());
        assert!(floor > 0 && floor < 50 * 50);
    }

    #[test]
    fn cave_is_deterministic() {
        let mut g1: Grid<Tile> = Grid::new(40, 40);
        let mut g2: Grid<Tile> = Grid::new(40, 40);
        Cave::default().generate(&mut g1, 42);
        Cave::default().generate(&mut g2, 42);
        assert_eq!(g1, g2);
    }

    #[test]
    fn cave_preserves_border() {
        let mut grid: Grid<Tile> = Grid::new(30, 30);
        Cave::default().generate(&mut grid, 99);
        for x in 0..30 {
            assert!(grid[(x, 0)].is_wall());
            assert!(grid[(x, 29)].is_wall());
        }
    }
}
