//! Wave function collapse generator (§4.4): entropy-driven constraint
//! collapse over four tile classes with weighted collapse and an
//! iteration cap so propagation can never loop forever.

use crate::{Algorithm, Grid, Rng, Tile};
use std::collections::HashSet;

/// The four WFC tile classes, distinct from the full [`Tile`] enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WfcTile {
    Wall,
    Floor,
    Door,
    Corridor,
}

impl WfcTile {
    const ALL: [WfcTile; 4] = [WfcTile::Wall, WfcTile::Floor, WfcTile::Door, WfcTile::Corridor];

    fn weight(&self) -> f64 {
        match self {
            WfcTile::Wall => 3.0,
            WfcTile::Floor => 5.0,
            WfcTile::Door => 1.0,
            WfcTile::Corridor => 3.0,
        }
    }

    fn to_tile(self) -> Tile {
        match self {
            WfcTile::Wall => Tile::Wall,
            WfcTile::Floor => Tile::Floor,
            WfcTile::Door => Tile::Door,
            WfcTile::Corridor => Tile::Corridor,
        }
    }
}

/// Which tiles may sit next to which. Walls only border wall or floor;
/// floor and corridor mix freely; doors only bridge floor and corridor,
/// never touch another door or bare wall.
#[derive(Debug, Clone)]
pub struct WfcRules {
    adjacencies: [HashSet<WfcTile>; 4],
}

impl WfcRules {
    pub fn dungeon() -> Self {
        let wall: HashSet<WfcTile> = [WfcTile::Wall, WfcTile::Floor].into_iter().collect();
        let floor: HashSet<WfcTile> = [WfcTile::Wall, WfcTile::Floor, WfcTile::Door, WfcTile::Corridor].into_iter().collect();
        let door: HashSet<WfcTile> = [WfcTile::Floor, WfcTile::Corridor].into_iter().collect();
        let corridor: HashSet<WfcTile> = [WfcTile::Wall, WfcTile::Floor, WfcTile::Door, WfcTile::Corridor].into_iter().collect();
        Self { adjacencies: [wall, floor, door, corridor] }
    }

    fn allowed(&self, t: WfcTile) -> &HashSet<WfcTile> {
        &self.adjacencies[match t {
            WfcTile::Wall => 0,
            WfcTile::Floor => 1,
            WfcTile::Door => 2,
            WfcTile::Corridor => 3,
        }]
    }
}

#[derive(Debug, Clone)]
pub struct WfcConfig {
    pub rules: WfcRules,
    /// Radius of the center diamond pre-seeded to {FLOOR, CORRIDOR} before
    /// collapse begins, guaranteeing an open core to grow from.
    pub seed_radius: usize,
}

impl Default for WfcConfig {
    fn default() -> Self {
        Self { rules: WfcRules::dungeon(), seed_radius: 3 }
    }
}

pub struct Wfc {
    config: WfcConfig,
}

impl Wfc {
    pub fn new(config: WfcConfig) -> Self {
        Self { config }
    }
}

impl Default for Wfc {
    fn default() -> Self {
        Self::new(WfcConfig::default())
    }
}

fn propagate(poss: &mut [Vec<HashSet<WfcTile>>], x: usize, y: usize, rules: &WfcRules, w: usize, h: usize) {
    let mut stack = vec![(x, y)];
    while let Some((cx, cy)) = stack.pop() {
        let current = poss[cx][cy].clone();
        for (dx, dy) in [(-1i32, 0), (1, 0), (0, -1), (0, 1)] {
            let (nx, ny) = (cx as i32 + dx, cy as i32 + dy);
            if nx < 0 || ny < 0 || nx >= w as i32 || ny >= h as i32 {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            let mut valid: HashSet<WfcTile> = HashSet::new();
            for &t in &current {
                valid.extend(rules.allowed(t));
            }
            let before = poss[nx][ny].len();
            poss[nx][ny].retain(|t| valid.contains(t));
            if poss[nx][ny].is_empty() {
                // contradiction: back off to wall, the universal neighbor
                poss[nx][ny].insert(WfcTile::Wall);
            }
            if poss[nx][ny].len() < before {
                stack.push((nx, ny));
            }
        }
    }
}

impl Algorithm<Tile> for Wfc {
    fn generate(&self, grid: &mut Grid<Tile>, seed: u64) {
        let mut rng = Rng::new(seed);
        let (w, h) = (grid.width(), grid.height());

        let mut poss: Vec<Vec<HashSet<WfcTile>>> = vec![vec![WfcTile::ALL.into_iter().collect(); h]; w];
        for x in 0..w {
            poss[x][0] = [WfcTile::Wall].into_iter().collect();
            poss[x][h - 1] = [WfcTile::Wall].into_iter().collect();
        }
        for y in 0..h {
            poss[0][y] = [WfcTile::Wall].into_iter().collect();
            poss[w - 1][y] = [WfcTile::Wall].into_iter().collect();
        }

        let (cx0, cy0) = (w / 2, h / 2);
        let seed_open: HashSet<WfcTile> = [WfcTile::Floor, WfcTile::Corridor].into_iter().collect();
        for x in 0..w {
            for y in 0..h {
                let dist = (x as i32 - cx0 as i32).abs() + (y as i32 - cy0 as i32).abs();
                if dist <= self.config.seed_radius as i32 && poss[x][y].len() > 1 {
                    poss[x][y] = seed_open.clone();
                }
            }
        }

        let max_iterations = 2 * w * h;
        for _ in 0..max_iterations {
            let mut min_entropy = usize::MAX;
            let mut candidates = Vec::new();
            for x in 0..w {
                for y in 0..h {
                    let len = poss[x][y].len();
                    if len > 1 {
                        if len < min_entropy {
                            min_entropy = len;
                            candidates.clear();
                            candidates.push((x, y));
                        } else if len == min_entropy {
                            candidates.push((x, y));
                        }
                    }
                }
            }
            if candidates.is_empty() {
                break;
            }
            let &(cx, cy) = rng.pick(&candidates).unwrap();
            let options: Vec<WfcTile> = poss[cx][cy].iter().copied().collect();
            let weights: Vec<f64> = options.iter().map(|t| t.weight()).collect();
            let choice = match rng.weighted(&weights) {
                Some(i) => options[i],
                None => options[0],
            };
            poss[cx][cy] = [choice].into_iter().collect();
            propagate(&mut poss, cx, cy, &self.config.rules, w, h);
        }

        for x in 0..w {
            for y in 0..h {
                let tile = poss[x][y].iter().next().copied().unwrap_or(WfcTile::Wall);
                grid.set(x as i32, y as i32, tile.to_tile());
            }
        }
    }

    fn name(&self) -> &'static str {
        "WFC"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wfc_generates_content() {
        let mut grid: Grid<Tile> = Grid::new(20, 20);
        Wfc::default().generate(&mut grid, 12345);
        assert!(grid.count(|t| t.is_floor()) > 0);
    }

    #[test]
    fn wfc_is_deterministic() {
        let mut g1: Grid<Tile> = Grid::new(20, 20);
        let mut g2: Grid<Tile> = Grid::new(20, 20);
        Wfc::default().generate(&mut g1, 42);
        Wfc::default().generate(&mut g2, 42);
        assert_eq!(g1, g2);
    }

    #[test]
    fn wfc_preserves_border() {
        let mut grid: Grid<Tile> = Grid::new(15, 15);
        Wfc::default().generate(&mut grid, 99);
        for x in 0..15 {
            assert!(grid[(x, 0)].is_wall());
            assert!(grid[(x, 14)].is_wall());
        }
    }
}
