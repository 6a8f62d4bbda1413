//! Feature placer (§4.5): stairs, treasure, traps, water pools, and
//! pillars dropped onto a finished grid in a fixed pass order.

use crate::{Grid, Rng, Tile};

#[derive(Debug, Clone)]
pub struct FeatureOptions {
    pub stairs_chance: f64,
    pub treasure_chance: f64,
    pub trap_chance: f64,
    pub water_chance: f64,
    pub pillar_chance: f64,
    pub max_treasures: usize,
    pub max_traps: usize,
    pub max_pillars: usize,
    pub guarantee_stairs: bool,
}

impl Default for FeatureOptions {
    fn default() -> Self {
        Self {
            stairs_chance: 0.8,
            treasure_chance: 0.5,
            trap_chance: 0.3,
            water_chance: 0.2,
            pillar_chance: 0.4,
            max_treasures: 6,
            max_traps: 4,
            max_pillars: 8,
            guarantee_stairs: true,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct FeatureReport {
    pub stairs_placed: bool,
    pub treasures_placed: usize,
    pub traps_placed: usize,
    pub water_tiles: usize,
    pub pillars_placed: usize,
}

fn floors(grid: &Grid<Tile>) -> Vec<(usize, usize)> {
    grid.iter().filter(|(_, _, t)| **t == Tile::Floor).map(|(x, y, _)| (x, y)).collect()
}

fn is_interior(grid: &Grid<Tile>, x: usize, y: usize) -> bool {
    grid.neighbors_4(x, y).len() == 4 && grid.neighbors_4(x, y).iter().all(|&(nx, ny)| grid[(nx, ny)].is_walkable())
}

fn is_corner(grid: &Grid<Tile>, x: usize, y: usize) -> bool {
    let dirs = [(0i32, -1i32), (0, 1), (-1, 0), (1, 0)];
    let wall_dirs: Vec<usize> = dirs
        .iter()
        .enumerate()
        .filter(|(_, &(dx, dy))| {
            let (nx, ny) = (x as i32 + dx, y as i32 + dy);
            !grid.in_bounds(nx, ny) || grid[(nx as usize, ny as usize)].is_wall()
        })
        .map(|(i, _)| i)
        .collect();
    // an L-shaped pair: one of {N,S} and one of {E,W}
    wall_dirs.contains(&0) && wall_dirs.contains(&2)
        || wall_dirs.contains(&0) && wall_dirs.contains(&3)
        || wall_dirs.contains(&1) && wall_dirs.contains(&2)
        || wall_dirs.contains(&1) && wall_dirs.contains(&3)
}

fn is_dead_end(grid: &Grid<Tile>, x: usize, y: usize) -> bool {
    grid[(x, y)] == Tile::Corridor
        && grid.neighbors_4(x, y).iter().filter(|&&(nx, ny)| grid[(nx, ny)].is_wall()).count() >= 3
}

struct TileClasses {
    floors: Vec<(usize, usize)>,
    interiors: Vec<(usize, usize)>,
    corners: Vec<(usize, usize)>,
    dead_ends: Vec<(usize, usize)>,
}

fn classify(grid: &Grid<Tile>, rng: &mut Rng) -> TileClasses {
    let all_floors = floors(grid);
    let mut interiors = Vec::new();
    let mut corners = Vec::new();
    let mut dead_ends = Vec::new();

    for &(x, y) in &all_floors {
        if is_interior(grid, x, y) {
            interiors.push((x, y));
        }
        if is_corner(grid, x, y) {
            corners.push((x, y));
        }
    }
    let (w, h) = (grid.width(), grid.height());
    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            if is_dead_end(grid, x, y) {
                dead_ends.push((x, y));
            }
        }
    }

    let mut floors_shuffled = all_floors;
    rng.shuffle(&mut floors_shuffled);
    rng.shuffle(&mut interiors);
    rng.shuffle(&mut corners);
    rng.shuffle(&mut dead_ends);

    TileClasses { floors: floors_shuffled, interiors, corners, dead_ends }
}

fn chebyshev(a: (usize, usize), b: (usize, usize)) -> i32 {
    (a.0 as i32 - b.0 as i32).abs().max((a.1 as i32 - b.1 as i32).abs())
}

pub fn place_features(grid: &mut Grid<Tile>, options: &FeatureOptions, seed: u64) -> FeatureReport {
    let mut rng = Rng::new(seed);
    let mut report = FeatureReport::default();
    let classes = classify(grid, &mut rng);

    // 2. Stairs
    let mut stairs_up: Option<(usize, usize)> = None;
    'up: for group in [&classes.corners, &classes.dead_ends, &classes.floors] {
        for &pos in group {
            if grid[pos] != Tile::Floor {
                continue;
            }
            if options.guarantee_stairs || rng.chance(options.stairs_chance) {
                grid.set(pos.0 as i32, pos.1 as i32, Tile::StairsUp);
                stairs_up = Some(pos);
                break 'up;
            }
        }
    }
    if let Some(up) = stairs_up {
        'down: for group in [&classes.corners, &classes.dead_ends, &classes.floors] {
            for &pos in group {
                if grid[pos] != Tile::Floor || pos == up {
                    continue;
                }
                if grid.neighbors_4(pos.0, pos.1).contains(&up) {
                    continue;
                }
                if options.guarantee_stairs || rng.chance(options.stairs_chance) {
                    grid.set(pos.0 as i32, pos.1 as i32, Tile::StairsDown);
                    report.stairs_placed = true;
                    break 'down;
                }
            }
        }
    }

    // 3. Treasures
    'treasure: for group in [&classes.dead_ends, &classes.corners, &classes.interiors] {
        for &pos in group {
            if report.treasures_placed >= options.max_treasures {
                break 'treasure;
            }
            if grid[pos] != Tile::Floor {
                continue;
            }
            if rng.chance(options.treasure_chance) {
                let tile = if rng.chance(0.5) { Tile::Treasure } else { Tile::Chest };
                grid.set(pos.0 as i32, pos.1 as i32, tile);
                report.treasures_placed += 1;
            }
        }
    }

    // 4. Traps
    for &pos in &classes.floors {
        if report.traps_placed >= options.max_traps {
            break;
        }
        if grid[pos] != Tile::Floor {
            continue;
        }
        if rng.chance(options.trap_chance) {
            let tile = if rng.chance(0.6) { Tile::Trap } else { Tile::TrapPit };
            grid.set(pos.0 as i32, pos.1 as i32, tile);
            report.traps_placed += 1;
        }
    }

    // 5. Water pool
    if rng.chance(options.water_chance) {
        if let Some(&seed_pos) = rng.pick(&classes.interiors) {
            if grid[seed_pos] == Tile::Floor {
                let tile = if rng.chance(0.3) {
                    Tile::DeepWater
                } else if rng.chance(0.15) {
                    Tile::Lava
                } else {
                    Tile::Water
                };
                grid.set(seed_pos.0 as i32, seed_pos.1 as i32, tile);
                report.water_tiles += 1;
                let mut frontier = vec![seed_pos];
                while let Some((x, y)) = frontier.pop() {
                    for (nx, ny) in grid.neighbors_4(x, y) {
                        if grid[(nx, ny)] == Tile::Floor && rng.chance(0.5) {
                            grid.set(nx as i32, ny as i32, tile);
                            report.water_tiles += 1;
                            frontier.push((nx, ny));
                        }
                    }
                }
            }
        }
    }

    // 6. Pillars
    let mut placed_pillars: Vec<(usize, usize)> = Vec::new();
    for &pos in &classes.interiors {
        if report.pillars_placed >= options.max_pillars {
            break;
        }
        if grid[pos] != Tile::Floor {
            continue;
        }
        if placed_pillars.iter().any(|&p| chebyshev(p, pos) < 3) {
            continue;
        }
        if rng.chance(options.pillar_chance) {
            grid.set(pos.0 as i32, pos.1 as i32, Tile::Wall);
            placed_pillars.push(pos);
            report.pillars_placed += 1;
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{generate_bsp, BspConfig};

    #[test]
    fn guaranteed_stairs_are_placed_and_not_adjacent() {
        let mut grid = generate_bsp(32, 12345, BspConfig::default()).unwrap();
        let options = FeatureOptions { guarantee_stairs: true, ..Default::default() };
        let report = place_features(&mut grid, &options, 1);
        assert!(report.stairs_placed);
        assert_eq!(grid.count(|t| *t == Tile::StairsUp), 1);
        assert_eq!(grid.count(|t| *t == Tile::StairsDown), 1);
    }

    #[test]
    fn treasure_and_trap_counts_respect_caps() {
        let mut grid = generate_bsp(32, 7, BspConfig::default()).unwrap();
        let options = FeatureOptions { treasure_chance: 1.0, trap_chance: 1.0, max_treasures: 3, max_traps: 2, ..Default::default() };
        let report = place_features(&mut grid, &options, 2);
        assert!(report.treasures_placed <= 3);
        assert!(report.traps_placed <= 2);
    }
}
