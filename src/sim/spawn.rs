//! Unit spawning (§4.11): geographic faction split with greedy min-distance
//! placement.

use crate::sim::unit::{Faction, Unit, UnitType};
use crate::{Grid, Point, Rng, Tile};

#[derive(Debug, Clone)]
pub struct SpawnOptions {
    pub units_per_faction: usize,
    pub unit_types: Vec<UnitType>,
    pub opposing_sides: bool,
    pub min_spawn_distance: i32,
}

impl Default for SpawnOptions {
    fn default() -> Self {
        Self {
            units_per_faction: 5,
            unit_types: UnitType::ALL.to_vec(),
            opposing_sides: true,
            min_spawn_distance: 3,
        }
    }
}

fn greedy_spread(candidates: &[Point], count: usize, min_distance: i32, rng: &mut Rng) -> Vec<Point> {
    let mut shuffled = candidates.to_vec();
    rng.shuffle(&mut shuffled);

    let mut chosen: Vec<Point> = Vec::new();
    for &p in &shuffled {
        if chosen.len() >= count {
            break;
        }
        if chosen.iter().all(|&c| c.manhattan(p) >= min_distance) {
            chosen.push(p);
        }
    }
    if chosen.len() < count {
        for &p in &shuffled {
            if chosen.len() >= count {
                break;
            }
            if !chosen.contains(&p) {
                chosen.push(p);
            }
        }
    }
    chosen
}

pub fn spawn_units(grid: &Grid<Tile>, options: &SpawnOptions, seed: u64) -> Vec<Unit> {
    let mut rng = Rng::new(seed);
    let walkable: Vec<Point> = grid
        .iter()
        .filter(|(_, _, t)| t.is_walkable())
        .map(|(x, y, _)| Point::new(x as i32, y as i32))
        .collect();

    let (red_pool, blue_pool) = if options.opposing_sides {
        let (w, h) = (grid.width() as i32, grid.height() as i32);
        if w >= h {
            let mid = w / 2;
            (
                walkable.iter().copied().filter(|p| p.x < mid).collect::<Vec<_>>(),
                walkable.iter().copied().filter(|p| p.x >= mid).collect::<Vec<_>>(),
            )
        } else {
            let mid = h / 2;
            (
                walkable.iter().copied().filter(|p| p.y < mid).collect::<Vec<_>>(),
                walkable.iter().copied().filter(|p| p.y >= mid).collect::<Vec<_>>(),
            )
        }
    } else {
        (walkable.clone(), walkable.clone())
    };

    let mut units = Vec::new();
    let mut next_id = 0usize;
    for (faction, pool) in [(Faction::Red, &red_pool), (Faction::Blue, &blue_pool)] {
        let positions = greedy_spread(pool, options.units_per_faction, options.min_spawn_distance, &mut rng);
        for pos in positions {
            let unit_type = *rng.pick(&options.unit_types).unwrap_or(&UnitType::Warrior);
            let id = format!("{:?}-{}", faction, next_id).to_lowercase();
            next_id += 1;
            units.push(Unit::new(id, unit_type, faction, pos));
        }
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{generate_bsp, BspConfig};

    #[test]
    fn spawns_requested_unit_count_per_faction() {
        let grid = generate_bsp(40, 5, BspConfig::default()).unwrap();
        let options = SpawnOptions { units_per_faction: 3, ..Default::default() };
        let units = spawn_units(&grid, &options, 1);
        assert_eq!(units.iter().filter(|u| u.faction == Faction::Red).count(), 3);
        assert_eq!(units.iter().filter(|u| u.faction == Faction::Blue).count(), 3);
    }

    #[test]
    fn all_spawned_units_are_on_walkable_tiles() {
        let grid = generate_bsp(40, 5, BspConfig::default()).unwrap();
        let options = SpawnOptions { units_per_faction: 4, ..Default::default() };
        let units = spawn_units(&grid, &options, 2);
        for u in &units {
            assert!(grid[(u.position.x as usize, u.position.y as usize)].is_walkable());
        }
    }
}
