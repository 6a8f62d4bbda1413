//! Turn scheduling (§4.11): per-unit target/attack/move resolution and the
//! outer run loop.

use crate::connectivity::find_path_avoiding;
use crate::sim::combat::{execute_attack, find_best_target};
use crate::sim::unit::Unit;
use crate::sim::{SimulationEvent, SimulationState};
use crate::{Grid, Point, Rng, Tile};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct SimulationOptions {
    pub randomize_turn_order: bool,
    pub max_turns: usize,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self { randomize_turn_order: true, max_turns: 100 }
    }
}

fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::new(0, 0);
    }
    let sx: i32 = points.iter().map(|p| p.x).sum();
    let sy: i32 = points.iter().map(|p| p.y).sum();
    Point::new(sx / points.len() as i32, sy / points.len() as i32)
}

fn blend(a: Point, b: Point, t: f64) -> Point {
    Point::new(
        (a.x as f64 + (b.x - a.x) as f64 * t).round() as i32,
        (a.y as f64 + (b.y - a.y) as f64 * t).round() as i32,
    )
}

fn closest_walkable_unoccupied_within(grid: &Grid<Tile>, target: Point, range: i32, occupied: &HashSet<(usize, usize)>) -> Option<Point> {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let mut best: Option<(i32, Point)> = None;
    for dy in -range..=range {
        for dx in -range..=range {
            let p = Point::new(target.x + dx, target.y + dy);
            if p.x < 0 || p.y < 0 || p.x >= w || p.y >= h {
                continue;
            }
            let dist = target.manhattan(p);
            if dist > range {
                continue;
            }
            if !grid[(p.x as usize, p.y as usize)].is_walkable() {
                continue;
            }
            if occupied.contains(&(p.x as usize, p.y as usize)) {
                continue;
            }
            if best.map_or(true, |(bd, _)| dist < bd) {
                best = Some((dist, p));
            }
        }
    }
    best.map(|(_, p)| p)
}

fn try_attack(unit_id: &str, state: &mut SimulationState) -> bool {
    let target_id = {
        let units: Vec<Unit> = state.units.values().cloned().collect();
        let unit = state.units.get(unit_id).unwrap();
        find_best_target(unit, &units).map(|t| t.id.clone())
    };
    let Some(target_id) = target_id else { return false };

    let in_range_and_alive = {
        let unit = &state.units[unit_id];
        let target = &state.units[&target_id];
        !target.is_dead && target.faction != unit.faction && unit.position.manhattan(target.position) <= unit.range
    };
    if !in_range_and_alive {
        return false;
    }

    let attacker = state.units[unit_id].clone();
    let mut rng = Rng::new(state.rng_cursor);
    state.rng_cursor = state.rng_cursor.wrapping_add(1);
    let defender = state.units.get_mut(&target_id).unwrap();
    let events = execute_attack(&attacker, defender, &mut rng);
    state.events.extend(events);
    true
}

fn move_unit(grid: &Grid<Tile>, unit_id: &str, state: &mut SimulationState) {
    let units: Vec<Unit> = state.units.values().cloned().collect();
    let unit = state.units.get(unit_id).unwrap().clone();
    let Some(target) = find_best_target(&unit, &units) else { return };
    let target = target.clone();

    let mut occupied: HashSet<(usize, usize)> = units
        .iter()
        .filter(|u| !u.is_dead && u.id != unit.id)
        .map(|u| (u.position.x as usize, u.position.y as usize))
        .collect();

    let destination = if unit.range > 1 {
        closest_walkable_unoccupied_within(grid, target.position, unit.range, &occupied).unwrap_or(target.position)
    } else {
        target.position
    };

    let allies: Vec<Point> = units.iter().filter(|u| !u.is_dead && u.faction == unit.faction && u.id != unit.id).map(|u| u.position).collect();
    let destination = if !allies.is_empty() {
        let ally_centroid = centroid(&allies);
        let far_from_allies = ally_centroid.manhattan(destination) > 6;
        let unit_further_from_allies_than_dest = unit.position.manhattan(ally_centroid) > unit.position.manhattan(destination);
        let t = if far_from_allies && unit_further_from_allies_than_dest { 0.7 } else { 0.2 };
        blend(destination, ally_centroid, t)
    } else {
        destination
    };

    let start = (unit.position.x as usize, unit.position.y as usize);
    let dest = (destination.x.clamp(0, grid.width() as i32 - 1) as usize, destination.y.clamp(0, grid.height() as i32 - 1) as usize);

    let Some(path) = find_path_avoiding(grid, start, dest, &occupied) else { return };
    let steps = path.iter().skip(1).take(unit.speed.max(0) as usize);
    let mut last = unit.position;
    for &(x, y) in steps {
        last = Point::new(x as i32, y as i32);
    }
    if last != unit.position {
        let from = unit.position;
        occupied.remove(&(from.x as usize, from.y as usize));
        let moving = state.units.get_mut(unit_id).unwrap();
        moving.position = last;
        state.events.push(SimulationEvent::Move { unit_id: unit_id.to_string(), from, to: last });
    }
}

fn check_victory(state: &mut SimulationState) {
    if state.is_complete {
        return;
    }
    let red_alive = state.units.values().any(|u| !u.is_dead && u.faction == crate::sim::unit::Faction::Red);
    let blue_alive = state.units.values().any(|u| !u.is_dead && u.faction == crate::sim::unit::Faction::Blue);
    if !red_alive || !blue_alive {
        state.is_complete = true;
        state.winner = if red_alive {
            Some(crate::sim::unit::Faction::Red)
        } else if blue_alive {
            Some(crate::sim::unit::Faction::Blue)
        } else {
            None
        };
        if let Some(winner) = state.winner {
            state.events.push(SimulationEvent::Victory { winner });
        }
    }
}

pub fn simulate_turn(grid: &Grid<Tile>, state: &mut SimulationState, options: &SimulationOptions) {
    state.turn += 1;
    let mut order: Vec<String> = state.units.keys().cloned().collect();
    order.sort();
    if options.randomize_turn_order {
        let mut rng = Rng::new(state.rng_cursor ^ state.turn as u64);
        state.rng_cursor = state.rng_cursor.wrapping_add(1);
        rng.shuffle(&mut order);
    }

    for unit_id in order {
        if state.is_complete {
            break;
        }
        let Some(unit) = state.units.get(&unit_id) else { continue };
        if unit.is_dead {
            continue;
        }

        if !try_attack(&unit_id, state) {
            move_unit(grid, &unit_id, state);
            try_attack(&unit_id, state);
        }

        check_victory(state);
    }
}

pub fn create_simulation(units: Vec<Unit>) -> SimulationState {
    SimulationState::new(units)
}

pub fn run_simulation(grid: &Grid<Tile>, mut state: SimulationState, options: &SimulationOptions) -> SimulationState {
    while !state.is_complete && state.turn < options.max_turns {
        simulate_turn(grid, &mut state, options);
    }
    if !state.is_complete {
        state.is_complete = true;
    }
    state
}

/// `create_simulation` + `run_simulation` in one call (§6).
pub fn simulate(grid: &Grid<Tile>, units: Vec<Unit>, options: &SimulationOptions) -> SimulationState {
    let state = create_simulation(units);
    run_simulation(grid, state, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{generate_bsp, BspConfig};
    use crate::sim::spawn::{spawn_units, SpawnOptions};

    #[test]
    fn s6_one_unit_per_side_terminates() {
        let grid = generate_bsp(32, 12345, BspConfig::default()).unwrap();
        let options = SpawnOptions { units_per_faction: 1, ..Default::default() };
        let units = spawn_units(&grid, &options, 9);
        let result = simulate(&grid, units, &SimulationOptions::default());
        assert!(result.is_complete);
        if let Some(winner) = result.winner {
            assert!(winner == crate::sim::unit::Faction::Red || winner == crate::sim::unit::Faction::Blue);
        }
    }

    #[test]
    fn hp_is_monotonic_non_increasing_and_dead_stays_dead() {
        let grid = generate_bsp(32, 7, BspConfig::default()).unwrap();
        let options = SpawnOptions { units_per_faction: 2, ..Default::default() };
        let units = spawn_units(&grid, &options, 11);
        let mut state = create_simulation(units);
        let sim_options = SimulationOptions::default();
        let mut prior_hp: std::collections::HashMap<String, i32> = state.units.values().map(|u| (u.id.clone(), u.hp)).collect();
        for _ in 0..20 {
            if state.is_complete {
                break;
            }
            simulate_turn(&grid, &mut state, &sim_options);
            for u in state.units.values() {
                assert!(u.hp <= *prior_hp.get(&u.id).unwrap());
                prior_hp.insert(u.id.clone(), u.hp);
            }
        }
    }
}
