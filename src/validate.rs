//! Dungeon validation (§4.10): a structured report of issues found in a
//! finished grid, separate from the error taxonomy used by generators.

use crate::connectivity::{analyze_connectivity, find_disconnected_regions, get_connectivity_stats, RoomSizeClass};
use crate::{Grid, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone)]
pub struct Issue {
    pub kind: &'static str,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ValidationOptions {
    pub min_walkable_percent: f64,
    pub max_walkable_percent: f64,
    pub min_rooms: usize,
    pub min_room_size: usize,
    pub max_dead_ends: usize,
    pub isolated_rooms_is_error: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            min_walkable_percent: 10.0,
            max_walkable_percent: 70.0,
            min_rooms: 1,
            min_room_size: 4,
            max_dead_ends: 10,
            isolated_rooms_is_error: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DungeonStats {
    pub walkable_tiles: usize,
    pub wall_tiles: usize,
    pub room_count: usize,
    pub isolated_rooms: usize,
    pub dead_ends: usize,
    pub walkable_percent: f64,
    pub avg_room_size: f64,
    pub max_room_size: usize,
    pub min_room_size: usize,
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub valid: bool,
    pub stats: DungeonStats,
    pub issues: Vec<Issue>,
}

fn count_dead_ends(grid: &Grid<Tile>) -> usize {
    let (w, h) = (grid.width(), grid.height());
    let mut count = 0;
    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            if !grid[(x, y)].is_corridor() {
                continue;
            }
            let walls = grid.neighbors_4(x, y).iter().filter(|&&(nx, ny)| grid[(nx, ny)].is_wall()).count();
            if walls >= 3 {
                count += 1;
            }
        }
    }
    count
}

pub fn get_dungeon_stats(grid: &Grid<Tile>, min_room_size: usize) -> DungeonStats {
    let walkable_tiles = grid.count(|t| t.is_walkable());
    let wall_tiles = grid.count(|t| t.is_wall());
    let total = grid.width() * grid.height();
    let walkable_percent = if total == 0 { 0.0 } else { walkable_tiles as f64 / total as f64 * 100.0 };

    let graph = analyze_connectivity(grid, min_room_size);
    let stats = get_connectivity_stats(&graph);
    let isolated_rooms = graph.rooms.iter().filter(|r| graph.adjacency.get(&r.id).map_or(true, |v| v.is_empty())).count();
    let areas: Vec<usize> = graph.rooms.iter().map(|r| r.area).collect();
    let avg_room_size = if areas.is_empty() { 0.0 } else { areas.iter().sum::<usize>() as f64 / areas.len() as f64 };
    let max_room_size = areas.iter().copied().max().unwrap_or(0);
    let min_room_size_found = areas.iter().copied().min().unwrap_or(0);

    DungeonStats {
        walkable_tiles,
        wall_tiles,
        room_count: stats.room_count,
        isolated_rooms,
        dead_ends: count_dead_ends(grid),
        walkable_percent,
        avg_room_size,
        max_room_size,
        min_room_size: min_room_size_found,
    }
}

pub fn validate_dungeon(grid: &Grid<Tile>, options: &ValidationOptions) -> ValidationReport {
    let stats = get_dungeon_stats(grid, options.min_room_size);
    let mut issues = Vec::new();

    if stats.walkable_tiles == 0 {
        issues.push(Issue { kind: "empty_dungeon", severity: Severity::Error, message: "grid has no walkable tiles".into() });
    }
    if stats.walkable_percent < options.min_walkable_percent {
        issues.push(Issue {
            kind: "too_sparse",
            severity: Severity::Warning,
            message: format!("walkable_percent {:.1} is below minimum {:.1}", stats.walkable_percent, options.min_walkable_percent),
        });
    }
    if stats.walkable_percent > options.max_walkable_percent {
        issues.push(Issue {
            kind: "too_dense",
            severity: Severity::Warning,
            message: format!("walkable_percent {:.1} is above maximum {:.1}", stats.walkable_percent, options.max_walkable_percent),
        });
    }
    if stats.room_count < options.min_rooms {
        issues.push(Issue {
            kind: "insufficient_rooms",
            severity: Severity::Error,
            message: format!("room_count {} is below minimum {}", stats.room_count, options.min_rooms),
        });
    }
    let regions = find_disconnected_regions(grid);
    if regions.len() > 1 {
        issues.push(Issue {
            kind: "disconnected_regions",
            severity: Severity::Error,
            message: format!("grid has {} disconnected walkable components", regions.len()),
        });
    }
    if stats.isolated_rooms > 0 {
        issues.push(Issue {
            kind: "isolated_rooms",
            severity: if options.isolated_rooms_is_error { Severity::Error } else { Severity::Warning },
            message: format!("{} room(s) have no adjacency-graph edges", stats.isolated_rooms),
        });
    }
    if stats.dead_ends > 0 {
        issues.push(Issue {
            kind: "dead_ends",
            severity: if stats.dead_ends > options.max_dead_ends { Severity::Warning } else { Severity::Info },
            message: format!("{} dead-end corridor tile(s) found", stats.dead_ends),
        });
    }
    let graph = analyze_connectivity(grid, options.min_room_size);
    let tiny_rooms = graph.rooms.iter().filter(|r| r.size_class == RoomSizeClass::Tiny).count();
    if tiny_rooms > 0 {
        issues.push(Issue {
            kind: "tiny_rooms",
            severity: Severity::Info,
            message: format!("{} room(s) are smaller than {} tiles", tiny_rooms, options.min_room_size),
        });
    }

    let valid = !issues.iter().any(|i| i.severity == Severity::Error);
    ValidationReport { valid, stats, issues }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{generate_bsp, BspConfig};

    #[test]
    fn empty_grid_is_invalid_with_empty_dungeon_error() {
        let grid: Grid<Tile> = Grid::new(16, 16);
        let report = validate_dungeon(&grid, &ValidationOptions::default());
        assert!(!report.valid);
        assert!(report.issues.iter().any(|i| i.kind == "empty_dungeon" && i.severity == Severity::Error));
    }

    #[test]
    fn well_formed_bsp_dungeon_has_no_errors() {
        let grid = generate_bsp(32, 12345, BspConfig::default()).unwrap();
        let report = validate_dungeon(&grid, &ValidationOptions::default());
        assert!(!report.issues.iter().any(|i| i.severity == Severity::Error), "unexpected errors: {:?}", report.issues);
        assert!(report.valid);
    }

    #[test]
    fn disconnected_regions_flagged_as_error() {
        let mut grid: Grid<Tile> = Grid::new(16, 16);
        grid.fill(Tile::Wall);
        grid.set(1, 1, Tile::Floor);
        grid.set(2, 1, Tile::Floor);
        grid.set(10, 10, Tile::Floor);
        grid.set(11, 10, Tile::Floor);
        let report = validate_dungeon(&grid, &ValidationOptions { min_room_size: 1, ..Default::default() });
        assert!(report.issues.iter().any(|i| i.kind == "disconnected_regions"));
        assert!(!report.valid);
    }
}
