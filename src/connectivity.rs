//! Connectivity analysis and pathfinding (§4.7): connected-component
//! discovery over the walkable tile set, A* point-to-point pathfinding,
//! and room-level segmentation with a room-adjacency graph.

use crate::{Grid, Point, Tile};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

/// Tiles a caller can walk across by default; callers may extend this set
/// when calling the `_where` variants on [`Grid`].
pub fn is_walkable(tile: &Tile) -> bool {
    tile.is_walkable()
}

pub fn find_walkable_tiles(grid: &Grid<Tile>) -> Vec<(usize, usize)> {
    grid.iter().filter(|(_, _, t)| is_walkable(t)).map(|(x, y, _)| (x, y)).collect()
}

pub fn flood_fill(grid: &Grid<Tile>, start: (usize, usize)) -> Vec<(usize, usize)> {
    grid.flood_fill_where(start.0, start.1, is_walkable)
}

pub fn find_disconnected_regions(grid: &Grid<Tile>) -> Vec<Vec<(usize, usize)>> {
    grid.flood_regions_where(is_walkable)
}

pub fn is_fully_connected(grid: &Grid<Tile>) -> bool {
    find_disconnected_regions(grid).len() <= 1
}

#[derive(Debug, PartialEq)]
struct AstarNode {
    f: i32,
    g: i32,
    pos: (usize, usize),
}

impl Eq for AstarNode {}

impl Ord for AstarNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f)
    }
}

impl PartialOrd for AstarNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn manhattan(a: (usize, usize), b: (usize, usize)) -> i32 {
    (a.0 as i32 - b.0 as i32).abs() + (a.1 as i32 - b.1 as i32).abs()
}

/// A* search over cardinal neighbors. `None` is the "no path" signal,
/// distinguishable from `Some(vec![start])` (a zero-step path).
pub fn find_path(grid: &Grid<Tile>, start: (usize, usize), goal: (usize, usize)) -> Option<Vec<(usize, usize)>> {
    find_path_where(grid, start, goal, is_walkable)
}

/// Same as [`find_path`] but excludes a set of occupied tiles (other than
/// the goal itself) — used by the simulator to route around other units.
pub fn find_path_avoiding(
    grid: &Grid<Tile>,
    start: (usize, usize),
    goal: (usize, usize),
    occupied: &HashSet<(usize, usize)>,
) -> Option<Vec<(usize, usize)>> {
    find_path_impl(grid, start, goal, &is_walkable, Some(occupied))
}

fn find_path_where(
    grid: &Grid<Tile>,
    start: (usize, usize),
    goal: (usize, usize),
    passable: impl Fn(&Tile) -> bool,
) -> Option<Vec<(usize, usize)>> {
    find_path_impl(grid, start, goal, &passable, None)
}

fn find_path_impl(
    grid: &Grid<Tile>,
    start: (usize, usize),
    goal: (usize, usize),
    passable: &impl Fn(&Tile) -> bool,
    occupied: Option<&HashSet<(usize, usize)>>,
) -> Option<Vec<(usize, usize)>> {
    if start == goal {
        return Some(vec![start]);
    }

    let mut open = BinaryHeap::new();
    let mut g_score: HashMap<(usize, usize), i32> = HashMap::new();
    let mut parents: HashMap<(usize, usize), (usize, usize)> = HashMap::new();
    let mut closed: HashSet<(usize, usize)> = HashSet::new();

    g_score.insert(start, 0);
    open.push(AstarNode { f: manhattan(start, goal), g: 0, pos: start });

    while let Some(AstarNode { g, pos, .. }) = open.pop() {
        if pos == goal {
            let mut path = vec![pos];
            let mut cur = pos;
            while let Some(&p) = parents.get(&cur) {
                path.push(p);
                cur = p;
            }
            path.reverse();
            return Some(path);
        }
        if closed.contains(&pos) {
            continue;
        }
        closed.insert(pos);

        for (nx, ny) in grid.neighbors_4(pos.0, pos.1) {
            if !passable(&grid[(nx, ny)]) {
                continue;
            }
            if let Some(occ) = occupied {
                if occ.contains(&(nx, ny)) && (nx, ny) != goal {
                    continue;
                }
            }
            let tentative_g = g + 1;
            if tentative_g < *g_score.get(&(nx, ny)).unwrap_or(&i32::MAX) {
                g_score.insert((nx, ny), tentative_g);
                parents.insert((nx, ny), pos);
                open.push(AstarNode { f: tentative_g + manhattan((nx, ny), goal), g: tentative_g, pos: (nx, ny) });
            }
        }
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomSizeClass {
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomType {
    Generic,
    Entrance,
    Treasure,
    Guard,
    Storage,
    Throne,
    Barracks,
    Chapel,
}

#[derive(Debug, Clone)]
pub struct Room {
    pub id: usize,
    pub tiles: Vec<(usize, usize)>,
    pub bounds: crate::Rect,
    pub center: Point,
    pub area: usize,
    pub size_class: RoomSizeClass,
    pub room_type: RoomType,
    pub connected: bool,
}

#[derive(Debug, Clone)]
pub struct ConnectivityGraph {
    pub rooms: Vec<Room>,
    pub adjacency: HashMap<usize, Vec<usize>>,
}

fn size_class(area: usize) -> RoomSizeClass {
    match area {
        0..=8 => RoomSizeClass::Tiny,
        9..=24 => RoomSizeClass::Small,
        25..=63 => RoomSizeClass::Medium,
        64..=143 => RoomSizeClass::Large,
        _ => RoomSizeClass::Huge,
    }
}

/// Flood-fills FLOOR-only components into rooms (CORRIDOR tiles form the
/// connective tissue between them, not the rooms themselves), then finds
/// every pair of rooms touched by the same corridor/door blob.
pub fn analyze_connectivity(grid: &Grid<Tile>, min_room_size: usize) -> ConnectivityGraph {
    let floor_regions = grid.flood_regions_where(|t| t.is_floor());
    let mut rooms = Vec::new();
    for tiles in floor_regions {
        if tiles.len() < min_room_size {
            continue;
        }
        let xs: Vec<i32> = tiles.iter().map(|p| p.0 as i32).collect();
        let ys: Vec<i32> = tiles.iter().map(|p| p.1 as i32).collect();
        let (min_x, max_x) = (*xs.iter().min().unwrap(), *xs.iter().max().unwrap());
        let (min_y, max_y) = (*ys.iter().min().unwrap(), *ys.iter().max().unwrap());
        let bounds = crate::Rect::new(min_x, min_y, (max_x - min_x + 1) as usize, (max_y - min_y + 1) as usize);
        let area = tiles.len();
        rooms.push(Room {
            id: rooms.len(),
            center: bounds.center(),
            bounds,
            area,
            size_class: size_class(area),
            room_type: RoomType::Generic,
            connected: false,
            tiles,
        });
    }

    let mut owner: HashMap<(usize, usize), usize> = HashMap::new();
    for room in &rooms {
        for &t in &room.tiles {
            owner.insert(t, room.id);
        }
    }

    let is_connector = |t: &Tile| t.is_corridor() || t.is_door();
    let connector_blobs = grid.flood_regions_where(is_connector);

    let mut adjacency: HashMap<usize, Vec<usize>> = rooms.iter().map(|r| (r.id, Vec::new())).collect();
    for blob in connector_blobs {
        let mut touched: HashSet<usize> = HashSet::new();
        for &(x, y) in &blob {
            for (nx, ny) in grid.neighbors_4(x, y) {
                if let Some(&room_id) = owner.get(&(nx, ny)) {
                    touched.insert(room_id);
                }
            }
        }
        let touched: Vec<usize> = touched.into_iter().collect();
        for i in 0..touched.len() {
            for j in (i + 1)..touched.len() {
                adjacency.entry(touched[i]).or_default().push(touched[j]);
                adjacency.entry(touched[j]).or_default().push(touched[i]);
            }
        }
    }

    let solo = rooms.len() <= 1;
    for room in &mut rooms {
        room.connected = solo || adjacency.get(&room.id).map(|v| !v.is_empty()).unwrap_or(false);
    }

    ConnectivityGraph { rooms, adjacency }
}

/// BFS over the room-adjacency graph.
pub fn find_room_path(graph: &ConnectivityGraph, a: usize, b: usize) -> Option<Vec<usize>> {
    if a == b {
        return Some(vec![a]);
    }
    let mut visited = HashSet::new();
    let mut parents: HashMap<usize, usize> = HashMap::new();
    let mut queue = VecDeque::new();
    visited.insert(a);
    queue.push_back(a);

    while let Some(node) = queue.pop_front() {
        if node == b {
            let mut path = vec![b];
            let mut cur = b;
            while let Some(&p) = parents.get(&cur) {
                path.push(p);
                cur = p;
            }
            path.reverse();
            return Some(path);
        }
        for &next in graph.adjacency.get(&node).map(|v| v.as_slice()).unwrap_or(&[]) {
            if visited.insert(next) {
                parents.insert(next, node);
                queue.push_back(next);
            }
        }
    }
    None
}

pub struct ConnectivityStats {
    pub room_count: usize,
    pub connected_pairs: usize,
    pub fully_connected: bool,
}

pub fn get_connectivity_stats(graph: &ConnectivityGraph) -> ConnectivityStats {
    let connected_pairs: usize = graph.adjacency.values().map(|v| v.len()).sum::<usize>() / 2;
    let fully_connected = graph.rooms.len() <= 1
        || (0..graph.rooms.len()).all(|i| find_room_path(graph, 0, i).is_some());
    ConnectivityStats { room_count: graph.rooms.len(), connected_pairs, fully_connected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{generate_bsp, BspConfig};

    #[test]
    fn straight_corridor_has_direct_path() {
        let mut grid: Grid<Tile> = Grid::new(10, 5);
        grid.fill(Tile::Wall);
        for x in 1..9 {
            grid.set(x, 2, Tile::Floor);
        }
        let path = find_path(&grid, (1, 2), (8, 2)).unwrap();
        assert_eq!(path.len(), 8);
        assert_eq!(path.first(), Some(&(1, 2)));
        assert_eq!(path.last(), Some(&(8, 2)));
    }

    #[test]
    fn unreachable_goal_returns_none() {
        let mut grid: Grid<Tile> = Grid::new(10, 10);
        grid.fill(Tile::Wall);
        grid.set(1, 1, Tile::Floor);
        grid.set(8, 8, Tile::Floor);
        assert!(find_path(&grid, (1, 1), (8, 8)).is_none());
    }

    #[test]
    fn s4_astar_around_interior_pillar() {
        let mut grid: Grid<Tile> = Grid::new(10, 10);
        grid.fill(Tile::Wall);
        for y in 2..=8 {
            for x in 2..=8 {
                let on_ring = x == 2 || x == 8 || y == 2 || y == 8;
                if on_ring {
                    grid.set(x, y, Tile::Floor);
                }
            }
        }
        for y in 3..8 {
            for x in 3..8 {
                grid.set(x, y, Tile::Floor);
            }
        }
        grid.set(5, 5, Tile::Wall);
        grid.set(1, 1, Tile::Floor);
        grid.set(2, 1, Tile::Floor);
        grid.set(8, 8, Tile::Floor);

        let path = find_path(&grid, (1, 1), (8, 8)).unwrap();
        assert!(path.len() <= 30);
        for &(x, y) in &path {
            assert_ne!(grid[(x, y)], Tile::Wall);
        }
    }

    #[test]
    fn bsp_dungeon_rooms_are_all_connected() {
        let grid = generate_bsp(32, 12345, BspConfig::default()).unwrap();
        let graph = analyze_connectivity(&grid, 4);
        assert!(!graph.rooms.is_empty());
        let stats = get_connectivity_stats(&graph);
        assert!(stats.fully_connected);
    }
}
