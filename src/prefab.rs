//! Prefab system (§4.6): hand-authored room templates with connection
//! points, placed onto a generated grid under rotation/mirror transforms.

use crate::{Grid, Point, Rect, Rng, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardinalDirection {
    North,
    East,
    South,
    West,
}

impl CardinalDirection {
    fn rotate_cw(self) -> Self {
        match self {
            CardinalDirection::North => CardinalDirection::East,
            CardinalDirection::East => CardinalDirection::South,
            CardinalDirection::South => CardinalDirection::West,
            CardinalDirection::West => CardinalDirection::North,
        }
    }

    fn mirror(self) -> Self {
        match self {
            CardinalDirection::East => CardinalDirection::West,
            CardinalDirection::West => CardinalDirection::East,
            other => other,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::North => (0, -1),
            CardinalDirection::South => (0, 1),
            CardinalDirection::East => (1, 0),
            CardinalDirection::West => (-1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Connection {
    pub x: usize,
    pub y: usize,
    pub direction: CardinalDirection,
}

#[derive(Debug, Clone)]
pub struct Prefab {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Tile>,
    pub connections: Vec<Connection>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub min_level: u32,
    pub max_level: u32,
    pub weight: f64,
    pub allowed_rotations: Vec<u16>,
}

impl Prefab {
    /// Builds a prefab from ASCII rows: `#` wall, `.` floor, `+` door, `~` water.
    pub fn from_pattern(name: &str, pattern: &[&str]) -> Self {
        let height = pattern.len();
        let width = pattern.first().map(|s| s.chars().count()).unwrap_or(0);
        let tiles = pattern
            .iter()
            .flat_map(|row| {
                row.chars().map(|c| match c {
                    '.' => Tile::Floor,
                    '+' => Tile::Door,
                    '~' => Tile::Water,
                    _ => Tile::Wall,
                })
            })
            .collect();
        Self {
            name: name.to_string(),
            width,
            height,
            tiles,
            connections: Vec::new(),
            categories: Vec::new(),
            tags: Vec::new(),
            min_level: 0,
            max_level: u32::MAX,
            weight: 1.0,
            allowed_rotations: vec![0, 90, 180, 270],
        }
    }

    pub fn with_connection(mut self, x: usize, y: usize, direction: CardinalDirection) -> Self {
        self.connections.push(Connection { x, y, direction });
        self
    }

    pub fn with_categories(mut self, categories: &[&str]) -> Self {
        self.categories = categories.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|s| s.to_string()).collect();
        self
    }

    fn get(&self, x: usize, y: usize) -> Tile {
        self.tiles[y * self.width + x]
    }
}

/// A transformed, placement-ready prefab.
#[derive(Debug, Clone)]
pub struct TransformedPrefab {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Tile>,
    pub connections: Vec<Connection>,
}

impl TransformedPrefab {
    fn get(&self, x: usize, y: usize) -> Tile {
        self.tiles[y * self.width + x]
    }
}

/// Rotates a `width × height` tile buffer 90° clockwise: `new[x][h-1-y] = old[y][x]`.
pub fn rotate_grid(tiles: &[Tile], width: usize, height: usize) -> (Vec<Tile>, usize, usize) {
    let mut out = vec![Tile::Wall; width * height];
    for y in 0..height {
        for x in 0..width {
            let nx = height - 1 - y;
            let ny = x;
            out[ny * height + nx] = tiles[y * width + x];
        }
    }
    (out, height, width)
}

/// Reverses every row.
pub fn mirror_grid(tiles: &[Tile], width: usize, height: usize) -> Vec<Tile> {
    let mut out = tiles.to_vec();
    for y in 0..height {
        out[y * width..(y + 1) * width].reverse();
    }
    out
}

/// Rotation composes to `rotation / 90` applications of [`rotate_grid`];
/// mirror (reversing rows) is applied after rotation, as is the
/// connection-direction remap (`N→E→S→W→N` per 90°, `E↔W` on mirror).
pub fn transform_prefab(prefab: &Prefab, rotation: u16, mirror: bool) -> TransformedPrefab {
    let steps = (rotation / 90) % 4;
    let (mut tiles, mut width, mut height) = (prefab.tiles.clone(), prefab.width, prefab.height);
    let mut connections: Vec<Connection> = prefab.connections.clone();

    for _ in 0..steps {
        let (rotated, w, h) = rotate_grid(&tiles, width, height);
        tiles = rotated;
        width = w;
        height = h;
        connections = connections
            .iter()
            .map(|c| Connection {
                x: width - 1 - c.y,
                y: c.x,
                direction: c.direction.rotate_cw(),
            })
            .collect();
    }

    if mirror {
        tiles = mirror_grid(&tiles, width, height);
        connections = connections
            .iter()
            .map(|c| Connection { x: width - 1 - c.x, y: c.y, direction: c.direction.mirror() })
            .collect();
    }

    TransformedPrefab { width, height, tiles, connections }
}

#[derive(Debug, Clone)]
pub struct PlacedPrefab {
    pub name: String,
    pub bounds: Rect,
}

#[derive(Debug, Clone, Default)]
pub struct PrefabPlacementResult {
    pub placed: Vec<PlacedPrefab>,
    pub failed_prefabs: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PrefabOptions {
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub level: u32,
    pub max_prefabs: usize,
    pub padding: i32,
    pub min_distance: i32,
    pub ensure_connectivity: bool,
}

impl Default for PrefabOptions {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            tags: Vec::new(),
            level: 0,
            max_prefabs: 3,
            padding: 1,
            min_distance: 5,
            ensure_connectivity: true,
        }
    }
}

fn filter_prefabs<'a>(prefabs: &'a [Prefab], options: &PrefabOptions) -> Vec<&'a Prefab> {
    prefabs
        .iter()
        .filter(|p| options.categories.is_empty() || p.categories.iter().any(|c| options.categories.contains(c)))
        .filter(|p| options.tags.is_empty() || p.tags.iter().any(|t| options.tags.contains(t)))
        .filter(|p| (p.min_level..=p.max_level).contains(&options.level))
        .collect()
}

fn footprint_rect(x: i32, y: i32, w: usize, h: usize, padding: i32) -> Rect {
    Rect::new(x - padding, y - padding, w + (2 * padding) as usize, h + (2 * padding) as usize)
}

fn expanded_overlaps(a: &Rect, b: &Rect, expand: i32) -> bool {
    a.intersects(&b.expanded(expand))
}

fn fits_all_wall(grid: &Grid<Tile>, x: i32, y: i32, w: usize, h: usize) -> bool {
    for dy in 0..h as i32 {
        for dx in 0..w as i32 {
            if grid.get(x + dx, y + dy) != Some(&Tile::Wall) {
                return false;
            }
        }
    }
    true
}

fn stamp(grid: &mut Grid<Tile>, transformed: &TransformedPrefab, x: i32, y: i32) {
    for ty in 0..transformed.height {
        for tx in 0..transformed.width {
            grid.set(x + tx as i32, y + ty as i32, transformed.get(tx, ty));
        }
    }
}

fn extend_connections(grid: &mut Grid<Tile>, transformed: &TransformedPrefab, x: i32, y: i32) {
    for conn in &transformed.connections {
        let (dx, dy) = conn.direction.delta();
        let (mut cx, mut cy) = (x + conn.x as i32 + dx, y + conn.y as i32 + dy);
        for _ in 0..10 {
            match grid.get(cx, cy) {
                Some(Tile::Floor) | Some(Tile::Corridor) => break,
                Some(Tile::Wall) => {
                    grid.set(cx, cy, Tile::Corridor);
                    cx += dx;
                    cy += dy;
                }
                _ => break,
            }
        }
    }
}

/// Unchecked placement: still requires the padded footprint to be all WALL.
pub fn place_prefab_at(grid: &mut Grid<Tile>, prefab: &Prefab, pos: Point, rotation: u16, mirror: bool) -> Option<PlacedPrefab> {
    let transformed = transform_prefab(prefab, rotation, mirror);
    if !fits_all_wall(grid, pos.x, pos.y, transformed.width, transformed.height) {
        return None;
    }
    stamp(grid, &transformed, pos.x, pos.y);
    Some(PlacedPrefab { name: prefab.name.clone(), bounds: Rect::new(pos.x, pos.y, transformed.width, transformed.height) })
}

pub fn place_prefabs(grid: &mut Grid<Tile>, prefabs: &[Prefab], options: &PrefabOptions, seed: u64) -> PrefabPlacementResult {
    let mut rng = Rng::new(seed);
    let mut result = PrefabPlacementResult::default();
    let candidates = filter_prefabs(prefabs, options);
    if candidates.is_empty() {
        return result;
    }

    let budget = options.max_prefabs * 10;
    let mut attempts = 0;
    while result.placed.len() < options.max_prefabs && attempts < budget {
        attempts += 1;

        let weights: Vec<f64> = candidates.iter().map(|p| p.weight).collect();
        let prefab = match rng.weighted(&weights) {
            Some(i) => candidates[i],
            None => candidates[0],
        };
        let rotation = *rng.pick(&prefab.allowed_rotations).unwrap_or(&0);
        let mirror = rng.chance(0.5);
        let transformed = transform_prefab(prefab, rotation, mirror);

        let mut valid_positions = Vec::new();
        let (gw, gh) = (grid.width(), grid.height());
        let mut y = 1i32;
        while (y as usize) + transformed.height + 1 < gh {
            let mut x = 1i32;
            while (x as usize) + transformed.width + 1 < gw {
                let footprint = footprint_rect(x, y, transformed.width, transformed.height, options.padding);
                if footprint.x >= 0
                    && footprint.y >= 0
                    && footprint.x as usize + footprint.width <= gw
                    && footprint.y as usize + footprint.height <= gh
                    && fits_all_wall(grid, x, y, transformed.width, transformed.height)
                    && !result.placed.iter().any(|p| expanded_overlaps(&footprint, &p.bounds, options.min_distance))
                {
                    valid_positions.push((x, y));
                }
                x += 2;
            }
            y += 2;
        }

        if valid_positions.is_empty() {
            result.failed_prefabs.push(prefab.name.clone());
            continue;
        }

        let &(x, y) = rng.pick(&valid_positions).unwrap();
        stamp(grid, &transformed, x, y);
        if options.ensure_connectivity {
            extend_connections(grid, &transformed, x, y);
        }
        result.placed.push(PlacedPrefab { name: prefab.name.clone(), bounds: Rect::new(x, y, transformed.width, transformed.height) });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_prefab() -> Prefab {
        Prefab::from_pattern(
            "shrine",
            &["#####", "#...#", "#.+.#", "#...#", "#####"],
        )
        .with_connection(2, 2, CardinalDirection::South)
    }

    #[test]
    fn rotate_grid_swaps_dimensions() {
        let tiles = vec![Tile::Floor, Tile::Wall, Tile::Wall, Tile::Wall, Tile::Wall, Tile::Wall];
        let (_, w, h) = rotate_grid(&tiles, 3, 2);
        assert_eq!((w, h), (2, 3));
    }

    #[test]
    fn transform_prefab_rotates_connection_direction() {
        let prefab = small_prefab();
        let transformed = transform_prefab(&prefab, 90, false);
        assert_eq!(transformed.connections[0].direction, CardinalDirection::West);
    }

    #[test]
    fn place_prefab_at_requires_all_wall_footprint() {
        let mut grid: Grid<Tile> = Grid::new(20, 20);
        let prefab = small_prefab();
        let placed = place_prefab_at(&mut grid, &prefab, Point::new(2, 2), 0, false);
        assert!(placed.is_some());
        let second = place_prefab_at(&mut grid, &prefab, Point::new(2, 2), 0, false);
        assert!(second.is_none());
    }

    #[test]
    fn s3_prefab_placement_on_all_wall_grid() {
        let mut grid: Grid<Tile> = Grid::new(64, 64);
        grid.fill(Tile::Wall);
        let shrine = Prefab::from_pattern("shrine_room", &["#######", "#.....#", "#.....#", "#..+..#", "#.....#", "#.....#", "#######"]);
        let treasure = Prefab::from_pattern("treasure_room", &["#######", "#.....#", "#.....#", "#.....#", "#..+..#", "#.....#", "#######"]);
        let options = PrefabOptions { max_prefabs: 2, min_distance: 1, ..Default::default() };
        let result = place_prefabs(&mut grid, &[shrine, treasure], &options, 12345);
        assert!(!result.placed.is_empty());
        for placed in &result.placed {
            assert!(placed.bounds.x >= 0 && placed.bounds.y >= 0);
            assert!(placed.bounds.x as usize + placed.bounds.width <= grid.width());
            assert!(placed.bounds.y as usize + placed.bounds.height <= grid.height());
        }
    }

    #[test]
    fn place_prefabs_respects_max_and_spacing() {
        let mut grid: Grid<Tile> = Grid::new(60, 60);
        let prefabs = vec![small_prefab()];
        let options = PrefabOptions { max_prefabs: 3, min_distance: 2, ..Default::default() };
        let result = place_prefabs(&mut grid, &prefabs, &options, 42);
        assert!(result.placed.len() <= 3);
        for (i, a) in result.placed.iter().enumerate() {
            for b in result.placed.iter().skip(i + 1) {
                assert!(!a.bounds.expanded(options.min_distance).intersects(&b.bounds));
            }
        }
    }
}
