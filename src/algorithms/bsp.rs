//! Binary space partitioning dungeon generator (§4.4).

use crate::shapes::{generate_room_shape, RoomShape, ShapeOptions};
use crate::{Algorithm, Grid, Point, Rect, Rng, Tile};

#[derive(Debug, Clone)]
pub struct BspConfig {
    pub min_room_size: usize,
    pub min_split_size: usize,
    pub padding: usize,
    pub max_depth: usize,
    pub door_chance: f64,
    pub use_shapes: bool,
}

impl Default for BspConfig {
    fn default() -> Self {
        Self {
            min_room_size: 4,
            min_split_size: 6,
            padding: 1,
            max_depth: 6,
            door_chance: 0.4,
            use_shapes: true,
        }
    }
}

pub struct Bsp {
    config: BspConfig,
}

impl Bsp {
    pub fn new(config: BspConfig) -> Self {
        Self { config }
    }
}

impl Default for Bsp {
    fn default() -> Self {
        Self::new(BspConfig::default())
    }
}

struct BspNode {
    rect: Rect,
    left: Option<Box<BspNode>>,
    right: Option<Box<BspNode>>,
    shape: Option<RoomShape>,
}

impl BspNode {
    fn new(rect: Rect) -> Self {
        Self { rect, left: None, right: None, shape: None }
    }

    fn split(&mut self, rng: &mut Rng, min_split: usize, depth: usize, max_depth: usize) {
        if depth >= max_depth || self.rect.width < min_split * 2 || self.rect.height < min_split * 2 {
            return;
        }

        let aspect = self.rect.width as f64 / self.rect.height as f64;
        let horizontal = if aspect > 1.25 {
            false
        } else if 1.0 / aspect > 1.25 {
            true
        } else {
            rng.chance(0.5)
        };

        if horizontal {
            if self.rect.height < min_split * 2 {
                return;
            }
            let split = rng.range(min_split as i32, (self.rect.height - min_split) as i32 + 1);
            let top = Rect::new(self.rect.x, self.rect.y, self.rect.width, split as usize);
            let bottom = Rect::new(
                self.rect.x,
                self.rect.y + split,
                self.rect.width,
                self.rect.height - split as usize,
            );
            self.left = Some(Box::new(BspNode::new(top)));
            self.right = Some(Box::new(BspNode::new(bottom)));
        } else {
            if self.rect.width < min_split * 2 {
                return;
            }
            let split = rng.range(min_split as i32, (self.rect.width - min_split) as i32 + 1);
            let left = Rect::new(self.rect.x, self.rect.y, split as usize, self.rect.height);
            let right = Rect::new(
                self.rect.x + split,
                self.rect.y,
                self.rect.width - split as usize,
                self.rect.height,
            );
            self.left = Some(Box::new(BspNode::new(left)));
            self.right = Some(Box::new(BspNode::new(right)));
        }

        if let Some(l) = self.left.as_mut() {
            l.split(rng, min_split, depth + 1, max_depth);
        }
        if let Some(r) = self.right.as_mut() {
            r.split(rng, min_split, depth + 1, max_depth);
        }
    }

    fn create_rooms(&mut self, config: &BspConfig, options: &ShapeOptions, rng: &mut Rng) {
        if self.left.is_some() || self.right.is_some() {
            if let Some(l) = self.left.as_mut() {
                l.create_rooms(config, options, rng);
            }
            if let Some(r) = self.right.as_mut() {
                r.create_rooms(config, options, rng);
            }
            return;
        }

        let pad = config.padding as i32;
        let max_w = self.rect.width.saturating_sub(2 * config.padding);
        let max_h = self.rect.height.saturating_sub(2 * config.padding);
        if max_w < config.min_room_size || max_h < config.min_room_size {
            return;
        }
        let w = rng.range_usize(config.min_room_size, max_w + 1);
        let h = rng.range_usize(config.min_room_size, max_h + 1);
        let x = self.rect.x + pad + rng.range(0, (max_w - w) as i32 + 1);
        let y = self.rect.y + pad + rng.range(0, (max_h - h) as i32 + 1);
        let room_rect = Rect::new(x, y, w, h);

        let shape = if config.use_shapes {
            generate_room_shape(room_rect, options, rng)
        } else {
            RoomShape::Rectangle { rect: room_rect }
        };
        self.shape = Some(shape);
    }

    fn draw(&self, grid: &mut Grid<Tile>) {
        if let Some(shape) = &self.shape {
            for p in shape.tiles() {
                grid.set_point(p, Tile::Floor);
            }
        }
        if let Some(l) = &self.left {
            l.draw(grid);
        }
        if let Some(r) = &self.right {
            r.draw(grid);
        }
    }

    /// Returns the best connection point for the subtree: the shape tile
    /// (of whichever leaf) closest to `target`.
    fn best_connection_point(&self, target: Point) -> Option<Point> {
        if let Some(shape) = &self.shape {
            return shape
                .tiles()
                .into_iter()
                .min_by_key(|p| p.manhattan(target));
        }
        let l = self.left.as_ref().and_then(|n| n.best_connection_point(target));
        let r = self.right.as_ref().and_then(|n| n.best_connection_point(target));
        match (l, r) {
            (Some(a), Some(b)) => Some(if a.manhattan(target) <= b.manhattan(target) { a } else { b }),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }

    fn center(&self) -> Option<Point> {
        if let Some(shape) = &self.shape {
            return Some(shape.center());
        }
        self.left
            .as_ref()
            .and_then(|n| n.center())
            .or_else(|| self.right.as_ref().and_then(|n| n.center()))
    }

    fn connect(&self, grid: &mut Grid<Tile>, rng: &mut Rng) {
        if let (Some(l), Some(r)) = (&self.left, &self.right) {
            l.connect(grid, rng);
            r.connect(grid, rng);
            if let (Some(lc), Some(rc)) = (l.center(), r.center()) {
                let from = l.best_connection_point(rc).unwrap_or(lc);
                let to = r.best_connection_point(lc).unwrap_or(rc);
                crate::grid::l_corridor(grid, from, to, rng.chance(0.5), Tile::Corridor);
            }
        }
    }
}

/// Converts thin CORRIDOR spans (length ≤ 2, abutting FLOOR) into DOOR tiles.
fn place_doors(grid: &mut Grid<Tile>, chance: f64, rng: &mut Rng) {
    let (w, h) = (grid.width(), grid.height());
    let mut candidates = Vec::new();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            if grid[(x, y)] != Tile::Corridor {
                continue;
            }
            let h_span = grid[(x - 1, y)] == Tile::Wall && grid[(x + 1, y)] == Tile::Wall;
            let v_span = grid[(x, y - 1)] == Tile::Wall && grid[(x, y + 1)] == Tile::Wall;
            let abuts_floor = grid.neighbors_4(x, y).iter().any(|&(nx, ny)| grid[(nx, ny)] == Tile::Floor);
            if (h_span || v_span) && abuts_floor {
                candidates.push((x, y));
            }
        }
    }
    for (x, y) in candidates {
        if rng.chance(chance) {
            grid.set(x as i32, y as i32, Tile::Door);
        }
    }
}

impl Algorithm<Tile> for Bsp {
    fn generate(&self, grid: &mut Grid<Tile>, seed: u64) {
        let mut rng = Rng::new(seed);
        grid.fill(Tile::Wall);

        let interior = Rect::new(1, 1, grid.width() - 2, grid.height() - 2);
        let mut root = BspNode::new(interior);
        root.split(&mut rng, self.config.min_split_size, 0, self.config.max_depth);

        let options = ShapeOptions::default();
        root.create_rooms(&self.config, &options, &mut rng);
        root.draw(grid);
        root.connect(grid, &mut rng);

        place_doors(grid, self.config.door_chance, &mut rng);
        grid.fill_border(Tile::Wall);
    }

    fn name(&self) -> &'static str {
        "BSP"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bsp_creates_rooms_and_keeps_border() {
        let mut grid: Grid<Tile> = Grid::new(50, 50);
        Bsp::default().generate(&mut grid, 12345);
        assert!(grid.count(|t| t.is_floor()) > 0);
        for x in 0..50 {
            assert!(grid[(x, 0)].is_wall());
            assert!(grid[(x, 49)].is_wall());
        }
        for y in 0..50 {
            assert!(grid[(0, y)].is_wall());
            assert!(grid[(49, y)].is_wall());
        }
    }

    #[test]
    fn bsp_is_deterministic() {
        let mut g1: Grid<Tile> = Grid::new(40, 40);
        let mut g2: Grid<Tile> = Grid::new(40, 40);
        Bsp::default().generate(&mut g1, 42);
        Bsp::default().generate(&mut g2, 42);
        assert_eq!(g1, g2);
    }

    #[test]
    fn bsp_s1_is_connected_and_dense_enough() {
        let mut grid: Grid<Tile> = Grid::new(32, 32);
        Bsp::default().generate(&mut grid, 12345);
        let floor_pct = grid.count(|t| t.is_walkable()) as f64 / (32.0 * 32.0) * 100.0;
        assert!(floor_pct >= 10.0 && floor_pct <= 60.0, "walkable% = {floor_pct}");
        let regions = grid.flood_regions();
        assert_eq!(regions.len(), 1, "BSP should be fully connected");
    }
}
