//! Poisson-disk room placement generator (§4.4): rejection-sampled room
//! centers at a guaranteed minimum spacing, each stamped with a shape from
//! the shape library, then stitched together with L-shaped corridors in
//! nearest-neighbor order.

use crate::shapes::{generate_room_shape, RoomShape, ShapeOptions};
use crate::{Algorithm, Grid, Point, Rect, Rng, Tile};

#[derive(Debug, Clone)]
pub struct PoissonConfig {
    pub min_distance: f64,
    pub room_size_min: usize,
    pub room_size_max: usize,
    pub max_attempts_per_point: usize,
    pub use_shapes: bool,
}

impl Default for PoissonConfig {
    fn default() -> Self {
        Self {
            min_distance: 8.0,
            room_size_min: 4,
            room_size_max: 8,
            max_attempts_per_point: 30,
            use_shapes: true,
        }
    }
}

pub struct Poisson {
    config: PoissonConfig,
}

impl Poisson {
    pub fn new(config: PoissonConfig) -> Self {
        Self { config }
    }
}

impl Default for Poisson {
    fn default() -> Self {
        Self::new(PoissonConfig::default())
    }
}

/// Bridson-style rejection sampling within `(width, height)`.
fn sample_points(width: usize, height: usize, min_dist: f64, attempts: usize, rng: &mut Rng) -> Vec<(f64, f64)> {
    let cell_size = min_dist / std::f64::consts::SQRT_2;
    let grid_w = (width as f64 / cell_size).ceil() as usize + 1;
    let grid_h = (height as f64 / cell_size).ceil() as usize + 1;

    let mut cells: Vec<Option<(f64, f64)>> = vec![None; grid_w * grid_h];
    let mut points = Vec::new();
    let mut active = Vec::new();

    let start = (rng.random() * width as f64, rng.random() * height as f64);
    let (gi, gj) = ((start.0 / cell_size) as usize, (start.1 / cell_size) as usize);
    cells[gj * grid_w + gi] = Some(start);
    points.push(start);
    active.push(start);

    while !active.is_empty() {
        let idx = rng.range_usize(0, active.len());
        let point = active[idx];
        let mut found = false;

        for _ in 0..attempts {
            let angle = rng.random() * std::f64::consts::TAU;
            let dist = min_dist + rng.random() * min_dist;
            let (nx, ny) = (point.0 + angle.cos() * dist, point.1 + angle.sin() * dist);
            if nx < 0.0 || nx >= width as f64 || ny < 0.0 || ny >= height as f64 {
                continue;
            }
            let (gi, gj) = ((nx / cell_size) as usize, (ny / cell_size) as usize);
            let mut valid = true;
            'outer: for dy in 0..=2 {
                for dx in 0..=2 {
                    let ci = gi.saturating_sub(1) + dx;
                    let cj = gj.saturating_sub(1) + dy;
                    if ci < grid_w && cj < grid_h {
                        if let Some(p) = cells[cj * grid_w + ci] {
                            if ((nx - p.0).powi(2) + (ny - p.1).powi(2)).sqrt() < min_dist {
                                valid = false;
                                break 'outer;
                            }
                        }
                    }
                }
            }
            if valid {
                cells[gj * grid_w + gi] = Some((nx, ny));
                points.push((nx, ny));
                active.push((nx, ny));
                found = true;
                break;
            }
        }
        if !found {
            active.swap_remove(idx);
        }
    }
    points
}

impl Algorithm<Tile> for Poisson {
    fn generate(&self, grid: &mut Grid<Tile>, seed: u64) {
        let mut rng = Rng::new(seed);
        let (w, h) = (grid.width(), grid.height());
        grid.fill(Tile::Wall);

        let raw_points = sample_points(w - 2, h - 2, self.config.min_distance, self.config.max_attempts_per_point, &mut rng);
        let options = ShapeOptions::default();

        let mut centers = Vec::new();
        for (px, py) in raw_points {
            let size = rng.range_usize(self.config.room_size_min, self.config.room_size_max + 1);
            let cx = (px as usize + 1).clamp(1, w.saturating_sub(size + 2));
            let cy = (py as usize + 1).clamp(1, h.saturating_sub(size + 2));
            let rect = Rect::new(cx as i32, cy as i32, size, size);
            if !grid.in_bounds_point(Point::new(rect.x + rect.width as i32, rect.y + rect.height as i32)) {
                continue;
            }
            let shape = if self.config.use_shapes {
                generate_room_shape(rect, &options, &mut rng)
            } else {
                RoomShape::Rectangle { rect }
            };
            for p in shape.tiles() {
                grid.set_point(p, Tile::Floor);
            }
            centers.push(shape.center());
        }

        connect_nearest(grid, &centers, &mut rng);
        grid.fill_border(Tile::Wall);
    }

    fn name(&self) -> &'static str {
        "Poisson"
    }
}

/// Minimum-spanning-tree style stitching: grow a connected set by always
/// linking the nearest not-yet-linked center to it.
fn connect_nearest(grid: &mut Grid<Tile>, centers: &[Point], rng: &mut Rng) {
    if centers.len() < 2 {
        return;
    }
    let mut linked = vec![0usize];
    let mut remaining: Vec<usize> = (1..centers.len()).collect();

    while !remaining.is_empty() {
        let mut best: Option<(usize, usize, i32)> = None;
        for &l in &linked {
            for (ri, &r) in remaining.iter().enumerate() {
                let dist = centers[l].manhattan(centers[r]);
                if best.map(|(_, _, d)| dist < d).unwrap_or(true) {
                    best = Some((l, ri, dist));
                }
            }
        }
        if let Some((from, ri, _)) = best {
            let to = remaining.remove(ri);
            crate::grid::l_corridor(grid, centers[from], centers[to], rng.chance(0.5), Tile::Corridor);
            linked.push(to);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poisson_places_rooms() {
        let mut grid: Grid<Tile> = Grid::new(60, 60);
        Poisson::default().generate(&mut grid, 12345);
        assert!(grid.count(|t| t.is_floor()) > 0);
    }

    #[test]
    fn poisson_is_deterministic() {
        let mut g1: Grid<Tile> = Grid::new(50, 50);
        let mut g2: Grid<Tile> = Grid::new(50, 50);
        Poisson::default().generate(&mut g1, 7);
        Poisson::default().generate(&mut g2, 7);
        assert_eq!(g1, g2);
    }

    #[test]
    fn poisson_rooms_are_connected() {
        let mut grid: Grid<Tile> = Grid::new(70, 70);
        Poisson::default().generate(&mut grid, 3);
        let regions = grid.flood_regions();
        assert_eq!(regions.len(), 1);
    }
}
