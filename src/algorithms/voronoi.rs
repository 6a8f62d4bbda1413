//! Voronoi-cell room generator (§4.4): Manhattan-distance cell assignment,
//! relaxation erosion at cell boundaries, and MST-style corridor stitching.

use crate::{Algorithm, Grid, Point, Rng, Tile};

#[derive(Debug, Clone)]
pub struct VoronoiConfig {
    pub num_points: usize,
    pub relaxation_iterations: usize,
    pub room_chance: f64,
}

impl Default for VoronoiConfig {
    fn default() -> Self {
        Self {
            num_points: 12,
            relaxation_iterations: 1,
            room_chance: 0.6,
        }
    }
}

pub struct Voronoi {
    config: VoronoiConfig,
}

impl Voronoi {
    pub fn new(config: VoronoiConfig) -> Self {
        Self { config }
    }
}

impl Default for Voronoi {
    fn default() -> Self {
        Self::new(VoronoiConfig::default())
    }
}

fn nearest_cell(x: usize, y: usize, points: &[(usize, usize)]) -> usize {
    points
        .iter()
        .enumerate()
        .min_by_key(|(_, &(px, py))| {
            (x as i32 - px as i32).unsigned_abs() + (y as i32 - py as i32).unsigned_abs()
        })
        .map(|(i, _)| i)
        .unwrap()
}

/// Lloyd-style relaxation: recenter each point on its region's centroid.
fn relax(points: &mut [(usize, usize)], w: usize, h: usize) {
    let mut sums = vec![(0i64, 0i64, 0i64); points.len()];
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let i = nearest_cell(x, y, points);
            sums[i].0 += x as i64;
            sums[i].1 += y as i64;
            sums[i].2 += 1;
        }
    }
    for (i, p) in points.iter_mut().enumerate() {
        if sums[i].2 > 0 {
            *p = (
                (sums[i].0 / sums[i].2).clamp(1, w as i64 - 2) as usize,
                (sums[i].1 / sums[i].2).clamp(1, h as i64 - 2) as usize,
            );
        }
    }
}

impl Algorithm<Tile> for Voronoi {
    fn generate(&self, grid: &mut Grid<Tile>, seed: u64) {
        let mut rng = Rng::new(seed);
        let (w, h) = (grid.width(), grid.height());
        grid.fill(Tile::Wall);

        let n = self.config.num_points.max(1);
        let mut points: Vec<(usize, usize)> = (0..n)
            .map(|_| (rng.range_usize(1, w - 1), rng.range_usize(1, h - 1)))
            .collect();

        for _ in 0..self.config.relaxation_iterations {
            relax(&mut points, w, h);
        }

        let is_room: Vec<bool> = (0..n).map(|_| rng.chance(self.config.room_chance)).collect();

        let mut cell_of = vec![vec![0usize; h]; w];
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let i = nearest_cell(x, y, &points);
                cell_of[x][y] = i;
                if is_room[i] {
                    grid.set(x as i32, y as i32, Tile::Floor);
                }
            }
        }

        // erode boundary tiles between two different room cells so seams
        // don't look perfectly straight
        let mut erode = Vec::new();
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                if !grid[(x, y)].is_floor() {
                    continue;
                }
                let on_boundary = grid
                    .neighbors_4(x, y)
                    .iter()
                    .any(|&(nx, ny)| cell_of[nx][ny] != cell_of[x][y]);
                if on_boundary {
                    erode.push((x, y));
                }
            }
        }
        for (x, y) in erode {
            if rng.chance(0.15) {
                grid.set(x as i32, y as i32, Tile::Wall);
            }
        }

        connect_cells(grid, &points, &is_room, &mut rng);
        grid.fill_border(Tile::Wall);
    }

    fn name(&self) -> &'static str {
        "Voronoi"
    }
}

/// Minimum-spanning-tree style connection: repeatedly link the closest
/// not-yet-linked room cell to the linked set with an L-shaped corridor.
fn connect_cells(grid: &mut Grid<Tile>, points: &[(usize, usize)], is_room: &[bool], rng: &mut Rng) {
    let rooms: Vec<usize> = (0..points.len()).filter(|&i| is_room[i]).collect();
    if rooms.len() < 2 {
        return;
    }
    let mut linked = vec![rooms[0]];
    let mut remaining: Vec<usize> = rooms[1..].to_vec();

    while !remaining.is_empty() {
        let mut best: Option<(usize, usize, i32)> = None;
        for &l in &linked {
            for (ri, &r) in remaining.iter().enumerate() {
                let (lx, ly) = points[l];
                let (rx, ry) = points[r];
                let dist = (lx as i32 - rx as i32).abs() + (ly as i32 - ry as i32).abs();
                if best.map(|(_, _, d)| dist < d).unwrap_or(true) {
                    best = Some((l, ri, dist));
                }
            }
        }
        if let Some((from, ri, _)) = best {
            let to = remaining.remove(ri);
            let (fx, fy) = points[from];
            let (tx, ty) = points[to];
            crate::grid::l_corridor(grid, Point::new(fx as i32, fy as i32), Point::new(tx as i32, ty as i32), rng.chance(0.5), Tile::Corridor);
            linked.push(to);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voronoi_creates_regions() {
        let mut grid: Grid<Tile> = Grid::new(50, 50);
        Voronoi::default().generate(&mut grid, 12345);
        let floor = grid.count(|t| t.is_walkable());
        assert!(floor > 0 && floor < 50 * 50);
    }

    #[test]
    fn voronoi_is_deterministic() {
        let mut g1: Grid<Tile> = Grid::new(40, 40);
        let mut g2: Grid<Tile> = Grid::new(40, 40);
        Voronoi::default().generate(&mut g1, 42);
        Voronoi::default().generate(&mut g2, 42);
        assert_eq!(g1, g2);
    }

    #[test]
    fn voronoi_rooms_are_connected() {
        let mut grid: Grid<Tile> = Grid::new(60, 60);
        let config = VoronoiConfig { num_points: 8, room_chance: 1.0, ..Default::default() };
        Voronoi::new(config).generate(&mut grid, 5);
        let regions = grid.flood_regions();
        assert_eq!(regions.len(), 1);
    }
}
