//! Shape post-processors (§4.3): in-place modifiers applied to a drawn
//! room's tile set, each gated by a probability roll.

use crate::shapes::RoomShape;
use crate::{Grid, Point, Rng, Tile};
use std::collections::HashSet;

fn floor_set(shape: &RoomShape) -> HashSet<Point> {
    shape.tiles().into_iter().collect()
}

/// Removes a triangular wedge (1..max_size tiles) at each bbox corner,
/// independently with `per_corner_probability`.
pub fn nibble_corners(grid: &mut Grid<Tile>, shape: &RoomShape, probability: f64, max_size: i32, rng: &mut Rng) {
    if !rng.chance(probability) {
        return;
    }
    let bbox = shape.bbox();
    let floors = floor_set(shape);
    let corners = [
        (bbox.x, bbox.y, 1, 1),
        (bbox.x + bbox.width as i32 - 1, bbox.y, -1, 1),
        (bbox.x, bbox.y + bbox.height as i32 - 1, 1, -1),
        (bbox.x + bbox.width as i32 - 1, bbox.y + bbox.height as i32 - 1, -1, -1),
    ];
    for (cx, cy, sx, sy) in corners {
        if !rng.chance(0.3) {
            continue;
        }
        let size = rng.range(1, max_size.max(2));
        for dy in 0..size {
            for dx in 0..(size - dy) {
                let p = Point::new(cx + sx * dx, cy + sy * dy);
                if floors.contains(&p) {
                    grid.set_point(p, Tile::Wall);
                }
            }
        }
    }
}

/// Extends 1-2 tile-wide pockets outward from edge tiles into the wall.
pub fn add_alcoves(grid: &mut Grid<Tile>, shape: &RoomShape, probability: f64, count: usize, rng: &mut Rng) {
    if !rng.chance(probability) {
        return;
    }
    let floors = floor_set(shape);
    let mut edge_tiles: Vec<Point> = floors
        .iter()
        .copied()
        .filter(|p| {
            [(0, -1), (0, 1), (-1, 0), (1, 0)]
                .iter()
                .any(|(dx, dy)| !floors.contains(&Point::new(p.x + dx, p.y + dy)))
        })
        .collect();
    rng.shuffle(&mut edge_tiles);

    let dirs = [(0, -1), (0, 1), (-1, 0), (1, 0)];
    for &origin in edge_tiles.iter().take(count) {
        let (dx, dy) = *rng.pick(&dirs).unwrap();
        let depth = rng.range(1, 3);
        let width = rng.range(1, 3);
        let (perp_x, perp_y) = (-dy, dx);
        let mut ok = true;
        let mut pocket = Vec::new();
        for d in 1..=depth {
            for w in 0..width {
                let p = Point::new(
                    origin.x + dx * d + perp_x * w,
                    origin.y + dy * d + perp_y * w,
                );
                if !grid.in_bounds_point(p) || floors.contains(&p) {
                    ok = false;
                    break;
                }
                pocket.push(p);
            }
            if !ok {
                break;
            }
        }
        if ok {
            for p in pocket {
                grid.set_point(p, Tile::Floor);
            }
        }
    }
}

/// Removes tiles whose distance from a quarter-circle of radius `r` exceeds
/// `r` at each bbox corner.
pub fn round_corners(grid: &mut Grid<Tile>, shape: &RoomShape, radius: i32, rng: &mut Rng, probability: f64) {
    if !rng.chance(probability) {
        return;
    }
    let bbox = shape.bbox();
    let floors = floor_set(shape);
    let corners = [
        (bbox.x, bbox.y, 1, 1),
        (bbox.x + bbox.width as i32 - 1, bbox.y, -1, 1),
        (bbox.x, bbox.y + bbox.height as i32 - 1, 1, -1),
        (bbox.x + bbox.width as i32 - 1, bbox.y + bbox.height as i32 - 1, -1, -1),
    ];
    for (cx, cy, sx, sy) in corners {
        for dy in 0..radius {
            for dx in 0..radius {
                let dist = ((dx * dx + dy * dy) as f64).sqrt();
                if dist > radius as f64 {
                    let p = Point::new(cx + sx * dx, cy + sy * dy);
                    if floors.contains(&p) {
                        grid.set_point(p, Tile::Wall);
                    }
                }
            }
        }
    }
}

/// Replaces up to `count` fully-interior tiles (Moore-neighborhood-complete)
/// with WALL, keeping minimum Manhattan spacing.
pub fn add_pillars(grid: &mut Grid<Tile>, shape: &RoomShape, min_spacing: i32, count: usize, rng: &mut Rng) {
    let floors = floor_set(shape);
    let mut interiors: Vec<Point> = floors
        .iter()
        .copied()
        .filter(|p| {
            (-1..=1).all(|dy| {
                (-1..=1).all(|dx| dx == 0 && dy == 0 || floors.contains(&Point::new(p.x + dx, p.y + dy)))
            })
        })
        .collect();
    rng.shuffle(&mut interiors);

    let mut placed: Vec<Point> = Vec::new();
    for p in interiors {
        if placed.len() >= count {
            break;
        }
        if placed.iter().all(|q| p.manhattan(*q) >= min_spacing) {
            grid.set_point(p, Tile::Wall);
            placed.push(p);
        }
    }
}

/// Randomly erodes or extends edge tiles while preserving connectivity.
pub fn irregular_edges(grid: &mut Grid<Tile>, shape: &RoomShape, probability: f64, variance: i32, rng: &mut Rng) {
    let floors = floor_set(shape);
    let dirs = [(0, -1), (0, 1), (-1, 0), (1, 0)];
    let edge_tiles: Vec<Point> = floors
        .iter()
        .copied()
        .filter(|p| dirs.iter().any(|(dx, dy)| !floors.contains(&Point::new(p.x + dx, p.y + dy))))
        .collect();

    for p in edge_tiles {
        if rng.chance(probability) {
            let remaining = dirs
                .iter()
                .filter(|(dx, dy)| floors.contains(&Point::new(p.x + dx, p.y + dy)))
                .count();
            if remaining >= 2 {
                grid.set_point(p, Tile::Wall);
            }
        }
        if rng.chance(probability / 2.0) {
            if let Some((dx, dy)) = dirs.iter().find(|(dx, dy)| !floors.contains(&Point::new(p.x + dx, p.y + dy))) {
                let extent = rng.range(1, variance.max(2));
                for d in 1..=extent {
                    let q = Point::new(p.x + dx * d, p.y + dy * d);
                    if !grid.in_bounds_point(q) {
                        break;
                    }
                    grid.set_point(q, Tile::Floor);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::RoomShape;
    use crate::Rect;

    fn rectangle(x: i32, y: i32, w: usize, h: usize) -> RoomShape {
        RoomShape::Rectangle { rect: Rect::new(x, y, w, h) }
    }

    #[test]
    fn nibble_corners_only_removes_corner_tiles() {
        let mut grid: Grid<Tile> = Grid::new(10, 10);
        let shape = rectangle(1, 1, 6, 6);
        for p in shape.tiles() {
            grid.set_point(p, Tile::Floor);
        }
        let mut rng = Rng::new(42);
        nibble_corners(&mut grid, &shape, 1.0, 3, &mut rng);
        assert!(grid.count(|t| t.is_wall()) > 100 - 36);
    }

    #[test]
    fn add_pillars_respects_spacing() {
        let mut grid: Grid<Tile> = Grid::new(12, 12);
        let shape = rectangle(1, 1, 10, 10);
        for p in shape.tiles() {
            grid.set_point(p, Tile::Floor);
        }
        let mut rng = Rng::new(1);
        add_pillars(&mut grid, &shape, 2, 5, &mut rng);
        let pillars: Vec<Point> = shape.tiles().into_iter().filter(|p| grid[(p.x as usize, p.y as usize)].is_wall()).collect();
        for (i, a) in pillars.iter().enumerate() {
            for b in pillars.iter().skip(i + 1) {
                assert!(a.manhattan(*b) >= 2);
            }
        }
    }
}
