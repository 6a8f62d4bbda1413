//! Symmetry transform and detection (§6), layered on top of
//! [`crate::effects::transform`]'s mirror/rotate primitives.

use crate::effects;
use crate::{Grid, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymmetryMode {
    None,
    Horizontal,
    Vertical,
    Both,
    Rotational2,
    Rotational4,
}

/// Overwrites one half/quadrant of the grid with a mirrored or rotated copy
/// of the other, producing the requested symmetry exactly.
pub fn apply_symmetry(grid: &mut Grid<Tile>, mode: SymmetryMode) {
    let (w, h) = (grid.width(), grid.height());
    match mode {
        SymmetryMode::None => {}
        SymmetryMode::Horizontal => mirror_half(grid, true, false),
        SymmetryMode::Vertical => mirror_half(grid, false, true),
        SymmetryMode::Both => {
            mirror_half(grid, true, false);
            mirror_half(grid, false, true);
        }
        SymmetryMode::Rotational2 => {
            if w == h {
                for y in 0..h / 2 {
                    for x in 0..w {
                        let src = grid[(x, y)];
                        grid.set((w - 1 - x) as i32, (h - 1 - y) as i32, src);
                    }
                }
            } else {
                effects::rotate(grid, 180);
            }
        }
        SymmetryMode::Rotational4 => {
            if w == h {
                let snapshot: Vec<Tile> = (0..w * h).map(|i| grid[(i % w, i / w)]).collect();
                for y in 0..h / 2 {
                    for x in 0..(w + 1) / 2 {
                        let v = snapshot[y * w + x];
                        grid.set((w - 1 - y) as i32, x as i32, v);
                        grid.set((w - 1 - x) as i32, (h - 1 - y) as i32, v);
                        grid.set(y as i32, (h - 1 - x) as i32, v);
                    }
                }
            }
        }
    }
}

fn mirror_half(grid: &mut Grid<Tile>, horizontal: bool, vertical: bool) {
    let (w, h) = (grid.width(), grid.height());
    if horizontal {
        for y in 0..h {
            for x in 0..w / 2 {
                let src = grid[(x, y)];
                grid.set((w - 1 - x) as i32, y as i32, src);
            }
        }
    }
    if vertical {
        for y in 0..h / 2 {
            for x in 0..w {
                let src = grid[(x, y)];
                grid.set(x as i32, (h - 1 - y) as i32, src);
            }
        }
    }
}

/// Fraction of tiles on the mirrored/rotated half that already match their
/// counterpart, used to report how symmetric an existing grid is.
pub fn horizontal_symmetry_score(grid: &Grid<Tile>) -> f64 {
    let (w, h) = (grid.width(), grid.height());
    if w < 2 {
        return 1.0;
    }
    let mut matches = 0;
    let mut total = 0;
    for y in 0..h {
        for x in 0..w / 2 {
            total += 1;
            if grid[(x, y)] == grid[(w - 1 - x, y)] {
                matches += 1;
            }
        }
    }
    if total == 0 { 1.0 } else { matches as f64 / total as f64 }
}

pub fn vertical_symmetry_score(grid: &Grid<Tile>) -> f64 {
    let (w, h) = (grid.width(), grid.height());
    if h < 2 {
        return 1.0;
    }
    let mut matches = 0;
    let mut total = 0;
    for y in 0..h / 2 {
        for x in 0..w {
            total += 1;
            if grid[(x, y)] == grid[(x, h - 1 - y)] {
                matches += 1;
            }
        }
    }
    if total == 0 { 1.0 } else { matches as f64 / total as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_symmetry_is_exact_after_apply() {
        let mut grid: Grid<Tile> = Grid::new(20, 10);
        for y in 0..10 {
            for x in 0..20 {
                if (x + y) % 3 == 0 {
                    grid.set(x as i32, y as i32, Tile::Floor);
                }
            }
        }
        apply_symmetry(&mut grid, SymmetryMode::Horizontal);
        assert_eq!(horizontal_symmetry_score(&grid), 1.0);
    }

    #[test]
    fn rotational2_is_exact_on_square_grid() {
        let mut grid: Grid<Tile> = Grid::new(16, 16);
        grid.set(2, 2, Tile::Floor);
        apply_symmetry(&mut grid, SymmetryMode::Rotational2);
        assert_eq!(grid[(13, 13)], Tile::Floor);
    }
}
