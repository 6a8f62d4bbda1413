//! Perfect-maze generator (§4.4): recursive backtracker, Prim's, and
//! recursive division, plus loop-adding post-processing and START/END
//! endpoint tagging.

use crate::{Algorithm, Grid, Rng, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeAlgorithm {
    Backtracker,
    Prim,
    Division,
}

#[derive(Debug, Clone)]
pub struct MazeConfig {
    pub algorithm: MazeAlgorithm,
    pub corridor_width: usize,
    /// Extra edges carved between adjacent cells after the perfect maze is built.
    pub add_loops: f64,
    pub tag_endpoints: bool,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            algorithm: MazeAlgorithm::Backtracker,
            corridor_width: 1,
            add_loops: 0.0,
            tag_endpoints: false,
        }
    }
}

pub struct Maze {
    config: MazeConfig,
}

impl Maze {
    pub fn new(config: MazeConfig) -> Self {
        Self { config }
    }
}

impl Default for Maze {
    fn default() -> Self {
        Self::new(MazeConfig::default())
    }
}

fn carve_cell(grid: &mut Grid<Tile>, cx: usize, cy: usize, cell_size: usize) {
    let x = 1 + cx * cell_size;
    let y = 1 + cy * cell_size;
    let corridor = cell_size - 1;
    grid.fill_rect(x as i32, y as i32, corridor, corridor, Tile::Floor);
}

fn carve_passage(grid: &mut Grid<Tile>, cx: usize, cy: usize, nx: usize, ny: usize, cell_size: usize) {
    let corridor = cell_size - 1;
    if nx > cx {
        grid.fill_rect((1 + cx * cell_size + corridor) as i32, (1 + cy * cell_size) as i32, 1, corridor, Tile::Floor);
    } else if nx < cx {
        grid.fill_rect((1 + nx * cell_size + corridor) as i32, (1 + ny * cell_size) as i32, 1, corridor, Tile::Floor);
    } else if ny > cy {
        grid.fill_rect((1 + cx * cell_size) as i32, (1 + cy * cell_size + corridor) as i32, corridor, 1, Tile::Floor);
    } else {
        grid.fill_rect((1 + nx * cell_size) as i32, (1 + ny * cell_size + corridor) as i32, corridor, 1, Tile::Floor);
    }
}

/// Neighbor order is fixed W, E, N, S so that ties favor horizontal movement.
fn cell_neighbors(x: usize, y: usize, w: usize, h: usize) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    if x > 0 {
        out.push((x - 1, y));
    }
    if x + 1 < w {
        out.push((x + 1, y));
    }
    if y > 0 {
        out.push((x, y - 1));
    }
    if y + 1 < h {
        out.push((x, y + 1));
    }
    out
}

fn backtracker(grid: &mut Grid<Tile>, maze_w: usize, maze_h: usize, cell: usize, rng: &mut Rng) {
    let mut visited = vec![vec![false; maze_h]; maze_w];
    let mut stack = Vec::new();
    visited[0][0] = true;
    carve_cell(grid, 0, 0, cell);
    stack.push((0usize, 0usize));

    while let Some(&(cx, cy)) = stack.last() {
        let candidates: Vec<(usize, usize)> = cell_neighbors(cx, cy, maze_w, maze_h)
            .into_iter()
            .filter(|&(nx, ny)| !visited[nx][ny])
            .collect();
        if candidates.is_empty() {
            stack.pop();
        } else {
            let &(nx, ny) = rng.pick(&candidates).unwrap();
            carve_passage(grid, cx, cy, nx, ny, cell);
            visited[nx][ny] = true;
            carve_cell(grid, nx, ny, cell);
            stack.push((nx, ny));
        }
    }
}

fn prim(grid: &mut Grid<Tile>, maze_w: usize, maze_h: usize, cell: usize, rng: &mut Rng) {
    let mut in_maze = vec![vec![false; maze_h]; maze_w];
    let mut frontier: Vec<((usize, usize), (usize, usize))> = Vec::new();

    in_maze[0][0] = true;
    carve_cell(grid, 0, 0, cell);
    for n in cell_neighbors(0, 0, maze_w, maze_h) {
        frontier.push(((0, 0), n));
    }

    while !frontier.is_empty() {
        let idx = rng.range_usize(0, frontier.len());
        let (from, to) = frontier.swap_remove(idx);
        if in_maze[to.0][to.1] {
            continue;
        }
        carve_passage(grid, from.0, from.1, to.0, to.1, cell);
        in_maze[to.0][to.1] = true;
        carve_cell(grid, to.0, to.1, cell);
        for n in cell_neighbors(to.0, to.1, maze_w, maze_h) {
            if !in_maze[n.0][n.1] {
                frontier.push((to, n));
            }
        }
    }
}

fn division(grid: &mut Grid<Tile>, maze_w: usize, maze_h: usize, cell: usize, rng: &mut Rng) {
    // Start fully open, then recursively bisect with a wall containing one gap.
    let corridor = cell.saturating_sub(1).max(1);
    grid.fill_rect(1, 1, maze_w * cell - 1, maze_h * cell - 1, Tile::Floor);
    divide(grid, 1, 1, maze_w * cell - 1, maze_h * cell - 1, corridor, rng);
}

fn divide(grid: &mut Grid<Tile>, x: i32, y: i32, w: usize, h: usize, corridor: usize, rng: &mut Rng) {
    if w < corridor * 2 + 2 || h < corridor * 2 + 2 {
        return;
    }
    let horizontal = if w < h { true } else if h < w { false } else { rng.chance(0.5) };

    if horizontal {
        let wy = y + rng.range(1, (h.saturating_sub(1)).max(2) as i32);
        let gap_x = x + rng.range(0, w as i32);
        for dx in 0..w as i32 {
            if x + dx != gap_x {
                grid.set(x + dx, wy, Tile::Wall);
            }
        }
        divide(grid, x, y, w, (wy - y) as usize, corridor, rng);
        divide(grid, x, wy + 1, w, (y + h as i32 - wy - 1) as usize, corridor, rng);
    } else {
        let wx = x + rng.range(1, (w.saturating_sub(1)).max(2) as i32);
        let gap_y = y + rng.range(0, h as i32);
        for dy in 0..h as i32 {
            if y + dy != gap_y {
                grid.set(wx, y + dy, Tile::Wall);
            }
        }
        divide(grid, x, y, (wx - x) as usize, h, corridor, rng);
        divide(grid, wx + 1, y, (x + w as i32 - wx - 1) as usize, h, corridor, rng);
    }
}

/// Carves extra connections between adjacent, still-unconnected corridor
/// cells to introduce cycles into an otherwise-perfect maze.
fn add_loops(grid: &mut Grid<Tile>, chance: f64, rng: &mut Rng) {
    if chance <= 0.0 {
        return;
    }
    let (w, h) = (grid.width(), grid.height());
    let mut candidates = Vec::new();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            if grid[(x, y)].is_wall() {
                let floor_n = grid.neighbors_4(x, y).iter().filter(|&&(nx, ny)| grid[(nx, ny)].is_floor()).count();
                if floor_n >= 2 {
                    candidates.push((x, y));
                }
            }
        }
    }
    for (x, y) in candidates {
        if rng.chance(chance) {
            grid.set(x as i32, y as i32, Tile::Floor);
        }
    }
}

impl Algorithm<Tile> for Maze {
    fn generate(&self, grid: &mut Grid<Tile>, seed: u64) {
        let mut rng = Rng::new(seed);
        let (w, h) = (grid.width(), grid.height());
        grid.fill(Tile::Wall);

        let cell = self.config.corridor_width + 1;
        let maze_w = (w.saturating_sub(1)) / cell;
        let maze_h = (h.saturating_sub(1)) / cell;
        if maze_w < 2 || maze_h < 2 {
            grid.fill_border(Tile::Wall);
            return;
        }

        match self.config.algorithm {
            MazeAlgorithm::Backtracker => backtracker(grid, maze_w, maze_h, cell, &mut rng),
            MazeAlgorithm::Prim => prim(grid, maze_w, maze_h, cell, &mut rng),
            MazeAlgorithm::Division => division(grid, maze_w, maze_h, cell, &mut rng),
        }

        add_loops(grid, self.config.add_loops, &mut rng);

        if self.config.tag_endpoints {
            let floors: Vec<(usize, usize)> = grid.iter().filter(|(_, _, t)| t.is_floor()).map(|(x, y, _)| (x, y)).collect();
            if let (Some(&start), Some(&end)) = (floors.first(), floors.last()) {
                grid.set(start.0 as i32, start.1 as i32, Tile::StairsUp);
                grid.set(end.0 as i32, end.1 as i32, Tile::StairsDown);
            }
        }

        grid.fill_border(Tile::Wall);
    }

    fn name(&self) -> &'static str {
        "Maze"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backtracker_creates_paths() {
        let mut grid: Grid<Tile> = Grid::new(21, 21);
        Maze::default().generate(&mut grid, 12345);
        assert!(grid.count(|t| t.is_floor()) > 0);
    }

    #[test]
    fn prim_is_deterministic() {
        let config = MazeConfig { algorithm: MazeAlgorithm::Prim, ..Default::default() };
        let mut g1: Grid<Tile> = Grid::new(21, 21);
        let mut g2: Grid<Tile> = Grid::new(21, 21);
        Maze::new(config.clone()).generate(&mut g1, 7);
        Maze::new(config).generate(&mut g2, 7);
        assert_eq!(g1, g2);
    }

    #[test]
    fn division_keeps_border_walled() {
        let config = MazeConfig { algorithm: MazeAlgorithm::Division, ..Default::default() };
        let mut grid: Grid<Tile> = Grid::new(25, 25);
        Maze::new(config).generate(&mut grid, 3);
        for x in 0..25 {
            assert!(grid[(x, 0)].is_wall());
        }
    }

    #[test]
    fn endpoint_tagging_places_stairs() {
        let config = MazeConfig { tag_endpoints: true, ..Default::default() };
        let mut grid: Grid<Tile> = Grid::new(21, 21);
        Maze::new(config).generate(&mut grid, 9);
        assert_eq!(grid.count(|t| *t == Tile::StairsUp), 1);
        assert_eq!(grid.count(|t| *t == Tile::StairsDown), 1);
    }
}
