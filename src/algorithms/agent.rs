//! Multi-agent digger generator (§4.4): several carvers random-walk in
//! straight runs, occasionally turning or stamping out a small room.

use crate::{Algorithm, Grid, Rng, Tile};

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub num_agents: usize,
    pub steps_per_agent: usize,
    pub turn_chance: f64,
    pub room_chance: f64,
    pub door_chance: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            num_agents: 5,
            steps_per_agent: 200,
            turn_chance: 0.3,
            room_chance: 0.05,
            door_chance: 0.3,
        }
    }
}

pub struct Agent {
    config: AgentConfig,
}

impl Agent {
    pub fn new(config: AgentConfig) -> Self {
        Self { config }
    }
}

impl Default for Agent {
    fn default() -> Self {
        Self::new(AgentConfig::default())
    }
}

const DIRS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

fn stamp_room(grid: &mut Grid<Tile>, cx: i32, cy: i32, rng: &mut Rng) {
    let w = grid.width() as i32;
    let h = grid.height() as i32;
    let rw = rng.range(2, 5);
    let rh = rng.range(2, 5);
    for dy in -(rh / 2)..=(rh / 2) {
        for dx in -(rw / 2)..=(rw / 2) {
            let (x, y) = (cx + dx, cy + dy);
            if x > 0 && x < w - 1 && y > 0 && y < h - 1 {
                grid.set(x, y, Tile::Floor);
            }
        }
    }
}

/// Converts corridor tiles adjacent to two different agent runs into doors.
fn place_doors(grid: &mut Grid<Tile>, chance: f64, rng: &mut Rng) {
    let (w, h) = (grid.width(), grid.height());
    let mut candidates = Vec::new();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            if !grid[(x, y)].is_floor() {
                continue;
            }
            let wall_count = grid.neighbors_4(x, y).iter().filter(|&&(nx, ny)| grid[(nx, ny)].is_wall()).count();
            if wall_count == 2 {
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

impl Algorithm<Tile> for Agent {
    fn generate(&self, grid: &mut Grid<Tile>, seed: u64) {
        let mut rng = Rng::new(seed);
        grid.fill(Tile::Wall);
        let (w, h) = (grid.width() as i32, grid.height() as i32);

        for _ in 0..self.config.num_agents {
            let mut x = rng.range(1, w - 1);
            let mut y = rng.range(1, h - 1);
            let mut dir = rng.range_usize(0, 4);

            for _ in 0..self.config.steps_per_agent {
                grid.set(x, y, Tile::Floor);

                if rng.chance(self.config.room_chance) {
                    stamp_room(grid, x, y, &mut rng);
                }

                if rng.chance(self.config.turn_chance) {
                    dir = if rng.chance(0.5) { (dir + 1) % 4 } else { (dir + 3) % 4 };
                }

                let (dx, dy) = DIRS[dir];
                let (nx, ny) = (x + dx, y + dy);
                if nx > 0 && nx < w - 1 && ny > 0 && ny < h - 1 {
                    x = nx;
                    y = ny;
                } else {
                    dir = (dir + 2) % 4;
                }
            }
        }

        place_doors(grid, self.config.door_chance, &mut rng);
        grid.fill_border(Tile::Wall);
    }

    fn name(&self) -> &'static str {
        "Agent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_creates_paths() {
        let mut grid: Grid<Tile> = Grid::new(50, 50);
        Agent::default().generate(&mut grid, 12345);
        assert!(grid.count(|t| t.is_floor()) > 0);
    }

    #[test]
    fn agent_is_deterministic() {
        let mut g1: Grid<Tile> = Grid::new(50, 50);
        let mut g2: Grid<Tile> = Grid::new(50, 50);
        Agent::default().generate(&mut g1, 12345);
        Agent::default().generate(&mut g2, 12345);
        assert_eq!(g1, g2);
    }
}
