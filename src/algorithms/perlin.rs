//! Perlin terrain generator (§4.4): fractal octave sampling banded into
//! terrain tiles, with an optional radial island mask and a coastal
//! erosion pass.

use crate::noise::{NoiseSource, Perlin as PerlinNoise};
use crate::{Algorithm, Grid, TerrainTile};

#[derive(Debug, Clone)]
pub struct PerlinConfig {
    pub frequency: f64,
    pub octaves: usize,
    pub persistence: f64,
    pub island: bool,
    pub erosion_iterations: usize,
    pub water_level: f64,
    pub sand_level: f64,
    pub grass_level: f64,
    pub forest_level: f64,
}

impl Default for PerlinConfig {
    fn default() -> Self {
        Self {
            frequency: 0.05,
            octaves: 4,
            persistence: 0.5,
            island: true,
            erosion_iterations: 1,
            water_level: -0.1,
            sand_level: 0.0,
            grass_level: 0.3,
            forest_level: 0.6,
        }
    }
}

pub struct PerlinTerrain {
    config: PerlinConfig,
}

impl PerlinTerrain {
    pub fn new(config: PerlinConfig) -> Self {
        Self { config }
    }
}

impl Default for PerlinTerrain {
    fn default() -> Self {
        Self::new(PerlinConfig::default())
    }
}

fn fractal_sample(noise: &PerlinNoise, x: f64, y: f64, octaves: usize, persistence: f64) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut max_amplitude = 0.0;
    let mut freq_mult = 1.0;
    for _ in 0..octaves {
        total += noise.sample(x * freq_mult, y * freq_mult) * amplitude;
        max_amplitude += amplitude;
        amplitude *= persistence;
        freq_mult *= 2.0;
    }
    if max_amplitude > 0.0 { total / max_amplitude } else { 0.0 }
}

fn band(height: f64, config: &PerlinConfig) -> TerrainTile {
    if height < config.water_level {
        TerrainTile::DeepWater
    } else if height < config.sand_level {
        TerrainTile::Water
    } else if height < config.sand_level + 0.05 {
        TerrainTile::Sand
    } else if height < config.grass_level {
        TerrainTile::Grass
    } else if height < config.forest_level {
        TerrainTile::Forest
    } else {
        TerrainTile::Mountain
    }
}

impl Algorithm<TerrainTile> for PerlinTerrain {
    fn generate(&self, grid: &mut Grid<TerrainTile>, seed: u64) {
        let (w, h) = (grid.width(), grid.height());
        let noise = PerlinNoise::new(seed).with_frequency(self.config.frequency);
        let (cx, cy) = (w as f64 / 2.0, h as f64 / 2.0);
        let max_dist = ((cx * cx) + (cy * cy)).sqrt();

        let mut heights = vec![0.0f64; w * h];
        for y in 0..h {
            for x in 0..w {
                let mut v = fractal_sample(&noise, x as f64, y as f64, self.config.octaves, self.config.persistence);
                if self.config.island {
                    let dist = (((x as f64 - cx).powi(2) + (y as f64 - cy).powi(2)).sqrt()) / max_dist;
                    let falloff = 1.0 - (dist * 2.0).min(1.0);
                    v = v * 0.6 + (falloff - 0.5);
                }
                heights[y * w + x] = v;
            }
        }

        for _ in 0..self.config.erosion_iterations {
            let mut next = heights.clone();
            for y in 1..h.saturating_sub(1) {
                for x in 1..w.saturating_sub(1) {
                    let neighbors = [
                        heights[y * w + x - 1],
                        heights[y * w + x + 1],
                        heights[(y - 1) * w + x],
                        heights[(y + 1) * w + x],
                    ];
                    let avg = neighbors.iter().sum::<f64>() / 4.0;
                    next[y * w + x] = heights[y * w + x] * 0.7 + avg * 0.3;
                }
            }
            heights = next;
        }

        for y in 0..h {
            for x in 0..w {
                grid.set(x as i32, y as i32, band(heights[y * w + x], &self.config));
            }
        }
    }

    fn name(&self) -> &'static str {
        "PerlinTerrain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perlin_terrain_produces_multiple_bands() {
        let mut grid: Grid<TerrainTile> = Grid::new(80, 80);
        PerlinTerrain::default().generate(&mut grid, 12345);
        let mountain = grid.count(|t| *t == TerrainTile::Mountain);
        let water = grid.count(|t| *t == TerrainTile::DeepWater || *t == TerrainTile::Water);
        assert!(mountain > 0);
        assert!(water > 0);
    }

    #[test]
    fn perlin_terrain_is_deterministic() {
        let mut g1: Grid<TerrainTile> = Grid::new(40, 40);
        let mut g2: Grid<TerrainTile> = Grid::new(40, 40);
        PerlinTerrain::default().generate(&mut g1, 42);
        PerlinTerrain::default().generate(&mut g2, 42);
        assert_eq!(g1, g2);
    }

    #[test]
    fn island_mode_keeps_edges_wet() {
        let mut grid: Grid<TerrainTile> = Grid::new(60, 60);
        PerlinTerrain::default().generate(&mut grid, 7);
        let corner = grid[(0, 0)];
        assert!(matches!(corner, TerrainTile::DeepWater | TerrainTile::Water));
    }
}
