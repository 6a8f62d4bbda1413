//! Algorithm trait for procedural generation

use crate::grid::GridTile;
use crate::Grid;

/// Trait for procedural generation algorithms
pub trait Algorithm<T: GridTile = crate::Tile> {
    /// Generate content into the grid using the given seed
    fn generate(&self, grid: &mut Grid<T>, seed: u64);

    /// Algorithm name for identification
    fn name(&self) -> &'static str;
}

impl<T: GridTile> Algorithm<T> for Box<dyn Algorithm<T>> {
    fn generate(&self, grid: &mut Grid<T>, seed: u64) {
        (**self).generate(grid, seed)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
