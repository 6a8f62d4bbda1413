//! Pipeline for sequential algorithm execution

use crate::grid::GridTile;
use crate::{Algorithm, Grid};

pub struct Pipeline<T: GridTile> {
    steps: Vec<Box<dyn Algorithm<T>>>,
}

impl<T: GridTile> Pipeline<T> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn then<A: Algorithm<T> + 'static>(mut self, algorithm: A) -> Self {
        self.steps.push(Box::new(algorithm));
        self
    }

    /// Alias for `then` - adds an algorithm to the pipeline
    #[allow(clippy::should_implement_trait)]
    pub fn add<A: Algorithm<T> + 'static>(self, algorithm: A) -> Self {
        self.then(algorithm)
    }

    pub fn execute(&self, grid: &mut Grid<T>, seed: u64) {
        for (i, step) in self.steps.iter().enumerate() {
            step.generate(grid, seed.wrapping_add(i as u64 * 1000));
        }
    }
}

impl<T: GridTile> Default for Pipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: GridTile> Algorithm<T> for Pipeline<T> {
    fn generate(&self, grid: &mut Grid<T>, seed: u64) {
        self.execute(grid, seed);
    }

    fn name(&self) -> &'static str {
        "Pipeline"
    }
}
