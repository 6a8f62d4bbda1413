//! # Dungeoncraft
//!
//! A modular procedural generation engine for dungeons, terrain, room
//! prefabs, and tactical combat simulation.
//!
//! ## Quick start
//!
//! ```rust
//! use dungeoncraft::algorithms::{generate_bsp, BspConfig};
//!
//! let grid = generate_bsp(64, 12345, BspConfig::default()).unwrap();
//! println!("Generated {} floor tiles", grid.count(|t| t.is_floor()));
//! ```
//!
//! ## Generators
//!
//! One module per algorithm under [`algorithms`], each exposing a
//! `generate_*` free function: `bsp`, `cave`, `dla`, `drunkard_walk`,
//! `maze`, `perlin` (terrain), `voronoi`, `wfc`, `agent`, `poisson`, plus
//! [`algorithms::generate_hybrid`] for blending two generators.
//!
//! ## Shapes, modifiers, prefabs, features
//!
//! [`shapes`] and [`modifiers`] build individual rooms; [`prefab`] stamps
//! hand-authored layouts onto a grid; [`features`] drops stairs, treasure,
//! traps, water, and pillars in a fixed pass order.
//!
//! ## Connectivity, multi-level, symmetry, themes
//!
//! [`connectivity`] analyzes reachability and finds paths; [`multilevel`]
//! stacks levels with threaded stairs; [`symmetry`] mirrors or rotates a
//! grid; [`themes`] binds a generator, post-process, and feature mix under
//! a named preset.
//!
//! ## Validation, export/import, simulation
//!
//! [`validate`] reports structural issues in a finished grid; [`io`]
//! exports/imports JSON, CSV, and TMX; [`sim`] runs a turn-based tactical
//! combat simulation over a grid.
//!
//! ## Composition
//!
//! Chain or blend algorithms with [`compose::Pipeline`] /
//! [`compose::LayeredGenerator`].
//!
//! ## Noise and effects
//!
//! [`noise`] provides Perlin, Simplex, Value, Worley with FBM and
//! modifiers. [`effects`] post-processes grids: morphology, connectivity
//! repair, filters, and transforms.

mod algorithm;
mod grid;
mod rng;

pub mod algorithms;
pub mod compose;
pub mod connectivity;
pub mod constraints;
pub mod effects;
pub mod error;
pub mod features;
pub mod io;
pub mod modifiers;
pub mod multilevel;
pub mod noise;
pub mod prefab;
pub mod shapes;
pub mod sim;
pub mod symmetry;
pub mod themes;
pub mod validate;

pub use algorithm::Algorithm;
pub use error::{Error, Result};
pub use grid::{Direction, Grid, GridTile, Point, Rect, TerrainTile, Tile, TILE_COUNT};
pub use rng::Rng;
