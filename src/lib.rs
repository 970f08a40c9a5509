//! Génération de labyrinthes parfaits rectangulaires (Aldous-Broder) et rendu ASCII.
//!
//! ```no_run
//! let grid = rusty_maze::generate_maze(5, 8)?;
//! println!("{}", grid.render());
//! # Ok::<(), rusty_maze::MazeError>(())
//! ```

pub mod aldous_broder;
pub mod ascii_utils;
pub mod cell;
pub mod config;
pub mod direction;
pub mod error;
pub mod grid;
pub mod prompt;
pub mod random;
pub mod walls;

pub use aldous_broder::AldousBroder;
pub use cell::{Cell, CellState, Position};
pub use config::{Glyph, Glyphs, RenderStyle};
pub use direction::Direction;
pub use error::MazeError;
pub use grid::Grid;
pub use random::{RandomSource, RngSource, ScriptedSource};
pub use walls::Walls;

/// Génère un labyrinthe parfait de `rows x cols` cellules avec un hasard système.
pub fn generate_maze(rows: usize, cols: usize) -> Result<Grid, MazeError> {
    AldousBroder::from_os().generate(rows, cols)
}

/// Comme [`generate_maze`], mais reproductible.
pub fn generate_maze_seeded(rows: usize, cols: usize, seed: u64) -> Result<Grid, MazeError> {
    AldousBroder::seeded(seed).generate(rows, cols)
}
