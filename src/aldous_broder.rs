//! Génération par marche aléatoire d'Aldous-Broder.
//!
//! On part d'une cellule de bord ouverte vers l'extérieur, puis on marche au
//! hasard vers n'importe quel voisin. Le mur n'est cassé que la première fois
//! qu'une cellule est atteinte, ce qui donne un arbre couvrant uniforme : un
//! labyrinthe parfait, sans cycle et entièrement connecté.

use tracing::{debug, info, trace, warn};

use crate::cell::Position;
use crate::config::Glyphs;
use crate::error::Result;
use crate::grid::Grid;
use crate::random::{RandomSource, RngSource};

/// Étapes de la génération.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    Walking { current: Position, visited: usize },
    Done { exit: Position },
}

/// Générateur Aldous-Broder, paramétré par sa source de hasard.
#[derive(Debug, Clone)]
pub struct AldousBroder<S> {
    source: S,
    glyphs: Glyphs,
}

impl<S: RandomSource> AldousBroder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            glyphs: Glyphs::default(),
        }
    }

    pub fn with_glyphs(mut self, glyphs: Glyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Construit un labyrinthe parfait de `rows x cols` cellules.
    pub fn generate(&mut self, rows: usize, cols: usize) -> Result<Grid> {
        let mut grid = Grid::new(rows, cols)?;
        let total = grid.cell_count();
        let mut steps = 0usize;
        let mut phase = Phase::Start;

        loop {
            phase = match phase {
                Phase::Start => {
                    let start = grid.random_border_cell(&mut self.source);
                    grid.open_border(start, &mut self.source);
                    grid.mark_visited(start);
                    grid.set_glyph(start, self.glyphs.entrance);
                    debug!(?start, rows, cols, "walk starts");
                    Phase::Walking {
                        current: start,
                        visited: 1,
                    }
                }
                Phase::Walking { current, visited } if visited == total => {
                    Phase::Done { exit: current }
                }
                Phase::Walking { current, visited } => {
                    steps += 1;
                    self.walk_step(&mut grid, current, visited)
                }
                Phase::Done { exit } => {
                    grid.set_glyph(exit, self.glyphs.exit);
                    info!(rows, cols, steps, ?exit, "maze generated");
                    break;
                }
            };
        }

        Ok(grid)
    }

    /// Un pas de marche depuis `current`. Sans voisin, la marche s'arrête sur
    /// `current`, qui reçoit quand même le caractère de sortie.
    fn walk_step(&mut self, grid: &mut Grid, current: Position, visited: usize) -> Phase {
        let Some((next, direction)) = grid.random_neighbor(current, &mut self.source) else {
            warn!(?current, visited, total = grid.cell_count(), "walk stuck without neighbor");
            return Phase::Done { exit: current };
        };

        if grid.cell(next).is_some_and(|cell| cell.is_visited()) {
            return Phase::Walking {
                current: next,
                visited,
            };
        }
        grid.remove_wall(current.0, current.1, direction);
        grid.mark_visited(next);
        trace!(?current, ?next, %direction, visited = visited + 1, "passage carved");
        Phase::Walking {
            current: next,
            visited: visited + 1,
        }
    }
}

impl AldousBroder<RngSource<rand::rngs::StdRng>> {
    /// Générateur reproductible à partir d'une graine.
    pub fn seeded(seed: u64) -> Self {
        Self::new(RngSource::seeded(seed))
    }

    pub fn from_os() -> Self {
        Self::new(RngSource::from_os())
    }
}
