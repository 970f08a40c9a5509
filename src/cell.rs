use std::fmt;

use serde::Serialize;

use crate::config::{Glyph, RenderStyle};
use crate::direction::Direction;
use crate::error::Result;
use crate::walls::Walls;

/// Coordonnées (ligne, colonne) d'une cellule, à partir de 0.
pub type Position = (usize, usize);

/// État d'une cellule pendant la génération (visitée ou pas).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    NotVisited,
    Visited,
}

/// Représente une cellule du labyrinthe.
///
/// Une cellule possède une position fixe, une configuration de murs, un état
/// indiquant si elle a été visitée et un caractère affiché en son centre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    position: Position,
    walls: Walls,
    state: CellState,
    content: Glyph,
}

impl Cell {
    /// Crée une cellule fermée sur ses quatre côtés, non visitée et vide.
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            position: (row, col),
            walls: Walls::default(),
            state: CellState::NotVisited,
            content: Glyph::BLANK,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn walls(&self) -> &Walls {
        &self.walls
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls.get(direction)
    }

    pub fn wall_count(&self) -> usize {
        self.walls.count()
    }

    pub fn remove_wall(&mut self, direction: Direction) {
        self.walls.set(direction, false);
    }

    pub fn add_wall(&mut self, direction: Direction) {
        self.walls.set(direction, true);
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_visited(&self) -> bool {
        self.state == CellState::Visited
    }

    pub fn mark_visited(&mut self) {
        self.state = CellState::Visited;
    }

    pub fn content(&self) -> Glyph {
        self.content
    }

    /// Remplace le contenu ; la cellule reste inchangée si `content` est invalide.
    pub fn set_content(&mut self, content: &str) -> Result<()> {
        self.content = Glyph::parse(content)?;
        Ok(())
    }

    pub fn set_glyph(&mut self, glyph: Glyph) {
        self.content = glyph;
    }

    /// Les trois lignes de la cellule : bordure haute, contenu, bordure basse.
    ///
    /// Les coins portent toujours le caractère de jonction, pour que les
    /// bordures de deux cellules voisines se superposent sans conflit.
    pub fn render_lines(&self, style: &RenderStyle) -> [String; 3] {
        let top = self.border_line(style, self.walls.north);
        let bottom = self.border_line(style, self.walls.south);

        let side = |present: bool| if present { style.vertical } else { ' ' };
        let pad = " ".repeat(style.cell_width() / 2);
        let middle = format!(
            "{}{pad}{}{pad}{}",
            side(self.walls.west),
            self.content,
            side(self.walls.east),
        );

        [top, middle, bottom]
    }

    fn border_line(&self, style: &RenderStyle, present: bool) -> String {
        let run = if present { style.horizontal } else { ' ' };
        let mut line = String::with_capacity(style.cell_width() + 2);
        line.push(style.junction);
        line.extend(std::iter::repeat(run).take(style.cell_width()));
        line.push(style.junction);
        line
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self.render_lines(&RenderStyle::default());
        write!(f, "{}", lines.join("\n"))
    }
}
