/*!
 * # Configuration du rendu
 *
 * Constantes de dessin, style de rendu ASCII et caractères posés sur les
 * cellules d'entrée et de sortie pendant la génération.
 */

use std::fmt;

use serde::Serialize;
use unicode_width::UnicodeWidthChar;

use crate::error::{MazeError, Result};

/// Largeur d'une cellule en caractères (impaire pour centrer le contenu).
pub const CELL_WIDTH: usize = 3;
pub const HORIZONTAL_CHAR: char = '-';
pub const VERTICAL_CHAR: char = '│';
/// Caractère posé aux jonctions, quels que soient les murs voisins.
pub const JUNCTION_CHAR: char = '+';
pub const DEFAULT_EXIT_GLYPH: char = 'X';
/// Taille maximale d'une grille, en cellules.
pub const MAX_CELLS: usize = 1_000_000;

/// Contenu affichable d'une cellule : exactement un caractère.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Glyph(char);

impl Glyph {
    pub const BLANK: Glyph = Glyph(' ');

    /// Valide une chaîne de contenu.
    ///
    /// Une chaîne vide donne un blanc ; plus d'un caractère, ou un caractère
    /// de contrôle, est refusé.
    pub fn parse(content: &str) -> Result<Self> {
        let mut chars = content.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(Glyph::BLANK),
            (Some(c), None) => Glyph::new(c),
            _ => Err(MazeError::InvalidContent(content.to_string())),
        }
    }

    /// Le caractère doit occuper exactement une colonne à l'écran.
    pub fn new(c: char) -> Result<Self> {
        if c.is_control() || c.width() != Some(1) {
            return Err(MazeError::InvalidContent(c.to_string()));
        }
        Ok(Glyph(c))
    }

    pub fn as_char(self) -> char {
        self.0
    }

    pub fn is_blank(self) -> bool {
        self.0 == ' '
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Glyph::BLANK
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caractères utilisés pour dessiner les murs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyle {
    cell_width: usize,
    pub horizontal: char,
    pub vertical: char,
    pub junction: char,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            cell_width: CELL_WIDTH,
            horizontal: HORIZONTAL_CHAR,
            vertical: VERTICAL_CHAR,
            junction: JUNCTION_CHAR,
        }
    }
}

impl RenderStyle {
    pub fn with_cell_width(cell_width: usize) -> Result<Self> {
        if cell_width % 2 == 0 {
            return Err(MazeError::InvalidCellWidth(cell_width));
        }
        Ok(Self {
            cell_width,
            ..Self::default()
        })
    }

    pub fn cell_width(&self) -> usize {
        self.cell_width
    }
}

/// Caractères posés sur l'entrée et sur la dernière cellule de la marche.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub entrance: Glyph,
    pub exit: Glyph,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            entrance: Glyph::BLANK,
            exit: Glyph(DEFAULT_EXIT_GLYPH),
        }
    }
}
