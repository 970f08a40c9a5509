use thiserror::Error;

/// Erreurs remontées par la construction et la génération du labyrinthe.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    /// Le nombre de lignes ou de colonnes est nul, ou la grille est trop grande.
    #[error("invalid maze dimensions {rows}x{cols}: rows and cols must be at least 1 and rows * cols at most 1000000")]
    InvalidDimensions { rows: usize, cols: usize },

    /// Le contenu d'une cellule n'est pas un seul caractère affichable.
    #[error("the cell content must be exactly 1 printable character, got {0:?}")]
    InvalidContent(String),

    /// Direction inconnue pour une cellule carrée.
    #[error("{0:?} is an invalid wall direction for a quadrilateral cell")]
    InvalidWallDirection(String),

    /// La largeur d'une cellule doit être impaire pour centrer son contenu.
    #[error("cell width must be an odd number greater than 0, got {0}")]
    InvalidCellWidth(usize),
}

pub type Result<T> = std::result::Result<T, MazeError>;
