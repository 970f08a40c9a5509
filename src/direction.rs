use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::MazeError;

/// Les quatre directions d'une cellule carrée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Toutes les directions, dans l'ordre utilisé pour parcourir les voisins.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Déplacement (ligne, colonne) associé à la direction.
    /// La ligne 0 est en haut : North remonte d'une ligne.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    /// Fait demi tour (par ex. North -> South)
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Case voisine de `(row, col)` dans cette direction, sans contrôle de bornes haute.
    /// `None` si on sort par le haut ou par la gauche.
    pub fn step(self, row: usize, col: usize) -> Option<(usize, usize)> {
        let (dr, dc) = self.delta();
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        Some((r, c))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Direction::North),
            "south" | "s" => Ok(Direction::South),
            "east" | "e" => Ok(Direction::East),
            "west" | "w" => Ok(Direction::West),
            _ => Err(MazeError::InvalidWallDirection(s.to_string())),
        }
    }
}
