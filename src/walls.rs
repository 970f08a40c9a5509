use serde::Serialize;

use crate::direction::Direction;

/// Ensemble des 4 murs d'une cellule. `true` : le mur est présent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Walls {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

impl Default for Walls {
    fn default() -> Self {
        Self {
            north: true,
            east: true,
            south: true,
            west: true,
        }
    }
}

impl Walls {
    pub fn get(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    pub fn set(&mut self, direction: Direction, present: bool) {
        let wall = match direction {
            Direction::North => &mut self.north,
            Direction::East => &mut self.east,
            Direction::South => &mut self.south,
            Direction::West => &mut self.west,
        };
        *wall = present;
    }

    /// Nombre de murs encore debout.
    pub fn count(&self) -> usize {
        Direction::ALL.iter().filter(|&&d| self.get(d)).count()
    }
}
