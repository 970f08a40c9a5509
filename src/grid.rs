use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::ascii_utils::merge_rows;
use crate::cell::{Cell, Position};
use crate::config::{Glyph, RenderStyle, MAX_CELLS};
use crate::direction::Direction;
use crate::error::{MazeError, Result};
use crate::random::{choose, RandomSource};

/// Grille rectangulaire de cellules, indexée par (ligne, colonne).
///
/// Les dimensions sont fixées à la construction. Les murs ne sont modifiés
/// que par [`Grid::remove_wall`] et [`Grid::open_border`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Crée une grille `rows x cols` de cellules fermées et non visitées.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let total = rows.checked_mul(cols).unwrap_or(usize::MAX);
        if rows == 0 || cols == 0 || total > MAX_CELLS {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        let cells = (0..rows)
            .map(|r| (0..cols).map(|c| Cell::new(r, c)).collect())
            .collect();
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Nombre total de cellules, borné par `MAX_CELLS` à la construction.
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Récupère une cellule en lecture seule.
    pub fn cell(&self, (row, col): Position) -> Option<&Cell> {
        self.cells.get(row)?.get(col)
    }

    fn cell_mut(&mut self, (row, col): Position) -> Option<&mut Cell> {
        self.cells.get_mut(row)?.get_mut(col)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    pub fn contains(&self, (row, col): Position) -> bool {
        row < self.rows && col < self.cols
    }

    /// Coordonnée voisine dans `direction`, ou `None` hors de la grille.
    pub fn neighbor_coord(&self, (row, col): Position, direction: Direction) -> Option<Position> {
        direction
            .step(row, col)
            .filter(|&pos| self.contains(pos))
    }

    /// Tous les voisins dans la grille, avec la direction pour y aller.
    pub fn neighbors(&self, pos: Position) -> Vec<(Position, Direction)> {
        Direction::ALL
            .iter()
            .filter_map(|&d| self.neighbor_coord(pos, d).map(|n| (n, d)))
            .collect()
    }

    /// Retire le mur de `(row, col)` côté `direction` et, si le voisin existe,
    /// le mur opposé du voisin. Sans effet hors de la grille.
    pub fn remove_wall(&mut self, row: usize, col: usize, direction: Direction) {
        let Some(cell) = self.cell_mut((row, col)) else {
            warn!(row, col, %direction, "remove_wall outside of the grid");
            return;
        };
        cell.remove_wall(direction);

        if let Some(pos) = self.neighbor_coord((row, col), direction) {
            if let Some(neighbor) = self.cell_mut(pos) {
                neighbor.remove_wall(direction.opposite());
            }
        }
    }

    /// Voisin tiré uniformément, visité ou non.
    /// `None` seulement pour une grille 1x1 (ou une position hors grille).
    pub fn random_neighbor<S>(&self, pos: Position, source: &mut S) -> Option<(Position, Direction)>
    where
        S: RandomSource + ?Sized,
    {
        if !self.contains(pos) {
            warn!(?pos, "random_neighbor outside of the grid");
            return None;
        }
        let mut found = [((0, 0), Direction::North); 4];
        let mut n = 0;
        for d in Direction::ALL {
            if let Some(next) = self.neighbor_coord(pos, d) {
                found[n] = (next, d);
                n += 1;
            }
        }
        choose(source, &found[..n]).copied()
    }

    pub fn is_border(&self, (row, col): Position) -> bool {
        self.contains((row, col))
            && (row == 0 || row == self.rows - 1 || col == 0 || col == self.cols - 1)
    }

    /// Cellules du pourtour, en ordre ligne par ligne.
    pub fn border_cells(&self) -> Vec<Position> {
        (0..self.rows)
            .flat_map(|r| (0..self.cols).map(move |c| (r, c)))
            .filter(|&pos| self.is_border(pos))
            .collect()
    }

    pub fn random_border_cell<S>(&self, source: &mut S) -> Position
    where
        S: RandomSource + ?Sized,
    {
        let border = self.border_cells();
        // Une grille a toujours au moins une cellule de bord.
        choose(source, &border).copied().unwrap_or((0, 0))
    }

    /// Directions qui mènent hors de la grille depuis `pos`.
    pub fn outward_directions(&self, pos: Position) -> Vec<Direction> {
        if !self.contains(pos) {
            return Vec::new();
        }
        Direction::ALL
            .iter()
            .copied()
            .filter(|&d| self.neighbor_coord(pos, d).is_none())
            .collect()
    }

    /// Ouvre le labyrinthe vers l'extérieur depuis une cellule de bord.
    ///
    /// Le premier mur extérieur dans l'ordre North, South, West, East tombe
    /// toujours. Dans un coin, un mur extérieur tiré au hasard tombe aussi :
    /// on obtient une ou deux ouvertures. Une cellule intérieure est ignorée.
    pub fn open_border<S>(&mut self, pos: Position, source: &mut S)
    where
        S: RandomSource + ?Sized,
    {
        if !self.is_border(pos) {
            warn!(?pos, "open_border called on a cell that is not on the border");
            return;
        }
        let (row, col) = pos;
        let outward = self.outward_directions(pos);

        let primary = [
            (row == 0, Direction::North),
            (row == self.rows - 1, Direction::South),
            (col == 0, Direction::West),
            (col == self.cols - 1, Direction::East),
        ]
        .into_iter()
        .find_map(|(on_edge, d)| on_edge.then_some(d));

        let on_border_row = row == 0 || row == self.rows - 1;
        let on_border_col = col == 0 || col == self.cols - 1;
        let corner = if on_border_row && on_border_col {
            choose(source, &outward).copied()
        } else {
            None
        };

        for direction in primary.into_iter().chain(corner) {
            self.remove_wall(row, col, direction);
        }
    }

    pub fn mark_visited(&mut self, pos: Position) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.mark_visited();
        }
    }

    /// Change le contenu d'une cellule. Hors grille : avertissement, sans effet.
    pub fn set_content(&mut self, pos: Position, content: &str) -> Result<()> {
        match self.cell_mut(pos) {
            Some(cell) => cell.set_content(content),
            None => {
                warn!(?pos, "set_content outside of the grid");
                Ok(())
            }
        }
    }

    pub(crate) fn set_glyph(&mut self, pos: Position, glyph: Glyph) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.set_glyph(glyph);
        }
    }

    pub fn unvisited_cells(&self) -> Vec<Position> {
        self.iter()
            .filter(|cell| !cell.is_visited())
            .map(Cell::position)
            .collect()
    }

    /// Parcours en largeur par les passages ouverts depuis `start`.
    /// Vrai si toutes les cellules sont atteintes.
    pub fn all_cells_accessible(&self, start: Position) -> bool {
        if !self.contains(start) {
            warn!(?start, "reachability check from outside of the grid");
            return false;
        }
        let mut seen = vec![vec![false; self.cols]; self.rows];
        let mut queue = VecDeque::from([start]);
        seen[start.0][start.1] = true;
        let mut reached = 1;

        while let Some(pos) = queue.pop_front() {
            let Some(cell) = self.cell(pos) else { continue };
            for (next, direction) in self.neighbors(pos) {
                if cell.has_wall(direction) || seen[next.0][next.1] {
                    continue;
                }
                seen[next.0][next.1] = true;
                reached += 1;
                queue.push_back(next);
            }
        }
        reached == self.cell_count()
    }

    /// Nombre de passages entre cellules voisines (chaque paire comptée une fois).
    pub fn passage_count(&self) -> usize {
        self.iter()
            .map(|cell| {
                [Direction::South, Direction::East]
                    .iter()
                    .filter(|&&d| {
                        self.neighbor_coord(cell.position(), d).is_some() && !cell.has_wall(d)
                    })
                    .count()
            })
            .sum()
    }

    /// Nombre de murs extérieurs retirés.
    pub fn exterior_openings(&self) -> usize {
        self.iter()
            .map(|cell| {
                self.outward_directions(cell.position())
                    .into_iter()
                    .filter(|&d| !cell.has_wall(d))
                    .count()
            })
            .sum()
    }

    pub fn render(&self) -> String {
        self.render_with(&RenderStyle::default())
    }

    pub fn render_with(&self, style: &RenderStyle) -> String {
        let rows: Vec<Vec<[String; 3]>> = self
            .cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.render_lines(style)).collect())
            .collect();
        merge_rows(&rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;
    use pretty_assertions::assert_eq;

    const FULL_3X3: &str = "+---+---+---+\n\
                            │   │   │   │\n\
                            +---+---+---+\n\
                            │   │   │   │\n\
                            +---+---+---+\n\
                            │   │   │   │\n\
                            +---+---+---+";

    fn grid3() -> Grid {
        Grid::new(3, 3).unwrap()
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert_eq!(
            Grid::new(0, 4),
            Err(MazeError::InvalidDimensions { rows: 0, cols: 4 })
        );
        assert_eq!(
            Grid::new(4, 0),
            Err(MazeError::InvalidDimensions { rows: 4, cols: 0 })
        );
    }

    #[test]
    fn new_rejects_oversized_dimensions() {
        assert_eq!(
            Grid::new(usize::MAX, 1),
            Err(MazeError::InvalidDimensions { rows: usize::MAX, cols: 1 })
        );
        assert_eq!(
            Grid::new(usize::MAX, 2),
            Err(MazeError::InvalidDimensions { rows: usize::MAX, cols: 2 })
        );
        assert!(Grid::new(MAX_CELLS + 1, 1).is_err());
        assert_eq!(Grid::new(1, 1).map(|g| g.cell_count()), Ok(1));
    }

    #[test]
    fn cells_know_their_position() {
        let grid = Grid::new(3, 4).unwrap();
        assert_eq!(grid.cell_count(), 12);
        for r in 0..3 {
            for c in 0..4 {
                let cell = grid.cell((r, c)).unwrap();
                assert_eq!(cell.position(), (r, c));
                assert_eq!(cell.wall_count(), 4);
                assert!(!cell.is_visited());
            }
        }
        assert!(grid.cell((3, 0)).is_none());
    }

    #[test]
    fn neighbor_coord_respects_bounds() {
        let grid = grid3();
        assert_eq!(grid.neighbor_coord((0, 0), Direction::North), None);
        assert_eq!(grid.neighbor_coord((0, 0), Direction::West), None);
        assert_eq!(grid.neighbor_coord((2, 2), Direction::South), None);
        assert_eq!(grid.neighbor_coord((2, 2), Direction::East), None);
        assert_eq!(grid.neighbor_coord((1, 1), Direction::North), Some((0, 1)));
        assert_eq!(grid.neighbor_coord((1, 1), Direction::East), Some((1, 2)));
        assert_eq!(grid.neighbors((1, 1)).len(), 4);
        assert_eq!(grid.neighbors((0, 0)).len(), 2);
    }

    #[test]
    fn remove_wall_is_symmetric() {
        for d in Direction::ALL {
            let mut grid = grid3();
            grid.remove_wall(1, 1, d);
            let neighbor = grid.neighbor_coord((1, 1), d).unwrap();
            assert!(!grid.cell((1, 1)).unwrap().has_wall(d));
            assert!(!grid.cell(neighbor).unwrap().has_wall(d.opposite()));
            assert_eq!(grid.passage_count(), 1);
        }
    }

    #[test]
    fn remove_outer_wall_touches_one_cell() {
        let mut grid = grid3();
        grid.remove_wall(0, 2, Direction::North);
        assert!(!grid.cell((0, 2)).unwrap().has_wall(Direction::North));
        assert_eq!(grid.passage_count(), 0);
        assert_eq!(grid.exterior_openings(), 1);
    }

    #[test]
    fn random_neighbor_follows_source() {
        let grid = grid3();
        let mut source = ScriptedSource::new(vec![0, 1, 2, 3]);
        let picked: Vec<_> = (0..4)
            .filter_map(|_| grid.random_neighbor((1, 1), &mut source))
            .collect();
        assert_eq!(
            picked,
            vec![
                ((0, 1), Direction::North),
                ((2, 1), Direction::South),
                ((1, 2), Direction::East),
                ((1, 0), Direction::West),
            ]
        );
    }

    #[test]
    fn random_neighbor_ignores_visited_state() {
        let mut grid = Grid::new(1, 2).unwrap();
        grid.mark_visited((0, 1));
        let mut source = ScriptedSource::first();
        assert_eq!(
            grid.random_neighbor((0, 0), &mut source),
            Some(((0, 1), Direction::East))
        );
    }

    #[test]
    fn random_neighbor_only_offers_in_bounds_cells() {
        let grid = grid3();
        // Coin (2,2) : North puis West, le tirage 2 revient sur North.
        let mut source = ScriptedSource::new(vec![0, 1, 2]);
        let north = Some(((1, 2), Direction::North));
        let west = Some(((2, 1), Direction::West));
        assert_eq!(grid.random_neighbor((2, 2), &mut source), north);
        assert_eq!(grid.random_neighbor((2, 2), &mut source), west);
        assert_eq!(grid.random_neighbor((2, 2), &mut source), north);
    }

    #[test]
    fn single_cell_has_no_neighbor() {
        let grid = Grid::new(1, 1).unwrap();
        let mut source = ScriptedSource::first();
        assert_eq!(grid.random_neighbor((0, 0), &mut source), None);
    }

    #[test]
    fn border_cells_form_the_outer_ring() {
        let grid = grid3();
        let border = grid.border_cells();
        assert_eq!(border.len(), 8);
        assert!(!border.contains(&(1, 1)));
        assert!(!grid.is_border((1, 1)));

        let mut source = ScriptedSource::new(vec![4]);
        assert_eq!(grid.random_border_cell(&mut source), (1, 2));
    }

    #[test]
    fn open_border_on_edge_cell() {
        let mut grid = grid3();
        grid.open_border((1, 0), &mut ScriptedSource::first());
        assert!(!grid.cell((1, 0)).unwrap().has_wall(Direction::West));
        assert_eq!(grid.exterior_openings(), 1);
    }

    #[test]
    fn open_border_on_corner_opens_one_or_two_walls() {
        // Premier tirage parmi [North, West] : North, déjà ouvert.
        let mut grid = grid3();
        grid.open_border((0, 0), &mut ScriptedSource::new(vec![0]));
        assert_eq!(grid.exterior_openings(), 1);
        assert!(!grid.cell((0, 0)).unwrap().has_wall(Direction::North));

        let mut grid = grid3();
        grid.open_border((0, 0), &mut ScriptedSource::new(vec![1]));
        assert_eq!(grid.exterior_openings(), 2);
        assert!(!grid.cell((0, 0)).unwrap().has_wall(Direction::West));

        let mut grid = grid3();
        grid.open_border((2, 2), &mut ScriptedSource::new(vec![1]));
        let cell = grid.cell((2, 2)).unwrap();
        assert!(!cell.has_wall(Direction::South));
        assert!(!cell.has_wall(Direction::East));
    }

    #[test]
    fn open_border_ignores_interior_cell() {
        let mut grid = grid3();
        grid.open_border((1, 1), &mut ScriptedSource::first());
        assert_eq!(grid, grid3());
    }

    #[test]
    fn accessibility_of_closed_and_open_grids() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert!(!grid.all_cells_accessible((0, 0)));

        grid.remove_wall(0, 0, Direction::East);
        grid.remove_wall(0, 1, Direction::South);
        assert!(!grid.all_cells_accessible((0, 0)));

        grid.remove_wall(1, 1, Direction::West);
        assert!(grid.all_cells_accessible((0, 0)));
        assert!(grid.all_cells_accessible((1, 0)));
        assert!(!grid.all_cells_accessible((5, 5)));
    }

    #[test]
    fn single_cell_is_accessible() {
        let grid = Grid::new(1, 1).unwrap();
        assert!(grid.all_cells_accessible((0, 0)));
    }

    #[test]
    fn render_full_grid() {
        assert_eq!(grid3().render(), FULL_3X3);
    }

    #[test]
    fn render_single_cell_with_content() {
        let mut grid = Grid::new(1, 1).unwrap();
        grid.set_content((0, 0), "X").unwrap();
        assert_eq!(grid.render(), "+---+\n│ X │\n+---+");
    }

    #[test]
    fn render_is_stable() {
        let mut grid = grid3();
        grid.remove_wall(0, 0, Direction::South);
        assert_eq!(grid.render(), grid.render());
        assert_eq!(grid.to_string(), grid.render());
    }

    #[test]
    fn render_middle_without_east() {
        let mut grid = grid3();
        grid.remove_wall(1, 1, Direction::East);
        let expected = "+---+---+---+\n\
                        │   │   │   │\n\
                        +---+---+---+\n\
                        │   │       │\n\
                        +---+---+---+\n\
                        │   │   │   │\n\
                        +---+---+---+";
        assert_eq!(grid.render(), expected);
    }

    #[test]
    fn render_middle_without_north() {
        let mut grid = grid3();
        grid.remove_wall(1, 1, Direction::North);
        let expected = "+---+---+---+\n\
                        │   │   │   │\n\
                        +---+   +---+\n\
                        │   │   │   │\n\
                        +---+---+---+\n\
                        │   │   │   │\n\
                        +---+---+---+";
        assert_eq!(grid.render(), expected);
    }

    #[test]
    fn render_corner_openings() {
        let mut grid = grid3();
        grid.remove_wall(0, 2, Direction::East);
        grid.remove_wall(2, 0, Direction::South);
        let expected = "+---+---+---+\n\
                        │   │   │    \n\
                        +---+---+---+\n\
                        │   │   │   │\n\
                        +---+---+---+\n\
                        │   │   │   │\n\
                        +   +---+---+";
        assert_eq!(grid.render(), expected);
    }

    #[test]
    fn render_bottom_left_without_west() {
        let mut grid = grid3();
        grid.remove_wall(2, 0, Direction::West);
        let expected = "+---+---+---+\n\
                        │   │   │   │\n\
                        +---+---+---+\n\
                        │   │   │   │\n\
                        +---+---+---+\n\
                        \x20   │   │   │\n\
                        +---+---+---+";
        assert_eq!(grid.render(), expected);
    }

    #[test]
    fn serializes_to_json() {
        let mut grid = Grid::new(1, 2).unwrap();
        grid.remove_wall(0, 0, Direction::East);
        let value = serde_json::to_value(&grid).unwrap();
        assert_eq!(value["rows"], 1);
        assert_eq!(value["cols"], 2);
        assert_eq!(value["cells"][0][0]["walls"]["east"], false);
        assert_eq!(value["cells"][0][1]["walls"]["west"], false);
        assert_eq!(value["cells"][0][1]["state"], "not_visited");
        assert_eq!(value["cells"][0][1]["content"], " ");
    }
}
