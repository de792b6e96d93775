//! Fixed-shape alien grid.
//!
//! Cells are stored row-major, row 0 being the lowest row on screen. A cell is
//! either a live alien or `None`; killing an alien empties its cell but never
//! changes the grid's shape.

use crate::config::GameConfig;
use crate::entities::{Alien, AlienKind};
use crate::error::GameError;

#[derive(Clone, Debug, PartialEq)]
pub struct AlienGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Alien>>,
}

impl AlienGrid {
    /// Build from explicit cells (row-major, `rows * cols` long).
    pub fn from_cells(
        rows: usize,
        cols: usize,
        cells: Vec<Option<Alien>>,
    ) -> Result<Self, GameError> {
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyFormation { rows, cols });
        }
        if cells.len() != rows * cols {
            return Err(GameError::FormationShape {
                rows,
                cols,
                cells: cells.len(),
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// The standard starting formation: a full block hanging `alien_ceiling`
    /// below the top of the screen.
    pub fn standard(config: &GameConfig) -> Result<Self, GameError> {
        let rows = config.alien_rows;
        let cols = config.aliens_in_row;
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyFormation { rows, cols });
        }

        let row_pitch = config.alien_v_sep + config.alien_height;
        let base_y = config.game_height
            - config.alien_ceiling
            - 0.5 * config.alien_height
            - (rows - 1) as f32 * row_pitch;

        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let x = (col + 1) as f32 * config.alien_width + col as f32 * config.alien_h_sep;
                let y = base_y + row as f32 * row_pitch;
                cells.push(Some(Alien::new(
                    x,
                    y,
                    config.alien_width,
                    config.alien_height,
                    AlienKind::for_row(row),
                )));
            }
        }
        Self::from_cells(rows, cols, cells)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    /// The live alien at `(row, col)`, or `None` if the cell is empty or
    /// outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<&Alien> {
        self.index(row, col).and_then(|i| self.cells[i].as_ref())
    }

    /// Empty a cell. Returns the alien that was there, if any.
    pub fn kill(&mut self, row: usize, col: usize) -> Option<Alien> {
        let i = self.index(row, col)?;
        self.cells[i].take()
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Every live alien with its `(row, col)`.
    pub fn iter_live(&self) -> impl Iterator<Item = ((usize, usize), &Alien)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.as_ref().map(|a| ((i / cols, i % cols), a)))
    }

    pub fn iter_live_mut(&mut self) -> impl Iterator<Item = &mut Alien> + '_ {
        self.cells.iter_mut().filter_map(Option::as_mut)
    }

    /// Smallest and largest centre x over all live aliens.
    pub fn x_extent(&self) -> Option<(f32, f32)> {
        self.iter_live().fold(None, |acc, (_, a)| match acc {
            None => Some((a.x, a.x)),
            Some((lo, hi)) => Some((lo.min(a.x), hi.max(a.x))),
        })
    }

    /// Columns that still hold at least one live alien.
    pub fn occupied_columns(&self) -> Vec<usize> {
        (0..self.cols)
            .filter(|&col| (0..self.rows).any(|row| self.get(row, col).is_some()))
            .collect()
    }

    /// The lowest live alien in a column, scanning up from row 0.
    pub fn lowest_in_column(&self, col: usize) -> Option<&Alien> {
        (0..self.rows).find_map(|row| self.get(row, col))
    }
}
