// Copyright 2023 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use thiserror::Error;

use super::material::{CellState, Pair, Side};
use super::square::{Cell, CellSet, SquareError, BOARD_SIZE};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("No piece to move at {0}")]
    EmptySource(Cell),
}

/// Cell occupancy as exchanged with other components: `snapshot[row][col]`.
pub type BoardSnapshot = [[CellState; BOARD_SIZE]; BOARD_SIZE];

/// The 8x8 grid. A plain state container: it knows nothing about the rules
/// beyond keeping pieces on dark cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot", into = "BoardSnapshot")]
pub struct Board {
    cells: [CellState; 64],
    pieces: Pair<CellSet>,
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [CellState::Empty; 64],
            pieces: Pair::new(CellSet::empty(), CellSet::empty()),
        }
    }

    /// Black on the dark cells of rows 0-2, White on rows 5-7.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for cell in Cell::dark() {
            match cell.row() {
                0..=2 => board.put(cell, CellState::Black),
                5..=7 => board.put(cell, CellState::White),
                _ => {}
            }
        }
        board
    }

    pub fn get(&self, row: usize, col: usize) -> Result<CellState> {
        let cell = Cell::new(row, col)?;
        Ok(self.cells[cell])
    }

    /// Fails with `NotPlayable` when placing a piece on a light cell.
    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<()> {
        let cell = Cell::new(row, col)?;
        if !state.is_empty() && !cell.is_dark() {
            return Err(SquareError::NotPlayable(row, col).into());
        }
        self.put(cell, state);
        Ok(())
    }

    /// Clears a cell and returns its previous occupant.
    pub fn remove(&mut self, row: usize, col: usize) -> Result<CellState> {
        let cell = Cell::new(row, col)?;
        Ok(self.take(cell))
    }

    /// Relocates the occupant of the source cell. The destination is
    /// overwritten; legality is the validator's concern.
    pub fn move_piece(
        &mut self,
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
    ) -> Result<()> {
        let from = Cell::new(from_row, from_col)?;
        let to = Cell::new(to_row, to_col)?;
        self.relocate(from, to)
    }

    pub fn relocate(&mut self, from: Cell, to: Cell) -> Result<()> {
        if self.cells[from].is_empty() {
            return Err(BoardError::EmptySource(from).into());
        }
        if !to.is_dark() {
            return Err(SquareError::NotPlayable(to.row(), to.col()).into());
        }
        let state = self.take(from);
        self.put(to, state);
        Ok(())
    }

    #[inline]
    pub fn contents(&self, cell: Cell) -> CellState {
        self.cells[cell]
    }

    #[inline]
    pub fn pieces(&self, side: Side) -> CellSet {
        self.pieces[side]
    }

    #[inline]
    pub fn count(&self, side: Side) -> usize {
        self.pieces[side].len()
    }

    #[inline]
    pub fn occupied(&self) -> CellSet {
        *self.pieces.white() | *self.pieces.black()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut snapshot = [[CellState::Empty; BOARD_SIZE]; BOARD_SIZE];
        for cell in Cell::iter() {
            snapshot[cell.row()][cell.col()] = self.cells[cell];
        }
        snapshot
    }

    fn put(&mut self, cell: Cell, state: CellState) {
        self.take(cell);
        if let Some(side) = state.side() {
            self.pieces[side].insert(cell);
        }
        self.cells[cell] = state;
    }

    fn take(&mut self, cell: Cell) -> CellState {
        let previous = std::mem::take(&mut self.cells[cell]);
        if let Some(side) = previous.side() {
            self.pieces[side].remove(cell);
        }
        previous
    }
}

impl Index<Cell> for Board {
    type Output = CellState;
    fn index(&self, index: Cell) -> &Self::Output {
        &self.cells[index]
    }
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = SquareError;

    fn try_from(snapshot: BoardSnapshot) -> std::result::Result<Self, Self::Error> {
        let mut board = Self::empty();
        for (row, states) in snapshot.iter().enumerate() {
            for (col, state) in states.iter().enumerate() {
                let cell = Cell::from_index(row * BOARD_SIZE + col);
                if !state.is_empty() && !cell.is_dark() {
                    return Err(SquareError::NotPlayable(row, col));
                }
                board.put(cell, *state);
            }
        }
        Ok(board)
    }
}

impl From<Board> for BoardSnapshot {
    fn from(board: Board) -> Self {
        board.snapshot()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let cell = Cell::from_index(row * BOARD_SIZE + col);
                let c = if cell.is_dark() {
                    self.cells[cell].to_char()
                } else {
                    '.'
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
impl Board {
    pub fn set_contents(mut self, cell: Cell, state: CellState) -> Self {
        self.put(cell, state);
        self
    }
}
