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

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::capture::captured_square;
use super::material::Side;
use super::moves::{LegalHop, LegalHops};
use super::notation::{parse, Move};
use super::position::Board;
use super::square::{Cell, CellSet};
use super::Turn;
use crate::game::Opponent;

/// The side driven by cell selections.
pub const HUMAN: Side = Side::White;
/// The side driven by an `Opponent`.
pub const OPPONENT: Side = Side::Black;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnError {
    #[error("It is not {0}'s turn")]
    OutOfTurn(Side),
}

/// Where the game is within a turn. A plain value: transitions take a phase
/// and produce the next one without touching the board.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    AwaitingSelection(Side),
    PieceSelected {
        side: Side,
        origin: Cell,
        destinations: CellSet,
    },
    AwaitingOpponent(Side),
}

impl Phase {
    /// Side whose turn this phase opens, given the side that just moved.
    pub fn after_move(moved: Side) -> Self {
        let next = !moved;
        if next == HUMAN {
            Phase::AwaitingSelection(next)
        } else {
            Phase::AwaitingOpponent(next)
        }
    }

    /// Computes the effect of selecting `cell`. Returns the next phase and,
    /// when a selected piece is sent to one of its destinations, the hop to
    /// apply. The returned phase does not yet reflect the hop.
    pub fn on_select(self, board: &Board, cell: Cell) -> (Phase, Option<LegalHop>) {
        match self {
            Phase::AwaitingSelection(side) => {
                let destinations = board.legal_destinations(side, cell);
                if destinations.is_empty() {
                    (self, None)
                } else {
                    let phase = Phase::PieceSelected {
                        side,
                        origin: cell,
                        destinations,
                    };
                    (phase, None)
                }
            }
            Phase::PieceSelected {
                side,
                origin,
                destinations,
            } => {
                let phase = Phase::AwaitingSelection(side);
                if cell != origin && destinations.contains(cell) {
                    (phase, board.legal_hops(side, origin).get(cell))
                } else {
                    (phase, None)
                }
            }
            Phase::AwaitingOpponent(_) => (self, None),
        }
    }

    pub fn selection(&self) -> Option<(Cell, CellSet)> {
        match *self {
            Phase::PieceSelected {
                origin,
                destinations,
                ..
            } => Some((origin, destinations)),
            _ => None,
        }
    }
}

impl Turn for Phase {
    fn turn(&self) -> Side {
        match *self {
            Phase::AwaitingSelection(side)
            | Phase::PieceSelected { side, .. }
            | Phase::AwaitingOpponent(side) => side,
        }
    }
}

/// A hop as it was applied, with the cell whose piece was captured.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AppliedHop {
    pub hop: LegalHop,
    pub captured: Option<Cell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Ignored,
    Selected(Cell, CellSet),
    Deselected,
    Moved(AppliedHop),
}

/// Owns the board and the current phase, and is the only thing that
/// mutates the board once a game is underway.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    phase: Phase,
    history: Vec<Move>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_board(Board::standard())
    }

    /// Starts from an arbitrary board with the human to move.
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            phase: Phase::AwaitingSelection(HUMAN),
            history: Vec::new(),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Moves applied so far, in order, as written in notation.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Handles a selection of grid cell `(row, col)`.
    pub fn select(&mut self, row: usize, col: usize) -> Result<Selection> {
        let cell = Cell::new(row, col)?;
        self.select_cell(cell)
    }

    pub fn select_cell(&mut self, cell: Cell) -> Result<Selection> {
        let (phase, hop) = self.phase.on_select(&self.board, cell);
        debug!(%cell, from = ?self.phase, to = ?phase, "selection");
        if let Some(hop) = hop {
            let side = phase.turn();
            let mv = Move::from_hop(hop)?;
            let applied = self.apply_hop(side, hop)?;
            info!(%side, %mv, "move applied");
            self.history.push(mv);
            self.phase = Phase::after_move(side);
            return Ok(Selection::Moved(applied));
        }
        let selection = match phase.selection() {
            Some((origin, destinations)) => Selection::Selected(origin, destinations),
            None if self.phase.selection().is_some() => Selection::Deselected,
            None => Selection::Ignored,
        };
        self.phase = phase;
        Ok(selection)
    }

    /// True if the active side may hop from `from` to `to`.
    pub fn is_valid_move(&self, from: Cell, to: Cell) -> bool {
        self.board.is_legal(self.turn(), from, to)
    }

    /// Applies every hop of `mv` for the active side, validating each one
    /// against the board as left by the previous hop.
    ///
    /// # Errors
    ///
    /// `MalformedToken` for a capture with no hops or a broken chain.
    /// `IllegalMove` for the first hop that fails validation. Hops applied
    /// before it stay applied and only those are recorded in the history. If
    /// none were applied the turn does not pass.
    pub fn submit_move(&mut self, mv: &Move) -> Result<Vec<AppliedHop>> {
        mv.validate()?;
        let side = self.turn();
        let mut applied = Vec::new();
        let result = self.apply_hops(side, mv, &mut applied);
        if !applied.is_empty() {
            self.history.push(mv.truncated(applied.len()));
            self.phase = Phase::after_move(side);
        } else if let Phase::PieceSelected { side, .. } = self.phase {
            self.phase = Phase::AwaitingSelection(side);
        }
        result?;
        info!(%side, %mv, hops = applied.len(), "move applied");
        Ok(applied)
    }

    /// Requests one move from `opponent` and applies it.
    ///
    /// # Errors
    ///
    /// `OutOfTurn` unless the game is waiting on the opponent. Otherwise any
    /// error from the opponent, the parser or the validator; see
    /// `submit_move` for what stays applied.
    pub fn play_opponent<O>(&mut self, opponent: &mut O) -> Result<Vec<AppliedHop>>
    where
        O: Opponent + ?Sized,
    {
        let Phase::AwaitingOpponent(side) = self.phase else {
            return Err(TurnError::OutOfTurn(OPPONENT).into());
        };
        let token = opponent
            .generate_move(&self.board)
            .with_context(|| format!("{} could not produce a move", side))?;
        let result = parse(&token).and_then(|mv| self.submit_move(&mv));
        if let Err(err) = &result {
            warn!(%side, %token, error = %err, "rejected opponent move");
        }
        result
    }

    fn apply_hops(&mut self, side: Side, mv: &Move, applied: &mut Vec<AppliedHop>) -> Result<()> {
        let hops = mv.hops();
        let count = hops.len();
        for (i, (from, to)) in hops.into_iter().enumerate() {
            let hop = self
                .board
                .validate_hop(side, from.to_cell(), to.to_cell())
                .with_context(|| format!("hop {} of {} in {}", i + 1, count, mv))?;
            applied.push(self.apply_hop(side, hop)?);
        }
        Ok(())
    }

    fn apply_hop(&mut self, side: Side, hop: LegalHop) -> Result<AppliedHop> {
        let (from, to) = (hop.origin(), hop.destination());
        let captured = match hop {
            LegalHop::Step(_, _) => None,
            LegalHop::Jump(_, _) => {
                let square = captured_square(from.to_square_number()?, to.to_square_number()?)?;
                let cell = square.to_cell();
                debug_assert!(self.board[cell].is_side(!side));
                Some(cell)
            }
        };
        self.board.relocate(from, to)?;
        if let Some(cell) = captured {
            self.board.remove(cell.row(), cell.col())?;
        }
        debug!(%side, %from, %to, ?captured, "hop applied");
        Ok(AppliedHop { hop, captured })
    }
}

impl Turn for Game {
    fn turn(&self) -> Side {
        self.phase.turn()
    }
}

impl AsRef<Board> for Game {
    fn as_ref(&self) -> &Board {
        &self.board
    }
}

impl LegalHops for Game {}
