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
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Index;
use strum::IntoEnumIterator;
use thiserror::Error;

use super::material::{Pair, Side};
use super::position::Board;
use super::square::{Cell, CellSet, Direction};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("{0} to {1} is not a legal move")]
    IllegalMove(Cell, Cell),
}
use MoveError::*;

/// A single validated hop. Multi-jump chains are sequences of these.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegalHop {
    Step(Cell, Cell),
    Jump(Cell, Cell),
}

impl LegalHop {
    #[inline]
    pub fn origin(&self) -> Cell {
        match *self {
            LegalHop::Step(from, _) | LegalHop::Jump(from, _) => from,
        }
    }
    #[inline]
    pub fn destination(&self) -> Cell {
        match *self {
            LegalHop::Step(_, to) | LegalHop::Jump(_, to) => to,
        }
    }
    #[inline]
    pub fn is_jump(&self) -> bool {
        matches!(*self, LegalHop::Jump(_, _))
    }
}

/// Shape of a hop between two cells, ignoring occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HopShape {
    Step,
    Jump,
    Other,
}

impl HopShape {
    pub fn of(from: Cell, to: Cell) -> Self {
        let offset = to - from;
        match (offset.rows.abs(), offset.cols.abs()) {
            (1, 1) => HopShape::Step,
            (2, 2) => HopShape::Jump,
            _ => HopShape::Other,
        }
    }
}

pub trait LegalHops: AsRef<Board> {
    /// Every hop the piece on `from` may make, keyed by destination.
    /// Empty unless `from` holds a piece of `side`.
    fn legal_hops(&self, side: Side, from: Cell) -> HopSet {
        let board: &Board = self.as_ref();
        let mut result = HopSet::new();
        if !board[from].is_side(side) {
            return result;
        }
        for ray in FORWARD_RAYS[side][from].iter().flatten() {
            let neighbour = board[ray.step];
            if neighbour.is_empty() {
                result.insert(ray.step, LegalHop::Step(from, ray.step));
            } else if neighbour.is_side(!side) {
                if let Some(landing) = ray.jump {
                    if board[landing].is_empty() {
                        result.insert(landing, LegalHop::Jump(from, landing));
                    }
                }
            }
        }
        result
    }

    fn legal_destinations(&self, side: Side, from: Cell) -> CellSet {
        self.legal_hops(side, from).destinations()
    }

    fn validate_hop(&self, side: Side, from: Cell, to: Cell) -> Result<LegalHop> {
        self.legal_hops(side, from)
            .get(to)
            .ok_or_else(|| IllegalMove(from, to).into())
    }

    fn is_legal(&self, side: Side, from: Cell, to: Cell) -> bool {
        self.legal_hops(side, from).contains(to)
    }

    /// All hops available to `side`, ordered by origin then destination.
    fn all_hops(&self, side: Side) -> Vec<LegalHop> {
        let board: &Board = self.as_ref();
        let mut hops = Vec::new();
        for from in board.pieces(side) {
            let moves = self.legal_hops(side, from);
            hops.extend(moves.destinations().iter().filter_map(|to| moves.get(to)));
        }
        hops
    }

    fn can_move(&self, side: Side) -> bool {
        let board: &Board = self.as_ref();
        board
            .pieces(side)
            .iter()
            .any(|from| !self.legal_destinations(side, from).is_empty())
    }
}

impl AsRef<Board> for Board {
    fn as_ref(&self) -> &Board {
        self
    }
}

impl LegalHops for Board {}

#[derive(Debug, Clone, Default)]
pub struct HopSet {
    destinations: CellSet,
    map: HashMap<Cell, LegalHop>,
}

impl HopSet {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn insert(&mut self, dest: Cell, hop: LegalHop) {
        self.destinations |= dest;
        self.map.insert(dest, hop);
    }
    pub fn destinations(&self) -> CellSet {
        self.destinations
    }
    pub fn get(&self, dest: Cell) -> Option<LegalHop> {
        self.map.get(&dest).copied()
    }
    pub fn contains(&self, dest: Cell) -> bool {
        self.destinations.contains(dest)
    }
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

impl Index<Cell> for HopSet {
    type Output = LegalHop;
    fn index(&self, dest: Cell) -> &Self::Output {
        self.map.index(&dest)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ray {
    step: Cell,
    jump: Option<Cell>,
}

// Forward diagonals per side and dark cell: the adjacent cell and the
// landing cell one further along the same diagonal.
static FORWARD_RAYS: Lazy<Pair<[[Option<Ray>; 2]; 64]>> = Lazy::new(|| {
    let mut rays = Pair::new([[None; 2]; 64], [[None; 2]; 64]);
    for side in Side::iter() {
        for cell in Cell::dark() {
            for (i, dir) in Direction::forward(side).into_iter().enumerate() {
                rays[side][cell][i] = (cell + dir).map(|step| Ray {
                    step,
                    jump: step + dir,
                });
            }
        }
    }
    rays
});

#[cfg(test)]
mod tests {
    use crate::*;

    fn cell(row: usize, col: usize) -> Cell {
        Cell::new(row, col).unwrap()
    }

    #[test]
    fn test_hop_shape() {
        assert_eq!(HopShape::of(cell(5, 0), cell(4, 1)), HopShape::Step);
        assert_eq!(HopShape::of(cell(5, 0), cell(3, 2)), HopShape::Jump);
        assert_eq!(HopShape::of(cell(5, 0), cell(3, 0)), HopShape::Other);
        assert_eq!(HopShape::of(cell(5, 0), cell(5, 0)), HopShape::Other);
    }
    #[test]
    fn test_white_starting_destinations() {
        let board = Board::standard();
        let mut movable = 0;
        for from in board.pieces(Side::White) {
            let expected: CellSet = Direction::forward(Side::White)
                .into_iter()
                .filter_map(|dir| from + dir)
                .filter(|to| board[*to].is_empty())
                .collect();
            let hops = board.legal_hops(Side::White, from);
            assert_eq!(hops.destinations(), expected);
            for to in hops.destinations() {
                assert!(!hops[to].is_jump());
            }
            if !expected.is_empty() {
                movable += 1;
            }
        }
        assert_eq!(movable, 4);
    }
    #[test]
    fn test_front_row_piece() {
        let board = Board::standard();
        let destinations = board.legal_destinations(Side::White, cell(5, 2));
        assert_eq!(destinations, CellSet::from_cells([cell(4, 1), cell(4, 3)]));
        let edge = board.legal_destinations(Side::White, cell(5, 0));
        assert_eq!(edge, CellSet::from_cells([cell(4, 1)]));
    }
    #[test]
    fn test_black_moves_down() {
        let board = Board::standard();
        let destinations = board.legal_destinations(Side::Black, cell(2, 3));
        assert_eq!(destinations, CellSet::from_cells([cell(3, 2), cell(3, 4)]));
    }
    #[test]
    fn test_wrong_side_or_empty_cell() {
        let board = Board::standard();
        assert!(board.legal_destinations(Side::White, cell(2, 3)).is_empty());
        assert!(board.legal_destinations(Side::Black, cell(5, 2)).is_empty());
        assert!(board.legal_destinations(Side::White, cell(4, 1)).is_empty());
    }
    #[test]
    fn test_jump_over_opponent() {
        let board = Board::empty()
            .set_contents(cell(4, 3), CellState::White)
            .set_contents(cell(3, 2), CellState::Black)
            .set_contents(cell(3, 4), CellState::White);
        let hops = board.legal_hops(Side::White, cell(4, 3));
        assert_eq!(hops.destinations(), CellSet::from_cells([cell(2, 1)]));
        assert_eq!(hops[cell(2, 1)], LegalHop::Jump(cell(4, 3), cell(2, 1)));
    }
    #[test]
    fn test_jump_blocked() {
        let board = Board::empty()
            .set_contents(cell(4, 3), CellState::White)
            .set_contents(cell(3, 2), CellState::Black)
            .set_contents(cell(2, 1), CellState::Black);
        let destinations = board.legal_destinations(Side::White, cell(4, 3));
        assert_eq!(destinations, CellSet::from_cells([cell(3, 4)]));
    }
    #[test]
    fn test_jump_off_board() {
        let board = Board::empty()
            .set_contents(cell(1, 2), CellState::White)
            .set_contents(cell(0, 1), CellState::Black)
            .set_contents(cell(0, 3), CellState::Black);
        assert!(board.legal_destinations(Side::White, cell(1, 2)).is_empty());
        assert!(!board.can_move(Side::White));
    }
    #[test]
    fn test_no_backward_moves() {
        let board = Board::empty()
            .set_contents(cell(4, 3), CellState::White)
            .set_contents(cell(5, 2), CellState::Black);
        let destinations = board.legal_destinations(Side::White, cell(4, 3));
        assert_eq!(destinations, CellSet::from_cells([cell(3, 2), cell(3, 4)]));
    }
    #[test]
    fn test_validate_hop() {
        let board = Board::standard();
        let hop = board.validate_hop(Side::White, cell(5, 2), cell(4, 3)).unwrap();
        assert_eq!(hop, LegalHop::Step(cell(5, 2), cell(4, 3)));
        let err = board
            .validate_hop(Side::White, cell(5, 2), cell(3, 4))
            .unwrap_err();
        assert_eq!(
            err.downcast_ref(),
            Some(&MoveError::IllegalMove(cell(5, 2), cell(3, 4)))
        );
        assert!(board.is_legal(Side::Black, cell(2, 1), cell(3, 0)));
    }
    #[test]
    fn test_all_hops_at_start() {
        let board = Board::standard();
        assert_eq!(board.all_hops(Side::White).len(), 7);
        assert_eq!(board.all_hops(Side::Black).len(), 7);
        assert!(board.can_move(Side::Black));
    }
}
