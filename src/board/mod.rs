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

//! Checkers board and turn sequencing
//!
//! A _board_ holds the occupancy of the 64 cells of a standard 8x8
//! checkers board, and a _game_ sequences a human (White) against a
//! move-producing opponent (Black). The following rules are supported:
//!
//! [x] Simple diagonal steps toward the opponent's side
//! [x] Single jumps over an adjacent opposing piece
//! [x] Multi-jump chains written as one token (`1x10x17`)
//! [ ] Kings and promotion
//! [ ] Mandatory captures
//! [ ] Win/draw detection
//!
//! Some of the key abstractions include:
//!
//! * A `Cell` is a `(row, col)` coordinate on the grid, with row 0 at the
//!   top (Black's back row). Only dark cells, where `row + col` is odd,
//!   ever hold a piece. A `SquareNumber` names one of the 32 dark cells
//!   using standard checkers numbering: 1-4 on row 0, 5-8 on row 1 and so
//!   on. The two are interchangeable through `Cell::to_square_number` and
//!   `SquareNumber::to_cell`.
//!
//! * A `CellSet` is a 64-bit (u64) value in which each bit maps to a cell.
//!   It is used for the pieces of each side and for the legal
//!   destinations of a piece.
//!
//! * `Board` is a state container with `get`, `set`, `remove` and
//!   `move_piece`. It performs bounds checks and nothing else.
//!
//! * `LegalHops` computes legal steps and jumps for a piece. A hop is
//!   validated on its own, so a capture chain is validated one jump at a
//!   time against the board left by the previous jump. `captured_square`
//!   finds the piece a jump removes from the two square numbers alone.
//!
//! * `Move` is a parsed notation token: `Simple` for `9-13`, `Capture`
//!   for `1x10x17`. Its `hops()` are the ordered `(from, to)` pairs.
//!
//! * `Game` owns a board and a `Phase` and is the only mutator once play
//!   starts. Human input arrives as cell selections; the opponent's move
//!   is requested from an `Opponent` with `play_opponent`.
//!

mod capture;
mod material;
mod moves;
mod notation;
mod play;
mod position;
mod square;

pub use capture::*;
pub use material::*;
pub use moves::*;
pub use notation::*;
pub use play::*;
pub use position::*;
pub use square::*;

pub trait Turn {
    fn turn(&self) -> Side;
}
