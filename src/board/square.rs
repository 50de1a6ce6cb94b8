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
use std::ops::{Add, BitOr, BitOrAssign, Index, IndexMut, Sub};
use strum_macros::EnumIter;
use thiserror::Error;

use super::material::Side;

pub const BOARD_SIZE: usize = 8;
pub const SQUARE_COUNT: usize = 32;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareError {
    #[error("({0}, {1}) is outside the board")]
    OutOfBounds(usize, usize),
    #[error("({0}, {1}) is not a playable square")]
    NotPlayable(usize, usize),
    #[error("{0} is not a square number between 1 and 32")]
    InvalidSquareNumber(u32),
}
use SquareError::*;

/// A grid cell. Row 0 is the top row (Black's back row), column 0 the
/// leftmost column.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    row: u8,
    col: u8,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Result<Self> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(OutOfBounds(row, col).into());
        }
        Ok(Self::from_index(row * BOARD_SIZE + col))
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        debug_assert!(index < 64);
        Self {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        }
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }
    #[inline]
    pub const fn row(&self) -> usize {
        self.row as usize
    }
    #[inline]
    pub const fn col(&self) -> usize {
        self.col as usize
    }
    /// Only dark cells are playable.
    #[inline]
    pub const fn is_dark(&self) -> bool {
        (self.row + self.col) % 2 == 1
    }
    #[inline]
    pub const fn to_mask(&self) -> CellSet {
        CellSet::new(0x1 << self.to_index())
    }
    pub fn to_square_number(&self) -> Result<SquareNumber> {
        if !self.is_dark() {
            return Err(NotPlayable(self.row(), self.col()).into());
        }
        let value = 4 * self.row + self.col / 2 + 1;
        Ok(SquareNumber(value))
    }

    pub fn iter() -> impl DoubleEndedIterator<Item = Cell> {
        (0..64).map(Cell::from_index)
    }
    pub fn dark() -> impl DoubleEndedIterator<Item = Cell> {
        Self::iter().filter(Cell::is_dark)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Maps a grid cell to its 1-32 square number.
pub fn to_square_number(row: usize, col: usize) -> Result<SquareNumber> {
    Cell::new(row, col)?.to_square_number()
}

/// Maps a 1-32 square number to its grid cell.
pub fn to_cell(number: u32) -> Result<Cell> {
    Ok(SquareNumber::new(number)?.to_cell())
}

/// One of the 32 dark squares, numbered 1-32 left-to-right and
/// top-to-bottom. Square 1 is cell (0, 1) and square 32 is cell (7, 6).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct SquareNumber(u8);

impl SquareNumber {
    pub fn new(value: u32) -> Result<Self> {
        match value {
            1..=32 => Ok(Self(value as u8)),
            _ => Err(InvalidSquareNumber(value).into()),
        }
    }
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0 as u32
    }
    /// Board row holding this square; four squares per row.
    #[inline]
    pub const fn row(&self) -> usize {
        (self.0 as usize - 1) / 4
    }
    #[inline]
    pub const fn to_cell(&self) -> Cell {
        let row = self.row();
        let col = 2 * ((self.0 as usize - 1) % 4) + (row + 1) % 2;
        Cell::from_index(row * BOARD_SIZE + col)
    }

    pub fn iter() -> impl DoubleEndedIterator<Item = SquareNumber> {
        (1..=SQUARE_COUNT as u8).map(SquareNumber)
    }
}

impl TryFrom<u8> for SquareNumber {
    type Error = SquareError;
    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1..=32 => Ok(Self(value)),
            _ => Err(InvalidSquareNumber(value as u32)),
        }
    }
}

impl From<SquareNumber> for u8 {
    fn from(value: SquareNumber) -> Self {
        value.0
    }
}

impl From<SquareNumber> for Cell {
    fn from(value: SquareNumber) -> Self {
        value.to_cell()
    }
}

impl fmt::Display for SquareNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub rows: isize,
    pub cols: isize,
}

impl Offset {
    pub const fn new(rows: isize, cols: isize) -> Self {
        Self { rows, cols }
    }
}

impl Add<Offset> for Cell {
    type Output = Option<Cell>;
    fn add(self, rhs: Offset) -> Self::Output {
        let row = self.row().checked_add_signed(rhs.rows)?;
        let col = self.col().checked_add_signed(rhs.cols)?;
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Cell::from_index(row * BOARD_SIZE + col))
        } else {
            None
        }
    }
}

impl Sub for Cell {
    type Output = Offset;
    fn sub(self, rhs: Self) -> Self::Output {
        Offset::new(
            self.row() as isize - rhs.row() as isize,
            self.col() as isize - rhs.col() as isize,
        )
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

use Direction::{DownLeft, DownRight, UpLeft, UpRight};

impl Direction {
    /// The two diagonals a man of `side` may move along. White moves
    /// toward row 0, Black toward row 7.
    pub const fn forward(side: Side) -> [Direction; 2] {
        match side {
            Side::White => [UpLeft, UpRight],
            Side::Black => [DownLeft, DownRight],
        }
    }
}

impl From<Direction> for Offset {
    fn from(value: Direction) -> Self {
        match value {
            UpLeft => Self::new(-1, -1),
            UpRight => Self::new(-1, 1),
            DownLeft => Self::new(1, -1),
            DownRight => Self::new(1, 1),
        }
    }
}

impl Add<Direction> for Cell {
    type Output = Option<Cell>;
    fn add(self, rhs: Direction) -> Self::Output {
        let offset: Offset = rhs.into();
        self + offset
    }
}

impl<T> Index<Cell> for [T; 64] {
    type Output = T;
    fn index(&self, cell: Cell) -> &Self::Output {
        &self[cell.to_index()]
    }
}

impl<T> IndexMut<Cell> for [T; 64] {
    fn index_mut(&mut self, cell: Cell) -> &mut Self::Output {
        &mut self[cell.to_index()]
    }
}

/// A set of cells packed into a u64, one bit per cell.
#[derive(Clone, Serialize, Deserialize, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellSet(u64);

impl CellSet {
    #[inline]
    pub const fn new(val: u64) -> Self {
        Self(val)
    }

    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        cells
            .into_iter()
            .map(|cell| cell.to_mask())
            .reduce(|m1, m2| m1 | m2)
            .unwrap_or_default()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn contains(&self, cell: Cell) -> bool {
        (self.0 & cell.to_mask().0) != 0
    }

    #[inline]
    pub fn insert(&mut self, cell: Cell) {
        self.0 |= cell.to_mask().0;
    }

    #[inline]
    pub fn remove(&mut self, cell: Cell) {
        self.0 &= !cell.to_mask().0;
    }

    pub fn iter(&self) -> CellSetIter {
        CellSetIter(self.0)
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let cell = Cell::from_index(row * BOARD_SIZE + col);
                write!(f, "{}", if self.contains(cell) { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self::from_cells(iter)
    }
}

impl IntoIterator for CellSet {
    type Item = Cell;
    type IntoIter = CellSetIter;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Sub<Cell> for CellSet {
    type Output = Self;
    fn sub(self, rhs: Cell) -> Self::Output {
        Self(self.0 & !rhs.to_mask().0)
    }
}

impl BitOr for CellSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign<Cell> for CellSet {
    fn bitor_assign(&mut self, rhs: Cell) {
        self.0 |= rhs.to_mask().0;
    }
}

/// Iterates a `CellSet` in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellSetIter(u64);

impl Iterator for CellSetIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 != 0 {
            let cell = Cell::from_index(self.0.trailing_zeros() as usize);
            self.0 &= self.0 - 1;
            return Some(cell);
        }
        None
    }
}

impl DoubleEndedIterator for CellSetIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.0 != 0 {
            let cell = Cell::from_index(63 - self.0.leading_zeros() as usize);
            self.0 &= !cell.to_mask().0;
            return Some(cell);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    fn cell(row: usize, col: usize) -> Cell {
        Cell::new(row, col).unwrap()
    }

    #[test]
    fn test_cell_out_of_bounds() {
        let err = Cell::new(8, 0).unwrap_err();
        assert_eq!(err.downcast_ref(), Some(&SquareError::OutOfBounds(8, 0)));
        assert!(Cell::new(0, 8).is_err());
        assert!(Cell::new(7, 7).is_ok());
    }
    #[test]
    fn test_corner_squares() {
        assert_eq!(to_square_number(0, 1).unwrap().value(), 1);
        assert_eq!(to_square_number(0, 7).unwrap().value(), 4);
        assert_eq!(to_square_number(1, 0).unwrap().value(), 5);
        assert_eq!(to_square_number(2, 1).unwrap().value(), 9);
        assert_eq!(to_square_number(7, 6).unwrap().value(), 32);
        assert_eq!(to_cell(32).unwrap(), cell(7, 6));
        assert_eq!(to_cell(5).unwrap(), cell(1, 0));
    }
    #[test]
    fn test_light_square_not_playable() {
        let err = to_square_number(0, 0).unwrap_err();
        assert_eq!(err.downcast_ref(), Some(&SquareError::NotPlayable(0, 0)));
        assert!(to_square_number(3, 5).is_err());
    }
    #[test]
    fn test_out_of_range_square_numbers() {
        for n in [0, 33, 100] {
            let err = to_cell(n).unwrap_err();
            assert_eq!(err.downcast_ref(), Some(&SquareError::InvalidSquareNumber(n)));
        }
    }
    #[test]
    fn test_cell_to_number_bijection() {
        let mut count = 0;
        for cell in Cell::dark() {
            let number = cell.to_square_number().unwrap();
            assert_eq!(number.to_cell(), cell);
            assert_eq!(to_cell(number.value()).unwrap(), cell);
            count += 1;
        }
        assert_eq!(count, SQUARE_COUNT);
    }
    #[test]
    fn test_number_to_cell_bijection() {
        for number in SquareNumber::iter() {
            let cell = number.to_cell();
            assert!(cell.is_dark());
            assert_eq!(cell.to_square_number().unwrap(), number);
        }
        assert_eq!(SquareNumber::iter().count(), SQUARE_COUNT);
    }
    #[test]
    fn test_square_rows() {
        assert_eq!(SquareNumber::new(4).unwrap().row(), 0);
        assert_eq!(SquareNumber::new(5).unwrap().row(), 1);
        assert_eq!(SquareNumber::new(32).unwrap().row(), 7);
    }
    #[test]
    fn test_direction_offsets() {
        let origin = cell(4, 3);
        assert_eq!(origin + Direction::UpLeft, Some(cell(3, 2)));
        assert_eq!(origin + Direction::DownRight, Some(cell(5, 4)));
        assert_eq!(cell(0, 1) + Direction::UpRight, None);
        assert_eq!(cell(5, 0) + Direction::DownLeft, None);
        assert_eq!(cell(6, 5) - cell(4, 3), Offset::new(2, 2));
    }
    #[test]
    fn test_cell_set() {
        let mut set = CellSet::from_cells([cell(5, 0), cell(2, 3)]);
        assert_eq!(set.len(), 2);
        assert!(set.contains(cell(2, 3)));
        set.insert(cell(7, 7));
        set.remove(cell(5, 0));
        let cells: Vec<Cell> = set.iter().collect();
        assert_eq!(cells, vec![cell(2, 3), cell(7, 7)]);
        let reversed: Vec<Cell> = set.iter().rev().collect();
        assert_eq!(reversed, vec![cell(7, 7), cell(2, 3)]);
        assert!((set - cell(2, 3) - cell(7, 7)).is_empty());
    }
    #[test]
    fn test_square_number_serde() {
        let number = SquareNumber::new(17).unwrap();
        assert_eq!(serde_json::to_string(&number).unwrap(), "17");
        assert_eq!(serde_json::from_str::<SquareNumber>("17").unwrap(), number);
        assert!(serde_json::from_str::<SquareNumber>("33").is_err());
    }
}
