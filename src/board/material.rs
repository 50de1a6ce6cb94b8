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

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut, Not};
use strum_macros::Display;
use strum_macros::EnumIter;

/// White is played by the human, Black by the opponent.
#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Side {
    White,
    Black,
}

use Side::{Black, White};

impl Not for Side {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            White => Black,
            Black => White,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    White,
    Black,
}

impl CellState {
    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(*self, CellState::Empty)
    }

    #[inline]
    pub const fn side(&self) -> Option<Side> {
        match self {
            CellState::Empty => None,
            CellState::White => Some(White),
            CellState::Black => Some(Black),
        }
    }

    #[inline]
    pub fn is_side(&self, side: Side) -> bool {
        self.side() == Some(side)
    }

    pub const fn to_char(&self) -> char {
        match self {
            CellState::Empty => '_',
            CellState::White => 'w',
            CellState::Black => 'b',
        }
    }
}

impl From<Side> for CellState {
    fn from(value: Side) -> Self {
        match value {
            White => CellState::White,
            Black => CellState::Black,
        }
    }
}

impl From<Option<Side>> for CellState {
    fn from(value: Option<Side>) -> Self {
        value.map(CellState::from).unwrap_or_default()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pair<T>((T, T));

impl<T> Pair<T> {
    pub const fn new(white: T, black: T) -> Self {
        Self((white, black))
    }
}

impl<T> Pair<T> {
    pub fn white(&self) -> &T {
        &self.0 .0
    }
    pub fn white_mut(&mut self) -> &mut T {
        &mut self.0 .0
    }
    pub fn black(&self) -> &T {
        &self.0 .1
    }
    pub fn black_mut(&mut self) -> &mut T {
        &mut self.0 .1
    }
}

impl<T: Hash> Hash for Pair<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.white().hash(state);
        self.black().hash(state);
    }
}

impl<T> Index<Side> for Pair<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: Side) -> &Self::Output {
        match index {
            White => self.white(),
            Black => self.black(),
        }
    }
}

impl<T> IndexMut<Side> for Pair<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: Side) -> &mut Self::Output {
        match index {
            White => self.white_mut(),
            Black => self.black_mut(),
        }
    }
}
