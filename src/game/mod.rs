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

//! Move-generating collaborators.
//!
//! The game asks an `Opponent` for one token per turn and treats whatever
//! comes back as untrusted input: it is parsed and every hop validated
//! before the board changes.

use anyhow::Result;
#[cfg(feature = "random")]
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::collections::VecDeque;
use thiserror::Error;

use crate::Board;
#[cfg(feature = "random")]
use crate::{LegalHops, Move, OPPONENT};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentError {
    #[error("No moves left to replay")]
    Exhausted,
    #[error("No legal move available")]
    NoMoves,
}

pub trait Opponent {
    /// Produces one move token, e.g. `"11-15"` or `"1x10x17"`.
    fn generate_move(&mut self, board: &Board) -> Result<String>;
}

impl<F> Opponent for F
where
    F: FnMut(&Board) -> Result<String>,
{
    fn generate_move(&mut self, board: &Board) -> Result<String> {
        self(board)
    }
}

/// Plays back a recorded sequence of tokens, one per turn, without looking
/// at the board.
#[derive(Debug, Clone, Default)]
pub struct ReplayOpponent {
    tokens: VecDeque<String>,
}

impl ReplayOpponent {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Takes every other token of a recorded game, starting with the
    /// opponent's first reply.
    pub fn from_record<I, S>(record: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(record.into_iter().skip(1).step_by(2))
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }
}

impl Opponent for ReplayOpponent {
    fn generate_move(&mut self, _board: &Board) -> Result<String> {
        self.tokens
            .pop_front()
            .ok_or_else(|| OpponentError::Exhausted.into())
    }
}

/// Picks uniformly among the opponent's legal hops.
#[cfg(feature = "random")]
#[derive(Debug, Clone)]
pub struct RandomOpponent {
    rng: StdRng,
}

#[cfg(feature = "random")]
impl RandomOpponent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

#[cfg(feature = "random")]
impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "random")]
impl Opponent for RandomOpponent {
    fn generate_move(&mut self, board: &Board) -> Result<String> {
        let hops = board.all_hops(OPPONENT);
        let hop = hops.choose(&mut self.rng).ok_or(OpponentError::NoMoves)?;
        Ok(Move::from_hop(*hop)?.to_string())
    }
}
