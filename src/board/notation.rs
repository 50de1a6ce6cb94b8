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
use std::str::FromStr;
use thiserror::Error;

use super::moves::{HopShape, LegalHop};
use super::square::SquareNumber;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("Malformed move token: {0:?}")]
    MalformedToken(String),
}
use NotationError::*;

/// A move as written in standard notation. Captured squares are never
/// part of the token; they are derived from each hop.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "MoveRecord")]
pub enum Move {
    Simple {
        from: SquareNumber,
        to: SquareNumber,
    },
    Capture {
        hops: Vec<(SquareNumber, SquareNumber)>,
    },
}

impl Move {
    /// The ordered `(from, to)` pairs. Each capture hop starts where the
    /// previous one landed.
    pub fn hops(&self) -> Vec<(SquareNumber, SquareNumber)> {
        match self {
            Move::Simple { from, to } => vec![(*from, *to)],
            Move::Capture { hops } => hops.clone(),
        }
    }

    pub fn is_capture(&self) -> bool {
        matches!(self, Move::Capture { .. })
    }

    /// Builds a chain from the squares visited, origin first.
    pub fn capture(squares: &[SquareNumber]) -> Result<Self> {
        let hops = squares.windows(2).map(|pair| (pair[0], pair[1])).collect();
        let mv = Move::Capture { hops };
        mv.validate().map_err(|_| MalformedToken(join(squares)))?;
        Ok(mv)
    }

    /// Checks that a capture has at least one hop, that every hop is a jump
    /// and that each hop starts where the previous one landed.
    pub fn validate(&self) -> Result<(), NotationError> {
        let Move::Capture { hops } = self else {
            return Ok(());
        };
        let malformed = || MalformedToken(format!("{:?}", hops));
        if hops.is_empty() {
            return Err(malformed());
        }
        for (from, to) in hops {
            if HopShape::of(from.to_cell(), to.to_cell()) != HopShape::Jump {
                return Err(malformed());
            }
        }
        if hops.windows(2).any(|pair| pair[0].1 != pair[1].0) {
            return Err(malformed());
        }
        Ok(())
    }

    /// The first `count` hops of this move. A simple move is returned whole.
    pub fn truncated(&self, count: usize) -> Self {
        match self {
            Move::Capture { hops } if count < hops.len() => Move::Capture {
                hops: hops[..count].to_vec(),
            },
            _ => self.clone(),
        }
    }

    pub fn from_hop(hop: LegalHop) -> Result<Self> {
        let from = hop.origin().to_square_number()?;
        let to = hop.destination().to_square_number()?;
        Ok(match hop {
            LegalHop::Step(_, _) => Move::Simple { from, to },
            LegalHop::Jump(_, _) => Move::Capture {
                hops: vec![(from, to)],
            },
        })
    }
}

#[derive(Deserialize)]
enum MoveRecord {
    Simple {
        from: SquareNumber,
        to: SquareNumber,
    },
    Capture {
        hops: Vec<(SquareNumber, SquareNumber)>,
    },
}

impl TryFrom<MoveRecord> for Move {
    type Error = NotationError;

    fn try_from(record: MoveRecord) -> Result<Self, Self::Error> {
        let mv = match record {
            MoveRecord::Simple { from, to } => Move::Simple { from, to },
            MoveRecord::Capture { hops } => Move::Capture { hops },
        };
        mv.validate()?;
        Ok(mv)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Simple { from, to } => write!(f, "{}-{}", from, to),
            Move::Capture { hops } => {
                if let Some((from, _)) = hops.first() {
                    write!(f, "{}", from)?;
                }
                for (_, to) in hops {
                    write!(f, "x{}", to)?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// Parses `"9-13"` or `"1x10x17"` into a `Move`.
///
/// Whitespace is ignored and `X` is accepted for `x`. Every hop of a capture
/// chain must span two rows along a diagonal; simple tokens are not checked
/// for shape, that is left to the validator.
///
/// # Errors
///
/// `MalformedToken` if the token matches neither form, and
/// `InvalidSquareNumber` if a number lies outside 1-32.
pub fn parse(token: &str) -> Result<Move> {
    let compact: String = token.chars().filter(|c| !c.is_whitespace()).collect();
    if let Some((from, to)) = compact.split_once('-') {
        return Ok(Move::Simple {
            from: parse_square(token, from)?,
            to: parse_square(token, to)?,
        });
    }
    let squares = compact
        .split(['x', 'X'])
        .map(|segment| parse_square(token, segment))
        .collect::<Result<Vec<_>>>()?;
    if squares.len() < 2 {
        return Err(MalformedToken(token.to_string()).into());
    }
    Move::capture(&squares).map_err(|_| MalformedToken(token.to_string()).into())
}

fn parse_square(token: &str, segment: &str) -> Result<SquareNumber> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MalformedToken(token.to_string()).into());
    }
    let value: u32 = segment
        .parse()
        .map_err(|_| MalformedToken(token.to_string()))?;
    SquareNumber::new(value)
}

fn join(squares: &[SquareNumber]) -> String {
    squares
        .iter()
        .map(|square| square.to_string())
        .collect::<Vec<_>>()
        .join("x")
}
