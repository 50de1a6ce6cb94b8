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

use super::moves::{HopShape, MoveError};
use super::square::SquareNumber;

/// Square numbers that close a row whose jumps round the midpoint down.
/// Rows ending on 4, 12, 20 and 28 round up.
const ROUND_DOWN_ROW_ENDS: [u32; 4] = [8, 16, 24, 32];

/// The square jumped over by a capture from `from` to `to`.
///
/// The captured square is the mean of the two numbers. Dark cells sit on
/// alternating sides of each row, so the mean is fractional and rounds up or
/// down depending on the row the jump starts from.
///
/// # Errors
///
/// `IllegalMove` if the two squares are not a jump apart.
pub fn captured_square(from: SquareNumber, to: SquareNumber) -> Result<SquareNumber> {
    if HopShape::of(from.to_cell(), to.to_cell()) != HopShape::Jump {
        return Err(MoveError::IllegalMove(from.to_cell(), to.to_cell()).into());
    }
    let sum = from.value() + to.value();
    let value = if rounds_down(from) {
        sum / 2
    } else {
        sum.div_ceil(2)
    };
    SquareNumber::new(value)
}

fn rounds_down(from: SquareNumber) -> bool {
    let row_end = 4 * (from.row() as u32 + 1);
    ROUND_DOWN_ROW_ENDS.contains(&row_end)
}
