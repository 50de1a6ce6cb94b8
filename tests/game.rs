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

use riff_checkers::*;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Plays the human's half of `record` through cell selections and the
/// other half through a replay opponent.
fn play_record(record: &[&str]) -> Game {
    let mut game = Game::new();
    let mut opponent = ReplayOpponent::from_record(record.iter().copied());
    for token in record.iter().step_by(2) {
        let mv = parse(token).unwrap();
        for (from, to) in mv.hops() {
            let selected = game.select_cell(from.to_cell()).unwrap();
            assert!(matches!(selected, Selection::Selected(..)), "{}", token);
            let moved = game.select_cell(to.to_cell()).unwrap();
            assert!(matches!(moved, Selection::Moved(..)), "{}", token);
        }
        if opponent.remaining() > 0 {
            game.play_opponent(&mut opponent).unwrap();
        }
    }
    game
}

#[test]
fn test_exchange_opening() {
    init_logging();
    let record = ["22-18", "11-15", "18x11", "8x15", "23-19", "4-8"];
    let game = play_record(&record);

    let history: Vec<String> = game.history().iter().map(|mv| mv.to_string()).collect();
    assert_eq!(history, record);
    assert_eq!(game.board().count(Side::White), 11);
    assert_eq!(game.board().count(Side::Black), 11);
    assert_eq!(game.turn(), Side::White);

    let at = |n: u32| game.board().contents(to_cell(n).unwrap());
    assert_eq!(at(15), CellState::Black);
    assert_eq!(at(19), CellState::White);
    assert_eq!(at(8), CellState::Black);
    for n in [4, 11, 18, 22, 23] {
        assert_eq!(at(n), CellState::Empty, "square {}", n);
    }
}

#[test]
fn test_exhausted_opponent() {
    init_logging();
    let mut game = play_record(&["22-18", "11-15"]);
    game.select(5, 4).unwrap();
    game.select(4, 5).unwrap();
    let err = game
        .play_opponent(&mut ReplayOpponent::default())
        .unwrap_err();
    assert_eq!(err.downcast_ref(), Some(&OpponentError::Exhausted));
    assert_eq!(game.phase(), Phase::AwaitingOpponent(Side::Black));
    assert!(game.play_opponent(&mut ReplayOpponent::new(["12-16"])).is_ok());
    assert_eq!(game.turn(), Side::White);
}

#[test]
fn test_snapshot_round_trip() {
    let game = play_record(&["22-18", "11-15"]);
    let json = serde_json::to_string(game.board()).unwrap();
    let board: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(&board, game.board());
    assert_eq!(board.snapshot()[3][4], CellState::Black);

    let restored = Game::from_board(board);
    assert!(restored.is_valid_move(to_cell(18).unwrap(), to_cell(11).unwrap()));
}
