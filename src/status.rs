// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Check, checkmate and stalemate detection.
//!
//! These are asked of a color, not of the position as a whole, and they ignore whose turn it is: a caller can ask
//! whether the side that just moved has been mated, or whether a side that isn't on move would be stalemated.

use derive_more::Display;
use serde::Serialize;

use crate::{attacks, core::*, movegen, Position};

/// The state of the game from one color's point of view.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[display(fmt = "ongoing")]
    Ongoing,
    #[display(fmt = "check")]
    Check,
    #[display(fmt = "checkmate")]
    Checkmate,
    #[display(fmt = "stalemate")]
    Stalemate,
}

impl GameStatus {
    /// Whether the game is over.
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

/// Whether any piece of `color` has at least one legal move. Stops at the first one found.
pub fn has_any_legal_move(pos: &Position, color: Color) -> bool {
    pos.board()
        .pieces(color)
        .any(|(sq, _)| !movegen::legal_moves(pos, sq).is_empty())
}

pub fn is_in_check(pos: &Position, color: Color) -> bool {
    attacks::is_in_check(pos.board(), color)
}

/// In check with no legal move.
pub fn is_checkmate(pos: &Position, color: Color) -> bool {
    is_in_check(pos, color) && !has_any_legal_move(pos, color)
}

/// Not in check, yet no legal move.
pub fn is_stalemate(pos: &Position, color: Color) -> bool {
    !is_in_check(pos, color) && !has_any_legal_move(pos, color)
}

/// Classifies the game for `color`: one check query, then a search for a legal move that stops at the first one
/// found. Emits nothing, so it is safe to call on every redraw.
pub fn evaluate(pos: &Position, color: Color) -> GameStatus {
    match (is_in_check(pos, color), has_any_legal_move(pos, color)) {
        (true, true) => GameStatus::Check,
        (true, false) => GameStatus::Checkmate,
        (false, true) => GameStatus::Ongoing,
        (false, false) => GameStatus::Stalemate,
    }
}

/// [`evaluate`], logging when the game is over.
pub fn status(pos: &Position, color: Color) -> GameStatus {
    let status = evaluate(pos, color);
    if status.is_terminal() {
        tracing::info!(%color, %status, plies = pos.history().len(), "game over");
    }

    status
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use super::*;

    fn position(side: Color, pieces: &[(Square, char)]) -> Position {
        let mut pos = Position::empty(side);
        for &(sq, c) in pieces {
            pos.add_piece(sq, Piece::try_from(c).unwrap().moved()).unwrap();
        }
        pos
    }

    #[test]
    fn new_game_is_ongoing() {
        let pos = Position::new_game();
        for color in crate::core::colors() {
            assert!(has_any_legal_move(&pos, color));
            assert!(!is_checkmate(&pos, color));
            assert!(!is_stalemate(&pos, color));
            assert_eq!(GameStatus::Ongoing, status(&pos, color));
        }
    }

    #[test]
    fn back_rank_mate() {
        let pos = position(
            Color::Black,
            &[(G8, 'k'), (F7, 'p'), (G7, 'p'), (H7, 'p'), (E8, 'R'), (G1, 'K')],
        );
        assert!(is_in_check(&pos, Color::Black));
        assert!(is_checkmate(&pos, Color::Black));
        assert!(!is_stalemate(&pos, Color::Black));
        assert_eq!(GameStatus::Checkmate, status(&pos, Color::Black));
    }

    #[test]
    fn check_with_escape() {
        let pos = position(
            Color::Black,
            &[(G8, 'k'), (F7, 'p'), (G7, 'p'), (E8, 'R'), (G1, 'K')],
        );
        assert_eq!(GameStatus::Check, status(&pos, Color::Black));
        assert!(!is_checkmate(&pos, Color::Black));
    }

    #[test]
    fn capture_escapes_mate() {
        let pos = position(
            Color::Black,
            &[(G8, 'k'), (F7, 'p'), (G7, 'p'), (H7, 'p'), (E8, 'R'), (B5, 'b'), (G1, 'K')],
        );
        assert_eq!(GameStatus::Check, status(&pos, Color::Black));
    }

    #[test]
    fn queen_stalemate() {
        let pos = position(Color::Black, &[(H8, 'k'), (G6, 'Q'), (A1, 'K')]);
        assert!(!is_in_check(&pos, Color::Black));
        assert!(is_stalemate(&pos, Color::Black));
        assert!(!is_checkmate(&pos, Color::Black));
        assert_eq!(GameStatus::Stalemate, status(&pos, Color::Black));
        assert!(status(&pos, Color::Black).is_terminal());
    }

    #[test]
    fn ignores_side_to_move() {
        // white to move, but black is the one stalemated.
        let pos = position(Color::White, &[(H8, 'k'), (G6, 'Q'), (A1, 'K')]);
        assert!(is_stalemate(&pos, Color::Black));
        assert_eq!(GameStatus::Ongoing, status(&pos, Color::White));
    }

    #[test]
    fn evaluate_agrees_with_status() {
        let mate = position(
            Color::Black,
            &[(G8, 'k'), (F7, 'p'), (G7, 'p'), (H7, 'p'), (E8, 'R'), (G1, 'K')],
        );
        let stalemate = position(Color::Black, &[(H8, 'k'), (G6, 'Q'), (A1, 'K')]);
        for pos in [Position::new_game(), mate, stalemate] {
            for color in crate::core::colors() {
                assert_eq!(status(&pos, color), evaluate(&pos, color));
            }
        }
    }

    #[test]
    fn display() {
        assert_eq!("checkmate", GameStatus::Checkmate.to_string());
        assert_eq!("ongoing", GameStatus::Ongoing.to_string());
    }

    #[test]
    fn serialize() {
        assert_eq!(
            "\"stalemate\"",
            serde_json::to_string(&GameStatus::Stalemate).unwrap()
        );
    }
}
