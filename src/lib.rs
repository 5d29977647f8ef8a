// Copyright 2017-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `kingside` is a rules engine for two-player chess.
//!
//! It knows where the pieces are, which moves are legal, how to carry a move out (castling, en passant and
//! promotion included) and when the game has ended in checkmate or stalemate. It does not play chess; there is no
//! search, no evaluation and no clock. A UI or a network server is expected to sit on top of a [`Position`],
//! issuing commands and reading back the results.
//!
//! ```
//! use kingside::core::*;
//! use kingside::{GameStatus, Position};
//!
//! let mut pos = Position::new_game();
//! assert!(pos.move_piece(F2, F3));
//! assert!(pos.move_piece(E7, E5));
//! assert!(pos.move_piece(G2, G4));
//! assert!(pos.move_piece(D8, H4));
//! assert_eq!(GameStatus::Checkmate, pos.status(Color::White));
//! ```

pub mod attacks;
pub mod board;
pub mod core;
pub mod movegen;
pub mod position;
pub mod snapshot;
pub mod status;

pub use crate::board::{Board, BoardError, SideEffect};
pub use crate::position::{new_game, MoveError, Position, PromotionSelector};
pub use crate::snapshot::Snapshot;
pub use crate::status::GameStatus;
