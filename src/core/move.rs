// Copyright 2017-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::core::*;
use serde::Serialize;
use std::fmt;

/// A move, as requested by a player: a source square and a destination square.
///
/// Unlike a move in a search engine, a Move here does not say what kind of move it is. Whether a move castles,
/// captures en passant or leaves a pawn awaiting promotion depends on the kind of the moving piece and the
/// occupancy of the board when the move is made, so all of that is derived at execution time:
///
/// | Moving piece | Shape                          | Effect                          |
/// |--------------|--------------------------------|---------------------------------|
/// | King         | two files along its rank       | castle; the rook hops over      |
/// | Pawn         | diagonal onto an empty square  | en passant; adjacent pawn taken |
/// | Pawn         | onto its farthest rank         | promotion becomes pending       |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Move {
        Move { from, to }
    }

    /// Signed number of files crossed by this move.
    pub fn file_delta(self) -> i8 {
        self.to.file().as_u8() as i8 - self.from.file().as_u8() as i8
    }

    /// Signed number of ranks crossed by this move.
    pub fn rank_delta(self) -> i8 {
        self.to.rank().as_u8() as i8 - self.from.rank().as_u8() as i8
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// An entry in a position's move log: the piece that moved, and where it moved from and to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
}

impl MoveRecord {
    pub fn as_move(&self) -> Move {
        Move::new(self.from, self.to)
    }

    /// Whether this entry records a pawn advancing two squares, the only move that makes en passant available
    /// to the reply.
    pub fn is_double_pawn_push(&self) -> bool {
        self.piece.kind == PieceKind::Pawn && self.as_move().rank_delta().abs() == 2
    }

    /// Whether this entry records a king castling.
    pub fn is_castle(&self) -> bool {
        self.piece.kind == PieceKind::King && self.as_move().file_delta().abs() == 2
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}", self.piece, self.from, self.to)
    }
}
