// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Attack detection by direct geometric inspection.
//!
//! Rather than generating every move of the attacking side, these routines stand on the target square and look
//! outwards along each attack geometry for a piece that could be hitting it. They never allocate and never
//! mutate the board.

use crate::board::Board;
use crate::core::*;

/// Knight jumps, as (file, rank) offsets.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// King steps, as (file, rank) offsets.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Returns the first piece hit when sliding from `origin` in direction `dir`, along with its square.
fn first_piece_along(board: &Board, origin: Square, dir: Direction) -> Option<(Square, Piece)> {
    let mut current = origin;
    while let Some(next) = current.towards(dir) {
        if let Some(piece) = board.piece_at(next) {
            return Some((next, piece));
        }
        current = next;
    }

    None
}

/// Whether any piece of color `attacker` attacks `square`.
pub fn is_square_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    let is_attacker = |sq: Option<Square>, kinds: &[PieceKind]| {
        sq.and_then(|sq| board.piece_at(sq))
            .map_or(false, |p| p.color == attacker && kinds.contains(&p.kind))
    };

    // A pawn attacks one rank ahead of itself, so an attacking pawn stands one rank behind the target relative to
    // its own direction of travel.
    let behind = -attacker.pawn_direction();
    if is_attacker(square.offset(-1, behind), &[PieceKind::Pawn])
        || is_attacker(square.offset(1, behind), &[PieceKind::Pawn])
    {
        return true;
    }

    // Knight jumps are symmetric.
    for &(file_delta, rank_delta) in KNIGHT_OFFSETS.iter() {
        if is_attacker(square.offset(file_delta, rank_delta), &[PieceKind::Knight]) {
            return true;
        }
    }

    // Sliders: the first piece along each ray either attacks the square or blocks everything behind it.
    for &dir in Direction::ORTHOGONAL.iter() {
        if let Some((_, piece)) = first_piece_along(board, square, dir) {
            if piece.color == attacker && matches!(piece.kind, PieceKind::Rook | PieceKind::Queen) {
                return true;
            }
        }
    }

    for &dir in Direction::DIAGONAL.iter() {
        if let Some((_, piece)) = first_piece_along(board, square, dir) {
            if piece.color == attacker && matches!(piece.kind, PieceKind::Bishop | PieceKind::Queen) {
                return true;
            }
        }
    }

    for &(file_delta, rank_delta) in KING_OFFSETS.iter() {
        if is_attacker(square.offset(file_delta, rank_delta), &[PieceKind::King]) {
            return true;
        }
    }

    false
}

/// Whether `color`'s king is attacked. A board without a king of that color is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king(color) {
        Some(king) => is_square_attacked(board, king, color.toggle()),
        None => false,
    }
}
