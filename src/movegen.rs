// Copyright 2021-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move generation. Each piece kind produces its pseudo-legal destinations from a single `match`, and every
//! destination is then run through the legality filter, which plays the move on a copy of the board and looks
//! for an attack on the mover's king. Nothing outside of this module ever sees a pseudo-legal move.

use crate::attacks::{self, KING_OFFSETS, KNIGHT_OFFSETS};
use crate::board::Board;
use crate::core::*;
use crate::Position;

/// Destinations for the piece on `origin` that respect its movement geometry and the board's occupancy, without
/// regard for whether the move exposes its own king. Empty if `origin` is vacant.
pub fn pseudo_legal_moves(pos: &Position, origin: Square) -> SquareSet {
    let board = pos.board();
    let piece = match board.piece_at(origin) {
        Some(piece) => piece,
        None => return SquareSet::empty(),
    };

    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, origin, piece, pos.last_move()),
        PieceKind::Knight => step_moves(board, origin, piece.color, &KNIGHT_OFFSETS),
        PieceKind::Bishop => slide_moves(board, origin, piece.color, &Direction::DIAGONAL),
        PieceKind::Rook => slide_moves(board, origin, piece.color, &Direction::ORTHOGONAL),
        PieceKind::Queen => {
            slide_moves(board, origin, piece.color, &Direction::ORTHOGONAL)
                | slide_moves(board, origin, piece.color, &Direction::DIAGONAL)
        }
        PieceKind::King => {
            step_moves(board, origin, piece.color, &KING_OFFSETS)
                | castle_moves(board, origin, piece)
        }
    }
}

/// Legal destinations for the piece on `origin`, whoever's turn it is. Empty if `origin` is vacant.
pub fn legal_moves(pos: &Position, origin: Square) -> SquareSet {
    pseudo_legal_moves(pos, origin)
        .into_iter()
        .filter(|&to| {
            let mov = Move::new(origin, to);
            if would_cause_check(pos.board(), mov) {
                tracing::trace!(%mov, "discarding move that leaves king in check");
                false
            } else {
                true
            }
        })
        .collect()
}

/// Every legal move available to `color`, in ascending order of origin and then destination.
pub fn all_legal_moves(pos: &Position, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    for (origin, _) in pos.board().pieces(color) {
        moves.extend(legal_moves(pos, origin).into_iter().map(|to| Move::new(origin, to)));
    }
    moves
}

/// Counts the leaves of the legal move tree rooted at `pos`, `depth` plies deep. Pawns reaching their last rank
/// become queens.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    all_legal_moves(pos, pos.side_to_move())
        .into_iter()
        .map(|mov| {
            let next = play_generated(pos, mov);
            perft(&next, depth - 1)
        })
        .sum()
}

/// Perft split by root move.
pub fn divide(pos: &Position, depth: u32) -> Vec<(Move, u64)> {
    all_legal_moves(pos, pos.side_to_move())
        .into_iter()
        .map(|mov| {
            let next = play_generated(pos, mov);
            (mov, perft(&next, depth.saturating_sub(1)))
        })
        .collect()
}

/// Plays a move produced by this module on a clone of `pos`, promoting to a queen. The generator and the
/// command path must agree on legality, so a rejection here is a bug and panics with the offending move.
fn play_generated(pos: &Position, mov: Move) -> Position {
    let mut next = pos.clone();
    if let Err(err) = next.play(mov.from, mov.to, &mut PieceKind::Queen) {
        panic!("generated move {} was rejected: {}\n{}", mov, err, pos);
    }
    next
}

/// The legality filter. Plays `mov` on a copy of `board`, side effects and all, and reports whether the owner of
/// the moving piece is left in check. The copy is discarded.
pub fn would_cause_check(board: &Board, mov: Move) -> bool {
    let piece = match board.piece_at(mov.from) {
        Some(piece) => piece,
        None => return false,
    };

    let mut hypothetical = *board;
    hypothetical.apply(piece, mov);
    attacks::is_in_check(&hypothetical, piece.color)
}

fn pawn_moves(board: &Board, origin: Square, pawn: Piece, last: Option<&MoveRecord>) -> SquareSet {
    let mut moves = SquareSet::empty();
    let up = pawn.color.pawn_direction();

    // Single and double pushes. The double push needs both squares in front of the pawn to be empty.
    if let Some(single) = origin.offset(0, up).filter(|&sq| board.is_empty(sq)) {
        moves.insert(single);
        if !pawn.has_moved {
            if let Some(double) = origin.offset(0, 2 * up).filter(|&sq| board.is_empty(sq)) {
                moves.insert(double);
            }
        }
    }

    for file_delta in [-1, 1] {
        if let Some(target) = origin.offset(file_delta, up) {
            if board.piece_at(target).map_or(false, |p| p.color != pawn.color) {
                moves.insert(target);
            }
        }
    }

    // En passant is only ever available in reply to an enemy double push that landed right beside this pawn.
    if let Some(last) = last {
        let beside = last.to.rank() == origin.rank()
            && (last.to.file().as_u8() as i8 - origin.file().as_u8() as i8).abs() == 1;
        if last.is_double_pawn_push() && last.piece.color != pawn.color && beside {
            if let Some(skipped) = last.to.offset(0, up) {
                moves.insert(skipped);
            }
        }
    }

    moves
}

fn step_moves(board: &Board, origin: Square, us: Color, offsets: &[(i8, i8)]) -> SquareSet {
    offsets
        .iter()
        .filter_map(|&(file_delta, rank_delta)| origin.offset(file_delta, rank_delta))
        .filter(|&sq| board.piece_at(sq).map_or(true, |p| p.color != us))
        .collect()
}

fn slide_moves(board: &Board, origin: Square, us: Color, directions: &[Direction]) -> SquareSet {
    let mut moves = SquareSet::empty();
    for &dir in directions {
        let mut current = origin;
        while let Some(next) = current.towards(dir) {
            match board.piece_at(next) {
                None => moves.insert(next),
                Some(piece) => {
                    if piece.color != us {
                        moves.insert(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }

    moves
}

/// Castling destinations for an unmoved king on its home square. The king may not castle out of check, and may
/// not pass through or land on a square the opponent attacks. On the queenside the square beside the rook must be
/// empty but may be attacked.
fn castle_moves(board: &Board, origin: Square, king: Piece) -> SquareSet {
    let mut moves = SquareSet::empty();
    let us = king.color;
    let rank = us.back_rank();
    if king.has_moved
        || origin != Square::of(rank, FILE_E)
        || attacks::is_in_check(board, us)
    {
        return moves;
    }

    let unmoved_rook = |file: File| {
        board.piece_at(Square::of(rank, file)).map_or(false, |p| {
            p.kind == PieceKind::Rook && p.color == us && !p.has_moved
        })
    };
    let all_empty = |files: &[File]| files.iter().all(|&f| board.is_empty(Square::of(rank, f)));
    let all_safe = |files: &[File]| {
        files
            .iter()
            .all(|&f| !attacks::is_square_attacked(board, Square::of(rank, f), us.toggle()))
    };

    if unmoved_rook(FILE_H) && all_empty(&[FILE_F, FILE_G]) && all_safe(&[FILE_E, FILE_F, FILE_G]) {
        moves.insert(Square::of(rank, FILE_G));
    }

    if unmoved_rook(FILE_A)
        && all_empty(&[FILE_B, FILE_C, FILE_D])
        && all_safe(&[FILE_C, FILE_D, FILE_E])
    {
        moves.insert(Square::of(rank, FILE_C));
    }

    moves
}
