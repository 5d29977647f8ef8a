// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::convert::TryFrom;

use kingside::core::*;
use kingside::Position;

fn at_home(square: Square, piece: Piece) -> bool {
    match piece.kind {
        PieceKind::Pawn => square.rank() == piece.color.pawn_rank(),
        PieceKind::King => square == Square::of(piece.color.back_rank(), FILE_E),
        PieceKind::Rook => {
            square.rank() == piece.color.back_rank()
                && (square.file() == FILE_A || square.file() == FILE_H)
        }
        _ => false,
    }
}

/// Builds a position from a board diagram: eight rows of eight characters, rank 8 first, `.` for an empty
/// square. Kings and rooks on their starting squares and pawns on their starting rank are unmoved; every other
/// piece is marked as having moved.
#[allow(dead_code)]
pub fn diagram(side_to_move: Color, rows: &str) -> Position {
    let rows: Vec<&str> = rows
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    assert_eq!(8, rows.len(), "diagram must have eight ranks");

    let mut pos = Position::empty(side_to_move);
    for (row, line) in rows.iter().enumerate() {
        let rank = 7 - row as i32;
        assert_eq!(8, line.chars().count(), "rank {} must have eight squares", rank + 1);
        for (file, c) in line.chars().enumerate() {
            if c == '.' {
                continue;
            }

            let square = Square::from_coords(file as i32, rank).unwrap();
            let piece = Piece::try_from(c).unwrap();
            let piece = if at_home(square, piece) {
                piece
            } else {
                piece.moved()
            };
            pos.add_piece(square, piece).unwrap();
        }
    }

    pos
}
