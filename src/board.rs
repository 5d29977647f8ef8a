// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The 8x8 grid of pieces and the primitive that executes a move on it.
//!
//! A [`Board`] is a flat array of 64 optional pieces and nothing else, so it is `Copy`: the legality filter
//! copies it, plays a candidate move on the copy and throws the copy away. Everything a [`Board`] does is
//! unconditional; deciding whether a move is allowed happens in [`crate::movegen`].

use std::fmt;

use thiserror::Error;

use crate::core::{self, *};

/// Possible errors that can arise when placing pieces on a board by hand.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("square {0} is already occupied")]
    Occupied(Square),
    #[error("no piece on square {0}")]
    Vacant(Square),
}

/// A side effect of a move beyond relocating the moving piece. Derived by [`Board::apply`] from the moving
/// piece and the board's occupancy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SideEffect {
    None,
    /// The king moved two files; the rook moved from `rook_from` to `rook_to`.
    Castle { rook_from: Square, rook_to: Square },
    /// A pawn moved diagonally onto an empty square and took the pawn on `captured`.
    EnPassant { captured: Square },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    pub const fn empty() -> Board {
        Board {
            squares: [None; 64],
        }
    }

    /// The standard initial arrangement. Every piece starts out unmoved.
    pub fn starting() -> Board {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Board::empty();
        for color in core::colors() {
            for (file, &kind) in core::files().zip(BACK_RANK.iter()) {
                board.set(Square::of(color.back_rank(), file), Piece::new(color, kind));
                board.set(
                    Square::of(color.pawn_rank(), file),
                    Piece::new(color, PieceKind::Pawn),
                );
            }
        }

        board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.0 as usize]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Places a piece on a vacant square. A square holds at most one piece, so occupied squares are refused.
    pub fn add_piece(&mut self, square: Square, piece: Piece) -> Result<(), BoardError> {
        if self.piece_at(square).is_some() {
            return Err(BoardError::Occupied(square));
        }

        self.set(square, piece);
        Ok(())
    }

    pub fn remove_piece(&mut self, square: Square) -> Result<Piece, BoardError> {
        self.take(square).ok_or(BoardError::Vacant(square))
    }

    /// Replaces whatever is on `square` with `piece`.
    pub(crate) fn set(&mut self, square: Square, piece: Piece) {
        self.squares[square.0 as usize] = Some(piece);
    }

    pub(crate) fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.0 as usize].take()
    }

    /// Every occupied square along with the piece on it, in ascending square order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        core::squares().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Every square holding a piece of the given color.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.color == color)
    }

    /// The square of the given color's king, found by a linear scan. None if that color has no king, which only
    /// happens in hand-built positions.
    pub fn king(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Executes a move that is already known to be legal. `piece` is the piece standing on `mov.from`.
    ///
    /// The side effects of castling and en passant are derived here, from the shape of the move and the board as
    /// it stands, so that the real game and the legality filter's hypothetical boards can never disagree about
    /// what a move does. This neither records the move nor marks the moving piece as moved; both are the job of
    /// [`crate::Position`].
    pub fn apply(&mut self, piece: Piece, mov: Move) -> SideEffect {
        let mut effect = SideEffect::None;

        // Castles are encoded as a two-file king move. The rook jumps from its corner to the square the king
        // passed over.
        if piece.kind == PieceKind::King && mov.file_delta().abs() == 2 {
            let (corner, hop) = if mov.file_delta() > 0 { (7, 1) } else { (0, -1) };
            let rank = mov.from.rank().as_u8() as i32;
            let rook_from = Square::from_coords(corner, rank);
            let rook_to = Square::from_coords(mov.from.file().as_u8() as i32 + hop, rank);
            if let (Ok(rook_from), Ok(rook_to)) = (rook_from, rook_to) {
                if let Some(rook) = self.take(rook_from) {
                    self.set(rook_to, rook.moved());
                    effect = SideEffect::Castle { rook_from, rook_to };
                }
            }
        }

        // A pawn moving diagonally onto an empty square is capturing en passant. The captured pawn sits beside the
        // capturing pawn's origin, on the destination file.
        if piece.kind == PieceKind::Pawn && mov.file_delta() != 0 && self.is_empty(mov.to) {
            let captured = Square::of(mov.from.rank(), mov.to.file());
            self.take(captured);
            effect = SideEffect::EnPassant { captured };
        }

        self.take(mov.from);
        self.set(mov.to, piece);
        effect
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in core::ranks().rev() {
            for file in core::files() {
                let sq = Square::of(rank, file);
                if let Some(piece) = self.piece_at(sq) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in core::files() {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for file in core::files() {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}
