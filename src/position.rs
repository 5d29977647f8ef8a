// Copyright 2017-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;

use thiserror::Error;

use crate::{
    attacks,
    board::{Board, BoardError, SideEffect},
    core::*,
    movegen, status,
    status::GameStatus,
};

/// Possible reasons for a command against a `Position` to be rejected. A rejected command never changes the
/// position.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece on {0}")]
    NoPiece(Square),
    #[error("the piece on {0} does not belong to the side to move")]
    NotYourTurn(Square),
    #[error("{0}{1} is not a legal move")]
    IllegalMove(Square, Square),
    #[error("the pawn on {0} must be promoted before anything else can happen")]
    PromotionPending(Square),
    #[error("no promotion is pending")]
    NoPromotionPending,
    #[error("no promotion is pending on {0}")]
    NotPromotionSquare(Square),
    #[error("a pawn cannot be promoted to a {0:?}")]
    InvalidPromotion(PieceKind),
}

/// The caller's half of the promotion contract. When a move leaves a pawn on its farthest rank, the engine asks a
/// selector which piece the pawn becomes.
pub trait PromotionSelector {
    fn select(&mut self, color: Color, square: Square) -> PieceKind;
}

impl<F> PromotionSelector for F
where
    F: FnMut(Color, Square) -> PieceKind,
{
    fn select(&mut self, color: Color, square: Square) -> PieceKind {
        self(color, square)
    }
}

/// Always promotes to the same kind of piece.
impl PromotionSelector for PieceKind {
    fn select(&mut self, _color: Color, _square: Square) -> PieceKind {
        *self
    }
}

/// A position, representing a chess game that has progressed up to this point: the board, whose turn it is, every
/// move made so far and whether a pawn is waiting to be promoted.
///
/// A Position is mutated in place for the lifetime of a game and must only ever have one writer. Queries take
/// `&self` and may run against clones concurrently.
#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    /// Color whose turn it is to move.
    side_to_move: Color,
    /// Every move applied to this position, in order. The last entry is the sole source of en passant rights.
    history: Vec<MoveRecord>,
    /// Square of a pawn that reached its farthest rank and has not been replaced yet.
    pending_promotion: Option<Square>,
}

impl Position {
    /// A new game in the standard initial arrangement, White to move.
    pub fn new_game() -> Position {
        Position {
            board: Board::starting(),
            ..Position::empty(Color::White)
        }
    }

    /// An empty board with the given side to move. Pieces are placed with [`Position::add_piece`].
    pub fn empty(side_to_move: Color) -> Position {
        Position {
            board: Board::empty(),
            side_to_move,
            history: Vec::new(),
            pending_promotion: None,
        }
    }

    pub fn add_piece(&mut self, square: Square, piece: Piece) -> Result<(), BoardError> {
        self.board.add_piece(square, piece)
    }

    pub fn remove_piece(&mut self, square: Square) -> Result<Piece, BoardError> {
        self.board.remove_piece(square)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    pub fn king(&self, color: Color) -> Option<Square> {
        self.board.king(color)
    }
}

//
// Queries.
//

impl Position {
    /// Legal destinations for the piece on `square`. Empty if the square is vacant, if the piece belongs to the
    /// side not to move, or while a promotion is pending.
    pub fn legal_moves(&self, square: Square) -> SquareSet {
        if self.pending_promotion.is_some() {
            return SquareSet::empty();
        }

        match self.piece_at(square) {
            Some(piece) if piece.color == self.side_to_move => movegen::legal_moves(self, square),
            _ => SquareSet::empty(),
        }
    }

    /// Whether playing `from` to `to` would leave the owner of the piece on `from` in check.
    pub fn would_cause_check(&self, from: Square, to: Square) -> bool {
        movegen::would_cause_check(&self.board, Move::new(from, to))
    }

    pub fn is_square_attacked(&self, square: Square, attacker: Color) -> bool {
        attacks::is_square_attacked(&self.board, square, attacker)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        attacks::is_in_check(&self.board, color)
    }

    pub fn has_any_legal_move(&self, color: Color) -> bool {
        status::has_any_legal_move(self, color)
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        status::is_checkmate(self, color)
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        status::is_stalemate(self, color)
    }

    pub fn status(&self, color: Color) -> GameStatus {
        status::status(self, color)
    }
}

//
// Commands.
//

impl Position {
    /// Moves the piece on `from` to `to`, if that is a legal move for the side to move. On success the move is
    /// logged, the piece is marked as moved and the turn passes to the other side. A pawn arriving on its farthest
    /// rank stays a pawn until [`Position::promote`] is called; until then every other command is rejected.
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<(), MoveError> {
        let piece = self.validate_move(from, to).map_err(|err| {
            tracing::debug!(%from, %to, %err, "rejected move");
            err
        })?;

        let mov = Move::new(from, to);
        let effect = self.board.apply(piece, mov);
        let moved = piece.moved();
        self.board.set(to, moved);
        self.history.push(MoveRecord {
            piece: moved,
            from,
            to,
        });
        self.side_to_move = self.side_to_move.toggle();
        match effect {
            SideEffect::None => tracing::debug!(%piece, %mov, "applied move"),
            SideEffect::Castle { rook_from, rook_to } => {
                tracing::debug!(%piece, %mov, %rook_from, %rook_to, "applied castle")
            }
            SideEffect::EnPassant { captured } => {
                tracing::debug!(%piece, %mov, %captured, "applied en passant capture")
            }
        }

        if piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank() {
            tracing::debug!(square = %to, "pawn awaiting promotion");
            self.pending_promotion = Some(to);
        }

        Ok(())
    }

    /// Boolean form of [`Position::try_move`]: true if the move was applied, false if it was rejected.
    pub fn move_piece(&mut self, from: Square, to: Square) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// Replaces the pawn awaiting promotion on `square` with a new, already-moved piece of the given kind and the
    /// same color. The side to move is unaffected; it already passed when the pawn moved.
    pub fn promote(&mut self, square: Square, kind: PieceKind) -> Result<(), MoveError> {
        let pawn = self.validate_promotion(square, kind).map_err(|err| {
            tracing::debug!(%square, %err, "rejected promotion");
            err
        })?;

        self.board.set(square, Piece::new(pawn.color, kind).moved());
        self.pending_promotion = None;
        tracing::info!(%square, color = %pawn.color, ?kind, "promoted pawn");
        Ok(())
    }

    /// Moves a piece and, if the move takes a pawn to its farthest rank, asks `selector` what to promote it to and
    /// promotes it in the same command. The selector is consulted before anything changes; if it picks a kind that
    /// a pawn can't become, the whole command is rejected and the position is left as it was.
    pub fn play<S>(&mut self, from: Square, to: Square, selector: &mut S) -> Result<(), MoveError>
    where
        S: PromotionSelector + ?Sized,
    {
        let piece = self.validate_move(from, to).map_err(|err| {
            tracing::debug!(%from, %to, %err, "rejected move");
            err
        })?;

        if piece.kind != PieceKind::Pawn || to.rank() != piece.color.promotion_rank() {
            return self.try_move(from, to);
        }

        let kind = selector.select(piece.color, to);
        if !kind.is_promotion_target() {
            let err = MoveError::InvalidPromotion(kind);
            tracing::debug!(%from, %to, %err, "rejected move");
            return Err(err);
        }

        self.try_move(from, to)?;
        self.promote(to, kind)
    }

    fn validate_move(&self, from: Square, to: Square) -> Result<Piece, MoveError> {
        if let Some(square) = self.pending_promotion {
            return Err(MoveError::PromotionPending(square));
        }

        let piece = self.piece_at(from).ok_or(MoveError::NoPiece(from))?;
        if piece.color != self.side_to_move {
            return Err(MoveError::NotYourTurn(from));
        }

        if !movegen::legal_moves(self, from).contains(to) {
            return Err(MoveError::IllegalMove(from, to));
        }

        Ok(piece)
    }

    fn validate_promotion(&self, square: Square, kind: PieceKind) -> Result<Piece, MoveError> {
        let pending = self
            .pending_promotion
            .ok_or(MoveError::NoPromotionPending)?;
        if pending != square {
            return Err(MoveError::NotPromotionSquare(square));
        }

        if !kind.is_promotion_target() {
            return Err(MoveError::InvalidPromotion(kind));
        }

        self.piece_at(square).ok_or(MoveError::NoPiece(square))
    }
}

/// A new game in the standard initial arrangement.
pub fn new_game() -> Position {
    Position::new_game()
}

impl Default for Position {
    fn default() -> Self {
        Position::new_game()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.board)?;
        match self.pending_promotion {
            Some(square) => writeln!(f, "{} to move, pawn on {} awaiting promotion", self.side_to_move, square),
            None => writeln!(f, "{} to move", self.side_to_move),
        }
    }
}
