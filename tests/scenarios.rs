// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod common;

use kingside::core::*;
use kingside::movegen;
use kingside::{GameStatus, MoveError, Position};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn play_all(pos: &mut Position, moves: &[(Square, Square)]) {
    for &(from, to) in moves {
        assert!(pos.move_piece(from, to), "{}{} was rejected\n{}", from, to, pos);
    }
}

#[test]
fn fools_mate() {
    let mut pos = Position::new_game();
    play_all(&mut pos, &[(F2, F3), (E7, E5), (G2, G4), (D8, H4)]);

    assert!(pos.is_in_check(Color::White));
    assert!(pos.is_checkmate(Color::White));
    assert!(!pos.is_stalemate(Color::White));
    assert_eq!(GameStatus::Checkmate, pos.status(Color::White));
    assert!(movegen::all_legal_moves(&pos, Color::White).is_empty());
}

#[test]
fn scholars_mate() {
    let mut pos = Position::new_game();
    play_all(
        &mut pos,
        &[(E2, E4), (E7, E5), (F1, C4), (B8, C6), (D1, H5), (G8, F6), (H5, F7)],
    );
    assert!(pos.is_checkmate(Color::Black));
    assert!(!pos.is_checkmate(Color::White));
}

#[test]
fn pawn_blocked_stalemate() {
    let pos = common::diagram(
        Color::Black,
        "
        k.......
        P.......
        .K......
        ........
        ........
        ........
        ........
        ........
        ",
    );

    assert!(pos.is_stalemate(Color::Black));
    assert!(!pos.is_checkmate(Color::Black));
    assert_eq!(GameStatus::Stalemate, pos.status(Color::Black));
}

#[test]
fn initial_move_counts() {
    let mut pos = Position::new_game();
    assert_eq!(20, movegen::all_legal_moves(&pos, Color::White).len());
    play_all(&mut pos, &[(E2, E4)]);
    assert_eq!(20, movegen::all_legal_moves(&pos, Color::Black).len());
}

#[test]
fn pawn_loses_double_push_after_moving() {
    let mut pos = Position::new_game();
    let targets: Vec<Square> = pos.legal_moves(C2).into_iter().collect();
    assert_eq!(vec![C3, C4], targets);

    play_all(&mut pos, &[(C2, C3), (H7, H6)]);
    let targets: Vec<Square> = pos.legal_moves(C3).into_iter().collect();
    assert_eq!(vec![C4], targets);
}

#[test]
fn en_passant_only_immediately() {
    let mut pos = Position::new_game();
    play_all(&mut pos, &[(E2, E4), (H7, H6), (E4, E5), (F7, F5)]);
    assert!(pos.legal_moves(E5).contains(F6));

    play_all(&mut pos, &[(A2, A3), (H6, H5)]);
    assert!(!pos.legal_moves(E5).contains(F6));
}

#[test]
fn castling_revoked_for_good() {
    let mut pos = common::diagram(
        Color::White,
        "
        r...k..r
        ........
        ........
        ........
        ........
        ........
        ........
        R...K..R
        ",
    );

    assert!(pos.legal_moves(E1).contains(G1));
    assert!(pos.legal_moves(E1).contains(C1));

    play_all(&mut pos, &[(A1, A2), (A8, A7), (A2, A1), (A7, A8)]);
    assert!(pos.legal_moves(E1).contains(G1));
    assert!(!pos.legal_moves(E1).contains(C1));

    play_all(&mut pos, &[(E1, F1), (E8, E7), (F1, E1), (E7, E8)]);
    assert!(!pos.legal_moves(E1).contains(G1));
    assert!(!pos.legal_moves(E1).contains(C1));
}

#[test]
fn castling_through_check() {
    let pos = common::diagram(
        Color::White,
        "
        ....k...
        ........
        ........
        ........
        ........
        .....r..
        ........
        R...K..R
        ",
    );

    // f1 is covered by the rook on f3, so only the queenside castle remains.
    let moves = pos.legal_moves(E1);
    assert!(!moves.contains(G1));
    assert!(moves.contains(C1));
}

#[test]
fn promotion_flow() {
    let mut pos = common::diagram(
        Color::Black,
        "
        ....k...
        ........
        ........
        ........
        ........
        ........
        ...p....
        .....K..
        ",
    );

    assert!(pos.move_piece(D2, D1));
    assert_eq!(Some(D1), pos.pending_promotion());
    assert_eq!(Color::White, pos.side_to_move());
    assert!(pos.legal_moves(F1).is_empty());
    assert_eq!(Err(MoveError::PromotionPending(D1)), pos.try_move(F1, F2));

    pos.promote(D1, PieceKind::Queen).unwrap();
    let queen = pos.piece_at(D1).unwrap();
    assert_eq!(Piece::new(Color::Black, PieceKind::Queen).moved(), queen);
    assert!(pos.is_in_check(Color::White));
    assert!(pos.move_piece(F1, F2));
}

#[test]
fn underpromotion_through_callback() {
    let mut pos = common::diagram(
        Color::White,
        "
        ....k...
        .P......
        ........
        ........
        ........
        ........
        ........
        ....K...
        ",
    );

    pos.play(B7, B8, &mut |color: Color, square: Square| {
        assert_eq!((Color::White, B8), (color, square));
        PieceKind::Knight
    })
    .unwrap();
    assert_eq!(PieceKind::Knight, pos.piece_at(B8).unwrap().kind);
    assert_eq!(Color::Black, pos.side_to_move());
}

#[test]
fn random_games_never_leave_king_in_check() {
    let mut rng = SmallRng::seed_from_u64(0x6b696e67);
    for _ in 0..16 {
        let mut pos = Position::new_game();
        for _ in 0..200 {
            let side = pos.side_to_move();
            if pos.status(side).is_terminal() {
                break;
            }

            let moves = movegen::all_legal_moves(&pos, side);
            let mov = *moves.choose(&mut rng).unwrap();
            let before = pos.clone();
            pos.play(mov.from, mov.to, &mut PieceKind::Queen).unwrap();
            assert!(!pos.is_in_check(side), "{} exposed its king\n{}", mov, before);

            // the same move on an identical position produces the identical result.
            let mut replay = before.clone();
            replay.play(mov.from, mov.to, &mut PieceKind::Queen).unwrap();
            assert_eq!(pos.board(), replay.board());
            assert_eq!(
                pos.status(pos.side_to_move()),
                replay.status(replay.side_to_move())
            );
        }
    }
}
