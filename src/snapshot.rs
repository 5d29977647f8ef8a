// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A serializable, read-only picture of a position, for handing to a UI or writing out as JSON.

use serde::Serialize;

use crate::{core, core::*, status, status::GameStatus, Position};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    /// All 64 squares in ascending order (a1, b1, ..., h8).
    pub board: Vec<Option<Piece>>,
    pub side_to_move: Color,
    pub pending_promotion: Option<Square>,
    pub history: Vec<MoveRecord>,
    /// The game's state for the side to move.
    pub status: GameStatus,
}

impl Snapshot {
    pub fn of(pos: &Position) -> Snapshot {
        Snapshot {
            board: core::squares().map(|sq| pos.piece_at(sq)).collect(),
            side_to_move: pos.side_to_move(),
            pending_promotion: pos.pending_promotion(),
            history: pos.history().to_vec(),
            status: status::evaluate(pos, pos.side_to_move()),
        }
    }
}
