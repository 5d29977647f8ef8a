// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Plays random legal games against itself, checking after every move that the side that just moved did not
//! leave its own king in check.

use anyhow::{ensure, Context, Result};
use kingside::core::{Color, PieceKind, Square};
use kingside::{movegen, GameStatus, Position};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use structopt::StructOpt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const PROMOTIONS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

#[derive(Debug, StructOpt)]
struct Options {
    /// Number of games to play.
    #[structopt(long, default_value = "1")]
    games: u32,

    /// Abandon a game after this many plies.
    #[structopt(long, default_value = "400")]
    max_plies: usize,

    /// Seed for the random number generator. Chosen at random if not given.
    #[structopt(long)]
    seed: Option<u64>,
}

fn play_game(rng: &mut SmallRng, max_plies: usize) -> Result<(Position, GameStatus)> {
    let mut pos = Position::new_game();
    while pos.history().len() < max_plies {
        let side = pos.side_to_move();
        let status = pos.status(side);
        if status.is_terminal() {
            return Ok((pos, status));
        }

        let mov = *movegen::all_legal_moves(&pos, side)
            .choose(rng)
            .context("game is not over but there are no legal moves")?;
        pos.play(mov.from, mov.to, &mut |_: Color, _: Square| {
            PROMOTIONS[rng.gen_range(0..PROMOTIONS.len())]
        })
        .with_context(|| format!("legal move {} was rejected", mov))?;

        ensure!(
            !pos.is_in_check(side),
            "{} left its own king in check with {}\n{}",
            side,
            mov,
            pos
        );
        ensure!(pos.pending_promotion().is_none(), "promotion left pending after {}", mov);
    }

    let status = pos.status(pos.side_to_move());
    Ok((pos, status))
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let ops = Options::from_args();
    let seed = ops.seed.unwrap_or_else(rand::random);
    let mut rng = SmallRng::seed_from_u64(seed);
    println!("seed {}", seed);

    for game in 1..=ops.games {
        let (pos, status) = play_game(&mut rng, ops.max_plies)?;
        let plies = pos.history().len();
        match status {
            GameStatus::Checkmate => println!(
                "game {}: {} wins by checkmate after {} plies",
                game,
                pos.side_to_move().toggle(),
                plies
            ),
            GameStatus::Stalemate => println!("game {}: stalemate after {} plies", game, plies),
            _ => println!("game {}: abandoned after {} plies", game, plies),
        }
    }

    Ok(())
}
