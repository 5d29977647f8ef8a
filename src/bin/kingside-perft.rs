// Copyright 2021-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::Result;
use kingside::core::Move;
use kingside::movegen;
use kingside::Position;
use serde::Serialize;
use structopt::StructOpt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Debug, StructOpt)]
struct Options {
    /// The depth to search to.
    #[structopt(short, long)]
    depth: u32,

    /// Print the node count below each root move.
    #[structopt(long)]
    divide: bool,

    /// Print the report as JSON.
    #[structopt(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    depth: u32,
    nodes: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    divide: Vec<RootMove>,
}

#[derive(Debug, Serialize)]
struct RootMove {
    #[serde(rename = "move")]
    mov: Move,
    nodes: u64,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let ops = Options::from_args();
    let pos = Position::new_game();
    let divide: Vec<RootMove> = if ops.divide && ops.depth > 0 {
        movegen::divide(&pos, ops.depth)
            .into_iter()
            .map(|(mov, nodes)| RootMove { mov, nodes })
            .collect()
    } else {
        Vec::new()
    };

    let nodes = if divide.is_empty() {
        movegen::perft(&pos, ops.depth)
    } else {
        divide.iter().map(|root| root.nodes).sum()
    };

    let report = Report {
        depth: ops.depth,
        nodes,
        divide,
    };

    if ops.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for root in &report.divide {
        println!("{}: {}", root.mov, root.nodes);
    }

    println!("{}", report.nodes);
    Ok(())
}
