use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use lib::game::GameState;
use lib::rules::{moves, perft};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{info, instrument};

/// Counts the nodes of the legal move tree, move by move.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Perft {
    /// How many plies to expand.
    #[clap(short, long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(1..))]
    depth: u8,

    /// The position in FEN notation, the standard starting position if omitted.
    #[clap(short, long)]
    fen: Option<String>,
}

impl Perft {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let state = match &self.fen {
            None => GameState::new("white", "black"),
            Some(fen) => GameState::from_fen("white", "black", fen).context("invalid position")?,
        };

        let timer = Instant::now();
        let mut divide: Vec<_> = moves(&state)
            .par_bridge()
            .filter_map(|m| Some((m, perft(&state.play(m).ok()?, self.depth - 1))))
            .collect();

        divide.sort_unstable_by_key(|(m, _)| m.to_string());

        for (m, nodes) in &divide {
            println!("{m}: {nodes}");
        }

        let nodes: usize = divide.iter().map(|(_, n)| n).sum();
        let elapsed = timer.elapsed();
        info!(depth = self.depth, nodes, ?elapsed, "perft");
        println!("\n{nodes}");

        Ok(())
    }
}
