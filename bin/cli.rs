use crate::applet::Applet;
use anyhow::Error as Anyhow;
use clap::Parser;
use std::{cmp::min, io::stderr};
use tracing::{instrument, Level};
use tracing_subscriber::fmt::{format::FmtSpan, layer};
use tracing_subscriber::{filter::Targets, prelude::*, registry, util::SubscriberInitExt};

/// Chess with mystery boxes.
///
/// Starts a hot-seat game when no applet is given.
#[derive(Parser)]
#[clap(author, version, about)]
pub struct Cli {
    /// Verbosity level of the session and mystery box events.
    #[clap(short, long)]
    #[cfg_attr(not(debug_assertions), clap(default_value_t = Level::WARN))]
    #[cfg_attr(debug_assertions, clap(default_value_t = Level::INFO))]
    verbosity: Level,

    #[clap(subcommand)]
    applet: Option<Applet>,
}

impl Cli {
    /// Logs go to stderr, so they never interleave with the game on stdout.
    ///
    /// Move legality is checked for every candidate move, so the rules engine
    /// is capped at `DEBUG` to keep `TRACE` focused on the game itself.
    fn filter(&self) -> Targets {
        Targets::new()
            .with_target("cli", self.verbosity)
            .with_target("lib::game", self.verbosity)
            .with_target("lib::rules", min(Level::DEBUG, self.verbosity))
            .with_default(min(Level::WARN, self.verbosity))
    }

    fn install_subscriber(&self) {
        let filter = self.filter();

        let writer = layer()
            .pretty()
            .with_thread_names(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(stderr);

        registry().with(filter).with(writer).init();
    }

    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        self.install_subscriber();
        self.applet.unwrap_or_default().execute()
    }
}
