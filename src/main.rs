use std::io;

use circulation_desk::{
    Config, Ledger, OutputFormat, demo,
    observers::{DueDateNotifier, TransitionLogger},
};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing::Level;

/// Command-line arguments for the circulation desk demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Show debug logs, including refused requests
    #[arg(short, long)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Rendering of listings and user summaries
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

/// CLI spelling of [`OutputFormat`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Status lines
    Text,
    /// Pretty-printed JSON
    Json,
}

impl Args {
    /// Settings derived from the flags
    fn config(&self) -> Config {
        let log_level = if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::WARN
        } else {
            Level::INFO
        };
        let format = match self.format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        };
        Config { format, log_level }
    }
}

fn main() {
    let config = Args::parse().config();
    circulation_desk::logging::init(config.log_level);

    println!("{}", "Library Circulation Desk".green().bold());

    let mut ledger = Ledger::new();
    ledger.register_observer(Box::new(TransitionLogger));
    ledger.register_observer(Box::new(DueDateNotifier));

    let stdout = io::stdout();
    if let Err(error) = demo::run(&mut ledger, &config, &mut stdout.lock()) {
        tracing::error!(%error, "demo output failed");
    }
}
