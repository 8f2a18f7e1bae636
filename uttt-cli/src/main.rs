#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{EvaluateArgs, TrainArgs};

mod commands;
mod config;
mod logging;
mod output;
mod players;

/// Ultimate Tic-Tac-Toe agents.
#[derive(Parser, Debug)]
#[command(name = "uttt", version)]
struct Cli {
    /// Log debug messages to the terminal
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Evaluate(EvaluateArgs),
    Train(TrainArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Command::Evaluate(args) => {
            logging::init(cli.verbose, None)?;
            let score = commands::evaluate::run(args)?;
            println!("{score}");
        }
        Command::Train(args) => {
            let config = args.resolve()?;
            std::fs::create_dir_all(&config.results_dir)?;
            logging::init(cli.verbose, Some(&config.results_dir.join("train.log")))?;
            commands::train::run(&config)?;
        }
    }
    Ok(())
}
