use anyhow::{bail, Result};
use clap::Args;
use uttt::{board::DEFAULT_SUB_SIZE, Arena, PlayerKind, Score};
use valuenet::EstimatorConfig;

use crate::{config::MAX_SUB_SIZE, output, players};

/// Play two agents against each other and print (wins, draws, losses) for the first.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// random, greedy, human, model or a .mpk checkpoint
    #[arg(short = '1', long = "player-1")]
    pub player_1: PlayerKind,

    /// random, greedy, human, model or a .mpk checkpoint
    #[arg(short = '2', long = "player-2")]
    pub player_2: PlayerKind,

    #[arg(short = 'n', long, default_value_t = 1)]
    pub games: u32,

    /// Print the board after every move
    #[arg(long)]
    pub display: bool,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Edge length of each sub-board
    #[arg(long, default_value_t = DEFAULT_SUB_SIZE)]
    pub sub_size: usize,
}

pub fn run(args: &EvaluateArgs) -> Result<Score> {
    if args.player_1 == PlayerKind::Human && args.player_2 == PlayerKind::Human {
        bail!("at most one player can be human");
    }
    if !(2..=MAX_SUB_SIZE).contains(&args.sub_size) {
        bail!("sub-size must be between 2 and {MAX_SUB_SIZE}");
    }
    let config = EstimatorConfig::new().with_sub_size(args.sub_size);
    let interactive = args.player_1 == PlayerKind::Human || args.player_2 == PlayerKind::Human;
    let mut arena = Arena::new(args.games)
        .with_display(args.display)
        .with_sub_size(args.sub_size);
    if !interactive && !args.display {
        arena = arena.with_progress(output::games_progress("evaluating", args.games));
    }

    // Each side is built on its own, even when both are named alike
    let mut a = players::build(&args.player_1, &config, players::player_seed(args.seed, 0))?;
    let mut b = players::build(&args.player_2, &config, players::player_seed(args.seed, 1))?;
    let score = arena.evaluate(&mut a, &mut b);
    log::info!(
        "{:?} vs {:?}: {} wins, {} draws, {} losses",
        args.player_1,
        args.player_2,
        score.wins,
        score.draws,
        score.losses
    );
    Ok(score)
}
