use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use uttt::{
    fit,
    players::{GreedyPlayer, RandomPlayer, ValuePlayer, CHECKPOINT_EXTENSION},
    Arena, Example, Score, SelfPlay,
};
use valuenet::NetEstimator;

use crate::{config::TrainConfig, output, players::player_seed};

/// Improve a value network by alternating self-play, fitting and evaluation.
#[derive(Args, Debug, Default)]
pub struct TrainArgs {
    /// RON file with training hyperparameters
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long = "learn-rate", visible_alias = "lr")]
    pub learning_rate: Option<f64>,

    #[arg(short, long)]
    pub alpha: Option<f32>,

    #[arg(short, long)]
    pub epsilon: Option<f64>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many rounds
    #[arg(long)]
    pub rounds: Option<u32>,

    #[arg(long)]
    pub results_dir: Option<PathBuf>,
}

impl TrainArgs {
    /// Config file (or defaults) with the command line flags applied on top.
    pub fn resolve(&self) -> Result<TrainConfig> {
        let mut config = match &self.config {
            Some(path) => TrainConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => TrainConfig::default(),
        };
        if let Some(lr) = self.learning_rate {
            config.learning_rate = lr;
        }
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.rounds.is_some() {
            config.rounds = self.rounds;
        }
        if let Some(dir) = &self.results_dir {
            config.results_dir.clone_from(dir);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Contents of `best.ron`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestRecord {
    pub round: u32,
    pub checkpoint: PathBuf,
    /// Score against the greedy player.
    pub score: Score,
}

fn checkpoint(dir: &Path, name: &str) -> PathBuf {
    dir.join(name).with_extension(CHECKPOINT_EXTENSION)
}

/// Adds the newest examples. With a `limit`, only the last `limit` examples
/// across rounds are kept; without one, the newest round replaces the rest.
fn keep_history(data: &mut Vec<Example>, new_data: Vec<Example>, limit: Option<usize>) {
    match limit {
        Some(limit) => {
            data.extend(new_data);
            let excess = data.len().saturating_sub(limit);
            data.drain(..excess);
        }
        None => *data = new_data,
    }
}

/// Runs rounds until the configured limit. Returns the best record, if any round beat the last.
pub fn run(config: &TrainConfig) -> Result<Option<BestRecord>> {
    let dir = &config.results_dir;
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    log::info!("training with {config:?}");

    let estimator = NetEstimator::new(config.estimator(), config.seed);
    let mut player = ValuePlayer::new(estimator, player_seed(config.seed, 0));
    let mut random = RandomPlayer::new(player_seed(config.seed, 1));
    let mut greedy = GreedyPlayer::new(player_seed(config.seed, 2));
    let mut rng = XorShiftRng::seed_from_u64(player_seed(config.seed, 3));

    let mut data: Vec<Example> = Vec::new();
    let mut best_score = Score::default();
    let mut best = None;
    let mut score = None;

    for round in 0.. {
        if config.rounds.is_some_and(|rounds| round >= rounds) {
            break;
        }
        output::print_section(&format!("ROUND {}", round + 1));

        let path = checkpoint(dir, &format!("model_{round}"));
        player.estimator().save(&path)?;
        if let Some(last) = score.filter(|last| round > 0 && *last > best_score) {
            player.estimator().save(&checkpoint(dir, "best"))?;
            let record = BestRecord {
                round,
                checkpoint: path,
                score: last,
            };
            let text = ron::ser::to_string_pretty(&record, PrettyConfig::default())?;
            fs::write(dir.join("best.ron"), text).context("writing best.ron")?;
            log::info!("new best model {} with score {last}", record.checkpoint.display());
            best_score = last;
            best = Some(record);
        }

        let start = Instant::now();
        let new_data = SelfPlay::new(config.self_play_games)
            .with_alpha(config.alpha)
            .with_epsilon(config.epsilon)
            .with_sub_size(config.sub_size)
            .with_progress(output::games_progress("self-play", config.self_play_games))
            .run(&mut player);
        log::info!(
            "self-play produced {} examples in {:.1?}",
            new_data.len(),
            start.elapsed()
        );
        keep_history(&mut data, new_data, config.history);

        let start = Instant::now();
        let losses = fit(
            player.estimator_mut(),
            &mut data,
            config.epochs,
            config.batch_size,
            &mut rng,
        );
        log::info!(
            "trained on {} examples in {:.1?}, final loss {:.4e}",
            data.len(),
            start.elapsed(),
            losses.last().copied().unwrap_or_default()
        );

        let vs_random = Arena::new(config.eval_games)
            .with_sub_size(config.sub_size)
            .with_progress(output::games_progress("vs random", config.eval_games))
            .evaluate(&mut player, &mut random);
        log::info!("against random: {vs_random}");
        let vs_greedy = Arena::new(config.eval_games)
            .with_sub_size(config.sub_size)
            .with_progress(output::games_progress("vs greedy", config.eval_games))
            .evaluate(&mut player, &mut greedy);
        log::info!("against greedy: {vs_greedy}");
        score = Some(vs_greedy);
    }
    Ok(best)
}
