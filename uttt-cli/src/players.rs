use anyhow::{Context, Result};
use uttt::{
    players::{GreedyPlayer, HumanPlayer, RandomPlayer, ValuePlayer},
    Player, PlayerKind,
};
use valuenet::{EstimatorConfig, NetEstimator};

/// Seed for the `index`-th player: derived from `seed` when given, otherwise fresh.
pub fn player_seed(seed: Option<u64>, index: u64) -> u64 {
    seed.map_or_else(rand::random, |s| s.wrapping_add(index))
}

/// Value player over a fresh or restored network.
pub fn value_player(
    kind: &PlayerKind,
    config: EstimatorConfig,
    seed: u64,
) -> Result<ValuePlayer<NetEstimator>> {
    let estimator = match kind {
        PlayerKind::Checkpoint(path) => NetEstimator::load(path, config)
            .with_context(|| format!("loading player from {}", path.display()))?,
        _ => NetEstimator::new(config, Some(seed)),
    };
    Ok(ValuePlayer::new(estimator, seed))
}

pub fn build(kind: &PlayerKind, config: &EstimatorConfig, seed: u64) -> Result<Box<dyn Player>> {
    Ok(match kind {
        PlayerKind::Random => Box::new(RandomPlayer::new(seed)),
        PlayerKind::Greedy => Box::new(GreedyPlayer::new(seed)),
        PlayerKind::Human => Box::new(HumanPlayer::stdio()),
        PlayerKind::Model | PlayerKind::Checkpoint(_) => {
            Box::new(value_player(kind, config.clone(), seed)?)
        }
    })
}
