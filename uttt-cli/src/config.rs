use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uttt::board::DEFAULT_SUB_SIZE;
use valuenet::EstimatorConfig;

/// Largest sub-board whose full grid still fits `u8` coordinates.
pub const MAX_SUB_SIZE: usize = 15;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse RON: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Training hyperparameters, loadable from RON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub learning_rate: f64,
    /// Temporal-difference blending factor.
    pub alpha: f32,
    /// Exploration rate during self-play.
    pub epsilon: f64,
    pub seed: Option<u64>,
    /// Edge length of each sub-board.
    pub sub_size: usize,
    pub width: usize,
    pub self_play_games: u32,
    pub epochs: usize,
    pub batch_size: usize,
    pub eval_games: u32,
    /// Examples kept across rounds. `None` trains on the latest round only.
    pub history: Option<usize>,
    /// Stop after this many rounds instead of running forever.
    pub rounds: Option<u32>,
    pub results_dir: PathBuf,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            learning_rate: 1e-4,
            alpha: 0.2,
            epsilon: 0.2,
            seed: None,
            sub_size: DEFAULT_SUB_SIZE,
            width: 32,
            self_play_games: 100,
            epochs: 10,
            batch_size: 128,
            eval_games: 100,
            history: None,
            rounds: None,
            results_dir: PathBuf::from("results"),
        }
    }
}

impl TrainConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: TrainConfig = ron::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Validation(msg.to_owned()));
        if self.learning_rate <= 0.0 {
            return invalid("learning_rate must be > 0");
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return invalid("alpha must be in [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return invalid("epsilon must be in [0, 1]");
        }
        if !(2..=MAX_SUB_SIZE).contains(&self.sub_size) {
            return Err(ConfigError::Validation(format!(
                "sub_size must be in [2, {MAX_SUB_SIZE}]"
            )));
        }
        if self.width == 0 {
            return invalid("width must be > 0");
        }
        if self.self_play_games == 0 || self.eval_games == 0 {
            return invalid("game counts must be > 0");
        }
        if self.batch_size == 0 {
            return invalid("batch_size must be > 0");
        }
        if self.history == Some(0) {
            return invalid("history must be > 0 when set");
        }
        Ok(())
    }

    pub fn estimator(&self) -> EstimatorConfig {
        EstimatorConfig::new()
            .with_sub_size(self.sub_size)
            .with_width(self.width)
            .with_learning_rate(self.learning_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = TrainConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.batch_size, 128);
        assert_eq!(config.estimator().learning_rate, 1e-4);
    }

    #[test]
    fn partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.ron");
        std::fs::write(&path, "(alpha: 0.5, rounds: Some(3), history: Some(10000))").unwrap();
        let config = TrainConfig::load(&path).unwrap();
        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.rounds, Some(3));
        assert_eq!(config.history, Some(10_000));
        assert_eq!(config.epochs, 10);
    }

    #[test]
    fn rejects_bad_values() {
        let config = TrainConfig {
            epsilon: 1.5,
            ..TrainConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "config validation error: epsilon must be in [0, 1]"
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ron");
        std::fs::write(&path, "(sub_size: 1)").unwrap();
        assert!(matches!(
            TrainConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
        std::fs::write(&path, "(batch_size: 0)").unwrap();
        assert!(matches!(
            TrainConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
        std::fs::write(&path, "(batch_size: \"many\")").unwrap();
        assert!(matches!(TrainConfig::load(&path), Err(ConfigError::Parse(_))));
        assert!(matches!(
            TrainConfig::load(&dir.path().join("missing.ron")),
            Err(ConfigError::FileRead { .. })
        ));
    }
}
