use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    #[error("checkpoint not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to save model to {}: {reason}", .path.display())]
    Save { path: PathBuf, reason: String },

    #[error("failed to load model from {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_file() {
        let err = CheckpointError::NotFound(PathBuf::from("results/best.mpk"));
        assert_eq!(err.to_string(), "checkpoint not found: results/best.mpk");

        let err = CheckpointError::Load {
            path: PathBuf::from("model_3.mpk"),
            reason: "shape mismatch".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "failed to load model from model_3.mpk: shape mismatch"
        );
    }
}
