#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unknown player '{0}' (expected random, greedy, human, model or a .mpk checkpoint)")]
    UnknownPlayer(String),
}
