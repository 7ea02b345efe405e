use thiserror::Error;

/// Errors surfaced at the input-model boundary.
///
/// Inside event replay nothing is fatal: malformed descriptions degrade to
/// "state unchanged, log and continue". These variants cover the structured
/// inputs a game cannot start without.
#[derive(Error, Debug)]
pub enum BbError {
    #[error("unparseable inning label: {0}")]
    BadInningLabel(String),

    #[error("malformed game data: {0}")]
    MalformedGameData(String),

    #[error("deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BbError>;
