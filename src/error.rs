//! Error types.
//!
//! Engine operations return `ActionError` when a precondition does not hold.
//! A rejected operation never changes state, so callers that want the
//! "ignore invalid input" behavior can drop the error (this is what
//! `TurnEngine::action` does).

use crate::core::PlayerId;

/// Why an engine operation was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("the roster is empty")]
    EmptyRoster,

    #[error("initiative is already being rolled")]
    AlreadyShuffling,

    #[error("initiative is not being rolled")]
    NotShuffling,

    #[error("no player is currently active")]
    NoActivePlayer,

    #[error("no session is in progress")]
    NotPlaying,

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("player names must not be blank")]
    BlankName,
}

/// Invalid session configuration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("tick interval must be non-zero")]
    ZeroTickInterval,

    #[error("shuffle interval must be non-zero")]
    ZeroShuffleInterval,
}

/// An action name that does not match any `ActionKind`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown action `{0}`")]
pub struct ParseActionError(pub String);
