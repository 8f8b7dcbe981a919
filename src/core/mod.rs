//! Core session types: players, roster, state, actions, RNG, configuration.
//!
//! Everything here is plain data plus small helpers. The turn logic that
//! ties it together lives in `engine`.

pub mod action;
pub mod clock;
pub mod config;
pub mod player;
pub mod rng;
pub mod roster;
pub mod state;

pub use action::{ActionKind, Events, SessionEvent};
pub use clock::format_clock;
pub use config::{SessionConfig, TurnMode};
pub use player::{Player, PlayerId, PlayerPatch};
pub use rng::{Randomizer, SessionRng, SessionRngState};
pub use roster::{Roster, PALETTE};
pub use state::{GameStatus, SessionState, Snapshot};
