//! # table-clock
//!
//! Turn, round and timer tracking for tabletop game sessions.
//!
//! ## Design Principles
//!
//! 1. **One owner**: `TurnEngine` owns the roster and the session record.
//!    Everything else reads through `Snapshot`.
//!
//! 2. **Invalid input is a no-op**: operations validate first and either
//!    apply fully or return an `ActionError` without touching state.
//!
//! 3. **No hidden clocks**: time enters only through `tick` and
//!    `shuffle_step`, fired by `host::SessionHost` from caller-supplied
//!    elapsed time.
//!
//! ## Turn Modes
//!
//! - **Orbit**: a round ends when play returns to the start player.
//! - **Pass**: a round ends when every player has passed; the start seat
//!   then rotates one position.
//!
//! ## Modules
//!
//! - `core`: Players, roster, session state, actions, RNG, configuration
//! - `engine`: The turn/round state machine
//! - `host`: Heartbeat scheduling around the engine
//! - `error`: Error types

pub mod core;
pub mod engine;
pub mod error;
pub mod host;

// Re-export commonly used types
pub use crate::core::{
    format_clock, ActionKind, Events, GameStatus, Player, PlayerId, PlayerPatch, Randomizer,
    Roster, SessionConfig, SessionEvent, SessionRng, SessionRngState, SessionState, Snapshot,
    TurnMode, PALETTE,
};

pub use crate::engine::TurnEngine;

pub use crate::error::{ActionError, ConfigError, ParseActionError};

pub use crate::host::{Heartbeat, SessionHost};
