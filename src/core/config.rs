//! Session configuration.
//!
//! Hosts build a `SessionConfig` with the builder methods or deserialize it
//! (every field has a default, so partial JSON is fine):
//!
//! ```
//! use table_clock::core::{SessionConfig, TurnMode};
//!
//! let config = SessionConfig::default()
//!     .with_turn_mode(TurnMode::Pass)
//!     .with_max_rounds(5)
//!     .with_seed(42);
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Turn-order discipline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnMode {
    /// A round ends when play returns positionally to the start player.
    #[default]
    Orbit,
    /// A round ends only when every player has passed.
    Pass,
}

/// Configuration for a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Turn-order discipline.
    pub turn_mode: TurnMode,

    /// Last round to be played. 0 means unlimited.
    pub max_rounds: u32,

    /// Visual hops during the initiative roll before the draw settles.
    pub shuffle_steps: u32,

    /// Time between initiative hops.
    pub shuffle_interval: Duration,

    /// Clock heartbeat period. Each beat credits one second.
    pub tick_interval: Duration,

    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            turn_mode: TurnMode::Orbit,
            max_rounds: 0,
            shuffle_steps: 16,
            shuffle_interval: Duration::from_millis(100),
            tick_interval: Duration::from_secs(1),
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Set the turn mode.
    #[must_use]
    pub fn with_turn_mode(mut self, mode: TurnMode) -> Self {
        self.turn_mode = mode;
        self
    }

    /// Set the round limit (0 for unlimited).
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Set the number of initiative hops.
    #[must_use]
    pub fn with_shuffle_steps(mut self, steps: u32) -> Self {
        self.shuffle_steps = steps;
        self
    }

    /// Set the time between initiative hops.
    #[must_use]
    pub fn with_shuffle_interval(mut self, interval: Duration) -> Self {
        self.shuffle_interval = interval;
        self
    }

    /// Set the clock heartbeat period.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Would `round` be past the configured limit?
    #[must_use]
    pub fn exceeds_limit(&self, round: u32) -> bool {
        self.max_rounds > 0 && round > self.max_rounds
    }

    /// Check the scheduling periods.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.shuffle_interval.is_zero() {
            return Err(ConfigError::ZeroShuffleInterval);
        }
        Ok(())
    }
}
