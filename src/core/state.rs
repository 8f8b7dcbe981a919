//! Session state and read-only snapshots.
//!
//! ## SessionState
//!
//! The mutable session record owned by `TurnEngine`: lifecycle status,
//! active and start player pointers, round counter, pause/shuffle flags and
//! elapsed time.
//!
//! ## Snapshot
//!
//! An owned copy of the session for presentation. Cloning the roster is
//! O(1) thanks to `im::Vector`, so hosts can re-read after every mutation.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::TurnMode;
use super::player::{Player, PlayerId};

/// Session lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Roster editing, no session running.
    #[default]
    Setup,
    /// A session is in progress.
    Playing,
    /// The round limit was passed.
    Finished,
}

/// Mutable session fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Lifecycle status.
    pub status: GameStatus,

    /// Whose turn it is. Cycles through candidates while shuffling.
    pub active_player: Option<PlayerId>,

    /// Who opened the current round.
    pub start_player: Option<PlayerId>,

    /// Current round (starts at 1).
    pub round: u32,

    /// Is timer accrual suspended?
    pub paused: bool,

    /// Is the initiative roll in progress?
    pub shuffling: bool,

    /// Hops taken in the current initiative roll.
    pub shuffle_step: u32,

    /// Seconds elapsed in the session.
    pub elapsed_seconds: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// The initial (setup) state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: GameStatus::Setup,
            active_player: None,
            start_player: None,
            round: 1,
            paused: true,
            shuffling: false,
            shuffle_step: 0,
            elapsed_seconds: 0,
        }
    }

    /// Is a session in progress?
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }
}

/// Read-only view of the whole session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Session fields.
    pub state: SessionState,

    /// Turn-order discipline in effect.
    pub turn_mode: TurnMode,

    /// Round limit (0 for unlimited).
    pub max_rounds: u32,

    /// Players in turn order.
    pub players: Vector<Player>,
}

impl Snapshot {
    /// The active player's record.
    #[must_use]
    pub fn active(&self) -> Option<&Player> {
        let id = self.state.active_player?;
        self.players.iter().find(|p| p.id == id)
    }

    /// The start player's record.
    #[must_use]
    pub fn start(&self) -> Option<&Player> {
        let id = self.state.start_player?;
        self.players.iter().find(|p| p.id == id)
    }

    /// Players ordered by score, highest first. Ties keep turn order.
    #[must_use]
    pub fn standings(&self) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.players.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    /// The leader in `standings`.
    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        self.standings().first().copied()
    }
}
