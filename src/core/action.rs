//! Actions and the events they produce.
//!
//! `ActionKind` names the session actions a host can dispatch. Every engine
//! operation reports what happened as a list of `SessionEvent`s; most
//! operations emit one or two, so the list is a `SmallVec`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::error::ParseActionError;

/// Session actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    /// Roll for initiative and start a session.
    PickFirst,
    /// Flip the pause flag.
    ToggleTimer,
    /// Hand the turn to the next player.
    EndTurn,
    /// Pass for the rest of the round.
    Pass,
    /// End the session.
    Reset,
    /// Unpause.
    Resume,
}

impl ActionKind {
    /// All action kinds.
    pub const ALL: [ActionKind; 6] = [
        ActionKind::PickFirst,
        ActionKind::ToggleTimer,
        ActionKind::EndTurn,
        ActionKind::Pass,
        ActionKind::Reset,
        ActionKind::Resume,
    ];

    /// The camelCase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionKind::PickFirst => "pickFirst",
            ActionKind::ToggleTimer => "toggleTimer",
            ActionKind::EndTurn => "endTurn",
            ActionKind::Pass => "pass",
            ActionKind::Reset => "reset",
            ActionKind::Resume => "resume",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseActionError(s.to_string()))
    }
}

/// Something that happened to the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The initiative roll began.
    ShuffleStarted,
    /// One visual hop of the initiative roll.
    ShuffleStep { candidate: PlayerId },
    /// Initiative settled and the session began.
    SessionStarted { start_player: PlayerId },
    /// The turn moved.
    TurnAdvanced { from: PlayerId, to: PlayerId },
    /// A player passed for the round.
    PlayerPassed { player: PlayerId },
    /// A new round began.
    RoundStarted { round: u32 },
    /// The start player moved for the new round.
    StartRotated { start_player: PlayerId },
    /// The round limit was passed.
    GameFinished { round: u32 },
    /// The pause flag changed.
    PauseChanged { paused: bool },
    /// A player left the roster.
    PlayerRemoved { player: PlayerId },
    /// The session returned to setup.
    SessionReset,
}

/// Events produced by one operation.
pub type Events = SmallVec<[SessionEvent; 4]>;
