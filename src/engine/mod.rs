//! The turn/round state machine.
//!
//! `TurnEngine` owns the roster and the session record and is the only
//! thing that mutates them. Operations are synchronous and atomic: each
//! either applies fully and reports `Events`, or is rejected with an
//! `ActionError` and leaves state untouched.
//!
//! ```text
//!   Setup ──(initiative settles)──→ Playing ──(round limit passed)──→ Finished
//!     ↑                                │                                 │
//!     └────────────(reset)─────────────┴──────────────(reset)────────────┘
//! ```
//!
//! Time does not pass inside the engine. A host calls `tick` once per
//! heartbeat and `shuffle_step` once per initiative hop (see `host`).

mod initiative;
mod turns;

use smallvec::smallvec;
use tracing::{debug, info};

use crate::core::{
    ActionKind, Events, GameStatus, Player, PlayerId, PlayerPatch, Randomizer, Roster,
    SessionConfig, SessionEvent, SessionRng, SessionRngState, SessionState, Snapshot, TurnMode,
};
use crate::error::ActionError;

/// Session engine.
#[derive(Clone, Debug)]
pub struct TurnEngine<R = SessionRng> {
    config: SessionConfig,
    roster: Roster,
    state: SessionState,
    rng: R,
}

impl TurnEngine<SessionRng> {
    /// Create an engine with an empty roster.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self::with_roster(config, Roster::new())
    }

    /// Create an engine over an existing roster.
    ///
    /// The RNG uses `config.seed`, or entropy if unset.
    #[must_use]
    pub fn with_roster(config: SessionConfig, roster: Roster) -> Self {
        let rng = config.seed.map_or_else(SessionRng::from_entropy, SessionRng::new);
        Self::with_randomizer(config, roster, rng)
    }

    /// Create an engine whose RNG resumes from a checkpoint.
    ///
    /// `config.seed` is ignored; the checkpoint carries its own seed.
    #[must_use]
    pub fn with_rng_state(config: SessionConfig, roster: Roster, rng: &SessionRngState) -> Self {
        Self::with_randomizer(config, roster, SessionRng::from_state(rng))
    }

    /// Checkpoint of the RNG, for resuming the same draw sequence later.
    #[must_use]
    pub fn rng_state(&self) -> SessionRngState {
        self.rng.state()
    }
}

impl<R: Randomizer> TurnEngine<R> {
    /// Create an engine with a custom randomizer.
    ///
    /// Stats already on the roster are kept until the next roll or reset.
    pub fn with_randomizer(config: SessionConfig, roster: Roster, rng: R) -> Self {
        Self {
            config,
            roster,
            state: SessionState::new(),
            rng,
        }
    }

    // === Queries ===

    /// The configuration in effect.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The roster.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The session record.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Owned read-only copy of everything presentation needs.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state.clone(),
            turn_mode: self.config.turn_mode,
            max_rounds: self.config.max_rounds,
            players: self.roster.players().clone(),
        }
    }

    /// Is the initiative roll in progress?
    #[must_use]
    pub fn is_shuffling(&self) -> bool {
        self.state.shuffling
    }

    /// Would a heartbeat tick accrue time right now?
    #[must_use]
    pub fn clock_running(&self) -> bool {
        self.state.is_playing()
            && !self.state.paused
            && !self.state.shuffling
            && !self.roster.is_empty()
    }

    /// Should the host confirm before resetting?
    ///
    /// A finished session can be reset without asking.
    #[must_use]
    pub fn requires_confirmation(&self) -> bool {
        self.state.status != GameStatus::Finished
    }

    // === Settings ===

    /// Change the turn-order discipline.
    pub fn set_turn_mode(&mut self, mode: TurnMode) {
        self.config.turn_mode = mode;
    }

    /// Change the round limit (0 for unlimited).
    pub fn set_max_rounds(&mut self, max_rounds: u32) {
        self.config.max_rounds = max_rounds;
    }

    // === Dispatch ===

    /// Run an action, ignoring it if its preconditions do not hold.
    ///
    /// `PickFirst` only starts the initiative roll; the host drives the
    /// remaining hops through `shuffle_step`.
    pub fn action(&mut self, kind: ActionKind) -> Events {
        let result = match kind {
            ActionKind::PickFirst => self.start_initiative(),
            ActionKind::ToggleTimer => Ok(self.toggle_timer()),
            ActionKind::EndTurn => self.end_turn(),
            ActionKind::Pass => self.pass(),
            ActionKind::Reset => Ok(self.reset()),
            ActionKind::Resume => Ok(self.resume()),
        };

        result.unwrap_or_else(|err| {
            debug!(action = %kind, reason = %err, "action ignored");
            Events::new()
        })
    }

    // === Clock ===

    /// Flip the pause flag. Valid in any status.
    pub fn toggle_timer(&mut self) -> Events {
        self.state.paused = !self.state.paused;
        smallvec![SessionEvent::PauseChanged {
            paused: self.state.paused
        }]
    }

    /// Unpause. Idempotent.
    pub fn resume(&mut self) -> Events {
        if !self.state.paused {
            return Events::new();
        }
        self.state.paused = false;
        smallvec![SessionEvent::PauseChanged { paused: false }]
    }

    /// One heartbeat: credit a second to the session and the active player.
    ///
    /// Returns false (and changes nothing) unless `clock_running`.
    pub fn tick(&mut self) -> bool {
        if !self.clock_running() {
            return false;
        }

        self.state.elapsed_seconds += 1;
        if let Some(active) = self.state.active_player {
            self.roster.add_time(active, 1);
        }
        true
    }

    // === Lifecycle ===

    /// Return to setup, zeroing the session and every player's stats.
    ///
    /// Players, names and colors are kept. Cancels an initiative roll in
    /// progress.
    pub fn reset(&mut self) -> Events {
        self.state = SessionState::new();
        self.roster.reset_stats();
        info!(players = self.roster.len(), "session reset");
        smallvec![SessionEvent::SessionReset]
    }

    // === Roster ===

    /// Add a player at the end of turn order.
    pub fn add_player(&mut self, name: &str) -> Result<Player, ActionError> {
        let player = self.roster.add(name)?;
        debug!(player = %player.id, name = %player.name, "player added");
        Ok(player)
    }

    /// Merge a patch into a player's display fields.
    pub fn update_player(&mut self, id: PlayerId, patch: &PlayerPatch) -> bool {
        self.roster.update(id, patch)
    }

    /// Adjust a player's score, clamping at zero.
    pub fn update_score(&mut self, id: PlayerId, delta: i64) -> Option<u32> {
        self.roster.update_score(id, delta)
    }

    /// Remove a player and repair the turn pointers.
    ///
    /// - Start player removed: the start pointer moves to the next seat.
    /// - Active player removed mid-session: the turn passes to the next
    ///   unpassed player, or the round completes if only passed players
    ///   remain.
    /// - Last player removed: the session resets.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<Events, ActionError> {
        let (index, removed) = self.roster.remove(id).ok_or(ActionError::UnknownPlayer(id))?;
        debug!(player = %removed.id, name = %removed.name, "player removed");

        let mut events: Events = smallvec![SessionEvent::PlayerRemoved { player: id }];

        if self.roster.is_empty() {
            let started = self.state.status != GameStatus::Setup;
            if started || self.state.shuffling {
                events.extend(self.reset());
            } else {
                self.state.active_player = None;
                self.state.start_player = None;
            }
            return Ok(events);
        }

        // The seat after the removed one now sits at `index`
        let seat = index % self.roster.len();

        if self.state.start_player == Some(id) {
            self.state.start_player = Some(self.roster[seat].id);
        }

        if self.state.active_player == Some(id) {
            if self.state.shuffling {
                self.state.active_player = Some(self.roster[seat].id);
            } else if self.state.is_playing() {
                if self.roster.all_passed() {
                    self.complete_round(&mut events);
                } else {
                    let next = self.roster[self.roster.scan_unpassed(seat)].id;
                    self.state.active_player = Some(next);
                    events.push(SessionEvent::TurnAdvanced { from: id, to: next });
                }
            } else {
                self.state.active_player = None;
            }
        }

        Ok(events)
    }

    // === Internals ===

    /// Position of the active player, checking the turn-action preconditions.
    fn active_index(&self) -> Result<usize, ActionError> {
        if self.roster.is_empty() {
            return Err(ActionError::EmptyRoster);
        }
        if self.state.shuffling {
            return Err(ActionError::AlreadyShuffling);
        }
        if !self.state.is_playing() {
            return Err(ActionError::NotPlaying);
        }

        let active = self.state.active_player.ok_or(ActionError::NoActivePlayer)?;
        self.roster.position(active).ok_or(ActionError::NoActivePlayer)
    }

    fn finish(&mut self, events: &mut Events) {
        self.state.status = GameStatus::Finished;
        self.state.paused = true;
        info!(round = self.state.round, "session finished");
        events.push(SessionEvent::GameFinished {
            round: self.state.round,
        });
    }
}
