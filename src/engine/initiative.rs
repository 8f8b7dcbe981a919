//! Roll for initiative.
//!
//! The roll is a fixed number of visual hops (`SessionConfig::shuffle_steps`)
//! followed by one uniform draw. Hops only move the highlighted candidate;
//! nothing else about the session changes until the draw settles. A roll in
//! progress cannot be restarted.

use smallvec::smallvec;
use tracing::{debug, info};

use super::TurnEngine;
use crate::core::{Events, GameStatus, Randomizer, SessionEvent};
use crate::error::ActionError;

impl<R: Randomizer> TurnEngine<R> {
    /// Begin the initiative roll.
    ///
    /// With zero configured hops the draw settles immediately.
    pub fn start_initiative(&mut self) -> Result<Events, ActionError> {
        if self.roster.is_empty() {
            return Err(ActionError::EmptyRoster);
        }
        if self.state.shuffling {
            return Err(ActionError::AlreadyShuffling);
        }

        self.state.shuffling = true;
        self.state.shuffle_step = 0;
        debug!(steps = self.config.shuffle_steps, "initiative roll started");

        let mut events: Events = smallvec![SessionEvent::ShuffleStarted];
        if self.config.shuffle_steps == 0 {
            self.settle_initiative(&mut events);
        }
        Ok(events)
    }

    /// Take one hop. The last hop also settles the draw.
    pub fn shuffle_step(&mut self) -> Result<Events, ActionError> {
        if !self.state.shuffling {
            return Err(ActionError::NotShuffling);
        }

        // Emptying the roster resets the session, which ends the roll
        let len = self.roster.len();
        let candidate = self.roster[self.state.shuffle_step as usize % len].id;
        self.state.active_player = Some(candidate);
        self.state.shuffle_step += 1;

        let mut events: Events = smallvec![SessionEvent::ShuffleStep { candidate }];
        if self.state.shuffle_step >= self.config.shuffle_steps {
            self.settle_initiative(&mut events);
        }
        Ok(events)
    }

    /// Run the whole roll at once, for hosts without an animation.
    pub fn roll_initiative(&mut self) -> Result<Events, ActionError> {
        let mut events = self.start_initiative()?;
        while self.state.shuffling {
            events.extend(self.shuffle_step()?);
        }
        Ok(events)
    }

    /// Draw the start player and open round one with fresh stats.
    fn settle_initiative(&mut self, events: &mut Events) {
        let len = self.roster.len();
        let winner = self.roster[self.rng.draw_index(len) % len].id;

        self.state.start_player = Some(winner);
        self.state.active_player = Some(winner);
        self.state.status = GameStatus::Playing;
        self.state.paused = false;
        self.state.round = 1;
        self.state.elapsed_seconds = 0;
        self.state.shuffling = false;
        self.state.shuffle_step = 0;
        self.roster.reset_stats();

        info!(start_player = %winner, players = len, "session started");
        events.push(SessionEvent::SessionStarted {
            start_player: winner,
        });
    }
}
