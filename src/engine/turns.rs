//! Turn advancement and round completion.
//!
//! Both turn actions hand the turn to the next player in seat order who has
//! not passed. How a round ends depends on the turn mode:
//!
//! - **Orbit**: `end_turn` landing back on the start player closes the round.
//! - **Pass**: only the last `pass` of a round closes it; positional
//!   wraparound is never checked.
//!
//! In either mode, the last player passing closes the round, clears every
//! pass flag and moves the start seat one position along.

use smallvec::smallvec;
use tracing::info;

use super::TurnEngine;
use crate::core::{Events, PlayerId, Randomizer, SessionEvent, TurnMode};
use crate::error::ActionError;

impl<R: Randomizer> TurnEngine<R> {
    /// End the active player's turn.
    pub fn end_turn(&mut self) -> Result<Events, ActionError> {
        let index = self.active_index()?;
        let mut events = Events::new();

        let next = self.advance_from(index, &mut events);

        if self.config.turn_mode == TurnMode::Orbit && self.state.start_player == Some(next) {
            self.complete_orbit(&mut events);
        }

        Ok(events)
    }

    /// Pass for the rest of the round.
    pub fn pass(&mut self) -> Result<Events, ActionError> {
        let index = self.active_index()?;
        let player = self.roster[index].id;

        self.roster.mark_passed(index);
        let mut events: Events = smallvec![SessionEvent::PlayerPassed { player }];

        if self.roster.all_passed() {
            self.complete_round(&mut events);
        } else {
            self.advance_from(index, &mut events);
        }

        Ok(events)
    }

    /// Move the turn from seat `index` to the next unpassed seat.
    fn advance_from(&mut self, index: usize, events: &mut Events) -> PlayerId {
        let from = self.roster[index].id;
        let to = self.roster[self.roster.next_unpassed_after(index)].id;

        self.state.active_player = Some(to);
        events.push(SessionEvent::TurnAdvanced { from, to });
        to
    }

    /// Play came back around to the start player.
    ///
    /// The round counter moves even when it passes the limit, so a finished
    /// orbit session reports the round it would have started.
    fn complete_orbit(&mut self, events: &mut Events) {
        let round = self.state.round + 1;
        self.state.round = round;

        if self.config.exceeds_limit(round) {
            self.finish(events);
        } else {
            info!(round, "round started");
            events.push(SessionEvent::RoundStarted { round });
        }
    }

    /// Everyone has passed.
    ///
    /// Past the limit the session finishes with the round, passes and start
    /// seat left as they were.
    pub(super) fn complete_round(&mut self, events: &mut Events) {
        let round = self.state.round + 1;
        if self.config.exceeds_limit(round) {
            self.finish(events);
            return;
        }

        self.state.round = round;
        self.roster.clear_passes();
        info!(round, "round started");
        events.push(SessionEvent::RoundStarted { round });

        if let Some(start) = self.state.start_player {
            let len = self.roster.len();
            let seat = self.roster.position(start).map_or(0, |i| (i + 1) % len);
            let next = self.roster[seat].id;

            self.state.start_player = Some(next);
            self.state.active_player = Some(next);
            events.push(SessionEvent::StartRotated { start_player: next });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameStatus, Roster, SessionConfig};

    #[derive(Clone, Copy, Debug)]
    struct Seat(usize);

    impl Randomizer for Seat {
        fn draw_index(&mut self, len: usize) -> usize {
            self.0 % len
        }
    }

    fn started(
        count: usize,
        first: usize,
        config: SessionConfig,
    ) -> (TurnEngine<Seat>, Vec<PlayerId>) {
        let mut roster = Roster::new();
        let ids = (0..count)
            .map(|i| roster.add(&format!("P{}", i)).unwrap().id)
            .collect();
        let mut engine = TurnEngine::with_randomizer(config, roster, Seat(first));
        engine.roll_initiative().unwrap();
        (engine, ids)
    }

    #[test]
    fn test_end_turn_advances_in_seat_order() {
        let (mut engine, ids) = started(3, 0, SessionConfig::default());

        let events = engine.end_turn().unwrap();
        assert_eq!(engine.state().active_player, Some(ids[1]));
        assert_eq!(
            events.as_slice(),
            &[SessionEvent::TurnAdvanced { from: ids[0], to: ids[1] }]
        );
        assert_eq!(engine.state().round, 1);
    }

    #[test]
    fn test_orbit_from_middle_seat() {
        let (mut engine, ids) = started(4, 2, SessionConfig::default());
        assert_eq!(engine.state().start_player, Some(ids[2]));

        let order: Vec<_> = (0..4)
            .map(|_| {
                engine.end_turn().unwrap();
                engine.state().active_player.unwrap()
            })
            .collect();

        assert_eq!(order, vec![ids[3], ids[0], ids[1], ids[2]]);
        assert_eq!(engine.state().round, 2);
        // Orbit mode keeps the start seat
        assert_eq!(engine.state().start_player, Some(ids[2]));
    }

    #[test]
    fn test_end_turn_skips_passed_players() {
        let config = SessionConfig::default().with_turn_mode(TurnMode::Pass);
        let (mut engine, ids) = started(3, 0, config);

        // P0 passes -> P1; P1 ends turn -> P2; P2 ends turn -> P1 (P0 skipped)
        engine.pass().unwrap();
        engine.end_turn().unwrap();
        engine.end_turn().unwrap();

        assert_eq!(engine.state().active_player, Some(ids[1]));
        assert_eq!(engine.state().round, 1);
    }

    #[test]
    fn test_pass_mode_wraparound_does_not_close_round() {
        let config = SessionConfig::default().with_turn_mode(TurnMode::Pass);
        let (mut engine, ids) = started(2, 0, config);

        engine.end_turn().unwrap();
        engine.end_turn().unwrap();

        assert_eq!(engine.state().active_player, Some(ids[0]));
        assert_eq!(engine.state().round, 1);
    }

    #[test]
    fn test_pass_in_orbit_mode_only_marks_and_advances() {
        let (mut engine, ids) = started(3, 0, SessionConfig::default());

        // P0, P1 end turn; P2 passes and play lands on the start seat
        engine.end_turn().unwrap();
        engine.end_turn().unwrap();
        engine.pass().unwrap();

        assert_eq!(engine.state().active_player, Some(ids[0]));
        assert_eq!(engine.state().round, 1);
        assert!(engine.roster()[2].has_passed);
    }

    #[test]
    fn test_last_pass_rotates_start() {
        let config = SessionConfig::default().with_turn_mode(TurnMode::Pass);
        let (mut engine, ids) = started(3, 1, config);

        engine.pass().unwrap();
        engine.pass().unwrap();
        let events = engine.pass().unwrap();

        assert_eq!(engine.state().round, 2);
        assert_eq!(engine.state().start_player, Some(ids[2]));
        assert_eq!(engine.state().active_player, Some(ids[2]));
        assert!(engine.roster().iter().all(|p| !p.has_passed));
        assert_eq!(
            events.as_slice(),
            &[
                SessionEvent::PlayerPassed { player: ids[0] },
                SessionEvent::RoundStarted { round: 2 },
                SessionEvent::StartRotated { start_player: ids[2] },
            ]
        );
    }

    #[test]
    fn test_start_rotation_wraps() {
        let config = SessionConfig::default().with_turn_mode(TurnMode::Pass);
        let (mut engine, ids) = started(2, 1, config);

        engine.pass().unwrap();
        engine.pass().unwrap();

        assert_eq!(engine.state().start_player, Some(ids[0]));
    }

    #[test]
    fn test_all_pass_past_limit_finishes_without_rotation() {
        let config = SessionConfig::default()
            .with_turn_mode(TurnMode::Pass)
            .with_max_rounds(1);
        let (mut engine, ids) = started(2, 0, config);

        engine.pass().unwrap();
        let events = engine.pass().unwrap();

        assert_eq!(engine.state().status, GameStatus::Finished);
        assert!(engine.state().paused);
        assert_eq!(engine.state().round, 1);
        assert_eq!(engine.state().start_player, Some(ids[0]));
        assert!(engine.roster().iter().all(|p| p.has_passed));
        assert!(events.contains(&SessionEvent::GameFinished { round: 1 }));

        // Nothing moves once finished
        assert_eq!(engine.pass(), Err(ActionError::NotPlaying));
        assert_eq!(engine.end_turn(), Err(ActionError::NotPlaying));
    }

    #[test]
    fn test_orbit_past_limit_finishes() {
        let (mut engine, _) = started(2, 0, SessionConfig::default().with_max_rounds(1));

        engine.end_turn().unwrap();
        let events = engine.end_turn().unwrap();

        assert_eq!(engine.state().status, GameStatus::Finished);
        assert!(engine.state().paused);
        assert_eq!(engine.state().round, 2);
        assert!(events.contains(&SessionEvent::GameFinished { round: 2 }));
    }

    #[test]
    fn test_single_player_pass_closes_round() {
        let config = SessionConfig::default().with_turn_mode(TurnMode::Pass);
        let (mut engine, ids) = started(1, 0, config);

        engine.pass().unwrap();

        assert_eq!(engine.state().round, 2);
        assert_eq!(engine.state().active_player, Some(ids[0]));
        assert!(!engine.roster()[0].has_passed);
    }
}
