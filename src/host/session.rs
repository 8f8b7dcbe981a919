//! Host loop around a `TurnEngine`.

use std::time::Duration;

use tracing::debug;

use super::heartbeat::Heartbeat;
use crate::core::{ActionKind, Events, Randomizer, SessionRng, Snapshot};
use crate::engine::TurnEngine;
use crate::error::ConfigError;

/// Owns an engine and the two heartbeats that drive it.
///
/// - The clock heartbeat fires `tick` once per `tick_interval` while the
///   engine reports `clock_running`.
/// - The shuffle heartbeat fires `shuffle_step` once per `shuffle_interval`
///   while an initiative roll is in progress.
///
/// Heartbeats are started and stopped after every mutation that goes
/// through the host, so pausing, finishing or resetting stops the clock and
/// settling the roll starts it.
///
/// ```
/// use std::time::Duration;
/// use table_clock::core::{ActionKind, Roster, SessionConfig};
/// use table_clock::engine::TurnEngine;
/// use table_clock::host::SessionHost;
///
/// let engine = TurnEngine::with_roster(SessionConfig::default().with_seed(1), Roster::demo());
/// let mut host = SessionHost::new(engine).unwrap();
///
/// host.action(ActionKind::PickFirst);
/// host.advance(Duration::from_millis(1_600)); // initiative settles
/// host.advance(Duration::from_secs(3));
///
/// assert_eq!(host.snapshot().state.elapsed_seconds, 3);
/// ```
#[derive(Clone, Debug)]
pub struct SessionHost<R = SessionRng> {
    engine: TurnEngine<R>,
    clock: Heartbeat,
    shuffle: Heartbeat,
}

impl<R: Randomizer> SessionHost<R> {
    /// Wrap an engine. Fails if the configured periods are zero.
    pub fn new(engine: TurnEngine<R>) -> Result<Self, ConfigError> {
        engine.config().validate()?;

        let mut host = Self {
            clock: Heartbeat::new(engine.config().tick_interval),
            shuffle: Heartbeat::new(engine.config().shuffle_interval),
            engine,
        };
        host.sync();
        Ok(host)
    }

    /// The wrapped engine.
    #[must_use]
    pub fn engine(&self) -> &TurnEngine<R> {
        &self.engine
    }

    /// Unwrap the engine.
    #[must_use]
    pub fn into_engine(self) -> TurnEngine<R> {
        self.engine
    }

    /// Current session snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    /// Is the clock heartbeat running?
    #[must_use]
    pub fn clock_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Is the shuffle heartbeat running?
    #[must_use]
    pub fn shuffle_running(&self) -> bool {
        self.shuffle.is_running()
    }

    /// Dispatch an action.
    pub fn action(&mut self, kind: ActionKind) -> Events {
        let events = self.engine.action(kind);
        self.sync();
        events
    }

    /// Run any other engine mutation (roster edits, settings).
    pub fn apply<T>(&mut self, f: impl FnOnce(&mut TurnEngine<R>) -> T) -> T {
        let out = f(&mut self.engine);
        self.sync();
        out
    }

    /// Let time pass, firing heartbeats. Returns the initiative events.
    ///
    /// Time left over after a roll settles carries into the clock.
    pub fn advance(&mut self, elapsed: Duration) -> Events {
        let mut events = Events::new();
        let mut budget = elapsed;

        while self.shuffle.fire_once(&mut budget) {
            // Running implies shuffling, so the step is never rejected
            if let Ok(step) = self.engine.shuffle_step() {
                events.extend(step);
            }
            self.sync();
        }

        let beats = self.clock.advance(budget);
        let ticked = (0..beats).filter(|_| self.engine.tick()).count();
        if ticked > 0 {
            debug!(ticks = ticked, "clock advanced");
        }

        events
    }

    fn sync(&mut self) {
        self.clock.set_running(self.engine.clock_running());
        self.shuffle.set_running(self.engine.is_shuffling());
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

    fn host(config: SessionConfig) -> SessionHost<Seat> {
        let engine = TurnEngine::with_randomizer(config, Roster::demo(), Seat(0));
        SessionHost::new(engine).unwrap()
    }

    #[test]
    fn test_rejects_zero_tick_interval() {
        let engine = TurnEngine::new(SessionConfig::default().with_tick_interval(Duration::ZERO));
        assert_eq!(SessionHost::new(engine).err(), Some(ConfigError::ZeroTickInterval));
    }

    #[test]
    fn test_idle_host_does_nothing() {
        let mut host = host(SessionConfig::default());
        assert!(!host.clock_running());

        host.advance(Duration::from_secs(5));
        assert_eq!(host.snapshot().state.elapsed_seconds, 0);
    }

    #[test]
    fn test_shuffle_then_clock() {
        let mut host = host(SessionConfig::default());

        host.action(ActionKind::PickFirst);
        assert!(host.shuffle_running());
        assert!(!host.clock_running());

        // 16 hops at 100ms settle at 1.6s; 0.4s carries into the clock
        let events = host.advance(Duration::from_millis(1_500));
        assert_eq!(events.len(), 15);
        assert_eq!(host.snapshot().state.status, GameStatus::Setup);

        host.advance(Duration::from_millis(100));
        assert_eq!(host.snapshot().state.status, GameStatus::Playing);
        assert!(host.clock_running());
        assert!(!host.shuffle_running());

        host.advance(Duration::from_millis(2_000));
        let snap = host.snapshot();
        assert_eq!(snap.state.elapsed_seconds, 2);
        assert_eq!(snap.players[0].time_seconds, 2);
    }

    #[test]
    fn test_leftover_after_settle_reaches_clock() {
        let mut host = host(SessionConfig::default());
        host.action(ActionKind::PickFirst);

        host.advance(Duration::from_millis(2_600));

        assert_eq!(host.snapshot().state.elapsed_seconds, 1);
    }

    #[test]
    fn test_pause_stops_clock() {
        let mut host = host(SessionConfig::default().with_shuffle_steps(0));
        host.action(ActionKind::PickFirst);
        host.advance(Duration::from_secs(3));

        host.action(ActionKind::ToggleTimer);
        assert!(!host.clock_running());
        host.advance(Duration::from_secs(3));
        assert_eq!(host.snapshot().state.elapsed_seconds, 3);

        host.action(ActionKind::Resume);
        host.advance(Duration::from_secs(1));
        assert_eq!(host.snapshot().state.elapsed_seconds, 4);
    }

    #[test]
    fn test_turn_change_moves_accrual() {
        let mut host = host(SessionConfig::default().with_shuffle_steps(0));
        host.action(ActionKind::PickFirst);

        host.advance(Duration::from_secs(2));
        host.action(ActionKind::EndTurn);
        host.advance(Duration::from_secs(5));

        let snap = host.snapshot();
        assert_eq!(snap.players[0].time_seconds, 2);
        assert_eq!(snap.players[1].time_seconds, 5);
        assert_eq!(snap.state.elapsed_seconds, 7);
    }

    #[test]
    fn test_finish_and_reset_stop_clock() {
        let mut host = host(SessionConfig::default().with_shuffle_steps(0).with_max_rounds(1));
        host.action(ActionKind::PickFirst);

        host.action(ActionKind::EndTurn);
        host.action(ActionKind::EndTurn);
        assert_eq!(host.snapshot().state.status, GameStatus::Finished);
        assert!(!host.clock_running());

        host.action(ActionKind::Reset);
        assert!(!host.clock_running());
        assert_eq!(host.snapshot().state.status, GameStatus::Setup);
    }

    #[test]
    fn test_apply_resyncs() {
        let mut host = host(SessionConfig::default().with_shuffle_steps(0));
        host.action(ActionKind::PickFirst);
        assert!(host.clock_running());

        let ids: Vec<_> = host.snapshot().players.iter().map(|p| p.id).collect();
        for id in ids {
            host.apply(|engine| engine.remove_player(id)).unwrap();
        }

        assert!(!host.clock_running());
        assert_eq!(host.snapshot().state.status, GameStatus::Setup);
    }
}
