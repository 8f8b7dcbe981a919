//! The ordered player roster.
//!
//! Roster order is insertion order and defines circular turn adjacency.
//! Players are never reordered; removal closes the gap.
//!
//! Backed by `im::Vector` so `Snapshot`s share structure with the live
//! roster instead of deep-copying it.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId, PlayerPatch};
use crate::error::ActionError;

/// Colors handed out to new players, indexed by roster size.
pub const PALETTE: [&str; 8] = [
    "#6366f1", // Indigo
    "#f43f5e", // Rose
    "#10b981", // Emerald
    "#f59e0b", // Amber
    "#06b6d4", // Cyan
    "#d946ef", // Fuchsia
    "#8b5cf6", // Violet
    "#84cc16", // Lime
];

/// Ordered player roster with a never-reused ID allocator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vector<Player>,
    next_id: u64,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self {
            players: Vector::new(),
            next_id: 1,
        }
    }

    /// The two demo players used when no saved roster is available.
    #[must_use]
    pub fn demo() -> Self {
        Self::from_players(vec![
            Player::new(PlayerId::new(1), "Player 1", "#6366f1"),
            Player::new(PlayerId::new(2), "Player 2", "#ec4899"),
        ])
    }

    /// Build a roster from existing players, keeping their order and IDs.
    ///
    /// The allocator resumes above the highest existing ID.
    #[must_use]
    pub fn from_players(players: Vec<Player>) -> Self {
        let next_id = players.iter().map(|p| p.id.raw()).max().map_or(1, |max| max + 1);
        Self {
            players: players.into_iter().collect(),
            next_id,
        }
    }

    /// Restore a roster from its saved JSON form (an ordered list of players).
    ///
    /// Missing data yields the demo roster. Malformed data is logged and
    /// also yields the demo roster.
    #[must_use]
    pub fn restore(saved: Option<&str>) -> Self {
        let Some(json) = saved else {
            return Self::demo();
        };

        match serde_json::from_str::<Vec<Player>>(json) {
            Ok(players) => Self::from_players(players),
            Err(err) => {
                tracing::warn!(error = %err, "saved roster is malformed, using demo roster");
                Self::demo()
            }
        }
    }

    /// Serialize the players as an ordered JSON list.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.players)
    }

    /// Number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Is the roster empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// The players in turn order.
    #[must_use]
    pub fn players(&self) -> &Vector<Player> {
        &self.players
    }

    /// Iterate over players in turn order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Position of a player in turn order.
    #[must_use]
    pub fn position(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Look up a player.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    // === Mutations ===

    /// Add a player at the end of turn order.
    ///
    /// The name is trimmed; blank names are rejected. The color cycles
    /// through `PALETTE` by current roster size.
    pub fn add(&mut self, name: &str) -> Result<Player, ActionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ActionError::BlankName);
        }

        let id = PlayerId::new(self.next_id);
        self.next_id += 1;

        let color = PALETTE[self.players.len() % PALETTE.len()];
        let player = Player::new(id, name, color);
        self.players.push_back(player.clone());
        Ok(player)
    }

    /// Merge a patch into a player. Returns false if the player is absent
    /// or nothing changed.
    pub fn update(&mut self, id: PlayerId, patch: &PlayerPatch) -> bool {
        self.get_mut(id).is_some_and(|p| patch.apply(p))
    }

    /// Adjust a player's score, clamping at zero. Returns the new score.
    pub fn update_score(&mut self, id: PlayerId, delta: i64) -> Option<u32> {
        self.get_mut(id).map(|p| p.adjust_score(delta))
    }

    /// Remove a player, returning its former position and record.
    pub fn remove(&mut self, id: PlayerId) -> Option<(usize, Player)> {
        let index = self.position(id)?;
        Some((index, self.players.remove(index)))
    }

    /// Credit seconds to a player's turn time.
    pub fn add_time(&mut self, id: PlayerId, seconds: u64) {
        if let Some(player) = self.get_mut(id) {
            player.time_seconds += seconds;
        }
    }

    /// Mark the player at `index` as passed.
    pub fn mark_passed(&mut self, index: usize) {
        if let Some(player) = self.players.get_mut(index) {
            player.has_passed = true;
        }
    }

    /// Clear every pass flag.
    pub fn clear_passes(&mut self) {
        for player in self.players.iter_mut() {
            player.has_passed = false;
        }
    }

    /// Zero every player's time, score and pass flag.
    pub fn reset_stats(&mut self) {
        for player in self.players.iter_mut() {
            player.reset_stats();
        }
    }

    // === Turn Order ===

    /// Have all players passed? False for an empty roster.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(|p| p.has_passed)
    }

    /// First position at or after `start` (circular) whose player has not
    /// passed. If everyone has passed, returns `start` itself.
    ///
    /// Panics on an empty roster.
    #[must_use]
    pub fn scan_unpassed(&self, start: usize) -> usize {
        let len = self.players.len();
        let start = start % len;
        (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&i| !self.players[i].has_passed)
            .unwrap_or(start)
    }

    /// Next position after `index` (circular), skipping passed players.
    ///
    /// Panics on an empty roster.
    #[must_use]
    pub fn next_unpassed_after(&self, index: usize) -> usize {
        self.scan_unpassed(index + 1)
    }
}

impl std::ops::Index<usize> for Roster {
    type Output = Player;

    fn index(&self, index: usize) -> &Self::Output {
        &self.players[index]
    }
}
