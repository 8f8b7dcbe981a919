//! Player identification and per-player session data.
//!
//! ## PlayerId
//!
//! Stable identifier assigned by the roster when a player is added.
//! Identifiers are never reused, even after the player is removed.
//!
//! ## PlayerPatch
//!
//! Typed partial update for the user-editable display fields.

use serde::{Deserialize, Serialize};

/// Stable player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A player on the roster.
///
/// Field names serialize in camelCase so saved rosters keep the same
/// shape the browser companion app writes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Stable identifier.
    pub id: PlayerId,

    /// Display name, never blank.
    pub name: String,

    /// Display color (hex string). The engine never reads it.
    pub color: String,

    /// Seconds this player has spent as the active player.
    pub time_seconds: u64,

    /// Score, never negative.
    pub score: u32,

    /// Has this player passed in the current round?
    pub has_passed: bool,
}

impl Player {
    /// Create a player with zeroed session stats.
    pub fn new(id: PlayerId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            time_seconds: 0,
            score: 0,
            has_passed: false,
        }
    }

    /// Apply a signed score delta, clamping at zero.
    pub fn adjust_score(&mut self, delta: i64) -> u32 {
        let next = i64::from(self.score).saturating_add(delta).max(0);
        self.score = u32::try_from(next).unwrap_or(u32::MAX);
        self.score
    }

    /// Zero the per-session stats: time, score and pass flag.
    pub fn reset_stats(&mut self) {
        self.time_seconds = 0;
        self.score = 0;
        self.has_passed = false;
    }
}

/// Partial update for a player's display fields.
///
/// ```
/// use table_clock::core::PlayerPatch;
///
/// let patch = PlayerPatch::default().with_name("Ada").with_color("#10b981");
/// assert_eq!(patch.name.as_deref(), Some("Ada"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPatch {
    /// New display name. Blank names are ignored.
    pub name: Option<String>,

    /// New display color.
    pub color: Option<String>,
}

impl PlayerPatch {
    /// Set the name to apply.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the color to apply.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Apply each present field. Returns true if anything changed.
    pub fn apply(&self, player: &mut Player) -> bool {
        let mut changed = false;

        if let Some(name) = self.name.as_deref().map(str::trim) {
            if !name.is_empty() && name != player.name {
                player.name = name.to_string();
                changed = true;
            }
        }

        if let Some(color) = &self.color {
            if *color != player.color {
                player.color.clone_from(color);
                changed = true;
            }
        }

        changed
    }
}
