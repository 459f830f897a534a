//! Player, Position and PlayerStats data structures.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a player (opaque to the team engine).
pub type PlayerId = Uuid;

/// Lowest accepted skill rating.
pub const MIN_SKILL_LEVEL: u8 = 1;
/// Highest accepted skill rating.
pub const MAX_SKILL_LEVEL: u8 = 5;

/// Playing position. Closed set; the order here is the display order in team stats.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "DEF")]
    Defender,
    #[serde(rename = "MID")]
    Midfielder,
    #[serde(rename = "FWD")]
    Forward,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];

    /// Short code used in summaries and CSV files.
    pub fn code(self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a position code is not one of GK, DEF, MID, FWD.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownPosition(pub String);

impl fmt::Display for UnknownPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown position '{}' (expected GK, DEF, MID or FWD)", self.0)
    }
}

impl FromStr for Position {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Position::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnknownPosition(code.to_string()))
    }
}

/// Career counters shown on the roster. Carried through the engine untouched.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub matches: u32,
    pub goals: u32,
    pub wins: u32,
}

/// A rated player in the pool.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    /// 1 (casual) to 5 (strong). Bounds are enforced by the roster, not here.
    pub skill_level: u8,
    #[serde(default)]
    pub stats: PlayerStats,
}

impl Player {
    /// Create a new player with a fresh id and zeroed stats.
    pub fn new(name: impl Into<String>, position: Position, skill_level: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            position,
            skill_level,
            stats: PlayerStats::default(),
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        self.position == Position::Goalkeeper
    }
}

/// True when `skill_level` is inside the accepted rating range.
pub fn is_valid_skill_level(skill_level: u8) -> bool {
    (MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&skill_level)
}
