//! Formed teams and the result of a shuffle.

use crate::models::player::Player;
use serde::{Deserialize, Serialize};

/// A named, colored team produced by a shuffle. Recomputed on every shuffle.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    /// Hex color code, e.g. `#28a745`.
    pub color: String,
    pub players: Vec<Player>,
}

/// Output of `shuffle_into_teams`: full teams plus leftover substitutes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FormationResult {
    pub teams: Vec<Team>,
    /// Players left over because the pool is not a multiple of the team size.
    pub substitutes: Vec<Player>,
    pub total_teams: usize,
}

impl FormationResult {
    /// Every player handed out, teams first (in team order) then substitutes.
    pub fn all_players(&self) -> impl Iterator<Item = &Player> {
        self.teams
            .iter()
            .flat_map(|t| t.players.iter())
            .chain(self.substitutes.iter())
    }
}

/// Display summary of a team (see `get_team_stats`).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    /// Average skill formatted to one decimal, e.g. `"4.0"`.
    pub average_skill: String,
    pub total_skill: u32,
    /// Human readable position summary, e.g. `"1 GK, 2 DEF, 1 FWD"`.
    pub positions: String,
    pub player_count: usize,
}
