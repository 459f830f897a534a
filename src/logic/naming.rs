//! Display identity for formed teams, by position in the team list.

use crate::models::{Player, Team};

/// Names for the first four teams; later teams are called `Team {n}`.
pub const TEAM_NAMES: [&str; 4] = ["Team Alpha", "Team Beta", "Team Gamma", "Team Delta"];

/// Cyclic palette: green, blue, orange, red.
pub const TEAM_COLORS: [&str; 4] = ["#28a745", "#007bff", "#fd7e14", "#dc3545"];

pub fn team_name(index: usize) -> String {
    TEAM_NAMES
        .get(index)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("Team {}", index + 1))
}

pub fn team_color(index: usize) -> &'static str {
    TEAM_COLORS[index % TEAM_COLORS.len()]
}

/// Wrap each player group in a `Team` named and colored by its index.
pub fn name_and_color(team_slices: Vec<Vec<Player>>) -> Vec<Team> {
    team_slices
        .into_iter()
        .enumerate()
        .map(|(index, players)| Team {
            name: team_name(index),
            color: team_color(index).to_string(),
            players,
        })
        .collect()
}
