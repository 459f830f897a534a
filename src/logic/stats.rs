//! Per-team summary for display.

use crate::logic::balance::team_balance;
use crate::models::{Player, TeamStats};

/// Average skill (one decimal), total skill, position summary and head count.
pub fn get_team_stats(team: &[Player]) -> TeamStats {
    let balance = team_balance(team);
    let positions = balance
        .position_counts
        .iter()
        .map(|(position, count)| format!("{} {}", count, position))
        .collect::<Vec<_>>()
        .join(", ");
    TeamStats {
        average_skill: format_average(balance.total_skill, team.len()),
        total_skill: balance.total_skill,
        positions,
        player_count: team.len(),
    }
}

/// `total / count` to one decimal, ties rounded up (2.25 -> "2.3").
fn format_average(total: u32, count: usize) -> String {
    if count == 0 {
        return "0.0".to_string();
    }
    let (total, count) = (u64::from(total), count as u64);
    let tenths = (total * 20 + count) / (2 * count);
    format!("{}.{}", tenths / 10, tenths % 10)
}
