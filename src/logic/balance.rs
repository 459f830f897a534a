//! Two-team skill balancing: greedy best-swap hill climb on average skill.
//!
//! Only single-player swaps are considered and only the skill average is
//! optimized. Position counts are reported but never balanced, so two teams
//! can end up even on skill and lopsided on positions. Each iteration rescans
//! all `len_a * len_b` pairs.

use crate::models::{Player, Position};
use std::collections::BTreeMap;

/// Hard cap on committed swaps.
pub const MAX_BALANCE_ITERATIONS: usize = 50;
/// Average-skill gap below which two teams count as balanced.
pub const BALANCED_SKILL_DIFF: f64 = 0.5;
/// A swap must shrink the gap by more than this to be committed.
pub const MIN_SWAP_IMPROVEMENT: f64 = 0.1;

/// Position counts and skill totals of one team.
#[derive(Clone, Debug, PartialEq)]
pub struct TeamBalance {
    /// Only positions present in the team, in GK, DEF, MID, FWD order.
    pub position_counts: BTreeMap<Position, usize>,
    pub average_skill: f64,
    pub total_skill: u32,
}

pub fn team_balance(team: &[Player]) -> TeamBalance {
    let mut position_counts = BTreeMap::new();
    let mut total_skill = 0u32;
    for player in team {
        *position_counts.entry(player.position).or_insert(0) += 1;
        total_skill += u32::from(player.skill_level);
    }
    TeamBalance {
        position_counts,
        average_skill: average(total_skill, team.len()),
        total_skill,
    }
}

/// The two teams after balancing, plus how many swaps were committed.
#[derive(Clone, Debug, PartialEq)]
pub struct BalancedTeams {
    pub team_a: Vec<Player>,
    pub team_b: Vec<Player>,
    pub swaps: usize,
}

/// Absolute difference between the two teams' average skills.
pub fn skill_diff(team_a: &[Player], team_b: &[Player]) -> f64 {
    (team_balance(team_a).average_skill - team_balance(team_b).average_skill).abs()
}

/// Swap players between `team_a` and `team_b` until the average-skill gap is
/// under [`BALANCED_SKILL_DIFF`], no swap improves it by more than
/// [`MIN_SWAP_IMPROVEMENT`], or [`MAX_BALANCE_ITERATIONS`] swaps were made.
///
/// Each iteration commits the single best swap (first found wins ties). The
/// gap never grows, and the result is deterministic for a given input order.
pub fn balance_teams(mut team_a: Vec<Player>, mut team_b: Vec<Player>) -> BalancedTeams {
    let mut swaps = 0;

    while swaps < MAX_BALANCE_ITERATIONS {
        let sum_a = total_skill(&team_a);
        let sum_b = total_skill(&team_b);
        let diff = (average(sum_a, team_a.len()) - average(sum_b, team_b.len())).abs();
        if diff < BALANCED_SKILL_DIFF {
            break;
        }

        let mut best: Option<(usize, usize)> = None;
        let mut best_improvement = 0.0;
        for (i, a) in team_a.iter().enumerate() {
            for (j, b) in team_b.iter().enumerate() {
                let (a, b) = (u32::from(a.skill_level), u32::from(b.skill_level));
                let new_a = average(sum_a - a + b, team_a.len());
                let new_b = average(sum_b - b + a, team_b.len());
                let improvement = diff - (new_a - new_b).abs();
                if improvement > best_improvement {
                    best_improvement = improvement;
                    best = Some((i, j));
                }
            }
        }

        match best {
            Some((i, j)) if best_improvement > MIN_SWAP_IMPROVEMENT => {
                std::mem::swap(&mut team_a[i], &mut team_b[j]);
                swaps += 1;
            }
            _ => break,
        }
    }

    BalancedTeams {
        team_a,
        team_b,
        swaps,
    }
}

fn total_skill(team: &[Player]) -> u32 {
    team.iter().map(|p| u32::from(p.skill_level)).sum()
}

fn average(total: u32, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        f64::from(total) / count as f64
    }
}
