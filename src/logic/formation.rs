//! Team formation pipeline: guard, shuffle, partition, balance, name.

use crate::logic::balance::balance_teams;
use crate::logic::naming::name_and_color;
use crate::logic::partition::partition;
use crate::logic::shuffle::fisher_yates_shuffle;
use crate::models::{FormationResult, Player};
use rand::Rng;

/// Why a pool could not be split into teams.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FormationError {
    /// Fewer than two full teams' worth of players.
    InsufficientPlayers { team_size: usize, available: usize },
    /// Team size of zero.
    InvalidTeamSize,
}

impl FormationError {
    /// How many more players are needed (0 for non-shortfall errors).
    pub fn shortfall(&self) -> usize {
        match self {
            FormationError::InsufficientPlayers {
                team_size,
                available,
            } => (team_size * 2).saturating_sub(*available),
            FormationError::InvalidTeamSize => 0,
        }
    }
}

impl std::fmt::Display for FormationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormationError::InsufficientPlayers { team_size, .. } => write!(
                f,
                "Need at least {} players for {}v{} match ({} more needed)",
                team_size * 2,
                team_size,
                team_size,
                self.shortfall()
            ),
            FormationError::InvalidTeamSize => write!(f, "Team size must be at least 1"),
        }
    }
}

/// Shuffle `players` into named teams of `team_size` using the thread-local RNG.
pub fn shuffle_into_teams(
    players: &[Player],
    team_size: usize,
) -> Result<FormationResult, FormationError> {
    shuffle_into_teams_with_rng(players, team_size, &mut rand::thread_rng())
}

/// Shuffle `players` into named teams of `team_size`, drawing from `rng`.
///
/// 1. Fail if there are fewer than `2 * team_size` players.
/// 2. Fisher-Yates shuffle a copy of the pool.
/// 3. Cut it into `len / team_size` teams; the remainder are substitutes.
/// 4. With exactly two teams, balance average skill by swapping players.
/// 5. Name and color teams by index.
pub fn shuffle_into_teams_with_rng<R: Rng + ?Sized>(
    players: &[Player],
    team_size: usize,
    rng: &mut R,
) -> Result<FormationResult, FormationError> {
    if team_size == 0 {
        return Err(FormationError::InvalidTeamSize);
    }
    if players.len() < team_size * 2 {
        return Err(FormationError::InsufficientPlayers {
            team_size,
            available: players.len(),
        });
    }

    let shuffled = fisher_yates_shuffle(players, rng);
    let mut split = partition(shuffled, team_size);

    if let [team_a, team_b] = split.team_slices.as_mut_slice() {
        let balanced = balance_teams(std::mem::take(team_a), std::mem::take(team_b));
        *team_a = balanced.team_a;
        *team_b = balanced.team_b;
    }

    let teams = name_and_color(split.team_slices);
    Ok(FormationResult {
        total_teams: teams.len(),
        teams,
        substitutes: split.substitutes,
    })
}
