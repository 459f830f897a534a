//! Team formation engine and match-day operations.

mod balance;
mod formation;
mod match_play;
mod naming;
mod partition;
mod roster;
mod shuffle;
mod stats;
mod validate;

pub use balance::{
    balance_teams, skill_diff, team_balance, BalancedTeams, TeamBalance, BALANCED_SKILL_DIFF,
    MAX_BALANCE_ITERATIONS, MIN_SWAP_IMPROVEMENT,
};
pub use formation::{shuffle_into_teams, shuffle_into_teams_with_rng, FormationError};
pub use match_play::{
    add_goal, coin_toss, pause_match, refresh_match, remove_goal, reset_match, resume_match,
    save_teams_for_match, set_match_duration, start_match, stop_match, CoinSide, CoinToss,
};
pub use naming::{name_and_color, team_color, team_name, TEAM_COLORS, TEAM_NAMES};
pub use partition::{partition, Partition};
pub use roster::import_roster_csv;
pub use shuffle::fisher_yates_shuffle;
pub use stats::get_team_stats;
pub use validate::{
    validate_team_formation, ValidationResult, ValidationWarning, GOALKEEPER_WARNING_TEAM_SIZE,
};
