//! Pickup match organizer: library with models and team formation logic.

pub mod logic;
pub mod models;

pub use logic::{
    add_goal, balance_teams, coin_toss, fisher_yates_shuffle, get_team_stats, import_roster_csv,
    name_and_color, partition, pause_match, refresh_match, remove_goal, reset_match, resume_match,
    save_teams_for_match, set_match_duration, shuffle_into_teams, shuffle_into_teams_with_rng,
    skill_diff, start_match, stop_match, team_balance, team_color, team_name,
    validate_team_formation, BalancedTeams, CoinSide, CoinToss, FormationError, Partition,
    TeamBalance, ValidationResult, ValidationWarning, BALANCED_SKILL_DIFF, MAX_BALANCE_ITERATIONS,
    MIN_SWAP_IMPROVEMENT, TEAM_COLORS, TEAM_NAMES,
};
pub use models::{
    duration_presets, format_clock, DurationPreset, FormationResult, GameMatch, Goal, MatchId,
    MatchOutcome, MatchTimer, Player, PlayerId, PlayerStats, Position, Session, SessionError,
    SessionId, Team, TeamScore, TeamStats, TimerState, DEFAULT_MATCH_DURATION_SECS,
    DEFAULT_TEAM_SIZE, MATCH_DURATION_PRESETS, SUPPORTED_TEAM_SIZES,
};
