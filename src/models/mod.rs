//! Data structures for the match organizer: players, teams, session, saved match.

mod game;
mod player;
mod session;
mod team;
mod timer;

pub use game::{GameMatch, Goal, MatchId, MatchOutcome, TeamScore, UNKNOWN_SCORER};
pub use player::{
    is_valid_skill_level, Player, PlayerId, PlayerStats, Position, UnknownPosition,
    MAX_SKILL_LEVEL, MIN_SKILL_LEVEL,
};
pub use session::{
    new_roster_player, Session, SessionError, SessionId, DEFAULT_TEAM_SIZE, SUPPORTED_TEAM_SIZES,
};
pub use team::{FormationResult, Team, TeamStats};
pub use timer::{
    duration_presets, format_clock, DurationPreset, MatchTimer, TimerState,
    DEFAULT_MATCH_DURATION_SECS, MATCH_DURATION_PRESETS,
};
