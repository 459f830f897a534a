//! Session: the roster, chosen format, last shuffle and saved match.

use crate::logic::FormationError;
use crate::models::game::GameMatch;
use crate::models::player::{is_valid_skill_level, Player, PlayerId, Position};
use crate::models::team::FormationResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Formats offered on the roster screen (4v4, 5v5, 7v7, 11v11).
pub const SUPPORTED_TEAM_SIZES: [usize; 4] = [4, 5, 7, 11];

/// Team size used until the organizer picks another.
pub const DEFAULT_TEAM_SIZE: usize = 5;

/// Errors that can occur during roster and match operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionError {
    /// Player name is empty after trimming.
    EmptyName,
    /// Skill rating outside 1..=5.
    InvalidSkillLevel(u8),
    /// Team size is not one of the supported formats.
    UnsupportedTeamSize(usize),
    /// Player not found in the roster.
    PlayerNotFound(PlayerId),
    /// No teams have been shuffled yet (or fewer than two).
    NoTeams,
    /// No match has been saved.
    NoMatch,
    /// Team index out of range for the saved match.
    TeamNotFound(usize),
    /// Timer is not in a state that allows this action.
    InvalidTimerState,
    /// Match duration must be positive.
    InvalidDuration,
    /// Roster CSV could not be read.
    Import { row: usize, reason: String },
    /// Team formation failed.
    Formation(FormationError),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::EmptyName => write!(f, "Please enter a player name"),
            SessionError::InvalidSkillLevel(level) => {
                write!(f, "Skill level must be between 1 and 5 (got {})", level)
            }
            SessionError::UnsupportedTeamSize(size) => {
                write!(f, "Unsupported team size {} (choose 4, 5, 7 or 11)", size)
            }
            SessionError::PlayerNotFound(_) => write!(f, "Player not found"),
            SessionError::NoTeams => write!(f, "Please shuffle teams first"),
            SessionError::NoMatch => write!(f, "Please create teams for a match first"),
            SessionError::TeamNotFound(index) => write!(f, "No team at index {}", index),
            SessionError::InvalidTimerState => write!(f, "Invalid timer state for this action"),
            SessionError::InvalidDuration => write!(f, "Match duration must be at least one second"),
            SessionError::Import { row, reason } => {
                write!(f, "Roster import failed at row {}: {}", row, reason)
            }
            SessionError::Formation(e) => write!(f, "{}", e),
        }
    }
}

impl From<FormationError> for SessionError {
    fn from(e: FormationError) -> Self {
        SessionError::Formation(e)
    }
}

/// Unique identifier for a session.
pub type SessionId = Uuid;

/// One organizer's state: who is playing, in what format, and the current match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub players: Vec<Player>,
    pub team_size: usize,
    /// Last shuffle result, cleared whenever the roster or format changes.
    pub formation: Option<FormationResult>,
    /// Index into `formation.teams` of the coin toss winner.
    pub starting_team: Option<usize>,
    pub current_match: Option<GameMatch>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an empty session with the default 5v5 format.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            players: Vec::new(),
            team_size: DEFAULT_TEAM_SIZE,
            formation: None,
            starting_team: None,
            current_match: None,
        }
    }

    /// Create a session with an initial roster.
    pub fn with_players(players: Vec<Player>, team_size: usize) -> Result<Self, SessionError> {
        let mut session = Self::new();
        session.set_team_size(team_size)?;
        session.players = players;
        Ok(session)
    }

    /// Validate and append a player. Returns the new player's id.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        position: Position,
        skill_level: u8,
    ) -> Result<PlayerId, SessionError> {
        let player = new_roster_player(name, position, skill_level)?;
        let id = player.id;
        self.players.push(player);
        self.clear_formation();
        Ok(id)
    }

    /// Append already validated players (e.g. from a CSV import).
    pub fn extend_players(&mut self, players: Vec<Player>) {
        if players.is_empty() {
            return;
        }
        self.players.extend(players);
        self.clear_formation();
    }

    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), SessionError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(SessionError::PlayerNotFound(player_id))?;
        self.players.remove(idx);
        self.clear_formation();
        Ok(())
    }

    pub fn set_team_size(&mut self, team_size: usize) -> Result<(), SessionError> {
        if !SUPPORTED_TEAM_SIZES.contains(&team_size) {
            return Err(SessionError::UnsupportedTeamSize(team_size));
        }
        if self.team_size != team_size {
            self.team_size = team_size;
            self.clear_formation();
        }
        Ok(())
    }

    /// Forget the last shuffle and coin toss. The saved match is left alone.
    pub fn clear_formation(&mut self) {
        self.formation = None;
        self.starting_team = None;
    }

    pub fn current_match_mut(&mut self) -> Result<&mut GameMatch, SessionError> {
        self.current_match.as_mut().ok_or(SessionError::NoMatch)
    }
}

/// Build a roster player after checking name and skill rating.
pub fn new_roster_player(
    name: impl Into<String>,
    position: Position,
    skill_level: u8,
) -> Result<Player, SessionError> {
    let name = name.into();
    let name = name.trim();
    if name.is_empty() {
        return Err(SessionError::EmptyName);
    }
    if !is_valid_skill_level(skill_level) {
        return Err(SessionError::InvalidSkillLevel(skill_level));
    }
    Ok(Player::new(name, position, skill_level))
}
