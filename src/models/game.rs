//! Saved match: teams snapshot, countdown timer and live score.

use crate::models::player::Player;
use crate::models::session::SessionError;
use crate::models::team::Team;
use crate::models::timer::{format_clock, MatchTimer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a saved match.
pub type MatchId = Uuid;

/// Scorer name recorded when none is given.
pub const UNKNOWN_SCORER: &str = "Unknown";

/// One goal: who scored and at what match clock (`MM:SS`).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub player: String,
    pub time: String,
}

/// Running score of one team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamScore {
    pub team_name: String,
    pub goals: u32,
    pub scorers: Vec<Goal>,
}

impl TeamScore {
    pub fn new(team_name: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            goals: 0,
            scorers: Vec::new(),
        }
    }
}

/// Result at full time (or at any point, for display).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MatchOutcome {
    Win {
        team: String,
        goals_for: u32,
        goals_against: u32,
    },
    Draw {
        goals: u32,
    },
}

/// Teams saved for play, with timer and scores. Scores are kept in team order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub teams: Vec<Team>,
    pub substitutes: Vec<Player>,
    pub team_size: usize,
    /// Index into `teams` of the side that kicks off (coin toss winner).
    pub starting_team: Option<usize>,
    pub created_at: DateTime<Utc>,
    pub timer: MatchTimer,
    pub scores: Vec<TeamScore>,
}

impl GameMatch {
    pub fn new(
        teams: Vec<Team>,
        substitutes: Vec<Player>,
        team_size: usize,
        starting_team: Option<usize>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let scores = teams.iter().map(|t| TeamScore::new(t.name.clone())).collect();
        Self {
            id: Uuid::new_v4(),
            teams,
            substitutes,
            team_size,
            starting_team,
            created_at,
            timer: MatchTimer::default(),
            scores,
        }
    }

    fn score_mut(&mut self, team_index: usize) -> Result<&mut TeamScore, SessionError> {
        self.scores
            .get_mut(team_index)
            .ok_or(SessionError::TeamNotFound(team_index))
    }

    /// Record a goal for a team. Only allowed between kick-off and full time.
    pub fn add_goal(
        &mut self,
        team_index: usize,
        scorer: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        if !self.timer.is_started() || self.timer.is_full_time() {
            return Err(SessionError::InvalidTimerState);
        }
        let time = format_clock(self.timer.elapsed_secs(now));
        let player = scorer
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SCORER)
            .to_string();
        let score = self.score_mut(team_index)?;
        score.goals += 1;
        score.scorers.push(Goal { player, time });
        Ok(())
    }

    /// Take back the team's most recent goal. No-op when the team has none.
    pub fn remove_goal(&mut self, team_index: usize) -> Result<(), SessionError> {
        let score = self.score_mut(team_index)?;
        if score.goals > 0 {
            score.goals -= 1;
            score.scorers.pop();
        }
        Ok(())
    }

    /// Reset the timer and zero every score.
    pub fn reset(&mut self) {
        self.timer.reset();
        for score in &mut self.scores {
            score.goals = 0;
            score.scorers.clear();
        }
    }

    /// Leader versus runner-up. None with fewer than two teams.
    pub fn outcome(&self) -> Option<MatchOutcome> {
        let mut ranked: Vec<&TeamScore> = self.scores.iter().collect();
        ranked.sort_by(|a, b| b.goals.cmp(&a.goals));
        let (first, second) = match ranked.as_slice() {
            [first, second, ..] => (*first, *second),
            _ => return None,
        };
        Some(if first.goals > second.goals {
            MatchOutcome::Win {
                team: first.team_name.clone(),
                goals_for: first.goals,
                goals_against: second.goals,
            }
        } else {
            MatchOutcome::Draw { goals: first.goals }
        })
    }
}
