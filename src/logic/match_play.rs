//! Match day: coin toss, saving teams for a match, timer control and scoring.

use crate::models::{GameMatch, MatchId, Session, SessionError};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoinSide {
    Heads,
    Tails,
}

/// Result of a coin toss: heads gives the kick-off to the first team, tails to the second.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CoinToss {
    pub side: CoinSide,
    pub starting_team: usize,
    pub team_name: String,
}

/// Toss a coin between the first two shuffled teams and remember the winner.
pub fn coin_toss<R: Rng + ?Sized>(
    session: &mut Session,
    rng: &mut R,
) -> Result<CoinToss, SessionError> {
    let teams = match &session.formation {
        Some(f) if f.teams.len() >= 2 => &f.teams,
        _ => return Err(SessionError::NoTeams),
    };
    let side = if rng.gen_bool(0.5) {
        CoinSide::Heads
    } else {
        CoinSide::Tails
    };
    let starting_team = match side {
        CoinSide::Heads => 0,
        CoinSide::Tails => 1,
    };
    let toss = CoinToss {
        side,
        starting_team,
        team_name: teams[starting_team].name.clone(),
    };
    session.starting_team = Some(starting_team);
    Ok(toss)
}

/// Snapshot the last shuffle (and coin toss) into a fresh match with zeroed scores.
/// Replaces any match already saved.
pub fn save_teams_for_match(
    session: &mut Session,
    now: DateTime<Utc>,
) -> Result<MatchId, SessionError> {
    let formation = session.formation.as_ref().ok_or(SessionError::NoTeams)?;
    if formation.teams.is_empty() {
        return Err(SessionError::NoTeams);
    }
    let game = GameMatch::new(
        formation.teams.clone(),
        formation.substitutes.clone(),
        session.team_size,
        session.starting_team,
        now,
    );
    let id = game.id;
    session.current_match = Some(game);
    Ok(id)
}

pub fn set_match_duration(session: &mut Session, duration_secs: u32) -> Result<(), SessionError> {
    session.current_match_mut()?.timer.set_duration(duration_secs)
}

/// Kick off (or restart after full time). Restarting clears the previous scores.
pub fn start_match(session: &mut Session, now: DateTime<Utc>) -> Result<(), SessionError> {
    let game = session.current_match_mut()?;
    if game.timer.is_full_time() {
        game.reset();
    }
    game.timer.start(now)
}

pub fn pause_match(session: &mut Session, now: DateTime<Utc>) -> Result<(), SessionError> {
    session.current_match_mut()?.timer.pause(now)
}

pub fn resume_match(session: &mut Session, now: DateTime<Utc>) -> Result<(), SessionError> {
    session.current_match_mut()?.timer.resume(now)
}

/// End the match before the clock runs out.
pub fn stop_match(session: &mut Session, now: DateTime<Utc>) -> Result<(), SessionError> {
    session.current_match_mut()?.timer.stop(now)
}

/// Timer back to the full duration and all scores zeroed.
pub fn reset_match(session: &mut Session) -> Result<(), SessionError> {
    session.current_match_mut()?.reset();
    Ok(())
}

/// Bring the timer up to `now`. Returns true when the match just reached full time.
pub fn refresh_match(session: &mut Session, now: DateTime<Utc>) -> Result<bool, SessionError> {
    Ok(session.current_match_mut()?.timer.refresh(now))
}

/// Record a goal at the current match clock. Time running out first ends the match.
pub fn add_goal(
    session: &mut Session,
    team_index: usize,
    scorer: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(), SessionError> {
    let game = session.current_match_mut()?;
    game.timer.refresh(now);
    game.add_goal(team_index, scorer, now)
}

pub fn remove_goal(session: &mut Session, team_index: usize) -> Result<(), SessionError> {
    session.current_match_mut()?.remove_goal(team_index)
}
