//! Countdown match timer. All operations take the current time explicitly.

use crate::models::session::SessionError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default match length: 10 minutes.
pub const DEFAULT_MATCH_DURATION_SECS: u32 = 10 * 60;

/// Durations offered by the match screen (5, 7, 10 and 90 minutes).
pub const MATCH_DURATION_PRESETS: [u32; 4] = [5 * 60, 7 * 60, 10 * 60, 90 * 60];

/// A selectable match length for the duration picker.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DurationPreset {
    pub label: String,
    pub duration_secs: u32,
}

/// The preset list with display labels, e.g. "7 Minutes".
pub fn duration_presets() -> Vec<DurationPreset> {
    MATCH_DURATION_PRESETS
        .iter()
        .map(|&duration_secs| DurationPreset {
            label: format!("{} Minutes", duration_secs / 60),
            duration_secs,
        })
        .collect()
}

/// Phase of the countdown.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    /// Not started (or reset); shows the full duration.
    #[default]
    Ready,
    Running,
    Paused,
    /// Time ran out or the match was stopped.
    FullTime,
}

/// Countdown timer measured in whole seconds.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchTimer {
    pub duration_secs: u32,
    pub state: TimerState,
    /// Seconds played before the current running stretch.
    elapsed_before_secs: u32,
    /// Start of the current running stretch (only while Running).
    running_since: Option<DateTime<Utc>>,
}

impl Default for MatchTimer {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_DURATION_SECS)
    }
}

impl MatchTimer {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            state: TimerState::Ready,
            elapsed_before_secs: 0,
            running_since: None,
        }
    }

    /// Change the match length (only before kick-off).
    pub fn set_duration(&mut self, duration_secs: u32) -> Result<(), SessionError> {
        if duration_secs == 0 {
            return Err(SessionError::InvalidDuration);
        }
        if self.state != TimerState::Ready {
            return Err(SessionError::InvalidTimerState);
        }
        self.duration_secs = duration_secs;
        Ok(())
    }

    /// Kick off from Ready, or restart after full time. Elapsed time starts at zero.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if !matches!(self.state, TimerState::Ready | TimerState::FullTime) {
            return Err(SessionError::InvalidTimerState);
        }
        self.elapsed_before_secs = 0;
        self.running_since = Some(now);
        self.state = TimerState::Running;
        Ok(())
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if self.state != TimerState::Running {
            return Err(SessionError::InvalidTimerState);
        }
        self.elapsed_before_secs = self.elapsed_secs(now);
        self.running_since = None;
        self.state = TimerState::Paused;
        Ok(())
    }

    pub fn resume(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if self.state != TimerState::Paused {
            return Err(SessionError::InvalidTimerState);
        }
        self.running_since = Some(now);
        self.state = TimerState::Running;
        Ok(())
    }

    /// End the match early. The clock freezes where it was.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if !matches!(self.state, TimerState::Running | TimerState::Paused) {
            return Err(SessionError::InvalidTimerState);
        }
        self.elapsed_before_secs = self.elapsed_secs(now);
        self.running_since = None;
        self.state = TimerState::FullTime;
        Ok(())
    }

    /// Back to Ready with the full duration on the clock.
    pub fn reset(&mut self) {
        self.elapsed_before_secs = 0;
        self.running_since = None;
        self.state = TimerState::Ready;
    }

    /// Seconds played so far, capped at the duration.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        let running = self
            .running_since
            .map(|since| (now - since).num_seconds().max(0))
            .unwrap_or(0);
        let running = u32::try_from(running).unwrap_or(u32::MAX);
        self.elapsed_before_secs
            .saturating_add(running)
            .min(self.duration_secs)
    }

    pub fn time_left_secs(&self, now: DateTime<Utc>) -> u32 {
        self.duration_secs - self.elapsed_secs(now)
    }

    /// Has the match kicked off (running, paused or finished)?
    pub fn is_started(&self) -> bool {
        self.state != TimerState::Ready
    }

    pub fn is_full_time(&self) -> bool {
        self.state == TimerState::FullTime
    }

    /// Move a running timer whose time is up to FullTime. Returns true if that happened now.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> bool {
        if self.state != TimerState::Running || self.time_left_secs(now) > 0 {
            return false;
        }
        self.elapsed_before_secs = self.duration_secs;
        self.running_since = None;
        self.state = TimerState::FullTime;
        true
    }
}

/// Render seconds as a zero padded `MM:SS` clock.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
