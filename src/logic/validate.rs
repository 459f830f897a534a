//! Feasibility check before a shuffle: enough players for two full teams?

use crate::models::Player;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

/// Team size from which a keeper per side is expected.
pub const GOALKEEPER_WARNING_TEAM_SIZE: usize = 5;

/// Non-blocking advice attached to a valid formation.
///
/// Serialized as `{"kind": ..., <fields>, "message": <display text>}`.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationWarning {
    /// Fewer than two goalkeepers in the pool for a 5-a-side or larger format.
    FewGoalkeepers { goalkeepers: usize },
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationWarning::FewGoalkeepers { .. } => {
                write!(f, "Consider adding more goalkeepers for better team balance.")
            }
        }
    }
}

impl Serialize for ValidationWarning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ValidationWarning::FewGoalkeepers { goalkeepers } => {
                let mut state = serializer.serialize_struct("ValidationWarning", 3)?;
                state.serialize_field("kind", "few_goalkeepers")?;
                state.serialize_field("goalkeepers", goalkeepers)?;
                state.serialize_field("message", &self.to_string())?;
                state.end()
            }
        }
    }
}

/// Outcome of `validate_team_formation`. Counts are only present when valid.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_teams: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitute_count: Option<usize>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    fn invalid(message: String, suggestion: Option<String>) -> Self {
        Self {
            valid: false,
            message,
            suggestion,
            max_teams: None,
            substitute_count: None,
            warnings: Vec::new(),
        }
    }
}

/// Check whether `players` can fill at least two teams of `team_size`.
///
/// Warnings (goalkeeper scarcity) never affect `valid`.
pub fn validate_team_formation(players: &[Player], team_size: usize) -> ValidationResult {
    if team_size == 0 {
        return ValidationResult::invalid("Team size must be at least 1.".to_string(), None);
    }

    let total = players.len();
    let required = team_size * 2;
    if total < required {
        return ValidationResult::invalid(
            format!(
                "Need at least {} players for {}v{}. You have {}.",
                required, team_size, team_size, total
            ),
            Some(format!("Add {} more players.", required - total)),
        );
    }

    let mut warnings = Vec::new();
    let goalkeepers = players.iter().filter(|p| p.is_goalkeeper()).count();
    if goalkeepers < 2 && team_size >= GOALKEEPER_WARNING_TEAM_SIZE {
        warnings.push(ValidationWarning::FewGoalkeepers { goalkeepers });
    }

    let max_teams = total / team_size;
    let substitutes = total % team_size;
    ValidationResult {
        valid: true,
        message: format!(
            "Can form {} teams with {} substitutes.",
            max_teams, substitutes
        ),
        suggestion: None,
        max_teams: Some(max_teams),
        substitute_count: Some(substitutes),
        warnings,
    }
}
