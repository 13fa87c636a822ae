//! Validation helpers and constants for team and player fields

use thiserror::Error;

/// Minimum length of team and person-in-charge names
pub const NAME_MIN_CHARS: usize = 2;

/// Maximum length of team, person-in-charge, and player names
pub const NAME_MAX_CHARS: usize = 100;

/// Input rejected before any write reaches the store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be {min}-{max} characters")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
    },

    #[error("{0} must not be blank")]
    Blank(&'static str),

    #[error("at least one field must be provided")]
    EmptyUpdate,

    #[error("player count cannot be negative (got {0})")]
    NegativeCount(i32),
}

impl From<ValidationError> for torneo_common::Error {
    fn from(err: ValidationError) -> Self {
        torneo_common::Error::Validation(err.to_string())
    }
}

fn normalize_bounded(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    let chars = trimmed.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars) {
        return Err(ValidationError::Length {
            field,
            min: NAME_MIN_CHARS,
            max: NAME_MAX_CHARS,
        });
    }
    Ok(trimmed.to_string())
}

/// Trim and bound-check a team name
pub fn normalize_team_name(value: &str) -> Result<String, ValidationError> {
    normalize_bounded("team_name", value)
}

/// Trim and bound-check a person-in-charge name
pub fn normalize_person_name(value: &str) -> Result<String, ValidationError> {
    normalize_bounded("person_in_charge", value)
}

/// Trim a player name; blank names are rejected
pub fn normalize_player_name(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank("player_name"));
    }
    if trimmed.chars().count() > NAME_MAX_CHARS {
        return Err(ValidationError::Length {
            field: "player_name",
            min: 1,
            max: NAME_MAX_CHARS,
        });
    }
    Ok(trimmed.to_string())
}
