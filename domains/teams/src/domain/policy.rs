//! Roster size policy
//!
//! Registration caps depend on the category; administrative additions use
//! a separate, fixed cap.

use thiserror::Error;

use crate::domain::entities::Category;

/// Maximum roster for a MEN team at registration
pub const MEN_MAX_ROSTER: usize = 12;

/// Maximum roster for a WOMEN team at registration
pub const WOMEN_MAX_ROSTER: usize = 13;

/// Players an administrator may bring a team up to, one at a time
pub const ADMIN_ROSTER_CAP: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("a roster needs at least one player")]
    TooFew,

    #[error("a roster cannot exceed {max} players")]
    TooMany { max: usize },
}

impl From<RosterError> for torneo_common::Error {
    fn from(err: RosterError) -> Self {
        torneo_common::Error::RosterLimit(err.to_string())
    }
}

/// Registration cap for a category
pub fn max_roster_size(category: Category) -> usize {
    match category {
        Category::Men => MEN_MAX_ROSTER,
        Category::Women => WOMEN_MAX_ROSTER,
    }
}

/// Check a proposed registration roster against the category cap
pub fn validate_roster_size(category: Category, proposed: usize) -> Result<(), RosterError> {
    if proposed < 1 {
        return Err(RosterError::TooFew);
    }
    let max = max_roster_size(category);
    if proposed > max {
        return Err(RosterError::TooMany { max });
    }
    Ok(())
}

/// Check whether an administrator may add one more player to a team
/// currently holding `current` players
pub fn validate_admin_addition(current: usize) -> Result<(), RosterError> {
    if current >= ADMIN_ROSTER_CAP {
        return Err(RosterError::TooMany {
            max: ADMIN_ROSTER_CAP,
        });
    }
    Ok(())
}
