//! Domain entities for the teams domain
//!
//! Teams and players are separate rows linked by `team_id`; a team never
//! holds its players physically; they are looked up by key and joined in
//! the roster cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validation::{normalize_person_name, normalize_team_name, ValidationError};

/// Competition category. Immutable once a team is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "team_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Men,
    Women,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Men => write!(f, "men"),
            Category::Women => write!(f, "women"),
        }
    }
}

/// Category selector for listings: every team, or a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Men,
    Women,
}

impl CategoryFilter {
    /// Check whether a team of `category` passes the filter
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Men => category == Category::Men,
            CategoryFilter::Women => category == Category::Women,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        match category {
            Category::Men => CategoryFilter::Men,
            Category::Women => CategoryFilter::Women,
        }
    }
}

/// Team entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    pub id: Uuid,
    pub team_name: String,
    pub person_in_charge: String,
    pub category: Category,
    /// Denormalized number of players referencing this team
    pub player_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Player entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
    pub id: Uuid,
    pub team_id: Uuid,
    pub player_name: String,
    pub created_at: DateTime<Utc>,
}

/// A team joined with its players, oldest player first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamWithPlayers {
    #[serde(flatten)]
    pub team: Team,
    pub players: Vec<Player>,
}

impl TeamWithPlayers {
    pub fn id(&self) -> Uuid {
        self.team.id
    }

    pub fn category(&self) -> Category {
        self.team.category
    }
}

/// Fields for a team insert; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    pub team_name: String,
    pub person_in_charge: String,
    pub category: Category,
    pub player_count: i32,
}

impl NewTeam {
    /// Build a validated insert. Names are trimmed and must be 2-100 characters.
    pub fn new(
        team_name: &str,
        person_in_charge: &str,
        category: Category,
        player_count: i32,
    ) -> Result<Self, ValidationError> {
        if player_count < 0 {
            return Err(ValidationError::NegativeCount(player_count));
        }

        Ok(Self {
            team_name: normalize_team_name(team_name)?,
            person_in_charge: normalize_person_name(person_in_charge)?,
            category,
            player_count,
        })
    }
}

/// Partial team update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamPatch {
    pub team_name: Option<String>,
    pub person_in_charge: Option<String>,
    pub player_count: Option<i32>,
}

impl TeamPatch {
    /// Patch that only resets the denormalized player counter
    pub fn player_count(count: i32) -> Self {
        Self {
            player_count: Some(count),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.team_name.is_none() && self.person_in_charge.is_none() && self.player_count.is_none()
    }
}
