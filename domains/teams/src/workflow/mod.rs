//! Roster workflows: registration, the roster cache, and admin mutations

pub mod admin;
pub mod cache;
pub mod registration;
pub mod trigger;

pub use admin::{AdminError, AdminWorkflow};
pub use cache::{
    count_by_category, filter_by_category, group_players, toggle_expansion, ExpandedTeams,
    RosterCache, RosterSummary, RosterView,
};
pub use registration::{RegistrationError, RegistrationRequest, RegistrationWorkflow};
pub use trigger::RefreshTrigger;
