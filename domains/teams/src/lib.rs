//! Teams domain: roster policy, registration, roster cache, admin mutations

pub mod api;
pub mod domain;
pub mod repository;
pub mod workflow;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use domain::policy::{
    max_roster_size, validate_admin_addition, validate_roster_size, RosterError,
    ADMIN_ROSTER_CAP, MEN_MAX_ROSTER, WOMEN_MAX_ROSTER,
};
pub use domain::validation::ValidationError;

// Re-export repository types
pub use repository::{
    MockRosterStore, PgRosterStore, RosterStore, RosterStoreFactory, StoreConfig, StoreOp,
    StoreResult,
};

// Re-export workflow types
pub use workflow::{
    AdminError, AdminWorkflow, ExpandedTeams, RefreshTrigger, RegistrationError,
    RegistrationRequest, RegistrationWorkflow, RosterCache, RosterSummary, RosterView,
};

// Re-export API types
pub use api::routes;
pub use api::TeamsState;
