//! Teams domain state and auth backend integration

use std::sync::Arc;

use axum::extract::FromRef;
use tokio::sync::Mutex;
use torneo_auth::AuthBackend;

use crate::repository::RosterStore;
use crate::workflow::{AdminWorkflow, RefreshTrigger, RegistrationWorkflow, RosterView};

/// Application state for the Teams domain
#[derive(Clone)]
pub struct TeamsState {
    pub registration: RegistrationWorkflow,
    /// Public listing, re-pulled when the refresh trigger fires
    pub view: Arc<Mutex<RosterView>>,
    /// Admin operations run one at a time
    pub admin: Arc<Mutex<AdminWorkflow>>,
    pub auth: AuthBackend,
}

impl TeamsState {
    /// Wire the workflows around one store and one refresh trigger
    pub fn new(store: Arc<dyn RosterStore>, auth: AuthBackend) -> Self {
        let trigger = RefreshTrigger::new();

        Self {
            registration: RegistrationWorkflow::new(store.clone(), trigger.clone()),
            view: Arc::new(Mutex::new(RosterView::new(
                store.clone(),
                trigger.subscribe(),
            ))),
            admin: Arc::new(Mutex::new(AdminWorkflow::new(store, trigger))),
            auth,
        }
    }
}

impl FromRef<TeamsState> for AuthBackend {
    fn from_ref(state: &TeamsState) -> Self {
        state.auth.clone()
    }
}
