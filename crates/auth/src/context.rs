//! Authorization context for authenticated users

use crate::types::{AuthIdentity, AuthRole};

/// Represents an authenticated caller and the application roles they hold
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: AuthIdentity,
    pub roles: Vec<AuthRole>,
}

impl AuthContext {
    /// Create new auth context for a user
    pub fn new(user: AuthIdentity, roles: Vec<AuthRole>) -> Self {
        Self { user, roles }
    }

    /// Check if the caller holds a specific role row
    pub fn has_role(&self, role: AuthRole) -> bool {
        self.roles.contains(&role)
    }

    /// Check if the caller may use the admin panel
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(AuthRole::can_admin)
    }
}
