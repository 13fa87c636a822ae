//! Authentication for the Torneo admin panel
//!
//! Provides Supabase (GoTrue) password sign-in and sign-out, JWT validation,
//! admin-role lookup, and axum extractors that work with any domain state
//! implementing `FromRef<S>` for `AuthBackend`.

mod backend;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod jwt;
mod session;
mod types;

pub use backend::AuthBackend;
pub use claims::SupabaseClaims;
pub use config::AuthConfig;
pub use context::AuthContext;
pub use error::AuthError;
pub use extractors::{AdminUser, AuthUser, BearerToken};
pub use session::SessionClient;
pub use types::{AuthIdentity, AuthRole, Session, SessionUser};
