//! Shared configuration, error handling, and request extractors for Torneo
//!
//! This crate provides common functionality used across the Torneo services:
//! - Configuration management following 12-factor principles
//! - The application error type and its HTTP rendering
//! - Storage error taxonomy shared by every repository implementation
//! - Validating axum extractors

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;

pub use config::{Config, StoreProvider};
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{ValidatedJson, ValidatedQuery};
