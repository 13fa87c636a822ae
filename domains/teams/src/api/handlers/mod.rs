//! HTTP handlers for the Teams domain

pub mod admin;
pub mod session;
pub mod teams;
