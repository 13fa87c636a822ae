//! API endpoint integration tests
//!
//! Drives the composed router over the in-memory store: public listing and
//! registration, admin roster management, and admin sessions.

#![allow(dead_code)]

mod admin;
mod common;
mod public;
mod session;
