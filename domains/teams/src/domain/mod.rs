//! Teams domain layer: entities, roster policy, validation

pub mod entities;
pub mod policy;
pub mod validation;
