//! Core data structures: terms and clauses

pub mod clause;
pub mod term;
