//! Goal resolution against a clause list

pub mod ordering;
pub mod resolver;

pub use ordering::CandidateOrdering;
pub use resolver::{evaluate_predicate, QueryOutcome, Resolver, Solutions};
