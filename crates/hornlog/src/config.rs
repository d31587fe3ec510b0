//! Resolver configuration types.

use crate::resolution::CandidateOrdering;
use serde::{Deserialize, Serialize};

/// Configuration for the resolution loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Upper bound on goal selections per query. `None` means no limit, so
    /// recursive programs without a reachable base case run forever.
    pub max_steps: Option<usize>,
    pub ordering: CandidateOrdering,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            max_steps: None,
            ordering: CandidateOrdering::FactsFirst,
        }
    }
}

impl ResolverConfig {
    /// Default configuration with a step limit
    pub fn with_max_steps(max_steps: usize) -> Self {
        ResolverConfig {
            max_steps: Some(max_steps),
            ..Self::default()
        }
    }
}
