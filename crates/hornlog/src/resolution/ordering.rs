//! Order in which unifying clauses are tried

use crate::logic::Clause;
use serde::{Deserialize, Serialize};

/// How the resolver orders the candidate clauses for one goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOrdering {
    /// Facts before rules, insertion order otherwise
    #[default]
    FactsFirst,
    /// Knowledge-base insertion order
    Insertion,
}

impl CandidateOrdering {
    /// Sort `candidates` in place. The sort is stable, so clauses of the same
    /// kind keep their insertion order.
    pub fn arrange<T>(self, candidates: &mut [T], clause_of: impl Fn(&T) -> &Clause) {
        match self {
            CandidateOrdering::FactsFirst => {
                candidates.sort_by_key(|candidate| clause_of(candidate).is_rule())
            }
            CandidateOrdering::Insertion => {}
        }
    }
}
