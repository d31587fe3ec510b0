//! hornlog: an embedded logic-programming engine
//!
//! Facts and rules over first-order terms are collected in a
//! [`KnowledgeBase`]; goals are proved against them by SLD-resolution with
//! backtracking. Terms are built programmatically, there is no parser.
//!
//! The building blocks are usable on their own:
//! - [`logic`]: the term model, substitutions, unification and renaming
//! - [`resolution`]: the resolver and its candidate ordering
//! - [`json`]: serializable views of terms and answers

pub mod config;
pub mod json;
pub mod knowledge_base;
pub mod logic;
pub mod resolution;

// Re-export the term model
pub use logic::{
    Clause, CompoundTerm, Constant, Functor, Interner, List, PredicateTerm, Relation, Term,
    TermError, Variable, MAX_ARITY,
};

// Re-export unification types
pub use logic::{unify, MergeConflict, Substitution, UnificationError, UnificationResult, VariableRenaming};

pub use config::ResolverConfig;
pub use knowledge_base::{Answer, KnowledgeBase};
pub use resolution::{CandidateOrdering, QueryOutcome, Resolver, Solutions};
