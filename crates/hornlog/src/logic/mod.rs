//! Logic terms, clauses and the unification machinery
//!
//! This module provides the fundamental types for representing Horn clause
//! programs: terms, clauses, substitutions, unification and renaming.

pub mod core;
pub mod interner;
pub mod unification;

// Re-export commonly used types
pub use core::clause::{Clause, ClauseDisplay};
pub use core::term::{
    CompoundTerm, Cons, Constant, Functor, List, PredicateTerm, Relation, Term, TermDisplay,
    TermError, Variable, MAX_ARITY,
};
pub use interner::{ConstantId, FunctorId, Interner, VariableId};
pub use unification::{
    unify, MergeConflict, Substitution, SubstitutionDisplay, UnificationError,
    UnificationResult, VariableRenaming,
};
