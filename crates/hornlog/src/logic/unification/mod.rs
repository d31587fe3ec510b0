//! Unification, substitution, and renaming for terms

pub mod mgu;
pub mod renaming;
pub mod substitution;


pub use mgu::{unify, UnificationError, UnificationResult};
pub use renaming::VariableRenaming;
pub use substitution::{MergeConflict, Substitution, SubstitutionDisplay};
