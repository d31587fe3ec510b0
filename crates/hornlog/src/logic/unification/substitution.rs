//! Variable substitutions

use crate::logic::core::clause::Clause;
use crate::logic::core::term::{List, Term, Variable};
use crate::logic::interner::Interner;
use indexmap::IndexMap;
use std::fmt;
use thiserror::Error;

/// Two substitutions bound the same variable and cannot be merged
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("variable {variable} is bound by both substitutions")]
pub struct MergeConflict {
    pub variable: Variable,
}

/// A substitution mapping variables to terms.
///
/// The map is kept flattened: no stored value mentions a bound variable, so
/// `apply` is a single pass without chasing bindings. Insertion order is
/// preserved for deterministic output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    map: IndexMap<Variable, Term>,
}

impl Substitution {
    /// Create a new empty substitution
    pub fn new() -> Self {
        Substitution {
            map: IndexMap::new(),
        }
    }

    /// Create a new empty substitution with room for `capacity` bindings
    pub fn with_capacity(capacity: usize) -> Self {
        Substitution {
            map: IndexMap::with_capacity(capacity),
        }
    }

    /// Bind `var` to `term`, keeping the map flattened.
    ///
    /// Existing bindings are applied to `term` first, then the new binding is
    /// applied to every stored value. A rebind of an existing key overwrites
    /// it; detecting conflicting bindings is up to the caller.
    pub fn add(&mut self, var: Variable, term: Term) {
        let value = self.apply(&term);

        let single = Substitution {
            map: IndexMap::from([(var, value.clone())]),
        };
        for existing in self.map.values_mut() {
            if let Some(updated) = single.rewrite(existing) {
                *existing = updated;
            }
        }

        self.map.insert(var, value);
    }

    /// Build a new term with every bound variable replaced
    pub fn apply(&self, term: &Term) -> Term {
        self.rewrite(term).unwrap_or_else(|| term.clone())
    }

    /// Rewrite `term`, returning `None` when nothing changed so untouched
    /// subterms keep sharing their structure
    fn rewrite(&self, term: &Term) -> Option<Term> {
        if self.map.is_empty() {
            return None;
        }
        match term {
            Term::Variable(v) => self.map.get(v).cloned(),
            Term::Constant(_) | Term::Integer(_) | Term::List(List::Empty) => None,
            Term::Compound(c) => {
                let rewritten: Vec<Option<Term>> =
                    c.args().iter().map(|arg| self.rewrite(arg)).collect();
                if rewritten.iter().all(Option::is_none) {
                    return None;
                }
                let mut replacements = rewritten.into_iter();
                Some(Term::Compound(c.map_args(|arg| {
                    replacements
                        .next()
                        .flatten()
                        .unwrap_or_else(|| arg.clone())
                })))
            }
            Term::List(List::Cons(cell)) => {
                let head = self.rewrite(&cell.head);
                let tail = self.rewrite(&cell.tail);
                if head.is_none() && tail.is_none() {
                    return None;
                }
                Some(Term::List(List::cons(
                    head.unwrap_or_else(|| cell.head.clone()),
                    tail.unwrap_or_else(|| cell.tail.clone()),
                )))
            }
            Term::Predicate(p) => {
                let left = self.rewrite(p.left());
                let right = self.rewrite(p.right());
                if left.is_none() && right.is_none() {
                    return None;
                }
                let mut replacements = [left, right].into_iter();
                Some(Term::Predicate(p.map_operands(|operand| {
                    replacements
                        .next()
                        .flatten()
                        .unwrap_or_else(|| operand.clone())
                })))
            }
        }
    }

    /// Union with `other`, failing if both bind the same variable.
    ///
    /// The check is strict: a shared key is a conflict even when both sides
    /// agree on its value. `other`'s bindings are applied to the values of
    /// this substitution so the result stays flattened.
    pub fn merge(&self, other: &Substitution) -> Result<Substitution, MergeConflict> {
        if let Some(variable) = other.map.keys().find(|v| self.map.contains_key(*v)) {
            return Err(MergeConflict {
                variable: *variable,
            });
        }
        Ok(self.compose(other))
    }

    /// Compose two substitutions: apply `other` to every value of `self`,
    /// then add the bindings of `other` for variables `self` leaves free
    pub fn compose(&self, other: &Substitution) -> Substitution {
        let mut result = Substitution::with_capacity(self.len() + other.len());

        for (&var, term) in &self.map {
            result.map.insert(var, other.apply(term));
        }

        for (&var, term) in &other.map {
            result.map.entry(var).or_insert_with(|| term.clone());
        }

        result
    }

    /// Keep only the bindings for `vars`
    pub fn restrict(&self, vars: &[Variable]) -> Substitution {
        Substitution {
            map: self
                .map
                .iter()
                .filter(|(var, _)| vars.contains(*var))
                .map(|(var, term)| (*var, term.clone()))
                .collect(),
        }
    }

    /// Get the term for a variable, if bound
    pub fn get(&self, var: &Variable) -> Option<&Term> {
        self.map.get(var)
    }

    /// Check if a variable is bound
    pub fn contains(&self, var: &Variable) -> bool {
        self.map.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Bindings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.map.iter()
    }

    /// Format this substitution with an interner for name resolution
    pub fn display<'a>(&'a self, interner: &'a Interner) -> SubstitutionDisplay<'a> {
        SubstitutionDisplay {
            subst: self,
            interner,
        }
    }
}

impl Term {
    /// Apply a substitution to this term
    pub fn apply_substitution(&self, subst: &Substitution) -> Term {
        subst.apply(self)
    }
}

impl Clause {
    /// Apply a substitution to the head and every body term
    pub fn apply_substitution(&self, subst: &Substitution) -> Clause {
        Clause {
            head: subst.apply(&self.head),
            body: self.body.iter().map(|term| subst.apply(term)).collect(),
        }
    }
}

/// Display wrapper for Substitution that includes an interner for name resolution
pub struct SubstitutionDisplay<'a> {
    subst: &'a Substitution,
    interner: &'a Interner,
}

impl<'a> fmt::Display for SubstitutionDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, term)) in self.subst.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(
                f,
                "{} -> {}",
                Term::Variable(*var).display(self.interner),
                term.display(self.interner)
            )?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, term)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} -> {}", var, term)?;
        }
        write!(f, "}}")
    }
}
