//! Horn clauses: facts and rules

use crate::logic::interner::Interner;
use super::term::{Term, Variable};
use indexmap::IndexSet;
use std::fmt;

/// A definite clause `head :- body`
///
/// A clause with an empty body is a fact, anything else is a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub head: Term,
    pub body: Vec<Term>,
}

impl Clause {
    /// Create a clause from a head and a (possibly empty) body
    pub fn new(head: Term, body: Vec<Term>) -> Self {
        Clause { head, body }
    }

    /// Create an unconditional clause
    pub fn fact(head: Term) -> Self {
        Clause {
            head,
            body: Vec::new(),
        }
    }

    /// Create a rule `head :- body`
    pub fn rule<I>(head: Term, body: I) -> Self
    where
        I: IntoIterator<Item = Term>,
    {
        Clause {
            head,
            body: body.into_iter().collect(),
        }
    }

    pub fn is_fact(&self) -> bool {
        self.body.is_empty()
    }

    pub fn is_rule(&self) -> bool {
        !self.body.is_empty()
    }

    /// Check whether neither head nor body contain variables
    pub fn is_ground(&self) -> bool {
        self.head.is_ground() && self.body.iter().all(Term::is_ground)
    }

    /// Distinct variables of the clause, head first, in order of occurrence
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars = IndexSet::new();
        self.head.collect_variables(&mut vars);
        for term in &self.body {
            term.collect_variables(&mut vars);
        }
        vars.into_iter().collect()
    }

    /// Format this clause with an interner for name resolution
    pub fn display<'a>(&'a self, interner: &'a Interner) -> ClauseDisplay<'a> {
        ClauseDisplay {
            clause: self,
            interner,
        }
    }
}

/// Display wrapper for Clause that includes an interner for name resolution
pub struct ClauseDisplay<'a> {
    clause: &'a Clause,
    interner: &'a Interner,
}

impl<'a> fmt::Display for ClauseDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.clause.head.display(self.interner))?;
        for (i, term) in self.clause.body.iter().enumerate() {
            if i == 0 {
                write!(f, " :- ")?;
            } else {
                write!(f, ", ")?;
            }
            write!(f, "{}", term.display(self.interner))?;
        }
        write!(f, ".")
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)?;
        for (i, term) in self.body.iter().enumerate() {
            if i == 0 {
                write!(f, " :- ")?;
            } else {
                write!(f, ", ")?;
            }
            write!(f, "{}", term)?;
        }
        write!(f, ".")
    }
}
