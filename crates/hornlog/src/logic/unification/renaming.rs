//! Fresh variables for clause activations
//!
//! Every time the resolver tries a clause it works on a renamed copy, so two
//! activations of the same clause (e.g. in a recursive predicate) can never
//! unify through a shared variable. A renamed variable keeps the source
//! variable's name ID and gets a scope number that is unique for the
//! lifetime of the [`VariableRenaming`] that issued it.
//!
//! The counter lives in the renaming instance, which the resolver creates per
//! query. There is no process-wide state, so concurrent queries don't need to
//! coordinate.

use crate::logic::core::clause::Clause;
use crate::logic::core::term::{List, Term, Variable};
use indexmap::IndexMap;

/// Issues fresh variables from a monotonically increasing counter
#[derive(Debug, Clone)]
pub struct VariableRenaming {
    first_scope: u64,
    next_scope: u64,
}

impl Default for VariableRenaming {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableRenaming {
    /// Start a new counter. Scope 0 is reserved for caller variables.
    pub fn new() -> Self {
        VariableRenaming {
            first_scope: 1,
            next_scope: 1,
        }
    }

    /// Start a counter above every scope already used in `goal`, so renamed
    /// variables from an earlier answer cannot collide with new ones
    pub fn above(goal: &Term) -> Self {
        let highest = goal.variables().iter().map(|v| v.scope).max().unwrap_or(0);
        VariableRenaming {
            first_scope: highest + 1,
            next_scope: highest + 1,
        }
    }

    /// Number of fresh variables issued so far
    pub fn issued(&self) -> u64 {
        self.next_scope - self.first_scope
    }

    /// A variable that has never been issued before
    pub fn fresh(&mut self, source: Variable) -> Variable {
        let scope = self.next_scope;
        self.next_scope += 1;
        Variable::scoped(source.id, scope)
    }

    /// Rename every variable of `clause`. Repeated occurrences of one source
    /// variable map to the same fresh variable.
    pub fn rename_clause(&mut self, clause: &Clause) -> Clause {
        let mut renamed = IndexMap::new();
        let head = self.rename_term(&clause.head, &mut renamed);
        let body = clause
            .body
            .iter()
            .map(|term| self.rename_term(term, &mut renamed))
            .collect();
        Clause { head, body }
    }

    /// Rename the variables of `term`, recording the mapping in `renamed`
    pub fn rename_term(
        &mut self,
        term: &Term,
        renamed: &mut IndexMap<Variable, Variable>,
    ) -> Term {
        match term {
            Term::Variable(v) => {
                if let Some(fresh) = renamed.get(v) {
                    return Term::Variable(*fresh);
                }
                let fresh = self.fresh(*v);
                renamed.insert(*v, fresh);
                Term::Variable(fresh)
            }
            Term::Constant(_) | Term::Integer(_) | Term::List(List::Empty) => term.clone(),
            Term::Compound(c) => Term::Compound(c.map_args(|arg| self.rename_term(arg, renamed))),
            Term::List(List::Cons(cell)) => {
                let head = self.rename_term(&cell.head, renamed);
                let tail = self.rename_term(&cell.tail, renamed);
                Term::List(List::cons(head, tail))
            }
            Term::Predicate(p) => {
                Term::Predicate(p.map_operands(|operand| self.rename_term(operand, renamed)))
            }
        }
    }
}
