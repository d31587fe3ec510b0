//! Most General Unifier (MGU) computation

use crate::logic::core::term::{Constant, Functor, List, Term, Variable};
use crate::logic::unification::substitution::Substitution;
use std::fmt;

/// Result of a unification attempt
pub type UnificationResult = Result<Substitution, UnificationError>;

/// Why two terms do not unify.
///
/// These are ordinary negative outcomes that drive backtracking, not faults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnificationError {
    /// Occurs check failed - variable occurs in term
    OccursCheck(Variable, Term),
    /// Functors don't match
    FunctorClash(Functor, Functor),
    /// Same functor applied to a different number of arguments
    ArityMismatch(usize, usize),
    /// Constant symbols don't match
    ConstantClash(Constant, Constant),
    /// Integers with different values
    IntegerClash(i64, i64),
    /// One list is empty, the other is not
    ListLengthMismatch,
    /// Predicate terms are evaluated, never unified
    PredicateTerm,
    /// Terms of different shapes (e.g. constant vs compound)
    ShapeClash(Term, Term),
}

impl fmt::Display for UnificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnificationError::OccursCheck(v, t) => write!(f, "{} occurs in {}", v, t),
            UnificationError::FunctorClash(f1, f2) => {
                write!(f, "functor clash: F{} vs F{}", f1.id.as_u32(), f2.id.as_u32())
            }
            UnificationError::ArityMismatch(a1, a2) => write!(f, "arity mismatch: {} vs {}", a1, a2),
            UnificationError::ConstantClash(c1, c2) => {
                write!(f, "constant clash: C{} vs C{}", c1.id.as_u32(), c2.id.as_u32())
            }
            UnificationError::IntegerClash(i1, i2) => write!(f, "integer clash: {} vs {}", i1, i2),
            UnificationError::ListLengthMismatch => write!(f, "list length mismatch"),
            UnificationError::PredicateTerm => write!(f, "predicate terms do not unify"),
            UnificationError::ShapeClash(t1, t2) => write!(f, "cannot unify {} with {}", t1, t2),
        }
    }
}

impl std::error::Error for UnificationError {}

/// Unify two terms, returning a most general unifier (MGU) if one exists.
///
/// Works off an explicit stack of term pairs instead of recursing, so deep
/// lists do not grow the call stack. Each popped pair is brought up to date
/// with the bindings found so far before it is compared. On failure nothing
/// of the partial substitution escapes.
pub fn unify(term1: &Term, term2: &Term) -> UnificationResult {
    let mut subst = Substitution::new();
    let mut stack = vec![(term1.clone(), term2.clone())];

    while let Some((left, right)) = stack.pop() {
        let t1 = subst.apply(&left);
        let t2 = subst.apply(&right);

        match (&t1, &t2) {
            // Identical terms, including X = X. Predicate terms never take
            // this shortcut, they are only ever bound to variables.
            _ if t1 == t2 && !has_predicate(&t1) => {}

            (Term::Variable(v), other) | (other, Term::Variable(v)) => {
                bind(&mut subst, *v, other)?;
            }

            (Term::Constant(c1), Term::Constant(c2)) => {
                return Err(UnificationError::ConstantClash(*c1, *c2));
            }

            (Term::Integer(i1), Term::Integer(i2)) => {
                return Err(UnificationError::IntegerClash(*i1, *i2));
            }

            (Term::List(l1), Term::List(l2)) => match (l1, l2) {
                (List::Empty, List::Empty) => {}
                (List::Cons(c1), List::Cons(c2)) => {
                    stack.push((c1.tail.clone(), c2.tail.clone()));
                    stack.push((c1.head.clone(), c2.head.clone()));
                }
                _ => return Err(UnificationError::ListLengthMismatch),
            },

            (Term::Compound(c1), Term::Compound(c2)) => {
                if c1.functor() != c2.functor() {
                    return Err(UnificationError::FunctorClash(c1.functor(), c2.functor()));
                }
                if c1.arity() != c2.arity() {
                    return Err(UnificationError::ArityMismatch(c1.arity(), c2.arity()));
                }
                // Reversed so the leftmost argument pair is popped first
                for (arg1, arg2) in c1.args().iter().zip(c2.args()).rev() {
                    stack.push((arg1.clone(), arg2.clone()));
                }
            }

            (Term::Predicate(_), _) | (_, Term::Predicate(_)) => {
                return Err(UnificationError::PredicateTerm);
            }

            _ => return Err(UnificationError::ShapeClash(t1.clone(), t2.clone())),
        }
    }

    Ok(subst)
}

/// Whether a predicate term occurs anywhere in `term`
fn has_predicate(term: &Term) -> bool {
    match term {
        Term::Predicate(_) => true,
        Term::Constant(_) | Term::Variable(_) | Term::Integer(_) | Term::List(List::Empty) => false,
        Term::Compound(c) => c.args().iter().any(has_predicate),
        Term::List(List::Cons(cell)) => has_predicate(&cell.head) || has_predicate(&cell.tail),
    }
}

/// Bind `var` to `term` in `subst` after the occurs check. Any term can be
/// bound, predicate terms included.
fn bind(subst: &mut Substitution, var: Variable, term: &Term) -> Result<(), UnificationError> {
    if term.contains(&var) {
        return Err(UnificationError::OccursCheck(var, term.clone()));
    }
    // Pairs are applied before comparison, so a bound variable never
    // reaches this point.
    if let Some(existing) = subst.get(&var) {
        if existing != term {
            return Err(UnificationError::ShapeClash(existing.clone(), term.clone()));
        }
        return Ok(());
    }
    subst.add(var, term.clone());
    Ok(())
}
