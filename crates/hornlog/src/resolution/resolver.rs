//! SLD-resolution with backtracking
//!
//! The search is depth-first and left-to-right. Instead of recursing per
//! goal, the resolver keeps an explicit stack of choice points: each one
//! remembers the goals still to prove, the substitution of its branch, and
//! the candidate clauses it has not tried yet. Backtracking pops the stack.

use crate::config::ResolverConfig;
use crate::logic::{unify, Clause, PredicateTerm, Substitution, Term, VariableRenaming};
use std::vec;
use tracing::{debug, trace};

/// Final state of a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The goal follows from the clauses; carries the branch substitution
    Proved(Substitution),
    /// Every branch failed
    Failed,
    /// `max_steps` goal selections were made without reaching an answer
    ResourceLimit,
}

impl QueryOutcome {
    pub fn is_proved(&self) -> bool {
        matches!(self, QueryOutcome::Proved(_))
    }

    pub fn into_substitution(self) -> Option<Substitution> {
        match self {
            QueryOutcome::Proved(subst) => Some(subst),
            _ => None,
        }
    }
}

/// Evaluate a builtin comparison.
///
/// Both operands must already be integers; an unbound or non-numeric operand
/// makes the test fail rather than delay or raise.
pub fn evaluate_predicate(predicate: &PredicateTerm) -> bool {
    match (predicate.left().as_integer(), predicate.right().as_integer()) {
        (Some(left), Some(right)) => predicate.relation().test(left, right),
        _ => false,
    }
}

/// Resolves goals against a fixed, ordered clause list
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'kb> {
    clauses: &'kb [Clause],
    config: ResolverConfig,
}

impl<'kb> Resolver<'kb> {
    pub fn new(clauses: &'kb [Clause]) -> Self {
        Resolver {
            clauses,
            config: ResolverConfig::default(),
        }
    }

    pub fn with_config(clauses: &'kb [Clause], config: ResolverConfig) -> Self {
        Resolver { clauses, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// First proof of `goal`, if any
    pub fn query(&self, goal: &Term) -> Option<Substitution> {
        self.solutions(goal).next()
    }

    /// First proof of `goal`, distinguishing failure from an exhausted step
    /// budget
    pub fn solve(&self, goal: &Term) -> QueryOutcome {
        let mut solutions = self.solutions(goal);
        match solutions.next() {
            Some(subst) => QueryOutcome::Proved(subst),
            None if solutions.hit_limit() => QueryOutcome::ResourceLimit,
            None => QueryOutcome::Failed,
        }
    }

    /// Lazily enumerate every proof of `goal` in search order
    pub fn solutions(&self, goal: &Term) -> Solutions<'kb> {
        Solutions {
            clauses: self.clauses,
            config: self.config,
            renaming: VariableRenaming::above(goal),
            stack: Vec::new(),
            pending: Some(Branch {
                goals: vec![goal.clone()],
                subst: Substitution::new(),
            }),
            steps: 0,
            hit_limit: false,
        }
    }
}

/// A renamed clause whose head unifies with the selected goal
#[derive(Debug, Clone)]
struct Candidate {
    clause: Clause,
    unifier: Substitution,
}

/// Goals left to prove on one branch. `goals` is a stack: the last element
/// is selected next.
#[derive(Debug, Clone)]
struct Branch {
    goals: Vec<Term>,
    subst: Substitution,
}

#[derive(Debug)]
struct ChoicePoint {
    /// Goals after the selected one
    rest: Vec<Term>,
    subst: Substitution,
    candidates: vec::IntoIter<Candidate>,
}

/// Iterator over the proofs of one goal, see [`Resolver::solutions`]
#[derive(Debug)]
pub struct Solutions<'kb> {
    clauses: &'kb [Clause],
    config: ResolverConfig,
    renaming: VariableRenaming,
    stack: Vec<ChoicePoint>,
    pending: Option<Branch>,
    steps: usize,
    hit_limit: bool,
}

impl<'kb> Solutions<'kb> {
    /// Whether the search stopped because `max_steps` was reached
    pub fn hit_limit(&self) -> bool {
        self.hit_limit
    }

    /// Number of goal selections made so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Rename every clause, keep those whose head unifies with `goal`, and
    /// order them by the configured policy
    fn candidates(&mut self, goal: &Term) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for clause in self.clauses {
            let renamed = self.renaming.rename_clause(clause);
            if let Ok(unifier) = unify(goal, &renamed.head) {
                candidates.push(Candidate {
                    clause: renamed,
                    unifier,
                });
            }
        }
        self.config
            .ordering
            .arrange(&mut candidates, |candidate| &candidate.clause);
        candidates
    }

    /// Select the next goal of `branch`. Returns the finished substitution
    /// when no goals are left.
    fn expand(&mut self, mut branch: Branch) -> Option<Substitution> {
        let Some(selected) = branch.goals.pop() else {
            return Some(branch.subst);
        };

        self.steps += 1;
        let goal = branch.subst.apply(&selected);
        trace!(goal = %goal, depth = self.stack.len(), "selected goal");

        if let Term::Predicate(predicate) = &goal {
            if evaluate_predicate(predicate) {
                self.pending = Some(branch);
            } else {
                trace!(goal = %goal, "predicate failed");
            }
            return None;
        }

        let candidates = self.candidates(&goal);
        debug!(goal = %goal, candidates = candidates.len(), "resolving goal");
        self.stack.push(ChoicePoint {
            rest: branch.goals,
            subst: branch.subst,
            candidates: candidates.into_iter(),
        });
        None
    }

    /// Take the next untried candidate from the innermost choice point,
    /// popping exhausted ones
    fn backtrack(&mut self) -> Option<Branch> {
        while let Some(point) = self.stack.last_mut() {
            let Some(candidate) = point.candidates.next() else {
                self.stack.pop();
                continue;
            };

            // The goal was instantiated before unification and the head is
            // freshly renamed, so the unifier binds no key of `point.subst`.
            // A conflict here means a broken invariant; the candidate is
            // dropped rather than answered wrongly.
            let subst = match point.subst.merge(&candidate.unifier) {
                Ok(merged) => merged,
                Err(conflict) => {
                    debug!(%conflict, "candidate unifier conflicts with branch bindings");
                    continue;
                }
            };

            let mut goals = point.rest.clone();
            goals.extend(candidate.clause.body.into_iter().rev());
            return Some(Branch { goals, subst });
        }
        None
    }

    fn over_budget(&self) -> bool {
        self.config
            .max_steps
            .is_some_and(|max_steps| self.steps >= max_steps)
    }
}

impl<'kb> Iterator for Solutions<'kb> {
    type Item = Substitution;

    fn next(&mut self) -> Option<Substitution> {
        loop {
            if self.hit_limit {
                return None;
            }

            let branch = match self.pending.take() {
                Some(branch) => branch,
                None => self.backtrack()?,
            };

            if !branch.goals.is_empty() && self.over_budget() {
                debug!(steps = self.steps, "step limit reached");
                self.hit_limit = true;
                self.stack.clear();
                return None;
            }

            if let Some(answer) = self.expand(branch) {
                return Some(answer);
            }
        }
    }
}
