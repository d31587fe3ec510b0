//! Builder facade over the interner, the clause list and the resolver

use crate::config::ResolverConfig;
use crate::logic::{
    Clause, Constant, Functor, Interner, Relation, Substitution, Term, TermDisplay, Variable,
};
use crate::resolution::{QueryOutcome, Resolver, Solutions};
use std::fmt;

/// A collection of facts and rules that goals are proved against.
///
/// Symbols are allocated through the knowledge base so their names can be
/// shown later. Clauses are appended while building and tried in insertion
/// order (facts first under the default configuration). Queries only need
/// `&self`, so a built knowledge base can be shared between threads.
///
/// ```
/// use hornlog::KnowledgeBase;
///
/// let mut kb = KnowledgeBase::new();
/// let male = kb.functor("male");
/// let isaac = kb.constant("isaac");
/// kb.add_fact(male.apply([isaac.clone()]).unwrap());
///
/// assert!(kb.query(&male.apply([isaac]).unwrap()));
/// ```
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    interner: Interner,
    clauses: Vec<Clause>,
    config: ResolverConfig,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        KnowledgeBase::default()
    }

    /// Replace the resolver configuration used by later queries
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_config(&mut self, config: ResolverConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    // =========================================================================
    // Symbols
    // =========================================================================

    /// A new constant. Every call yields a distinct constant, so keep the
    /// returned term to refer to the same individual again.
    pub fn constant(&mut self, name: &str) -> Term {
        Term::Constant(Constant::new(self.interner.alloc_constant(name)))
    }

    /// A new variable, distinct from every other variable
    pub fn variable(&mut self, name: &str) -> Variable {
        Variable::new(self.interner.alloc_variable(name))
    }

    /// A new functor; its arity is fixed by each application
    pub fn functor(&mut self, name: &str) -> Functor {
        Functor::new(self.interner.alloc_functor(name))
    }

    pub fn integer(&self, value: i64) -> Term {
        Term::Integer(value)
    }

    /// A user-defined comparison over integers
    pub fn relation<F>(&self, name: &str, test: F) -> Relation
    where
        F: Fn(i64, i64) -> bool + Send + Sync + 'static,
    {
        Relation::new(name, test)
    }

    // =========================================================================
    // Clauses
    // =========================================================================

    pub fn add_fact(&mut self, head: Term) -> &mut Self {
        self.add_clause(Clause::fact(head))
    }

    pub fn add_facts<I>(&mut self, heads: I) -> &mut Self
    where
        I: IntoIterator<Item = Term>,
    {
        self.clauses.extend(heads.into_iter().map(Clause::fact));
        self
    }

    pub fn add_rule<I>(&mut self, head: Term, body: I) -> &mut Self
    where
        I: IntoIterator<Item = Term>,
    {
        self.add_clause(Clause::rule(head, body))
    }

    pub fn add_clause(&mut self, clause: Clause) -> &mut Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::with_config(&self.clauses, self.config)
    }

    /// Whether `goal` follows from the clauses
    pub fn query(&self, goal: &Term) -> bool {
        self.resolver().query(goal).is_some()
    }

    /// Bindings of the goal's variables in the first proof
    pub fn ask(&self, goal: &Term) -> Option<Answer> {
        self.resolver()
            .query(goal)
            .map(|subst| Answer::new(goal, &subst))
    }

    pub fn solve(&self, goal: &Term) -> QueryOutcome {
        self.resolver().solve(goal)
    }

    /// Every proof of `goal`, lazily, in search order
    pub fn solutions(&self, goal: &Term) -> Solutions<'_> {
        self.resolver().solutions(goal)
    }

    /// Answers for every proof of `goal`
    pub fn answers<'a>(&'a self, goal: &'a Term) -> impl Iterator<Item = Answer> + 'a {
        self.solutions(goal).map(move |subst| Answer::new(goal, &subst))
    }

    /// Format a term with this knowledge base's symbol names
    pub fn show<'a>(&'a self, term: &'a Term) -> TermDisplay<'a> {
        term.display(&self.interner)
    }
}

/// The value of each goal variable in one proof, in order of first
/// occurrence in the goal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    bindings: Vec<(Variable, Term)>,
}

impl Answer {
    pub fn new(goal: &Term, subst: &Substitution) -> Self {
        let bindings = goal
            .variables()
            .into_iter()
            .map(|var| (var, subst.apply(&Term::Variable(var))))
            .collect();
        Answer { bindings }
    }

    /// Value of `var`. A variable the proof left open maps to a variable.
    pub fn get(&self, var: &Variable) -> Option<&Term> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound == var)
            .map(|(_, term)| term)
    }

    /// Value of the first goal variable called `name`
    pub fn lookup(&self, name: &str, interner: &Interner) -> Option<&Term> {
        self.bindings
            .iter()
            .find(|(var, _)| var.name(interner) == name)
            .map(|(_, term)| term)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.bindings.iter().map(|(var, term)| (var, term))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True for ground goals
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn display<'a>(&'a self, interner: &'a Interner) -> AnswerDisplay<'a> {
        AnswerDisplay {
            answer: self,
            interner,
        }
    }
}

/// Display wrapper for Answer, one `X = value` per binding
pub struct AnswerDisplay<'a> {
    answer: &'a Answer,
    interner: &'a Interner,
}

impl<'a> fmt::Display for AnswerDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.answer.is_empty() {
            return write!(f, "true");
        }
        for (i, (var, term)) in self.answer.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(
                f,
                "{} = {}",
                var.name(self.interner),
                term.display(self.interner)
            )?;
        }
        Ok(())
    }
}
