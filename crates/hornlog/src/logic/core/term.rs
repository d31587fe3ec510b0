//! Terms of the logic language
//!
//! The term model is a closed set of shapes: constants, variables, compound
//! terms of arity 1 to 4, cons lists, integers, and builtin predicate terms.
//! Terms are immutable; compound structure is shared behind `Arc` so cloning
//! a term is cheap and terms can be sent across threads.

use crate::logic::interner::{ConstantId, FunctorId, Interner, VariableId};
use indexmap::IndexSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Largest supported compound arity. Wider structures nest or use lists.
pub const MAX_ARITY: usize = 4;

/// Errors raised while constructing terms
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermError {
    #[error("compound terms take between 1 and 4 arguments, got {0}")]
    UnsupportedArity(usize),
}

/// A constant symbol, compared by identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Constant {
    pub id: ConstantId,
}

impl Constant {
    /// Create a constant from an ID
    pub fn new(id: ConstantId) -> Self {
        Constant { id }
    }

    /// Get the name of this constant from the interner
    pub fn name<'a>(&self, interner: &'a Interner) -> &'a str {
        interner.resolve_constant(self.id)
    }
}

/// A logic variable
///
/// `scope` is 0 for variables written by the caller. Clause renaming keeps
/// the name ID and assigns a fresh non-zero scope, so a renamed variable is a
/// different variable that still prints with its source name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variable {
    pub id: VariableId,
    pub scope: u64,
}

impl Variable {
    /// Create a caller-level variable from an ID
    pub fn new(id: VariableId) -> Self {
        Variable { id, scope: 0 }
    }

    /// Create a variable in the given renaming scope
    pub fn scoped(id: VariableId, scope: u64) -> Self {
        Variable { id, scope }
    }

    /// Whether this variable was produced by clause renaming
    pub fn is_renamed(&self) -> bool {
        self.scope != 0
    }

    /// Get the source name of this variable from the interner
    pub fn name<'a>(&self, interner: &'a Interner) -> &'a str {
        interner.resolve_variable(self.id)
    }
}

/// A functor symbol. Its arity is the argument count of the compound it heads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Functor {
    pub id: FunctorId,
}

impl Functor {
    /// Create a functor from an ID
    pub fn new(id: FunctorId) -> Self {
        Functor { id }
    }

    /// Get the name of this functor from the interner
    pub fn name<'a>(&self, interner: &'a Interner) -> &'a str {
        interner.resolve_functor(self.id)
    }

    /// Build the compound term `functor(args...)`
    pub fn apply<I>(self, args: I) -> Result<Term, TermError>
    where
        I: IntoIterator<Item = Term>,
    {
        CompoundTerm::new(self, args.into_iter().collect()).map(Term::Compound)
    }
}

/// A functor applied to 1..=4 arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundTerm {
    functor: Functor,
    args: Arc<[Term]>,
}

impl CompoundTerm {
    /// Build a compound term, rejecting arities outside 1..=4
    pub fn new(functor: Functor, args: Vec<Term>) -> Result<Self, TermError> {
        if args.is_empty() || args.len() > MAX_ARITY {
            return Err(TermError::UnsupportedArity(args.len()));
        }
        Ok(CompoundTerm {
            functor,
            args: args.into(),
        })
    }

    pub fn functor(&self) -> Functor {
        self.functor
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn args(&self) -> &[Term] {
        &self.args
    }

    /// Rebuild with each argument mapped. Arity is preserved, so this cannot fail.
    pub(crate) fn map_args<F>(&self, f: F) -> CompoundTerm
    where
        F: FnMut(&Term) -> Term,
    {
        CompoundTerm {
            functor: self.functor,
            args: self.args.iter().map(f).collect(),
        }
    }
}

/// A cons cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cons {
    pub head: Term,
    pub tail: Term,
}

/// A list: the canonical empty list, or a head/tail pair
///
/// The tail is an arbitrary term, so `[X|T]` with a variable tail is a
/// `Cons` whose tail is `Term::Variable`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum List {
    #[default]
    Empty,
    Cons(Arc<Cons>),
}

impl List {
    /// The empty list
    pub fn empty() -> List {
        List::Empty
    }

    /// The list `[head|tail]`
    pub fn cons(head: impl Into<Term>, tail: impl Into<Term>) -> List {
        List::Cons(Arc::new(Cons {
            head: head.into(),
            tail: tail.into(),
        }))
    }

    /// A proper list holding `items` in order
    pub fn from_terms<I>(items: I) -> List
    where
        I: IntoIterator<Item = Term>,
        I::IntoIter: DoubleEndedIterator,
    {
        items
            .into_iter()
            .rev()
            .fold(List::Empty, |tail, head| List::cons(head, tail))
    }

    /// The list `[items...|tail]`. With no items this is just `tail`.
    pub fn with_tail<I>(items: I, tail: Term) -> Term
    where
        I: IntoIterator<Item = Term>,
        I::IntoIter: DoubleEndedIterator,
    {
        items
            .into_iter()
            .rev()
            .fold(tail, |tail, head| Term::List(List::cons(head, tail)))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, List::Empty)
    }

    pub fn head(&self) -> Option<&Term> {
        match self {
            List::Empty => None,
            List::Cons(cell) => Some(&cell.head),
        }
    }

    pub fn tail(&self) -> Option<&Term> {
        match self {
            List::Empty => None,
            List::Cons(cell) => Some(&cell.tail),
        }
    }

    /// Collect the elements of a proper list; `None` if the list ends in a
    /// non-list tail such as an unbound variable
    pub fn to_vec(&self) -> Option<Vec<Term>> {
        let mut items = Vec::new();
        let mut current = self;
        loop {
            match current {
                List::Empty => return Some(items),
                List::Cons(cell) => {
                    items.push(cell.head.clone());
                    match &cell.tail {
                        Term::List(rest) => current = rest,
                        _ => return None,
                    }
                }
            }
        }
    }
}

type RelationFn = dyn Fn(i64, i64) -> bool + Send + Sync;

/// A builtin binary relation over integers, such as `<`
///
/// Relations compare by identity: two relations are equal only if they share
/// the same underlying function (clones of one `Relation` are equal).
#[derive(Clone)]
pub struct Relation {
    name: Arc<str>,
    test: Arc<RelationFn>,
}

impl Relation {
    /// Lift a caller-supplied comparison into a relation
    pub fn new<F>(name: &str, test: F) -> Self
    where
        F: Fn(i64, i64) -> bool + Send + Sync + 'static,
    {
        Relation {
            name: Arc::from(name),
            test: Arc::new(test),
        }
    }

    pub fn less_than() -> Self {
        Relation::new("<", |a, b| a < b)
    }

    pub fn less_or_equal() -> Self {
        Relation::new("=<", |a, b| a <= b)
    }

    pub fn greater_than() -> Self {
        Relation::new(">", |a, b| a > b)
    }

    pub fn greater_or_equal() -> Self {
        Relation::new(">=", |a, b| a >= b)
    }

    pub fn equal() -> Self {
        Relation::new("=:=", |a, b| a == b)
    }

    pub fn not_equal() -> Self {
        Relation::new("=\\=", |a, b| a != b)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the relation on two integers
    pub fn test(&self, left: i64, right: i64) -> bool {
        (self.test)(left, right)
    }

    /// Build the predicate term `relation(left, right)`
    pub fn apply(&self, left: impl Into<Term>, right: impl Into<Term>) -> Term {
        Term::Predicate(PredicateTerm::new(self.clone(), left.into(), right.into()))
    }
}

impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.test, &other.test)
    }
}

impl Eq for Relation {}

impl fmt::Debug for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Relation").field(&self.name).finish()
    }
}

/// A builtin test `relation(left, right)`, evaluated by the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateTerm {
    relation: Relation,
    operands: Arc<(Term, Term)>,
}

impl PredicateTerm {
    pub fn new(relation: Relation, left: Term, right: Term) -> Self {
        PredicateTerm {
            relation,
            operands: Arc::new((left, right)),
        }
    }

    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    pub fn left(&self) -> &Term {
        &self.operands.0
    }

    pub fn right(&self) -> &Term {
        &self.operands.1
    }

    /// Rebuild with both operands mapped
    pub(crate) fn map_operands<F>(&self, mut f: F) -> PredicateTerm
    where
        F: FnMut(&Term) -> Term,
    {
        PredicateTerm::new(self.relation.clone(), f(self.left()), f(self.right()))
    }
}

/// A term of the logic language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Constant(Constant),
    Variable(Variable),
    Compound(CompoundTerm),
    List(List),
    Integer(i64),
    Predicate(PredicateTerm),
}

impl Term {
    /// Build a proper list term
    pub fn list<I>(items: I) -> Term
    where
        I: IntoIterator<Item = Term>,
        I::IntoIter: DoubleEndedIterator,
    {
        Term::List(List::from_terms(items))
    }

    /// The empty list term
    pub fn empty_list() -> Term {
        Term::List(List::Empty)
    }

    /// Check whether this term contains no variables
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Constant(_) | Term::Integer(_) => true,
            Term::Variable(_) => false,
            Term::Compound(c) => c.args().iter().all(Term::is_ground),
            Term::List(List::Empty) => true,
            Term::List(List::Cons(cell)) => cell.head.is_ground() && cell.tail.is_ground(),
            Term::Predicate(p) => p.left().is_ground() && p.right().is_ground(),
        }
    }

    /// Occurs test: does `var` appear anywhere in this term (including the
    /// term being `var` itself)?
    pub fn contains(&self, var: &Variable) -> bool {
        match self {
            Term::Variable(v) => v == var,
            Term::Constant(_) | Term::Integer(_) => false,
            Term::Compound(c) => c.args().iter().any(|arg| arg.contains(var)),
            Term::List(List::Empty) => false,
            Term::List(List::Cons(cell)) => cell.head.contains(var) || cell.tail.contains(var),
            Term::Predicate(p) => p.left().contains(var) || p.right().contains(var),
        }
    }

    /// Distinct variables of this term, in order of first occurrence
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars = IndexSet::new();
        self.collect_variables(&mut vars);
        vars.into_iter().collect()
    }

    /// Collect all variables of this term into `vars`
    pub fn collect_variables(&self, vars: &mut IndexSet<Variable>) {
        match self {
            Term::Variable(v) => {
                vars.insert(*v);
            }
            Term::Constant(_) | Term::Integer(_) | Term::List(List::Empty) => {}
            Term::Compound(c) => {
                for arg in c.args() {
                    arg.collect_variables(vars);
                }
            }
            Term::List(List::Cons(cell)) => {
                cell.head.collect_variables(vars);
                cell.tail.collect_variables(vars);
            }
            Term::Predicate(p) => {
                p.left().collect_variables(vars);
                p.right().collect_variables(vars);
            }
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Term::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Term::Variable(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Term::List(l) => Some(l),
            _ => None,
        }
    }

    /// Format this term with an interner for name resolution
    pub fn display<'a>(&'a self, interner: &'a Interner) -> TermDisplay<'a> {
        TermDisplay {
            term: self,
            interner,
        }
    }
}

impl From<Constant> for Term {
    fn from(c: Constant) -> Self {
        Term::Constant(c)
    }
}

impl From<Variable> for Term {
    fn from(v: Variable) -> Self {
        Term::Variable(v)
    }
}

impl From<CompoundTerm> for Term {
    fn from(c: CompoundTerm) -> Self {
        Term::Compound(c)
    }
}

impl From<List> for Term {
    fn from(l: List) -> Self {
        Term::List(l)
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Term::Integer(value)
    }
}

impl From<PredicateTerm> for Term {
    fn from(p: PredicateTerm) -> Self {
        Term::Predicate(p)
    }
}

/// Display wrapper for Term that includes an interner for name resolution
pub struct TermDisplay<'a> {
    term: &'a Term,
    interner: &'a Interner,
}

impl<'a> fmt::Display for TermDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_term(f, self.term, Some(self.interner))
    }
}

// Without an interner, symbols print as IDs (for debugging)
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_term(f, self, None)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_variable(f, self, None)
    }
}

fn write_variable(f: &mut fmt::Formatter<'_>, v: &Variable, names: Option<&Interner>) -> fmt::Result {
    match names {
        Some(interner) => write!(f, "{}", v.name(interner))?,
        None => write!(f, "V{}", v.id.as_u32())?,
    }
    if v.is_renamed() {
        write!(f, "_{}", v.scope)?;
    }
    Ok(())
}

fn write_term(f: &mut fmt::Formatter<'_>, term: &Term, names: Option<&Interner>) -> fmt::Result {
    match term {
        Term::Constant(c) => match names {
            Some(interner) => write!(f, "{}", c.name(interner)),
            None => write!(f, "C{}", c.id.as_u32()),
        },
        Term::Variable(v) => write_variable(f, v, names),
        Term::Integer(value) => write!(f, "{}", value),
        Term::Compound(c) => {
            match names {
                Some(interner) => write!(f, "{}(", c.functor().name(interner))?,
                None => write!(f, "F{}(", c.functor().id.as_u32())?,
            }
            for (i, arg) in c.args().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write_term(f, arg, names)?;
            }
            write!(f, ")")
        }
        Term::Predicate(p) => {
            write!(f, "{}(", p.relation().name())?;
            write_term(f, p.left(), names)?;
            write!(f, ", ")?;
            write_term(f, p.right(), names)?;
            write!(f, ")")
        }
        Term::List(List::Empty) => write!(f, "[]"),
        Term::List(List::Cons(cell)) => {
            write!(f, "[")?;
            write_term(f, &cell.head, names)?;
            let mut tail = &cell.tail;
            loop {
                match tail {
                    Term::List(List::Empty) => break,
                    Term::List(List::Cons(next)) => {
                        write!(f, ", ")?;
                        write_term(f, &next.head, names)?;
                        tail = &next.tail;
                    }
                    other => {
                        write!(f, "|")?;
                        write_term(f, other, names)?;
                        break;
                    }
                }
            }
            write!(f, "]")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ctx {
        interner: Interner,
    }

    impl Ctx {
        fn new() -> Self {
            Ctx {
                interner: Interner::new(),
            }
        }

        fn var(&mut self, name: &str) -> Variable {
            Variable::new(self.interner.alloc_variable(name))
        }

        fn const_(&mut self, name: &str) -> Term {
            Term::Constant(Constant::new(self.interner.alloc_constant(name)))
        }

        fn functor(&mut self, name: &str) -> Functor {
            Functor::new(self.interner.alloc_functor(name))
        }
    }

    #[test]
    fn test_constants_compare_by_identity() {
        let mut ctx = Ctx::new();
        let a1 = ctx.const_("a");
        let a2 = ctx.const_("a");

        assert_eq!(a1, a1.clone());
        assert_ne!(a1, a2);
    }

    #[test]
    fn test_compound_arity_bounds() {
        let mut ctx = Ctx::new();
        let f = ctx.functor("f");
        let a = ctx.const_("a");

        assert_eq!(f.apply(vec![]), Err(TermError::UnsupportedArity(0)));
        assert!(f.apply(vec![a.clone()]).is_ok());
        assert!(f.apply(vec![a.clone(); 4]).is_ok());
        assert_eq!(f.apply(vec![a; 5]), Err(TermError::UnsupportedArity(5)));
    }

    #[test]
    fn test_compound_equality() {
        let mut ctx = Ctx::new();
        let f = ctx.functor("f");
        let g = ctx.functor("g");
        let a = ctx.const_("a");
        let b = ctx.const_("b");

        let fab = f.apply([a.clone(), b.clone()]).unwrap();
        assert_eq!(fab, f.apply([a.clone(), b.clone()]).unwrap());
        assert_ne!(fab, g.apply([a.clone(), b.clone()]).unwrap());
        assert_ne!(fab, f.apply([b, a]).unwrap());
    }

    #[test]
    fn test_groundness() {
        let mut ctx = Ctx::new();
        let f = ctx.functor("f");
        let a = ctx.const_("a");
        let x = ctx.var("X");

        assert!(a.is_ground());
        assert!(Term::Integer(3).is_ground());
        assert!(!Term::Variable(x).is_ground());
        assert!(f.apply([a.clone()]).unwrap().is_ground());
        assert!(!f.apply([a.clone(), x.into()]).unwrap().is_ground());
        assert!(Term::empty_list().is_ground());
        assert!(Term::list([a.clone(), Term::Integer(1)]).is_ground());
        assert!(!Term::list([a, x.into()]).is_ground());
        assert!(!Relation::less_than().apply(x, 2i64).is_ground());
        assert!(Relation::less_than().apply(1i64, 2i64).is_ground());
    }

    #[test]
    fn test_contains_is_identity_based() {
        let mut ctx = Ctx::new();
        let f = ctx.functor("f");
        let x = ctx.var("X");
        let other_x = ctx.var("X");

        let term = f.apply([Term::list([x.into()])]).unwrap();
        assert!(term.contains(&x));
        assert!(!term.contains(&other_x));
        assert!(!term.contains(&Variable::scoped(x.id, 1)));
        assert!(Relation::less_than().apply(1i64, x).contains(&x));
    }

    #[test]
    fn test_variables_in_first_occurrence_order() {
        let mut ctx = Ctx::new();
        let f = ctx.functor("f");
        let x = ctx.var("X");
        let y = ctx.var("Y");

        let term = f.apply([y.into(), x.into(), Term::list([y.into()])]).unwrap();
        assert_eq!(term.variables(), vec![y, x]);
    }

    #[test]
    fn test_list_construction() {
        let mut ctx = Ctx::new();
        let a = ctx.const_("a");
        let b = ctx.const_("b");
        let t = ctx.var("T");

        let proper = List::from_terms([a.clone(), b.clone()]);
        assert_eq!(proper.head(), Some(&a));
        assert_eq!(proper.to_vec(), Some(vec![a.clone(), b.clone()]));
        assert!(List::empty().is_empty());
        assert_eq!(List::from_terms(Vec::new()), List::Empty);

        let partial = List::with_tail([a.clone()], t.into());
        assert_eq!(partial, Term::List(List::cons(a, t)));
        assert_eq!(partial.as_list().and_then(List::to_vec), None);
    }

    #[test]
    fn test_display_with_interner() {
        let mut ctx = Ctx::new();
        let f = ctx.functor("father");
        let a = ctx.const_("abraham");
        let x = ctx.var("X");
        let t = ctx.var("T");

        let term = f.apply([a.clone(), x.into()]).unwrap();
        assert_eq!(term.display(&ctx.interner).to_string(), "father(abraham, X)");

        let list = List::with_tail([Term::Integer(1), a], t.into());
        assert_eq!(list.display(&ctx.interner).to_string(), "[1, abraham|T]");

        let renamed = Term::Variable(Variable::scoped(x.id, 7));
        assert_eq!(renamed.display(&ctx.interner).to_string(), "X_7");

        let test = Relation::less_than().apply(1i64, 2i64);
        assert_eq!(test.display(&ctx.interner).to_string(), "<(1, 2)");
    }

    #[test]
    fn test_relation_identity() {
        let lt = Relation::less_than();
        assert_eq!(lt, lt.clone());
        assert_ne!(lt, Relation::less_than());
        assert!(lt.test(1, 2));
        assert!(!lt.test(2, 1));
    }
}
