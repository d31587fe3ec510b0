//! Symbol tables for constants, variables and functors
//!
//! Terms never carry their names. Every symbol is an ID handed out by an
//! [`Interner`], and names are resolved back through it when a term is
//! displayed or exported.
//!
//! Unlike a classic string interner, allocation is *not* get-or-create: each
//! call allocates a new identity, even for a name that was seen before. Two
//! constants called `a` built by separate calls are different constants and
//! will not unify. Share the returned value to refer to the same symbol.
//!
//! Each symbol type has its own ID type for type safety:
//! - `ConstantId` for constants
//! - `VariableId` for variable names
//! - `FunctorId` for functors

use std::fmt;

/// ID for an allocated constant
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstantId(pub(crate) u32);

/// ID for an allocated variable name
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(pub(crate) u32);

/// ID for an allocated functor
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctorId(pub(crate) u32);

impl ConstantId {
    /// Get the raw ID value (for debugging/serialization)
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl VariableId {
    /// Get the raw ID value (for debugging/serialization)
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl FunctorId {
    /// Get the raw ID value (for debugging/serialization)
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Name storage for a single symbol type, indexed by ID
#[derive(Debug, Clone, Default)]
struct NameArena {
    names: Vec<String>,
}

impl NameArena {
    /// Allocate a new ID for `name`
    fn alloc(&mut self, name: &str) -> u32 {
        let id = self.names.len() as u32;
        self.names.push(name.to_string());
        id
    }

    /// Resolve an ID to its name
    fn resolve(&self, id: u32) -> &str {
        self.names.get(id as usize).map(String::as_str).unwrap_or("?")
    }

    fn len(&self) -> usize {
        self.names.len()
    }
}

/// Symbol allocator for terms
///
/// Pass it through the construction context rather than relying on global
/// state. A [`crate::KnowledgeBase`] owns one.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    constants: NameArena,
    variables: NameArena,
    functors: NameArena,
}

impl Interner {
    /// Create a new empty interner
    pub fn new() -> Self {
        Self::default()
    }

    // === Constants ===

    /// Allocate a new constant identity named `name`
    pub fn alloc_constant(&mut self, name: &str) -> ConstantId {
        ConstantId(self.constants.alloc(name))
    }

    /// Resolve a constant ID to its name
    pub fn resolve_constant(&self, id: ConstantId) -> &str {
        self.constants.resolve(id.0)
    }

    /// Number of allocated constants
    pub fn constant_count(&self) -> usize {
        self.constants.len()
    }

    // === Variables ===

    /// Allocate a new variable identity named `name`
    pub fn alloc_variable(&mut self, name: &str) -> VariableId {
        VariableId(self.variables.alloc(name))
    }

    /// Resolve a variable ID to its name
    pub fn resolve_variable(&self, id: VariableId) -> &str {
        self.variables.resolve(id.0)
    }

    /// Number of allocated variables
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    // === Functors ===

    /// Allocate a new functor identity named `name`
    pub fn alloc_functor(&mut self, name: &str) -> FunctorId {
        FunctorId(self.functors.alloc(name))
    }

    /// Resolve a functor ID to its name
    pub fn resolve_functor(&self, id: FunctorId) -> &str {
        self.functors.resolve(id.0)
    }

    /// Number of allocated functors
    pub fn functor_count(&self) -> usize {
        self.functors.len()
    }
}

impl fmt::Display for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Interner({} constants, {} variables, {} functors)",
            self.constant_count(),
            self.variable_count(),
            self.functor_count()
        )
    }
}
