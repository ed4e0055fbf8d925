use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::{ast::Block, interpreter::value::core::Value};

/// Name of the root context.
pub const MAIN_CONTEXT: &str = "<main>";
/// Name given to contexts created by `lambda`.
pub const ANONYMOUS_CONTEXT: &str = "<anonymous function>";

/// Identifies a live context.
///
/// Contexts live on a stack; an id pairs the stack slot with a serial number
/// so that an id held after its activation returned is detected as stale
/// instead of silently pointing at a newer context in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId {
    slot:   usize,
    serial: u64,
}

/// How a variable name is bound when used in a context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scope {
    /// Bind in the context using the name.
    #[default]
    Auto,
    /// Bind in the root context.
    Global,
    /// Bind in the root context under a name qualified by the function name.
    Static,
}

/// One activation of a function, lambda or the main program.
#[derive(Debug)]
pub struct Context {
    /// Function name, used for static scoping and diagnostics.
    pub name:      Rc<str>,
    /// Variables bound in this activation.
    pub variables: FxHashMap<Rc<str>, Value>,
    /// Scope declarations made in this activation.
    pub scopes:    FxHashMap<Rc<str>, Scope>,
    /// The calling context.
    pub parent:    Option<ContextId>,
    /// The code this activation runs, used by `recurse`.
    pub source:    Block,
    serial:        u64,
}

impl Context {
    /// Returns the declared scope of `name`.
    #[must_use]
    pub fn scope_of(&self, name: &str) -> Scope {
        self.scopes.get(name).copied().unwrap_or_default()
    }
}

/// The chain of live contexts, innermost last.
#[derive(Debug)]
pub struct ContextStack {
    frames:      Vec<Context>,
    next_serial: u64,
}

#[allow(clippy::new_without_default)]
impl ContextStack {
    /// Creates a stack holding only the root context.
    #[must_use]
    pub fn new() -> Self {
        let root = Context { name:      Rc::from(MAIN_CONTEXT),
                             variables: FxHashMap::default(),
                             scopes:    FxHashMap::default(),
                             parent:    None,
                             source:    Rc::from(Vec::new()),
                             serial:    0, };
        Self { frames:      vec![root],
               next_serial: 1, }
    }

    /// The id of the root context.
    #[must_use]
    pub const fn root(&self) -> ContextId {
        ContextId { slot:   0,
                    serial: 0, }
    }

    /// Creates a context above every live one and returns its id.
    pub fn push(&mut self, name: Rc<str>, parent: Option<ContextId>, source: Block) -> ContextId {
        let serial = self.next_serial;
        self.next_serial += 1;
        self.frames.push(Context { name,
                                   variables: FxHashMap::default(),
                                   scopes: FxHashMap::default(),
                                   parent,
                                   source,
                                   serial });
        ContextId { slot: self.frames.len() - 1,
                    serial }
    }

    /// Destroys the innermost context. The root context is never removed.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Looks up a live context.
    #[must_use]
    pub fn get(&self, id: ContextId) -> Option<&Context> {
        self.frames.get(id.slot).filter(|frame| frame.serial == id.serial)
    }

    /// Looks up a live context for modification.
    pub fn get_mut(&mut self, id: ContextId) -> Option<&mut Context> {
        self.frames.get_mut(id.slot).filter(|frame| frame.serial == id.serial)
    }

    /// The root context.
    #[must_use]
    pub fn main(&self) -> &Context {
        &self.frames[0]
    }

    /// The root context, mutably.
    pub fn main_mut(&mut self) -> &mut Context {
        &mut self.frames[0]
    }

    /// Number of live contexts, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`: the root context cannot be removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterates over the live contexts from the root outwards.
    pub fn iter(&self) -> impl Iterator<Item = &Context> {
        self.frames.iter()
    }
}
