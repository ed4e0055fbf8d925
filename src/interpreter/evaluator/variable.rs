use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            context::{ContextId, Scope},
            core::{EvalResult, Interpreter},
        },
        value::{
            coerce::checked_index,
            compare::Resolve,
            core::{Value, Variable},
        },
    },
};

/// Upper bound on the variable hops a single resolution may take.
///
/// Reference assignment can make a variable point at itself; this turns such
/// cycles into an error instead of an endless loop.
const MAX_INDIRECTION: usize = 1024;

/// Separator between a variable name and its function in static bindings.
pub const STATIC_SEPARATOR: char = '$';

impl Interpreter {
    /// Binds a parsed variable to the context selected by its scope
    /// declaration in `ctx`.
    pub(crate) fn bind(&self, ctx: ContextId, var: &Variable) -> Value {
        let context = self.frame(ctx);
        let (name, owner) = match context.scope_of(&var.name) {
            Scope::Auto => (Rc::clone(&var.name), ctx),
            Scope::Global => (Rc::clone(&var.name), self.root()),
            Scope::Static => {
                let mangled = format!("{}{STATIC_SEPARATOR}{}", var.name, context.name);
                (Rc::from(mangled), self.root())
            },
        };
        Value::Variable(Box::new(Variable { name,
                                            context: Some(owner),
                                            index: var.index.clone() }))
    }

    /// Fully resolves `value`.
    ///
    /// Variables are looked up in their owning context, chains of variables
    /// are followed and index paths are applied. Anything else is returned
    /// as it is.
    pub fn resolve(&self, value: &Value) -> EvalResult<Value> {
        let mut budget = MAX_INDIRECTION;
        self.resolve_within(value, &mut budget)
    }

    fn resolve_within(&self, value: &Value, budget: &mut usize) -> EvalResult<Value> {
        let mut current = value.clone();
        loop {
            match current {
                Value::Variable(var) => current = self.lookup(&var, budget)?,
                other => return Ok(other),
            }
        }
    }

    /// Resolves a single level of indirection, as `@` does.
    ///
    /// The stored value is returned even if it is another variable; the index
    /// path is still applied.
    pub fn dereference(&self, value: &Value) -> EvalResult<Value> {
        match value {
            Value::Variable(var) => {
                let mut budget = MAX_INDIRECTION;
                self.lookup(var, &mut budget)
            },
            other => Ok(other.clone()),
        }
    }

    fn lookup(&self, var: &Variable, budget: &mut usize) -> EvalResult<Value> {
        if *budget == 0 {
            return Err(RuntimeError::invalid(format!("Variable \"{}\" refers to itself",
                                                     var.name)));
        }
        *budget -= 1;

        let mut value = self.stored(var)?;
        for &index in &var.index {
            value = self.resolve_within(&value, budget)?.nth(index)?;
        }
        Ok(value)
    }

    /// The value stored under the variable's name, without following
    /// references or applying its index path.
    fn stored(&self, var: &Variable) -> EvalResult<Value> {
        let undefined = || RuntimeError::UndefinedVariable { name: var.name.to_string() };
        let owner = var.context.ok_or_else(undefined)?;
        let context = self.contexts
                          .get(owner)
                          .ok_or_else(|| RuntimeError::DeadContext { name: var.name.to_string() })?;
        context.variables.get(&var.name).cloned().ok_or_else(undefined)
    }

    /// Returns `true` if `var` resolves without error.
    #[must_use]
    pub fn is_bound(&self, var: &Variable) -> bool {
        self.resolve(&Value::Variable(Box::new(var.clone()))).is_ok()
    }

    /// Stores `value` through the variable reference `var`.
    ///
    /// Unless `by_reference` is set, `value` is resolved and deep-copied
    /// first. With an index path, the element addressed by the path is
    /// replaced inside the resolved container; strings accept exactly one
    /// character.
    ///
    /// # Errors
    /// - `TypeMismatch` when assigning a non-character into a string, or into
    ///   anything that is neither an array nor a string.
    /// - `IndexUnderflow` / `IndexOverflow` for out-of-range indices.
    pub fn assign(&mut self, var: &Variable, value: Value, by_reference: bool) -> EvalResult<()> {
        let value = if by_reference { value } else { self.resolve(&value)?.deep_copy() };

        let Some((&last, path)) = var.index.split_last() else {
            let owner = var.context
                           .ok_or_else(|| RuntimeError::UndefinedVariable { name: var.name.to_string() })?;
            let context = self.contexts
                              .get_mut(owner)
                              .ok_or_else(|| RuntimeError::DeadContext { name: var.name.to_string() })?;
            context.variables.insert(Rc::clone(&var.name), value);
            return Ok(());
        };

        let parent = Variable { name:    Rc::clone(&var.name),
                                context: var.context,
                                index:   path.to_vec(), };
        let container = self.resolve(&Value::Variable(Box::new(parent)))?;

        match container {
            Value::Array(items) => {
                let mut items = items.borrow_mut();
                let position = checked_index(last, items.len(), "Array")?;
                items[position] = value;
                Ok(())
            },
            Value::String(text) if !by_reference => {
                let replacement = value.as_string()?;
                let mut chars = replacement.chars();
                let (Some(c), None) = (chars.next(), chars.next()) else {
                    return Err(RuntimeError::mismatch("Left side is not a char"));
                };
                let mut text = text.borrow_mut();
                let position = checked_index(last, text.chars().count(), "String")?;
                *text = text.chars()
                            .enumerate()
                            .map(|(i, old)| if i == position { c } else { old })
                            .collect();
                Ok(())
            },
            _ => Err(RuntimeError::mismatch("Right side cannot be assigned to")),
        }
    }

    /// Removes the binding `var` refers to. Missing bindings are ignored.
    pub fn unbind(&mut self, var: &Variable) {
        if let Some(context) = var.context.and_then(|owner| self.contexts.get_mut(owner)) {
            context.variables.remove(&var.name);
        }
    }

    /// Records a scope declaration for `var` in the context `ctx`.
    ///
    /// Static bindings are recorded under the plain variable name.
    pub(crate) fn declare(&mut self, ctx: ContextId, var: &Variable, scope: Scope) {
        let name = var.name.split(STATIC_SEPARATOR).next().unwrap_or(&var.name);
        if let Some(context) = self.contexts.get_mut(ctx) {
            context.scopes.insert(Rc::from(name), scope);
        }
    }
}

impl Resolve for Interpreter {
    fn resolve(&self, value: &Value) -> EvalResult<Value> {
        Self::resolve(self, value)
    }
}
