use tracing::debug;

use crate::{
    ast::Operator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            context::{ContextId, Scope},
            core::{EvalResult, Interpreter},
            function::core::BUILTIN_PREFIX,
        },
        value::core::Value,
    },
};

impl Interpreter {
    /// `value $var =` and `value $var &=`.
    pub(super) fn assign_operator(&mut self, by_reference: bool) -> EvalResult<()> {
        let target = self.pop()?;
        let value = self.pop()?;
        let Value::Variable(var) = target else {
            return Err(RuntimeError::ExpectedVariable);
        };
        self.assign(&var, value, by_reference)
    }

    /// `$var @` pushes a copy of what the variable holds, without following
    /// a stored reference.
    pub(super) fn deref_operator(&mut self) -> EvalResult<()> {
        let operand = self.pop()?;
        if !operand.is_variable() {
            return Err(RuntimeError::ExpectedVariable);
        }
        let value = self.dereference(&operand)?.deep_copy();
        self.push(value);
        Ok(())
    }

    pub(super) fn scope_operator(&mut self, ctx: ContextId, scope: Scope) -> EvalResult<()> {
        let Value::Variable(var) = self.pop()? else {
            return Err(RuntimeError::ExpectedVariable);
        };
        self.declare(ctx, &var, scope);
        Ok(())
    }

    /// `{ body } "name" function`.
    pub(super) fn function_operator(&mut self) -> EvalResult<()> {
        let name = self.pop_string()?;
        let body = self.pop_block()?;
        if Operator::from_symbol(&name).is_some() || name.starts_with(BUILTIN_PREFIX) {
            return Err(RuntimeError::ReservedFunctionName { name });
        }
        debug!(function = %name, tokens = body.len(), "define");
        self.functions.insert(name.into(), body);
        Ok(())
    }

    /// Removes a variable binding, or the user function named by a string.
    pub(super) fn unset_operator(&mut self) -> EvalResult<()> {
        match self.pop()? {
            Value::Variable(var) => self.unbind(&var),
            other => {
                let name = self.resolve(&other)?.as_string()?;
                self.functions.remove(name.as_str());
            },
        }
        Ok(())
    }

    /// `container index []`.
    ///
    /// A variable container gets the indices appended to its index path so
    /// the element can still be assigned to; any other container is indexed
    /// right away.
    pub(super) fn index_operator(&mut self) -> EvalResult<()> {
        let index = self.pop_resolved()?;
        let container = self.pop()?;

        let indices = match &index {
            Value::Array(items) => {
                items.borrow()
                     .iter()
                     .map(|item| self.resolve(item)?.as_integer())
                     .collect::<EvalResult<Vec<_>>>()?
            },
            other => vec![other.as_integer()?],
        };

        if let Value::Variable(mut var) = container {
            var.index.extend(indices);
            self.push(Value::Variable(var));
            return Ok(());
        }

        let mut element = container;
        for index in indices {
            element = match element {
                Value::Array(_) | Value::String(_) => element.nth(index)?,
                other => Value::string(other.as_string()?).nth(index)?,
            };
        }
        self.push(element.deep_copy());
        Ok(())
    }
}
