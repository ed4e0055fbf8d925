use tracing::debug;

use crate::{
    ast::Token,
    error::{Exception, RuntimeError},
    interpreter::{
        evaluator::{
            context::ContextId,
            core::{Exec, Interpreter},
            signal::Signal,
        },
        value::{compare::loose_equal, core::Value},
    },
    util::num::usize_to_integer,
};

impl Interpreter {
    /// `condition { block } if`.
    pub(super) fn if_operator(&mut self, ctx: ContextId) -> Exec<()> {
        let block = self.pop_block()?;
        if self.pop_bool()? {
            self.run(ctx, &block)?;
        }
        Ok(())
    }

    /// `condition { then } { else } ifelse`.
    pub(super) fn if_else_operator(&mut self, ctx: ContextId) -> Exec<()> {
        let otherwise = self.pop_block()?;
        let then = self.pop_block()?;
        let block = if self.pop_bool()? { then } else { otherwise };
        self.run(ctx, &block)
    }

    /// `condition a b ?` keeps `a` when the condition holds, `b` otherwise.
    pub(super) fn ternary_operator(&mut self) -> Exec<()> {
        let otherwise = self.pop()?;
        let then = self.pop()?;
        let chosen = if self.pop_bool()? { then } else { otherwise };
        self.push(chosen);
        Ok(())
    }

    /// `count { block } repeat`.
    pub(super) fn repeat_operator(&mut self, ctx: ContextId) -> Exec<()> {
        let block = self.pop_block()?;
        let count = self.pop_integer()?;
        for _ in 0..count {
            if !self.iterate(ctx, &block)? {
                break;
            }
        }
        self.end_loop();
        Ok(())
    }

    /// `{ block } forever`.
    pub(super) fn forever_operator(&mut self, ctx: ContextId) -> Exec<()> {
        let block = self.pop_block()?;
        while self.iterate(ctx, &block)? {}
        self.end_loop();
        Ok(())
    }

    /// `iterable { block } foreach`.
    ///
    /// Arrays push each element, dictionaries push each value followed by its
    /// key, and anything else pushes the characters of its string form. The
    /// iterable is snapshotted before the first iteration.
    pub(super) fn foreach_operator(&mut self, ctx: ContextId) -> Exec<()> {
        let block = self.pop_block()?;
        let iterable = self.pop_resolved()?;

        let items: Vec<Vec<Value>> = match &iterable {
            Value::Array(items) => items.borrow().iter().map(|item| vec![item.clone()]).collect(),
            Value::Dictionary(entries) => {
                entries.borrow()
                       .iter()
                       .map(|(key, value)| vec![value.clone(), Value::string(key.as_str())])
                       .collect()
            },
            other => other.as_string()?.chars().map(|c| vec![Value::string(c)]).collect(),
        };

        for pushed in items {
            self.stack.extend(pushed);
            if !self.iterate(ctx, &block)? {
                break;
            }
        }
        self.end_loop();
        Ok(())
    }

    /// `value ( ( case { block } ) ... ) switch` runs the block of the first
    /// case loosely equal to the value.
    pub(super) fn switch_operator(&mut self, ctx: ContextId) -> Exec<()> {
        let Value::Array(cases) = self.pop_resolved()? else {
            return Err(RuntimeError::ExpectedArray.into());
        };
        let value = self.pop()?;

        let cases = cases.borrow().clone();
        for case in &cases {
            let Value::Array(pair) = self.resolve(case)? else {
                return Err(RuntimeError::ExpectedArray.into());
            };
            let (candidate, block) = match pair.borrow().as_slice() {
                [candidate, block] => (candidate.clone(), block.clone()),
                _ => return Err(RuntimeError::invalid("Array of wrong length").into()),
            };
            let Value::CodeBlock(block) = self.resolve(&block)? else {
                return Err(RuntimeError::ExpectedCodeBlock.into());
            };
            if loose_equal(&*self, &value, &candidate)? {
                return self.run(ctx, &block);
            }
        }
        Ok(())
    }

    /// `{ guarded } { handler } try`.
    ///
    /// When the guarded block fails with a catchable error, the message, the
    /// line and the source name are pushed and the handler runs.
    pub(super) fn try_operator(&mut self, ctx: ContextId) -> Exec<()> {
        let handler = self.pop_block()?;
        let guarded = self.pop_block()?;

        match self.run(ctx, &guarded) {
            Err(error) if error.is_catchable() => {
                debug!(%error, "caught");
                self.push(error.message());
                self.push(usize_to_integer(error.line()));
                self.push(error.file());
                self.run(ctx, &handler)
            },
            result => result,
        }
    }

    /// `message throw`.
    pub(super) fn throw_operator(&mut self) -> Exec<()> {
        let message = self.pop_string()?;
        Err(Exception::custom(message))
    }

    /// Runs one loop iteration and reports whether the loop may go on.
    fn iterate(&mut self, ctx: ContextId, block: &[Token]) -> Exec<bool> {
        self.run(ctx, block)?;
        if self.signal == Some(Signal::Continue) {
            self.signal = None;
        }
        Ok(self.signal.is_none())
    }

    fn end_loop(&mut self) {
        if self.signal == Some(Signal::Break) {
            self.signal = None;
        }
    }
}
