use crate::{
    ast::Operator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::{coerce::Numeric, core::Value},
    },
    util::num::integer_to_float,
};

impl Interpreter {
    /// Pops two operands, the right one on top, and pushes `left op right`.
    pub(super) fn arithmetic_operator(&mut self, op: Operator) -> EvalResult<()> {
        let right = self.pop_resolved()?.numeric()?;
        let left = self.pop_resolved()?.numeric()?;
        self.push(apply(op, left, right)?);
        Ok(())
    }

    /// Implements `^`. Both operands are read as floats, so `NULL` counts as
    /// zero.
    pub(super) fn power_operator(&mut self) -> EvalResult<()> {
        let exponent = self.pop_resolved()?.as_float()?;
        let base = self.pop_resolved()?.as_float()?;
        self.push(base.powf(exponent));
        Ok(())
    }

    /// Implements `++` (`delta` 1) and `--` (`delta` -1).
    ///
    /// A variable operand is updated in place and nothing is pushed; any
    /// other operand is replaced by the stepped value.
    pub(super) fn step_operator(&mut self, delta: i64) -> EvalResult<()> {
        let operand = self.pop()?;
        let stepped = match self.resolve(&operand)?.numeric()? {
            Numeric::Integer(i) => Value::Integer(i.wrapping_add(delta)),
            Numeric::Float(f) => Value::Float(f + integer_to_float(delta)),
        };

        match operand {
            Value::Variable(var) => self.assign(&var, stepped, false),
            _ => {
                self.push(stepped);
                Ok(())
            },
        }
    }
}

/// Applies an arithmetic operator to two numeric operands.
///
/// Integer pairs stay integers (wrapping on overflow) for `+`, `-` and `*`;
/// `/` and `^` always produce floats; `div` and `%` truncate both operands to
/// integers first.
///
/// # Example
/// ```
/// use stutsk::{
///     ast::Operator,
///     interpreter::{
///         evaluator::operator::arithmetic::apply,
///         value::{coerce::Numeric, core::Value},
///     },
/// };
///
/// let four = Numeric::Integer(4);
/// let two = Numeric::Integer(2);
///
/// assert_eq!(apply(Operator::Plus, four, two).unwrap(), Value::Integer(6));
/// assert_eq!(apply(Operator::Divide, four, two).unwrap(), Value::Float(2.0));
/// assert_eq!(apply(Operator::IntDivide, four, two).unwrap(), Value::Integer(2));
/// assert!(apply(Operator::Divide, four, Numeric::Integer(0)).is_err());
/// ```
pub fn apply(op: Operator, left: Numeric, right: Numeric) -> EvalResult<Value> {
    use Numeric::Integer;

    let value = match (op, left, right) {
        (Operator::Plus, Integer(a), Integer(b)) => Value::Integer(a.wrapping_add(b)),
        (Operator::Minus, Integer(a), Integer(b)) => Value::Integer(a.wrapping_sub(b)),
        (Operator::Multiply, Integer(a), Integer(b)) => Value::Integer(a.wrapping_mul(b)),
        (Operator::Plus, a, b) => Value::Float(a.to_float() + b.to_float()),
        (Operator::Minus, a, b) => Value::Float(a.to_float() - b.to_float()),
        (Operator::Multiply, a, b) => Value::Float(a.to_float() * b.to_float()),
        (Operator::Divide, a, b) => {
            let divisor = b.to_float();
            if divisor == 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Value::Float(a.to_float() / divisor)
        },
        (Operator::IntDivide, a, b) => {
            let divisor = nonzero(b)?;
            Value::Integer(a.to_integer().wrapping_div(divisor))
        },
        (Operator::Modulo, a, b) => {
            let divisor = nonzero(b)?;
            Value::Integer(a.to_integer().wrapping_rem(divisor))
        },
        (Operator::Power, a, b) => Value::Float(a.to_float().powf(b.to_float())),
        _ => return Err(RuntimeError::invalid(format!("\"{op}\" is not an arithmetic operator"))),
    };
    Ok(value)
}

fn nonzero(divisor: Numeric) -> EvalResult<i64> {
    match divisor.to_integer() {
        0 => Err(RuntimeError::DivisionByZero),
        d => Ok(d),
    }
}
