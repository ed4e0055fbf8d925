use std::cmp::Ordering;

use pretty_assertions::assert_eq;
use stutsk::{
    error::RuntimeError,
    interpreter::value::{
        coerce::{Gcd, Numeric, checked_index},
        compare::{Detached, loose_equal, numeric_compare, strict_equal},
        core::Value,
    },
    util::num::format_float,
};

#[test]
fn gcd_reduction() {
    assert_eq!(Value::string("42").gcd(), Gcd::Integer(42));
    assert_eq!(Value::string("4.5").gcd(), Gcd::Float(4.5));
    assert_eq!(Value::string("abc").gcd(), Gcd::String("abc".to_owned()));
    assert_eq!(Value::string("").gcd(), Gcd::String(String::new()));
    assert_eq!(Value::Bool(true).gcd(), Gcd::Integer(1));
    assert_eq!(Value::Float(1.0).gcd(), Gcd::Float(1.0));
    assert_eq!(Value::array(Vec::new()).gcd(), Gcd::Invalid);
    assert_eq!(Value::Empty.gcd(), Gcd::Invalid);
}

#[test]
fn numeric_operands() {
    assert_eq!(Value::string("7").numeric().unwrap(), Numeric::Integer(7));
    assert_eq!(Numeric::Float(2.9).to_integer(), 2);
    assert_eq!(Numeric::Integer(3).to_float(), 3.0);
    assert_eq!(Value::string("seven").numeric(), Err(RuntimeError::NotNumeric));
}

#[test]
fn conversions() {
    assert_eq!(Value::Float(-2.7).as_integer().unwrap(), -2);
    assert_eq!(Value::Bool(true).as_float().unwrap(), 1.0);
    assert_eq!(Value::string("2").as_float().unwrap(), 2.0);
    assert_eq!(Value::Integer(-4).as_string().unwrap(), "-4");
    assert_eq!(Value::Float(0.5).as_string().unwrap(), "0.5");
    assert!(!Value::string("").as_bool().unwrap());
    assert!(Value::string("0").as_bool().unwrap());
    assert!(!Value::Float(0.0).as_bool().unwrap());

    assert_eq!(Value::array(Vec::new()).as_string(),
               Err(RuntimeError::TypeConversion { from: "T_ARRAY",
                                                  to:   "T_STRING", }));
    assert!(Value::dictionary().as_bool().is_err());
}

#[test]
fn loose_equality() {
    let cases = [(Value::Integer(1), Value::string("1"), true),
                 (Value::Integer(1), Value::string("1.0"), true),
                 (Value::string("abc"), Value::string("abc"), true),
                 (Value::string("abc"), Value::Integer(1), false),
                 (Value::Float(0.5), Value::string("0.5"), true),
                 (Value::Bool(false), Value::Integer(0), true),
                 (Value::Empty, Value::Empty, true)];

    for (left, right, expected) in cases {
        assert_eq!(loose_equal(&Detached, &left, &right).unwrap(),
                   expected,
                   "{left:?} == {right:?}");
    }
}

#[test]
fn loose_equality_of_incomparable_values_fails() {
    assert_eq!(loose_equal(&Detached, &Value::Integer(1), &Value::dictionary()),
               Err(RuntimeError::NotComparable));
    assert_eq!(loose_equal(&Detached, &Value::Empty, &Value::Integer(0)),
               Err(RuntimeError::NotComparable));
}

#[test]
fn dictionaries_compare_by_identity() {
    let dictionary = Value::dictionary();

    assert!(loose_equal(&Detached, &dictionary, &dictionary.clone()).unwrap());
    assert!(!loose_equal(&Detached, &dictionary, &Value::dictionary()).unwrap());
    assert!(strict_equal(&dictionary, &dictionary.deep_copy()));
}

#[test]
fn strict_equality() {
    assert!(!strict_equal(&Value::Integer(1), &Value::string("1")));
    assert!(strict_equal(&Value::Integer(1), &Value::Bool(true)));
    assert!(!strict_equal(&Value::Integer(2), &Value::Bool(true)));
    assert!(!strict_equal(&Value::Integer(1), &Value::Float(1.0)));
    assert!(strict_equal(&Value::Empty, &Value::Empty));
    assert!(strict_equal(&Value::string("a"), &Value::string("a")));
    assert!(!strict_equal(&Value::variable("a"), &Value::variable("b")));
}

#[test]
fn numeric_ordering() {
    let ord = |a: Value, b: Value| numeric_compare(&Detached, &a, &b).unwrap();

    assert_eq!(ord(Value::Integer(1), Value::Integer(2)), Ordering::Less);
    assert_eq!(ord(Value::Float(2.0), Value::Integer(2)), Ordering::Equal);
    assert_eq!(ord(Value::string("3"), Value::Float(2.5)), Ordering::Greater);
    assert_eq!(ord(Value::Integer(i64::MAX), Value::Integer(i64::MAX - 1)), Ordering::Greater);
}

#[test]
fn unbound_variables_fail_to_resolve_detached() {
    assert_eq!(numeric_compare(&Detached, &Value::variable("x"), &Value::Integer(1)),
               Err(RuntimeError::UndefinedVariable { name: "x".to_owned() }));
}

#[test]
fn deep_copies_do_not_alias() {
    let inner = Value::array(vec![Value::string("a")]);
    let original = Value::array(vec![inner, Value::Integer(1)]);
    let copy = original.deep_copy();
    assert_eq!(copy, original);

    if let Value::Array(items) = &copy {
        if let Value::Array(inner) = &items.borrow()[0] {
            inner.borrow_mut().push(Value::Integer(2));
        }
        items.borrow_mut().push(Value::Empty);
    }

    assert_eq!(original,
               Value::array(vec![Value::array(vec![Value::string("a")]), Value::Integer(1)]));
}

#[test]
fn clones_share_storage() {
    let original = Value::string("a");
    let alias = original.clone();

    if let Value::String(text) = &alias {
        text.borrow_mut().push('b');
    }

    assert_eq!(original, Value::string("ab"));
}

#[test]
fn element_access() {
    let array = Value::array(vec![Value::Integer(1), Value::Integer(2)]);

    assert_eq!(array.nth(1).unwrap(), Value::Integer(2));
    assert_eq!(array.nth(2), Err(RuntimeError::IndexOverflow { container: "Array" }));
    assert_eq!(array.nth(-1), Err(RuntimeError::IndexUnderflow { container: "Array" }));
    assert_eq!(Value::string("héllo").nth(1).unwrap(), Value::string("é"));
    assert_eq!(checked_index(0, 0, "String"),
               Err(RuntimeError::IndexOverflow { container: "String" }));
}

#[test]
fn type_names() {
    let names = [Value::Empty,
                 Value::Integer(0),
                 Value::Bool(false),
                 Value::Float(0.0),
                 Value::string(""),
                 Value::array(Vec::new()),
                 Value::dictionary(),
                 Value::variable("v"),
                 Value::call("f"),
                 Value::code_block(Vec::new())].iter()
                                               .map(Value::type_name)
                                               .collect::<Vec<_>>();

    assert_eq!(names,
               ["T_EMPTY",
                "T_INTEGER",
                "T_BOOL",
                "T_FLOAT",
                "T_STRING",
                "T_ARRAY",
                "T_DICTIONARY",
                "T_VARIABLE",
                "T_FUNCCALL",
                "T_CODEBLOCK"]);
}

#[test]
fn float_display() {
    assert_eq!(format_float(3.0), "3");
    assert_eq!(format_float(-0.25), "-0.25");
    assert_eq!(format_float(123_456.7), "123457");
    assert_eq!(format_float(1_234_567.0), "1.23457e+06");
    assert_eq!(format_float(f64::INFINITY), "inf");
}
