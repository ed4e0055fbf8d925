use crate::interpreter::evaluator::{
    context::ContextId,
    core::{Exec, Interpreter},
    function::{array, control, debug, dictionary, math, memory, stack, stdio, string, typing},
};

/// Prefix that always selects the builtin version of a function, even when a
/// user function of the same name exists.
pub const BUILTIN_PREFIX: &str = "__builtin_";

/// Type alias for builtin function handlers.
///
/// A builtin receives the interpreter and the context it was called from. It
/// pops its operands from the stack and pushes its results.
pub type BuiltinFn = fn(&mut Interpreter, ContextId) -> Exec<()>;

/// A builtin function together with the number of operands it needs.
#[derive(Clone, Copy)]
pub struct Builtin {
    /// Minimum stack height checked before `func` runs.
    pub arity: usize,
    /// The implementation.
    pub func:  BuiltinFn,
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the number of operands taken from the stack,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (table entry),
/// - `BUILTIN_TABLE` (static table the interpreter is populated from),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// An entry of the builtin table.
        pub struct BuiltinDef {
            /// Name without the builtin prefix.
            pub name:    &'static str,
            /// Arity and implementation.
            pub builtin: Builtin,
        }
        /// Every builtin the interpreter starts with.
        pub static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, builtin: Builtin { arity: $arity, func: $func } },
            )*
        ];
        /// Names of every builtin, without the builtin prefix.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    // Stack
    "swp"         => { arity: 2, func: stack::swp },
    "dmp"         => { arity: 1, func: stack::dmp },
    "dup"         => { arity: 1, func: stack::dup },
    "roll"        => { arity: 1, func: stack::roll },
    "swap"        => { arity: 1, func: stack::swap },
    "stack_count" => { arity: 0, func: stack::stack_count },
    "stack_purge" => { arity: 0, func: stack::stack_purge },
    "stack_empty" => { arity: 0, func: stack::stack_empty },

    // Program control
    "do"          => { arity: 1, func: control::run_block },
    "inherit"     => { arity: 1, func: control::inherit },
    "lambda"      => { arity: 1, func: control::lambda },
    "recurse"     => { arity: 0, func: control::recurse },
    "include"     => { arity: 1, func: control::include },
    "eval"        => { arity: 1, func: control::eval },
    "uneval"      => { arity: 1, func: control::uneval },
    "sleep"       => { arity: 1, func: control::sleep },
    "is_def"      => { arity: 1, func: control::is_def },
    "definition"  => { arity: 1, func: control::definition },
    "time"        => { arity: 1, func: control::time },
    "commandline" => { arity: 0, func: control::commandline },
    "env_get"     => { arity: 1, func: control::env_get },
    "env_list"    => { arity: 0, func: control::env_list },

    // Typing
    "is_null"       => { arity: 1, func: |it, _| typing::is_type(it, "T_EMPTY") },
    "is_array"      => { arity: 1, func: |it, _| typing::is_type(it, "T_ARRAY") },
    "is_codeblock"  => { arity: 1, func: |it, _| typing::is_type(it, "T_CODEBLOCK") },
    "is_string"     => { arity: 1, func: |it, _| typing::is_type(it, "T_STRING") },
    "is_integer"    => { arity: 1, func: |it, _| typing::is_type(it, "T_INTEGER") },
    "is_float"      => { arity: 1, func: |it, _| typing::is_type(it, "T_FLOAT") },
    "is_handle"     => { arity: 1, func: |it, _| typing::is_type(it, "T_HANDLE") },
    "is_bool"       => { arity: 1, func: |it, _| typing::is_type(it, "T_BOOL") },
    "is_dictionary" => { arity: 1, func: |it, _| typing::is_type(it, "T_DICTIONARY") },
    "is_variable"   => { arity: 1, func: typing::is_variable },
    "is_numeric"    => { arity: 1, func: typing::is_numeric },
    "__type"        => { arity: 1, func: typing::type_of },

    // Debugging
    "__dumpstack"           => { arity: 0, func: debug::dump_stack },
    "__dumpvariables"       => { arity: 0, func: debug::dump_variables },
    "__dumpglobalvariables" => { arity: 0, func: debug::dump_global_variables },

    // Standard I/O
    "print"    => { arity: 1, func: stdio::print },
    "error"    => { arity: 1, func: stdio::error },
    "readline" => { arity: 0, func: stdio::readline },
    "read"     => { arity: 1, func: stdio::read },
    "readchar" => { arity: 0, func: stdio::readchar },
    "eof"      => { arity: 0, func: stdio::eof },

    // Memory
    "length"    => { arity: 1, func: memory::length },
    "setlength" => { arity: 2, func: memory::set_length },
    "slice"     => { arity: 3, func: memory::slice },

    // Strings
    "ord"       => { arity: 1, func: string::ord },
    "chr"       => { arity: 1, func: string::chr },
    "explode"   => { arity: 2, func: string::explode },
    "pos"       => { arity: 2, func: string::pos },
    "trim"      => { arity: 1, func: string::trim },
    "uppercase" => { arity: 1, func: string::uppercase },
    "lowercase" => { arity: 1, func: string::lowercase },

    // Dictionaries
    "dictionary_new" => { arity: 0, func: dictionary::new },
    "dictionary_set" => { arity: 3, func: dictionary::set },
    "dictionary_get" => { arity: 2, func: dictionary::get },

    // Arrays
    "array_append"      => { arity: 2, func: array::append },
    "array_insert"      => { arity: 3, func: array::insert },
    "array_delete"      => { arity: 2, func: array::delete },
    "array_reverse"     => { arity: 1, func: array::reverse },
    "array_shuffle"     => { arity: 1, func: array::shuffle },
    "array_find"        => { arity: 2, func: array::find },
    "array_perform"     => { arity: 2, func: array::perform },
    "array_sort"        => { arity: 1, func: array::sort },
    "array_custom_sort" => { arity: 2, func: array::custom_sort },
    "array_pop"         => { arity: 1, func: array::pop },
    "array_push"        => { arity: 2, func: array::push },
    "array_peek"        => { arity: 1, func: array::peek },
    "array_pop_front"   => { arity: 1, func: array::pop_front },
    "array_push_front"  => { arity: 2, func: array::push_front },
    "array_peek_front"  => { arity: 1, func: array::peek_front },

    // Math
    "round"        => { arity: 1, func: |it, _| math::rounding(it, |x| (0.5 + x).trunc()) },
    "floor"        => { arity: 1, func: |it, _| math::rounding(it, f64::floor) },
    "ceil"         => { arity: 1, func: |it, _| math::rounding(it, f64::ceil) },
    "sqrt"         => { arity: 1, func: |it, _| math::float_fn(it, f64::sqrt) },
    "sin"          => { arity: 1, func: |it, _| math::float_fn(it, f64::sin) },
    "cos"          => { arity: 1, func: |it, _| math::float_fn(it, f64::cos) },
    "tan"          => { arity: 1, func: |it, _| math::float_fn(it, f64::tan) },
    "sinh"         => { arity: 1, func: |it, _| math::float_fn(it, f64::sinh) },
    "cosh"         => { arity: 1, func: |it, _| math::float_fn(it, f64::cosh) },
    "tanh"         => { arity: 1, func: |it, _| math::float_fn(it, f64::tanh) },
    "asin"         => { arity: 1, func: |it, _| math::float_fn(it, f64::asin) },
    "acos"         => { arity: 1, func: |it, _| math::float_fn(it, f64::acos) },
    "atan"         => { arity: 1, func: |it, _| math::float_fn(it, f64::atan) },
    "asinh"        => { arity: 1, func: |it, _| math::float_fn(it, f64::asinh) },
    "acosh"        => { arity: 1, func: |it, _| math::float_fn(it, f64::acosh) },
    "atanh"        => { arity: 1, func: |it, _| math::float_fn(it, f64::atanh) },
    "log"          => { arity: 1, func: |it, _| math::float_fn(it, f64::ln) },
    "log10"        => { arity: 1, func: |it, _| math::float_fn(it, f64::log10) },
    "abs"          => { arity: 1, func: math::abs },
    "max"          => { arity: 1, func: |it, _| math::extreme(it, std::cmp::Ordering::Greater) },
    "min"          => { arity: 1, func: |it, _| math::extreme(it, std::cmp::Ordering::Less) },
    "pi"           => { arity: 0, func: |it, _| math::constant(it, std::f64::consts::PI) },
    "euler"        => { arity: 0, func: |it, _| math::constant(it, std::f64::consts::E) },
    "from_base"    => { arity: 2, func: math::from_base },
    "to_base"      => { arity: 2, func: math::to_base },
    "random"       => { arity: 1, func: math::random },
    "random_float" => { arity: 0, func: math::random_float },
}
