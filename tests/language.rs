use std::{
    cell::RefCell,
    fs,
    io::{self, Cursor, Write},
    path::Path,
    rc::Rc,
};

use pretty_assertions::assert_eq;
use stutsk::{
    ast::Token,
    error::{ErrorKind, Exception, ParseError, RuntimeError},
    get_result,
    interpreter::{
        config::Config,
        evaluator::{
            context::ContextId,
            core::{Exec, Interpreter, Outcome},
            hook::{ExecutionHook, HookAction, TracingHook},
        },
        parser::serialize::escape,
        value::core::Value,
    },
    run_file,
};
use walkdir::WalkDir;

#[test]
fn script_files_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "stk"))
    {
        count += 1;
        let path = entry.path();
        let config = Config::default().with_include_path("tests/scripts");
        match run_file(path, config) {
            Ok(Outcome::Completed) => {},
            Ok(Outcome::Halted) => panic!("Script {path:?} halted"),
            Err(e) => panic!("Script {path:?} failed:\n{e}"),
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn assert_success(src: &str) {
    if let Err(e) = get_result(src) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if get_result(src).is_ok() {
        panic!("Script succeeded but was expected to fail: {src}")
    }
}

fn stack_of(src: &str) -> Vec<Value> {
    get_result(src).unwrap_or_else(|e| panic!("Script failed: {e}"))
}

fn error_of(src: &str) -> Exception {
    match get_result(src) {
        Ok(stack) => panic!("Script succeeded with {stack:?} but was expected to fail"),
        Err(e) => e,
    }
}

/// Runs `src` with `input` as standard input and returns what it printed
/// together with the final stack.
fn run_with_input(src: &str, input: impl AsRef<[u8]>) -> (String, Vec<Value>) {
    let output = SharedBuffer::default();
    let mut interpreter = Interpreter::new().with_io(output.clone(),
                                                     io::sink(),
                                                     Cursor::new(input.as_ref().to_vec()));
    if let Err(e) = interpreter.execute("<test>", src) {
        panic!("Script failed: {e}");
    }
    (output.contents(), interpreter.stack().to_vec())
}

fn output_of(src: &str) -> String {
    run_with_input(src, "").0
}

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::Integer).collect()
}

fn strings(values: &[&str]) -> Vec<Value> {
    values.iter().copied().map(Value::string).collect()
}

#[test]
fn integer_arithmetic_stays_integral() {
    assert_eq!(stack_of("2 3 +"), ints(&[5]));
    assert_eq!(stack_of("8 5 -"), ints(&[3]));
    assert_eq!(stack_of("7 9 *"), ints(&[63]));
    assert_eq!(stack_of("4 2 div"), ints(&[2]));
    assert_eq!(stack_of("-7 2 div"), ints(&[-3]));
    assert_eq!(stack_of("7 2 %"), ints(&[1]));
    assert_eq!(stack_of("\"4\" 1 +"), ints(&[5]));
    assert_eq!(stack_of("TRUE 1 +"), ints(&[2]));
}

#[test]
fn division_and_power_produce_floats() {
    assert_eq!(stack_of("4 2 /"), vec![Value::Float(2.0)]);
    assert_eq!(stack_of("2 3 ^"), vec![Value::Float(8.0)]);
    assert_eq!(stack_of("2.5 2 *"), vec![Value::Float(5.0)]);
    assert_eq!(stack_of("\"1.5\" 1 +"), vec![Value::Float(2.5)]);
}

#[test]
fn division_by_zero_fails() {
    for src in ["1 0 /", "1 0.0 /", "1 0 div", "1 0 %"] {
        let error = error_of(src);
        assert_eq!(error.kind, ErrorKind::Runtime(RuntimeError::DivisionByZero));
    }
}

#[test]
fn integer_overflow_wraps() {
    assert_eq!(stack_of("9223372036854775807 1 +"), ints(&[i64::MIN]));
}

#[test]
fn non_numeric_operands_fail() {
    assert_failure("\"abc\" 1 +");
    assert_failure("( 1 ) 1 +");
    assert_failure("\"abc\" 1 <");
    assert_failure("1 +");
}

#[test]
fn comparisons() {
    assert_eq!(stack_of("1 2 < 2 2 <= 3 2 > 2 3 >="),
               vec![Value::Bool(true), Value::Bool(true), Value::Bool(true), Value::Bool(false)]);
    assert_eq!(stack_of("\"10\" 9 >"), vec![Value::Bool(true)]);
    assert_eq!(stack_of("1 \"1\" == 1 \"1\" === 1 TRUE ==="),
               vec![Value::Bool(true), Value::Bool(false), Value::Bool(true)]);
    assert_eq!(stack_of("\"abc\" \"abd\" != 2 2.0 =="),
               vec![Value::Bool(true), Value::Bool(true)]);
    assert_eq!(stack_of("( 1 2 ) ( 1 \"2\" ) == ( 1 2 ) ( 1 \"2\" ) ==="),
               vec![Value::Bool(true), Value::Bool(false)]);
}

#[test]
fn strict_equality_compares_variable_bindings() {
    assert_eq!(stack_of("5 $a = 5 $b = $a $b === $a $a === $a 0 [] $a ==="),
               vec![Value::Bool(false), Value::Bool(true), Value::Bool(false)]);
    assert_eq!(stack_of("5 $a = 5 $b = $a $b =="), vec![Value::Bool(true)]);
}

#[test]
fn power_reads_operands_as_floats() {
    assert_eq!(stack_of("2 10 ^ NULL 2 ^ \"3\" 2 ^"),
               vec![Value::Float(1024.0), Value::Float(0.0), Value::Float(9.0)]);
}

#[test]
fn logic_evaluates_both_sides() {
    assert_eq!(stack_of("TRUE FALSE && TRUE FALSE || 0 !"),
               vec![Value::Bool(false), Value::Bool(true), Value::Bool(true)]);
    assert_eq!(stack_of("\"\" ! 1.5 !"), vec![Value::Bool(true), Value::Bool(false)]);
}

#[test]
fn concatenation_uses_string_forms() {
    assert_eq!(stack_of("\"ab\" 12 . 1.5 \"x\" . TRUE NULL ."),
               strings(&["ab12", "1.5x", "TRUE"]));
}

#[test]
fn variables_and_assignment() {
    assert_eq!(stack_of("5 $x = $x 1 +"), ints(&[6]));
    assert_failure("$y 1 +");
    assert_failure("5 6 =");
}

#[test]
fn assignment_copies_arrays() {
    let stack = stack_of("( 1 2 ) $a = $a $b = 9 $b 0 [] = $a @ $b @");

    assert_eq!(stack, vec![Value::array(ints(&[1, 2])), Value::array(ints(&[9, 2]))]);
}

#[test]
fn copies_are_not_aliased() {
    let stack = stack_of("( ( 1 ) ) $a = $a @ $b = 5 $b ( 0 0 ) [] = $a @");

    assert_eq!(stack, vec![Value::array(vec![Value::array(ints(&[1]))])]);
}

#[test]
fn reference_assignment_follows_the_target() {
    assert_eq!(stack_of("5 $x = $x $r &= 6 $x = $r 1 +"), ints(&[7]));
}

#[test]
fn self_reference_is_detected() {
    assert_failure("$x $x &= $x 1 +");
}

#[test]
fn indexing() {
    assert_eq!(stack_of("( 10 20 30 ) 1 []"), ints(&[20]));
    assert_eq!(stack_of("\"abc\" 2 []"), strings(&["c"]));
    assert_eq!(stack_of("( ( 1 2 ) ( 3 4 ) ) ( 1 0 ) []"), ints(&[3]));
    assert_eq!(stack_of("( 1 ( 2 3 ) ) $a = $a 1 [] 1 [] @"), ints(&[3]));
    assert_eq!(stack_of("\"abc\" $s = \"X\" $s 1 [] = $s @"), strings(&["aXc"]));

    assert_eq!(error_of("( 1 2 ) 2 []").kind,
               ErrorKind::Runtime(RuntimeError::IndexOverflow { container: "Array" }));
    assert_eq!(error_of("( 1 2 ) -1 []").kind,
               ErrorKind::Runtime(RuntimeError::IndexUnderflow { container: "Array" }));
    assert_failure("\"abc\" $s = \"XY\" $s 1 [] =");
}

#[test]
fn array_literals_execute_their_contents() {
    assert_eq!(stack_of("3 $x = ( 1 2 $x + )"), vec![Value::array(ints(&[1, 5]))]);
    assert_eq!(stack_of("( )"), vec![Value::array(Vec::new())]);
    assert_eq!(stack_of("( 1 ( 2 ) )"),
               vec![Value::array(vec![Value::Integer(1), Value::array(ints(&[2]))])]);
}

#[test]
fn end_to_end_addition_leaves_one_integer() {
    let mut interpreter = Interpreter::new();
    interpreter.execute("<test>", "2 3 +").unwrap();

    assert_eq!(interpreter.stack(), &[Value::Integer(5)]);
}

#[test]
fn conditionals() {
    assert_eq!(stack_of("1 { \"yes\" } if"), strings(&["yes"]));
    assert_eq!(stack_of("0 { \"yes\" } if"), Vec::new());
    assert_eq!(stack_of("FALSE { 1 } { 2 } ifelse"), ints(&[2]));
    assert_eq!(stack_of("TRUE \"a\" \"b\" ?"), strings(&["a"]));
    assert_failure("1 2 if");
}

#[test]
fn repeat_runs_the_block_count_times() {
    assert_eq!(stack_of("0 $i = 3 { $i ++ } repeat $i @"), ints(&[3]));
    assert_eq!(stack_of("7 3 { } repeat"), ints(&[7]));
    assert_eq!(stack_of("0 $i = 10 { $i ++ $i 3 == { break } if } repeat $i @"),
               ints(&[3]));
}

#[test]
fn continue_skips_to_the_next_iteration() {
    let src = "0 $s = 0 $i = 5 { $i ++ $i 2 % 0 == { continue } if $s $i + $s = } repeat $s @";
    assert_eq!(stack_of(src), ints(&[9]));
}

#[test]
fn break_does_not_escape_the_loop() {
    assert_eq!(stack_of("2 { 1 { break } repeat 5 } repeat"), ints(&[5, 5]));
}

#[test]
fn forever_stops_on_break() {
    assert_eq!(stack_of("0 $i = { $i ++ $i 5 >= { break } if } forever $i @"),
               ints(&[5]));
}

#[test]
fn foreach_iterates_arrays_strings_and_dictionaries() {
    assert_eq!(stack_of("0 $s = ( 1 2 3 ) { $s + $s = } foreach $s @"), ints(&[6]));
    assert_eq!(stack_of("\"abc\" { } foreach"), strings(&["a", "b", "c"]));
    assert_eq!(stack_of("dictionary_new \"b\" 2 dictionary_set \"a\" 1 dictionary_set { } foreach"),
               vec![Value::Integer(1),
                    Value::string("a"),
                    Value::Integer(2),
                    Value::string("b")]);
}

#[test]
fn switch_runs_the_first_matching_case() {
    let cases = "( ( 1 { \"one\" } ) ( \"2\" { \"two\" } ) ( 2 { \"late\" } ) ) switch";
    assert_eq!(stack_of(&format!("2 {cases}")), strings(&["two"]));
    assert_eq!(stack_of(&format!("3 {cases}")), Vec::new());
    assert_failure("1 ( ( 1 ) ) switch");
}

#[test]
fn functions() {
    assert_eq!(stack_of("{ 2 * } \"double\" function 21 double"), ints(&[42]));
    assert_eq!(stack_of("{ 1 exit 2 } \"f\" function f"), ints(&[1]));
    assert_failure("undefined_function");
}

#[test]
fn recursive_functions() {
    let src = "{ $n = $n 1 <= { 1 } { $n 1 - fact $n * } ifelse } \"fact\" function 5 fact";
    assert_eq!(stack_of(src), ints(&[120]));
}

#[test]
fn reserved_function_names_are_rejected() {
    assert_failure("{ } \"if\" function");
    assert_failure("{ } \"__builtin_length\" function");
}

#[test]
fn user_functions_shadow_builtins() {
    assert_eq!(stack_of("{ \"mine\" } \"length\" function \"abc\" length"),
               strings(&["abc", "mine"]));
    assert_eq!(stack_of("{ \"mine\" } \"length\" function \"abc\" __builtin_length"),
               ints(&[3]));
    assert_eq!(stack_of("{ } \"length\" function \"length\" unset \"abc\" length"),
               ints(&[3]));
}

#[test]
fn static_variables_persist_per_function() {
    let src = "{ $n static $n is_def ! { 0 $n = } if $n ++ $n @ } \"counter\" function
               { $n static $n is_def ! { 100 $n = } if $n ++ $n @ } \"other\" function
               { counter } \"indirect\" function
               counter dmp indirect other counter";

    assert_eq!(stack_of(src), ints(&[2, 101, 3]));
}

#[test]
fn local_variables_die_with_their_context() {
    assert_eq!(stack_of("{ 5 $x = } \"f\" function f $x is_def"),
               vec![Value::Bool(false)]);
    assert_eq!(stack_of("{ $x } \"f\" function 1 $x = f is_def"), vec![Value::Bool(false)]);
}

#[test]
fn global_variables_bind_in_the_root() {
    assert_eq!(stack_of("{ $g global 7 $g = } \"f\" function f $g @"), ints(&[7]));
}

#[test]
fn unset_removes_bindings() {
    assert_eq!(stack_of("1 $x = $x unset $x is_def"), vec![Value::Bool(false)]);
}

#[test]
fn inherit_runs_in_the_caller() {
    assert_eq!(stack_of("{ { 9 $v = } inherit } \"setv\" function setv $v @"),
               ints(&[9]));
    assert_eq!(error_of("{ 1 } inherit").kind,
               ErrorKind::Runtime(RuntimeError::NoParentContext));
}

#[test]
fn variables_of_finished_calls_are_dead() {
    let error = error_of("{ 5 $x = $x } \"f\" function { 0 $y = 1 + } \"g\" function f g");
    assert_eq!(error.kind,
               ErrorKind::Runtime(RuntimeError::DeadContext { name: "x".to_owned() }));
    assert_eq!(stack_of("{ 5 $x = $x @ } \"f\" function f 1 +"), ints(&[6]));
}

#[test]
fn lambda_gets_its_own_context() {
    assert_eq!(stack_of("{ 1 $t = 5 exit 6 } lambda $t is_def"),
               vec![Value::Integer(5), Value::Bool(false)]);
}

#[test]
fn recurse_reruns_the_current_function() {
    let src = "{ $n = $n 0 > { $n @ $n 1 - recurse } if } \"down\" function 3 down";
    assert_eq!(stack_of(src), ints(&[3, 2, 1]));
}

#[test]
fn try_catches_custom_errors() {
    assert_eq!(stack_of("{ \"boom\" throw } { } try"),
               vec![Value::string("boom"), Value::Integer(1), Value::string("<input>")]);
}

#[test]
fn try_catches_runtime_and_parse_errors() {
    assert_eq!(stack_of("{ 1 0 / } { dmp dmp } try"), strings(&["Division by zero"]));
    assert_eq!(stack_of(r#"{ "\"abc" eval } { dmp dmp } try"#),
               strings(&["Unterminated string"]));
    assert_eq!(stack_of("{ 1 } { \"handler\" } try"), ints(&[1]));
}

#[test]
fn errors_inside_handlers_propagate() {
    assert_failure("{ 1 0 / } { dmp dmp dmp \"again\" throw } try");
}

#[test]
fn uncaught_throw_reports_location() {
    let error = error_of("1\n\"bad\" throw");

    assert_eq!(error.kind, ErrorKind::Custom("bad".to_owned()));
    assert_eq!(error.line(), 2);
    assert_eq!(error.to_string(), "<input>:2: exception: bad");
}

#[test]
fn runtime_errors_report_location() {
    let error = error_of("1 2 +\n  $x 1 +");

    assert_eq!(error.file(), "<input>");
    assert_eq!(error.line(), 2);
    assert_eq!(error.to_string(), "<input>:2: error: Variable \"x\" is not defined");
}

#[test]
fn errors_inside_functions_report_the_failing_token() {
    let error = error_of("{\n  1 0 /\n} \"f\" function\nf");
    assert_eq!(error.line(), 2);
}

#[test]
fn parse_errors() {
    assert_eq!(error_of("\"abc").kind,
               ErrorKind::Parse(ParseError::UnterminatedString { line: 1 }));
    assert_eq!(error_of("1\n( 1\n2").kind,
               ErrorKind::Parse(ParseError::UnterminatedArray { line: 2 }));
    assert_eq!(error_of("{ 1").kind,
               ErrorKind::Parse(ParseError::UnterminatedCodeBlock { line: 1 }));
    assert_eq!(error_of("$a-b").kind,
               ErrorKind::Parse(ParseError::InvalidVariableCharacter { character: '-',
                                                                       line:      1, }));
    assert_eq!(error_of(r#""\q""#).kind,
               ErrorKind::Parse(ParseError::BadEscape { escape: 'q',
                                                        line:   1, }));
    assert_eq!(error_of("\"abc").to_string(),
               "<input>:1: parser error: Unterminated string");
}

#[test]
fn parse_errors_prevent_execution() {
    let output = SharedBuffer::default();
    let mut interpreter = Interpreter::new().with_io(output.clone(), io::sink(), io::empty());

    assert!(interpreter.execute("<test>", "\"ran\" print {").is_err());
    assert_eq!(output.contents(), "");
}

#[test]
fn halt_stops_the_program() {
    let mut interpreter = Interpreter::new();
    let outcome = interpreter.execute("<test>", "1 { halt } \"stop\" function stop 2").unwrap();

    assert_eq!(outcome, Outcome::Halted);
    assert_eq!(interpreter.stack(), &[Value::Integer(1)]);
}

#[test]
fn stray_signals_end_the_program_successfully() {
    for src in ["1 break 2", "1 continue 2", "1 exit 2"] {
        let mut interpreter = Interpreter::new();
        assert_eq!(interpreter.execute("<test>", src).unwrap(), Outcome::Completed);
        assert_eq!(interpreter.stack(), &[Value::Integer(1)]);
    }
}

#[test]
fn runaway_recursion_is_fatal_and_uncatchable() {
    let mut interpreter = Interpreter::with_config(Config::default().with_max_depth(50));
    let error = interpreter.execute("<test>", "{ { f } \"f\" function f } { \"caught\" } try")
                           .unwrap_err();

    assert!(matches!(error.kind, ErrorKind::Fatal(_)));
    assert!(!error.is_catchable());
}

#[test]
fn state_persists_between_runs() {
    let mut interpreter = Interpreter::new();
    interpreter.execute("first", "{ 1 + } \"inc\" function 41 $x =").unwrap();
    interpreter.execute("second", "$x inc").unwrap();

    assert_eq!(interpreter.stack(), &[Value::Integer(42)]);
}

struct StepLimit {
    remaining: usize,
}

impl ExecutionHook for StepLimit {
    fn step(&mut self, _: &Interpreter, _: &Token) -> HookAction {
        if self.remaining == 0 {
            return HookAction::Terminate;
        }
        self.remaining -= 1;
        HookAction::Continue
    }
}

#[test]
fn hooks_can_terminate_execution() {
    let mut interpreter = Interpreter::new().with_hook(StepLimit { remaining: 100 });

    assert_eq!(interpreter.execute("<test>", "{ 1 dmp } forever").unwrap(),
               Outcome::Halted);
}

#[test]
fn tracing_hook_observes_without_interfering() {
    let mut interpreter = Interpreter::new().with_hook(TracingHook);
    interpreter.execute("<test>", "{ 2 * } \"double\" function 21 double").unwrap();

    assert_eq!(interpreter.stack(), &[Value::Integer(42)]);
}

fn answer(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let offset = interpreter.pop_integer()?;
    interpreter.push(42 + offset);
    Ok(())
}

#[test]
fn embedders_can_register_builtins() {
    let mut interpreter = Interpreter::new();
    interpreter.register_builtin("answer", 1, answer);
    interpreter.execute("<test>", "1 answer \"answer\" is_def").unwrap();

    assert_eq!(interpreter.stack(), &[Value::Integer(43), Value::Bool(true)]);
    assert!(interpreter.execute("<test>", "stack_purge answer").is_err());
}

#[test]
fn reset_forgets_everything() {
    let mut interpreter = Interpreter::new();
    interpreter.execute("<test>", "1 $x = { } \"f\" function 5").unwrap();
    interpreter.reset();
    interpreter.execute("<test>", "$x is_def \"f\" is_def stack_count").unwrap();

    assert_eq!(interpreter.stack(),
               &[Value::Bool(false), Value::Bool(false), Value::Integer(2)]);
    assert_eq!(interpreter.depth(), 1);
}

#[test]
fn stack_builtins() {
    assert_eq!(stack_of("1 2 swp"), ints(&[2, 1]));
    assert_eq!(stack_of("1 2 dmp"), ints(&[1]));
    assert_eq!(stack_of("1 2 3 3 roll"), ints(&[2, 3, 1]));
    assert_eq!(stack_of("1 2 3 1 roll"), ints(&[1, 2, 3]));
    assert_eq!(stack_of("1 2 3 3 swap"), ints(&[3, 2, 1]));
    assert_eq!(stack_of("1 2 stack_count"), ints(&[1, 2, 2]));
    assert_eq!(stack_of("1 2 stack_purge stack_empty"), vec![Value::Bool(true)]);
    assert_eq!(stack_of("1 __builtin_dup"), ints(&[1, 1]));

    assert_failure("0 roll");
    assert_failure("1 5 roll");
    assert_failure("1 -1 swap");
    assert_eq!(error_of("swp").kind, ErrorKind::Runtime(RuntimeError::StackUnderflow));
}

#[test]
fn dup_copies_strings() {
    assert_eq!(stack_of("\"a\" dup \"b\" ."), strings(&["a", "ab"]));
}

#[test]
fn type_predicates() {
    let src = "( ) is_array 1 is_integer 1.5 is_float \"x\" is_string NULL is_null \
               { } is_codeblock TRUE is_bool dictionary_new is_dictionary";
    assert_eq!(stack_of(src), vec![Value::Bool(true); 8]);

    assert_eq!(stack_of("1 $x = $x is_integer $x is_variable 1 is_variable"),
               vec![Value::Bool(true), Value::Bool(true), Value::Bool(false)]);
    assert_eq!(stack_of("\"12\" is_numeric \"x\" is_numeric"),
               vec![Value::Bool(true), Value::Bool(false)]);
    assert_eq!(stack_of("5 __type $x __type \"s\" __type"),
               strings(&["T_INTEGER", "T_VARIABLE", "T_STRING"]));
}

#[test]
fn uneval_round_trips() {
    assert_eq!(stack_of(r#"( 1 "a\"b" 2.5 TRUE NULL ) uneval"#),
               strings(&[r#"( 1 "a\"b" 2.5 TRUE NULL )"#]));
    assert_eq!(stack_of("{ 1 ( 2 ) + } uneval"), strings(&["{ 1 ( 2 ) + }"]));
    assert_eq!(stack_of("( 1 \"x\\n\" 2.0 ) dup uneval eval ==="),
               vec![Value::Bool(true)]);
    assert_failure("dictionary_new uneval");
}

#[test]
fn eval_runs_in_the_current_context() {
    assert_eq!(stack_of("\"4 $x =\" eval $x 1 +"), ints(&[5]));
}

#[test]
fn is_def_and_definition() {
    assert_eq!(stack_of("\"print\" is_def \"nope\" is_def { } \"mine\" function \"mine\" is_def"),
               vec![Value::Bool(true), Value::Bool(false), Value::Bool(true)]);
    assert_eq!(stack_of("{ 1 } \"one\" function \"one\" definition do"), ints(&[1]));
    assert_eq!(stack_of("\"length\" definition \"abc\" swp do"), ints(&[3]));
    assert_failure("\"nope\" definition");
    assert_failure("1 is_def");
}

#[test]
fn commandline_returns_the_arguments() {
    let config = Config::default().with_arguments(["a", "b"]);
    let mut interpreter = Interpreter::with_config(config);
    interpreter.execute("<test>", "commandline").unwrap();

    assert_eq!(interpreter.stack(), &[Value::array(strings(&["a", "b"]))]);
}

#[test]
fn environment_access() {
    assert_eq!(stack_of("\"STUTSK_SURELY_UNSET_VARIABLE\" env_get"), vec![Value::Empty]);
    assert_eq!(stack_of("env_list is_array"), vec![Value::Bool(true)]);
}

#[test]
fn time_and_sleep() {
    assert_eq!(stack_of("{ 0 sleep } time is_float"), vec![Value::Bool(true)]);
    assert_eq!(stack_of("{ 1 2 + } time dmp"), ints(&[3]));
}

#[test]
fn print_writes_without_newlines() {
    assert_eq!(output_of("\"a\" print 1 print 2.5 print TRUE print NULL print"),
               "a12.5TRUE");
    assert_eq!(output_of("1 3 / print"), "0.333333");
}

#[test]
fn reading_standard_input() {
    let (_, stack) = run_with_input("readline readline eof", "one\r\ntwo\n");
    assert_eq!(stack,
               vec![Value::string("one"), Value::string("two"), Value::Bool(true)]);

    let (_, stack) = run_with_input("3 read readchar readchar readchar", "héllo");
    assert_eq!(stack, strings(&["hél", "l", "o", ""]));

    let (_, stack) = run_with_input("readline readline", b"a\xFFb\nok\n");
    assert_eq!(stack, strings(&["a\u{FFFD}b", "ok"]));
}

#[test]
fn debug_dumps() {
    assert_eq!(output_of("( 5 \"hi\" ) __dumpstack"),
               "0: T_ARRAY[2]: \n        0: T_INTEGER (5)\n        1: T_STRING[2] (\"hi\")\n");
    assert_eq!(output_of("2 $b = 1 $a = __dumpvariables"),
               "a: T_INTEGER (1)\nb: T_INTEGER (2)\n");
    assert_eq!(output_of("1 $g = { 2 $l = __dumpglobalvariables } lambda"),
               "g: T_INTEGER (1)\n");
}

#[test]
fn memory_builtins() {
    assert_eq!(stack_of("( 1 2 3 ) length \"héllo\" length dictionary_new length 12345 length"),
               ints(&[3, 5, 0, 5]));
    assert_eq!(stack_of("\"abc\" $s = 1 $s setlength $s @"), strings(&["a"]));
    assert_eq!(stack_of("5 $n = 3 $n setlength $n @"), strings(&["5\0\0"]));
    assert_eq!(stack_of("( 1 ) $a = 3 $a setlength $a @"),
               vec![Value::array(vec![Value::Integer(1), Value::Empty, Value::Empty])]);
    assert_eq!(stack_of("( 1 2 3 4 ) 1 2 slice \"hello\" 1 3 slice"),
               vec![Value::array(ints(&[2, 3])), Value::string("ell")]);

    assert_failure("\"abc\" 2 1 slice");
    assert_failure("\"abc\" 0 3 slice");
    assert_failure("-1 \"abc\" setlength");
}

#[test]
fn oversized_setlength_is_catchable() {
    assert_eq!(stack_of("{ 9223372036854775807 \"\" setlength } { dmp dmp } try"),
               strings(&["Length is too large"]));
    assert_eq!(stack_of("{ 9223372036854775807 ( ) setlength } { dmp dmp } try"),
               strings(&["Length is too large"]));
}

#[test]
fn string_builtins() {
    assert_eq!(stack_of("\"A\" ord \"\" ord"), ints(&[65, 0]));
    assert_eq!(stack_of("97 chr"), strings(&["a"]));
    assert_eq!(stack_of("\"abc\" \"b\" pos \"abc\" \"z\" pos \"héllo\" \"l\" pos"),
               ints(&[1, -1, 2]));
    assert_eq!(stack_of("\"  hi \\n\" trim \"Ab\" uppercase \"Ab\" lowercase"),
               strings(&["hi", "AB", "ab"]));
    assert_eq!(stack_of("\"a b\" \" \" explode"),
               vec![Value::array(strings(&["a", "b"]))]);
    assert_failure("-1 chr");
}

#[test]
fn dictionaries() {
    assert_eq!(stack_of("dictionary_new \"k\" \"v\" dictionary_set \"k\" dictionary_get"),
               strings(&["v"]));
    assert_eq!(stack_of("dictionary_new \"k\" dictionary_get"), vec![Value::Empty]);
    assert_eq!(stack_of("dictionary_new $d = $d \"k\" 1 dictionary_set dmp $d \"k\" dictionary_get"),
               ints(&[1]));
    assert_failure("( ) \"k\" dictionary_get");
}

#[test]
fn dictionaries_are_shared_between_variables() {
    let src = "dictionary_new $a = $a $b = $b \"k\" 1 dictionary_set dmp $a \"k\" dictionary_get";
    assert_eq!(stack_of(src), ints(&[1]));
}

#[test]
fn array_editing() {
    assert_eq!(stack_of("( 1 2 ) ( 3 ) array_append"), vec![Value::array(ints(&[1, 2, 3]))]);
    assert_eq!(stack_of("( 1 2 ) $a = $a ( 3 ) array_append $a @"),
               vec![Value::array(ints(&[1, 2, 3]))]);
    assert_eq!(stack_of("\"x\" 1 ( 1 2 ) array_insert"),
               vec![Value::array(vec![Value::Integer(1), Value::string("x"), Value::Integer(2)])]);
    assert_eq!(stack_of("3 2 ( 1 2 ) array_insert"), vec![Value::array(ints(&[1, 2, 3]))]);
    assert_eq!(stack_of("0 ( 1 2 ) array_delete"), vec![Value::array(ints(&[2]))]);
    assert_eq!(stack_of("( 1 2 3 ) array_reverse"), vec![Value::array(ints(&[3, 2, 1]))]);
    assert_eq!(stack_of("( 1 2 3 ) array_shuffle array_sort"),
               vec![Value::array(ints(&[1, 2, 3]))]);

    assert_failure("\"x\" 3 ( 1 2 ) array_insert");
    assert_failure("2 ( 1 2 ) array_delete");
    assert_failure("1 ( 1 ) array_append");
}

#[test]
fn array_searching_and_sorting() {
    assert_eq!(stack_of("\"2\" ( 1 2 3 ) array_find 9 ( 1 2 ) array_find"), ints(&[1, -1]));
    assert_eq!(stack_of("( 3 1.5 \"2\" ) array_sort"),
               vec![Value::array(vec![Value::Float(1.5), Value::string("2"), Value::Integer(3)])]);
    assert_eq!(stack_of("( 3 1 2 ) { < } array_custom_sort"),
               vec![Value::array(ints(&[1, 2, 3]))]);
    assert_eq!(stack_of("( 1 2 3 ) { 10 * } array_perform"),
               vec![Value::array(ints(&[10, 20, 30]))]);
    assert_failure("( 1 \"x\" ) array_sort");
}

#[test]
fn custom_sort_is_stable() {
    let src = "( ( 1 \"a\" ) ( 0 \"b\" ) ( 1 \"c\" ) ( 0 \"d\" ) ) \
               { $b = $a = $a 0 [] $b 0 [] < } array_custom_sort \
               { 1 [] } array_perform";
    assert_eq!(stack_of(src), vec![Value::array(strings(&["b", "d", "a", "c"]))]);
}

#[test]
fn array_ends() {
    let src = "( 1 2 ) $a = $a array_pop 3 $a array_push 0 $a array_push_front \
               $a array_peek_front $a array_peek $a array_pop_front $a @";
    assert_eq!(stack_of(src),
               vec![Value::Integer(2),
                    Value::Integer(0),
                    Value::Integer(3),
                    Value::Integer(0),
                    Value::array(ints(&[1, 3]))]);
    assert_failure("( ) array_pop");
    assert_failure("( ) array_peek_front");
}

#[test]
fn rounding() {
    assert_eq!(stack_of("2.5 round -2.5 round 2.7 floor 2.2 ceil 7 floor"),
               ints(&[3, -2, 2, 3, 7]));
}

#[test]
fn math_builtins() {
    assert_eq!(stack_of("-5 abs -2.5 abs"), vec![Value::Integer(5), Value::Float(2.5)]);
    assert_eq!(stack_of("16 sqrt 0 sin 1 log"),
               vec![Value::Float(4.0), Value::Float(0.0), Value::Float(0.0)]);
    assert_eq!(stack_of("( 3 9 1 ) max ( 3 9 1 ) min"), ints(&[9, 1]));
    assert_eq!(stack_of("pi euler"),
               vec![Value::Float(std::f64::consts::PI), Value::Float(std::f64::consts::E)]);
    assert_failure("( ) max");
    assert_failure("5 max");
}

#[test]
fn base_conversion() {
    assert_eq!(stack_of("255 16 to_base -5 2 to_base 0 2 to_base"),
               strings(&["ff", "-101", "0"]));
    assert_eq!(stack_of("\"FF\" 16 from_base \"z\" 36 from_base"), ints(&[255, 35]));
    assert_failure("\"1\" 1 from_base");
    assert_failure("\"1\" 37 from_base");
    assert_failure("\"1g\" 16 from_base");
    assert_failure("\"\" 10 from_base");
}

#[test]
fn random_numbers_stay_in_range() {
    assert_eq!(stack_of("10 random $r = $r 0 >= $r 10 < &&"), vec![Value::Bool(true)]);
    assert_eq!(stack_of("( 5 5 ) random"), ints(&[5]));
    assert_eq!(stack_of("random_float $r = $r 0 >= $r 1 < &&"), vec![Value::Bool(true)]);
    assert_failure("0 random");
    assert_failure("( 1 ) random");
    assert_failure("( 5 1 ) random");
}

fn temp_script(name: &str, contents: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("stutsk-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn include_runs_files_in_the_current_context() {
    let path = temp_script("included.stk", "21 $included =");
    let src = format!("{} include $included 2 *", escape(&path.display().to_string()));

    assert_eq!(stack_of(&src), ints(&[42]));
}

#[test]
fn include_searches_the_include_paths() {
    let path = temp_script("searched.stk", "\"found\"");
    let dir = path.parent().unwrap();
    let mut interpreter = Interpreter::with_config(Config::default().with_include_path(dir));
    interpreter.execute("<test>", "\"searched.stk\" include").unwrap();

    assert_eq!(interpreter.stack(), &[Value::string("found")]);
}

#[test]
fn missing_includes_can_be_caught() {
    assert_eq!(stack_of("{ \"missing_file.stk\" include } { dmp dmp } try"),
               strings(&["Cannot open file \"missing_file.stk\""]));
}

#[test]
fn unreadable_program_files_are_system_errors() {
    let error = run_file(Path::new("tests/scripts/does_not_exist.stk"), Config::default()).unwrap_err();

    assert!(matches!(error.kind, ErrorKind::System(_)));
}

#[test]
fn assert_helpers_agree() {
    assert_success("1 2 + 3 == ! { \"math is broken\" throw } if");
    assert_failure("FALSE ! { \"expected\" throw } if");
}
