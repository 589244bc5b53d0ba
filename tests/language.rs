use std::{fs, io};

use sprig::{
    ast::{BinaryOperator, Expr, Statement},
    error::RuntimeError,
    interpreter::{
        environment::{EnvRef, Environment},
        evaluator::Evaluator,
        lexer::Lexer,
        parser::Parser,
        value::Value,
    },
    run_source,
};
use walkdir::WalkDir;

fn parse(source: &str) -> sprig::ast::Program {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    assert!(parser.errors().is_empty(),
            "unexpected parser diagnostics for {source:?}: {:?}",
            parser.errors());
    program
}

fn eval_source(source: &str) -> Result<Option<Value>, RuntimeError> {
    eval_in(source, &Environment::new().into_ref())
}

fn eval_in(source: &str, env: &EnvRef) -> Result<Option<Value>, RuntimeError> {
    let program = parse(source);
    let mut out = Vec::new();
    Evaluator::new(&mut out).eval_program(&program, env)
}

fn assert_inspect(source: &str, expected: &str) {
    match eval_source(source) {
        Ok(Some(value)) => assert_eq!(value.to_string(), expected, "for {source:?}"),
        other => panic!("expected a value for {source:?}, got {other:?}"),
    }
}

fn assert_error(source: &str, expected: &str) {
    match eval_source(source) {
        Err(error) => assert_eq!(error.to_string(), expected, "for {source:?}"),
        other => panic!("expected an error for {source:?}, got {other:?}"),
    }
}

fn assert_diagnostics(source: &str, expected: &[&str]) {
    let mut parser = Parser::new(Lexer::new(source));
    parser.parse_program();
    let recorded: Vec<String> = parser.errors().iter().map(ToString::to_string).collect();
    assert_eq!(recorded, expected, "for {source:?}");
}

#[test]
fn number_arithmetic() {
    assert_inspect("1 + 2", "3");
    assert_inspect("8 - 5", "3");
    assert_inspect("7 * 9", "63");
    assert_inspect("10 / 4", "2.5");
    assert_inspect("50 / 2 * 2 + 10", "60");
    assert_inspect("(5 + 10 * 2 + 15 / 3) * 2 + -10", "50");
    assert_inspect("-5 + 5", "0");
    assert_inspect("3 ** 2", "9");
    assert_inspect("7 % 3", "1");
    assert_inspect("-7 % 3", "-1");
    assert_inspect("7.9 % 3.9", "1");
}

#[test]
fn power_is_left_associative_at_product_level() {
    assert_inspect("2 ** 3 ** 2", "64");
    assert_inspect("2 * 3 ** 2", "36");
}

#[test]
fn remainder_of_zero_is_nan() {
    match eval_source("1 % 0") {
        Ok(Some(Value::Number(n))) => assert!(n.is_nan()),
        other => panic!("expected NaN, got {other:?}"),
    }
}

#[test]
fn comparisons_and_equality() {
    assert_inspect("1 < 2", "true");
    assert_inspect("2 > 3", "false");
    assert_inspect("2 <= 2", "true");
    assert_inspect("3 >= 4", "false");
    assert_inspect("1 == 1", "true");
    assert_inspect("1 != 1", "false");
    assert_inspect("true == true", "true");
    assert_inspect("true != false", "true");
    assert_inspect("(1 < 2) == true", "true");
    // Mixed-type equality compares identity and is never an error.
    assert_inspect("1 == true", "false");
    assert_inspect("1 != true", "true");
}

#[test]
fn bang_follows_truthiness() {
    assert_inspect("!true", "false");
    assert_inspect("!false", "true");
    assert_inspect("!!5", "true");
    assert_inspect("!0", "false");
    assert_inspect("!\"\"", "false");
}

#[test]
fn logical_operators_combine_truthiness() {
    assert_inspect("true && true", "true");
    assert_inspect("true && false", "false");
    assert_inspect("false || true", "true");
    assert_inspect("false || false", "false");
    assert_inspect("1 && \"non-empty\"", "true");
    assert_inspect("if (!false && (1 < 2)) { \"yes\" } else { \"no\" }", "yes");
}

#[test]
fn logical_operators_evaluate_both_sides() {
    // No short-circuiting: a failing right-hand side surfaces even when the
    // left-hand side already decides the outcome.
    assert_error("false && (1 + \"a\")", "type mismatch: NUMBER + STRING");
    assert_error("true || missing", "identifier not found: missing");
}

#[test]
fn conditionals() {
    assert_inspect("if (true) { 10 }", "10");
    assert_inspect("if (false) { 10 }", "nil");
    assert_inspect("if (1) { 10 }", "10");
    assert_inspect("if (1 > 2) { 10 } else { 20 }", "20");
    assert_inspect("if (false) { 10 } else { if (false) { 20 } else { 30 } }", "30");
}

#[test]
fn let_bindings_and_shadowing() {
    assert_inspect("let a = 5; a", "5");
    assert_inspect("let a = 5; let b = a; a + b", "10");
    assert_inspect("let x = 1; let f = fn() { let x = 2; x }; f() + x", "3");
    // A binding shadows the built-in of the same name.
    assert_inspect("let len = 5; len", "5");
}

#[test]
fn return_unwinds_to_the_call_boundary() {
    assert_inspect("9; return 2 * 5; 9", "10");
    assert_inspect("if (true) { if (true) { return 10 } return 1 }", "10");
    assert_inspect("let f = fn() { return 10; 1 }; f()", "10");
    assert_inspect("let f = fn(x) { if (x > 0) { return \"plus\" } \"minus\" }; f(1)", "plus");
    assert_inspect("let f = fn(x) { if (x > 0) { return \"plus\" } \"minus\" }; f(-1)", "minus");
}

#[test]
fn strings() {
    assert_inspect("\"foo\" + \"bar\"", "foobar");
    assert_inspect("\"hello world\"", "hello world");
    assert_error("\"a\" - \"b\"", "unknown operator: STRING - STRING");
    assert_error("\"a\" == \"a\"", "unknown operator: STRING == STRING");
}

#[test]
fn functions_and_closures() {
    assert_inspect("let identity = fn(x) { x }; identity(5)", "5");
    assert_inspect("let double = fn(x) { x * 2 }; double(double(10))", "40");
    assert_inspect("fn(x) { x }(5)", "5");
    assert_inspect("let fib = fn(n){ if (n < 2) { n } else { fib(n-1) + fib(n-2) } }; fib(10)",
                   "55");
    assert_inspect("fn add(a, b) { a + b } add(2, 3)", "5");
}

#[test]
fn closures_capture_their_environment() {
    assert_inspect("let mk = fn(x){ fn(y){ x + y } }; let add2 = mk(2); add2(3)", "5");
    // Later bindings cannot disturb what the closure captured.
    assert_inspect("let mk = fn(x){ fn(y){ x + y } }; let add2 = mk(2); let x = 99; add2(3)",
                   "5");
    assert_inspect("let counter = fn() { let n = 0; fn() { n } }; counter()()", "0");
}

#[test]
fn wrong_user_function_arity_is_an_error() {
    assert_error("let f = fn(a, b) { a }; f(1)", "wrong number of arguments: expected 2, got 1");
    assert_error("let f = fn() { 1 }; f(1, 2)", "wrong number of arguments: expected 0, got 2");
}

#[test]
fn arrays_and_indexing() {
    assert_inspect("[1, 2 * 2, 3 + 3]", "[1, 4, 6]");
    assert_inspect("[1, 2, 3][0]", "1");
    assert_inspect("let a = [1, 2, 3]; a[0] + a[1] + a[2]", "6");
    assert_inspect("[1, 2, 3][3]", "nil");
    assert_inspect("[1, 2, 3][-1]", "nil");
    // Fractional indices truncate toward zero.
    assert_inspect("[1, 2, 3][1.9]", "2");
    assert_inspect("[7, 8][-0.5]", "7");
    assert_inspect("[[1, 2], [3, 4]][1][0]", "3");
}

#[test]
fn array_builtins_do_not_mutate() {
    assert_inspect("let a = [1, 2, 3]; push(a, 4); a", "[1, 2, 3]");
    assert_inspect("let a = [1, 2, 3]; push(a, 4)", "[1, 2, 3, 4]");
    assert_inspect("let a = [1, 2, 3]; rest(a); a", "[1, 2, 3]");
    assert_inspect("rest([1, 2, 3])", "[2, 3]");
    assert_inspect("rest([])", "nil");
    assert_inspect("first([7, 8])", "7");
    assert_inspect("first([])", "nil");
    assert_inspect("last([7, 8])", "8");
    assert_inspect("last([])", "nil");
}

#[test]
fn len_counts_strings_arrays_and_hashes() {
    assert_inspect("len(\"hello\")", "5");
    assert_inspect("len(\"\")", "0");
    assert_inspect("len([1, 2, 3])", "3");
    assert_inspect("len({\"a\": 1, \"b\": 2})", "2");
    assert_inspect("len(\"hello\") + len([1, 2, 3])", "8");
}

#[test]
fn builtin_argument_errors() {
    assert_error("len(1)", "argument to `len` not supported, got NUMBER");
    assert_error("len()", "wrong number of arguments. got=0, want=1");
    assert_error("len([1], [2])", "wrong number of arguments. got=2, want=1");
    assert_error("first(1)", "argument to `first` must be ARRAY, got NUMBER");
    assert_error("last(\"abc\")", "argument to `last` must be ARRAY, got STRING");
    assert_error("rest(true)", "argument to `rest` must be ARRAY, got BOOLEAN");
    assert_error("push(1, 2)", "argument to `push` must be ARRAY, got NUMBER");
    assert_error("push([1])", "wrong number of arguments. got=1, want=2");
}

#[test]
fn hash_literals_and_lookup() {
    assert_inspect("{ true: 1, false: 0, 1: \"one\", \"k\": \"v\" }[1]", "one");
    assert_inspect("{\"a\": 1}[\"a\"]", "1");
    assert_inspect("{\"a\": 1}[\"missing\"]", "nil");
    assert_inspect("{1.5: \"x\"}[1.5]", "x");
    assert_inspect("{true: \"yes\"}[1 < 2]", "yes");
    // Keys are expressions, evaluated at lookup and construction time alike.
    assert_inspect("let k = \"key\"; {k + \"1\": 5}[k + \"1\"]", "5");
    // The last duplicate wins.
    assert_inspect("{\"a\": 1, \"a\": 2}[\"a\"]", "2");
    assert_inspect("let people = [{\"name\":\"a\",\"age\":1},{\"name\":\"b\",\"age\":2}]; \
                    people[1][\"name\"]",
                   "b");
}

#[test]
fn unusable_hash_keys_are_errors() {
    assert_error("{fn(x){x}: 1}", "unusable as hash key: FUNCTION");
    assert_error("{\"a\": 1}[[1]]", "unusable as hash key: ARRAY");
}

#[test]
fn index_operator_type_errors() {
    assert_error("5[0]", "index operator not supported: NUMBER");
    assert_error("[1, 2][\"a\"]", "index operator not supported: ARRAY");
    assert_error("\"abc\"[0]", "index operator not supported: STRING");
}

#[test]
fn runtime_error_messages() {
    assert_error("1 + \"a\"", "type mismatch: NUMBER + STRING");
    assert_error("5 + true", "type mismatch: NUMBER + BOOLEAN");
    assert_error("true + false", "unknown operator: BOOLEAN + BOOLEAN");
    assert_error("-\"a\"", "unknown operator: -STRING");
    assert_error("foo(1)", "identifier not found: foo");
    assert_error("5()", "not a function: NUMBER");
    assert_error("\"not callable\"()", "not a function: STRING");
}

#[test]
fn errors_short_circuit_enclosing_evaluations() {
    // The failing argument stops the call before the callee runs.
    assert_error("let g = fn() { 1 + \"a\" }; let f = fn(x) { 99 }; f(g())",
                 "type mismatch: NUMBER + STRING");
    assert_error("[1, missing, 3]", "identifier not found: missing");
    assert_error("{\"a\": missing}", "identifier not found: missing");
    assert_error("let x = 1 + \"a\"; 123", "type mismatch: NUMBER + STRING");
    assert_error("if (missing) { 1 }", "identifier not found: missing");
}

#[test]
fn declarations_yield_nothing() {
    assert!(matches!(eval_source("let a = 5"), Ok(None)));
    assert!(matches!(eval_source("fn id(x) { x }"), Ok(None)));
    assert!(matches!(eval_source(""), Ok(None)));
}

#[test]
fn evaluation_is_deterministic() {
    let source = "let fib = fn(n){ if (n < 2) { n } else { fib(n-1) + fib(n-2) } }; \
                  [fib(10), {\"k\": 1 ** 8}[\"k\"], !false]";
    let first = eval_source(source).unwrap().unwrap().to_string();
    let second = eval_source(source).unwrap().unwrap().to_string();
    assert_eq!(first, second);
}

#[test]
fn pure_expressions_are_stable_within_one_environment() {
    let env = Environment::new().into_ref();
    assert!(matches!(eval_in("let x = 21", &env), Ok(None)));
    let first = eval_in("x * 2", &env).unwrap().unwrap().to_string();
    let second = eval_in("x * 2", &env).unwrap().unwrap().to_string();
    assert_eq!(first, "42");
    assert_eq!(first, second);
}

#[test]
fn inspect_representations() {
    assert_inspect("if (false) { 1 }", "nil");
    assert_inspect("true", "true");
    assert_inspect("12.5", "12.5");
    assert_inspect("[1, \"two\", [3]]", "[1, two, [3]]");
    assert_inspect("{\"k\": [1, 2]}", "{k: [1, 2]}");
    assert_inspect("fn(x, y) { x }", "fn(x, y)");
    assert_inspect("len", "builtin");
}

#[test]
fn print_writes_one_line_per_argument() {
    let mut out = Vec::new();
    let result = run_source("print(1, \"two\", [3, 4]); print()", &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "1\ntwo\n[3, 4]\n");
    assert_eq!(result.unwrap().to_string(), "nil");
}

#[test]
fn parser_precedence_structure() {
    let program = parse("a + b * c");
    let Statement::Expression { expr } = &program.statements[0] else {
        panic!("expected an expression statement");
    };
    let Expr::Binary { left, op, right } = expr else {
        panic!("expected a binary expression");
    };

    assert_eq!(*op, BinaryOperator::Add);
    assert_eq!(**left, Expr::Identifier { name: "a".to_string() });
    assert!(matches!(**right, Expr::Binary { op: BinaryOperator::Mul, .. }));
}

#[test]
fn parser_statement_forms() {
    let program = parse("let x = 5; return x; x; fn id(a) { a }");
    assert_eq!(program.statements.len(), 4);
    assert!(matches!(&program.statements[0], Statement::Let { name, .. } if name == "x"));
    assert!(matches!(&program.statements[1], Statement::Return { .. }));
    assert!(matches!(&program.statements[2], Statement::Expression { .. }));
    assert!(matches!(&program.statements[3], Statement::Function { name, params, .. }
                     if name == "id" && params == &["a".to_string()]));
}

#[test]
fn parser_diagnostics_accumulate_and_recover() {
    assert_diagnostics("let x 5;", &["expected next token to be =, got NUMBER instead"]);
    assert_diagnostics("@", &["no prefix parse function for ILLEGAL"]);
    // Recovery re-enters at the `=` the failed production left behind, so a
    // follow-on diagnostic is recorded for it.
    assert_diagnostics("let = 5;",
                       &["expected next token to be IDENT, got = instead",
                         "no prefix parse function for ="]);
    assert_diagnostics("let x 5; let = 3;",
                       &["expected next token to be =, got NUMBER instead",
                         "expected next token to be IDENT, got = instead",
                         "no prefix parse function for ="]);
}

#[test]
fn there_is_no_assignment_operator() {
    // Rebinding works through `let` only; a bare `=` has no prefix parse
    // function and surfaces as a diagnostic.
    let mut parser = Parser::new(Lexer::new("let n = 0; n = 1"));
    parser.parse_program();
    assert!(parser.errors()
                  .iter()
                  .any(|error| error.to_string() == "no prefix parse function for ="));
}

#[test]
fn run_source_reports_parse_diagnostics() {
    let mut out = Vec::new();
    let error = run_source("let x 5;", &mut out).unwrap_err();
    assert_eq!(error.to_string(),
               "parser errors:\n\texpected next token to be =, got NUMBER instead");
}

#[test]
fn repl_evaluates_lines_and_persists_environment() {
    let mut input = io::Cursor::new("let x = 21\nx * 2\n");
    let mut out = Vec::new();
    sprig::repl::start(&mut input, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), ">>>>42\n>>");
}

#[test]
fn repl_prints_parser_errors_without_evaluating() {
    let mut input = io::Cursor::new("let x 5\n");
    let mut out = Vec::new();
    sprig::repl::start(&mut input, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(),
               ">>parser errors:\n\texpected next token to be =, got NUMBER instead\n>>");
}

#[test]
fn repl_prints_runtime_errors() {
    let mut input = io::Cursor::new("1 + \"a\"\n");
    let mut out = Vec::new();
    sprig::repl::start(&mut input, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(),
               ">>ERROR: type mismatch: NUMBER + STRING\n>>");
}

#[test]
fn demo_scripts_run_clean() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "sp"))
    {
        count += 1;
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        let mut out = Vec::new();
        if let Err(e) = run_source(&source, &mut out) {
            panic!("Demo script {path:?} failed: {e}");
        }
    }

    assert!(count > 0, "No demo scripts found in demos/");
}
