use marmoset::{
    Session,
    error::{InterpreterError, RuntimeError},
    get_result,
    interpreter::object::Object,
};

fn value(source: &str) -> Object {
    match get_result(source) {
        Ok(Some(value)) => value,
        Ok(None) => panic!("{source:?} produced no value"),
        Err(error) => panic!("{source:?} failed: {error}"),
    }
}

fn runtime_error(source: &str) -> RuntimeError {
    match get_result(source) {
        Err(InterpreterError::Runtime(error)) => error,
        other => panic!("{source:?} should fail at runtime, got {other:?}"),
    }
}

fn error_message(source: &str) -> String {
    runtime_error(source).message()
}

#[test]
fn bindings_are_visible_to_later_statements() {
    assert_eq!(value("let a = 5; let b = a + 5; b;"), Object::Integer(10));
}

#[test]
fn immediately_called_function_literal() {
    assert_eq!(value("fn(x){x+2;}(3);"), Object::Integer(5));
}

#[test]
fn mixing_integers_and_booleans_is_a_type_mismatch() {
    assert_eq!(error_message("5 + true;"), "type mismatch: INTEGER + BOOLEAN");
    assert_eq!(error_message("true + 5;"), "type mismatch: BOOLEAN + INTEGER");
}

#[test]
fn hash_literal_with_computed_keys() {
    let source = r#"let two="two"; {"one":1, two:2, "thr"+"ee":3}["two"];"#;
    assert_eq!(value(source), Object::Integer(2));
}

#[test]
fn closures_capture_their_scope() {
    let source = "let newAdder = fn(x){fn(y){x+y;};}; let addTwo = newAdder(2); addTwo(3);";
    assert_eq!(value(source), Object::Integer(5));
}

#[test]
fn integer_arithmetic_truncates_toward_zero() {
    let cases = [("5", 5),
                 ("-10", -10),
                 ("5 + 5 + 5 + 5 - 10", 10),
                 ("2 * 2 * 2 * 2 * 2", 32),
                 ("50 / 2 * 2 + 10", 60),
                 ("3 * (3 * 3) + 10", 37),
                 ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
                 ("7 / 2", 3),
                 ("-7 / 2", -3),
                 ("7 / -2", -3)];

    for (source, expected) in cases {
        assert_eq!(value(source), Object::Integer(expected), "source: {source}");
    }
}

#[test]
fn float_arithmetic() {
    assert_eq!(value("7.0 / 2"), Object::Float(3.5));
    assert_eq!(value("2 * 2.5"), Object::Float(5.0));
    assert_eq!(value("-1.5"), Object::Float(-1.5));
    assert_eq!(value("0.1 + 0.2 > 0.3"), Object::Boolean(true));
}

#[test]
fn integer_division_by_zero_stays_a_float() {
    let Object::Float(result) = value("1 / 0") else {
        panic!("expected a float");
    };
    assert!(result.is_infinite() && result.is_sign_positive());

    let Object::Float(result) = value("0 / 0") else {
        panic!("expected a float");
    };
    assert!(result.is_nan());
}

#[test]
fn comparisons() {
    let cases = [("1 < 2", true),
                 ("1 > 2", false),
                 ("1 <= 1", true),
                 ("2 >= 3", false),
                 ("1 == 1", true),
                 ("1 != 1", false),
                 ("3 == 3.0", true),
                 ("true == true", true),
                 ("true != false", true),
                 ("(1 < 2) == true", true),
                 ("\"a\" == \"a\"", true),
                 ("\"a\" != \"b\"", true)];

    for (source, expected) in cases {
        assert_eq!(value(source), Object::Boolean(expected), "source: {source}");
    }
}

#[test]
fn collections_compare_by_identity() {
    assert_eq!(value("[1] == [1]"), Object::Boolean(false));
    assert_eq!(value("let a = [1]; let b = a; a == b"), Object::Boolean(true));
    assert_eq!(value("let f = fn() { 1 }; f == f"), Object::Boolean(true));
    assert_eq!(value("len == len"), Object::Boolean(true));
    assert_eq!(value("[1] != [1]"), Object::Boolean(true));
}

#[test]
fn bang_operator_follows_truthiness() {
    let cases = [("!true", false),
                 ("!false", true),
                 ("!5", false),
                 ("!0", true),
                 ("!0.0", true),
                 ("!!true", true),
                 ("!\"\"", false),
                 ("!if (false) { 1 }", true)];

    for (source, expected) in cases {
        assert_eq!(value(source), Object::Boolean(expected), "source: {source}");
    }
}

#[test]
fn operator_errors() {
    assert_eq!(error_message("-true"), "unknown operator: -BOOLEAN");
    assert_eq!(error_message("true + false;"), "unknown operator: BOOLEAN + BOOLEAN");
    assert_eq!(error_message("\"a\" - \"b\""), "unknown operator: STRING - STRING");
    assert_eq!(error_message("[1] + {}"), "type mismatch: ARRAY + HASH");
}

#[test]
fn string_concatenation() {
    assert_eq!(value(r#""Hello" + " " + "World!""#), Object::from("Hello World!"));
}

#[test]
fn if_else_expressions() {
    assert_eq!(value("if (true) { 10 }"), Object::Integer(10));
    assert_eq!(value("if (false) { 10 }"), Object::Null);
    assert_eq!(value("if (1) { 10 }"), Object::Integer(10));
    assert_eq!(value("if (0) { 10 } else { 20 }"), Object::Integer(20));
    assert_eq!(value("if (1 > 2) { 10 } else { 20 }"), Object::Integer(20));
}

#[test]
fn return_statements() {
    assert_eq!(value("return 10; 9;"), Object::Integer(10));
    assert_eq!(value("9; return 2 * 5; 9;"), Object::Integer(10));
    assert_eq!(value("if (10 > 1) { if (10 > 1) { return 10; } return 1; }"), Object::Integer(10));
    assert_eq!(value("let f = fn(x) { return x; x + 10; }; f(10);"), Object::Integer(10));
    assert_eq!(value("let f = fn(x) { let result = x + 10; return result; return 10; }; f(10);"),
               Object::Integer(20));
}

#[test]
fn programs_ending_in_a_binding_have_no_value() {
    assert_eq!(get_result("let a = 1;").unwrap(), None);
    assert_eq!(get_result("let a = 1; a = 2;").unwrap(), None);
    assert_eq!(get_result("while (false) { }").unwrap(), None);
}

#[test]
fn let_rejects_redeclaration_in_the_same_scope() {
    assert_eq!(error_message("let a = 1; let a = 2;"), "Identifier a already exists");
    assert_eq!(value("let a = 1; let f = fn() { let a = 2; a }; f() + a;"), Object::Integer(3));
}

#[test]
fn assignment_updates_the_owning_scope() {
    assert_eq!(value("let c = 0; let inc = fn() { c = c + 1; }; inc(); inc(); c;"),
               Object::Integer(2));
    assert_eq!(error_message("b = 3;"), "b is not defined");
}

#[test]
fn assignment_produces_no_value() {
    assert_eq!(error_message("let x = 1; let y = (x = 2);"), "expression produced no value");
    assert_eq!(value("let f = fn() { let x = 1; x = 2; }; f();"), Object::Null);
}

#[test]
fn unknown_identifiers() {
    let error = runtime_error("let a = 1;\nfoobar;");
    assert_eq!(error.message(), "identifier not found: foobar");
    assert_eq!(error.line, Some(2));
    assert_eq!(error.to_string(), "Error on line 2: identifier not found: foobar");
}

#[test]
fn errors_keep_the_line_of_the_innermost_node() {
    let error = runtime_error("let f = fn(a) {\n  a + true\n};\n\nf(1);");
    assert_eq!(error.message(), "type mismatch: INTEGER + BOOLEAN");
    assert_eq!(error.line, Some(2));
}

#[test]
fn errors_stop_evaluation() {
    let session = Session::new();
    assert!(session.run("let a = 1; let b = a + true; let c = 3;").is_err());
    assert_eq!(session.env().borrow().get("a"), Some(Object::Integer(1)));
    assert_eq!(session.env().borrow().get("c"), None);
}

#[test]
fn arrays_and_indexing() {
    assert_eq!(value("[1, 2 * 2, 3 + 3]").to_string(), "[1, 4, 6]");
    assert_eq!(value("[1, 2, 3][0]"), Object::Integer(1));
    assert_eq!(value("let i = 0; [1][i]"), Object::Integer(1));
    assert_eq!(value("let a = [1, 2, 3]; a[0] + a[1] + a[2];"), Object::Integer(6));
    assert_eq!(value("[1, 2, 3][3]"), Object::Null);
    assert_eq!(value("[1, 2, 3][-1]"), Object::Null);
}

#[test]
fn hashes_and_indexing() {
    let source = r#"let h = {"one": 10 - 9, "two": 1 + 1, 4: 4, true: 5, false: 6}; h"#;
    assert_eq!(value(source).to_string(), "{one: 1, two: 2, 4: 4, true: 5, false: 6}");

    assert_eq!(value(r#"{"foo": 5}["foo"]"#), Object::Integer(5));
    assert_eq!(value(r#"{"foo": 5}["bar"]"#), Object::Null);
    assert_eq!(value(r#"{}["foo"]"#), Object::Null);
    assert_eq!(value("{5: 5}[5]"), Object::Integer(5));
    assert_eq!(value("{true: 5}[true]"), Object::Integer(5));
    assert_eq!(value(r#"{1: "int", "1": "str"}["1"]"#), Object::from("str"));
}

#[test]
fn unusable_hash_keys() {
    assert_eq!(error_message(r#"{"name": "x"}[fn(x) { x }];"#), "unusable as hash key: FUNCTION");
    assert_eq!(error_message("{[1]: 2}"), "unusable as hash key: ARRAY");
}

#[test]
fn indexing_other_values_is_an_error() {
    assert_eq!(error_message("1[0]"), "index operator not supported: INTEGER for INTEGER");
    assert_eq!(error_message("[1][\"a\"]"), "index operator not supported: STRING for ARRAY");
}

#[test]
fn calling_non_functions_is_an_error() {
    assert_eq!(error_message("let x = 1; x();"), "not a function: INTEGER");
}

#[test]
fn recursion() {
    let source = "let fib = fn(n) { if (n < 2) { return n; } fib(n - 1) + fib(n - 2) }; fib(15);";
    assert_eq!(value(source), Object::Integer(610));
}

#[test]
fn higher_order_functions() {
    let source = "
        let map = fn(arr, f) {
            let iter = fn(arr, accumulated) {
                if (len(arr) == 0) {
                    accumulated
                } else {
                    iter(rest(arr), push(accumulated, f(first(arr))));
                }
            };
            iter(arr, []);
        };
        map([1, 2, 3], fn(x) { x * 2 });
    ";
    assert_eq!(value(source).to_string(), "[2, 4, 6]");
}

#[test]
fn argument_count_is_not_checked_for_functions() {
    assert_eq!(value("let f = fn(a, b) { b }; f(1);"), Object::Null);
    assert_eq!(value("fn(a) { a }(1, 2)"), Object::Integer(1));
}

#[test]
fn arguments_stop_at_the_first_error() {
    let session = Session::new();
    let result = session.run("let log = []; let f = fn(a, b) { a }; f(append(log, 1), missing, append(log, 2));");
    assert!(result.is_err());
    assert_eq!(session.run("len(log)").unwrap(), Some(Object::Integer(1)));
}

#[test]
fn builtin_len() {
    assert_eq!(value(r#"len("")"#), Object::Integer(0));
    assert_eq!(value(r#"len("four")"#), Object::Integer(4));
    assert_eq!(value("len([1, 2, 3])"), Object::Integer(3));
    assert_eq!(error_message("len(1)"), "argument to `len` not supported, got INTEGER");
    assert_eq!(error_message(r#"len("one", "two")"#), "wrong number of arguments. got=2, want=1");
}

#[test]
fn builtin_array_accessors() {
    assert_eq!(value("first([1, 2, 3])"), Object::Integer(1));
    assert_eq!(value("first([])"), Object::Null);
    assert_eq!(value("last([1, 2, 3])"), Object::Integer(3));
    assert_eq!(value("last([])"), Object::Null);
    assert_eq!(value("rest([1, 2, 3])").to_string(), "[2, 3]");
    assert_eq!(value("rest([])"), Object::Null);
    assert_eq!(error_message("first(1)"), "argument to `first` must be ARRAY, got INTEGER");
    assert_eq!(error_message("rest(\"abc\")"), "argument to `rest` must be ARRAY, got STRING");
}

#[test]
fn push_copies_and_append_mutates() {
    assert_eq!(value("let a = [1]; let b = push(a, 2); a").to_string(), "[1]");
    assert_eq!(value("let a = [1]; let b = push(a, 2); b").to_string(), "[1, 2]");
    assert_eq!(value("let a = [1]; let b = a; append(a, 2); b").to_string(), "[1, 2]");
    assert_eq!(error_message("push(1, 1)"), "argument to `push` must be ARRAY, got INTEGER");
}

#[test]
fn add_inserts_into_a_hash_in_place() {
    assert_eq!(value(r#"let h = {}; add(h, "k", 5); h["k"]"#), Object::Integer(5));
    assert_eq!(value(r#"let h = {"k": 1}; add(h, "k", 2); h"#).to_string(), "{k: 2}");
    assert_eq!(error_message("add({}, [1], 1)"), "unusable as hash key: ARRAY");
    assert_eq!(error_message("add([], 1, 2)"), "argument to `add` must be HASH, got ARRAY");
    assert_eq!(error_message("add({}, 1)"), "wrong number of arguments. got=2, want=3");
}

#[test]
fn print_returns_null() {
    assert_eq!(value(r#"print("hello", 1)"#), Object::Null);
}

#[test]
fn builtins_are_values_and_can_be_shadowed() {
    assert_eq!(value("let l = len; l([1])"), Object::Integer(1));
    assert_eq!(value(r#"let len = fn(x) { 42 }; len("a")"#), Object::Integer(42));
}

#[test]
fn builtins_check_their_argument_count_when_called_directly() {
    use marmoset::interpreter::evaluator::function::builtin::{add, append, len};

    assert_eq!(len(&[]).unwrap_err().message(), "wrong number of arguments. got=0, want=1");
    assert_eq!(append(&[Object::array(vec![])]).unwrap_err().message(),
               "wrong number of arguments. got=1, want=2");
    assert!(add(&[]).is_err());
}

#[test]
fn self_containing_collections_render() {
    assert_eq!(value("let a = [1]; append(a, a); a;").inspect(), "[1, [...]]");
    assert_eq!(value(r#"let h = {}; add(h, "self", h); h;"#).inspect(), "{self: {...}}");
    assert_eq!(value("let a = [1]; [a, a];").inspect(), "[[1], [1]]");
}

#[test]
fn while_loops() {
    assert_eq!(value("let sum = 0; let i = 0; while (i < 5) { sum = sum + i; i = i + 1; } sum"),
               Object::Integer(10));
    assert_eq!(value("let i = 0; while (true) { i = i + 1; if (i == 5) { break; } } i"),
               Object::Integer(5));
}

#[test]
fn for_loops() {
    assert_eq!(value("let sum = 0; for (let i = 0; i < 5; i = i + 1) { sum = sum + i; } sum"),
               Object::Integer(10));
    assert_eq!(value("let i = 10; for (i = 0; i < 3; i = i + 1) { } i"), Object::Integer(3));
    assert_eq!(error_message("for (let i = 0; i < 1; i = i + 1) { } i;"), "identifier not found: i");
}

#[test]
fn break_leaves_only_the_innermost_loop() {
    let source = "
        let count = 0;
        for (let i = 0; i < 3; i = i + 1) {
            for (let j = 0; j < 10; j = j + 1) {
                if (j == 2) { break; }
                count = count + 1;
            }
        }
        count;
    ";
    assert_eq!(value(source), Object::Integer(6));
}

#[test]
fn loop_bodies_get_a_fresh_scope_each_iteration() {
    assert_eq!(value("let n = 0; while (n < 3) { let square = n * n; n = n + 1; } n"),
               Object::Integer(3));
    assert_eq!(error_message("let n = 0; while (n < 1) { let inner = 1; n = n + 1; } inner"),
               "identifier not found: inner");
}

#[test]
fn return_inside_a_loop_leaves_the_function() {
    let source = "
        let find = fn(a) {
            for (let i = 0; i < len(a); i = i + 1) {
                if (a[i] > 2) { return i; }
            }
            return -1;
        };
        [find([1, 5, 3]), find([])];
    ";
    assert_eq!(value(source).to_string(), "[1, -1]");
}

#[test]
fn errors_inside_a_loop_stop_it() {
    let session = Session::new();
    let result = session.run("let i = 0; while (i < 3) { i = i + 1; let x = i + true; }");
    assert!(result.is_err());
    assert_eq!(session.run("i").unwrap(), Some(Object::Integer(1)));
}

#[test]
fn break_inside_an_operand_leaves_the_loop() {
    let element = "let n = 0; while (true) { n = n + 1; [if (n == 3) { break; }]; } n;";
    assert_eq!(value(element), Object::Integer(3));

    let argument = "let n = 0; while (n < 10) { n = n + 1; len([if (true) { break; }]); } n;";
    assert_eq!(value(argument), Object::Integer(1));

    let infix = "let n = 0; while (n < 10) { n = n + 1; let x = 1 + if (n == 2) { break; } else { 0 }; } n;";
    assert_eq!(value(infix), Object::Integer(2));
}

#[test]
fn return_inside_an_operand_leaves_the_function() {
    assert_eq!(value("fn() { [if (true) { return 1; }]; 2 }();"), Object::Integer(1));
    assert_eq!(value("let id = fn(x) { x }; fn() { id(if (true) { return 3; }); 4 }();"),
               Object::Integer(3));
    assert_eq!(value("fn() { let x = 1 + if (true) { return 5; }; x }();"), Object::Integer(5));
    assert_eq!(value(r#"fn() { let h = {"k": if (true) { return 6; }}; 7 }();"#), Object::Integer(6));
    assert_eq!(value("fn() { (if (true) { return 8; })(1); 9 }();"), Object::Integer(8));
}

#[test]
fn control_markers_are_never_stored() {
    let source = "let a = []; fn() { append(a, if (true) { return 1; }); }(); a;";
    assert_eq!(value(source).to_string(), "[]");
}

#[test]
fn break_outside_of_a_loop() {
    assert_eq!(error_message("break;"), "break outside of a loop");
    assert_eq!(error_message("let f = fn() { break; }; f();"), "break outside of a loop");
}

#[test]
fn sessions_keep_their_bindings() {
    let session = Session::new();
    session.run("let x = 40;").unwrap();
    session.run("let addTwo = fn(n) { n + 2 };").unwrap();
    assert_eq!(session.run("addTwo(x)").unwrap(), Some(Object::Integer(42)));
}

#[test]
fn parse_errors_skip_evaluation() {
    let session = Session::new();
    let Err(InterpreterError::Parse(errors)) = session.run("let a = 1; let = 2;") else {
        panic!("expected parse errors");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(session.env().borrow().get("a"), None);
}
