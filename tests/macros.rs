use std::rc::Rc;

use marmoset::{
    Session,
    ast::Expression,
    error::InterpreterError,
    get_result,
    interpreter::{
        macro_expansion::{define_macros, expand_macros},
        object::{Environment, Object},
        parser::parse,
    },
};

fn value(source: &str) -> Object {
    match get_result(source) {
        Ok(Some(value)) => value,
        other => panic!("{source:?} should produce a value, got {other:?}"),
    }
}

fn error_message(source: &str) -> String {
    match get_result(source) {
        Err(InterpreterError::Runtime(error)) => error.message(),
        other => panic!("{source:?} should fail at runtime, got {other:?}"),
    }
}

fn expand(source: &str) -> String {
    let (mut program, errors) = parse(source);
    assert!(errors.is_empty(), "unexpected parse errors: {errors:?}");
    let macro_env = Environment::new();
    define_macros(&mut program, &macro_env);
    expand_macros(program, &macro_env).to_string()
}

#[test]
fn unquote_splices_evaluated_values() {
    let Object::Quote(node) = value("quote(unquote(4+4));") else {
        panic!("expected a quote");
    };
    assert_eq!(*node, Expression::IntegerLiteral { value: 8, line: 1 });
}

#[test]
fn quote_captures_syntax() {
    let cases = [("quote(5)", "QUOTE(5)"),
                 ("quote(5 + 8)", "QUOTE((5 + 8))"),
                 ("quote(foobar)", "QUOTE(foobar)"),
                 ("quote(foobar + barfoo)", "QUOTE((foobar + barfoo))")];

    for (source, expected) in cases {
        assert_eq!(value(source).to_string(), expected, "source: {source}");
    }
}

#[test]
fn unquote_converts_values_back_to_syntax() {
    let cases = [("quote(unquote(4))", "QUOTE(4)"),
                 ("quote(8 + unquote(4 + 4))", "QUOTE((8 + 8))"),
                 ("quote(unquote(4 + 4) + 8)", "QUOTE((8 + 8))"),
                 ("let foobar = 8; quote(foobar)", "QUOTE(foobar)"),
                 ("let foobar = 8; quote(unquote(foobar))", "QUOTE(8)"),
                 ("quote(unquote(true))", "QUOTE(true)"),
                 ("quote(unquote(true == false))", "QUOTE(false)"),
                 ("quote(unquote(quote(4 + 4)))", "QUOTE((4 + 4))"),
                 ("let q = quote(4 + 4); quote(unquote(4 + 4) + unquote(q))", "QUOTE((8 + (4 + 4)))"),
                 ("quote(unquote(1.5))", "QUOTE(1.5)"),
                 (r#"quote(unquote("a" + "b"))"#, r#"QUOTE("ab")"#),
                 ("quote(unquote([1, 2 * 3]))", "QUOTE([1, 6])"),
                 (r#"quote(unquote({"k": 1}))"#, r#"QUOTE({"k": 1})"#),
                 ("quote(unquote(if (false) { 1 }))", "QUOTE(if (false) {  })")];

    for (source, expected) in cases {
        assert_eq!(value(source).to_string(), expected, "source: {source}");
    }
}

#[test]
fn unquote_rejects_values_without_syntax() {
    assert_eq!(error_message("quote(unquote(fn(x) { x }))"), "cannot unquote a value of type FUNCTION");
    assert_eq!(error_message("quote(unquote(len))"), "cannot unquote a value of type BUILTIN");
}

#[test]
fn unquote_rejects_self_containing_collections() {
    assert_eq!(error_message("let a = [1]; append(a, a); quote(unquote(a));"),
               "cannot unquote a self-containing ARRAY");
    assert_eq!(value("let a = [1]; quote(unquote([a, a]));").to_string(), "QUOTE([[1], [1]])");
}

#[test]
fn return_inside_unquote_leaves_the_function() {
    assert_eq!(value("fn() { quote(unquote(if (true) { return 1; })); 2 }();"), Object::Integer(1));
}

#[test]
fn quote_takes_exactly_one_argument() {
    assert_eq!(error_message("quote(1, 2)"), "wrong number of arguments. got=2, want=1");
    assert_eq!(error_message("quote(unquote())"), "wrong number of arguments. got=0, want=1");
}

#[test]
fn unquote_errors_propagate() {
    assert_eq!(error_message("quote(unquote(missing))"), "identifier not found: missing");
}

#[test]
fn define_macros_moves_definitions_out_of_the_program() {
    let source = "
        let number = 1;
        let function = fn(x, y) { x + y };
        let mymacro = macro(x, y) { x + y; };
    ";
    let (mut program, _) = parse(source);
    let macro_env = Environment::new();
    define_macros(&mut program, &macro_env);

    assert_eq!(program.statements.len(), 2);
    assert!(macro_env.borrow().get("number").is_none());
    assert!(macro_env.borrow().get("function").is_none());

    let Some(Object::Macro(closure)) = macro_env.borrow().get("mymacro") else {
        panic!("mymacro should be a macro");
    };
    let names = closure.parameters
                       .iter()
                       .map(|p| p.name.as_str())
                       .collect::<Vec<_>>();
    assert_eq!(names, ["x", "y"]);
    assert_eq!(closure.body.to_string(), "(x + y);");
    assert!(Rc::ptr_eq(&closure.env, &macro_env));
}

#[test]
fn later_definitions_win() {
    let source = "
        let m = macro() { quote(1) };
        let m = macro() { quote(2) };
        m();
    ";
    assert_eq!(value(source), Object::Integer(2));
}

#[test]
fn expands_macro_calls() {
    let cases = [("let infixExpression = macro() { quote(1 + 2); }; infixExpression();", "(1 + 2);"),
                 ("let reverse = macro(a, b) { quote(unquote(b) - unquote(a)); }; reverse(2 + 2, 10 - 5);",
                  "((10 - 5) - (2 + 2));")];

    for (source, expected) in cases {
        assert_eq!(expand(source), expected, "source: {source}");
    }
}

#[test]
fn unless_macro() {
    let source = r#"
        let unless = macro(condition, consequence, alternative) {
            quote(if (!(unquote(condition))) {
                unquote(consequence);
            } else {
                unquote(alternative);
            });
        };

        unless(10 > 5, print("not greater"), print("greater"));
    "#;
    assert_eq!(expand(source),
               r#"if ((!(10 > 5))) { print("not greater"); } else { print("greater"); };"#);

    let choose = r#"
        let unless = macro(condition, consequence, alternative) {
            quote(if (!(unquote(condition))) { unquote(consequence); } else { unquote(alternative); });
        };
        unless(10 > 5, "not greater", "greater");
    "#;
    assert_eq!(value(choose), Object::from("greater"));
}

#[test]
fn macro_arguments_are_not_evaluated() {
    let source = "
        let ignore = macro(x) { quote(1) };
        ignore(undefined_name + 1);
    ";
    assert_eq!(value(source), Object::Integer(1));
}

#[test]
fn macros_expand_inside_nested_code() {
    let source = "
        let double = macro(x) { quote(unquote(x) * 2) };
        let f = fn(n) { [double(n), double(n + 1)] };
        f(3);
    ";
    assert_eq!(value(source).to_string(), "[6, 8]");
}

#[test]
fn expansion_is_idempotent() {
    let source = "let reverse = macro(a, b) { quote(unquote(b) - unquote(a)); }; reverse(1, 2); reverse(3, 4);";
    let (mut program, _) = parse(source);
    let macro_env = Environment::new();
    define_macros(&mut program, &macro_env);

    let once = expand_macros(program, &macro_env);
    let printed = once.to_string();
    let twice = expand_macros(once, &macro_env);

    assert_eq!(twice.to_string(), printed);
}

#[test]
fn macros_must_return_quotes() {
    let error = match get_result("let m = macro() { 1 };\nm();") {
        Err(InterpreterError::Runtime(error)) => error,
        other => panic!("expected a runtime error, got {other:?}"),
    };
    assert_eq!(error.message(), "we only support returning AST-nodes from macros");
    assert_eq!(error.line, Some(2));
}

#[test]
fn macro_body_errors_surface_at_evaluation() {
    assert_eq!(error_message("let m = macro(x) { y };\nm(1);"), "identifier not found: y");
    assert!(expand("let m = macro(x) { y }; m(1);").starts_with("ERROR("));
}

#[test]
fn sessions_keep_their_macros() {
    let session = Session::new();
    assert_eq!(session.run("let twice = macro(x) { quote(unquote(x) * 2) };").unwrap(), None);
    assert_eq!(session.run("twice(21)").unwrap(), Some(Object::Integer(42)));
}
