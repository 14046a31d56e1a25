//! End-to-end behaviour of checked functions, with the rendered reports
//! pinned as inline snapshots.

use std::collections::BTreeMap;

use insta::assert_snapshot;
use tydef::builtins::{array, number, string};
use tydef::{
    Array, Category, Checker, Constraints, DiagnosticError, Options, Type, Value, create, show,
};

fn a() -> Type {
    Type::variable("a")
}

fn checker() -> Checker {
    create(Options::default())
}

fn call(f: &Value, args: &[Value]) -> Result<Value, DiagnosticError> {
    f.as_function().expect("a function").call(args)
}

fn identity(checker: &Checker) -> Value {
    checker
        .def("id", Constraints::new(), vec![a(), a()], |args| Ok(args[0].clone()))
        .unwrap()
}

fn add(checker: &Checker) -> Value {
    checker
        .def(
            "add",
            Constraints::new(),
            vec![number(), number(), number()],
            |args| {
                let x = args[0].as_number().unwrap_or_default();
                let y = args[1].as_number().unwrap_or_default();
                Ok(Value::from(x + y))
            },
        )
        .unwrap()
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[test]
fn invalid_return_value() {
    let add = create(Options::default())
        .def(
            "add",
            Constraints::new(),
            vec![number(), number(), number()],
            |_| Ok(Value::from("XXX")),
        )
        .unwrap();
    let err = call(&add, &[Value::from(2), Value::from(2)]).unwrap_err();
    assert_eq!(err.category(), Category::InvalidValue);
    assert_snapshot!(err.message(), @r#"
    Invalid value

    add :: Number -> Number -> Number
                               ^^^^^^
                                 1

    1)  "XXX" :: String

    The value at position 1 is not a member of ‘Number’.

    See https://docs.rs/tydef-types/latest/tydef_types/builtins/fn.number.html for information about the Number type.
    "#);
}

#[test]
fn unrecognized_value_in_an_empty_environment() {
    let checker = create(Options {
        check_types: true,
        env: Vec::new(),
    });
    let err = call(&identity(&checker), &[Value::regexp("x", "g")]).unwrap_err();
    assert_eq!(err.category(), Category::UnrecognizedValue);
    assert_snapshot!(err.message(), @r#"
    Unrecognized value

    id :: a -> a
          ^
          1

    1)  /x/g :: (no types)

    The environment is empty! Polymorphic functions require a non-empty environment.
    "#);
}

#[test]
fn type_variable_violation_names_both_positions() {
    let a00 = checker()
        .def("a00", Constraints::new(), vec![a(), a(), a()], |args| {
            Ok(args[0].clone())
        })
        .unwrap();
    let err = call(&a00, &[Value::from(1), Value::from("a")]).unwrap_err();
    assert_eq!(err.category(), Category::TypeVariableViolation);
    assert_snapshot!(err.message(), @r#"
    Type-variable constraint violation

    a00 :: a -> a -> a
           ^    ^
           1    2

    1)  1 :: Number

    2)  "a" :: String

    Since there is no type of which all the above values are members, the type-variable constraint has been violated.
    "#);
}

#[test]
fn self_containing_array_terminates() {
    let z = Array::new(Vec::new());
    z.push(Value::Array(z.clone()));
    let err = call(&identity(&checker()), &[Value::Array(z)]).unwrap_err();
    assert_eq!(err.category(), Category::TypeVariableViolation);
    assert_snapshot!(err.message(), @r#"
    Type-variable constraint violation

    id :: a -> a
          ^
          1

    1)  [<Circular>] :: Array ???

    Since there is no type of which all the above values are members, the type-variable constraint has been violated.
    "#);
}

#[test]
fn record_failure_points_at_the_field() {
    let point = Type::record([("x", number()), ("y", number())]).unwrap();
    let norm = checker()
        .def("norm", Constraints::new(), vec![point, number()], |_| {
            Ok(Value::from(0))
        })
        .unwrap();
    let value = Value::object([("x", Value::from(0)), ("y", Value::Null)]);
    let err = call(&norm, &[value]).unwrap_err();
    assert_eq!(err.category(), Category::InvalidValue);
    assert_eq!(err.diagnostic().positions[0].path, vec!["y".to_string()]);
    assert_snapshot!(err.message(), @r#"
    Invalid value

    norm :: { x :: Number, y :: Number } -> Number
                                ^^^^^^
                                  1

    1)  null :: Null

    The value at position 1 is not a member of ‘Number’.

    See https://docs.rs/tydef-types/latest/tydef_types/builtins/fn.number.html for information about the Number type.
    "#);
}

#[test]
fn arity_above_nine_is_rejected_at_declaration() {
    let err = checker()
        .def("f", Constraints::new(), vec![number(); 12], |_| Ok(Value::from(0)))
        .unwrap_err();
    assert_eq!(err.category(), Category::Range);
    assert_snapshot!(err.message(), @r#"
    ‘f’ cannot define a function with arity greater than nine
    "#);
}

#[test]
fn callback_results_are_checked() {
    let callback = Type::function(vec![number(), number()]).unwrap();
    let apply = checker()
        .def(
            "apply",
            Constraints::new(),
            vec![callback, number(), number()],
            |args| match args[0].as_function() {
                Some(f) => f.call(&args[1..]),
                None => Ok(Value::Undefined),
            },
        )
        .unwrap();
    let shout = Value::function("shout", 1, |_| Ok(Value::from("x")));
    let err = call(&apply, &[shout, Value::from(1)]).unwrap_err();
    assert_eq!(err.category(), Category::InvalidValue);
    assert_snapshot!(err.message(), @r#"
    Invalid value

    apply :: (Number -> Number) -> Number -> Number
                        ^^^^^^
                          1

    1)  "x" :: String

    The value at position 1 is not a member of ‘Number’.

    See https://docs.rs/tydef-types/latest/tydef_types/builtins/fn.number.html for information about the Number type.
    "#);
}

#[test]
fn too_many_arguments_to_a_partial_application() {
    let inc = call(&add(&checker()), &[Value::from(1)]).unwrap();
    let err = call(&inc, &[Value::from(3), Value::from(4)]).unwrap_err();
    assert_eq!(err.category(), Category::ArityViolation);
    assert_snapshot!(err.message(), @r#"
    ‘add’ applied to the wrong number of arguments

    add :: Number -> Number -> Number

    Expected one argument but received two arguments:

      - 3
      - 4
    "#);
}

// ---------------------------------------------------------------------------
// Currying
// ---------------------------------------------------------------------------

#[test]
fn every_grouping_gives_the_same_result() {
    let add = add(&checker());
    let one = Value::from(1);
    let two = Value::from(2);
    let results = [
        call(&add, &[one.clone(), two.clone()]),
        call(&add, &[one.clone()]).and_then(|f| call(&f, &[two.clone()])),
        call(&add, &[Value::Placeholder, two.clone()]).and_then(|f| call(&f, &[one.clone()])),
    ];
    for result in results {
        assert_eq!(result.unwrap().as_number(), Some(3.0));
    }
}

#[test]
fn partial_applications_display_their_signature() {
    let inc = call(&add(&checker()), &[Value::from(1)]).unwrap();
    assert_eq!(show(&inc), "add :: Number -> Number -> Number");
    assert_eq!(inc.as_function().unwrap().arity(), 1);
}

#[test]
fn partial_applications_do_not_share_bindings() {
    let pair = checker()
        .def(
            "pair",
            Constraints::new(),
            vec![array(a()), array(a()), array(a())],
            |args| Ok(args[1].clone()),
        )
        .unwrap();
    let empty = call(&pair, &[Value::array(Vec::new())]).unwrap();
    assert!(call(&empty, &[Value::array([Value::from("s")])]).is_ok());
    // The String binding from the call above is not visible here.
    assert!(call(&empty, &[Value::array([Value::from(1)])]).is_ok());
}

#[test]
fn unchecked_checkers_only_curry() {
    let checker = create(Options {
        check_types: false,
        ..Options::default()
    });
    let concat = checker
        .def(
            "concat",
            Constraints::new(),
            vec![string(), string(), string()],
            |args| Ok(Value::from(format!("{}{}", show(&args[0]), show(&args[1])))),
        )
        .unwrap();
    let out = call(&concat, &[Value::from(1)])
        .and_then(|f| call(&f, &[Value::Null]))
        .unwrap();
    assert_eq!(out.as_str(), Some("1null"));
}

#[test]
fn checked_errors_propagate_through_host_code() {
    let checker = checker();
    let add = add(&checker);
    let twice = checker
        .def("twice", Constraints::new(), vec![a(), a()], move |args| {
            let once = call(&add, &[args[0].clone(), args[0].clone()])?;
            call(&add, &[once.clone(), once])
        })
        .unwrap();
    assert_eq!(call(&twice, &[Value::from(2)]).unwrap().as_number(), Some(8.0));
    let err = call(&twice, &[Value::from("2")]).unwrap_err();
    assert!(err.message().starts_with("Invalid value\n\nadd :: "));
}

#[test]
fn type_class_constraints_are_enforced() {
    let mut constraints = BTreeMap::new();
    constraints.insert(
        "a".to_string(),
        vec![tydef::TypeClass::new("my-package/Semigroup", "", |v: &Value| {
            v.as_str().is_some() || v.as_array().is_some()
        })],
    );
    let concat = checker()
        .def("concat", constraints, vec![a(), a(), a()], |args| Ok(args[0].clone()))
        .unwrap();
    assert!(call(&concat, &[Value::from("a"), Value::from("b")]).is_ok());
    let err = call(&concat, &[Value::from(1), Value::from(2)]).unwrap_err();
    assert_eq!(err.category(), Category::TypeClassViolation);
    assert!(err.message().contains("Semigroup a"));
}
