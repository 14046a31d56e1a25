//! Workloads shared by the benchmarks.

use std::collections::BTreeMap;

use tydef::builtins::number;
use tydef::{Constraints, DiagnosticError, Options, Type, TypeClass, Value, create};

/// `len` small arrays of numbers.
pub fn build_number_arrays(len: usize) -> Vec<Value> {
    (0..len)
        .map(|i| Value::array((0..4).map(|j| Value::from((i * j) as f64))))
        .collect()
}

/// An object of `len` single-field objects.
pub fn build_nested_map(len: usize) -> Value {
    let inner = |i: usize| Value::object([("n", Value::from(i as f64))]);
    Value::object((0..len).map(|i| (format!("k{i}"), inner(i))))
}

/// `add :: Number -> Number -> Number`.
pub fn build_add(check_types: bool) -> Result<Value, DiagnosticError> {
    let checker = create(Options {
        check_types,
        ..Options::default()
    });
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
}

/// `concat :: Semigroup a => a -> a -> a` over arrays.
pub fn build_concat() -> Result<Value, DiagnosticError> {
    let a = Type::variable("a");
    let semigroup = TypeClass::new("Semigroup", "", |v: &Value| v.as_array().is_some());
    let constraints = BTreeMap::from([("a".to_string(), vec![semigroup])]);
    create(Options::default())
        .def(
            "concat",
            constraints,
            vec![a.clone(), a.clone(), a],
            |args| {
                let mut items = args[0].as_array().map(|xs| xs.to_vec()).unwrap_or_default();
                items.extend(args[1].as_array().map(|xs| xs.to_vec()).unwrap_or_default());
                Ok(Value::array(items))
            },
        )
}

