//! Built-in types and the default environment.
//!
//! Each function returns a fresh descriptor; parametric builtins take their
//! parameter types. Number refinements form a hierarchy through supertypes
//! (`PositiveInteger` → `Integer` → `ValidNumber` → `Number`), so a type's
//! own predicate only states what it adds.

use tydef_value::{Array, Value, is_valid_timestamp};

use crate::Type;

const DOCS: &str = "https://docs.rs/tydef-types/latest/tydef_types/builtins/";

/// Largest integer representable without loss in a double.
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn url(item: &str) -> String {
    format!("{DOCS}fn.{item}.html")
}

fn number_where(value: &Value, pred: impl Fn(f64) -> bool) -> bool {
    value.as_number().is_some_and(pred)
}

fn items(value: &Value) -> Vec<Value> {
    value.as_array().map(Array::to_vec).unwrap_or_default()
}

fn item(value: &Value, index: usize) -> Vec<Value> {
    value
        .as_array()
        .and_then(|xs| xs.get(index))
        .into_iter()
        .collect()
}

// ---------------------------------------------------------------------------
// Sentinels
// ---------------------------------------------------------------------------

pub fn any() -> Type {
    Type::Any
}

pub fn unknown() -> Type {
    Type::Unknown
}

pub fn inconsistent() -> Type {
    Type::Inconsistent
}

pub fn no_arguments() -> Type {
    Type::NoArguments
}

// ---------------------------------------------------------------------------
// Host types
// ---------------------------------------------------------------------------

/// Any function, regardless of signature.
pub fn any_function() -> Type {
    Type::nullary("Function", url("any_function"), Vec::new(), |v| {
        v.as_function().is_some()
    })
}

pub fn array(a: Type) -> Type {
    Type::unary(
        "Array",
        url("array"),
        Vec::new(),
        |v| v.as_array().is_some(),
        items,
        a,
    )
}

/// The empty array.
pub fn array0() -> Type {
    Type::nullary("Array0", url("array0"), vec![array(Type::Unknown)], |v| {
        v.as_array().is_some_and(Array::is_empty)
    })
}

/// Arrays of exactly one element.
pub fn array1(a: Type) -> Type {
    Type::unary(
        "Array1",
        url("array1"),
        vec![array(Type::Unknown)],
        |v| v.as_array().is_some_and(|xs| xs.len() == 1),
        items,
        a,
    )
}

/// Arrays of exactly two elements, typed independently.
pub fn array2(a: Type, b: Type) -> Type {
    Type::binary(
        "Array2",
        url("array2"),
        vec![array(Type::Unknown)],
        |v| v.as_array().is_some_and(|xs| xs.len() == 2),
        |v| item(v, 0),
        |v| item(v, 1),
        a,
        b,
    )
}

pub fn boolean() -> Type {
    Type::nullary("Boolean", url("boolean"), Vec::new(), |v| {
        matches!(v, Value::Bool(_))
    })
}

pub fn date() -> Type {
    Type::nullary("Date", url("date"), Vec::new(), |v| {
        matches!(v, Value::Date(_))
    })
}

/// Dates whose timestamp denotes an actual instant.
pub fn valid_date() -> Type {
    Type::nullary("ValidDate", url("valid_date"), vec![date()], |v| {
        matches!(v, Value::Date(ms) if is_valid_timestamp(*ms))
    })
}

pub fn error() -> Type {
    Type::nullary("Error", url("error"), Vec::new(), |v| {
        matches!(v, Value::Error(_))
    })
}

pub fn null() -> Type {
    Type::nullary("Null", url("null"), Vec::new(), |v| matches!(v, Value::Null))
}

pub fn undefined() -> Type {
    Type::nullary("Undefined", url("undefined"), Vec::new(), |v| {
        matches!(v, Value::Undefined)
    })
}

// -- Numbers --

pub fn number() -> Type {
    Type::nullary("Number", url("number"), Vec::new(), |v| {
        v.as_number().is_some()
    })
}

pub fn valid_number() -> Type {
    Type::nullary("ValidNumber", url("valid_number"), vec![number()], |v| {
        number_where(v, |n| !n.is_nan())
    })
}

pub fn finite_number() -> Type {
    Type::nullary(
        "FiniteNumber",
        url("finite_number"),
        vec![valid_number()],
        |v| number_where(v, f64::is_finite),
    )
}

pub fn positive_number() -> Type {
    Type::nullary("PositiveNumber", url("positive_number"), vec![number()], |v| {
        number_where(v, |n| n > 0.0)
    })
}

pub fn negative_number() -> Type {
    Type::nullary("NegativeNumber", url("negative_number"), vec![number()], |v| {
        number_where(v, |n| n < 0.0)
    })
}

pub fn non_zero_finite_number() -> Type {
    Type::nullary(
        "NonZeroFiniteNumber",
        url("non_zero_finite_number"),
        vec![finite_number()],
        |v| number_where(v, |n| n != 0.0),
    )
}

/// Whole numbers within the safe-integer range.
pub fn integer() -> Type {
    Type::nullary("Integer", url("integer"), vec![valid_number()], |v| {
        number_where(v, |n| n.trunc() == n && n.abs() <= MAX_SAFE_INTEGER)
    })
}

pub fn non_negative_integer() -> Type {
    Type::nullary(
        "NonNegativeInteger",
        url("non_negative_integer"),
        vec![integer()],
        |v| number_where(v, |n| n >= 0.0),
    )
}

pub fn positive_integer() -> Type {
    Type::nullary("PositiveInteger", url("positive_integer"), vec![integer()], |v| {
        number_where(v, |n| n > 0.0)
    })
}

pub fn non_zero_integer() -> Type {
    Type::nullary("NonZeroInteger", url("non_zero_integer"), vec![integer()], |v| {
        number_where(v, |n| n != 0.0)
    })
}

// -- Objects --

/// Plain objects: untagged field maps.
pub fn object() -> Type {
    Type::nullary("Object", url("object"), Vec::new(), |v| {
        v.as_object().is_some_and(|o| o.tag().is_none())
    })
}

pub fn reg_exp() -> Type {
    Type::nullary("RegExp", url("reg_exp"), Vec::new(), |v| {
        matches!(v, Value::RegExp(_))
    })
}

pub fn string() -> Type {
    Type::nullary("String", url("string"), Vec::new(), |v| v.as_str().is_some())
}

/// Plain objects used as string-keyed maps with uniformly typed values.
pub fn str_map(a: Type) -> Type {
    Type::unary(
        "StrMap",
        url("str_map"),
        vec![object()],
        |_| true,
        |v| v.as_object().map(|o| o.values()).unwrap_or_default(),
        a,
    )
}

/// `null` or a member of `a`.
pub fn nullable(a: Type) -> Type {
    Type::unary(
        "Nullable",
        url("nullable"),
        Vec::new(),
        |_| true,
        |v| match v {
            Value::Null => Vec::new(),
            other => vec![other.clone()],
        },
        a,
    )
}

/// The default environment: the types a type variable may be bound to
/// unless the caller supplies its own list.
pub fn env() -> Vec<Type> {
    vec![
        any_function(),
        array(Type::Unknown),
        boolean(),
        date(),
        error(),
        null(),
        number(),
        object(),
        reg_exp(),
        str_map(Type::Unknown),
        string(),
        undefined(),
    ]
}
