//! Type descriptors for tydef.
//!
//! A [`Type`] describes a set of runtime values: a leaf predicate, a
//! parameterised container with child-value extractors, an enumeration, a
//! record shape, a callback signature, or a type variable to be resolved
//! per call. Descriptors are immutable and cheap to clone; parametric
//! instantiations of one constructor share its predicate and extractors.

pub mod builtins;
mod layout;

pub use layout::TypeLayout;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

use tydef_diag::{Category, Diagnostic, DiagnosticError};
use tydef_value::{Value, show};

/// Membership predicate of a single type (ancestors excluded).
pub type TestFn = Rc<dyn Fn(&Value) -> bool>;

/// Extracts the child values a parametric type holds at one parameter.
pub type ExtractFn = Rc<dyn Fn(&Value) -> Vec<Value>>;

/// Key naming the `n`th type parameter (1-based), as used in paths.
pub fn param_key(n: usize) -> String {
    format!("${n}")
}

// ---------------------------------------------------------------------------
// Construction errors
// ---------------------------------------------------------------------------

/// A malformed type declaration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
    #[error("type names must not be empty")]
    EmptyName,
    #[error("a function type must declare at least a return type")]
    EmptyFunction,
    #[error("record field ‘{0}’ is declared more than once")]
    DuplicateField(String),
    #[error("‘{0}’ is not a valid record field name")]
    InvalidFieldName(String),
    #[error("record field ‘{field}’ cannot have type ‘{ty}’")]
    InvalidFieldType { field: String, ty: String },
    #[error("enumeration ‘{0}’ must have at least one member")]
    EmptyEnum(String),
}

impl From<ConstructionError> for DiagnosticError {
    fn from(err: ConstructionError) -> Self {
        DiagnosticError::new(Diagnostic::error(
            Category::Construction,
            format!("Invalid type declaration\n\n{err}.\n"),
        ))
    }
}

// ---------------------------------------------------------------------------
// Descriptor payloads
// ---------------------------------------------------------------------------

/// A named type constructor shared by all of its instantiations.
pub struct Constructor {
    name: String,
    url: String,
    supertypes: Vec<Type>,
    test: TestFn,
    extractors: Vec<ExtractFn>,
}

impl Constructor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn arity(&self) -> usize {
        self.extractors.len()
    }
}

/// A fixed set of literal members compared by external representation.
pub struct EnumType {
    name: String,
    url: String,
    members: Vec<Value>,
    shown: BTreeSet<String>,
}

impl EnumType {
    pub fn members(&self) -> &[Value] {
        &self.members
    }
}

/// A record shape, structural (`name == None`) or nominal.
pub struct RecordType {
    name: Option<String>,
    url: String,
    supertypes: Vec<Type>,
    /// Sorted by field name.
    fields: Vec<(String, Type)>,
}

impl RecordType {
    pub fn fields(&self) -> &[(String, Type)] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Type> {
        self.fields
            .binary_search_by(|(k, _)| k.as_str().cmp(name))
            .ok()
            .map(|idx| &self.fields[idx].1)
    }
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A type descriptor.
#[derive(Clone)]
pub enum Type {
    /// Not yet determined; matches every value. Parameter of empty containers.
    Unknown,
    /// No single type fits all the values observed.
    Inconsistent,
    /// The empty parameter list of a thunk.
    NoArguments,
    /// Matches every value.
    Any,
    Nullary(Rc<Constructor>),
    Unary(Rc<Constructor>, Box<Type>),
    Binary(Rc<Constructor>, Box<Type>, Box<Type>),
    Enum(Rc<EnumType>),
    Record(Rc<RecordType>),
    /// Parameter types followed by the return type.
    Function(Rc<[Type]>),
    Variable(Rc<str>),
    UnaryVariable(Rc<str>, Box<Type>),
    BinaryVariable(Rc<str>, Box<Type>, Box<Type>),
}

/// Where and on which value a concrete check failed.
#[derive(Debug, Clone)]
pub struct Invalid {
    pub path: Vec<String>,
    pub value: Value,
}

impl Type {
    pub fn nullary(
        name: impl Into<String>,
        url: impl Into<String>,
        supertypes: Vec<Type>,
        test: impl Fn(&Value) -> bool + 'static,
    ) -> Type {
        Type::Nullary(Rc::new(Constructor {
            name: name.into(),
            url: url.into(),
            supertypes,
            test: Rc::new(test),
            extractors: Vec::new(),
        }))
    }

    pub fn unary(
        name: impl Into<String>,
        url: impl Into<String>,
        supertypes: Vec<Type>,
        test: impl Fn(&Value) -> bool + 'static,
        extract: impl Fn(&Value) -> Vec<Value> + 'static,
        param: Type,
    ) -> Type {
        Type::Unary(
            Rc::new(Constructor {
                name: name.into(),
                url: url.into(),
                supertypes,
                test: Rc::new(test),
                extractors: vec![Rc::new(extract)],
            }),
            Box::new(param),
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn binary(
        name: impl Into<String>,
        url: impl Into<String>,
        supertypes: Vec<Type>,
        test: impl Fn(&Value) -> bool + 'static,
        extract1: impl Fn(&Value) -> Vec<Value> + 'static,
        extract2: impl Fn(&Value) -> Vec<Value> + 'static,
        param1: Type,
        param2: Type,
    ) -> Type {
        Type::Binary(
            Rc::new(Constructor {
                name: name.into(),
                url: url.into(),
                supertypes,
                test: Rc::new(test),
                extractors: vec![Rc::new(extract1), Rc::new(extract2)],
            }),
            Box::new(param1),
            Box::new(param2),
        )
    }

    pub fn enumeration(
        name: impl Into<String>,
        url: impl Into<String>,
        members: Vec<Value>,
    ) -> Result<Type, ConstructionError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConstructionError::EmptyName);
        }
        if members.is_empty() {
            return Err(ConstructionError::EmptyEnum(name));
        }
        let shown = members.iter().map(show).collect();
        Ok(Type::Enum(Rc::new(EnumType {
            name,
            url: url.into(),
            members,
            shown,
        })))
    }

    /// A structural record: any object holding (at least) these fields.
    pub fn record<K: Into<String>>(
        fields: impl IntoIterator<Item = (K, Type)>,
    ) -> Result<Type, ConstructionError> {
        Ok(Type::Record(Rc::new(RecordType {
            name: None,
            url: String::new(),
            supertypes: Vec::new(),
            fields: sorted_fields(fields)?,
        })))
    }

    /// A nominal record: displayed by name, checked by structure.
    pub fn named_record<K: Into<String>>(
        name: impl Into<String>,
        url: impl Into<String>,
        supertypes: Vec<Type>,
        fields: impl IntoIterator<Item = (K, Type)>,
    ) -> Result<Type, ConstructionError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConstructionError::EmptyName);
        }
        Ok(Type::Record(Rc::new(RecordType {
            name: Some(name),
            url: url.into(),
            supertypes,
            fields: sorted_fields(fields)?,
        })))
    }

    pub fn variable(name: impl AsRef<str>) -> Type {
        Type::Variable(Rc::from(name.as_ref()))
    }

    /// A type variable standing for a unary constructor, e.g. `f a`.
    pub fn unary_variable(name: impl AsRef<str>, param: Type) -> Type {
        Type::UnaryVariable(Rc::from(name.as_ref()), Box::new(param))
    }

    pub fn binary_variable(name: impl AsRef<str>, param1: Type, param2: Type) -> Type {
        Type::BinaryVariable(Rc::from(name.as_ref()), Box::new(param1), Box::new(param2))
    }

    /// A callback signature: parameter types then the return type.
    ///
    /// A lone leading `NoArguments` parameter denotes a thunk.
    pub fn function(types: Vec<Type>) -> Result<Type, ConstructionError> {
        let types = match types.as_slice() {
            [] => return Err(ConstructionError::EmptyFunction),
            [Type::NoArguments, ret] => vec![ret.clone()],
            _ => types,
        };
        Ok(Type::Function(Rc::from(types)))
    }

    /// `() -> t`
    pub fn thunk(ret: Type) -> Type {
        Type::Function(Rc::from(vec![ret]))
    }

    /// `t -> Boolean`
    pub fn predicate(param: Type) -> Type {
        Type::Function(Rc::from(vec![param, builtins::boolean()]))
    }

    /// An ad-hoc type recognising values by their stable type identifier.
    pub fn foreign(identifier: impl Into<String>) -> Type {
        let identifier = identifier.into();
        let expected = identifier.clone();
        Type::nullary(identifier, "", Vec::new(), move |value| {
            value.foreign_identifier() == Some(expected.as_str())
        })
    }

    // -- Introspection --

    pub fn name(&self) -> Option<&str> {
        match self {
            Type::Nullary(c) | Type::Unary(c, _) | Type::Binary(c, _, _) => Some(c.name()),
            Type::Enum(e) => Some(e.name.as_str()),
            Type::Record(r) => r.name.as_deref(),
            Type::Variable(n) | Type::UnaryVariable(n, _) | Type::BinaryVariable(n, _, _) => {
                Some(n.as_ref())
            }
            Type::Any => Some("Any"),
            Type::Unknown | Type::Inconsistent | Type::NoArguments | Type::Function(_) => None,
        }
    }

    /// Documentation link, if the type carries one.
    pub fn url(&self) -> Option<&str> {
        let url = match self {
            Type::Nullary(c) | Type::Unary(c, _) | Type::Binary(c, _, _) => c.url(),
            Type::Enum(e) => e.url.as_str(),
            Type::Record(r) => r.url.as_str(),
            _ => "",
        };
        (!url.is_empty()).then_some(url)
    }

    /// Number of type parameters.
    pub fn arity(&self) -> usize {
        match self {
            Type::Unary(..) | Type::UnaryVariable(..) => 1,
            Type::Binary(..) | Type::BinaryVariable(..) => 2,
            _ => 0,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(
            self,
            Type::Variable(_) | Type::UnaryVariable(..) | Type::BinaryVariable(..)
        )
    }

    pub fn supertypes(&self) -> &[Type] {
        match self {
            Type::Nullary(c) | Type::Unary(c, _) | Type::Binary(c, _, _) => {
                c.supertypes.as_slice()
            }
            Type::Record(r) => r.supertypes.as_slice(),
            _ => &[],
        }
    }

    /// Type parameters in key order.
    pub fn params(&self) -> Vec<&Type> {
        match self {
            Type::Unary(_, p) | Type::UnaryVariable(_, p) => vec![p],
            Type::Binary(_, p1, p2) | Type::BinaryVariable(_, p1, p2) => vec![p1, p2],
            _ => Vec::new(),
        }
    }

    /// Nested positions with their keys: `$1`, `$2` for parameters and
    /// callback slots, field names for records.
    pub fn children(&self) -> Vec<(String, &Type)> {
        match self {
            Type::Record(r) => r.fields.iter().map(|(k, t)| (k.clone(), t)).collect(),
            Type::Function(types) => types
                .iter()
                .enumerate()
                .map(|(i, t)| (param_key(i + 1), t))
                .collect(),
            _ => self
                .params()
                .into_iter()
                .enumerate()
                .map(|(i, t)| (param_key(i + 1), t))
                .collect(),
        }
    }

    /// Child values held at the `index`th child position (0-based).
    pub fn extract(&self, index: usize, value: &Value) -> Vec<Value> {
        match self {
            Type::Unary(c, _) | Type::Binary(c, _, _) => c
                .extractors
                .get(index)
                .map(|extract| extract(value))
                .unwrap_or_default(),
            Type::Record(r) => r
                .fields
                .get(index)
                .map(|(k, _)| vec![value.field(k)])
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Whether `value` has the `index`th child position at all. Only record
    /// fields can be absent; an absent field is not the same as one holding
    /// `undefined`.
    pub fn holds_child(&self, index: usize, value: &Value) -> bool {
        match self {
            Type::Record(r) => r
                .fields
                .get(index)
                .is_some_and(|(k, _)| value.as_object().is_some_and(|o| o.contains(k))),
            _ => true,
        }
    }

    /// Rebuild a parametric type with new parameters. Other types are
    /// returned unchanged.
    pub fn with_params(&self, params: Vec<Type>) -> Type {
        let mut params = params.into_iter();
        let mut next = |old: &Type| Box::new(params.next().unwrap_or_else(|| old.clone()));
        match self {
            Type::Unary(c, p) => Type::Unary(c.clone(), next(p)),
            Type::Binary(c, p1, p2) => {
                let p1 = next(p1);
                Type::Binary(c.clone(), p1, next(p2))
            }
            Type::UnaryVariable(n, p) => Type::UnaryVariable(n.clone(), next(p)),
            Type::BinaryVariable(n, p1, p2) => {
                let p1 = next(p1);
                Type::BinaryVariable(n.clone(), p1, next(p2))
            }
            other => other.clone(),
        }
    }

    // -- Membership --

    /// The type's own predicate. Ancestors are not consulted.
    pub fn test(&self, value: &Value) -> bool {
        match self {
            Type::Unknown | Type::Any => true,
            Type::Inconsistent | Type::NoArguments => false,
            Type::Nullary(c) | Type::Unary(c, _) | Type::Binary(c, _, _) => (c.test)(value),
            Type::Enum(e) => e.shown.contains(&show(value)),
            Type::Record(_) => value.as_object().is_some(),
            Type::Function(_) => value.as_function().is_some(),
            Type::Variable(_) | Type::UnaryVariable(..) | Type::BinaryVariable(..) => true,
        }
    }

    /// The predicates of every transitive supertype, then this type's own.
    pub fn test_chain(&self, value: &Value) -> bool {
        self.supertypes().iter().all(|s| s.test_chain(value)) && self.test(value)
    }

    /// Concrete membership: the ancestor chain plus every extracted child
    /// against its parameter or field type. Unknown parameters and type
    /// variables accept anything.
    pub fn validate(&self, value: &Value) -> Result<(), Invalid> {
        if !self.test_chain(value) {
            return Err(Invalid {
                path: Vec::new(),
                value: value.clone(),
            });
        }
        if self.is_variable() || matches!(self, Type::Function(_)) {
            return Ok(());
        }
        for (index, (key, child)) in self.children().into_iter().enumerate() {
            if !self.holds_child(index, value) {
                return Err(Invalid {
                    path: vec![key],
                    value: Value::Undefined,
                });
            }
            for item in self.extract(index, value) {
                child.validate(&item).map_err(|mut invalid| {
                    invalid.path.insert(0, key.clone());
                    invalid
                })?;
            }
        }
        Ok(())
    }

    /// False when `Inconsistent` occurs anywhere among the parameters.
    pub fn is_consistent(&self) -> bool {
        match self {
            Type::Inconsistent => false,
            Type::Unary(_, p) => p.is_consistent(),
            Type::Binary(_, p1, p2) => p1.is_consistent() && p2.is_consistent(),
            _ => true,
        }
    }

    /// Same constructor, ignoring parameters.
    pub fn same_constructor(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Nullary(a), Type::Nullary(b))
            | (Type::Unary(a, _), Type::Unary(b, _))
            | (Type::Binary(a, _, _), Type::Binary(b, _, _)) => a.name == b.name,
            (Type::UnaryVariable(a, _), Type::UnaryVariable(b, _))
            | (Type::BinaryVariable(a, _, _), Type::BinaryVariable(b, _, _)) => a == b,
            _ => self == other,
        }
    }

    /// Canonical display.
    pub fn format(&self) -> String {
        self.layout(false).text
    }
}

fn sorted_fields<K: Into<String>>(
    fields: impl IntoIterator<Item = (K, Type)>,
) -> Result<Vec<(String, Type)>, ConstructionError> {
    let mut sorted: Vec<(String, Type)> = Vec::new();
    for (key, ty) in fields {
        let key = key.into();
        if key.is_empty() || key.starts_with('$') {
            return Err(ConstructionError::InvalidFieldName(key));
        }
        if matches!(ty, Type::Inconsistent | Type::NoArguments) {
            return Err(ConstructionError::InvalidFieldType {
                field: key,
                ty: ty.format(),
            });
        }
        match sorted.binary_search_by(|(k, _)| k.cmp(&key)) {
            Ok(_) => return Err(ConstructionError::DuplicateField(key)),
            Err(idx) => sorted.insert(idx, (key, ty)),
        }
    }
    Ok(sorted)
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Type::Unknown, Type::Unknown)
            | (Type::Inconsistent, Type::Inconsistent)
            | (Type::NoArguments, Type::NoArguments)
            | (Type::Any, Type::Any) => true,
            (Type::Nullary(a), Type::Nullary(b)) => a.name == b.name,
            (Type::Unary(a, p), Type::Unary(b, q)) => a.name == b.name && p == q,
            (Type::Binary(a, p1, p2), Type::Binary(b, q1, q2)) => {
                a.name == b.name && p1 == q1 && p2 == q2
            }
            (Type::Enum(a), Type::Enum(b)) => a.name == b.name && a.shown == b.shown,
            (Type::Record(a), Type::Record(b)) => a.name == b.name && a.fields == b.fields,
            (Type::Function(a), Type::Function(b)) => a == b,
            (Type::Variable(a), Type::Variable(b)) => a == b,
            (Type::UnaryVariable(a, p), Type::UnaryVariable(b, q)) => a == b && p == q,
            (Type::BinaryVariable(a, p1, p2), Type::BinaryVariable(b, q1, q2)) => {
                a == b && p1 == q1 && p2 == q2
            }
            _ => false,
        }
    }
}

impl Eq for Type {}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({})", self.format())
    }
}

// ---------------------------------------------------------------------------
// Type classes
// ---------------------------------------------------------------------------

/// A named predicate a type variable's values may be required to satisfy.
#[derive(Clone)]
pub struct TypeClass {
    name: Rc<str>,
    url: Rc<str>,
    test: TestFn,
}

impl TypeClass {
    pub fn new(
        name: impl AsRef<str>,
        url: impl AsRef<str>,
        test: impl Fn(&Value) -> bool + 'static,
    ) -> Self {
        Self {
            name: Rc::from(name.as_ref()),
            url: Rc::from(url.as_ref()),
            test: Rc::new(test),
        }
    }

    /// Full, possibly namespaced, name (`my-package/Semigroup`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without its namespace (`Semigroup`).
    pub fn short_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    pub fn url(&self) -> Option<&str> {
        (!self.url.is_empty()).then_some(&*self.url)
    }

    pub fn test(&self, value: &Value) -> bool {
        (self.test)(value)
    }
}

/// Type-class requirements per type-variable name.
pub type Constraints = BTreeMap<String, Vec<TypeClass>>;

impl PartialEq for TypeClass {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeClass({})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::builtins::*;
    use super::*;

    #[test]
    fn record_fields_are_sorted() {
        let point = Type::record([("y", number()), ("x", number())]).unwrap();
        let Type::Record(r) = &point else {
            panic!("expected record");
        };
        assert_eq!(r.fields()[0].0, "x");
        assert_eq!(r.fields()[1].0, "y");
        assert_eq!(r.field("y"), Some(&number()));
        assert_eq!(point.format(), "{ x :: Number, y :: Number }");
    }

    #[test]
    fn record_construction_errors() {
        assert_eq!(
            Type::record([("x", number()), ("x", string())]).err(),
            Some(ConstructionError::DuplicateField("x".to_string()))
        );
        assert_eq!(
            Type::record([("$1", number())]).err(),
            Some(ConstructionError::InvalidFieldName("$1".to_string()))
        );
        assert!(matches!(
            Type::record([("x", Type::Inconsistent)]),
            Err(ConstructionError::InvalidFieldType { .. })
        ));
        assert_eq!(
            Type::function(Vec::new()).err(),
            Some(ConstructionError::EmptyFunction)
        );
        let err = DiagnosticError::from(ConstructionError::EmptyEnum("Color".to_string()));
        assert_eq!(err.category(), Category::Construction);
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(array(string()), array(string()));
        assert_ne!(array(string()), array(number()));
        assert_ne!(array(string()), str_map(string()));
        assert_eq!(Type::variable("a"), Type::variable("a"));
        assert_ne!(Type::variable("a"), Type::variable("b"));
        assert!(array(string()).same_constructor(&array(number())));
    }

    #[test]
    fn ancestor_chain_is_checked_in_full() {
        // PositiveInteger's own test only checks the sign.
        let pos = positive_integer();
        assert!(pos.test(&Value::from(1.5)));
        assert!(!pos.test_chain(&Value::from(1.5)));
        assert!(pos.test_chain(&Value::from(3)));
        assert!(!pos.test_chain(&Value::from("3")));
    }

    #[test]
    fn validate_reports_the_failing_path() {
        let point = Type::record([("x", number()), ("y", number())]).unwrap();
        let value = Value::object([("x", Value::from(0)), ("y", Value::Null)]);
        let invalid = point.validate(&value).unwrap_err();
        assert_eq!(invalid.path, vec!["y".to_string()]);
        assert!(matches!(invalid.value, Value::Null));

        let nested = array(array(number()));
        let value = Value::array([Value::array([Value::from(1), Value::from("x")])]);
        let invalid = nested.validate(&value).unwrap_err();
        assert_eq!(invalid.path, vec!["$1".to_string(), "$1".to_string()]);
    }

    #[test]
    fn records_accept_extra_fields() {
        let point = Type::record([("x", number())]).unwrap();
        let value = Value::object([("x", Value::from(0)), ("z", Value::from("extra"))]);
        assert!(point.validate(&value).is_ok());
        let missing = point.validate(&Value::object([("z", Value::from(1))])).unwrap_err();
        assert_eq!(missing.path, vec!["x".to_string()]);
        assert!(matches!(missing.value, Value::Undefined));
    }

    #[test]
    fn absent_fields_differ_from_undefined_fields() {
        for field in [any(), Type::Unknown, undefined(), Type::variable("a")] {
            let record = Type::record([("x", field), ("y", number())]).unwrap();
            let absent = Value::object([("y", Value::from(1))]);
            let err = record.validate(&absent).unwrap_err();
            assert_eq!(err.path, vec!["x".to_string()]);
            assert!(!record.holds_child(0, &absent));

            let explicit = Value::object([("x", Value::Undefined), ("y", Value::from(1))]);
            assert!(record.validate(&explicit).is_ok());
        }
    }

    #[test]
    fn enum_membership_uses_representation() {
        let color = Type::enumeration(
            "Color",
            "",
            vec![Value::from("red"), Value::from("green")],
        )
        .unwrap();
        assert!(color.test(&Value::from("red")));
        assert!(!color.test(&Value::from("blue")));
        assert_eq!(color.format(), "Color");
    }

    #[test]
    fn consistency_looks_through_parameters() {
        assert!(array(Type::Unknown).is_consistent());
        assert!(!array(Type::Inconsistent).is_consistent());
        assert!(!array2(number(), Type::Inconsistent).is_consistent());
    }

    #[test]
    fn with_params_rebuilds_instantiations() {
        let t = array2(Type::Unknown, Type::Unknown).with_params(vec![string(), number()]);
        assert_eq!(t, array2(string(), number()));
        assert_eq!(t.format(), "Array2 String Number");
    }

    #[test]
    fn foreign_types_match_by_identifier() {
        let t = Type::foreign("my-package/Date");
        let a = Value::tagged("my-package/Date", [("ms", Value::from(0))]);
        let b = Value::tagged("my-package/Date", [("ms", Value::from(1))]);
        assert!(t.test(&a) && t.test(&b));
        assert!(!t.test(&Value::Date(0.0)));
    }

    #[test]
    fn type_class_names() {
        let semigroup = TypeClass::new("my-package/Semigroup", "", |v| v.as_str().is_some());
        assert_eq!(semigroup.short_name(), "Semigroup");
        assert_eq!(semigroup.url(), None);
        assert!(semigroup.test(&Value::from("x")));
    }
}
