//! Dynamic host values for tydef.
//!
//! The checker validates values of a dynamically typed host. This crate
//! models those values: primitives, plus arrays, objects and functions with
//! reference semantics. Cloning a reference value shares the referent, so a
//! value may contain itself, and [`Value::identity`] exposes the referent's
//! address for cycle detection.

pub mod show;

pub use show::{MAX_TIMESTAMP_MS, is_valid_timestamp, show, show_number, show_string};

use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use tydef_diag::DiagnosticError;

/// Signature of a host function body.
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, DiagnosticError>;

/// Custom printer for tagged objects.
pub type ShowHook = Rc<dyn Fn(&Object) -> String>;

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// A runtime value of the host language.
#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    /// Milliseconds since the Unix epoch; `NaN` is an invalid date.
    Date(f64),
    RegExp(Rc<RegExp>),
    Error(Rc<str>),
    Array(Array),
    Object(Object),
    Function(Function),
    /// Marks a skipped argument in a partial application.
    Placeholder,
}

/// A regular-expression literal. Only its source and flags are observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegExp {
    pub source: String,
    pub flags: String,
}

impl Value {
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Rc::from(s.as_ref()))
    }

    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(Array::new(items.into_iter().collect()))
    }

    /// A plain (untagged) object.
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Object(Object::new(None, fields))
    }

    /// An object carrying a stable type identifier.
    pub fn tagged<K: Into<String>>(
        tag: impl AsRef<str>,
        fields: impl IntoIterator<Item = (K, Value)>,
    ) -> Self {
        Value::Object(Object::new(Some(Rc::from(tag.as_ref())), fields))
    }

    pub fn function(
        name: impl AsRef<str>,
        arity: usize,
        body: impl Fn(&[Value]) -> Result<Value, DiagnosticError> + 'static,
    ) -> Self {
        Value::Function(Function::new(name, arity, body))
    }

    pub fn regexp(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Value::RegExp(Rc::new(RegExp {
            source: source.into(),
            flags: flags.into(),
        }))
    }

    pub fn error(message: impl AsRef<str>) -> Self {
        Value::Error(Rc::from(message.as_ref()))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Value::Placeholder)
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    /// Address of the shared referent for arrays, objects and functions.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Array(array) => Some(array.identity()),
            Value::Object(object) => Some(object.identity()),
            Value::Function(function) => Some(function.identity()),
            _ => None,
        }
    }

    /// Stable identifier of the value's runtime type.
    ///
    /// Tagged objects report their tag; everything else reports a builtin
    /// identifier. Recognition never depends on how a value was constructed.
    pub fn type_identifier(&self) -> &str {
        match self {
            Value::Undefined => "Undefined",
            Value::Null => "Null",
            Value::Bool(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Date(_) => "Date",
            Value::RegExp(_) => "RegExp",
            Value::Error(_) => "Error",
            Value::Array(_) => "Array",
            Value::Object(object) => object.tag().unwrap_or("Object"),
            Value::Function(_) => "Function",
            Value::Placeholder => "Placeholder",
        }
    }

    /// The tag of a tagged object; `None` for every other value.
    pub fn foreign_identifier(&self) -> Option<&str> {
        self.as_object().and_then(Object::tag)
    }

    /// Look up a field of an object. Missing fields and non-objects yield
    /// `Undefined`.
    pub fn field(&self, name: &str) -> Value {
        self.as_object()
            .and_then(|object| object.get(name))
            .unwrap_or(Value::Undefined)
    }
}

/// Equality by external representation.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    show(left) == show(right)
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&show(self))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&show(self))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

// ---------------------------------------------------------------------------
// Arrays
// ---------------------------------------------------------------------------

/// A shared, growable array.
#[derive(Clone)]
pub struct Array(Rc<RefCell<Vec<Value>>>);

impl Array {
    pub fn new(items: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(items)))
    }

    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    pub fn items(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    pub fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

// ---------------------------------------------------------------------------
// Objects
// ---------------------------------------------------------------------------

struct ObjectData {
    tag: Option<Rc<str>>,
    show: Option<ShowHook>,
    fields: RefCell<BTreeMap<String, Value>>,
}

/// A shared object: string-keyed fields plus an optional stable type tag.
#[derive(Clone)]
pub struct Object(Rc<ObjectData>);

impl Object {
    pub fn new<K: Into<String>>(
        tag: Option<Rc<str>>,
        fields: impl IntoIterator<Item = (K, Value)>,
    ) -> Self {
        Self(Rc::new(ObjectData {
            tag,
            show: None,
            fields: RefCell::new(fields.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }))
    }

    /// A tagged object printed by a custom hook.
    pub fn with_show<K: Into<String>>(
        tag: impl AsRef<str>,
        fields: impl IntoIterator<Item = (K, Value)>,
        show: impl Fn(&Object) -> String + 'static,
    ) -> Self {
        Self(Rc::new(ObjectData {
            tag: Some(Rc::from(tag.as_ref())),
            show: Some(Rc::new(show)),
            fields: RefCell::new(fields.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }))
    }

    pub fn tag(&self) -> Option<&str> {
        self.0.tag.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.0.fields.borrow().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.fields.borrow().contains_key(name)
    }

    pub fn insert(&self, name: impl Into<String>, value: Value) {
        self.0.fields.borrow_mut().insert(name.into(), value);
    }

    /// Field names in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.0.fields.borrow().keys().cloned().collect()
    }

    /// Field values in key order.
    pub fn values(&self) -> Vec<Value> {
        self.0.fields.borrow().values().cloned().collect()
    }

    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .fields
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub(crate) fn show_hook(&self) -> Option<&ShowHook> {
        self.0.show.as_ref()
    }

    pub fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

struct FunctionData {
    name: Rc<str>,
    arity: usize,
    display: Option<Rc<str>>,
    body: Box<NativeFn>,
}

/// A shared host function.
#[derive(Clone)]
pub struct Function(Rc<FunctionData>);

impl Function {
    pub fn new(
        name: impl AsRef<str>,
        arity: usize,
        body: impl Fn(&[Value]) -> Result<Value, DiagnosticError> + 'static,
    ) -> Self {
        Self(Rc::new(FunctionData {
            name: Rc::from(name.as_ref()),
            arity,
            display: None,
            body: Box::new(body),
        }))
    }

    /// A function whose printed form is `display` (checked functions print
    /// their signature).
    pub fn with_display(
        name: impl AsRef<str>,
        arity: usize,
        display: impl AsRef<str>,
        body: impl Fn(&[Value]) -> Result<Value, DiagnosticError> + 'static,
    ) -> Self {
        Self(Rc::new(FunctionData {
            name: Rc::from(name.as_ref()),
            arity,
            display: Some(Rc::from(display.as_ref())),
            body: Box::new(body),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Declared number of parameters.
    pub fn arity(&self) -> usize {
        self.0.arity
    }

    pub fn display(&self) -> Option<&str> {
        self.0.display.as_deref()
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, DiagnosticError> {
        (self.0.body)(args)
    }

    pub fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(function)
    }
}
