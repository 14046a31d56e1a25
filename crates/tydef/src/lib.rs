//! Typed definitions for dynamic values.
//!
//! A [`Checker`] holds an environment of types and defines curried
//! functions whose arguments and results are checked against a declared
//! signature:
//!
//! ```
//! use std::collections::BTreeMap;
//! use tydef::{Options, Value, builtins::number, create};
//!
//! let checker = create(Options::default());
//! let add = checker
//!     .def("add", BTreeMap::new(), vec![number(), number(), number()], |args| {
//!         let x = args[0].as_number().unwrap_or_default();
//!         let y = args[1].as_number().unwrap_or_default();
//!         Ok(Value::from(x + y))
//!     })
//!     .unwrap();
//! let add = add.as_function().unwrap();
//! assert_eq!(add.call(&[Value::from(2), Value::from(2)]).unwrap().as_number(), Some(4.0));
//! assert!(add.call(&[Value::from("2")]).is_err());
//! ```

use std::rc::Rc;

pub use tydef_check::{
    Binding, BindingTable, CheckAction, CheckSession, CheckStep, Failure, MAX_ARITY, Signature,
    begin_check, determine_types_loose, determine_types_strict,
};
pub use tydef_diag::{Category, Diagnostic, DiagnosticError, Locus};
pub use tydef_types::{ConstructionError, Constraints, Type, TypeClass, builtins};
pub use tydef_value::{Array, Function, Object, Value, show, values_equal};

/// Checker configuration.
#[derive(Debug, Clone)]
pub struct Options {
    /// When off, defined functions curry but check nothing.
    pub check_types: bool,
    /// Types available for classifying values at polymorphic positions.
    pub env: Vec<Type>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            check_types: true,
            env: builtins::env(),
        }
    }
}

/// Defines checked functions over one environment.
#[derive(Clone)]
pub struct Checker {
    check_types: bool,
    env: Rc<[Type]>,
}

pub fn create(options: Options) -> Checker {
    tracing::debug!(
        check_types = options.check_types,
        types = options.env.len(),
        "creating checker"
    );
    Checker {
        check_types: options.check_types,
        env: Rc::from(options.env),
    }
}

impl Checker {
    /// Wrap `implementation` as a curried function of the signature
    /// `name :: constraints => types[0] -> ... -> types[n]`.
    ///
    /// Fails at declaration for an empty type list or more than
    /// [`MAX_ARITY`] parameters.
    pub fn def(
        &self,
        name: impl AsRef<str>,
        constraints: Constraints,
        types: Vec<Type>,
        implementation: impl Fn(&[Value]) -> Result<Value, DiagnosticError> + 'static,
    ) -> Result<Value, DiagnosticError> {
        let signature = Signature::new(name.as_ref(), constraints, types)?;
        Ok(tydef_check::define(
            signature,
            self.env.clone(),
            self.check_types,
            Rc::new(implementation),
        ))
    }

    pub fn env(&self) -> &[Type] {
        &self.env
    }

    pub fn check_types(&self) -> bool {
        self.check_types
    }

    /// Whether `value` is a member of `ty` under this environment.
    pub fn test(&self, ty: &Type, value: &Value) -> bool {
        tydef_check::test(&self.env, ty, value)
    }

    /// Like [`Checker::test`], but reports where membership first failed.
    pub fn validate(&self, ty: &Type, value: &Value) -> Result<(), Failure> {
        tydef_check::validate(&self.env, ty, value)
    }

    /// Start a manual check of one call of `signature`.
    pub fn begin_check(&self, signature: Signature) -> CheckSession {
        begin_check(Rc::new(signature), self.env.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use builtins::{number, string};

    #[test]
    fn default_options_check_against_the_builtin_environment() {
        let checker = create(Options::default());
        assert!(checker.check_types());
        assert_eq!(checker.env().len(), builtins::env().len());
        assert!(checker.test(&number(), &Value::from(1)));
        assert!(!checker.test(&string(), &Value::from(1)));
    }

    #[test]
    fn declaration_errors_surface_from_def() {
        let checker = create(Options::default());
        let err = checker
            .def("nothing", Constraints::new(), Vec::new(), |_| Ok(Value::Null))
            .unwrap_err();
        assert_eq!(err.category(), Category::Construction);
    }

    #[test]
    fn manual_sessions_share_the_environment() {
        let checker = create(Options {
            check_types: true,
            env: vec![number()],
        });
        let a = Type::variable("a");
        let sig = Signature::new("id", Constraints::new(), vec![a.clone(), a]).unwrap();
        let session = checker.begin_check(sig);
        assert!(session.check_argument(0, &Value::from(1)).is_ok());
        let err = session.check_argument(0, &Value::from("x")).unwrap_err();
        assert_eq!(err.category(), Category::UnrecognizedValue);
    }
}
