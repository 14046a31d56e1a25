//! Per-call checking state.
//!
//! A [`CheckSession`] owns the binding table of one call chain. Arguments
//! are checked as they arrive and the return value once the implementation
//! has run. Callback arguments are wrapped so that calls through them are
//! checked against the same table, which lets a variable bound by an
//! argument constrain what a callback may return.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use tracing::instrument;
use tydef_diag::{DiagnosticError, Locus};
use tydef_types::{Type, param_key};
use tydef_value::{Function, Value};

use crate::bindings::BindingTable;
use crate::render::render;
use crate::resolve::{Failure, Resolver};
use crate::signature::Signature;
use crate::trace::CheckStep;

#[derive(Debug, Default, Clone)]
struct SessionState {
    bindings: BindingTable,
    trace: Option<Vec<CheckStep>>,
}

/// Checking state for one call chain of a signature.
pub struct CheckSession {
    signature: Rc<Signature>,
    env: Rc<[Type]>,
    state: Rc<RefCell<SessionState>>,
}

/// Start checking a call of `signature` under `env`.
pub fn begin_check(signature: Rc<Signature>, env: Rc<[Type]>) -> CheckSession {
    CheckSession::begin(signature, env)
}

impl CheckSession {
    pub fn begin(signature: Rc<Signature>, env: Rc<[Type]>) -> Self {
        Self {
            signature,
            env,
            state: Rc::new(RefCell::new(SessionState::default())),
        }
    }

    /// An independent copy: later checks on either side do not affect the
    /// other.
    pub fn fork(&self) -> Self {
        Self {
            signature: self.signature.clone(),
            env: self.env.clone(),
            state: Rc::new(RefCell::new(self.state.borrow().clone())),
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Start recording resolver steps.
    pub fn enable_tracing(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.trace.is_none() {
            state.trace = Some(Vec::new());
        }
    }

    /// Steps recorded since tracing was enabled.
    pub fn trace(&self) -> Vec<CheckStep> {
        self.state.borrow().trace.clone().unwrap_or_default()
    }

    /// Current bindings.
    pub fn bindings(&self) -> Ref<'_, BindingTable> {
        Ref::map(self.state.borrow(), |state| &state.bindings)
    }

    /// Check the argument at `index` and return the updated bindings.
    #[instrument(level = "trace", skip_all, fields(function = self.signature.name(), index = index))]
    pub fn check_argument(
        &self,
        index: usize,
        value: &Value,
    ) -> Result<BindingTable, DiagnosticError> {
        let ty = self.signature.params().get(index).ok_or_else(|| {
            self.fail(&Failure::ArgumentCount {
                expected: self.signature.arity(),
                args: vec![value.clone()],
            })
        })?;
        check_at(
            &self.signature,
            &self.env,
            &self.state,
            ty,
            &Locus::at(index),
            std::slice::from_ref(value),
        )?;
        Ok(self.state.borrow().bindings.clone())
    }

    /// Check the implementation's result. Function-typed results are
    /// returned wrapped.
    #[instrument(level = "trace", skip_all, fields(function = self.signature.name()))]
    pub fn check_return(&self, value: Value) -> Result<Value, DiagnosticError> {
        let locus = Locus::at(self.signature.arity());
        let ty = self.signature.return_type();
        check_at(
            &self.signature,
            &self.env,
            &self.state,
            ty,
            &locus,
            std::slice::from_ref(&value),
        )?;
        Ok(self.wrap(ty, &locus, value))
    }

    /// Wrap every callback argument so calls through it are checked.
    pub fn wrap_arguments(&self, args: Vec<Value>) -> Vec<Value> {
        args.into_iter()
            .enumerate()
            .map(|(index, arg)| match self.signature.params().get(index) {
                Some(ty) => self.wrap(ty, &Locus::at(index), arg),
                None => arg,
            })
            .collect()
    }

    fn wrap(&self, ty: &Type, locus: &Locus, value: Value) -> Value {
        wrap_callback(&self.signature, &self.env, &self.state, ty, locus, value)
    }

    fn fail(&self, failure: &Failure) -> DiagnosticError {
        render(&self.signature, &self.env, failure).into()
    }
}

/// Run the resolver for one position. The state borrow ends before this
/// returns.
fn check_at(
    signature: &Signature,
    env: &[Type],
    state: &RefCell<SessionState>,
    ty: &Type,
    locus: &Locus,
    values: &[Value],
) -> Result<(), DiagnosticError> {
    let outcome = {
        let mut guard = state.borrow_mut();
        let SessionState { bindings, trace } = &mut *guard;
        let mut resolver = Resolver::new(env, signature.constraints());
        if let Some(trace) = trace.as_mut() {
            resolver = resolver.with_trace(trace);
        }
        resolver.satisfy(bindings, ty, locus, values)
    };
    outcome.map_err(|failure| render(signature, env, &failure).into())
}

/// If `ty` is a callback signature and `value` a function, a function that
/// checks every call against `ty` at `locus`. Anything else is returned as
/// is.
fn wrap_callback(
    signature: &Rc<Signature>,
    env: &Rc<[Type]>,
    state: &Rc<RefCell<SessionState>>,
    ty: &Type,
    locus: &Locus,
    value: Value,
) -> Value {
    let Type::Function(types) = ty else {
        return value;
    };
    let Some(inner) = value.as_function().cloned() else {
        return value;
    };
    let Some((ret, params)) = types.split_last() else {
        return value;
    };
    let params: Rc<[Type]> = Rc::from(params);
    let ret = ret.clone();
    let signature = signature.clone();
    let env = env.clone();
    let state = state.clone();
    let locus = locus.clone();
    let name = inner.name().to_string();
    let display = ty.format();

    let wrapped = Function::with_display(name, params.len(), display, move |args| {
        if args.len() != params.len() {
            let failure = Failure::CallbackArity {
                locus: locus.clone(),
                expected: params.len(),
                args: args.to_vec(),
            };
            return Err(render(&signature, &env, &failure).into());
        }
        let mut checked = Vec::with_capacity(args.len());
        for (i, (param, arg)) in params.iter().zip(args).enumerate() {
            let at = locus.child(param_key(i + 1));
            check_at(&signature, &env, &state, param, &at, std::slice::from_ref(arg))?;
            checked.push(wrap_callback(&signature, &env, &state, param, &at, arg.clone()));
        }
        let result = inner.call(&checked)?;
        let at = locus.child(param_key(params.len() + 1));
        check_at(&signature, &env, &state, &ret, &at, std::slice::from_ref(&result))?;
        Ok(wrap_callback(&signature, &env, &state, &ret, &at, result))
    });
    Value::Function(wrapped)
}
