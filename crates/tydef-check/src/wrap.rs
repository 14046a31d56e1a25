//! Curried, checked functions.
//!
//! [`define`] turns an implementation into a host function that accepts its
//! arguments in any grouping, with placeholders (`__`) leaving slots for
//! later applications. Each application produces a new, independent partial
//! application; the binding table is copied rather than shared, so a
//! partial application can be reused.

use std::rc::Rc;

use tydef_diag::DiagnosticError;
use tydef_types::Type;
use tydef_value::{Function, Value};

use crate::render::render;
use crate::resolve::Failure;
use crate::session::CheckSession;
use crate::signature::Signature;

/// Host implementation of a checked function.
pub type Implementation = Rc<dyn Fn(&[Value]) -> Result<Value, DiagnosticError>>;

/// Wrap `implementation` as a curried function of `signature`. With
/// `check_types` off the function still curries but checks nothing.
pub fn define(
    signature: Signature,
    env: Rc<[Type]>,
    check_types: bool,
    implementation: Implementation,
) -> Value {
    tracing::debug!(
        function = signature.name(),
        arity = signature.arity(),
        check_types,
        "defining {}",
        signature.format()
    );
    let signature = Rc::new(signature);
    let session = check_types.then(|| CheckSession::begin(signature.clone(), env.clone()));
    Application {
        slots: vec![None; signature.arity()],
        signature,
        env,
        implementation,
        session,
    }
    .into_value()
}

/// A (possibly partial) application: which slots are filled and what the
/// checks so far have bound.
struct Application {
    signature: Rc<Signature>,
    env: Rc<[Type]>,
    implementation: Implementation,
    slots: Vec<Option<Value>>,
    session: Option<CheckSession>,
}

impl Application {
    fn fork(&self) -> Self {
        Self {
            signature: self.signature.clone(),
            env: self.env.clone(),
            implementation: self.implementation.clone(),
            slots: self.slots.clone(),
            session: self.session.as_ref().map(CheckSession::fork),
        }
    }

    fn open_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(index, _)| index)
            .collect()
    }

    fn apply(&self, args: &[Value]) -> Result<Value, DiagnosticError> {
        let open = self.open_slots();
        if args.len() > open.len() || (args.is_empty() && !open.is_empty()) {
            let failure = Failure::ArgumentCount {
                expected: open.len(),
                args: args.to_vec(),
            };
            return Err(render(&self.signature, &self.env, &failure).into());
        }

        let mut next = self.fork();
        for (arg, index) in args.iter().zip(open) {
            if arg.is_placeholder() {
                continue;
            }
            if let Some(session) = &next.session {
                session.check_argument(index, arg)?;
            }
            next.slots[index] = Some(arg.clone());
        }

        if next.slots.iter().all(Option::is_some) {
            next.invoke()
        } else {
            Ok(next.into_value())
        }
    }

    fn invoke(self) -> Result<Value, DiagnosticError> {
        let args: Vec<Value> = self.slots.into_iter().flatten().collect();
        match &self.session {
            None => (self.implementation)(&args),
            Some(session) => {
                let args = session.wrap_arguments(args);
                let result = (self.implementation)(&args)?;
                session.check_return(result)
            }
        }
    }

    fn into_value(self) -> Value {
        let name = self.signature.name().to_string();
        let display = self.signature.format();
        let arity = self.open_slots().len();
        Value::Function(Function::with_display(name, arity, display, move |args| {
            self.apply(args)
        }))
    }
}
