//! Constraint resolution: checking values against a declared type while
//! threading the binding table.
//!
//! Concrete types are checked value by value and fail on the first
//! offender. Type variables aggregate everything observed at a position
//! before deciding, since an element type is only known once every element
//! has been seen.

use std::collections::BTreeSet;

use tydef_diag::Locus;
use tydef_types::{Constraints, Type, TypeClass, param_key};
use tydef_value::Value;

use crate::bindings::BindingTable;
use crate::classify::{common_foreign_identifier, determine_types_loose, expand_unknown};
use crate::trace::{CheckAction, CheckStep};

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

/// Why a check failed, before rendering.
#[derive(Debug, Clone)]
pub enum Failure {
    /// A value is not a member of the concrete type declared at `locus`.
    InvalidValue { locus: Locus, value: Value, ty: Type },
    /// Observations of `name` have no type in common.
    TypeVariableViolation {
        name: String,
        observations: Vec<(Locus, Vec<Value>)>,
    },
    /// A value bound to `var` fails one of its required type classes.
    TypeClassViolation {
        var: String,
        class: TypeClass,
        locus: Locus,
        value: Value,
    },
    /// A value belongs to no type in the environment.
    UnrecognizedValue { locus: Locus, value: Value },
    /// A wrapped callback was applied to the wrong number of arguments.
    CallbackArity {
        locus: Locus,
        expected: usize,
        args: Vec<Value>,
    },
    /// A checked function was applied to the wrong number of arguments.
    ArgumentCount { expected: usize, args: Vec<Value> },
}

impl Failure {
    /// Signature positions implicated, in declaration order.
    pub fn loci(&self) -> Vec<Locus> {
        match self {
            Failure::InvalidValue { locus, .. }
            | Failure::TypeClassViolation { locus, .. }
            | Failure::UnrecognizedValue { locus, .. }
            | Failure::CallbackArity { locus, .. } => vec![locus.clone()],
            Failure::TypeVariableViolation { observations, .. } => {
                observations.iter().map(|(locus, _)| locus.clone()).collect()
            }
            Failure::ArgumentCount { .. } => Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Checks values against declared types under one environment and one set
/// of type-class constraints.
pub struct Resolver<'a> {
    env: &'a [Type],
    constraints: &'a Constraints,
    trace: Option<&'a mut Vec<CheckStep>>,
}

impl<'a> Resolver<'a> {
    pub fn new(env: &'a [Type], constraints: &'a Constraints) -> Self {
        Self {
            env,
            constraints,
            trace: None,
        }
    }

    /// Record every step into `trace`.
    pub fn with_trace(mut self, trace: &'a mut Vec<CheckStep>) -> Self {
        self.trace = Some(trace);
        self
    }

    fn push_step(&mut self, action: CheckAction, locus: &Locus, ty: &Type, detail: String) {
        tracing::trace!(?action, %locus, ty = %ty, "{detail}");
        if let Some(trace) = self.trace.as_deref_mut() {
            trace.push(CheckStep {
                step: trace.len(),
                position: locus.index,
                path: locus.path.clone(),
                ty: ty.format(),
                action,
                detail,
            });
        }
    }

    /// Check `values`, all observed at `locus`, against `ty`.
    pub fn satisfy(
        &mut self,
        table: &mut BindingTable,
        ty: &Type,
        locus: &Locus,
        values: &[Value],
    ) -> Result<(), Failure> {
        match ty {
            Type::Unknown | Type::Any => {
                self.push_step(CheckAction::Accept, locus, ty, "matches any value".into());
                Ok(())
            }
            Type::Variable(name) => self.satisfy_variable(table, ty, name, 0, locus, values),
            Type::UnaryVariable(name, _) => {
                self.satisfy_variable(table, ty, name, 1, locus, values)?;
                self.satisfy_variable_params(table, ty, name, locus, values)
            }
            Type::BinaryVariable(name, _, _) => {
                self.satisfy_variable(table, ty, name, 2, locus, values)?;
                self.satisfy_variable_params(table, ty, name, locus, values)
            }
            _ => self.satisfy_concrete(table, ty, locus, values),
        }
    }

    fn satisfy_concrete(
        &mut self,
        table: &mut BindingTable,
        ty: &Type,
        locus: &Locus,
        values: &[Value],
    ) -> Result<(), Failure> {
        if let Some(value) = values.iter().find(|v| !ty.test_chain(v)) {
            self.push_step(CheckAction::Reject, locus, ty, format!("{value} is not a member"));
            return Err(Failure::InvalidValue {
                locus: locus.clone(),
                value: value.clone(),
                ty: ty.clone(),
            });
        }
        // Callback signatures are enforced when the callback is invoked.
        if matches!(ty, Type::Function(_)) {
            self.push_step(CheckAction::Accept, locus, ty, "callback deferred".into());
            return Ok(());
        }
        let children = ty.children();
        if children.is_empty() {
            self.push_step(CheckAction::Accept, locus, ty, "member".into());
            return Ok(());
        }
        self.push_step(CheckAction::Descend, locus, ty, format!("{} nested", children.len()));
        for (index, (key, child)) in children.into_iter().enumerate() {
            if values.iter().any(|v| !ty.holds_child(index, v)) {
                let at = locus.child(key);
                self.push_step(CheckAction::Reject, &at, child, "field missing".into());
                return Err(Failure::InvalidValue {
                    locus: at,
                    value: Value::Undefined,
                    ty: child.clone(),
                });
            }
            let nested: Vec<Value> = values.iter().flat_map(|v| ty.extract(index, v)).collect();
            self.satisfy(table, child, &locus.child(key), &nested)?;
        }
        Ok(())
    }

    fn satisfy_variable(
        &mut self,
        table: &mut BindingTable,
        ty: &Type,
        name: &str,
        var_arity: usize,
        locus: &Locus,
        values: &[Value],
    ) -> Result<(), Failure> {
        let constraints = self.constraints;
        if let Some(classes) = constraints.get(name) {
            for class in classes {
                if let Some(value) = values.iter().find(|v| !class.test(v)) {
                    self.push_step(
                        CheckAction::ClassCheck,
                        locus,
                        ty,
                        format!("{value} fails {}", class.short_name()),
                    );
                    return Err(Failure::TypeClassViolation {
                        var: name.to_string(),
                        class: class.clone(),
                        locus: locus.clone(),
                        value: value.clone(),
                    });
                }
            }
        }
        if values.is_empty() {
            return Ok(());
        }

        let first_binding = !table.is_bound(name);
        let candidates: Vec<Type> = match table.types(name) {
            Some(types) => types.to_vec(),
            None => self
                .env
                .iter()
                .filter(|t| t.arity() >= var_arity)
                .cloned()
                .collect(),
        };
        table.observe(name, locus, values);

        let mut narrowed = candidates;
        for value in values {
            narrowed = self.refine(&narrowed, value, var_arity);
        }
        if narrowed.is_empty()
            && first_binding
            && var_arity == 0
            && let Some(identifier) = common_foreign_identifier(values)
        {
            narrowed.push(Type::foreign(identifier));
        }

        if narrowed.is_empty() {
            if let Some(value) = values
                .iter()
                .find(|v| determine_types_loose(self.env, std::slice::from_ref(*v)).is_empty())
            {
                self.push_step(CheckAction::Reject, locus, ty, format!("{value} unrecognised"));
                return Err(Failure::UnrecognizedValue {
                    locus: locus.clone(),
                    value: value.clone(),
                });
            }
            self.push_step(CheckAction::Reject, locus, ty, format!("‘{name}’ has no type left"));
            return Err(Failure::TypeVariableViolation {
                name: name.to_string(),
                observations: table.observations(name),
            });
        }

        let action = if first_binding {
            CheckAction::Bind
        } else {
            CheckAction::Narrow
        };
        let detail = format!(
            "{name} := {}",
            narrowed.iter().map(Type::format).collect::<Vec<_>>().join(" | ")
        );
        self.push_step(action, locus, ty, detail);
        table.bind(name, narrowed);
        Ok(())
    }

    /// Candidates that still admit `value`, with their undetermined
    /// parameters instantiated from it. The trailing `var_arity` parameters
    /// belong to the variable's own arguments and stay as they are.
    fn refine(&self, candidates: &[Type], value: &Value, var_arity: usize) -> Vec<Type> {
        let mut out = Vec::new();
        for candidate in candidates {
            if candidate.validate(value).is_err() {
                continue;
            }
            let mut seen: BTreeSet<usize> = value.identity().into_iter().collect();
            for refined in expand_unknown(self.env, &mut seen, candidate, value, var_arity) {
                if refined.is_consistent() && !out.contains(&refined) {
                    out.push(refined);
                }
            }
        }
        out
    }

    /// Check the declared parameters of `f a` / `p a b` against the values
    /// the bound constructor holds there.
    fn satisfy_variable_params(
        &mut self,
        table: &mut BindingTable,
        ty: &Type,
        name: &str,
        locus: &Locus,
        values: &[Value],
    ) -> Result<(), Failure> {
        let bound = table.types(name).map(<[Type]>::to_vec).unwrap_or_default();
        let declared = ty.params();
        for (i, inner) in declared.iter().enumerate() {
            let mut nested = Vec::new();
            for value in values {
                let Some(shape) = bound.iter().find(|t| t.test_chain(value)) else {
                    continue;
                };
                if let Some(index) = (shape.arity() + i).checked_sub(declared.len()) {
                    nested.extend(shape.extract(index, value));
                }
            }
            self.satisfy(table, inner, &locus.child(param_key(i + 1)), &nested)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// One-shot checks
// ---------------------------------------------------------------------------

/// Whether `value` is a member of `ty` (which may be polymorphic) under
/// `env`, starting from an empty binding table.
pub fn test(env: &[Type], ty: &Type, value: &Value) -> bool {
    validate(env, ty, value).is_ok()
}

/// Like [`test`], reporting the failure.
pub fn validate(env: &[Type], ty: &Type, value: &Value) -> Result<(), Failure> {
    let constraints = Constraints::new();
    let mut table = BindingTable::new();
    Resolver::new(env, &constraints).satisfy(
        &mut table,
        ty,
        &Locus::at(0),
        std::slice::from_ref(value),
    )
}
