//! Type-variable binding table.
//!
//! One table per call chain. Each bound variable carries the types it may
//! still denote and every value observed for it, keyed by signature
//! position. Bindings only narrow: a later observation filters or refines
//! the existing candidates, it never re-admits a dropped one.

use std::collections::BTreeMap;

use tydef_diag::Locus;
use tydef_types::Type;
use tydef_value::Value;

/// What is known about one type variable.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    /// Admissible types, in environment order.
    pub types: Vec<Type>,
    /// Values seen for the variable, in observation order per position.
    pub observations: BTreeMap<Locus, Vec<Value>>,
}

#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    vars: BTreeMap<String, Binding>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.vars.get(name)
    }

    /// Admissible types of a variable that has been bound at least once.
    pub fn types(&self, name: &str) -> Option<&[Type]> {
        self.vars.get(name).map(|b| b.types.as_slice())
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Record values observed for `name` at `locus`.
    pub fn observe(&mut self, name: &str, locus: &Locus, values: &[Value]) {
        self.vars
            .entry(name.to_string())
            .or_default()
            .observations
            .entry(locus.clone())
            .or_default()
            .extend(values.iter().cloned());
    }

    /// Replace the admissible types of `name`.
    pub fn bind(&mut self, name: &str, types: Vec<Type>) {
        self.vars.entry(name.to_string()).or_default().types = types;
    }

    /// All observations of `name`, in declaration order.
    pub fn observations(&self, name: &str) -> Vec<(Locus, Vec<Value>)> {
        self.vars
            .get(name)
            .map(|b| {
                b.observations
                    .iter()
                    .map(|(locus, values)| (locus.clone(), values.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
