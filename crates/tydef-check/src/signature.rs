//! Declared function signatures and their rendered layout.

use std::ops::Range;

use tydef_diag::{Category, Diagnostic, DiagnosticError, Locus};
use tydef_types::{ConstructionError, Constraints, Type, TypeLayout};

/// Largest number of parameters a signature may declare.
pub const MAX_ARITY: usize = 9;

/// Name, type-class constraints and positional types of a checked function.
/// The last type is the return type.
#[derive(Debug, Clone)]
pub struct Signature {
    name: String,
    constraints: Constraints,
    types: Vec<Type>,
}

impl Signature {
    pub fn new(
        name: impl Into<String>,
        constraints: Constraints,
        types: Vec<Type>,
    ) -> Result<Self, DiagnosticError> {
        let name = name.into();
        if types.is_empty() {
            return Err(ConstructionError::EmptyFunction.into());
        }
        if types.len() - 1 > MAX_ARITY {
            return Err(Diagnostic::error(
                Category::Range,
                format!("‘{name}’ cannot define a function with arity greater than nine\n"),
            )
            .into());
        }
        Ok(Self {
            name,
            constraints,
            types,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn types(&self) -> &[Type] {
        &self.types
    }

    pub fn arity(&self) -> usize {
        self.types.len() - 1
    }

    pub fn params(&self) -> &[Type] {
        &self.types[..self.arity()]
    }

    pub fn return_type(&self) -> &Type {
        &self.types[self.arity()]
    }

    /// `name :: Constraints => T1 -> T2 -> R`
    pub fn format(&self) -> String {
        self.layout().text
    }

    pub(crate) fn layout(&self) -> SignatureLayout {
        SignatureLayout::new(self)
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Rendered signature with the columns of every position and constraint.
pub(crate) struct SignatureLayout {
    pub text: String,
    /// Column offset and layout of each positional type.
    positions: Vec<(usize, TypeLayout)>,
    /// Columns of each `Class var` in the constraint prefix.
    constraints: Vec<((String, String), Range<usize>)>,
}

impl SignatureLayout {
    fn new(sig: &Signature) -> Self {
        let mut text = format!("{} :: ", sig.name);
        let mut col = text.chars().count();
        let push = |text: &mut String, col: &mut usize, s: &str| {
            text.push_str(s);
            *col += s.chars().count();
        };

        let pairs: Vec<(String, String)> = sig
            .constraints
            .iter()
            .flat_map(|(var, classes)| {
                classes
                    .iter()
                    .map(move |class| (var.clone(), class.short_name().to_string()))
            })
            .collect();
        let mut constraints = Vec::new();
        if !pairs.is_empty() {
            let multiple = pairs.len() > 1;
            if multiple {
                push(&mut text, &mut col, "(");
            }
            for (i, (var, class)) in pairs.into_iter().enumerate() {
                if i > 0 {
                    push(&mut text, &mut col, ", ");
                }
                let start = col;
                push(&mut text, &mut col, &format!("{class} {var}"));
                constraints.push(((var, class), start..col));
            }
            if multiple {
                push(&mut text, &mut col, ")");
            }
            push(&mut text, &mut col, " => ");
        }

        if sig.arity() == 0 {
            push(&mut text, &mut col, "() -> ");
        }
        let mut positions = Vec::with_capacity(sig.types.len());
        for (index, ty) in sig.types.iter().enumerate() {
            if index > 0 {
                push(&mut text, &mut col, " -> ");
            }
            let layout = ty.layout(matches!(ty, Type::Function(_)));
            positions.push((col, layout.clone()));
            push(&mut text, &mut col, &layout.text);
        }

        Self {
            text,
            positions,
            constraints,
        }
    }

    /// Columns of the sub-type at `locus`.
    pub fn span(&self, locus: &Locus) -> Option<Range<usize>> {
        let (offset, layout) = self.positions.get(locus.index)?;
        let span = layout.span(&locus.path)?;
        Some(offset + span.start..offset + span.end)
    }

    /// Columns of `Class var` in the constraint prefix.
    pub fn constraint_span(&self, var: &str, class: &str) -> Option<Range<usize>> {
        self.constraints
            .iter()
            .find(|((v, c), _)| v == var && c == class)
            .map(|(_, range)| range.clone())
    }
}
