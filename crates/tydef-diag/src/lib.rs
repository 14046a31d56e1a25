//! Error reporting for tydef.
//!
//! Every check failure is surfaced as exactly one [`Diagnostic`]: a failure
//! [`Category`], the positions in the declared signature it implicates, and
//! the fully rendered human-readable report. Diagnostics are produced by
//! `tydef-check` (and `tydef-types` for malformed declarations) and carried
//! through host code inside a [`DiagnosticError`].

use std::fmt;

// ---------------------------------------------------------------------------
// Failure categories
// ---------------------------------------------------------------------------

/// The kind of failure a diagnostic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// A type or signature declaration is malformed.
    Construction,
    /// A value at a concrete position failed its type's predicate.
    InvalidValue,
    /// Observations of one type variable share no admissible type.
    TypeVariableViolation,
    /// A value bound to a constrained variable fails a type-class test.
    TypeClassViolation,
    /// A variable-bound value belongs to no type in the environment.
    UnrecognizedValue,
    /// A function was applied to the wrong number of arguments.
    ArityViolation,
    /// A signature declares more parameters than can be supported.
    Range,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Construction,
        Category::InvalidValue,
        Category::TypeVariableViolation,
        Category::TypeClassViolation,
        Category::UnrecognizedValue,
        Category::ArityViolation,
        Category::Range,
    ];

    pub fn all() -> &'static [Category] {
        &Self::ALL
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Construction => "construction",
            Category::InvalidValue => "invalid_value",
            Category::TypeVariableViolation => "type_variable_violation",
            Category::TypeClassViolation => "type_class_violation",
            Category::UnrecognizedValue => "unrecognized_value",
            Category::ArityViolation => "arity_violation",
            Category::Range => "range",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Category::Construction => "A type or signature declaration is malformed.",
            Category::InvalidValue => {
                "A value is not a member of the type declared at its position."
            }
            Category::TypeVariableViolation => {
                "Values observed for one type variable have no type in common."
            }
            Category::TypeClassViolation => {
                "A value does not satisfy a type-class constraint on its type variable."
            }
            Category::UnrecognizedValue => {
                "A value is not a member of any type in the environment."
            }
            Category::ArityViolation => {
                "A function was applied to the wrong number of arguments."
            }
            Category::Range => "A signature declares too many parameters.",
        }
    }

    /// Whether failures of this kind are detected at declaration time rather
    /// than at call time.
    pub fn is_declaration_time(self) -> bool {
        matches!(self, Category::Construction | Category::Range)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Positions within a signature
// ---------------------------------------------------------------------------

/// A position in a declared signature: the parameter index (the return slot
/// is `arity`) plus the path of parameter keys / field names leading to the
/// sub-type responsible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locus {
    pub index: usize,
    pub path: Vec<String>,
}

impl Locus {
    pub fn at(index: usize) -> Self {
        Self {
            index,
            path: Vec::new(),
        }
    }

    pub fn new(index: usize, path: Vec<String>) -> Self {
        Self { index, path }
    }

    /// The same locus extended by one key.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut path = self.path.clone();
        path.push(key.into());
        Self {
            index: self.index,
            path,
        }
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)?;
        for key in &self.path {
            write!(f, ".{key}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Diagnostic
// ---------------------------------------------------------------------------

/// A structured failure with its rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: Category,
    /// Full report text; the first line is the title.
    pub message: String,
    /// Signature positions implicated, in declaration order.
    pub positions: Vec<Locus>,
    /// Documentation link for the offending type or type class, if any.
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(category: Category, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            positions: Vec::new(),
            help: None,
        }
    }

    pub fn at(mut self, locus: Locus) -> Self {
        self.positions.push(locus);
        self
    }

    pub fn with_positions(mut self, positions: impl IntoIterator<Item = Locus>) -> Self {
        self.positions.extend(positions);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// The first line of the report.
    pub fn title(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// ---------------------------------------------------------------------------
// Error type for crates that produce diagnostics
// ---------------------------------------------------------------------------

/// Error type wrapping the single diagnostic of a failed check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct DiagnosticError(pub Box<Diagnostic>);

impl DiagnosticError {
    pub fn new(diag: Diagnostic) -> Self {
        Self(Box::new(diag))
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        &self.0
    }

    pub fn category(&self) -> Category {
        self.0.category
    }

    pub fn message(&self) -> &str {
        &self.0.message
    }
}

impl From<Diagnostic> for DiagnosticError {
    fn from(diag: Diagnostic) -> Self {
        Self::new(diag)
    }
}
