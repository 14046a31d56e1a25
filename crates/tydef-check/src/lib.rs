//! Runtime checking of values against declared signatures.
//!
//! This crate implements:
//! - Value classification: which environment types a set of values share
//! - Constraint resolution with per-call type-variable bindings
//! - Rendering of failures as annotated reports
//! - Curried, checked wrappers around host implementations
//!
//! Checking is synchronous and single-threaded. A binding table belongs to
//! one call chain; environments and signatures are immutable and shared.

pub mod bindings;
pub mod classify;
pub mod render;
pub mod resolve;
pub mod session;
pub mod signature;
pub mod trace;
pub mod wrap;

pub use bindings::{Binding, BindingTable};
pub use classify::{determine_types_loose, determine_types_strict};
pub use render::render;
pub use resolve::{Failure, Resolver, test, validate};
pub use session::{CheckSession, begin_check};
pub use signature::{MAX_ARITY, Signature};
pub use trace::{CheckAction, CheckStep};
pub use wrap::{Implementation, define};

// Re-export for convenience.
pub use tydef_diag::{Category, Diagnostic, DiagnosticError, Locus};
