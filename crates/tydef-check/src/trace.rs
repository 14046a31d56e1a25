//! Tracing types for checker observability.
//!
//! A [`CheckStep`] records one decision the resolver made while checking a
//! call. Recording is opt-in per session via
//! [`CheckSession::enable_tracing`](crate::CheckSession::enable_tracing);
//! nothing is collected otherwise.

use serde::Serialize;

/// A single step in a check trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckStep {
    pub step: usize,
    /// Signature position (the return slot is the arity).
    pub position: usize,
    /// Keys leading from the position's type to the sub-type checked.
    pub path: Vec<String>,
    /// Display form of the declared sub-type.
    #[serde(rename = "type")]
    pub ty: String,
    pub action: CheckAction,
    pub detail: String,
}

/// What the resolver did at a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckAction {
    /// Value accepted without further work.
    Accept,
    /// Structural recursion into parameters or fields.
    Descend,
    /// First binding of a type variable.
    Bind,
    /// Existing binding narrowed by a new observation.
    Narrow,
    /// A type-class predicate failed.
    ClassCheck,
    /// Check failed.
    Reject,
}
