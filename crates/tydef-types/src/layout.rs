//! Rendering types to text with per-position column spans.

use std::ops::Range;

use crate::{Type, param_key};

/// Rendered text of a type plus the column span of every nested position.
///
/// Spans are measured in characters, relative to the start of `text`, and
/// exclude any parentheses added around the position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeLayout {
    pub text: String,
    pub spans: Vec<(Vec<String>, Range<usize>)>,
}

impl TypeLayout {
    /// Span of the position at `path`, or of its nearest displayed ancestor.
    pub fn span(&self, path: &[String]) -> Option<Range<usize>> {
        (0..=path.len()).rev().find_map(|len| {
            self.spans
                .iter()
                .find(|(p, _)| p.as_slice() == &path[..len])
                .map(|(_, range)| range.clone())
        })
    }

    /// Width in characters.
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

struct Writer {
    text: String,
    col: usize,
    spans: Vec<(Vec<String>, Range<usize>)>,
}

impl Writer {
    fn push(&mut self, s: &str) {
        self.text.push_str(s);
        self.col += s.chars().count();
    }
}

impl Type {
    /// Render the type, parenthesised when `wrap` is set.
    pub fn layout(&self, wrap: bool) -> TypeLayout {
        let mut w = Writer {
            text: String::new(),
            col: 0,
            spans: Vec::new(),
        };
        self.write(&mut w, &mut Vec::new(), wrap);
        TypeLayout {
            text: w.text,
            spans: w.spans,
        }
    }

    /// Whether this type needs parentheses when it is a parameter or a
    /// parameter of a function signature.
    pub fn is_compound(&self) -> bool {
        matches!(
            self,
            Type::Unary(..)
                | Type::Binary(..)
                | Type::UnaryVariable(..)
                | Type::BinaryVariable(..)
                | Type::Function(_)
        )
    }

    fn write(&self, w: &mut Writer, path: &mut Vec<String>, wrap: bool) {
        if wrap {
            w.push("(");
        }
        let start = w.col;
        match self {
            Type::Unknown | Type::Inconsistent => w.push("???"),
            Type::NoArguments => w.push("()"),
            Type::Any => w.push("Any"),
            Type::Nullary(c) => w.push(c.name()),
            Type::Enum(e) => w.push(&e.name),
            Type::Variable(name) => w.push(name),
            Type::Record(r) => match &r.name {
                Some(name) => w.push(name),
                None if r.fields.is_empty() => w.push("{}"),
                None => {
                    w.push("{ ");
                    for (i, (key, ty)) in r.fields.iter().enumerate() {
                        if i > 0 {
                            w.push(", ");
                        }
                        w.push(key);
                        w.push(" :: ");
                        write_child(w, path, key.clone(), ty, false);
                    }
                    w.push(" }");
                }
            },
            Type::Unary(_, _)
            | Type::Binary(_, _, _)
            | Type::UnaryVariable(_, _)
            | Type::BinaryVariable(_, _, _) => {
                w.push(self.name().unwrap_or_default());
                for (i, param) in self.params().into_iter().enumerate() {
                    w.push(" ");
                    write_child(w, path, param_key(i + 1), param, param.is_compound());
                }
            }
            Type::Function(types) => {
                let (ret, params) = match types.split_last() {
                    Some(split) => split,
                    None => (&Type::NoArguments, &[][..]),
                };
                if params.is_empty() {
                    w.push("() -> ");
                }
                for (i, param) in params.iter().enumerate() {
                    let wrap = matches!(param, Type::Function(_));
                    write_child(w, path, param_key(i + 1), param, wrap);
                    w.push(" -> ");
                }
                let key = param_key(params.len() + 1);
                write_child(w, path, key, ret, matches!(ret, Type::Function(_)));
            }
        }
        let end = w.col;
        w.spans.push((path.clone(), start..end));
        if wrap {
            w.push(")");
        }
    }
}

fn write_child(w: &mut Writer, path: &mut Vec<String>, key: String, ty: &Type, wrap: bool) {
    path.push(key);
    ty.write(w, path, wrap);
    path.pop();
}
