//! Rendering failures as positionally annotated reports.
//!
//! A report is the failure's title, the signature with carets under every
//! implicated position and numbered labels centred below them, one numbered
//! block per position listing the values seen there with their types, an
//! explanation, and an optional documentation footer.

use std::ops::Range;

use tydef_diag::{Category, Diagnostic, Locus};
use tydef_types::Type;
use tydef_value::{Value, show};

use crate::classify::determine_types_loose;
use crate::resolve::Failure;
use crate::signature::{Signature, SignatureLayout};

const NUMBER_WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Render `failure` against the signature it occurred in.
pub fn render(signature: &Signature, env: &[Type], failure: &Failure) -> Diagnostic {
    let layout = signature.layout();
    let mut report = Report::default();

    match failure {
        Failure::InvalidValue { locus, value, ty } => {
            report.title = "Invalid value".to_string();
            report.mark(&layout, locus, true);
            report.entry(env, std::slice::from_ref(value));
            report.explanation = format!(
                "The value at position 1 is not a member of ‘{}’.",
                ty.format()
            );
            if let Some(url) = ty.url() {
                let kind = if ty.arity() > 0 {
                    "type constructor"
                } else {
                    "type"
                };
                let name = ty.name().map(str::to_string).unwrap_or_else(|| ty.format());
                report.footer(url, format!("the {name} {kind}"));
            }
        }
        Failure::TypeVariableViolation { observations, .. } => {
            report.title = "Type-variable constraint violation".to_string();
            for (locus, values) in observations {
                report.mark(&layout, locus, true);
                report.entry(env, values);
            }
            report.explanation = "Since there is no type of which all the above values are \
                                  members, the type-variable constraint has been violated."
                .to_string();
        }
        Failure::TypeClassViolation {
            var,
            class,
            locus,
            value,
        } => {
            report.title = "Type-class constraint violation".to_string();
            if let Some(span) = layout.constraint_span(var, class.short_name()) {
                report.marks.push((span, None));
            }
            report.mark(&layout, locus, true);
            report.entry(env, std::slice::from_ref(value));
            report.explanation = format!(
                "‘{}’ requires ‘{var}’ to satisfy the {} type-class constraint; \
                 the value at position 1 does not.",
                signature.name(),
                class.short_name()
            );
            if let Some(url) = class.url() {
                report.footer(url, format!("the {} type class", class.short_name()));
            }
        }
        Failure::UnrecognizedValue { locus, value } => {
            report.title = "Unrecognized value".to_string();
            report.mark(&layout, locus, true);
            report.entry(env, std::slice::from_ref(value));
            report.explanation = if env.is_empty() {
                "The environment is empty! Polymorphic functions require a non-empty \
                 environment."
                    .to_string()
            } else {
                let listed: Vec<String> = env.iter().map(|t| format!("  - {t}")).collect();
                format!(
                    "The value at position 1 is not a member of any type in the environment.\n\n\
                     The environment contains the following types:\n\n{}",
                    listed.join("\n")
                )
            };
        }
        Failure::CallbackArity {
            locus,
            expected,
            args,
        } => {
            let callback = type_at(signature, locus)
                .map(Type::format)
                .unwrap_or_default();
            report.title = format!(
                "‘{}’ applied ‘{callback}’ to the wrong number of arguments",
                signature.name()
            );
            report.mark(&layout, locus, true);
            report.explanation = arguments_received(*expected, args);
        }
        Failure::ArgumentCount { expected, args } => {
            report.title = format!(
                "‘{}’ applied to the wrong number of arguments",
                signature.name()
            );
            report.explanation = arguments_received(*expected, args);
        }
    }

    let category = category_of(failure);
    let help = report.help.clone();
    let mut diag = Diagnostic::error(category, report.finish(&layout)).with_positions(failure.loci());
    if let Some(url) = help {
        diag = diag.with_help(url);
    }
    tracing::debug!(category = %category, function = signature.name(), "check failed");
    diag
}

pub(crate) fn category_of(failure: &Failure) -> Category {
    match failure {
        Failure::InvalidValue { .. } => Category::InvalidValue,
        Failure::TypeVariableViolation { .. } => Category::TypeVariableViolation,
        Failure::TypeClassViolation { .. } => Category::TypeClassViolation,
        Failure::UnrecognizedValue { .. } => Category::UnrecognizedValue,
        Failure::CallbackArity { .. } | Failure::ArgumentCount { .. } => Category::ArityViolation,
    }
}

/// The declared sub-type at `locus`.
fn type_at<'a>(signature: &'a Signature, locus: &Locus) -> Option<&'a Type> {
    let mut ty = signature.types().get(locus.index)?;
    for key in &locus.path {
        ty = ty
            .children()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, child)| child)?;
    }
    Some(ty)
}

fn count(n: usize, noun: &str) -> String {
    let word = NUMBER_WORDS
        .get(n)
        .map(|w| w.to_string())
        .unwrap_or_else(|| n.to_string());
    let plural = if n == 1 { "" } else { "s" };
    format!("{word} {noun}{plural}")
}

fn arguments_received(expected: usize, args: &[Value]) -> String {
    let mut text = format!(
        "Expected {} but received {}",
        count(expected, "argument"),
        count(args.len(), "argument")
    );
    if args.is_empty() {
        text.push('.');
    } else {
        text.push_str(":\n");
        for arg in args {
            text.push_str("\n  - ");
            text.push_str(&show(arg));
        }
    }
    text
}

/// `value :: T1, T2` using the loose classification, or `(no types)`.
fn describe(env: &[Type], value: &Value) -> String {
    let types = determine_types_loose(env, std::slice::from_ref(value));
    let types = if types.is_empty() {
        "(no types)".to_string()
    } else {
        types.iter().map(Type::format).collect::<Vec<_>>().join(", ")
    };
    format!("{} :: {types}", show(value))
}

// ---------------------------------------------------------------------------
// Report assembly
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Report {
    title: String,
    /// Underlined spans, with the label to centre beneath each.
    marks: Vec<(Range<usize>, Option<String>)>,
    entries: Vec<String>,
    explanation: String,
    footer: Option<String>,
    help: Option<String>,
}

impl Report {
    fn mark(&mut self, layout: &SignatureLayout, locus: &Locus, numbered: bool) {
        if let Some(span) = layout.span(locus) {
            let label = numbered.then(|| (self.numbered() + 1).to_string());
            self.marks.push((span, label));
        }
    }

    fn numbered(&self) -> usize {
        self.marks.iter().filter(|(_, label)| label.is_some()).count()
    }

    fn entry(&mut self, env: &[Type], values: &[Value]) {
        let n = self.entries.len() + 1;
        let described: Vec<String> = values.iter().map(|v| describe(env, v)).collect();
        self.entries
            .push(format!("{n})  {}", described.join("\n    ")));
    }

    fn footer(&mut self, url: &str, subject: String) {
        self.footer = Some(format!("See {url} for information about {subject}."));
        self.help = Some(url.to_string());
    }

    fn finish(self, layout: &SignatureLayout) -> String {
        let mut sections = vec![self.title, annotate(layout, &self.marks)];
        sections.extend(self.entries);
        sections.push(self.explanation);
        sections.extend(self.footer);

        let mut out = String::new();
        for line in sections.join("\n\n").lines() {
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

/// The signature line followed by caret and label lines, if anything is
/// marked.
fn annotate(layout: &SignatureLayout, marks: &[(Range<usize>, Option<String>)]) -> String {
    if marks.is_empty() {
        return layout.text.clone();
    }
    let mut carets: Vec<char> = Vec::new();
    let mut labels: Vec<char> = Vec::new();
    for (span, label) in marks {
        for col in span.clone() {
            put(&mut carets, col, '^');
        }
        if let Some(label) = label {
            let width = label.chars().count();
            let start = span.start + span.len().saturating_sub(width) / 2;
            for (i, ch) in label.chars().enumerate() {
                put(&mut labels, start + i, ch);
            }
        }
    }
    let mut text = format!("{}\n{}", layout.text, carets.iter().collect::<String>());
    if !labels.is_empty() {
        text.push('\n');
        text.extend(labels);
    }
    text
}

fn put(line: &mut Vec<char>, col: usize, ch: char) {
    if line.len() <= col {
        line.resize(col + 1, ' ');
    }
    line[col] = ch;
}
