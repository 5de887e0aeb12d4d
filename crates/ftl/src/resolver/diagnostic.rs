//! Diagnostics collected while resolving a message.
//!
//! Every expected failure mode - unknown references, cycles, function
//! failures - is reported as a [`Diagnostic`] value accumulated alongside
//! the formatted output; nothing on these paths throws or aborts.

use thiserror::Error;

use crate::parser::ast::Span;
use crate::parser::cursor::line_col_at;

/// The closed set of failures the resolver reports.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagnosticKind {
    /// A `$variable` was not provided in the argument map.
    #[error("unknown variable: ${name}")]
    UnknownVariable { name: String },

    /// A referenced message is not in the message table.
    #[error("unknown message: {id}")]
    UnknownMessage { id: String },

    /// A referenced term is not in the term table.
    #[error("unknown term: -{id}")]
    UnknownTerm { id: String },

    /// A referenced attribute does not exist on its message or term.
    #[error("unknown attribute: {id}.{attribute}")]
    UnknownAttribute { id: String, attribute: String },

    /// A message without a value was referenced for its value.
    #[error("the message \"{id}\" has no value")]
    NoValue { id: String },

    /// Resolution re-entered a message or term already being resolved.
    #[error("cyclic reference: {}", chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },

    /// A non-cyclic reference chain ran past the depth limit.
    #[error("maximum resolution depth exceeded")]
    MaxDepthExceeded,

    /// A called function is not registered.
    #[error("unknown function: {name}()")]
    UnknownFunction { name: String },

    /// A registered function returned an error.
    #[error("function {name}() failed: {message}")]
    FunctionFailed { name: String, message: String },

    /// A select expression with no variants; the parser makes this
    /// unreachable for parsed trees.
    #[error("select expression has no variants")]
    NoVariants,
}

impl DiagnosticKind {
    /// Stable machine-readable code for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::UnknownVariable { .. } => "unknown-variable",
            DiagnosticKind::UnknownMessage { .. } => "unknown-message",
            DiagnosticKind::UnknownTerm { .. } => "unknown-term",
            DiagnosticKind::UnknownAttribute { .. } => "unknown-attribute",
            DiagnosticKind::NoValue { .. } => "no-value",
            DiagnosticKind::CyclicReference { .. } => "cyclic-reference",
            DiagnosticKind::MaxDepthExceeded => "max-depth-exceeded",
            DiagnosticKind::UnknownFunction { .. } => "unknown-function",
            DiagnosticKind::FunctionFailed { .. } => "function-failed",
            DiagnosticKind::NoVariants => "no-variants",
        }
    }
}

/// One resolution failure, with optional location and remediation context.
///
/// Renders as `error[CODE]: message` plus optional `--> line:col`,
/// `= help:`, and `= note:` lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Option<Span>,
    pub hint: Option<String>,
    pub help_url: Option<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind) -> Self {
        Self {
            kind,
            span: None,
            hint: None,
            help_url: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_help_url(mut self, url: impl Into<String>) -> Self {
        self.help_url = Some(url.into());
        self
    }

    /// Stable machine-readable code for this diagnostic.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Render the full human-readable form, resolving the span to a
    /// line and column within `source` when both are available.
    pub fn render(&self, source: Option<&str>) -> String {
        let mut out = format!("error[{}]: {}", self.code(), self.kind);
        if let (Some(span), Some(source)) = (self.span, source) {
            let (line, column) = line_col_at(source, span.start);
            out.push_str(&format!("\n  --> {line}:{column}"));
        }
        if let Some(hint) = &self.hint {
            out.push_str(&format!("\n  = help: {hint}"));
        }
        if let Some(url) = &self.help_url {
            out.push_str(&format!("\n  = note: see {url}"));
        }
        out
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(None))
    }
}

/// Suggest close matches for a name that failed to resolve.
///
/// Uses Levenshtein distance with a threshold scaled to the input length:
/// names up to three characters tolerate one edit, longer names two.
/// Returns at most three candidates, closest first, ties broken
/// alphabetically.
pub fn compute_suggestions(input: &str, available: &[String]) -> Vec<String> {
    let max_distance = if input.len() > 3 { 2 } else { 1 };
    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .filter_map(|candidate| {
            let distance = strsim::levenshtein(input, candidate);
            (distance > 0 && distance <= max_distance).then_some((distance, candidate))
        })
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}

/// The `= help:` line for a list of suggestions, if any.
pub(crate) fn suggestion_hint(suggestions: &[String]) -> Option<String> {
    if suggestions.is_empty() {
        return None;
    }
    Some(format!("did you mean \"{}\"?", suggestions.join("\", \"")))
}
