//! Parse error types.

use thiserror::Error;

use super::ast::{Annotation, Span};

/// A structured failure returned by a grammar function.
///
/// Callers either propagate it or treat it as grounds for junk recovery at
/// the appropriate outer scope; it never aborts the whole parse.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Byte offset at which the error was detected.
    pub pos: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, pos: usize) -> Self {
        Self { kind, pos }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// The junk annotation recording this error.
    pub fn annotation(&self) -> Annotation {
        Annotation {
            code: self.code().to_string(),
            message: self.kind.to_string(),
            span: Span::new(self.pos, self.pos),
        }
    }
}

/// The closed set of grammar violations the parser reports.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    /// A specific token was required at this position.
    #[error("expected token: \"{0}\"")]
    ExpectedToken(char),

    /// The start of a message, term, or comment was required.
    #[error("expected a message, term, or comment")]
    ExpectedEntry,

    /// An identifier was required.
    #[error("expected an identifier")]
    ExpectedIdentifier,

    /// A digit was required, e.g. after the `-` or `.` of a number literal.
    #[error("expected a digit")]
    ExpectedDigit,

    /// A message needs a value or at least one attribute.
    #[error("the message \"{id}\" must have a value or attributes")]
    ExpectedMessageField { id: String },

    /// A term always needs a value.
    #[error("the term \"-{id}\" must have a value")]
    ExpectedTermValue { id: String },

    /// An attribute or variant was left without a value.
    #[error("expected a value")]
    MissingValue,

    /// A comment marker ran past three `#` characters.
    #[error("a comment can have at most three \"#\" markers")]
    CommentTooDeep,

    /// A select expression had no variant marked as default.
    #[error("expected one of the variants to be marked as default (*)")]
    MissingDefaultVariant,

    /// A select expression had more than one default variant.
    #[error("only one variant can be marked as default (*)")]
    MultipleDefaultVariants,

    /// A select expression had no variants at all.
    #[error("expected at least one variant after \"->\"")]
    MissingVariants,

    /// A variant key was required inside `[` `]`.
    #[error("expected a variant key")]
    ExpectedVariantKey,

    /// Only upper-case functions and terms can be called.
    #[error("a callee must be an upper-case identifier or a term")]
    ForbiddenCallee,

    /// A named argument appeared twice in one call.
    #[error("the \"{name}\" argument appears twice")]
    DuplicateNamedArgument { name: String },

    /// Positional arguments must come before named arguments.
    #[error("positional arguments must come before named arguments")]
    PositionalArgumentFollowsNamed,

    /// The expression before `:` in a call must be a bare identifier.
    #[error("an argument name must be a plain identifier")]
    InvalidArgumentName,

    /// Named-argument values are restricted to literals so translation
    /// tooling can analyze calls statically.
    #[error(
        "the value of the \"{name}\" argument must be a string or number literal; \
         to branch on a non-literal value, use a select expression instead"
    )]
    NamedArgumentMustBeLiteral { name: String },

    /// An inline expression was required.
    #[error("expected an inline expression")]
    ExpectedInlineExpression,

    /// A backslash escape the string grammar does not define.
    #[error("unknown escape sequence: \"\\{sequence}\"")]
    UnknownEscapeSequence { sequence: String },

    /// A `\u`/`\U` escape that is malformed or outside the Unicode range.
    #[error("invalid unicode escape sequence: \"{sequence}\"")]
    InvalidUnicodeEscape { sequence: String },

    /// A `}` with no matching `{`.
    #[error("unbalanced closing brace")]
    UnbalancedClosingBrace,
}

impl ParseErrorKind {
    /// Stable machine-readable code, used in junk annotations.
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorKind::ExpectedToken(_) => "expected-token",
            ParseErrorKind::ExpectedEntry => "expected-entry",
            ParseErrorKind::ExpectedIdentifier => "expected-identifier",
            ParseErrorKind::ExpectedDigit => "expected-digit",
            ParseErrorKind::ExpectedMessageField { .. } => "missing-message-field",
            ParseErrorKind::ExpectedTermValue { .. } => "missing-term-value",
            ParseErrorKind::MissingValue => "missing-value",
            ParseErrorKind::CommentTooDeep => "comment-too-deep",
            ParseErrorKind::MissingDefaultVariant => "missing-default-variant",
            ParseErrorKind::MultipleDefaultVariants => "multiple-default-variants",
            ParseErrorKind::MissingVariants => "missing-variants",
            ParseErrorKind::ExpectedVariantKey => "expected-variant-key",
            ParseErrorKind::ForbiddenCallee => "forbidden-callee",
            ParseErrorKind::DuplicateNamedArgument { .. } => "duplicate-named-argument",
            ParseErrorKind::PositionalArgumentFollowsNamed => "positional-after-named",
            ParseErrorKind::InvalidArgumentName => "invalid-argument-name",
            ParseErrorKind::NamedArgumentMustBeLiteral { .. } => "named-argument-not-literal",
            ParseErrorKind::ExpectedInlineExpression => "expected-inline-expression",
            ParseErrorKind::UnknownEscapeSequence { .. } => "unknown-escape",
            ParseErrorKind::InvalidUnicodeEscape { .. } => "invalid-unicode-escape",
            ParseErrorKind::UnbalancedClosingBrace => "unbalanced-closing-brace",
        }
    }
}
