//! Public AST types produced by the parser and consumed by the resolver.
//!
//! All nodes are immutable values created once by the parser and owned by
//! the [`Resource`]. Consumers must not mutate them; transformation passes
//! build new trees instead (see [`super::visit`]). The types are public and
//! serde-serializable to enable external tooling (linters, translation
//! pipelines, etc.).

use serde::{Deserialize, Serialize};

/// A half-open byte-offset range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// An ordered sequence of top-level entries parsed from one source text.
///
/// Order is significant: consumers that index entries by id let later
/// definitions of a duplicate id override earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub entries: Vec<Entry>,
}

/// A top-level entry in a [`Resource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entry {
    Message(Message),
    Term(Term),
    Comment(Comment),
    Junk(Junk),
}

/// A name of a message, term, attribute, variable, or function.
///
/// Grammar: `[A-Za-z][A-Za-z0-9_-]*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A public, exported localizable string.
///
/// Invariant, enforced at parse time: a message has a non-empty value or at
/// least one attribute. A violation degrades the whole entry to [`Junk`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Identifier,
    pub value: Option<Pattern>,
    pub attributes: Vec<Attribute>,
    pub span: Span,
}

/// A private, reusable definition (written with a leading `-`).
///
/// Unlike messages, terms always have a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub id: Identifier,
    pub value: Pattern,
    pub attributes: Vec<Attribute>,
    pub span: Span,
}

/// A named sub-pattern of a message or term, written `.id = pattern`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: Identifier,
    pub value: Pattern,
}

/// The value of a message, term, or attribute: text and placeables in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub elements: Vec<PatternElement>,
}

/// One element of a [`Pattern`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PatternElement {
    /// Literal text, copied verbatim to output.
    Text(String),
    /// An interpolated expression, written `{ ... }`.
    Placeable(Expression),
}

/// An expression inside a placeable, a selector, or a call argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// A double-quoted string literal, stored unescaped.
    StringLiteral { value: String },
    /// A number literal. The raw source text is preserved alongside the
    /// parsed value so serialization can round-trip e.g. leading zeros.
    NumberLiteral { raw: String, value: f64 },
    /// A runtime argument: `$id`.
    VariableReference { id: Identifier },
    /// A reference to another message or one of its attributes.
    MessageReference {
        id: Identifier,
        attribute: Option<Identifier>,
    },
    /// A reference to a term, optionally parameterized: `-id(k: "v")`.
    TermReference {
        id: Identifier,
        attribute: Option<Identifier>,
        arguments: Option<CallArguments>,
    },
    /// A call to a registered function: `NAME(args)`.
    FunctionReference {
        id: Identifier,
        arguments: CallArguments,
    },
    /// A branch on a selector value: `{ selector -> [key] pattern ... }`.
    ///
    /// Invariant, enforced at parse time: exactly one variant is marked
    /// default.
    Select {
        selector: Box<Expression>,
        variants: Vec<Variant>,
    },
}

/// One branch of a select expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub key: VariantKey,
    pub value: Pattern,
    pub default: bool,
}

/// The key of a [`Variant`]: an identifier or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VariantKey {
    Identifier(Identifier),
    Number { raw: String, value: f64 },
}

/// Arguments of a function call or parameterized term reference.
///
/// Invariants, enforced at parse time: all positional arguments precede all
/// named arguments; named-argument names are unique within one call; a
/// named argument's value is a string or number literal, never a reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallArguments {
    pub positional: Vec<Expression>,
    pub named: Vec<NamedArgument>,
}

/// A `name: literal` argument in a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedArgument {
    pub name: Identifier,
    pub value: Expression,
}

/// A standalone comment entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub content: String,
    pub kind: CommentKind,
}

/// Comment level: `#`, `##`, or `###`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentKind {
    Line,
    Group,
    Resource,
}

/// A malformed entry preserved as data instead of aborting the parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Junk {
    pub content: String,
    pub annotations: Vec<Annotation>,
    pub span: Span,
}

/// A parse diagnostic attached to a [`Junk`] entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub code: String,
    pub message: String,
    pub span: Span,
}
