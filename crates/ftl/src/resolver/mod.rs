//! FTL resolver.
//!
//! This module provides the engine that interprets parsed message patterns
//! into formatted strings. It resolves variable, message, term, and
//! function references, selects variants using exact matches and CLDR
//! plural categories, and accumulates diagnostics instead of failing.

mod diagnostic;
mod functions;
mod plural;
mod resolve;
mod scope;

pub use diagnostic::{Diagnostic, DiagnosticKind, compute_suggestions};
pub(crate) use diagnostic::suggestion_hint;
pub use functions::{FunctionError, FunctionRegistry, IMPLICIT_LOCALE_ARG, MessageFn};
pub use plural::{PluralFn, plural_category};
pub use resolve::Resolver;
