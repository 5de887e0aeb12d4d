//! FTL parser.
//!
//! This module provides parsing for FTL resources. The parser is total:
//! `parse` always returns a [`Resource`], degrading malformed entries to
//! [`Junk`] with annotations instead of failing. The AST it produces is
//! public to enable external tooling (linters, serializers, etc.).

pub mod ast;
pub mod cursor;
pub mod error;
mod grammar;
pub mod visit;

pub use ast::*;
pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind};
pub use grammar::parse;
