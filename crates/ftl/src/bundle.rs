//! Message bundle: the user-facing container for parsed resources.
//!
//! A `Bundle` indexes the messages and terms of one locale, owns the
//! function registry, and constructs a fresh [`Resolver`] per format call.
//! Formatting is total: unknown ids produce `{id}`-style fallbacks plus
//! diagnostics instead of errors. Formatted results are cached per
//! argument set; any mutation of the bundle invalidates the cache.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use bon::Builder;
use const_fnv1a_hash::fnv1a_hash_str_64;
use thiserror::Error;

use crate::parser::visit::{ReferenceCollector, Visitor};
use crate::parser::{Entry, Message, Resource, Term, parse};
use crate::resolver::{
    Diagnostic, DiagnosticKind, FunctionRegistry, MessageFn, Resolver, compute_suggestions,
    suggestion_hint,
};
use crate::types::Value;

/// Errors that occur while loading a resource from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a resource file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Non-fatal findings reported while adding or validating resources.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadWarning {
    /// A message id was defined more than once; the later one wins.
    #[error("message \"{id}\" overrides an earlier definition")]
    OverriddenMessage { id: String },

    /// A term id was defined more than once; the later one wins.
    #[error("term \"-{id}\" overrides an earlier definition")]
    OverriddenTerm { id: String },

    /// A malformed entry was discarded during parsing.
    #[error("discarded junk ({code}): {message}")]
    Junk { code: String, message: String },

    /// A pattern references a message that is not in the bundle.
    #[error("\"{id}\" references unknown message \"{reference}\"")]
    UnknownMessageReference { id: String, reference: String },

    /// A pattern references a term that is not in the bundle.
    #[error("\"{id}\" references unknown term \"-{reference}\"")]
    UnknownTermReference { id: String, reference: String },
}

#[derive(Debug, Clone)]
struct CacheEntry {
    /// The canonical key, stored to verify hits against hash collisions.
    key: String,
    output: String,
    diagnostics: Vec<Diagnostic>,
}

/// A locale's messages, terms, and functions.
///
/// # Example
///
/// ```
/// use ftl::{Bundle, args};
///
/// let mut bundle = Bundle::builder().locale("en").build();
/// bundle.add_resource_str("hello = Hello, { $name }!");
///
/// let (text, diagnostics) = bundle.format("hello", &args! { "name" => "Alice" });
/// assert_eq!(text, "Hello, Alice!");
/// assert!(diagnostics.is_empty());
/// ```
#[derive(Builder)]
#[builder(on(String, into))]
pub struct Bundle {
    /// Locale code (e.g. "en", "ru", "de"), used for plural rules and
    /// passed to built-in functions.
    #[builder(default = "en".to_string())]
    locale: String,

    /// Whether interpolated values are wrapped in Unicode directional
    /// isolation marks so they cannot corrupt surrounding RTL/LTR text.
    #[builder(default)]
    use_isolating: bool,

    /// Messages indexed by id. Later definitions override earlier ones.
    #[builder(skip)]
    messages: HashMap<String, Message>,

    /// Terms indexed by id (without the `-` prefix).
    #[builder(skip)]
    terms: HashMap<String, Term>,

    /// Functions callable from placeables; starts with the built-ins.
    #[builder(skip)]
    functions: FunctionRegistry,

    /// Formatted-result cache keyed by a 64-bit FNV-1a hash of the call.
    ///
    /// Valid because resolution is a pure function of the bundle state and
    /// the call arguments; every mutating method clears it. Uses `RefCell`
    /// for interior mutability so `format` can remain `&self`.
    #[builder(skip)]
    cache: RefCell<HashMap<u64, CacheEntry>>,
}

impl Default for Bundle {
    fn default() -> Self {
        Bundle::builder().build()
    }
}

impl Bundle {
    /// Create a new bundle with default settings (English).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new bundle for the given locale.
    pub fn with_locale(locale: impl Into<String>) -> Self {
        Bundle::builder().locale(locale.into()).build()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// The bundle's locale code.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Change the locale used for plural rules and built-in functions.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
        self.invalidate_cache();
    }

    /// Enable or disable bidi isolation of interpolated values.
    pub fn set_use_isolating(&mut self, enabled: bool) {
        self.use_isolating = enabled;
        self.invalidate_cache();
    }

    /// The function registry (read-only).
    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Register a formatting function, replacing any existing entry with
    /// that name (including built-ins).
    pub fn register_function(&mut self, name: impl Into<String>, function: MessageFn) {
        self.functions.register(name, function);
        self.invalidate_cache();
    }

    // =========================================================================
    // Resource Loading
    // =========================================================================

    /// Add a parsed resource to the bundle.
    ///
    /// Later definitions of a duplicate id override earlier ones; each
    /// override and each junk entry is surfaced as a warning.
    pub fn add_resource(&mut self, resource: Resource) -> Vec<LoadWarning> {
        self.invalidate_cache();
        let mut warnings = Vec::new();
        for entry in resource.entries {
            match entry {
                Entry::Message(message) => {
                    let id = message.id.name.clone();
                    if self.messages.insert(id.clone(), message).is_some() {
                        warnings.push(LoadWarning::OverriddenMessage { id });
                    }
                }
                Entry::Term(term) => {
                    let id = term.id.name.clone();
                    if self.terms.insert(id.clone(), term).is_some() {
                        warnings.push(LoadWarning::OverriddenTerm { id });
                    }
                }
                Entry::Comment(_) => {}
                Entry::Junk(junk) => {
                    for annotation in junk.annotations {
                        warnings.push(LoadWarning::Junk {
                            code: annotation.code,
                            message: annotation.message,
                        });
                    }
                }
            }
        }
        warnings
    }

    /// Parse a source string and add it to the bundle.
    ///
    /// Parsing is total, so this cannot fail; syntax errors show up as
    /// [`LoadWarning::Junk`] warnings.
    pub fn add_resource_str(&mut self, source: &str) -> Vec<LoadWarning> {
        self.add_resource(parse(source))
    }

    /// Read a resource file and add it to the bundle.
    pub fn add_resource_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<LoadWarning>, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(self.add_resource_str(&content))
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Whether a message with this id is in the bundle.
    pub fn has_message(&self, id: &str) -> bool {
        self.messages.contains_key(id)
    }

    /// Get a message by id.
    pub fn get_message(&self, id: &str) -> Option<&Message> {
        self.messages.get(id)
    }

    /// Get a term by id (without the `-` prefix).
    pub fn get_term(&self, id: &str) -> Option<&Term> {
        self.terms.get(id)
    }

    /// The message ids in the bundle, sorted.
    pub fn message_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.messages.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Check every message and term for references to ids the bundle does
    /// not contain. Reports are sorted by the referencing id.
    pub fn validate(&self) -> Vec<LoadWarning> {
        let mut warnings = Vec::new();
        let mut ids: Vec<&String> = self.messages.keys().collect();
        ids.sort_unstable();
        for id in ids {
            let mut collector = ReferenceCollector::new();
            collector.visit_message(&self.messages[id]);
            self.collect_unknown_references(id, &collector, &mut warnings);
        }
        let mut term_ids: Vec<&String> = self.terms.keys().collect();
        term_ids.sort_unstable();
        for id in term_ids {
            let mut collector = ReferenceCollector::new();
            collector.visit_term(&self.terms[id]);
            self.collect_unknown_references(&format!("-{id}"), &collector, &mut warnings);
        }
        warnings
    }

    fn collect_unknown_references(
        &self,
        id: &str,
        collector: &ReferenceCollector,
        warnings: &mut Vec<LoadWarning>,
    ) {
        for reference in &collector.messages {
            if !self.messages.contains_key(reference) {
                warnings.push(LoadWarning::UnknownMessageReference {
                    id: id.to_string(),
                    reference: reference.clone(),
                });
            }
        }
        for reference in &collector.terms {
            if !self.terms.contains_key(reference) {
                warnings.push(LoadWarning::UnknownTermReference {
                    id: id.to_string(),
                    reference: reference.clone(),
                });
            }
        }
    }

    // =========================================================================
    // Formatting
    // =========================================================================

    /// Format a message's value with the given arguments.
    ///
    /// Total: an unknown id yields `{id}` plus a diagnostic. All other
    /// failure modes are reported the same way by the resolver.
    pub fn format(&self, id: &str, args: &HashMap<String, Value>) -> (String, Vec<Diagnostic>) {
        self.format_pattern(id, None, args)
    }

    /// Format one attribute of a message with the given arguments.
    pub fn format_attribute(
        &self,
        id: &str,
        attribute: &str,
        args: &HashMap<String, Value>,
    ) -> (String, Vec<Diagnostic>) {
        self.format_pattern(id, Some(attribute), args)
    }

    fn format_pattern(
        &self,
        id: &str,
        attribute: Option<&str>,
        args: &HashMap<String, Value>,
    ) -> (String, Vec<Diagnostic>) {
        let (hash, canonical) = self.cache_key(id, attribute, args);
        {
            let cache = self.cache.borrow();
            if let Some(entry) = cache.get(&hash)
                && entry.key == canonical
            {
                return (entry.output.clone(), entry.diagnostics.clone());
            }
        }

        let (output, diagnostics) = match self.messages.get(id) {
            Some(message) => {
                let resolver =
                    Resolver::new(&self.locale, &self.messages, &self.terms, &self.functions)
                        .use_isolating(self.use_isolating);
                resolver.resolve(message, args, attribute)
            }
            None => {
                let mut known: Vec<String> = self.messages.keys().cloned().collect();
                known.sort_unstable();
                let suggestions = compute_suggestions(id, &known);
                let mut diagnostic = Diagnostic::new(DiagnosticKind::UnknownMessage {
                    id: id.to_string(),
                });
                if let Some(hint) = suggestion_hint(&suggestions) {
                    diagnostic = diagnostic.with_hint(hint);
                }
                let fallback = match attribute {
                    Some(attribute) => format!("{{{id}.{attribute}}}"),
                    None => format!("{{{id}}}"),
                };
                (fallback, vec![diagnostic])
            }
        };

        self.cache.borrow_mut().insert(
            hash,
            CacheEntry {
                key: canonical,
                output: output.clone(),
                diagnostics: diagnostics.clone(),
            },
        );
        (output, diagnostics)
    }

    /// The canonical key and hash for one format call.
    ///
    /// Arguments are serialized in sorted name order with a type tag, so
    /// `Number(5)` and `String("5")` never collide. The canonical string is
    /// stored with the entry and compared on every hit, so an FNV-1a
    /// collision degrades to a cache miss rather than a wrong answer.
    fn cache_key(
        &self,
        id: &str,
        attribute: Option<&str>,
        args: &HashMap<String, Value>,
    ) -> (u64, String) {
        let mut canonical = format!(
            "{}\u{1f}{}\u{1f}{}\u{1f}{}",
            self.locale,
            self.use_isolating,
            id,
            attribute.unwrap_or("")
        );
        let mut names: Vec<&String> = args.keys().collect();
        names.sort_unstable();
        for name in names {
            canonical.push('\u{1f}');
            canonical.push_str(name);
            canonical.push('=');
            match &args[name] {
                Value::Number(n) => canonical.push_str(&format!("i{n}")),
                Value::Float(f) => canonical.push_str(&format!("f{f}")),
                Value::String(s) => canonical.push_str(&format!("s{s}")),
            }
        }
        (fnv1a_hash_str_64(&canonical), canonical)
    }

    /// The number of cached format results.
    pub fn cache_len(&self) -> usize {
        self.cache.borrow().len()
    }

    fn invalidate_cache(&mut self) {
        self.cache.borrow_mut().clear();
    }
}
