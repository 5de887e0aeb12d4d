//! Function registry for `{ NAME(args) }` placeables.
//!
//! Functions are plain `fn` values taking evaluated positional and named
//! argument values. The registry distinguishes its own built-in entries
//! from user-registered ones so the resolver injects the active locale
//! only into built-ins: a user function registered under a built-in's name
//! is never silently handed a locale argument it did not ask for.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::types::Value;

/// Function signature for registered formatting functions.
///
/// Takes the evaluated positional arguments and the named arguments (in
/// name order). Returns the resulting value, or an error the resolver
/// turns into a diagnostic plus a readable fallback.
pub type MessageFn = fn(&[Value], &BTreeMap<String, Value>) -> Result<Value, FunctionError>;

/// The reserved named argument under which the resolver passes the active
/// locale to built-in functions.
pub const IMPLICIT_LOCALE_ARG: &str = "locale";

/// A failure reported by a formatting function.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct FunctionError {
    pub message: String,
}

impl FunctionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct FunctionEntry {
    function: MessageFn,
    /// Whether this entry is one of the registry's own built-ins, as
    /// opposed to a user-registered function (which may shadow a
    /// built-in's name).
    builtin: bool,
}

/// Registry of functions callable from placeables.
///
/// Owned by the bundle; the resolver only reads it during a resolve call.
#[derive(Debug)]
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionEntry>,
}

impl FunctionRegistry {
    /// Create a registry with the built-in functions registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.functions.insert(
            "NUMBER".to_string(),
            FunctionEntry {
                function: number,
                builtin: true,
            },
        );
        registry
    }

    /// Create a registry with no functions at all.
    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Register a function, replacing any existing entry with that name.
    ///
    /// Registering over a built-in's name shadows it: the entry is no
    /// longer treated as a built-in.
    pub fn register(&mut self, name: impl Into<String>, function: MessageFn) {
        self.functions.insert(
            name.into(),
            FunctionEntry {
                function,
                builtin: false,
            },
        );
    }

    /// Whether a function with this name is registered.
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Whether the entry currently registered under `name` is one of the
    /// registry's own built-ins.
    pub fn is_builtin(&self, name: &str) -> bool {
        self.functions
            .get(name)
            .is_some_and(|entry| entry.builtin)
    }

    /// The registered function names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Call a registered function by name.
    pub fn call(
        &self,
        name: &str,
        positional: &[Value],
        named: &BTreeMap<String, Value>,
    ) -> Result<Value, FunctionError> {
        let Some(entry) = self.functions.get(name) else {
            return Err(FunctionError::new(format!("unknown function: {name}()")));
        };
        (entry.function)(positional, named)
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in `NUMBER` function.
///
/// A thin formatter without CLDR number data: it shapes fraction digits
/// via the `minimumFractionDigits` and `maximumFractionDigits` options but
/// performs no grouping or locale-specific digit substitution. The active
/// locale arrives as the implicit `locale` named argument; data-backed
/// replacements use it for full locale-aware formatting.
///
/// Without formatting options the numeric value is passed through
/// unchanged, so `NUMBER($n)` used as a selector still matches numeric
/// variant keys and plural categories.
fn number(positional: &[Value], named: &BTreeMap<String, Value>) -> Result<Value, FunctionError> {
    let Some(value) = positional.first() else {
        return Err(FunctionError::new("NUMBER() requires an argument"));
    };
    let Some(n) = value.as_float() else {
        return Err(FunctionError::new(format!(
            "NUMBER() requires a numeric argument, got \"{value}\""
        )));
    };
    let minimum = fraction_option(named, "minimumFractionDigits")?;
    let maximum = fraction_option(named, "maximumFractionDigits")?;
    if minimum.is_none() && maximum.is_none() {
        return Ok(value.clone());
    }
    let minimum = minimum.unwrap_or(0);
    let maximum = maximum.unwrap_or_else(|| minimum.max(3)).max(minimum);
    Ok(Value::String(format_fraction(n, minimum, maximum)))
}

/// Read a non-negative integer formatting option.
fn fraction_option(
    named: &BTreeMap<String, Value>,
    name: &str,
) -> Result<Option<usize>, FunctionError> {
    let Some(value) = named.get(name) else {
        return Ok(None);
    };
    match value.as_float() {
        Some(f) if f >= 0.0 => Ok(Some(f as usize)),
        _ => Err(FunctionError::new(format!(
            "the \"{name}\" option must be a non-negative number"
        ))),
    }
}

/// Render `n` with between `minimum` and `maximum` fraction digits.
fn format_fraction(n: f64, minimum: usize, maximum: usize) -> String {
    let mut formatted = format!("{n:.maximum$}");
    if maximum > minimum && formatted.contains('.') {
        let mut fraction_len = formatted.len() - formatted.find('.').map_or(0, |dot| dot + 1);
        while fraction_len > minimum && formatted.ends_with('0') {
            formatted.pop();
            fraction_len -= 1;
        }
        if formatted.ends_with('.') {
            formatted.pop();
        }
    }
    formatted
}
