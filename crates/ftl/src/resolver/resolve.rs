//! Pattern resolution engine.
//!
//! Turns a message (or one of its attributes) plus an argument map into a
//! formatted string and a list of diagnostics. Resolution never fails for
//! expected failure modes: every failure produces a diagnostic plus a
//! readable fallback fragment derived from the failing expression, so
//! broken localization degrades visibly but gracefully.

use std::collections::{BTreeMap, HashMap};

use super::diagnostic::{Diagnostic, DiagnosticKind, compute_suggestions, suggestion_hint};
use super::functions::{FunctionRegistry, IMPLICIT_LOCALE_ARG};
use super::plural::{PluralFn, plural_category};
use super::scope::Scope;
use crate::parser::ast::{
    Attribute, CallArguments, Expression, Identifier, Message, Pattern, PatternElement, Term,
    Variant, VariantKey,
};
use crate::types::Value;

/// First-strong-isolate mark, opening an isolated interpolation.
const FSI: char = '\u{2068}';
/// Pop-directional-isolate mark, closing an isolated interpolation.
const PDI: char = '\u{2069}';

/// Resolves message patterns against a read-only environment.
///
/// The resolver borrows the message and term tables, the function registry,
/// and the locale; it holds no per-call state of its own and is therefore
/// reentrant. Per-call state (resolution stack, diagnostics) lives in a
/// [`Scope`] created inside each `resolve` call.
pub struct Resolver<'a> {
    locale: &'a str,
    messages: &'a HashMap<String, Message>,
    terms: &'a HashMap<String, Term>,
    functions: &'a FunctionRegistry,
    use_isolating: bool,
    plural_rules: PluralFn,
}

impl<'a> Resolver<'a> {
    pub fn new(
        locale: &'a str,
        messages: &'a HashMap<String, Message>,
        terms: &'a HashMap<String, Term>,
        functions: &'a FunctionRegistry,
    ) -> Self {
        Self {
            locale,
            messages,
            terms,
            functions,
            use_isolating: false,
            plural_rules: plural_category,
        }
    }

    /// Enable or disable bidi isolation of interpolated values.
    pub fn use_isolating(mut self, enabled: bool) -> Self {
        self.use_isolating = enabled;
        self
    }

    /// Replace the plural-category function (defaults to the CLDR-backed
    /// [`plural_category`]).
    pub fn plural_rules(mut self, rules: PluralFn) -> Self {
        self.plural_rules = rules;
        self
    }

    /// Resolve a message (or one of its attributes) to a formatted string.
    ///
    /// Never fails: unknown attributes, missing values, and every nested
    /// failure produce diagnostics plus a readable fallback. Calling twice
    /// with identical inputs yields identical output and diagnostics.
    pub fn resolve(
        &self,
        message: &Message,
        args: &HashMap<String, Value>,
        attribute: Option<&str>,
    ) -> (String, Vec<Diagnostic>) {
        let mut scope = Scope::new(args);
        let key = resolution_key(&message.id.name, attribute);

        let pattern = match attribute {
            Some(name) => match find_attribute(&message.attributes, name) {
                Some(attribute) => &attribute.value,
                None => {
                    self.report_unknown_attribute(
                        &message.id.name,
                        name,
                        &message.attributes,
                        &mut scope,
                    );
                    return (format!("{{{key}}}"), scope.take_diagnostics());
                }
            },
            None => match &message.value {
                Some(value) => value,
                None => {
                    scope.report(Diagnostic::new(DiagnosticKind::NoValue {
                        id: message.id.name.clone(),
                    }));
                    return (format!("{{{key}}}"), scope.take_diagnostics());
                }
            },
        };

        let mut output = String::new();
        match scope.enter_call(&key) {
            Ok(()) => {
                self.resolve_pattern(pattern, &mut scope, &mut output);
                scope.exit_call();
            }
            Err(kind) => {
                scope.report(Diagnostic::new(kind));
                output.push_str(&format!("{{{key}}}"));
            }
        }
        (output, scope.take_diagnostics())
    }

    /// Resolve pattern elements strictly left to right into `output`.
    fn resolve_pattern(&self, pattern: &Pattern, scope: &mut Scope<'_>, output: &mut String) {
        for element in &pattern.elements {
            match element {
                PatternElement::Text(text) => output.push_str(text),
                PatternElement::Placeable(expression) => {
                    self.resolve_placeable(expression, scope, output);
                }
            }
        }
    }

    /// Resolve one placeable, appending its value or a readable fallback.
    fn resolve_placeable(
        &self,
        expression: &Expression,
        scope: &mut Scope<'_>,
        output: &mut String,
    ) {
        if let Expression::Select { selector, variants } = expression {
            self.resolve_select(selector, variants, scope, output);
            return;
        }
        match self.resolve_expression(expression, scope) {
            Some(value) => {
                if self.use_isolating {
                    output.push(FSI);
                    output.push_str(&value.to_string());
                    output.push(PDI);
                } else {
                    output.push_str(&value.to_string());
                }
            }
            None => output.push_str(&fallback(expression)),
        }
    }

    /// Resolve a select expression by picking a variant and resolving its
    /// pattern in place.
    fn resolve_select(
        &self,
        selector: &Expression,
        variants: &[Variant],
        scope: &mut Scope<'_>,
        output: &mut String,
    ) {
        if variants.is_empty() {
            // The parser guarantees at least one variant; this path only
            // serves hand-built trees.
            scope.report(Diagnostic::new(DiagnosticKind::NoVariants));
            output.push_str("{???}");
            return;
        }
        let selected = self.resolve_expression(selector, scope);
        let variant = self.select_variant(variants, selected.as_ref());
        self.resolve_pattern(&variant.value, scope, output);
    }

    /// Pick the variant a selector value chooses.
    ///
    /// Order: exact match (identifier keys against the stringified value,
    /// number keys numerically); then, for numeric selectors, the locale's
    /// plural category; then the default variant. A selector that failed to
    /// resolve (already reported) goes straight to the default.
    fn select_variant<'v>(&self, variants: &'v [Variant], selected: Option<&Value>) -> &'v Variant {
        if let Some(value) = selected {
            for variant in variants {
                if variant_key_matches(&variant.key, value) {
                    return variant;
                }
            }
            if let Some(operand) = value.as_plural_operand() {
                let category = (self.plural_rules)(self.locale, operand);
                for variant in variants {
                    if let VariantKey::Identifier(id) = &variant.key
                        && id.name == category
                    {
                        return variant;
                    }
                }
            }
        }
        // The parser guarantees a default; first variant is a defensive
        // fallback for hand-built trees.
        variants
            .iter()
            .find(|variant| variant.default)
            .unwrap_or(&variants[0])
    }

    /// Resolve an inline expression to a value.
    ///
    /// Returns `None` after recording a diagnostic; the caller appends a
    /// fallback derived from the expression shape.
    fn resolve_expression(&self, expression: &Expression, scope: &mut Scope<'_>) -> Option<Value> {
        match expression {
            Expression::StringLiteral { value } => Some(Value::String(value.clone())),
            Expression::NumberLiteral { value, .. } => Some(Value::Float(*value)),
            Expression::VariableReference { id } => self.resolve_variable(id, scope),
            Expression::MessageReference { id, attribute } => {
                self.resolve_message_reference(id, attribute.as_ref(), scope)
            }
            Expression::TermReference {
                id,
                attribute,
                arguments,
            } => self.resolve_term_reference(id, attribute.as_ref(), arguments.as_ref(), scope),
            Expression::FunctionReference { id, arguments } => {
                self.resolve_function_reference(id, arguments, scope)
            }
            Expression::Select { selector, variants } => {
                // Selects are normally resolved through resolve_placeable;
                // this path only serves hand-built trees.
                let mut nested = String::new();
                self.resolve_select(selector, variants, scope, &mut nested);
                Some(Value::String(nested))
            }
        }
    }

    fn resolve_variable(&self, id: &Identifier, scope: &mut Scope<'_>) -> Option<Value> {
        if let Some(value) = scope.arg(&id.name) {
            return Some(value.clone());
        }
        let suggestions = compute_suggestions(&id.name, &scope.arg_names());
        let mut diagnostic = Diagnostic::new(DiagnosticKind::UnknownVariable {
            name: id.name.clone(),
        });
        if let Some(hint) = suggestion_hint(&suggestions) {
            diagnostic = diagnostic.with_hint(hint);
        }
        scope.report(diagnostic);
        None
    }

    fn resolve_message_reference(
        &self,
        id: &Identifier,
        attribute: Option<&Identifier>,
        scope: &mut Scope<'_>,
    ) -> Option<Value> {
        let Some(message) = self.messages.get(&id.name) else {
            let mut known: Vec<String> = self.messages.keys().cloned().collect();
            known.sort_unstable();
            let suggestions = compute_suggestions(&id.name, &known);
            let mut diagnostic = Diagnostic::new(DiagnosticKind::UnknownMessage {
                id: id.name.clone(),
            });
            if let Some(hint) = suggestion_hint(&suggestions) {
                diagnostic = diagnostic.with_hint(hint);
            }
            scope.report(diagnostic);
            return None;
        };
        let pattern = match attribute {
            Some(attribute) => match find_attribute(&message.attributes, &attribute.name) {
                Some(found) => &found.value,
                None => {
                    self.report_unknown_attribute(
                        &id.name,
                        &attribute.name,
                        &message.attributes,
                        scope,
                    );
                    return None;
                }
            },
            None => match &message.value {
                Some(value) => value,
                None => {
                    scope.report(Diagnostic::new(DiagnosticKind::NoValue {
                        id: id.name.clone(),
                    }));
                    return None;
                }
            },
        };
        let key = resolution_key(&id.name, attribute.map(|a| a.name.as_str()));
        self.resolve_nested_pattern(&key, pattern, scope)
    }

    fn resolve_term_reference(
        &self,
        id: &Identifier,
        attribute: Option<&Identifier>,
        arguments: Option<&CallArguments>,
        scope: &mut Scope<'_>,
    ) -> Option<Value> {
        let Some(term) = self.terms.get(&id.name) else {
            let mut known: Vec<String> = self.terms.keys().cloned().collect();
            known.sort_unstable();
            let suggestions = compute_suggestions(&id.name, &known);
            let mut diagnostic = Diagnostic::new(DiagnosticKind::UnknownTerm {
                id: id.name.clone(),
            });
            if let Some(hint) = suggestion_hint(&suggestions) {
                diagnostic = diagnostic.with_hint(hint);
            }
            scope.report(diagnostic);
            return None;
        };
        let pattern = match attribute {
            Some(attribute) => match find_attribute(&term.attributes, &attribute.name) {
                Some(found) => &found.value,
                None => {
                    self.report_unknown_attribute(
                        &format!("-{}", id.name),
                        &attribute.name,
                        &term.attributes,
                        scope,
                    );
                    return None;
                }
            },
            None => &term.value,
        };

        // A term's variables come only from its own call arguments; the
        // caller's arguments are never visible inside it. Positional
        // arguments are evaluated for their diagnostics but bind nothing.
        let mut local = HashMap::new();
        if let Some(arguments) = arguments {
            for argument in &arguments.positional {
                let _ = self.resolve_expression(argument, scope);
            }
            for argument in &arguments.named {
                if let Some(value) = self.resolve_expression(&argument.value, scope) {
                    local.insert(argument.name.name.clone(), value);
                }
            }
        }

        let key = resolution_key(&format!("-{}", id.name), attribute.map(|a| a.name.as_str()));
        let previous = scope.swap_local_args(Some(local));
        let resolved = self.resolve_nested_pattern(&key, pattern, scope);
        scope.swap_local_args(previous);
        resolved
    }

    fn resolve_function_reference(
        &self,
        id: &Identifier,
        arguments: &CallArguments,
        scope: &mut Scope<'_>,
    ) -> Option<Value> {
        if !self.functions.has_function(&id.name) {
            let known: Vec<String> = self
                .functions
                .names()
                .into_iter()
                .map(ToString::to_string)
                .collect();
            let suggestions = compute_suggestions(&id.name, &known);
            let mut diagnostic = Diagnostic::new(DiagnosticKind::UnknownFunction {
                name: id.name.clone(),
            });
            if let Some(hint) = suggestion_hint(&suggestions) {
                diagnostic = diagnostic.with_hint(hint);
            }
            scope.report(diagnostic);
            return None;
        }

        let mut positional = Vec::with_capacity(arguments.positional.len());
        let mut named = BTreeMap::new();
        let mut failed = false;
        for argument in &arguments.positional {
            match self.resolve_expression(argument, scope) {
                Some(value) => positional.push(value),
                None => failed = true,
            }
        }
        for argument in &arguments.named {
            match self.resolve_expression(&argument.value, scope) {
                Some(value) => {
                    named.insert(argument.name.name.clone(), value);
                }
                None => failed = true,
            }
        }
        if failed {
            // The failing arguments have already been reported; the call
            // itself falls back.
            return None;
        }

        // The active locale is an implicit argument for the registry's own
        // built-ins only, decided by entry identity rather than by name.
        if self.functions.is_builtin(&id.name) {
            named
                .entry(IMPLICIT_LOCALE_ARG.to_string())
                .or_insert_with(|| Value::String(self.locale.to_string()));
        }

        match self.functions.call(&id.name, &positional, &named) {
            Ok(value) => Some(value),
            Err(error) => {
                scope.report(Diagnostic::new(DiagnosticKind::FunctionFailed {
                    name: id.name.clone(),
                    message: error.to_string(),
                }));
                None
            }
        }
    }

    /// Resolve a referenced pattern with cycle detection, merging its
    /// diagnostics into the caller's scope.
    fn resolve_nested_pattern(
        &self,
        key: &str,
        pattern: &Pattern,
        scope: &mut Scope<'_>,
    ) -> Option<Value> {
        match scope.enter_call(key) {
            Ok(()) => {
                let mut nested = String::new();
                self.resolve_pattern(pattern, scope, &mut nested);
                scope.exit_call();
                Some(Value::String(nested))
            }
            Err(kind) => {
                scope.report(Diagnostic::new(kind));
                None
            }
        }
    }

    fn report_unknown_attribute(
        &self,
        id: &str,
        attribute: &str,
        attributes: &[Attribute],
        scope: &mut Scope<'_>,
    ) {
        let known: Vec<String> = attributes
            .iter()
            .map(|attribute| attribute.id.name.clone())
            .collect();
        let suggestions = compute_suggestions(attribute, &known);
        let mut diagnostic = Diagnostic::new(DiagnosticKind::UnknownAttribute {
            id: id.to_string(),
            attribute: attribute.to_string(),
        });
        if let Some(hint) = suggestion_hint(&suggestions) {
            diagnostic = diagnostic.with_hint(hint);
        }
        scope.report(diagnostic);
    }
}

/// The key a message, attribute, or term occupies on the resolution stack
/// and in `{key}` fallbacks.
fn resolution_key(id: &str, attribute: Option<&str>) -> String {
    match attribute {
        Some(attribute) => format!("{id}.{attribute}"),
        None => id.to_string(),
    }
}

fn find_attribute<'m>(attributes: &'m [Attribute], name: &str) -> Option<&'m Attribute> {
    attributes.iter().find(|attribute| attribute.id.name == name)
}

/// Whether a variant key exactly matches a selector value: identifier keys
/// compare as text against the stringified value, number keys numerically.
fn variant_key_matches(key: &VariantKey, value: &Value) -> bool {
    match key {
        VariantKey::Identifier(id) => value.to_string() == id.name,
        VariantKey::Number { value: key_value, .. } => value.as_float() == Some(*key_value),
    }
}

/// The readable fallback for an expression that failed to resolve.
fn fallback(expression: &Expression) -> String {
    match expression {
        Expression::VariableReference { id } => format!("{{${}}}", id.name),
        Expression::MessageReference { id, attribute } => match attribute {
            Some(attribute) => format!("{{{}.{}}}", id.name, attribute.name),
            None => format!("{{{}}}", id.name),
        },
        Expression::TermReference { id, attribute, .. } => match attribute {
            Some(attribute) => format!("{{-{}.{}}}", id.name, attribute.name),
            None => format!("{{-{}}}", id.name),
        },
        Expression::FunctionReference { id, .. } => format!("{{{}(...)}}", id.name),
        _ => "{???}".to_string(),
    }
}
