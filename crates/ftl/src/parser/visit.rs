//! Generic AST traversal and transformation.
//!
//! [`Visitor`] is a double-dispatch read-only walk: one visit method per
//! node kind, each defaulting to "visit children" via the matching `walk_*`
//! function. Override the methods you care about and call the walk function
//! to keep descending. [`Transformer`] builds new trees on the same
//! mechanism: each entry can be kept, replaced by any number of entries, or
//! removed, and expressions are rewritten bottom-up.

use std::collections::BTreeSet;

use super::ast::*;

/// A read-only traversal over a parsed resource.
pub trait Visitor {
    fn visit_resource(&mut self, resource: &Resource) {
        walk_resource(self, resource);
    }

    fn visit_entry(&mut self, entry: &Entry) {
        walk_entry(self, entry);
    }

    fn visit_message(&mut self, message: &Message) {
        walk_message(self, message);
    }

    fn visit_term(&mut self, term: &Term) {
        walk_term(self, term);
    }

    fn visit_attribute(&mut self, attribute: &Attribute) {
        walk_attribute(self, attribute);
    }

    fn visit_comment(&mut self, comment: &Comment) {
        let _ = comment;
    }

    fn visit_junk(&mut self, junk: &Junk) {
        let _ = junk;
    }

    fn visit_pattern(&mut self, pattern: &Pattern) {
        walk_pattern(self, pattern);
    }

    fn visit_expression(&mut self, expression: &Expression) {
        walk_expression(self, expression);
    }

    fn visit_variant(&mut self, variant: &Variant) {
        walk_variant(self, variant);
    }
}

pub fn walk_resource<V: Visitor + ?Sized>(visitor: &mut V, resource: &Resource) {
    for entry in &resource.entries {
        visitor.visit_entry(entry);
    }
}

pub fn walk_entry<V: Visitor + ?Sized>(visitor: &mut V, entry: &Entry) {
    match entry {
        Entry::Message(message) => visitor.visit_message(message),
        Entry::Term(term) => visitor.visit_term(term),
        Entry::Comment(comment) => visitor.visit_comment(comment),
        Entry::Junk(junk) => visitor.visit_junk(junk),
    }
}

pub fn walk_message<V: Visitor + ?Sized>(visitor: &mut V, message: &Message) {
    if let Some(value) = &message.value {
        visitor.visit_pattern(value);
    }
    for attribute in &message.attributes {
        visitor.visit_attribute(attribute);
    }
}

pub fn walk_term<V: Visitor + ?Sized>(visitor: &mut V, term: &Term) {
    visitor.visit_pattern(&term.value);
    for attribute in &term.attributes {
        visitor.visit_attribute(attribute);
    }
}

pub fn walk_attribute<V: Visitor + ?Sized>(visitor: &mut V, attribute: &Attribute) {
    visitor.visit_pattern(&attribute.value);
}

pub fn walk_pattern<V: Visitor + ?Sized>(visitor: &mut V, pattern: &Pattern) {
    for element in &pattern.elements {
        if let PatternElement::Placeable(expression) = element {
            visitor.visit_expression(expression);
        }
    }
}

pub fn walk_expression<V: Visitor + ?Sized>(visitor: &mut V, expression: &Expression) {
    match expression {
        Expression::StringLiteral { .. }
        | Expression::NumberLiteral { .. }
        | Expression::VariableReference { .. }
        | Expression::MessageReference { .. } => {}
        Expression::TermReference { arguments, .. } => {
            if let Some(arguments) = arguments {
                walk_call_arguments(visitor, arguments);
            }
        }
        Expression::FunctionReference { arguments, .. } => {
            walk_call_arguments(visitor, arguments);
        }
        Expression::Select { selector, variants } => {
            visitor.visit_expression(selector);
            for variant in variants {
                visitor.visit_variant(variant);
            }
        }
    }
}

pub fn walk_variant<V: Visitor + ?Sized>(visitor: &mut V, variant: &Variant) {
    visitor.visit_pattern(&variant.value);
}

fn walk_call_arguments<V: Visitor + ?Sized>(visitor: &mut V, arguments: &CallArguments) {
    for argument in &arguments.positional {
        visitor.visit_expression(argument);
    }
    for argument in &arguments.named {
        visitor.visit_expression(&argument.value);
    }
}

/// Collects the message, term, and variable names referenced by patterns.
///
/// Used for undefined-reference validation and tooling; sets are sorted so
/// reports are deterministic.
#[derive(Debug, Default)]
pub struct ReferenceCollector {
    pub messages: BTreeSet<String>,
    pub terms: BTreeSet<String>,
    pub variables: BTreeSet<String>,
}

impl ReferenceCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Visitor for ReferenceCollector {
    fn visit_expression(&mut self, expression: &Expression) {
        match expression {
            Expression::MessageReference { id, .. } => {
                self.messages.insert(id.name.clone());
            }
            Expression::TermReference { id, .. } => {
                self.terms.insert(id.name.clone());
            }
            Expression::VariableReference { id } => {
                self.variables.insert(id.name.clone());
            }
            _ => {}
        }
        walk_expression(self, expression);
    }
}

/// The outcome of transforming one entry.
pub enum EntryEdit {
    /// Keep the (possibly rewritten) entry.
    Keep(Entry),
    /// Replace the entry with any number of entries.
    Replace(Vec<Entry>),
    /// Drop the entry.
    Remove,
}

/// A tree-building transformation pass.
///
/// `transform_resource` applies `transform_entry` to every entry and
/// rewrites every expression bottom-up through `transform_expression`. The
/// input tree is consumed; a new tree is returned (AST nodes are never
/// mutated in place).
pub trait Transformer {
    fn transform_entry(&mut self, entry: Entry) -> EntryEdit {
        EntryEdit::Keep(entry)
    }

    fn transform_expression(&mut self, expression: Expression) -> Expression {
        expression
    }
}

pub fn transform_resource<T: Transformer>(transformer: &mut T, resource: Resource) -> Resource {
    let mut entries = Vec::with_capacity(resource.entries.len());
    for entry in resource.entries {
        match transformer.transform_entry(entry) {
            EntryEdit::Keep(entry) => entries.push(rewrite_entry(transformer, entry)),
            EntryEdit::Replace(replacements) => {
                for entry in replacements {
                    entries.push(rewrite_entry(transformer, entry));
                }
            }
            EntryEdit::Remove => {}
        }
    }
    Resource { entries }
}

fn rewrite_entry<T: Transformer>(transformer: &mut T, entry: Entry) -> Entry {
    match entry {
        Entry::Message(message) => Entry::Message(Message {
            id: message.id,
            value: message.value.map(|value| rewrite_pattern(transformer, value)),
            attributes: message
                .attributes
                .into_iter()
                .map(|attribute| rewrite_attribute(transformer, attribute))
                .collect(),
            span: message.span,
        }),
        Entry::Term(term) => Entry::Term(Term {
            id: term.id,
            value: rewrite_pattern(transformer, term.value),
            attributes: term
                .attributes
                .into_iter()
                .map(|attribute| rewrite_attribute(transformer, attribute))
                .collect(),
            span: term.span,
        }),
        other @ (Entry::Comment(_) | Entry::Junk(_)) => other,
    }
}

fn rewrite_attribute<T: Transformer>(transformer: &mut T, attribute: Attribute) -> Attribute {
    Attribute {
        id: attribute.id,
        value: rewrite_pattern(transformer, attribute.value),
    }
}

fn rewrite_pattern<T: Transformer>(transformer: &mut T, pattern: Pattern) -> Pattern {
    Pattern {
        elements: pattern
            .elements
            .into_iter()
            .map(|element| match element {
                PatternElement::Text(text) => PatternElement::Text(text),
                PatternElement::Placeable(expression) => {
                    PatternElement::Placeable(rewrite_expression(transformer, expression))
                }
            })
            .collect(),
    }
}

fn rewrite_expression<T: Transformer>(transformer: &mut T, expression: Expression) -> Expression {
    let rebuilt = match expression {
        Expression::TermReference {
            id,
            attribute,
            arguments,
        } => Expression::TermReference {
            id,
            attribute,
            arguments: arguments.map(|arguments| rewrite_call_arguments(transformer, arguments)),
        },
        Expression::FunctionReference { id, arguments } => Expression::FunctionReference {
            id,
            arguments: rewrite_call_arguments(transformer, arguments),
        },
        Expression::Select { selector, variants } => Expression::Select {
            selector: Box::new(rewrite_expression(transformer, *selector)),
            variants: variants
                .into_iter()
                .map(|variant| Variant {
                    key: variant.key,
                    value: rewrite_pattern(transformer, variant.value),
                    default: variant.default,
                })
                .collect(),
        },
        leaf => leaf,
    };
    transformer.transform_expression(rebuilt)
}

fn rewrite_call_arguments<T: Transformer>(
    transformer: &mut T,
    arguments: CallArguments,
) -> CallArguments {
    CallArguments {
        positional: arguments
            .positional
            .into_iter()
            .map(|argument| rewrite_expression(transformer, argument))
            .collect(),
        named: arguments
            .named
            .into_iter()
            .map(|argument| NamedArgument {
                name: argument.name,
                value: rewrite_expression(transformer, argument.value),
            })
            .collect(),
    }
}
