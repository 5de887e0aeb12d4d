//! AST-to-text serialization.
//!
//! Produces canonical FTL text from a parsed [`Resource`]. Serializing a
//! freshly parsed resource reaches a textual fixed point: multiline
//! patterns collapse to their single-space-joined form on the first parse,
//! after which parse-serialize round trips are byte-stable. Junk entries
//! pass through verbatim so malformed input survives round trips.

use crate::parser::ast::{
    Attribute, CallArguments, Comment, CommentKind, Entry, Expression, Message, Pattern,
    PatternElement, Resource, Term, Variant, VariantKey,
};

/// Serialize a resource to FTL text.
pub fn serialize(resource: &Resource) -> String {
    let mut out = String::new();
    for entry in &resource.entries {
        match entry {
            Entry::Message(message) => serialize_message(message, &mut out),
            Entry::Term(term) => serialize_term(term, &mut out),
            Entry::Comment(comment) => serialize_comment(comment, &mut out),
            Entry::Junk(junk) => out.push_str(&junk.content),
        }
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

fn serialize_message(message: &Message, out: &mut String) {
    out.push_str(&message.id.name);
    out.push_str(" =");
    if let Some(value) = &message.value {
        out.push(' ');
        serialize_pattern(value, out);
    }
    serialize_attributes(&message.attributes, out);
}

fn serialize_term(term: &Term, out: &mut String) {
    out.push('-');
    out.push_str(&term.id.name);
    out.push_str(" = ");
    serialize_pattern(&term.value, out);
    serialize_attributes(&term.attributes, out);
}

fn serialize_attributes(attributes: &[Attribute], out: &mut String) {
    for attribute in attributes {
        out.push_str("\n    .");
        out.push_str(&attribute.id.name);
        out.push_str(" = ");
        serialize_pattern(&attribute.value, out);
    }
}

fn serialize_comment(comment: &Comment, out: &mut String) {
    let marker = match comment.kind {
        CommentKind::Line => "#",
        CommentKind::Group => "##",
        CommentKind::Resource => "###",
    };
    for line in comment.content.split('\n') {
        out.push_str(marker);
        if !line.is_empty() {
            out.push(' ');
            out.push_str(line);
        }
        out.push('\n');
    }
}

fn serialize_pattern(pattern: &Pattern, out: &mut String) {
    for element in &pattern.elements {
        match element {
            PatternElement::Text(text) => out.push_str(text),
            PatternElement::Placeable(expression) => serialize_placeable(expression, out),
        }
    }
}

fn serialize_placeable(expression: &Expression, out: &mut String) {
    if let Expression::Select { selector, variants } = expression {
        out.push_str("{ ");
        serialize_expression(selector, out);
        out.push_str(" ->\n");
        for variant in variants {
            serialize_variant(variant, out);
        }
        out.push('}');
        return;
    }
    out.push_str("{ ");
    serialize_expression(expression, out);
    out.push_str(" }");
}

fn serialize_variant(variant: &Variant, out: &mut String) {
    out.push_str(if variant.default { "   *" } else { "    " });
    out.push('[');
    match &variant.key {
        VariantKey::Identifier(id) => out.push_str(&id.name),
        VariantKey::Number { raw, .. } => out.push_str(raw),
    }
    out.push_str("] ");
    serialize_pattern(&variant.value, out);
    out.push('\n');
}

fn serialize_expression(expression: &Expression, out: &mut String) {
    match expression {
        Expression::StringLiteral { value } => {
            out.push('"');
            out.push_str(&escape_string(value));
            out.push('"');
        }
        Expression::NumberLiteral { raw, .. } => out.push_str(raw),
        Expression::VariableReference { id } => {
            out.push('$');
            out.push_str(&id.name);
        }
        Expression::MessageReference { id, attribute } => {
            out.push_str(&id.name);
            if let Some(attribute) = attribute {
                out.push('.');
                out.push_str(&attribute.name);
            }
        }
        Expression::TermReference {
            id,
            attribute,
            arguments,
        } => {
            out.push('-');
            out.push_str(&id.name);
            if let Some(attribute) = attribute {
                out.push('.');
                out.push_str(&attribute.name);
            }
            if let Some(arguments) = arguments {
                serialize_call_arguments(arguments, out);
            }
        }
        Expression::FunctionReference { id, arguments } => {
            out.push_str(&id.name);
            serialize_call_arguments(arguments, out);
        }
        select @ Expression::Select { .. } => serialize_placeable(select, out),
    }
}

fn serialize_call_arguments(arguments: &CallArguments, out: &mut String) {
    out.push('(');
    let mut first = true;
    for argument in &arguments.positional {
        if !first {
            out.push_str(", ");
        }
        serialize_expression(argument, out);
        first = false;
    }
    for argument in &arguments.named {
        if !first {
            out.push_str(", ");
        }
        out.push_str(&argument.name.name);
        out.push_str(": ");
        serialize_expression(&argument.value, out);
        first = false;
    }
    out.push(')');
}

/// Re-escape a string-literal value for quoting.
fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}
