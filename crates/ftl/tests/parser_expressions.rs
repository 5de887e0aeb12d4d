//! Integration tests for placeable expressions and select grammar.

use ftl::parser::{Entry, Expression, PatternElement, VariantKey, parse};

/// Parse a single message and return its pattern elements.
fn elements(source: &str) -> Vec<PatternElement> {
    let resource = parse(source);
    assert_eq!(resource.entries.len(), 1, "expected one entry for {source:?}");
    match &resource.entries[0] {
        Entry::Message(message) => message.value.as_ref().expect("value").elements.clone(),
        other => panic!("expected a message, got {other:?}"),
    }
}

/// Parse a single message with one placeable and return its expression.
fn placeable(source: &str) -> Expression {
    let all = elements(source);
    assert_eq!(all.len(), 1, "expected one element for {source:?}");
    match &all[0] {
        PatternElement::Placeable(expression) => expression.clone(),
        PatternElement::Text(text) => panic!("expected a placeable, got text {text:?}"),
    }
}

/// The annotation code of a source that must degrade to junk.
fn junk_code(source: &str) -> String {
    let resource = parse(source);
    match &resource.entries[0] {
        Entry::Junk(junk) => junk.annotations[0].code.clone(),
        other => panic!("expected junk, got {other:?}"),
    }
}

#[test]
fn test_variable_reference() {
    match placeable("key = { $name }") {
        Expression::VariableReference { id } => assert_eq!(id.name, "name"),
        other => panic!("expected a variable reference, got {other:?}"),
    }
}

#[test]
fn test_text_and_placeable_order() {
    let all = elements("key = Hello, { $name }!");
    assert_eq!(all.len(), 3);
    assert!(matches!(&all[0], PatternElement::Text(t) if t == "Hello, "));
    assert!(matches!(&all[1], PatternElement::Placeable(_)));
    assert!(matches!(&all[2], PatternElement::Text(t) if t == "!"));
}

#[test]
fn test_string_literal_with_escapes() {
    match placeable(r#"key = { "say \"hi\"\n\t\\" }"#) {
        Expression::StringLiteral { value } => assert_eq!(value, "say \"hi\"\n\t\\"),
        other => panic!("expected a string literal, got {other:?}"),
    }
}

#[test]
fn test_unicode_escapes() {
    match placeable(r#"key = { "A\U01F602" }"#) {
        Expression::StringLiteral { value } => assert_eq!(value, "A\u{1F602}"),
        other => panic!("expected a string literal, got {other:?}"),
    }
}

#[test]
fn test_unicode_escape_out_of_range_is_junk() {
    assert_eq!(junk_code(r#"key = { "\UFFFFFF" }"#), "invalid-unicode-escape");
}

#[test]
fn test_unknown_escape_is_junk() {
    assert_eq!(junk_code(r#"key = { "\x" }"#), "unknown-escape");
}

#[test]
fn test_number_literals_keep_raw_text() {
    match placeable("key = { 0.50 }") {
        Expression::NumberLiteral { raw, value } => {
            assert_eq!(raw, "0.50");
            assert!((value - 0.5).abs() < f64::EPSILON);
        }
        other => panic!("expected a number literal, got {other:?}"),
    }
}

#[test]
fn test_negative_number_versus_term_reference() {
    match placeable("key = { -3 }") {
        Expression::NumberLiteral { raw, .. } => assert_eq!(raw, "-3"),
        other => panic!("expected a number literal, got {other:?}"),
    }
    match placeable("key = { -brand }") {
        Expression::TermReference { id, .. } => assert_eq!(id.name, "brand"),
        other => panic!("expected a term reference, got {other:?}"),
    }
}

#[test]
fn test_message_reference_with_attribute() {
    match placeable("key = { other.title }") {
        Expression::MessageReference { id, attribute } => {
            assert_eq!(id.name, "other");
            assert_eq!(attribute.as_ref().map(|a| a.name.as_str()), Some("title"));
        }
        other => panic!("expected a message reference, got {other:?}"),
    }
}

#[test]
fn test_term_reference_with_arguments() {
    match placeable(r#"key = { -thing(case: "upper", count: 2) }"#) {
        Expression::TermReference { id, arguments, .. } => {
            assert_eq!(id.name, "thing");
            let arguments = arguments.expect("arguments");
            assert!(arguments.positional.is_empty());
            assert_eq!(arguments.named.len(), 2);
            assert_eq!(arguments.named[0].name.name, "case");
        }
        other => panic!("expected a term reference, got {other:?}"),
    }
}

#[test]
fn test_function_reference() {
    match placeable("key = { NUMBER($n, minimumFractionDigits: 2) }") {
        Expression::FunctionReference { id, arguments } => {
            assert_eq!(id.name, "NUMBER");
            assert_eq!(arguments.positional.len(), 1);
            assert_eq!(arguments.named.len(), 1);
            assert_eq!(arguments.named[0].name.name, "minimumFractionDigits");
        }
        other => panic!("expected a function reference, got {other:?}"),
    }
}

#[test]
fn test_lowercase_callee_is_junk() {
    assert_eq!(junk_code("key = { number($n) }"), "forbidden-callee");
}

#[test]
fn test_named_argument_must_be_literal() {
    assert_eq!(
        junk_code("key = { NUMBER($n, style: $other) }"),
        "named-argument-not-literal"
    );
}

#[test]
fn test_named_argument_junk_suggests_select_expression() {
    let resource = parse("key = { NUMBER($n, style: $other) }");
    match &resource.entries[0] {
        Entry::Junk(junk) => {
            assert!(junk.annotations[0].message.contains("select expression"));
        }
        other => panic!("expected junk, got {other:?}"),
    }
}

#[test]
fn test_duplicate_named_argument_is_junk() {
    assert_eq!(
        junk_code("key = { NUMBER($n, a: 1, a: 2) }"),
        "duplicate-named-argument"
    );
}

#[test]
fn test_positional_after_named_is_junk() {
    assert_eq!(
        junk_code("key = { NUMBER(a: 1, $n) }"),
        "positional-after-named"
    );
}

#[test]
fn test_select_expression_single_line() {
    match placeable("count = { $n -> [one] One *[other] { $n } items }") {
        Expression::Select { selector, variants } => {
            assert!(matches!(*selector, Expression::VariableReference { .. }));
            assert_eq!(variants.len(), 2);
            assert!(!variants[0].default);
            assert!(variants[1].default);
            assert_eq!(
                variants[0].value.elements,
                vec![PatternElement::Text("One".to_string())]
            );
        }
        other => panic!("expected a select expression, got {other:?}"),
    }
}

#[test]
fn test_select_expression_multiline() {
    let source = "count = { $n ->\n    [one] One item\n   *[other] { $n } items\n}";
    match placeable(source) {
        Expression::Select { variants, .. } => {
            assert_eq!(variants.len(), 2);
            assert_eq!(
                variants[0].value.elements,
                vec![PatternElement::Text("One item".to_string())]
            );
            assert!(variants[1].default);
        }
        other => panic!("expected a select expression, got {other:?}"),
    }
}

#[test]
fn test_select_number_variant_keys() {
    match placeable("k = { $n ->\n    [0] zero\n    [-1] minus one\n   *[other] rest\n}") {
        Expression::Select { variants, .. } => {
            assert!(matches!(
                &variants[0].key,
                VariantKey::Number { raw, .. } if raw == "0"
            ));
            assert!(matches!(
                &variants[1].key,
                VariantKey::Number { raw, .. } if raw == "-1"
            ));
        }
        other => panic!("expected a select expression, got {other:?}"),
    }
}

#[test]
fn test_select_requires_exactly_one_default() {
    assert_eq!(
        junk_code("k = { $n ->\n    [one] x\n}"),
        "missing-default-variant"
    );
    assert_eq!(
        junk_code("k = { $n ->\n   *[one] x\n   *[other] y\n}"),
        "multiple-default-variants"
    );
}

#[test]
fn test_select_requires_variants() {
    assert_eq!(junk_code("k = { $n ->\n}"), "missing-variants");
}

#[test]
fn test_variant_pattern_with_trailing_placeable() {
    // The closing brace of the select ends the default variant's pattern.
    match placeable("k = { $n ->\n   *[other] total: { $n }\n}") {
        Expression::Select { variants, .. } => {
            assert_eq!(variants[0].value.elements.len(), 2);
        }
        other => panic!("expected a select expression, got {other:?}"),
    }
}

#[test]
fn test_unbalanced_closing_brace_is_junk() {
    assert_eq!(junk_code("key = closing } brace"), "unbalanced-closing-brace");
}

#[test]
fn test_message_reference_expression() {
    match placeable("key = { other }") {
        Expression::MessageReference { id, attribute } => {
            assert_eq!(id.name, "other");
            assert!(attribute.is_none());
        }
        other => panic!("expected a message reference, got {other:?}"),
    }
}
