//! Tests for resolver diagnostics: every expected failure yields a readable
//! fallback plus diagnostics, never a panic or an error return.

use ftl::{Bundle, DiagnosticKind, args};

fn bundle(source: &str) -> Bundle {
    let mut bundle = Bundle::with_locale("en");
    bundle.add_resource_str(source);
    bundle
}

#[test]
fn test_missing_variable() {
    let bundle = bundle("key = { $missing }");
    let (text, diagnostics) = bundle.format("key", &args! {});
    assert_eq!(text, "{$missing}");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].kind,
        DiagnosticKind::UnknownVariable {
            name: "missing".to_string()
        }
    );
}

#[test]
fn test_missing_variable_suggestion() {
    let bundle = bundle("key = { $nmae }");
    let (_, diagnostics) = bundle.format("key", &args! { "name" => "x" });
    let hint = diagnostics[0].hint.as_ref().expect("hint");
    assert!(hint.contains("name"), "hint was {hint:?}");
}

#[test]
fn test_unknown_message_reference() {
    let bundle = bundle("key = { absent }");
    let (text, diagnostics) = bundle.format("key", &args! {});
    assert_eq!(text, "{absent}");
    assert_eq!(diagnostics[0].code(), "unknown-message");
}

#[test]
fn test_unknown_term_reference() {
    let bundle = bundle("key = { -absent }");
    let (text, diagnostics) = bundle.format("key", &args! {});
    assert_eq!(text, "{-absent}");
    assert_eq!(diagnostics[0].code(), "unknown-term");
}

#[test]
fn test_unknown_attribute() {
    let bundle = bundle("other = Value\nkey = { other.missing }");
    let (text, diagnostics) = bundle.format("key", &args! {});
    assert_eq!(text, "{other.missing}");
    assert_eq!(diagnostics[0].code(), "unknown-attribute");
}

#[test]
fn test_message_without_value_referenced_for_value() {
    let bundle = bundle("titled =\n    .title = T\nkey = { titled }");
    let (text, diagnostics) = bundle.format("key", &args! {});
    assert_eq!(text, "{titled}");
    assert_eq!(diagnostics[0].code(), "no-value");
}

#[test]
fn test_format_unknown_message_id() {
    let bundle = bundle("note = something");
    let (text, diagnostics) = bundle.format("nope", &args! {});
    assert_eq!(text, "{nope}");
    assert_eq!(diagnostics[0].code(), "unknown-message");
    let hint = diagnostics[0].hint.as_ref().expect("hint");
    assert!(hint.contains("note"));
}

#[test]
fn test_format_unknown_attribute_name() {
    let bundle = bundle("button = Save\n    .tooltip = Click");
    let (text, diagnostics) = bundle.format_attribute("button", "tooltp", &args! {});
    assert_eq!(text, "{button.tooltp}");
    assert_eq!(diagnostics[0].code(), "unknown-attribute");
    let hint = diagnostics[0].hint.as_ref().expect("hint");
    assert!(hint.contains("tooltip"));
}

#[test]
fn test_self_reference_terminates_with_one_diagnostic() {
    let bundle = bundle("hello = { hello }");
    let (text, diagnostics) = bundle.format("hello", &args! {});
    assert_eq!(text, "{hello}");
    assert_eq!(diagnostics.len(), 1);
    match &diagnostics[0].kind {
        DiagnosticKind::CyclicReference { chain } => {
            assert_eq!(chain, &vec!["hello".to_string(), "hello".to_string()]);
        }
        other => panic!("expected a cyclic reference, got {other:?}"),
    }
}

#[test]
fn test_mutual_cycle_reports_full_path() {
    let bundle = bundle("a = { b }\nb = { a }");
    let (text, diagnostics) = bundle.format("a", &args! {});
    assert_eq!(text, "{a}");
    assert_eq!(diagnostics.len(), 1);
    match &diagnostics[0].kind {
        DiagnosticKind::CyclicReference { chain } => {
            assert_eq!(
                chain,
                &vec!["a".to_string(), "b".to_string(), "a".to_string()]
            );
        }
        other => panic!("expected a cyclic reference, got {other:?}"),
    }
}

#[test]
fn test_cycle_through_terms() {
    let bundle = bundle("-x = { -y }\n-y = { -x }\nkey = { -x }");
    let (text, diagnostics) = bundle.format("key", &args! {});
    assert_eq!(text, "{-x}");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code(), "cyclic-reference");
}

#[test]
fn test_deep_acyclic_chain_hits_depth_guard() {
    let mut source = String::new();
    for i in 0..80 {
        source.push_str(&format!("m{i} = level {{ m{} }}\n", i + 1));
    }
    source.push_str("m80 = bottom\n");
    let bundle = bundle(&source);
    let (_, diagnostics) = bundle.format("m0", &args! {});
    assert!(
        diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::MaxDepthExceeded)
    );
}

#[test]
fn test_nested_diagnostics_merge_into_caller() {
    let bundle = bundle("inner = { $missing }\nouter = [{ inner }]");
    let (text, diagnostics) = bundle.format("outer", &args! {});
    assert_eq!(text, "[{$missing}]");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code(), "unknown-variable");
}

#[test]
fn test_function_error_becomes_diagnostic() {
    let bundle = bundle("key = { NUMBER(\"abc\") }");
    let (text, diagnostics) = bundle.format("key", &args! {});
    assert_eq!(text, "{NUMBER(...)}");
    assert_eq!(diagnostics[0].code(), "function-failed");
}

#[test]
fn test_unknown_function() {
    let bundle = bundle("key = { NUMBRE($n) }");
    let (text, diagnostics) = bundle.format("key", &args! { "n" => 1 });
    assert_eq!(text, "{NUMBRE(...)}");
    assert_eq!(diagnostics[0].code(), "unknown-function");
    let hint = diagnostics[0].hint.as_ref().expect("hint");
    assert!(hint.contains("NUMBER"));
}

#[test]
fn test_diagnostic_rendering() {
    let bundle = bundle("key = { $missing }");
    let (_, diagnostics) = bundle.format("key", &args! {});
    let rendered = diagnostics[0].to_string();
    assert!(rendered.starts_with("error[unknown-variable]:"));
    assert!(rendered.contains("$missing"));
}
