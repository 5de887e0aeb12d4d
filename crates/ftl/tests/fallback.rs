//! Tests for the multi-locale fallback chain.

use ftl::{Bundle, FallbackChain, args};

fn chain() -> FallbackChain {
    let mut de = Bundle::with_locale("de");
    de.add_resource_str("greeting = Hallo, { $name }!\napples = { $n ->\n    [one] ein Apfel\n   *[other] { $n } Äpfel\n}");
    let mut en = Bundle::with_locale("en");
    en.add_resource_str("greeting = Hello, { $name }!\nfarewell = Goodbye!\nbutton = Save\n    .tooltip = Click to save");
    FallbackChain::new(vec![de, en])
}

#[test]
fn test_primary_bundle_wins() {
    let chain = chain();
    let (text, diagnostics) = chain.format("greeting", &args! { "name" => "Ada" });
    assert_eq!(text, "Hallo, Ada!");
    assert!(diagnostics.is_empty());
}

#[test]
fn test_falls_back_in_priority_order() {
    let chain = chain();
    let (text, diagnostics) = chain.format("farewell", &args! {});
    assert_eq!(text, "Goodbye!");
    assert!(diagnostics.is_empty());
}

#[test]
fn test_plural_rules_follow_the_serving_bundle() {
    let chain = chain();
    assert_eq!(chain.format("apples", &args! { "n" => 1 }).0, "ein Apfel");
    assert_eq!(chain.format("apples", &args! { "n" => 3 }).0, "3 Äpfel");
}

#[test]
fn test_attribute_formatting_through_chain() {
    let chain = chain();
    let (text, diagnostics) = chain.format_attribute("button", "tooltip", &args! {});
    assert_eq!(text, "Click to save");
    assert!(diagnostics.is_empty());
}

#[test]
fn test_miss_reports_tried_locales() {
    let chain = chain();
    let (text, diagnostics) = chain.format("absent", &args! {});
    assert_eq!(text, "{absent}");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code(), "unknown-message");
    let hint = diagnostics[0].hint.as_ref().expect("hint");
    assert_eq!(hint, "tried locales: de, en");
}

#[test]
fn test_locales_in_priority_order() {
    assert_eq!(chain().locales(), vec!["de", "en"]);
}

#[test]
fn test_empty_chain_is_total() {
    let chain = FallbackChain::default();
    let (text, diagnostics) = chain.format("anything", &args! {});
    assert_eq!(text, "{anything}");
    assert_eq!(diagnostics.len(), 1);
}
