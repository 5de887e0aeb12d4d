//! Tests for select-expression evaluation order: exact match, plural
//! category, then the default variant.

use ftl::{Bundle, args};

fn bundle_for(locale: &str, source: &str) -> Bundle {
    let mut bundle = Bundle::with_locale(locale);
    let warnings = bundle.add_resource_str(source);
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    bundle
}

const COUNT: &str = "count = { $n ->\n    [one] One\n   *[other] { $n } items\n}";

#[test]
fn test_plural_category_selection() {
    let bundle = bundle_for("en", COUNT);
    assert_eq!(bundle.format("count", &args! { "n" => 1 }).0, "One");
    assert_eq!(bundle.format("count", &args! { "n" => 5 }).0, "5 items");
}

#[test]
fn test_exact_number_match_beats_plural_category() {
    let source = "count = { $n ->\n    [0] No items\n    [one] One\n   *[other] { $n } items\n}";
    let bundle = bundle_for("en", source);
    assert_eq!(bundle.format("count", &args! { "n" => 0 }).0, "No items");
    assert_eq!(bundle.format("count", &args! { "n" => 1 }).0, "One");
}

#[test]
fn test_string_selector_exact_match() {
    let source = "pronoun = { $gender ->\n    [female] she\n    [male] he\n   *[other] they\n}";
    let bundle = bundle_for("en", source);
    assert_eq!(bundle.format("pronoun", &args! { "gender" => "female" }).0, "she");
    assert_eq!(bundle.format("pronoun", &args! { "gender" => "male" }).0, "he");
    assert_eq!(bundle.format("pronoun", &args! { "gender" => "robot" }).0, "they");
}

#[test]
fn test_string_selector_does_not_use_plural_rules() {
    let source = "k = { $word ->\n    [one] matched literally\n   *[other] fallback\n}";
    let bundle = bundle_for("en", source);
    // The *string* "one" matches the key as text...
    assert_eq!(bundle.format("k", &args! { "word" => "one" }).0, "matched literally");
    // ...but a non-matching string goes straight to the default, never
    // through plural rules.
    assert_eq!(bundle.format("k", &args! { "word" => "1" }).0, "fallback");
}

#[test]
fn test_russian_plural_categories() {
    let source = "apples = { $n ->\n    [one] яблоко\n    [few] яблока\n   *[many] яблок\n}";
    let bundle = bundle_for("ru", source);
    assert_eq!(bundle.format("apples", &args! { "n" => 1 }).0, "яблоко");
    assert_eq!(bundle.format("apples", &args! { "n" => 2 }).0, "яблока");
    assert_eq!(bundle.format("apples", &args! { "n" => 5 }).0, "яблок");
    assert_eq!(bundle.format("apples", &args! { "n" => 21 }).0, "яблоко");
}

#[test]
fn test_failed_selector_uses_default_variant() {
    let bundle = bundle_for("en", COUNT);
    let (text, diagnostics) = bundle.format("count", &args! {});
    assert_eq!(text, "{$n} items");
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].code(), "unknown-variable");
    assert_eq!(diagnostics[1].code(), "unknown-variable");
}

#[test]
fn test_number_builtin_as_selector() {
    let source = "count = { NUMBER($n) ->\n    [one] One\n   *[other] Many\n}";
    let bundle = bundle_for("en", source);
    assert_eq!(bundle.format("count", &args! { "n" => 1 }).0, "One");
    assert_eq!(bundle.format("count", &args! { "n" => 3 }).0, "Many");
}

#[test]
fn test_selector_from_term_attribute() {
    let source = "-brand = Firefox\n    .gender = masc\n\
                  opened = { -brand.gender ->\n    [masc] Er\n    [fem] Sie\n   *[other] Es\n}";
    let bundle = bundle_for("de", source);
    assert_eq!(bundle.format("opened", &args! {}).0, "Er");
}

#[test]
fn test_float_selector_uses_integer_part_for_plurals() {
    let bundle = bundle_for("en", COUNT);
    assert_eq!(bundle.format("count", &args! { "n" => 1.0 }).0, "One");
}
