//! CLDR plural category resolution.
//!
//! Maps a number to the plural category variant key it selects in a given
//! locale. Different locales have different plural rules - English has
//! "one" and "other", Russian has "one", "few", "many", and "other", and
//! Arabic uses all six categories.
//!
//! Plural rules are cached per thread per locale to avoid re-creating
//! `PluralRules` instances on every call. The cache is initialized lazily
//! on first access within each thread.

use std::cell::RefCell;

use icu_locale_core::{Locale, locale};
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

/// The signature of a plural-category function the resolver is given.
///
/// Implementations must be pure: the same `(locale, n)` input always maps
/// to the same category name.
pub type PluralFn = fn(&str, i64) -> &'static str;

thread_local! {
    /// Per-thread cache of `PluralRules` keyed by locale code.
    static PLURAL_RULES_CACHE: RefCell<Vec<(String, PluralRules)>> = const { RefCell::new(Vec::new()) };
}

/// Build `PluralRules` for a locale code, falling back to English for
/// codes that do not parse.
fn build_rules(code: &str) -> PluralRules {
    let loc = Locale::try_from_str(code).unwrap_or_else(|_| locale!("en"));
    PluralRules::try_new(loc.into(), PluralRuleType::Cardinal.into()).unwrap_or_else(|_| {
        PluralRules::try_new(locale!("en").into(), PluralRuleType::Cardinal.into())
            .expect("English plural rules are compiled in")
    })
}

/// Translate a `PluralCategory` enum to its CLDR name.
fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

/// Get the CLDR plural category for a number in a given locale.
///
/// Returns one of: "zero", "one", "two", "few", "many", "other". Rules are
/// cached per thread per locale, so repeated calls with the same code reuse
/// the previously constructed `PluralRules`.
///
/// # Examples
///
/// ```
/// use ftl::plural_category;
///
/// // English: 1 = "one", everything else = "other"
/// assert_eq!(plural_category("en", 1), "one");
/// assert_eq!(plural_category("en", 2), "other");
///
/// // Russian: complex rules for "one", "few", "many", "other"
/// assert_eq!(plural_category("ru", 1), "one");
/// assert_eq!(plural_category("ru", 2), "few");
/// assert_eq!(plural_category("ru", 5), "many");
/// ```
pub fn plural_category(locale: &str, n: i64) -> &'static str {
    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        if let Some(entry) = cache.iter().find(|(code, _)| code == locale) {
            return category_str(entry.1.category_for(n));
        }
        let rules = build_rules(locale);
        let category = category_str(rules.category_for(n));
        cache.push((locale.to_string(), rules));
        category
    })
}
