//! Multi-locale fallback over an ordered list of bundles.

use std::collections::HashMap;

use crate::bundle::Bundle;
use crate::resolver::{Diagnostic, DiagnosticKind};
use crate::types::Value;

/// An ordered chain of bundles tried in priority order.
///
/// The first bundle that contains the requested message formats it; its
/// diagnostics are returned unchanged. Only when no bundle contains the
/// message does the chain itself report a failure with an `{id}` fallback.
///
/// # Example
///
/// ```
/// use ftl::{Bundle, FallbackChain, args};
///
/// let mut de = Bundle::with_locale("de");
/// de.add_resource_str("greeting = Hallo!");
/// let mut en = Bundle::with_locale("en");
/// en.add_resource_str("greeting = Hello!\nfarewell = Goodbye!");
///
/// let chain = FallbackChain::new(vec![de, en]);
/// assert_eq!(chain.format("greeting", &args! {}).0, "Hallo!");
/// assert_eq!(chain.format("farewell", &args! {}).0, "Goodbye!");
/// ```
#[derive(Default)]
pub struct FallbackChain {
    bundles: Vec<Bundle>,
}

impl FallbackChain {
    /// Create a chain from bundles in priority order (most preferred
    /// first).
    pub fn new(bundles: Vec<Bundle>) -> Self {
        Self { bundles }
    }

    /// Append a bundle with the lowest priority so far.
    pub fn push(&mut self, bundle: Bundle) {
        self.bundles.push(bundle);
    }

    /// The bundles in priority order.
    pub fn bundles(&self) -> &[Bundle] {
        &self.bundles
    }

    /// The locale codes in priority order.
    pub fn locales(&self) -> Vec<&str> {
        self.bundles.iter().map(Bundle::locale).collect()
    }

    /// Format a message's value from the first bundle that has it.
    pub fn format(&self, id: &str, args: &HashMap<String, Value>) -> (String, Vec<Diagnostic>) {
        match self.bundle_for(id) {
            Some(bundle) => bundle.format(id, args),
            None => self.miss(id, None),
        }
    }

    /// Format one attribute of a message from the first bundle that has
    /// the message.
    pub fn format_attribute(
        &self,
        id: &str,
        attribute: &str,
        args: &HashMap<String, Value>,
    ) -> (String, Vec<Diagnostic>) {
        match self.bundle_for(id) {
            Some(bundle) => bundle.format_attribute(id, attribute, args),
            None => self.miss(id, Some(attribute)),
        }
    }

    /// The first bundle in priority order containing the message.
    fn bundle_for(&self, id: &str) -> Option<&Bundle> {
        self.bundles.iter().find(|bundle| bundle.has_message(id))
    }

    fn miss(&self, id: &str, attribute: Option<&str>) -> (String, Vec<Diagnostic>) {
        let diagnostic = Diagnostic::new(DiagnosticKind::UnknownMessage { id: id.to_string() })
            .with_hint(format!("tried locales: {}", self.locales().join(", ")));
        let fallback = match attribute {
            Some(attribute) => format!("{{{id}.{attribute}}}"),
            None => format!("{{{id}}}"),
        };
        (fallback, vec![diagnostic])
    }
}
