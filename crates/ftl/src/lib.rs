pub mod bundle;
pub mod fallback;
pub mod parser;
pub mod resolver;
pub mod serializer;
pub mod types;

pub use bundle::{Bundle, LoadError, LoadWarning};
pub use fallback::FallbackChain;
pub use parser::{ParseError, ParseErrorKind, Resource, parse};
pub use resolver::{
    Diagnostic, DiagnosticKind, FunctionError, FunctionRegistry, MessageFn, PluralFn, Resolver,
    compute_suggestions, plural_category,
};
pub use serializer::serialize;
pub use types::Value;

/// Creates a `HashMap<String, Value>` from key-value pairs.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// integers, floats, or strings directly.
///
/// # Example
///
/// ```
/// use ftl::{Value, args};
///
/// let a = args! { "count" => 3, "name" => "Alice" };
/// assert_eq!(a.len(), 2);
/// assert_eq!(a["count"].as_number(), Some(3));
/// assert_eq!(a["name"].as_string(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! args {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
