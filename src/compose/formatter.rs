//! Text formatters applied to components before they are written.

use std::sync::Arc;

/// A pure text transform applied to a component.
///
/// Formatters are assumed total: a panicking formatter takes down the
/// dispatcher thread.
pub type Formatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Wrap a closure as a `Formatter`.
pub fn formatter<F>(f: F) -> Formatter
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wraps the text in round brackets, e.g. `(INFO)`.
pub fn bracket_wrap(s: &str) -> String {
    format!("({})", s)
}

/// Wraps the text in square brackets, e.g. `[INFO]`.
pub fn square_bracket_wrap(s: &str) -> String {
    format!("[{}]", s)
}

/// Apply an optional formatter; an unset formatter is the identity.
pub(crate) fn apply(formatter: Option<&Formatter>, text: &str) -> String {
    match formatter {
        Some(f) => f(text),
        None => text.to_string(),
    }
}
