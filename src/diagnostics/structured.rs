//! Structured diagnostic context.
//!
//! Every diagnostic line starts with the component that emitted it and, when
//! one is involved, the logger identity and category name.

use std::fmt;

/// Context prefix for diagnostic log lines.
#[derive(Debug, Clone)]
pub struct DiagContext {
    pub component: &'static str,
    /// Identity and category name of the logger involved, if any.
    pub logger: Option<(u64, String)>,
}

impl DiagContext {
    pub fn new(component: &'static str) -> Self {
        Self {
            component,
            logger: None,
        }
    }

    pub fn with_logger(&self, logger_id: u64, category: &str) -> Self {
        Self {
            component: self.component,
            logger: Some((logger_id, category.to_string())),
        }
    }
}

impl fmt::Display for DiagContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.logger {
            Some((id, category)) => write!(
                f,
                "[{}] [logger={} category={:?}]",
                self.component, id, category
            ),
            None => write!(f, "[{}]", self.component),
        }
    }
}

/// Log an info event with context.
///
/// `log_info!(ctx, "EVENT", key = value, ...)` writes `<ctx> EVENT key=value ...`,
/// each value rendered with `{:?}`.
#[macro_export]
macro_rules! log_info {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        ::log::info!(
            "{} {}{}",
            $ctx,
            $event,
            ::std::format_args!(
                ::std::concat!($(" ", ::std::stringify!($key), "={:?}"),*),
                $($value),*
            )
        )
    };
}

/// Log a warning event with context.
#[macro_export]
macro_rules! log_warn {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        ::log::warn!(
            "{} {}{}",
            $ctx,
            $event,
            ::std::format_args!(
                ::std::concat!($(" ", ::std::stringify!($key), "={:?}"),*),
                $($value),*
            )
        )
    };
}

/// Log an error event with context.
#[macro_export]
macro_rules! log_error {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        ::log::error!(
            "{} {}{}",
            $ctx,
            $event,
            ::std::format_args!(
                ::std::concat!($(" ", ::std::stringify!($key), "={:?}"),*),
                $($value),*
            )
        )
    };
}

/// Log a debug event with context.
#[macro_export]
macro_rules! log_debug {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        ::log::debug!(
            "{} {}{}",
            $ctx,
            $event,
            ::std::format_args!(
                ::std::concat!($(" ", ::std::stringify!($key), "={:?}"),*),
                $($value),*
            )
        )
    };
}

/// Install an `env_logger` backend for the crate's own diagnostics.
///
/// Defaults to `warn`; `RUST_LOG` overrides the filter. Safe to call more
/// than once.
pub fn init_diagnostics() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .try_init();
}
