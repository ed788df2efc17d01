//! Loggers.
//!
//! A `Logger` is one independently enabled channel (INFO, ERROR, INCOMING,
//! ...) with its own components and destination. Loggers only compose text;
//! every write goes through the registry's dispatcher.

pub mod builder;
pub mod handle;
pub mod sink;

pub use builder::*;
pub use handle::*;
pub use sink::*;

/// Log a formatted message through a `Logger`.
///
/// `logf!(logger, "request from {}", addr)` is `logger.logf(format_args!(..))`.
#[macro_export]
macro_rules! logf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.logf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message followed by a blank line.
#[macro_export]
macro_rules! logln {
    ($logger:expr, $($arg:tt)+) => {
        $logger.logln(::std::format_args!($($arg)+))
    };
}
