//! Diagnostics for the logging subsystem itself.
//!
//! Operational events (dispatcher lifecycle, dropped entries, sink write
//! failures) go through the `log` facade, prefixed with a small context so
//! they can be correlated with the logger or component that raised them.

pub mod structured;

pub use structured::*;
