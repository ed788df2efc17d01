//! Settings for a logging context.
//!
//! Settings can be built in code, parsed from JSON, or read from the file
//! named by `CATLOG_CONFIG` for the process-wide default registry.

pub mod settings;

pub use settings::*;
