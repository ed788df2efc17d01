//! Catlog Core - categorized, component-oriented logging
//!
//! Independent named loggers (INFO, ERROR, INCOMING, ...) compose each line
//! from three components, in order: category, timestamp, message. Every
//! write from every logger of a registry goes through one dispatcher thread,
//! which gives:
//!
//! 1. **Total ordering** - lines land in the order the dispatcher takes them
//! 2. **No interleaving** - one writer, so sinks need no outer lock
//! 3. **Cross-logger layout** - padded categories and grouped repeats
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `compose` - category/timestamp/message components and formatters
//! - `logger` - logger handles, pre-built logger values, sinks
//! - `registry` - logging contexts, identities, administrative controls
//! - `dispatch` - the serializing worker and its layout state
//! - `config` - settings (JSON, `CATLOG_CONFIG`)
//! - `diagnostics` - the crate's own operational logging
//!
//! ## Example
//!
//! ```no_run
//! use catlog_core::{Registry, Settings, Sink};
//!
//! let registry = Registry::start(Settings::default()).unwrap();
//! let info = registry.new_logger(Sink::stdout(), "INFO", true);
//! let error = registry.new_logger(Sink::stderr(), "ERROR", true);
//!
//! info.log("service started");
//! catlog_core::logf!(error, "request failed: {}", "timeout");
//!
//! registry.shutdown().unwrap();
//! ```

pub mod compose;
pub mod config;
pub mod diagnostics;
pub mod dispatch;
pub mod error;
pub mod logger;
pub mod registry;

pub use compose::{
    bracket_wrap, formatter, square_bracket_wrap, Category, Formatter, Message, Timestamp,
    DEFAULT_TIMESTAMP_FORMAT,
};
pub use config::Settings;
pub use diagnostics::init_diagnostics;
pub use error::{Error, Result};
pub use logger::{Logger, LoggerBuilder, MemoryWriter, SharedWriter, Sink};
pub use registry::{global, Registry};
