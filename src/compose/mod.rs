//! Component composition.
//!
//! A log line is built from three components, in order:
//! - `Category` - the label identifying the logger's purpose
//! - `Timestamp` - the time of the log call
//! - `Message` - the caller's text
//!
//! Each component may carry a `Formatter` that transforms its text.

pub mod component;
pub mod formatter;

pub use component::*;
pub use formatter::*;
