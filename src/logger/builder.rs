//! Unregistered logger values.

use crate::compose::{Category, Formatter, Message, Timestamp};

use super::sink::Sink;

/// A logger that has not been registered yet.
///
/// Registering it (`Registry::register` / `Registry::add_loggers`) assigns
/// its identity and returns a usable `Logger`.
#[derive(Debug, Clone)]
pub struct LoggerBuilder {
    pub(crate) category: Category,
    pub(crate) timestamp: Timestamp,
    pub(crate) message: Message,
    pub(crate) sink: Sink,
    pub(crate) enabled: bool,
}

impl LoggerBuilder {
    /// Same defaults as `Registry::new_logger`: bracketed category, default
    /// timestamp, stdout, enabled.
    pub fn new(category: &str) -> Self {
        Self {
            category: Category::bracketed(category),
            timestamp: Timestamp::default(),
            message: Message::default(),
            sink: Sink::stdout(),
            enabled: true,
        }
    }

    /// No category, no timestamp, no formatters.
    pub fn plain() -> Self {
        Self {
            category: Category::default(),
            timestamp: Timestamp::disabled(),
            message: Message::default(),
            sink: Sink::stdout(),
            enabled: true,
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn category_formatter(mut self, formatter: Formatter) -> Self {
        self.category.formatter = Some(formatter);
        self
    }

    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn message_formatter(mut self, formatter: Formatter) -> Self {
        self.message.formatter = Some(formatter);
        self
    }

    pub fn sink(mut self, sink: Sink) -> Self {
        self.sink = sink;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn category_name(&self) -> &str {
        &self.category.name
    }
}
