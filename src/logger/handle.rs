//! Registered logger handles.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::compose::{Category, Formatter, Message, Timestamp};
use crate::diagnostics::DiagContext;
use crate::dispatch::{Dispatcher, WriteRequest};
use crate::registry::handle::RegistryInner;

use super::builder::LoggerBuilder;
use super::sink::Sink;

struct Parts {
    category: Category,
    timestamp: Timestamp,
    message: Message,
    sink: Sink,
}

pub(crate) struct LoggerShared {
    identity: u64,
    parts: RwLock<Parts>,
    enabled: AtomicBool,
    count: AtomicU64,
    dispatcher: Arc<Dispatcher>,
    registry: Weak<RegistryInner>,
}

/// A registered logger. Clones refer to the same logger.
#[derive(Clone)]
pub struct Logger {
    shared: Arc<LoggerShared>,
}

impl Logger {
    pub(crate) fn from_builder(
        identity: u64,
        builder: LoggerBuilder,
        dispatcher: Arc<Dispatcher>,
        registry: Weak<RegistryInner>,
    ) -> Self {
        let LoggerBuilder {
            category,
            timestamp,
            message,
            sink,
            enabled,
        } = builder;

        Self {
            shared: Arc::new(LoggerShared {
                identity,
                parts: RwLock::new(Parts {
                    category,
                    timestamp,
                    message,
                    sink,
                }),
                enabled: AtomicBool::new(enabled),
                count: AtomicU64::new(0),
                dispatcher,
                registry,
            }),
        }
    }

    /// Identity assigned at registration; 0 for a registry's first logger.
    pub fn identity(&self) -> u64 {
        self.shared.identity
    }

    pub fn category_name(&self) -> String {
        self.shared.parts.read().category.name.clone()
    }

    pub fn category(&self) -> Category {
        self.shared.parts.read().category.clone()
    }

    /// The composed category text, as used for padding.
    pub fn composed_category(&self) -> String {
        self.shared.parts.read().category.compose()
    }

    /// Replace the category; the owning registry recomputes padding.
    pub fn set_category(&self, category: Category) {
        self.shared.parts.write().category = category;
        if let Some(registry) = self.shared.registry.upgrade() {
            registry.refresh_padding();
        }
    }

    pub fn set_timestamp(&self, timestamp: Timestamp) {
        self.shared.parts.write().timestamp = timestamp;
    }

    pub fn set_message_formatter(&self, formatter: Option<Formatter>) {
        self.shared.parts.write().message.formatter = formatter;
    }

    /// Swap the destination. Entries already submitted keep the sink they
    /// were submitted with.
    pub fn set_output(&self, sink: Sink) {
        self.shared.parts.write().sink = sink;
    }

    pub fn output(&self) -> Sink {
        self.shared.parts.read().sink.clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.shared.enabled.load(Ordering::Acquire)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.shared.enabled.store(enabled, Ordering::Release);
    }

    pub fn enable(&self) {
        self.set_enabled(true);
    }

    /// Further log calls are silently ignored until re-enabled.
    pub fn disable(&self) {
        self.set_enabled(false);
    }

    /// Number of accepted log calls. May run ahead of completed writes.
    pub fn count(&self) -> u64 {
        self.shared.count.load(Ordering::Acquire)
    }

    /// Log a message.
    pub fn log(&self, message: impl fmt::Display) {
        self.perform_log(message, false);
    }

    /// Log pre-formatted arguments; see the `logf!` macro.
    pub fn logf(&self, args: fmt::Arguments<'_>) {
        self.perform_log(args, false);
    }

    /// Log a message followed by a blank line.
    pub fn logln(&self, message: impl fmt::Display) {
        self.perform_log(message, true);
    }

    fn perform_log(&self, message: impl fmt::Display, trailing_blank: bool) {
        if !self.is_enabled() {
            return;
        }

        let raw = message.to_string();
        let request = {
            let parts = self.shared.parts.read();

            let mut text = parts.timestamp.compose();
            text.push(' ');
            text.push_str(&parts.message.compose(&raw));
            if trailing_blank {
                text.push('\n');
            }

            WriteRequest {
                sink: parts.sink.clone(),
                category: parts.category.clone(),
                text,
            }
        };

        self.shared.count.fetch_add(1, Ordering::AcqRel);

        if let Err(e) = self.shared.dispatcher.submit(request) {
            crate::log_error!(
                DiagContext::new("logger").with_logger(self.identity(), &self.category_name()),
                "LOG_DROPPED",
                error = e
            );
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self.shared.parts.read();
        f.debug_struct("Logger")
            .field("identity", &self.shared.identity)
            .field("category", &parts.category)
            .field("timestamp", &parts.timestamp)
            .field("sink", &parts.sink)
            .field("enabled", &self.is_enabled())
            .field("count", &self.count())
            .finish()
    }
}
