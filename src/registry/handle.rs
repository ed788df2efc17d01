//! The registry handle and the process-wide default registry.

use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::{Mutex, MutexGuard};

use crate::compose::Timestamp;
use crate::config::Settings;
use crate::diagnostics::DiagContext;
use crate::dispatch::{Dispatcher, Layout, LayoutUpdate};
use crate::error::Result;
use crate::logger::{Logger, LoggerBuilder, Sink};

use super::state::RegistryState;

pub(crate) struct RegistryInner {
    state: Mutex<RegistryState>,
    dispatcher: Arc<Dispatcher>,
    default_timestamp: Timestamp,
    ctx: DiagContext,
}

impl RegistryInner {
    /// Recompute padding after a logger's category changed.
    pub(crate) fn refresh_padding(&self) {
        let mut state = self.state.lock();
        if !state.padding {
            return;
        }
        if let Err(e) = self.push_padding(&mut state) {
            crate::log_warn!(self.ctx, "PADDING_REFRESH_FAILED", error = e);
        }
    }

    /// Recompute the width and hand it to the dispatcher while the lock is
    /// still held, so concurrent registry calls reach the worker in order.
    fn push_padding(&self, state: &mut MutexGuard<'_, RegistryState>) -> Result<()> {
        let max_width = state.recompute_width();
        self.dispatcher.update_layout(LayoutUpdate::Padding {
            enabled: state.padding,
            max_width,
        })
    }
}

/// A logging context: registered loggers plus their dispatcher.
///
/// Cloning is cheap; clones share the same context.
#[derive(Clone)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

impl Registry {
    /// Start a registry and its dispatcher thread.
    ///
    /// # Errors
    /// Invalid settings, or the dispatcher thread could not be spawned.
    pub fn start(settings: Settings) -> Result<Self> {
        settings.validate()?;

        let default_timestamp = Timestamp::new(&settings.timestamp_format)?;
        let layout = Layout::new(settings.category_padding, 0, settings.category_grouping);
        let dispatcher = Dispatcher::start(
            &settings.thread_name,
            layout,
            settings.buffered,
            settings.buffer_capacity,
        )?;

        let ctx = DiagContext::new("registry");
        crate::log_info!(
            ctx,
            "REGISTRY_STARTED",
            padding = settings.category_padding,
            grouping = settings.category_grouping,
            buffered = settings.buffered
        );

        Ok(Self {
            inner: Arc::new(RegistryInner {
                state: Mutex::new(RegistryState::new(
                    settings.category_padding,
                    settings.category_grouping,
                )),
                dispatcher: Arc::new(dispatcher),
                default_timestamp,
                ctx,
            }),
        })
    }

    /// Create and register a logger with a bracketed category and the
    /// registry's default timestamp. An empty category means no label.
    pub fn new_logger(&self, sink: Sink, category: &str, enabled: bool) -> Logger {
        let builder = LoggerBuilder::new(category)
            .timestamp(self.inner.default_timestamp.clone())
            .sink(sink)
            .enabled(enabled);
        self.register(builder)
    }

    /// Register a pre-built logger, assigning the next identity.
    pub fn register(&self, builder: LoggerBuilder) -> Logger {
        let mut state = self.inner.state.lock();
        self.register_locked(&mut state, builder)
    }

    /// Register several loggers; identities follow iteration order.
    pub fn add_loggers<I>(&self, builders: I) -> Vec<Logger>
    where
        I: IntoIterator<Item = LoggerBuilder>,
    {
        let mut state = self.inner.state.lock();
        builders
            .into_iter()
            .map(|builder| self.register_locked(&mut state, builder))
            .collect()
    }

    fn register_locked(
        &self,
        state: &mut MutexGuard<'_, RegistryState>,
        builder: LoggerBuilder,
    ) -> Logger {
        let identity = state.take_identity();
        let logger = Logger::from_builder(
            identity,
            builder,
            self.inner.dispatcher.clone(),
            Arc::downgrade(&self.inner),
        );
        state.loggers.insert(identity, logger.clone());

        crate::log_debug!(
            self.inner.ctx.with_logger(identity, &logger.category_name()),
            "LOGGER_REGISTERED"
        );

        if state.padding {
            if let Err(e) = self.inner.push_padding(state) {
                crate::log_warn!(self.inner.ctx, "PADDING_REFRESH_FAILED", error = e);
            }
        }

        logger
    }

    pub fn logger(&self, identity: u64) -> Option<Logger> {
        self.inner.state.lock().loggers.get(&identity).cloned()
    }

    /// Registered loggers ordered by identity.
    pub fn loggers(&self) -> Vec<Logger> {
        self.inner.state.lock().loggers.values().cloned().collect()
    }

    pub fn logger_count(&self) -> usize {
        self.inner.state.lock().loggers.len()
    }

    /// Width every category is padded to; 0 while padding is disabled.
    pub fn max_category_width(&self) -> usize {
        self.inner.state.lock().max_width
    }

    pub fn category_padding(&self) -> bool {
        self.inner.state.lock().padding
    }

    pub fn category_grouping(&self) -> bool {
        self.inner.state.lock().grouping
    }

    /// Enable or disable padding categories so timestamps line up.
    pub fn set_category_padding(&self, enabled: bool) -> Result<()> {
        let mut state = self.inner.state.lock();
        state.padding = enabled;
        self.inner.push_padding(&mut state)
    }

    /// Enable or disable blanking a category label repeated on consecutive
    /// writes. Takes effect on the next write.
    pub fn set_category_grouping(&self, enabled: bool) -> Result<()> {
        let mut state = self.inner.state.lock();
        state.grouping = enabled;
        self.inner
            .dispatcher
            .update_layout(LayoutUpdate::Grouping(enabled))
    }

    /// Switch every logger between blocking and buffered submission.
    pub fn set_buffering(&self, enabled: bool, capacity: usize) -> Result<()> {
        let _state = self.inner.state.lock();
        self.inner.dispatcher.set_buffering(enabled, capacity)?;
        crate::log_debug!(
            self.inner.ctx,
            "BUFFERING_SET",
            enabled = enabled,
            capacity = capacity
        );
        Ok(())
    }

    /// Like `set_buffering`, keeping the current capacity.
    pub fn set_buffered(&self, enabled: bool) -> Result<()> {
        let capacity = self.inner.dispatcher.buffer_capacity();
        self.set_buffering(enabled, capacity)
    }

    pub fn is_buffered(&self) -> bool {
        self.inner.dispatcher.is_buffered()
    }

    pub fn buffer_capacity(&self) -> usize {
        self.inner.dispatcher.buffer_capacity()
    }

    /// Set `enabled` on every logger whose category name matches one of
    /// `names` exactly (case-sensitive). Returns how many loggers matched.
    pub fn set_enabled_by_category<I, S>(&self, enabled: bool, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names.into_iter().map(|n| n.as_ref().to_string()).collect();
        self.inner
            .state
            .lock()
            .set_enabled_by_category(enabled, &names)
    }

    /// Enable loggers with identity <= `threshold` and disable the rest.
    /// A negative threshold disables every logger. Returns how many are enabled.
    pub fn set_enabled_by_identity(&self, threshold: i64) -> usize {
        self.inner.state.lock().set_enabled_by_identity(threshold)
    }

    /// Wait until everything submitted so far has been written.
    pub fn flush(&self) -> Result<()> {
        self.inner.dispatcher.flush()
    }

    /// Stop the dispatcher and wait for its thread. Call once, after the
    /// last log call; sinks may be closed afterwards.
    pub fn shutdown(&self) -> Result<()> {
        self.inner.dispatcher.shutdown()?;
        crate::log_info!(self.inner.ctx, "REGISTRY_SHUTDOWN");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.inner.dispatcher.is_running()
    }
}

lazy_static! {
    static ref GLOBAL_REGISTRY: Registry = Registry::start(Settings::from_env())
        .expect("failed to start the default log dispatcher");
}

/// The process-wide registry, started on first use.
///
/// Settings come from the JSON file named by `CATLOG_CONFIG`, if any.
pub fn global() -> &'static Registry {
    &GLOBAL_REGISTRY
}
