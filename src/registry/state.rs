//! Registry bookkeeping guarded by the registry lock.

use std::collections::BTreeMap;

use crate::dispatch::text_width;
use crate::logger::Logger;

/// Mutable registry state. Mutations happen only under the registry lock.
#[derive(Debug, Default)]
pub(crate) struct RegistryState {
    pub(crate) loggers: BTreeMap<u64, Logger>,
    pub(crate) next_identity: u64,
    pub(crate) padding: bool,
    pub(crate) grouping: bool,
    pub(crate) max_width: usize,
}

impl RegistryState {
    pub(crate) fn new(padding: bool, grouping: bool) -> Self {
        Self {
            padding,
            grouping,
            ..Self::default()
        }
    }

    /// Reserve the next identity. Identities are dense and start at 0.
    pub(crate) fn take_identity(&mut self) -> u64 {
        let identity = self.next_identity;
        self.next_identity += 1;
        identity
    }

    /// Recompute the padding width over every registered logger.
    ///
    /// Returns 0 when padding is disabled.
    pub(crate) fn recompute_width(&mut self) -> usize {
        self.max_width = if self.padding {
            max_category_width(self.loggers.values().map(|l| l.composed_category()))
        } else {
            0
        };
        self.max_width
    }

    pub(crate) fn set_enabled_by_category(&self, enabled: bool, names: &[String]) -> usize {
        let mut changed = 0;
        for logger in self.loggers.values() {
            let name = logger.category_name();
            if names.iter().any(|n| *n == name) {
                logger.set_enabled(enabled);
                changed += 1;
            }
        }
        changed
    }

    pub(crate) fn set_enabled_by_identity(&self, threshold: i64) -> usize {
        let mut enabled = 0;
        for (identity, logger) in &self.loggers {
            let on = i64::try_from(*identity).map_or(false, |id| id <= threshold);
            logger.set_enabled(on);
            if on {
                enabled += 1;
            }
        }
        enabled
    }
}

/// Widest composed category, in characters; 0 for no categories.
pub fn max_category_width<I>(categories: I) -> usize
where
    I: IntoIterator<Item = String>,
{
    categories
        .into_iter()
        .map(|c| text_width(&c))
        .max()
        .unwrap_or(0)
}
