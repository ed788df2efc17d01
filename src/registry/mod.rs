//! Logger registry.
//!
//! A `Registry` is an explicit logging context: it owns one dispatcher,
//! assigns logger identities, and applies the administrative controls
//! (padding, grouping, buffering, bulk enable/disable). Independent
//! registries do not share any state.

pub mod handle;
pub mod state;

pub use handle::*;
pub use state::*;
