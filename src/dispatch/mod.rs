//! Serializing dispatcher.
//!
//! One worker thread performs every write for every logger of a registry.
//! Loggers hand it requests through one of two paths:
//! - a rendezvous path, where the caller blocks until the worker takes the entry
//! - a bounded path, where the caller blocks only while the buffer is full
//!
//! The worker also owns the cross-logger layout state (padding width and
//! the last category written), which only changes through messages on the
//! rendezvous path.

pub mod dispatcher;
pub mod layout;
pub mod request;
mod worker;

pub use dispatcher::*;
pub use layout::*;
pub use request::*;
