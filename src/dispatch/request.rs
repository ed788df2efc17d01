//! Messages accepted by the dispatcher worker.

use crossbeam_channel::{Receiver, Sender};

use crate::compose::Category;
use crate::logger::Sink;

/// A composed entry waiting to be written.
///
/// The sink and category are snapshots taken when the log call was made.
#[derive(Debug, Clone)]
pub struct WriteRequest {
    pub sink: Sink,
    pub category: Category,
    /// Timestamp and message text, with any extra terminator already appended.
    pub text: String,
}

/// Changes to the worker-owned layout state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutUpdate {
    Padding { enabled: bool, max_width: usize },
    Grouping(bool),
}

pub(crate) enum Dispatch {
    Write(WriteRequest),
    Layout(LayoutUpdate),
    /// Replace the bounded path; the old one is drained first.
    SwapBuffer(Receiver<Dispatch>),
    /// Acknowledge once everything submitted before this message is written.
    Flush(Sender<()>),
}
