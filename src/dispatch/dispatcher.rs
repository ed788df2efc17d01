//! Handle to the dispatcher worker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Sender};
use parking_lot::{Mutex, RwLock};

use crate::diagnostics::DiagContext;
use crate::error::{Error, Result};

use super::layout::Layout;
use super::request::{Dispatch, LayoutUpdate, WriteRequest};
use super::worker::Worker;

struct BufferPath {
    tx: Sender<Dispatch>,
    capacity: usize,
}

/// Owns the submission paths into a single worker thread.
pub struct Dispatcher {
    sync_tx: Sender<Dispatch>,
    buffer: RwLock<BufferPath>,
    buffered: AtomicBool,
    stop_tx: Sender<()>,
    worker: Mutex<Option<JoinHandle<()>>>,
    ctx: DiagContext,
}

impl Dispatcher {
    /// Spawn the worker thread.
    ///
    /// # Errors
    /// `ZeroCapacity` for an empty buffer, `Io` if the thread cannot be spawned.
    pub fn start(
        thread_name: &str,
        layout: Layout,
        buffered: bool,
        buffer_capacity: usize,
    ) -> Result<Self> {
        if buffer_capacity == 0 {
            return Err(Error::ZeroCapacity);
        }

        let (sync_tx, sync_rx) = bounded(0);
        let (buffer_tx, buffer_rx) = bounded(buffer_capacity);
        let (stop_tx, stop_rx) = bounded(0);

        let worker = Worker::new(sync_rx, buffer_rx, stop_rx, layout);
        let handle = thread::Builder::new()
            .name(thread_name.to_string())
            .spawn(move || worker.run())?;

        let ctx = DiagContext::new("dispatcher");
        crate::log_debug!(
            ctx,
            "DISPATCHER_SPAWNED",
            thread = thread_name,
            buffered = buffered,
            capacity = buffer_capacity
        );

        Ok(Self {
            sync_tx,
            buffer: RwLock::new(BufferPath {
                tx: buffer_tx,
                capacity: buffer_capacity,
            }),
            buffered: AtomicBool::new(buffered),
            stop_tx,
            worker: Mutex::new(Some(handle)),
            ctx,
        })
    }

    /// Hand a write to the worker on the currently selected path.
    ///
    /// Blocks until the worker takes the entry (unbuffered) or until there
    /// is room in the buffer (buffered).
    pub fn submit(&self, request: WriteRequest) -> Result<()> {
        if self.buffered.load(Ordering::Acquire) {
            let buffer = self.buffer.read();
            return buffer
                .tx
                .send(Dispatch::Write(request))
                .map_err(|_| Error::DispatcherStopped);
        }
        self.send_sync(Dispatch::Write(request))
    }

    /// Change worker-owned layout state. Takes effect before any write
    /// submitted afterwards by the same thread.
    pub fn update_layout(&self, update: LayoutUpdate) -> Result<()> {
        self.send_sync(Dispatch::Layout(update))
    }

    pub fn is_buffered(&self) -> bool {
        self.buffered.load(Ordering::Acquire)
    }

    pub fn buffer_capacity(&self) -> usize {
        self.buffer.read().capacity
    }

    /// Switch between the rendezvous and bounded paths, resizing the bounded
    /// path when `capacity` differs from the current one.
    pub fn set_buffering(&self, enabled: bool, capacity: usize) -> Result<()> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }

        {
            // No buffered submission can be in flight while the write lock is held.
            let mut buffer = self.buffer.write();
            if buffer.capacity != capacity {
                let (tx, rx) = bounded(capacity);
                self.send_sync(Dispatch::SwapBuffer(rx))?;
                crate::log_debug!(
                    self.ctx,
                    "BUFFER_RESIZED",
                    from = buffer.capacity,
                    to = capacity
                );
                *buffer = BufferPath { tx, capacity };
            }
        }

        self.buffered.store(enabled, Ordering::Release);
        Ok(())
    }

    /// Wait until every entry submitted before this call has been written.
    pub fn flush(&self) -> Result<()> {
        let (ack_tx, ack_rx) = bounded(1);
        self.send_sync(Dispatch::Flush(ack_tx))?;
        ack_rx.recv().map_err(|_| Error::DispatcherStopped)
    }

    /// Stop the worker and wait for it to exit.
    ///
    /// Entries already accepted into the buffer are written first. Later
    /// submissions fail with `DispatcherStopped`.
    pub fn shutdown(&self) -> Result<()> {
        let handle = self.worker.lock().take().ok_or(Error::AlreadyStopped)?;

        // The worker may already be gone if it panicked.
        let _ = self.stop_tx.send(());

        handle.join().map_err(|_| {
            crate::log_error!(self.ctx, "DISPATCHER_PANICKED");
            Error::WorkerPanicked
        })?;

        crate::log_debug!(self.ctx, "DISPATCHER_JOINED");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.worker
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn send_sync(&self, dispatch: Dispatch) -> Result<()> {
        self.sync_tx
            .send(dispatch)
            .map_err(|_| Error::DispatcherStopped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::Category;
    use crate::logger::MemoryWriter;

    fn write(memory: &MemoryWriter, name: &str, text: &str) -> WriteRequest {
        WriteRequest {
            sink: memory.sink(),
            category: Category::bracketed(name),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let result = Dispatcher::start("t", Layout::default(), false, 0);
        assert!(matches!(result, Err(Error::ZeroCapacity)));
    }

    #[test]
    fn test_sync_submission_order() {
        let dispatcher = Dispatcher::start("t", Layout::new(false, 0, false), false, 4).unwrap();
        let memory = MemoryWriter::new();

        for i in 0..10 {
            dispatcher.submit(write(&memory, "S", &i.to_string())).unwrap();
        }
        dispatcher.flush().unwrap();

        let expected: Vec<String> = (0..10).map(|i| format!("[S] {}", i)).collect();
        assert_eq!(memory.lines(), expected);
        dispatcher.shutdown().unwrap();
    }

    #[test]
    fn test_resize_keeps_order() {
        let dispatcher = Dispatcher::start("t", Layout::new(false, 0, false), true, 2).unwrap();
        let memory = MemoryWriter::new();

        dispatcher.submit(write(&memory, "R", "a")).unwrap();
        dispatcher.submit(write(&memory, "R", "b")).unwrap();
        dispatcher.set_buffering(true, 16).unwrap();
        assert_eq!(dispatcher.buffer_capacity(), 16);
        dispatcher.submit(write(&memory, "R", "c")).unwrap();
        dispatcher.flush().unwrap();

        assert_eq!(memory.lines(), vec!["[R] a", "[R] b", "[R] c"]);
        dispatcher.shutdown().unwrap();
    }

    #[test]
    fn test_submit_after_shutdown_fails() {
        let dispatcher = Dispatcher::start("t", Layout::default(), false, 1).unwrap();
        assert!(dispatcher.is_running());
        dispatcher.shutdown().unwrap();

        assert!(!dispatcher.is_running());
        let memory = MemoryWriter::new();
        assert!(matches!(
            dispatcher.submit(write(&memory, "X", "late")),
            Err(Error::DispatcherStopped)
        ));
        assert!(matches!(dispatcher.shutdown(), Err(Error::AlreadyStopped)));
        assert!(memory.contents().is_empty());
    }

    #[test]
    fn test_buffered_submit_after_shutdown_fails() {
        let dispatcher = Dispatcher::start("t", Layout::default(), true, 4).unwrap();
        dispatcher.shutdown().unwrap();

        let memory = MemoryWriter::new();
        assert!(matches!(
            dispatcher.submit(write(&memory, "X", "late")),
            Err(Error::DispatcherStopped)
        ));
    }

    #[test]
    fn test_panicking_formatter_is_reported() {
        let dispatcher = Dispatcher::start("t", Layout::default(), false, 1).unwrap();
        let memory = MemoryWriter::new();
        let category = Category::new("P")
            .with_formatter(crate::compose::formatter(|_| panic!("formatter failed")));

        let _ = dispatcher.submit(WriteRequest {
            sink: memory.sink(),
            category,
            text: "x".to_string(),
        });

        assert!(matches!(dispatcher.shutdown(), Err(Error::WorkerPanicked)));
    }
}
