//! The dispatcher thread.

use crossbeam_channel::{never, select, Receiver};

use crate::diagnostics::DiagContext;

use super::layout::Layout;
use super::request::{Dispatch, WriteRequest};

enum Event {
    Sync(Dispatch),
    Buffered(Dispatch),
    SyncClosed,
    BufferClosed,
    Stop,
}

pub(crate) struct Worker {
    sync_rx: Receiver<Dispatch>,
    buffer_rx: Receiver<Dispatch>,
    stop_rx: Receiver<()>,
    layout: Layout,
    ctx: DiagContext,
}

impl Worker {
    pub(crate) fn new(
        sync_rx: Receiver<Dispatch>,
        buffer_rx: Receiver<Dispatch>,
        stop_rx: Receiver<()>,
        layout: Layout,
    ) -> Self {
        Self {
            sync_rx,
            buffer_rx,
            stop_rx,
            layout,
            ctx: DiagContext::new("dispatcher"),
        }
    }

    /// Process entries one at a time until stopped or every sender is gone.
    pub(crate) fn run(mut self) {
        crate::log_debug!(self.ctx, "DISPATCHER_STARTED");

        let mut written: u64 = 0;
        loop {
            let event = select! {
                recv(self.sync_rx) -> msg => match msg {
                    Ok(dispatch) => Event::Sync(dispatch),
                    Err(_) => Event::SyncClosed,
                },
                recv(self.buffer_rx) -> msg => match msg {
                    Ok(dispatch) => Event::Buffered(dispatch),
                    Err(_) => Event::BufferClosed,
                },
                recv(self.stop_rx) -> _ => Event::Stop,
            };

            match event {
                // Anything already buffered was submitted before this entry.
                Event::Sync(dispatch) => {
                    written += self.drain_pending();
                    written += self.handle(dispatch);
                }
                Event::Buffered(dispatch) => written += self.handle(dispatch),
                Event::BufferClosed => self.buffer_rx = never(),
                Event::SyncClosed => {
                    written += self.drain_buffer();
                    crate::log_debug!(self.ctx, "DISPATCHER_DETACHED", written = written);
                    return;
                }
                Event::Stop => {
                    written += self.drain_buffer();
                    crate::log_debug!(self.ctx, "DISPATCHER_STOPPED", written = written);
                    return;
                }
            }
        }
    }

    /// Returns the number of lines written.
    fn handle(&mut self, dispatch: Dispatch) -> u64 {
        match dispatch {
            Dispatch::Write(request) => {
                self.write(request);
                1
            }
            Dispatch::Layout(update) => {
                crate::log_debug!(self.ctx, "LAYOUT_UPDATE", update = update);
                self.layout.apply(update);
                0
            }
            Dispatch::SwapBuffer(buffer_rx) => {
                let drained = self.drain_buffer();
                self.buffer_rx = buffer_rx;
                crate::log_debug!(self.ctx, "BUFFER_SWAPPED", drained = drained);
                drained
            }
            Dispatch::Flush(ack) => {
                let drained = self.drain_pending();
                let _ = ack.send(());
                drained
            }
        }
    }

    fn write(&mut self, request: WriteRequest) {
        let line = self.layout.render(&request.category, &request.text);
        if let Err(e) = request.sink.write_line(&line) {
            crate::log_warn!(
                self.ctx,
                "SINK_WRITE_FAILED",
                category = request.category.name,
                error = e
            );
        }
    }

    /// Write everything currently sitting in the bounded path.
    fn drain_buffer(&mut self) -> u64 {
        let pending: Vec<Dispatch> = self.buffer_rx.try_iter().collect();
        pending.into_iter().map(|dispatch| self.handle(dispatch)).sum()
    }

    /// Write only the entries queued when the flush arrived, so that
    /// producers that keep submitting cannot hold the flush open.
    fn drain_pending(&mut self) -> u64 {
        let queued = self.buffer_rx.len();
        let pending: Vec<Dispatch> = self.buffer_rx.try_iter().take(queued).collect();
        pending.into_iter().map(|dispatch| self.handle(dispatch)).sum()
    }
}
