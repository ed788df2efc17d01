//! Serialization guarantees of the dispatcher seen through the public API.

use std::collections::HashMap;
use std::io::{self, Write};
use std::thread;

use catlog_core::{Error, LoggerBuilder, MemoryWriter, Registry, Settings, Sink, Timestamp};
use crossbeam_channel::{bounded, Receiver};

const THREADS: usize = 8;
const PER_THREAD: usize = 200;

fn registry(buffered: bool, capacity: usize) -> Registry {
    Registry::start(Settings {
        category_padding: false,
        category_grouping: false,
        buffered,
        buffer_capacity: capacity,
        ..Settings::default()
    })
    .unwrap()
}

fn quiet(memory: &MemoryWriter, name: &str) -> LoggerBuilder {
    LoggerBuilder::new(name)
        .timestamp(Timestamp::disabled())
        .sink(memory.sink())
}

/// Every line is whole, and each producer's lines appear in submission order.
fn assert_fifo_per_producer(lines: &[String]) {
    let mut next: HashMap<String, usize> = HashMap::new();
    for line in lines {
        let mut fields = line.split_whitespace();
        let category = fields.next().unwrap().to_string();
        let seq: usize = fields.next().unwrap().parse().unwrap();
        assert_eq!(fields.next(), None, "interleaved line {:?}", line);

        let expected = next.entry(category).or_insert(0);
        assert_eq!(seq, *expected, "out of order line {:?}", line);
        *expected += 1;
    }
}

fn hammer(registry: &Registry, memory: &MemoryWriter) {
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = registry.register(quiet(memory, &format!("T{}", t)));
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.log(i);
                }
                logger
            })
        })
        .collect();

    for handle in handles {
        let logger = handle.join().unwrap();
        assert_eq!(logger.count(), PER_THREAD as u64);
    }
}

#[test]
fn test_concurrent_sync_writes_are_serialized() {
    let registry = registry(false, 16);
    let memory = MemoryWriter::new();

    hammer(&registry, &memory);
    registry.flush().unwrap();

    let lines = memory.lines();
    assert_eq!(lines.len(), THREADS * PER_THREAD);
    assert_fifo_per_producer(&lines);
    registry.shutdown().unwrap();
}

#[test]
fn test_concurrent_buffered_writes_are_serialized() {
    let registry = registry(true, 4);
    let memory = MemoryWriter::new();

    hammer(&registry, &memory);
    registry.shutdown().unwrap();

    let lines = memory.lines();
    assert_eq!(lines.len(), THREADS * PER_THREAD);
    assert_fifo_per_producer(&lines);
}

#[test]
fn test_buffer_of_one_keeps_order() {
    let registry = registry(true, 1);
    let memory = MemoryWriter::new();
    let logger = registry.register(quiet(&memory, "B"));

    logger.log("first");
    logger.log("second");
    registry.flush().unwrap();

    assert_eq!(memory.lines(), vec!["[B]  first", "[B]  second"]);
    registry.shutdown().unwrap();
}

#[test]
fn test_switching_paths_keeps_order() {
    let registry = registry(false, 8);
    let memory = MemoryWriter::new();
    let logger = registry.register(quiet(&memory, "P"));

    logger.log(0);
    registry.set_buffered(true).unwrap();
    assert!(registry.is_buffered());
    logger.log(1);
    logger.log(2);
    registry.set_buffering(true, 2).unwrap();
    assert_eq!(registry.buffer_capacity(), 2);
    logger.log(3);
    registry.set_buffered(false).unwrap();
    logger.log(4);
    registry.flush().unwrap();

    let expected: Vec<String> = (0..5).map(|i| format!("[P]  {}", i)).collect();
    assert_eq!(memory.lines(), expected);
    assert!(!registry.is_buffered());
    registry.shutdown().unwrap();
}

/// Holds the first write until the gate opens, so later entries stay queued.
struct GatedWriter {
    gate: Receiver<()>,
    opened: bool,
    inner: MemoryWriter,
}

impl Write for GatedWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if !self.opened {
            let _ = self.gate.recv();
            self.opened = true;
        }
        self.inner.write(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_queued_entries_keep_their_output() {
    let registry = registry(true, 64);
    let first = MemoryWriter::new();
    let second = MemoryWriter::new();
    let (open_tx, open_rx) = bounded(1);
    let gated = Sink::new(GatedWriter {
        gate: open_rx,
        opened: false,
        inner: first.clone(),
    });

    let logger = registry.register(
        LoggerBuilder::new("Q")
            .timestamp(Timestamp::disabled())
            .sink(gated),
    );
    for i in 0..20 {
        logger.log(i);
    }
    logger.set_output(second.sink());
    logger.log("after");

    open_tx.send(()).unwrap();
    registry.flush().unwrap();

    let expected: Vec<String> = (0..20).map(|i| format!("[Q]  {}", i)).collect();
    assert_eq!(first.lines(), expected);
    assert_eq!(second.lines(), vec!["[Q]  after"]);
    assert_eq!(logger.count(), 21);
    registry.shutdown().unwrap();
}

#[test]
fn test_zero_capacity_is_rejected() {
    let registry = registry(false, 8);
    assert!(matches!(
        registry.set_buffering(true, 0),
        Err(Error::ZeroCapacity)
    ));
    assert!(!registry.is_buffered());
    assert_eq!(registry.buffer_capacity(), 8);
    registry.shutdown().unwrap();

    let settings = Settings {
        buffer_capacity: 0,
        ..Settings::default()
    };
    assert!(Registry::start(settings).is_err());
}

#[test]
fn test_shutdown_drains_buffer() {
    let registry = registry(true, 64);
    let memory = MemoryWriter::new();
    let logger = registry.register(quiet(&memory, "D"));

    for i in 0..50 {
        logger.log(i);
    }
    registry.shutdown().unwrap();

    assert_eq!(memory.lines().len(), 50);
    assert!(!registry.is_running());
}

#[test]
fn test_logging_after_shutdown_does_not_block() {
    for buffered in [false, true] {
        let registry = registry(buffered, 2);
        let memory = MemoryWriter::new();
        let logger = registry.register(quiet(&memory, "LATE"));
        registry.shutdown().unwrap();

        for _ in 0..10 {
            logger.log("dropped");
        }
        assert!(memory.contents().is_empty());
        assert!(matches!(registry.shutdown(), Err(Error::AlreadyStopped)));
        assert!(matches!(registry.flush(), Err(Error::DispatcherStopped)));
    }
}

#[test]
fn test_discard_sink_consumes_entries() {
    let registry = registry(false, 8);
    let logger = registry.new_logger(Sink::discard(), "NULL", true);

    for i in 0..100 {
        logger.log(i);
    }
    registry.flush().unwrap();

    assert_eq!(logger.count(), 100);
    registry.shutdown().unwrap();
}
