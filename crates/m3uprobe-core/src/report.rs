//! Serialized console progress.
//!
//! A single writer thread owns stdout and consumes pre-formatted lines from
//! a channel, so concurrent workers can report completions without ever
//! interleaving mid-line.

use std::io::{self, Write};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

/// Cloneable handle workers use to emit progress lines.
#[derive(Clone)]
pub struct ProgressSink {
    tx: mpsc::Sender<String>,
}

/// Join guard for the writer thread. [`ProgressWriter::finish`] blocks until
/// every [`ProgressSink`] clone has been dropped and the queue is drained.
pub struct ProgressWriter {
    handle: JoinHandle<()>,
}

impl ProgressSink {
    /// Spawns the stdout writer and returns the sink plus its join guard.
    pub fn stdout() -> (Self, ProgressWriter) {
        let (tx, rx) = mpsc::channel::<String>();
        let handle = thread::spawn(move || {
            for line in rx {
                let mut out = io::stdout().lock();
                let _ = writeln!(out, "{line}");
                let _ = out.flush();
            }
        });
        (Self { tx }, ProgressWriter { handle })
    }

    /// Emits the per-URL progress line: 1-based index, total count, the URL
    /// and a binary outcome marker.
    pub fn result(&self, index: usize, total: usize, url: &str, live: bool) {
        let marker = if live { "OK ✓" } else { "×" };
        let _ = self
            .tx
            .send(format!("[{index:4}/{total:4}] {url}  →  {marker}"));
    }
}

impl ProgressWriter {
    /// Waits for the writer to drain and exit. Drop all sink clones first.
    pub fn finish(self) {
        let _ = self.handle.join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_drains_and_writer_joins() {
        let (sink, writer) = ProgressSink::stdout();
        let clone = sink.clone();
        sink.result(1, 2, "http://host/a.m3u8", true);
        clone.result(2, 2, "http://host/b.m3u8", false);
        drop(sink);
        drop(clone);
        writer.finish();
    }
}
