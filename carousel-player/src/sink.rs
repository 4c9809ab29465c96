//! Track sinks for hosts without a DOM.

use std::io::{self, Write};

use carousel_core::{TrackSink, Transform};
use tokio::sync::watch;

/// Publishes the latest transform to any number of watchers.
#[derive(Debug)]
pub struct WatchSink {
    tx: watch::Sender<Transform>,
}

impl WatchSink {
    pub fn new() -> (Self, watch::Receiver<Transform>) {
        let (tx, rx) = watch::channel(Transform::translate_x(0.0));
        (Self { tx }, rx)
    }
}

impl TrackSink for WatchSink {
    fn apply(&mut self, transform: Transform) {
        self.tx.send_replace(transform);
    }
}

/// Writes one `translateX(...)` line per position write.
#[derive(Debug)]
pub struct PrintSink<W> {
    out: W,
}

impl PrintSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> PrintSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TrackSink for PrintSink<W> {
    fn apply(&mut self, transform: Transform) {
        if let Err(err) = writeln!(self.out, "{transform}") {
            log::warn!("Failed to write track transform: {}", err);
        }
    }
}
