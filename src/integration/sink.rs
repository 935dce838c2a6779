//! Fire-and-forget logging sink for enriched detections.
//!
//! Each processed frame yields a batch of [`TrackRecord`]s (detections with
//! their assigned track ids) that the pipeline hands to a [`TrackSink`].
//! Sink failures never block or fail the frame loop: they are logged at
//! `warn` and the batch is dropped.
//!
//! [`ChannelSink`] decouples the frame loop from a slow sink (a database, an
//! HTTP endpoint) with a bounded queue and a worker thread that drains it.

use std::convert::Infallible;
use std::fmt;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Sender, TrySendError};
use serde::Serialize;
use tracing::warn;

use super::pipeline::TrackedDetection;

/// One enriched detection, flattened for persistence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRecord {
    pub track_id: u64,
    pub class_name: String,
    pub confidence: f32,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub frame_index: u64,
}

impl TrackRecord {
    /// Flatten an enriched detection into a record for the given frame.
    pub fn from_detection(det: &TrackedDetection, frame_index: u64) -> Self {
        let [x1, y1, x2, y2] = det.bbox.to_tlbr();
        Self {
            track_id: det.track_id,
            class_name: det.label.clone(),
            confidence: det.confidence,
            x1,
            y1,
            x2,
            y2,
            frame_index,
        }
    }
}

/// Trait for consumers of per-frame track record batches.
///
/// Implementations may write to a database, POST to an HTTP endpoint, or
/// anything else; the pipeline treats every error as non-fatal.
pub trait TrackSink {
    /// Error type for sink failures.
    type Error: fmt::Display;

    /// Accept one frame's batch of records.
    fn log_batch(&mut self, records: Vec<TrackRecord>) -> Result<(), Self::Error>;
}

/// Sink that discards every batch. The pipeline's default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TrackSink for NullSink {
    type Error = Infallible;

    fn log_batch(&mut self, _records: Vec<TrackRecord>) -> Result<(), Self::Error> {
        Ok(())
    }
}

const DEFAULT_QUEUE_DEPTH: usize = 32;

/// Queue-backed sink that forwards batches to a worker thread.
///
/// `log_batch` never blocks: batches go through a bounded channel and a
/// dedicated thread drains them into the wrapped sink, so frame latency
/// stays independent of sink latency. When the queue is full the batch is
/// dropped with a warning. Dropping the `ChannelSink` closes the queue and
/// joins the worker after it has drained what remains.
pub struct ChannelSink {
    sender: Option<Sender<Vec<TrackRecord>>>,
    worker: Option<JoinHandle<()>>,
}

impl ChannelSink {
    /// Spawn a worker draining batches into `inner` with the default queue depth.
    pub fn spawn<S>(inner: S) -> Self
    where
        S: TrackSink + Send + 'static,
    {
        Self::with_queue_depth(inner, DEFAULT_QUEUE_DEPTH)
    }

    /// Spawn a worker with an explicit bounded queue depth.
    pub fn with_queue_depth<S>(mut inner: S, depth: usize) -> Self
    where
        S: TrackSink + Send + 'static,
    {
        let (sender, receiver) = crossbeam_channel::bounded::<Vec<TrackRecord>>(depth);
        let worker = thread::spawn(move || {
            for batch in receiver {
                if let Err(err) = inner.log_batch(batch) {
                    warn!(%err, "logging sink rejected batch");
                }
            }
        });
        Self {
            sender: Some(sender),
            worker: Some(worker),
        }
    }
}

impl TrackSink for ChannelSink {
    type Error = Infallible;

    fn log_batch(&mut self, records: Vec<TrackRecord>) -> Result<(), Self::Error> {
        if let Some(sender) = &self.sender {
            match sender.try_send(records) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    warn!("logging queue full, dropping batch");
                }
                Err(TrySendError::Disconnected(_)) => {
                    warn!("logging worker gone, dropping batch");
                }
            }
        }
        Ok(())
    }
}

impl Drop for ChannelSink {
    fn drop(&mut self) {
        // Closing the sender lets the worker's receive loop finish.
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
