//! Centroid-distance multi-object tracking for live detection streams.
//!
//! The crate is split into two layers:
//! - [`tracker`]: the identity-assignment engine. It consumes one batch of
//!   bounding boxes per frame and maintains a stable id -> centroid mapping,
//!   deciding which detections continue existing tracks, which spawn new
//!   ones, and which tracks have vanished.
//! - [`integration`]: glue for driving the engine from a detection backend:
//!   the per-frame pipeline, id re-association onto labeled detections, and
//!   an optional fire-and-forget logging sink.

pub mod integration;
pub mod tracker;

pub use integration::{
    ChannelSink, Detection, DetectionBuilder, DetectionSource, NullSink, TrackRecord, TrackSink,
    TrackedDetection, TrackerPipeline, associate_tracks,
};
pub use tracker::{CentroidTracker, Point, Rect, Track, TrackerConfig, TrackerError};
