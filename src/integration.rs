//! Integration module for connecting object detection backends with the tracker.
//!
//! This module provides the traits and glue around the tracker engine: the
//! detection input types, the per-frame pipeline that drives updates and id
//! re-association, and the fire-and-forget logging sink.

mod builder;
mod detector;
mod pipeline;
mod sink;

pub use builder::DetectionBuilder;
pub use detector::{Detection, DetectionSource};
pub use pipeline::{TrackedDetection, TrackerPipeline, associate_tracks};
pub use sink::{ChannelSink, NullSink, TrackRecord, TrackSink};
