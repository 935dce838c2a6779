//! TrackerPipeline for combining detection, tracking, and logging.

use tracing::warn;

use crate::tracker::{CentroidTracker, Rect, Track, TrackerConfig, TrackerError};

use super::detector::{Detection, DetectionSource};
use super::sink::{NullSink, TrackRecord, TrackSink};

/// A detection enriched with the track id it was associated to.
#[derive(Debug, Clone)]
pub struct TrackedDetection {
    /// Id of the nearest live track after this frame's update
    pub track_id: u64,
    /// Class label carried over from the detection
    pub label: String,
    /// Confidence carried over from the detection
    pub confidence: f32,
    /// Bounding box carried over from the detection
    pub bbox: Rect,
}

/// Re-associate labeled detections with the tracks returned by an update.
///
/// The tracker's contract only returns positions, so labels and scores are
/// joined back on afterwards: each detection takes the id of the live track
/// whose centroid is nearest to its own, ties going to the first minimum in
/// the tracker's iteration order. There is no distance gate here: with at
/// least one live track every detection gets an id.
pub fn associate_tracks(detections: &[Detection], tracks: &[Track]) -> Vec<TrackedDetection> {
    detections
        .iter()
        .filter_map(|det| {
            let centroid = det.bbox.centroid();
            let mut best: Option<(u64, f32)> = None;
            for track in tracks {
                let dist = track.centroid.distance(centroid);
                if best.is_none_or(|(_, d)| dist < d) {
                    best = Some((track.id, dist));
                }
            }
            best.map(|(track_id, _)| TrackedDetection {
                track_id,
                label: det.label.clone(),
                confidence: det.confidence,
                bbox: det.bbox,
            })
        })
        .collect()
}

/// Per-frame driver that bundles a detection backend with the tracker.
///
/// `process_frame` runs detection, updates the tracker with the resulting
/// boxes, joins track ids back onto the labeled detections, and hands the
/// enriched batch to the sink. Calls must stay strictly sequential; the
/// tracker's aging and id assignment depend on frame order.
///
/// A detector error aborts only the current frame; the tracker state is
/// untouched, so callers should retry on the next tick rather than tear the
/// pipeline down. Sink errors are logged and swallowed.
pub struct TrackerPipeline<D: DetectionSource, S: TrackSink = NullSink> {
    detector: D,
    tracker: CentroidTracker,
    sink: Option<S>,
    frame_index: u64,
}

impl<D: DetectionSource> TrackerPipeline<D> {
    /// Create a new tracking pipeline with the given detector and tracker config.
    pub fn new(detector: D, config: TrackerConfig) -> Result<Self, TrackerError> {
        Ok(Self {
            detector,
            tracker: CentroidTracker::new(config)?,
            sink: None,
            frame_index: 0,
        })
    }

    /// Create a new tracking pipeline with default tracker configuration.
    pub fn with_default_config(detector: D) -> Result<Self, TrackerError> {
        Self::new(detector, TrackerConfig::default())
    }
}

impl<D: DetectionSource, S: TrackSink> TrackerPipeline<D, S> {
    /// Attach a sink that receives each frame's enriched detections.
    pub fn with_sink<S2: TrackSink>(self, sink: S2) -> TrackerPipeline<D, S2> {
        TrackerPipeline {
            detector: self.detector,
            tracker: self.tracker,
            sink: Some(sink),
            frame_index: self.frame_index,
        }
    }

    /// Process a single frame and return detections enriched with track ids.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<TrackedDetection>, D::Error> {
        let detections = self.detector.detect(input, width, height)?;
        let boxes: Vec<Rect> = detections.iter().map(|d| d.bbox).collect();
        let tracks = self.tracker.update(&boxes);
        let enriched = associate_tracks(&detections, &tracks);

        if let Some(sink) = &mut self.sink {
            if !enriched.is_empty() {
                let records = enriched
                    .iter()
                    .map(|d| TrackRecord::from_detection(d, self.frame_index))
                    .collect();
                if let Err(err) = sink.log_batch(records) {
                    warn!(%err, frame = self.frame_index, "failed to log track batch");
                }
            }
        }

        self.frame_index += 1;
        Ok(enriched)
    }

    /// Discard all tracking state for a new run.
    ///
    /// Identities never leak across independent runs: the next frame starts
    /// from an empty live set and fresh ids, with the frame counter rewound.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.frame_index = 0;
    }

    /// Index of the next frame to be processed.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &CentroidTracker {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut CentroidTracker {
        &mut self.tracker
    }
}
