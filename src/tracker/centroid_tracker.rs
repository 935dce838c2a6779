//! Main centroid tracker algorithm implementation.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::tracker::matching::{self, AssignmentResult};
use crate::tracker::rect::{Point, Rect};
use crate::tracker::track::Track;

/// Configuration for the CentroidTracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Consecutive unmatched frames a track survives before removal
    pub max_disappeared: u32,
    /// Maximum centroid distance, in input coordinate units, for a match
    pub max_distance: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_disappeared: 50,
            max_distance: 50.0,
        }
    }
}

/// Error type for tracker construction failures.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("max_disappeared must be positive, got {0}")]
    InvalidMaxDisappeared(u32),
    #[error("max_distance must be positive and finite, got {0}")]
    InvalidMaxDistance(f32),
}

/// Per-frame multi-object tracker over bounding-box centroids.
///
/// Feed it one batch of boxes per frame via [`update`](Self::update) and it
/// maintains a stable id -> centroid mapping: detections near a live track
/// continue that identity, detections near nothing spawn new identities, and
/// tracks that stay unmatched past `max_disappeared` frames are dropped.
/// Removed ids are never reissued; an object that reappears gets a fresh id.
///
/// Calls must be strictly sequential; aging and id assignment depend on
/// frame order. The live set is stored as a slot arena plus an explicit
/// registration-order id list, so match and tie-break order stay
/// deterministic regardless of map iteration order.
pub struct CentroidTracker {
    config: TrackerConfig,
    /// Slot arena; freed slots are recycled without shifting the rest.
    slots: Vec<Track>,
    free: Vec<usize>,
    /// Live id -> slot index.
    index: HashMap<u64, usize>,
    /// Live ids in registration order; the tracker's only iteration order.
    order: Vec<u64>,
    next_id: u64,
}

impl CentroidTracker {
    /// Create a tracker, validating the configuration.
    pub fn new(config: TrackerConfig) -> Result<Self, TrackerError> {
        if config.max_disappeared == 0 {
            return Err(TrackerError::InvalidMaxDisappeared(config.max_disappeared));
        }
        if !(config.max_distance > 0.0) || !config.max_distance.is_finite() {
            return Err(TrackerError::InvalidMaxDistance(config.max_distance));
        }
        Ok(Self {
            config,
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
        })
    }

    /// Ingest one frame of detections and return the live tracks after it.
    ///
    /// The returned tracks are copies in registration order; the tracker
    /// keeps sole ownership of its state. Degenerate boxes are tolerated and
    /// contribute whatever centroid their coordinates produce.
    pub fn update(&mut self, boxes: &[Rect]) -> Vec<Track> {
        let centroids: Vec<Point> = boxes.iter().map(Rect::centroid).collect();

        // First detections ever seen: everything registers.
        if self.order.is_empty() {
            for &c in &centroids {
                self.register(c);
            }
            return self.tracks();
        }

        // Empty frame: everything ages.
        if centroids.is_empty() {
            let mut expired = Vec::new();
            for &id in &self.order {
                let track = &mut self.slots[self.index[&id]];
                track.missed();
                if track.missed_count > self.config.max_disappeared {
                    expired.push(id);
                }
            }
            for id in expired {
                self.deregister(id);
            }
            return self.tracks();
        }

        let track_points: Vec<Point> = self
            .order
            .iter()
            .map(|id| self.slots[self.index[id]].centroid)
            .collect();
        let dists = matching::centroid_distance(&track_points, &centroids);

        let AssignmentResult {
            matches,
            unmatched_tracks,
            unmatched_detections,
        } = matching::greedy_assignment(&dists, self.config.max_distance);

        for (row, col) in matches {
            let id = self.order[row];
            self.slots[self.index[&id]].matched(centroids[col]);
        }

        let mut expired = Vec::new();
        for row in unmatched_tracks {
            let id = self.order[row];
            let track = &mut self.slots[self.index[&id]];
            track.missed();
            if track.missed_count > self.config.max_disappeared {
                expired.push(id);
            }
        }
        for id in expired {
            self.deregister(id);
        }

        for col in unmatched_detections {
            self.register(centroids[col]);
        }

        self.tracks()
    }

    /// Current live tracks, copied out in registration order.
    pub fn tracks(&self) -> Vec<Track> {
        self.order
            .iter()
            .map(|id| self.slots[self.index[id]])
            .collect()
    }

    /// Look up a live track by id.
    pub fn get(&self, id: u64) -> Option<Track> {
        self.index.get(&id).map(|&slot| self.slots[slot])
    }

    /// Number of live tracks.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Drop all state and restart id assignment.
    ///
    /// Equivalent to constructing a fresh tracker with the same (already
    /// validated) configuration; use between independent runs so stale
    /// identities never leak across them.
    pub fn reset(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.index.clear();
        self.order.clear();
        self.next_id = 1;
    }

    fn register(&mut self, centroid: Point) {
        let id = self.next_id;
        self.next_id += 1;

        let track = Track::new(id, centroid);
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = track;
                slot
            }
            None => {
                self.slots.push(track);
                self.slots.len() - 1
            }
        };
        self.index.insert(id, slot);
        self.order.push(id);
        debug!(id, x = centroid.x, y = centroid.y, "registered track");
    }

    fn deregister(&mut self, id: u64) {
        if let Some(slot) = self.index.remove(&id) {
            self.free.push(slot);
            self.order.retain(|&live| live != id);
            debug!(id, "deregistered track");
        }
    }
}
