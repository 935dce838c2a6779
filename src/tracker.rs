mod centroid_tracker;
mod matching;
mod rect;
mod track;

pub use centroid_tracker::{CentroidTracker, TrackerConfig, TrackerError};
pub use matching::{AssignmentResult, centroid_distance, greedy_assignment};
pub use rect::{Point, Rect};
pub use track::Track;
