//! Detection input type and the trait for detection backends.

use crate::tracker::Rect;

/// A single detection produced by an external detector for one frame.
///
/// The tracker only ever looks at the bounding box; label and confidence
/// ride along untouched and are re-attached to track ids after each update.
#[derive(Debug, Clone)]
pub struct Detection {
    /// Bounding box of the detected object
    pub bbox: Rect,
    /// Class label reported by the detector
    pub label: String,
    /// Detection confidence score
    pub confidence: f32,
}

impl Detection {
    /// Create a detection from TLBR corners, a label, and a confidence score.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, label: impl Into<String>, confidence: f32) -> Self {
        Self {
            bbox: Rect::from_tlbr(x1, y1, x2, y2),
            label: label.into(),
            confidence,
        }
    }

    pub fn from_rect(bbox: Rect, label: impl Into<String>, confidence: f32) -> Self {
        Self {
            bbox,
            label: label.into(),
            confidence,
        }
    }
}

/// Trait for object detection inference backends.
///
/// Implement this trait to connect any detection model to the tracker
/// pipeline.
///
/// # Example
///
/// ```ignore
/// use centroidtrack_rs::{DetectionSource, Detection};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<Detection>, Self::Error> {
///         // Run inference and return detections
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Run inference on raw image data and return detections.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    ///
    /// # Returns
    /// A vector of `Detection` objects, or an error.
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error>;
}
