//! Trait for object detection inference backends.

use crate::tracker::BoundingBox;

/// A single detector output.
///
/// `confidence` and `class_id` travel with the box for the caller's benefit;
/// the tracker itself only looks at `bbox`.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub bbox: BoundingBox,
    pub confidence: f32,
    pub class_id: Option<usize>,
}

impl Detection {
    pub fn new(bbox: BoundingBox, confidence: f32) -> Self {
        Self {
            bbox,
            confidence,
            class_id: None,
        }
    }
}

/// Trait for object detection inference backends.
///
/// Implement this trait to connect any detection model to the tracker.
/// Filtering by confidence or class is the implementor's job.
///
/// # Example
///
/// ```ignore
/// use iou_tracker::{Detection, DetectionSource};
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
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error>;
}

/// Helper trait for converting model-specific outputs to `Detection`.
pub trait IntoDetections {
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}

impl IntoDetections for Vec<BoundingBox> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter().map(|bbox| Detection::new(bbox, 1.0)).collect()
    }
}
