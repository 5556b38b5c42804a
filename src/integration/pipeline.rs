//! TrackerPipeline for combining detection with tracking.

use thiserror::Error;

use crate::error::TrackerError;
use crate::tracker::{BoundingBox, IouTracker, TrackId, TrackerConfig};

use super::{Detection, DetectionSource, IntoDetections};

/// A detection paired with the identity the tracker gave it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedObject {
    pub track_id: TrackId,
    pub detection: Detection,
}

#[derive(Debug, Error)]
pub enum PipelineError<E> {
    #[error("detection failed: {0}")]
    Detection(E),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

/// A combined tracker that bundles detection inference with the IouTracker.
pub struct TrackerPipeline<D: DetectionSource> {
    detector: D,
    tracker: IouTracker,
}

impl<D: DetectionSource> TrackerPipeline<D> {
    /// Create a new tracking pipeline with the given detector and tracker config.
    pub fn new(detector: D, config: TrackerConfig) -> Result<Self, PipelineError<D::Error>> {
        Ok(Self {
            detector,
            tracker: IouTracker::new(config)?,
        })
    }

    /// Create a new tracking pipeline with default tracker configuration.
    pub fn with_default_config(detector: D) -> Result<Self, PipelineError<D::Error>> {
        Self::new(detector, TrackerConfig::default())
    }

    /// Process a single frame and return the detections that received an ID,
    /// in detector order. Detections dropped as malformed are left out.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<TrackedObject>, PipelineError<D::Error>> {
        let detections = self
            .detector
            .detect(input, width, height)
            .map_err(PipelineError::Detection)?;
        Ok(self.track(detections))
    }

    /// Track detections produced elsewhere.
    pub fn track(&mut self, detections: impl IntoDetections) -> Vec<TrackedObject> {
        let detections = detections.into_detections();
        let boxes: Vec<BoundingBox> = detections.iter().map(|d| d.bbox).collect();
        let ids = self.tracker.track_boxes(&boxes);

        detections
            .into_iter()
            .zip(ids)
            .filter_map(|(detection, id)| {
                id.map(|track_id| TrackedObject {
                    track_id,
                    detection,
                })
            })
            .collect()
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
    pub fn tracker(&self) -> &IouTracker {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut IouTracker {
        &mut self.tracker
    }
}
