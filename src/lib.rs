//! Greedy IoU multi-object tracker.
//!
//! Assigns stable integer identities to per-frame bounding-box detections and
//! keeps recently disappeared objects around for a few frames so that short
//! occlusions do not fragment an identity.

pub mod error;
pub mod integration;
pub mod tracker;

pub use error::TrackerError;
pub use integration::{
    Detection, DetectionBuilder, DetectionSource, PipelineError, TrackedObject, TrackerPipeline,
};
pub use tracker::{
    ActiveTrackSet, AssignmentResult, BoundingBox, BoxFormat, IouTracker, LostTrack, LostTrackSet,
    TrackId, TrackState, TrackerConfig, greedy_assignment, iou, iou_matrix,
};
