//! Integration module for connecting object detection backends with the tracker.
//!
//! Detection models, frame decoding and overlay rendering live outside this
//! crate. This module defines the seam they plug into and a pipeline that pairs
//! every detection with the ID the tracker assigned to it.

mod builder;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{Detection, DetectionSource, IntoDetections};
pub use pipeline::{PipelineError, TrackedObject, TrackerPipeline};
