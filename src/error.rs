//! Error types for the tracker.

use thiserror::Error;

/// Errors reported by the tracker.
///
/// Configuration errors are fatal to a tracker instance and are returned from
/// [`IouTracker::new`](crate::IouTracker::new). `MalformedBox` only ever
/// rejects a single detection; the frame carries on without it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    /// An IoU threshold outside `[0, 1]` (NaN included).
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidThreshold { name: &'static str, value: f32 },

    /// `lost_threshold` must allow at least one frame of memory.
    #[error("lost_threshold must be greater than zero")]
    InvalidLostThreshold,

    /// A box with non-finite coordinates or a negative extent.
    #[error("malformed bounding box [{x}, {y}, {width}, {height}]")]
    MalformedBox {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}
