mod bbox;
mod iou_tracker;
mod matching;
mod track_set;
mod track_state;

pub use bbox::{BoundingBox, BoxFormat, iou, iou_matrix};
pub use iou_tracker::{IouTracker, TrackerConfig};
pub use matching::{AssignmentResult, greedy_assignment};
pub use track_set::{ActiveTrackSet, LostTrack, LostTrackSet, TrackId};
pub use track_state::TrackState;
