//! Main IouTracker algorithm implementation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::TrackerError;
use crate::tracker::bbox::{BoundingBox, BoxFormat};
use crate::tracker::matching::{self, AssignmentResult};
use crate::tracker::track_set::{ActiveTrackSet, LostTrackSet, TrackId};
use crate::tracker::track_state::TrackState;

/// Configuration for the IouTracker.
///
/// When deserialized, the three thresholds must all be present; only
/// `input_format` falls back to XYXY.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Minimum IoU to keep an active track matched to a detection
    pub active_iou_threshold: f32,
    /// Minimum IoU to bring a lost track back
    pub reacquisition_iou_threshold: f32,
    /// Lost age at which a track is purged for good
    pub lost_threshold: u32,
    /// Coordinate convention of raw boxes passed to `track_objects`
    #[serde(default)]
    pub input_format: BoxFormat,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            active_iou_threshold: 0.5,
            reacquisition_iou_threshold: 0.4,
            lost_threshold: 4,
            input_format: BoxFormat::Xyxy,
        }
    }
}

impl TrackerConfig {
    pub fn with_active_iou_threshold(mut self, thresh: f32) -> Self {
        self.active_iou_threshold = thresh;
        self
    }

    pub fn with_reacquisition_iou_threshold(mut self, thresh: f32) -> Self {
        self.reacquisition_iou_threshold = thresh;
        self
    }

    pub fn with_lost_threshold(mut self, frames: u32) -> Self {
        self.lost_threshold = frames;
        self
    }

    pub fn with_input_format(mut self, format: BoxFormat) -> Self {
        self.input_format = format;
        self
    }

    /// Check every field; out-of-range values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), TrackerError> {
        check_threshold("active_iou_threshold", self.active_iou_threshold)?;
        check_threshold(
            "reacquisition_iou_threshold",
            self.reacquisition_iou_threshold,
        )?;
        if self.lost_threshold == 0 {
            return Err(TrackerError::InvalidLostThreshold);
        }
        Ok(())
    }
}

fn check_threshold(name: &'static str, value: f32) -> Result<(), TrackerError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TrackerError::InvalidThreshold { name, value })
    }
}

/// Per-session multi-object tracker.
///
/// Each call to [`track_objects`](Self::track_objects) processes one frame.
/// All state lives in the instance, so independent sessions never interfere.
#[derive(Debug, Clone)]
pub struct IouTracker {
    active: ActiveTrackSet,
    lost: LostTrackSet,
    frame_count: u64,
    next_id: TrackId,
    config: TrackerConfig,
}

impl IouTracker {
    pub fn new(config: TrackerConfig) -> Result<Self, TrackerError> {
        config.validate()?;
        Ok(Self {
            active: ActiveTrackSet::new(),
            lost: LostTrackSet::new(),
            frame_count: 0,
            next_id: 0,
            config,
        })
    }

    /// Track one frame of raw boxes given in `config.input_format`.
    ///
    /// The output is aligned with `detections`. A detection rejected as
    /// malformed (non-finite values or negative size after conversion) gets
    /// `None` and takes no part in matching; every other entry gets the ID it
    /// was matched, reacquired or minted with.
    pub fn track_objects(&mut self, detections: &[[f32; 4]]) -> Vec<Option<TrackId>> {
        let format = self.config.input_format;
        let boxes: Vec<BoundingBox> = detections
            .iter()
            .map(|&raw| BoundingBox::from_raw(raw, format))
            .collect();
        self.track_boxes(&boxes)
    }

    /// Track one frame of already normalized boxes.
    pub fn track_boxes(&mut self, boxes: &[BoundingBox]) -> Vec<Option<TrackId>> {
        let mut ids: Vec<Option<TrackId>> = vec![None; boxes.len()];

        // Keep valid detections together with their position in the input.
        let mut origin = Vec::with_capacity(boxes.len());
        let mut detections = Vec::with_capacity(boxes.len());
        for (idx, bbox) in boxes.iter().enumerate() {
            match bbox.validate() {
                Ok(()) => {
                    origin.push(idx);
                    detections.push(*bbox);
                }
                Err(err) => {
                    warn!(frame = self.frame_count, index = idx, %err, "dropping detection");
                }
            }
        }

        if self.frame_count == 0 {
            for (det_idx, bbox) in detections.iter().enumerate() {
                let id = self.mint(*bbox);
                ids[origin[det_idx]] = Some(id);
            }
        } else {
            for (det_idx, id) in self.associate(&detections) {
                ids[origin[det_idx]] = Some(id);
            }
        }

        self.frame_count += 1;
        trace!(
            frame = self.frame_count,
            active = self.active.len(),
            lost = self.lost.len(),
            "frame processed"
        );
        ids
    }

    /// Match against active tracks, reconcile the lost set and mint IDs for
    /// what is left. Returns `(detection_index, id)` for every detection.
    fn associate(&mut self, detections: &[BoundingBox]) -> Vec<(usize, TrackId)> {
        let mut assigned = Vec::with_capacity(detections.len());

        let AssignmentResult {
            matches,
            unmatched_detections,
            unmatched_tracks,
        } = matching::greedy_assignment(
            detections,
            &self.active.to_candidates(),
            self.config.active_iou_threshold,
        );

        for (det_idx, id) in matches {
            self.active.insert(id, detections[det_idx]);
            assigned.push((det_idx, id));
        }

        let mut fresh = HashSet::with_capacity(unmatched_tracks.len());
        for id in unmatched_tracks {
            if let Some(bbox) = self.active.remove(id) {
                debug!(track_id = id, frame = self.frame_count, "track lost");
                self.lost.mark_lost(id, bbox);
                fresh.insert(id);
            }
        }

        let remaining: Vec<BoundingBox> = unmatched_detections
            .iter()
            .map(|&i| detections[i])
            .collect();
        let reacquired = matching::greedy_assignment(
            &remaining,
            &self.lost.to_candidates(),
            self.config.reacquisition_iou_threshold,
        );

        for (rem_idx, id) in reacquired.matches {
            let det_idx = unmatched_detections[rem_idx];
            if let Some(track) = self.lost.reacquire(id) {
                debug!(
                    track_id = id,
                    age = track.age,
                    frame = self.frame_count,
                    "track reacquired"
                );
                fresh.remove(&id);
                self.active.insert(id, detections[det_idx]);
                assigned.push((det_idx, id));
            }
        }

        for id in self.lost.age_and_purge(self.config.lost_threshold, &fresh) {
            debug!(track_id = id, frame = self.frame_count, "track purged");
        }

        for rem_idx in reacquired.unmatched_detections {
            let det_idx = unmatched_detections[rem_idx];
            let id = self.mint(detections[det_idx]);
            assigned.push((det_idx, id));
        }

        assigned
    }

    fn mint(&mut self, bbox: BoundingBox) -> TrackId {
        let id = self.next_id;
        self.next_id += 1;
        self.active.insert(id, bbox);
        debug!(track_id = id, frame = self.frame_count, "new track");
        id
    }

    /// Number of frames processed so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// The ID the next new track will receive.
    pub fn next_id(&self) -> TrackId {
        self.next_id
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn active_tracks(&self) -> &ActiveTrackSet {
        &self.active
    }

    pub fn lost_tracks(&self) -> &LostTrackSet {
        &self.lost
    }

    /// State of `id` between frames, or `None` if it was never minted.
    pub fn track_state(&self, id: TrackId) -> Option<TrackState> {
        if id >= self.next_id {
            None
        } else if self.active.contains(id) {
            Some(TrackState::Active)
        } else if self.lost.contains(id) {
            Some(TrackState::Lost)
        } else {
            Some(TrackState::Purged)
        }
    }

    /// Forget every track and start a new session with the same configuration.
    pub fn reset(&mut self) {
        self.active.clear();
        self.lost.clear();
        self.frame_count = 0;
        self.next_id = 0;
    }
}
