//! Greedy one-to-one matching of detections to tracks.

use crate::tracker::bbox::{BoundingBox, iou_matrix};
use crate::tracker::track_set::TrackId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentResult {
    /// `(detection_index, track_id)` pairs, sorted by detection index
    pub matches: Vec<(usize, TrackId)>,
    /// Detection indices left without a track, ascending
    pub unmatched_detections: Vec<usize>,
    /// Track IDs left without a detection, ascending
    pub unmatched_tracks: Vec<TrackId>,
}

/// Assign detections to candidate tracks, highest overlap first.
///
/// Every pair with IoU at or above `thresh` is a candidate. Candidates are
/// committed in order of descending IoU, ties broken by lowest track ID and
/// then lowest detection index; a pair is skipped once either side has been
/// taken. Each detection and each track ends up in at most one match.
pub fn greedy_assignment(
    detections: &[BoundingBox],
    tracks: &[(TrackId, BoundingBox)],
    thresh: f32,
) -> AssignmentResult {
    if detections.is_empty() || tracks.is_empty() {
        return AssignmentResult {
            matches: vec![],
            unmatched_detections: (0..detections.len()).collect(),
            unmatched_tracks: sorted_ids(tracks),
        };
    }

    let track_boxes: Vec<BoundingBox> = tracks.iter().map(|(_, bbox)| *bbox).collect();
    let ious = iou_matrix(detections, &track_boxes);

    let mut pairs: Vec<(f32, TrackId, usize, usize)> = Vec::new();
    for ((det_idx, trk_idx), &iou) in ious.indexed_iter() {
        if iou >= thresh {
            pairs.push((iou, tracks[trk_idx].0, det_idx, trk_idx));
        }
    }
    pairs.sort_by(|a, b| {
        b.0.total_cmp(&a.0)
            .then_with(|| a.1.cmp(&b.1))
            .then_with(|| a.2.cmp(&b.2))
    });

    let mut det_taken = vec![false; detections.len()];
    let mut trk_taken = vec![false; tracks.len()];
    let mut matches = Vec::new();

    for (_, track_id, det_idx, trk_idx) in pairs {
        if det_taken[det_idx] || trk_taken[trk_idx] {
            continue;
        }
        det_taken[det_idx] = true;
        trk_taken[trk_idx] = true;
        matches.push((det_idx, track_id));
    }
    matches.sort_unstable_by_key(|&(det_idx, _)| det_idx);

    let unmatched_detections = det_taken
        .iter()
        .enumerate()
        .filter_map(|(i, &taken)| if taken { None } else { Some(i) })
        .collect();

    let mut unmatched_tracks: Vec<TrackId> = trk_taken
        .iter()
        .zip(tracks)
        .filter_map(|(&taken, (id, _))| if taken { None } else { Some(*id) })
        .collect();
    unmatched_tracks.sort_unstable();

    AssignmentResult {
        matches,
        unmatched_detections,
        unmatched_tracks,
    }
}

fn sorted_ids(tracks: &[(TrackId, BoundingBox)]) -> Vec<TrackId> {
    let mut ids: Vec<TrackId> = tracks.iter().map(|(id, _)| *id).collect();
    ids.sort_unstable();
    ids
}
