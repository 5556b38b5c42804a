//! Active and lost track collections keyed by track ID.

use std::collections::{BTreeMap, HashSet};

use crate::tracker::bbox::BoundingBox;

/// Identity assigned to a tracked object. Minted sequentially from zero.
pub type TrackId = u64;

/// Tracks matched in the most recent frame.
#[derive(Debug, Clone, Default)]
pub struct ActiveTrackSet {
    tracks: BTreeMap<TrackId, BoundingBox>,
}

impl ActiveTrackSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the box of `id`.
    pub fn insert(&mut self, id: TrackId, bbox: BoundingBox) {
        self.tracks.insert(id, bbox);
    }

    pub fn remove(&mut self, id: TrackId) -> Option<BoundingBox> {
        self.tracks.remove(&id)
    }

    pub fn get(&self, id: TrackId) -> Option<&BoundingBox> {
        self.tracks.get(&id)
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.tracks.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Iterate over `(id, box)` in ascending ID order.
    pub fn iter(&self) -> impl Iterator<Item = (TrackId, &BoundingBox)> {
        self.tracks.iter().map(|(&id, bbox)| (id, bbox))
    }

    pub fn ids(&self) -> impl Iterator<Item = TrackId> + '_ {
        self.tracks.keys().copied()
    }

    /// Snapshot of `(id, box)` pairs in ascending ID order, the shape the
    /// matcher consumes.
    pub fn to_candidates(&self) -> Vec<(TrackId, BoundingBox)> {
        self.tracks.iter().map(|(&id, &bbox)| (id, bbox)).collect()
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}

/// A track that went unmatched and is waiting to be reacquired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LostTrack {
    pub id: TrackId,
    /// Last box seen before the track was lost
    pub bbox: BoundingBox,
    /// Frames since the track was last seen, starting at 1
    pub age: u32,
}

/// Tracks presumed temporarily occluded.
#[derive(Debug, Clone, Default)]
pub struct LostTrackSet {
    tracks: BTreeMap<TrackId, LostTrack>,
}

impl LostTrackSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id` as lost this frame with age 1.
    pub fn mark_lost(&mut self, id: TrackId, bbox: BoundingBox) {
        self.tracks.insert(id, LostTrack { id, bbox, age: 1 });
    }

    /// Take `id` out of the lost set so it can return to the active set.
    pub fn reacquire(&mut self, id: TrackId) -> Option<LostTrack> {
        self.tracks.remove(&id)
    }

    /// Age every entry by one frame, except the ones declared lost this
    /// frame, then purge entries whose age reached `lost_threshold`.
    ///
    /// Returns the purged IDs in ascending order.
    pub fn age_and_purge(&mut self, lost_threshold: u32, fresh: &HashSet<TrackId>) -> Vec<TrackId> {
        for track in self.tracks.values_mut() {
            if !fresh.contains(&track.id) {
                track.age = track.age.saturating_add(1);
            }
        }

        let purged: Vec<TrackId> = self
            .tracks
            .values()
            .filter(|t| t.age >= lost_threshold)
            .map(|t| t.id)
            .collect();
        for id in &purged {
            self.tracks.remove(id);
        }
        purged
    }

    pub fn get(&self, id: TrackId) -> Option<&LostTrack> {
        self.tracks.get(&id)
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.tracks.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Iterate over lost tracks in ascending ID order.
    pub fn iter(&self) -> impl Iterator<Item = &LostTrack> {
        self.tracks.values()
    }

    pub fn to_candidates(&self) -> Vec<(TrackId, BoundingBox)> {
        self.tracks.values().map(|t| (t.id, t.bbox)).collect()
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}
