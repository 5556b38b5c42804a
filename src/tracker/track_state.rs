/// Lifecycle of a track ID: `Active <-> Lost -> Purged`.
///
/// A minted ID enters the active set in the same frame, so there is no
/// separate state for a brand-new track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    /// Matched to a detection in the most recent frame
    Active,
    /// Unmatched, kept for possible reacquisition
    Lost,
    /// Lost for too long; terminal, the ID is never reused
    Purged,
}
